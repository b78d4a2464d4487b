#![cfg(test)]

use std::iter;

use super::index::{coords_2d, coords_3d, index_2d, index_3d};
use super::*;
use crate::alloc::Limited;
use crate::error::{IndexOrReserveError, IndexOutOfBounds, ReserveError};
use crate::traits::ReadBuffer;
use crate::util::alloc::{CountedDrop, ZeroSizedType};
use crate::util::panic::assert_panics;

fn abcd() -> Buffer<char> {
    let mut buf = Buffer::with_cap(4);
    buf.extend_from_slice(&['a', 'b', 'c', 'd']);
    buf
}

#[test]
fn test_new_does_not_allocate() {
    let buf = Buffer::<u32>::new();
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.cap(), 0, "A new Buffer shouldn't reserve any capacity.");
    assert_eq!(buf.head(), None, "An empty Buffer has no head.");
    assert_eq!(buf.elsize(), 4);
}

#[test]
fn test_get_and_set_bounds() {
    let mut buf = abcd();
    assert_eq!(buf.get(0), Ok(&'a'));
    assert_eq!(buf.get(3), Ok(&'d'));
    assert_eq!(
        buf.get(4),
        Err(IndexOutOfBounds { index: 4, len: 4 }),
        "Index equal to the length should be out of bounds."
    );

    assert_eq!(buf.set(1, 'x'), Ok('b'), "Set should return the old value.");
    assert_eq!(buf.set(4, 'y'), Err(IndexOutOfBounds { index: 4, len: 4 }));
    assert_eq!(buf.cap(), 4, "Set should never grow the Buffer.");
    assert_eq!(&*buf, &['a', 'x', 'c', 'd']);

    *buf.get_mut(2).unwrap() = 'z';
    assert_eq!(buf.head(), Some(&'a'));
    assert_eq!(&*buf, &['a', 'x', 'z', 'd']);
}

#[test]
fn test_growth_policy() {
    let mut buf = Buffer::<u8>::new();
    buf.push(0);
    assert_eq!(buf.cap(), 1, "Growing from empty should add at least one slot.");

    let mut buf = Buffer::<u8>::with_cap(9);
    buf.extend_from_slice(&[0; 9]);
    buf.push(9);
    assert_eq!(buf.cap(), 12, "Growth should add a third of the capacity.");

    buf.try_reserve(20).unwrap();
    assert_eq!(buf.cap(), 30, "Growth should cover the requested amount if it's larger.");

    buf.try_reserve(5).unwrap();
    assert_eq!(buf.cap(), 30, "Reserving available space shouldn't reallocate.");

    buf.try_reserve_exact(25).unwrap();
    assert_eq!(buf.cap(), 35);
}

#[test]
fn test_capacity_overflow() {
    let mut buf = Buffer::<u64>::new();
    assert!(matches!(
        buf.try_reserve(isize::MAX as usize),
        Err(ReserveError::CapacityOverflow(_))
    ));
    assert!(matches!(
        buf.try_reserve(usize::MAX),
        Err(ReserveError::CapacityOverflow(_))
    ));
    assert_eq!(buf.cap(), 0, "A failed reserve shouldn't change the Buffer.");

    assert_panics!({
        let mut buf = Buffer::<u64>::new();
        buf.reserve(isize::MAX as usize)
    });
}

#[test]
fn test_shrink_to_fit() {
    let mut buf = Buffer::<u32>::with_cap(10);
    buf.extend_from_slice(&[1, 2, 3]);

    buf.shrink_to_fit();
    assert_eq!(buf.cap(), 3);
    buf.shrink_to_fit();
    assert_eq!(buf.cap(), 3, "Shrinking twice should be idempotent.");
    assert_eq!(&*buf, &[1, 2, 3]);

    buf.clear();
    buf.shrink_to_fit();
    assert_eq!(buf.cap(), 0, "Shrinking an empty Buffer should release the allocation.");
}

#[test]
fn test_slide() {
    let buf = abcd();
    let mut slide = buf.slide();
    assert_eq!(slide.len(), 4);
    assert_eq!(slide.next(), Some(&'a'));
    assert_eq!(slide.position(), 1);
    assert_eq!(slide.next_back(), Some(&'d'));
    assert_eq!(slide.as_slice(), &['b', 'c']);
    assert_eq!(slide.by_ref().count(), 2);
    assert_eq!(slide.next(), None, "An exhausted Slide should stay exhausted.");
    assert_eq!(slide.next_back(), None);

    slide.reset();
    assert_eq!(
        slide.collect::<String>(),
        "abcd",
        "A reset Slide should cover every element again."
    );

    let mut first = buf.slide();
    let second = buf.slide();
    first.next();
    assert_eq!(second.position(), 0, "Slides shouldn't share a position.");

    assert_eq!(Buffer::<u8>::new().slide().next(), None);
}

#[test]
fn test_insert() {
    let mut buf = abcd();
    buf.insert(0, 'x').unwrap();
    buf.insert(4, 'y').unwrap();
    assert_eq!(&*buf, &['x', 'a', 'b', 'c', 'y', 'd']);

    assert_eq!(
        buf.insert(6, 'z'),
        Err(IndexOutOfBounds { index: 6, len: 6 }),
        "Inserting at the length should be rejected."
    );
    assert!(matches!(
        buf.try_insert(7, 'z'),
        Err(IndexOrReserveError::IndexOutOfBounds(_))
    ));
    assert_eq!(buf.len(), 6);

    let mut empty = Buffer::<u8>::new();
    assert!(empty.insert(0, 1).is_err(), "An empty Buffer has no position to insert at.");
}

#[test]
fn test_remove() {
    let mut buf = abcd();
    assert_eq!(buf.remove(0, RemoveStrategy::Stable), Ok('a'));
    assert_eq!(&*buf, &['b', 'c', 'd'], "Stable removal should preserve order.");

    let mut buf = abcd();
    assert_eq!(buf.remove(0, RemoveStrategy::Fast), Ok('a'));
    assert_eq!(&*buf, &['d', 'b', 'c'], "Fast removal should move the last element.");

    let mut buf = abcd();
    assert_eq!(buf.remove(3, RemoveStrategy::Fast), Ok('d'));
    assert_eq!(buf.remove(2, RemoveStrategy::Stable), Ok('c'));
    assert_eq!(&*buf, &['a', 'b']);

    assert_eq!(
        buf.remove(2, RemoveStrategy::Stable),
        Err(IndexOutOfBounds { index: 2, len: 2 })
    );
    assert_eq!(buf.len(), 2);
}

#[test]
fn test_remove_range() {
    let mut buf = Buffer::new();
    buf.extend_from_slice(b"hello world");

    assert_eq!(buf.remove_range(5, 1), Ok(1));
    assert_eq!(&*buf, b"helloworld");
    assert_eq!(buf.remove_range(5, 100), Ok(5), "Count should be clamped to the end.");
    assert_eq!(&*buf, b"hello");
    assert!(buf.remove_range(5, 1).is_err());

    let counter = CountedDrop::new(0);
    let mut buf = Buffer::new();
    buf.extend_from_slice(&[counter.clone(), counter.clone(), counter.clone()]);
    counter.set(0);
    buf.remove_range(0, 2).unwrap();
    assert_eq!(counter.take(), 2, "Removed elements should be dropped.");
}

#[test]
fn test_insert_slice() {
    let mut buf = Buffer::new();
    buf.extend_from_slice(&[1, 5]);
    buf.try_insert_slice(1, &[2, 3, 4]).unwrap();
    assert_eq!(&*buf, &[1, 2, 3, 4, 5]);
    assert!(buf.try_insert_slice(5, &[6]).is_err());
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new(0);
    let mut buf = Buffer::new();
    for item in iter::repeat_with(|| counter.clone()).take(10) {
        buf.push(item);
    }

    buf.truncate(6);
    assert_eq!(counter.take(), 4, "Truncating should drop the removed elements.");

    let popped = buf.pop();
    assert_eq!(counter.take(), 0, "Popping should move the element out, not drop it.");
    drop(popped);

    drop(buf);
    assert_eq!(counter.take(), 6, "Dropping should drop every remaining element.");
}

#[test]
fn test_zst_support() {
    let mut buf = Buffer::new();
    for _ in 0..5 {
        buf.push(ZeroSizedType);
    }
    assert_eq!(buf.len(), 5);
    assert_eq!(buf.get(4), Ok(&ZeroSizedType));
    assert_eq!(buf.remove(0, RemoveStrategy::Stable), Ok(ZeroSizedType));
    assert_eq!(buf.slide().count(), 4);

    buf.shrink_to_fit();
    assert_eq!(buf.cap(), 4);
}

#[test]
fn test_failed_growth_leaves_buffer_unchanged() {
    let limited = Limited::new(4);
    let mut buf = Buffer::<u8, _>::new_in(&limited);
    buf.try_extend_from_slice(b"abcd").unwrap();

    assert!(matches!(buf.try_push(b'e'), Err(ReserveError::Allocation(_))));
    assert!(buf.try_extend_from_slice(b"ef").is_err());
    assert!(matches!(
        buf.try_insert(0, b'e'),
        Err(IndexOrReserveError::Allocation(_))
    ));
    assert_eq!(&*buf, b"abcd");
    assert_eq!(buf.cap(), 4);
}

#[test]
fn test_clone() {
    let mut buf = Buffer::with_cap(20);
    buf.extend_from_slice(&[1, 2, 3, 4, 5]);

    let clone = buf.clone();
    assert_eq!(clone, buf);
    assert_eq!(clone.cap(), 5, "A clone should have capacity equal to its length.");
    assert_ne!(clone.as_ptr(), buf.as_ptr(), "A clone shouldn't share memory.");
}

#[test]
fn test_view() {
    let buf = abcd();
    let view = buf.view();
    assert_eq!(view.len(), 4);
    assert_eq!(view.cap(), 4);
    assert_eq!(view.has_space(), 0, "A view has no spare capacity.");
    assert_eq!(view.get(4), Err(IndexOutOfBounds { index: 4, len: 4 }));
    assert_eq!(view.head(), Some(&'a'));

    assert!(ReadBuffer::is_view(&view));
    assert!(!ReadBuffer::is_view(&buf));
    assert_eq!(ReadBuffer::get(&view, 1), ReadBuffer::get(&buf, 1));

    let literal = BufferView::from("static text");
    assert_eq!(literal.len(), 11);
    assert_eq!(literal.slide().next_back(), Some(&b't'));
}

#[test]
fn test_index_mapping() {
    assert_eq!(index_2d(2, 3, 4), 11);
    assert_eq!(coords_2d(11, 4), (2, 3));
    assert_eq!(index_3d(1, 2, 3, 3, 4), 23);
    assert_eq!(coords_3d(23, 3, 4), (1, 2, 3));

    for index in 0..60 {
        let (depth, row, col) = coords_3d(index, 3, 4);
        assert_eq!(index_3d(depth, row, col, 3, 4), index);
    }
}

#[cfg(feature = "grid")]
#[test]
fn test_grid() {
    let mut grid = Grid::new(3, 4, '.').unwrap();
    assert_eq!(grid.as_buffer().len(), 12);

    assert_eq!(grid.set(2, 3, '#'), Ok('.'));
    assert_eq!(grid.get(2, 3), Ok(&'#'));
    assert_eq!(grid.as_buffer().get(11), Ok(&'#'), "Cells should be stored row-major.");
    assert_eq!(grid.coords(11), (2, 3));

    assert_eq!(
        grid.get(3, 0),
        Err(IndexOutOfBounds { index: 3, len: 3 }),
        "The row should be reported when it's out of bounds."
    );
    assert_eq!(
        grid.get(0, 4),
        Err(IndexOutOfBounds { index: 4, len: 4 }),
        "The column should be reported when it's out of bounds."
    );
    assert_eq!(grid.row(2), Ok(&['.', '.', '.', '#'][..]));

    assert!(Grid::new(0, 4, 0).is_err(), "Zero rows should be rejected.");
    assert!(Grid::new(4, 0, 0).is_err(), "Zero columns should be rejected.");
}
