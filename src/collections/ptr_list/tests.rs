#![cfg(test)]

use super::*;
use crate::alloc::Tracking;
use crate::collections::buffer::RemoveStrategy;
use crate::error::IndexOutOfBounds;
use crate::traits::ReadBuffer;
use crate::util::alloc::CountedDrop;

#[test]
fn test_push_and_get() {
    let values = [10, 20, 30];
    let mut list = PtrList::with_cap(2);
    for value in &values {
        list.push(value);
    }

    assert_eq!(list.len(), 3);
    assert!(list.cap() >= 3);
    assert_eq!(list.get(1), Ok(&20));
    assert!(std::ptr::eq(list.get(1).unwrap(), &values[1]), "Get should return the stored reference.");
    assert_eq!(list.get(3), Err(IndexOutOfBounds { index: 3, len: 3 }));
}

#[test]
fn test_index_of_ptr_compares_addresses() {
    let a = String::from("same");
    let b = String::from("same");
    let list: PtrList<'_, String> = [&a, &a].into_iter().collect();

    assert_eq!(list.index_of_ptr(&a), Some(0));
    assert_eq!(
        list.index_of_ptr(&b),
        None,
        "Equal values at a different address shouldn't match."
    );
}

#[test]
fn test_never_drops_pointees() {
    let counter = CountedDrop::new(0);
    let values = [counter.clone(), counter.clone(), counter.clone()];
    let mut list = PtrList::new();
    list.extend(&values);

    list.remove(0, RemoveStrategy::Stable).unwrap();
    list.pop();
    list.resize(5, &values[2]);
    list.truncate(1);
    drop(list);
    assert_eq!(counter.get(), 0, "The list shouldn't drop anything it points to.");

    drop(values);
    assert_eq!(counter.take(), 3);
}

#[test]
fn test_insert_and_remove() {
    let (a, b, c, d) = ('a', 'b', 'c', 'd');
    let mut list = PtrList::new();
    list.extend([&a, &c]);

    list.insert(1, &b).unwrap();
    assert!(list.insert(3, &d).is_err(), "Inserting at the length should be rejected.");
    list.push(&d);
    assert_eq!(list.iter().collect::<String>(), "abcd");

    assert_eq!(list.remove(0, RemoveStrategy::Fast), Ok(&'a'));
    assert_eq!(list.iter().collect::<String>(), "dbc");
    assert_eq!(list.set(0, &a), Ok(&'d'));
    assert_eq!(list.remove(1, RemoveStrategy::Stable), Ok(&'b'));
    assert_eq!(list.iter().collect::<String>(), "ac");
}

#[test]
fn test_unsized_pointees() {
    let text = String::from("alpha beta");
    let mut list: PtrList<'_, str> = PtrList::new();
    list.push(&text[..5]);
    list.push(&text[6..]);

    assert_eq!(list.get(1), Ok("beta"));
    assert_eq!(list.index_of_ptr(&text[6..]), Some(1));
    assert_eq!(list.index_of_ptr(&text[6..8]), None, "The length is part of the address.");

    let owned = list.to_owned_vector();
    assert_eq!(&*owned, &["alpha".to_owned(), "beta".to_owned()]);
}

#[test]
fn test_capacity() {
    let tracking = Tracking::new();
    let value = 1_u64;
    let mut list = PtrList::with_cap_in(8, &tracking);
    list.push(&value);

    list.shrink_to_fit();
    assert_eq!(list.cap(), 1);
    assert_eq!(list.has_space(), 0);
    list.try_reserve(4).unwrap();
    assert!(list.has_space() >= 4);
    assert_eq!(list.elsize(), size_of::<&u64>());
    assert!(!list.is_view());

    drop(list);
    assert_eq!(tracking.stats().live_blocks, 0);
}

#[test]
fn test_iterators() {
    let values = [1, 2, 3];
    let list: PtrList<'_, i32> = values.iter().collect();

    let mut slide = list.slide();
    assert_eq!(slide.next_back(), Some(&&3));
    slide.reset();
    assert_eq!(slide.count(), 3);

    let total: i32 = list.into_iter().sum();
    assert_eq!(total, 6);
}
