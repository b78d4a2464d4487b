use std::iter::FusedIterator;

use super::{Buffer, BufferView};
use crate::alloc::Allocator;

/// A restartable, double-ended iterator over the elements of a buffer, created by
/// [`Buffer::slide`] or [`BufferView::slide`].
///
/// Iterating forwards with [`next`](Iterator::next) and backwards with
/// [`next_back`](DoubleEndedIterator::next_back) consumes the same range from either end. Once
/// exhausted, a Slide keeps returning [`None`] until [`reset`](Slide::reset) is called. Every
/// Slide carries its own position, so several passes over one buffer never interfere.
///
/// # Examples
/// ```
/// # use buffer_lib::collections::buffer::Buffer;
/// let mut buf = Buffer::new();
/// buf.extend_from_slice(&[1, 2, 3]);
///
/// let mut slide = buf.slide();
/// assert_eq!(slide.next(), Some(&1));
/// assert_eq!(slide.next_back(), Some(&3));
/// assert_eq!(slide.next(), Some(&2));
/// assert_eq!(slide.next(), None);
///
/// slide.reset();
/// assert_eq!(slide.rev().copied().collect::<Vec<_>>(), [3, 2, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct Slide<'a, T> {
    pub(crate) items: &'a [T],
    pub(crate) front: usize,
    pub(crate) back: usize,
}

impl<'a, T> Slide<'a, T> {
    /// Creates a new Slide over every element of `items`.
    pub const fn new(items: &'a [T]) -> Slide<'a, T> {
        Slide {
            items,
            front: 0,
            back: items.len(),
        }
    }

    /// Restarts the Slide, so that it covers every element again.
    pub const fn reset(&mut self) {
        self.front = 0;
        self.back = self.items.len();
    }

    /// Returns the index of the element that the next call to `next` would yield.
    pub const fn position(&self) -> usize {
        self.front
    }

    /// Returns the elements that are yet to be yielded, as a slice.
    pub fn as_slice(&self) -> &'a [T] {
        &self.items[self.front..self.back]
    }
}

impl<'a, T> Iterator for Slide<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let item = &self.items[self.front];
            self.front += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<T> DoubleEndedIterator for Slide<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            Some(&self.items[self.back])
        } else {
            None
        }
    }
}

impl<T> ExactSizeIterator for Slide<'_, T> {
    fn len(&self) -> usize {
        self.back - self.front
    }
}

impl<T> FusedIterator for Slide<'_, T> {}

impl<'a, T, A: Allocator> IntoIterator for &'a Buffer<T, A> {
    type Item = &'a T;

    type IntoIter = Slide<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.slide()
    }
}

impl<'a, T> IntoIterator for BufferView<'a, T> {
    type Item = &'a T;

    type IntoIter = Slide<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.slide()
    }
}
