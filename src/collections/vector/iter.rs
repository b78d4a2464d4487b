use std::iter::FusedIterator;
use std::mem::ManuallyDrop;
use std::ptr;

use super::Vector;
use crate::alloc::Allocator;
use crate::collections::buffer::{RawBuffer, Slide};

impl<T, A: Allocator> IntoIterator for Vector<T, A> {
    type Item = T;

    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        let (ptr, len, cap, alloc) = self.into_parts();
        IntoIter {
            // SAFETY: The parts came straight from a Vector, so they describe a valid allocation.
            raw: unsafe { RawBuffer::from_parts(ptr, cap, alloc) },
            front: 0,
            back: len,
        }
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Vector<T, A> {
    type Item = &'a T;

    type IntoIter = Slide<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.slide()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Vector<T, A> {
    type Item = &'a mut T;

    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owned type for owned iteration over a [`Vector`]. See [`Vector::into_iter`].
///
/// Values in `front..back` are still initialized, everything else has already been moved out.
pub struct IntoIter<T, A: Allocator> {
    raw: RawBuffer<T, A>,
    front: usize,
    back: usize,
}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        let remaining = ptr::slice_from_raw_parts_mut(
            // SAFETY: front <= back <= cap, so the offset is within the allocation.
            unsafe { self.raw.as_ptr().add(self.front) },
            self.back - self.front,
        );
        // SAFETY: Values in front..back haven't been yielded and are still initialized. The
        // RawBuffer then frees the memory without touching any values.
        unsafe { ptr::drop_in_place(remaining) }
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            // SAFETY: front < back, so the value is initialized and hasn't been yielded yet.
            let value = unsafe { self.raw.as_ptr().add(self.front).read() };
            self.front += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            // SAFETY: back has just been decremented and is still >= front, so the value is
            // initialized and hasn't been yielded yet.
            Some(unsafe { self.raw.as_ptr().add(self.back).read() })
        } else {
            None
        }
    }
}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {
    fn len(&self) -> usize {
        self.back - self.front
    }
}

impl<T, A: Allocator> IntoIter<T, A> {
    /// Returns the values that have yet to be yielded, as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: Values in front..back are initialized and the pointer is aligned.
        unsafe { std::slice::from_raw_parts(self.raw.as_ptr().add(self.front), self.len()) }
    }

    /// Collects the remaining values back into a Vector, reusing the allocation.
    pub fn into_vector(self) -> Vector<T, A> {
        let this = ManuallyDrop::new(self);
        let len = this.back - this.front;
        // SAFETY: this is forgotten, so the RawBuffer is moved out exactly once.
        let raw = unsafe { ptr::read(&this.raw) };
        // SAFETY: Moving the remaining values to the front keeps them within the allocation.
        unsafe { ptr::copy(raw.as_ptr().add(this.front), raw.as_ptr(), len) };
        let (ptr, cap, alloc) = raw.into_parts();
        // SAFETY: The first len values of the allocation are initialized.
        unsafe { Vector::from_parts(ptr, len, cap, alloc) }
    }
}
