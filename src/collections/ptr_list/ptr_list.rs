use std::fmt::{self, Debug, Formatter};
use std::iter::Copied;
use std::ops::Deref;
use std::ptr;

use crate::alloc::{Allocator, Global};
use crate::collections::buffer::{Buffer, RemoveStrategy, Slide};
use crate::collections::vector::{IntoIter, Vector};
use crate::error::{IndexOrReserveError, IndexOutOfBounds, ReserveError};
use crate::traits::ReadBuffer;

/// A growable list of references to values owned elsewhere.
///
/// A PtrList never owns what it points at: dropping the list only frees the list itself. This is
/// enforced by the lifetime `'a`, which keeps every referenced value alive (and unmoved) for as
/// long as the list exists. It offers the same growth and removal vocabulary as
/// [`Vector`], but compares elements by address in [`index_of_ptr`](PtrList::index_of_ptr).
///
/// # Examples
/// ```
/// # use buffer_lib::collections::ptr_list::PtrList;
/// let words = [String::from("one"), String::from("two"), String::from("one")];
/// let mut list = PtrList::new();
/// for word in &words {
///     list.push(word);
/// }
/// assert_eq!(list.index_of_ptr(&words[2]), Some(2));
/// drop(list);
/// assert_eq!(words[0], "one");
/// ```
pub struct PtrList<'a, T: ?Sized, A: Allocator = Global> {
    pub(crate) buf: Buffer<&'a T, A>,
}

impl<'a, T: ?Sized> PtrList<'a, T> {
    /// Creates a new, empty PtrList. Nothing is allocated until the capacity changes.
    pub const fn new() -> PtrList<'a, T> {
        PtrList::new_in(Global)
    }

    /// Creates a new PtrList with space for exactly `cap` references.
    ///
    /// # Panics
    /// Panics if the memory layout size exceeds [`isize::MAX`].
    #[track_caller]
    pub fn with_cap(cap: usize) -> PtrList<'a, T> {
        PtrList::with_cap_in(cap, Global)
    }
}

impl<'a, T: ?Sized, A: Allocator> PtrList<'a, T, A> {
    /// Creates a new, empty PtrList which will allocate from `alloc`.
    pub const fn new_in(alloc: A) -> PtrList<'a, T, A> {
        PtrList {
            buf: Buffer::new_in(alloc),
        }
    }

    /// Creates a new PtrList with space for exactly `cap` references, allocated from `alloc`.
    ///
    /// # Panics
    /// Panics if the memory layout size exceeds [`isize::MAX`].
    #[track_caller]
    pub fn with_cap_in(cap: usize, alloc: A) -> PtrList<'a, T, A> {
        PtrList {
            buf: Buffer::with_cap_in(cap, alloc),
        }
    }

    /// Creates a new PtrList with space for exactly `cap` references, allocated from `alloc`.
    ///
    /// # Errors
    /// Returns an error if the layout would overflow or `alloc` fails.
    #[track_caller]
    pub fn try_with_cap_in(cap: usize, alloc: A) -> Result<PtrList<'a, T, A>, ReserveError> {
        Ok(PtrList {
            buf: Buffer::try_with_cap_in(cap, alloc)?,
        })
    }

    pub const fn len(&self) -> usize {
        self.buf.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub const fn cap(&self) -> usize {
        self.buf.cap()
    }

    pub const fn has_space(&self) -> usize {
        self.buf.has_space()
    }

    /// Returns the size of a single stored reference, which is larger for unsized `T`.
    pub const fn elsize(&self) -> usize {
        self.buf.elsize()
    }

    /// Returns the reference at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&'a T, IndexOutOfBounds> {
        self.buf.get(index).copied()
    }

    /// Replaces the reference at `index`, returning the previous one.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn set(&mut self, index: usize, value: &'a T) -> Result<&'a T, IndexOutOfBounds> {
        self.buf.set(index, value)
    }

    /// Returns an iterator over the stored references.
    pub fn iter(&self) -> Copied<Slide<'_, &'a T>> {
        self.buf.slide().copied()
    }

    /// Returns a restartable iterator over the stored references.
    pub fn slide(&self) -> Slide<'_, &'a T> {
        self.buf.slide()
    }

    #[track_caller]
    pub fn push(&mut self, value: &'a T) {
        self.buf.push(value)
    }

    /// Pushes `value` onto the end of the list.
    ///
    /// # Errors
    /// Returns an error if the list couldn't grow, leaving it unchanged.
    #[track_caller]
    pub fn try_push(&mut self, value: &'a T) -> Result<(), ReserveError> {
        self.buf.try_push(value)
    }

    pub fn pop(&mut self) -> Option<&'a T> {
        self.buf.pop()
    }

    /// Inserts `value` at `index`, shifting the following references up.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: &'a T) -> Result<(), IndexOutOfBounds> {
        self.buf.insert(index, value)
    }

    /// Inserts `value` at `index`, shifting the following references up.
    ///
    /// # Errors
    /// Returns an error if `index >= len` or the list couldn't grow.
    #[track_caller]
    pub fn try_insert(&mut self, index: usize, value: &'a T) -> Result<(), IndexOrReserveError> {
        self.buf.try_insert(index, value)
    }

    /// Removes the reference at `index`, filling the gap according to `strategy`. The referenced
    /// value is untouched.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn remove(&mut self, index: usize, strategy: RemoveStrategy) -> Result<&'a T, IndexOutOfBounds> {
        self.buf.remove(index, strategy)
    }

    /// Resizes the list to `len`, filling any new slots with `fill`.
    ///
    /// # Panics
    /// Panics if the memory layout size exceeds [`isize::MAX`].
    #[track_caller]
    pub fn resize(&mut self, len: usize, fill: &'a T) {
        self.resize_with(len, || fill)
    }

    /// Resizes the list to `len`, filling any new slots with references returned by `f`. If
    /// `len` exceeds the capacity, the capacity grows to exactly `len`.
    ///
    /// # Panics
    /// Panics if the memory layout size exceeds [`isize::MAX`].
    #[track_caller]
    pub fn resize_with(&mut self, len: usize, mut f: impl FnMut() -> &'a T) {
        if len <= self.len() {
            self.truncate(len);
            return;
        }

        if let Err(error) = self.buf.try_reserve_exact(len - self.len()) {
            error.throw()
        }
        while self.len() < len {
            // SAFETY: Capacity for len references has just been reserved.
            unsafe { self.buf.push_unchecked(f()) }
        }
    }

    pub fn truncate(&mut self, len: usize) {
        self.buf.truncate(len)
    }

    pub fn clear(&mut self) {
        self.buf.clear()
    }

    #[track_caller]
    pub fn reserve(&mut self, extra: usize) {
        self.buf.reserve(extra)
    }

    /// Ensures that `extra` more references can be pushed without reallocating.
    ///
    /// # Errors
    /// Returns an error if the list couldn't grow, leaving it unchanged.
    #[track_caller]
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), ReserveError> {
        self.buf.try_reserve(extra)
    }

    #[track_caller]
    pub fn shrink_to_fit(&mut self) {
        self.buf.shrink_to_fit()
    }

    /// Shrinks the capacity of the list to its length.
    ///
    /// # Errors
    /// Returns an error if the allocator failed to shrink the allocation.
    #[track_caller]
    pub fn try_shrink_to_fit(&mut self) -> Result<(), ReserveError> {
        self.buf.try_shrink_to_fit()
    }

    /// Returns the index of the first reference pointing at the same address as `value`.
    /// Unlike [`Vector::index_of`], the values themselves are never compared.
    pub fn index_of_ptr(&self, value: &T) -> Option<usize> {
        self.iter().position(|item| ptr::eq(item, value))
    }

    /// Clones every referenced value into a new, owning [`Vector`].
    pub fn to_owned_vector(&self) -> Vector<T::Owned>
    where
        T: ToOwned,
    {
        Vector::from_iter_sized(self.iter().map(ToOwned::to_owned))
    }
}

impl<T: ?Sized> Default for PtrList<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: ?Sized, A: Allocator> Deref for PtrList<'a, T, A> {
    type Target = [&'a T];

    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl<'a, T: ?Sized, A: Allocator> ReadBuffer<&'a T> for PtrList<'a, T, A> {
    fn as_slice(&self) -> &[&'a T] {
        &self.buf
    }

    fn cap(&self) -> usize {
        self.buf.cap()
    }

    fn is_view(&self) -> bool {
        false
    }
}

impl<'a, T: ?Sized, A: Allocator> Extend<&'a T> for PtrList<'a, T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: ?Sized> FromIterator<&'a T> for PtrList<'a, T> {
    fn from_iter<I: IntoIterator<Item = &'a T>>(iter: I) -> Self {
        let mut list = PtrList::new();
        list.extend(iter);
        list
    }
}

impl<'a, T: ?Sized, A: Allocator> IntoIterator for PtrList<'a, T, A> {
    type Item = &'a T;

    type IntoIter = IntoIter<&'a T, A>;

    fn into_iter(self) -> Self::IntoIter {
        Vector { buf: self.buf }.into_iter()
    }
}

impl<T: ?Sized + Debug, A: Allocator> Debug for PtrList<'_, T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PtrList")
            .field("contents", &&**self)
            .field("len", &self.len())
            .field("cap", &self.cap())
            .finish()
    }
}
