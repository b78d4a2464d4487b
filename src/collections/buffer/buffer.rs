use std::cmp;
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use super::{BufferView, RawBuffer, Slide};
use crate::alloc::{Allocator, Global};
use crate::error::{CapacityOverflow, IndexOrReserveError, IndexOutOfBounds, ReserveError};

/// The minimum number of slots added when a Buffer grows.
const MIN_GROWTH: usize = 1;

/// Growth adds `cap / GROWTH_DIVISOR` slots, bounding over-allocation to a third.
const GROWTH_DIVISOR: usize = 3;

/// The strategy used by [`Buffer::remove`] to fill the gap left by the removed element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoveStrategy {
    /// Shift every following element down by one, preserving order. `O(n-i)`.
    #[default]
    Stable,
    /// Move the last element into the gap. `O(1)`, but doesn't preserve order.
    Fast,
}

/// The growable core shared by every container in this crate: a [`RawBuffer`] along with the
/// number of slots at the start of it that are initialized.
///
/// Capacity only ever changes through explicit reservation or through the growing methods
/// (`push`, `insert`, `extend_from_slice` and their `try_` versions). When there isn't enough
/// room, the capacity grows by a third (and at least by one), or straight to the required
/// amount if that is larger.
///
/// Methods come in two flavours. `try_` methods report allocation failures as
/// [`ReserveError`]s and leave the Buffer untouched when they fail. The others handle
/// allocation failure like [`Global`] does, by aborting. Index errors are always reported as an
/// [`IndexOutOfBounds`] rather than a panic.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Buffer.
/// - `i`: The index of the item in question.
/// - `m`: The number of items being added.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` / `set` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `insert` | `O(n-i)` |
/// | `remove` (`Stable`) | `O(n-i)` |
/// | `remove` (`Fast`) | `O(1)` |
/// | `extend_from_slice` | `O(m)`*, `O(n+m)` |
/// | `shrink_to_fit` | `O(n)` |
///
/// \* Amortized, if the Buffer has to grow the operation takes `O(n)`.
pub struct Buffer<T, A: Allocator = Global> {
    pub(crate) raw: RawBuffer<T, A>,
    pub(crate) len: usize,
}

impl<T> Buffer<T> {
    /// Creates a new, empty Buffer using the [`Global`] allocator. Nothing is allocated until the
    /// capacity changes.
    ///
    /// # Examples
    /// ```
    /// # use buffer_lib::collections::buffer::Buffer;
    /// let buf: Buffer<u8> = Buffer::new();
    /// assert_eq!(buf.len(), 0);
    /// assert_eq!(buf.cap(), 0);
    /// ```
    pub const fn new() -> Buffer<T> {
        Buffer::new_in(Global)
    }

    /// Creates a new Buffer with capacity exactly `cap`, using the [`Global`] allocator.
    ///
    /// # Panics
    /// Panics if the memory layout size exceeds [`isize::MAX`].
    #[track_caller]
    pub fn with_cap(cap: usize) -> Buffer<T> {
        Buffer::with_cap_in(cap, Global)
    }
}

impl<T, A: Allocator> Buffer<T, A> {
    /// Creates a new, empty Buffer which will allocate from `alloc`.
    pub const fn new_in(alloc: A) -> Buffer<T, A> {
        Buffer {
            raw: RawBuffer::new_in(alloc),
            len: 0,
        }
    }

    /// Creates a new Buffer with capacity exactly `cap`, allocated from `alloc`.
    ///
    /// # Panics
    /// Panics if the memory layout size exceeds [`isize::MAX`]. Allocation failure is handled
    /// by aborting.
    #[track_caller]
    pub fn with_cap_in(cap: usize, alloc: A) -> Buffer<T, A> {
        match Buffer::try_with_cap_in(cap, alloc) {
            Ok(buf) => buf,
            Err(error) => error.throw(),
        }
    }

    /// Creates a new Buffer with capacity exactly `cap`, allocated from `alloc`.
    ///
    /// # Errors
    /// Returns an error if the layout would overflow or `alloc` fails.
    #[track_caller]
    pub fn try_with_cap_in(cap: usize, alloc: A) -> Result<Buffer<T, A>, ReserveError> {
        Ok(Buffer {
            raw: RawBuffer::try_with_cap_in(cap, alloc)?,
            len: 0,
        })
    }

    /// Returns the number of elements in the Buffer.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Buffer contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the Buffer can hold without reallocating.
    pub const fn cap(&self) -> usize {
        self.raw.cap()
    }

    /// Returns the number of elements that can be added before the Buffer has to grow.
    pub const fn has_space(&self) -> usize {
        self.raw.cap() - self.len
    }

    /// Returns the size in bytes of a single element.
    pub const fn elsize(&self) -> usize {
        size_of::<T>()
    }

    /// Returns a reference to the allocator backing this Buffer.
    pub const fn allocator(&self) -> &A {
        self.raw.allocator()
    }

    /// Returns a raw pointer to the first slot. The pointer is dangling if nothing is allocated.
    pub const fn as_ptr(&self) -> *const T {
        self.raw.as_ptr().cast_const()
    }

    /// Returns a mutable raw pointer to the first slot. The pointer is dangling if nothing is
    /// allocated.
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.raw.as_ptr()
    }

    /// Returns the first element, or [`None`] if the Buffer is empty.
    pub fn head(&self) -> Option<&T> {
        if self.len == 0 {
            log::debug!("head requested from an empty buffer (cap {})", self.cap());
        }
        self.first()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use buffer_lib::collections::buffer::Buffer;
    /// let mut buf = Buffer::with_cap(3);
    /// buf.push(10_i32);
    /// buf.push(20);
    /// assert_eq!(buf.get(1), Ok(&20));
    /// assert!(buf.get(2).is_err());
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index < len and all values < len are initialized.
        Ok(unsafe { &*self.as_ptr().add(index) })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index < len and all values < len are initialized.
        Ok(unsafe { &mut *self.as_mut_ptr().add(index) })
    }

    /// Replaces the element at `index` with `value`, returning the previous element. The Buffer
    /// never grows as a result of this method.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, IndexOutOfBounds> {
        Ok(mem::replace(self.get_mut(index)?, value))
    }

    /// Returns a double-ended iterator over the elements of the Buffer. Each call creates a new,
    /// independent pass, which can be restarted with [`Slide::reset`].
    pub fn slide(&self) -> Slide<'_, T> {
        Slide::new(self)
    }

    /// Borrows the elements of the Buffer as a read-only [`BufferView`].
    pub fn view(&self) -> BufferView<'_, T> {
        BufferView::new(self)
    }

    /// Ensures that at least `extra` more elements can be added without reallocating, growing
    /// according to the Buffer's growth policy if needed.
    ///
    /// # Errors
    /// Returns an error if the new layout would overflow or the allocator fails, leaving the
    /// Buffer untouched.
    #[track_caller]
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), ReserveError> {
        if self.has_space() >= extra {
            return Ok(());
        }

        let required = self.len.checked_add(extra).ok_or(CapacityOverflow)?;
        let grown = self.cap().saturating_add(cmp::max(self.cap() / GROWTH_DIVISOR, MIN_GROWTH));
        self.raw.try_realloc(cmp::max(grown, required))
    }

    /// Ensures that at least `extra` more elements can be added without reallocating.
    ///
    /// # Panics
    /// Panics if the memory layout would exceed [`isize::MAX`]. Allocation failure is handled by
    /// aborting.
    #[track_caller]
    pub fn reserve(&mut self, extra: usize) {
        if let Err(error) = self.try_reserve(extra) {
            error.throw()
        }
    }

    /// Ensures that the capacity is at least `len + extra`, growing to exactly that value if
    /// needed.
    ///
    /// # Errors
    /// Returns an error if the new layout would overflow or the allocator fails, leaving the
    /// Buffer untouched.
    #[track_caller]
    pub fn try_reserve_exact(&mut self, extra: usize) -> Result<(), ReserveError> {
        if self.has_space() >= extra {
            return Ok(());
        }

        let required = self.len.checked_add(extra).ok_or(CapacityOverflow)?;
        self.raw.try_realloc(required)
    }

    /// Sets the capacity of the Buffer to exactly `cap`, dropping any elements that no longer
    /// fit.
    ///
    /// # Errors
    /// Returns an error if the new layout would overflow or the allocator fails. Elements past
    /// `cap` have already been dropped by then, but the allocation is untouched.
    #[track_caller]
    pub fn try_realloc(&mut self, cap: usize) -> Result<(), ReserveError> {
        self.truncate(cap);
        self.raw.try_realloc(cap)
    }

    /// Reduces the capacity of the Buffer to exactly its length. Does nothing if they are
    /// already equal.
    ///
    /// # Errors
    /// Returns an error if the allocator fails, leaving the Buffer untouched.
    #[track_caller]
    pub fn try_shrink_to_fit(&mut self) -> Result<(), ReserveError> {
        self.raw.try_realloc(self.len)
    }

    /// Reduces the capacity of the Buffer to exactly its length.
    ///
    /// Allocation failure is handled by aborting.
    #[track_caller]
    pub fn shrink_to_fit(&mut self) {
        if let Err(error) = self.try_shrink_to_fit() {
            error.throw()
        }
    }

    /// Pushes `value` onto the end of the Buffer, growing it if required.
    ///
    /// # Errors
    /// Returns an error if growing failed. The Buffer is left unchanged and `value` is dropped.
    #[track_caller]
    pub fn try_push(&mut self, value: T) -> Result<(), ReserveError> {
        self.try_reserve(1)?;
        // SAFETY: There is space for at least one more value.
        unsafe { self.push_unchecked(value) }
        Ok(())
    }

    /// Pushes `value` onto the end of the Buffer, growing it if required.
    ///
    /// # Panics
    /// Panics if the memory layout would exceed [`isize::MAX`]. Allocation failure is handled by
    /// aborting.
    #[track_caller]
    pub fn push(&mut self, value: T) {
        self.reserve(1);
        // SAFETY: There is space for at least one more value.
        unsafe { self.push_unchecked(value) }
    }

    /// Pushes `value` onto the end of the Buffer without checking the capacity.
    ///
    /// # Safety
    /// The Buffer must have space for at least one more value (`has_space() > 0`).
    pub unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.has_space() > 0);
        // SAFETY: The caller guarantees that slot len is within the allocation.
        unsafe { self.as_mut_ptr().add(self.len).write(value) }
        self.len += 1;
    }

    /// Removes and returns the last element, or [`None`] if the Buffer is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            // SAFETY: The value at the old last index is initialized and is no longer considered
            // part of the Buffer, so reading it moves it out.
            Some(unsafe { self.as_ptr().add(self.len).read() })
        }
    }

    /// Shortens the Buffer to `len` elements, dropping the rest. Has no effect if the Buffer is
    /// already shorter. The capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        let tail = ptr::slice_from_raw_parts_mut(
            // SAFETY: len < self.len, so the offset is within the allocation.
            unsafe { self.as_mut_ptr().add(len) },
            self.len - len,
        );
        // Update len first, so a panicking drop can't cause a double drop.
        self.len = len;
        // SAFETY: The tail slice contains initialized values which are no longer in the Buffer.
        unsafe { ptr::drop_in_place(tail) }
    }

    /// Drops every element, keeping the capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Inserts `value` at `index`, shifting all following elements up by one.
    ///
    /// Only existing positions can be inserted at, appending is done with [`Buffer::push`].
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`. Allocation failure is handled by aborting.
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), IndexOutOfBounds> {
        self.check_index(index)?;
        self.reserve(1);
        // SAFETY: index < len and there is space for one more value.
        unsafe { self.insert_unchecked(index, value) }
        Ok(())
    }

    /// Inserts `value` at `index`, shifting all following elements up by one.
    ///
    /// # Errors
    /// Returns an error if `index >= len` or the Buffer couldn't grow. The Buffer is left
    /// unchanged in either case.
    #[track_caller]
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), IndexOrReserveError> {
        self.check_index(index)?;
        self.try_reserve(1)?;
        // SAFETY: index < len and there is space for one more value.
        unsafe { self.insert_unchecked(index, value) }
        Ok(())
    }

    /// # Safety
    /// `index` must be `<= len` and the Buffer must have space for one more value.
    unsafe fn insert_unchecked(&mut self, index: usize, value: T) {
        // SAFETY: The caller guarantees that index <= len < cap, so both the source and
        // destination ranges are within the allocation. ptr::copy handles the overlap.
        unsafe {
            let slot = self.as_mut_ptr().add(index);
            ptr::copy(slot, slot.add(1), self.len - index);
            slot.write(value);
        }
        self.len += 1;
    }

    /// Removes and returns the element at `index`, filling the gap according to `strategy`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use buffer_lib::collections::buffer::{Buffer, RemoveStrategy};
    /// let mut buf = Buffer::new();
    /// buf.extend_from_slice(&['a', 'b', 'c', 'd']);
    /// assert_eq!(buf.remove(1, RemoveStrategy::Fast), Ok('b'));
    /// assert_eq!(&*buf, &['a', 'd', 'c']);
    /// assert_eq!(buf.remove(0, RemoveStrategy::Stable), Ok('a'));
    /// assert_eq!(&*buf, &['d', 'c']);
    /// ```
    pub fn remove(&mut self, index: usize, strategy: RemoveStrategy) -> Result<T, IndexOutOfBounds> {
        self.check_index(index)?;

        let last = self.len - 1;
        // SAFETY: index <= last < len, so every pointer used is to an initialized value. The
        // removed value is read out before its slot is overwritten.
        let value = unsafe {
            let slot = self.as_mut_ptr().add(index);
            let value = slot.read();
            match strategy {
                RemoveStrategy::Stable => ptr::copy(slot.add(1), slot, last - index),
                RemoveStrategy::Fast if index != last => {
                    ptr::copy_nonoverlapping(self.as_ptr().add(last), slot, 1);
                },
                RemoveStrategy::Fast => {},
            }
            value
        };

        self.len = last;
        Ok(value)
    }

    /// Removes up to `count` elements starting at `from`, shifting the rest down. `count` is
    /// clamped to the number of elements after `from`. Returns the number of elements removed.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `from >= len`.
    pub fn remove_range(&mut self, from: usize, count: usize) -> Result<usize, IndexOutOfBounds> {
        self.check_index(from)?;

        let count = cmp::min(count, self.len - from);
        let old_len = self.len;
        // Treat everything from `from` onwards as moved out while we work.
        self.len = from;

        // SAFETY: from + count <= old_len, so the dropped range and the moved tail are both
        // initialized and within the allocation.
        unsafe {
            let start = self.as_mut_ptr().add(from);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(start, count));
            ptr::copy(start.add(count), start, old_len - from - count);
        }

        self.len = old_len - count;
        Ok(count)
    }

    /// Calls [`Buffer::reserve`] so that `values` can be cloned onto the end in a single pass.
    ///
    /// # Panics
    /// Panics if the memory layout would exceed [`isize::MAX`]. Allocation failure is handled by
    /// aborting.
    #[track_caller]
    pub fn extend_from_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        self.reserve(values.len());
        // SAFETY: Capacity for all values has just been reserved.
        unsafe { self.extend_from_slice_unchecked(values) }
    }

    /// Clones every element of `values` onto the end of the Buffer.
    ///
    /// # Errors
    /// Returns an error if the Buffer couldn't grow, in which case nothing is added.
    #[track_caller]
    pub fn try_extend_from_slice(&mut self, values: &[T]) -> Result<(), ReserveError>
    where
        T: Clone,
    {
        self.try_reserve(values.len())?;
        // SAFETY: Capacity for all values has just been reserved.
        unsafe { self.extend_from_slice_unchecked(values) }
        Ok(())
    }

    /// # Safety
    /// The Buffer must have space for `values.len()` more elements.
    unsafe fn extend_from_slice_unchecked(&mut self, values: &[T])
    where
        T: Clone,
    {
        for value in values {
            // SAFETY: The caller guarantees there is enough space.
            unsafe { self.push_unchecked(value.clone()) }
        }
    }

    /// Copies `values` into the Buffer at `index`, shifting the following elements up.
    ///
    /// # Errors
    /// Returns an error if `index >= len` or the Buffer couldn't grow, leaving it unchanged.
    #[track_caller]
    pub fn try_insert_slice(&mut self, index: usize, values: &[T]) -> Result<(), IndexOrReserveError>
    where
        T: Copy,
    {
        self.check_index(index)?;
        self.try_reserve(values.len())?;

        // SAFETY: index < len and there is space for values.len() more elements. values can't
        // overlap the Buffer because we hold it mutably.
        unsafe {
            let slot = self.as_mut_ptr().add(index);
            ptr::copy(slot, slot.add(values.len()), self.len - index);
            ptr::copy_nonoverlapping(values.as_ptr(), slot, values.len());
        }
        self.len += values.len();
        Ok(())
    }

    /// Checks that `index` refers to an element of the Buffer.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub(crate) fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index >= self.len {
            log::debug!("index {} out of bounds for buffer of length {}", index, self.len);
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            })
        } else {
            Ok(())
        }
    }

    /// Deep copies the Buffer into a new allocation from `alloc`, with capacity equal to the
    /// length.
    ///
    /// # Errors
    /// Returns an error if the allocation fails.
    #[track_caller]
    pub fn try_clone_in<B: Allocator>(&self, alloc: B) -> Result<Buffer<T, B>, ReserveError>
    where
        T: Clone,
    {
        let mut buf = Buffer::try_with_cap_in(self.len, alloc)?;
        // SAFETY: buf has exactly enough capacity for every element.
        unsafe { buf.extend_from_slice_unchecked(self) }
        Ok(buf)
    }
}

impl<T> Default for Buffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Allocator> Drop for Buffer<T, A> {
    fn drop(&mut self) {
        // SAFETY: All values less than len are initialized and safe to drop.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len));
        }
        // self.raw is dropped implicitly, deallocating the memory without touching any values.
    }
}

impl<T, A: Allocator> Deref for Buffer<T, A> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The pointer is non-null and aligned, and the first len values are initialized.
        // The borrow checker prevents mutation for the lifetime of the slice.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }
}

impl<T, A: Allocator> DerefMut for Buffer<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: The pointer is non-null and aligned, and the first len values are initialized.
        // The borrow checker prevents any other access for the lifetime of the slice.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }
}

impl<T, A: Allocator> AsRef<[T]> for Buffer<T, A> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, A: Allocator> AsMut<[T]> for Buffer<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for Buffer<T, A> {
    fn clone(&self) -> Self {
        match self.try_clone_in(self.allocator().clone()) {
            Ok(buf) => buf,
            Err(error) => error.throw(),
        }
    }
}

impl<T: PartialEq, A: Allocator> PartialEq for Buffer<T, A> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq, A: Allocator> Eq for Buffer<T, A> {}

impl<T: Hash, A: Allocator> Hash for Buffer<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug, A: Allocator> Debug for Buffer<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}
