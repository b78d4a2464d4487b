use std::borrow::{Borrow, BorrowMut};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::alloc::{Allocator, Global};
use crate::collections::buffer::{Buffer, BufferView, RawBuffer, RemoveStrategy, Slide};
use crate::error::{IndexOrReserveError, IndexOutOfBounds, ReserveError};
use crate::traits::ReadBuffer;

/// A variable size contiguous collection, based on [`Buffer<T>`].
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Vector.
/// - `i`: The index of the item in question.
/// - `m`: The number of items in the second Vector.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `insert` | `O(n-i)` |
/// | `remove` | `O(n-i)`, `O(1)`** |
/// | `set` | `O(1)` |
/// | `reserve` | `O(n)`***, `O(1)` |
/// | `shrink_to_fit` | `O(n)` |
/// | `resize` | `O(n)` |
/// | `append` | `O(n+m)` |
/// | `index_of` | `O(n)` |
///
/// \* If the Vector doesn't have enough capacity for the new element, `push` will take `O(n)`.
///
/// \** With [`RemoveStrategy::Fast`].
///
/// \*** If the Vector has enough capacity for the additional items already, `reserve` is `O(1)`.
pub struct Vector<T, A: Allocator = Global> {
    pub(crate) buf: Buffer<T, A>,
}

impl<T> Vector<T> {
    /// Creates a new Vector with length and capacity 0. Memory will be allocated when the capacity
    /// changes.
    ///
    /// # Examples
    /// ```
    /// # use buffer_lib::collections::vector::Vector;
    /// let vec: Vector<u8> = Vector::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.cap(), 0);
    /// ```
    pub const fn new() -> Vector<T> {
        Vector::new_in(Global)
    }

    /// Creates a new Vector with capacity exactly equal to the provided value, allowing values to
    /// be added without reallocation.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use buffer_lib::collections::vector::Vector;
    /// let mut vec: Vector<u8> = Vector::with_cap(5);
    /// assert_eq!(vec.cap(), 5);
    /// vec.extend([1_u8, 2, 3, 4, 5]);
    /// assert_eq!(vec.cap(), 5);
    /// ```
    #[track_caller]
    pub fn with_cap(cap: usize) -> Vector<T> {
        Vector::with_cap_in(cap, Global)
    }

    /// Creates a Vector from an [`ExactSizeIterator`], allocating exactly enough capacity up
    /// front.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    #[track_caller]
    pub fn from_iter_sized<I>(iter: I) -> Vector<T>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        let mut vec = Vector::with_cap(iter.len());
        vec.extend(iter);
        vec
    }
}

impl<T, A: Allocator> Vector<T, A> {
    /// Creates a new, empty Vector which will allocate from `alloc`.
    pub const fn new_in(alloc: A) -> Vector<T, A> {
        Vector {
            buf: Buffer::new_in(alloc),
        }
    }

    /// Creates a new Vector with capacity exactly `cap`, allocated from `alloc`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`]. Allocation failure is handled by
    /// aborting.
    #[track_caller]
    pub fn with_cap_in(cap: usize, alloc: A) -> Vector<T, A> {
        Vector {
            buf: Buffer::with_cap_in(cap, alloc),
        }
    }

    /// Creates a new Vector with capacity exactly `cap`, allocated from `alloc`.
    ///
    /// # Errors
    /// Returns an error if the layout would overflow or `alloc` fails.
    #[track_caller]
    pub fn try_with_cap_in(cap: usize, alloc: A) -> Result<Vector<T, A>, ReserveError> {
        Ok(Vector {
            buf: Buffer::try_with_cap_in(cap, alloc)?,
        })
    }

    /// Returns the length of the Vector.
    ///
    /// # Examples
    /// ```
    /// # use buffer_lib::collections::vector::Vector;
    /// let vec = Vector::from_iter_sized(1_u8..=3);
    /// assert_eq!(vec.len(), 3);
    /// ```
    pub const fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if the Vector contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the current capacity of the Vector. Unlike [`Vec`], the capacity is exactly the
    /// value provided to any of the capacity manipulation functions, or the result of the
    /// documented growth policy.
    pub const fn cap(&self) -> usize {
        self.buf.cap()
    }

    /// Returns the number of elements that can be pushed before the Vector has to grow.
    pub const fn has_space(&self) -> usize {
        self.buf.has_space()
    }

    /// Returns the size in bytes of a single element.
    pub const fn elsize(&self) -> usize {
        self.buf.elsize()
    }

    /// Returns a reference to the allocator backing this Vector.
    pub const fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Returns the Buffer backing this Vector.
    pub const fn as_buffer(&self) -> &Buffer<T, A> {
        &self.buf
    }

    /// Returns the first element, or [`None`] if the Vector is empty.
    pub fn head(&self) -> Option<&T> {
        self.buf.head()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.buf.get(index)
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        self.buf.get_mut(index)
    }

    /// Replaces the element at the provided index with `value`, returning the old value.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, IndexOutOfBounds> {
        self.buf.set(index, value)
    }

    /// Returns a restartable, double-ended iterator over the elements.
    pub fn slide(&self) -> Slide<'_, T> {
        self.buf.slide()
    }

    /// Borrows the elements of the Vector as a read-only [`BufferView`].
    pub fn view(&self) -> BufferView<'_, T> {
        self.buf.view()
    }

    /// Push the provided value onto the end of the Vector, increasing the capacity if required.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use buffer_lib::collections::vector::Vector;
    /// let mut vec = Vector::<u8>::new();
    /// for i in 0..=5 {
    ///     vec.push(i);
    /// }
    /// assert_eq!(&*vec, &[0, 1, 2, 3, 4, 5]);
    /// ```
    #[track_caller]
    pub fn push(&mut self, value: T) {
        self.buf.push(value)
    }

    /// Push the provided value onto the end of the Vector, increasing the capacity if required.
    ///
    /// # Errors
    /// Returns an error if the Vector couldn't grow. The Vector is left unchanged.
    #[track_caller]
    pub fn try_push(&mut self, value: T) -> Result<(), ReserveError> {
        self.buf.try_push(value)
    }

    /// Pops the last value off the end of the Vector, returning an owned value if the Vector has
    /// length greater than 0.
    ///
    /// # Examples
    /// ```
    /// # use buffer_lib::collections::vector::Vector;
    /// let mut vec = Vector::from_iter_sized(0..5);
    /// for i in (0..vec.len()).rev() {
    ///     assert_eq!(vec.pop(), Some(i));
    /// }
    /// assert_eq!(vec.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        self.buf.pop()
    }

    /// Inserts the provided value at the given index, growing and moving items as necessary.
    /// Appending is done with [`Vector::push`], so `index` has to refer to an existing element.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use buffer_lib::collections::vector::Vector;
    /// let mut vec = Vector::from_iter_sized(0..3);
    /// vec.insert(1, 100).unwrap();
    /// vec.insert(1, 200).unwrap();
    /// vec.insert(3, 300).unwrap();
    /// assert_eq!(&*vec, &[0, 200, 100, 300, 1, 2]);
    /// assert!(vec.insert(6, 400).is_err());
    /// ```
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), IndexOutOfBounds> {
        self.buf.insert(index, value)
    }

    /// Inserts the provided value at the given index, growing and moving items as necessary.
    ///
    /// # Errors
    /// Returns an error if `index >= len` or the Vector couldn't grow.
    #[track_caller]
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), IndexOrReserveError> {
        self.buf.try_insert(index, value)
    }

    /// Removes the element at the provided index, filling the gap according to `strategy`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use buffer_lib::collections::buffer::RemoveStrategy;
    /// # use buffer_lib::collections::vector::Vector;
    /// let mut vec: Vector<_> = "Hello world!".chars().collect();
    /// assert_eq!(vec.remove(1, RemoveStrategy::Stable), Ok('e'));
    /// assert_eq!(vec.remove(4, RemoveStrategy::Stable), Ok(' '));
    /// assert_eq!(vec, "Hlloworld!".chars().collect());
    /// ```
    pub fn remove(&mut self, index: usize, strategy: RemoveStrategy) -> Result<T, IndexOutOfBounds> {
        self.buf.remove(index, strategy)
    }

    /// Shortens the Vector to `len` elements, dropping the rest.
    pub fn truncate(&mut self, len: usize) {
        self.buf.truncate(len)
    }

    /// Drops every element, keeping the capacity.
    pub fn clear(&mut self) {
        self.buf.clear()
    }

    /// Returns the index of the first element equal to `value`, or [`None`] if there isn't one.
    ///
    /// # Examples
    /// ```
    /// # use buffer_lib::collections::vector::Vector;
    /// let vec = Vector::from_iter_sized([3, 1, 4, 1, 5]);
    /// assert_eq!(vec.index_of(&1), Some(1));
    /// assert_eq!(vec.index_of(&9), None);
    /// ```
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|item| item == value)
    }

    /// Ensures that the Vector has capacity to hold an additional `extra` elements, following
    /// the growth policy if it has to grow.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    #[track_caller]
    pub fn reserve(&mut self, extra: usize) {
        self.buf.reserve(extra)
    }

    /// Ensures that the Vector has capacity to hold an additional `extra` elements.
    ///
    /// # Errors
    /// Returns an error if the Vector couldn't grow, leaving it unchanged.
    #[track_caller]
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), ReserveError> {
        self.buf.try_reserve(extra)
    }

    /// Ensures that the capacity of the Vector is at least `len + extra`, growing it to exactly
    /// that if needed.
    ///
    /// # Errors
    /// Returns an error if the Vector couldn't grow, leaving it unchanged.
    #[track_caller]
    pub fn try_reserve_exact(&mut self, extra: usize) -> Result<(), ReserveError> {
        self.buf.try_reserve_exact(extra)
    }

    /// Shrinks the Vector so that its capacity is equal to its length.
    #[track_caller]
    pub fn shrink_to_fit(&mut self) {
        self.buf.shrink_to_fit()
    }

    /// Shrinks the Vector so that its capacity is equal to its length.
    ///
    /// # Errors
    /// Returns an error if the allocator failed to shrink the allocation.
    #[track_caller]
    pub fn try_shrink_to_fit(&mut self) -> Result<(), ReserveError> {
        self.buf.try_shrink_to_fit()
    }

    /// Resizes the Vector to `len`, dropping elements or filling new slots with values returned
    /// by `f`. If `len` exceeds the capacity, the capacity grows to exactly `len`.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    #[track_caller]
    pub fn resize_with(&mut self, len: usize, f: impl FnMut() -> T) {
        if let Err(error) = self.try_resize_with(len, f) {
            error.throw()
        }
    }

    /// Resizes the Vector to `len`, dropping elements or filling new slots with values returned
    /// by `f`. If `len` exceeds the capacity, the capacity grows to exactly `len`.
    ///
    /// # Errors
    /// Returns an error if the Vector couldn't grow, leaving it unchanged.
    #[track_caller]
    pub fn try_resize_with(
        &mut self,
        len: usize,
        mut f: impl FnMut() -> T,
    ) -> Result<(), ReserveError> {
        if len <= self.len() {
            self.truncate(len);
            return Ok(());
        }

        self.buf.try_reserve_exact(len - self.len())?;
        while self.len() < len {
            // SAFETY: Capacity for len values has been reserved.
            unsafe { self.buf.push_unchecked(f()) }
        }
        Ok(())
    }

    /// Resizes the Vector to `len`, dropping elements or filling new slots with clones of
    /// `value`.
    ///
    /// # Examples
    /// ```
    /// # use buffer_lib::collections::vector::Vector;
    /// let mut vec = Vector::from_iter_sized([1, 2]);
    /// vec.resize(4, 0);
    /// assert_eq!(&*vec, &[1, 2, 0, 0]);
    /// assert_eq!(vec.cap(), 4);
    /// vec.resize(1, 0);
    /// assert_eq!(&*vec, &[1]);
    /// ```
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    #[track_caller]
    pub fn resize(&mut self, len: usize, value: T)
    where
        T: Clone,
    {
        self.resize_with(len, || value.clone())
    }

    /// Moves all elements from `other` onto the end of self.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    #[track_caller]
    pub fn append<B: Allocator>(&mut self, other: Vector<T, B>) {
        self.reserve(other.len());
        for value in other {
            // SAFETY: Capacity for every value in other has been reserved.
            unsafe { self.buf.push_unchecked(value) }
        }
    }

    /// Deep copies the Vector into a new allocation, sharing the allocator. The copy's capacity
    /// is exactly its length, regardless of the capacity of self.
    ///
    /// # Errors
    /// Returns an error if the allocation fails.
    #[track_caller]
    pub fn try_dup(&self) -> Result<Vector<T, A>, ReserveError>
    where
        T: Clone,
        A: Clone,
    {
        Ok(Vector {
            buf: self.buf.try_clone_in(self.allocator().clone())?,
        })
    }

    /// Decomposes the Vector into a pointer, length, capacity and allocator without dropping any
    /// elements or freeing the allocation.
    pub fn into_parts(self) -> (NonNull<T>, usize, usize, A) {
        let this = ManuallyDrop::new(self);
        let len = this.len();
        // SAFETY: this is never used or dropped again, so the Buffer is moved out exactly once.
        let buf = unsafe { std::ptr::read(&this.buf) };
        let buf = ManuallyDrop::new(buf);
        // SAFETY: As above, the RawBuffer is moved out of the forgotten Buffer exactly once.
        let raw = unsafe { std::ptr::read(&buf.raw) };
        let (ptr, cap, alloc) = raw.into_parts();
        (ptr, len, cap, alloc)
    }

    /// Recreates a Vector from the parts returned by [`Vector::into_parts`].
    ///
    /// # Safety
    /// `ptr` must have been allocated by `alloc` for `cap` values of `T`, with the first `len`
    /// of them initialized, and must not be owned by anything else.
    pub unsafe fn from_parts(ptr: NonNull<T>, len: usize, cap: usize, alloc: A) -> Vector<T, A> {
        Vector {
            buf: Buffer {
                // SAFETY: The caller upholds the requirements of RawBuffer::from_parts.
                raw: unsafe { RawBuffer::from_parts(ptr, cap, alloc) },
                len,
            },
        }
    }
}

impl<T, A: Allocator> Extend<T> for Vector<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Copy + 'a, A: Allocator> Extend<&'a T> for Vector<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        <Self as Extend<T>>::extend(self, iter.into_iter().copied())
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut vec = Vector::with_cap(iter.size_hint().0);

        for item in iter {
            vec.push(item);
        }

        vec
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Allocator> Deref for Vector<T, A> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl<T, A: Allocator> DerefMut for Vector<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buf
    }
}

impl<T, A: Allocator> AsRef<[T]> for Vector<T, A> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, A: Allocator> AsMut<[T]> for Vector<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T, A: Allocator> Borrow<[T]> for Vector<T, A> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T, A: Allocator> BorrowMut<[T]> for Vector<T, A> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T, A: Allocator> ReadBuffer<T> for Vector<T, A> {
    fn as_slice(&self) -> &[T] {
        self
    }

    fn cap(&self) -> usize {
        self.buf.cap()
    }

    fn is_view(&self) -> bool {
        false
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for Vector<T, A> {
    fn clone(&self) -> Self {
        match self.try_dup() {
            Ok(vec) => vec,
            Err(error) => error.throw(),
        }
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(value: Vec<T>) -> Self {
        let mut value = ManuallyDrop::new(value);
        let (len, cap) = (value.len(), value.capacity());
        // SAFETY: Vec's pointer is never null.
        let ptr = unsafe { NonNull::new_unchecked(value.as_mut_ptr()) };
        // SAFETY: Vec allocates Layout::array::<T>(cap) from the global allocator, which is what
        // Global uses, and the Vec has been forgotten so it no longer owns the allocation.
        unsafe { Vector::from_parts(ptr, len, cap, Global) }
    }
}

impl<T> From<Vector<T>> for Vec<T> {
    fn from(value: Vector<T>) -> Self {
        let (ptr, len, cap, _) = value.into_parts();
        // SAFETY: The allocation was made by Global, which is the global allocator, with the
        // layout of cap values of T, and the first len of them are initialized.
        unsafe { Vec::from_raw_parts(ptr.as_ptr(), len, cap) }
    }
}

impl<T: Clone> From<&[T]> for Vector<T> {
    fn from(value: &[T]) -> Self {
        let mut vec = Vector::with_cap(value.len());
        vec.buf.extend_from_slice(value);
        vec
    }
}

impl<T: PartialEq, A: Allocator> PartialEq for Vector<T, A> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq, A: Allocator> Eq for Vector<T, A> {}

impl<T: Hash, A: Allocator> Hash for Vector<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug, A: Allocator> Debug for Vector<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("contents", &&**self)
            .field("len", &self.len())
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Debug, A: Allocator> Display for Vector<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
