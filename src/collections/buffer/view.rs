use std::fmt::{self, Debug, Formatter};
use std::ops::Deref;

use super::Slide;
use crate::error::IndexOutOfBounds;

/// A read-only view of elements owned elsewhere, such as a literal or a borrowed [`Buffer`].
///
/// A BufferView offers the same read accessors as an owning buffer but has no way to mutate or
/// free what it points at. Its capacity is always equal to its length.
///
/// # Examples
/// ```
/// # use buffer_lib::collections::buffer::BufferView;
/// let view = BufferView::from("hello");
/// assert_eq!(view.len(), 5);
/// assert_eq!(view.get(1), Ok(&b'e'));
/// assert_eq!(view.has_space(), 0);
/// ```
///
/// [`Buffer`]: super::Buffer
#[derive(PartialEq, Eq, Hash)]
pub struct BufferView<'a, T> {
    pub(crate) items: &'a [T],
}

impl<'a, T> BufferView<'a, T> {
    /// Creates a new BufferView over `items`.
    pub const fn new(items: &'a [T]) -> BufferView<'a, T> {
        BufferView { items }
    }

    /// Returns the number of elements in view.
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the view contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the capacity of the view, which is always its length.
    pub const fn cap(&self) -> usize {
        self.items.len()
    }

    /// Always returns 0, a view can't be grown.
    pub const fn has_space(&self) -> usize {
        0
    }

    /// Returns the size in bytes of a single element.
    pub const fn elsize(&self) -> usize {
        size_of::<T>()
    }

    /// Returns the viewed elements with the lifetime of the original borrow.
    pub const fn as_slice(&self) -> &'a [T] {
        self.items
    }

    /// Returns the first element, or [`None`] if the view is empty.
    pub const fn head(&self) -> Option<&'a T> {
        self.items.first()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&'a T, IndexOutOfBounds> {
        self.items.get(index).ok_or_else(|| {
            log::debug!("index {} out of bounds for view of length {}", index, self.len());
            IndexOutOfBounds {
                index,
                len: self.len(),
            }
        })
    }

    /// Returns a restartable iterator over the viewed elements.
    pub const fn slide(&self) -> Slide<'a, T> {
        Slide::new(self.items)
    }
}

impl<T> Clone for BufferView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BufferView<'_, T> {}

impl<T> Deref for BufferView<'_, T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.items
    }
}

impl<T> AsRef<[T]> for BufferView<'_, T> {
    fn as_ref(&self) -> &[T] {
        self.items
    }
}

impl<'a, T> From<&'a [T]> for BufferView<'a, T> {
    fn from(value: &'a [T]) -> Self {
        BufferView::new(value)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for BufferView<'a, T> {
    fn from(value: &'a [T; N]) -> Self {
        BufferView::new(value)
    }
}

impl<'a> From<&'a str> for BufferView<'a, u8> {
    fn from(value: &'a str) -> Self {
        BufferView::new(value.as_bytes())
    }
}

impl<T: Debug> Debug for BufferView<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferView")
            .field("contents", &self.items)
            .field("len", &self.len())
            .finish()
    }
}
