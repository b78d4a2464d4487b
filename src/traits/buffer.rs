use crate::alloc::Allocator;
use crate::collections::buffer::{Buffer, BufferView, Slide};
use crate::error::IndexOutOfBounds;

/// The read-only vocabulary shared by every buffer-backed type, owning or not.
///
/// Owning containers and [`BufferView`]s expose the same accessors, so code which only needs to
/// look at elements can be written once against this trait. Whether the implementor owns its
/// elements is reported by [`is_view`](ReadBuffer::is_view), but only owning types have any
/// mutating methods in the first place.
pub trait ReadBuffer<T> {
    /// Returns the elements as a slice.
    fn as_slice(&self) -> &[T];

    /// Returns the number of elements that can be held without reallocating.
    fn cap(&self) -> usize;

    /// Returns true if the elements are owned by something else.
    fn is_view(&self) -> bool;

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of elements that can be added before a reallocation is required.
    fn has_space(&self) -> usize {
        self.cap() - self.len()
    }

    fn elsize(&self) -> usize {
        size_of::<T>()
    }

    fn head(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    fn get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        let items = self.as_slice();
        items.get(index).ok_or(IndexOutOfBounds {
            index,
            len: items.len(),
        })
    }

    fn slide(&self) -> Slide<'_, T> {
        Slide::new(self.as_slice())
    }
}

impl<T, A: Allocator> ReadBuffer<T> for Buffer<T, A> {
    fn as_slice(&self) -> &[T] {
        self
    }

    fn cap(&self) -> usize {
        Buffer::cap(self)
    }

    fn is_view(&self) -> bool {
        false
    }
}

impl<T> ReadBuffer<T> for BufferView<'_, T> {
    fn as_slice(&self) -> &[T] {
        self.items
    }

    fn cap(&self) -> usize {
        self.items.len()
    }

    fn is_view(&self) -> bool {
        true
    }
}
