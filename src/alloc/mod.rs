//! The allocator abstraction that every buffer in this crate routes its memory through.
//!
//! Collections take an allocator as a type parameter, defaulting to [`Global`]. Because `&A` is
//! an [`Allocator`] whenever `A` is, several collections can share one allocator by reference
//! without any of them owning it.
//!
//! [`Global`] is fail-fast: it never reports a failure to the caller and instead terminates the
//! process. Other allocators, such as [`Limited`], may return an [`AllocError`], which buffers
//! then report upwards through their `try_` methods without modifying any state.

mod global;
mod limited;
mod tests;
mod tracking;

use std::alloc::Layout;
use std::ptr::{self, NonNull};

use derive_more::{Display, Error};

pub use global::*;
pub use limited::*;
pub use tracking::*;

/// The error returned by an [`Allocator`] that was unable to satisfy a request.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("memory allocation failed")]
pub struct AllocError;

/// A source of raw memory.
///
/// Buffers never call an allocator with a zero-sized layout, they use a dangling pointer
/// instead. Consequently `deallocate` is only ever called for memory that was actually
/// allocated.
pub trait Allocator {
    /// Allocates a block of memory fitting `layout`.
    ///
    /// # Errors
    /// Returns [`AllocError`] if the memory could not be provided. [`Global`] never does so.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Resizes the block at `ptr` to `new_size` bytes, keeping the alignment of `old_layout`.
    /// The first `min(old_layout.size(), new_size)` bytes are preserved.
    ///
    /// # Errors
    /// Returns [`AllocError`] if the block couldn't be resized, in which case `ptr` remains
    /// valid and unchanged.
    ///
    /// # Safety
    /// `ptr` must have been allocated by this allocator with `old_layout`, and `new_size` must
    /// be non-zero and not overflow [`isize::MAX`] when rounded up to the alignment.
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError>;

    /// Releases the block at `ptr`.
    ///
    /// # Safety
    /// `ptr` must have been allocated by this allocator with `layout` and not yet deallocated.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Behaves like [`allocate`](Allocator::allocate), but also zeroes the memory.
    ///
    /// # Errors
    /// Returns [`AllocError`] if the memory could not be provided.
    fn allocate_zeroed(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let ptr = self.allocate(layout)?;
        // SAFETY: ptr was just allocated with room for layout.size() bytes.
        unsafe { ptr::write_bytes(ptr.as_ptr(), 0, layout.size()); }
        Ok(ptr)
    }
}

impl<A: Allocator + ?Sized> Allocator for &A {
    #[track_caller]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    #[track_caller]
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError> {
        // SAFETY: The caller upholds the contract of the referenced allocator.
        unsafe { (**self).reallocate(ptr, old_layout, new_size) }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: The caller upholds the contract of the referenced allocator.
        unsafe { (**self).deallocate(ptr, layout) }
    }

    #[track_caller]
    fn allocate_zeroed(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate_zeroed(layout)
    }
}
