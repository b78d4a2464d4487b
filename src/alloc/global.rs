use std::alloc::{self, Layout};
use std::panic::Location;
use std::ptr::{self, NonNull};

use super::{AllocError, Allocator};

/// The process-wide allocator, backed by [`std::alloc`].
///
/// Allocation failure is not treated as recoverable: instead of returning an [`AllocError`],
/// `Global` logs the failing request along with the caller's location and terminates via
/// [`alloc::handle_alloc_error`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Global;

impl Global {
    #[track_caller]
    fn fail(layout: Layout) -> ! {
        let caller = Location::caller();
        log::error!(
            "allocation of {} bytes failed at {}:{}:{}",
            layout.size(),
            caller.file(),
            caller.line(),
            caller.column(),
        );
        alloc::handle_alloc_error(layout)
    }

    /// Returns a well-aligned pointer standing in for a zero-sized allocation.
    const fn dangling(layout: Layout) -> NonNull<u8> {
        // SAFETY: Alignments are always non-zero.
        unsafe { NonNull::new_unchecked(ptr::without_provenance_mut(layout.align())) }
    }
}

impl Allocator for Global {
    #[track_caller]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if layout.size() == 0 {
            return Ok(Global::dangling(layout));
        }
        // SAFETY: The layout has a non-zero size.
        let raw_ptr = unsafe { alloc::alloc(layout) };
        match NonNull::new(raw_ptr) {
            Some(ptr) => Ok(ptr),
            None => Global::fail(layout),
        }
    }

    #[track_caller]
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError> {
        // SAFETY: The caller guarantees that ptr was allocated by Global with old_layout and
        // that new_size is valid for the alignment.
        let raw_ptr = unsafe { alloc::realloc(ptr.as_ptr(), old_layout, new_size) };
        match NonNull::new(raw_ptr) {
            Some(ptr) => Ok(ptr),
            // SAFETY: The caller guarantees new_size is valid for this alignment.
            None => Global::fail(unsafe {
                Layout::from_size_align_unchecked(new_size, old_layout.align())
            }),
        }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() != 0 {
            // SAFETY: The caller guarantees that ptr is a live allocation made with layout.
            unsafe { alloc::dealloc(ptr.as_ptr(), layout) }
        }
    }

    #[track_caller]
    fn allocate_zeroed(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if layout.size() == 0 {
            return Ok(Global::dangling(layout));
        }
        // SAFETY: The layout has a non-zero size.
        let raw_ptr = unsafe { alloc::alloc_zeroed(layout) };
        match NonNull::new(raw_ptr) {
            Some(ptr) => Ok(ptr),
            None => Global::fail(layout),
        }
    }
}
