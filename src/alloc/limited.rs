use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;

use super::{AllocError, Allocator, Global};

/// An allocator that forwards to `A` while the number of live bytes stays within a fixed budget.
///
/// Requests that would exceed the budget return an [`AllocError`] rather than aborting, which
/// makes `Limited` useful for bounding the memory of a group of collections and for exercising
/// the recoverable allocation paths of the `try_` methods.
///
/// # Examples
/// ```
/// # use buffer_lib::alloc::Limited;
/// # use buffer_lib::collections::vector::Vector;
/// let limited = Limited::new(16);
/// let mut vec: Vector<u64, _> = Vector::new_in(&limited);
/// assert!(vec.try_push(1).is_ok());
/// assert!(vec.try_reserve(10).is_err());
/// assert_eq!(vec.len(), 1);
/// ```
#[derive(Debug)]
pub struct Limited<A: Allocator = Global> {
    inner: A,
    budget: usize,
    live: Cell<usize>,
}

impl Limited {
    /// Creates a new Limited allocator over [`Global`], allowing at most `budget` live bytes.
    pub const fn new(budget: usize) -> Limited {
        Limited::wrap(Global, budget)
    }
}

impl<A: Allocator> Limited<A> {
    /// Creates a new Limited allocator over `inner`, allowing at most `budget` live bytes.
    pub const fn wrap(inner: A, budget: usize) -> Limited<A> {
        Limited {
            inner,
            budget,
            live: Cell::new(0),
        }
    }

    /// Returns the total number of bytes this allocator will hand out at once.
    pub const fn budget(&self) -> usize {
        self.budget
    }

    /// Returns the number of bytes currently allocated.
    pub fn live(&self) -> usize {
        self.live.get()
    }

    /// Returns the number of bytes that can still be allocated.
    pub fn remaining(&self) -> usize {
        self.budget - self.live.get()
    }

    fn check(&self, freed: usize, requested: usize) -> Result<(), AllocError> {
        let after = self.live.get() - freed + requested;
        if after > self.budget {
            log::debug!(
                "rejecting request for {} bytes, {} of {} bytes in use",
                requested,
                self.live.get(),
                self.budget,
            );
            Err(AllocError)
        } else {
            Ok(())
        }
    }
}

impl<A: Allocator> Allocator for Limited<A> {
    #[track_caller]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        self.check(0, layout.size())?;
        let ptr = self.inner.allocate(layout)?;
        self.live.set(self.live.get() + layout.size());
        Ok(ptr)
    }

    #[track_caller]
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError> {
        self.check(old_layout.size(), new_size)?;
        // SAFETY: The caller upholds the contract for the inner allocator.
        let new_ptr = unsafe { self.inner.reallocate(ptr, old_layout, new_size)? };
        self.live.set(self.live.get() - old_layout.size() + new_size);
        Ok(new_ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.live.set(self.live.get() - layout.size());
        // SAFETY: The caller upholds the contract for the inner allocator.
        unsafe { self.inner.deallocate(ptr, layout) }
    }
}
