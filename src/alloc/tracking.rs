use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;

use super::{AllocError, Allocator, Global};

/// A snapshot of the counters kept by a [`Tracking`] allocator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AllocStats {
    pub allocations: usize,
    pub reallocations: usize,
    pub deallocations: usize,
    pub failures: usize,
    /// Blocks which have been allocated but not yet deallocated.
    pub live_blocks: usize,
    pub live_bytes: usize,
    pub peak_bytes: usize,
}

/// A debugging allocator which forwards every request to `A` while counting calls and bytes.
///
/// Every request is logged at `trace` level. The counters use [`Cell`], so a `Tracking`
/// allocator is meant to be shared by reference within a single thread.
///
/// # Examples
/// ```
/// # use buffer_lib::alloc::Tracking;
/// # use buffer_lib::collections::vector::Vector;
/// let tracking = Tracking::new();
/// {
///     let mut vec = Vector::with_cap_in(2, &tracking);
///     vec.extend([1_u32, 2, 3]);
///     assert_eq!(tracking.stats().reallocations, 1);
/// }
/// assert_eq!(tracking.stats().live_blocks, 0);
/// ```
#[derive(Debug, Default)]
pub struct Tracking<A: Allocator = Global> {
    inner: A,
    stats: Cell<AllocStats>,
}

impl Tracking {
    /// Creates a new Tracking allocator wrapping [`Global`].
    pub const fn new() -> Tracking {
        Tracking::wrap(Global)
    }
}

impl<A: Allocator> Tracking<A> {
    /// Creates a new Tracking allocator that forwards all requests to `inner`.
    pub const fn wrap(inner: A) -> Tracking<A> {
        Tracking {
            inner,
            stats: Cell::new(AllocStats {
                allocations: 0,
                reallocations: 0,
                deallocations: 0,
                failures: 0,
                live_blocks: 0,
                live_bytes: 0,
                peak_bytes: 0,
            }),
        }
    }

    /// Returns a copy of the current counters.
    pub fn stats(&self) -> AllocStats {
        self.stats.get()
    }

    /// Resets the event counters to zero. Blocks that are still live stay counted, so they can be
    /// deallocated later, and the peak restarts from the current live byte count.
    pub fn reset(&self) {
        let stats = self.stats.get();
        self.stats.set(AllocStats {
            live_blocks: stats.live_blocks,
            live_bytes: stats.live_bytes,
            peak_bytes: stats.live_bytes,
            ..AllocStats::default()
        });
    }

    /// Returns the wrapped allocator.
    pub fn into_inner(self) -> A {
        self.inner
    }

    fn update(&self, f: impl FnOnce(&mut AllocStats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        stats.peak_bytes = stats.peak_bytes.max(stats.live_bytes);
        self.stats.set(stats);
    }

    fn record_failure(&self, layout: Layout) {
        log::trace!("allocation of {} bytes failed", layout.size());
        self.update(|stats| stats.failures += 1);
    }
}

impl<A: Allocator> Allocator for Tracking<A> {
    #[track_caller]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        match self.inner.allocate(layout) {
            Ok(ptr) => {
                log::trace!("allocate({}) -> {:?}", layout.size(), ptr);
                self.update(|stats| {
                    stats.allocations += 1;
                    stats.live_blocks += 1;
                    stats.live_bytes += layout.size();
                });
                Ok(ptr)
            },
            Err(error) => {
                self.record_failure(layout);
                Err(error)
            },
        }
    }

    #[track_caller]
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError> {
        // SAFETY: The caller upholds the contract for the inner allocator.
        match unsafe { self.inner.reallocate(ptr, old_layout, new_size) } {
            Ok(new_ptr) => {
                log::trace!(
                    "reallocate({:?}, {} -> {}) -> {:?}",
                    ptr,
                    old_layout.size(),
                    new_size,
                    new_ptr,
                );
                self.update(|stats| {
                    stats.reallocations += 1;
                    stats.live_bytes = stats.live_bytes - old_layout.size() + new_size;
                });
                Ok(new_ptr)
            },
            Err(error) => {
                self.record_failure(old_layout);
                Err(error)
            },
        }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        log::trace!("deallocate({:?}, {})", ptr, layout.size());
        self.update(|stats| {
            stats.deallocations += 1;
            stats.live_blocks -= 1;
            stats.live_bytes -= layout.size();
        });
        // SAFETY: The caller upholds the contract for the inner allocator.
        unsafe { self.inner.deallocate(ptr, layout) }
    }
}
