use std::alloc::Layout;
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use crate::alloc::{Allocator, Global};
use crate::error::{AllocationError, CapacityOverflow, ReserveError};

/// An owned, uninitialized allocation able to hold `cap` values of `T`, obtained from `A`.
///
/// RawBuffer only manages memory: it never reads, writes or drops the values it has space for.
/// Tracking which slots are initialized is the responsibility of the owner, normally a
/// [`Buffer`](super::Buffer).
///
/// Zero-sized types and zero capacities never reach the allocator, a dangling pointer is used
/// instead. This means that the pointer is always non-null and properly aligned, even when
/// there is nothing behind it.
pub struct RawBuffer<T, A: Allocator = Global> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) cap: usize,
    pub(crate) alloc: A,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> RawBuffer<T> {
    /// Creates a new RawBuffer with capacity 0, using the [`Global`] allocator.
    pub const fn new() -> RawBuffer<T> {
        RawBuffer::new_in(Global)
    }
}

impl<T, A: Allocator> RawBuffer<T, A> {
    /// Creates a new RawBuffer with capacity 0. No memory is allocated until the capacity
    /// changes.
    pub const fn new_in(alloc: A) -> RawBuffer<T, A> {
        RawBuffer {
            ptr: NonNull::dangling(),
            cap: 0,
            alloc,
            _phantom: PhantomData,
        }
    }

    /// Creates a new RawBuffer with space for exactly `cap` values.
    ///
    /// # Errors
    /// Returns an error if the layout would overflow or `alloc` fails to provide the memory.
    #[track_caller]
    pub fn try_with_cap_in(cap: usize, alloc: A) -> Result<RawBuffer<T, A>, ReserveError> {
        let mut raw = RawBuffer::new_in(alloc);
        raw.try_realloc(cap)?;
        Ok(raw)
    }

    /// Returns the number of values that this RawBuffer has space for.
    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Returns a reference to the allocator backing this RawBuffer.
    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns the (possibly dangling) pointer to the first slot.
    pub const fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Resizes the allocation to hold exactly `new_cap` values. Values in slots that remain are
    /// preserved, but nothing is dropped when shrinking.
    ///
    /// # Errors
    /// Returns an error if the new layout would overflow or the allocator fails. In either case
    /// the RawBuffer is left untouched.
    #[track_caller]
    pub fn try_realloc(&mut self, new_cap: usize) -> Result<(), ReserveError> {
        let new_layout = Self::make_layout(new_cap)?;

        let new_ptr = match (self.cap, new_cap) {
            (_, _) if size_of::<T>() == 0 => {
                // Nothing needs to be allocated for zero-sized types, only the capacity changes.
                self.ptr
            },
            (old, new) if old == new => return Ok(()),
            (0, _) => {
                let ptr = self.alloc
                    .allocate(new_layout)
                    .map_err(|_| AllocationError { layout: new_layout })?;
                ptr.cast()
            },
            (_, 0) => {
                // SAFETY: The old capacity is non-zero and T isn't zero-sized, so ptr is a live
                // allocation made with this layout.
                unsafe {
                    self.alloc.deallocate(self.ptr.cast(), self.layout());
                }
                NonNull::dangling()
            },
            (_, _) => {
                // SAFETY: The same allocator and layout were used for the existing allocation
                // and the new size is non-zero and has been checked against isize::MAX.
                let ptr = unsafe {
                    self.alloc.reallocate(self.ptr.cast(), self.layout(), new_layout.size())
                }.map_err(|_| AllocationError { layout: new_layout })?;
                ptr.cast()
            },
        };

        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }

    /// Decomposes the RawBuffer into its pointer, capacity and allocator, without freeing the
    /// allocation.
    pub fn into_parts(self) -> (NonNull<T>, usize, A) {
        let this = mem::ManuallyDrop::new(self);
        // SAFETY: this is never used again or dropped, so the allocator is moved out exactly once.
        let alloc = unsafe { std::ptr::read(&this.alloc) };
        (this.ptr, this.cap, alloc)
    }

    /// Creates a RawBuffer from its raw components.
    ///
    /// # Safety
    /// `ptr` must have been allocated by `alloc` with the layout of `cap` values of `T` (or be
    /// dangling if that layout has size zero), and must not be owned by anything else.
    pub const unsafe fn from_parts(ptr: NonNull<T>, cap: usize, alloc: A) -> RawBuffer<T, A> {
        RawBuffer {
            ptr,
            cap,
            alloc,
            _phantom: PhantomData,
        }
    }

    /// A helper function to create a [`Layout`] containing `cap` values of `T`.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if the layout size would exceed [`isize::MAX`].
    pub(crate) fn make_layout(cap: usize) -> Result<Layout, CapacityOverflow> {
        Layout::array::<T>(cap).map_err(|_| CapacityOverflow)
    }

    /// Returns the layout of the current allocation.
    pub(crate) fn layout(&self) -> Layout {
        // SAFETY: The current capacity was checked when it was allocated.
        unsafe { Layout::from_size_align_unchecked(size_of::<T>() * self.cap, align_of::<T>()) }
    }
}

impl<T, A: Allocator + Default> Default for RawBuffer<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A: Allocator> Drop for RawBuffer<T, A> {
    fn drop(&mut self) {
        let layout = self.layout();
        if layout.size() != 0 {
            // SAFETY: ptr is always allocated with alloc and layout is the same as when
            // allocated. Zero-sized layouts aren't allocated and are guarded against.
            unsafe { self.alloc.deallocate(self.ptr.cast(), layout) }
        }
    }
}

impl<T, A: Allocator> Debug for RawBuffer<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuffer")
            .field("ptr", &self.ptr)
            .field("cap", &self.cap)
            .finish()
    }
}

// SAFETY: RawBuffer uniquely owns its allocation, so it can be sent when both the values and the
// allocator can.
unsafe impl<T: Send, A: Allocator + Send> Send for RawBuffer<T, A> {}
// SAFETY: RawBuffer provides no interior mutability through shared references.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for RawBuffer<T, A> {}
