#![cfg(test)]

use std::alloc::Layout;
use std::cell::Cell;
use std::panic::Location;
use std::ptr::NonNull;

use super::*;
use crate::collections::vector::Vector;
use crate::error::ReserveError;

#[test]
fn test_global_zeroed() {
    let layout = Layout::array::<u32>(8).unwrap();
    let ptr = Global.allocate_zeroed(layout).unwrap();

    // SAFETY: ptr was allocated with room for 8 u32s.
    let values = unsafe { std::slice::from_raw_parts(ptr.as_ptr().cast::<u32>(), 8) };
    assert_eq!(values, &[0; 8], "Zeroed allocation should contain only zeroes.");

    // SAFETY: ptr was allocated by Global with layout.
    unsafe { Global.deallocate(ptr, layout) };
}

#[test]
fn test_tracking_counts() {
    let tracking = Tracking::new();
    let layout = Layout::array::<u8>(16).unwrap();

    let ptr = tracking.allocate(layout).unwrap();
    assert_eq!(tracking.stats().allocations, 1);
    assert_eq!(tracking.stats().live_bytes, 16);

    // SAFETY: ptr was allocated by tracking with layout.
    let ptr = unsafe { tracking.reallocate(ptr, layout, 64) }.unwrap();
    assert_eq!(tracking.stats().reallocations, 1);
    assert_eq!(tracking.stats().live_bytes, 64);

    let layout = Layout::array::<u8>(64).unwrap();
    // SAFETY: ptr was reallocated by tracking to layout.
    let ptr = unsafe { tracking.reallocate(ptr, layout, 8) }.unwrap();
    assert_eq!(
        tracking.stats().peak_bytes,
        64,
        "Peak should remember the largest live size."
    );

    // SAFETY: ptr was reallocated by tracking to 8 bytes.
    unsafe { tracking.deallocate(ptr, Layout::array::<u8>(8).unwrap()) };
    let stats = tracking.stats();
    assert_eq!(stats.deallocations, 1);
    assert_eq!(stats.live_bytes, 0);
    assert_eq!(stats.live_blocks, 0, "Every block should have been freed.");

    tracking.reset();
    assert_eq!(tracking.stats(), AllocStats::default());
}

#[test]
fn test_tracking_zst_never_allocates() {
    let tracking = Tracking::new();
    let mut vec = Vector::new_in(&tracking);
    for _ in 0..100 {
        vec.push(());
    }
    drop(vec);

    assert_eq!(
        tracking.stats(),
        AllocStats::default(),
        "Zero sized elements shouldn't reach the allocator."
    );
}

#[test]
fn test_tracking_shared_by_reference() {
    let tracking = Tracking::new();
    let mut a = Vector::with_cap_in(4, &tracking);
    let mut b = Vector::with_cap_in(4, &tracking);
    a.push(1_u16);
    b.push(2_u16);

    assert_eq!(tracking.stats().live_blocks, 2);
    drop(a);
    assert_eq!(tracking.stats().live_blocks, 1);
    drop(b);
    assert_eq!(tracking.stats().live_blocks, 0);
}

#[test]
fn test_tracking_reset_keeps_live_blocks() {
    let tracking = Tracking::new();
    let mut vec = Vector::with_cap_in(4, &tracking);
    vec.push(1_u32);

    tracking.reset();
    let stats = tracking.stats();
    assert_eq!(stats.allocations, 0);
    assert_eq!(stats.live_blocks, 1, "A reset shouldn't forget live blocks.");
    assert_eq!(stats.live_bytes, 16);
    assert_eq!(stats.peak_bytes, 16, "The peak should restart from the live size.");

    drop(vec);
    let stats = tracking.stats();
    assert_eq!(stats.deallocations, 1);
    assert_eq!(stats.live_blocks, 0);
    assert_eq!(stats.live_bytes, 0);
    assert_eq!(stats.peak_bytes, 16);
}

#[test]
fn test_limited_budget() {
    let limited = Limited::new(32);
    let layout = Layout::array::<u8>(24).unwrap();

    let ptr = limited.allocate(layout).unwrap();
    assert_eq!(limited.live(), 24);
    assert_eq!(limited.remaining(), 8);

    assert_eq!(
        limited.allocate(Layout::array::<u8>(16).unwrap()),
        Err(AllocError),
        "Allocating past the budget should fail."
    );
    // SAFETY: ptr was allocated by limited with layout.
    assert!(unsafe { limited.reallocate(ptr, layout, 33) }.is_err());
    assert_eq!(limited.live(), 24, "A failed request shouldn't change the count.");

    // SAFETY: ptr is still valid after the failed reallocation.
    unsafe { limited.deallocate(ptr, layout) };
    assert_eq!(limited.remaining(), limited.budget());
}

#[test]
fn test_limited_reports_through_collections() {
    let limited = Limited::new(64);
    let mut vec: Vector<u64, _> = Vector::new_in(&limited);
    for i in 0..8 {
        vec.try_push(i).unwrap();
    }

    let cap = vec.cap();
    assert!(matches!(vec.try_push(8), Err(ReserveError::Allocation(_))));
    assert_eq!(vec.len(), 8, "Failed push should leave the length unchanged.");
    assert_eq!(vec.cap(), cap, "Failed push should leave the capacity unchanged.");
    assert_eq!(&*vec, &[0, 1, 2, 3, 4, 5, 6, 7]);

    vec.truncate(2);
    vec.try_shrink_to_fit().unwrap();
    assert_eq!(limited.live(), 16);
    vec.try_push(8).unwrap();
}

#[derive(Default)]
struct CallerRecording {
    last: Cell<Option<&'static Location<'static>>>,
}

impl Allocator for CallerRecording {
    #[track_caller]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        self.last.set(Some(Location::caller()));
        Global.allocate(layout)
    }

    #[track_caller]
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError> {
        self.last.set(Some(Location::caller()));
        // SAFETY: The caller upholds the contract for Global.
        unsafe { Global.reallocate(ptr, old_layout, new_size) }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: The caller upholds the contract for Global.
        unsafe { Global.deallocate(ptr, layout) }
    }
}

#[test]
fn test_allocator_sees_user_call_site() {
    let recording = CallerRecording::default();
    let mut vec = Vector::new_in(&recording);

    let line = line!() + 1;
    vec.push(1_u64);
    let caller = recording.last.get().unwrap();
    assert_eq!(caller.file(), file!());
    assert_eq!(caller.line(), line, "The allocation should be attributed to push.");

    let line = line!() + 1;
    vec.reserve(64);
    let caller = recording.last.get().unwrap();
    assert_eq!((caller.file(), caller.line()), (file!(), line));
}
