//! Error types returned by the collections in this crate.
//!
//! Following the rest of the crate, errors are small structs (often ZSTs) implementing
//! [`Error`](std::error::Error), combined into enums where an operation can fail in more than one
//! way. This keeps dispatch static and lets callers match on exactly the failures that are
//! possible for a given method.

use std::alloc::{self, Layout};
use std::panic::Location;

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// An index was not less than the length of the collection it was used on.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("index {index} out of bounds for collection with {len} elements")]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

/// The memory layout of a collection would have a size exceeding [`isize::MAX`].
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("capacity overflow")]
pub struct CapacityOverflow;

/// An allocator returned a failure for the contained layout.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("allocation of {} bytes (align {}) failed", layout.size(), layout.align())]
pub struct AllocationError {
    #[error(not(source))]
    pub layout: Layout,
}

impl AllocationError {
    /// Terminates the process through [`alloc::handle_alloc_error`], the same path taken by the
    /// [`Global`](crate::alloc::Global) allocator.
    #[track_caller]
    pub fn handle(self) -> ! {
        log::error!("{self} at {}, aborting", Location::caller());
        alloc::handle_alloc_error(self.layout)
    }
}

/// A search for a value or sub-sequence found no match.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("element not found")]
pub struct NotFound;

/// A shape was constructed with a zero dimension.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("invalid dimensions {rows}x{cols}, both must be non-zero")]
pub struct InvalidDimensions {
    pub rows: usize,
    pub cols: usize,
}

/// The ways that reserving additional capacity can fail.
#[derive(Debug, Display, Error, From, TryInto, IsVariant, Clone, Copy, PartialEq, Eq)]
pub enum ReserveError {
    CapacityOverflow(CapacityOverflow),
    Allocation(AllocationError),
}

impl ReserveError {
    /// Handles the error the way infallible methods do: panicking for overflow and aborting for
    /// a failed allocation.
    ///
    /// # Panics
    /// Panics if the error is a [`CapacityOverflow`].
    #[track_caller]
    pub fn throw(self) -> ! {
        match self {
            ReserveError::CapacityOverflow(error) => panic!("{}", error),
            ReserveError::Allocation(error) => error.handle(),
        }
    }
}

/// The ways that an indexed operation which may also grow a collection can fail.
#[derive(Debug, Display, Error, From, TryInto, IsVariant, Clone, Copy, PartialEq, Eq)]
pub enum IndexOrReserveError {
    IndexOutOfBounds(IndexOutOfBounds),
    CapacityOverflow(CapacityOverflow),
    Allocation(AllocationError),
}

impl From<ReserveError> for IndexOrReserveError {
    fn from(value: ReserveError) -> Self {
        match value {
            ReserveError::CapacityOverflow(error) => error.into(),
            ReserveError::Allocation(error) => error.into(),
        }
    }
}

/// The ways that constructing a [`Grid`](crate::collections::buffer::Grid) can fail.
#[cfg(feature = "grid")]
#[derive(Debug, Display, Error, From, TryInto, IsVariant, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    InvalidDimensions(InvalidDimensions),
    CapacityOverflow(CapacityOverflow),
    Allocation(AllocationError),
}

#[cfg(feature = "grid")]
impl From<ReserveError> for GridError {
    fn from(value: ReserveError) -> Self {
        match value {
            ReserveError::CapacityOverflow(error) => error.into(),
            ReserveError::Allocation(error) => error.into(),
        }
    }
}
