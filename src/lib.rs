//! This crate is a small family of growable containers, all built on one generic buffer.
//!
//! # Purpose
//! Every container here ([`Vector`](collections::vector::Vector),
//! [`ByteString`](collections::string::ByteString) and
//! [`PtrList`](collections::ptr_list::PtrList)) is a thin, typed wrapper around exactly one
//! [`Buffer`](collections::buffer::Buffer). The buffer owns the allocation, the length and the
//! growth policy, so the containers only add what makes them different: a NUL terminator, or
//! borrowing instead of owning.
//!
//! # Method
//! Collections implement [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut where they own
//! their elements), which saves writing most of the read-only functionality more than once. The
//! rest of the read-only vocabulary lives on [`ReadBuffer`](traits::ReadBuffer), which is also
//! implemented by the non-owning [`BufferView`](collections::buffer::BufferView).
//!
//! # Allocation
//! Memory comes from an [`Allocator`](alloc::Allocator), which is a type parameter on every
//! container, defaulting to [`Global`](alloc::Global). Global never returns an error: it aborts
//! the process (after logging where the allocation came from) if the system allocator fails. Other
//! allocators, such as [`Limited`](alloc::Limited), can fail, in which case the `try_*` methods of
//! each container return an error and leave the container exactly as it was.
//!
//! # Error Handling
//! Most methods come in two flavours. The plain method treats a capacity overflow as a panic and
//! allocation failure as fatal, the same as [`std`] does, because nobody wants to handle a
//! [`Result`] every time they push onto a Vector. The `try_*` method reports both instead.
//!
//! Indexing is different. Out of bounds indices are always reported as an
//! [`IndexOutOfBounds`](error::IndexOutOfBounds) error rather than a panic, because they're a
//! normal outcome for a lot of callers.
//!
//! When this crate employs errors via [`Result`]s, it does so in a method that is strongly typed,
//! using enums for static dispatch rather than dynamic, with structs (often ZSTs) that implement
//! [`Error`](std::error::Error).
//!
//! # Logging
//! Diagnostics (rejected indices, failed searches, allocator activity) are emitted through the
//! [`log`] facade and cost nothing unless the application installs a logger.
//!
//! # Features
//! - `grid`: The [`Grid`](collections::buffer::Grid) 2D convention over a Buffer.
//! - `ptr-list`: [`PtrList`](collections::ptr_list::PtrList).
//! - `string`: [`ByteString`](collections::string::ByteString), which needs `ptr-list` for
//!   [`split_refs`](collections::string::ByteString::split_refs).
//!
//! All of them are enabled by default.

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod alloc;
pub mod collections;
pub mod error;
pub mod traits;

#[cfg(test)]
pub(crate) mod util;
