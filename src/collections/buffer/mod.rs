//! The generic growable buffer shared by every container in this crate, along with its
//! borrowed [`BufferView`] and associated types.
//!
//! [`RawBuffer`] manages nothing but an allocation, [`Buffer`] adds the count of initialized
//! elements and the growth policy on top of it. [`Vector`](super::vector::Vector),
//! [`ByteString`](super::string::ByteString) and [`PtrList`](super::ptr_list::PtrList) are each
//! a thin, typed wrapper around exactly one Buffer.

mod buffer;
#[cfg(feature = "grid")]
mod grid;
pub mod index;
mod iter;
mod raw;
mod tests;
mod view;

pub use buffer::*;
#[cfg(feature = "grid")]
pub use grid::*;
pub use iter::*;
pub use raw::*;
pub use view::*;
