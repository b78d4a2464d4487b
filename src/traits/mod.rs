//! Traits shared between the collections of this crate.

mod buffer;

pub use buffer::*;
