//! The buffer core and the containers built on it.
//!
//! # Method
//! Applicable types here implement [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut), which
//! saves me from writing some of the more repetitive functionality.

pub mod buffer;
#[cfg(feature = "ptr-list")]
pub mod ptr_list;
#[cfg(feature = "string")]
pub mod string;
pub mod vector;
