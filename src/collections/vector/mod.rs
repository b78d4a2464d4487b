//! A module containing [`Vector`] and associated types.
//!
//! Currently, the only other included type is [`IntoIter`] for owned iteration over a Vector.
//! [`Slide`](crate::collections::buffer::Slide) and [`IterMut`](std::slice::IterMut) are used for
//! borrowed iteration.

mod iter;
mod vector;

pub use iter::*;
pub use vector::*;
