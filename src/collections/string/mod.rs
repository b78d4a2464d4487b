//! A NUL-terminated byte string built on the shared [`Buffer`](super::buffer::Buffer), along with
//! the byte search operations it shares with [`BufferView<u8>`](super::buffer::BufferView).

mod byte_string;
mod search;
mod tests;
mod view;

pub use byte_string::*;
