use super::ByteString;
use super::byte_string::split_segments;
use super::search;
use crate::collections::buffer::BufferView;
use crate::collections::ptr_list::PtrList;
use crate::error::NotFound;

/// Searching a view of bytes, with the same semantics as the equivalent [`ByteString`] methods.
impl<'a> BufferView<'a, u8> {
    pub fn find(&self, needle: impl AsRef<[u8]>) -> Option<usize> {
        search::find(self.items, needle.as_ref())
    }

    pub fn rfind(&self, needle: impl AsRef<[u8]>) -> Option<usize> {
        search::rfind(self.items, needle.as_ref())
    }

    /// Counts the non-overlapping occurrences of `needle`.
    pub fn count(&self, needle: impl AsRef<[u8]>) -> usize {
        search::count(self.items, needle.as_ref())
    }

    pub fn starts_with(&self, prefix: impl AsRef<[u8]>) -> bool {
        search::starts_with(self.items, prefix.as_ref())
    }

    pub fn ends_with(&self, suffix: impl AsRef<[u8]>) -> bool {
        search::ends_with(self.items, suffix.as_ref())
    }

    /// Splits the view around every occurrence of `sep`. The segments borrow from whatever the
    /// view borrows, so they can outlive the view itself.
    ///
    /// # Errors
    /// Returns [`NotFound`] if `sep` doesn't occur.
    ///
    /// # Examples
    /// ```
    /// # use buffer_lib::collections::buffer::BufferView;
    /// let parts = BufferView::from("k=v").split_refs(b"=").unwrap();
    /// assert_eq!(parts.get(0), Ok(&b"k"[..]));
    /// assert_eq!(parts.get(1), Ok(&b"v"[..]));
    /// ```
    pub fn split_refs(&self, sep: &'a [u8]) -> Result<PtrList<'a, [u8]>, NotFound> {
        Ok(split_segments(self.items, sep)?.collect())
    }

    /// Copies the viewed bytes into a new, owned [`ByteString`].
    pub fn to_byte_string(&self) -> ByteString {
        ByteString::from_bytes(self.items)
    }
}
