use std::borrow::Borrow;
use std::ffi::{CStr, FromBytesWithNulError};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};
use std::str::{self, Utf8Error};

use super::search::{self, Segments};
use crate::alloc::{Allocator, Global};
use crate::collections::buffer::{Buffer, BufferView};
use crate::collections::ptr_list::PtrList;
use crate::collections::vector::Vector;
use crate::error::{CapacityOverflow, IndexOrReserveError, IndexOutOfBounds, NotFound, ReserveError};
use crate::traits::ReadBuffer;

/// A growable, NUL-terminated string of bytes, based on [`Buffer<u8>`].
///
/// The contents aren't required to be UTF-8 (see [`ByteString::as_str`]), but a zero byte is
/// always kept directly after the last byte of text, so the whole allocation can be handed to
/// anything expecting a C string via [`ByteString::as_c_str`]. This terminator is never counted
/// by [`len`](ByteString::len) or [`cap`](ByteString::cap).
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The length of the ByteString.
/// - `m`: The length of the text being appended, inserted or searched for.
/// - `i`: The index being operated on.
///
/// | Method | Complexity |
/// |-|-|
/// | `append` | `O(m)`*, `O(n+m)` |
/// | `insert` | `O(n-i+m)` |
/// | `remove` | `O(n-i)` |
/// | `find` / `count` | `O(n*m)` |
/// | `remove_all` | `O(k*n*m)`, for `k` occurrences |
/// | `strip` | `O(n)` |
///
/// \* If the ByteString doesn't have enough capacity for the new text, `append` will take
/// `O(n+m)`.
///
/// # Examples
/// ```
/// # use buffer_lib::collections::string::ByteString;
/// let mut text = ByteString::from("hello");
/// text.append(", world");
/// assert_eq!(text.len(), 12);
/// assert_eq!(text.remove_first("l"), Ok(2));
/// assert_eq!(text, "helo, world");
/// assert_eq!(text.as_bytes_with_nul().last(), Some(&0));
/// ```
pub struct ByteString<A: Allocator = Global> {
    pub(crate) buf: Buffer<u8, A>,
}

impl ByteString {
    /// Creates a new, empty ByteString. Only the terminator is allocated.
    #[track_caller]
    pub fn new() -> ByteString {
        ByteString::new_in(Global)
    }

    /// Creates a new ByteString with space for `cap` bytes of text, plus the terminator.
    ///
    /// # Panics
    /// Panics if `cap + 1` bytes would exceed [`isize::MAX`].
    #[track_caller]
    pub fn with_cap(cap: usize) -> ByteString {
        ByteString::with_cap_in(cap, Global)
    }

    /// Creates a new ByteString containing a copy of `bytes`, with no spare capacity.
    #[track_caller]
    pub fn from_bytes(bytes: &[u8]) -> ByteString {
        let mut string = ByteString::with_cap(bytes.len());
        string.append(bytes);
        string
    }

    /// Concatenates `parts`, placing `sep` between each consecutive pair.
    ///
    /// # Examples
    /// ```
    /// # use buffer_lib::collections::string::ByteString;
    /// let joined = ByteString::join(", ", ["a", "b", "c"]);
    /// assert_eq!(joined, "a, b, c");
    /// assert_eq!(ByteString::join("-", [] as [&str; 0]), "");
    /// ```
    pub fn join<I>(sep: impl AsRef<[u8]>, parts: I) -> ByteString
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let sep = sep.as_ref();
        let mut joined = ByteString::new();
        for (index, part) in parts.into_iter().enumerate() {
            if index != 0 {
                joined.append(sep);
            }
            joined.append(part);
        }
        joined
    }
}

impl<A: Allocator> ByteString<A> {
    /// Creates a new, empty ByteString which will allocate from `alloc`.
    ///
    /// Allocation failure is handled by aborting.
    #[track_caller]
    pub fn new_in(alloc: A) -> ByteString<A> {
        ByteString::with_cap_in(0, alloc)
    }

    /// Creates a new, empty ByteString which will allocate from `alloc`.
    ///
    /// # Errors
    /// Returns an error if `alloc` couldn't provide space for the terminator.
    #[track_caller]
    pub fn try_new_in(alloc: A) -> Result<ByteString<A>, ReserveError> {
        ByteString::try_with_cap_in(0, alloc)
    }

    /// Creates a new ByteString with space for `cap` bytes of text, allocated from `alloc`.
    ///
    /// # Panics
    /// Panics if `cap + 1` bytes would exceed [`isize::MAX`]. Allocation failure is handled by
    /// aborting.
    #[track_caller]
    pub fn with_cap_in(cap: usize, alloc: A) -> ByteString<A> {
        match ByteString::try_with_cap_in(cap, alloc) {
            Ok(string) => string,
            Err(error) => error.throw(),
        }
    }

    /// Creates a new ByteString with space for `cap` bytes of text, allocated from `alloc`.
    ///
    /// # Errors
    /// Returns an error if the layout would overflow or `alloc` fails.
    #[track_caller]
    pub fn try_with_cap_in(cap: usize, alloc: A) -> Result<ByteString<A>, ReserveError> {
        let cap = cap.checked_add(1).ok_or(CapacityOverflow)?;
        let mut string = ByteString {
            buf: Buffer::try_with_cap_in(cap, alloc)?,
        };
        string.terminate();
        Ok(string)
    }

    /// Writes the terminator directly after the last byte of text.
    fn terminate(&mut self) {
        debug_assert!(self.buf.has_space() > 0);
        // SAFETY: Every constructor and growth path keeps one byte of spare capacity, so slot len
        // is always within the allocation.
        unsafe { self.buf.as_mut_ptr().add(self.buf.len()).write(0) }
    }

    /// Returns the length of the text, excluding the terminator.
    pub const fn len(&self) -> usize {
        self.buf.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the number of bytes of text that can be held without reallocating, excluding the
    /// terminator.
    pub const fn cap(&self) -> usize {
        self.buf.cap() - 1
    }

    pub const fn has_space(&self) -> usize {
        self.cap() - self.len()
    }

    pub const fn elsize(&self) -> usize {
        1
    }

    pub const fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the text including the trailing terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        // SAFETY: The byte at len is always initialized to the terminator.
        unsafe { std::slice::from_raw_parts(self.buf.as_ptr(), self.len() + 1) }
    }

    /// Borrows the ByteString as a [`CStr`].
    ///
    /// # Errors
    /// Returns an error if the text itself contains a zero byte.
    pub fn as_c_str(&self) -> Result<&CStr, FromBytesWithNulError> {
        CStr::from_bytes_with_nul(self.as_bytes_with_nul())
    }

    /// Borrows the ByteString as a [`str`].
    ///
    /// # Errors
    /// Returns an error if the text isn't valid UTF-8.
    pub fn as_str(&self) -> Result<&str, Utf8Error> {
        str::from_utf8(self.as_bytes())
    }

    /// Borrows the text as a read-only [`BufferView`].
    pub fn view(&self) -> BufferView<'_, u8> {
        self.buf.view()
    }

    /// Ensures that `extra` more bytes of text fit without reallocating.
    ///
    /// # Errors
    /// Returns an error if the ByteString couldn't grow, leaving it unchanged.
    #[track_caller]
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), ReserveError> {
        // The terminator needs one more byte than the text.
        self.buf.try_reserve(extra.checked_add(1).ok_or(CapacityOverflow)?)
    }

    #[track_caller]
    pub fn reserve(&mut self, extra: usize) {
        if let Err(error) = self.try_reserve(extra) {
            error.throw()
        }
    }

    /// Reduces the capacity to the length of the text. Does nothing if they are already equal.
    ///
    /// # Errors
    /// Returns an error if the allocator failed to shrink the allocation.
    #[track_caller]
    pub fn try_shrink_to_fit(&mut self) -> Result<(), ReserveError> {
        self.buf.raw.try_realloc(self.len() + 1)
    }

    #[track_caller]
    pub fn shrink_to_fit(&mut self) {
        if let Err(error) = self.try_shrink_to_fit() {
            error.throw()
        }
    }

    /// Appends a copy of `text` to the end of the ByteString.
    ///
    /// # Errors
    /// Returns an error if the ByteString couldn't grow, leaving it unchanged.
    #[track_caller]
    pub fn try_append(&mut self, text: impl AsRef<[u8]>) -> Result<(), ReserveError> {
        let text = text.as_ref();
        self.try_reserve(text.len())?;
        self.buf.try_extend_from_slice(text)?;
        self.terminate();
        Ok(())
    }

    /// Appends a copy of `text` to the end of the ByteString.
    ///
    /// # Panics
    /// Panics if the new layout would exceed [`isize::MAX`]. Allocation failure is handled by
    /// aborting.
    #[track_caller]
    pub fn append(&mut self, text: impl AsRef<[u8]>) {
        if let Err(error) = self.try_append(text) {
            error.throw()
        }
    }

    /// Appends at most the first `n` bytes of `text`.
    #[track_caller]
    pub fn append_n(&mut self, text: impl AsRef<[u8]>, n: usize) {
        let text = text.as_ref();
        self.append(&text[..n.min(text.len())]);
    }

    #[track_caller]
    pub fn push(&mut self, byte: u8) {
        self.reserve(1);
        // SAFETY: There is space for the byte and the terminator.
        unsafe { self.buf.push_unchecked(byte) }
        self.terminate();
    }

    /// Inserts a copy of `text` at `index`, shifting the rest of the text up.
    ///
    /// # Errors
    /// Returns an error if `index >= len` or the ByteString couldn't grow. The ByteString is left
    /// unchanged in either case.
    #[track_caller]
    pub fn try_insert(&mut self, index: usize, text: impl AsRef<[u8]>) -> Result<(), IndexOrReserveError> {
        let text = text.as_ref();
        self.buf.check_index(index)?;
        self.try_reserve(text.len())?;
        self.buf.try_insert_slice(index, text)?;
        self.terminate();
        Ok(())
    }

    /// Inserts a copy of `text` at `index`, shifting the rest of the text up.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`. Allocation failure is handled by aborting.
    ///
    /// # Examples
    /// ```
    /// # use buffer_lib::collections::string::ByteString;
    /// let mut text = ByteString::from("held");
    /// text.insert(3, "lo wor").unwrap();
    /// assert_eq!(text, "hello world");
    /// assert!(text.insert(11, "!").is_err());
    /// ```
    #[track_caller]
    pub fn insert(&mut self, index: usize, text: impl AsRef<[u8]>) -> Result<(), IndexOutOfBounds> {
        match self.try_insert(index, text) {
            Ok(()) => Ok(()),
            Err(IndexOrReserveError::IndexOutOfBounds(error)) => Err(error),
            Err(IndexOrReserveError::CapacityOverflow(error)) => ReserveError::from(error).throw(),
            Err(IndexOrReserveError::Allocation(error)) => error.handle(),
        }
    }

    /// Removes up to `n` bytes starting at `from`, returning how many were removed. `n` is
    /// clamped to the end of the text.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `from >= len`.
    pub fn remove(&mut self, from: usize, n: usize) -> Result<usize, IndexOutOfBounds> {
        let removed = self.buf.remove_range(from, n)?;
        self.terminate();
        Ok(removed)
    }

    /// Removes the first occurrence of `needle`, returning the index it was found at.
    ///
    /// # Errors
    /// Returns [`NotFound`] if `needle` doesn't occur, leaving the ByteString unchanged.
    pub fn remove_first(&mut self, needle: impl AsRef<[u8]>) -> Result<usize, NotFound> {
        let needle = needle.as_ref();
        let index = self.find(needle).ok_or(NotFound)?;
        self.remove_found(index, needle.len());
        Ok(index)
    }

    /// Removes the last occurrence of `needle`, returning the index it was found at.
    ///
    /// # Errors
    /// Returns [`NotFound`] if `needle` doesn't occur, leaving the ByteString unchanged.
    pub fn remove_last(&mut self, needle: impl AsRef<[u8]>) -> Result<usize, NotFound> {
        let needle = needle.as_ref();
        let index = self.rfind(needle).ok_or(NotFound)?;
        self.remove_found(index, needle.len());
        Ok(index)
    }

    fn remove_found(&mut self, index: usize, len: usize) {
        let result = self.buf.remove_range(index, len);
        debug_assert!(result.is_ok(), "a match always lies within the text");
        self.terminate();
    }

    /// Repeatedly removes the first occurrence of `needle` until none is left, returning the
    /// number removed. Occurrences formed by joining the text around a removal are removed too.
    ///
    /// # Examples
    /// ```
    /// # use buffer_lib::collections::string::ByteString;
    /// let mut text = ByteString::from("a--b--c");
    /// assert_eq!(text.remove_all("--"), 2);
    /// assert_eq!(text, "abc");
    /// assert_eq!(text.remove_all("x"), 0);
    ///
    /// let mut text = ByteString::from("aabb");
    /// assert_eq!(text.remove_all("ab"), 2);
    /// assert_eq!(text, "");
    /// ```
    pub fn remove_all(&mut self, needle: impl AsRef<[u8]>) -> usize {
        let needle = needle.as_ref();
        let (mut start, mut removed) = (0, 0);

        // Nothing before start matched, so a new match can begin at most len - 1 bytes before the
        // splice point.
        while let Some(found) = search::find(&self.as_bytes()[start..], needle) {
            let index = start + found;
            self.remove_found(index, needle.len());
            start = index.saturating_sub(needle.len() - 1);
            removed += 1;
        }
        removed
    }

    /// Removes leading and trailing ASCII whitespace.
    ///
    /// # Examples
    /// ```
    /// # use buffer_lib::collections::string::ByteString;
    /// let mut text = ByteString::from(" \t hello \n");
    /// text.strip();
    /// assert_eq!(text, "hello");
    /// ```
    pub fn strip(&mut self) {
        self.strip_by(|byte| byte.is_ascii_whitespace())
    }

    /// Removes leading and trailing ASCII whitespace and punctuation.
    pub fn strip_punct(&mut self) {
        self.strip_by(|byte| byte.is_ascii_whitespace() || byte.is_ascii_punctuation())
    }

    /// Removes leading and trailing bytes contained in `set`.
    pub fn strip_bytes(&mut self, set: impl AsRef<[u8]>) {
        let set = set.as_ref();
        self.strip_by(|byte| set.contains(&byte))
    }

    fn strip_by(&mut self, strip: impl Fn(u8) -> bool) {
        let (offset, len) = search::trim_span(self.as_bytes(), strip);
        if offset != 0 {
            self.buf.copy_within(offset..offset + len, 0);
        }
        self.truncate(len);
    }

    pub fn find(&self, needle: impl AsRef<[u8]>) -> Option<usize> {
        search::find(self.as_bytes(), needle.as_ref())
    }

    pub fn rfind(&self, needle: impl AsRef<[u8]>) -> Option<usize> {
        search::rfind(self.as_bytes(), needle.as_ref())
    }

    /// Counts the non-overlapping occurrences of `needle`.
    ///
    /// # Examples
    /// ```
    /// # use buffer_lib::collections::string::ByteString;
    /// assert_eq!(ByteString::from("aaaa").count("aa"), 2);
    /// assert_eq!(ByteString::from("abc").count(""), 0);
    /// ```
    pub fn count(&self, needle: impl AsRef<[u8]>) -> usize {
        search::count(self.as_bytes(), needle.as_ref())
    }

    pub fn starts_with(&self, prefix: impl AsRef<[u8]>) -> bool {
        search::starts_with(self.as_bytes(), prefix.as_ref())
    }

    pub fn ends_with(&self, suffix: impl AsRef<[u8]>) -> bool {
        search::ends_with(self.as_bytes(), suffix.as_ref())
    }

    /// Splits the text around every occurrence of `sep`, copying each segment into a new
    /// ByteString. Empty segments are kept.
    ///
    /// # Errors
    /// Returns [`NotFound`] if `sep` doesn't occur.
    ///
    /// # Examples
    /// ```
    /// # use buffer_lib::collections::string::ByteString;
    /// let parts = ByteString::from("a,b,,c").split(",").unwrap();
    /// assert_eq!(parts.len(), 4);
    /// assert_eq!(parts[2], "");
    /// assert!(ByteString::from("abc").split(",").is_err());
    /// ```
    pub fn split(&self, sep: impl AsRef<[u8]>) -> Result<Vector<ByteString>, NotFound> {
        Ok(self.segments(sep.as_ref())?.map(ByteString::from_bytes).collect())
    }

    /// Splits the text around every occurrence of `sep`, borrowing each segment. Empty segments
    /// are kept.
    ///
    /// # Errors
    /// Returns [`NotFound`] if `sep` doesn't occur.
    pub fn split_refs<'a>(&'a self, sep: &'a [u8]) -> Result<PtrList<'a, [u8]>, NotFound> {
        Ok(self.segments(sep)?.collect())
    }

    fn segments<'a>(&'a self, sep: &'a [u8]) -> Result<Segments<'a>, NotFound> {
        split_segments(self.as_bytes(), sep)
    }

    /// Shortens the text to `len` bytes. Has no effect if it is already shorter.
    pub fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
        self.terminate();
    }

    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Deep copies the ByteString, with capacity equal to its length.
    ///
    /// # Errors
    /// Returns an error if the allocation fails.
    #[track_caller]
    pub fn try_dup(&self) -> Result<ByteString<A>, ReserveError>
    where
        A: Clone,
    {
        let mut string = ByteString::try_with_cap_in(self.len(), self.allocator().clone())?;
        string.try_append(self.as_bytes())?;
        Ok(string)
    }
}

/// Segments `bytes` around `sep`, failing if `sep` never occurs.
pub(crate) fn split_segments<'a>(bytes: &'a [u8], sep: &'a [u8]) -> Result<Segments<'a>, NotFound> {
    if search::find(bytes, sep).is_none() {
        log::debug!("separator \"{}\" not found in \"{}\"", sep.escape_ascii(), bytes.escape_ascii());
        return Err(NotFound);
    }
    Ok(Segments::new(bytes, sep))
}

impl Default for ByteString {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Allocator + Clone> Clone for ByteString<A> {
    fn clone(&self) -> Self {
        match self.try_dup() {
            Ok(string) => string,
            Err(error) => error.throw(),
        }
    }
}

impl From<&str> for ByteString {
    fn from(value: &str) -> Self {
        ByteString::from_bytes(value.as_bytes())
    }
}

impl From<&[u8]> for ByteString {
    fn from(value: &[u8]) -> Self {
        ByteString::from_bytes(value)
    }
}

impl<A: Allocator> Deref for ByteString<A> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl<A: Allocator> DerefMut for ByteString<A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buf
    }
}

impl<A: Allocator> AsRef<[u8]> for ByteString<A> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<A: Allocator> Borrow<[u8]> for ByteString<A> {
    fn borrow(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<A: Allocator> ReadBuffer<u8> for ByteString<A> {
    fn as_slice(&self) -> &[u8] {
        self.as_bytes()
    }

    fn cap(&self) -> usize {
        ByteString::cap(self)
    }

    fn is_view(&self) -> bool {
        false
    }
}

impl<A: Allocator, B: Allocator> PartialEq<ByteString<B>> for ByteString<A> {
    fn eq(&self, other: &ByteString<B>) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: Allocator> Eq for ByteString<A> {}

impl<A: Allocator> PartialEq<[u8]> for ByteString<A> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl<A: Allocator> PartialEq<&[u8]> for ByteString<A> {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl<A: Allocator> PartialEq<str> for ByteString<A> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: Allocator> PartialEq<&str> for ByteString<A> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: Allocator> Hash for ByteString<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state)
    }
}

impl<A: Allocator> Debug for ByteString<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.as_bytes().escape_ascii())
    }
}

impl<A: Allocator> Display for ByteString<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}
