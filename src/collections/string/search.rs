//! Byte-wise searching and trimming, shared between [`ByteString`](super::ByteString) and
//! [`BufferView<u8>`](crate::collections::buffer::BufferView).
//!
//! An empty needle never matches. This keeps `count` finite and stops `remove_all` from looping
//! forever, at the cost of differing from [`str::find`].

use std::iter::FusedIterator;

/// Returns the position of the first occurrence of `needle` in `haystack`.
pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// Returns the position of the last occurrence of `needle` in `haystack`.
pub(crate) fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).rposition(|window| window == needle)
}

/// Counts the non-overlapping occurrences of `needle`, scanning from the front.
pub(crate) fn count(haystack: &[u8], needle: &[u8]) -> usize {
    let mut total = 0;
    let mut pos = 0;
    while let Some(found) = find(&haystack[pos..], needle) {
        total += 1;
        pos += found + needle.len();
    }
    total
}

/// Returns true if `haystack` begins with `prefix`.
pub(crate) fn starts_with(haystack: &[u8], prefix: &[u8]) -> bool {
    // A longer prefix can never match, check before comparing anything.
    prefix.len() <= haystack.len() && &haystack[..prefix.len()] == prefix
}

/// Returns true if `haystack` finishes with `suffix`.
pub(crate) fn ends_with(haystack: &[u8], suffix: &[u8]) -> bool {
    suffix.len() <= haystack.len() && &haystack[haystack.len() - suffix.len()..] == suffix
}

/// Returns the offset of the first byte not matching `strip` and the length of the span up to
/// and including the last such byte.
pub(crate) fn trim_span(haystack: &[u8], strip: impl Fn(u8) -> bool) -> (usize, usize) {
    let Some(start) = haystack.iter().position(|byte| !strip(*byte)) else {
        return (haystack.len(), 0);
    };
    // There is at least one byte that isn't stripped, so this always finds something.
    let end = haystack.iter().rposition(|byte| !strip(*byte)).map_or(start, |end| end + 1);
    (start, end - start)
}

/// An iterator over the segments of a byte slice between occurrences of a separator. Every
/// segment is yielded, including empty ones at the start, the end, and between adjacent
/// separators.
#[derive(Debug, Clone)]
pub(crate) struct Segments<'a> {
    rest: Option<&'a [u8]>,
    sep: &'a [u8],
}

impl<'a> Segments<'a> {
    pub(crate) fn new(haystack: &'a [u8], sep: &'a [u8]) -> Segments<'a> {
        Segments {
            rest: Some(haystack),
            sep,
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest.take()?;
        match find(rest, self.sep) {
            Some(pos) => {
                self.rest = Some(&rest[pos + self.sep.len()..]);
                Some(&rest[..pos])
            },
            None => Some(rest),
        }
    }
}

impl FusedIterator for Segments<'_> {}
