#![cfg(test)]

use std::hash::{BuildHasher, RandomState};

use proptest::prelude::*;

use super::*;
use crate::alloc::{Allocator, Limited};
use crate::collections::buffer::BufferView;
use crate::error::{IndexOutOfBounds, NotFound};

fn assert_terminated(string: &ByteString<impl Allocator>) {
    assert_eq!(
        string.as_bytes_with_nul(),
        [string.as_bytes(), &[0_u8][..]].concat(),
        "The text should always be followed by a terminator."
    );
    assert!(string.cap() >= string.len());
}

#[test]
fn test_append_and_remove_first() {
    let mut text = ByteString::from("hello");
    text.append(", world");
    assert_eq!(text, "hello, world");
    assert_eq!(text.len(), 12);
    assert_terminated(&text);

    assert_eq!(text.remove_first(", world"), Ok(5));
    assert_eq!(text, "hello", "Removing the appended text should restore the original.");
    assert_terminated(&text);

    assert_eq!(text.remove_first("xyz"), Err(NotFound));
    assert_eq!(text, "hello");
}

#[test]
fn test_new_is_terminated() {
    let text = ByteString::new();
    assert_eq!(text.len(), 0);
    assert_eq!(text.cap(), 0, "The terminator shouldn't count towards the capacity.");
    assert_eq!(text.as_bytes_with_nul(), b"\0");
    assert_eq!(text.as_c_str().unwrap().to_bytes(), b"");

    let text = ByteString::with_cap(10);
    assert_eq!(text.cap(), 10);
    assert_eq!(text.has_space(), 10);
}

#[test]
fn test_append_n_and_push() {
    let mut text = ByteString::new();
    text.append_n("abcdef", 3);
    text.append_n("xy", 10);
    text.push(b'!');
    assert_eq!(text, "abcxy!");
    assert_terminated(&text);
}

#[test]
fn test_insert() {
    let mut text = ByteString::from("ace");
    text.insert(1, "b").unwrap();
    text.insert(3, "d").unwrap();
    assert_eq!(text, "abcde");
    assert_terminated(&text);

    assert_eq!(
        text.insert(5, "f"),
        Err(IndexOutOfBounds { index: 5, len: 5 }),
        "Inserting at the length should be rejected, append instead."
    );
    assert_eq!(text, "abcde");
}

#[test]
fn test_remove() {
    let mut text = ByteString::from("hello world");
    assert_eq!(text.remove(5, 1), Ok(1));
    assert_eq!(text, "helloworld");
    assert_eq!(text.remove(5, 100), Ok(5), "The count should be clamped.");
    assert_eq!(text, "hello");
    assert_eq!(text.remove(5, 1), Err(IndexOutOfBounds { index: 5, len: 5 }));
    assert_terminated(&text);
}

#[test]
fn test_remove_last_and_all() {
    let mut text = ByteString::from("one two one two");
    assert_eq!(text.remove_last("two"), Ok(12));
    assert_eq!(text, "one two one ");

    assert_eq!(text.remove_all("one"), 2);
    assert_eq!(text, " two ");
    assert_eq!(text.remove_all("three"), 0, "No occurrences is still a success.");
    assert_eq!(text.remove_all(""), 0, "An empty needle should never match.");
    assert_terminated(&text);

    let mut text = ByteString::from("aaaa");
    assert_eq!(text.remove_all("aa"), 2);
    assert!(text.is_empty());
    assert_terminated(&text);
}

#[test]
fn test_remove_all_rejoined() {
    let mut text = ByteString::from("aabb");
    assert_eq!(text.remove_all("ab"), 2, "Removing the inner match joins a new one.");
    assert!(text.is_empty());
    assert_terminated(&text);

    let mut text = ByteString::from("x<<<>>>y<>");
    assert_eq!(text.remove_all("<>"), 4);
    assert_eq!(text, "xy");
    assert_terminated(&text);
}

#[test]
fn test_strip() {
    let mut text = ByteString::from("  \t padded \r\n");
    text.strip();
    assert_eq!(text, "padded");
    assert_terminated(&text);

    let mut text = ByteString::from("...(quoted!) ");
    text.strip_punct();
    assert_eq!(text, "quoted");

    let mut text = ByteString::from("xxyhixyx");
    text.strip_bytes("xy");
    assert_eq!(text, "hi");

    let mut text = ByteString::from(" \n ");
    text.strip();
    assert!(text.is_empty(), "Stripping only whitespace should leave nothing.");
    assert_terminated(&text);
}

#[test]
fn test_search() {
    let text = ByteString::from("abcabcab");
    assert_eq!(text.find("bc"), Some(1));
    assert_eq!(text.rfind("bc"), Some(4));
    assert_eq!(text.find("cc"), None);
    assert_eq!(text.find(""), None);
    assert_eq!(text.find("abcabcabc"), None, "A longer needle should never match.");

    assert_eq!(text.count("ab"), 3);
    assert_eq!(ByteString::from("aaaa").count("aa"), 2, "Counting shouldn't overlap.");

    assert!(text.starts_with("abc"));
    assert!(!text.starts_with("abcabcabc"));
    assert!(text.ends_with("cab"));
    assert!(!text.ends_with("abc"));
}

#[test]
fn test_split_keeps_empty_segments() {
    let text = ByteString::from("a,b,,c");
    let parts = text.split(",").unwrap();
    assert_eq!(parts.len(), 4);
    assert_eq!(parts[0], "a");
    assert_eq!(parts[1], "b");
    assert_eq!(parts[2], "", "Adjacent separators should produce an empty segment.");
    assert_eq!(parts[3], "c");

    let parts = ByteString::from(",x,").split(",").unwrap();
    assert_eq!(parts.len(), 3, "Leading and trailing separators should produce segments.");

    assert_eq!(text.split(";").map(|parts| parts.len()), Err(NotFound));
}

#[test]
fn test_split_refs() {
    let text = ByteString::from("key=value=more");
    let parts = text.split_refs(b"=").unwrap();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts.get(1), Ok(&b"value"[..]));
    assert!(
        std::ptr::eq(parts.get(0).unwrap().as_ptr(), text.as_bytes().as_ptr()),
        "Segments should borrow from the original text."
    );
    assert!(text.split_refs(b"&").is_err());
}

#[test]
fn test_join() {
    let parts = ByteString::from("a,b,,c").split(",").unwrap();
    assert_eq!(ByteString::join(",", parts.iter()), "a,b,,c");
    assert_eq!(ByteString::join(", ", ["only"]), "only");
}

#[test]
fn test_view_search() {
    let view = BufferView::from("static literal");
    assert_eq!(view.find("lit"), Some(7));
    assert_eq!(view.rfind("t"), Some(9));
    assert_eq!(view.count("t"), 3);
    assert!(view.starts_with("static"));
    assert!(view.ends_with("ral"));
    assert_eq!(view.split_refs(b" ").unwrap().len(), 2);
    assert_eq!(view.to_byte_string(), "static literal");

    let owned = ByteString::from("static literal");
    assert_eq!(owned.view(), view);
}

#[test]
fn test_conversions() {
    let mut text = ByteString::from("Mixed Case");
    assert_eq!(text.as_str(), Ok("Mixed Case"));
    text.make_ascii_uppercase();
    assert_eq!(text, "MIXED CASE");
    assert_eq!(text.as_c_str().unwrap().to_str(), Ok("MIXED CASE"));

    let invalid = ByteString::from(&[0xff_u8, 0xfe][..]);
    assert!(invalid.as_str().is_err());
    assert_eq!(invalid.to_string(), "\u{fffd}\u{fffd}");
    assert_eq!(format!("{:?}", invalid), "\"\\xff\\xfe\"");

    let inner_nul = ByteString::from("a\0b");
    assert!(inner_nul.as_c_str().is_err());
}

#[test]
fn test_clone_and_hash() {
    let mut text = ByteString::with_cap(32);
    text.append("copy me");

    let copy = text.clone();
    assert_eq!(copy, text);
    assert_eq!(copy.cap(), copy.len(), "A copy should have no spare capacity.");
    assert_terminated(&copy);

    text.append("!");
    assert_eq!(copy, "copy me", "A copy shouldn't share memory with the original.");

    let state = RandomState::new();
    assert_eq!(
        state.hash_one(&copy),
        state.hash_one(b"copy me".as_slice()),
        "Hashing should match the borrowed byte slice."
    );
}

#[test]
fn test_shrink_to_fit() {
    let mut text = ByteString::with_cap(64);
    text.append("short");
    text.shrink_to_fit();
    assert_eq!(text.cap(), 5);
    assert_terminated(&text);
    text.shrink_to_fit();
    assert_eq!(text.cap(), 5);
}

#[test]
fn test_failed_append_leaves_string_unchanged() {
    let limited = Limited::new(6);
    let mut text = ByteString::try_new_in(&limited).unwrap();
    text.try_append("abcde").unwrap();
    assert_eq!(limited.live(), 6, "The terminator should be allocated too.");

    assert!(text.try_append("f").is_err());
    assert!(text.try_insert(0, "f").is_err());
    assert_eq!(text, "abcde");
    assert_terminated(&text);
}

proptest! {
    #[test]
    fn split_then_join_restores_text(
        segments in prop::collection::vec("[a-z]{0,4}", 2..8)
    ) {
        let text = ByteString::join(",", &segments);
        let parts = text.split(",").unwrap();

        prop_assert_eq!(parts.len(), segments.len());
        prop_assert_eq!(ByteString::join(",", parts.iter()), text);
    }

    #[test]
    fn operations_keep_terminator(
        start in "[ a-c]{0,12}",
        extra in "[a-c]{1,4}",
        at in any::<prop::sample::Index>()
    ) {
        let mut text = ByteString::from(start.as_str());
        text.append(&extra);
        prop_assert_eq!(text.as_bytes_with_nul().last(), Some(&0));

        let at = at.index(text.len());
        text.insert(at, &extra).unwrap();
        prop_assert_eq!(text.as_bytes_with_nul().last(), Some(&0));

        text.remove_all(&extra);
        prop_assert_eq!(text.find(&extra), None);
        prop_assert_eq!(text.as_bytes_with_nul().last(), Some(&0));

        text.strip();
        prop_assert_eq!(text.as_bytes_with_nul().len(), text.len() + 1);
        prop_assert_eq!(text.as_bytes_with_nul().last(), Some(&0));
    }
}
