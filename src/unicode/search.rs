//! Byte-level substring matching.
//!
//! All matching is exact byte comparison through `memchr::memmem`. Because
//! both haystack and needle are valid UTF-8, a match always starts and ends
//! on code point boundaries. An empty needle never matches.

use memchr::memmem;

/// Byte offset of the first occurrence of `needle`.
#[must_use]
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    memmem::find(haystack, needle)
}

/// Byte offset of the last occurrence of `needle`.
#[must_use]
pub fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    memmem::rfind(haystack, needle)
}

/// Byte offsets of all non-overlapping occurrences, left to right.
#[must_use]
pub fn find_all(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }
    memmem::find_iter(haystack, needle).collect()
}

/// Number of non-overlapping occurrences, left to right.
#[must_use]
pub fn count(haystack: &[u8], needle: &[u8]) -> usize {
    if needle.is_empty() {
        return 0;
    }
    memmem::find_iter(haystack, needle).count()
}

/// Check if a string contains only ASCII characters.
#[must_use]
#[inline]
pub fn is_ascii_only(s: &str) -> bool {
    s.is_ascii()
}
