//! Property-based tests for indexing and editing invariants.
//!
//! Uses proptest to verify invariants that must hold across all valid inputs.

use proptest::prelude::*;
use unistr::unicode::{CodePointIter, encode_scalars};
use unistr::{TextBuffer, Unit};

// ============================================================================
// Strategies
// ============================================================================

/// Generate arbitrary UTF-8 strings (proptest default).
fn utf8_string() -> impl Strategy<Value = String> {
    "\\PC{0,64}"
}

/// Generate strings with emoji, flags and combining characters.
fn cluster_string() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "a", " ", "é", "e\u{0301}", "😀", "🇺🇸", "👨‍👩‍👧‍👦", "\r\n", "漢", "ß",
        ]),
        0..24,
    )
    .prop_map(|parts| parts.join(""))
}

/// Needles that cannot overlap with themselves.
fn self_disjoint_needle() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["a", "é", "ab", "😀", "xy"])
}

// ============================================================================
// Decoding and counting
// ============================================================================

proptest! {
    /// Decoding into code points and re-encoding reproduces the bytes.
    #[test]
    fn code_points_round_trip(s in utf8_string()) {
        let scalars: Vec<u32> = CodePointIter::new(s.as_bytes())
            .map(|cp| cp.map(|cp| cp.value()))
            .collect::<Result<_, _>>()
            .unwrap();
        prop_assert_eq!(encode_scalars(&scalars).unwrap(), s);
    }

    /// graphemes <= code points <= bytes.
    #[test]
    fn count_ordering(s in cluster_string()) {
        let text = TextBuffer::with_text(&s);
        let graphemes = text.grapheme_count().unwrap();
        let code_points = text.code_point_count().unwrap();
        prop_assert!(graphemes <= code_points);
        prop_assert!(code_points <= text.byte_count());
    }

    /// Grapheme spans cover the buffer exactly, in order.
    #[test]
    fn grapheme_spans_cover_buffer(s in cluster_string()) {
        let text = TextBuffer::with_text(&s);
        let mut next = 0;
        for g in text.grapheme_iter() {
            let g = g.unwrap();
            prop_assert_eq!(g.offset, next);
            prop_assert!(s.is_char_boundary(g.end()));
            next = g.end();
        }
        prop_assert_eq!(next, s.len());
    }

    /// The last grapheme is reachable both ways.
    #[test]
    fn negative_index_equivalence(s in cluster_string()) {
        let text = TextBuffer::with_text(&s);
        let count = text.grapheme_count().unwrap();
        prop_assume!(count > 0);
        prop_assert_eq!(
            text.grapheme_at(-1).unwrap(),
            text.grapheme_at(count as i64 - 1).unwrap()
        );
    }

    /// ordinal_of inverts resolve for every code point.
    #[test]
    fn ordinal_inverts_resolve(s in utf8_string()) {
        let text = TextBuffer::with_text(&s);
        let count = text.code_point_count().unwrap();
        for i in 0..count {
            let span = unistr::text::index::resolve(&text, Unit::CodePoint, i as i64).unwrap();
            prop_assert_eq!(
                unistr::text::index::ordinal_of(&text, Unit::CodePoint, span.offset).unwrap(),
                i
            );
        }
    }
}

// ============================================================================
// Editing
// ============================================================================

proptest! {
    /// Reversing twice restores the original bytes.
    #[test]
    fn reverse_twice_is_identity(s in utf8_string()) {
        let mut text = TextBuffer::with_text(&s);
        text.reverse().unwrap();
        text.reverse().unwrap();
        prop_assert_eq!(text.as_str(), s.as_str());
    }

    /// Trimming spaces is idempotent.
    #[test]
    fn trim_is_idempotent(s in cluster_string()) {
        let mut once = TextBuffer::with_text(&s);
        once.trim(&[" "]).unwrap();
        let mut twice = once.copy();
        twice.trim(&[" "]).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Removing every occurrence leaves none behind.
    #[test]
    fn replace_with_empty_clears_needle(
        s in cluster_string(),
        needle in self_disjoint_needle(),
    ) {
        let mut text = TextBuffer::with_text(&s);
        let before = text.count(needle);
        prop_assert_eq!(text.replace(needle, "").unwrap(), before);
        prop_assert_eq!(text.count(needle), 0);
    }

    /// Splitting yields one more piece than there are separators, and the
    /// pieces join back to the original.
    #[test]
    fn split_join_round_trip(s in cluster_string()) {
        let text = TextBuffer::with_text(&s);
        let pieces = text.split(" ");
        prop_assert_eq!(pieces.len(), text.count(" ") + 1);
        prop_assert_eq!(pieces.join(" "), s);
    }

    /// Inserting at any grapheme position keeps the rest of the text intact.
    #[test]
    fn insert_preserves_surroundings(s in cluster_string(), pick in 0usize..32) {
        let mut text = TextBuffer::with_text(&s);
        let count = text.grapheme_count().unwrap();
        let at = pick % (count + 1);
        let prefix = text.substr(0, at as i64).unwrap().to_string();
        let suffix = text.substr(at as i64, count as i64).unwrap().to_string();
        text.insert("|", at).unwrap();
        prop_assert_eq!(text.as_str(), format!("{prefix}|{suffix}"));
    }

    /// repeat(n) multiplies the length.
    #[test]
    fn repeat_scales_length(s in cluster_string(), n in 0usize..5) {
        let mut text = TextBuffer::with_text(&s);
        text.repeat(n).unwrap();
        prop_assert_eq!(text.byte_count(), s.len() * n);
    }
}
