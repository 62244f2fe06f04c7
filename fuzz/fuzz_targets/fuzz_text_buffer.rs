//! Fuzz target for construction and editing.
//!
//! Arbitrary bytes must either be rejected with an error or produce a buffer
//! on which every edit keeps the content valid UTF-8 and never panics.

#![no_main]

use libfuzzer_sys::fuzz_target;
use unistr::TextBuffer;

fuzz_target!(|data: &[u8]| {
    let Ok(mut text) = TextBuffer::from_bytes(data) else {
        return;
    };

    let count = text.grapheme_count().unwrap_or(0);
    let _ = text.grapheme_at(-1);
    let _ = text.substr(0, count as i64);
    let _ = text.insert("\u{0301}", count / 2);
    let _ = text.replace("a", "\u{1F600}");
    let _ = text.reverse();
    let _ = text.trim(&[" ", "\t"]);
    let _ = text.to_titlecase();
    let _ = text.chomp();
    let _ = text.parse_int::<i64>(0);

    // The content must still decode cleanly.
    assert!(text.code_point_iter().all(|cp| cp.is_ok()));
    assert!(std::str::from_utf8(text.as_bytes()).is_ok());
});
