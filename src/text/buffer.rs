//! The UTF-8 text buffer.
//!
//! [`TextBuffer`] either borrows its content or owns it. Borrowed buffers
//! turn into owned ones on the first edit that needs new bytes; edits that
//! only shrink the visible range (trimming, chomping) keep borrowing.
//!
//! Every content change bumps the buffer generation. Live iterators borrow
//! the buffer so the compiler rules out editing under them; detached
//! [`IterState`]s carry the generation and are checked on resume.

use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};
use crate::unicode::{
    BoundaryClassifier, CaseMapping, CodePointIter, GraphemeIter, IterState, UnicodeCase,
    default_classifier, display_width, encode_scalars,
};
use std::borrow::Cow;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// A string addressable by byte, code point and grapheme cluster.
#[derive(Clone, Debug)]
pub struct TextBuffer<'a> {
    text: Cow<'a, str>,
    generation: u64,
    classifier: Arc<dyn BoundaryClassifier>,
    case: Arc<dyn CaseMapping>,
}

/// Allocate an empty string able to hold `capacity` bytes.
pub(crate) fn try_string(capacity: usize) -> Result<String> {
    let mut out = String::new();
    if out.try_reserve(capacity).is_err() {
        emit_log(
            LogLevel::Debug,
            &format!("buffer growth to {capacity} bytes failed"),
        );
        return Err(Error::AllocationFailure {
            requested: capacity,
        });
    }
    Ok(out)
}

impl TextBuffer<'static> {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        TextBuffer::with_text("")
    }

    /// Take ownership of `bytes`, failing if they are not valid UTF-8.
    pub fn from_owned_bytes(bytes: Vec<u8>) -> Result<Self> {
        let text = String::from_utf8(bytes).map_err(|e| {
            let err = Error::from(e);
            emit_log(LogLevel::Warn, &format!("rejected owned bytes: {err}"));
            err
        })?;
        Ok(Self::from(text))
    }

    /// Encode scalar values into a new owned buffer.
    pub fn from_code_points(scalars: &[u32]) -> Result<Self> {
        encode_scalars(scalars).map(Self::from)
    }

    /// Build an owned buffer from chars.
    pub fn from_chars<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        Self::from(chars.into_iter().collect::<String>())
    }

    /// Join `parts` with `separator` into a new owned buffer.
    pub fn from_joined<S: AsRef<str>>(parts: &[S], separator: &str) -> Result<Self> {
        let content: usize = parts.iter().map(|p| p.as_ref().len()).sum();
        let separators = separator.len() * parts.len().saturating_sub(1);
        let mut out = try_string(content + separators)?;
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            out.push_str(part.as_ref());
        }
        Ok(Self::from(out))
    }
}

impl<'a> TextBuffer<'a> {
    /// Borrow `text` without copying.
    #[must_use]
    pub fn with_text(text: &'a str) -> Self {
        Self::from_cow(Cow::Borrowed(text))
    }

    /// Borrow `bytes`, failing if they are not valid UTF-8.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            let err = Error::from(e);
            emit_log(LogLevel::Warn, &format!("rejected borrowed bytes: {err}"));
            err
        })?;
        Ok(Self::with_text(text))
    }

    fn from_cow(text: Cow<'a, str>) -> Self {
        Self {
            text,
            generation: 0,
            classifier: default_classifier(),
            case: Arc::new(UnicodeCase),
        }
    }

    /// Use a different grapheme boundary classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: Arc<dyn BoundaryClassifier>) -> Self {
        self.classifier = classifier;
        self.bump_generation();
        self
    }

    /// Use a different case mapping table.
    #[must_use]
    pub fn with_case_mapping(mut self, case: Arc<dyn CaseMapping>) -> Self {
        self.case = case;
        self
    }

    /// The boundary classifier used for grapheme operations.
    #[must_use]
    pub fn classifier(&self) -> &dyn BoundaryClassifier {
        self.classifier.as_ref()
    }

    pub(crate) fn case_mapping(&self) -> &dyn CaseMapping {
        self.case.as_ref()
    }

    /// Content as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Content as raw UTF-8 bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Number of bytes.
    #[must_use]
    pub fn byte_count(&self) -> usize {
        self.text.len()
    }

    /// Whether the buffer holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the buffer owns its storage.
    #[must_use]
    pub fn is_owned(&self) -> bool {
        matches!(self.text, Cow::Owned(_))
    }

    /// Content generation, incremented by every change.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of code points.
    pub fn code_point_count(&self) -> Result<usize> {
        self.code_point_iter()
            .try_fold(0, |count, cp| cp.map(|_| count + 1))
    }

    /// Number of grapheme clusters.
    pub fn grapheme_count(&self) -> Result<usize> {
        self.grapheme_iter()
            .try_fold(0, |count, g| g.map(|_| count + 1))
    }

    /// Iterate over code points from the start.
    #[must_use]
    pub fn code_point_iter(&self) -> CodePointIter<'_> {
        CodePointIter::with_generation(self.as_bytes(), 0, self.generation)
    }

    /// Iterate over code points starting at byte `offset`.
    ///
    /// An offset inside a multi-byte sequence yields `InvalidEncoding` on the
    /// first step.
    pub fn code_point_iter_from(&self, offset: usize) -> Result<CodePointIter<'_>> {
        if offset > self.byte_count() {
            return Err(Error::out_of_range(offset, self.byte_count()));
        }
        Ok(CodePointIter::with_generation(
            self.as_bytes(),
            offset,
            self.generation,
        ))
    }

    /// Iterate over grapheme clusters from the start.
    #[must_use]
    pub fn grapheme_iter(&self) -> GraphemeIter<'_> {
        GraphemeIter::with_generation(self.as_str(), self.classifier(), 0, self.generation)
    }

    fn check_state(&self, state: IterState) -> Result<()> {
        if state.generation != self.generation {
            emit_log(
                LogLevel::Debug,
                &format!(
                    "stale iterator state: generation {} vs {}",
                    state.generation, self.generation
                ),
            );
            return Err(Error::StaleIterator {
                captured: state.generation,
                current: self.generation,
            });
        }
        if state.offset > self.byte_count() {
            return Err(Error::out_of_range(state.offset, self.byte_count()));
        }
        Ok(())
    }

    /// Continue code point iteration from a detached state.
    pub fn resume_code_points(&self, state: IterState) -> Result<CodePointIter<'_>> {
        self.check_state(state)?;
        Ok(CodePointIter::with_generation(
            self.as_bytes(),
            state.offset,
            self.generation,
        ))
    }

    /// Continue grapheme iteration from a detached state.
    pub fn resume_graphemes(&self, state: IterState) -> Result<GraphemeIter<'_>> {
        self.check_state(state)?;
        Ok(GraphemeIter::with_generation(
            self.as_str(),
            self.classifier(),
            state.offset,
            self.generation,
        ))
    }

    /// Splice `replacement` over the bytes in `start..end`.
    ///
    /// Both offsets must be code point boundaries with `start <= end`.
    pub fn replace_range(&mut self, start: usize, end: usize, replacement: &str) -> Result<()> {
        let len = self.byte_count();
        if start > end || end > len {
            return Err(Error::out_of_range(if start > end { start } else { end }, len));
        }
        if !self.text.is_char_boundary(start) {
            return Err(Error::InvalidEncoding { offset: start });
        }
        if !self.text.is_char_boundary(end) {
            return Err(Error::InvalidEncoding { offset: end });
        }
        if start == end && replacement.is_empty() {
            return Ok(());
        }

        match &mut self.text {
            Cow::Owned(s) => {
                let growth = replacement.len().saturating_sub(end - start);
                if s.try_reserve(growth).is_err() {
                    return Err(Error::AllocationFailure { requested: growth });
                }
                s.replace_range(start..end, replacement);
            }
            Cow::Borrowed(s) => {
                let s = *s;
                let mut out = try_string(len - (end - start) + replacement.len())?;
                out.push_str(&s[..start]);
                out.push_str(replacement);
                out.push_str(&s[end..]);
                self.text = Cow::Owned(out);
            }
        }
        self.bump_generation();
        Ok(())
    }

    /// Narrow the content to `range` without copying.
    pub(crate) fn retain_range(&mut self, range: Range<usize>) {
        if range.start == 0 && range.end == self.byte_count() {
            return;
        }
        match &mut self.text {
            Cow::Borrowed(s) => {
                let full: &'a str = *s;
                *s = &full[range];
            }
            Cow::Owned(s) => {
                s.truncate(range.end);
                s.drain(..range.start);
            }
        }
        self.bump_generation();
    }

    /// Swap in freshly computed content if it differs.
    pub(crate) fn set_content(&mut self, content: String) {
        if content != *self.text {
            self.text = Cow::Owned(content);
            self.bump_generation();
        }
    }

    /// Replace the whole content with an owned copy of `content`.
    pub fn reset(&mut self, content: &str) -> Result<()> {
        let mut out = try_string(content.len())?;
        out.push_str(content);
        self.text = Cow::Owned(out);
        self.bump_generation();
        Ok(())
    }

    /// Detach the content as bytes, leaving the buffer empty.
    pub fn to_owned_bytes(&mut self) -> Vec<u8> {
        let text = std::mem::replace(&mut self.text, Cow::Borrowed(""));
        self.bump_generation();
        text.into_owned().into_bytes()
    }

    /// Drop owned storage and leave an empty borrowed buffer. Idempotent.
    pub fn release(&mut self) {
        if matches!(self.text, Cow::Borrowed("")) {
            return;
        }
        self.text = Cow::Borrowed("");
        self.bump_generation();
    }

    /// Independent owned copy of this buffer.
    #[must_use]
    pub fn copy(&self) -> TextBuffer<'static> {
        TextBuffer {
            text: Cow::Owned(self.text.to_string()),
            generation: 0,
            classifier: Arc::clone(&self.classifier),
            case: Arc::clone(&self.case),
        }
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.text.into_owned()
    }

    /// Byte-level prefix test.
    #[must_use]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.text.starts_with(prefix)
    }

    /// Byte-level suffix test.
    #[must_use]
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.text.ends_with(suffix)
    }

    /// Compare after lower-casing both sides with this buffer's case mapping.
    #[must_use]
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        crate::unicode::eq_lowercase(&self.text, other, self.case_mapping())
    }

    /// True when empty or made only of whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }

    #[must_use]
    pub fn is_ascii(&self) -> bool {
        crate::unicode::is_ascii_only(&self.text)
    }

    /// True when no code point is upper-case.
    #[must_use]
    pub fn is_lowercase(&self) -> bool {
        let case = self.case_mapping();
        !self.text.chars().any(|c| case.is_upper(c))
    }

    /// True when no code point is lower-case.
    #[must_use]
    pub fn is_uppercase(&self) -> bool {
        let case = self.case_mapping();
        !self.text.chars().any(|c| case.is_lower(c))
    }

    /// Display width in terminal cells.
    #[must_use]
    pub fn width(&self) -> usize {
        display_width(&self.text)
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl Default for TextBuffer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> From<&'a str> for TextBuffer<'a> {
    fn from(text: &'a str) -> Self {
        Self::with_text(text)
    }
}

impl From<String> for TextBuffer<'static> {
    fn from(text: String) -> Self {
        TextBuffer::from_cow(Cow::Owned(text))
    }
}

impl fmt::Display for TextBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for TextBuffer<'_> {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl AsRef<[u8]> for TextBuffer<'_> {
    fn as_ref(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

impl PartialEq for TextBuffer<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for TextBuffer<'_> {}

impl PartialEq<str> for TextBuffer<'_> {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for TextBuffer<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unicode::CodePointClassifier;

    #[test]
    fn test_code_point_iter_from_offset() {
        let text = TextBuffer::with_text("aé!");
        let tail: String = text
            .code_point_iter_from(1)
            .unwrap()
            .map(|cp| cp.unwrap().scalar)
            .collect();
        assert_eq!(tail, "é!");
        assert_eq!(
            text.code_point_iter_from(2).unwrap().next(),
            Some(Err(Error::InvalidEncoding { offset: 2 }))
        );
        assert!(text.code_point_iter_from(9).is_err());
    }

    #[test]
    fn test_borrowed_and_owned_construction() {
        let bytes = b"Hello".to_vec();
        let borrowed = TextBuffer::from_bytes(&bytes).unwrap();
        assert!(!borrowed.is_owned());

        let owned = TextBuffer::from_owned_bytes(bytes.clone()).unwrap();
        assert!(owned.is_owned());
        assert_eq!(borrowed, owned);
    }

    #[test]
    fn test_invalid_bytes_rejected() {
        assert_eq!(
            TextBuffer::from_bytes(b"ab\xC3").unwrap_err(),
            Error::InvalidEncoding { offset: 2 }
        );
        assert!(TextBuffer::from_owned_bytes(vec![0x80]).is_err());
    }

    #[test]
    fn test_from_code_points_and_joined() {
        let buf = TextBuffer::from_code_points(&[0x48, 0xE9]).unwrap();
        assert_eq!(buf, "Hé");

        let joined = TextBuffer::from_joined(&["a", "b", "c"], ", ").unwrap();
        assert_eq!(joined, "a, b, c");

        let empty = TextBuffer::from_joined::<&str>(&[], "-").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_counts() {
        let buf = TextBuffer::with_text("Héllo");
        assert_eq!(buf.byte_count(), 6);
        assert_eq!(buf.code_point_count().unwrap(), 5);
        assert_eq!(buf.grapheme_count().unwrap(), 5);

        let decomposed = TextBuffer::with_text("e\u{0301}");
        assert_eq!(decomposed.code_point_count().unwrap(), 2);
        assert_eq!(decomposed.grapheme_count().unwrap(), 1);
    }

    #[test]
    fn test_replace_range_turns_borrowed_into_owned() {
        let mut buf = TextBuffer::with_text("Hello");
        buf.replace_range(1, 5, "i").unwrap();
        assert_eq!(buf, "Hi");
        assert!(buf.is_owned());
        assert_eq!(buf.generation(), 1);
    }

    #[test]
    fn test_replace_range_rejects_bad_offsets() {
        let mut buf = TextBuffer::with_text("é");
        assert!(matches!(
            buf.replace_range(1, 2, "x"),
            Err(Error::InvalidEncoding { offset: 1 })
        ));
        assert!(matches!(
            buf.replace_range(2, 1, ""),
            Err(Error::IndexOutOfRange { .. })
        ));
        assert!(buf.replace_range(0, 3, "").is_err());
        assert_eq!(buf, "é");
        assert_eq!(buf.generation(), 0);
    }

    #[test]
    fn test_noop_edit_keeps_generation() {
        let mut buf = TextBuffer::with_text("abc");
        buf.replace_range(1, 1, "").unwrap();
        assert_eq!(buf.generation(), 0);
        assert!(!buf.is_owned());
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut buf = TextBuffer::from(String::from("owned"));
        buf.release();
        assert!(buf.is_empty());
        assert!(!buf.is_owned());
        let generation = buf.generation();
        buf.release();
        assert_eq!(buf.generation(), generation);
    }

    #[test]
    fn test_to_owned_bytes_detaches() {
        let mut buf = TextBuffer::from(String::from("data"));
        let bytes = buf.to_owned_bytes();
        assert_eq!(bytes, b"data");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_reset_makes_owned_copy() {
        let mut buf = TextBuffer::with_text("old");
        buf.reset("new content").unwrap();
        assert_eq!(buf, "new content");
        assert!(buf.is_owned());
    }

    #[test]
    fn test_stale_state_rejected() {
        let mut buf = TextBuffer::from(String::from("abc"));
        let state = {
            let mut iter = buf.code_point_iter();
            iter.next();
            iter.state()
        };
        assert_eq!(
            buf.resume_code_points(state).unwrap().next().unwrap().unwrap().scalar,
            'b'
        );

        buf.replace_range(0, 0, "x").unwrap();
        assert_eq!(
            buf.resume_code_points(state).unwrap_err(),
            Error::StaleIterator {
                captured: 0,
                current: 1
            }
        );
    }

    #[test]
    fn test_resume_graphemes() {
        let buf = TextBuffer::with_text("ae\u{0301}b");
        let state = {
            let mut iter = buf.grapheme_iter();
            iter.next();
            iter.state()
        };
        let rest: Vec<_> = buf
            .resume_graphemes(state)
            .unwrap()
            .map(|g| g.unwrap().len)
            .collect();
        assert_eq!(rest, vec![3, 1]);
    }

    #[test]
    fn test_copy_is_independent() {
        let original = TextBuffer::with_text("shared");
        let mut copy = original.copy();
        copy.replace_range(0, 1, "S").unwrap();
        assert_eq!(original, "shared");
        assert_eq!(copy, "Shared");
    }

    #[test]
    fn test_custom_classifier() {
        let buf = TextBuffer::with_text("e\u{0301}").with_classifier(Arc::new(CodePointClassifier));
        assert_eq!(buf.grapheme_count().unwrap(), 2);
    }

    #[test]
    fn test_predicates() {
        let buf = TextBuffer::with_text("Straße");
        assert!(buf.starts_with("Str"));
        assert!(buf.ends_with("ße"));
        assert!(buf.eq_ignore_case("STRAßE"));
        assert!(!buf.is_ascii());

        assert!(TextBuffer::with_text(" \t\n").is_blank());
        assert!(TextBuffer::new().is_blank());
        assert!(TextBuffer::with_text("abc 1").is_lowercase());
        assert!(TextBuffer::with_text("ABC 1").is_uppercase());
        assert!(!TextBuffer::with_text("Abc").is_uppercase());
    }

    #[test]
    fn test_width() {
        assert_eq!(TextBuffer::with_text("ab").width(), 2);
    }
}
