//! Code point decoding.
//!
//! [`CodePointIter`] walks a byte slice and yields one [`CodePoint`] per
//! UTF-8 sequence. Buffers only ever hold valid UTF-8, but the decoder still
//! checks every sequence and reports [`Error::InvalidEncoding`] instead of
//! skipping or replacing bad bytes.

use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};

/// A decoded Unicode scalar value and where it sits in the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CodePoint {
    /// The scalar value.
    pub scalar: char,
    /// Byte offset of the first byte of the sequence.
    pub offset: usize,
    /// Encoded length in bytes (1..=4).
    pub len: usize,
}

impl CodePoint {
    /// Scalar value as a `u32`.
    #[must_use]
    pub fn value(&self) -> u32 {
        u32::from(self.scalar)
    }

    /// Byte offset one past the end of this code point.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Detached position of an iterator, valid for one buffer generation.
///
/// Obtained from [`CodePointIter::state`] or
/// [`GraphemeIter::state`](crate::unicode::GraphemeIter::state) and resumed
/// with [`TextBuffer::resume_code_points`](crate::TextBuffer::resume_code_points).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IterState {
    pub offset: usize,
    pub generation: u64,
}

/// Length of the UTF-8 sequence introduced by `lead`, or `None` for bytes
/// that can never start a well-formed sequence.
#[must_use]
pub fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// Decode the code point starting at `offset`.
///
/// Overlong forms, surrogates and values above U+10FFFF are rejected.
pub fn decode_at(bytes: &[u8], offset: usize) -> Result<CodePoint> {
    let invalid = || Error::InvalidEncoding { offset };

    let lead = *bytes.get(offset).ok_or_else(invalid)?;
    let len = sequence_len(lead).ok_or_else(invalid)?;
    let seq = bytes.get(offset..offset + len).ok_or_else(invalid)?;
    // from_utf8 on a single sequence enforces shortest form and the scalar range.
    let scalar = std::str::from_utf8(seq)
        .ok()
        .and_then(|s| s.chars().next())
        .ok_or_else(invalid)?;

    Ok(CodePoint {
        scalar,
        offset,
        len,
    })
}

/// Encode a sequence of scalar values as UTF-8.
///
/// Values in the surrogate range or above U+10FFFF fail with
/// [`Error::InvalidEncoding`]; the reported offset is the index of the
/// offending value in `scalars`.
pub fn encode_scalars(scalars: &[u32]) -> Result<String> {
    let mut out = String::new();
    out.try_reserve(scalars.len())?;
    for (i, &value) in scalars.iter().enumerate() {
        let ch = char::from_u32(value).ok_or(Error::InvalidEncoding { offset: i })?;
        out.push(ch);
    }
    Ok(out)
}

/// Forward-only iterator over the code points of a byte slice.
///
/// After yielding an error the iterator is fused and returns `None`.
#[derive(Clone, Debug)]
pub struct CodePointIter<'a> {
    bytes: &'a [u8],
    offset: usize,
    generation: u64,
    failed: bool,
}

impl<'a> CodePointIter<'a> {
    /// Iterate over raw bytes from the start.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_generation(bytes, 0, 0)
    }

    pub(crate) fn with_generation(bytes: &'a [u8], offset: usize, generation: u64) -> Self {
        Self {
            bytes,
            offset,
            generation,
            failed: false,
        }
    }

    /// Current byte offset (start of the next code point).
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Detach the current position so it can be resumed later.
    #[must_use]
    pub fn state(&self) -> IterState {
        IterState {
            offset: self.offset,
            generation: self.generation,
        }
    }

    /// Decode the next code point without advancing.
    pub fn peek(&self) -> Option<Result<CodePoint>> {
        if self.failed || self.offset >= self.bytes.len() {
            return None;
        }
        Some(decode_at(self.bytes, self.offset))
    }
}

impl Iterator for CodePointIter<'_> {
    type Item = Result<CodePoint>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.peek()?;
        match &item {
            Ok(cp) => self.offset = cp.end(),
            Err(err) => {
                self.failed = true;
                emit_log(LogLevel::Warn, &format!("code point decode failed: {err}"));
            }
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.bytes.len().saturating_sub(self.offset);
        (remaining.div_ceil(4), Some(remaining))
    }
}

impl std::iter::FusedIterator for CodePointIter<'_> {}
