//! Logical index to byte offset translation.
//!
//! Nothing is cached: every lookup replays the iterator for the requested
//! unit. Lookups are O(n) but can never observe stale offsets.
//!
//! Negative indices count from the end (`-1` is the last unit) and are
//! normalized in exactly one place, [`normalize_index`] (or
//! [`normalize_bound`] for exclusive range ends).

use crate::error::{Error, Result};
use crate::text::TextBuffer;
use crate::unicode::{CodePoint, CodePointIter, Grapheme, GraphemeIter};
use std::collections::VecDeque;
use std::ops::Range;

/// Granularity of a logical index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    Byte,
    CodePoint,
    Grapheme,
}

/// Byte span of one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

impl From<CodePoint> for Span {
    fn from(cp: CodePoint) -> Self {
        Self {
            offset: cp.offset,
            len: cp.len,
        }
    }
}

impl From<Grapheme> for Span {
    fn from(g: Grapheme) -> Self {
        Self {
            offset: g.offset,
            len: g.len,
        }
    }
}

/// Spans of one unit kind, in order.
enum Units<'a> {
    Bytes(Range<usize>),
    CodePoints(CodePointIter<'a>),
    Graphemes(GraphemeIter<'a>),
}

impl<'a> Units<'a> {
    fn new(buffer: &'a TextBuffer<'_>, unit: Unit) -> Self {
        match unit {
            Unit::Byte => Self::Bytes(0..buffer.byte_count()),
            Unit::CodePoint => Self::CodePoints(buffer.code_point_iter()),
            Unit::Grapheme => Self::Graphemes(buffer.grapheme_iter()),
        }
    }
}

impl Iterator for Units<'_> {
    type Item = Result<Span>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Bytes(range) => range.next().map(|offset| Ok(Span { offset, len: 1 })),
            Self::CodePoints(iter) => iter.next().map(|cp| cp.map(Span::from)),
            Self::Graphemes(iter) => iter.next().map(|g| g.map(Span::from)),
        }
    }
}

/// Map a possibly negative element index onto `0..count`.
pub fn normalize_index(index: i64, count: usize) -> Result<usize> {
    let effective = if index < 0 {
        count as i128 + i128::from(index)
    } else {
        i128::from(index)
    };
    if effective < 0 || effective >= count as i128 {
        return Err(Error::out_of_range(index, count));
    }
    Ok(effective as usize)
}

/// Map a possibly negative range bound onto `0..=count`.
pub fn normalize_bound(index: i64, count: usize) -> Result<usize> {
    if index >= 0 && index as u64 == count as u64 {
        return Ok(count);
    }
    normalize_index(index, count)
}

/// Number of units in the buffer.
pub fn count(buffer: &TextBuffer<'_>, unit: Unit) -> Result<usize> {
    match unit {
        Unit::Byte => Ok(buffer.byte_count()),
        Unit::CodePoint => buffer.code_point_count(),
        Unit::Grapheme => buffer.grapheme_count(),
    }
}

/// Byte span of the unit at `index`.
pub fn resolve(buffer: &TextBuffer<'_>, unit: Unit, index: i64) -> Result<Span> {
    if unit == Unit::Byte {
        let offset = normalize_index(index, buffer.byte_count())?;
        return Ok(Span { offset, len: 1 });
    }

    let mut seen = 0usize;
    if index >= 0 {
        let target = usize::try_from(index).map_err(|_| Error::out_of_range(index, 0))?;
        for span in Units::new(buffer, unit) {
            let span = span?;
            if seen == target {
                return Ok(span);
            }
            seen += 1;
        }
        return Err(Error::out_of_range(index, seen));
    }

    // Keep only the last |index| spans; the front is the answer.
    let back = usize::try_from(index.unsigned_abs()).unwrap_or(usize::MAX);
    let mut window = VecDeque::with_capacity(back.min(64));
    for span in Units::new(buffer, unit) {
        let span = span?;
        if window.len() == back {
            window.pop_front();
        }
        window.push_back(span);
        seen += 1;
    }
    if seen < back {
        return Err(Error::out_of_range(index, seen));
    }
    window
        .pop_front()
        .ok_or_else(|| Error::out_of_range(index, seen))
}

/// Byte range covering units `start..end` (`end` exclusive).
pub fn slice(buffer: &TextBuffer<'_>, unit: Unit, start: i64, end: i64) -> Result<Range<usize>> {
    let total = if start < 0 || end < 0 || unit == Unit::Byte {
        Some(count(buffer, unit)?)
    } else {
        None
    };
    let to_ordinal = |index: i64| match total {
        Some(n) => normalize_bound(index, n),
        None => usize::try_from(index).map_err(|_| Error::out_of_range(index, 0)),
    };
    let first = to_ordinal(start)?;
    let last = to_ordinal(end)?;
    if first > last {
        let units = match total {
            Some(n) => n,
            None => count(buffer, unit)?,
        };
        return Err(Error::out_of_range(start, units));
    }

    if unit == Unit::Byte {
        return Ok(first..last);
    }

    let mut start_byte = None;
    let mut end_byte = None;
    let mut seen = 0usize;
    for span in Units::new(buffer, unit) {
        let span = span?;
        if seen == first {
            start_byte = Some(span.offset);
        }
        if seen == last {
            end_byte = Some(span.offset);
            break;
        }
        seen += 1;
    }

    // Ordinals equal to the unit count map to the end of the buffer.
    let len = buffer.byte_count();
    let finish = |ordinal: usize, found: Option<usize>, index: i64| match found {
        Some(offset) => Ok(offset),
        None if ordinal == seen => Ok(len),
        None => Err(Error::out_of_range(index, seen)),
    };
    Ok(finish(first, start_byte, start)?..finish(last, end_byte, end)?)
}

/// Ordinal of the unit starting exactly at `byte_offset`.
///
/// `byte_offset == byte_count()` yields the unit count. Offsets inside a
/// unit fail with [`Error::IndexOutOfRange`].
pub fn ordinal_of(buffer: &TextBuffer<'_>, unit: Unit, byte_offset: usize) -> Result<usize> {
    let len = buffer.byte_count();
    if byte_offset > len {
        return Err(Error::out_of_range(byte_offset, len));
    }
    if unit == Unit::Byte {
        return Ok(byte_offset);
    }

    let mut ordinal = 0;
    for span in Units::new(buffer, unit) {
        let span = span?;
        if span.offset == byte_offset {
            return Ok(ordinal);
        }
        if span.offset > byte_offset {
            return Err(Error::out_of_range(byte_offset, len));
        }
        ordinal += 1;
    }
    if byte_offset == len {
        Ok(ordinal)
    } else {
        Err(Error::out_of_range(byte_offset, len))
    }
}

/// Ordinal of the unit containing `byte_offset`.
pub fn ordinal_containing(buffer: &TextBuffer<'_>, unit: Unit, byte_offset: usize) -> Result<usize> {
    let mut ordinal = 0;
    for span in Units::new(buffer, unit) {
        let span = span?;
        if span.range().contains(&byte_offset) {
            return Ok(ordinal);
        }
        ordinal += 1;
    }
    Err(Error::out_of_range(byte_offset, buffer.byte_count()))
}

impl TextBuffer<'_> {
    /// Byte at `index`; negative counts from the end.
    pub fn byte_at(&self, index: i64) -> Result<u8> {
        let offset = normalize_index(index, self.byte_count())?;
        Ok(self.as_bytes()[offset])
    }

    /// Code point at `index`; negative counts from the end.
    pub fn code_point_at(&self, index: i64) -> Result<CodePoint> {
        let span = resolve(self, Unit::CodePoint, index)?;
        crate::unicode::decode_at(self.as_bytes(), span.offset)
    }

    /// Grapheme cluster at `index`; negative counts from the end.
    pub fn grapheme_at(&self, index: i64) -> Result<&str> {
        let span = resolve(self, Unit::Grapheme, index)?;
        Ok(&self.as_str()[span.range()])
    }

    /// Bytes in `start..end`.
    pub fn byte_slice(&self, start: i64, end: i64) -> Result<&[u8]> {
        let range = slice(self, Unit::Byte, start, end)?;
        Ok(&self.as_bytes()[range])
    }

    /// Code points `start..end` as a string slice.
    pub fn code_point_slice(&self, start: i64, end: i64) -> Result<&str> {
        let range = slice(self, Unit::CodePoint, start, end)?;
        Ok(&self.as_str()[range])
    }

    /// Grapheme clusters `start..end` as a string slice.
    pub fn grapheme_slice(&self, start: i64, end: i64) -> Result<&str> {
        let range = slice(self, Unit::Grapheme, start, end)?;
        Ok(&self.as_str()[range])
    }

    /// Same as [`grapheme_slice`](Self::grapheme_slice).
    pub fn substr(&self, start: i64, end: i64) -> Result<&str> {
        self.grapheme_slice(start, end)
    }
}
