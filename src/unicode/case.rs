//! Per code point case mapping.

use crate::error::{Error, Result};
use std::fmt;

/// The code points one input code point maps to (at most three).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mapped {
    chars: [char; 3],
    len: u8,
    next: u8,
}

impl Mapped {
    /// A mapping to `c` alone.
    #[must_use]
    pub const fn one(c: char) -> Self {
        Self {
            chars: [c, '\0', '\0'],
            len: 1,
            next: 0,
        }
    }

    /// Collect a mapping of up to three code points; extra ones are dropped.
    pub fn collect_from<I: IntoIterator<Item = char>>(chars: I) -> Self {
        let mut out = Self {
            chars: ['\0'; 3],
            len: 0,
            next: 0,
        };
        for c in chars.into_iter().take(3) {
            out.chars[usize::from(out.len)] = c;
            out.len += 1;
        }
        out
    }

    /// Encoded length of the remaining code points.
    #[must_use]
    pub fn utf8_len(&self) -> usize {
        self.chars[usize::from(self.next)..usize::from(self.len)]
            .iter()
            .map(|c| c.len_utf8())
            .sum()
    }
}

impl Iterator for Mapped {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if self.next == self.len {
            return None;
        }
        let c = self.chars[usize::from(self.next)];
        self.next += 1;
        Some(c)
    }
}

/// Case mapping table used by the case conversion operations.
///
/// Mappings may expand a single code point into several (`ß` upper-cases to
/// `SS`); std's full mappings never exceed three.
pub trait CaseMapping: fmt::Debug + Send + Sync {
    fn lower(&self, c: char) -> Mapped;
    fn upper(&self, c: char) -> Mapped;
    fn is_lower(&self, c: char) -> bool;
    fn is_upper(&self, c: char) -> bool;
}

/// Full Unicode case mapping from the standard library tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnicodeCase;

impl CaseMapping for UnicodeCase {
    fn lower(&self, c: char) -> Mapped {
        Mapped::collect_from(c.to_lowercase())
    }

    fn upper(&self, c: char) -> Mapped {
        Mapped::collect_from(c.to_uppercase())
    }

    fn is_lower(&self, c: char) -> bool {
        c.is_lowercase()
    }

    fn is_upper(&self, c: char) -> bool {
        c.is_uppercase()
    }
}

/// Maps only `A-Z`/`a-z` and leaves everything else alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AsciiCase;

impl CaseMapping for AsciiCase {
    fn lower(&self, c: char) -> Mapped {
        Mapped::one(c.to_ascii_lowercase())
    }

    fn upper(&self, c: char) -> Mapped {
        Mapped::one(c.to_ascii_uppercase())
    }

    fn is_lower(&self, c: char) -> bool {
        c.is_ascii_lowercase()
    }

    fn is_upper(&self, c: char) -> bool {
        c.is_ascii_uppercase()
    }
}

fn reserve(out: &mut String, additional: usize) -> Result<()> {
    out.try_reserve(additional)
        .map_err(|_| Error::AllocationFailure {
            requested: out.len().saturating_add(additional),
        })
}

fn push_mapped(out: &mut String, mapped: Mapped) -> Result<()> {
    reserve(out, mapped.utf8_len())?;
    out.extend(mapped);
    Ok(())
}

/// Lower-case `text` code point by code point.
pub fn lowercase(text: &str, mapping: &dyn CaseMapping) -> Result<String> {
    let mut out = String::new();
    reserve(&mut out, text.len())?;
    for c in text.chars() {
        push_mapped(&mut out, mapping.lower(c))?;
    }
    Ok(out)
}

/// Upper-case `text` code point by code point.
pub fn uppercase(text: &str, mapping: &dyn CaseMapping) -> Result<String> {
    let mut out = String::new();
    reserve(&mut out, text.len())?;
    for c in text.chars() {
        push_mapped(&mut out, mapping.upper(c))?;
    }
    Ok(out)
}

/// Upper-case the first code point of each whitespace-delimited word and
/// lower-case the rest.
pub fn titlecase(text: &str, mapping: &dyn CaseMapping) -> Result<String> {
    let mut out = String::new();
    reserve(&mut out, text.len())?;
    let mut at_word_start = true;
    for c in text.chars() {
        let mapped = if c.is_whitespace() {
            at_word_start = true;
            Mapped::one(c)
        } else if at_word_start {
            at_word_start = false;
            mapping.upper(c)
        } else {
            mapping.lower(c)
        };
        push_mapped(&mut out, mapped)?;
    }
    Ok(out)
}

/// Compare two strings after lower-casing both, without allocating.
#[must_use]
pub fn eq_lowercase(a: &str, b: &str, mapping: &dyn CaseMapping) -> bool {
    a.chars()
        .flat_map(|c| mapping.lower(c))
        .eq(b.chars().flat_map(|c| mapping.lower(c)))
}
