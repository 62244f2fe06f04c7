//! Boundary-preserving edits.
//!
//! Each operation computes its byte offsets first and only then touches the
//! buffer, so a failure (bad index, failed allocation) leaves the content and
//! the generation untouched.

use crate::error::{Error, Result};
use crate::text::TextBuffer;
use crate::text::buffer::try_string;
use crate::text::index::{Unit, slice};
use crate::unicode::{lowercase, search, titlecase, uppercase};

/// Line terminators removed by [`TextBuffer::chomp`], in priority order.
const LINE_TERMINATORS: [&str; 3] = ["\r\n", "\n", "\r"];

impl TextBuffer<'_> {
    /// Insert `text` before the grapheme cluster at `grapheme_index`.
    ///
    /// `grapheme_index == grapheme_count()` appends.
    pub fn insert(&mut self, text: &str, grapheme_index: usize) -> Result<()> {
        let index = i64::try_from(grapheme_index)
            .map_err(|_| Error::out_of_range(grapheme_index, self.byte_count()))?;
        let at = slice(self, Unit::Grapheme, index, index)?.start;
        self.replace_range(at, at, text)
    }

    /// Remove the first occurrence of `needle`. Returns whether one was found.
    pub fn remove(&mut self, needle: &str) -> Result<bool> {
        match search::find(self.as_bytes(), needle.as_bytes()) {
            Some(pos) => {
                self.replace_range(pos, pos + needle.len(), "")?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace every non-overlapping occurrence of `needle`.
    ///
    /// Matches are taken from the content before the call, so text coming
    /// from `replacement` is never matched again. Returns the number of
    /// replacements.
    pub fn replace(&mut self, needle: &str, replacement: &str) -> Result<usize> {
        let positions = search::find_all(self.as_bytes(), needle.as_bytes());
        if positions.is_empty() {
            return Ok(0);
        }

        let removed = needle.len() * positions.len();
        let added = replacement
            .len()
            .checked_mul(positions.len())
            .ok_or(Error::AllocationFailure {
                requested: usize::MAX,
            })?;
        let mut out = try_string(self.byte_count() - removed + added)?;

        let text = self.as_str();
        let mut last = 0;
        for &pos in &positions {
            out.push_str(&text[last..pos]);
            out.push_str(replacement);
            last = pos + needle.len();
        }
        out.push_str(&text[last..]);

        self.set_content(out);
        Ok(positions.len())
    }

    /// Reverse the order of code points.
    ///
    /// Each code point keeps its own bytes, but a base letter followed by a
    /// separate combining mark ends up after the mark. Use
    /// [`reverse_graphemes`](Self::reverse_graphemes) to keep clusters whole.
    pub fn reverse(&mut self) -> Result<()> {
        let mut out = try_string(self.byte_count())?;
        for cp in self.code_point_iter().collect::<Result<Vec<_>>>()?.iter().rev() {
            out.push(cp.scalar);
        }
        self.set_content(out);
        Ok(())
    }

    /// Reverse the order of grapheme clusters, keeping each cluster intact.
    pub fn reverse_graphemes(&mut self) -> Result<()> {
        let spans = self.grapheme_iter().collect::<Result<Vec<_>>>()?;
        let mut out = try_string(self.byte_count())?;
        let text = self.as_str();
        for g in spans.iter().rev() {
            out.push_str(&text[g.range()]);
        }
        self.set_content(out);
        Ok(())
    }

    /// Remove leading and trailing clusters that equal an entry of `cutset`.
    pub fn trim<S: AsRef<str>>(&mut self, cutset: &[S]) -> Result<()> {
        let (lo, hi) = self.untrimmed_bounds(cutset)?;
        self.retain_range(lo.unwrap_or(0)..hi);
        Ok(())
    }

    /// Remove leading clusters that equal an entry of `cutset`.
    pub fn trim_start<S: AsRef<str>>(&mut self, cutset: &[S]) -> Result<()> {
        let (lo, _) = self.untrimmed_bounds(cutset)?;
        let len = self.byte_count();
        self.retain_range(lo.unwrap_or(len)..len);
        Ok(())
    }

    /// Remove trailing clusters that equal an entry of `cutset`.
    pub fn trim_end<S: AsRef<str>>(&mut self, cutset: &[S]) -> Result<()> {
        let (_, hi) = self.untrimmed_bounds(cutset)?;
        self.retain_range(0..hi);
        Ok(())
    }

    /// Start of the first and end of the last cluster not in `cutset`.
    fn untrimmed_bounds<S: AsRef<str>>(&self, cutset: &[S]) -> Result<(Option<usize>, usize)> {
        let text = self.as_str();
        let mut lo = None;
        let mut hi = 0;
        for g in self.grapheme_iter() {
            let g = g?;
            let cluster = &text[g.range()];
            if !cutset.iter().any(|cut| cut.as_ref() == cluster) {
                lo.get_or_insert(g.offset);
                hi = g.end();
            }
        }
        Ok((lo, hi))
    }

    /// Append `text`.
    pub fn concat(&mut self, text: &str) -> Result<()> {
        let end = self.byte_count();
        self.replace_range(end, end, text)
    }

    /// Append every entry of `texts` in order.
    pub fn concat_all<S: AsRef<str>>(&mut self, texts: &[S]) -> Result<()> {
        let added: usize = texts.iter().map(|t| t.as_ref().len()).sum();
        if added == 0 {
            return Ok(());
        }
        let mut out = try_string(self.byte_count() + added)?;
        out.push_str(self.as_str());
        for text in texts {
            out.push_str(text.as_ref());
        }
        self.set_content(out);
        Ok(())
    }

    /// Replace the content with `n` copies of itself.
    pub fn repeat(&mut self, n: usize) -> Result<()> {
        match n {
            0 => {
                let len = self.byte_count();
                self.retain_range(len..len);
            }
            1 => {}
            _ => {
                let total = self
                    .byte_count()
                    .checked_mul(n)
                    .ok_or(Error::AllocationFailure {
                        requested: usize::MAX,
                    })?;
                let mut out = try_string(total)?;
                for _ in 0..n {
                    out.push_str(self.as_str());
                }
                self.set_content(out);
            }
        }
        Ok(())
    }

    /// Lower-case every code point.
    pub fn to_lowercase(&mut self) -> Result<()> {
        let out = lowercase(self.as_str(), self.case_mapping())?;
        self.set_content(out);
        Ok(())
    }

    /// Upper-case every code point.
    pub fn to_uppercase(&mut self) -> Result<()> {
        let out = uppercase(self.as_str(), self.case_mapping())?;
        self.set_content(out);
        Ok(())
    }

    /// Upper-case the first code point of each word and lower-case the rest.
    pub fn to_titlecase(&mut self) -> Result<()> {
        let out = titlecase(self.as_str(), self.case_mapping())?;
        self.set_content(out);
        Ok(())
    }

    /// Remove one trailing `"\r\n"`, `"\n"` or `"\r"`. Returns whether one was removed.
    pub fn chomp(&mut self) -> bool {
        let Some(terminator) = LINE_TERMINATORS.iter().find(|t| self.ends_with(t)) else {
            return false;
        };
        let len = self.byte_count();
        self.retain_range(0..len - terminator.len());
        true
    }
}
