//! Searching, splitting and line iteration.
//!
//! Matching is byte-exact. Positions are reported as grapheme ordinals.

use crate::error::Result;
use crate::text::TextBuffer;
use crate::text::index::{Unit, ordinal_containing};
use crate::unicode::search;

/// Pieces of a string between occurrences of a separator.
///
/// Yields `occurrences + 1` pieces, empty ones included.
#[derive(Clone, Debug)]
pub struct Split<'a, 'p> {
    remainder: Option<&'a str>,
    separator: &'p str,
}

impl<'a, 'p> Split<'a, 'p> {
    #[must_use]
    pub fn new(text: &'a str, separator: &'p str) -> Self {
        Self {
            remainder: Some(text),
            separator,
        }
    }
}

impl<'a> Iterator for Split<'a, '_> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.remainder?;
        match search::find(rest.as_bytes(), self.separator.as_bytes()) {
            Some(pos) => {
                self.remainder = Some(&rest[pos + self.separator.len()..]);
                Some(&rest[..pos])
            }
            None => {
                self.remainder = None;
                Some(rest)
            }
        }
    }
}

impl std::iter::FusedIterator for Split<'_, '_> {}

/// Non-empty pieces between occurrences of a separator.
#[derive(Clone, Debug)]
pub struct Tokens<'a, 'p>(Split<'a, 'p>);

impl<'a> Iterator for Tokens<'a, '_> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.find(|piece| !piece.is_empty())
    }
}

/// Lines split on `"\n"` with one trailing `"\r"` stripped from each.
#[derive(Clone, Debug)]
pub struct Lines<'a>(Split<'a, 'static>);

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.0
            .next()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
    }
}

impl TextBuffer<'_> {
    /// Grapheme ordinal of the first occurrence of `needle`.
    pub fn index_of(&self, needle: &str) -> Result<Option<usize>> {
        search::find(self.as_bytes(), needle.as_bytes())
            .map(|pos| ordinal_containing(self, Unit::Grapheme, pos))
            .transpose()
    }

    /// Grapheme ordinal of the last occurrence of `needle`.
    pub fn last_index_of(&self, needle: &str) -> Result<Option<usize>> {
        search::rfind(self.as_bytes(), needle.as_bytes())
            .map(|pos| ordinal_containing(self, Unit::Grapheme, pos))
            .transpose()
    }

    /// Whether `needle` occurs anywhere. An empty needle never matches.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        search::find(self.as_bytes(), needle.as_bytes()).is_some()
    }

    /// Non-overlapping occurrences of `needle`, scanned left to right.
    #[must_use]
    pub fn count(&self, needle: &str) -> usize {
        search::count(self.as_bytes(), needle.as_bytes())
    }

    /// Split on every occurrence of `separator`, keeping empty pieces.
    #[must_use]
    pub fn split(&self, separator: &str) -> Vec<&str> {
        self.split_iter(separator).collect()
    }

    /// Lazy form of [`split`](Self::split).
    pub fn split_iter<'p>(&self, separator: &'p str) -> Split<'_, 'p> {
        Split::new(self.as_str(), separator)
    }

    /// Split on `separator` and drop empty pieces.
    #[must_use]
    pub fn tokenize(&self, separator: &str) -> Vec<&str> {
        self.token_iter(separator).collect()
    }

    /// Lazy form of [`tokenize`](Self::tokenize).
    pub fn token_iter<'p>(&self, separator: &'p str) -> Tokens<'_, 'p> {
        Tokens(self.split_iter(separator))
    }

    /// Lines split on `"\n"`, each with one trailing `"\r"` removed.
    pub fn lines(&self) -> Lines<'_> {
        Lines(Split::new(self.as_str(), "\n"))
    }
}
