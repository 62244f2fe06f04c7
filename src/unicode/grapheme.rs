//! Grapheme cluster iteration.
//!
//! Cluster boundaries are decided by a [`BoundaryClassifier`]. The iterator
//! itself only groups code points; it knows nothing about break tables.

use crate::error::Result;
use crate::unicode::codepoint::{CodePoint, CodePointIter, IterState};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use unicode_segmentation::GraphemeCursor;

/// A span of one or more code points forming a user-perceived character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grapheme {
    pub offset: usize,
    pub len: usize,
}

impl Grapheme {
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

/// What a classifier gets to look at when deciding a boundary.
///
/// `offset` is the byte offset of `next` in `text`; `prev` ends right there.
/// `regional_run` is the number of consecutive regional indicators ending
/// with `prev`, tracked by the iterator so flag pairing never needs to look
/// back through `text`. The text itself stays available for short
/// lookbehind such as emoji ZWJ sequences.
#[derive(Clone, Copy, Debug)]
pub struct BoundaryContext<'a> {
    pub text: &'a str,
    pub offset: usize,
    pub prev: char,
    pub next: char,
    pub regional_run: usize,
}

/// Whether `c` is a regional indicator symbol (the halves of a flag).
#[must_use]
pub const fn is_regional_indicator(c: char) -> bool {
    matches!(c, '\u{1F1E6}'..='\u{1F1FF}')
}

/// Decides whether a grapheme cluster boundary falls between two code points.
pub trait BoundaryClassifier: fmt::Debug + Send + Sync {
    fn is_boundary(&self, ctx: &BoundaryContext<'_>) -> bool;
}

/// UAX #29 boundaries backed by `unicode-segmentation`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnicodeClassifier {
    extended: bool,
}

impl UnicodeClassifier {
    /// Extended grapheme clusters.
    #[must_use]
    pub const fn extended() -> Self {
        Self { extended: true }
    }

    /// Legacy grapheme clusters.
    #[must_use]
    pub const fn legacy() -> Self {
        Self { extended: false }
    }
}

impl Default for UnicodeClassifier {
    fn default() -> Self {
        Self::extended()
    }
}

impl BoundaryClassifier for UnicodeClassifier {
    fn is_boundary(&self, ctx: &BoundaryContext<'_>) -> bool {
        // GB12/GB13: an odd run before the break pairs `prev` with `next`.
        if is_regional_indicator(ctx.prev) && is_regional_indicator(ctx.next) {
            return ctx.regional_run % 2 == 0;
        }
        let mut cursor = GraphemeCursor::new(ctx.offset, ctx.text.len(), self.extended);
        // The chunk is the whole text, so the cursor never asks for more context.
        cursor.is_boundary(ctx.text, 0).unwrap_or(true)
    }
}

/// Treats every code point as its own cluster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CodePointClassifier;

impl BoundaryClassifier for CodePointClassifier {
    fn is_boundary(&self, _ctx: &BoundaryContext<'_>) -> bool {
        true
    }
}

/// Which UAX #29 cluster flavor new buffers use by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GraphemeMode {
    #[default]
    Extended,
    Legacy,
}

const GRAPHEME_MODE_EXTENDED: u8 = 0;
const GRAPHEME_MODE_LEGACY: u8 = 1;

static GRAPHEME_MODE: AtomicU8 = AtomicU8::new(GRAPHEME_MODE_EXTENDED);

/// Set the global grapheme mode used by newly created buffers.
pub fn set_grapheme_mode(mode: GraphemeMode) {
    let value = match mode {
        GraphemeMode::Extended => GRAPHEME_MODE_EXTENDED,
        GraphemeMode::Legacy => GRAPHEME_MODE_LEGACY,
    };
    GRAPHEME_MODE.store(value, Ordering::Relaxed);
}

/// Get the global grapheme mode.
#[must_use]
pub fn grapheme_mode() -> GraphemeMode {
    match GRAPHEME_MODE.load(Ordering::Relaxed) {
        GRAPHEME_MODE_LEGACY => GraphemeMode::Legacy,
        _ => GraphemeMode::Extended,
    }
}

/// Classifier matching the current global grapheme mode.
#[must_use]
pub fn default_classifier() -> Arc<dyn BoundaryClassifier> {
    match grapheme_mode() {
        GraphemeMode::Extended => Arc::new(UnicodeClassifier::extended()),
        GraphemeMode::Legacy => Arc::new(UnicodeClassifier::legacy()),
    }
}

/// Forward-only iterator over grapheme spans.
///
/// Fused after the first error.
#[derive(Clone)]
pub struct GraphemeIter<'a> {
    text: &'a str,
    code_points: CodePointIter<'a>,
    pending: Option<CodePoint>,
    regional_run: usize,
    classifier: &'a dyn BoundaryClassifier,
}

impl<'a> GraphemeIter<'a> {
    /// Iterate over the clusters of `text` from the start.
    #[must_use]
    pub fn new(text: &'a str, classifier: &'a dyn BoundaryClassifier) -> Self {
        Self::with_generation(text, classifier, 0, 0)
    }

    pub(crate) fn with_generation(
        text: &'a str,
        classifier: &'a dyn BoundaryClassifier,
        offset: usize,
        generation: u64,
    ) -> Self {
        Self {
            text,
            code_points: CodePointIter::with_generation(text.as_bytes(), offset, generation),
            pending: None,
            regional_run: 0,
            classifier,
        }
    }

    /// Byte offset where the next cluster starts.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.pending
            .map_or_else(|| self.code_points.offset(), |cp| cp.offset)
    }

    /// Detach the current position so it can be resumed later.
    #[must_use]
    pub fn state(&self) -> IterState {
        IterState {
            offset: self.offset(),
            generation: self.code_points.state().generation,
        }
    }
}

impl GraphemeIter<'_> {
    fn track_regional(&mut self, c: char) {
        if is_regional_indicator(c) {
            self.regional_run += 1;
        } else {
            self.regional_run = 0;
        }
    }
}

impl fmt::Debug for GraphemeIter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphemeIter")
            .field("offset", &self.offset())
            .field("classifier", &self.classifier)
            .finish()
    }
}

impl Iterator for GraphemeIter<'_> {
    type Item = Result<Grapheme>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = match self.pending.take() {
            Some(cp) => cp,
            None => match self.code_points.next()? {
                Ok(cp) => cp,
                Err(err) => return Some(Err(err)),
            },
        };

        let start = first.offset;
        let mut prev = first;
        self.track_regional(prev.scalar);
        loop {
            match self.code_points.next() {
                None => break,
                Some(Err(err)) => return Some(Err(err)),
                Some(Ok(cp)) => {
                    let ctx = BoundaryContext {
                        text: self.text,
                        offset: cp.offset,
                        prev: prev.scalar,
                        next: cp.scalar,
                        regional_run: self.regional_run,
                    };
                    if self.classifier.is_boundary(&ctx) {
                        self.pending = Some(cp);
                        break;
                    }
                    prev = cp;
                    self.track_regional(prev.scalar);
                }
            }
        }

        Some(Ok(Grapheme {
            offset: start,
            len: prev.end() - start,
        }))
    }
}

impl std::iter::FusedIterator for GraphemeIter<'_> {}
