//! `unistr` - UTF-8 strings addressable by byte, code point and grapheme.
//!
//! A [`TextBuffer`] holds valid UTF-8 (borrowed or owned) and lets callers
//! index, slice, search and edit it by code point or grapheme cluster
//! ordinal, including negative from-the-end indices. Cluster boundaries and
//! case mapping are pluggable through [`BoundaryClassifier`] and
//! [`CaseMapping`].

// Crate-level lint configuration
#![allow(clippy::cast_possible_truncation)] // Index arithmetic between usize/i64/i128
#![allow(clippy::cast_sign_loss)] // Sign is checked before the cast
#![allow(clippy::cast_possible_wrap)] // Counts never exceed i64::MAX in practice
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::module_name_repetitions)] // Allow text::TextBuffer etc
#![allow(clippy::missing_errors_doc)] // Error variants are documented on Error
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::should_implement_trait)] // from_str naming is intentional
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer

pub mod error;
pub mod event;
pub mod text;
pub mod unicode;

pub use error::{Error, ParseKind, Result};
pub use event::{LogLevel, clear_log_callback, emit_log, set_log_callback};
pub use text::{Lines, ParseFloat, ParseInt, Span, Split, TextBuffer, Tokens, Unit};
pub use unicode::{
    BoundaryClassifier, BoundaryContext, CaseMapping, CodePoint, CodePointClassifier,
    CodePointIter, Grapheme, GraphemeIter, GraphemeMode, IterState, UnicodeCase,
    UnicodeClassifier, WidthMethod, set_grapheme_mode, set_width_method,
};
