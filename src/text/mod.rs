//! Text buffer and the operations built on it.
//!
//! Key pieces:
//!
//! - [`TextBuffer`]: borrowed-or-owned UTF-8 storage with a generation stamp
//! - [`index`]: logical index to byte offset translation (negative indices
//!   count from the end)
//! - edits (insert, replace, reverse, trim, case conversion, ...) as
//!   [`TextBuffer`] methods
//! - search and splitting: [`Split`], [`Tokens`], [`Lines`]
//! - parsing: [`TextBuffer::parse_int`] and friends
//!
//! # Examples
//!
//! ```
//! use unistr::TextBuffer;
//!
//! let mut text = TextBuffer::with_text("Hello");
//! assert_eq!(text.replace("l", "z").unwrap(), 2);
//! assert_eq!(text, "Hezzo");
//! assert_eq!(text.grapheme_at(-1).unwrap(), "o");
//! ```
//!
//! ## Addressing by cluster
//!
//! ```
//! use unistr::TextBuffer;
//!
//! let text = TextBuffer::with_text("cafe\u{0301}!");
//! assert_eq!(text.code_point_count().unwrap(), 6);
//! assert_eq!(text.grapheme_count().unwrap(), 5);
//! assert_eq!(text.grapheme_at(3).unwrap(), "e\u{0301}");
//! ```

mod buffer;
mod edit;
pub mod index;
mod parse;
mod pattern;

pub use buffer::TextBuffer;
pub use index::{Span, Unit};
pub use parse::{ParseFloat, ParseInt};
pub use pattern::{Lines, Split, Tokens};
