//! Unicode building blocks: decoding, cluster segmentation, case mapping,
//! byte search and display width.

mod case;
mod codepoint;
mod grapheme;
pub(crate) mod search;
mod width;

pub use case::{
    AsciiCase, CaseMapping, Mapped, UnicodeCase, eq_lowercase, lowercase, titlecase,
    uppercase,
};
pub use codepoint::{CodePoint, CodePointIter, IterState, decode_at, encode_scalars, sequence_len};
pub use grapheme::{
    BoundaryClassifier, BoundaryContext, CodePointClassifier, Grapheme, GraphemeIter,
    GraphemeMode, UnicodeClassifier, default_classifier, grapheme_mode, is_regional_indicator,
    set_grapheme_mode,
};
pub use search::is_ascii_only;
pub use width::{
    WidthMethod, display_width, display_width_with_method, set_width_method, width_method,
};
