//! Error types for unistr.

use std::collections::TryReserveError;
use std::fmt;
use std::str::Utf8Error;
use std::string::FromUtf8Error;

/// Result type alias for unistr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Grammar a failed parse was attempting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseKind {
    Int,
    Float,
    Bool,
    Truthy,
}

impl fmt::Display for ParseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "integer",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Truthy => "truthy value",
        };
        f.write_str(name)
    }
}

/// Error type for unistr operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Malformed UTF-8 (or an invalid scalar value) at the given byte offset.
    InvalidEncoding { offset: usize },
    /// Logical index or range outside the valid bounds.
    IndexOutOfRange { index: i64, len: usize },
    /// Growing the buffer by `requested` bytes failed.
    AllocationFailure { requested: usize },
    /// Content does not match the requested grammar.
    Parse { input: String, kind: ParseKind },
    /// A detached iteration state was resumed after the buffer changed.
    StaleIterator { captured: u64, current: u64 },
}

impl Error {
    pub(crate) fn out_of_range(index: impl TryInto<i64>, len: usize) -> Self {
        Self::IndexOutOfRange {
            index: index.try_into().unwrap_or(i64::MAX),
            len,
        }
    }

    pub(crate) fn parse(input: &str, kind: ParseKind) -> Self {
        Self::Parse {
            input: input.to_string(),
            kind,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEncoding { offset } => {
                write!(f, "invalid UTF-8 at byte offset {offset}")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::AllocationFailure { requested } => {
                write!(f, "failed to allocate {requested} additional bytes")
            }
            Self::Parse { input, kind } => write!(f, "cannot parse {input:?} as {kind}"),
            Self::StaleIterator { captured, current } => write!(
                f,
                "iterator state from generation {captured} used at generation {current}"
            ),
        }
    }
}

impl std::error::Error for Error {}

impl From<Utf8Error> for Error {
    fn from(e: Utf8Error) -> Self {
        Self::InvalidEncoding {
            offset: e.valid_up_to(),
        }
    }
}

impl From<FromUtf8Error> for Error {
    fn from(e: FromUtf8Error) -> Self {
        e.utf8_error().into()
    }
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        // The std error does not expose the requested size.
        Self::AllocationFailure { requested: 0 }
    }
}
