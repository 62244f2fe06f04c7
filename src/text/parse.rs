//! Numeric and boolean parsing of buffer content.
//!
//! Content is parsed as-is; surrounding whitespace is not stripped.

use crate::error::{Error, ParseKind, Result};
use crate::text::TextBuffer;
use std::num::ParseIntError;
use std::str::FromStr;

const TRUTHY: [&str; 5] = ["true", "t", "yes", "y", "on"];
const FALSY: [&str; 5] = ["false", "f", "no", "n", "off"];

/// Integer types accepted by [`TextBuffer::parse_int`].
pub trait ParseInt: Sized {
    fn from_str_radix(src: &str, radix: u32) -> std::result::Result<Self, ParseIntError>;
}

macro_rules! impl_parse_int {
    ($($t:ty),*) => {
        $(
            impl ParseInt for $t {
                fn from_str_radix(src: &str, radix: u32) -> std::result::Result<Self, ParseIntError> {
                    <$t>::from_str_radix(src, radix)
                }
            }
        )*
    };
}

impl_parse_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

mod sealed {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Floating point types accepted by [`TextBuffer::parse_float`].
pub trait ParseFloat: FromStr + sealed::Sealed {}

impl ParseFloat for f32 {}
impl ParseFloat for f64 {}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}

/// Split off a `0x`/`0o`/`0b` prefix and return the radix it names.
fn detect_radix(digits: &str) -> (u32, &str) {
    if let Some(rest) = strip_prefix_ignore_case(digits, "0x") {
        (16, rest)
    } else if let Some(rest) = strip_prefix_ignore_case(digits, "0o") {
        (8, rest)
    } else if let Some(rest) = strip_prefix_ignore_case(digits, "0b") {
        (2, rest)
    } else {
        (10, digits)
    }
}

impl TextBuffer<'_> {
    /// Parse the content as an integer.
    ///
    /// `radix` is 2..=36, or 0 to pick the radix from a `0x`, `0o` or `0b`
    /// prefix (decimal otherwise). A leading sign is allowed in both cases.
    pub fn parse_int<T: ParseInt>(&self, radix: u32) -> Result<T> {
        let text = self.as_str();
        let fail = || Error::parse(text, ParseKind::Int);

        let (sign, unsigned) = match text.as_bytes().first() {
            Some(b'-') => ("-", &text[1..]),
            Some(b'+') => ("", &text[1..]),
            _ => ("", text),
        };
        let (radix, digits) = match radix {
            0 => detect_radix(unsigned),
            2..=36 => (radix, unsigned),
            _ => return Err(fail()),
        };
        // Reject a second sign hiding behind the first one or the prefix.
        if digits.starts_with(['+', '-']) {
            return Err(fail());
        }

        T::from_str_radix(&format!("{sign}{digits}"), radix).map_err(|_| fail())
    }

    /// Parse the content as a floating point number.
    pub fn parse_float<T: ParseFloat>(&self) -> Result<T> {
        self.as_str()
            .parse()
            .map_err(|_| Error::parse(self.as_str(), ParseKind::Float))
    }

    /// Accept `true` or `false`, ignoring case.
    pub fn parse_bool(&self) -> Result<bool> {
        let text = self.as_str();
        if text.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if text.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(Error::parse(text, ParseKind::Bool))
        }
    }

    /// Accept `true/t/yes/y/on` and `false/f/no/n/off`, ignoring case.
    pub fn parse_truthy(&self) -> Result<bool> {
        let text = self.as_str();
        if TRUTHY.iter().any(|t| text.eq_ignore_ascii_case(t)) {
            Ok(true)
        } else if FALSY.iter().any(|f| text.eq_ignore_ascii_case(f)) {
            Ok(false)
        } else {
            Err(Error::parse(text, ParseKind::Truthy))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(s: &str) -> TextBuffer<'_> {
        TextBuffer::with_text(s)
    }

    #[test]
    fn test_parse_int_radix() {
        assert_eq!(buf("42").parse_int::<u8>(10).unwrap(), 42);
        assert_eq!(buf("-42").parse_int::<i32>(10).unwrap(), -42);
        assert_eq!(buf("ff").parse_int::<u16>(16).unwrap(), 255);
        assert_eq!(buf("z").parse_int::<u8>(36).unwrap(), 35);
    }

    #[test]
    fn test_parse_int_prefix_detection() {
        assert_eq!(buf("0x1F").parse_int::<i32>(0).unwrap(), 31);
        assert_eq!(buf("-0b101").parse_int::<i32>(0).unwrap(), -5);
        assert_eq!(buf("0o17").parse_int::<u32>(0).unwrap(), 15);
        assert_eq!(buf("017").parse_int::<u32>(0).unwrap(), 17);
    }

    #[test]
    fn test_parse_int_errors() {
        assert!(matches!(
            buf("256").parse_int::<u8>(10),
            Err(Error::Parse {
                kind: ParseKind::Int,
                ..
            })
        ));
        assert!(buf("").parse_int::<i32>(10).is_err());
        assert!(buf("12").parse_int::<i32>(1).is_err());
        assert!(buf("--1").parse_int::<i32>(10).is_err());
        assert!(buf("0x").parse_int::<i32>(0).is_err());
        assert!(buf(" 1").parse_int::<i32>(10).is_err());
    }

    #[test]
    fn test_parse_float() {
        let value: f64 = buf("3.5").parse_float().unwrap();
        assert!((value - 3.5).abs() < f64::EPSILON);
        assert!(buf("abc").parse_float::<f32>().is_err());
        // Integer text is still a valid float.
        let whole: f32 = buf("5").parse_float().unwrap();
        assert!((whole - 5.0).abs() < f32::EPSILON);
        assert!(buf("1e3").parse_float::<f64>().is_ok());
    }

    #[test]
    fn test_parse_bool() {
        assert!(buf("TRUE").parse_bool().unwrap());
        assert!(!buf("False").parse_bool().unwrap());
        assert!(buf("yes").parse_bool().is_err());
    }

    #[test]
    fn test_parse_truthy() {
        assert!(!buf("off").parse_truthy().unwrap());
        assert!(buf("T").parse_truthy().unwrap());
        assert!(buf("Yes").parse_truthy().unwrap());
        assert!(!buf("N").parse_truthy().unwrap());
        assert_eq!(
            buf("maybe").parse_truthy(),
            Err(Error::parse("maybe", ParseKind::Truthy))
        );
    }
}
