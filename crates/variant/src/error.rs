use std::fmt;

use variant_time::ParseTimeError;

use crate::value::Kind;

/// Errors produced by accessors and `FromVariant` conversions.
///
/// Every failure leaves the operation's target unchanged. A missing
/// `ToVariant`/`FromVariant` impl is a compile error and never surfaces
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An accessor required one kind but the variant holds another.
    KindMismatch { expected: Kind, actual: Kind },
    /// A coercing numeric read found a string that does not parse as the
    /// requested kind.
    ParseNumber { kind: Kind, text: String },
    /// `as_bool` found a string other than `"true"` / `"false"`.
    ParseBool { text: String },
    /// A time value's textual form failed to parse.
    ParseTimePoint(ParseTimeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::KindMismatch { expected, actual } => {
                write!(f, "kind mismatch: expected {expected}, got {actual}")
            }
            Error::ParseNumber { kind, text } => {
                write!(f, "cannot parse {text:?} as {kind}")
            }
            Error::ParseBool { text } => {
                write!(f, "cannot parse {text:?} as bool")
            }
            Error::ParseTimePoint(inner) => fmt::Display::fmt(inner, f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ParseTimePoint(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<ParseTimeError> for Error {
    fn from(error: ParseTimeError) -> Error {
        Error::ParseTimePoint(error)
    }
}
