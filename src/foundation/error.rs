use crate::foundation::core::Position;

/// Convenience result type used across the slideshow crate.
pub type SlideshowResult<T> = Result<T, SlideshowError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum SlideshowError {
    /// The configuration text could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A required image asset could not be resolved or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Invalid caller-provided data (viewport fractions, clock values, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlideshowError {
    /// Build a [`SlideshowError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`SlideshowError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// The parse diagnostic, if this error came from the parser.
    pub fn as_parse(&self) -> Option<&ParseError> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

/// A fatal parse failure with the location it was detected at.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("at {}:{}, {kind}", .at.line, .at.column)]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// Where the cursor stood when the failure was detected.
    pub at: Position,
}

impl ParseError {
    /// Build a parse error at `at`.
    pub fn new(kind: ParseErrorKind, at: Position) -> Self {
        Self { kind, at }
    }
}

/// Failure kinds reported by the configuration parser.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// A required literal was not present.
    #[error("{}", describe_expected(.0))]
    Expected(String),

    /// A quoted string ran into the end of input.
    #[error("unterminated string (opened at {}:{})", .opened_at.line, .opened_at.column)]
    UnterminatedString {
        /// Location of the opening quote.
        opened_at: Position,
    },

    /// A numeric field had no digits.
    #[error("expected number")]
    NumberExpected,

    /// The cursor was advanced past the end of input.
    #[error("reached end of file")]
    UnexpectedEnd,

    /// `screen` appeared more than once.
    #[error("screen dimensions have already been set")]
    DuplicateScreen,

    /// An `image` block appeared before `screen`.
    #[error("screen dimensions have not been set, cannot define an image")]
    ScreenNotSet,

    /// Unrecognized content inside an `image` block.
    #[error("unexpected character")]
    UnexpectedToken,

    /// A screen dimension was zero or negative.
    #[error("screen dimensions must be positive, got {width}, {height}")]
    DegenerateScreen {
        /// Configured width.
        width: f64,
        /// Configured height.
        height: f64,
    },

    /// A timing field was negative.
    #[error("'{field}' must not be negative")]
    NegativeTime {
        /// Field name as written in the file.
        field: &'static str,
    },
}

fn describe_expected(literal: &str) -> String {
    if literal == "\n" {
        "expected newline".to_string()
    } else {
        format!("expected '{literal}'")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
