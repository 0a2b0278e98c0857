//! Errors raised while decoding a grammar table.

use core::fmt;

use crate::stream::{StreamError, Token};

/// What the decoder was about to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    RuleId,
    AlternateLength,
    SymbolLength,
    ReferenceTarget,
    RangeBounds,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RuleId => write!(f, "rule id"),
            Self::AlternateLength => write!(f, "alternate length"),
            Self::SymbolLength => write!(f, "symbol length"),
            Self::ReferenceTarget => write!(f, "reference target"),
            Self::RangeBounds => write!(f, "character range bounds"),
        }
    }
}

/// Broad category of a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The stream ended before the sentinel.
    ExhaustedStream,
    /// A prefix or layout violated the table format.
    MalformedGrammar,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExhaustedStream => write!(f, "exhausted stream"),
            Self::MalformedGrammar => write!(f, "malformed grammar"),
        }
    }
}

/// The specific decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// A read needed more tokens than were left.
    ExhaustedStream {
        expected: Expected,
        requested: usize,
        available: usize,
    },

    /// A character set length prefix was odd; ranges come in pairs.
    OddCharSetLength { len: Token },

    /// An alternate's length prefix disagrees with its contents.
    /// Only checked with `strict_lengths`.
    AlternateLengthMismatch { declared: Token, actual: usize },

    /// Tokens follow the sentinel. Only checked without `allow_trailing`.
    TrailingTokens { count: usize },
}

impl DecodeErrorKind {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::ExhaustedStream { .. } => ErrorClass::ExhaustedStream,
            Self::OddCharSetLength { .. }
            | Self::AlternateLengthMismatch { .. }
            | Self::TrailingTokens { .. } => ErrorClass::MalformedGrammar,
        }
    }
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExhaustedStream {
                expected,
                requested,
                available,
            } => write!(
                f,
                "stream exhausted reading {} (wanted {} token(s), {} left)",
                expected, requested, available
            ),
            Self::OddCharSetLength { len } => {
                write!(f, "odd character set length {}, ranges come in pairs", len)
            }
            Self::AlternateLengthMismatch { declared, actual } => write!(
                f,
                "alternate declares length {} but spans {} token(s)",
                declared, actual
            ),
            Self::TrailingTokens { count } => {
                write!(f, "{} token(s) after the sentinel", count)
            }
        }
    }
}

/// Error information for grammar decoding failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeError {
    /// Offset of the token at which the failure was detected.
    pub offset: usize,
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub(crate) fn new(offset: usize, kind: DecodeErrorKind) -> Self {
        DecodeError { offset, kind }
    }

    pub(crate) fn exhausted(err: StreamError, expected: Expected) -> Self {
        DecodeError {
            offset: err.offset,
            kind: DecodeErrorKind::ExhaustedStream {
                expected,
                requested: err.requested,
                available: err.available,
            },
        }
    }

    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    pub fn is_exhausted(&self) -> bool {
        self.class() == ErrorClass::ExhaustedStream
    }

    pub fn is_malformed(&self) -> bool {
        self.class() == ErrorClass::MalformedGrammar
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at offset {}: {}",
            self.class(),
            self.offset,
            self.kind
        )
    }
}

impl std::error::Error for DecodeError {}
