//! Loading token streams from text.
//!
//! Tables usually travel as text: a pasted array literal, a file of
//! integers, or the producer's hex dump. This module turns those into the
//! token slice the decoder consumes, reporting the line and column of
//! anything it cannot read.
//!
//! ```
//! use ruletab::text::{parse_tokens, TokenParseErrorKind};
//!
//! assert_eq!(parse_tokens("[3, 0, 0xFFFF]").unwrap(), vec![3, 0, 0xFFFF]);
//!
//! let err = parse_tokens("3 0\n0xFFFG").unwrap_err();
//! assert_eq!(err.kind, TokenParseErrorKind::InvalidDigit('G'));
//! assert_eq!((err.line, err.column), (2, 6));
//! ```

pub mod tokens;

// Re-export commonly used types
pub use tokens::{parse_hex_dump, parse_tokens, TokenParseError, TokenParseErrorKind};
