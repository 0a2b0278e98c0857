//! Parsing grammar tables from text.
//!
//! Two layouts are accepted:
//!
//! - **Integer lists** ([`parse_tokens`]): decimal or `0x` hex integers
//!   separated by whitespace and/or commas, optionally wrapped in a single
//!   `[` `]` pair. `#` starts a comment running to end of line.
//! - **Hex dumps** ([`parse_hex_dump`]): bare hex words separated by
//!   whitespace, as written by the table producer (`0005 0001 ... ffff`).

use core::fmt;

use crate::stream::Token;

/// Error information for token text that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParseError {
    /// The byte offset where the error occurred (0-indexed).
    pub offset: usize,
    /// The line number where the error occurred (1-indexed).
    pub line: usize,
    /// The column (byte position within the line, 1-indexed).
    pub column: usize,
    pub kind: TokenParseErrorKind,
}

impl fmt::Display for TokenParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at byte {}, line {}, column {}",
            self.kind, self.offset, self.line, self.column
        )
    }
}

impl std::error::Error for TokenParseError {}

/// The specific kind of token parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenParseErrorKind {
    /// A character that cannot start or continue a number.
    InvalidDigit(char),
    /// A number does not fit in a token.
    Overflow,
    /// An opening `[` without a closing `]`, a stray `]`, or a second `[`.
    UnbalancedBracket,
    /// The input contains no tokens at all.
    Empty,
}

impl fmt::Display for TokenParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDigit(c) => write!(f, "invalid digit {:?}", c),
            Self::Overflow => write!(f, "number too large for a token"),
            Self::UnbalancedBracket => write!(f, "unbalanced bracket"),
            Self::Empty => write!(f, "no tokens found"),
        }
    }
}

/// Parse an integer list such as `[3, 4, 2, 97, 122, 0, 0, 0xFFFF]`.
///
/// # Examples
///
/// ```
/// use ruletab::text::parse_tokens;
///
/// assert_eq!(parse_tokens("[7, 0, 65535]").unwrap(), vec![7, 0, 0xFFFF]);
/// assert_eq!(parse_tokens("7 0 # empty rule\n0xffff").unwrap(), vec![7, 0, 0xFFFF]);
/// assert!(parse_tokens("7, x").is_err());
/// ```
pub fn parse_tokens(input: &str) -> Result<Vec<Token>, TokenParseError> {
    Scanner::new(input, Radix::Auto).run()
}

/// Parse a dump of bare hex words such as `0007 0000 ffff`.
///
/// # Examples
///
/// ```
/// use ruletab::text::parse_hex_dump;
///
/// assert_eq!(parse_hex_dump("0007 0000\nffff").unwrap(), vec![7, 0, 0xFFFF]);
/// ```
pub fn parse_hex_dump(input: &str) -> Result<Vec<Token>, TokenParseError> {
    Scanner::new(input, Radix::Hex).run()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Radix {
    /// Decimal, or hex with a `0x` prefix.
    Auto,
    /// Always hex, no prefix.
    Hex,
}

/// Scanner state.
struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    radix: Radix,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str, radix: Radix) -> Self {
        Scanner {
            input,
            pos: 0,
            radix,
        }
    }

    /// Peek at the current character without consuming it.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Consume and return the current character.
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, offset: usize, kind: TokenParseErrorKind) -> TokenParseError {
        let before = &self.input[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        TokenParseError {
            offset,
            line,
            column: offset - line_start + 1,
            kind,
        }
    }

    /// Skip whitespace, separators and comments.
    fn skip_separators(&mut self) {
        while let Some(c) = self.peek() {
            if c == '#' {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.bump();
                }
            } else if c.is_whitespace() || (c == ',' && self.radix == Radix::Auto) {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn run(mut self) -> Result<Vec<Token>, TokenParseError> {
        let mut tokens = Vec::new();
        let mut open_bracket: Option<usize> = None;
        let mut closed = false;

        loop {
            self.skip_separators();
            let start = self.pos;
            let c = match self.peek() {
                Some(c) => c,
                None => break,
            };

            if closed {
                return Err(self.error(start, TokenParseErrorKind::UnbalancedBracket));
            }

            match c {
                '[' if self.radix == Radix::Auto => {
                    if open_bracket.is_some() || !tokens.is_empty() {
                        return Err(self.error(start, TokenParseErrorKind::UnbalancedBracket));
                    }
                    open_bracket = Some(start);
                    self.bump();
                }
                ']' if self.radix == Radix::Auto => {
                    if open_bracket.is_none() {
                        return Err(self.error(start, TokenParseErrorKind::UnbalancedBracket));
                    }
                    closed = true;
                    self.bump();
                }
                _ => tokens.push(self.parse_number()?),
            }
        }

        if let (Some(offset), false) = (open_bracket, closed) {
            return Err(self.error(offset, TokenParseErrorKind::UnbalancedBracket));
        }
        if tokens.is_empty() {
            return Err(self.error(self.pos, TokenParseErrorKind::Empty));
        }
        Ok(tokens)
    }

    fn parse_number(&mut self) -> Result<Token, TokenParseError> {
        let start = self.pos;
        let radix = match self.radix {
            Radix::Hex => 16,
            Radix::Auto => {
                let rest = &self.input[self.pos..];
                if rest.starts_with("0x") || rest.starts_with("0X") {
                    self.pos += 2;
                    16
                } else {
                    10
                }
            }
        };

        let digits_start = self.pos;
        let mut value: Token = 0;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == ',' || c == ']' || c == '#' {
                break;
            }
            let digit = match c.to_digit(radix) {
                Some(d) => d,
                None => return Err(self.error(self.pos, TokenParseErrorKind::InvalidDigit(c))),
            };
            value = value
                .checked_mul(radix)
                .and_then(|v| v.checked_add(digit))
                .ok_or_else(|| self.error(start, TokenParseErrorKind::Overflow))?;
            self.bump();
        }

        if self.pos == digits_start {
            // `0x` with nothing after it, or a lone separator we do not accept.
            let (offset, c) = match self.peek() {
                Some(c) if self.pos == start => (self.pos, c),
                _ => (start, 'x'),
            };
            return Err(self.error(offset, TokenParseErrorKind::InvalidDigit(c)));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_literal() {
        let tokens = parse_tokens("[1, 5, 1, 2,\n 0, 0xFFFF]").unwrap();
        assert_eq!(tokens, vec![1, 5, 1, 2, 0, 0xFFFF]);
    }

    #[test]
    fn test_whitespace_and_comments() {
        let input = "# rule 7\n7 0\n\n# end\n65535\n";
        assert_eq!(parse_tokens(input).unwrap(), vec![7, 0, 65535]);
    }

    #[test]
    fn test_hex_prefix() {
        assert_eq!(parse_tokens("0x61 0X7a").unwrap(), vec![0x61, 0x7A]);
    }

    #[test]
    fn test_invalid_digit_location() {
        let err = parse_tokens("1 2\n3 4a").unwrap_err();
        assert_eq!(err.kind, TokenParseErrorKind::InvalidDigit('a'));
        assert_eq!(err.offset, 7);
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 4);
    }

    #[test]
    fn test_negative_rejected() {
        let err = parse_tokens("-1").unwrap_err();
        assert_eq!(err.kind, TokenParseErrorKind::InvalidDigit('-'));
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn test_overflow() {
        let err = parse_tokens("1 4294967296").unwrap_err();
        assert_eq!(err.kind, TokenParseErrorKind::Overflow);
        assert_eq!(err.offset, 2);
        assert_eq!(parse_tokens("4294967295").unwrap(), vec![u32::MAX]);
    }

    #[test]
    fn test_bare_hex_prefix() {
        let err = parse_tokens("0x").unwrap_err();
        assert!(matches!(err.kind, TokenParseErrorKind::InvalidDigit(_)));
    }

    #[test]
    fn test_unbalanced_brackets() {
        let err = parse_tokens("[1, 2").unwrap_err();
        assert_eq!(err.kind, TokenParseErrorKind::UnbalancedBracket);
        assert_eq!(err.offset, 0);

        let err = parse_tokens("1, 2]").unwrap_err();
        assert_eq!(err.kind, TokenParseErrorKind::UnbalancedBracket);
        assert_eq!(err.offset, 4);

        let err = parse_tokens("[1] 2").unwrap_err();
        assert_eq!(err.kind, TokenParseErrorKind::UnbalancedBracket);
        assert_eq!(err.offset, 4);
    }

    #[test]
    fn test_empty() {
        assert_eq!(
            parse_tokens("  # nothing\n").unwrap_err().kind,
            TokenParseErrorKind::Empty
        );
        assert_eq!(parse_tokens("[]").unwrap_err().kind, TokenParseErrorKind::Empty);
    }

    #[test]
    fn test_hex_dump() {
        let tokens = parse_hex_dump("0003 0003 0001 0001\n0000 0000 ffff\n").unwrap();
        assert_eq!(tokens, vec![3, 3, 1, 1, 0, 0, 0xFFFF]);
    }

    #[test]
    fn test_hex_dump_rejects_commas() {
        let err = parse_hex_dump("0003, 0000").unwrap_err();
        assert_eq!(err.kind, TokenParseErrorKind::InvalidDigit(','));
        assert_eq!(err.offset, 4);
    }
}
