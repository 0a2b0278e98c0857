//! Forward-only cursor over a token stream.

use core::fmt;

/// A single integer of an encoded grammar table.
pub type Token = u32;

/// A read ran past the end of the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamError {
    /// Offset of the first token the read wanted.
    pub offset: usize,
    /// Number of tokens the read asked for.
    pub requested: usize,
    /// Number of tokens that were left.
    pub available: usize,
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "token stream exhausted at offset {}: wanted {} token(s), {} left",
            self.offset, self.requested, self.available
        )
    }
}

impl std::error::Error for StreamError {}

/// Lightweight cursor for consuming a token stream left to right.
///
/// The cursor never looks ahead without consuming and never rewinds.
/// Every successful read advances [`position`](Self::position) by exactly
/// the number of tokens returned.
#[derive(Clone, Copy, Debug)]
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    /// Offset of the next unread token
    position: usize,
}

impl<'a> TokenCursor<'a> {
    /// Create a new cursor at the start of the stream.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Offset of the next unread token.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of tokens not yet consumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.position
    }

    /// Are we at end of stream?
    #[inline]
    pub fn at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Consume one token.
    ///
    /// Returns the offset the token occupied together with its value.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<(usize, Token), StreamError> {
        let offset = self.position;
        match self.tokens.get(offset) {
            Some(&token) => {
                self.position += 1;
                Ok((offset, token))
            }
            None => Err(self.exhausted(1)),
        }
    }

    /// Consume the next `n` tokens as a slice.
    ///
    /// Fails without consuming anything if fewer than `n` tokens remain.
    pub fn advance_by(&mut self, n: usize) -> Result<&'a [Token], StreamError> {
        if self.remaining() < n {
            return Err(self.exhausted(n));
        }
        let start = self.position;
        self.position += n;
        Ok(&self.tokens[start..self.position])
    }

    /// The tokens not yet consumed.
    pub fn rest(&self) -> &'a [Token] {
        &self.tokens[self.position..]
    }

    fn exhausted(&self, requested: usize) -> StreamError {
        StreamError {
            offset: self.position,
            requested,
            available: self.remaining(),
        }
    }
}
