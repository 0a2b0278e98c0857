//! Configuration for grammar decoding.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::grammar::SENTINEL;
use crate::stream::Token;

/// Configuration for grammar decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodeConfig {
    /// Rule id that ends the rule list (default: 0xFFFF)
    pub sentinel: Token,
    /// Require alternate length prefixes to match the tokens consumed (default: false)
    pub strict_lengths: bool,
    /// Accept tokens after the sentinel (default: true)
    pub allow_trailing: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            sentinel: SENTINEL,
            strict_lengths: false,
            allow_trailing: true,
        }
    }
}

impl DecodeConfig {
    /// Only the structural checks the format requires.
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Also verify alternate lengths and reject trailing tokens.
    pub fn strict() -> Self {
        Self {
            strict_lengths: true,
            allow_trailing: false,
            ..Self::default()
        }
    }

    /// Set the terminating sentinel.
    pub fn with_sentinel(mut self, sentinel: Token) -> Self {
        self.sentinel = sentinel;
        self
    }

    /// Enable or disable alternate length verification.
    pub fn with_strict_lengths(mut self, strict: bool) -> Self {
        self.strict_lengths = strict;
        self
    }

    /// Enable or disable acceptance of tokens after the sentinel.
    pub fn with_allow_trailing(mut self, allow: bool) -> Self {
        self.allow_trailing = allow;
        self
    }
}
