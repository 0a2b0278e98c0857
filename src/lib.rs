//! # Ruletab
//!
//! Decoder and cross-reference reporter for binary grammar tables.
//!
//! A grammar table packs a context-free grammar into one flat stream of
//! integers: numbered rules, each a list of alternates, each a list of
//! symbols that are either references to other rules or sets of character
//! ranges. Every level is length-prefixed or zero-terminated, and the rule
//! list ends with a sentinel (0xFFFF).
//!
//! ## Module Organization
//!
//! - [`stream`] - Forward-only cursor over the token stream
//! - [`grammar`] - Decoded rules, alternates and symbols, plus rule indices
//! - [`decode`] - Recursive-descent decoder with a streaming trace hook
//! - [`encode`] - Re-serialization of decoded grammars
//! - [`report`] - Trace, cross-reference summary, listing and hex dump
//! - [`text`] - Loading token streams from integer lists and hex dumps
//!
//! ## Quick Start
//!
//! ```
//! use ruletab::{decode, RuleId, Symbol};
//!
//! // rule 0 := rule#1 | ['a'-'z']
//! let tokens = [0, 3, 1, 1, 0, 4, 2, 97, 122, 0, 0, 1, 0, 0xFFFF];
//! let grammar = decode(&tokens).unwrap();
//!
//! assert_eq!(grammar.offset_of(RuleId(1)), Some(11));
//! let alts = grammar.alternates_of(RuleId(0)).unwrap();
//! assert_eq!(alts.len(), 2);
//! assert_eq!(alts[0].symbols[0].symbol, Symbol::Reference(RuleId(1)));
//! assert_eq!(ruletab::encode(&grammar), tokens);
//! ```
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization of grammars and configs
//! - `cli` - Build the `ruletab` command line tool

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Core modules
// =============================================================================

/// Forward-only cursor over a token stream.
pub mod stream;

/// Decoded grammar representation.
pub mod grammar;

/// Grammar table decoding.
pub mod decode;

/// Grammar table encoding.
pub mod encode;

// =============================================================================
// Application modules
// =============================================================================

/// Human-readable reports.
pub mod report;

/// Token stream loading from text.
pub mod text;

// =============================================================================
// Public re-exports
// =============================================================================

pub use decode::{decode, decode_traced, decode_with, DecodeConfig, DecodeError, ErrorClass};
pub use encode::encode;
pub use grammar::{Alternate, CharRange, CharSet, Grammar, Rule, RuleId, Symbol, SymbolEntry};
pub use stream::{Token, TokenCursor};

// =============================================================================
// Top-level helpers
// =============================================================================

/// Input layout for [`load`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InputFormat {
    /// Decimal or `0x` integers, optionally in `[...]`.
    #[default]
    Integers,
    /// Bare hex words.
    HexDump,
}

/// Parse token text in the given layout.
pub fn load(input: &str, format: InputFormat) -> Result<Vec<Token>, text::TokenParseError> {
    match format {
        InputFormat::Integers => text::parse_tokens(input),
        InputFormat::HexDump => text::parse_hex_dump(input),
    }
}
