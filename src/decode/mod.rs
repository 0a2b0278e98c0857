//! Recursive-descent decoder for grammar tables.
//!
//! The table is a flat token stream:
//!
//! ```text
//! grammar   := rule* SENTINEL
//! rule      := rule_id alternate* 0
//! alternate := len symbol* 0            (len != 0)
//! symbol    := 1 rule_id                (reference)
//!            | n (from to){n/2}         (character set, n even)
//! ```
//!
//! Decoding builds the rule arena, the offset index and the alternate index
//! in one pass, reporting each structural step to a [`TraceSink`].
//!
//! # Example
//!
//! ```
//! use ruletab::decode::decode;
//! use ruletab::grammar::{RuleId, Symbol};
//!
//! let tokens = [3, 3, 1, 1, 0, 0, 0xFFFF];
//! let grammar = decode(&tokens).unwrap();
//!
//! assert_eq!(grammar.offset_of(RuleId(3)), Some(0));
//! let alts = grammar.alternates_of(RuleId(3)).unwrap();
//! assert_eq!(alts[0].symbols[0].symbol, Symbol::Reference(RuleId(1)));
//! ```

mod config;
mod error;
mod trace;

pub use config::DecodeConfig;
pub use error::{DecodeError, DecodeErrorKind, ErrorClass, Expected};
pub use trace::{TraceEvent, TraceSink};

use log::{debug, trace};

use crate::grammar::{Alternate, CharSet, Grammar, RuleId, Symbol, SymbolEntry};
use crate::stream::{Token, TokenCursor};

/// Decode a table with the default configuration, discarding the trace.
pub fn decode(tokens: &[Token]) -> Result<Grammar, DecodeError> {
    decode_with(tokens, &DecodeConfig::default(), &mut ())
}

/// Decode a table with the default configuration, reporting to `sink`.
pub fn decode_traced<S: TraceSink>(
    tokens: &[Token],
    sink: &mut S,
) -> Result<Grammar, DecodeError> {
    decode_with(tokens, &DecodeConfig::default(), sink)
}

/// Decode a table.
///
/// Any failure aborts the whole pass; no partial grammar is returned.
pub fn decode_with<S: TraceSink>(
    tokens: &[Token],
    config: &DecodeConfig,
    sink: &mut S,
) -> Result<Grammar, DecodeError> {
    Decoder::new(tokens, config, sink).run()
}

/// Decoder state for a single pass.
struct Decoder<'a, S> {
    cursor: TokenCursor<'a>,
    config: &'a DecodeConfig,
    sink: &'a mut S,
    grammar: Grammar,
}

impl<'a, S: TraceSink> Decoder<'a, S> {
    fn new(tokens: &'a [Token], config: &'a DecodeConfig, sink: &'a mut S) -> Self {
        Decoder {
            cursor: TokenCursor::new(tokens),
            config,
            sink,
            grammar: Grammar::new(config.sentinel),
        }
    }

    fn run(mut self) -> Result<Grammar, DecodeError> {
        self.sink.grammar_begin();

        let end = loop {
            if let Some(end) = self.read_rule()? {
                break end;
            }
        };

        if !self.config.allow_trailing && !self.cursor.at_end() {
            return Err(DecodeError::new(
                self.cursor.position(),
                DecodeErrorKind::TrailingTokens {
                    count: self.cursor.remaining(),
                },
            ));
        }

        self.grammar.finish(end);
        self.sink.grammar_end(end, self.config.sentinel);
        debug!(
            "decoded {} rule(s), sentinel at offset {}",
            self.grammar.len(),
            end
        );
        Ok(self.grammar)
    }

    fn next(&mut self, expected: Expected) -> Result<(usize, Token), DecodeError> {
        self.cursor
            .next()
            .map_err(|err| DecodeError::exhausted(err, expected))
    }

    /// Read one rule. Returns the sentinel's offset once the rule list ends.
    fn read_rule(&mut self) -> Result<Option<usize>, DecodeError> {
        let (offset, raw) = self.next(Expected::RuleId)?;
        if raw == self.config.sentinel {
            return Ok(Some(offset));
        }

        let id = RuleId(raw);
        let slot = self.grammar.begin_rule(id, offset);
        self.sink.rule_enter(id, offset);

        let mut index = 0;
        while self.read_alternate(slot, id, index)? {
            index += 1;
        }

        let close = self.cursor.position() - 1;
        self.sink.rule_exit(id, close);
        debug!("rule {} at offset {}: {} alternate(s)", id, offset, index);
        Ok(None)
    }

    /// Read one alternate. Returns false on the rule's closing zero.
    fn read_alternate(
        &mut self,
        slot: usize,
        rule: RuleId,
        index: usize,
    ) -> Result<bool, DecodeError> {
        let (offset, len) = self.next(Expected::AlternateLength)?;
        if len == 0 {
            return Ok(false);
        }

        self.grammar.push_alternate(
            slot,
            Alternate {
                offset,
                declared_len: len,
                symbols: Vec::new(),
            },
        );
        self.sink.alternate_enter(rule, index, offset, len);

        while self.read_symbol(slot, rule, index)? {}

        let close = self.cursor.position() - 1;
        if self.config.strict_lengths {
            let actual = close - offset;
            if actual != len as usize {
                return Err(DecodeError::new(
                    offset,
                    DecodeErrorKind::AlternateLengthMismatch {
                        declared: len,
                        actual,
                    },
                ));
            }
        }

        self.sink.alternate_exit(rule, index, close);
        Ok(true)
    }

    /// Read one symbol. Returns false on the alternate's closing zero.
    fn read_symbol(
        &mut self,
        slot: usize,
        rule: RuleId,
        alternate: usize,
    ) -> Result<bool, DecodeError> {
        let (offset, len) = self.next(Expected::SymbolLength)?;

        let symbol = match len {
            0 => return Ok(false),
            1 => {
                let (_, target) = self.next(Expected::ReferenceTarget)?;
                Symbol::Reference(RuleId(target))
            }
            n if n % 2 == 1 => {
                return Err(DecodeError::new(
                    offset,
                    DecodeErrorKind::OddCharSetLength { len: n },
                ));
            }
            n => {
                let payload = self
                    .cursor
                    .advance_by(n as usize)
                    .map_err(|err| DecodeError::exhausted(err, Expected::RangeBounds))?;
                Symbol::Chars(CharSet::from_pairs(payload))
            }
        };

        let entry = SymbolEntry { offset, symbol };
        trace!("rule {} alt {}: {:?}", rule, alternate, entry);
        self.sink.symbol(rule, alternate, &entry);
        self.grammar.push_symbol(slot, entry);
        Ok(true)
    }
}
