//! Construct grammars in code with the offsets an encoder would assign.

use super::{Alternate, CharRange, CharSet, Grammar, RuleId, Symbol, SymbolEntry, SENTINEL};
use crate::stream::Token;

/// Symbols of one alternate, in order.
#[derive(Debug, Clone, Default)]
pub struct Alt {
    symbols: Vec<Symbol>,
}

impl Alt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reference to another rule.
    pub fn reference(mut self, id: Token) -> Self {
        self.symbols.push(Symbol::Reference(RuleId(id)));
        self
    }

    /// Append a character set with a single range.
    pub fn range(self, from: char, to: char) -> Self {
        self.set([(from as Token, to as Token)])
    }

    /// Append a character set with several ranges.
    pub fn set<I>(mut self, ranges: I) -> Self
    where
        I: IntoIterator<Item = (Token, Token)>,
    {
        let mut set = CharSet::default();
        for (from, to) in ranges {
            set.push(CharRange::new(from, to));
        }
        self.symbols.push(Symbol::Chars(set));
        self
    }

    /// Append one single-character set per character of `text`.
    pub fn literal(mut self, text: &str) -> Self {
        for c in text.chars() {
            let mut set = CharSet::default();
            set.push(CharRange::single(c as Token));
            self.symbols.push(Symbol::Chars(set));
        }
        self
    }

    /// Append an already built symbol.
    pub fn symbol(mut self, symbol: Symbol) -> Self {
        self.symbols.push(symbol);
        self
    }
}

/// Builds a [`Grammar`] laid out exactly as its encoding would be.
///
/// Offsets and alternate length prefixes are computed the way the table
/// producer writes them, so `decode(&encode(&g))` reproduces `g`.
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    rules: Vec<(RuleId, Vec<Alt>)>,
    sentinel: Token,
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GrammarBuilder {
    pub fn new() -> Self {
        GrammarBuilder {
            rules: Vec::new(),
            sentinel: SENTINEL,
        }
    }

    /// Use a non-default terminating sentinel.
    pub fn with_sentinel(mut self, sentinel: Token) -> Self {
        self.sentinel = sentinel;
        self
    }

    /// Append a rule with the given alternates.
    pub fn rule<I>(mut self, id: Token, alternates: I) -> Self
    where
        I: IntoIterator<Item = Alt>,
    {
        self.rules.push((RuleId(id), alternates.into_iter().collect()));
        self
    }

    pub fn build(self) -> Grammar {
        let mut grammar = Grammar::new(self.sentinel);
        let mut pos = 0usize;

        for (id, alts) in self.rules {
            let slot = grammar.begin_rule(id, pos);
            pos += 1;

            for alt in alts {
                let offset = pos;
                pos += 1;
                let mut symbols = Vec::with_capacity(alt.symbols.len());
                for symbol in alt.symbols {
                    let len = symbol.token_len();
                    symbols.push(SymbolEntry {
                        offset: pos,
                        symbol,
                    });
                    pos += len;
                }
                let declared_len = (pos - offset) as Token;
                grammar.push_alternate(
                    slot,
                    Alternate {
                        offset,
                        declared_len,
                        symbols,
                    },
                );
                // alternate terminator
                pos += 1;
            }
            // rule terminator
            pos += 1;
        }

        grammar.finish(pos);
        grammar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_match_layout() {
        // 3 [4 2 'a' 'z'] 0 0 ffff
        let grammar = GrammarBuilder::new()
            .rule(3, [Alt::new().range('a', 'z')])
            .build();

        let rule = grammar.rule(RuleId(3)).unwrap();
        assert_eq!(rule.offset, 0);
        let alt = &rule.alternates[0];
        assert_eq!(alt.offset, 1);
        assert_eq!(alt.declared_len, 4);
        assert_eq!(alt.encoded_len(), 4);
        assert_eq!(alt.symbols[0].offset, 2);
        assert_eq!(grammar.end_offset(), 7);
        assert_eq!(grammar.token_len(), 8);
    }

    #[test]
    fn test_literal_expands_per_char() {
        let grammar = GrammarBuilder::new()
            .rule(1, [Alt::new().literal("if")])
            .build();

        let alt = &grammar.alternates_of(RuleId(1)).unwrap()[0];
        assert_eq!(alt.symbols.len(), 2);
        assert_eq!(alt.declared_len, 7);
        let first = alt.symbols[0].symbol.as_chars().unwrap();
        assert_eq!(first.ranges(), &[CharRange::single('i' as Token)]);
    }

    #[test]
    fn test_empty_alternate_still_has_prefix() {
        let grammar = GrammarBuilder::new()
            .rule(5, [Alt::new().reference(5), Alt::new()])
            .build();

        let alts = grammar.alternates_of(RuleId(5)).unwrap();
        assert_eq!(alts[1].offset, 5);
        assert_eq!(alts[1].declared_len, 1);
        assert!(alts[1].is_empty());
    }
}
