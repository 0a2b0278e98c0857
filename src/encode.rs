//! Serialize a grammar back into its token stream.
//!
//! Alternate length prefixes are written as they were declared, so a
//! decoded table re-encodes to exactly the tokens it came from.
//!
//! ```
//! use ruletab::decode::decode;
//! use ruletab::encode::encode;
//!
//! let tokens = vec![0, 3, 1, 0, 0, 4, 2, 48, 57, 0, 0, 0xFFFF];
//! let grammar = decode(&tokens).unwrap();
//! assert_eq!(encode(&grammar), tokens);
//! ```

use crate::grammar::{Alternate, Grammar, Rule, Symbol};
use crate::stream::Token;

/// Encode every rule in stream order, followed by the grammar's sentinel.
pub fn encode(grammar: &Grammar) -> Vec<Token> {
    let mut out = Vec::with_capacity(grammar.token_len());
    for rule in grammar.rules() {
        encode_rule(rule, &mut out);
    }
    out.push(grammar.sentinel());
    out
}

/// Append one rule, closing zero included.
pub fn encode_rule(rule: &Rule, out: &mut Vec<Token>) {
    out.push(rule.id.0);
    for alternate in &rule.alternates {
        encode_alternate(alternate, out);
    }
    out.push(0);
}

fn encode_alternate(alternate: &Alternate, out: &mut Vec<Token>) {
    out.push(alternate.declared_len);
    for entry in &alternate.symbols {
        match &entry.symbol {
            Symbol::Reference(target) => {
                out.push(1);
                out.push(target.0);
            }
            Symbol::Chars(set) => {
                out.push((2 * set.len()) as Token);
                for range in set.ranges() {
                    out.push(range.from);
                    out.push(range.to);
                }
            }
        }
    }
    out.push(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use crate::grammar::{Alt, GrammarBuilder};

    #[test]
    fn test_encode_builder_grammar() {
        let grammar = GrammarBuilder::new()
            .rule(0, [Alt::new().reference(5), Alt::new().range('a', 'z').range('A', 'Z')])
            .rule(5, [Alt::new().literal("ok")])
            .build();

        let tokens = encode(&grammar);
        assert_eq!(
            tokens,
            [
                0, 3, 1, 5, 0, 7, 2, 97, 122, 2, 65, 90, 0, 0, //
                5, 7, 2, 111, 111, 2, 107, 107, 0, 0, //
                0xFFFF
            ]
        );
        assert_eq!(tokens.len(), grammar.token_len());
        assert_eq!(decode(&tokens).unwrap(), grammar);
    }

    #[test]
    fn test_declared_length_is_preserved() {
        let tokens = vec![3, 9, 2, 97, 122, 0, 0, 0xFFFF];
        assert_eq!(encode(&decode(&tokens).unwrap()), tokens);
    }

    #[test]
    fn test_empty_grammar() {
        let grammar = GrammarBuilder::new().build();
        assert_eq!(encode(&grammar), [0xFFFF]);
    }
}
