//! One line per rule, BNF style, annotated with offsets.

use core::fmt::{self, Write};

use crate::grammar::{Grammar, Rule, Symbol};

/// Write each rule in stream order as `<off>rule#ID ::= <off>sym ... | ...`.
pub fn write_listing<W: Write>(grammar: &Grammar, out: &mut W) -> fmt::Result {
    for rule in grammar.rules() {
        write_rule(rule, out)?;
    }
    Ok(())
}

fn write_rule<W: Write>(rule: &Rule, out: &mut W) -> fmt::Result {
    write!(out, "<{}>rule#{} ::=", rule.offset, rule.id)?;
    for (n, alternate) in rule.alternates.iter().enumerate() {
        if n > 0 {
            out.write_str(" |")?;
        }
        for entry in &alternate.symbols {
            match &entry.symbol {
                Symbol::Reference(target) => write!(out, " <{}>rule#{}", entry.offset, target)?,
                Symbol::Chars(set) => write!(out, " <{}>{}", entry.offset, set)?,
            }
        }
    }
    out.write_char('\n')
}

/// Render [`write_listing`] into a string.
pub fn listing(grammar: &Grammar) -> String {
    let mut out = String::new();
    let _ = write_listing(grammar, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Alt, GrammarBuilder};

    #[test]
    fn test_listing() {
        let grammar = GrammarBuilder::new()
            .rule(0, [Alt::new().reference(1), Alt::new().range('0', '9').reference(0)])
            .rule(1, [Alt::new().literal("a"), Alt::new()])
            .build();

        assert_eq!(
            listing(&grammar),
            "<0>rule#0 ::= <2>rule#1 | <6>['0'-'9'] <9>rule#0\n\
             <13>rule#1 ::= <15>['a'] |\n"
        );
    }
}
