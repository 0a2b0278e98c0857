//! Cross-reference summary of a decoded grammar.

use core::fmt::{self, Write};

use super::Palette;
use crate::grammar::{Grammar, Symbol};

/// Width of the label column before the `@ offset` column.
const LABEL_WIDTH: usize = 30;

/// Write one block per rule, in discovery order.
///
/// Each block lists the rule's header offset, then every symbol of every
/// alternate with its own offset. Alternates are separated by a rule line.
pub fn write_summary<W: Write>(
    grammar: &Grammar,
    out: &mut W,
    palette: &Palette,
) -> fmt::Result {
    for (id, offset) in grammar.offsets().iter() {
        writeln!(
            out,
            "{}RULE #{:<width$}{} @ {}",
            palette.header,
            id.to_string(),
            palette.reset,
            offset,
            width = LABEL_WIDTH
        )?;

        let alternates = grammar.alternates_of(id).unwrap_or_default();
        if alternates.is_empty() {
            writeln!(out, "    (no alternates)")?;
        }

        for (n, alternate) in alternates.iter().enumerate() {
            if n > 0 {
                writeln!(out, "  ------------")?;
            }
            if alternate.symbols.is_empty() {
                writeln!(out, "    (empty)")?;
            }
            for entry in &alternate.symbols {
                let label = match &entry.symbol {
                    Symbol::Reference(target) => format!("rule#{}", target),
                    Symbol::Chars(set) => set.to_string(),
                };
                writeln!(
                    out,
                    "    - {:<width$} @ {}",
                    label,
                    entry.offset,
                    width = LABEL_WIDTH
                )?;
            }
        }
    }
    Ok(())
}

/// Write dangling references and unreferenced rules, if there are any.
pub fn write_reference_check<W: Write>(
    grammar: &Grammar,
    out: &mut W,
    palette: &Palette,
) -> fmt::Result {
    let dangling = grammar.dangling_references();
    if !dangling.is_empty() {
        writeln!(out, "{}dangling references:{}", palette.warning, palette.reset)?;
        for r in &dangling {
            writeln!(
                out,
                "    - rule#{} from rule {} alternate #{} @ {}",
                r.target, r.from, r.alternate, r.offset
            )?;
        }
    }

    let unreferenced = grammar.unreferenced_rules();
    if !unreferenced.is_empty() {
        let ids: Vec<String> = unreferenced.iter().map(|id| id.to_string()).collect();
        writeln!(out, "unreferenced rules: {}", ids.join(", "))?;
    }
    Ok(())
}

/// Render [`write_summary`] without colour into a string.
pub fn summary(grammar: &Grammar) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_summary(grammar, &mut out, &Palette::plain());
    out
}
