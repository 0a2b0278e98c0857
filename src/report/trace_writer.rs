//! Nested text rendering of decode events.

use core::fmt::{self, Write};

use super::Palette;
use crate::decode::TraceSink;
use crate::grammar::{RuleId, Symbol, SymbolEntry};
use crate::stream::Token;

const INDENT: &str = "  ";

/// Writes the structural trace as nested, brace-delimited text.
///
/// ```text
/// grammar {
///   rule 3 (0003) @ 0 {
///     alternate #0 (len=0003) @ 1 {
///       sym (len=0001) @ 2 => ref rule 1 (0001)
///     } (0000) @ 4
///   } (0000) @ 5
/// } (ffff) @ 6
/// ```
///
/// Sink callbacks cannot fail, so the first write error is kept and
/// returned by [`finish`](Self::finish).
pub struct TraceWriter<W> {
    out: W,
    palette: Palette,
    depth: usize,
    error: Option<fmt::Error>,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(out: W) -> Self {
        Self::with_palette(out, Palette::plain())
    }

    pub fn with_palette(out: W, palette: Palette) -> Self {
        TraceWriter {
            out,
            palette,
            depth: 0,
            error: None,
        }
    }

    /// Return the underlying writer, or the first write error.
    pub fn finish(self) -> Result<W, fmt::Error> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.out),
        }
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        let result = (|| {
            for _ in 0..self.depth {
                self.out.write_str(INDENT)?;
            }
            self.out.write_fmt(args)?;
            self.out.write_char('\n')
        })();
        if let Err(err) = result {
            self.error = Some(err);
        }
    }
}

impl<W: Write> TraceSink for TraceWriter<W> {
    fn grammar_begin(&mut self) {
        self.line(format_args!("grammar {{"));
        self.depth += 1;
    }

    fn rule_enter(&mut self, id: RuleId, offset: usize) {
        let hex = self.palette.hex(id.0);
        self.line(format_args!("rule {} ({}) @ {} {{", id, hex, offset));
        self.depth += 1;
    }

    fn alternate_enter(&mut self, _rule: RuleId, index: usize, offset: usize, len: Token) {
        let hex = self.palette.hex(len);
        self.line(format_args!(
            "alternate #{} (len={}) @ {} {{",
            index, hex, offset
        ));
        self.depth += 1;
    }

    fn symbol(&mut self, _rule: RuleId, _alternate: usize, entry: &SymbolEntry) {
        match &entry.symbol {
            Symbol::Reference(target) => {
                let len = self.palette.hex(1);
                let hex = self.palette.hex(target.0);
                self.line(format_args!(
                    "sym (len={}) @ {} => ref rule {} ({})",
                    len, entry.offset, target, hex
                ));
            }
            Symbol::Chars(set) => {
                let len = self.palette.hex((2 * set.len()) as Token);
                self.line(format_args!("sym (len={}) @ {} {{", len, entry.offset));
                self.depth += 1;
                for range in set.ranges() {
                    let from = self.palette.hex(range.from);
                    let to = self.palette.hex(range.to);
                    self.line(format_args!("chars [{}-{}] {}", from, to, range));
                }
                self.depth -= 1;
                self.line(format_args!("}}"));
            }
        }
    }

    fn alternate_exit(&mut self, _rule: RuleId, _index: usize, offset: usize) {
        self.depth = self.depth.saturating_sub(1);
        let hex = self.palette.hex(0);
        self.line(format_args!("}} ({}) @ {}", hex, offset));
    }

    fn rule_exit(&mut self, _id: RuleId, offset: usize) {
        self.depth = self.depth.saturating_sub(1);
        let hex = self.palette.hex(0);
        self.line(format_args!("}} ({}) @ {}", hex, offset));
    }

    fn grammar_end(&mut self, offset: usize, sentinel: Token) {
        self.depth = self.depth.saturating_sub(1);
        let hex = self.palette.hex(sentinel);
        self.line(format_args!("}} ({}) @ {}", hex, offset));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_traced;

    #[test]
    fn test_reference_trace() {
        let mut writer = TraceWriter::new(String::new());
        decode_traced(&[3, 3, 1, 1, 0, 0, 0xFFFF], &mut writer).unwrap();
        let text = writer.finish().unwrap();

        assert_eq!(
            text,
            "grammar {\n\
             \x20 rule 3 (0003) @ 0 {\n\
             \x20   alternate #0 (len=0003) @ 1 {\n\
             \x20     sym (len=0001) @ 2 => ref rule 1 (0001)\n\
             \x20   } (0000) @ 4\n\
             \x20 } (0000) @ 5\n\
             } (ffff) @ 6\n"
        );
    }

    #[test]
    fn test_char_set_trace() {
        let mut writer = TraceWriter::new(String::new());
        decode_traced(&[3, 6, 4, 97, 122, 95, 95, 0, 0, 0xFFFF], &mut writer).unwrap();
        let text = writer.finish().unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[3], "      sym (len=0004) @ 2 {");
        assert_eq!(lines[4], "        chars [0061-007a] 'a'-'z'");
        assert_eq!(lines[5], "        chars [005f-005f] '_'");
        assert_eq!(lines[6], "      }");
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_partial_trace_on_error() {
        let mut writer = TraceWriter::new(String::new());
        assert!(decode_traced(&[3, 3, 1], &mut writer).is_err());
        let text = writer.finish().unwrap();
        assert_eq!(text.lines().count(), 3);
    }
}
