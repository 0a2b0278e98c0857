//! Hex word dump of a token stream.

use core::fmt::{self, Write};

use super::Palette;
use crate::stream::Token;

/// Tokens per output line.
pub const WORDS_PER_LINE: usize = 16;

/// Write `tokens` as space-separated 4-digit hex words, [`WORDS_PER_LINE`]
/// per line, each line prefixed with the offset of its first token.
pub fn write_hex_dump<W: Write>(
    tokens: &[Token],
    out: &mut W,
    palette: &Palette,
) -> fmt::Result {
    for (row, chunk) in tokens.chunks(WORDS_PER_LINE).enumerate() {
        write!(out, "{:>6}:", row * WORDS_PER_LINE)?;
        for &token in chunk {
            write!(out, " {}", palette.hex(token))?;
        }
        out.write_char('\n')?;
    }
    Ok(())
}

/// Render [`write_hex_dump`] without colour into a string.
pub fn hex_dump(tokens: &[Token]) -> String {
    let mut out = String::new();
    let _ = write_hex_dump(tokens, &mut out, &Palette::plain());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_dump() {
        assert_eq!(
            hex_dump(&[3, 3, 1, 1, 0, 0, 0xFFFF]),
            "     0: 0003 0003 0001 0001 0000 0000 ffff\n"
        );
    }

    #[test]
    fn test_wraps_rows() {
        let tokens: Vec<Token> = (0..20).collect();
        let text = hex_dump(&tokens);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" 000f"));
        assert_eq!(lines[1], "    16: 0010 0011 0012 0013");
    }

    #[test]
    fn test_empty() {
        assert_eq!(hex_dump(&[]), "");
    }
}
