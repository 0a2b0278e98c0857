//! CLI handler for the `check` command.

use anyhow::Result;
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use ruletab::decode::{decode_with, DecodeError, DecodeErrorKind};
use ruletab::report::Palette;
use ruletab::text::TokenParseError;
use ruletab::{DecodeConfig, InputFormat, Token};

use crate::DecodeArgs;

/// Validate grammar tables.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Input files to check (reads from stdin if none provided)
    #[arg(trailing_var_arg = true)]
    pub files: Vec<PathBuf>,

    /// Quiet mode: exit code only, no output
    #[arg(short, long)]
    pub quiet: bool,

    #[command(flatten)]
    pub decode: DecodeArgs,
}

/// Exit codes for the check command.
pub mod exit_codes {
    /// Every table decoded.
    pub const SUCCESS: i32 = 0;
    /// A table is malformed or truncated.
    pub const INVALID: i32 = 1;
    /// I/O error or unreadable token text.
    pub const IO_ERROR: i32 = 2;
}

/// Tokens shown on each side of the failing offset.
const WINDOW: usize = 6;

/// Run the check command.
pub fn run(args: CheckArgs, palette: &Palette) -> Result<i32> {
    let format = args.decode.format();
    let config = args.decode.config();

    if args.files.is_empty() {
        let mut input = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut input) {
            if !args.quiet {
                print_io_error("<stdin>", &e, palette);
            }
            return Ok(exit_codes::IO_ERROR);
        }
        return Ok(check_input(&input, "<stdin>", format, &config, args.quiet, palette));
    }

    let codes = args.files.iter().map(|path| match fs::read_to_string(path) {
        Ok(input) => {
            let name = path.display().to_string();
            check_input(&input, &name, format, &config, args.quiet, palette)
        }
        Err(e) => {
            if !args.quiet {
                print_io_error(&path.display().to_string(), &e, palette);
            }
            exit_codes::IO_ERROR
        }
    });
    Ok(combine_exit_codes(codes))
}

/// Fold per-input codes: any I/O error wins, then any invalid table.
fn combine_exit_codes<I: IntoIterator<Item = i32>>(codes: I) -> i32 {
    let mut any_invalid = false;
    let mut any_io_error = false;

    for code in codes {
        match code {
            exit_codes::INVALID => any_invalid = true,
            exit_codes::IO_ERROR => any_io_error = true,
            _ => {}
        }
    }

    if any_io_error {
        exit_codes::IO_ERROR
    } else if any_invalid {
        exit_codes::INVALID
    } else {
        exit_codes::SUCCESS
    }
}

/// Load and decode a single input, printing the first error.
fn check_input(
    input: &str,
    name: &str,
    format: InputFormat,
    config: &DecodeConfig,
    quiet: bool,
    palette: &Palette,
) -> i32 {
    let tokens = match ruletab::load(input, format) {
        Ok(tokens) => tokens,
        Err(err) => {
            if !quiet {
                print_parse_error(&err, name, palette);
            }
            return exit_codes::IO_ERROR;
        }
    };

    match decode_with(&tokens, config, &mut ()) {
        Ok(grammar) => {
            log::info!(
                "{}: {} rule(s), {} token(s)",
                name,
                grammar.len(),
                grammar.token_len()
            );
            exit_codes::SUCCESS
        }
        Err(err) => {
            if !quiet {
                print_decode_error(&err, &tokens, name, palette);
            }
            exit_codes::INVALID
        }
    }
}

fn print_io_error(name: &str, err: &io::Error, palette: &Palette) {
    eprintln!("{}error{}: {}: {}", palette.error, palette.reset, name, err);
}

fn print_parse_error(err: &TokenParseError, name: &str, palette: &Palette) {
    eprintln!("{}error{}: {}", palette.error, palette.reset, err.kind);
    eprintln!(
        "  {}--> {}:{}:{}{}",
        palette.header, name, err.line, err.column, palette.reset
    );
    eprintln!();
}

/// Print a formatted error message with a window of tokens around the offset.
fn print_decode_error(err: &DecodeError, tokens: &[Token], name: &str, palette: &Palette) {
    eprintln!(
        "{}error{}: {}: {}",
        palette.error,
        palette.reset,
        err.class(),
        err.kind
    );
    eprintln!(
        "  {}--> {} @ offset {}{}",
        palette.header, name, err.offset, palette.reset
    );

    let window = token_window(tokens, err.offset);
    let gutter = window.start.to_string().len().max(3);
    let blank = " ".repeat(gutter + 2);

    eprintln!("{}|", blank);
    eprintln!(" {:>width$} | {}", window.start, window.line, width = gutter);
    eprintln!(
        "{}| {}{}{}{} {}",
        blank,
        " ".repeat(window.caret_offset),
        palette.caret,
        "^".repeat(window.caret_width),
        palette.reset,
        error_hint(&err.kind)
    );
    eprintln!();
}

/// A rendered run of tokens and the caret position under one of them.
#[derive(Debug, PartialEq, Eq)]
struct TokenWindow {
    /// Offset of the first token shown.
    start: usize,
    line: String,
    caret_offset: usize,
    caret_width: usize,
}

/// Render up to [`WINDOW`] tokens either side of `offset` as hex words.
///
/// An offset at the end of the stream puts a one-column caret just past
/// the last token.
fn token_window(tokens: &[Token], offset: usize) -> TokenWindow {
    let start = offset.saturating_sub(WINDOW).min(tokens.len());
    let end = (offset + WINDOW + 1).min(tokens.len());

    let words: Vec<String> = tokens[start..end]
        .iter()
        .map(|token| format!("{:04x}", token))
        .collect();

    let caret_offset = words
        .iter()
        .take(offset.saturating_sub(start))
        .map(|word| word.len() + 1)
        .sum();
    let caret_width = words
        .get(offset.saturating_sub(start))
        .map_or(1, |word| word.len());

    TokenWindow {
        start,
        line: words.join(" "),
        caret_offset,
        caret_width,
    }
}

fn error_hint(kind: &DecodeErrorKind) -> String {
    match kind {
        DecodeErrorKind::ExhaustedStream { expected, .. } => format!("expected {}", expected),
        DecodeErrorKind::OddCharSetLength { .. } => {
            "character set lengths count range bounds in pairs".to_string()
        }
        DecodeErrorKind::AlternateLengthMismatch { actual, .. } => {
            format!("alternate spans {} token(s)", actual)
        }
        DecodeErrorKind::TrailingTokens { .. } => "nothing may follow the sentinel".to_string(),
    }
}
