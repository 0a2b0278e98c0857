//! Ruletab CLI tool for inspecting binary grammar tables.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

use ruletab::report::Palette;
use ruletab::{DecodeConfig, InputFormat, Token};

mod check;
mod dissect;

#[derive(Debug, Parser)]
#[command(name = "ruletab")]
#[command(about = "Decode and cross-reference binary grammar tables", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Force color output even when not a TTY
    #[arg(short = 'C', long = "color", global = true)]
    color: bool,

    /// Disable color output
    #[arg(short = 'M', long = "no-color", global = true)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode a table, printing the trace and the cross-reference summary
    Dissect(dissect::DissectArgs),
    /// Print one BNF-style line per rule
    Listing(InputArgs),
    /// Print the decoded table as hex words
    Dump(InputArgs),
    /// Validate tables, reporting the first error in each
    Check(check::CheckArgs),
}

/// Input file plus decoding options, for single-input subcommands.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub decode: DecodeArgs,
}

impl InputArgs {
    pub fn format(&self) -> InputFormat {
        self.decode.format()
    }

    pub fn config(&self) -> DecodeConfig {
        self.decode.config()
    }
}

/// Decoding options shared by every subcommand.
#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Input is a dump of bare hex words instead of an integer list
    #[arg(long)]
    pub hex: bool,

    /// Token that ends the rule list (decimal or 0x hex)
    #[arg(long, default_value = "0xFFFF", value_parser = parse_token)]
    pub sentinel: Token,

    /// Verify alternate lengths and reject tokens after the sentinel
    #[arg(long)]
    pub strict: bool,
}

impl DecodeArgs {
    pub fn format(&self) -> InputFormat {
        if self.hex {
            InputFormat::HexDump
        } else {
            InputFormat::Integers
        }
    }

    pub fn config(&self) -> DecodeConfig {
        let config = if self.strict {
            DecodeConfig::strict()
        } else {
            DecodeConfig::lenient()
        };
        config.with_sentinel(self.sentinel)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Trace, summary and reference check as text
    Text,
    /// The decoded grammar as JSON
    Json,
}

/// Parse a single token given as decimal or `0x` hex.
fn parse_token(s: &str) -> Result<Token, String> {
    let tokens = ruletab::text::parse_tokens(s).map_err(|e| e.to_string())?;
    match tokens.as_slice() {
        [token] => Ok(*token),
        _ => Err(format!("expected a single token, found {}", tokens.len())),
    }
}

fn init_logging(verbose: u8) {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| LevelFilter::from_str(&level).ok())
        .unwrap_or(match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        });

    // A logger can only be installed once per process; ignore a second attempt.
    let _ = simplelog::TermLogger::init(
        level,
        simplelog::ConfigBuilder::new()
            .set_time_format_custom(&[])
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let use_color = if cli.no_color {
        false
    } else if cli.color {
        true
    } else {
        atty::is(atty::Stream::Stdout)
    };
    let palette = Palette::new(use_color);

    match cli.command {
        Command::Dissect(args) => dissect::run(args, &palette),
        Command::Listing(args) => dissect::run_listing(args),
        Command::Dump(args) => dissect::run_dump(args, &palette),
        Command::Check(args) => {
            let code = check::run(args, &palette)?;
            std::process::exit(code);
        }
    }
}
