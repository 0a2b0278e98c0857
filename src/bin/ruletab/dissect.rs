//! CLI handlers for the `dissect`, `listing` and `dump` commands.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use ruletab::decode::{decode_with, DecodeError};
use ruletab::report::{self, Palette, TraceWriter};
use ruletab::{Grammar, Token};

use crate::{InputArgs, OutputFormat};

/// Decode a table and print its structure.
#[derive(Debug, Parser)]
pub struct DissectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Skip the structural trace and print only the summary
    #[arg(long)]
    pub no_trace: bool,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Read the input file, or stdin when no file is given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read from stdin")?;
            Ok(input)
        }
    }
}

/// Display name of the input for messages.
pub fn input_name(path: Option<&Path>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "<stdin>".to_string(),
    }
}

fn load_tokens(args: &InputArgs) -> Result<Vec<Token>> {
    let name = input_name(args.file.as_deref());
    let text = read_input(args.file.as_deref())?;
    let tokens = ruletab::load(&text, args.format())
        .with_context(|| format!("failed to parse tokens in {}", name))?;
    log::info!("loaded {} token(s)", tokens.len());
    Ok(tokens)
}

fn decode_input(args: &InputArgs, tokens: &[Token]) -> Result<Grammar> {
    let name = input_name(args.file.as_deref());
    decode_with(tokens, &args.config(), &mut ())
        .with_context(|| format!("failed to decode {}", name))
}

/// Run the dissect command.
pub fn run(args: DissectArgs, palette: &Palette) -> Result<()> {
    let tokens = load_tokens(&args.input)?;
    let config = args.input.config();

    if let OutputFormat::Json = args.format {
        let grammar = decode_input(&args.input, &tokens)?;
        println!("{}", serde_json::to_string_pretty(&grammar)?);
        return Ok(());
    }

    let grammar = if args.no_trace {
        decode_input(&args.input, &tokens)?
    } else {
        let mut trace = TraceWriter::with_palette(String::new(), *palette);
        let result: Result<Grammar, DecodeError> = decode_with(&tokens, &config, &mut trace);
        // Partial trace is printed before a decode failure is reported.
        print!("{}", trace.finish().context("failed to render trace")?);
        println!();
        let name = input_name(args.input.file.as_deref());
        result.with_context(|| format!("failed to decode {}", name))?
    };

    let mut out = String::new();
    report::write_summary(&grammar, &mut out, palette).context("failed to render summary")?;
    report::write_reference_check(&grammar, &mut out, palette)
        .context("failed to render reference check")?;
    print!("{}", out);
    Ok(())
}

/// Run the listing command.
pub fn run_listing(args: InputArgs) -> Result<()> {
    let tokens = load_tokens(&args)?;
    let grammar = decode_input(&args, &tokens)?;
    print!("{}", report::listing(&grammar));
    Ok(())
}

/// Run the dump command.
pub fn run_dump(args: InputArgs, palette: &Palette) -> Result<()> {
    let tokens = load_tokens(&args)?;
    let grammar = decode_input(&args, &tokens)?;
    let encoded = ruletab::encode(&grammar);
    if encoded.len() != tokens.len() {
        log::warn!(
            "ignoring {} token(s) after the sentinel",
            tokens.len() - encoded.len()
        );
    }

    let mut out = String::new();
    report::write_hex_dump(&encoded, &mut out, palette).context("failed to render dump")?;
    print!("{}", out);
    Ok(())
}
