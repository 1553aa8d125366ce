//! The `blockdown` binary.

use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(
    name = "blockdown",
    version,
    about = "A block-structured Markdown parser and formatter"
)]
struct Cli {
    /// The markdown file(s) to parse; or standard input if none passed
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Specify output format
    #[arg(short = 't', long = "to", value_enum, default_value = "markdown")]
    to: Format,

    /// Write output to FILE instead of standard output
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Canonical markdown
    Markdown,
    /// An HTML fragment
    Html,
    /// The JSON document tree
    Json,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("blockdown: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut input = String::new();
    if cli.files.is_empty() {
        io::stdin().read_to_string(&mut input)?;
    } else {
        for path in &cli.files {
            input.push_str(&fs::read_to_string(path)?);
        }
    }

    let rendered = match cli.to {
        Format::Markdown => {
            let blocks = blockdown::markdown_to_blocks(&input);
            blockdown::blocks_to_markdown(&blocks)
        }
        Format::Html => {
            let blocks = blockdown::markdown_to_blocks(&input);
            blockdown::blocks_to_html(&blocks)
        }
        Format::Json => {
            let document = blockdown::markdown_to_document(&input);
            let mut json = serde_json::to_string_pretty(&document)?;
            json.push('\n');
            json
        }
    };

    match cli.output {
        Some(path) => fs::write(path, rendered)?,
        None => io::stdout().write_all(rendered.as_bytes())?,
    }

    Ok(())
}
