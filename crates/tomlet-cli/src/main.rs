//! `tomlet` CLI — move configuration between JSON payloads and the
//! editable text format from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # JSON → text (stdin → stdout)
//! echo '{"hostname":"atlas","ssh_port":22}' | tomlet render
//!
//! # Render from file to file
//! tomlet render -i config.json -o config.conf
//!
//! # Text → pretty-printed JSON
//! tomlet parse -i config.conf
//!
//! # Canonicalize a hand-edited document in place of its messy form
//! tomlet fmt -i config.conf -o config.conf
//! ```

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tomlet", version, about = "Section-based config text codec")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON configuration document as editable text
    Render {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse a text document back into pretty-printed JSON
    Parse {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Canonicalize a text document (drops comments, normalizes literals)
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { input, output } => {
            let json = read_input(input.as_deref())?;
            let text = tomlet_core::encode(&json)
                .context("Failed to render JSON as configuration text")?;
            write_output(output.as_deref(), &text)?;
        }
        Commands::Parse { input, output } => {
            let text = read_input(input.as_deref())?;
            let json = tomlet_core::decode(&text)
                .context("Failed to convert configuration text to JSON")?;
            // Compact on the wire, pretty for the terminal.
            let value: serde_json::Value = serde_json::from_str(&json)?;
            let pretty = serde_json::to_string_pretty(&value)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Fmt { input, output } => {
            let text = read_input(input.as_deref())?;
            let canonical = tomlet_core::serialize(&tomlet_core::parse(&text));
            write_output(output.as_deref(), &canonical)?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))?,
        None => print!("{}", content),
    }
    Ok(())
}
