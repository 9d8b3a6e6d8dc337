//! `json-delta` — diff JSON documents and apply JSON Patches.
//!
//! Usage:
//!   json-delta diff <SOURCE> <TARGET> [--lcs] [--pretty] [--only <POINTER>]
//!   json-delta apply <DOCUMENT> <PATCH> [--pretty]
//!
//! A file argument of `-` is read from stdin. Logging goes to stderr and is
//! controlled by `RUST_LOG` (default `warn`).

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use json_delta::json_cli::{apply_json, diff_json};
use json_delta::json_patch_diff::{ArrayStrategy, DiffOptions};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "json-delta")]
#[command(version, about = "Structural JSON diff and JSON Patch (RFC 6902)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the JSON Patch that turns SOURCE into TARGET
    Diff {
        #[arg(value_name = "SOURCE")]
        source: PathBuf,
        #[arg(value_name = "TARGET")]
        target: PathBuf,
        /// Diff arrays element by element instead of replacing them whole
        #[arg(long)]
        lcs: bool,
        /// Pretty-print the patch
        #[arg(long)]
        pretty: bool,
        /// Only keep operations touching this JSON Pointer subtree
        #[arg(long, value_name = "POINTER")]
        only: Option<String>,
    },
    /// Apply PATCH to DOCUMENT and print the result
    Apply {
        #[arg(value_name = "DOCUMENT")]
        document: PathBuf,
        #[arg(value_name = "PATCH")]
        patch: PathBuf,
        /// Pretty-print the document
        #[arg(long)]
        pretty: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let output = match cli.command {
        Commands::Diff { source, target, lcs, pretty, only } => {
            check_stdin_once(&[&source, &target])?;
            let arrays = if lcs { ArrayStrategy::Lcs } else { ArrayStrategy::Replace };
            let options = DiffOptions::default().with_arrays(arrays);
            let (source, target) = (read_input(&source)?, read_input(&target)?);
            diff_json(&source, &target, &options, only.as_deref(), pretty).context("diff failed")?
        }
        Commands::Apply { document, patch, pretty } => {
            check_stdin_once(&[&document, &patch])?;
            let (document, patch) = (read_input(&document)?, read_input(&patch)?);
            apply_json(&document, &patch, pretty).context("apply failed")?
        }
    };
    write_output(&output)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn check_stdin_once(paths: &[&Path]) -> Result<()> {
    if paths.iter().filter(|p| is_stdin(p)).count() > 1 {
        bail!("only one input may be read from stdin");
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input).context("failed to read stdin")?;
        Ok(input)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn write_output(output: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(output.as_bytes())?;
    handle.write_all(b"\n")?;
    Ok(())
}
