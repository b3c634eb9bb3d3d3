//! # edm-cli
//!
//! Command-line interface for the EDM Schema Engine.
//!
//! Parses CSDL-JSON documents into EDM models; referenced documents are
//! resolved relative to the input file's directory.

use anyhow::Context;
use clap::Parser;
use edm_csdl::{CsdlParser, ParseOutcome};
use edm_model::SchemaElement;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "edm")]
#[command(about = "EDM Schema Engine CLI")]
#[command(version)]
struct Cli {
    /// Do not load referenced documents
    #[arg(long)]
    no_references: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Parse a CSDL-JSON file and print a model summary
    Inspect {
        /// Input file path
        input: PathBuf,
    },

    /// Parse a CSDL-JSON file, reporting diagnostics; exits non-zero on error
    Check {
        /// Input file path
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Inspect { ref input } => parse_file(input, cli.no_references).map(|outcome| {
            print_summary(&outcome);
        }),
        Commands::Check { ref input } => parse_file(input, cli.no_references).map(|outcome| {
            for diagnostic in &outcome.diagnostics {
                println!("warning: {diagnostic}");
            }
            println!("ok: {} element(s)", outcome.model.element_count());
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn parse_file(input: &Path, no_references: bool) -> anyhow::Result<ParseOutcome> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;

    let base_dir = input
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let parser = CsdlParser::new()
        .load_references(!no_references)
        .with_resolver(move |uri| resolve_relative(&base_dir, uri));

    parser
        .parse_str(&text)
        .with_context(|| format!("parsing {}", input.display()))
}

/// Resolve a referenced URI to a file next to the input document,
/// by its last path segment.
fn resolve_relative(base_dir: &Path, uri: &str) -> Option<serde_json::Value> {
    let file_name = uri.rsplit('/').next()?;
    let path = base_dir.join(file_name);
    tracing::debug!(uri, path = %path.display(), "resolving reference");
    let text = std::fs::read_to_string(&path).ok()?;
    serde_json::from_str(&text).ok()
}

fn print_summary(outcome: &ParseOutcome) {
    let model = &outcome.model;
    println!("version: {}", model.version().as_str());
    for namespace in model.namespaces() {
        println!("namespace: {namespace}");
    }
    for (alias, namespace) in model.aliases() {
        println!("alias: {alias} -> {namespace}");
    }

    let mut elements: Vec<&SchemaElement> = model.elements().collect();
    elements.sort_by_key(|e| e.full_name());
    for element in elements {
        println!("  {:?} {}", element.kind(), element.full_name());
    }

    for sub_model in model.referenced_models() {
        println!(
            "referenced: {} ({} element(s))",
            sub_model.uri().unwrap_or("<unknown>"),
            sub_model.element_count()
        );
    }
    for diagnostic in &outcome.diagnostics {
        println!("warning: {diagnostic}");
    }
}
