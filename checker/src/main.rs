//! Validate a board, and optionally a solution for it, from a JSON document on disk.
//!
//! The document holds `{ "board": .., "solution": .. }` in the same shapes the web API accepts.
//! The board is printed with the solution's paths drawn over it, followed by `ok` or one line per violation.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use flowcheck::payload::{BoardPayload, SolutionPayload};
use flowcheck::{PathValidator, ReportMode, ValidationConfig};
use serde::Deserialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON document holding a `board` and an optional `solution`
    file: PathBuf,
    /// JSON file of validation settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Enable every optional check
    #[arg(long)]
    strict: bool,
    /// Report every violation instead of the first
    #[arg(long)]
    collect_all: bool,
}

#[derive(Debug, Deserialize)]
struct Document {
    board: BoardPayload,
    solution: Option<SolutionPayload>,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flowcheck=info,checker=info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    debug!(?config, "settings loaded");

    let raw = fs::read_to_string(&args.file).with_context(|| format!("failed to read {}", args.file.display()))?;
    let document: Document = serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", args.file.display()))?;
    info!(file = %args.file.display(), board = %document.board.name, "checking");

    let board = match document.board.decode(&config) {
        Ok(board) => board,
        Err(error) => {
            println!("{}: {error}", error.kind());
            return Ok(ExitCode::FAILURE);
        }
    };

    let Some(payload) = document.solution else {
        print!("{board}");
        println!("ok");
        return Ok(ExitCode::SUCCESS);
    };

    let solution = match payload.decode(&config) {
        Ok(solution) => solution,
        Err(error) => {
            print!("{board}");
            println!("{}: {error}", error.kind());
            return Ok(ExitCode::FAILURE);
        }
    };

    print!("{}", board.render_with(&solution.paths));
    match PathValidator::new(&board, &solution.paths, &config).report() {
        Ok(()) => {
            println!("ok");
            Ok(ExitCode::SUCCESS)
        }
        Err(violations) => {
            for violation in &violations {
                println!("{}: {violation}", violation.kind());
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn load_config(args: &Args) -> Result<ValidationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
            ValidationConfig::from_json(&raw).with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => ValidationConfig::default(),
    };

    if args.strict {
        config = ValidationConfig {
            max_dimension: config.max_dimension,
            report: config.report,
            ..ValidationConfig::strict()
        };
    }
    if args.collect_all {
        config = config.with_report(ReportMode::CollectAll);
    }

    Ok(config)
}
