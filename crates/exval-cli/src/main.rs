//! # exval entry point
//!
//! Parses arguments, initialises tracing and runs the validation pass.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use exval_cli::validate::{run_validate, ValidateArgs};

/// Validate example JSON documents against their section schemas.
///
/// Runs without arguments: examples are read from `schema/examples` and
/// schemas from its parent directory.
#[derive(Parser, Debug)]
#[command(name = "exval", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging on stderr. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(flatten)]
    validate: ValidateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("exval v{} starting", env!("CARGO_PKG_VERSION"));

    let result = exval_cli::load_settings(cli.config.as_deref(), cli.validate.overrides())
        .context("failed to load configuration")
        .and_then(|settings| {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            run_validate(&settings, &mut out)
        });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
