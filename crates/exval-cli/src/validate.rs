//! # Validate Command
//!
//! Validates every example in the configured directory and prints the
//! PASS/FAIL report on the given writer.
//!
//! Exit codes: 0 when every example passes; 1 when any example fails, the
//! examples directory is missing, or it holds no example files.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use exval_schema::{validate_batch, SchemaValidator};

use crate::config::{Overrides, Settings};

/// Directory options. Environment variables are read by clap and lose to
/// explicit flags.
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Directory containing the example `*.json` files.
    #[arg(long, env = "EXVAL_EXAMPLES_DIR", value_name = "DIR")]
    pub examples_dir: Option<PathBuf>,

    /// Directory containing the section schema files
    /// (default: parent of the examples directory).
    #[arg(long, env = "EXVAL_SCHEMA_DIR", value_name = "DIR")]
    pub schema_dir: Option<PathBuf>,
}

impl ValidateArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            examples_dir: self.examples_dir.clone(),
            schema_dir: self.schema_dir.clone(),
        }
    }
}

/// Run a full validation pass and write the report to `out`.
///
/// Returns the process exit code. `Err` is reserved for failures to write
/// the report itself.
pub fn run_validate<W: Write>(settings: &Settings, out: &mut W) -> Result<u8> {
    let validator = SchemaValidator::new(&settings.schema_dir, settings.sections.clone());

    tracing::debug!(
        examples_dir = %settings.examples_dir.display(),
        schema_dir = %settings.schema_dir.display(),
        sections = validator.sections().len(),
        "starting validation"
    );

    let report = match validate_batch(&validator, &settings.examples_dir) {
        Ok(report) => report,
        Err(e) => {
            writeln!(out, "ERROR: {e}").context("failed to write report")?;
            return Ok(1);
        }
    };

    report.render(out).context("failed to write report")?;

    if report.all_passed() {
        Ok(0)
    } else {
        for outcome in report.outcomes.iter().filter(|o| !o.verdict.is_valid()) {
            tracing::info!(path = %outcome.path.display(), "example failed");
        }
        tracing::info!(
            failed = report.failed(),
            total = report.total(),
            "validation failed"
        );
        Ok(1)
    }
}
