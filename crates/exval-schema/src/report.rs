//! # Batch Validation & Reporting
//!
//! Runs [`SchemaValidator::validate_example`] over every example in a
//! directory and renders the console report:
//!
//! ```text
//! ======================================================================
//! Validating 3 example file(s) against schemas
//! ======================================================================
//!
//! PASS  a.json
//! FAIL  b.json
//!      Section 'generalSection': "title" is a required property (at /generalSection)
//! PASS  c.json
//!
//! ======================================================================
//! Results: 2/3 files valid
//! ======================================================================
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::DiscoveryError;
use crate::validate::{ExampleVerdict, SchemaValidator};

const RULE_WIDTH: usize = 70;
const DETAIL_INDENT: &str = "     ";

/// List the `*.json` files directly inside `dir`, sorted by file name.
///
/// # Errors
///
/// [`DiscoveryError::DirectoryNotFound`] when `dir` is missing (or not a
/// directory), [`DiscoveryError::NoExamples`] when it holds no JSON files.
pub fn discover_examples(dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !dir.is_dir() {
        return Err(DiscoveryError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| DiscoveryError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(DiscoveryError::NoExamples {
            path: dir.to_path_buf(),
        });
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Result for one example file.
#[derive(Debug)]
pub struct ExampleOutcome {
    /// File name shown in the report.
    pub name: String,
    /// Full path of the example.
    pub path: PathBuf,
    /// What validation concluded for this file.
    pub verdict: ExampleVerdict,
}

/// Results of a whole run, in discovery order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per discovered example, sorted by file name.
    pub outcomes: Vec<ExampleOutcome>,
}

impl BatchReport {
    /// Number of examples validated.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of examples with a valid verdict.
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.verdict.is_valid()).count()
    }

    /// Number of examples with any failing verdict.
    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// True only for a non-empty run in which every example passed.
    pub fn all_passed(&self) -> bool {
        self.total() > 0 && self.failed() == 0
    }

    /// Write the full console report.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(out)?;
        writeln!(out, "{rule}")?;
        writeln!(
            out,
            "Validating {} example file(s) against schemas",
            self.total()
        )?;
        writeln!(out, "{rule}")?;
        writeln!(out)?;

        for outcome in &self.outcomes {
            let status = if outcome.verdict.is_valid() { "PASS" } else { "FAIL" };
            writeln!(out, "{status}  {}", outcome.name)?;
            for message in outcome.verdict.messages() {
                writeln!(out, "{DETAIL_INDENT}{message}")?;
            }
        }

        writeln!(out)?;
        writeln!(out, "{rule}")?;
        writeln!(out, "Results: {}/{} files valid", self.passed(), self.total())?;
        writeln!(out, "{rule}")?;
        writeln!(out)?;
        Ok(())
    }
}

/// Validate every example in `examples_dir`.
///
/// Per-file problems are recorded in the report; only discovery errors
/// abort the run.
pub fn validate_batch(
    validator: &SchemaValidator,
    examples_dir: &Path,
) -> Result<BatchReport, DiscoveryError> {
    let files = discover_examples(examples_dir)?;
    tracing::info!(
        examples_dir = %examples_dir.display(),
        schema_dir = %validator.schema_dir().display(),
        count = files.len(),
        "validating examples"
    );

    let outcomes = files
        .into_iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let verdict = validator.validate_example(&path);
            tracing::debug!(example = %name, valid = verdict.is_valid(), "example validated");
            ExampleOutcome {
                name,
                path,
                verdict,
            }
        })
        .collect();

    Ok(BatchReport { outcomes })
}
