//! # exval-cli — Example Validator CLI
//!
//! Provides the `exval` binary: validates every example JSON document in a
//! directory against the schemas of its sections and exits non-zero if any
//! example fails.
//!
//! ```bash
//! exval
//! exval --examples-dir schema/v2/examples
//! exval --config exval.yaml -v
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing and configuration live here; validation logic lives
//!   in `exval-schema`.
//! - The report goes to stdout; logs go to stderr.

pub mod config;
pub mod validate;

use std::path::Path;

use config::{ConfigError, FileConfig, Overrides, Settings};

/// Load the optional config file and merge it with `overrides`.
pub fn load_settings(
    config_path: Option<&Path>,
    overrides: Overrides,
) -> Result<Settings, ConfigError> {
    let file = config_path.map(FileConfig::load).transpose()?;
    Settings::resolve(file, overrides)
}
