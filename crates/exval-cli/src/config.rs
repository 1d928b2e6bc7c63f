//! Run configuration.
//!
//! Settings are layered, later layers winning:
//!
//! 1. Built-in defaults (`schema/examples`, schemas in its parent, the
//!    default section map).
//! 2. An optional YAML file passed with `--config`.
//! 3. `EXVAL_EXAMPLES_DIR` / `EXVAL_SCHEMA_DIR`.
//! 4. `--examples-dir` / `--schema-dir`.
//!
//! Layers 3 and 4 arrive already merged by clap as [`Overrides`].

use std::path::{Path, PathBuf};

use exval_schema::{SectionEntry, SectionMap, SectionMapError};
use serde::Deserialize;

/// Examples directory used when nothing else is configured.
pub const DEFAULT_EXAMPLES_DIR: &str = "schema/examples";

/// Shape of the YAML config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub examples_dir: Option<PathBuf>,
    pub schema_dir: Option<PathBuf>,
    /// Replaces the built-in section map when present.
    pub sections: Option<Vec<SectionEntry>>,
}

impl FileConfig {
    /// Read and parse a config file.
    ///
    /// Relative directories in the file are taken relative to the file's
    /// own directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut config: FileConfig =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                source: e,
            })?;

        let base = path.parent().unwrap_or(Path::new(""));
        config.examples_dir = config.examples_dir.map(|p| base.join(p));
        config.schema_dir = config.schema_dir.map(|p| base.join(p));
        Ok(config)
    }
}

/// Directory overrides from the environment or command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub examples_dir: Option<PathBuf>,
    pub schema_dir: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub examples_dir: PathBuf,
    pub schema_dir: PathBuf,
    pub sections: SectionMap,
}

impl Settings {
    /// Merge defaults, the optional config file and overrides.
    pub fn resolve(file: Option<FileConfig>, overrides: Overrides) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();

        let examples_dir = overrides
            .examples_dir
            .or(file.examples_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXAMPLES_DIR));

        let schema_dir = overrides
            .schema_dir
            .or(file.schema_dir)
            .unwrap_or_else(|| parent_dir(&examples_dir));

        let sections = match file.sections {
            Some(entries) => SectionMap::new(entries)?,
            None => SectionMap::default(),
        };

        Ok(Self {
            examples_dir,
            schema_dir,
            sections,
        })
    }
}

/// Parent of `dir`, treating a bare relative name as living in `.`.
fn parent_dir(dir: &Path) -> PathBuf {
    match dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid section map: {0}")]
    Sections(#[from] SectionMapError),
}
