//! # Error Types
//!
//! Failures that can occur while loading examples and schemas or while
//! enumerating the examples directory. All derive `thiserror::Error`.
//!
//! None of these cross the per-file boundary of a batch run except
//! [`DiscoveryError`], which is the only fatal condition.

use std::path::PathBuf;

use thiserror::Error;

/// A JSON file could not be turned into a value.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The file exists but is not valid JSON.
    #[error("JSON parsing error in {}: {source}", file_name(path))]
    Malformed {
        /// Path of the malformed file.
        path: PathBuf,
        /// Parser diagnostic, including line and column.
        #[source]
        source: serde_json::Error,
    },

    /// The file parsed, but its root is not a JSON object.
    #[error("{}: example root must be a JSON object, found {found}", file_name(path))]
    NotAnObject {
        /// Path of the offending file.
        path: PathBuf,
        /// JSON type name of the root value.
        found: &'static str,
    },

    /// A schema file parsed, but its root is neither an object nor a boolean.
    #[error("{}: schema root must be an object or boolean, found {found}", file_name(path))]
    InvalidSchemaRoot {
        /// Path of the offending schema file.
        path: PathBuf,
        /// JSON type name of the root value.
        found: &'static str,
    },

    /// Any other IO failure (permissions, path is a directory, ...).
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// A schema required by one of the document's sections could not be loaded.
#[derive(Error, Debug)]
#[error("schema '{schema_file}' for section '{section}': {source}")]
pub struct SchemaLoadError {
    /// Section whose schema failed to load.
    pub section: String,
    /// Schema filename from the section map.
    pub schema_file: String,
    /// Why the file could not be loaded.
    #[source]
    pub source: LoadError,
}

/// The examples directory cannot be processed at all.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The examples directory does not exist.
    #[error("Examples directory not found: {}", path.display())]
    DirectoryNotFound {
        /// Directory that was expected.
        path: PathBuf,
    },

    /// The directory exists but holds no `*.json` files.
    #[error("No example files found in {}", path.display())]
    NoExamples {
        /// Directory that was scanned.
        path: PathBuf,
    },

    /// The directory could not be listed.
    #[error("cannot read examples directory {}: {source}", path.display())]
    Io {
        /// Directory that was scanned.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// A section map definition is unusable.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SectionMapError {
    /// The map has no entries, so nothing would ever be validated.
    #[error("section map is empty")]
    Empty,

    /// The same section key appears twice.
    #[error("section '{0}' is mapped more than once")]
    DuplicateSection(String),

    /// An entry has a blank section key or schema filename.
    #[error("section map entry {index} has an empty section or schema name")]
    BlankEntry {
        /// Zero-based position of the entry.
        index: usize,
    },
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
