//! # Example Documents
//!
//! JSON loading and the [`ExampleDocument`] view over a parsed example.
//! Sections are addressed by key at runtime; no fixed struct layout is
//! assumed beyond "the root is an object".

use std::io::ErrorKind;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::LoadError;

/// Read and parse a JSON file.
///
/// # Errors
///
/// - [`LoadError::NotFound`] if the file does not exist.
/// - [`LoadError::Malformed`] if the content is not valid JSON.
/// - [`LoadError::Io`] for any other read failure.
pub fn load_json_file(path: &Path) -> Result<Value, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    serde_json::from_str(&content).map_err(|e| LoadError::Malformed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// A parsed example: a JSON object whose top-level keys are section names.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleDocument {
    root: Map<String, Value>,
}

impl ExampleDocument {
    /// Wrap a parsed value. Returns `None` unless the root is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(root) => Some(Self { root }),
            _ => None,
        }
    }

    /// Load an example from disk.
    ///
    /// # Errors
    ///
    /// Everything [`load_json_file`] returns, plus [`LoadError::NotAnObject`]
    /// when the root value is an array, string, number, bool or null.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let value = load_json_file(path)?;
        let found = json_type_name(&value);
        Self::from_value(value).ok_or_else(|| LoadError::NotAnObject {
            path: path.to_path_buf(),
            found,
        })
    }

    /// Whether the document has a top-level key named `section`.
    pub fn has_section(&self, section: &str) -> bool {
        self.root.contains_key(section)
    }

    /// Raw value of a top-level section.
    pub fn section(&self, section: &str) -> Option<&Value> {
        self.root.get(section)
    }

    /// Top-level keys in document order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    /// The document as a JSON value, for handing to a schema validator.
    pub fn as_value(&self) -> Value {
        Value::Object(self.root.clone())
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
