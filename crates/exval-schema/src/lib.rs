//! # exval-schema — Section-Aware Example Validation
//!
//! Validates example JSON documents against the JSON Schema files that
//! govern their top-level sections.
//!
//! ## Flow
//!
//! 1. [`load_json_file`] parses an example, distinguishing a missing file
//!    from malformed JSON.
//! 2. [`SchemaValidator::resolve_schemas`] looks up, via the
//!    [`SectionMap`], the schema file for every mapped section present in
//!    the document and loads it from the schema directory.
//! 3. [`SchemaValidator::validate_example`] validates the whole document
//!    against each resolved schema and records one message per failing
//!    section.
//! 4. [`validate_batch`] runs the above over every `*.json` file of an
//!    examples directory and produces a [`BatchReport`].
//!
//! ## Crate Policy
//!
//! - Coverage is best-effort: sections missing from the document are not
//!   required, and document keys missing from the map are not checked.
//! - Nothing escapes the per-file boundary. Parse, schema-load and
//!   validator failures all degrade into an [`ExampleVerdict`].
//! - No `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod report;
pub mod sections;
pub mod validate;

pub use document::{load_json_file, ExampleDocument};
pub use error::{DiscoveryError, LoadError, SchemaLoadError, SectionMapError};
pub use report::{discover_examples, validate_batch, BatchReport, ExampleOutcome};
pub use sections::{SectionEntry, SectionMap, DEFAULT_SECTIONS};
pub use validate::{ExampleVerdict, ResolvedSchema, SchemaValidator};
