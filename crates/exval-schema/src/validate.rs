//! # Example Validation
//!
//! Validates an example document against the schema of every mapped
//! section it contains.
//!
//! ## Semantics
//!
//! - For each section present in both the [`SectionMap`] and the document,
//!   the **whole document** is validated against that section's schema.
//!   Schemas are expected to constrain their own section and leave the rest
//!   open.
//! - Every section is checked; failures never short-circuit. Each failing
//!   section contributes exactly one message, headlined by its most
//!   relevant violation (see `best_match`).
//! - A schema that cannot be compiled (bad keyword value, dangling `$ref`)
//!   is reported as that section's "Unexpected error", not as a crash.
//!
//! ## Schema Resolution
//!
//! Schemas are read fresh from the schema directory for every example.
//! Relative `$ref`s between schema files (for example
//! `"defs/common.json#/definitions/entry"`) are served from files under the
//! same directory by a local retriever. No network access happens.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use jsonschema::error::ValidationErrorKind;
use jsonschema::{Retrieve, Uri, ValidationError, Validator};
use serde_json::Value;

use crate::document::{json_type_name, load_json_file, ExampleDocument};
use crate::error::{LoadError, SchemaLoadError};
use crate::sections::SectionMap;

/// Headline for an example that could not be parsed.
pub const PARSE_FAILED: &str = "Failed to parse JSON";

/// Headline for an example whose schemas could not be loaded.
pub const SCHEMA_LOAD_FAILED: &str = "Failed to load schema files";

/// Base URI the validator assigns to schemas without an `$id`.
const LOCAL_BASE_URI: &str = "json-schema:///";

/// Resolves `$ref` URIs to files under the schema directory.
///
/// Relative refs from a schema without `$id` arrive resolved against
/// `json-schema:///`; their whole path is joined onto the schema directory,
/// so `defs/common.json` maps to `<schema_dir>/defs/common.json`. Absolute
/// `http(s)` URIs (schemas identified by `$id`) map to their last path
/// segment. Anything that would leave the schema directory is refused.
struct SchemaDirRetriever {
    schema_dir: PathBuf,
}

impl SchemaDirRetriever {
    fn local_path(&self, uri: &str) -> Result<PathBuf, String> {
        let without_fragment = uri.split('#').next().unwrap_or(uri);

        let relative = if let Some(rest) = without_fragment.strip_prefix(LOCAL_BASE_URI) {
            rest
        } else if without_fragment.starts_with("https://")
            || without_fragment.starts_with("http://")
        {
            without_fragment.rsplit('/').next().unwrap_or_default()
        } else {
            return Err(format!("unsupported schema reference '{uri}'"));
        };

        let relative = Path::new(relative);
        let inside_schema_dir = !relative.as_os_str().is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !inside_schema_dir {
            return Err(format!(
                "cannot map '{uri}' to a file under the schema directory"
            ));
        }

        Ok(self.schema_dir.join(relative))
    }
}

impl Retrieve for SchemaDirRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let path = self.local_path(uri.as_str())?;
        tracing::trace!(uri = uri.as_str(), path = %path.display(), "retrieving referenced schema");
        Ok(load_schema_file(&path)?)
    }
}

/// Load a schema file, rejecting roots no draft accepts as a schema.
fn load_schema_file(path: &Path) -> Result<Value, LoadError> {
    let schema = load_json_file(path)?;
    match schema {
        Value::Object(_) | Value::Bool(_) => Ok(schema),
        other => Err(LoadError::InvalidSchemaRoot {
            path: path.to_path_buf(),
            found: json_type_name(&other),
        }),
    }
}

/// A single schema violation.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer to the violating value in the example.
    pub instance_path: String,
    /// Human-readable description from the validator.
    pub message: String,
    /// Raised by `anyOf`/`oneOf` rather than by a keyword on the value itself.
    pub weak: bool,
}

impl Violation {
    fn from_error(error: &ValidationError<'_>) -> Self {
        Self {
            instance_path: error.instance_path.to_string(),
            message: error.to_string(),
            weak: matches!(
                error.kind,
                ValidationErrorKind::AnyOf { .. }
                    | ValidationErrorKind::OneOfNotValid { .. }
                    | ValidationErrorKind::OneOfMultipleValid { .. }
            ),
        }
    }

    /// Number of segments in the instance path; 0 for the root.
    fn depth(&self) -> usize {
        self.instance_path.matches('/').count()
    }
}

/// The violation to headline a failing section with.
///
/// Shallowest instance path wins, then non-combinator errors, then
/// validator order.
fn best_match(violations: &[Violation]) -> Option<&Violation> {
    violations.iter().min_by_key(|v| (v.depth(), v.weak))
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} (at {})", self.message, self.instance_path)
        }
    }
}

/// A section whose schema was loaded for the current example.
#[derive(Debug, Clone)]
pub struct ResolvedSchema {
    /// Section key in the example.
    pub section: String,
    /// Schema filename from the section map.
    pub schema_file: String,
    /// Parsed schema document.
    pub schema: Value,
}

/// Outcome of validating one example file.
#[derive(Debug)]
pub enum ExampleVerdict {
    /// Every resolved section passed (or no mapped section was present).
    Valid,
    /// The example could not be read or parsed; nothing was validated.
    ParseFailed(LoadError),
    /// A required schema could not be loaded; no section was validated.
    SchemaLoadFailed(SchemaLoadError),
    /// One message per failing section, in section map order.
    Invalid(Vec<String>),
}

impl ExampleVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Report lines for this verdict. Empty when valid.
    ///
    /// Whole-file failures produce a headline followed by the detail;
    /// section failures produce one `Section '<name>': ...` line each.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Valid => Vec::new(),
            Self::ParseFailed(e) => vec![PARSE_FAILED.to_string(), e.to_string()],
            Self::SchemaLoadFailed(e) => vec![SCHEMA_LOAD_FAILED.to_string(), e.to_string()],
            Self::Invalid(errors) => errors.clone(),
        }
    }
}

/// Validates examples against the schemas named by a [`SectionMap`].
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    /// Directory holding the schema files named in the map.
    schema_dir: PathBuf,
    sections: SectionMap,
}

impl SchemaValidator {
    pub fn new(schema_dir: impl AsRef<Path>, sections: SectionMap) -> Self {
        Self {
            schema_dir: schema_dir.as_ref().to_path_buf(),
            sections,
        }
    }

    /// Validator using the built-in section map.
    pub fn with_default_sections(schema_dir: impl AsRef<Path>) -> Self {
        Self::new(schema_dir, SectionMap::default())
    }

    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Section map that decides which schemas an example needs.
    pub fn sections(&self) -> &SectionMap {
        &self.sections
    }

    /// Load the schema of every mapped section present in `doc`.
    ///
    /// Sections absent from the document are skipped. Document keys that
    /// the map does not know are ignored.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaLoadError`]; a partial set is never
    /// returned.
    pub fn resolve_schemas(
        &self,
        doc: &ExampleDocument,
    ) -> Result<Vec<ResolvedSchema>, SchemaLoadError> {
        let mut resolved = Vec::new();

        for entry in self.sections.entries() {
            if !doc.has_section(&entry.section) {
                continue;
            }

            let schema_path = self.schema_dir.join(&entry.schema);
            let schema = load_schema_file(&schema_path).map_err(|source| SchemaLoadError {
                section: entry.section.clone(),
                schema_file: entry.schema.clone(),
                source,
            })?;

            tracing::debug!(
                section = %entry.section,
                schema_file = %entry.schema,
                "resolved section schema"
            );

            resolved.push(ResolvedSchema {
                section: entry.section.clone(),
                schema_file: entry.schema.clone(),
                schema,
            });
        }

        Ok(resolved)
    }

    /// Compile a schema with sibling `$ref`s served from the schema directory.
    ///
    /// The draft follows the schema's `$schema` keyword, defaulting to
    /// 2020-12.
    fn build_validator(&self, schema: &Value) -> Result<Validator, String> {
        let mut opts = jsonschema::options();
        opts.with_retriever(SchemaDirRetriever {
            schema_dir: self.schema_dir.clone(),
        });
        opts.build(schema).map_err(|e| e.to_string())
    }

    /// Validate `doc` against each resolved schema.
    ///
    /// Returns one message per failing section, in the order of `resolved`.
    /// An empty result means the document is valid.
    pub fn validate_sections(
        &self,
        doc: &ExampleDocument,
        resolved: &[ResolvedSchema],
    ) -> Vec<String> {
        let instance = doc.as_value();
        let mut errors = Vec::new();

        for item in resolved {
            let validator = match self.build_validator(&item.schema) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(
                        section = %item.section,
                        schema_file = %item.schema_file,
                        error = %e,
                        "schema could not be compiled"
                    );
                    errors.push(format!(
                        "Section '{}': Unexpected error: {e}",
                        item.section
                    ));
                    continue;
                }
            };

            let violations: Vec<Violation> = validator
                .iter_errors(&instance)
                .map(|e| Violation::from_error(&e))
                .collect();

            if let Some(best) = best_match(&violations) {
                tracing::debug!(
                    section = %item.section,
                    violations = violations.len(),
                    "section failed validation"
                );
                let mut message = format!("Section '{}': {best}", item.section);
                if violations.len() > 1 {
                    message.push_str(&format!(" (+{} more)", violations.len() - 1));
                }
                errors.push(message);
            }
        }

        errors
    }

    /// Parse, resolve and validate a single example file.
    ///
    /// Never fails: every problem is folded into the returned verdict.
    pub fn validate_example(&self, path: &Path) -> ExampleVerdict {
        let doc = match ExampleDocument::load(path) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "example could not be parsed");
                return ExampleVerdict::ParseFailed(e);
            }
        };

        let resolved = match self.resolve_schemas(&doc) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "schema could not be loaded");
                return ExampleVerdict::SchemaLoadFailed(e);
            }
        };

        if resolved.is_empty() {
            tracing::info!(
                path = %path.display(),
                "no mapped sections present; nothing to validate"
            );
        }

        let errors = self.validate_sections(&doc, &resolved);
        if errors.is_empty() {
            ExampleVerdict::Valid
        } else {
            ExampleVerdict::Invalid(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
        path
    }

    /// Schema that requires `<section>.<field>` to be a string.
    fn section_schema(section: &str, field: &str) -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "properties": {
                section: {
                    "type": "object",
                    "required": [field],
                    "properties": { field: { "type": "string" } }
                }
            }
        })
    }

    fn doc(value: Value) -> ExampleDocument {
        ExampleDocument::from_value(value).unwrap()
    }

    #[test]
    fn resolve_skips_absent_and_unmapped_sections() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "generalSection.json", &section_schema("generalSection", "title"));
        // historySection.json deliberately absent: history is not in the doc.

        let validator = SchemaValidator::with_default_sections(dir.path());
        let resolved = validator
            .resolve_schemas(&doc(json!({
                "generalSection": {"title": "x"},
                "labNotes": {"anything": true}
            })))
            .unwrap();

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].section, "generalSection");
        assert_eq!(resolved[0].schema_file, "generalSection.json");
    }

    #[test]
    fn resolve_follows_map_order_not_document_order() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "historySection.json", &json!({}));
        write_json(dir.path(), "methodSpecific.json", &json!({}));
        write_json(dir.path(), "generalSection.json", &json!({}));

        let validator = SchemaValidator::with_default_sections(dir.path());
        let resolved = validator
            .resolve_schemas(&doc(json!({
                "history": [],
                "methodSpecific": {},
                "generalSection": {}
            })))
            .unwrap();

        let order: Vec<&str> = resolved.iter().map(|r| r.section.as_str()).collect();
        assert_eq!(order, ["generalSection", "methodSpecific", "history"]);
    }

    #[test]
    fn resolve_fails_when_required_schema_missing() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "generalSection.json", &json!({}));

        let validator = SchemaValidator::with_default_sections(dir.path());
        let err = validator
            .resolve_schemas(&doc(json!({"generalSection": {}, "customerSpecific": {}})))
            .unwrap_err();

        assert_eq!(err.section, "customerSpecific");
        assert_eq!(err.schema_file, "customerSection.json");
        assert!(matches!(err.source, LoadError::NotFound { .. }));
    }

    #[test]
    fn resolve_fails_on_malformed_schema() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("toolSpecific.json"), b"{ not json").unwrap();

        let validator = SchemaValidator::with_default_sections(dir.path());
        let err = validator
            .resolve_schemas(&doc(json!({"toolSpecific": {}})))
            .unwrap_err();
        assert!(matches!(err.source, LoadError::Malformed { .. }), "got: {err}");
    }

    #[test]
    fn no_recognised_sections_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let example = write_json(
            dir.path(),
            "free.json",
            &json!({"somethingElse": 42, "notes": ["a", "b"]}),
        );

        let validator = SchemaValidator::with_default_sections(dir.path().join("no-schemas"));
        let verdict = validator.validate_example(&example);
        assert!(verdict.is_valid(), "got: {verdict:?}");
        assert!(verdict.messages().is_empty());
    }

    #[test]
    fn one_message_per_failing_section() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "generalSection.json", &section_schema("generalSection", "title"));
        write_json(dir.path(), "methodSpecific.json", &section_schema("methodSpecific", "technique"));
        write_json(dir.path(), "dataEvaluation.json", &section_schema("dataEvaluation", "model"));

        let example = write_json(
            dir.path(),
            "example.json",
            &json!({
                "generalSection": {"title": 7},
                "methodSpecific": {"technique": "HPLC"},
                "dataEvaluation": {}
            }),
        );

        let verdict = SchemaValidator::with_default_sections(dir.path()).validate_example(&example);
        match verdict {
            ExampleVerdict::Invalid(errors) => {
                assert_eq!(errors.len(), 2, "errors: {errors:?}");
                assert!(errors[0].starts_with("Section 'generalSection': "));
                assert!(errors[0].contains("/generalSection/title"));
                assert!(errors[1].starts_with("Section 'dataEvaluation': "));
                assert!(errors[1].contains("model"));
            }
            other => panic!("expected Invalid, got: {other:?}"),
        }
    }

    #[test]
    fn multiple_violations_collapse_into_one_message() {
        let dir = tempfile::tempdir().unwrap();
        write_json(
            dir.path(),
            "toolSpecific.json",
            &json!({
                "properties": {
                    "toolSpecific": {
                        "type": "object",
                        "properties": {
                            "vendor": {"type": "string"},
                            "model": {"type": "string"},
                            "serial": {"type": "string"}
                        }
                    }
                }
            }),
        );
        let example = write_json(
            dir.path(),
            "tool.json",
            &json!({"toolSpecific": {"vendor": 1, "model": 2, "serial": 3}}),
        );

        let verdict = SchemaValidator::with_default_sections(dir.path()).validate_example(&example);
        let messages = verdict.messages();
        assert_eq!(messages.len(), 1, "messages: {messages:?}");
        assert!(messages[0].ends_with("(+2 more)"), "{}", messages[0]);
    }

    #[test]
    fn uncompilable_schema_is_unexpected_error() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "historySection.json", &json!({"type": 12}));
        write_json(dir.path(), "generalSection.json", &section_schema("generalSection", "title"));
        let example = write_json(
            dir.path(),
            "h.json",
            &json!({"generalSection": {}, "history": []}),
        );

        let verdict = SchemaValidator::with_default_sections(dir.path()).validate_example(&example);
        let messages = verdict.messages();
        assert_eq!(messages.len(), 2, "messages: {messages:?}");
        assert!(messages[0].starts_with("Section 'generalSection': "));
        assert!(
            messages[1].starts_with("Section 'history': Unexpected error: "),
            "{}",
            messages[1]
        );
    }

    #[test]
    fn sibling_ref_resolves_from_schema_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_json(
            dir.path(),
            "common.json",
            &json!({"definitions": {"isoDate": {"type": "string", "pattern": "^\\d{4}-\\d{2}-\\d{2}$"}}}),
        );
        write_json(
            dir.path(),
            "historySection.json",
            &json!({
                "properties": {
                    "history": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {"date": {"$ref": "common.json#/definitions/isoDate"}}
                        }
                    }
                }
            }),
        );

        let validator = SchemaValidator::with_default_sections(dir.path());
        let good = write_json(dir.path(), "good.json", &json!({"history": [{"date": "2024-05-01"}]}));
        let bad = write_json(dir.path(), "bad.json", &json!({"history": [{"date": "May 1st"}]}));

        assert!(validator.validate_example(&good).is_valid());
        let messages = validator.validate_example(&bad).messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("/history/0/date"), "{}", messages[0]);
    }

    #[test]
    fn dangling_ref_is_unexpected_error() {
        let dir = tempfile::tempdir().unwrap();
        write_json(
            dir.path(),
            "historySection.json",
            &json!({"properties": {"history": {"$ref": "missing.json"}}}),
        );
        let example = write_json(dir.path(), "e.json", &json!({"history": []}));

        let messages = SchemaValidator::with_default_sections(dir.path())
            .validate_example(&example)
            .messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Unexpected error"), "{}", messages[0]);
    }

    #[test]
    fn schema_load_failure_has_no_section_errors() {
        let dir = tempfile::tempdir().unwrap();
        let example = write_json(dir.path(), "e.json", &json!({"methodSpecific": {}}));

        let verdict = SchemaValidator::with_default_sections(dir.path()).validate_example(&example);
        assert!(matches!(verdict, ExampleVerdict::SchemaLoadFailed(_)));
        let messages = verdict.messages();
        assert_eq!(messages[0], SCHEMA_LOAD_FAILED);
        assert!(messages.iter().all(|m| !m.starts_with("Section '")));
    }

    #[test]
    fn malformed_example_is_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let example = dir.path().join("broken.json");
        std::fs::write(&example, b"{\"generalSection\": {,}").unwrap();

        let verdict = SchemaValidator::with_default_sections(dir.path()).validate_example(&example);
        assert!(matches!(verdict, ExampleVerdict::ParseFailed(LoadError::Malformed { .. })));
        let messages = verdict.messages();
        assert_eq!(messages[0], PARSE_FAILED);
        assert!(messages[1].contains("broken.json"));
    }

    #[test]
    fn custom_section_map() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "audit.json", &section_schema("audit", "by"));
        let map = SectionMap::new(vec![crate::SectionEntry {
            section: "audit".to_string(),
            schema: "audit.json".to_string(),
        }])
        .unwrap();
        let example = write_json(
            dir.path(),
            "e.json",
            // generalSection is not in the custom map, so its schema is never needed.
            &json!({"audit": {"by": 3}, "generalSection": {}}),
        );

        let validator = SchemaValidator::new(dir.path(), map);
        assert_eq!(validator.sections().schema_for("audit"), Some("audit.json"));
        assert_eq!(validator.sections().schema_for("generalSection"), None);

        let verdict = validator.validate_example(&example);
        let messages = verdict.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Section 'audit': "));
    }

    #[test]
    fn non_object_schema_root_is_schema_load_failure() {
        for (root, found) in [("null", "null"), ("[]", "array"), ("\"x\"", "string"), ("42", "number")] {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("generalSection.json"), root).unwrap();
            write_json(dir.path(), "historySection.json", &json!({}));
            let example = write_json(
                dir.path(),
                "e.json",
                &json!({"generalSection": {}, "history": []}),
            );

            let verdict =
                SchemaValidator::with_default_sections(dir.path()).validate_example(&example);
            match &verdict {
                ExampleVerdict::SchemaLoadFailed(e) => {
                    assert_eq!(e.section, "generalSection");
                    assert!(
                        matches!(e.source, LoadError::InvalidSchemaRoot { found: f, .. } if f == found),
                        "root {root}: got {e}"
                    );
                }
                other => panic!("root {root}: expected SchemaLoadFailed, got: {other:?}"),
            }
            let messages = verdict.messages();
            assert_eq!(messages[0], SCHEMA_LOAD_FAILED);
            assert!(messages.iter().all(|m| !m.starts_with("Section '")));
        }
    }

    #[test]
    fn boolean_schema_root_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("toolSpecific.json"), "true").unwrap();
        let example = write_json(dir.path(), "e.json", &json!({"toolSpecific": {"any": 1}}));

        let verdict = SchemaValidator::with_default_sections(dir.path()).validate_example(&example);
        assert!(verdict.is_valid(), "got: {verdict:?}");
    }

    #[test]
    fn nested_ref_uses_full_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("defs")).unwrap();
        write_json(&dir.path().join("defs"), "common.json", &json!({"type": "string"}));
        // Same file name at the root; must not be picked up.
        write_json(dir.path(), "common.json", &json!({"type": "integer"}));
        write_json(
            dir.path(),
            "historySection.json",
            &json!({
                "properties": {
                    "history": {"type": "array", "items": {"$ref": "defs/common.json"}}
                }
            }),
        );

        let validator = SchemaValidator::with_default_sections(dir.path());
        let good = write_json(dir.path(), "good.json", &json!({"history": ["a"]}));
        let bad = write_json(dir.path(), "bad.json", &json!({"history": [1]}));

        let verdict = validator.validate_example(&good);
        assert!(verdict.is_valid(), "got: {verdict:?}");
        let messages = validator.validate_example(&bad).messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("\"string\""), "{}", messages[0]);
    }

    #[test]
    fn ref_chain_resolves_relative_to_referring_file() {
        let dir = tempfile::tempdir().unwrap();
        let defs = dir.path().join("defs");
        std::fs::create_dir(&defs).unwrap();
        write_json(&defs, "entry.json", &json!({"$ref": "author.json"}));
        write_json(&defs, "author.json", &json!({"type": "object", "required": ["author"]}));
        write_json(
            dir.path(),
            "historySection.json",
            &json!({
                "properties": {
                    "history": {"type": "array", "items": {"$ref": "defs/entry.json"}}
                }
            }),
        );

        let validator = SchemaValidator::with_default_sections(dir.path());
        let ok = write_json(dir.path(), "ok.json", &json!({"history": [{"author": "qa"}]}));
        let missing = write_json(dir.path(), "missing.json", &json!({"history": [{}]}));

        assert!(validator.validate_example(&ok).is_valid());
        assert!(!validator.validate_example(&missing).is_valid());
    }

    #[test]
    fn retriever_maps_uris_inside_schema_dir() {
        let retriever = SchemaDirRetriever {
            schema_dir: PathBuf::from("/schemas"),
        };

        assert_eq!(
            retriever.local_path("json-schema:///defs/common.json#/definitions/x"),
            Ok(PathBuf::from("/schemas/defs/common.json"))
        );
        assert_eq!(
            retriever.local_path("https://example.org/v2/methodSpecific.json"),
            Ok(PathBuf::from("/schemas/methodSpecific.json"))
        );
        assert!(retriever.local_path("json-schema:///../secrets.json").is_err());
        assert!(retriever.local_path("json-schema:////etc/passwd").is_err());
        assert!(retriever.local_path("json-schema:///").is_err());
        assert!(retriever.local_path("file:///etc/passwd").is_err());
    }

    #[test]
    fn shallowest_violation_headlines_section() {
        let dir = tempfile::tempdir().unwrap();
        write_json(
            dir.path(),
            "generalSection.json",
            &json!({
                "properties": {
                    "generalSection": {
                        "type": "object",
                        "properties": {"title": {"type": "string"}}
                    }
                },
                "required": ["version"]
            }),
        );
        let example = write_json(
            dir.path(),
            "e.json",
            &json!({"generalSection": {"title": 7}}),
        );

        let messages = SchemaValidator::with_default_sections(dir.path())
            .validate_example(&example)
            .messages();
        assert_eq!(messages.len(), 1);
        assert!(
            messages[0].starts_with("Section 'generalSection': \"version\" is a required property"),
            "{}",
            messages[0]
        );
        assert!(messages[0].ends_with("(+1 more)"), "{}", messages[0]);
    }

    #[test]
    fn best_match_prefers_shallow_then_non_combinator() {
        let v = |path: &str, weak: bool, message: &str| Violation {
            instance_path: path.to_string(),
            message: message.to_string(),
            weak,
        };
        let violations = vec![
            v("/generalSection/title", false, "deep"),
            v("/generalSection", true, "combinator"),
            v("/generalSection", false, "direct"),
        ];
        assert_eq!(best_match(&violations).unwrap().message, "direct");
        assert!(best_match(&[]).is_none());
    }

    #[test]
    fn violation_display() {
        let root = Violation {
            instance_path: String::new(),
            message: "\"title\" is a required property".to_string(),
            weak: false,
        };
        assert_eq!(root.to_string(), "\"title\" is a required property");

        let nested = Violation {
            instance_path: "/generalSection/title".to_string(),
            message: "7 is not of type \"string\"".to_string(),
            weak: false,
        };
        assert!(nested.to_string().ends_with("(at /generalSection/title)"));
    }
}
