//! # Section-to-Schema Map
//!
//! The immutable table that decides which schema file governs which
//! top-level section of an example. Entry order is the validation order,
//! and therefore the order in which per-section errors are reported.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::SectionMapError;

/// Built-in mapping of section key to schema filename.
pub const DEFAULT_SECTIONS: &[(&str, &str)] = &[
    ("generalSection", "generalSection.json"),
    ("methodSpecific", "methodSpecific.json"),
    ("dataEvaluation", "dataEvaluation.json"),
    ("customerSpecific", "customerSection.json"),
    ("toolSpecific", "toolSpecific.json"),
    ("history", "historySection.json"),
];

/// One row of the section map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionEntry {
    /// Top-level key in the example document.
    pub section: String,
    /// Schema filename, relative to the schema directory.
    pub schema: String,
}

/// Ordered, validated section map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMap {
    entries: Vec<SectionEntry>,
}

impl SectionMap {
    /// Build a map from explicit entries.
    ///
    /// # Errors
    ///
    /// Rejects an empty list, blank names, and repeated section keys.
    pub fn new(entries: Vec<SectionEntry>) -> Result<Self, SectionMapError> {
        if entries.is_empty() {
            return Err(SectionMapError::Empty);
        }

        let mut seen = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            if entry.section.trim().is_empty() || entry.schema.trim().is_empty() {
                return Err(SectionMapError::BlankEntry { index });
            }
            if !seen.insert(entry.section.as_str()) {
                return Err(SectionMapError::DuplicateSection(entry.section.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// Schema filename for a section, if the section is mapped.
    pub fn schema_for(&self, section: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.section == section)
            .map(|e| e.schema.as_str())
    }

    /// Entries in validation order.
    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SectionMap {
    fn default() -> Self {
        Self {
            entries: DEFAULT_SECTIONS
                .iter()
                .map(|(section, schema)| SectionEntry {
                    section: (*section).to_string(),
                    schema: (*schema).to_string(),
                })
                .collect(),
        }
    }
}
