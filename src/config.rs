//! Mapping configuration: predicate overrides and namespace extensions.
//!
//! A configuration declares how a concrete vocabulary deviates from plain
//! SKOS — which foreign predicates feed which fields, which classes mark a
//! concept, and which extra namespace prefixes exist. Shipped as TOML (the
//! field arrays are top-level keys, so they come before the namespace table):
//!
//! ```toml
//! literal_fields = [
//!     ["gndo.preferredNameForTheSubjectHeading", "skos:prefLabel"],
//!     ["gndo.variantNameForTheSubjectHeading", "skos:altLabel"],
//! ]
//! relation_fields = [
//!     ["gndo.broaderTermGeneral", "skos:broader"],
//! ]
//! concept_fields = [
//!     ["gndo.SubjectHeading", "skos:Concept"],
//! ]
//!
//! [namespaces]
//! gndo = "https://d-nb.info/standards/elementset/gnd#"
//! ```
//!
//! Every declaration is a `(source short form, target short form)` pair;
//! short forms are expanded by the namespace resolver at field-map build time.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Declarative mapping from a source vocabulary onto the SKOS field set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Extra prefix → base-IRI entries, merged over the standard table.
    #[serde(default)]
    pub namespaces: HashMap<String, String>,
    /// `(source, target)` pairs for literal-valued fields.
    #[serde(default)]
    pub literal_fields: Vec<(String, String)>,
    /// `(source, target)` pairs for URI-valued relation fields.
    #[serde(default)]
    pub relation_fields: Vec<(String, String)>,
    /// `(source, target)` pairs whose target is the concept class; sources
    /// become additional type-marker classes.
    #[serde(default)]
    pub concept_fields: Vec<(String, String)>,
}

impl MappingConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(format!("invalid mapping config: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
            && self.literal_fields.is_empty()
            && self.relation_fields.is_empty()
            && self.concept_fields.is_empty()
    }
}
