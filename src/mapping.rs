//! Namespace table, short-form expansion, and the field → predicate map.
//!
//! Configuration declares mappings in short forms (`gndo.label`,
//! `skos:prefLabel`); this module expands them to full IRIs and builds the
//! per-instance [`FieldMap`]. Everything here is constructed once at load
//! time and read-only afterwards.

use std::fmt;

use hashbrown::HashMap;
use smallvec::smallvec;
use tracing::warn;

use crate::config::MappingConfig;
use crate::model::{PredicateList, Uri};
use crate::schema::SkosField;
use crate::vocab;

/// Field-map key for the synthetic concept-class entry.
pub const TYPE_MARKER: &str = "Concept";

// ============================================================================
// Namespace table
// ============================================================================

/// Prefix → base IRI. Seeded with the standard prefixes, extended (or
/// overridden) by configuration. Lookups are case-sensitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Namespaces {
    map: HashMap<String, String>,
}

impl Namespaces {
    /// The standard prefix set: skos, rdf, rdfs, owl, dc, dcterms, xsd.
    pub fn standard() -> Self {
        let mut map = HashMap::new();
        map.insert("skos".to_string(), vocab::namespaces::SKOS.to_string());
        map.insert("rdf".to_string(), vocab::namespaces::RDF.to_string());
        map.insert("rdfs".to_string(), vocab::namespaces::RDFS.to_string());
        map.insert("owl".to_string(), vocab::namespaces::OWL.to_string());
        map.insert("dc".to_string(), vocab::namespaces::DC.to_string());
        map.insert("dcterms".to_string(), vocab::namespaces::DCTERMS.to_string());
        map.insert("xsd".to_string(), vocab::namespaces::XSD.to_string());
        Namespaces { map }
    }

    /// Standard table plus configured entries (configured wins on clash).
    pub fn with_config(config: &MappingConfig) -> Self {
        let mut ns = Namespaces::standard();
        for (prefix, base) in &config.namespaces {
            ns.map.insert(prefix.clone(), base.clone());
        }
        ns
    }

    pub fn insert(&mut self, prefix: impl Into<String>, base: impl Into<String>) {
        self.map.insert(prefix.into(), base.into());
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.map.get(prefix).map(String::as_str)
    }

    /// Expand a short-form identifier to a full IRI. Precedence, first
    /// match wins (input is trimmed first):
    ///
    /// 1. contains a scheme separator → unchanged
    /// 2. the token `none` (any case) → explicit null
    /// 3. the token `type` → `rdf:type`
    /// 4. the token `Concept` → `skos:Concept`
    /// 5. `prefix.local` (no colon) → rewritten to `prefix:local`
    /// 6. bare name, no prefix → SKOS namespace + name
    /// 7. `prefix:local` → table lookup; unknown prefix → `None`
    ///
    /// `None` means "unresolved"; callers report it as a warning and treat
    /// the mapping as absent.
    pub fn expand(&self, name: &str) -> Option<Uri> {
        let name = name.trim();
        if name.contains("://") {
            return Some(Uri::new(name));
        }
        if name.eq_ignore_ascii_case("none") {
            return None;
        }
        if name == "type" {
            return Some(Uri::new(vocab::rdf::TYPE));
        }
        if name == TYPE_MARKER {
            return Some(Uri::new(vocab::skos::CONCEPT));
        }

        let rewritten;
        let name = if !name.contains(':') && name.contains('.') {
            let (prefix, local) = name.split_once('.').unwrap_or((name, ""));
            rewritten = format!("{prefix}:{local}");
            rewritten.as_str()
        } else {
            name
        };

        match name.split_once(':') {
            None => Some(Uri::new(format!("{}{}", vocab::namespaces::SKOS, name))),
            Some((prefix, local)) => {
                self.get(prefix).map(|base| Uri::new(format!("{base}{local}")))
            }
        }
    }
}

impl Default for Namespaces {
    fn default() -> Self {
        Namespaces::standard()
    }
}

// ============================================================================
// Field map
// ============================================================================

/// Field name → ordered, deduplicated predicate IRIs. Built once per
/// vocabulary instance; every registry field has an entry and the type-marker
/// entry always exists.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMap {
    entries: HashMap<String, PredicateList>,
}

impl FieldMap {
    /// Build the map from configuration overrides plus schema defaults.
    ///
    /// Declarations walk in order: literal fields, relation fields, then
    /// concept-type declarations (those whose target is the concept class).
    /// The field key is the text after the last `:` of the declared target.
    /// Unexpandable sources and unknown target fields are skipped with a
    /// warning — bad declarations degrade, they never fail construction.
    pub fn build(config: &MappingConfig, namespaces: &Namespaces) -> FieldMap {
        let mut entries: HashMap<String, PredicateList> = HashMap::new();

        let concept_declarations = config
            .concept_fields
            .iter()
            .filter(|(_, target)| target.eq_ignore_ascii_case("skos:concept"))
            .map(|(source, _)| (source.as_str(), "skos:Concept"));
        let declarations = config
            .literal_fields
            .iter()
            .chain(&config.relation_fields)
            .map(|(source, target)| (source.as_str(), target.as_str()))
            .chain(concept_declarations);

        for (source, target) in declarations {
            let key = target.rsplit(':').next().unwrap_or(target);
            if key != TYPE_MARKER && SkosField::parse(key).is_none() {
                warn!(target, "mapping target is not a known field, declaration skipped");
                continue;
            }
            let Some(predicate) = namespaces.expand(source) else {
                warn!(source, target, "cannot expand mapping source, declaration skipped");
                continue;
            };
            let list = entries.entry(key.to_string()).or_default();
            if !list.contains(&predicate) {
                list.push(predicate);
            }
        }

        // Registry fields without overrides default to the SKOS namespace.
        for field in SkosField::ALL {
            if !entries.contains_key(field.name()) {
                if let Some(predicate) = namespaces.expand(&format!("skos:{}", field.name())) {
                    entries.insert(field.name().to_string(), smallvec![predicate]);
                }
            }
        }

        entries
            .entry(TYPE_MARKER.to_string())
            .or_insert_with(|| smallvec![Uri::new(vocab::skos::CONCEPT)]);

        FieldMap { entries }
    }

    /// Predicates mapped to a registry field. Warns when the list is empty;
    /// the query then returns nothing, which is not an error.
    pub fn predicates(&self, field: SkosField) -> &[Uri] {
        self.predicates_by_name(field.name())
    }

    pub fn predicates_by_name(&self, name: &str) -> &[Uri] {
        let list = self.entries.get(name).map(|l| l.as_slice()).unwrap_or(&[]);
        if list.is_empty() {
            warn!(field = name, "field has no mapped predicates, query will be empty");
        }
        list
    }

    /// The concept-class IRIs from the type-marker entry.
    pub fn concept_classes(&self) -> &[Uri] {
        self.predicates_by_name(TYPE_MARKER)
    }

    /// Whether any entry (type marker included) claims this predicate.
    /// Unclaimed predicates pass through whole-concept normalization verbatim.
    pub fn claims(&self, predicate: &Uri) -> bool {
        self.entries.values().any(|list| list.contains(predicate))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Uri])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for FieldMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        for name in names {
            writeln!(f, "{name}: {:?}", self.entries[name])?;
        }
        Ok(())
    }
}
