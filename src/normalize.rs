//! Result normalization: raw graph nodes → predictable per-field values.
//!
//! Backends hand over heterogeneous nodes — language-tagged literals,
//! untagged literals, datatyped notations, URIs where literals were
//! expected. This module reduces them according to the field's kind,
//! multiplicity, and the target language. Values are computed fresh per
//! call; nothing is cached, because every call may use a different language.
//!
//! Selection rules:
//! - URI fields keep URI nodes only, deduplicated, always as a list.
//! - Multivalued literal fields accept untagged literals and exact language
//!   matches (notation also accepts undatatyped or Dewey-typed literals
//!   regardless of language); everything else is silently dropped.
//! - Single-valued literal fields return the first exact language match
//!   immediately, fall back to the first literal seen otherwise, and
//!   short-circuit to a URI's string form when the data is mixed-typed.

use std::collections::HashMap;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::backend::RawConceptMap;
use crate::mapping::FieldMap;
use crate::model::{Literal, Term, Uri};
use crate::schema::{FieldKind, SkosField};
use crate::vocab;

/// Normalized view of one concept: canonical field name (or passthrough
/// predicate IRI) → values. Single-valued results are carried as
/// one-element lists.
pub type ConceptMap = HashMap<String, Vec<String>>;

// ============================================================================
// FieldValue
// ============================================================================

/// Outcome of resolving one field: nothing, one value, or a deduplicated
/// list, depending on the field's multiplicity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    Absent,
    One(String),
    Many(Vec<String>),
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// First value, if any. `Many` lists put the canonical value first.
    pub fn into_first(self) -> Option<String> {
        match self {
            FieldValue::Absent => None,
            FieldValue::One(v) => Some(v),
            FieldValue::Many(vs) => vs.into_iter().next(),
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            FieldValue::Absent => Vec::new(),
            FieldValue::One(v) => vec![v],
            FieldValue::Many(vs) => vs,
        }
    }
}

// ============================================================================
// Per-field node selection
// ============================================================================

/// Whether a literal qualifies for a multivalued literal field.
fn literal_accepted(lit: &Literal, field: SkosField, target_lang: &str) -> bool {
    if field == SkosField::Notation {
        match &lit.datatype {
            None => return true,
            Some(dt) if dt.as_str() == vocab::notation::DEWEY => return true,
            Some(_) => {}
        }
    }
    match lit.language.as_deref() {
        None | Some("") => true,
        Some(code) => code == target_lang,
    }
}

/// Reduce raw nodes to the field's normalized value.
pub(crate) fn field_values(nodes: &[Term], field: SkosField, target_lang: &str) -> FieldValue {
    if nodes.is_empty() {
        return FieldValue::Absent;
    }
    let info = field.info();

    if info.kind == FieldKind::Uri {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for node in nodes {
            if let Term::Uri(uri) = node {
                if seen.insert(uri.clone()) {
                    out.push(uri.to_string());
                }
            }
        }
        return if out.is_empty() { FieldValue::Absent } else { FieldValue::Many(out) };
    }

    if info.multivalued {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for node in nodes {
            let Term::Literal(lit) = node else { continue };
            if !literal_accepted(lit, field, target_lang) {
                continue;
            }
            let value = lit.value.trim();
            if seen.insert(value.to_string()) {
                out.push(value.to_string());
            }
        }
        return if out.is_empty() { FieldValue::Absent } else { FieldValue::Many(out) };
    }

    // Single-valued: exact language wins immediately; any literal is a
    // fallback candidate; a URI short-circuits (mixed-typed source data).
    let mut fallback: Option<String> = None;
    for node in nodes {
        match node {
            Term::Uri(uri) => return FieldValue::One(uri.to_string()),
            Term::Literal(lit) => {
                if lit.language.as_deref().is_some_and(|c| !c.is_empty() && c == target_lang) {
                    return FieldValue::One(lit.value.trim().to_string());
                }
                if fallback.is_none() {
                    fallback = Some(lit.value.trim().to_string());
                }
            }
            Term::Blank(_) => {}
        }
    }
    fallback.map(FieldValue::One).unwrap_or(FieldValue::Absent)
}

// ============================================================================
// Whole-concept normalization
// ============================================================================

/// Normalize a raw predicate → nodes map into field-keyed values.
///
/// Registry fields gather nodes across all of their mapped predicates in
/// predicate order; non-empty results land under the canonical field name.
/// Predicates claimed by no field-map entry pass through verbatim — raw IRI
/// as key, lexical forms as values — so nothing the graph holds is lost.
pub(crate) fn concept_fields(
    raw: &RawConceptMap,
    field_map: &FieldMap,
    target_lang: &str,
) -> ConceptMap {
    let mut out = ConceptMap::new();

    for field in SkosField::ALL {
        let mut nodes: Vec<Term> = Vec::new();
        for predicate in field_map.predicates(field) {
            if let Some(found) = raw.get(predicate.as_str()) {
                nodes.extend_from_slice(found);
            }
        }
        if nodes.is_empty() {
            continue;
        }
        match field_values(&nodes, field, target_lang) {
            FieldValue::Absent => {}
            FieldValue::One(v) => {
                out.insert(field.name().to_string(), vec![v]);
            }
            FieldValue::Many(vs) => {
                out.insert(field.name().to_string(), vs);
            }
        }
    }

    for (predicate, nodes) in raw {
        if !field_map.claims(&Uri::new(predicate)) {
            out.insert(
                predicate.clone(),
                nodes.iter().map(|n| n.lexical_form().to_string()).collect(),
            );
        }
    }

    out
}
