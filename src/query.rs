//! Query construction for both backends.
//!
//! One logical request — "subject S relates to object O under any of these
//! predicates" — becomes either SPARQL SELECT text (remote) or a
//! [`TriplePattern`](crate::model::TriplePattern) plus post-hoc filtering
//! (local). Both renderings live here so their semantics cannot drift apart:
//! the local matching functions implement exactly what the generated
//! `FILTER` clauses ask the endpoint to do.
//!
//! SPARQL semantics mirrored by the local path:
//! - `STR(?o)` yields the lexical form of URIs and literals alike.
//! - `lang(?o)` on an untagged literal is `""`; on a non-literal it is a
//!   type error, so any language filter excludes URIs and blank nodes.
//! - `regex(..., "i")` is case-insensitive over the lexical form.

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::model::{Term, Uri};

/// Binding name for forward-query objects.
pub(crate) const VALUE_VAR: &str = "value";
/// Binding name for reverse-query subjects.
pub(crate) const SUBJECT_VAR: &str = "subject";
/// Binding name for concept-listing subjects.
pub(crate) const CONCEPT_VAR: &str = "concept";

// ============================================================================
// Object targets for reverse queries
// ============================================================================

/// What the object position must satisfy in a reverse query.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectMatch {
    /// Object is exactly this URI.
    Uri(Uri),
    /// Object's string form equals `value` (pre-trimmed, case-sensitive);
    /// with `lang`, the object must be a literal tagged exactly `lang`.
    Value { value: String, lang: Option<String> },
    /// Object's string form matches `pattern` case-insensitively; with
    /// `lang`, the object must be a literal tagged exactly `lang`.
    Pattern { pattern: String, lang: Option<String> },
}

// ============================================================================
// SPARQL text generation
// ============================================================================

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Filters rendered inside one UNION branch, in regex → exact → lang order.
fn render_filters(object: &ObjectMatch, var: &str) -> String {
    let mut out = String::new();
    let lang = match object {
        ObjectMatch::Uri(_) => &None,
        ObjectMatch::Value { value, lang } => {
            out.push_str(&format!(" FILTER (STR(?{var}) = \"{}\")", escape(value)));
            lang
        }
        ObjectMatch::Pattern { pattern, lang } => {
            out.push_str(&format!(" FILTER regex(STR(?{var}), \"{}\", \"i\")", escape(pattern)));
            lang
        }
    };
    if let Some(code) = lang {
        out.push_str(&format!(" FILTER (lang(?{var}) = \"{}\")", escape(code)));
    }
    out
}

fn union(branches: impl Iterator<Item = String>) -> String {
    branches.collect::<Vec<_>>().join(" UNION ")
}

/// `SELECT DISTINCT ?value` — objects of `subject` under any predicate.
pub(crate) fn forward_query(subject: &Uri, predicates: &[Uri]) -> String {
    let body = union(
        predicates
            .iter()
            .map(|p| format!("{{ <{subject}> <{p}> ?{VALUE_VAR} }}")),
    );
    format!("SELECT DISTINCT ?{VALUE_VAR} WHERE {{ {body} }}")
}

/// `SELECT DISTINCT ?subject` — subjects whose object satisfies the target
/// under any predicate. Filters repeat inside every branch so each
/// alternative is constrained independently.
pub(crate) fn reverse_query(predicates: &[Uri], object: &ObjectMatch) -> String {
    let body = union(predicates.iter().map(|p| match object {
        ObjectMatch::Uri(uri) => format!("{{ ?{SUBJECT_VAR} <{p}> <{uri}> }}"),
        _ => {
            let filters = render_filters(object, VALUE_VAR);
            format!("{{ ?{SUBJECT_VAR} <{p}> ?{VALUE_VAR}{filters} }}")
        }
    }));
    format!("SELECT DISTINCT ?{SUBJECT_VAR} WHERE {{ {body} }}")
}

/// `SELECT DISTINCT ?concept` — subjects typed with any of the concept
/// classes. Alternation runs over the object position here.
pub(crate) fn instances_query(type_predicate: &Uri, classes: &[Uri]) -> String {
    let body = union(
        classes
            .iter()
            .map(|class| format!("{{ ?{CONCEPT_VAR} <{type_predicate}> <{class}> }}")),
    );
    format!("SELECT DISTINCT ?{CONCEPT_VAR} WHERE {{ {body} }}")
}

/// `SELECT DISTINCT ?p ?o` — every predicate/object pair of one subject.
pub(crate) fn describe_query(subject: &Uri) -> String {
    format!("SELECT DISTINCT ?p ?o WHERE {{ <{subject}> ?p ?o }}")
}

// ============================================================================
// Local matching (post-hoc filters for the pattern path)
// ============================================================================

/// Compile the case-insensitive pattern; `None` (with a warning) on a bad
/// pattern, which the caller treats as an empty result.
pub(crate) fn compile_pattern(pattern: &str) -> Option<Regex> {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(pattern, error = %e, "invalid search pattern, returning no matches");
            None
        }
    }
}

/// `lang(?o) = code` — literals only, exact tag comparison, untagged = `""`.
fn lang_matches(term: &Term, lang: Option<&str>) -> bool {
    match lang {
        None => true,
        Some(code) => term.as_literal().is_some_and(|l| l.lang_or_empty() == code),
    }
}

/// Local equivalent of the exact-value filters: `STR(?o) = value` plus the
/// optional language filter.
pub(crate) fn value_matches(term: &Term, value: &str, lang: Option<&str>) -> bool {
    lang_matches(term, lang) && term.lexical_form() == value
}

/// Local equivalent of the pattern filters: `regex(STR(?o), pat, "i")` plus
/// the optional language filter.
pub(crate) fn pattern_matches(term: &Term, re: &Regex, lang: Option<&str>) -> bool {
    lang_matches(term, lang) && re.is_match(term.lexical_form())
}
