//! RDF term types: URIs, blank nodes, and literals.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ============================================================================
// Uri
// ============================================================================

/// A full URI reference (IRI). Cheap to clone — predicate lists and query
/// patterns share the underlying allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Uri(Arc<str>);

impl Uri {
    pub fn new(iri: impl AsRef<str>) -> Self {
        Uri(Arc::from(iri.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Uri {
    fn from(s: String) -> Self { Uri(Arc::from(s.as_str())) }
}
impl From<&str> for Uri {
    fn from(s: &str) -> Self { Uri(Arc::from(s)) }
}
impl From<Uri> for String {
    fn from(u: Uri) -> Self { u.0.to_string() }
}

impl PartialEq<str> for Uri {
    fn eq(&self, other: &str) -> bool { self.as_str() == other }
}
impl PartialEq<&str> for Uri {
    fn eq(&self, other: &&str) -> bool { self.as_str() == *other }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Literal
// ============================================================================

/// A literal value with optional language tag and optional datatype URI.
///
/// RDF 1.1 treats language tag and datatype as mutually exclusive, but source
/// vocabularies are not always that disciplined, so both are carried
/// independently here and interpreted by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub value: String,
    pub language: Option<String>,
    pub datatype: Option<Uri>,
}

impl Literal {
    pub fn plain(value: impl Into<String>) -> Self {
        Literal { value: value.into(), language: None, datatype: None }
    }

    pub fn tagged(value: impl Into<String>, lang: impl Into<String>) -> Self {
        Literal { value: value.into(), language: Some(lang.into()), datatype: None }
    }

    pub fn typed(value: impl Into<String>, datatype: impl Into<Uri>) -> Self {
        Literal { value: value.into(), language: None, datatype: Some(datatype.into()) }
    }

    /// Language tag as SPARQL's `lang()` sees it: `""` when untagged.
    pub fn lang_or_empty(&self) -> &str {
        self.language.as_deref().unwrap_or("")
    }
}

// ============================================================================
// Term
// ============================================================================

/// One graph node as produced by either backend: URI reference, blank node,
/// or literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Term {
    Uri(Uri),
    Blank(String),
    Literal(Literal),
}

impl Term {
    pub fn uri(iri: impl AsRef<str>) -> Self {
        Term::Uri(Uri::new(iri))
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Term::Blank(label.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal(Literal::plain(value))
    }

    pub fn lang_literal(value: impl Into<String>, lang: impl Into<String>) -> Self {
        Term::Literal(Literal::tagged(value, lang))
    }

    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<Uri>) -> Self {
        Term::Literal(Literal::typed(value, datatype))
    }

    pub fn is_uri(&self) -> bool { matches!(self, Term::Uri(_)) }
    pub fn is_literal(&self) -> bool { matches!(self, Term::Literal(_)) }
    pub fn is_blank(&self) -> bool { matches!(self, Term::Blank(_)) }

    pub fn as_uri(&self) -> Option<&Uri> {
        match self {
            Term::Uri(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(l) => Some(l),
            _ => None,
        }
    }

    /// The bare string form: IRI text, blank label, or literal value.
    /// This is what SPARQL's `STR()` yields for URIs and literals.
    pub fn lexical_form(&self) -> &str {
        match self {
            Term::Uri(u) => u.as_str(),
            Term::Blank(label) => label,
            Term::Literal(l) => &l.value,
        }
    }
}

impl From<Uri> for Term {
    fn from(u: Uri) -> Self { Term::Uri(u) }
}
impl From<Literal> for Term {
    fn from(l: Literal) -> Self { Term::Literal(l) }
}

// ============================================================================
// Display (N-Triples style)
// ============================================================================

fn escape_literal(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Uri(u) => write!(f, "<{u}>"),
            Term::Blank(label) => write!(f, "_:{label}"),
            Term::Literal(l) => {
                write!(f, "\"{}\"", escape_literal(&l.value))?;
                if let Some(lang) = &l.language {
                    write!(f, "@{lang}")?;
                } else if let Some(dt) = &l.datatype {
                    write!(f, "^^<{dt}>")?;
                }
                Ok(())
            }
        }
    }
}
