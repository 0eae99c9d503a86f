//! # skos-rs — SKOS Thesaurus Query Engine
//!
//! Unified field resolution over controlled vocabularies, whether the graph
//! lives in local memory or behind a remote SPARQL endpoint.
//!
//! ## Design Principles
//!
//! 1. **One schema, two backends**: the field registry and mapping layer
//!    drive both the in-memory pattern scan and the generated SPARQL, with
//!    identical observable semantics
//! 2. **Trait seams at the edges**: `TripleStore`, `SparqlClient`,
//!    `GraphCodec`, `GraphNormalizer` are the contracts; the core never
//!    opens sockets or parses RDF syntax
//! 3. **Degrade, don't die**: missing graphs, failed transports, and odd
//!    data shapes become warnings and empty results; only caller contract
//!    violations are errors
//! 4. **Normalize late**: backends return raw nodes; language fallback and
//!    multiplicity collapsing happen per call, per requested language
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use skos_rs::{MappingConfig, MemoryStore, SkosMapper, Term};
//!
//! # fn main() -> skos_rs::Result<()> {
//! let store = MemoryStore::new();
//! store.insert_spo(
//!     "http://zbw.eu/stw/descriptor/10042-5",
//!     "http://www.w3.org/2004/02/skos/core#prefLabel",
//!     Term::lang_literal("Labour economics", "en"),
//! );
//!
//! let mapper = SkosMapper::from_store(Arc::new(store), &MappingConfig::default(), "en");
//! let label = mapper.pref_label("http://zbw.eu/stw/descriptor/10042-5", None)?;
//! assert_eq!(label.as_deref(), Some("Labour economics"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Backends
//!
//! | Backend | Source | Description |
//! |---------|--------|-------------|
//! | Local | file path | In-memory triple scans over a loaded vocabulary |
//! | Remote | `http(s)` URL | Generated SPARQL through an injected client |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod vocab;
pub mod schema;
pub mod config;
pub mod mapping;
pub mod query;
pub mod store;
pub mod backend;
pub mod normalize;
pub mod loader;
pub mod mapper;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{Literal, PredicateList, Term, Triple, TriplePattern, Uri};

// ============================================================================
// Re-exports: Schema & Mapping
// ============================================================================

pub use config::MappingConfig;
pub use mapping::{FieldMap, Namespaces};
pub use schema::{FieldInfo, FieldKind, SkosField};

// ============================================================================
// Re-exports: Backends & Store
// ============================================================================

pub use backend::{
    BackendKind, Binding, ClientError, LocalBackend, QueryBackend, RawConceptMap, RemoteBackend,
    SparqlClient,
};
pub use query::ObjectMatch;
pub use store::{MemoryStore, TripleStore};

// ============================================================================
// Re-exports: Loading & Resolution
// ============================================================================

pub use loader::{CACHE_SUFFIX, GraphCodec, GraphNormalizer, VocabularySource};
pub use mapper::{Concept, FieldQuery, QueryTarget, SkosMapper, SkosMapperBuilder};
pub use normalize::{ConceptMap, FieldValue};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown SKOS field: {0}")]
    UnknownField(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("vocabulary load error: {0}")]
    Load(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
