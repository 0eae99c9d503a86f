//! Vocabulary loading: source detection, cache lifecycle, graph ingestion.
//!
//! A vocabulary reference is either a SPARQL endpoint URL or a local file.
//! File sources go through a normalize-once-then-cache pipeline: the first
//! load reads the raw dump, rewrites it into plain SKOS shape, and writes
//! the result next to the source as `<stem>.skos.ttl`. Later loads hit the
//! cache and skip normalization entirely. A source that already carries the
//! cache suffix is treated as pre-normalized.
//!
//! Parsing and serialization stay behind [`GraphCodec`], and the dump
//! rewrite behind [`GraphNormalizer`]; both are caller-supplied. Load
//! failures never abort construction: the resolver comes up with an absent
//! graph and answers queries with empty results.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::warn;

use crate::backend::LocalBackend;
use crate::config::MappingConfig;
use crate::model::Triple;
use crate::store::MemoryStore;
use crate::Result;

/// Filename suffix that marks an already-normalized vocabulary file.
pub const CACHE_SUFFIX: &str = ".skos.ttl";

// ============================================================================
// Source detection
// ============================================================================

/// Where a vocabulary lives: a local file or a remote SPARQL endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabularySource {
    File(PathBuf),
    Endpoint(String),
}

impl VocabularySource {
    /// Classify a source string. Anything starting with `http` is an
    /// endpoint URL; everything else is a filesystem path.
    pub fn detect(spec: &str) -> VocabularySource {
        if spec.starts_with("http") {
            VocabularySource::Endpoint(spec.to_string())
        } else {
            VocabularySource::File(PathBuf::from(spec))
        }
    }
}

/// Whether a path already points at a normalized cache file.
pub(crate) fn is_cache_file(path: &Path) -> bool {
    path.to_string_lossy().ends_with(CACHE_SUFFIX)
}

/// Cache location for a raw source: final extension swapped for `.skos.ttl`.
pub(crate) fn cache_path_for(source: &Path) -> PathBuf {
    source.with_extension("skos.ttl")
}

// ============================================================================
// Codec and normalizer seams
// ============================================================================

/// Reads and writes triple sets in whatever concrete RDF syntax the
/// vocabulary uses. Supplied by the caller; this crate does not bundle
/// format parsers.
pub trait GraphCodec: Send + Sync {
    fn read(&self, path: &Path) -> Result<Vec<Triple>>;
    fn write(&self, triples: &[Triple], path: &Path) -> Result<()>;
}

/// Rewrites a raw vocabulary dump into plain SKOS shape, typically by
/// materializing the mapping declarations as real `skos:` triples. Runs
/// once per source; the output is what gets cached.
pub trait GraphNormalizer: Send + Sync {
    fn normalize(&self, triples: Vec<Triple>, config: &MappingConfig) -> Result<Vec<Triple>>;
}

// ============================================================================
// GraphLoader
// ============================================================================

/// One-shot loader for file sources. Owns no state; borrows the codec,
/// normalizer, and mapping config for the duration of a single load.
pub(crate) struct GraphLoader<'a> {
    pub codec: &'a dyn GraphCodec,
    pub normalizer: Option<&'a dyn GraphNormalizer>,
    pub config: &'a MappingConfig,
}

impl GraphLoader<'_> {
    /// Load a vocabulary file into a local backend.
    ///
    /// Precedence: existing cache, then raw source. Every failure path
    /// degrades to an absent graph instead of erroring out.
    pub(crate) fn load(&self, source: &Path) -> LocalBackend {
        let cache = if is_cache_file(source) {
            source.to_path_buf()
        } else {
            cache_path_for(source)
        };

        if cache.exists() {
            match self.codec.read(&cache) {
                Ok(triples) => {
                    return LocalBackend::new(Arc::new(MemoryStore::from_triples(triples)));
                }
                Err(e) => {
                    warn!(
                        cache = %cache.display(),
                        error = %e,
                        "failed to read vocabulary cache"
                    );
                }
            }
        }

        if is_cache_file(source) || !source.exists() {
            warn!(
                source = %source.display(),
                "no raw vocabulary source to load, resolver starts with an absent graph"
            );
            return LocalBackend::absent();
        }

        let raw = match self.codec.read(source) {
            Ok(triples) => triples,
            Err(e) => {
                warn!(
                    source = %source.display(),
                    error = %e,
                    "failed to read vocabulary source, resolver starts with an absent graph"
                );
                return LocalBackend::absent();
            }
        };

        let Some(normalizer) = self.normalizer else {
            warn!(
                source = %source.display(),
                "raw vocabulary source without a normalizer, resolver starts with an absent graph"
            );
            return LocalBackend::absent();
        };

        let normalized = match normalizer.normalize(raw, self.config) {
            Ok(triples) => triples,
            Err(e) => {
                warn!(
                    source = %source.display(),
                    error = %e,
                    "vocabulary normalization failed, resolver starts with an absent graph"
                );
                return LocalBackend::absent();
            }
        };

        // Cache write failures are not fatal: the normalized graph is
        // already in memory, only the next startup pays again.
        if let Err(e) = self.codec.write(&normalized, &cache) {
            warn!(
                cache = %cache.display(),
                error = %e,
                "failed to write vocabulary cache"
            );
        }

        LocalBackend::new(Arc::new(MemoryStore::from_triples(normalized)))
    }
}
