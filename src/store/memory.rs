//! In-memory triple store.
//!
//! This is the reference implementation of `TripleStore` and the store every
//! locally-loaded vocabulary ends up in. Simple index maps protected by
//! RwLock; duplicate statements are suppressed so the store behaves as a
//! graph (a set of triples), not a log.

use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::model::{Term, Triple, TriplePattern, Uri};
use super::TripleStore;

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory triple store with subject and predicate indexes. Cloning
/// produces another handle to the same store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    triples: RwLock<Vec<Triple>>,
    /// subject term → triple positions
    by_subject: RwLock<HashMap<Term, Vec<usize>>>,
    /// predicate IRI → triple positions
    by_predicate: RwLock<HashMap<Uri, Vec<usize>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_triples(triples: impl IntoIterator<Item = Triple>) -> Self {
        let store = Self::new();
        for triple in triples {
            store.insert(triple);
        }
        store
    }

    /// Insert one statement; exact duplicates are ignored.
    pub fn insert(&self, triple: Triple) {
        let mut triples = self.inner.triples.write();
        let mut by_subject = self.inner.by_subject.write();
        let mut by_predicate = self.inner.by_predicate.write();

        if let Some(positions) = by_subject.get(&triple.subject) {
            if positions.iter().any(|&i| triples[i] == triple) {
                return;
            }
        }

        let position = triples.len();
        by_subject.entry(triple.subject.clone()).or_default().push(position);
        by_predicate.entry(triple.predicate.clone()).or_default().push(position);
        triples.push(triple);
    }

    /// Convenience for building graphs in code: subject and predicate as
    /// IRI strings, object as any term.
    pub fn insert_spo(&self, subject: &str, predicate: &str, object: Term) {
        self.insert(Triple::new(Term::uri(subject), Uri::new(predicate), object));
    }
}

impl TripleStore for MemoryStore {
    fn triples_matching(&self, pattern: &TriplePattern) -> Vec<Triple> {
        let triples = self.inner.triples.read();

        let candidates: Vec<usize> = if let Some(subject) = &pattern.subject {
            self.inner.by_subject.read().get(subject).cloned().unwrap_or_default()
        } else if let Some(predicates) = &pattern.predicates {
            // predicate-major order: callers iterating alternatives see
            // matches grouped by predicate, each group in insertion order
            let by_predicate = self.inner.by_predicate.read();
            let mut out = Vec::new();
            for predicate in predicates {
                if let Some(positions) = by_predicate.get(predicate) {
                    out.extend_from_slice(positions);
                }
            }
            out
        } else {
            (0..triples.len()).collect()
        };

        candidates
            .into_iter()
            .map(|i| &triples[i])
            .filter(|t| pattern.matches(t))
            .cloned()
            .collect()
    }

    fn len(&self) -> usize {
        self.inner.triples.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert_spo("http://x/cat", "http://s#prefLabel", Term::lang_literal("Cat", "en"));
        store.insert_spo("http://x/cat", "http://s#prefLabel", Term::lang_literal("Chat", "fr"));
        store.insert_spo("http://x/cat", "http://s#broader", Term::uri("http://x/mammal"));
        store.insert_spo("http://x/dog", "http://s#prefLabel", Term::lang_literal("Dog", "en"));
        store
    }

    #[test]
    fn test_len_and_wildcard() {
        let store = sample_store();
        assert_eq!(store.len(), 4);
        assert_eq!(store.triples_matching(&TriplePattern::any()).len(), 4);
        assert!(!store.is_empty());
        assert!(MemoryStore::new().is_empty());
    }

    #[test]
    fn test_duplicate_insert_ignored() {
        let store = sample_store();
        store.insert_spo("http://x/cat", "http://s#prefLabel", Term::lang_literal("Cat", "en"));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_subject_lookup() {
        let store = sample_store();
        let pattern = TriplePattern::any().with_subject(Term::uri("http://x/cat"));
        assert_eq!(store.triples_matching(&pattern).len(), 3);
    }

    #[test]
    fn test_predicate_lookup_with_object_constraint() {
        let store = sample_store();
        let pattern = TriplePattern::any()
            .with_predicate("http://s#prefLabel")
            .with_object(Term::lang_literal("Dog", "en"));
        let matched = store.triples_matching(&pattern);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].subject, Term::uri("http://x/dog"));
    }

    #[test]
    fn test_shared_handle_sees_inserts() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.insert_spo("http://x/a", "http://s#p", Term::literal("v"));
        assert_eq!(handle.len(), 1);
    }
}
