//! Local execution path: wildcard pattern scans over a loaded triple store.
//!
//! Iterates the store once per alternative predicate so results stay grouped
//! by the predicate that matched. Filters that the remote path expresses as
//! SPARQL `FILTER` clauses are applied post-hoc here, through the shared
//! matching functions in [`crate::query`].

use std::sync::Arc;

use tracing::warn;

use crate::model::{Term, Triple, TriplePattern, Uri};
use crate::query::{self, ObjectMatch};
use crate::store::TripleStore;
use super::{BackendKind, QueryBackend, RawConceptMap};

/// Pattern-scan backend over an optional store. Construction with
/// [`LocalBackend::absent`] models a failed vocabulary load: the instance
/// stays usable and every query degrades to empty.
pub struct LocalBackend {
    store: Option<Arc<dyn TripleStore>>,
}

impl LocalBackend {
    pub fn new(store: Arc<dyn TripleStore>) -> Self {
        LocalBackend { store: Some(store) }
    }

    /// The degraded state: no graph was loaded.
    pub fn absent() -> Self {
        LocalBackend { store: None }
    }

    /// The store, if loaded and non-empty; warns otherwise.
    fn ready(&self) -> Option<&dyn TripleStore> {
        match &self.store {
            None => {
                warn!("local graph absent, query returns empty");
                None
            }
            Some(store) if store.is_empty() => {
                warn!("local graph is empty, query returns empty");
                None
            }
            Some(store) => Some(store.as_ref()),
        }
    }

    fn scan_per_predicate(
        store: &dyn TripleStore,
        subject: Option<&Uri>,
        predicates: &[Uri],
        object: Option<&Term>,
    ) -> impl Iterator<Item = Triple> {
        let mut matches = Vec::new();
        for predicate in predicates {
            let mut pattern = TriplePattern::any().with_predicate(predicate.clone());
            if let Some(s) = subject {
                pattern = pattern.with_subject(Term::Uri(s.clone()));
            }
            if let Some(o) = object {
                pattern = pattern.with_object(o.clone());
            }
            matches.extend(store.triples_matching(&pattern));
        }
        matches.into_iter()
    }
}

impl QueryBackend for LocalBackend {
    fn objects(&self, subject: &Uri, predicates: &[Uri]) -> Vec<Term> {
        let Some(store) = self.ready() else { return Vec::new() };
        Self::scan_per_predicate(store, Some(subject), predicates, None)
            .map(|t| t.object)
            .collect()
    }

    fn subjects(&self, predicates: &[Uri], target: &ObjectMatch) -> Vec<Term> {
        let Some(store) = self.ready() else { return Vec::new() };
        match target {
            ObjectMatch::Uri(object) => {
                let object = Term::Uri(object.clone());
                Self::scan_per_predicate(store, None, predicates, Some(&object))
                    .map(|t| t.subject)
                    .collect()
            }
            ObjectMatch::Value { value, lang } => {
                Self::scan_per_predicate(store, None, predicates, None)
                    .filter(|t| query::value_matches(&t.object, value, lang.as_deref()))
                    .map(|t| t.subject)
                    .collect()
            }
            ObjectMatch::Pattern { pattern, lang } => {
                let Some(re) = query::compile_pattern(pattern) else { return Vec::new() };
                Self::scan_per_predicate(store, None, predicates, None)
                    .filter(|t| query::pattern_matches(&t.object, &re, lang.as_deref()))
                    .map(|t| t.subject)
                    .collect()
            }
        }
    }

    fn describe(&self, subject: &Uri) -> RawConceptMap {
        let Some(store) = self.ready() else { return RawConceptMap::new() };
        let pattern = TriplePattern::any().with_subject(Term::Uri(subject.clone()));
        let mut map = RawConceptMap::new();
        for triple in store.triples_matching(&pattern) {
            map.entry(triple.predicate.to_string()).or_default().push(triple.object);
        }
        map
    }

    fn instances(&self, type_predicate: &Uri, classes: &[Uri]) -> Vec<Term> {
        let Some(store) = self.ready() else { return Vec::new() };
        let mut seen = hashbrown::HashSet::new();
        let mut out = Vec::new();
        for class in classes {
            let pattern = TriplePattern::any()
                .with_predicate(type_predicate.clone())
                .with_object(Term::Uri(class.clone()));
            for triple in store.triples_matching(&pattern) {
                if seen.insert(triple.subject.clone()) {
                    out.push(triple.subject);
                }
            }
        }
        out
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }
}
