//! Triples and the wildcard pattern descriptor used by the local backend.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::term::{Term, Uri};

/// Predicate alternatives for one field. Nearly every field maps to one or
/// two predicates, so spill to the heap only beyond that.
pub type PredicateList = SmallVec<[Uri; 2]>;

/// One statement in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Uri,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: Uri, object: Term) -> Self {
        Triple { subject, predicate, object }
    }
}

/// Wildcard triple pattern: `None` in a position matches anything, a predicate
/// list matches any of its entries (alternation).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriplePattern {
    pub subject: Option<Term>,
    pub predicates: Option<PredicateList>,
    pub object: Option<Term>,
}

impl TriplePattern {
    /// The fully-wildcard pattern (matches every triple).
    pub fn any() -> Self {
        TriplePattern::default()
    }

    pub fn with_subject(mut self, subject: impl Into<Term>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_predicate(mut self, predicate: impl Into<Uri>) -> Self {
        self.predicates.get_or_insert_with(PredicateList::new).push(predicate.into());
        self
    }

    pub fn with_predicates(mut self, predicates: impl IntoIterator<Item = Uri>) -> Self {
        let list = self.predicates.get_or_insert_with(PredicateList::new);
        list.extend(predicates);
        self
    }

    pub fn with_object(mut self, object: impl Into<Term>) -> Self {
        self.object = Some(object.into());
        self
    }

    pub fn matches(&self, triple: &Triple) -> bool {
        if let Some(s) = &self.subject {
            if *s != triple.subject {
                return false;
            }
        }
        if let Some(preds) = &self.predicates {
            if !preds.contains(&triple.predicate) {
                return false;
            }
        }
        if let Some(o) = &self.object {
            if *o != triple.object {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Triple {
        Triple::new(
            Term::uri("http://x/cat"),
            Uri::new("http://www.w3.org/2004/02/skos/core#prefLabel"),
            Term::lang_literal("Cat", "en"),
        )
    }

    #[test]
    fn test_wildcard_matches_everything() {
        assert!(TriplePattern::any().matches(&sample()));
    }

    #[test]
    fn test_subject_and_object_constraints() {
        let t = sample();
        assert!(TriplePattern::any().with_subject(Term::uri("http://x/cat")).matches(&t));
        assert!(!TriplePattern::any().with_subject(Term::uri("http://x/dog")).matches(&t));
        assert!(TriplePattern::any().with_object(Term::lang_literal("Cat", "en")).matches(&t));
        assert!(!TriplePattern::any().with_object(Term::literal("Cat")).matches(&t));
    }

    #[test]
    fn test_predicate_alternation() {
        let t = sample();
        let either = TriplePattern::any()
            .with_predicate("http://x/unused")
            .with_predicate("http://www.w3.org/2004/02/skos/core#prefLabel");
        assert!(either.matches(&t));

        let neither = TriplePattern::any().with_predicate("http://x/unused");
        assert!(!neither.matches(&t));
    }
}
