//! Graph-store collaborator interface.
//!
//! The engine needs exactly two things from a triple store: a bulk
//! pattern-match primitive and a size check. No write access is required —
//! a loaded vocabulary is read-only for the lifetime of its instance.
//! [`MemoryStore`] is the bundled reference implementation.

pub mod memory;

pub use memory::MemoryStore;

use crate::model::{Triple, TriplePattern};

/// Read-only triple store contract.
pub trait TripleStore: Send + Sync {
    /// Every triple matching the wildcard pattern. A predicate list in the
    /// pattern matches any of its entries.
    fn triples_matching(&self, pattern: &TriplePattern) -> Vec<Triple>;

    /// Total number of triples held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
