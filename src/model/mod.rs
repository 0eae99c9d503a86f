//! # RDF Data Model
//!
//! Terms, triples, and wildcard patterns. These types cross every boundary:
//! store ↔ query builder ↔ backend ↔ normalizer ↔ user.
//!
//! Design rule: pure data — no I/O, no locking, no backend specifics here.

pub mod term;
pub mod triple;

pub use term::{Literal, Term, Uri};
pub use triple::{PredicateList, Triple, TriplePattern};
