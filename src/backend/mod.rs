//! Backend dispatch: one query contract, two conforming implementations.
//!
//! [`QueryBackend`] is the seam that makes backend equivalence possible —
//! the query builder feeds it, the normalizer consumes its output, and
//! neither ever learns whether a request ran as an in-memory pattern scan
//! ([`LocalBackend`]) or as SPARQL against an endpoint ([`RemoteBackend`]).
//! Both implementations return plain [`Term`]s in the same shape.

pub mod local;
pub mod remote;

pub use local::LocalBackend;
pub use remote::{Binding, ClientError, RemoteBackend, SparqlClient};

use std::collections::HashMap;

use crate::model::{Term, Uri};
use crate::query::ObjectMatch;

/// Raw predicate → object nodes for one subject, as served by a backend.
pub type RawConceptMap = HashMap<String, Vec<Term>>;

/// Which execution path an instance uses. Decided once at load time from
/// the source string; immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Local,
    Remote,
}

/// The common query contract both execution paths satisfy.
///
/// Failures below this interface (absent graph, transport faults) degrade
/// to empty results with a logged warning; they never surface as errors.
pub trait QueryBackend: Send + Sync {
    /// Objects reachable from `subject` through any of `predicates`.
    fn objects(&self, subject: &Uri, predicates: &[Uri]) -> Vec<Term>;

    /// Subjects owning an object that satisfies `target` under any of
    /// `predicates`.
    fn subjects(&self, predicates: &[Uri], target: &ObjectMatch) -> Vec<Term>;

    /// Every predicate of `subject` with its object nodes.
    fn describe(&self, subject: &Uri) -> RawConceptMap;

    /// Subjects typed with any of `classes` under `type_predicate`,
    /// deduplicated.
    fn instances(&self, type_predicate: &Uri, classes: &[Uri]) -> Vec<Term>;

    fn kind(&self) -> BackendKind;
}
