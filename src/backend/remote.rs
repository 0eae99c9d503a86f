//! Remote execution path: SPARQL text against an injected endpoint client.
//!
//! The engine owns query construction and row interpretation only; the
//! client owns transport, authentication, and timeouts. Every client
//! failure is caught here and degraded to an empty result with a warning —
//! callers never see transport exceptions.

use std::collections::HashMap;

use tracing::warn;

use crate::model::{Term, Uri};
use crate::query::{self, ObjectMatch};
use super::{BackendKind, QueryBackend, RawConceptMap};

// ============================================================================
// Client contract
// ============================================================================

/// One result row: binding name → term.
pub type Binding = HashMap<String, Term>;

/// What a SPARQL client implementation may fail with.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Minimal SPARQL SELECT contract. Implementations translate their wire
/// format (JSON results, XML, …) into [`Term`] bindings; row order is
/// whatever the endpoint returns.
pub trait SparqlClient: Send + Sync {
    fn select(&self, query: &str) -> Result<Vec<Binding>, ClientError>;
}

// ============================================================================
// RemoteBackend
// ============================================================================

/// SPARQL-endpoint backend.
pub struct RemoteBackend {
    endpoint: String,
    client: Box<dyn SparqlClient>,
}

impl RemoteBackend {
    pub fn new(endpoint: impl Into<String>, client: Box<dyn SparqlClient>) -> Self {
        RemoteBackend { endpoint: endpoint.into(), client }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn run(&self, sparql: &str) -> Vec<Binding> {
        match self.client.select(sparql) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "remote query failed, returning empty result");
                Vec::new()
            }
        }
    }

    fn column(rows: Vec<Binding>, var: &str) -> Vec<Term> {
        rows.into_iter().filter_map(|mut row| row.remove(var)).collect()
    }
}

impl QueryBackend for RemoteBackend {
    fn objects(&self, subject: &Uri, predicates: &[Uri]) -> Vec<Term> {
        if predicates.is_empty() {
            return Vec::new();
        }
        let sparql = query::forward_query(subject, predicates);
        Self::column(self.run(&sparql), query::VALUE_VAR)
    }

    fn subjects(&self, predicates: &[Uri], target: &ObjectMatch) -> Vec<Term> {
        if predicates.is_empty() {
            return Vec::new();
        }
        let sparql = query::reverse_query(predicates, target);
        Self::column(self.run(&sparql), query::SUBJECT_VAR)
    }

    fn describe(&self, subject: &Uri) -> RawConceptMap {
        let mut map = RawConceptMap::new();
        for mut row in self.run(&query::describe_query(subject)) {
            let (Some(p), Some(o)) = (row.remove("p"), row.remove("o")) else { continue };
            let Term::Uri(predicate) = p else { continue };
            map.entry(predicate.to_string()).or_default().push(o);
        }
        map
    }

    fn instances(&self, type_predicate: &Uri, classes: &[Uri]) -> Vec<Term> {
        if classes.is_empty() {
            return Vec::new();
        }
        let sparql = query::instances_query(type_predicate, classes);
        Self::column(self.run(&sparql), query::CONCEPT_VAR)
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Remote
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use parking_lot::Mutex;

    /// Serves the same canned rows for every query; records what it ran.
    struct CannedClient {
        rows: Vec<Binding>,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl CannedClient {
        fn new(rows: Vec<Binding>) -> Self {
            CannedClient { rows, log: Arc::new(Mutex::new(Vec::new())) }
        }

        fn log(&self) -> Arc<Mutex<Vec<String>>> {
            Arc::clone(&self.log)
        }
    }

    impl SparqlClient for CannedClient {
        fn select(&self, query: &str) -> Result<Vec<Binding>, ClientError> {
            self.log.lock().push(query.to_string());
            Ok(self.rows.clone())
        }
    }

    struct FailingClient;

    impl SparqlClient for FailingClient {
        fn select(&self, _query: &str) -> Result<Vec<Binding>, ClientError> {
            Err(ClientError::Transport("connection refused".into()))
        }
    }

    fn row(var: &str, term: Term) -> Binding {
        Binding::from([(var.to_string(), term)])
    }

    #[test]
    fn test_objects_reads_value_bindings() {
        let client = CannedClient::new(vec![
            row("value", Term::lang_literal("Cat", "en")),
            row("value", Term::lang_literal("Chat", "fr")),
        ]);
        let backend = RemoteBackend::new("http://endpoint/sparql", Box::new(client));
        let terms = backend.objects(
            &Uri::new("http://x/cat"),
            &[Uri::new("http://s#prefLabel")],
        );
        assert_eq!(terms, vec![Term::lang_literal("Cat", "en"), Term::lang_literal("Chat", "fr")]);
    }

    #[test]
    fn test_generated_query_reaches_client() {
        let client = CannedClient::new(Vec::new());
        let log = client.log();
        let backend = RemoteBackend::new("http://endpoint/sparql", Box::new(client));
        backend.subjects(
            &[Uri::new("http://s#prefLabel")],
            &ObjectMatch::Value { value: "Cat".into(), lang: Some("en".into()) },
        );
        let log = log.lock();
        assert_eq!(log.len(), 1);
        assert!(log[0].starts_with("SELECT DISTINCT ?subject"));
        assert!(log[0].contains("FILTER (lang(?value) = \"en\")"));
    }

    #[test]
    fn test_describe_groups_rows() {
        let client = CannedClient::new(vec![
            Binding::from([
                ("p".to_string(), Term::uri("http://s#prefLabel")),
                ("o".to_string(), Term::lang_literal("Cat", "en")),
            ]),
            Binding::from([
                ("p".to_string(), Term::uri("http://s#prefLabel")),
                ("o".to_string(), Term::lang_literal("Chat", "fr")),
            ]),
            // malformed row without a predicate binding is skipped
            Binding::from([("o".to_string(), Term::literal("junk"))]),
        ]);
        let backend = RemoteBackend::new("http://endpoint/sparql", Box::new(client));
        let map = backend.describe(&Uri::new("http://x/cat"));
        assert_eq!(map.len(), 1);
        assert_eq!(map["http://s#prefLabel"].len(), 2);
    }

    #[test]
    fn test_client_failure_degrades_to_empty() {
        let backend = RemoteBackend::new("http://endpoint/sparql", Box::new(FailingClient));
        assert!(backend
            .objects(&Uri::new("http://x/cat"), &[Uri::new("http://s#prefLabel")])
            .is_empty());
        assert!(backend.describe(&Uri::new("http://x/cat")).is_empty());
        assert!(backend
            .instances(&Uri::new("http://r#type"), &[Uri::new("http://s#Concept")])
            .is_empty());
    }

    #[test]
    fn test_empty_predicate_list_issues_no_query() {
        let client = CannedClient::new(vec![row("value", Term::literal("x"))]);
        let backend = RemoteBackend::new("http://endpoint/sparql", Box::new(client));
        assert!(backend.objects(&Uri::new("http://x/cat"), &[]).is_empty());
    }
}
