//! # Concept Query API
//!
//! [`SkosMapper`] is the public face of the crate: one handle over a loaded
//! vocabulary, answering domain questions (labels, notations, hierarchy,
//! external mappings) without exposing whether the graph lives in memory or
//! behind a SPARQL endpoint. The backend is chosen once at construction from
//! the source string and never changes.
//!
//! All retrieval funnels through three primitives: [`SkosMapper::resolve_field`]
//! for a single field (forward or reverse), [`SkosMapper::resolve_concept`]
//! for a whole normalized concept, and [`SkosMapper::resolve_concept_raw`]
//! for the unnormalized predicate map. The convenience getters are thin
//! compositions of these.
//!
//! ```no_run
//! use skos_rs::{MappingConfig, SkosMapper};
//!
//! # struct HttpClient;
//! # impl skos_rs::SparqlClient for HttpClient {
//! #     fn select(&self, _query: &str) -> Result<Vec<skos_rs::Binding>, skos_rs::ClientError> {
//! #         Ok(Vec::new())
//! #     }
//! # }
//! # fn main() -> skos_rs::Result<()> {
//! let config = MappingConfig::from_path("stw.toml")?;
//! let mapper = SkosMapper::builder("https://zbw.eu/beta/sparql/stw/query")
//!     .config(config)
//!     .default_lang("de")
//!     .client(HttpClient)
//!     .build()?;
//!
//! let uri = mapper.uri_by_pref_label("Arbeitsökonomie", None)?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::backend::{
    BackendKind, LocalBackend, QueryBackend, RawConceptMap, RemoteBackend, SparqlClient,
};
use crate::config::MappingConfig;
use crate::loader::{
    GraphCodec, GraphLoader, GraphNormalizer, VocabularySource, cache_path_for, is_cache_file,
};
use crate::mapping::{FieldMap, Namespaces};
use crate::model::{PredicateList, Term, Uri};
use crate::normalize::{self, ConceptMap, FieldValue};
use crate::query::ObjectMatch;
use crate::schema::{FieldKind, SkosField};
use crate::store::TripleStore;
use crate::vocab;
use crate::{Error, Result};

// ============================================================================
// FieldQuery
// ============================================================================

/// What to look up: a subject whose field values are wanted (forward), or a
/// field value whose subjects are wanted (reverse). The two are exclusive by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryTarget {
    /// Resolve the field values of this concept URI.
    Subject(String),
    /// Resolve the concept URIs carrying this field value. For URI-valued
    /// fields the value is itself an IRI; for literal fields it is matched
    /// exactly against the lexical form.
    Value(String),
}

/// One field-resolution request against the active backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldQuery {
    pub field: SkosField,
    pub target: QueryTarget,
    /// Language override; `None` falls back to the mapper default where the
    /// field is language-dependent.
    pub lang: Option<String>,
}

impl FieldQuery {
    /// Forward lookup: subject URI → field values.
    pub fn forward(field: SkosField, subject: impl Into<String>) -> Self {
        FieldQuery { field, target: QueryTarget::Subject(subject.into()), lang: None }
    }

    /// Reverse lookup: field value → subject URIs.
    pub fn reverse(field: SkosField, value: impl Into<String>) -> Self {
        FieldQuery { field, target: QueryTarget::Value(value.into()), lang: None }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

// ============================================================================
// Concept
// ============================================================================

/// A normalized concept: its URI plus field-keyed values. Unmapped
/// predicates from the raw data appear under their full IRI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub uri: String,
    pub fields: ConceptMap,
}

impl Concept {
    /// Values under a canonical field name or passthrough predicate IRI.
    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(|v| v.as_slice())
    }

    /// First value under a name, for nominally single-valued fields.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.first()).map(String::as_str)
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Staged construction of a [`SkosMapper`]. The source string decides the
/// backend; collaborators the chosen backend needs must be supplied before
/// `build`, which fails with [`Error::Config`] otherwise.
pub struct SkosMapperBuilder {
    source: String,
    config: MappingConfig,
    default_lang: String,
    codec: Option<Box<dyn GraphCodec>>,
    normalizer: Option<Box<dyn GraphNormalizer>>,
    client: Option<Box<dyn SparqlClient>>,
}

impl SkosMapperBuilder {
    fn new(source: impl Into<String>) -> Self {
        SkosMapperBuilder {
            source: source.into(),
            config: MappingConfig::default(),
            default_lang: "en".to_string(),
            codec: None,
            normalizer: None,
            client: None,
        }
    }

    pub fn config(mut self, config: MappingConfig) -> Self {
        self.config = config;
        self
    }

    /// Language used when a call supplies none. Defaults to `"en"`.
    pub fn default_lang(mut self, code: impl Into<String>) -> Self {
        self.default_lang = code.into();
        self
    }

    /// Reader/writer for the vocabulary's concrete RDF syntax. Required for
    /// file sources.
    pub fn codec(mut self, codec: impl GraphCodec + 'static) -> Self {
        self.codec = Some(Box::new(codec));
        self
    }

    /// Raw-dump rewriter. Required for file sources without an existing
    /// normalized cache.
    pub fn normalizer(mut self, normalizer: impl GraphNormalizer + 'static) -> Self {
        self.normalizer = Some(Box::new(normalizer));
        self
    }

    /// SPARQL transport. Required for endpoint sources.
    pub fn client(mut self, client: impl SparqlClient + 'static) -> Self {
        self.client = Some(Box::new(client));
        self
    }

    pub fn build(self) -> Result<SkosMapper> {
        let namespaces = Namespaces::with_config(&self.config);
        let field_map = FieldMap::build(&self.config, &namespaces);

        let backend: Box<dyn QueryBackend> = match VocabularySource::detect(&self.source) {
            VocabularySource::Endpoint(endpoint) => {
                let Some(client) = self.client else {
                    return Err(Error::Config(format!(
                        "endpoint source {endpoint} requires a SPARQL client"
                    )));
                };
                Box::new(RemoteBackend::new(endpoint, client))
            }
            VocabularySource::File(path) => {
                let Some(codec) = self.codec.as_deref() else {
                    return Err(Error::Config(format!(
                        "file source {} requires a graph codec",
                        path.display()
                    )));
                };
                let needs_normalizer = path.exists()
                    && !is_cache_file(&path)
                    && !cache_path_for(&path).exists();
                if needs_normalizer && self.normalizer.is_none() {
                    return Err(Error::Config(format!(
                        "raw source {} has no normalized cache and no normalizer was supplied",
                        path.display()
                    )));
                }
                let loader = GraphLoader {
                    codec,
                    normalizer: self.normalizer.as_deref(),
                    config: &self.config,
                };
                Box::new(loader.load(&path))
            }
        };

        Ok(SkosMapper { default_lang: self.default_lang, namespaces, field_map, backend })
    }
}

// ============================================================================
// SkosMapper
// ============================================================================

/// Vocabulary query handle. Cheap to share behind an `Arc`; all state is
/// read-only after construction.
pub struct SkosMapper {
    default_lang: String,
    namespaces: Namespaces,
    field_map: FieldMap,
    backend: Box<dyn QueryBackend>,
}

impl SkosMapper {
    /// Start building a mapper from a source string: an `http(s)` URL is
    /// taken as a SPARQL endpoint, anything else as a vocabulary file path.
    pub fn builder(source: impl Into<String>) -> SkosMapperBuilder {
        SkosMapperBuilder::new(source)
    }

    /// Wrap an already-populated store. The graph is taken as pre-normalized;
    /// no codec or normalizer is involved.
    pub fn from_store(
        store: Arc<dyn TripleStore>,
        config: &MappingConfig,
        default_lang: impl Into<String>,
    ) -> SkosMapper {
        let namespaces = Namespaces::with_config(config);
        let field_map = FieldMap::build(config, &namespaces);
        SkosMapper {
            default_lang: default_lang.into(),
            namespaces,
            field_map,
            backend: Box::new(LocalBackend::new(store)),
        }
    }

    pub fn default_lang(&self) -> &str {
        &self.default_lang
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    pub fn field_map(&self) -> &FieldMap {
        &self.field_map
    }

    fn effective_lang<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit.unwrap_or(&self.default_lang)
    }

    // ------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------

    /// Resolve one field query. Forward targets yield normalized field
    /// values; reverse targets yield the matching concept URIs. Reverse
    /// literal lookups filter by language only for language-dependent
    /// fields, so notations match regardless of the instance default.
    pub fn resolve_field(&self, query: &FieldQuery) -> Result<FieldValue> {
        let field = query.field;
        let predicates = self.field_map.predicates(field);
        if predicates.is_empty() {
            return Ok(FieldValue::Absent);
        }

        match &query.target {
            QueryTarget::Subject(subject) => {
                let nodes = self.backend.objects(&Uri::new(subject), predicates);
                Ok(normalize::field_values(
                    &nodes,
                    field,
                    self.effective_lang(query.lang.as_deref()),
                ))
            }
            QueryTarget::Value(value) => {
                let value = value.trim();
                let object = if field.kind() == FieldKind::Uri {
                    ObjectMatch::Uri(Uri::new(value))
                } else {
                    let lang = field
                        .is_lang_dependent()
                        .then(|| self.effective_lang(query.lang.as_deref()).to_string());
                    ObjectMatch::Value { value: value.to_string(), lang }
                };
                Ok(collect_subjects(self.backend.subjects(predicates, &object)))
            }
        }
    }

    /// Whole concept, normalized: registry fields under canonical names,
    /// unmapped predicates passed through under their IRIs.
    pub fn resolve_concept(&self, uri: &str, lang: Option<&str>) -> Result<ConceptMap> {
        let raw = self.backend.describe(&Uri::new(uri));
        Ok(normalize::concept_fields(&raw, &self.field_map, self.effective_lang(lang)))
    }

    /// Whole concept, raw: predicate IRI → unprocessed nodes.
    pub fn resolve_concept_raw(&self, uri: &str) -> Result<RawConceptMap> {
        Ok(self.backend.describe(&Uri::new(uri)))
    }

    // ------------------------------------------------------------------
    // Forward getters
    // ------------------------------------------------------------------

    /// Preferred label in the given (or default) language, with fallback to
    /// any available label when the language is missing.
    pub fn pref_label(&self, uri: &str, lang: Option<&str>) -> Result<Option<String>> {
        Ok(self.forward(SkosField::PrefLabel, uri, lang)?.into_first())
    }

    pub fn alt_labels(&self, uri: &str, lang: Option<&str>) -> Result<Vec<String>> {
        Ok(self.forward(SkosField::AltLabel, uri, lang)?.into_vec())
    }

    pub fn hidden_labels(&self, uri: &str, lang: Option<&str>) -> Result<Vec<String>> {
        Ok(self.forward(SkosField::HiddenLabel, uri, lang)?.into_vec())
    }

    pub fn definitions(&self, uri: &str, lang: Option<&str>) -> Result<Vec<String>> {
        Ok(self.forward(SkosField::Definition, uri, lang)?.into_vec())
    }

    pub fn examples(&self, uri: &str, lang: Option<&str>) -> Result<Vec<String>> {
        Ok(self.forward(SkosField::Example, uri, lang)?.into_vec())
    }

    /// Notations are language-independent; no language parameter applies.
    pub fn notations(&self, uri: &str) -> Result<Vec<String>> {
        Ok(self.forward(SkosField::Notation, uri, None)?.into_vec())
    }

    /// Target URIs of any URI-valued field: broader, narrower, related, or
    /// one of the five mapping-match fields.
    pub fn related_uris(&self, uri: &str, field: SkosField) -> Result<Vec<String>> {
        Ok(self.forward(field, uri, None)?.into_vec())
    }

    fn forward(&self, field: SkosField, uri: &str, lang: Option<&str>) -> Result<FieldValue> {
        let mut query = FieldQuery::forward(field, uri);
        if let Some(code) = lang {
            query = query.with_lang(code);
        }
        self.resolve_field(&query)
    }

    // ------------------------------------------------------------------
    // Reverse lookups
    // ------------------------------------------------------------------

    pub fn uri_by_pref_label(&self, label: &str, lang: Option<&str>) -> Result<Option<String>> {
        Ok(self.reverse(SkosField::PrefLabel, label, lang)?.into_first())
    }

    pub fn uri_by_alt_label(&self, label: &str, lang: Option<&str>) -> Result<Option<String>> {
        Ok(self.reverse(SkosField::AltLabel, label, lang)?.into_first())
    }

    pub fn uri_by_notation(&self, notation: &str) -> Result<Option<String>> {
        Ok(self.reverse(SkosField::Notation, notation, None)?.into_first())
    }

    /// Reverse lookup with the field named as a string. Unknown names are a
    /// caller error, not an empty result.
    pub fn uri_by_field(
        &self,
        field_name: &str,
        value: &str,
        lang: Option<&str>,
    ) -> Result<Option<String>> {
        Ok(self.uris_by_field(field_name, value, lang)?.into_iter().next())
    }

    /// All concepts carrying `value` under the named field.
    pub fn uris_by_field(
        &self,
        field_name: &str,
        value: &str,
        lang: Option<&str>,
    ) -> Result<Vec<String>> {
        let field: SkosField = field_name.parse()?;
        Ok(self.reverse(field, value, lang)?.into_vec())
    }

    fn reverse(&self, field: SkosField, value: &str, lang: Option<&str>) -> Result<FieldValue> {
        let mut query = FieldQuery::reverse(field, value);
        if let Some(code) = lang {
            query = query.with_lang(code);
        }
        self.resolve_field(&query)
    }

    // ------------------------------------------------------------------
    // Concept retrieval
    // ------------------------------------------------------------------

    /// Normalized concept, or `None` when the graph holds nothing about the
    /// URI.
    pub fn get_concept(&self, uri: &str, lang: Option<&str>) -> Result<Option<Concept>> {
        let raw = self.backend.describe(&Uri::new(uri));
        if raw.is_empty() {
            return Ok(None);
        }
        let fields = normalize::concept_fields(&raw, &self.field_map, self.effective_lang(lang));
        Ok(Some(Concept { uri: uri.to_string(), fields }))
    }

    pub fn get_raw_concept(&self, uri: &str) -> Result<RawConceptMap> {
        self.resolve_concept_raw(uri)
    }

    pub fn concept_by_pref_label(
        &self,
        label: &str,
        lang: Option<&str>,
    ) -> Result<Option<Concept>> {
        match self.uri_by_pref_label(label, lang)? {
            Some(uri) => self.get_concept(&uri, lang),
            None => Ok(None),
        }
    }

    pub fn concept_by_notation(
        &self,
        notation: &str,
        lang: Option<&str>,
    ) -> Result<Option<Concept>> {
        match self.uri_by_notation(notation)? {
            Some(uri) => self.get_concept(&uri, lang),
            None => Ok(None),
        }
    }

    /// The concept mapped to an external URI through one of the match
    /// fields (exactMatch, closeMatch, broadMatch, narrowMatch,
    /// relatedMatch).
    pub fn concept_by_mapping(
        &self,
        field: SkosField,
        external_uri: &str,
        lang: Option<&str>,
    ) -> Result<Option<Concept>> {
        match self.reverse(field, external_uri, None)?.into_first() {
            Some(uri) => self.get_concept(&uri, lang),
            None => Ok(None),
        }
    }

    pub fn broader_concepts(&self, uri: &str, lang: Option<&str>) -> Result<Vec<Concept>> {
        self.field_concepts(uri, SkosField::Broader, lang)
    }

    pub fn narrower_concepts(&self, uri: &str, lang: Option<&str>) -> Result<Vec<Concept>> {
        self.field_concepts(uri, SkosField::Narrower, lang)
    }

    pub fn related_concepts(&self, uri: &str, lang: Option<&str>) -> Result<Vec<Concept>> {
        self.field_concepts(uri, SkosField::Related, lang)
    }

    fn field_concepts(
        &self,
        uri: &str,
        field: SkosField,
        lang: Option<&str>,
    ) -> Result<Vec<Concept>> {
        let mut out = Vec::new();
        for target in self.related_uris(uri, field)? {
            if let Some(concept) = self.get_concept(&target, lang)? {
                out.push(concept);
            }
        }
        Ok(out)
    }

    /// Case-insensitive keyword search over preferred and alternative
    /// labels. An explicit language restricts the match; `None` searches
    /// across all languages rather than falling back to the default.
    pub fn search_concepts(&self, keyword: &str, lang: Option<&str>) -> Result<Vec<Concept>> {
        let mut predicates = PredicateList::new();
        for field in [SkosField::PrefLabel, SkosField::AltLabel] {
            for predicate in self.field_map.predicates(field) {
                if !predicates.contains(predicate) {
                    predicates.push(predicate.clone());
                }
            }
        }
        if predicates.is_empty() {
            return Ok(Vec::new());
        }
        let object = ObjectMatch::Pattern {
            pattern: keyword.to_string(),
            lang: lang.map(str::to_string),
        };
        let subjects = self.backend.subjects(&predicates, &object);
        self.hydrate(subjects, lang)
    }

    /// Every concept in the vocabulary, identified by the configured
    /// concept-class IRIs.
    pub fn all_concepts(&self, lang: Option<&str>) -> Result<Vec<Concept>> {
        let instances =
            self.backend.instances(&Uri::new(vocab::rdf::TYPE), self.field_map.concept_classes());
        self.hydrate(instances, lang)
    }

    pub fn concept_count(&self) -> Result<usize> {
        Ok(self
            .backend
            .instances(&Uri::new(vocab::rdf::TYPE), self.field_map.concept_classes())
            .len())
    }

    fn hydrate(&self, subjects: Vec<Term>, lang: Option<&str>) -> Result<Vec<Concept>> {
        let mut seen = hashbrown::HashSet::new();
        let mut out = Vec::new();
        for term in subjects {
            let uri = term.lexical_form().to_string();
            if !seen.insert(uri.clone()) {
                continue;
            }
            if let Some(concept) = self.get_concept(&uri, lang)? {
                out.push(concept);
            }
        }
        Ok(out)
    }

    // ------------------------------------------------------------------
    // Utilities
    // ------------------------------------------------------------------

    /// Sorted, distinct predicate IRIs present on a concept.
    pub fn predicates_of(&self, uri: &str) -> Result<Vec<String>> {
        let raw = self.backend.describe(&Uri::new(uri));
        let mut predicates: Vec<String> = raw.into_keys().collect();
        predicates.sort_unstable();
        Ok(predicates)
    }

    pub fn label_by_notation(&self, notation: &str, lang: Option<&str>) -> Result<Option<String>> {
        match self.uri_by_notation(notation)? {
            Some(uri) => self.pref_label(&uri, lang),
            None => Ok(None),
        }
    }

    pub fn notations_by_label(&self, label: &str, lang: Option<&str>) -> Result<Vec<String>> {
        match self.uri_by_pref_label(label, lang)? {
            Some(uri) => self.notations(&uri),
            None => Ok(Vec::new()),
        }
    }
}

// The backend trait object has no Debug bound, so no derive.
impl std::fmt::Debug for SkosMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SkosMapper(lang={}, backend={:?}, fields={})",
            self.default_lang,
            self.backend.kind(),
            self.field_map.len()
        )
    }
}

/// Reverse results: lexical forms, ordered dedup, empty collapses to Absent.
fn collect_subjects(subjects: Vec<Term>) -> FieldValue {
    let mut seen = hashbrown::HashSet::new();
    let mut out = Vec::new();
    for term in subjects {
        let form = term.lexical_form().to_string();
        if seen.insert(form.clone()) {
            out.push(form);
        }
    }
    if out.is_empty() { FieldValue::Absent } else { FieldValue::Many(out) }
}
