//! End-to-end tests for the local resolution pipeline.
//!
//! Each test exercises: TOML mapping config -> field map -> local backend
//! scan -> normalization, through the public `SkosMapper` API over an
//! in-memory store.

use std::sync::Arc;

use skos_rs::vocab;
use skos_rs::{Error, MappingConfig, MemoryStore, SkosField, SkosMapper, Term};

const GNDO: &str = "https://d-nb.info/standards/elementset/gnd#";

const COTTAGE: &str = "https://d-nb.info/gnd/4136331-6";
const HOUSE: &str = "https://d-nb.info/gnd/4025210-3";
const GARDEN: &str = "https://d-nb.info/gnd/4019286-6";

fn gnd_config() -> MappingConfig {
    // A configured field replaces its default, so the SKOS predicates are
    // declared alongside the GND ones wherever both occur in the data.
    MappingConfig::from_toml_str(
        r#"
        literal_fields = [
            ["gndo.preferredNameForTheSubjectHeading", "skos:prefLabel"],
            ["skos.prefLabel", "skos:prefLabel"],
            ["gndo.variantNameForTheSubjectHeading", "skos:altLabel"],
            ["skos.altLabel", "skos:altLabel"],
        ]
        relation_fields = [
            ["gndo.broaderTermGeneral", "skos:broader"],
            ["gndo.relatedTerm", "skos:related"],
            ["skos.related", "skos:related"],
        ]
        concept_fields = [
            ["gndo.SubjectHeadingSensoStricto", "skos:Concept"],
            ["skos.Concept", "skos:Concept"],
        ]

        [namespaces]
        gndo = "https://d-nb.info/standards/elementset/gnd#"
        "#,
    )
    .unwrap()
}

/// Three subject headings, labeled partly through GND predicates and partly
/// through plain SKOS, so every lookup has to union both.
fn gnd_store() -> MemoryStore {
    let store = MemoryStore::new();
    let gnd_class = format!("{GNDO}SubjectHeadingSensoStricto");
    let gnd_pref = format!("{GNDO}preferredNameForTheSubjectHeading");
    let gnd_variant = format!("{GNDO}variantNameForTheSubjectHeading");
    let gnd_broader = format!("{GNDO}broaderTermGeneral");

    store.insert_spo(COTTAGE, vocab::rdf::TYPE, Term::uri(&gnd_class));
    store.insert_spo(COTTAGE, &gnd_pref, Term::lang_literal("Gartenhaus", "de"));
    store.insert_spo(COTTAGE, vocab::skos::PREF_LABEL, Term::lang_literal("Garden house", "en"));
    store.insert_spo(COTTAGE, &gnd_variant, Term::lang_literal("Laube", "de"));
    store.insert_spo(COTTAGE, vocab::skos::ALT_LABEL, Term::lang_literal("Summer house", "en"));
    store.insert_spo(COTTAGE, vocab::skos::NOTATION, Term::literal("31.3a"));
    store.insert_spo(COTTAGE, &gnd_broader, Term::uri(HOUSE));
    store.insert_spo(COTTAGE, vocab::skos::RELATED, Term::uri(GARDEN));
    store.insert_spo(
        COTTAGE,
        "http://purl.org/dc/terms/modified",
        Term::literal("2019-06-13"),
    );

    store.insert_spo(HOUSE, vocab::rdf::TYPE, Term::uri(vocab::skos::CONCEPT));
    store.insert_spo(HOUSE, vocab::skos::PREF_LABEL, Term::lang_literal("Haus", "de"));
    store.insert_spo(HOUSE, vocab::skos::PREF_LABEL, Term::lang_literal("House", "en"));

    store.insert_spo(GARDEN, vocab::rdf::TYPE, Term::uri(&gnd_class));
    store.insert_spo(GARDEN, &gnd_pref, Term::lang_literal("Garten", "de"));
    store
}

fn gnd_mapper() -> SkosMapper {
    SkosMapper::from_store(Arc::new(gnd_store()), &gnd_config(), "de")
}

// ============================================================================
// 1. Forward resolution unions configured and default predicates
// ============================================================================

#[test]
fn test_forward_resolution_unions_mapped_predicates() {
    let mapper = gnd_mapper();

    // German label only under the GND predicate, English only under SKOS
    assert_eq!(mapper.pref_label(COTTAGE, None).unwrap(), Some("Gartenhaus".to_string()));
    assert_eq!(mapper.pref_label(COTTAGE, Some("en")).unwrap(), Some("Garden house".to_string()));

    let mut alts_all: Vec<String> = Vec::new();
    alts_all.extend(mapper.alt_labels(COTTAGE, Some("de")).unwrap());
    alts_all.extend(mapper.alt_labels(COTTAGE, Some("en")).unwrap());
    alts_all.sort();
    assert_eq!(alts_all, vec!["Laube".to_string(), "Summer house".to_string()]);
}

// ============================================================================
// 2. Language precedence and fallback
// ============================================================================

#[test]
fn test_language_precedence_and_fallback() {
    let mapper = gnd_mapper();

    // both languages present: exact match wins
    assert_eq!(mapper.pref_label(HOUSE, Some("en")).unwrap(), Some("House".to_string()));
    assert_eq!(mapper.pref_label(HOUSE, None).unwrap(), Some("Haus".to_string()));

    // only German present: French request falls back to it
    assert_eq!(mapper.pref_label(GARDEN, Some("fr")).unwrap(), Some("Garten".to_string()));
}

// ============================================================================
// 3. Reverse lookup across configured predicates
// ============================================================================

#[test]
fn test_reverse_lookup_by_label() {
    let mapper = gnd_mapper();

    // stored under the GND predicate, found through the same field map
    assert_eq!(mapper.uri_by_pref_label("Gartenhaus", None).unwrap(), Some(COTTAGE.to_string()));
    // stored under plain SKOS
    assert_eq!(
        mapper.uri_by_pref_label("House", Some("en")).unwrap(),
        Some(HOUSE.to_string())
    );
    // alt label path
    assert_eq!(mapper.uri_by_alt_label("Laube", None).unwrap(), Some(COTTAGE.to_string()));
    // default language filters out the English label
    assert_eq!(mapper.uri_by_pref_label("House", None).unwrap(), None);
}

// ============================================================================
// 4. Notation lookups ignore the default language
// ============================================================================

#[test]
fn test_notation_roundtrip() {
    let mapper = gnd_mapper();

    assert_eq!(mapper.uri_by_notation("31.3a").unwrap(), Some(COTTAGE.to_string()));
    assert_eq!(
        mapper.label_by_notation("31.3a", None).unwrap(),
        Some("Gartenhaus".to_string())
    );
    assert_eq!(mapper.notations_by_label("Gartenhaus", None).unwrap(), vec!["31.3a".to_string()]);
}

// ============================================================================
// 5. Whole-concept normalization with passthrough
// ============================================================================

#[test]
fn test_concept_normalization_with_passthrough() {
    let mapper = gnd_mapper();
    let concept = mapper.get_concept(COTTAGE, None).unwrap().unwrap();

    assert_eq!(concept.first("prefLabel"), Some("Gartenhaus"));
    assert_eq!(concept.field("notation"), Some(&["31.3a".to_string()][..]));
    assert_eq!(concept.field("broader"), Some(&[HOUSE.to_string()][..]));

    // dcterms:modified is claimed by no field and survives under its IRI
    assert_eq!(
        concept.field("http://purl.org/dc/terms/modified"),
        Some(&["2019-06-13".to_string()][..])
    );
}

// ============================================================================
// 6. Hierarchy and association through mapped relation predicates
// ============================================================================

#[test]
fn test_hierarchy_via_mapped_relations() {
    let mapper = gnd_mapper();

    let broader = mapper.broader_concepts(COTTAGE, None).unwrap();
    assert_eq!(broader.len(), 1);
    assert_eq!(broader[0].uri, HOUSE);
    assert_eq!(broader[0].first("prefLabel"), Some("Haus"));

    let related = mapper.related_concepts(COTTAGE, None).unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].uri, GARDEN);

    assert_eq!(
        mapper.related_uris(COTTAGE, SkosField::Broader).unwrap(),
        vec![HOUSE.to_string()]
    );
}

// ============================================================================
// 7. Concept listing spans every configured concept class
// ============================================================================

#[test]
fn test_concept_listing_spans_configured_classes() {
    let mapper = gnd_mapper();

    // two concepts typed with the GND class, one with plain skos:Concept
    assert_eq!(mapper.concept_count().unwrap(), 3);

    let mut uris: Vec<String> =
        mapper.all_concepts(None).unwrap().into_iter().map(|c| c.uri).collect();
    uris.sort();
    assert_eq!(uris, vec![GARDEN.to_string(), HOUSE.to_string(), COTTAGE.to_string()]);
}

// ============================================================================
// 8. Keyword search across pref and alt labels
// ============================================================================

#[test]
fn test_search_across_labels_and_languages() {
    let mapper = gnd_mapper();

    // case-insensitive, no language restriction: matches German and English
    let mut hits: Vec<String> =
        mapper.search_concepts("haus", None).unwrap().into_iter().map(|c| c.uri).collect();
    hits.sort();
    assert_eq!(hits, vec![HOUSE.to_string(), COTTAGE.to_string()]);

    // restricted to English, only the SKOS-labeled match survives
    let hits = mapper.search_concepts("house", Some("en")).unwrap();
    assert_eq!(hits.len(), 2);
}

// ============================================================================
// 9. Unknown field names are rejected, not silently empty
// ============================================================================

#[test]
fn test_unknown_field_rejected() {
    let mapper = gnd_mapper();

    let err = mapper.uris_by_field("keyword", "Gartenhaus", None).unwrap_err();
    assert!(matches!(err, Error::UnknownField(name) if name == "keyword"));

    let err = mapper.uri_by_field("prefLabels", "Gartenhaus", None).unwrap_err();
    assert!(matches!(err, Error::UnknownField(_)));
}

// ============================================================================
// 10. A missing vocabulary file degrades to empty answers
// ============================================================================

struct UnusedCodec;

impl skos_rs::GraphCodec for UnusedCodec {
    fn read(&self, _path: &std::path::Path) -> skos_rs::Result<Vec<skos_rs::Triple>> {
        Err(Error::Load("codec should not have been invoked".to_string()))
    }

    fn write(&self, _triples: &[skos_rs::Triple], _path: &std::path::Path) -> skos_rs::Result<()> {
        Ok(())
    }
}

#[test]
fn test_missing_source_degrades_to_empty_answers() {
    let mapper = SkosMapper::builder("no/such/vocabulary.rdf")
        .config(gnd_config())
        .default_lang("de")
        .codec(UnusedCodec)
        .build()
        .unwrap();

    assert_eq!(mapper.pref_label(COTTAGE, None).unwrap(), None);
    assert!(mapper.all_concepts(None).unwrap().is_empty());
    assert_eq!(mapper.concept_count().unwrap(), 0);
    assert!(mapper.search_concepts("haus", None).unwrap().is_empty());
    assert_eq!(mapper.get_concept(COTTAGE, None).unwrap(), None);
}
