//! Well-known vocabulary IRIs and namespace bases.
//!
//! Constants are organized by vocabulary:
//! - `skos` - the thesaurus vocabulary itself (concept class + field predicates)
//! - `rdf` - RDF core (the type relation)
//! - `namespaces` - base IRIs seeded into every namespace table

/// SKOS vocabulary constants
pub mod skos {
    /// Namespace base — bare field names resolve against this.
    pub const NS: &str = "http://www.w3.org/2004/02/skos/core#";

    /// skos:Concept class IRI (the default type marker)
    pub const CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#Concept";

    pub const PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
    pub const ALT_LABEL: &str = "http://www.w3.org/2004/02/skos/core#altLabel";
    pub const HIDDEN_LABEL: &str = "http://www.w3.org/2004/02/skos/core#hiddenLabel";
    pub const NOTATION: &str = "http://www.w3.org/2004/02/skos/core#notation";
    pub const DEFINITION: &str = "http://www.w3.org/2004/02/skos/core#definition";
    pub const EXAMPLE: &str = "http://www.w3.org/2004/02/skos/core#example";
    pub const BROADER: &str = "http://www.w3.org/2004/02/skos/core#broader";
    pub const NARROWER: &str = "http://www.w3.org/2004/02/skos/core#narrower";
    pub const RELATED: &str = "http://www.w3.org/2004/02/skos/core#related";
    pub const EXACT_MATCH: &str = "http://www.w3.org/2004/02/skos/core#exactMatch";
    pub const CLOSE_MATCH: &str = "http://www.w3.org/2004/02/skos/core#closeMatch";
    pub const BROAD_MATCH: &str = "http://www.w3.org/2004/02/skos/core#broadMatch";
    pub const NARROW_MATCH: &str = "http://www.w3.org/2004/02/skos/core#narrowMatch";
    pub const RELATED_MATCH: &str = "http://www.w3.org/2004/02/skos/core#relatedMatch";
}

/// RDF core constants
pub mod rdf {
    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

/// Datatype markers accepted on notation literals
pub mod notation {
    /// Dewey Decimal Classification datatype, common on GND notations.
    pub const DEWEY: &str = "http://dewey.info";
}

/// Base IRIs for the standard prefixes every namespace table starts with
pub mod namespaces {
    pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    pub const DC: &str = "http://purl.org/dc/elements/1.1/";
    pub const DCTERMS: &str = "http://purl.org/dc/terms/";
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
}
