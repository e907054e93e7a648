//! RDF support for SNS responses
//!
//! This module provides the graph model the mapper works on:
//! - RDF terms and triples (wrapping oxrdf primitives)
//! - An ordered, per-request triple graph
//! - RDF/XML parsing via rio_xml
//! - Namespace aliases and namespace-qualified property lookups
//!
//! # Example
//!
//! ```rust
//! use sns_client::rdf::{GraphAccessor, RdfXmlGraphParser, Resource};
//!
//! let doc = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
//!                       xmlns:skos="http://www.w3.org/2004/02/skos/core#">
//!   <rdf:Description rdf:about="https://sns.uba.de/umthes/_00049251">
//!     <skos:prefLabel xml:lang="de">Wasser</skos:prefLabel>
//!   </rdf:Description>
//! </rdf:RDF>"#;
//!
//! let graph = RdfXmlGraphParser::parse(doc, None).unwrap();
//! let accessor = GraphAccessor::default();
//! let concept = Resource::new(&graph, graph.subjects()[0].clone());
//!
//! let label = accessor.first_object_lang(&concept, "skos", "prefLabel", "de").unwrap();
//! assert_eq!(label.value(), "Wasser");
//! ```

mod accessor;
mod graph;
mod namespace;
mod rdfxml;
mod types;

pub use types::{
    RdfSubject, RdfPredicate, RdfObject,
    NamedNode, BlankNode, Literal, Triple,
    TriplePattern, RdfError, RdfResult,
};

pub use graph::Graph;

pub use accessor::{GraphAccessor, Resource};

pub use namespace::{
    NamespaceManager, Namespace,
    PrefixError, PrefixResult,
    DCTERMS, GEONAMES, SDC, SKOS, SNS_SCHEMA,
};

pub use rdfxml::{RdfXmlGraphParser, ParseError, ParseResult};
