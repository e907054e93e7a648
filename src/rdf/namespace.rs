//! RDF namespace and prefix management
//!
//! This module maps the namespace aliases used by the mapper (`skos`, `gn`,
//! `sns`, ...) to full namespace IRIs.

use std::collections::HashMap;
use thiserror::Error;

/// SKOS core vocabulary
pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";
/// GeoNames ontology
pub const GEONAMES: &str = "http://www.geonames.org/ontology#";
/// Sindice search result vocabulary used by the SNS search endpoints
pub const SDC: &str = "http://sindice.com/vocab/search#";
/// SNS schema for service-specific properties
pub const SNS_SCHEMA: &str = "https://sns.uba.de/schema#";
/// Dublin Core terms
pub const DCTERMS: &str = "http://purl.org/dc/terms/";

/// Prefix errors
#[derive(Error, Debug)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Invalid IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Namespace (prefix → IRI mapping)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix
    pub prefix: String,
    /// IRI
    pub iri: String,
}

impl Namespace {
    /// Create a new namespace
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }
}

/// Namespace manager with the prefixes SNS responses use
#[derive(Debug, Clone)]
pub struct NamespaceManager {
    /// Prefix → IRI mappings
    prefixes: HashMap<String, String>,
}

impl NamespaceManager {
    /// Create a new namespace manager with common prefixes
    pub fn new() -> Self {
        let mut mgr = Self {
            prefixes: HashMap::new(),
        };

        mgr.add_prefix("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
        mgr.add_prefix("rdfs", "http://www.w3.org/2000/01/rdf-schema#");
        mgr.add_prefix("xsd", "http://www.w3.org/2001/XMLSchema#");
        mgr.add_prefix("owl", "http://www.w3.org/2002/07/owl#");
        mgr.add_prefix("dc", "http://purl.org/dc/elements/1.1/");
        mgr.add_prefix("dcterms", DCTERMS);
        mgr.add_prefix("dct", DCTERMS);
        mgr.add_prefix("skos", SKOS);
        mgr.add_prefix("gn", GEONAMES);
        mgr.add_prefix("sdc", SDC);
        mgr.add_prefix("sns", SNS_SCHEMA);

        mgr
    }

    /// Add a prefix, replacing an existing mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Get IRI for a prefix
    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.prefixes
            .get(prefix)
            .map(|s| s.as_str())
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// Resolve an alias to its namespace IRI.
    ///
    /// An unknown alias is taken to be the namespace IRI itself.
    pub fn resolve<'a>(&'a self, alias: &'a str) -> &'a str {
        self.get_iri(alias).unwrap_or(alias)
    }

    /// Full IRI of `name` in the namespace `alias`
    pub fn property_iri(&self, alias: &str, name: &str) -> String {
        format!("{}{}", self.resolve(alias), name)
    }

    /// Expand a compact IRI (prefix:local) to full IRI
    pub fn expand(&self, compact_iri: &str) -> PrefixResult<String> {
        if let Some(pos) = compact_iri.find(':') {
            let prefix = &compact_iri[..pos];
            let local = &compact_iri[pos + 1..];
            let iri = self.get_iri(prefix)?;
            Ok(format!("{}{}", iri, local))
        } else {
            Err(PrefixError::InvalidIri(compact_iri.to_string()))
        }
    }

    /// Get all registered prefixes
    pub fn prefixes(&self) -> Vec<Namespace> {
        self.prefixes
            .iter()
            .map(|(prefix, iri)| Namespace::new(prefix.clone(), iri.clone()))
            .collect()
    }
}

impl Default for NamespaceManager {
    fn default() -> Self {
        Self::new()
    }
}
