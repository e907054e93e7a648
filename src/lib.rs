//! SNS Client
//!
//! Client library for the Semantic Network Service (SNS), a remote linked
//! data service made up of an environmental thesaurus, a gazetteer of
//! locations and a chronicle of events, plus auto-classification of texts.
//!
//! # Architecture
//!
//! A call flows through four layers:
//! - [`client`]: builds the request URL and fetches the RDF/XML response
//! - [`rdf`]: parses the response into an ordered triple graph and offers
//!   namespace-qualified property lookups
//! - [`mapper`]: turns graph resources into domain objects
//! - [`service`]: per sub-service traits implemented by [`SnsService`]
//!
//! Every call owns its graph; no state is shared between calls.
//!
//! ## Example Usage
//!
//! ```no_run
//! use sns_client::{GazetteerService, MatchingType, SnsConfig, SnsService};
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = SnsService::new(SnsConfig::default()).unwrap();
//!
//!     let locations = service
//!         .find_locations_from_query_term("Frankfurt", MatchingType::BeginsWith, Some("de"))
//!         .await;
//!     for location in locations {
//!         println!("{} {}", location.id, location.name);
//!     }
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod error;
pub mod mapper;
pub mod model;
pub mod rdf;
pub mod service;

// Re-export main types for convenience
pub use client::{ClassifySource, DateFilter, FetchedGraph, SnsClient, SnsQuery};

pub use config::SnsConfig;

pub use error::{SnsError, SnsResult};

pub use mapper::{SnsMapper, TemporalRange, NAME_RESOLUTION_ORDER};

pub use model::{
    Event, FilterType, FullClassifyResult, HierarchyDirection, IndexedDocument, Location,
    MatchingType, RelatedTerm, RelationType, SearchResult, Term, TermType, TreeTerm,
};

pub use rdf::{Graph, GraphAccessor, NamespaceManager, RdfXmlGraphParser, Resource};

pub use service::{
    ChronicleService, FullClassifyService, GazetteerService, SnsService, ThesaurusService,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.3.0");
    }
}
