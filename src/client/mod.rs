//! HTTP transport for the SNS REST endpoints
//!
//! Issues a single GET per request and parses the RDF/XML body into a
//! [`Graph`]. Status handling:
//! - 2xx → parsed graph
//! - 404 → [`SnsError::NotFound`]
//! - anything else → [`SnsError::Http`]

pub mod query;

pub use query::{resource_iri, ClassifySource, DateFilter, SnsQuery};

use crate::config::SnsConfig;
use crate::error::{SnsError, SnsResult};
use crate::rdf::{Graph, RdfSubject, RdfXmlGraphParser, Resource};
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

/// A parsed response together with its root resource
#[derive(Debug, Clone)]
pub struct FetchedGraph {
    pub url: Url,
    pub graph: Graph,
    pub root: Option<RdfSubject>,
}

impl FetchedGraph {
    /// Root resource of the response, `None` for an empty document
    pub fn root(&self) -> Option<Resource<'_>> {
        self.root.clone().map(|s| Resource::new(&self.graph, s))
    }
}

/// Subject whose IRI equals `iri`, else the first subject of the document
pub fn root_subject(graph: &Graph, iri: Option<&str>) -> Option<RdfSubject> {
    let subjects = graph.subjects();
    iri.and_then(|iri| subjects.iter().find(|s| s.iri() == Some(iri)))
        .or_else(|| subjects.first())
        .map(|s| (*s).clone())
}

/// Client for fetching RDF documents from SNS
#[derive(Debug, Clone)]
pub struct SnsClient {
    http_client: Client,
}

impl SnsClient {
    /// Create a client with the configured request timeout
    pub fn new(config: &SnsConfig) -> SnsResult<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SnsError::Config(e.to_string()))?;
        Ok(Self { http_client })
    }

    /// GET `url` and parse the body as RDF/XML with `url` as base IRI
    pub async fn fetch_graph(&self, url: &Url) -> SnsResult<Graph> {
        debug!(%url, "fetching");
        let response = self.http_client.get(url.clone()).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SnsError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(SnsError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let graph = RdfXmlGraphParser::parse(&body, Some(url.as_str()))?;
        debug!(%url, triples = graph.len(), "parsed response");
        Ok(graph)
    }

    /// Run `query` against `base` and locate the root resource
    pub async fn fetch(&self, query: &SnsQuery, base: &str, lang: &str) -> SnsResult<FetchedGraph> {
        let url = query.url(base, lang)?;
        let graph = self.fetch_graph(&url).await?;
        let iri = query.resource_iri(base);
        let root = root_subject(&graph, iri.as_deref());
        Ok(FetchedGraph { url, graph, root })
    }
}
