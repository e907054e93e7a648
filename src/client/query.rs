//! Request URLs for the SNS REST endpoints

use crate::error::{SnsError, SnsResult};
use crate::model::{FilterType, HierarchyDirection, MatchingType};
use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Url;

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Time constraint of an event search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// Events on one day
    At(NaiveDate),
    /// Events overlapping a range; either end may be open
    Range {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

impl DateFilter {
    /// Filter for an optional start and end date, `None` without either
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<Self> {
        match (start, end) {
            (None, None) => None,
            (Some(s), None) => Some(DateFilter::At(s)),
            (Some(s), Some(e)) if s == e => Some(DateFilter::At(s)),
            (from, to) => Some(DateFilter::Range { from, to }),
        }
    }
}

/// One request against an SNS sub-service
#[derive(Debug, Clone, PartialEq)]
pub enum SnsQuery {
    /// Label search over topics
    TopicSearch {
        term: String,
        matching: MatchingType,
        page: u32,
        limit: u32,
    },
    /// Single concept by id or IRI
    Term { id: String },
    /// Hierarchy around a concept
    Hierarchy {
        id: String,
        depth: u32,
        direction: HierarchyDirection,
        include_siblings: bool,
    },
    /// Concepts similar to the given names
    Similar { names: Vec<String> },
    /// Chronicle event search
    EventSearch {
        term: String,
        matching: MatchingType,
        collections: Vec<String>,
        dates: Option<DateFilter>,
        page: u32,
        limit: u32,
    },
    /// Concept scheme with its top concepts
    TopLevel,
    /// Auto-classification of a document
    Classify {
        source: ClassifySource,
        max_words: u32,
        ignore_case: bool,
        filter: Option<FilterType>,
    },
}

/// What auto-classification analyses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifySource {
    Url(String),
    Text(String),
}

impl SnsQuery {
    /// Absolute request URL against `base` in language `lang`
    pub fn url(&self, base: &str, lang: &str) -> SnsResult<Url> {
        let base = base.trim_end_matches('/');
        let lang = encode_segment(lang);
        let mut params: Vec<(&str, String)> = Vec::new();

        let path = match self {
            SnsQuery::TopicSearch { term, matching, page, limit } => {
                params.push(("q", term.clone()));
                params.push(("qt", matching.as_param().to_string()));
                params.push(("t", "labels".to_string()));
                params.push(("page", page.to_string()));
                params.push(("limit", limit.to_string()));
                format!("{}/{}/search.rdf", base, lang)
            }
            SnsQuery::Term { id } => {
                if is_iri(id) {
                    format!("{}.rdf", id.trim_end_matches('/'))
                } else {
                    format!("{}/{}.rdf", base, encode_segment(id))
                }
            }
            SnsQuery::Hierarchy { id, depth, direction, include_siblings } => {
                if *depth > 0 {
                    params.push(("depth", depth.to_string()));
                }
                params.push(("dir", direction.as_param().to_string()));
                if *include_siblings {
                    params.push(("siblings", "true".to_string()));
                }
                format!("{}/{}/hierarchy/{}.rdf", base, lang, encode_segment(local_id(id)))
            }
            SnsQuery::Similar { names } => {
                params.push(("terms", names.join(" ")));
                format!("{}/{}/similar.rdf", base, lang)
            }
            SnsQuery::EventSearch { term, matching, collections, dates, page, limit } => {
                params.push(("q", term.clone()));
                params.push(("qt", matching.as_param().to_string()));
                if !collections.is_empty() {
                    params.push(("c", collections.join(",")));
                }
                match dates {
                    Some(DateFilter::At(d)) => params.push(("date", d.to_string())),
                    Some(DateFilter::Range { from, to }) => {
                        if let Some(f) = from {
                            params.push(("from", f.to_string()));
                        }
                        if let Some(t) = to {
                            params.push(("to", t.to_string()));
                        }
                    }
                    None => {}
                }
                params.push(("page", page.to_string()));
                params.push(("limit", limit.to_string()));
                format!("{}/{}/search.rdf", base, lang)
            }
            SnsQuery::TopLevel => format!("{}/{}/scheme.rdf", base, lang),
            SnsQuery::Classify { source, max_words, ignore_case, filter } => {
                match source {
                    ClassifySource::Url(u) => params.push(("url", u.clone())),
                    ClassifySource::Text(t) => params.push(("text", t.clone())),
                }
                params.push(("maxWords", max_words.to_string()));
                params.push(("ignoreCase", ignore_case.to_string()));
                if let Some(f) = filter {
                    params.push(("filter", f.as_param().to_string()));
                }
                format!("{}/{}/classify.rdf", base, lang)
            }
        };

        let mut url =
            Url::parse(&path).map_err(|e| SnsError::InvalidUrl(format!("{}: {}", path, e)))?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// IRI of the resource this query is about, if it names one
    pub fn resource_iri(&self, base: &str) -> Option<String> {
        match self {
            SnsQuery::Term { id } | SnsQuery::Hierarchy { id, .. } => Some(resource_iri(base, id)),
            _ => None,
        }
    }
}

/// IRI of concept `id` in the service at `base`
pub fn resource_iri(base: &str, id: &str) -> String {
    if is_iri(id) {
        id.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), id)
    }
}

fn is_iri(id: &str) -> bool {
    id.contains("://")
}

fn local_id(id: &str) -> &str {
    if is_iri(id) {
        id.trim_end_matches('/').rsplit('/').next().unwrap_or(id)
    } else {
        id
    }
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}
