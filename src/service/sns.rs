//! SNS-backed implementation of all service traits

use super::{ChronicleService, FullClassifyService, GazetteerService, ThesaurusService};
use crate::client::{ClassifySource, DateFilter, FetchedGraph, SnsClient, SnsQuery};
use crate::config::SnsConfig;
use crate::error::{SnsError, SnsResult};
use crate::mapper::SnsMapper;
use crate::model::{
    Event, FilterType, FullClassifyResult, HierarchyDirection, Location, MatchingType, RelatedTerm,
    SearchResult, Term, TreeTerm,
};
use async_trait::async_trait;
use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::{debug, error};

/// Client facade for the thesaurus, gazetteer, chronicle and
/// auto-classification of one SNS instance
#[derive(Debug, Clone)]
pub struct SnsService {
    config: SnsConfig,
    client: SnsClient,
    mapper: SnsMapper,
}

impl SnsService {
    /// Create a service after validating `config`
    pub fn new(config: SnsConfig) -> SnsResult<Self> {
        config.validate()?;
        let client = SnsClient::new(&config)?;
        let mapper = SnsMapper::new(&config);
        Ok(Self { config, client, mapper })
    }

    /// Active configuration
    pub fn config(&self) -> &SnsConfig {
        &self.config
    }

    /// Mapper used to turn responses into domain objects
    pub fn mapper(&self) -> &SnsMapper {
        &self.mapper
    }

    /// Fetch a response, logging and swallowing any failure
    async fn fetch(&self, query: SnsQuery, base: &str, lang: &str) -> Option<FetchedGraph> {
        match self.client.fetch(&query, base, lang).await {
            Ok(fetched) => Some(fetched),
            Err(SnsError::NotFound(url)) => {
                error!(%url, "resource does not exist");
                None
            }
            Err(e) => {
                error!(error = %e, ?query, "SNS request failed");
                None
            }
        }
    }

    async fn classify(
        &self,
        source: ClassifySource,
        analyze_max_words: u32,
        ignore_case: bool,
        filter: Option<FilterType>,
        lang: &str,
    ) -> Option<FullClassifyResult> {
        let query = SnsQuery::Classify {
            source,
            max_words: analyze_max_words,
            ignore_case,
            filter,
        };
        let fetched = self.fetch(query, &self.config.thesaurus_url, lang).await?;
        let Some(document) = fetched.root() else {
            debug!(url = %fetched.url, "empty classification response");
            return Some(FullClassifyResult::default());
        };
        Some(self.mapper.map_classification(&document, filter, lang, now()))
    }

    async fn hierarchy(
        &self,
        id: &str,
        depth: u32,
        direction: HierarchyDirection,
        include_siblings: bool,
        lang: &str,
    ) -> Option<TreeTerm> {
        let query = SnsQuery::Hierarchy {
            id: id.to_string(),
            depth,
            direction,
            include_siblings,
        };
        let fetched = self.fetch(query, &self.config.thesaurus_url, lang).await?;
        let root = fetched.root()?;
        self.mapper.map_hierarchy(&root, include_siblings, lang, now())
    }

    fn search(&self, term: &str, matching: MatchingType) -> SnsQuery {
        SnsQuery::TopicSearch {
            term: term.to_string(),
            matching,
            page: 1,
            limit: self.config.page_size,
        }
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn term_query(id: &str) -> SnsQuery {
    SnsQuery::Term { id: id.to_string() }
}

#[async_trait]
impl GazetteerService for SnsService {
    async fn get_location(&self, id: &str, lang: Option<&str>) -> Option<Location> {
        let lang = self.config.language(lang);
        let fetched = self.fetch(term_query(id), &self.config.gazetteer_url, lang).await?;
        let root = fetched.root()?;
        self.mapper.map_location(&root, lang, now())
    }

    async fn get_related_locations_from_location(
        &self,
        id: &str,
        include_from: bool,
        lang: Option<&str>,
    ) -> Vec<Location> {
        let lang = self.config.language(lang);
        let base = &self.config.gazetteer_url;
        let Some(fetched) = self.fetch(term_query(id), base, lang).await else {
            return Vec::new();
        };
        match fetched.root() {
            Some(root) => self.mapper.map_related_locations(&root, include_from, lang, now()),
            None => Vec::new(),
        }
    }

    async fn get_locations_from_text(
        &self,
        text: &str,
        analyze_max_words: u32,
        ignore_case: bool,
        lang: Option<&str>,
    ) -> Vec<Location> {
        let lang = self.config.language(lang);
        self.classify(
            ClassifySource::Text(text.to_string()),
            analyze_max_words,
            ignore_case,
            Some(FilterType::OnlyLocations),
            lang,
        )
        .await
        .map(|r| r.locations)
        .unwrap_or_default()
    }

    async fn find_locations_from_query_term(
        &self,
        term: &str,
        query_type: MatchingType,
        lang: Option<&str>,
    ) -> Vec<Location> {
        let lang = self.config.language(lang);
        let query = self.search(term, query_type);
        match self.fetch(query, &self.config.gazetteer_url, lang).await {
            Some(fetched) => self.mapper.map_location_hits(&fetched.graph, lang, now()),
            None => Vec::new(),
        }
    }
}

#[async_trait]
impl ThesaurusService for SnsService {
    async fn get_term(&self, id: &str, lang: Option<&str>) -> Option<Term> {
        let lang = self.config.language(lang);
        let fetched = self.fetch(term_query(id), &self.config.thesaurus_url, lang).await?;
        let root = fetched.root()?;
        self.mapper.map_term(&root, lang, now())
    }

    async fn find_terms_from_query_term(
        &self,
        term: &str,
        matching: MatchingType,
        add_descriptors: bool,
        lang: Option<&str>,
    ) -> Vec<Term> {
        let lang = self.config.language(lang);
        let query = self.search(term, matching);
        match self.fetch(query, &self.config.thesaurus_url, lang).await {
            Some(fetched) => {
                self.mapper
                    .map_term_hits(&fetched.graph, add_descriptors, lang, now())
            }
            None => Vec::new(),
        }
    }

    async fn get_hierarchy(
        &self,
        id: &str,
        depth: u32,
        direction: HierarchyDirection,
        include_siblings: bool,
        lang: Option<&str>,
    ) -> Option<TreeTerm> {
        let lang = self.config.language(lang);
        self.hierarchy(id, depth, direction, include_siblings, lang).await
    }

    async fn get_hierarchy_next_level(&self, id: &str, lang: Option<&str>) -> Vec<TreeTerm> {
        let lang = self.config.language(lang);
        self.hierarchy(id, 1, HierarchyDirection::Down, false, lang)
            .await
            .map(|tree| tree.children)
            .unwrap_or_default()
    }

    async fn get_hierarchy_path_to_top(&self, id: &str, lang: Option<&str>) -> Option<TreeTerm> {
        let lang = self.config.language(lang);
        let depth = self.config.hierarchy_path_depth;
        self.hierarchy(id, depth, HierarchyDirection::Up, false, lang).await
    }

    async fn get_hierarchy_top_level(&self, lang: Option<&str>) -> Vec<TreeTerm> {
        let lang = self.config.language(lang);
        match self.fetch(SnsQuery::TopLevel, &self.config.thesaurus_url, lang).await {
            Some(fetched) => self.mapper.map_top_terms(&fetched.graph, lang, now()),
            None => Vec::new(),
        }
    }

    async fn get_related_terms_from_term(&self, id: &str, lang: Option<&str>) -> Vec<RelatedTerm> {
        let lang = self.config.language(lang);
        let base = &self.config.thesaurus_url;
        let Some(fetched) = self.fetch(term_query(id), base, lang).await else {
            return Vec::new();
        };
        match fetched.root() {
            Some(root) => self.mapper.map_related_terms(&root, lang, now()),
            None => Vec::new(),
        }
    }

    async fn get_similar_terms_from_names(
        &self,
        names: &[String],
        ignore_case: bool,
        lang: Option<&str>,
    ) -> Vec<Term> {
        let lang = self.config.language(lang);
        if names.is_empty() {
            return Vec::new();
        }
        let query = SnsQuery::Similar { names: names.to_vec() };
        let Some(fetched) = self.fetch(query, &self.config.thesaurus_url, lang).await else {
            return Vec::new();
        };

        let is_input = |name: &str| {
            names.iter().any(|n| {
                if ignore_case {
                    n.to_lowercase() == name.to_lowercase()
                } else {
                    n == name
                }
            })
        };
        self.mapper
            .map_term_hits(&fetched.graph, false, lang, now())
            .into_iter()
            .filter(|t| !is_input(&t.name))
            .collect()
    }

    async fn get_terms_from_text(
        &self,
        text: &str,
        analyze_max_words: u32,
        ignore_case: bool,
        lang: Option<&str>,
    ) -> Vec<Term> {
        let lang = self.config.language(lang);
        self.classify(
            ClassifySource::Text(text.to_string()),
            analyze_max_words,
            ignore_case,
            Some(FilterType::OnlyTerms),
            lang,
        )
        .await
        .map(|r| r.terms)
        .unwrap_or_default()
    }
}

#[async_trait]
impl ChronicleService for SnsService {
    async fn get_event(&self, id: &str, lang: Option<&str>) -> Option<Event> {
        let lang = self.config.language(lang);
        let fetched = self.fetch(term_query(id), &self.config.chronicle_url, lang).await?;
        let root = fetched.root()?;
        self.mapper.map_event(&root, lang, now())
    }

    async fn find_events_from_query_term(
        &self,
        term: &str,
        matching: MatchingType,
        in_collections: &[String],
        date_start: Option<NaiveDate>,
        date_end: Option<NaiveDate>,
        lang: Option<&str>,
        page: u32,
        length: u32,
    ) -> SearchResult<Event> {
        let lang = self.config.language(lang);
        let query = SnsQuery::EventSearch {
            term: term.to_string(),
            matching,
            collections: in_collections.to_vec(),
            dates: DateFilter::from_bounds(date_start, date_end),
            page,
            limit: length,
        };
        match self.fetch(query, &self.config.chronicle_url, lang).await {
            Some(fetched) => self.mapper.map_event_hits(&fetched.graph, lang, now()),
            None => SearchResult::empty(),
        }
    }
}

#[async_trait]
impl FullClassifyService for SnsService {
    async fn auto_classify_url(
        &self,
        url: &str,
        analyze_max_words: u32,
        ignore_case: bool,
        filter: Option<FilterType>,
        lang: Option<&str>,
    ) -> Option<FullClassifyResult> {
        let lang = self.config.language(lang);
        let source = ClassifySource::Url(url.to_string());
        self.classify(source, analyze_max_words, ignore_case, filter, lang)
            .await
    }

    async fn auto_classify_text(
        &self,
        text: &str,
        analyze_max_words: u32,
        ignore_case: bool,
        filter: Option<FilterType>,
        lang: Option<&str>,
    ) -> Option<FullClassifyResult> {
        let lang = self.config.language(lang);
        let source = ClassifySource::Text(text.to_string());
        self.classify(source, analyze_max_words, ignore_case, filter, lang)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SnsConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(SnsService::new(config), Err(SnsError::Config(_))));
    }

    #[test]
    fn test_service_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SnsService>();
    }

    #[tokio::test]
    async fn test_unreachable_service_yields_empty_results() {
        let config = SnsConfig {
            thesaurus_url: "http://127.0.0.1:9/umthes".to_string(),
            timeout_secs: 2,
            ..Default::default()
        };
        let service = SnsService::new(config).unwrap();

        assert!(service.get_term("_1", None).await.is_none());
        assert!(service.get_hierarchy_top_level(Some("en")).await.is_empty());
        assert!(service.get_similar_terms_from_names(&[], true, None).await.is_empty());
    }
}
