//! Service interfaces offered to the hosting application
//!
//! Each SNS sub-service has its own trait. [`SnsService`] implements all of
//! them on top of one HTTP client. Lookups return `Option`, collection
//! operations a possibly empty `Vec`; failures are logged, never returned.
//! `lang = None` selects the configured default language.

mod sns;

pub use sns::SnsService;

use crate::model::{
    Event, FilterType, FullClassifyResult, HierarchyDirection, Location, MatchingType, RelatedTerm,
    SearchResult, Term, TreeTerm,
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Gazetteer lookups
#[async_trait]
pub trait GazetteerService: Send + Sync {
    /// Location with the given id
    async fn get_location(&self, id: &str, lang: Option<&str>) -> Option<Location>;

    /// Locations related to a location, optionally starting with the location itself
    async fn get_related_locations_from_location(
        &self,
        id: &str,
        include_from: bool,
        lang: Option<&str>,
    ) -> Vec<Location>;

    /// Locations mentioned in a text
    async fn get_locations_from_text(
        &self,
        text: &str,
        analyze_max_words: u32,
        ignore_case: bool,
        lang: Option<&str>,
    ) -> Vec<Location>;

    /// Locations whose labels match `term`
    async fn find_locations_from_query_term(
        &self,
        term: &str,
        query_type: MatchingType,
        lang: Option<&str>,
    ) -> Vec<Location>;
}

/// Thesaurus lookups
#[async_trait]
pub trait ThesaurusService: Send + Sync {
    /// Term with the given id
    async fn get_term(&self, id: &str, lang: Option<&str>) -> Option<Term>;

    /// Terms whose labels match `term`; with `add_descriptors` the
    /// descriptor of each matching non-descriptor is included
    async fn find_terms_from_query_term(
        &self,
        term: &str,
        matching: MatchingType,
        add_descriptors: bool,
        lang: Option<&str>,
    ) -> Vec<Term>;

    /// Hierarchy around a term
    async fn get_hierarchy(
        &self,
        id: &str,
        depth: u32,
        direction: HierarchyDirection,
        include_siblings: bool,
        lang: Option<&str>,
    ) -> Option<TreeTerm>;

    /// Direct children of a term
    async fn get_hierarchy_next_level(&self, id: &str, lang: Option<&str>) -> Vec<TreeTerm>;

    /// The term with its ancestors up to the top terms
    async fn get_hierarchy_path_to_top(&self, id: &str, lang: Option<&str>) -> Option<TreeTerm>;

    /// Top terms of the thesaurus
    async fn get_hierarchy_top_level(&self, lang: Option<&str>) -> Vec<TreeTerm>;

    /// Terms linked to a term by broader, narrower or related relations
    async fn get_related_terms_from_term(&self, id: &str, lang: Option<&str>) -> Vec<RelatedTerm>;

    /// Terms similar to the given names, excluding the names themselves
    async fn get_similar_terms_from_names(
        &self,
        names: &[String],
        ignore_case: bool,
        lang: Option<&str>,
    ) -> Vec<Term>;

    /// Terms found in a text
    async fn get_terms_from_text(
        &self,
        text: &str,
        analyze_max_words: u32,
        ignore_case: bool,
        lang: Option<&str>,
    ) -> Vec<Term>;
}

/// Chronicle lookups
#[async_trait]
pub trait ChronicleService: Send + Sync {
    /// Event with the given id
    async fn get_event(&self, id: &str, lang: Option<&str>) -> Option<Event>;

    /// One page of events matching `term`, restricted to the given
    /// collections and time span
    #[allow(clippy::too_many_arguments)]
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
    ) -> SearchResult<Event>;
}

/// Auto-classification of documents
#[async_trait]
pub trait FullClassifyService: Send + Sync {
    /// Classify the document at `url`
    async fn auto_classify_url(
        &self,
        url: &str,
        analyze_max_words: u32,
        ignore_case: bool,
        filter: Option<FilterType>,
        lang: Option<&str>,
    ) -> Option<FullClassifyResult>;

    /// Classify a plain text
    async fn auto_classify_text(
        &self,
        text: &str,
        analyze_max_words: u32,
        ignore_case: bool,
        filter: Option<FilterType>,
        lang: Option<&str>,
    ) -> Option<FullClassifyResult>;
}
