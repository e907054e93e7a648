//! Domain objects returned to the hosting application
//!
//! All values are built from a single service response and never change
//! afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A gazetteer location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Location id (last path segment of the concept IRI)
    pub id: String,
    /// Type id, e.g. a GeoNames feature code
    pub type_id: Option<String>,
    /// Display name of the type
    pub type_name: Option<String>,
    /// Display name
    pub name: String,
    /// Disambiguating subtype label; defaults to the type id
    pub qualifier: Option<String>,
    /// Identifier of the location in an external system
    pub native_key: Option<String>,
    /// `[min_lon, min_lat, max_lon, max_lat]`
    pub bounding_box: Option<[f32; 4]>,
}

/// Kind of thesaurus entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TermType {
    /// Preferred term of a concept
    Descriptor,
    /// Entry only known under an alternate label
    NonDescriptor,
    /// Grouping node in the hierarchy, not a concept itself
    NodeLabel,
}

impl fmt::Display for TermType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermType::Descriptor => write!(f, "DESCRIPTOR"),
            TermType::NonDescriptor => write!(f, "NON_DESCRIPTOR"),
            TermType::NodeLabel => write!(f, "NODE_LABEL"),
        }
    }
}

/// A thesaurus term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub term_type: TermType,
    pub definition: Option<String>,
    /// Alternate labels in the requested language
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_labels: Vec<String>,
}

/// A term together with its neighbours in the hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeTerm {
    pub term: Term,
    pub parents: Vec<TreeTerm>,
    pub children: Vec<TreeTerm>,
}

impl TreeTerm {
    /// Leaf without parents or children
    pub fn leaf(term: Term) -> Self {
        Self {
            term,
            parents: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Whether this term is a top term of the thesaurus
    pub fn is_top(&self) -> bool {
        self.parents.is_empty()
    }
}

/// How a related term is connected to the term it was requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    Parent,
    Child,
    Related,
}

/// A term reached through a thesaurus relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedTerm {
    pub term: Term,
    pub relation: RelationType,
}

/// A chronicle event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub type_id: Option<String>,
    pub description: Option<String>,
    /// Single-day events
    pub time_at: Option<NaiveDate>,
    /// Start of a date range
    pub time_range_from: Option<NaiveDate>,
    /// End of a date range
    pub time_range_to: Option<NaiveDate>,
}

/// One page of search hits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<T> {
    /// Hits reported by the service across all pages
    pub total_results: usize,
    pub results: Vec<T>,
}

impl<T> SearchResult<T> {
    pub fn empty() -> Self {
        Self {
            total_results: 0,
            results: Vec::new(),
        }
    }
}

/// Document analysed by auto-classification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexedDocument {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub time_at: Option<NaiveDate>,
    pub time_from: Option<NaiveDate>,
    pub time_to: Option<NaiveDate>,
    pub bounding_box: Option<[f32; 4]>,
}

/// Everything auto-classification found in a document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FullClassifyResult {
    pub indexed_document: IndexedDocument,
    pub terms: Vec<Term>,
    pub locations: Vec<Location>,
    pub events: Vec<Event>,
}

/// How a query term is matched against labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingType {
    Exact,
    #[default]
    BeginsWith,
    Contains,
}

impl MatchingType {
    /// Value of the `qt` request parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            MatchingType::Exact => "exact",
            MatchingType::BeginsWith => "begins",
            MatchingType::Contains => "contains",
        }
    }
}

/// Direction of a hierarchy request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HierarchyDirection {
    Up,
    #[default]
    Down,
}

impl HierarchyDirection {
    pub fn as_param(&self) -> &'static str {
        match self {
            HierarchyDirection::Up => "up",
            HierarchyDirection::Down => "down",
        }
    }
}

/// Restricts what auto-classification returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    OnlyTerms,
    OnlyLocations,
    OnlyEvents,
}

impl FilterType {
    pub fn as_param(&self) -> &'static str {
        match self {
            FilterType::OnlyTerms => "terms",
            FilterType::OnlyLocations => "locations",
            FilterType::OnlyEvents => "events",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_type_serialization() {
        let json = serde_json::to_string(&TermType::NonDescriptor).unwrap();
        assert_eq!(json, "\"NON_DESCRIPTOR\"");
        assert_eq!(TermType::NodeLabel.to_string(), "NODE_LABEL");
    }

    #[test]
    fn test_term_json_shape() {
        let term = Term {
            id: "_00049251".to_string(),
            name: "Wasser".to_string(),
            term_type: TermType::Descriptor,
            definition: None,
            alternate_labels: Vec::new(),
        };
        let value = serde_json::to_value(&term).unwrap();
        assert_eq!(value["type"], "DESCRIPTOR");
        assert!(value.get("alternate_labels").is_none());
    }

    #[test]
    fn test_params() {
        assert_eq!(MatchingType::default().as_param(), "begins");
        assert_eq!(HierarchyDirection::Up.as_param(), "up");
        assert_eq!(FilterType::OnlyLocations.as_param(), "locations");
    }
}
