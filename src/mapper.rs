//! Mapping of SNS resources onto domain objects
//!
//! The mapper reads a parsed response graph through the [`GraphAccessor`]
//! and produces [`Location`], [`Term`] and [`Event`] values. Entities whose
//! expiry date lies in the past are suppressed. Fields that cannot be parsed
//! are logged and left empty; they never fail the entity.
//!
//! # Property conventions
//!
//! | field | property |
//! | --- | --- |
//! | name | see [`NAME_RESOLUTION_ORDER`] |
//! | location type | `gn:featureCode` |
//! | qualifier | `sns:qualifier` |
//! | native key | `skos:notation` with matching datatype |
//! | bounding box | `sns:boundingBox` |
//! | temporal range | `dct:temporal` → `sns:start` / `sns:end` |
//! | expiry | `sns:expires` |
//! | search hits | `sdc:link` |

use crate::config::SnsConfig;
use crate::model::{
    Event, FilterType, FullClassifyResult, IndexedDocument, Location, RelatedTerm, RelationType,
    SearchResult, Term, TermType, TreeTerm,
};
use crate::rdf::{Graph, GraphAccessor, RdfObject, Resource};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Format of `sns:expires` values (`yyyy-MM-dd HH:mm:ss.S`)
pub const EXPIRY_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A namespace-qualified label property tried during name resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSource {
    pub ns: &'static str,
    pub name: &'static str,
}

/// Properties consulted for a display name, in order. The first property
/// that yields a literal wins.
pub const NAME_RESOLUTION_ORDER: [LabelSource; 6] = [
    LabelSource { ns: "skos", name: "prefLabel" },
    LabelSource { ns: "sns", name: "prefLabel" },
    LabelSource { ns: "sns", name: "officialName" },
    LabelSource { ns: "gn", name: "officialName" },
    LabelSource { ns: "skos", name: "altLabel" },
    LabelSource { ns: "dct", name: "title" },
];

/// Start and end of a `dct:temporal` description, as lexical values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemporalRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Dates of an entity derived from its temporal range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventDates {
    pub at: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Parse `"x1,y1 x2,y2"` into `[x1, y1, x2, y2]`.
///
/// Tokens are split on whitespace, then on commas. Anything other than
/// exactly four numbers yields `None`.
pub fn parse_bounding_box(raw: &str) -> Option<[f32; 4]> {
    let mut values = Vec::with_capacity(4);
    for token in raw.split_whitespace().flat_map(|pair| pair.split(',')) {
        match token.trim().parse::<f32>() {
            Ok(v) => values.push(v),
            Err(e) => {
                warn!(value = raw, token, error = %e, "unparsable bounding box coordinate");
                return None;
            }
        }
    }
    match values.as_slice() {
        [min_lon, min_lat, max_lon, max_lat] => Some([*min_lon, *min_lat, *max_lon, *max_lat]),
        _ => None,
    }
}

/// Parse an expiry timestamp, `None` if it does not follow [`EXPIRY_FORMAT`]
pub fn parse_expiry(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    // `%.f` also accepts a missing fraction, the format requires one
    let (_, fraction) = raw.rsplit_once('.')?;
    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, EXPIRY_FORMAT).ok()
}

/// Parse a calendar date given as `YYYY-MM-DD` or as a date-time
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", EXPIRY_FORMAT]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Id of a concept: the last path segment of its IRI
pub fn concept_id(iri: &str) -> String {
    let trimmed = iri.trim_end_matches('/');
    let segment = trimmed.rsplit('/').next().unwrap_or(trimmed);
    segment.trim_end_matches(".rdf").to_string()
}

/// Derive at/from/to dates from a temporal range.
///
/// A range whose end is missing or equal to its start is a single date.
pub fn event_dates(range: &TemporalRange) -> EventDates {
    let start = range.start.as_deref().and_then(|s| log_unparsable_date(s, parse_date(s)));
    let end = range.end.as_deref().and_then(|s| log_unparsable_date(s, parse_date(s)));

    match (start, end) {
        (Some(s), None) => EventDates { at: Some(s), ..Default::default() },
        (Some(s), Some(e)) if s == e => EventDates { at: Some(s), ..Default::default() },
        (from, to) => EventDates { at: None, from, to },
    }
}

fn log_unparsable_date(raw: &str, parsed: Option<NaiveDate>) -> Option<NaiveDate> {
    if parsed.is_none() {
        warn!(value = raw, "unparsable date, ignoring");
    }
    parsed
}

/// Maps resources of SNS response graphs onto domain objects
#[derive(Debug, Clone)]
pub struct SnsMapper {
    accessor: GraphAccessor,
    native_key_prefix: String,
    location_types: HashMap<String, String>,
    thesaurus_url: String,
    gazetteer_url: String,
    chronicle_url: String,
}

impl SnsMapper {
    /// Create a mapper for the given configuration
    pub fn new(config: &SnsConfig) -> Self {
        Self {
            accessor: GraphAccessor::new(config.namespace_manager()),
            native_key_prefix: config.native_key_prefix.clone(),
            location_types: config.location_types.clone(),
            thesaurus_url: config.thesaurus_url.clone(),
            gazetteer_url: config.gazetteer_url.clone(),
            chronicle_url: config.chronicle_url.clone(),
        }
    }

    /// Accessor used for all graph lookups
    pub fn accessor(&self) -> &GraphAccessor {
        &self.accessor
    }

    // ---- field extraction ----

    /// Display name following [`NAME_RESOLUTION_ORDER`].
    ///
    /// Within each property a literal tagged `lang` is preferred over the
    /// first literal of any language.
    pub fn resolve_name(&self, resource: &Resource<'_>, lang: &str) -> Option<String> {
        NAME_RESOLUTION_ORDER.iter().find_map(|source| {
            self.accessor
                .first_literal_value(resource, source.ns, source.name, lang)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        })
    }

    /// First `sns:boundingBox` value with exactly four coordinates
    pub fn bounding_box(&self, resource: &Resource<'_>) -> Option<[f32; 4]> {
        self.accessor
            .all_objects(resource, "sns", "boundingBox")
            .into_iter()
            .find_map(|t| parse_bounding_box(t.object.lexical()))
    }

    /// Lexical form of the first `skos:notation` whose datatype contains the
    /// configured native key prefix
    pub fn native_key(&self, resource: &Resource<'_>) -> Option<String> {
        self.accessor
            .all_objects(resource, "skos", "notation")
            .into_iter()
            .filter_map(|t| t.object.as_literal())
            .find(|l| l.datatype().contains(&self.native_key_prefix))
            .map(|l| l.value().to_string())
    }

    /// `sns:start` / `sns:end` of the resource's `dct:temporal` node
    pub fn temporal_range(&self, resource: &Resource<'_>) -> TemporalRange {
        let graph = resource.graph();
        let Some(temporal) = self
            .accessor
            .first_object(resource, "dct", "temporal")
            .and_then(|o| self.accessor.object_resource(graph, o))
        else {
            return TemporalRange::default();
        };

        let literal = |name: &str| {
            self.accessor
                .all_objects(&temporal, "sns", name)
                .into_iter()
                .find_map(|t| t.object.as_literal())
                .map(|l| l.value().to_string())
        };

        TemporalRange {
            start: literal("start"),
            end: literal("end"),
        }
    }

    /// Parsed `sns:expires` value; unparsable values are logged and ignored
    pub fn expiry(&self, resource: &Resource<'_>) -> Option<NaiveDateTime> {
        let raw = self.accessor.first_object(resource, "sns", "expires")?.lexical();
        let parsed = parse_expiry(raw);
        if parsed.is_none() {
            warn!(
                value = raw,
                resource = ?resource.iri(),
                "unparsable expiry date, treating as not expired"
            );
        }
        parsed
    }

    /// Whether the resource expired strictly before `now`
    pub fn is_expired(&self, resource: &Resource<'_>, now: NaiveDateTime) -> bool {
        match self.expiry(resource) {
            Some(expires) => expires < now,
            None => false,
        }
    }

    /// Type of a thesaurus resource.
    ///
    /// `skos:Collection` nodes are node labels, concepts with a preferred
    /// label are descriptors, everything else is a non-descriptor.
    pub fn term_type(&self, resource: &Resource<'_>) -> TermType {
        if self.accessor.has_node_value(resource, "rdf", "type", "skos", "Collection") {
            TermType::NodeLabel
        } else if self.accessor.first_object(resource, "skos", "prefLabel").is_some() {
            TermType::Descriptor
        } else {
            TermType::NonDescriptor
        }
    }

    fn type_id_of(&self, resource: &Resource<'_>, ns: &str, name: &str) -> Option<String> {
        self.accessor.first_object(resource, ns, name).map(|o| match o {
            RdfObject::NamedNode(n) => n.local_name().to_string(),
            other => other.lexical().to_string(),
        })
    }

    // ---- entity mapping ----

    /// Map a described location; `None` when expired or nameless
    pub fn map_location(
        &self,
        resource: &Resource<'_>,
        lang: &str,
        now: NaiveDateTime,
    ) -> Option<Location> {
        let id = resource.iri().map(concept_id)?;
        self.location_with_id(id, resource, lang, now)
    }

    fn location_with_id(
        &self,
        id: String,
        resource: &Resource<'_>,
        lang: &str,
        now: NaiveDateTime,
    ) -> Option<Location> {
        if self.is_expired(resource, now) {
            debug!(id = %id, "location expired");
            return None;
        }
        let name = self.resolve_name(resource, lang)?;
        let type_id = self.type_id_of(resource, "gn", "featureCode");
        let type_name = type_id
            .as_ref()
            .map(|t| self.location_types.get(t).cloned().unwrap_or_else(|| t.clone()));
        let qualifier = self
            .accessor
            .first_literal_value(resource, "sns", "qualifier", lang)
            .map(String::from)
            .or_else(|| type_id.clone());

        Some(Location {
            id,
            type_id,
            type_name,
            name,
            qualifier,
            native_key: self.native_key(resource),
            bounding_box: self.bounding_box(resource),
        })
    }

    /// Map a described thesaurus term; `None` when expired or nameless
    pub fn map_term(
        &self,
        resource: &Resource<'_>,
        lang: &str,
        now: NaiveDateTime,
    ) -> Option<Term> {
        let id = resource.iri().map(concept_id)?;
        self.term_with_id(id, resource, lang, now)
    }

    fn term_with_id(
        &self,
        id: String,
        resource: &Resource<'_>,
        lang: &str,
        now: NaiveDateTime,
    ) -> Option<Term> {
        if self.is_expired(resource, now) {
            debug!(id = %id, "term expired");
            return None;
        }
        let name = self.resolve_name(resource, lang)?;
        let definition = self
            .accessor
            .first_literal_value(resource, "skos", "definition", lang)
            .map(String::from);
        let alternate_labels = self
            .accessor
            .all_objects(resource, "skos", "altLabel")
            .into_iter()
            .filter_map(|t| t.object.as_literal())
            .filter(|l| l.has_language(lang))
            .map(|l| l.value().to_string())
            .collect();

        Some(Term {
            id,
            name,
            term_type: self.term_type(resource),
            definition,
            alternate_labels,
        })
    }

    /// Map a described chronicle event; `None` when expired or untitled
    pub fn map_event(
        &self,
        resource: &Resource<'_>,
        lang: &str,
        now: NaiveDateTime,
    ) -> Option<Event> {
        let id = resource.iri().map(concept_id)?;
        self.event_with_id(id, resource, lang, now)
    }

    fn event_with_id(
        &self,
        id: String,
        resource: &Resource<'_>,
        lang: &str,
        now: NaiveDateTime,
    ) -> Option<Event> {
        if self.is_expired(resource, now) {
            debug!(id = %id, "event expired");
            return None;
        }
        let title = self.resolve_name(resource, lang)?;
        let description = self
            .accessor
            .first_literal_value(resource, "skos", "definition", lang)
            .or_else(|| self.accessor.first_literal_value(resource, "dct", "description", lang))
            .map(String::from);
        let dates = event_dates(&self.temporal_range(resource));

        Some(Event {
            id,
            title,
            type_id: self.type_id_of(resource, "dct", "type"),
            description,
            time_at: dates.at,
            time_range_from: dates.from,
            time_range_to: dates.to,
        })
    }

    // ---- search results ----

    /// Search hits of a response: each resource with an `sdc:link`, paired
    /// with the id of the linked concept and the resource describing it
    fn search_hits<'g>(&self, graph: &'g Graph) -> Vec<SearchHit<'g>> {
        self.accessor
            .resources_with_property(graph, "sdc", "link")
            .into_iter()
            .filter_map(|hit| {
                let link = self.accessor.first_object(&hit, "sdc", "link")?;
                let id = concept_id(link.lexical());
                let concept = self
                    .accessor
                    .object_resource(graph, link)
                    .filter(|c| c.is_described());
                Some(SearchHit { id, hit, concept })
            })
            .collect()
    }

    /// `sdc:totalResults` of a search response
    pub fn total_results(&self, graph: &Graph) -> Option<usize> {
        let statement = self
            .accessor
            .all_statements(graph, "sdc", "totalResults")
            .into_iter()
            .next()?;
        let raw = statement.object.lexical();
        match raw.trim().parse::<usize>() {
            Ok(n) => Some(n),
            Err(e) => {
                warn!(value = raw, error = %e, "unparsable result count");
                None
            }
        }
    }

    /// Locations listed in a search response
    pub fn map_location_hits(
        &self,
        graph: &Graph,
        lang: &str,
        now: NaiveDateTime,
    ) -> Vec<Location> {
        self.search_hits(graph)
            .into_iter()
            .filter_map(|h| {
                let source = h.concept.as_ref().unwrap_or(&h.hit);
                if self.is_expired(source, now) {
                    return None;
                }
                self.location_with_id(h.id.clone(), source, lang, now)
                    .or_else(|| self.location_with_id(h.id, &h.hit, lang, now))
            })
            .collect()
    }

    /// Terms listed in a search response.
    ///
    /// A hit whose label differs from the descriptor's preferred label is a
    /// non-descriptor; with `add_descriptors` the descriptor follows it.
    pub fn map_term_hits(
        &self,
        graph: &Graph,
        add_descriptors: bool,
        lang: &str,
        now: NaiveDateTime,
    ) -> Vec<Term> {
        let mut terms: Vec<Term> = Vec::new();
        let mut seen: HashSet<(String, String, TermType)> = HashSet::new();
        let mut push = |term: Term, terms: &mut Vec<Term>| {
            if seen.insert((term.id.clone(), term.name.clone(), term.term_type)) {
                terms.push(term);
            }
        };

        for h in self.search_hits(graph) {
            let source = h.concept.as_ref().unwrap_or(&h.hit);
            if self.is_expired(source, now) {
                continue;
            }
            let descriptor = h
                .concept
                .as_ref()
                .and_then(|c| self.term_with_id(h.id.clone(), c, lang, now));
            let hit_label = self.resolve_name(&h.hit, lang);

            match (descriptor, hit_label) {
                (Some(d), Some(label)) if label != d.name => {
                    let entry = Term {
                        id: h.id.clone(),
                        name: label,
                        term_type: TermType::NonDescriptor,
                        definition: None,
                        alternate_labels: Vec::new(),
                    };
                    push(entry, &mut terms);
                    if add_descriptors {
                        push(d, &mut terms);
                    }
                }
                (Some(d), _) => push(d, &mut terms),
                (None, Some(_)) => {
                    if let Some(t) = self.term_with_id(h.id.clone(), &h.hit, lang, now) {
                        push(t, &mut terms);
                    }
                }
                (None, None) => debug!(id = %h.id, "search hit without label"),
            }
        }
        terms
    }

    /// Events listed in a search response, with the reported total
    pub fn map_event_hits(
        &self,
        graph: &Graph,
        lang: &str,
        now: NaiveDateTime,
    ) -> SearchResult<Event> {
        let results: Vec<Event> = self
            .search_hits(graph)
            .into_iter()
            .filter_map(|h| {
                let source = h.concept.as_ref().unwrap_or(&h.hit);
                self.event_with_id(h.id, source, lang, now)
            })
            .collect();
        SearchResult {
            total_results: self.total_results(graph).unwrap_or(results.len()),
            results,
        }
    }

    // ---- relations and hierarchy ----

    fn related_resources<'g>(&self, resource: &Resource<'g>, name: &str) -> Vec<Resource<'g>> {
        let graph = resource.graph();
        self.accessor
            .all_objects(resource, "skos", name)
            .into_iter()
            .filter_map(|t| self.accessor.object_resource(graph, &t.object))
            .collect()
    }

    /// Terms linked by `skos:broader`, `skos:narrower` and `skos:related`.
    ///
    /// Only neighbours described in the same graph can be named and are
    /// returned.
    pub fn map_related_terms(
        &self,
        resource: &Resource<'_>,
        lang: &str,
        now: NaiveDateTime,
    ) -> Vec<RelatedTerm> {
        [
            ("broader", RelationType::Parent),
            ("narrower", RelationType::Child),
            ("related", RelationType::Related),
        ]
        .into_iter()
        .flat_map(|(name, relation)| {
            self.related_resources(resource, name)
                .into_iter()
                .filter_map(move |r| {
                    self.map_term(&r, lang, now)
                        .map(|term| RelatedTerm { term, relation })
                })
        })
        .collect()
    }

    /// Locations linked to `resource`, optionally preceded by the location
    /// itself
    pub fn map_related_locations(
        &self,
        resource: &Resource<'_>,
        include_from: bool,
        lang: &str,
        now: NaiveDateTime,
    ) -> Vec<Location> {
        let mut locations = Vec::new();
        if include_from {
            locations.extend(self.map_location(resource, lang, now));
        }
        for name in ["broader", "narrower", "related"] {
            for r in self.related_resources(resource, name) {
                if let Some(loc) = self.map_location(&r, lang, now) {
                    if !locations.iter().any(|l: &Location| l.id == loc.id) {
                        locations.push(loc);
                    }
                }
            }
        }
        locations
    }

    /// Hierarchy around `root`: ancestors through `skos:broader` and
    /// descendants through `skos:narrower`, as far as the graph describes
    /// them. With `include_siblings` each parent also lists its children.
    pub fn map_hierarchy(
        &self,
        root: &Resource<'_>,
        include_siblings: bool,
        lang: &str,
        now: NaiveDateTime,
    ) -> Option<TreeTerm> {
        let term = self.map_term(root, lang, now)?;
        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(term.id.clone());

        let parents = self
            .related_resources(root, "broader")
            .into_iter()
            .filter_map(|p| self.walk_up(&p, include_siblings, lang, now, &mut visited))
            .collect();
        let children = self
            .related_resources(root, "narrower")
            .into_iter()
            .filter_map(|c| self.walk_down(&c, lang, now, &mut visited))
            .collect();

        Some(TreeTerm { term, parents, children })
    }

    fn walk_up(
        &self,
        resource: &Resource<'_>,
        include_siblings: bool,
        lang: &str,
        now: NaiveDateTime,
        visited: &mut HashSet<String>,
    ) -> Option<TreeTerm> {
        let term = self.map_term(resource, lang, now)?;
        if !visited.insert(term.id.clone()) {
            return None;
        }
        let parents = self
            .related_resources(resource, "broader")
            .into_iter()
            .filter_map(|p| self.walk_up(&p, include_siblings, lang, now, visited))
            .collect();
        let children = if include_siblings {
            self.related_resources(resource, "narrower")
                .into_iter()
                .filter_map(|c| self.map_term(&c, lang, now))
                .filter(|t| !visited.contains(&t.id))
                .map(TreeTerm::leaf)
                .collect()
        } else {
            Vec::new()
        };
        Some(TreeTerm { term, parents, children })
    }

    fn walk_down(
        &self,
        resource: &Resource<'_>,
        lang: &str,
        now: NaiveDateTime,
        visited: &mut HashSet<String>,
    ) -> Option<TreeTerm> {
        let term = self.map_term(resource, lang, now)?;
        if !visited.insert(term.id.clone()) {
            return None;
        }
        let children = self
            .related_resources(resource, "narrower")
            .into_iter()
            .filter_map(|c| self.walk_down(&c, lang, now, visited))
            .collect();
        Some(TreeTerm {
            term,
            parents: Vec::new(),
            children,
        })
    }

    /// Top concepts of a scheme response with their described children
    pub fn map_top_terms(&self, graph: &Graph, lang: &str, now: NaiveDateTime) -> Vec<TreeTerm> {
        self.accessor
            .all_statements(graph, "skos", "hasTopConcept")
            .into_iter()
            .filter_map(|t| self.accessor.object_resource(graph, &t.object))
            .filter_map(|top| {
                let term = self.map_term(&top, lang, now)?;
                let children = self
                    .related_resources(&top, "narrower")
                    .into_iter()
                    .filter_map(|c| self.map_term(&c, lang, now))
                    .map(TreeTerm::leaf)
                    .collect();
                Some(TreeTerm {
                    term,
                    parents: Vec::new(),
                    children,
                })
            })
            .collect()
    }

    // ---- classification ----

    /// Map an auto-classification response rooted at the analysed document.
    ///
    /// Concepts are taken from the document's `dct:subject` statements and
    /// sorted into terms, locations and events by the service base URL
    /// their IRI starts with.
    pub fn map_classification(
        &self,
        document: &Resource<'_>,
        filter: Option<FilterType>,
        lang: &str,
        now: NaiveDateTime,
    ) -> FullClassifyResult {
        let dates = event_dates(&self.temporal_range(document));
        let url = self
            .accessor
            .first_object(document, "dct", "source")
            .map(|o| o.lexical().to_string())
            .or_else(|| document.iri().map(String::from));

        let mut result = FullClassifyResult {
            indexed_document: IndexedDocument {
                url,
                title: self
                    .accessor
                    .first_literal_value(document, "dct", "title", lang)
                    .map(String::from),
                description: self
                    .accessor
                    .first_literal_value(document, "dct", "description", lang)
                    .map(String::from),
                time_at: dates.at,
                time_from: dates.from,
                time_to: dates.to,
                bounding_box: self.bounding_box(document),
            },
            ..Default::default()
        };

        let wants = |f: FilterType| filter.map_or(true, |only| only == f);

        for subject in self.related_subjects(document) {
            let Some(iri) = subject.iri() else { continue };
            if iri.starts_with(&self.gazetteer_url) {
                if wants(FilterType::OnlyLocations) {
                    result.locations.extend(self.map_location(&subject, lang, now));
                }
            } else if iri.starts_with(&self.chronicle_url) {
                if wants(FilterType::OnlyEvents) {
                    result.events.extend(self.map_event(&subject, lang, now));
                }
            } else if iri.starts_with(&self.thesaurus_url) {
                if wants(FilterType::OnlyTerms) {
                    result.terms.extend(self.map_term(&subject, lang, now));
                }
            } else {
                debug!(iri, "classified concept from unknown service");
            }
        }
        result
    }

    fn related_subjects<'g>(&self, document: &Resource<'g>) -> Vec<Resource<'g>> {
        let graph = document.graph();
        self.accessor
            .all_objects(document, "dct", "subject")
            .into_iter()
            .filter_map(|t| self.accessor.object_resource(graph, &t.object))
            .collect()
    }
}

struct SearchHit<'g> {
    id: String,
    hit: Resource<'g>,
    concept: Option<Resource<'g>>,
}
