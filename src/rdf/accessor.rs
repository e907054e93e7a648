//! Namespace-qualified property lookups over a [`Graph`]
//!
//! All lookups take a namespace alias and a local property name. The alias
//! is resolved through the [`NamespaceManager`]; an unknown alias is used
//! literally as the namespace IRI. Results follow document order.

use super::graph::Graph;
use super::namespace::NamespaceManager;
use super::types::{Literal, RdfObject, RdfPredicate, RdfSubject, Triple};
use indexmap::IndexSet;
use tracing::debug;

/// A node of a graph, viewed together with the graph that describes it
#[derive(Debug, Clone)]
pub struct Resource<'g> {
    graph: &'g Graph,
    subject: RdfSubject,
}

impl<'g> Resource<'g> {
    /// View `subject` within `graph`
    pub fn new(graph: &'g Graph, subject: RdfSubject) -> Self {
        Self { graph, subject }
    }

    /// The node this resource stands for
    pub fn subject(&self) -> &RdfSubject {
        &self.subject
    }

    /// IRI of the resource, `None` for blank nodes
    pub fn iri(&self) -> Option<&str> {
        self.subject.iri()
    }

    /// Graph the resource belongs to
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Whether the graph holds any statement about this resource
    pub fn is_described(&self) -> bool {
        self.graph.has_subject(&self.subject)
    }
}

/// Graph lookups keyed by namespace alias and local name
#[derive(Debug, Clone, Default)]
pub struct GraphAccessor {
    namespaces: NamespaceManager,
}

impl GraphAccessor {
    /// Create an accessor resolving aliases through `namespaces`
    pub fn new(namespaces: NamespaceManager) -> Self {
        Self { namespaces }
    }

    /// Namespace manager used for alias resolution
    pub fn namespaces(&self) -> &NamespaceManager {
        &self.namespaces
    }

    /// Predicate for `ns` + `name`, `None` if the result is not a valid IRI
    pub fn predicate(&self, ns: &str, name: &str) -> Option<RdfPredicate> {
        let iri = self.namespaces.property_iri(ns, name);
        match RdfPredicate::new(&iri) {
            Ok(p) => Some(p),
            Err(e) => {
                debug!(ns, name, error = %e, "property does not resolve to an IRI");
                None
            }
        }
    }

    /// First object of `ns:name` on `resource`
    pub fn first_object<'g>(
        &self,
        resource: &Resource<'g>,
        ns: &str,
        name: &str,
    ) -> Option<&'g RdfObject> {
        self.all_objects(resource, ns, name)
            .into_iter()
            .next()
            .map(|t| &t.object)
    }

    /// First literal of `ns:name` on `resource` tagged with `lang`.
    ///
    /// Objects that are not literals, or carry no language tag, are skipped.
    pub fn first_object_lang<'g>(
        &self,
        resource: &Resource<'g>,
        ns: &str,
        name: &str,
        lang: &str,
    ) -> Option<&'g Literal> {
        self.all_objects(resource, ns, name)
            .into_iter()
            .filter_map(|t| t.object.as_literal())
            .find(|l| l.has_language(lang))
    }

    /// Value of `ns:name` preferring the literal tagged `lang`, else the
    /// first literal of any language
    pub fn first_literal_value<'g>(
        &self,
        resource: &Resource<'g>,
        ns: &str,
        name: &str,
        lang: &str,
    ) -> Option<&'g str> {
        if let Some(lit) = self.first_object_lang(resource, ns, name, lang) {
            return Some(lit.value());
        }
        self.all_objects(resource, ns, name)
            .into_iter()
            .find_map(|t| t.object.as_literal())
            .map(|l| l.value())
    }

    /// All statements `resource ns:name ?o`
    pub fn all_objects<'g>(
        &self,
        resource: &Resource<'g>,
        ns: &str,
        name: &str,
    ) -> Vec<&'g Triple> {
        let Some(predicate) = self.predicate(ns, name) else {
            return Vec::new();
        };
        let graph = resource.graph();
        graph
            .iter()
            .filter(|t| t.subject == resource.subject && t.predicate == predicate)
            .collect()
    }

    /// All statements `?s ns:name ?o` in the graph
    pub fn all_statements<'g>(&self, graph: &'g Graph, ns: &str, name: &str) -> Vec<&'g Triple> {
        let Some(predicate) = self.predicate(ns, name) else {
            return Vec::new();
        };
        graph.iter().filter(|t| t.predicate == predicate).collect()
    }

    /// Distinct resources with at least one `ns:name` statement
    pub fn resources_with_property<'g>(
        &self,
        graph: &'g Graph,
        ns: &str,
        name: &str,
    ) -> Vec<Resource<'g>> {
        self.all_statements(graph, ns, name)
            .into_iter()
            .map(|t| &t.subject)
            .collect::<IndexSet<_>>()
            .into_iter()
            .map(|s| Resource::new(graph, s.clone()))
            .collect()
    }

    /// Whether `resource` has `ns:name` pointing at the node `ns_value:value`
    pub fn has_node_value(
        &self,
        resource: &Resource<'_>,
        ns: &str,
        name: &str,
        ns_value: &str,
        value: &str,
    ) -> bool {
        let target = self.namespaces.property_iri(ns_value, value);
        self.all_objects(resource, ns, name)
            .into_iter()
            .any(|t| matches!(&t.object, RdfObject::NamedNode(n) if n.as_str() == target))
    }

    /// Resource named by `object` in the same graph, `None` for literals
    pub fn object_resource<'g>(
        &self,
        graph: &'g Graph,
        object: &RdfObject,
    ) -> Option<Resource<'g>> {
        object.as_subject().map(|s| Resource::new(graph, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::namespace::SKOS;
    use crate::rdf::types::NamedNode;

    fn subject(iri: &str) -> RdfSubject {
        NamedNode::new(iri).unwrap().into()
    }

    fn sample_graph() -> Graph {
        let label = RdfPredicate::new(&format!("{}prefLabel", SKOS)).unwrap();
        let broader = RdfPredicate::new(&format!("{}broader", SKOS)).unwrap();
        let a = subject("http://ex.org/a");
        let b = subject("http://ex.org/b");

        let parent: RdfObject = NamedNode::new("http://ex.org/b").unwrap().into();
        let tagged = |value: &str, lang: &str| -> RdfObject {
            Literal::new_language_tagged_literal(value, lang).unwrap().into()
        };

        vec![
            Triple::new(a.clone(), broader, parent),
            Triple::new(a.clone(), label.clone(), Literal::new_simple_literal("plain").into()),
            Triple::new(a.clone(), label.clone(), tagged("Wasser", "de")),
            Triple::new(a.clone(), label.clone(), tagged("water", "en")),
            Triple::new(b, label, tagged("Umwelt", "de")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_first_object() {
        let graph = sample_graph();
        let accessor = GraphAccessor::default();
        let a = Resource::new(&graph, subject("http://ex.org/a"));

        let first = accessor.first_object(&a, "skos", "prefLabel").unwrap();
        assert_eq!(first.lexical(), "plain");
        assert!(accessor.first_object(&a, "skos", "altLabel").is_none());
    }

    #[test]
    fn test_first_object_lang_skips_untagged_and_nodes() {
        let graph = sample_graph();
        let accessor = GraphAccessor::default();
        let a = Resource::new(&graph, subject("http://ex.org/a"));

        let de = accessor.first_object_lang(&a, "skos", "prefLabel", "de").unwrap();
        assert_eq!(de.value(), "Wasser");
        let en = accessor.first_object_lang(&a, "skos", "prefLabel", "EN").unwrap();
        assert_eq!(en.value(), "water");
        assert!(accessor.first_object_lang(&a, "skos", "prefLabel", "fr").is_none());
        // broader points at a node; it must be skipped, not fail
        assert!(accessor.first_object_lang(&a, "skos", "broader", "de").is_none());
    }

    #[test]
    fn test_first_object_lang_only_returns_matching_tags() {
        let graph = sample_graph();
        let accessor = GraphAccessor::default();
        let a = Resource::new(&graph, subject("http://ex.org/a"));

        for lang in ["de", "en", "fr", "", "de-AT"] {
            if let Some(lit) = accessor.first_object_lang(&a, "skos", "prefLabel", lang) {
                assert!(lit.language().unwrap().eq_ignore_ascii_case(lang));
            }
        }
    }

    #[test]
    fn test_first_literal_value_fallback() {
        let graph = sample_graph();
        let accessor = GraphAccessor::default();
        let a = Resource::new(&graph, subject("http://ex.org/a"));

        assert_eq!(accessor.first_literal_value(&a, "skos", "prefLabel", "en"), Some("water"));
        assert_eq!(accessor.first_literal_value(&a, "skos", "prefLabel", "fr"), Some("plain"));
    }

    #[test]
    fn test_all_objects_and_statements() {
        let graph = sample_graph();
        let accessor = GraphAccessor::default();
        let a = Resource::new(&graph, subject("http://ex.org/a"));

        assert_eq!(accessor.all_objects(&a, "skos", "prefLabel").len(), 3);
        assert_eq!(accessor.all_statements(&graph, "skos", "prefLabel").len(), 4);
        // full namespace IRI used as alias
        assert_eq!(accessor.all_statements(&graph, SKOS, "prefLabel").len(), 4);
        assert!(accessor.all_statements(&graph, "unknown alias", "prefLabel").is_empty());
    }

    #[test]
    fn test_resources_with_property() {
        let graph = sample_graph();
        let accessor = GraphAccessor::default();

        let with_label = accessor.resources_with_property(&graph, "skos", "prefLabel");
        let iris: Vec<_> = with_label.iter().filter_map(|r| r.iri()).collect();
        assert_eq!(iris, vec!["http://ex.org/a", "http://ex.org/b"]);

        let with_broader = accessor.resources_with_property(&graph, "skos", "broader");
        assert_eq!(with_broader.len(), 1);

        let target = accessor.first_object(&with_broader[0], "skos", "broader").unwrap();
        let b = accessor.object_resource(&graph, target).unwrap();
        assert!(b.is_described());
        assert_eq!(accessor.first_literal_value(&b, "skos", "prefLabel", "de"), Some("Umwelt"));
    }

    #[test]
    fn test_has_node_value() {
        let graph = sample_graph();
        let accessor = GraphAccessor::default();
        let a = Resource::new(&graph, subject("http://ex.org/a"));

        assert!(accessor.has_node_value(&a, "skos", "broader", "http://ex.org/", "b"));
        assert!(!accessor.has_node_value(&a, "skos", "broader", "http://ex.org/", "c"));
    }
}
