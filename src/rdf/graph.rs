//! In-memory RDF graph for a single service response
//!
//! Triples are kept in document order and de-duplicated. A graph is built
//! once per request and only read afterwards.

use super::types::{RdfPredicate, RdfSubject, Triple, TriplePattern};
use indexmap::IndexSet;

/// Ordered set of triples parsed from one RDF document
#[derive(Debug, Clone, Default)]
pub struct Graph {
    triples: IndexSet<Triple>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a triple, returning `false` if it was already present
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    /// Check if a triple exists in the graph
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Get the total number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over all triples in document order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Triples matching a pattern, in document order
    pub fn query<'g>(
        &'g self,
        pattern: &'g TriplePattern,
    ) -> impl Iterator<Item = &'g Triple> + 'g {
        self.triples.iter().filter(move |triple| pattern.matches(triple))
    }

    /// Triples with the given subject and predicate
    pub fn statements<'g>(
        &'g self,
        subject: &'g RdfSubject,
        predicate: &'g RdfPredicate,
    ) -> impl Iterator<Item = &'g Triple> + 'g {
        self.triples
            .iter()
            .filter(move |t| &t.subject == subject && &t.predicate == predicate)
    }

    /// Triples with the given predicate
    pub fn statements_with_predicate<'g>(
        &'g self,
        predicate: &'g RdfPredicate,
    ) -> impl Iterator<Item = &'g Triple> + 'g {
        self.triples.iter().filter(move |t| &t.predicate == predicate)
    }

    /// Whether any triple has `subject` as its subject
    pub fn has_subject(&self, subject: &RdfSubject) -> bool {
        self.triples.iter().any(|t| &t.subject == subject)
    }

    /// Distinct subjects in order of first appearance
    pub fn subjects(&self) -> Vec<&RdfSubject> {
        self.triples
            .iter()
            .map(|t| &t.subject)
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self {
            triples: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::types::{Literal, NamedNode};

    fn pred(iri: &str) -> RdfPredicate {
        RdfPredicate::new(iri).unwrap()
    }

    fn triple(s: &str, p: &str, o: &str) -> Triple {
        Triple::new(
            NamedNode::new(s).unwrap().into(),
            pred(p),
            Literal::new_simple_literal(o).into(),
        )
    }

    #[test]
    fn test_insert_dedups() {
        let mut graph = Graph::new();
        assert!(graph.insert(triple("http://ex.org/a", "http://ex.org/p", "1")));
        assert!(!graph.insert(triple("http://ex.org/a", "http://ex.org/p", "1")));
        assert_eq!(graph.len(), 1);
        assert!(graph.contains(&triple("http://ex.org/a", "http://ex.org/p", "1")));
    }

    #[test]
    fn test_document_order() {
        let graph: Graph = vec![
            triple("http://ex.org/b", "http://ex.org/p", "1"),
            triple("http://ex.org/a", "http://ex.org/p", "2"),
            triple("http://ex.org/b", "http://ex.org/q", "3"),
        ]
        .into_iter()
        .collect();

        let subjects: Vec<_> = graph.subjects().into_iter().filter_map(|s| s.iri()).collect();
        assert_eq!(subjects, vec!["http://ex.org/b", "http://ex.org/a"]);

        let p = pred("http://ex.org/p");
        let values: Vec<_> = graph
            .statements_with_predicate(&p)
            .map(|t| t.object.lexical())
            .collect();
        assert_eq!(values, vec!["1", "2"]);
    }

    #[test]
    fn test_statements_by_subject_and_predicate() {
        let graph: Graph = vec![
            triple("http://ex.org/a", "http://ex.org/p", "1"),
            triple("http://ex.org/a", "http://ex.org/q", "2"),
            triple("http://ex.org/b", "http://ex.org/p", "3"),
        ]
        .into_iter()
        .collect();

        let subject: RdfSubject = NamedNode::new("http://ex.org/a").unwrap().into();
        let p = pred("http://ex.org/p");
        assert_eq!(graph.statements(&subject, &p).count(), 1);
        assert!(graph.has_subject(&subject));

        let pattern = TriplePattern::new(Some(subject), None, None);
        assert_eq!(graph.query(&pattern).count(), 2);
    }
}
