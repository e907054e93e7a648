//! RDF/XML parsing into a [`Graph`]

use super::graph::Graph;
use super::types::{BlankNode, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use oxiri::Iri;
use rio_api::parser::TriplesParser;
use rio_xml::{RdfXmlError, RdfXmlParser};
use std::io::BufRead;
use thiserror::Error;

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// Syntax error reported by the RDF/XML parser
    #[error("RDF/XML syntax error: {0}")]
    Syntax(#[from] RdfXmlError),

    /// Well-formed XML that does not map onto supported RDF terms
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid base IRI
    #[error("Invalid base IRI {0}")]
    InvalidBase(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// RDF/XML parser producing ordered graphs
pub struct RdfXmlGraphParser;

impl RdfXmlGraphParser {
    /// Parse an RDF/XML string
    pub fn parse(input: &str, base_iri: Option<&str>) -> ParseResult<Graph> {
        Self::parse_reader(input.as_bytes(), base_iri)
    }

    /// Parse RDF/XML from a buffered reader
    pub fn parse_reader<R: BufRead>(reader: R, base_iri: Option<&str>) -> ParseResult<Graph> {
        let base = base_iri
            .map(|iri| {
                Iri::parse(iri.to_string())
                    .map_err(|e| ParseError::InvalidBase(format!("{}: {}", iri, e)))
            })
            .transpose()?;

        let mut parser = RdfXmlParser::new(reader, base);
        let mut graph = Graph::new();

        parser.parse_all(&mut |t| -> Result<(), ParseError> {
            let subject = convert_subject(t.subject)?;
            let predicate = convert_predicate(t.predicate)?;
            let object = convert_object(t.object)?;

            graph.insert(Triple::new(subject, predicate, object));
            Ok(())
        })?;

        Ok(graph)
    }
}

fn convert_subject(s: rio_api::model::Subject) -> Result<RdfSubject, ParseError> {
    match s {
        rio_api::model::Subject::NamedNode(n) => {
            let node = NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?;
            Ok(RdfSubject::NamedNode(node))
        },
        rio_api::model::Subject::BlankNode(b) => {
            let node = BlankNode::from_str(b.id).map_err(|e| ParseError::Parse(e.to_string()))?;
            Ok(RdfSubject::BlankNode(node))
        },
        _ => Err(ParseError::Parse("Unsupported subject type".to_string())),
    }
}

fn convert_predicate(p: rio_api::model::NamedNode) -> Result<RdfPredicate, ParseError> {
    RdfPredicate::new(p.iri).map_err(|e| ParseError::Parse(e.to_string()))
}

fn convert_object(o: rio_api::model::Term) -> Result<RdfObject, ParseError> {
    match o {
        rio_api::model::Term::NamedNode(n) => {
            let node = NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?;
            Ok(RdfObject::NamedNode(node))
        },
        rio_api::model::Term::BlankNode(b) => {
            let node = BlankNode::from_str(b.id).map_err(|e| ParseError::Parse(e.to_string()))?;
            Ok(RdfObject::BlankNode(node))
        },
        rio_api::model::Term::Literal(l) => {
            match l {
                rio_api::model::Literal::Simple { value } => {
                    Ok(RdfObject::Literal(Literal::new_simple_literal(value)))
                },
                rio_api::model::Literal::LanguageTaggedString { value, language } => {
                    Ok(RdfObject::Literal(
                        Literal::new_language_tagged_literal(value, language)
                            .map_err(|e| ParseError::Parse(e.to_string()))?
                    ))
                },
                rio_api::model::Literal::Typed { value, datatype } => {
                    let dt = NamedNode::new(datatype.iri)
                        .map_err(|e| ParseError::Parse(e.to_string()))?;
                    Ok(RdfObject::Literal(Literal::new_typed_literal(value, dt)))
                }
            }
        },
        _ => Err(ParseError::Parse("Unsupported object type".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:skos="http://www.w3.org/2004/02/skos/core#"
         xmlns:dct="http://purl.org/dc/terms/">
  <rdf:Description rdf:about="https://sns.uba.de/umthes/_00049251">
    <rdf:type rdf:resource="http://www.w3.org/2004/02/skos/core#Concept"/>
    <skos:prefLabel xml:lang="de">Wasser</skos:prefLabel>
    <skos:prefLabel xml:lang="en">water</skos:prefLabel>
    <skos:notation rdf:datatype="https://sns.uba.de/schema#ags">06412000</skos:notation>
    <dct:temporal>
      <rdf:Description>
        <dct:title>period</dct:title>
      </rdf:Description>
    </dct:temporal>
  </rdf:Description>
</rdf:RDF>"#;

    #[test]
    fn test_parse_document() {
        let graph = RdfXmlGraphParser::parse(DOC, None).unwrap();
        assert_eq!(graph.len(), 6);

        let first = graph.subjects()[0];
        assert_eq!(first.iri(), Some("https://sns.uba.de/umthes/_00049251"));

        let langs: Vec<_> = graph
            .iter()
            .filter_map(|t| t.object.as_literal())
            .filter_map(|l| l.language())
            .collect();
        assert_eq!(langs, vec!["de", "en"]);

        let typed = graph
            .iter()
            .filter_map(|t| t.object.as_literal())
            .find(|l| l.value() == "06412000")
            .unwrap();
        assert_eq!(typed.datatype(), "https://sns.uba.de/schema#ags");

        assert!(graph.iter().any(|t| matches!(t.object, RdfObject::BlankNode(_))));
    }

    #[test]
    fn test_relative_about_uses_base() {
        let doc = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
                              xmlns:dct="http://purl.org/dc/terms/">
            <rdf:Description rdf:about="_0001"><dct:title>t</dct:title></rdf:Description>
        </rdf:RDF>"#;
        let graph = RdfXmlGraphParser::parse(doc, Some("http://sns.example/thesaurus/")).unwrap();
        assert_eq!(graph.subjects()[0].iri(), Some("http://sns.example/thesaurus/_0001"));
    }

    #[test]
    fn test_relative_about_without_base() {
        let doc = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
                              xmlns:dct="http://purl.org/dc/terms/">
            <rdf:Description rdf:about="_0001"><dct:title>t</dct:title></rdf:Description>
        </rdf:RDF>"#;
        assert!(RdfXmlGraphParser::parse(doc, None).is_err());
    }

    #[test]
    fn test_invalid_base() {
        assert!(matches!(
            RdfXmlGraphParser::parse(DOC, Some("not a base")),
            Err(ParseError::InvalidBase(_))
        ));
    }
}
