use chrono::Local;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sns_client::{RdfXmlGraphParser, SnsConfig, SnsMapper};

/// Search response with `size` hits, each linked to a described location
fn search_document(size: usize) -> String {
    let mut doc = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:skos="http://www.w3.org/2004/02/skos/core#"
         xmlns:gn="http://www.geonames.org/ontology#"
         xmlns:sdc="http://sindice.com/vocab/search#"
         xmlns:sns="https://sns.uba.de/schema#"
         xmlns:dct="http://purl.org/dc/terms/">
"#,
    );
    for i in 0..size {
        doc.push_str(&format!(
            r#"  <sdc:Result rdf:about="https://sns.uba.de/gazetteer/de/search#{i}">
    <dct:title>Ort {i}</dct:title>
    <sdc:link rdf:resource="https://sns.uba.de/gazetteer/GEMEINDE{i:010}"/>
  </sdc:Result>
  <rdf:Description rdf:about="https://sns.uba.de/gazetteer/GEMEINDE{i:010}">
    <gn:officialName xml:lang="de">Gemeinde {i}</gn:officialName>
    <gn:featureCode rdf:resource="http://www.geonames.org/ontology#A.ADM4"/>
    <skos:notation rdf:datatype="https://sns.uba.de/schema#ags">{i:08}</skos:notation>
    <sns:boundingBox>8.47,50.01 8.8,50.23</sns:boundingBox>
    <sns:expires>2099-12-31 00:00:00.0</sns:expires>
  </rdf:Description>
"#
        ));
    }
    doc.push_str("</rdf:RDF>\n");
    doc
}

/// Benchmark RDF/XML parsing of search responses
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("rdfxml_parse");

    for size in [10, 100, 500].iter() {
        let doc = search_document(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| RdfXmlGraphParser::parse(&doc, None).unwrap());
        });
    }
    group.finish();
}

/// Benchmark mapping parsed search responses onto locations
fn bench_map_locations(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_location_hits");
    let mapper = SnsMapper::new(&SnsConfig::default());
    let now = Local::now().naive_local();

    for size in [10, 100, 500].iter() {
        let graph = RdfXmlGraphParser::parse(&search_document(*size), None).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let locations = mapper.map_location_hits(&graph, "de", now);
                assert_eq!(locations.len(), size);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_map_locations);
criterion_main!(benches);
