//! End-to-end query evaluation over both storage representations.

use lit_graph_core::iri::Namespace;
use lit_graph_core::types::{Triple, Vocab};
use lit_graph_query::{analytics, evaluate, parse_query, Value};
use lit_graph_store::{add_mention_record, ntriples, TripleStore};

const INTERACTION_QUERY: &str = r#"
    PREFIX ex: <http://example.org/posthuman#>
    SELECT ?character ?predicate ?concept (COUNT(*) AS ?cnt)
    WHERE {
      ?character ?predicate ?concept .
      FILTER (?predicate IN (ex:strugglesWith, ex:linkedTo, ex:questions))
    }
    GROUP BY ?character ?predicate ?concept
    ORDER BY ?character ?predicate ?concept
"#;

const MENTION_QUERY: &str = r#"
    PREFIX ex: <http://example.org/posthuman#>
    SELECT ?char ?rel ?concept (COUNT(*) as ?relCount)
    WHERE {
      ?m a ex:Mention ;
         ex:subject ?char ;
         ex:predicate ?rel ;
         ex:object ?concept .
      FILTER (?rel IN (ex:strugglesWith, ex:linkedTo, ex:questions))
    }
    GROUP BY ?char ?rel ?concept
    ORDER BY ?char ?rel
"#;

fn bare_store() -> TripleStore {
    let ns = Namespace::default();
    let vocab = Vocab::default();
    let mut store = TripleStore::new();
    for (s, p, o) in [
        ("Deckard", &vocab.linked_to, "Posthumanism"),
        ("Deckard", &vocab.questions, "Animal_Ethics"),
        ("Rachael", &vocab.struggles_with, "Cyborg_Theory"),
        ("Rachael", &vocab.struggles_with, "Posthumanism"),
        ("Isidore", &vocab.exemplifies, "Empathy"),
    ] {
        store.insert(Triple::new(ns.iri(s), (*p).clone(), ns.iri(o)));
    }
    store
}

#[test]
fn grouped_counts_sum_to_matching_triples() {
    let store = bare_store();
    let query = parse_query(INTERACTION_QUERY).unwrap();
    let rows = evaluate(&store, &query).unwrap();

    // Four triples carry a filtered predicate, each its own group.
    assert_eq!(rows.len(), 4);
    let total: u64 = rows
        .iter()
        .map(|r| r.get("cnt").and_then(Value::as_number).unwrap_or(0))
        .sum();
    assert_eq!(total, 4);

    // Ordered by character ascending.
    let first = rows[0].get("character").unwrap().display_string();
    assert_eq!(first, "Deckard");
}

#[test]
fn mention_representation_answers_the_same_counts() {
    let ns = Namespace::default();
    let vocab = Vocab::default();
    let mut store = TripleStore::new();
    // Three observations of the same fact as separate mention records.
    for i in 0..3 {
        add_mention_record(
            &mut store,
            &vocab,
            format!("obs_{i}"),
            &ns.iri("Rachael"),
            &vocab.struggles_with,
            &ns.iri("Cyborg_Theory"),
        );
    }

    let query = parse_query(MENTION_QUERY).unwrap();
    let rows = evaluate(&store, &query).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("relCount").and_then(Value::as_number), Some(3));
    assert_eq!(rows[0].get("char").unwrap().display_string(), "Rachael");
}

#[test]
fn query_results_survive_serialization() {
    let store = bare_store();
    let serialized = ntriples::serialize(&store);
    let reloaded = ntriples::parse(&serialized).unwrap();

    let query = parse_query(INTERACTION_QUERY).unwrap();
    let before = evaluate(&store, &query).unwrap();
    let after = evaluate(&reloaded, &query).unwrap();
    assert_eq!(before, after);
}

#[test]
fn analytics_agree_with_the_query_engine() {
    let store = bare_store();
    let vocab = Vocab::default();

    let rows = analytics::interaction_counts(&store, &vocab);
    let total: u64 = rows.iter().map(|r| r.count).sum();

    let query = parse_query(INTERACTION_QUERY).unwrap();
    let query_total: u64 = evaluate(&store, &query)
        .unwrap()
        .iter()
        .map(|r| r.get("cnt").and_then(Value::as_number).unwrap_or(0))
        .sum();

    assert_eq!(total, query_total);
}

#[test]
fn a_failing_query_does_not_poison_the_next_one() {
    let store = bare_store();

    let bad = parse_query("SELECT ?s WHERE { ?s ?p ?o . } LIMIT 5");
    assert!(bad.is_err());

    let good = parse_query(INTERACTION_QUERY).unwrap();
    assert!(!evaluate(&store, &good).unwrap().is_empty());
}
