//! Integration tests for the title-resolution cascade.

mod common;
use common::sample_graph;
use loregraph::resolver::{resolve, MatchStage};

#[test]
fn cascade_stages_in_order() {
    let graph = sample_graph();

    let cases = [
        ("Machine Learning", MatchStage::Exact),
        ("machine learning", MatchStage::CaseInsensitive),
        (" Machine Learning ", MatchStage::Trimmed),
        ("machine learning ", MatchStage::TrimmedCaseInsensitive),
        ("Learning", MatchStage::Substring),
    ];
    for (query, expected) in cases {
        let hit = resolve(&graph, query).unwrap();
        assert_eq!(hit.stage, expected, "query {query:?}");
        assert_eq!(hit.concept.title, "Machine Learning", "query {query:?}");
    }
}

#[test]
fn substring_matches_are_flagged_as_fuzzy() {
    let graph = sample_graph();
    let fuzzy = resolve(&graph, "Learning").unwrap();
    assert!(fuzzy.stage.is_fuzzy());
    let exact = resolve(&graph, "SQL").unwrap();
    assert!(!exact.stage.is_fuzzy());
}

#[test]
fn an_exact_match_anywhere_beats_a_fuzzy_match_everywhere() {
    // "SQL" is also a substring of a longer title, but the exact stage
    // scans the entire forest before the cascade ever loosens.
    let graph = sample_graph();
    let hit = resolve(&graph, "SQL").unwrap();
    assert_eq!(hit.stage, MatchStage::Exact);
}

#[test]
fn unresolvable_queries_are_reported_not_thrown() {
    let graph = sample_graph();
    assert!(resolve(&graph, "Quantum Chromodynamics").is_none());
    assert!(resolve(&graph, "").is_none());
}

#[test]
fn traversal_order_breaks_ties() {
    // Both children contain "Jo"; the first in document order wins.
    let graph = loregraph::concept::KnowledgeGraph::from_roots(vec![
        loregraph::concept::Concept::new("Root").with_children(vec![
            loregraph::concept::Concept::new("Joins"),
            loregraph::concept::Concept::new("Jobs"),
        ]),
    ]);
    let hit = resolve(&graph, "Jo").unwrap();
    assert_eq!(hit.concept.title, "Joins");
}
