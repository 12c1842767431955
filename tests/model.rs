//! Integration tests for model lookup, update, and the JSON codec.

mod common;
use std::sync::Arc;

use common::sample_graph;
use loregraph::concept::{Concept, KnowledgeGraph};
use loregraph::model::{export_graph, export_value, import_graph, CodecError};

#[test]
fn find_present_titles_everywhere_in_the_forest() {
    let graph = sample_graph();
    for title in ["Databases", "SQL", "Joins", "Transactions", "Machine Learning"] {
        let hit = graph.find_concept_by_title(title).unwrap();
        assert_eq!(hit.title, title);
    }
}

#[test]
fn absent_titles_are_not_found() {
    let graph = sample_graph();
    for query in ["sql", "Joins ", "Operating Systems", ""] {
        assert!(graph.find_concept_by_title(query).is_none(), "query {query:?}");
    }
}

#[test]
fn parent_lookup_matches_containment() {
    let graph = sample_graph();
    assert_eq!(graph.find_parent_concept("Joins").unwrap().title, "SQL");
    assert_eq!(
        graph.find_parent_concept("Transactions").unwrap().title,
        "Databases",
    );
    assert!(graph.find_parent_concept("Databases").is_none());
    assert!(graph.find_parent_concept("Machine Learning").is_none());
}

#[test]
fn update_is_visible_and_everything_else_is_shared() {
    let graph = sample_graph();
    let updated = graph.update_concept_description("SQL", Some("query language".into()));

    assert_eq!(
        updated
            .find_concept_by_title("SQL")
            .unwrap()
            .description
            .as_deref(),
        Some("query language"),
    );

    // The untouched root and the untouched sibling subtree are the same
    // allocations as before, not copies.
    assert!(Arc::ptr_eq(&graph.concepts[1], &updated.concepts[1]));
    let old_transactions = &graph.concepts[0].children()[1];
    let new_transactions = &updated.concepts[0].children()[1];
    assert!(Arc::ptr_eq(old_transactions, new_transactions));

    // The original graph still carries the old description.
    assert!(graph
        .find_concept_by_title("SQL")
        .unwrap()
        .description
        .is_none());
}

#[test]
fn update_of_missing_title_returns_equal_graph() {
    let graph = sample_graph();
    let updated = graph.update_concept_description("Nothing Here", Some("x".into()));
    assert_eq!(updated, graph);
}

#[test]
fn stale_references_resolve_against_the_new_graph() {
    // The workflow callers follow after any update: re-resolve held
    // selections by title, because old concept references are stale.
    let graph = sample_graph();
    let stale = graph.find_concept_by_title("SQL").cloned().unwrap();
    let updated = graph.update_concept_description("SQL", Some("fresh".into()));

    assert!(stale.description.is_none());
    let fresh = updated.find_concept_by_title(&stale.title).unwrap();
    assert_eq!(fresh.description.as_deref(), Some("fresh"));
}

#[test]
fn import_export_round_trip_preserves_document() {
    let doc = r#"{"concepts":[{"title":"A","description":null,"related":["B"],"source":null,"consist_of":[{"title":"A1","description":"leaf","related":null,"source":"notes.md","consist_of":null}]}]}"#;
    let graph = import_graph(doc).unwrap();
    let exported = export_value(&graph).unwrap();
    let original: serde_json::Value = serde_json::from_str(doc).unwrap();
    assert_eq!(exported, original);
}

#[test]
fn import_rejects_wrong_shapes_without_side_effects() {
    assert!(matches!(
        import_graph("not json at all"),
        Err(CodecError::Parse(_))
    ));
    assert!(matches!(
        import_graph(r#""just a string""#),
        Err(CodecError::NotAnObject { .. })
    ));
    assert!(matches!(
        import_graph(r#"{"concepts":42}"#),
        Err(CodecError::MissingConcepts)
    ));
}

#[test]
fn export_then_import_is_identity_for_builder_graphs() {
    let graph = KnowledgeGraph::from_roots(vec![
        Concept::new("Root")
            .with_description("top")
            .with_related(["Elsewhere"])
            .with_children(vec![Concept::new("Child")]),
    ]);
    let round_tripped = import_graph(&export_graph(&graph).unwrap()).unwrap();
    assert_eq!(round_tripped, graph);
}
