//! Property tests for the model invariants and the exchange codec.

use loregraph::concept::{Concept, KnowledgeGraph};
use loregraph::model::{export_graph, import_graph};
use proptest::prelude::*;

/// Titles that are stable under the resolver-style normalizations used in
/// exact lookup (no surrounding whitespace, non-empty).
fn title_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z0-9 ]{0,14}[A-Za-z0-9]").unwrap()
}

fn concept_strategy() -> impl Strategy<Value = Concept> {
    let leaf = (
        title_strategy(),
        prop::option::of(".{0,20}"),
        prop::option::of(prop::collection::vec(title_strategy(), 0..3)),
        prop::option::of("[a-z]{1,8}\\.md"),
    )
        .prop_map(|(title, description, related, source)| Concept {
            title,
            description,
            related,
            source,
            consist_of: None,
        });

    leaf.prop_recursive(3, 24, 4, |inner| {
        (
            title_strategy(),
            prop::option::of(".{0,20}"),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(title, description, children)| {
                let mut concept = Concept::new(title);
                concept.description = description;
                if !children.is_empty() {
                    concept = concept.with_children(children);
                }
                concept
            })
    })
}

fn graph_strategy() -> impl Strategy<Value = KnowledgeGraph> {
    prop::collection::vec(concept_strategy(), 0..4).prop_map(KnowledgeGraph::from_roots)
}

proptest! {
    /// Every title present in the forest is findable, and the hit carries
    /// that exact title.
    #[test]
    fn find_returns_concept_with_queried_title(graph in graph_strategy()) {
        let titles: Vec<String> =
            graph.iter_depth_first().map(|c| c.title.clone()).collect();
        for title in titles {
            let hit = graph.find_concept_by_title(&title);
            prop_assert!(hit.is_some());
            prop_assert_eq!(&hit.unwrap().title, &title);
        }
    }

    /// Updating a description makes exactly that description visible and
    /// leaves the total concept count untouched.
    #[test]
    fn update_changes_only_the_target(graph in graph_strategy(), text in ".{0,30}") {
        let Some(target) = graph.iter_depth_first().next().map(|c| c.title.clone()) else {
            return Ok(()); // empty forest: nothing to update
        };
        let updated = graph.update_concept_description(&target, Some(text.clone()));

        prop_assert_eq!(
            updated.find_concept_by_title(&target).unwrap().description.as_deref(),
            Some(text.as_str()),
        );
        prop_assert_eq!(
            updated.iter_depth_first().count(),
            graph.iter_depth_first().count(),
        );
    }

    /// The exchange codec round-trips any representable graph.
    #[test]
    fn codec_round_trip(graph in graph_strategy()) {
        let json = export_graph(&graph).unwrap();
        let back = import_graph(&json).unwrap();
        prop_assert_eq!(back, graph);
    }
}
