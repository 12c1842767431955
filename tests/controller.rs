//! Integration tests for the interaction state machine, centering, and
//! the busy-gated rewrite round-trip.

mod common;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{
    sample_graph, CapturingRewriter, FailingRewriter, FixedRewriter, RecordingViewport,
    StalledRewriter,
};
use loregraph::concept::{Concept, KnowledgeGraph};
use loregraph::controller::{Interaction, InteractionController, DEFAULT_CENTER_HOLD};
use loregraph::services::ServiceError;
use loregraph::store::{GraphChange, GraphOrigin, GraphStore};

fn controller() -> InteractionController {
    InteractionController::new(GraphStore::with_graph(sample_graph()))
}

fn pick_by_title(c: &mut InteractionController, title: &str) {
    let concept = c.graph().find_concept_by_title(title).cloned().unwrap();
    c.pick(Some(concept.as_ref()));
}

#[test]
fn full_select_edit_save_cycle() {
    let mut c = controller();
    pick_by_title(&mut c, "SQL");
    c.begin_edit().unwrap();
    c.set_draft("declarative querying").unwrap();
    c.save().unwrap();

    assert_eq!(*c.state(), Interaction::Selected { title: "SQL".into() });
    assert_eq!(
        c.selected_concept().unwrap().description.as_deref(),
        Some("declarative querying"),
    );
}

#[test]
fn navigation_during_edit_commits_dirty_draft() {
    let mut c = controller();
    let events = c.subscribe();

    pick_by_title(&mut c, "SQL");
    c.begin_edit().unwrap();
    c.set_draft("half-finished thought").unwrap();
    pick_by_title(&mut c, "Transactions");

    assert_eq!(c.state().selected_title(), Some("Transactions"));
    assert_eq!(
        c.graph()
            .find_concept_by_title("SQL")
            .unwrap()
            .description
            .as_deref(),
        Some("half-finished thought"),
    );
    assert!(matches!(
        events.try_recv().unwrap().change,
        GraphChange::DescriptionUpdated { ref title } if title == "SQL",
    ));
}

#[test]
fn cancel_is_the_only_path_that_discards() {
    let mut c = controller();
    pick_by_title(&mut c, "Databases");
    c.begin_edit().unwrap();
    c.set_draft("scribbles").unwrap();
    c.cancel().unwrap();

    assert_eq!(
        c.selected_concept().unwrap().description.as_deref(),
        Some("Persistent, queryable state"),
    );
}

#[tokio::test]
async fn successful_rewrite_replaces_graph_and_reresolves() {
    let mut c = controller();
    pick_by_title(&mut c, "SQL");

    let replacement = KnowledgeGraph::from_roots(vec![
        Concept::new("SQL").with_description("from the rewriter"),
    ]);
    let service = FixedRewriter::returning(replacement);
    c.request_rewrite(&service, "focus on SQL only").await.unwrap();

    assert_eq!(c.state().selected_title(), Some("SQL"));
    assert_eq!(
        c.selected_concept().unwrap().description.as_deref(),
        Some("from the rewriter"),
    );
    assert_eq!(
        service.calls.lock().unwrap().as_slice(),
        ["focus on SQL only".to_string()],
    );
}

#[tokio::test]
async fn rewrite_clears_selection_when_title_vanishes() {
    let mut c = controller();
    pick_by_title(&mut c, "Joins");

    let service =
        FixedRewriter::returning(KnowledgeGraph::from_roots(vec![Concept::new("Other")]));
    c.request_rewrite(&service, "drop everything").await.unwrap();

    assert_eq!(*c.state(), Interaction::Browsing);
}

#[tokio::test]
async fn failed_rewrite_retains_graph_and_selection() {
    let mut c = controller();
    pick_by_title(&mut c, "SQL");
    let before = c.graph();

    let err = c
        .request_rewrite(&FailingRewriter, "anything")
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Transport { .. }));
    assert!(Arc::ptr_eq(&before, &c.graph()));
    assert_eq!(c.state().selected_title(), Some("SQL"));
    // The busy flag is released: the next attempt is not refused as
    // in-flight.
    let err = c
        .request_rewrite(&FailingRewriter, "again")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Transport { .. }));
}

#[tokio::test(start_paused = true)]
async fn stalled_rewrite_times_out_and_retains_graph() {
    let mut c = controller().with_rewrite_timeout(Duration::from_secs(2));
    let before = c.graph();

    let outcome = c.request_rewrite(&StalledRewriter, "hang").await;

    assert!(matches!(outcome, Err(ServiceError::Timeout { seconds: 2 })));
    assert!(Arc::ptr_eq(&before, &c.graph()));
}

#[tokio::test]
async fn rewrite_payload_carries_the_pending_edit() {
    let mut c = controller();
    pick_by_title(&mut c, "SQL");
    c.begin_edit().unwrap();
    c.set_draft("latest text").unwrap();

    let seen = Arc::new(Mutex::new(None));
    let service = CapturingRewriter {
        graph: sample_graph(),
        seen: Arc::clone(&seen),
    };
    c.request_rewrite(&service, "rewrite please").await.unwrap();

    let sent = seen.lock().unwrap().clone().unwrap();
    assert_eq!(
        sent.find_concept_by_title("SQL").unwrap().description.as_deref(),
        Some("latest text"),
    );
}

#[tokio::test(start_paused = true)]
async fn centering_resolves_fuzzily_and_supersedes() {
    let mut c = controller();
    let viewport = Arc::new(RecordingViewport::default());

    assert!(c.center_on(viewport.clone(), "machine learning "));
    assert!(c.centering_pending());

    // A second request supersedes the first; both commands were issued.
    assert!(c.center_on(viewport.clone(), "Joins"));
    assert_eq!(
        viewport.fitted.lock().unwrap().as_slice(),
        ["Machine Learning".to_string(), "Joins".to_string()],
    );

    tokio::time::sleep(DEFAULT_CENTER_HOLD + Duration::from_millis(10)).await;
    assert!(!c.centering_pending());
}

#[tokio::test]
async fn centering_miss_issues_nothing() {
    let mut c = controller();
    let viewport = Arc::new(RecordingViewport::default());
    assert!(!c.center_on(viewport.clone(), "No Such Topic"));
    assert!(viewport.fitted.lock().unwrap().is_empty());
    assert!(!c.centering_pending());
}

#[test]
fn import_style_replacement_reresolves_selection() {
    let mut c = controller();
    pick_by_title(&mut c, "SQL");

    c.replace_graph(
        KnowledgeGraph::from_roots(vec![Concept::new("SQL")]),
        GraphOrigin::Import,
    );
    assert_eq!(c.state().selected_title(), Some("SQL"));

    c.replace_graph(KnowledgeGraph::new(), GraphOrigin::Import);
    assert_eq!(*c.state(), Interaction::Browsing);
}
