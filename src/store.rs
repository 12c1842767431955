//! Single explicit owner of the current knowledge graph.
//!
//! All graph writes funnel through [`GraphStore`]: wholesale replacement
//! (upload, import, rewrite) and the one targeted edit the model supports
//! (description update). Readers receive cheap [`Arc`] snapshots; because
//! every write installs a new immutable graph, a snapshot taken before a
//! write simply keeps describing the old graph — there is no shared
//! mutable state and no locking.
//!
//! Consumers that need to react to writes subscribe for [`GraphEvent`]s
//! over a flume channel rather than polling. The store also carries the
//! rewrite busy flag: at most one rewrite round-trip may be in flight, and
//! a second attempt is refused rather than queued.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::concept::KnowledgeGraph;

/// How the current graph came to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphOrigin {
    /// Generated from uploaded documents.
    Upload,
    /// Imported from a JSON document.
    Import,
    /// Produced by the AI rewrite service.
    Rewrite,
}

/// What changed in a store write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphChange {
    /// The whole graph reference was replaced.
    Replaced {
        origin: GraphOrigin,
        concept_count: usize,
    },
    /// One concept's description was rewritten via path-copy.
    DescriptionUpdated { title: String },
}

/// A timestamped notification delivered to store subscribers.
#[derive(Clone, Debug)]
pub struct GraphEvent {
    /// When the write landed.
    pub when: DateTime<Utc>,
    /// What the write did.
    pub change: GraphChange,
}

impl GraphEvent {
    fn now(change: GraphChange) -> Self {
        Self {
            when: Utc::now(),
            change,
        }
    }
}

/// Owner of the current graph snapshot, writer entry point, and event
/// fan-out.
///
/// # Examples
///
/// ```
/// use loregraph::concept::{Concept, KnowledgeGraph};
/// use loregraph::store::{GraphChange, GraphOrigin, GraphStore};
///
/// let mut store = GraphStore::new();
/// let events = store.subscribe();
///
/// store.replace(
///     KnowledgeGraph::from_roots(vec![Concept::new("A")]),
///     GraphOrigin::Import,
/// );
///
/// assert_eq!(store.graph().root_count(), 1);
/// assert!(matches!(
///     events.try_recv().unwrap().change,
///     GraphChange::Replaced { origin: GraphOrigin::Import, .. },
/// ));
/// ```
#[derive(Default)]
pub struct GraphStore {
    graph: Arc<KnowledgeGraph>,
    subscribers: Vec<flume::Sender<GraphEvent>>,
    rewrite_in_flight: bool,
}

impl GraphStore {
    /// Creates a store holding an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `graph`.
    #[must_use]
    pub fn with_graph(graph: KnowledgeGraph) -> Self {
        Self {
            graph: Arc::new(graph),
            ..Self::default()
        }
    }

    /// The current graph snapshot. Cheap to clone and safe to hold; later
    /// writes never mutate it.
    #[must_use]
    pub fn graph(&self) -> Arc<KnowledgeGraph> {
        Arc::clone(&self.graph)
    }

    /// Subscribes to write notifications. Disconnected receivers are
    /// pruned on the next notification.
    pub fn subscribe(&mut self) -> flume::Receiver<GraphEvent> {
        let (tx, rx) = flume::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Replaces the graph wholesale. The prior graph's identity is
    /// discarded; holders of stale snapshots must re-resolve by title.
    pub fn replace(&mut self, graph: KnowledgeGraph, origin: GraphOrigin) {
        let concept_count = graph.iter_depth_first().count();
        tracing::info!(?origin, concept_count, "replacing knowledge graph");
        self.graph = Arc::new(graph);
        self.notify(GraphEvent::now(GraphChange::Replaced {
            origin,
            concept_count,
        }));
    }

    /// Rewrites one concept's description through the model's path-copy
    /// update. Returns `true` when the title was found; a miss leaves the
    /// graph untouched and emits nothing.
    pub fn update_description(&mut self, title: &str, description: Option<String>) -> bool {
        if self.graph.find_concept_by_title(title).is_none() {
            tracing::debug!(title, "description update for unknown title ignored");
            return false;
        }
        let updated = self.graph.update_concept_description(title, description);
        self.graph = Arc::new(updated);
        self.notify(GraphEvent::now(GraphChange::DescriptionUpdated {
            title: title.to_string(),
        }));
        true
    }

    /// `true` while a rewrite round-trip is in flight.
    #[must_use]
    pub fn rewrite_in_flight(&self) -> bool {
        self.rewrite_in_flight
    }

    /// Claims the rewrite slot. Returns `false` (and changes nothing) when
    /// a rewrite is already in flight — callers refuse re-entry instead of
    /// queueing.
    pub fn begin_rewrite(&mut self) -> bool {
        if self.rewrite_in_flight {
            return false;
        }
        self.rewrite_in_flight = true;
        true
    }

    /// Releases the rewrite slot, whatever the outcome of the round-trip.
    pub fn finish_rewrite(&mut self) {
        self.rewrite_in_flight = false;
    }

    fn notify(&mut self, event: GraphEvent) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}
