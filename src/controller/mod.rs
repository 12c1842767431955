//! Selection and editing state machine.
//!
//! The controller sits between the rendering surface and the graph owner.
//! It interprets node picks, manages the `Browsing → Selected → Editing`
//! lifecycle, commits description edits through the store, and drives the
//! busy-gated rewrite round-trip. Selections are held by title, never by
//! concept reference: every graph write invalidates old references, so
//! the controller re-resolves after each one and silently clears a
//! selection whose title no longer exists.
//!
//! Two rules keep edits safe:
//! - an explicit Cancel is the only way to discard a draft; picking
//!   another node while editing auto-commits a dirty draft first;
//! - a failed rewrite changes nothing — the prior graph and selection
//!   stay exactly as they were.

mod centering;

pub use centering::{CenterScheduler, ViewportCommands, DEFAULT_CENTER_HOLD};

use std::sync::Arc;
use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

use crate::concept::{Concept, KnowledgeGraph};
use crate::layout::node_id;
use crate::resolver;
use crate::services::{GraphRewriter, ServiceError};
use crate::store::{GraphEvent, GraphOrigin, GraphStore};

/// Where the controller currently is in the interaction lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Interaction {
    /// Nothing selected.
    Browsing,
    /// A concept is selected, identified by title.
    Selected { title: String },
    /// The selected concept's description is being edited.
    Editing {
        title: String,
        /// Description as it was when the edit began (empty for `null`).
        original: String,
        /// Current draft text.
        draft: String,
    },
}

impl Interaction {
    /// The selected title, in either `Selected` or `Editing`.
    #[must_use]
    pub fn selected_title(&self) -> Option<&str> {
        match self {
            Interaction::Browsing => None,
            Interaction::Selected { title } | Interaction::Editing { title, .. } => Some(title),
        }
    }
}

/// Misuses of the interaction lifecycle.
#[derive(Debug, Error, Diagnostic)]
pub enum InteractionError {
    /// An edit operation arrived outside the `Editing` state.
    #[error("no edit in progress")]
    #[diagnostic(code(loregraph::controller::no_edit))]
    NoEditInProgress,

    /// Editing was requested with nothing selected.
    #[error("nothing is selected")]
    #[diagnostic(code(loregraph::controller::no_selection))]
    NoSelection,
}

/// Default deadline for a rewrite round-trip.
pub const DEFAULT_REWRITE_TIMEOUT: Duration = Duration::from_secs(120);

/// Drives selection, editing, centering, and rewrites over a [`GraphStore`].
///
/// # Examples
///
/// ```
/// use loregraph::concept::{Concept, KnowledgeGraph};
/// use loregraph::controller::{Interaction, InteractionController};
/// use loregraph::store::GraphStore;
///
/// let store = GraphStore::with_graph(KnowledgeGraph::from_roots(vec![Concept::new("A")]));
/// let mut controller = InteractionController::new(store);
///
/// let concept = controller.graph().find_concept_by_title("A").cloned().unwrap();
/// controller.pick(Some(concept.as_ref()));
/// assert_eq!(controller.state().selected_title(), Some("A"));
///
/// controller.begin_edit().unwrap();
/// controller.set_draft("a root topic").unwrap();
/// controller.save().unwrap();
///
/// assert!(matches!(controller.state(), Interaction::Selected { .. }));
/// assert_eq!(
///     controller.graph().find_concept_by_title("A").unwrap().description.as_deref(),
///     Some("a root topic"),
/// );
/// ```
pub struct InteractionController {
    store: GraphStore,
    state: Interaction,
    centering: CenterScheduler,
    rewrite_timeout: Duration,
}

impl InteractionController {
    /// Wraps a store with a fresh `Browsing` state.
    #[must_use]
    pub fn new(store: GraphStore) -> Self {
        Self {
            store,
            state: Interaction::Browsing,
            centering: CenterScheduler::new(),
            rewrite_timeout: DEFAULT_REWRITE_TIMEOUT,
        }
    }

    /// Overrides the rewrite deadline.
    #[must_use]
    pub fn with_rewrite_timeout(mut self, timeout: Duration) -> Self {
        self.rewrite_timeout = timeout;
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> &Interaction {
        &self.state
    }

    /// Current graph snapshot.
    #[must_use]
    pub fn graph(&self) -> Arc<KnowledgeGraph> {
        self.store.graph()
    }

    /// Subscribes to graph write notifications.
    pub fn subscribe(&mut self) -> flume::Receiver<GraphEvent> {
        self.store.subscribe()
    }

    /// The selected concept resolved against the *current* graph, or
    /// `None` when browsing or when the held title has vanished.
    #[must_use]
    pub fn selected_concept(&self) -> Option<Arc<Concept>> {
        let title = self.state.selected_title()?;
        self.store.graph().find_concept_by_title(title).cloned()
    }

    /// Handles a node pick reported by the rendering surface.
    ///
    /// `None` (a click that resolved to nothing) returns to `Browsing`.
    /// If an edit is in progress and the draft differs from the original,
    /// the edit is committed before the new selection takes effect —
    /// navigation never silently discards an edit.
    pub fn pick(&mut self, concept: Option<&Concept>) {
        self.commit_dirty_draft();
        self.state = match concept {
            Some(concept) => {
                tracing::debug!(title = %concept.title, "node picked");
                Interaction::Selected {
                    title: concept.title.clone(),
                }
            }
            None => {
                tracing::debug!("pick resolved to nothing; back to browsing");
                Interaction::Browsing
            }
        };
    }

    /// Starts editing the selected concept's description.
    ///
    /// The draft starts from the current description, empty string for
    /// `null`. Errors when nothing is selected; a second `begin_edit`
    /// while already editing keeps the existing draft.
    pub fn begin_edit(&mut self) -> Result<(), InteractionError> {
        match &self.state {
            Interaction::Editing { .. } => Ok(()),
            Interaction::Selected { title } => {
                let original = self
                    .store
                    .graph()
                    .find_concept_by_title(title)
                    .and_then(|c| c.description.clone())
                    .unwrap_or_default();
                self.state = Interaction::Editing {
                    title: title.clone(),
                    draft: original.clone(),
                    original,
                };
                Ok(())
            }
            Interaction::Browsing => Err(InteractionError::NoSelection),
        }
    }

    /// Replaces the draft text. Errors outside `Editing`.
    pub fn set_draft(&mut self, text: impl Into<String>) -> Result<(), InteractionError> {
        match &mut self.state {
            Interaction::Editing { draft, .. } => {
                *draft = text.into();
                Ok(())
            }
            _ => Err(InteractionError::NoEditInProgress),
        }
    }

    /// Commits the draft through the store and returns to `Selected`,
    /// re-resolving the selection against the new graph.
    pub fn save(&mut self) -> Result<(), InteractionError> {
        match std::mem::replace(&mut self.state, Interaction::Browsing) {
            Interaction::Editing { title, draft, .. } => {
                self.store.update_description(&title, Some(draft));
                self.state = self.reselect(title);
                Ok(())
            }
            other => {
                self.state = other;
                Err(InteractionError::NoEditInProgress)
            }
        }
    }

    /// Discards the draft and returns to `Selected`; the selection is
    /// unchanged. This is the only path that throws away an edit.
    pub fn cancel(&mut self) -> Result<(), InteractionError> {
        match std::mem::replace(&mut self.state, Interaction::Browsing) {
            Interaction::Editing { title, .. } => {
                self.state = Interaction::Selected { title };
                Ok(())
            }
            other => {
                self.state = other;
                Err(InteractionError::NoEditInProgress)
            }
        }
    }

    /// Installs a new graph (upload, import) and re-resolves the
    /// selection by title; a vanished title silently clears it.
    pub fn replace_graph(&mut self, graph: KnowledgeGraph, origin: GraphOrigin) {
        self.commit_dirty_draft();
        self.store.replace(graph, origin);
        if let Some(title) = self.state.selected_title().map(str::to_string) {
            self.state = self.reselect(title);
        }
        self.centering.cancel();
    }

    /// Centers the view on the concept best matching `title`, via the
    /// resolver cascade. Returns `false` on a resolver miss (no request
    /// is issued). Must be called from within a tokio runtime.
    pub fn center_on(&mut self, viewport: Arc<dyn ViewportCommands>, title: &str) -> bool {
        match resolver::resolve(&self.store.graph(), title) {
            Some(hit) => {
                self.centering
                    .request(viewport, node_id(&hit.concept.title));
                true
            }
            None => {
                tracing::debug!(title, "center request for unresolvable title ignored");
                false
            }
        }
    }

    /// `true` while a center request's hold window is open.
    #[must_use]
    pub fn centering_pending(&self) -> bool {
        self.centering.is_pending()
    }

    /// Runs the busy-gated rewrite round-trip.
    ///
    /// A dirty draft is committed first so the payload carries the user's
    /// latest text. While one rewrite is in flight, further requests are
    /// refused with [`ServiceError::RewriteInFlight`]. On success the
    /// returned graph replaces the current one wholesale and the
    /// selection re-resolves; on failure (including timeout) the prior
    /// graph and selection are retained unchanged.
    pub async fn request_rewrite(
        &mut self,
        service: &dyn GraphRewriter,
        instruction: &str,
    ) -> Result<(), ServiceError> {
        if !self.store.begin_rewrite() {
            return Err(ServiceError::RewriteInFlight);
        }
        self.commit_dirty_draft();

        let request_id = uuid::Uuid::new_v4();
        tracing::info!(%request_id, instruction, "requesting graph rewrite");
        let current = self.store.graph();
        let outcome = tokio::time::timeout(
            self.rewrite_timeout,
            service.rewrite(&current, instruction),
        )
        .await
        .unwrap_or(Err(ServiceError::Timeout {
            seconds: self.rewrite_timeout.as_secs(),
        }));
        self.store.finish_rewrite();

        match outcome {
            Ok(graph) => {
                self.replace_graph(graph, GraphOrigin::Rewrite);
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%request_id, %error, "rewrite failed; prior graph retained");
                Err(error)
            }
        }
    }

    /// Commits an in-progress edit whose draft differs from the original.
    fn commit_dirty_draft(&mut self) {
        let Interaction::Editing {
            title,
            original,
            draft,
        } = &self.state
        else {
            return;
        };
        let dirty = draft != original;
        let (title, draft) = (title.clone(), draft.clone());
        if dirty {
            tracing::debug!(%title, "auto-committing pending edit");
            self.store.update_description(&title, Some(draft));
            self.state = self.reselect(title);
        } else {
            // Clean draft: fold back to plain selection.
            self.state = Interaction::Selected { title };
        }
    }

    /// Re-resolves a held title against the current graph.
    fn reselect(&self, title: String) -> Interaction {
        if self.store.graph().find_concept_by_title(&title).is_some() {
            Interaction::Selected { title }
        } else {
            tracing::debug!(%title, "selected title vanished; clearing selection");
            Interaction::Browsing
        }
    }
}
