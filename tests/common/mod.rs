//! Shared fixtures and doubles for the integration suites.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use loregraph::concept::{Concept, KnowledgeGraph};
use loregraph::controller::ViewportCommands;
use loregraph::services::{GraphRewriter, ServiceError};

/// A small forest exercising containment, cross-references, and an
/// unresolved `related` target:
///
/// ```text
/// Databases ─┬─ SQL ── Joins
///            └─ Transactions        related: ["Operating Systems"]
/// Machine Learning
/// ```
#[allow(dead_code)]
pub fn sample_graph() -> KnowledgeGraph {
    KnowledgeGraph::from_roots(vec![
        Concept::new("Databases")
            .with_description("Persistent, queryable state")
            .with_related(["Operating Systems"])
            .with_children(vec![
                Concept::new("SQL").with_children(vec![Concept::new("Joins")]),
                Concept::new("Transactions"),
            ]),
        Concept::new("Machine Learning"),
    ])
}

/// Viewport double that records every fit-view command it receives.
#[derive(Default)]
pub struct RecordingViewport {
    pub fitted: Mutex<Vec<String>>,
}

impl ViewportCommands for RecordingViewport {
    fn fit_to_node(&self, node_id: &str) {
        self.fitted.lock().unwrap().push(node_id.to_string());
    }
}

/// Rewriter double returning a fixed graph.
pub struct FixedRewriter {
    pub graph: KnowledgeGraph,
    pub calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl FixedRewriter {
    pub fn returning(graph: KnowledgeGraph) -> Self {
        Self {
            graph,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl GraphRewriter for FixedRewriter {
    async fn rewrite(
        &self,
        _graph: &KnowledgeGraph,
        instruction: &str,
    ) -> Result<KnowledgeGraph, ServiceError> {
        self.calls.lock().unwrap().push(instruction.to_string());
        Ok(self.graph.clone())
    }
}

/// Rewriter double that always fails with a transport error.
pub struct FailingRewriter;

#[async_trait]
impl GraphRewriter for FailingRewriter {
    async fn rewrite(
        &self,
        _graph: &KnowledgeGraph,
        _instruction: &str,
    ) -> Result<KnowledgeGraph, ServiceError> {
        Err(ServiceError::Transport {
            message: "connection refused".to_string(),
        })
    }
}

/// Rewriter double that never completes within any finite deadline.
pub struct StalledRewriter;

#[async_trait]
impl GraphRewriter for StalledRewriter {
    async fn rewrite(
        &self,
        _graph: &KnowledgeGraph,
        _instruction: &str,
    ) -> Result<KnowledgeGraph, ServiceError> {
        std::future::pending().await
    }
}

/// Rewriter double that records the graph payload it was handed.
pub struct CapturingRewriter {
    pub graph: KnowledgeGraph,
    pub seen: Arc<Mutex<Option<KnowledgeGraph>>>,
}

#[async_trait]
impl GraphRewriter for CapturingRewriter {
    async fn rewrite(
        &self,
        graph: &KnowledgeGraph,
        _instruction: &str,
    ) -> Result<KnowledgeGraph, ServiceError> {
        *self.seen.lock().unwrap() = Some(graph.clone());
        Ok(self.graph.clone())
    }
}
