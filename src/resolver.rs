//! Title-based concept resolution for cross-link navigation.
//!
//! [`resolve`] runs a strictly ordered cascade of matching stages and
//! returns the first success. Earlier stages are strict; the final
//! substring stage is deliberately loose so a `related` title like
//! `"Learning"` still lands on `"Machine Learning"`. The stage that
//! produced a hit travels with the result, so callers can treat a
//! [`MatchStage::Substring`] hit as lower confidence without the cascade
//! itself ranking or scoring anything — first match in traversal order
//! wins, full stop.
//!
//! A miss is an ordinary `None`, never an error.
//!
//! # Examples
//!
//! ```
//! use loregraph::concept::{Concept, KnowledgeGraph};
//! use loregraph::resolver::{resolve, MatchStage};
//!
//! let graph = KnowledgeGraph::from_roots(vec![Concept::new("Machine Learning")]);
//!
//! let hit = resolve(&graph, "machine learning ").unwrap();
//! assert_eq!(hit.stage, MatchStage::TrimmedCaseInsensitive);
//!
//! let fuzzy = resolve(&graph, "Learning").unwrap();
//! assert_eq!(fuzzy.stage, MatchStage::Substring);
//! assert!(fuzzy.stage.is_fuzzy());
//!
//! assert!(resolve(&graph, "Quantum").is_none());
//! ```

use std::sync::Arc;

use crate::concept::{Concept, KnowledgeGraph};

/// The cascade stage that produced a resolver hit, in cascade order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchStage {
    /// Exact title equality.
    Exact,
    /// Equal ignoring ASCII-agnostic case (Unicode lowercasing).
    CaseInsensitive,
    /// Equal after trimming surrounding whitespace.
    Trimmed,
    /// Equal after trimming and lowercasing.
    TrimmedCaseInsensitive,
    /// One trimmed, lowercased title contains the other.
    Substring,
}

impl MatchStage {
    /// `true` for the substring stage — a plausible but unverified match
    /// that callers should treat as lower confidence than stages 1–4.
    #[must_use]
    pub fn is_fuzzy(&self) -> bool {
        matches!(self, MatchStage::Substring)
    }
}

/// A resolver hit: the concept plus the stage that matched it.
#[derive(Clone, Debug)]
pub struct ResolvedConcept {
    /// The matched concept.
    pub concept: Arc<Concept>,
    /// Which cascade stage produced the match.
    pub stage: MatchStage,
}

/// Resolves `query` against the forest, first matching stage wins.
///
/// Stages run in order over the whole forest (depth-first, document
/// order), so an exact match anywhere beats a fuzzy match everywhere.
#[must_use]
pub fn resolve(graph: &KnowledgeGraph, query: &str) -> Option<ResolvedConcept> {
    let candidates: Vec<&Arc<Concept>> = graph.iter_depth_first().collect();

    let query_lower = query.to_lowercase();
    let query_trimmed = query.trim();
    let query_folded = query_trimmed.to_lowercase();

    let found = first(&candidates, |t| t == query)
        .map(|c| hit(c, MatchStage::Exact))
        .or_else(|| {
            first(&candidates, |t| t.to_lowercase() == query_lower)
                .map(|c| hit(c, MatchStage::CaseInsensitive))
        })
        .or_else(|| {
            first(&candidates, |t| t.trim() == query_trimmed)
                .map(|c| hit(c, MatchStage::Trimmed))
        })
        .or_else(|| {
            first(&candidates, |t| t.trim().to_lowercase() == query_folded)
                .map(|c| hit(c, MatchStage::TrimmedCaseInsensitive))
        })
        .or_else(|| {
            if query_folded.is_empty() {
                return None;
            }
            first(&candidates, |t| {
                let folded = t.trim().to_lowercase();
                folded.contains(&query_folded) || query_folded.contains(&folded)
            })
            .map(|c| hit(c, MatchStage::Substring))
        });

    match &found {
        Some(resolved) => {
            tracing::trace!(query, stage = ?resolved.stage, title = %resolved.concept.title, "resolver hit");
        }
        None => tracing::trace!(query, "resolver miss"),
    }
    found
}

fn first<'a>(
    candidates: &[&'a Arc<Concept>],
    matches: impl Fn(&str) -> bool,
) -> Option<&'a Arc<Concept>> {
    candidates.iter().copied().find(|c| matches(&c.title))
}

fn hit(concept: &Arc<Concept>, stage: MatchStage) -> ResolvedConcept {
    ResolvedConcept {
        concept: Arc::clone(concept),
        stage,
    }
}
