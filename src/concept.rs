//! Core data model: concepts and the knowledge graph that owns them.
//!
//! A [`Concept`] is one learnable topic. Concepts form a strict containment
//! tree through `consist_of` (a parent exclusively owns its children) and an
//! ordered forest of such trees makes up a [`KnowledgeGraph`]. Cross-cutting
//! references between topics are expressed by title in `related`; they are
//! names, not owned links, and are not guaranteed to resolve to an existing
//! concept.
//!
//! Children are held behind [`Arc`] so that immutable updates
//! (see [`KnowledgeGraph::update_concept_description`]) can copy only the
//! path from a root to the changed concept while sharing every untouched
//! subtree by reference.
//!
//! # Wire format
//!
//! The model serializes to the exchange schema used by the generation and
//! rewrite services:
//!
//! ```json
//! {
//!   "concepts": [
//!     {
//!       "title": "Databases",
//!       "description": null,
//!       "related": ["SQL"],
//!       "source": null,
//!       "consist_of": [ ... ]
//!     }
//!   ]
//! }
//! ```
//!
//! Nullable fields serialize as `null` (never omitted), so a well-formed
//! document round-trips byte-for-byte at the value level.
//!
//! # Examples
//!
//! ```
//! use loregraph::concept::{Concept, KnowledgeGraph};
//!
//! let graph = KnowledgeGraph::from_roots(vec![
//!     Concept::new("Databases")
//!         .with_description("Persistent, queryable state")
//!         .with_related(["Operating Systems"])
//!         .with_children(vec![
//!             Concept::new("SQL"),
//!             Concept::new("Transactions"),
//!         ]),
//! ]);
//!
//! assert_eq!(graph.root_count(), 1);
//! assert!(graph.find_concept_by_title("Transactions").is_some());
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One learnable topic in the knowledge forest.
///
/// Identity is the `title` string: lookups, node derivation, and selection
/// tracking all key on it. Two concepts sharing a title anywhere in the
/// forest collapse into a single rendered node — a documented limitation of
/// the model, surfaced as a diagnostic by the layout pass rather than
/// silently repaired.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    /// Title of the topic; the sole identity key.
    pub title: String,
    /// Editable free-text description; `null` on the wire when absent.
    #[serde(default)]
    pub description: Option<String>,
    /// Ordered cross-reference titles. Not guaranteed to resolve.
    #[serde(default)]
    pub related: Option<Vec<String>>,
    /// Provenance tag (e.g. the document the concept was extracted from).
    #[serde(default)]
    pub source: Option<String>,
    /// Exclusively owned sub-concepts; containment forms a strict tree.
    #[serde(default)]
    pub consist_of: Option<Vec<Arc<Concept>>>,
}

impl Concept {
    /// Creates a leaf concept with the given title and no other data.
    ///
    /// # Examples
    ///
    /// ```
    /// use loregraph::concept::Concept;
    ///
    /// let c = Concept::new("Indexes");
    /// assert_eq!(c.title, "Indexes");
    /// assert!(c.description.is_none());
    /// assert!(c.children().is_empty());
    /// ```
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            related: None,
            source: None,
            consist_of: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the ordered cross-reference titles.
    #[must_use]
    pub fn with_related<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related = Some(titles.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the provenance tag.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the owned children, wrapping each in an [`Arc`].
    #[must_use]
    pub fn with_children(mut self, children: Vec<Concept>) -> Self {
        self.consist_of = Some(children.into_iter().map(Arc::new).collect());
        self
    }

    /// The owned children as a slice; empty for leaves and for `null`
    /// `consist_of` alike.
    #[must_use]
    pub fn children(&self) -> &[Arc<Concept>] {
        self.consist_of.as_deref().unwrap_or(&[])
    }

    /// The cross-reference titles as a slice; empty when `related` is
    /// `null`.
    #[must_use]
    pub fn related_titles(&self) -> &[String] {
        self.related.as_deref().unwrap_or(&[])
    }
}

/// Top-level container holding an ordered forest of root concepts.
///
/// A graph is created by document upload, JSON import, or an AI rewrite,
/// and is only ever replaced wholesale — individual concepts are never
/// mutated in place. Edits produce a new graph via path-copy (see
/// [`update_concept_description`](Self::update_concept_description)).
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    /// Ordered root concepts.
    pub concepts: Vec<Arc<Concept>>,
}

impl KnowledgeGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph from owned root concepts.
    ///
    /// # Examples
    ///
    /// ```
    /// use loregraph::concept::{Concept, KnowledgeGraph};
    ///
    /// let graph = KnowledgeGraph::from_roots(vec![Concept::new("A"), Concept::new("B")]);
    /// assert_eq!(graph.root_count(), 2);
    /// ```
    #[must_use]
    pub fn from_roots(roots: Vec<Concept>) -> Self {
        Self {
            concepts: roots.into_iter().map(Arc::new).collect(),
        }
    }

    /// Number of root concepts in the forest.
    #[must_use]
    pub fn root_count(&self) -> usize {
        self.concepts.len()
    }

    /// Returns `true` when the forest has no roots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_round_trip() {
        let c = Concept::new("Databases")
            .with_description("desc")
            .with_related(["SQL"])
            .with_source("notes.md")
            .with_children(vec![Concept::new("Indexes")]);
        assert_eq!(c.title, "Databases");
        assert_eq!(c.description.as_deref(), Some("desc"));
        assert_eq!(c.related_titles(), ["SQL".to_string()]);
        assert_eq!(c.source.as_deref(), Some("notes.md"));
        assert_eq!(c.children().len(), 1);
        assert_eq!(c.children()[0].title, "Indexes");
    }

    #[test]
    fn nullable_fields_serialize_as_null() {
        let json = serde_json::to_value(Concept::new("A")).unwrap();
        assert_eq!(json["title"], "A");
        assert!(json["description"].is_null());
        assert!(json["related"].is_null());
        assert!(json["source"].is_null());
        assert!(json["consist_of"].is_null());
    }

    #[test]
    fn serde_round_trip_preserves_structure() {
        let graph = KnowledgeGraph::from_roots(vec![
            Concept::new("A")
                .with_related(["B"])
                .with_children(vec![Concept::new("A1")]),
        ]);
        let json = serde_json::to_string(&graph).unwrap();
        let parsed: KnowledgeGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, graph);
    }

    #[test]
    fn missing_nullable_fields_default_to_none() {
        let parsed: Concept = serde_json::from_str(r#"{"title":"A"}"#).unwrap();
        assert_eq!(parsed, Concept::new("A"));
    }
}
