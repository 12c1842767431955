//! Title-keyed lookup over the concept forest.
//!
//! All traversal is depth-first in document order: roots in their stored
//! order, then each concept's `consist_of` children in theirs. That order
//! is part of the contract — "first match" everywhere in the crate means
//! first in this traversal.

use std::sync::Arc;

use crate::concept::{Concept, KnowledgeGraph};

/// Depth-first, document-order iterator over every concept in a forest.
///
/// Shared by lookup, the resolver, and the layout flatten pass so they all
/// agree on what "traversal order" means. The iterator visits a concept
/// before its children and does not deduplicate — callers that need
/// at-most-once semantics (the layout pass) keep their own visited set.
///
/// # Examples
///
/// ```
/// use loregraph::concept::{Concept, KnowledgeGraph};
/// use loregraph::model::DepthFirst;
///
/// let graph = KnowledgeGraph::from_roots(vec![
///     Concept::new("A").with_children(vec![Concept::new("A1")]),
///     Concept::new("B"),
/// ]);
///
/// let titles: Vec<&str> = DepthFirst::new(&graph.concepts)
///     .map(|c| c.title.as_str())
///     .collect();
/// assert_eq!(titles, ["A", "A1", "B"]);
/// ```
pub struct DepthFirst<'a> {
    stack: Vec<&'a Arc<Concept>>,
}

impl<'a> DepthFirst<'a> {
    /// Creates an iterator over the given roots and all their descendants.
    #[must_use]
    pub fn new(roots: &'a [Arc<Concept>]) -> Self {
        let mut stack: Vec<&'a Arc<Concept>> = roots.iter().collect();
        stack.reverse();
        Self { stack }
    }
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a Arc<Concept>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        // Children are pushed in reverse so they pop in document order.
        for child in next.children().iter().rev() {
            self.stack.push(child);
        }
        Some(next)
    }
}

impl KnowledgeGraph {
    /// Iterates every concept in the forest depth-first, document order.
    pub fn iter_depth_first(&self) -> DepthFirst<'_> {
        DepthFirst::new(&self.concepts)
    }

    /// Finds the first concept whose title equals `title` exactly.
    ///
    /// Depth-first search in document order; `None` on a miss. A miss is
    /// not an error — callers absorb it as "nothing selected" or fall back
    /// to the fuzzier [`resolver`](crate::resolver) cascade.
    ///
    /// # Examples
    ///
    /// ```
    /// use loregraph::concept::{Concept, KnowledgeGraph};
    ///
    /// let graph = KnowledgeGraph::from_roots(vec![
    ///     Concept::new("A").with_children(vec![Concept::new("A1")]),
    /// ]);
    /// assert_eq!(graph.find_concept_by_title("A1").unwrap().title, "A1");
    /// assert!(graph.find_concept_by_title("a1").is_none());
    /// ```
    #[must_use]
    pub fn find_concept_by_title(&self, title: &str) -> Option<&Arc<Concept>> {
        self.iter_depth_first().find(|c| c.title == title)
    }

    /// Finds the concept that contains the first concept titled `title`.
    ///
    /// Returns `None` for roots and for titles absent from the forest.
    /// Containment is a strict tree, so the first containing concept in
    /// traversal order is the only one for that occurrence.
    ///
    /// # Examples
    ///
    /// ```
    /// use loregraph::concept::{Concept, KnowledgeGraph};
    ///
    /// let graph = KnowledgeGraph::from_roots(vec![
    ///     Concept::new("A").with_children(vec![Concept::new("A1")]),
    /// ]);
    /// assert_eq!(graph.find_parent_concept("A1").unwrap().title, "A");
    /// assert!(graph.find_parent_concept("A").is_none());
    /// ```
    #[must_use]
    pub fn find_parent_concept(&self, title: &str) -> Option<&Arc<Concept>> {
        self.iter_depth_first()
            .find(|c| c.children().iter().any(|child| child.title == title))
    }
}
