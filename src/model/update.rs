//! Immutable graph updates via persistent-tree path-copy.
//!
//! An update never mutates the input graph. It rebuilds only the path from
//! a root down to the changed concept; every sibling subtree along that
//! path is carried over as an [`Arc`] clone, so the old and new graph share
//! all untouched structure by reference. Callers holding concept
//! references from the old graph must re-resolve them by title against the
//! returned graph.

use std::sync::Arc;

use crate::concept::{Concept, KnowledgeGraph};

impl KnowledgeGraph {
    /// Returns a new graph in which the first concept titled `title` has
    /// its description replaced by `description`.
    ///
    /// "First" means first in depth-first document order, matching
    /// [`find_concept_by_title`](Self::find_concept_by_title). When the
    /// title is absent the input graph is returned structurally unchanged
    /// — a no-op, not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use loregraph::concept::{Concept, KnowledgeGraph};
    ///
    /// let graph = KnowledgeGraph::from_roots(vec![
    ///     Concept::new("A").with_children(vec![Concept::new("A1")]),
    ///     Concept::new("B"),
    /// ]);
    ///
    /// let updated = graph.update_concept_description("A1", Some("core topic".into()));
    /// assert_eq!(
    ///     updated.find_concept_by_title("A1").unwrap().description.as_deref(),
    ///     Some("core topic"),
    /// );
    /// // The untouched root is shared by reference, not copied.
    /// assert!(Arc::ptr_eq(&graph.concepts[1], &updated.concepts[1]));
    /// ```
    #[must_use]
    pub fn update_concept_description(
        &self,
        title: &str,
        description: Option<String>,
    ) -> KnowledgeGraph {
        let mut replaced = false;
        let concepts = self
            .concepts
            .iter()
            .map(|root| {
                if replaced {
                    Arc::clone(root)
                } else {
                    rewrite_path(root, title, &description, &mut replaced)
                }
            })
            .collect();
        KnowledgeGraph { concepts }
    }
}

/// Rebuilds `node` if it, or something beneath it, is the first concept
/// titled `title`; otherwise returns the original `Arc` untouched.
fn rewrite_path(
    node: &Arc<Concept>,
    title: &str,
    description: &Option<String>,
    replaced: &mut bool,
) -> Arc<Concept> {
    if node.title == title {
        *replaced = true;
        let mut copy = Concept::clone(node);
        copy.description = description.clone();
        return Arc::new(copy);
    }

    let Some(children) = node.consist_of.as_deref() else {
        return Arc::clone(node);
    };

    let mut new_children: Option<Vec<Arc<Concept>>> = None;
    for (idx, child) in children.iter().enumerate() {
        if *replaced {
            break;
        }
        let rebuilt = rewrite_path(child, title, description, replaced);
        if *replaced {
            let mut copied: Vec<Arc<Concept>> = children.to_vec();
            copied[idx] = rebuilt;
            new_children = Some(copied);
        }
    }

    match new_children {
        Some(children) => {
            let mut copy = Concept::clone(node);
            copy.consist_of = Some(children);
            Arc::new(copy)
        }
        None => Arc::clone(node),
    }
}
