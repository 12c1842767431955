//! Flattening a concept forest into the unpositioned node/edge set.
//!
//! One pass over the forest produces, in order: a node per concept on
//! first visit (insertion order is first-visit order, which later phases
//! use as the deterministic tie-break), a containment edge per
//! parent→child pair, and a relation edge per `related` title with a
//! label-only proxy node synthesized for targets that have no concept of
//! their own. Relation links are never traversed — only the title is
//! consumed — so cycles through `related` cannot recurse.
//!
//! The visited set is keyed by derived node id. It guarantees each id is
//! inserted at most once, stops re-expansion of subtrees reachable twice
//! (shared `Arc`s, duplicate titles), and doubles as the defensive guard
//! against containment cycles should an upstream generator ever produce
//! one.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::concept::{Concept, KnowledgeGraph};

use super::types::{node_id, DiagramEdge, DiagramNode, EdgeKind};

/// Unpositioned node/edge set plus the id→index map the layered phase
/// works from.
pub(super) struct FlatGraph {
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
    pub index_of: FxHashMap<String, usize>,
}

pub(super) fn flatten(graph: &KnowledgeGraph) -> FlatGraph {
    let mut flat = FlatGraph {
        nodes: Vec::new(),
        edges: Vec::new(),
        index_of: FxHashMap::default(),
    };
    let mut edge_ids: FxHashSet<String> = FxHashSet::default();

    for root in &graph.concepts {
        visit(root, &mut flat, &mut edge_ids);
    }

    // Relation pass runs after the full forest is flattened so a `related`
    // title only becomes a proxy when no real concept claims it anywhere.
    let concept_count = flat.nodes.len();
    for idx in 0..concept_count {
        let Some(concept) = flat.nodes[idx].concept.clone() else {
            continue;
        };
        let source_id = flat.nodes[idx].id.clone();
        for target_title in concept.related_titles() {
            let target_id = node_id(target_title);
            if !flat.index_of.contains_key(&target_id) {
                tracing::debug!(target = %target_title, "synthesizing proxy node for unresolved related target");
                insert_node(&mut flat, target_id.clone(), target_title.clone(), None);
            }
            push_edge(
                &mut flat,
                &mut edge_ids,
                DiagramEdge::new(EdgeKind::Relation, source_id.clone(), target_id),
            );
        }
    }

    flat
}

fn visit(concept: &Arc<Concept>, flat: &mut FlatGraph, edge_ids: &mut FxHashSet<String>) {
    let id = node_id(&concept.title);
    if flat.index_of.contains_key(&id) {
        // Already materialized: either a shared subtree reached twice, a
        // duplicate title elsewhere in the forest, or a containment cycle.
        // All three collapse onto the existing node and stop here.
        tracing::warn!(
            title = %concept.title,
            "duplicate node id during flatten; concepts sharing a title collapse into one node"
        );
        return;
    }
    insert_node(
        flat,
        id.clone(),
        concept.title.clone(),
        Some(Arc::clone(concept)),
    );

    for child in concept.children() {
        let child_id = node_id(&child.title);
        visit(child, flat, edge_ids);
        push_edge(
            flat,
            edge_ids,
            DiagramEdge::new(EdgeKind::Containment, id.clone(), child_id),
        );
    }
}

fn insert_node(flat: &mut FlatGraph, id: String, label: String, concept: Option<Arc<Concept>>) {
    flat.index_of.insert(id.clone(), flat.nodes.len());
    flat.nodes.push(DiagramNode {
        id,
        label,
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
        concept,
    });
}

fn push_edge(flat: &mut FlatGraph, edge_ids: &mut FxHashSet<String>, edge: DiagramEdge) {
    if edge_ids.insert(edge.id.clone()) {
        flat.edges.push(edge);
    }
}
