//! Turning a concept forest into a positioned node-link diagram.
//!
//! [`layout`] is the single entry point: a pure, total function of the
//! graph, flow [`Direction`], and [`LayoutConfig`]. There is no hidden
//! state and nothing incremental — every call recomputes the full diagram,
//! so any change to the forest or direction is just another call.
//!
//! The pipeline flattens the forest into nodes plus containment and
//! relation edges (synthesizing proxy nodes for unresolved `related`
//! targets), then runs a layered drawing pass to assign one finite
//! position per node. See [`flatten`](self::flatten) and
//! [`layered`](self::layered) for the phase details.
//!
//! # Examples
//!
//! ```
//! use loregraph::concept::{Concept, KnowledgeGraph};
//! use loregraph::layout::{layout, Direction, LayoutConfig};
//!
//! let graph = KnowledgeGraph::from_roots(vec![
//!     Concept::new("A")
//!         .with_related(["B"])
//!         .with_children(vec![Concept::new("A1")]),
//! ]);
//!
//! let diagram = layout(&graph, Direction::LeftToRight, &LayoutConfig::default());
//! // A, A1, and the proxy node for the unresolved "B".
//! assert_eq!(diagram.nodes.len(), 3);
//! assert_eq!(diagram.edges.len(), 2);
//! ```

mod flatten;
mod layered;
mod types;

pub use types::{
    edge_id, node_id, Diagram, DiagramEdge, DiagramNode, Direction, EdgeKind, EdgeStyle,
    LayoutConfig,
};

use crate::concept::KnowledgeGraph;

/// Computes the positioned diagram for a knowledge graph.
///
/// Guarantees, per pass:
/// - exactly one node per unique derived id, proxies included;
/// - every edge id unique, every endpoint present in the node set;
/// - every node carries one finite top-left position;
/// - identical inputs produce identical output.
#[must_use]
pub fn layout(graph: &KnowledgeGraph, direction: Direction, config: &LayoutConfig) -> Diagram {
    let mut flat = flatten::flatten(graph);

    let mut node_graph = layered::NodeGraph::new(
        flat.nodes.len(),
        flat.edges
            .iter()
            .map(|e| (flat.index_of[&e.source], flat.index_of[&e.target])),
    );
    let anchors = layered::position_nodes(&mut node_graph, direction, config);

    for (node, (cx, cy)) in flat.nodes.iter_mut().zip(anchors) {
        node.width = config.node_width;
        node.height = config.node_height;
        // Anchors are box centers; the diagram speaks top-left.
        node.x = cx - config.node_width / 2.0;
        node.y = cy - config.node_height / 2.0;
    }

    tracing::debug!(
        nodes = flat.nodes.len(),
        edges = flat.edges.len(),
        %direction,
        "layout pass complete"
    );

    Diagram {
        nodes: flat.nodes,
        edges: flat.edges,
    }
}
