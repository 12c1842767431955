//! End-to-end tour of the crate: import a graph document, lay it out,
//! drive a selection/edit session, and run a (mocked) AI rewrite.
//!
//! Run with:
//! ```sh
//! cargo run --example interactive_session
//! ```

use async_trait::async_trait;
use loregraph::concept::{Concept, KnowledgeGraph};
use loregraph::controller::InteractionController;
use loregraph::layout::{layout, Direction, LayoutConfig};
use loregraph::model::import_graph;
use loregraph::services::{GraphRewriter, ServiceError};
use loregraph::store::GraphStore;

/// Stand-in for the external rewrite service: prunes the forest down to
/// its roots, as a real instruction like "keep only the top level" might.
struct RootsOnlyRewriter;

#[async_trait]
impl GraphRewriter for RootsOnlyRewriter {
    async fn rewrite(
        &self,
        graph: &KnowledgeGraph,
        _instruction: &str,
    ) -> Result<KnowledgeGraph, ServiceError> {
        let roots = graph
            .concepts
            .iter()
            .map(|root| Concept {
                consist_of: None,
                ..Concept::clone(root)
            })
            .collect();
        Ok(KnowledgeGraph::from_roots(roots))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    loregraph::telemetry::init_tracing();

    let document = r#"{
        "concepts": [
            {
                "title": "Databases",
                "description": "Persistent, queryable state",
                "related": ["Operating Systems"],
                "source": "notes.md",
                "consist_of": [
                    {"title": "SQL", "description": null, "related": null, "source": null, "consist_of": null},
                    {"title": "Transactions", "description": null, "related": null, "source": null, "consist_of": null}
                ]
            }
        ]
    }"#;

    let graph = import_graph(document)?;
    let diagram = layout(&graph, Direction::LeftToRight, &LayoutConfig::default());
    println!("layout: {} nodes, {} edges", diagram.nodes.len(), diagram.edges.len());
    for node in &diagram.nodes {
        let tag = if node.is_proxy() { " (proxy)" } else { "" };
        println!("  [{:>6.1},{:>6.1}] {}{tag}", node.x, node.y, node.label);
    }

    let mut controller = InteractionController::new(GraphStore::with_graph(graph));
    let sql = controller
        .graph()
        .find_concept_by_title("SQL")
        .cloned()
        .expect("imported above");
    controller.pick(Some(sql.as_ref()));
    controller.begin_edit()?;
    controller.set_draft("Declarative querying over relations")?;
    controller.save()?;
    println!(
        "edited description: {:?}",
        controller.selected_concept().and_then(|c| c.description.clone()),
    );

    controller
        .request_rewrite(&RootsOnlyRewriter, "keep only the top level")
        .await?;
    println!(
        "after rewrite: {} concepts, selection = {:?}",
        controller.graph().iter_depth_first().count(),
        controller.state().selected_title(),
    );

    Ok(())
}
