//! # Loregraph: Interactive Knowledge-Graph Engine
//!
//! Loregraph turns uploaded documents into a hierarchical knowledge graph
//! of concepts, lays that graph out as a node-link diagram, and drives the
//! interactive loop of selecting, editing, and AI-rewriting it.
//!
//! ## Core Concepts
//!
//! - **Concepts**: learnable topics forming a containment forest with
//!   named cross-references ([`concept`])
//! - **Model operations**: pure lookup and immutable path-copy updates
//!   plus the JSON exchange codec ([`model`])
//! - **Layout**: a layered drawing pass from forest to positioned nodes
//!   and styled edges ([`layout`])
//! - **Resolution**: the ordered title-matching cascade behind cross-link
//!   navigation ([`resolver`])
//! - **State ownership**: one writer, immutable snapshots, subscriber
//!   notifications ([`store`])
//! - **Interaction**: the selection/editing state machine and view
//!   centering ([`controller`])
//! - **Services**: the external generation and rewrite collaborators
//!   ([`services`])
//!
//! ## Quick Start
//!
//! ```
//! use loregraph::concept::{Concept, KnowledgeGraph};
//! use loregraph::layout::{layout, Direction, LayoutConfig};
//!
//! let graph = KnowledgeGraph::from_roots(vec![
//!     Concept::new("Databases")
//!         .with_related(["Operating Systems"])
//!         .with_children(vec![Concept::new("SQL"), Concept::new("Transactions")]),
//! ]);
//!
//! let diagram = layout(&graph, Direction::LeftToRight, &LayoutConfig::default());
//!
//! // Three real nodes plus a proxy for the unresolved cross-reference.
//! assert_eq!(diagram.nodes.len(), 4);
//! assert!(diagram.nodes.iter().any(|n| n.is_proxy()));
//! ```
//!
//! ## Interactive Loop
//!
//! ```
//! use loregraph::concept::{Concept, KnowledgeGraph};
//! use loregraph::controller::InteractionController;
//! use loregraph::store::GraphStore;
//!
//! let store = GraphStore::with_graph(KnowledgeGraph::from_roots(vec![Concept::new("SQL")]));
//! let mut controller = InteractionController::new(store);
//!
//! let sql = controller.graph().find_concept_by_title("SQL").cloned().unwrap();
//! controller.pick(Some(sql.as_ref()));
//! controller.begin_edit().unwrap();
//! controller.set_draft("Structured Query Language").unwrap();
//! controller.save().unwrap();
//! ```
//!
//! ## Error Handling
//!
//! Lookup misses are `Option::None`, never errors. Malformed imports and
//! failed service calls are rejected before any state changes hands — the
//! last-good graph is always retained whole.

pub mod concept;
pub mod controller;
pub mod layout;
pub mod model;
pub mod resolver;
pub mod services;
pub mod store;
pub mod telemetry;
