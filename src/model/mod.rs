//! Pure operations over the knowledge graph: lookup, immutable update, and
//! the JSON exchange codec.
//!
//! Everything here is a synchronous pure function of its inputs. Updates
//! never mutate a graph in place; they return a new [`KnowledgeGraph`]
//! (see [`crate::concept::KnowledgeGraph::update_concept_description`])
//! that shares untouched subtrees with the input by reference. Lookup
//! misses are ordinary `None` results, never errors.

mod codec;
mod lookup;
mod update;

pub use codec::{export_graph, export_value, import_graph, import_value, CodecError};
pub use lookup::DepthFirst;
