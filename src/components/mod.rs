//! Lineage graph model
//!
//! Immutable node and edge values plus the arena-indexed graph container that a
//! traversal produces. Nodes are addressed by [`NodeIndex`] into the arena, so
//! cycles in the catalog never turn into cyclic ownership here.

pub mod edge;
pub mod graph;
pub mod node;

pub use edge::LineageEdge;
pub use graph::{LineageGraph, LineageGraphBuilder, NodeIndex};
pub use node::{LineageNode, ProductRecord};
