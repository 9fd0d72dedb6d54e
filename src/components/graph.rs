//! Arena-indexed lineage graph
//!
//! A [`LineageGraph`] is built once per traversal through [`LineageGraphBuilder`]
//! and never mutated afterwards.

use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::warn;

use super::{LineageEdge, LineageNode};
use crate::value_objects::{NodeId, PortId};

/// Position of a node in the graph's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// The nodes and edges touched by one traversal
#[derive(Debug, Clone)]
pub struct LineageGraph {
    focal: NodeIndex,
    nodes: Vec<LineageNode>,
    edges: Vec<LineageEdge>,
    index: HashMap<NodeId, NodeIndex>,
    endpoints: Vec<(NodeIndex, NodeIndex)>,
    adjacency: Vec<Vec<NodeIndex>>,
}

impl LineageGraph {
    pub fn focal(&self) -> NodeIndex {
        self.focal
    }

    pub fn focal_node(&self) -> &LineageNode {
        &self.nodes[self.focal.0]
    }

    /// Nodes in discovery order
    pub fn nodes(&self) -> &[LineageNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[LineageEdge] {
        &self.edges
    }

    pub fn node(&self, index: NodeIndex) -> &LineageNode {
        &self.nodes[index.0]
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        (0..self.nodes.len()).map(NodeIndex)
    }

    pub fn index_of(&self, id: &NodeId) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn node_by_id(&self, id: &NodeId) -> Option<&LineageNode> {
        self.index_of(id).map(|index| self.node(index))
    }

    /// Resolved `(source, target)` of the edge at `edge` in [`Self::edges`]
    pub fn endpoints(&self, edge: usize) -> (NodeIndex, NodeIndex) {
        self.endpoints[edge]
    }

    /// Nodes joined to `index` by an edge in either direction, without duplicates
    pub fn neighbors(&self, index: NodeIndex) -> &[NodeIndex] {
        &self.adjacency[index.0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_edge(&self, source: &NodeId, target: &NodeId) -> bool {
        self.edges
            .iter()
            .any(|e| &e.source == source && &e.target == target)
    }
}

/// Identity of an edge: both endpoints and the port
type EdgeKey = (NodeId, NodeId, Option<PortId>);

/// Collects nodes and edges, then seals them into a [`LineageGraph`]
#[derive(Debug, Default)]
pub struct LineageGraphBuilder {
    nodes: IndexMap<NodeId, LineageNode>,
    edges: IndexMap<EdgeKey, LineageEdge>,
}

impl LineageGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node; the first insertion of an id wins
    pub fn add_node(&mut self, node: LineageNode) -> bool {
        if self.nodes.contains_key(node.id()) {
            return false;
        }
        self.nodes.insert(node.id().clone(), node);
        true
    }

    /// Insert an edge; an edge with the same endpoints and port is ignored
    pub fn add_edge(&mut self, edge: LineageEdge) -> bool {
        let key = (edge.source.clone(), edge.target.clone(), edge.port_id.clone());
        if self.edges.contains_key(&key) {
            return false;
        }
        self.edges.insert(key, edge);
        true
    }

    /// Seal the graph around `focal`. Edges whose endpoints were never added are dropped.
    ///
    /// Returns `None` when `focal` itself was never added.
    pub fn build(self, focal: &NodeId) -> Option<LineageGraph> {
        let nodes: Vec<LineageNode> = self.nodes.into_values().collect();
        let index: HashMap<NodeId, NodeIndex> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id().clone(), NodeIndex(i)))
            .collect();
        let focal = *index.get(focal)?;

        let mut edges = Vec::with_capacity(self.edges.len());
        let mut endpoints = Vec::with_capacity(self.edges.len());
        let mut adjacency = vec![Vec::new(); nodes.len()];

        for edge in self.edges.into_values() {
            let (Some(&source), Some(&target)) = (index.get(&edge.source), index.get(&edge.target)) else {
                warn!(edge = %edge.id, "dropping edge with an endpoint outside the lineage graph");
                continue;
            };
            if source != target {
                if !adjacency[source.0].contains(&target) {
                    adjacency[source.0].push(target);
                }
                if !adjacency[target.0].contains(&source) {
                    adjacency[target.0].push(source);
                }
            }
            endpoints.push((source, target));
            edges.push(edge);
        }

        Some(LineageGraph {
            focal,
            nodes,
            edges,
            index,
            endpoints,
            adjacency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ProductRecord;

    fn node(id: &str, depth: i32, discovery: usize) -> LineageNode {
        LineageNode::new(ProductRecord::new(id, id.to_uppercase()), depth, discovery)
    }

    fn edge(source: &str, target: &str) -> LineageEdge {
        LineageEdge::new(NodeId::new(source), NodeId::new(target), None, None)
    }

    #[test]
    fn test_builder_keeps_first_node_and_dedupes_edges() {
        let mut builder = LineageGraphBuilder::new();
        assert!(builder.add_node(node("a", 0, 0)));
        assert!(!builder.add_node(node("a", 3, 1)));
        assert!(builder.add_node(node("b", 1, 1)));
        assert!(builder.add_edge(edge("a", "b")));
        assert!(!builder.add_edge(edge("a", "b")));

        let graph = builder.build(&NodeId::new("a")).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node_by_id(&NodeId::new("a")).unwrap().depth, 0);
        assert_eq!(graph.focal_node().id().as_str(), "a");
    }

    #[test]
    fn test_dangling_edges_are_dropped() {
        let mut builder = LineageGraphBuilder::new();
        builder.add_node(node("a", 0, 0));
        builder.add_edge(edge("a", "ghost"));

        let graph = builder.build(&NodeId::new("a")).unwrap();
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.neighbors(graph.focal()).is_empty());
    }

    #[test]
    fn test_missing_focal_yields_none() {
        let builder = LineageGraphBuilder::new();
        assert!(builder.build(&NodeId::new("a")).is_none());
    }

    #[test]
    fn test_edges_are_keyed_by_endpoints_and_port() {
        let mut builder = LineageGraphBuilder::new();
        builder.add_node(node("f", 0, 0));
        builder.add_node(node("b@p", 1, 1));
        builder.add_node(node("b", 1, 2));
        assert!(builder.add_edge(edge("f", "b@p")));
        assert!(builder.add_edge(LineageEdge::new(
            NodeId::new("f"),
            NodeId::new("b"),
            Some(PortId::new("p")),
            None,
        )));

        let graph = builder.build(&NodeId::new("f")).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains_edge(&NodeId::new("f"), &NodeId::new("b@p")));
        assert!(graph.contains_edge(&NodeId::new("f"), &NodeId::new("b")));
    }

    #[test]
    fn test_adjacency_is_undirected_and_unique() {
        let mut builder = LineageGraphBuilder::new();
        builder.add_node(node("a", 0, 0));
        builder.add_node(node("b", 1, 1));
        builder.add_edge(edge("a", "b"));
        builder.add_edge(edge("b", "a"));

        let graph = builder.build(&NodeId::new("a")).unwrap();
        let a = graph.index_of(&NodeId::new("a")).unwrap();
        let b = graph.index_of(&NodeId::new("b")).unwrap();
        assert_eq!(graph.neighbors(a), &[b]);
        assert_eq!(graph.neighbors(b), &[a]);
        assert_eq!(graph.edge_count(), 2);
    }
}
