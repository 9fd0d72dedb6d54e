//! Hierarchical lineage layout
//!
//! Turns a traversal result into geometry: layers from depth, crossing-reduced
//! order within each layer, center coordinates, and domain regions. Only the
//! [`LineageGraph`] is consulted, never the underlying catalog, so cycles that the
//! traversal already cut cannot reach this stage.

pub mod config;
pub mod coordinates;
pub mod domain_groups;
pub mod ordering;

pub use config::{GroupingConfig, LayoutConfig};
pub use coordinates::{assign_coordinates, vertical_midpoint};
pub use domain_groups::{compute_domain_groups, DomainGroup};
pub use ordering::{count_crossings, order_layers, LayerOrdering};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::components::{LineageGraph, NodeIndex};
use crate::config::ConfigError;
use crate::value_objects::{Bounds, Position2D};

/// Where one node ended up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodePlacement {
    pub layer: i32,
    pub order: usize,
    pub position: Position2D,
}

/// Geometry for a whole lineage graph
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredLayout {
    placements: Vec<NodePlacement>,
    domain_groups: Vec<DomainGroup>,
    bounds: Bounds,
}

impl LayeredLayout {
    pub fn placement(&self, index: NodeIndex) -> &NodePlacement {
        &self.placements[index.index()]
    }

    /// Placements indexed by node
    pub fn placements(&self) -> &[NodePlacement] {
        &self.placements
    }

    pub fn domain_groups(&self) -> &[DomainGroup] {
        &self.domain_groups
    }

    /// Smallest rectangle holding every node box and domain region
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// Left-to-right layered layout centered on the focal node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HierarchicalLayout {
    layout: LayoutConfig,
    grouping: GroupingConfig,
}

impl HierarchicalLayout {
    pub fn new(layout: LayoutConfig, grouping: GroupingConfig) -> Result<Self, ConfigError> {
        layout.validate()?;
        grouping.validate()?;
        Ok(Self { layout, grouping })
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn apply(&self, graph: &LineageGraph) -> LayeredLayout {
        let ordering = order_layers(graph, self.layout.ordering_passes);
        let positions = assign_coordinates(graph, &ordering, &self.layout);
        let node_size = self.layout.node_size();
        let domain_groups = compute_domain_groups(graph, &positions, node_size, &self.grouping);

        let bounds = positions
            .iter()
            .map(|p| Bounds::around(*p, node_size))
            .chain(domain_groups.iter().map(|g| g.bounds))
            .reduce(|acc, b| acc.union(&b))
            .unwrap_or_else(|| Bounds::around(Position2D::default(), node_size));

        let placements = graph
            .node_indices()
            .map(|index| NodePlacement {
                layer: graph.node(index).layer(),
                order: ordering.order_of(index),
                position: positions[index.index()],
            })
            .collect();

        debug!(
            layers = ordering.layers().len(),
            tallest = ordering.tallest(),
            crossings = count_crossings(graph, &ordering),
            groups = domain_groups.len(),
            "lineage layout computed"
        );

        LayeredLayout {
            placements,
            domain_groups,
            bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{LineageEdge, LineageGraphBuilder, LineageNode, ProductRecord};
    use crate::value_objects::NodeId;

    #[test]
    fn test_invalid_config_is_rejected() {
        let layout = LayoutConfig {
            node_height: 0.0,
            ..LayoutConfig::default()
        };
        assert!(HierarchicalLayout::new(layout, GroupingConfig::default()).is_err());
    }

    #[test]
    fn test_single_node_layout() {
        let mut builder = LineageGraphBuilder::new();
        builder.add_node(LineageNode::new(ProductRecord::new("solo", "Solo"), 0, 0));
        let graph = builder.build(&NodeId::new("solo")).unwrap();

        let layout = HierarchicalLayout::default().apply(&graph);
        let placement = layout.placement(graph.focal());
        let config = LayoutConfig::default();
        assert_eq!(placement.layer, 0);
        assert_eq!(placement.order, 0);
        assert_eq!(placement.position, Position2D::new(config.margin, config.margin));
        assert!(layout.domain_groups().is_empty());
        assert_eq!(layout.bounds().width(), config.node_width);
    }

    #[test]
    fn test_bounds_cover_all_nodes() {
        let mut builder = LineageGraphBuilder::new();
        builder.add_node(LineageNode::new(ProductRecord::new("f", "F"), 0, 0));
        builder.add_node(LineageNode::new(ProductRecord::new("a", "A"), 1, 1));
        builder.add_node(LineageNode::new(ProductRecord::new("b", "B"), 1, 2));
        builder.add_edge(LineageEdge::new(NodeId::new("f"), NodeId::new("a"), None, None));
        builder.add_edge(LineageEdge::new(NodeId::new("f"), NodeId::new("b"), None, None));
        let graph = builder.build(&NodeId::new("f")).unwrap();

        let layout = HierarchicalLayout::default().apply(&graph);
        for placement in layout.placements() {
            assert!(layout.bounds().contains(&placement.position));
        }
    }
}
