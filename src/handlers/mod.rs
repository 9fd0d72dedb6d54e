//! Lineage query handler
//!
//! Runs the full pipeline for one request: traversal, layout, then the
//! projections a renderer needs. Configuration is validated once, when the
//! handler is built.

use tracing::info;

use crate::components::LineageGraph;
use crate::config::{ConfigError, LineageConfig};
use crate::layout::{HierarchicalLayout, LayeredLayout};
use crate::projections::{DepthBucket, EdgePath, FlowAnimation};
use crate::queries::{LineageEdgeView, LineageNodeView, LineageQuery, LineageResponse, LineageResult};
use crate::traversal::{traverse, LineageSource};

/// Answers lineage queries against one catalog
pub struct LineageQueryHandler<S> {
    source: S,
    layout: HierarchicalLayout,
    flow: FlowAnimation,
}

impl<S: LineageSource> LineageQueryHandler<S> {
    pub fn new(source: S, config: LineageConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            source,
            layout: HierarchicalLayout::new(config.layout, config.grouping)?,
            flow: FlowAnimation::new(&config.flow)?,
        })
    }

    pub fn handle(&self, query: &LineageQuery) -> LineageResult<LineageResponse> {
        let graph = traverse(&self.source, query)?;
        let layout = self.layout.apply(&graph);
        let response = self.respond(query, &graph, &layout);

        info!(
            focal = %query.focal_node_id,
            direction = %query.direction,
            max_depth = query.max_depth.get(),
            nodes = response.nodes.len(),
            edges = response.edges.len(),
            groups = response.domain_groups.len(),
            "lineage query handled"
        );
        Ok(response)
    }

    fn respond(&self, query: &LineageQuery, graph: &LineageGraph, layout: &LayeredLayout) -> LineageResponse {
        let node_size = self.layout.layout_config().node_size();

        let nodes = graph
            .node_indices()
            .map(|index| {
                let node = graph.node(index);
                let placement = layout.placement(index);
                LineageNodeView {
                    product: node.product.clone(),
                    is_focal: node.is_focal,
                    depth: node.depth,
                    layer: placement.layer,
                    order: placement.order,
                    position: placement.position,
                    depth_bucket: DepthBucket::from_depth(node.depth),
                }
            })
            .collect();

        let edges = graph
            .edges()
            .iter()
            .enumerate()
            .map(|(i, edge)| {
                let (source, target) = graph.endpoints(i);
                LineageEdgeView {
                    edge: edge.clone(),
                    path: EdgePath::between(
                        layout.placement(source).position,
                        layout.placement(target).position,
                        node_size,
                    ),
                }
            })
            .collect();

        LineageResponse {
            focal_node_id: query.focal_node_id.clone(),
            direction: query.direction,
            max_depth: query.max_depth,
            nodes,
            edges,
            domain_groups: layout.domain_groups().to_vec(),
            bounds: layout.bounds(),
            flow: self.flow.clone(),
        }
    }
}
