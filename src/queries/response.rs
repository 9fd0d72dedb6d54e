//! Lineage query results
//!
//! The response a caller renders: every node with its derived layout fields,
//! every edge with its connector, the domain regions and the flow contract.

use serde::{Deserialize, Serialize};

use crate::components::{LineageEdge, ProductRecord};
use crate::layout::DomainGroup;
use crate::projections::{DepthBucket, EdgePath, FlowAnimation};
use crate::value_objects::{Bounds, LineageDirection, MaxDepth, NodeId, Position2D};

/// A node with everything the layout derived for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageNodeView {
    #[serde(flatten)]
    pub product: ProductRecord,
    pub is_focal: bool,
    pub depth: i32,
    pub layer: i32,
    pub order: usize,
    pub position: Position2D,
    pub depth_bucket: DepthBucket,
}

impl LineageNodeView {
    pub fn id(&self) -> &NodeId {
        &self.product.id
    }
}

/// An edge with its routed connector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageEdgeView {
    #[serde(flatten)]
    pub edge: LineageEdge,
    pub path: EdgePath,
}

/// Full answer to a [`super::LineageQuery`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageResponse {
    pub focal_node_id: NodeId,
    pub direction: LineageDirection,
    pub max_depth: MaxDepth,
    pub nodes: Vec<LineageNodeView>,
    pub edges: Vec<LineageEdgeView>,
    pub domain_groups: Vec<DomainGroup>,
    pub bounds: Bounds,
    pub flow: FlowAnimation,
}

impl LineageResponse {
    pub fn node(&self, id: &str) -> Option<&LineageNodeView> {
        self.nodes.iter().find(|n| n.id().as_str() == id)
    }

    pub fn focal(&self) -> Option<&LineageNodeView> {
        self.nodes.iter().find(|n| n.is_focal)
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.edge.source.as_str() == source && e.edge.target.as_str() == target)
    }

    pub fn domain_group(&self, domain_id: &str) -> Option<&DomainGroup> {
        self.domain_groups.iter().find(|g| g.domain_id == domain_id)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
