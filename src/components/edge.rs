//! Lineage edges

use serde::{Deserialize, Serialize};

use crate::value_objects::{EdgeId, NodeId, PortId};

/// A dependency between two products: `source`'s output feeds `target`'s input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageEdge {
    pub id: EdgeId,
    #[serde(rename = "sourceNodeId")]
    pub source: NodeId,
    #[serde(rename = "targetNodeId")]
    pub target: NodeId,
    /// Label of the connecting port, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_id: Option<PortId>,
}

impl LineageEdge {
    pub fn new(source: NodeId, target: NodeId, port_id: Option<PortId>, label: Option<String>) -> Self {
        Self {
            id: EdgeId::between(&source, &target, port_id.as_ref()),
            source,
            target,
            label,
            port_id,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}
