//! Lineage nodes

use serde::{Deserialize, Serialize};

use crate::value_objects::NodeId;

/// A data product as the metadata store describes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Stable identifier of the product
    pub id: NodeId,
    /// Human-readable name
    pub display_label: String,
    /// Domain the product belongs to, used for grouping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_label: Option<String>,
    /// Lifecycle status (e.g. "Design", "Consume")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_label: Option<String>,
}

impl ProductRecord {
    pub fn new(id: impl Into<NodeId>, display_label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_label: display_label.into(),
            domain_id: None,
            domain_label: None,
            status_label: None,
        }
    }

    pub fn with_domain(mut self, domain_id: impl Into<String>, domain_label: impl Into<String>) -> Self {
        self.domain_id = Some(domain_id.into());
        self.domain_label = Some(domain_label.into());
        self
    }

    pub fn with_status(mut self, status_label: impl Into<String>) -> Self {
        self.status_label = Some(status_label.into());
        self
    }
}

/// A product reached by a traversal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageNode {
    #[serde(flatten)]
    pub product: ProductRecord,
    /// Signed hop count from the focal product, negative upstream
    pub depth: i32,
    pub is_focal: bool,
    /// Position in the traversal's discovery sequence
    #[serde(skip)]
    pub discovery: usize,
}

impl LineageNode {
    pub fn new(product: ProductRecord, depth: i32, discovery: usize) -> Self {
        Self {
            product,
            depth,
            is_focal: depth == 0,
            discovery,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.product.id
    }

    pub fn display_label(&self) -> &str {
        &self.product.display_label
    }

    pub fn domain_id(&self) -> Option<&str> {
        self.product.domain_id.as_deref()
    }

    /// Layout rank, equal to the depth
    pub fn layer(&self) -> i32 {
        self.depth
    }
}
