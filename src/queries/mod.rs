//! Lineage queries
//!
//! A lineage query names the focal product, the direction to trace and how many
//! hops to follow. Queries are validated before any traversal happens, so a
//! handler never starts work on an out-of-range request.

mod response;

pub use response::{LineageEdgeView, LineageNodeView, LineageResponse};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;
use crate::value_objects::{LineageDirection, MaxDepth, NodeId};

/// Query result type
pub type LineageResult<T> = Result<T, LineageError>;

/// Errors that can occur while answering a lineage query
#[derive(Debug, Error)]
pub enum LineageError {
    /// The focal product is not in the catalog
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    /// A request parameter is outside its allowed set or range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The layout configuration cannot produce a valid layout
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Request parameters for one traversal + layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageQuery {
    pub focal_node_id: NodeId,
    #[serde(default)]
    pub direction: LineageDirection,
    #[serde(default)]
    pub max_depth: MaxDepth,
}

impl LineageQuery {
    /// Create a query with the default direction (`full`) and depth (2)
    pub fn new(focal_node_id: impl Into<NodeId>) -> LineageResult<Self> {
        let query = Self {
            focal_node_id: focal_node_id.into(),
            direction: LineageDirection::default(),
            max_depth: MaxDepth::default(),
        };
        query.validate()?;
        Ok(query)
    }

    /// Build a query from raw request parameters, applying defaults for missing ones
    pub fn from_params(
        focal_node_id: &str,
        direction: Option<&str>,
        max_depth: Option<u32>,
    ) -> LineageResult<Self> {
        let direction = direction
            .map(str::parse::<LineageDirection>)
            .transpose()?
            .unwrap_or_default();
        let max_depth = max_depth.map(MaxDepth::new).transpose()?.unwrap_or_default();

        Ok(Self::new(focal_node_id)?
            .with_direction(direction)
            .with_max_depth(max_depth))
    }

    pub fn with_direction(mut self, direction: LineageDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_max_depth(mut self, max_depth: MaxDepth) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Check the invariants serde cannot express
    pub fn validate(&self) -> LineageResult<()> {
        if self.focal_node_id.as_str().trim().is_empty() {
            return Err(LineageError::InvalidArgument(
                "focal node id cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
