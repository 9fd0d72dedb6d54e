//! Lineage graph exploration for a data-product catalog
//!
//! Starting from a focal product, traces dependencies upstream, downstream or
//! both up to a bounded number of hops, then lays the result out left to right
//! as layers by hop count, with the focal product centered and same-domain
//! products wrapped in shared regions.

pub mod components;
pub mod config;
pub mod handlers;
pub mod infrastructure;
pub mod layout;
pub mod projections;
pub mod queries;
pub mod traversal;
pub mod value_objects;

// Re-export configuration
pub use config::{ConfigError, LineageConfig};

// Re-export graph components
pub use components::{LineageEdge, LineageGraph, LineageGraphBuilder, LineageNode, ProductRecord};

// Re-export query types
pub use queries::{
    LineageEdgeView, LineageError, LineageNodeView, LineageQuery, LineageResponse, LineageResult,
};

// Re-export the pipeline entry points
pub use handlers::LineageQueryHandler;
pub use infrastructure::{CatalogError, CatalogSnapshot, InMemoryCatalog};
pub use layout::{DomainGroup, GroupingConfig, HierarchicalLayout, LayeredLayout, LayoutConfig};
pub use traversal::{traverse, LineageLink, LineageSource};

// Re-export projections
pub use projections::{
    render_markdown, render_mermaid, DepthBucket, EdgePath, FlowAnimation, FlowConfig, LineageSummary,
};

// Re-export value objects
pub use value_objects::{
    Bounds, EdgeId, LineageDirection, MaxDepth, NodeId, PortId, Position2D, Size,
};
