//! Projections of a laid-out lineage graph
//!
//! Values derived for rendering: the depth styling bucket, edge connectors,
//! the flow animation contract and text exports.

pub mod depth_bucket;
pub mod edge_path;
pub mod flow;
pub mod report;

pub use depth_bucket::DepthBucket;
pub use edge_path::{CubicSegment, EdgePath, MIN_CONTROL_OFFSET};
pub use flow::{FlowAnimation, FlowConfig, MAX_MARKERS};
pub use report::{render_markdown, render_mermaid, LineageSummary};
