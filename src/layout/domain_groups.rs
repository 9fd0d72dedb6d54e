//! Domain grouping
//!
//! Nodes sharing a `domain_id` are wrapped in one bounding region. Domains with
//! a single member get no region. Color indices are handed out in the order
//! domains first appear in the node list, cycling through the palette.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::GroupingConfig;
use crate::components::{LineageGraph, NodeIndex};
use crate::value_objects::{Bounds, NodeId, Position2D, Size};

/// A visual cluster of two or more nodes in the same domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainGroup {
    pub domain_id: String,
    pub label: String,
    pub bounds: Bounds,
    pub color_index: usize,
    /// Members in node order
    pub member_ids: Vec<NodeId>,
}

/// Group the laid-out nodes of `graph` by domain
pub fn compute_domain_groups(
    graph: &LineageGraph,
    positions: &[Position2D],
    node_size: Size,
    config: &GroupingConfig,
) -> Vec<DomainGroup> {
    let mut domains: IndexMap<&str, Vec<NodeIndex>> = IndexMap::new();
    for index in graph.node_indices() {
        if let Some(domain) = graph.node(index).domain_id() {
            domains.entry(domain).or_default().push(index);
        }
    }

    domains
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .enumerate()
        .map(|(slot, (domain_id, members))| {
            let bounds = members
                .iter()
                .map(|index| Bounds::around(positions[index.index()], node_size))
                .reduce(|acc, b| acc.union(&b))
                .unwrap_or_else(|| Bounds::around(Position2D::default(), node_size))
                .expand(config.padding_x, config.padding_x, config.padding_top, config.padding_bottom);

            let label = members
                .iter()
                .find_map(|index| graph.node(*index).product.domain_label.clone())
                .unwrap_or_else(|| domain_id.to_string());

            DomainGroup {
                domain_id: domain_id.to_string(),
                label,
                bounds,
                color_index: slot % config.palette_size.max(1),
                member_ids: members.iter().map(|index| graph.node(*index).id().clone()).collect(),
            }
        })
        .collect()
}
