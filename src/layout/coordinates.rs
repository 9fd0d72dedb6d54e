//! Coordinate assignment
//!
//! Positions are node centers:
//!
//! ```text
//! x = margin + (layer - min_layer) * (node_width + layer_separation)
//! y = margin + order * (node_height + sibling_separation)
//! ```
//!
//! Each layer is then shifted down so it is centered against the tallest layer,
//! and the focal node is pinned to the vertical midpoint of the whole layout.

use super::ordering::LayerOrdering;
use super::LayoutConfig;
use crate::components::LineageGraph;
use crate::value_objects::Position2D;

/// Vertical midpoint of a layout whose tallest layer holds `tallest` nodes
pub fn vertical_midpoint(tallest: usize, config: &LayoutConfig) -> f64 {
    config.margin + tallest.saturating_sub(1) as f64 * config.sibling_step() / 2.0
}

/// Center position of every node, indexed by node
pub fn assign_coordinates(graph: &LineageGraph, ordering: &LayerOrdering, config: &LayoutConfig) -> Vec<Position2D> {
    let mut positions = vec![Position2D::default(); graph.node_count()];
    let min_layer = ordering.min_layer();
    let tallest = ordering.tallest();
    let step_y = config.sibling_step();

    for (&layer, members) in ordering.layers() {
        let x = config.margin + f64::from(layer - min_layer) * config.layer_step();
        let shift = (tallest - members.len()) as f64 * step_y / 2.0;
        for (order, index) in members.iter().enumerate() {
            let y = config.margin + order as f64 * step_y + shift;
            positions[index.index()] = Position2D::new(x, y);
        }
    }

    let focal = graph.focal();
    positions[focal.index()].y = vertical_midpoint(tallest, config);
    positions
}
