//! Layer assignment and crossing reduction
//!
//! Layers come straight from traversal depth. Within each layer nodes start in
//! discovery order and are then swept from the leftmost layer to the rightmost,
//! each node taking the median position of its neighbors in the previous layer.
//! Ties always fall back to discovery order, so the result is a pure function
//! of the graph.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

use crate::components::{LineageGraph, NodeIndex};

/// Nodes per layer in their final order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerOrdering {
    layers: BTreeMap<i32, Vec<NodeIndex>>,
    /// Order within its layer, indexed by node
    order: Vec<usize>,
}

impl LayerOrdering {
    /// Initial order: by discovery, then by display label
    pub fn initial(graph: &LineageGraph) -> Self {
        let mut layers: BTreeMap<i32, Vec<NodeIndex>> = BTreeMap::new();
        for index in graph.node_indices() {
            layers.entry(graph.node(index).layer()).or_default().push(index);
        }
        for members in layers.values_mut() {
            members.sort_by(|a, b| {
                let (na, nb) = (graph.node(*a), graph.node(*b));
                na.discovery
                    .cmp(&nb.discovery)
                    .then_with(|| na.display_label().cmp(nb.display_label()))
            });
        }

        let mut ordering = Self {
            layers,
            order: vec![0; graph.node_count()],
        };
        ordering.reindex();
        ordering
    }

    fn reindex(&mut self) {
        for members in self.layers.values() {
            for (position, index) in members.iter().enumerate() {
                self.order[index.index()] = position;
            }
        }
    }

    pub fn layers(&self) -> &BTreeMap<i32, Vec<NodeIndex>> {
        &self.layers
    }

    pub fn layer(&self, layer: i32) -> &[NodeIndex] {
        self.layers.get(&layer).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn order_of(&self, index: NodeIndex) -> usize {
        self.order[index.index()]
    }

    pub fn min_layer(&self) -> i32 {
        self.layers.keys().next().copied().unwrap_or(0)
    }

    pub fn max_layer(&self) -> i32 {
        self.layers.keys().next_back().copied().unwrap_or(0)
    }

    /// Size of the most populated layer
    pub fn tallest(&self) -> usize {
        self.layers.values().map(Vec::len).max().unwrap_or(0)
    }
}

fn median(sorted: &[usize]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2] as f64),
        _ => Some((sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0),
    }
}

/// Reorder one layer against its already-placed predecessor. Returns true if anything moved.
fn reorder_layer(graph: &LineageGraph, ordering: &mut LayerOrdering, layer: i32, previous: i32) -> bool {
    let Some(members) = ordering.layers.get(&layer) else {
        return false;
    };

    let mut keyed: Vec<(f64, usize, NodeIndex)> = members
        .iter()
        .map(|&index| {
            let mut positions: Vec<usize> = graph
                .neighbors(index)
                .iter()
                .filter(|n| graph.node(**n).layer() == previous)
                .map(|n| ordering.order_of(*n))
                .collect();
            positions.sort_unstable();
            let key = median(&positions).unwrap_or(ordering.order_of(index) as f64);
            (key, graph.node(index).discovery, index)
        })
        .collect();

    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    let reordered: Vec<NodeIndex> = keyed.into_iter().map(|(_, _, index)| index).collect();

    if &reordered == members {
        return false;
    }
    ordering.layers.insert(layer, reordered);
    ordering.reindex();
    true
}

/// Order every layer of `graph`, sweeping at most `passes` times
pub fn order_layers(graph: &LineageGraph, passes: usize) -> LayerOrdering {
    let mut ordering = LayerOrdering::initial(graph);
    let keys: Vec<i32> = ordering.layers.keys().copied().collect();

    for pass in 0..passes {
        let mut changed = false;
        for window in keys.windows(2) {
            changed |= reorder_layer(graph, &mut ordering, window[1], window[0]);
        }
        if !changed {
            debug!(passes = pass + 1, "layer ordering converged");
            break;
        }
    }

    ordering
}

/// Number of edge crossings between adjacent layers under `ordering`
pub fn count_crossings(graph: &LineageGraph, ordering: &LayerOrdering) -> usize {
    let mut spans: BTreeMap<i32, Vec<(usize, usize)>> = BTreeMap::new();
    for e in 0..graph.edge_count() {
        let (source, target) = graph.endpoints(e);
        let (ls, lt) = (graph.node(source).layer(), graph.node(target).layer());
        let (left, right, left_layer) = match ls.cmp(&lt) {
            Ordering::Less if lt - ls == 1 => (source, target, ls),
            Ordering::Greater if ls - lt == 1 => (target, source, lt),
            _ => continue,
        };
        spans
            .entry(left_layer)
            .or_default()
            .push((ordering.order_of(left), ordering.order_of(right)));
    }

    spans
        .values()
        .map(|edges| {
            let mut crossings = 0;
            for (i, a) in edges.iter().enumerate() {
                for b in &edges[i + 1..] {
                    if (a.0 < b.0 && a.1 > b.1) || (a.0 > b.0 && a.1 < b.1) {
                        crossings += 1;
                    }
                }
            }
            crossings
        })
        .sum()
}
