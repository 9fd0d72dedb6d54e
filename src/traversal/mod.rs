//! Bounded lineage traversal
//!
//! Breadth-first search from the focal product along inbound links (upstream),
//! outbound links (downstream) or both. Each leg keeps its own visited set, so
//! cycles in the catalog cannot cause revisits and every pass halts after
//! `max_depth` layers. The first discovery of a node fixes its hop count, which
//! under BFS is the minimum for that leg.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, warn};

use crate::components::{LineageEdge, LineageGraph, LineageGraphBuilder, LineageNode, ProductRecord};
use crate::queries::{LineageError, LineageQuery, LineageResult};
use crate::value_objects::{NodeId, PortId};

/// A dependency as the metadata store reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageLink {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_id: Option<PortId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl LineageLink {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            port_id: None,
            label: None,
        }
    }

    pub fn via_port(mut self, port_id: impl Into<String>, label: Option<String>) -> Self {
        self.port_id = Some(PortId::new(port_id));
        self.label = label;
        self
    }

    fn into_edge(self) -> LineageEdge {
        LineageEdge::new(self.source, self.target, self.port_id, self.label)
    }
}

/// Neighbor lookup over the full dependency graph
///
/// Implemented by whatever holds the catalog. Links may reference products the
/// source does not know; the traversal drops those.
pub trait LineageSource {
    /// Look up a product by id
    fn product(&self, id: &NodeId) -> Option<ProductRecord>;

    /// Links whose source is `id` (this product feeds others)
    fn outbound(&self, id: &NodeId) -> Vec<LineageLink>;

    /// Links whose target is `id` (other products feed this one)
    fn inbound(&self, id: &NodeId) -> Vec<LineageLink>;
}

impl<S: LineageSource + ?Sized> LineageSource for &S {
    fn product(&self, id: &NodeId) -> Option<ProductRecord> {
        (**self).product(id)
    }

    fn outbound(&self, id: &NodeId) -> Vec<LineageLink> {
        (**self).outbound(id)
    }

    fn inbound(&self, id: &NodeId) -> Vec<LineageLink> {
        (**self).inbound(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leg {
    Upstream,
    Downstream,
}

impl Leg {
    fn links<S: LineageSource + ?Sized>(&self, source: &S, id: &NodeId) -> Vec<LineageLink> {
        match self {
            Leg::Upstream => source.inbound(id),
            Leg::Downstream => source.outbound(id),
        }
    }

    /// The far end of `link` when expanding `from`, if the link actually touches `from`
    fn far_end<'l>(&self, link: &'l LineageLink, from: &NodeId) -> Option<&'l NodeId> {
        match self {
            Leg::Upstream if &link.target == from => Some(&link.source),
            Leg::Downstream if &link.source == from => Some(&link.target),
            _ => None,
        }
    }

    fn signed(&self, hops: u32) -> i32 {
        match self {
            Leg::Upstream => -(hops as i32),
            Leg::Downstream => hops as i32,
        }
    }
}

struct Reached {
    product: ProductRecord,
    hops: u32,
}

/// Everything one leg touched, nodes in discovery order
struct PassResult {
    reached: IndexMap<NodeId, Reached>,
    links: Vec<LineageLink>,
}

fn run_pass<S: LineageSource + ?Sized>(
    source: &S,
    focal: &ProductRecord,
    leg: Leg,
    max_depth: u32,
) -> PassResult {
    let mut reached: IndexMap<NodeId, Reached> = IndexMap::new();
    let mut links = Vec::new();
    let mut queue = VecDeque::new();

    reached.insert(
        focal.id.clone(),
        Reached {
            product: focal.clone(),
            hops: 0,
        },
    );
    queue.push_back((focal.id.clone(), 0u32));

    while let Some((current, hops)) = queue.pop_front() {
        if hops >= max_depth {
            continue;
        }

        let mut expansion: Vec<(LineageLink, ProductRecord)> = Vec::new();
        for link in leg.links(source, &current) {
            let Some(neighbor) = leg.far_end(&link, &current).cloned() else {
                warn!(
                    node = %current,
                    from = %link.source,
                    to = %link.target,
                    "ignoring link that does not touch the expanded node"
                );
                continue;
            };
            let product = match reached.get(&neighbor) {
                Some(known) => Some(known.product.clone()),
                None => source.product(&neighbor),
            };
            match product {
                Some(product) => expansion.push((link, product)),
                None => warn!(
                    node = %current,
                    missing = %neighbor,
                    "dropping dangling link to a product missing from the catalog"
                ),
            }
        }

        // Siblings are discovered alphabetically, whatever order the store used.
        expansion.sort_by(|(la, pa), (lb, pb)| {
            pa.display_label
                .cmp(&pb.display_label)
                .then_with(|| pa.id.cmp(&pb.id))
                .then_with(|| la.port_id.cmp(&lb.port_id))
        });

        for (link, product) in expansion {
            if !reached.contains_key(&product.id) {
                queue.push_back((product.id.clone(), hops + 1));
                reached.insert(
                    product.id.clone(),
                    Reached {
                        product,
                        hops: hops + 1,
                    },
                );
            }
            links.push(link);
        }
    }

    debug!(
        leg = ?leg,
        focal = %focal.id,
        nodes = reached.len(),
        links = links.len(),
        "lineage pass complete"
    );

    PassResult { reached, links }
}

/// Trace lineage for `query` over `source`
///
/// The result holds only the nodes and edges the traversal touched. In `full`
/// mode a node reached by both legs keeps the smaller hop count, and the
/// downstream depth wins when both are equal.
pub fn traverse<S: LineageSource + ?Sized>(source: &S, query: &LineageQuery) -> LineageResult<LineageGraph> {
    query.validate()?;
    let focal_id = &query.focal_node_id;
    let focal = source
        .product(focal_id)
        .ok_or_else(|| LineageError::NotFound(focal_id.clone()))?;
    let max_depth = query.max_depth.get();

    let upstream = query
        .direction
        .includes_upstream()
        .then(|| run_pass(source, &focal, Leg::Upstream, max_depth));
    let downstream = query
        .direction
        .includes_downstream()
        .then(|| run_pass(source, &focal, Leg::Downstream, max_depth));

    let downstream_hops = |id: &NodeId| {
        downstream
            .as_ref()
            .and_then(|pass| pass.reached.get(id))
            .map(|r| r.hops)
    };
    let upstream_hops = |id: &NodeId| {
        upstream
            .as_ref()
            .and_then(|pass| pass.reached.get(id))
            .map(|r| r.hops)
    };

    let mut builder = LineageGraphBuilder::new();
    let mut discovery = 0usize;
    builder.add_node(LineageNode::new(focal.clone(), 0, discovery));

    if let Some(pass) = &upstream {
        for (id, reached) in pass.reached.iter().filter(|(id, _)| *id != focal_id) {
            let downstream_closer = downstream_hops(id).is_some_and(|down| down <= reached.hops);
            if !downstream_closer {
                discovery += 1;
                builder.add_node(LineageNode::new(
                    reached.product.clone(),
                    Leg::Upstream.signed(reached.hops),
                    discovery,
                ));
            }
        }
    }
    if let Some(pass) = &downstream {
        for (id, reached) in pass.reached.iter().filter(|(id, _)| *id != focal_id) {
            let upstream_closer = upstream_hops(id).is_some_and(|up| up < reached.hops);
            if !upstream_closer {
                discovery += 1;
                builder.add_node(LineageNode::new(
                    reached.product.clone(),
                    Leg::Downstream.signed(reached.hops),
                    discovery,
                ));
            }
        }
    }

    for pass in [upstream, downstream].into_iter().flatten() {
        for link in pass.links {
            builder.add_edge(link.into_edge());
        }
    }

    builder
        .build(focal_id)
        .ok_or_else(|| LineageError::NotFound(focal_id.clone()))
}
