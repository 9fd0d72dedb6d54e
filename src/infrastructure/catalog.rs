//! In-memory product catalog
//!
//! Holds every product and dependency link in a petgraph `StableDiGraph`, the
//! way a metadata store would expose them to the traversal. Snapshot links
//! whose endpoints are unknown are kept aside and still reported, so the
//! traversal sees exactly what an inconsistent store would hand it.

use petgraph::stable_graph::{NodeIndex as CatalogIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::components::ProductRecord;
use crate::queries::{LineageError, LineageResult};
use crate::traversal::{LineageLink, LineageSource};
use crate::value_objects::{NodeId, PortId};

/// Errors raised while loading a catalog snapshot
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read catalog snapshot: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LinkData {
    port_id: Option<PortId>,
    label: Option<String>,
}

/// Serialized form of a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub products: Vec<ProductRecord>,
    #[serde(default)]
    pub links: Vec<LineageLink>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    graph: StableDiGraph<ProductRecord, LinkData>,
    index: HashMap<NodeId, CatalogIndex>,
    dangling: Vec<LineageLink>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product, replacing any record with the same id
    pub fn add_product(&mut self, product: ProductRecord) {
        match self.index.get(&product.id) {
            Some(&ix) => self.graph[ix] = product,
            None => {
                let id = product.id.clone();
                let ix = self.graph.add_node(product);
                self.index.insert(id, ix);
            }
        }
    }

    /// Link two known products
    pub fn add_link(&mut self, link: LineageLink) -> LineageResult<()> {
        let source = self.lookup(&link.source)?;
        let target = self.lookup(&link.target)?;
        self.insert_link(source, target, link);
        Ok(())
    }

    fn insert_link(&mut self, source: CatalogIndex, target: CatalogIndex, link: LineageLink) {
        self.graph.add_edge(
            source,
            target,
            LinkData {
                port_id: link.port_id,
                label: link.label,
            },
        );
    }

    fn lookup(&self, id: &NodeId) -> LineageResult<CatalogIndex> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| LineageError::NotFound(id.clone()))
    }

    pub fn product_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count() + self.dangling.len()
    }

    /// Links that reference at least one unknown product
    pub fn dangling_links(&self) -> &[LineageLink] {
        &self.dangling
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        let mut catalog = Self::new();
        for product in snapshot.products {
            catalog.add_product(product);
        }
        for link in snapshot.links {
            match (catalog.index.get(&link.source), catalog.index.get(&link.target)) {
                (Some(&source), Some(&target)) => catalog.insert_link(source, target, link),
                _ => {
                    warn!(from = %link.source, to = %link.target, "catalog link references unknown product");
                    catalog.dangling.push(link);
                }
            }
        }
        debug!(
            products = catalog.product_count(),
            links = catalog.link_count(),
            dangling = catalog.dangling.len(),
            "catalog loaded"
        );
        catalog
    }

    pub fn to_snapshot(&self) -> CatalogSnapshot {
        let products = self.graph.node_indices().map(|ix| self.graph[ix].clone()).collect();
        let links = self
            .graph
            .edge_indices()
            .filter_map(|e| {
                let (source, target) = self.graph.edge_endpoints(e)?;
                Some(self.link_from(source, target, &self.graph[e]))
            })
            .chain(self.dangling.iter().cloned())
            .collect();
        CatalogSnapshot { products, links }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let snapshot: CatalogSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn link_from(&self, source: CatalogIndex, target: CatalogIndex, data: &LinkData) -> LineageLink {
        LineageLink {
            source: self.graph[source].id.clone(),
            target: self.graph[target].id.clone(),
            port_id: data.port_id.clone(),
            label: data.label.clone(),
        }
    }

    fn links(&self, id: &NodeId, direction: Direction) -> Vec<LineageLink> {
        let mut links: Vec<LineageLink> = match self.index.get(id) {
            Some(&ix) => self
                .graph
                .edges_directed(ix, direction)
                .filter_map(|e| {
                    let (source, target) = self.graph.edge_endpoints(e.id())?;
                    Some(self.link_from(source, target, e.weight()))
                })
                .collect(),
            None => Vec::new(),
        };
        links.extend(
            self.dangling
                .iter()
                .filter(|l| match direction {
                    Direction::Outgoing => &l.source == id,
                    Direction::Incoming => &l.target == id,
                })
                .cloned(),
        );
        links
    }
}

impl LineageSource for InMemoryCatalog {
    fn product(&self, id: &NodeId) -> Option<ProductRecord> {
        self.index.get(id).map(|&ix| self.graph[ix].clone())
    }

    fn outbound(&self, id: &NodeId) -> Vec<LineageLink> {
        self.links(id, Direction::Outgoing)
    }

    fn inbound(&self, id: &NodeId) -> Vec<LineageLink> {
        self.links(id, Direction::Incoming)
    }
}
