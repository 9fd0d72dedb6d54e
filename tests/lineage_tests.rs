//! Lineage Domain Integration Tests

use cim_domain_lineage::{
    render_markdown, render_mermaid, InMemoryCatalog, LayoutConfig, LineageConfig, LineageDirection,
    LineageError, LineageLink, LineageQuery, LineageQueryHandler, NodeId, ProductRecord,
};

/// A -> B -> C -> D -> E, with A and B in domain X and D and E in domain Y
fn chain_catalog() -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    catalog.add_product(ProductRecord::new("a", "A").with_domain("x", "Domain X"));
    catalog.add_product(ProductRecord::new("b", "B").with_domain("x", "Domain X"));
    catalog.add_product(ProductRecord::new("c", "C").with_status("Consume"));
    catalog.add_product(ProductRecord::new("d", "D").with_domain("y", "Domain Y"));
    catalog.add_product(ProductRecord::new("e", "E").with_domain("y", "Domain Y"));
    for (source, target) in [("a", "b"), ("b", "c"), ("c", "d"), ("d", "e")] {
        catalog.add_link(LineageLink::new(source, target)).unwrap();
    }
    catalog
}

fn handler(catalog: InMemoryCatalog) -> LineageQueryHandler<InMemoryCatalog> {
    LineageQueryHandler::new(catalog, LineageConfig::default()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_chain_at_depth_two() {
        let response = handler(chain_catalog())
            .handle(&LineageQuery::new("c").unwrap())
            .unwrap();

        let depths: Vec<(&str, i32)> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|id| (*id, response.node(id).unwrap().depth))
            .collect();
        assert_eq!(depths, vec![("a", -2), ("b", -1), ("c", 0), ("d", 1), ("e", 2)]);
        assert_eq!(response.edges.len(), 4);
        for (source, target) in [("a", "b"), ("b", "c"), ("c", "d"), ("d", "e")] {
            assert!(response.has_edge(source, target), "missing {source} -> {target}");
        }
        assert!(response.node("c").unwrap().is_focal);

        assert_eq!(response.domain_groups.len(), 2);
        let x = response.domain_group("x").unwrap();
        let y = response.domain_group("y").unwrap();
        assert_eq!(x.label, "Domain X");
        assert_eq!(y.label, "Domain Y");
        assert_eq!((x.color_index, y.color_index), (0, 1));

        let members = |ids: &[NodeId]| {
            let mut ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
            ids.sort();
            ids
        };
        assert_eq!(members(&x.member_ids), vec!["a", "b"]);
        assert_eq!(members(&y.member_ids), vec!["d", "e"]);
    }

    #[test]
    fn test_chain_geometry() {
        let response = handler(chain_catalog())
            .handle(&LineageQuery::new("c").unwrap())
            .unwrap();
        let config = LayoutConfig::default();
        let step = config.node_width + config.layer_separation;

        for (i, id) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            let node = response.node(id).unwrap();
            assert_eq!(node.layer, i as i32 - 2);
            assert_eq!(node.order, 0);
            assert_eq!(node.position.x, config.margin + i as f64 * step);
            assert_eq!(node.position.y, config.margin);
        }

        let x = response.domain_group("x").unwrap();
        let a = response.node("a").unwrap().position;
        let b = response.node("b").unwrap().position;
        assert_eq!(x.bounds.min_x, a.x - config.node_width / 2.0 - 16.0);
        assert_eq!(x.bounds.max_x, b.x + config.node_width / 2.0 + 16.0);
        assert_eq!(x.bounds.min_y, a.y - config.node_height / 2.0 - 36.0);
        assert_eq!(x.bounds.max_y, a.y + config.node_height / 2.0 + 16.0);
        assert!(response.bounds.encloses(&x.bounds));
    }

    #[test]
    fn test_upstream_only_at_depth_one() {
        let query = LineageQuery::from_params("c", Some("upstream"), Some(1)).unwrap();
        let response = handler(chain_catalog()).handle(&query).unwrap();

        assert_eq!(response.direction, LineageDirection::Upstream);
        assert_eq!(response.nodes.len(), 2);
        assert_eq!(response.node("b").unwrap().depth, -1);
        assert_eq!(response.node("c").unwrap().depth, 0);
        assert_eq!(response.edges.len(), 1);
        assert!(response.has_edge("b", "c"));
        // B alone in domain X gets no region
        assert!(response.domain_groups.is_empty());
    }

    #[test]
    fn test_downstream_only() {
        let query = LineageQuery::from_params("c", Some("downstream"), Some(5)).unwrap();
        let response = handler(chain_catalog()).handle(&query).unwrap();

        assert!(response.nodes.iter().all(|n| n.depth >= 0));
        assert_eq!(response.nodes.len(), 3);
        assert_eq!(response.node("e").unwrap().depth, 2);
    }

    #[test]
    fn test_isolated_focal() {
        let mut catalog = chain_catalog();
        catalog.add_product(ProductRecord::new("lonely", "Lonely").with_domain("x", "Domain X"));
        let response = handler(catalog)
            .handle(&LineageQuery::new("lonely").unwrap())
            .unwrap();

        assert_eq!(response.nodes.len(), 1);
        assert!(response.edges.is_empty());
        assert!(response.domain_groups.is_empty());
        let focal = response.focal().unwrap();
        let config = LayoutConfig::default();
        assert_eq!(focal.position.x, config.margin);
        assert_eq!(focal.position.y, config.margin);
    }

    #[test]
    fn test_unknown_focal() {
        let result = handler(chain_catalog()).handle(&LineageQuery::new("zzz").unwrap());
        match result {
            Err(LineageError::NotFound(id)) => assert_eq!(id.as_str(), "zzz"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_depth_out_of_range() {
        for depth in [0, 6] {
            let result = LineageQuery::from_params("c", None, Some(depth));
            assert!(matches!(result, Err(LineageError::InvalidArgument(_))), "depth {depth}");
        }
        assert!(matches!(
            LineageQuery::from_params("c", Some("sideways"), None),
            Err(LineageError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_siblings_are_centered_around_the_focal_row() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_product(ProductRecord::new("hub", "Hub"));
        for id in ["s1", "s2", "s3"] {
            catalog.add_product(ProductRecord::new(id, id.to_uppercase()));
            catalog.add_link(LineageLink::new("hub", id)).unwrap();
        }
        let response = handler(catalog).handle(&LineageQuery::new("hub").unwrap()).unwrap();
        let config = LayoutConfig::default();
        let sibling_step = config.node_height + config.sibling_separation;

        let hub = response.node("hub").unwrap();
        let middle = response.node("s2").unwrap();
        assert_eq!(hub.position.y, middle.position.y);
        assert_eq!(hub.position.y, config.margin + sibling_step);
        let orders: Vec<usize> = ["s1", "s2", "s3"].iter().map(|id| response.node(id).unwrap().order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_cycle_keeps_minimum_hops() {
        let mut catalog = chain_catalog();
        // e feeds back into c: e is both 2 hops downstream and 1 hop upstream
        catalog.add_link(LineageLink::new("e", "c")).unwrap();
        let response = handler(catalog).handle(&LineageQuery::new("c").unwrap()).unwrap();

        assert_eq!(response.node("e").unwrap().depth, -1);
        assert_eq!(response.node("d").unwrap().depth, 1);
        assert!(response.has_edge("e", "c"));
    }

    #[test]
    fn test_ids_containing_separators_keep_every_edge() {
        let mut catalog = InMemoryCatalog::new();
        for id in ["f", "b@p", "b"] {
            catalog.add_product(ProductRecord::new(id, id));
        }
        catalog.add_link(LineageLink::new("f", "b@p")).unwrap();
        catalog
            .add_link(LineageLink::new("f", "b").via_port("p", None))
            .unwrap();

        let query = LineageQuery::from_params("f", Some("downstream"), Some(1)).unwrap();
        let response = handler(catalog).handle(&query).unwrap();
        assert_eq!(response.nodes.len(), 3);
        assert_eq!(response.edges.len(), 2);
        assert!(response.has_edge("f", "b@p"));
        assert!(response.has_edge("f", "b"));
        assert_ne!(response.edges[0].edge.id, response.edges[1].edge.id);
    }

    #[test]
    fn test_repeated_queries_are_identical() {
        let handler = handler(chain_catalog());
        let query = LineageQuery::new("c").unwrap();
        let first = serde_json::to_string(&handler.handle(&query).unwrap()).unwrap();
        let second = serde_json::to_string(&handler.handle(&query).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_exports() {
        let response = handler(chain_catalog())
            .handle(&LineageQuery::new("c").unwrap())
            .unwrap();

        let mermaid = render_mermaid(&response);
        assert!(mermaid.starts_with("flowchart LR"));
        assert_eq!(mermaid.matches("subgraph").count(), 2);
        assert_eq!(mermaid.matches("-->").count(), 4);
        assert!(mermaid.contains("class n0 focal;"));

        let report = render_markdown(&response);
        assert!(report.contains("# Lineage Report: C"));
        assert!(report.contains("## Upstream Dependencies (2)"));
        assert!(report.contains("## Downstream Consumers (2)"));
        assert!(report.contains("Changes to C will directly affect 1 product."));
    }
}
