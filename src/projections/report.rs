//! Text exports of a lineage response
//!
//! A tabular summary, a Markdown impact report and a Mermaid flowchart. The
//! Mermaid output mirrors the response: one subgraph per domain region, nodes
//! declared in layer order.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::queries::{LineageNodeView, LineageResponse};

/// Counts a report is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageSummary {
    pub focal_label: String,
    pub upstream_count: usize,
    pub downstream_count: usize,
    /// Node count per signed depth
    pub depth_counts: BTreeMap<i32, usize>,
    pub edge_count: usize,
    pub domain_group_count: usize,
    /// Labels of products one hop downstream of the focal node
    pub direct_consumers: Vec<String>,
}

impl LineageSummary {
    pub fn from_response(response: &LineageResponse) -> Self {
        let mut depth_counts = BTreeMap::new();
        for node in &response.nodes {
            *depth_counts.entry(node.depth).or_insert(0) += 1;
        }

        Self {
            focal_label: response
                .focal()
                .map(|n| n.product.display_label.clone())
                .unwrap_or_else(|| response.focal_node_id.to_string()),
            upstream_count: response.nodes.iter().filter(|n| n.depth < 0).count(),
            downstream_count: response.nodes.iter().filter(|n| n.depth > 0).count(),
            depth_counts,
            edge_count: response.edges.len(),
            domain_group_count: response.domain_groups.len(),
            direct_consumers: response
                .nodes
                .iter()
                .filter(|n| n.depth == 1)
                .map(|n| n.product.display_label.clone())
                .collect(),
        }
    }

    pub fn impact_statement(&self) -> String {
        let n = self.direct_consumers.len();
        format!(
            "Changes to {} will directly affect {} product{}.",
            self.focal_label,
            n,
            if n == 1 { "" } else { "s" }
        )
    }
}

fn sorted_side<'a>(response: &'a LineageResponse, upstream: bool) -> Vec<&'a LineageNodeView> {
    let mut nodes: Vec<_> = response
        .nodes
        .iter()
        .filter(|n| if upstream { n.depth < 0 } else { n.depth > 0 })
        .collect();
    nodes.sort_by_key(|n| (n.depth.abs(), n.order));
    nodes
}

/// Markdown impact report
pub fn render_markdown(response: &LineageResponse) -> String {
    let summary = LineageSummary::from_response(response);
    let mut report = String::new();

    let _ = writeln!(report, "# Lineage Report: {}\n", summary.focal_label);
    let _ = writeln!(
        report,
        "Direction: `{}`, max depth: {}\n",
        response.direction, response.max_depth
    );

    report.push_str("## Summary\n\n");
    report.push_str("| Depth | Nodes |\n");
    report.push_str("|-------|-------|\n");
    for (depth, count) in &summary.depth_counts {
        let _ = writeln!(report, "| {depth} | {count} |");
    }
    let _ = writeln!(report, "\nTotal edges: {}", summary.edge_count);
    let _ = writeln!(report, "Domain regions: {}\n", summary.domain_group_count);

    for (title, upstream) in [("Upstream Dependencies", true), ("Downstream Consumers", false)] {
        let side = sorted_side(response, upstream);
        let _ = writeln!(report, "## {} ({})\n", title, side.len());
        if side.is_empty() {
            report.push_str("_None_\n\n");
            continue;
        }
        for node in side {
            let _ = write!(
                report,
                "- **{}** (`{}`), {} hop{}",
                node.product.display_label,
                node.id(),
                node.depth.abs(),
                if node.depth.abs() == 1 { "" } else { "s" }
            );
            if let Some(domain) = node.product.domain_label.as_ref().or(node.product.domain_id.as_ref()) {
                let _ = write!(report, ", domain {domain}");
            }
            if let Some(status) = &node.product.status_label {
                let _ = write!(report, ", {status}");
            }
            report.push('\n');
        }
        report.push('\n');
    }

    report.push_str("## Impact\n\n");
    let _ = writeln!(report, "{}", summary.impact_statement());
    report
}

/// Mermaid entity codes for characters that end a label
fn escape_label(label: &str) -> String {
    label.replace('"', "#quot;").replace('|', "#124;")
}

/// Mermaid `flowchart LR` export
pub fn render_mermaid(response: &LineageResponse) -> String {
    let mut ids = std::collections::HashMap::new();
    let mut ordered: Vec<(usize, &LineageNodeView)> = response.nodes.iter().enumerate().collect();
    ordered.sort_by_key(|(i, n)| (n.layer, n.order, *i));
    for (i, node) in response.nodes.iter().enumerate() {
        ids.insert(node.id().as_str(), format!("n{i}"));
    }

    let mut output = String::new();
    let _ = writeln!(output, "flowchart LR");
    let _ = writeln!(output, "    %% Lineage of {}", response.focal_node_id);
    let _ = writeln!(output, "    classDef focal stroke-width:4px;");
    let _ = writeln!(output);

    let declare = |output: &mut String, indent: &str, index: usize, node: &LineageNodeView| {
        let _ = writeln!(
            output,
            "{indent}n{index}[\"{}\"]",
            escape_label(&node.product.display_label)
        );
    };

    let mut grouped = std::collections::HashSet::new();
    for (slot, group) in response.domain_groups.iter().enumerate() {
        let _ = writeln!(output, "    subgraph d{slot}[\"{}\"]", escape_label(&group.label));
        for (index, node) in &ordered {
            if group.member_ids.contains(node.id()) {
                declare(&mut output, "        ", *index, node);
                grouped.insert(*index);
            }
        }
        let _ = writeln!(output, "    end");
    }
    for (index, node) in &ordered {
        if !grouped.contains(index) {
            declare(&mut output, "    ", *index, node);
        }
    }

    let _ = writeln!(output);
    for view in &response.edges {
        let (Some(from), Some(to)) = (
            ids.get(view.edge.source.as_str()),
            ids.get(view.edge.target.as_str()),
        ) else {
            continue;
        };
        match &view.edge.label {
            Some(label) => {
                let _ = writeln!(output, "    {from} -->|{}| {to}", escape_label(label));
            }
            None => {
                let _ = writeln!(output, "    {from} --> {to}");
            }
        }
    }

    if let Some(focal) = ids.get(response.focal_node_id.as_str()) {
        let _ = writeln!(output, "    class {focal} focal;");
    }
    output
}
