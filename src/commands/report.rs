// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Report command - side-by-side summary of the reported graphs

use super::{yes_no, Output};
use crate::config::Config;
use crate::dataset::{Dataset, GraphView};
use crate::metrics::{overall_means, CentralityMetrics, CommunityMetrics, GraphSummary, Metric};
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Summary of one graph in the global report
#[derive(Debug, Clone, Serialize)]
pub struct GraphEntry {
    /// View name
    pub graph: String,
    /// Users
    pub users: usize,
    /// Undirected edges
    pub edges: usize,
    /// Undirected edge density
    pub density: f64,
    /// Every user reachable from every other
    pub connected: bool,
    /// Greedy modularity communities
    pub communities: usize,
    /// Modularity of that partition
    pub modularity: f64,
    /// Per-metric summary
    pub summary: GraphSummary,
}

/// Global report across the issue and pull request graphs
#[derive(Debug, Clone, Serialize)]
pub struct GlobalReport {
    /// Sampled repository
    pub repository: String,
    /// One entry per reported graph
    pub graphs: Vec<GraphEntry>,
    /// Mean of each metric over every scored user of every graph
    pub overall: BTreeMap<Metric, f64>,
}

/// Build the global report
#[must_use]
pub fn build(dataset: &Dataset, config: &Config) -> GlobalReport {
    let mut summaries: Vec<(GraphView, GraphSummary)> = Vec::new();
    let mut graphs = Vec::new();

    for view in GraphView::REPORTED {
        let graph = dataset.collaboration_graph(view);
        let centrality = CentralityMetrics::new(&graph)
            .compute_all(&config.pagerank, config.closeness_weighted);
        let partition = CommunityMetrics::new(&graph).detect_communities();
        let summary = GraphSummary::from_report(&centrality);

        graphs.push(GraphEntry {
            graph: view.name().to_string(),
            users: graph.node_count(),
            edges: graph.edge_count(),
            density: graph.density(),
            connected: graph.is_connected(),
            communities: partition.count(),
            modularity: partition.modularity,
            summary: summary.clone(),
        });
        summaries.push((view, summary));
    }

    GlobalReport {
        repository: dataset.repository.clone(),
        graphs,
        overall: overall_means(&summaries),
    }
}

/// Run the report command
pub fn run(dataset: &Dataset, config: &Config, out: Output) -> Result<()> {
    info!("Building global report for {}", dataset.repository);
    let report = build(dataset, config);

    if out.json {
        return out.json(&report);
    }

    out.heading(&format!("Global report - {}", report.repository));
    for entry in &report.graphs {
        println!();
        out.heading(&entry.graph);
        out.field("users", entry.users);
        out.field("edges", entry.edges);
        out.field("density", format!("{:.4}", entry.density));
        out.field("connected", yes_no(entry.connected));
        out.field("communities", entry.communities);
        out.field("modularity", format!("{:.4}", entry.modularity));
        for metric in Metric::ALL {
            out.field(&format!("mean {metric}"), format!("{:.6}", entry.summary.get(metric).mean));
        }
    }

    println!();
    out.heading("Overall means");
    for (metric, mean) in &report.overall {
        out.field(metric.name(), format!("{mean:.6}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_every_view_even_when_empty() {
        let dataset = Dataset {
            repository: "owner/empty".into(),
            users: vec!["solo".into()],
            ..Default::default()
        };

        let report = build(&dataset, &Config::default());

        assert_eq!(report.graphs.len(), GraphView::REPORTED.len());
        for entry in &report.graphs {
            assert_eq!(entry.users, 1);
            assert_eq!(entry.edges, 0);
            assert!(entry.connected);
        }
        assert_eq!(report.overall[&Metric::Degree], 0.0);
        assert!((report.overall[&Metric::PageRank] - 1.0).abs() < 1e-9);
    }
}
