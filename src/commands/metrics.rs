// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Metrics command - top users by each centrality

use super::Output;
use crate::config::Config;
use crate::dataset::{Dataset, GraphView};
use crate::metrics::{self, centrality, CentralityMetrics, CentralityReport, GraphSummary, Metric};
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Every centrality of one user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserScores {
    /// Login
    pub user: String,
    /// Normalized weighted degree
    pub degree: f64,
    /// Normalized betweenness
    pub betweenness: f64,
    /// Closeness
    pub closeness: f64,
    /// PageRank
    pub pagerank: f64,
}

/// Ranked scores for one graph
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// View name
    pub graph: String,
    /// Users in the graph
    pub users: usize,
    /// Highest scorers per metric
    pub top: BTreeMap<Metric, Vec<(String, f64)>>,
    /// Every user with all four scores, highest PageRank first
    pub rows: Vec<UserScores>,
    /// Sum, mean and count per metric
    pub summary: GraphSummary,
}

/// One row per user, ordered by PageRank descending then login
#[must_use]
pub fn user_rows(report: &CentralityReport) -> Vec<UserScores> {
    let score = |metric: Metric, user: &str| report.get(metric).get(user).copied().unwrap_or(0.0);
    let mut rows: Vec<UserScores> = report
        .pagerank
        .keys()
        .map(|user| UserScores {
            user: user.clone(),
            degree: score(Metric::Degree, user),
            betweenness: score(Metric::Betweenness, user),
            closeness: score(Metric::Closeness, user),
            pagerank: score(Metric::PageRank, user),
        })
        .collect();
    rows.sort_by(|a, b| b.pagerank.total_cmp(&a.pagerank).then_with(|| a.user.cmp(&b.user)));
    rows
}

/// Compute every centrality of a view and keep the top `k` per metric
#[must_use]
pub fn build(dataset: &Dataset, view: GraphView, k: usize, config: &Config) -> MetricsReport {
    let graph = dataset.collaboration_graph(view);
    let report =
        CentralityMetrics::new(&graph).compute_all(&config.pagerank, config.closeness_weighted);

    MetricsReport {
        graph: view.name().to_string(),
        users: graph.node_count(),
        top: centrality::by_metric(&report)
            .into_iter()
            .map(|(metric, scores)| (metric, metrics::top_k(scores, k)))
            .collect(),
        rows: user_rows(&report),
        summary: GraphSummary::from_report(&report),
    }
}

/// Run the metrics command.
///
/// With `all` the text output is the full per-user table instead of the
/// per-metric rankings. JSON always carries both.
pub fn run(
    dataset: &Dataset,
    view: GraphView,
    top: Option<usize>,
    all: bool,
    config: &Config,
    out: Output,
) -> Result<()> {
    let k = top.unwrap_or(config.top_k);
    info!("Computing metrics for {} graph (top {})", view, k);
    let report = build(dataset, view, k, config);

    if out.json {
        return out.json(&report);
    }

    out.heading(&format!("{} ({} users)", view.title(), report.users));
    if all {
        println!(
            "  {:<24} {:>12} {:>12} {:>12} {:>12}",
            "user", "degree", "betweenness", "closeness", "pagerank"
        );
        for row in &report.rows {
            println!(
                "  {:<24} {:>12.6} {:>12.6} {:>12.6} {:>12.6}",
                row.user, row.degree, row.betweenness, row.closeness, row.pagerank
            );
        }
        return Ok(());
    }
    for metric in Metric::ALL {
        let summary = report.summary.get(metric);
        println!();
        out.heading(&format!("{metric} (mean {:.4})", summary.mean));
        for (rank, (user, score)) in report.top.get(&metric).into_iter().flatten().enumerate() {
            println!("  {:>3}. {:<24} {:.6}", rank + 1, user, score);
        }
    }
    Ok(())
}
