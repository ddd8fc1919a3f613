// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Communities command - modularity communities and bridging users

use super::{yes_no, Output};
use crate::dataset::{Dataset, GraphView};
use crate::metrics::{top_k, BridgeBand, CommunityMetrics, CommunityReport, ModularityBand};
use anyhow::Result;
use serde::Serialize;
use tracing::info;

/// One user ranked by bridging centrality
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bridge {
    /// Login
    pub user: String,
    /// Bridging centrality
    pub score: f64,
    /// Band the score falls in
    pub band: BridgeBand,
}

/// Community structure of one graph
#[derive(Debug, Clone, Serialize)]
pub struct CommunitiesReport {
    /// View name
    pub graph: String,
    /// Mean unweighted degree
    pub average_degree: f64,
    /// Undirected edge density
    pub density: f64,
    /// Every user reachable from every other
    pub connected: bool,
    /// Connected components
    pub components: usize,
    /// Greedy modularity partition
    #[serde(flatten)]
    pub partition: CommunityReport,
    /// Band of the partition's modularity
    pub modularity_band: ModularityBand,
    /// Users with the highest bridging centrality
    pub bridges: Vec<Bridge>,
}

/// Detect communities in a view
#[must_use]
pub fn build(dataset: &Dataset, view: GraphView, k: usize) -> CommunitiesReport {
    let graph = dataset.collaboration_graph(view);
    let metrics = CommunityMetrics::new(&graph);

    let partition = metrics.detect_communities();
    let bridges = top_k(&metrics.bridging_centrality(), k)
        .into_iter()
        .map(|(user, score)| Bridge {
            user,
            score,
            band: BridgeBand::of(score),
        })
        .collect();

    CommunitiesReport {
        graph: view.name().to_string(),
        average_degree: graph.average_degree(),
        density: graph.density(),
        connected: graph.is_connected(),
        components: graph.component_count(),
        modularity_band: ModularityBand::of(partition.modularity),
        partition,
        bridges,
    }
}

/// Run the communities command
pub fn run(dataset: &Dataset, view: GraphView, k: usize, out: Output) -> Result<()> {
    info!("Detecting communities in {} graph", view);
    let report = build(dataset, view, k);

    if out.json {
        return out.json(&report);
    }

    out.heading(view.title());
    out.field("average degree", format!("{:.2}", report.average_degree));
    out.field("density", format!("{:.4}", report.density));
    out.field("connected", yes_no(report.connected));
    out.field("components", report.components);
    out.field("communities", report.partition.count());
    out.field(
        "modularity",
        format!("{:.4} ({})", report.partition.modularity, report.modularity_band),
    );

    println!();
    out.heading("Communities");
    for (i, members) in report.partition.communities.iter().enumerate() {
        println!("  {:>3}. [{}] {}", i + 1, members.len(), members.join(", "));
    }

    println!();
    out.heading("Bridging users");
    for bridge in &report.bridges {
        println!("  {:<24} {:.6}  {}", bridge.user, bridge.score, bridge.band);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Interaction, InteractionKind};

    #[test]
    fn test_two_groups_joined_by_one_link() {
        let pairs = [
            ("a", "b"),
            ("b", "c"),
            ("a", "c"),
            ("d", "e"),
            ("e", "f"),
            ("d", "f"),
            ("c", "d"),
        ];
        let mut dataset = Dataset {
            users: ["a", "b", "c", "d", "e", "f", "loner"].into_iter().map(String::from).collect(),
            ..Default::default()
        };
        dataset.interactions.insert(
            InteractionKind::IssueComment.key().into(),
            pairs
                .into_iter()
                .map(|(from, to)| Interaction {
                    from: from.into(),
                    to: to.into(),
                    weight: Some(2.0),
                    label: String::new(),
                })
                .collect(),
        );

        let report = build(&dataset, GraphView::IssueComments, 2);

        assert!(!report.connected);
        assert_eq!(report.components, 2);
        assert_eq!(report.partition.sizes(), vec![3, 3, 1]);
        assert!((report.average_degree - 2.0).abs() < 1e-12);
        assert_eq!(report.modularity_band, ModularityBand::Moderate);

        let mut bridges: Vec<&str> = report.bridges.iter().map(|b| b.user.as_str()).collect();
        bridges.sort_unstable();
        assert_eq!(bridges, vec!["c", "d"]);
        for bridge in &report.bridges {
            assert_eq!(bridge.band, BridgeBand::of(bridge.score));
            assert_eq!(bridge.band, BridgeBand::Strong);
        }
    }
}
