// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Centrality and community metrics over collaboration graphs
//!
//! Scores are keyed by user login. Edge weights are read as distances by
//! the path-based metrics (betweenness, weighted closeness) and as
//! strengths by degree and PageRank.

pub mod centrality;
pub mod community;
pub mod summary;

pub use centrality::{CentralityMetrics, CentralityReport, PageRankConfig};
pub use community::{BridgeBand, CommunityMetrics, CommunityReport, ModularityBand};
pub use summary::{overall_means, GraphSummary, MetricSummary};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Per-user score
pub type Scores = BTreeMap<String, f64>;

/// The centrality metrics reported for every graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Weighted degree centrality
    Degree,
    /// Shortest-path betweenness
    Betweenness,
    /// Closeness centrality
    Closeness,
    /// PageRank
    PageRank,
}

impl Metric {
    /// Every metric, in report order
    pub const ALL: [Self; 4] = [Self::Degree, Self::Betweenness, Self::Closeness, Self::PageRank];

    /// Lowercase name used in tables and JSON
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::Betweenness => "betweenness",
            Self::Closeness => "closeness",
            Self::PageRank => "pagerank",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The `k` highest scores, ties broken by login
#[must_use]
pub fn top_k(scores: &Scores, k: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = scores
        .iter()
        .map(|(user, &score)| (user.clone(), score))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_k_orders_and_truncates() {
        let scores: Scores = [("a", 0.1), ("b", 0.5), ("c", 0.5), ("d", 0.3)]
            .into_iter()
            .map(|(u, s)| (u.to_string(), s))
            .collect();

        let top = top_k(&scores, 3);
        let names: Vec<&str> = top.iter().map(|(u, _)| u.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "d"]);
        assert_eq!(top_k(&scores, 10).len(), 4);
    }
}
