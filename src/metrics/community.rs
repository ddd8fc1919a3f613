// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Community detection, modularity and bridging centrality
//!
//! Communities are found by greedy modularity agglomeration: every user
//! starts alone and the pair of adjacent communities whose merge raises
//! modularity the most is joined, until no merge helps. With `m` the total
//! edge weight, `e_ij` the weight between communities `i` and `j` over
//! `2m`, and `a_i` the summed degree of `i` over `2m`, a merge gains
//! `2 (e_ij - a_i a_j)`.

use super::{CentralityMetrics, Scores};
use crate::collaboration::CollaborationGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use tracing::debug;

/// Partition of the users plus its modularity
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommunityReport {
    /// Modularity of the partition
    pub modularity: f64,
    /// Communities, largest first
    pub communities: Vec<Vec<String>>,
}

impl CommunityReport {
    /// Number of communities
    #[must_use]
    pub fn count(&self) -> usize {
        self.communities.len()
    }

    /// Size of every community, largest first
    #[must_use]
    pub fn sizes(&self) -> Vec<usize> {
        self.communities.iter().map(Vec::len).collect()
    }
}

/// How clearly a partition separates its communities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModularityBand {
    /// Below 0.20
    Weak,
    /// From 0.20 up to 0.40
    Moderate,
    /// 0.40 and above
    Strong,
}

impl ModularityBand {
    /// Band of a modularity score
    #[must_use]
    pub fn of(modularity: f64) -> Self {
        if modularity >= 0.40 {
            Self::Strong
        } else if modularity >= 0.20 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    /// Lowercase label
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        }
    }
}

impl fmt::Display for ModularityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How much a user links otherwise separate groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeBand {
    /// Below 0.01
    None,
    /// From 0.01 up to 0.05
    Weak,
    /// From 0.05 up to 0.15
    Moderate,
    /// 0.15 and above
    Strong,
}

impl BridgeBand {
    /// Band of a bridging centrality score
    #[must_use]
    pub fn of(score: f64) -> Self {
        if score < 0.01 {
            Self::None
        } else if score < 0.05 {
            Self::Weak
        } else if score < 0.15 {
            Self::Moderate
        } else {
            Self::Strong
        }
    }

    /// Lowercase label
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        }
    }
}

impl fmt::Display for BridgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Community calculator bound to one graph
pub struct CommunityMetrics<'g> {
    graph: &'g CollaborationGraph,
}

impl<'g> CommunityMetrics<'g> {
    /// Create a calculator for `graph`
    #[must_use]
    pub fn new(graph: &'g CollaborationGraph) -> Self {
        Self { graph }
    }

    /// Greedy modularity communities
    #[must_use]
    pub fn detect_communities(&self) -> CommunityReport {
        let g = self.graph.inner();
        let n = g.node_count();
        if n == 0 {
            return CommunityReport::default();
        }

        let two_m = 2.0 * self.graph.total_weight();
        let mut members: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
        let mut degree = vec![0.0; n];
        let mut between: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); n];

        if two_m > 0.0 {
            for e in g.edge_references() {
                let (i, j) = (e.source().index(), e.target().index());
                let share = e.weight() / two_m;
                degree[i] += share;
                degree[j] += share;
                if i != j {
                    *between[i].entry(j).or_default() += share;
                    *between[j].entry(i).or_default() += share;
                }
            }
        }

        let mut merges = 0usize;
        loop {
            let mut best: Option<(f64, usize, usize)> = None;
            for (i, links) in between.iter().enumerate() {
                for (&j, &e_ij) in links.range(i + 1..) {
                    let gain = 2.0 * (e_ij - degree[i] * degree[j]);
                    if best.map_or(true, |(top, _, _)| gain > top) {
                        best = Some((gain, i, j));
                    }
                }
            }

            let Some((gain, i, j)) = best else { break };
            if gain <= 0.0 {
                break;
            }

            let absorbed = std::mem::take(&mut between[j]);
            for (k, e_jk) in absorbed {
                between[k].remove(&j);
                if k == i {
                    continue;
                }
                *between[i].entry(k).or_default() += e_jk;
                *between[k].entry(i).or_default() += e_jk;
            }
            degree[i] += degree[j];
            degree[j] = 0.0;
            let moved = std::mem::take(&mut members[j]);
            members[i].extend(moved);
            merges += 1;
        }

        let mut communities: Vec<Vec<String>> = members
            .into_iter()
            .filter(|c| !c.is_empty())
            .map(|c| {
                c.into_iter()
                    .map(|idx| self.graph.user(NodeIndex::new(idx)).to_string())
                    .collect()
            })
            .collect();
        communities.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let modularity = self.modularity(&communities);
        debug!(merges, communities = communities.len(), modularity, "greedy modularity finished");

        CommunityReport {
            modularity,
            communities,
        }
    }

    /// Modularity of a partition given as lists of logins.
    ///
    /// Users missing from the partition are treated as singletons.
    /// A graph without edges has modularity zero.
    #[must_use]
    pub fn modularity(&self, partition: &[Vec<String>]) -> f64 {
        let g = self.graph.inner();
        let m = self.graph.total_weight();
        if m <= 0.0 {
            return 0.0;
        }

        let mut label: HashMap<NodeIndex, usize> = HashMap::new();
        for (c, community) in partition.iter().enumerate() {
            for user in community {
                if let Some(idx) = self.graph.index_of(user) {
                    label.insert(idx, c);
                }
            }
        }
        let community_of = |idx: NodeIndex| label.get(&idx).copied().ok_or(idx);

        let mut internal: HashMap<Result<usize, NodeIndex>, f64> = HashMap::new();
        let mut degree: HashMap<Result<usize, NodeIndex>, f64> = HashMap::new();
        for e in g.edge_references() {
            let (a, b) = (community_of(e.source()), community_of(e.target()));
            let w = *e.weight();
            *degree.entry(a).or_default() += w;
            *degree.entry(b).or_default() += w;
            if a == b {
                *internal.entry(a).or_default() += w;
            }
        }

        degree
            .iter()
            .map(|(c, d)| {
                let inside = internal.get(c).copied().unwrap_or(0.0);
                inside / m - (d / (2.0 * m)).powi(2)
            })
            .sum()
    }

    /// Local clustering coefficient, ignoring weights and self-loops
    #[must_use]
    pub fn clustering(&self) -> Scores {
        let g = self.graph.inner();
        g.node_indices()
            .map(|v| {
                let neighbors: Vec<NodeIndex> = g
                    .neighbors(v)
                    .filter(|&u| u != v)
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect();
                let k = neighbors.len();
                let value = if k < 2 {
                    0.0
                } else {
                    let triangles = neighbors
                        .iter()
                        .enumerate()
                        .flat_map(|(i, &a)| neighbors[i + 1..].iter().map(move |&b| (a, b)))
                        .filter(|&(a, b)| g.find_edge(a, b).is_some())
                        .count();
                    2.0 * triangles as f64 / (k * (k - 1)) as f64
                };
                (self.graph.user(v).to_string(), value)
            })
            .collect()
    }

    /// Bridging centrality: normalized betweenness times `1 - clustering`
    #[must_use]
    pub fn bridging_centrality(&self) -> Scores {
        let betweenness = CentralityMetrics::new(self.graph).betweenness_centrality(true);
        let clustering = self.clustering();
        betweenness
            .into_iter()
            .map(|(user, b)| {
                let c = clustering.get(&user).copied().unwrap_or(0.0);
                (user, b * (1.0 - c))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles() -> CollaborationGraph {
        let mut graph = CollaborationGraph::new();
        let pairs = [
            ("a", "b"),
            ("b", "c"),
            ("a", "c"),
            ("d", "e"),
            ("e", "f"),
            ("d", "f"),
            ("c", "d"),
        ];
        for (a, b) in pairs {
            graph.add_interaction(a, b, 1.0);
        }
        graph
    }

    #[test]
    fn test_modularity_band_boundaries() {
        assert_eq!(ModularityBand::of(0.40), ModularityBand::Strong);
        assert_eq!(ModularityBand::of(0.399), ModularityBand::Moderate);
        assert_eq!(ModularityBand::of(0.20), ModularityBand::Moderate);
        assert_eq!(ModularityBand::of(0.199), ModularityBand::Weak);
        assert_eq!(ModularityBand::of(-0.1), ModularityBand::Weak);
    }

    #[test]
    fn test_bridge_band_boundaries() {
        assert_eq!(BridgeBand::of(0.0), BridgeBand::None);
        assert_eq!(BridgeBand::of(0.0099), BridgeBand::None);
        assert_eq!(BridgeBand::of(0.01), BridgeBand::Weak);
        assert_eq!(BridgeBand::of(0.0499), BridgeBand::Weak);
        assert_eq!(BridgeBand::of(0.05), BridgeBand::Moderate);
        assert_eq!(BridgeBand::of(0.1499), BridgeBand::Moderate);
        assert_eq!(BridgeBand::of(0.15), BridgeBand::Strong);
        assert_eq!(BridgeBand::of(0.9).to_string(), "strong");
    }

    #[test]
    fn test_detects_two_triangles() {
        let graph = two_triangles();
        let report = CommunityMetrics::new(&graph).detect_communities();

        assert_eq!(report.count(), 2);
        assert_eq!(report.sizes(), vec![3, 3]);
        assert!((report.modularity - 5.0 / 14.0).abs() < 1e-9);

        let mut first = report.communities[0].clone();
        first.sort();
        assert_eq!(first, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_single_community_modularity_is_zero() {
        let graph = two_triangles();
        let everyone: Vec<String> = graph.users().map(String::from).collect();
        let q = CommunityMetrics::new(&graph).modularity(&[everyone]);
        assert!(q.abs() < 1e-12);
    }

    #[test]
    fn test_edgeless_graph() {
        let graph = CollaborationGraph::with_users(["x".to_string(), "y".to_string()]);
        let report = CommunityMetrics::new(&graph).detect_communities();
        assert_eq!(report.count(), 2);
        assert_eq!(report.modularity, 0.0);

        let empty = CollaborationGraph::new();
        assert_eq!(CommunityMetrics::new(&empty).detect_communities().count(), 0);
    }

    #[test]
    fn test_clustering() {
        let graph = two_triangles();
        let clustering = CommunityMetrics::new(&graph).clustering();
        assert!((clustering["a"] - 1.0).abs() < 1e-12);
        assert!((clustering["c"] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_bridging_favors_the_bridge() {
        let graph = two_triangles();
        let bridging = CommunityMetrics::new(&graph).bridging_centrality();
        assert_eq!(bridging["a"], 0.0);
        assert!(bridging["c"] > 0.0);
        assert!((bridging["c"] - bridging["d"]).abs() < 1e-12);
    }
}
