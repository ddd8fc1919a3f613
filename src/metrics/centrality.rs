// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Degree, betweenness, closeness and PageRank centrality

use super::{Metric, Scores};
use crate::collaboration::CollaborationGraph;
use crate::graph::Weight;
use petgraph::algo::dijkstra;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};
use tracing::debug;

/// Power iteration parameters for PageRank
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    /// Damping factor
    pub alpha: f64,
    /// Iteration cap
    pub max_iter: usize,
    /// L1 convergence threshold between consecutive rank vectors
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            alpha: 0.85,
            max_iter: 100,
            tolerance: 1.0e-6,
        }
    }
}

/// All four centralities for one graph
#[derive(Debug, Clone, Default, Serialize)]
pub struct CentralityReport {
    /// Normalized weighted degree
    pub degree: Scores,
    /// Normalized betweenness
    pub betweenness: Scores,
    /// Closeness
    pub closeness: Scores,
    /// PageRank
    pub pagerank: Scores,
}

impl CentralityReport {
    /// Scores of one metric
    #[must_use]
    pub fn get(&self, metric: Metric) -> &Scores {
        match metric {
            Metric::Degree => &self.degree,
            Metric::Betweenness => &self.betweenness,
            Metric::Closeness => &self.closeness,
            Metric::PageRank => &self.pagerank,
        }
    }
}

/// Centrality calculator bound to one graph
pub struct CentralityMetrics<'g> {
    graph: &'g CollaborationGraph,
}

impl<'g> CentralityMetrics<'g> {
    /// Create a calculator for `graph`
    #[must_use]
    pub fn new(graph: &'g CollaborationGraph) -> Self {
        Self { graph }
    }

    fn scores(&self, values: impl IntoIterator<Item = (NodeIndex, f64)>) -> Scores {
        values
            .into_iter()
            .map(|(idx, value)| (self.graph.user(idx).to_string(), value))
            .collect()
    }

    /// Sum of incident edge weights; a self-loop counts twice
    fn strength(&self, node: NodeIndex) -> Weight {
        self.graph
            .inner()
            .edges(node)
            .map(|e| {
                if e.source() == e.target() {
                    2.0 * e.weight()
                } else {
                    *e.weight()
                }
            })
            .sum()
    }

    /// Weighted degree, divided by `n - 1` when `normalized`.
    ///
    /// Every score is zero when the graph has at most one user.
    #[must_use]
    pub fn degree_centrality(&self, normalized: bool) -> Scores {
        let g = self.graph.inner();
        let n = g.node_count();
        self.scores(g.node_indices().map(|idx| {
            let value = match (normalized, n) {
                (true, 0 | 1) => 0.0,
                (true, _) => self.strength(idx) / (n - 1) as f64,
                (false, _) => self.strength(idx),
            };
            (idx, value)
        }))
    }

    /// Brandes betweenness with edge weights as distances.
    ///
    /// Normalized scores are divided by `(n - 1)(n - 2)` when `n > 2`;
    /// raw scores are halved since each unordered pair is visited twice.
    #[must_use]
    pub fn betweenness_centrality(&self, normalized: bool) -> Scores {
        let g = self.graph.inner();
        let n = g.node_count();
        let mut betweenness = vec![0.0; n];

        for source in g.node_indices() {
            let paths = ShortestPaths::compute(self.graph, source);
            let mut delta = vec![0.0; n];
            for &w in paths.order.iter().rev() {
                for &v in &paths.preds[w] {
                    delta[v] += paths.sigma[v] / paths.sigma[w] * (1.0 + delta[w]);
                }
                if w != source.index() {
                    betweenness[w] += delta[w];
                }
            }
        }

        let scale = match (normalized, n) {
            (true, 0..=2) => 1.0,
            (true, _) => 1.0 / ((n - 1) * (n - 2)) as f64,
            (false, _) => 0.5,
        };
        self.scores(
            g.node_indices()
                .map(|idx| (idx, betweenness[idx.index()] * scale)),
        )
    }

    /// Closeness: `(r - 1) / total distance` scaled by `(r - 1) / (n - 1)`,
    /// where `r` counts the users reachable from (and including) each user.
    ///
    /// With `use_weights` the edge weight is the distance, otherwise each
    /// edge has length one. Isolated users score zero.
    #[must_use]
    pub fn closeness_centrality(&self, use_weights: bool) -> Scores {
        let g = self.graph.inner();
        let n = g.node_count();
        self.scores(g.node_indices().map(|idx| {
            let distances = if use_weights {
                dijkstra(g, idx, None, |e| *e.weight())
            } else {
                dijkstra(g, idx, None, |_| 1.0)
            };
            let total: f64 = distances.values().sum();
            let reachable = distances.len();
            let value = if total > 0.0 && n > 1 {
                let r = (reachable - 1) as f64;
                (r / total) * (r / (n - 1) as f64)
            } else {
                0.0
            };
            (idx, value)
        }))
    }

    /// Weighted PageRank by power iteration.
    ///
    /// Rank flows from each user to its neighbors in proportion to edge
    /// weight; users without edges spread their rank uniformly. Stops when
    /// the L1 change drops below the tolerance or after `max_iter` rounds.
    #[must_use]
    pub fn pagerank(&self, config: &PageRankConfig) -> Scores {
        let g = self.graph.inner();
        let n = g.node_count();
        if n == 0 {
            return Scores::new();
        }

        let uniform = 1.0 / n as f64;
        let strength: Vec<Weight> = g.node_indices().map(|idx| self.strength(idx)).collect();
        let mut rank = vec![uniform; n];

        for iteration in 0..config.max_iter {
            let dangling: f64 = (0..n)
                .filter(|&v| strength[v] == 0.0)
                .map(|v| rank[v])
                .sum();
            let base = (1.0 - config.alpha) * uniform + config.alpha * dangling * uniform;
            let mut next = vec![base; n];

            for u in g.node_indices() {
                let out = strength[u.index()];
                if out == 0.0 {
                    continue;
                }
                for e in g.edges(u) {
                    let (v, share) = match (e.source(), e.target()) {
                        (a, b) if a == b => (a, 2.0 * e.weight()),
                        (a, b) if a == u => (b, *e.weight()),
                        (a, _) => (a, *e.weight()),
                    };
                    next[v.index()] += config.alpha * rank[u.index()] * (share / out);
                }
            }

            let diff: f64 = rank.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
            rank = next;
            if diff < config.tolerance {
                debug!(iterations = iteration + 1, "pagerank converged");
                break;
            }
        }

        self.scores(g.node_indices().map(|idx| (idx, rank[idx.index()])))
    }

    /// Every metric with the default normalization
    #[must_use]
    pub fn compute_all(
        &self,
        pagerank: &PageRankConfig,
        closeness_weighted: bool,
    ) -> CentralityReport {
        CentralityReport {
            degree: self.degree_centrality(true),
            betweenness: self.betweenness_centrality(true),
            closeness: self.closeness_centrality(closeness_weighted),
            pagerank: self.pagerank(pagerank),
        }
    }
}

// =============================================================================
// Single-source shortest paths for Brandes accumulation
// =============================================================================

/// Heap entry ordered so that `BinaryHeap` pops the smallest distance
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frontier {
    dist: f64,
    node: usize,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Settled order, path counts and shortest-path predecessors from one source
struct ShortestPaths {
    order: Vec<usize>,
    sigma: Vec<f64>,
    preds: Vec<Vec<usize>>,
}

impl ShortestPaths {
    const EPSILON: f64 = 1e-12;

    fn compute(graph: &CollaborationGraph, source: NodeIndex) -> Self {
        let g = graph.inner();
        let n = g.node_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut settled = vec![false; n];
        let mut sigma = vec![0.0; n];
        let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut order = Vec::with_capacity(n);
        let mut heap = BinaryHeap::new();

        let s = source.index();
        dist[s] = 0.0;
        sigma[s] = 1.0;
        heap.push(Frontier { dist: 0.0, node: s });

        while let Some(Frontier { dist: d, node: v }) = heap.pop() {
            if settled[v] || d > dist[v] {
                continue;
            }
            settled[v] = true;
            order.push(v);

            for e in g.edges(NodeIndex::new(v)) {
                let w = (if e.source().index() == v { e.target() } else { e.source() }).index();
                if settled[w] {
                    continue;
                }
                let candidate = d + e.weight();
                if candidate < dist[w] - Self::EPSILON {
                    dist[w] = candidate;
                    sigma[w] = sigma[v];
                    preds[w] = vec![v];
                    heap.push(Frontier { dist: candidate, node: w });
                } else if (candidate - dist[w]).abs() <= Self::EPSILON {
                    sigma[w] += sigma[v];
                    preds[w].push(v);
                }
            }
        }

        Self { order, sigma, preds }
    }
}

/// Convenience wrapper mapping metric name to scores
#[must_use]
pub fn by_metric(report: &CentralityReport) -> BTreeMap<Metric, &Scores> {
    Metric::ALL.into_iter().map(|m| (m, report.get(m))).collect()
}
