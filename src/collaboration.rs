// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Undirected weighted collaboration graph with petgraph backing

use crate::graph::Weight;
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::HashMap;

/// Users as nodes, summed interaction strength as edge weights
#[derive(Debug, Clone, Default)]
pub struct CollaborationGraph {
    /// The underlying undirected graph
    graph: UnGraph<String, Weight>,
    /// Map from user login to node index
    node_indices: HashMap<String, NodeIndex>,
}

/// Flat edge record for JSON output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedEdge {
    /// One endpoint
    pub source: String,
    /// The other endpoint
    pub target: String,
    /// Summed weight
    pub weight: Weight,
}

impl CollaborationGraph {
    /// Create a new empty collaboration graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with the given users and no edges
    pub fn with_users(users: impl IntoIterator<Item = String>) -> Self {
        let mut graph = Self::new();
        for user in users {
            graph.add_user(&user);
        }
        graph
    }

    /// Add a user, returning its node index. Existing users are left as is.
    pub fn add_user(&mut self, user: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(user) {
            return idx;
        }
        let idx = self.graph.add_node(user.to_string());
        self.node_indices.insert(user.to_string(), idx);
        idx
    }

    /// Record an interaction between two users.
    ///
    /// Adds `weight` to the existing edge between them, or creates the
    /// edge with that weight. Unknown users are added first.
    pub fn add_interaction(&mut self, from: &str, to: &str, weight: Weight) {
        let a = self.add_user(from);
        let b = self.add_user(to);
        match self.graph.find_edge(a, b) {
            Some(edge) => self.graph[edge] += weight,
            None => {
                self.graph.add_edge(a, b, weight);
            }
        }
    }

    /// Returns true when the user is a node of the graph
    #[must_use]
    pub fn contains_user(&self, user: &str) -> bool {
        self.node_indices.contains_key(user)
    }

    /// Node index of a user
    #[must_use]
    pub fn index_of(&self, user: &str) -> Option<NodeIndex> {
        self.node_indices.get(user).copied()
    }

    /// Login of the user at a node index
    #[must_use]
    pub fn user(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    /// Summed weight between two users, if they interacted
    #[must_use]
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<Weight> {
        let edge = self.graph.find_edge(self.index_of(a)?, self.index_of(b)?)?;
        Some(self.graph[edge])
    }

    /// Get node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get edge count
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if the graph has no users
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Users in insertion order
    pub fn users(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_weights().map(String::as_str)
    }

    /// All edges with their summed weights
    #[must_use]
    pub fn weighted_edges(&self) -> Vec<WeightedEdge> {
        self.graph
            .edge_references()
            .map(|e| WeightedEdge {
                source: self.graph[e.source()].clone(),
                target: self.graph[e.target()].clone(),
                weight: *e.weight(),
            })
            .collect()
    }

    /// Sum of all edge weights
    #[must_use]
    pub fn total_weight(&self) -> Weight {
        self.graph.edge_weights().sum()
    }

    /// Edge density `2m / (n (n - 1))`, zero below two nodes
    #[must_use]
    pub fn density(&self) -> f64 {
        let n = self.node_count() as f64;
        if n < 2.0 {
            return 0.0;
        }
        2.0 * self.edge_count() as f64 / (n * (n - 1.0))
    }

    /// Mean unweighted degree `2m / n`, zero for an empty graph.
    ///
    /// A self-loop adds two to its user's degree.
    #[must_use]
    pub fn average_degree(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        2.0 * self.edge_count() as f64 / self.node_count() as f64
    }

    /// Number of connected components
    #[must_use]
    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }

    /// Returns true when every user can reach every other.
    ///
    /// The empty graph counts as connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.component_count() <= 1
    }

    /// Borrow the petgraph graph for algorithms
    #[must_use]
    pub fn inner(&self) -> &UnGraph<String, Weight> {
        &self.graph
    }
}
