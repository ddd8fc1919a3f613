// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Interaction dataset produced by the GitHub collector
//!
//! The collector writes one JSON document per repository:
//!
//! ```json
//! {
//!   "repository": "owner/name",
//!   "data_collection_date": "2025-05-01T12:30:00.123456",
//!   "users": ["alice", "bob"],
//!   "interactions": {
//!     "comentario_em_issues": [
//!       { "from": "bob", "to": "alice", "weight": 2, "type": "comentario_issue" }
//!     ]
//!   }
//! }
//! ```
//!
//! Interaction kinds are kept as free-form keys so that unknown kinds
//! survive a load; [`InteractionKind`] names the ones the collector emits.

use crate::collaboration::CollaborationGraph;
use crate::error::GraphResult;
use crate::graph::{AdjacencyListGraph, DirectedGraph, Weight};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// Weight of an interaction record that carries none
pub const DEFAULT_INTERACTION_WEIGHT: Weight = 1.0;

// =============================================================================
// Records
// =============================================================================

/// One user-to-user interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Acting user (commenter, reviewer, closer, merger)
    pub from: String,
    /// User acted upon (issue or pull request author)
    pub to: String,
    /// Interaction strength, absent for unweighted kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
    /// Collector's label for the interaction
    #[serde(rename = "type", default)]
    pub label: String,
}

impl Interaction {
    /// Weight with the default applied
    #[must_use]
    pub fn effective_weight(&self) -> Weight {
        self.weight.unwrap_or(DEFAULT_INTERACTION_WEIGHT)
    }
}

/// Interaction kinds emitted by the collector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InteractionKind {
    /// Comment on someone else's issue
    IssueComment,
    /// Closing someone else's issue
    IssueClosure,
    /// Comment on someone else's pull request
    PullRequestComment,
    /// Review of someone else's pull request
    PullRequestReview,
    /// Merge of someone else's pull request
    PullRequestMerge,
}

impl InteractionKind {
    /// Every kind, in collection order
    pub const ALL: [Self; 5] = [
        Self::IssueComment,
        Self::IssueClosure,
        Self::PullRequestComment,
        Self::PullRequestReview,
        Self::PullRequestMerge,
    ];

    /// Key under `interactions` in the dataset document
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::IssueComment => "comentario_em_issues",
            Self::IssueClosure => "fechamento_de_issues",
            Self::PullRequestComment => "comentario_pull_request",
            Self::PullRequestReview => "revisoes_pull_request",
            Self::PullRequestMerge => "merge_pull_request",
        }
    }

    /// Weight the collector assigns to this kind
    #[must_use]
    pub fn collector_weight(&self) -> Weight {
        match self {
            Self::IssueComment | Self::PullRequestComment => 2.0,
            Self::IssueClosure => DEFAULT_INTERACTION_WEIGHT,
            Self::PullRequestReview => 4.0,
            Self::PullRequestMerge => 5.0,
        }
    }
}

// =============================================================================
// Graph views
// =============================================================================

/// Named selection of interaction kinds that forms one graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GraphView {
    /// Issue comments only
    IssueComments,
    /// Issue closures only
    IssueClosures,
    /// Pull request comments, reviews and merges combined
    PullRequests,
    /// Every interaction in the dataset, known kinds or not
    All,
}

impl GraphView {
    /// The views reported side by side in the global report
    pub const REPORTED: [Self; 3] = [Self::IssueComments, Self::IssueClosures, Self::PullRequests];

    /// Short name used on the command line
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::IssueComments => "issue-comments",
            Self::IssueClosures => "issue-closures",
            Self::PullRequests => "pull-requests",
            Self::All => "all",
        }
    }

    /// Human-readable title
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::IssueComments => "Issue comments",
            Self::IssueClosures => "Issue closures",
            Self::PullRequests => "Pull requests",
            Self::All => "All interactions",
        }
    }

    /// Interaction kinds included in this view; `None` means every key
    #[must_use]
    pub fn kinds(&self) -> Option<&'static [InteractionKind]> {
        match self {
            Self::IssueComments => Some(&[InteractionKind::IssueComment]),
            Self::IssueClosures => Some(&[InteractionKind::IssueClosure]),
            Self::PullRequests => Some(&[
                InteractionKind::PullRequestComment,
                InteractionKind::PullRequestReview,
                InteractionKind::PullRequestMerge,
            ]),
            Self::All => None,
        }
    }
}

impl fmt::Display for GraphView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GraphView {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "issue-comments" | "comments" => Ok(Self::IssueComments),
            "issue-closures" | "closures" => Ok(Self::IssueClosures),
            "pull-requests" | "prs" => Ok(Self::PullRequests),
            "all" => Ok(Self::All),
            other => anyhow::bail!(
                "Unknown graph: {}. Valid: issue-comments, issue-closures, pull-requests, all",
                other
            ),
        }
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// The collector's JSON document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// `owner/name` of the sampled repository
    pub repository: String,
    /// ISO-8601 timestamp written by the collector
    pub data_collection_date: String,
    /// Unique user logins, the vertex set of every graph
    #[serde(default)]
    pub users: Vec<String>,
    /// Interaction records keyed by kind
    #[serde(default)]
    pub interactions: BTreeMap<String, Vec<Interaction>>,
}

impl Dataset {
    /// Load a dataset from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let dataset = Self::from_json(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!(
            repository = %dataset.repository,
            users = dataset.users.len(),
            interactions = dataset.interaction_count(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Parse a dataset from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Invalid dataset JSON")
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize dataset")
    }

    /// Collection timestamp.
    ///
    /// Accepts RFC 3339 with an offset as well as the naive form the
    /// collector writes. Returns `None` when the field is unparseable.
    #[must_use]
    pub fn collected_at(&self) -> Option<NaiveDateTime> {
        let raw = self.data_collection_date.trim();
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.naive_local())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()
    }

    /// Total number of interaction records across all kinds
    #[must_use]
    pub fn interaction_count(&self) -> usize {
        self.interactions.values().map(Vec::len).sum()
    }

    /// Records of one kind, empty when the kind is missing
    #[must_use]
    pub fn interactions_of(&self, kind: InteractionKind) -> &[Interaction] {
        self.interactions
            .get(kind.key())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Records selected by a view, in kind order
    pub fn interactions_in(&self, view: GraphView) -> Vec<&Interaction> {
        match view.kinds() {
            Some(kinds) => kinds
                .iter()
                .flat_map(|&kind| self.interactions_of(kind))
                .collect(),
            None => self.interactions.values().flatten().collect(),
        }
    }

    /// Undirected collaboration graph for a view.
    ///
    /// Every user becomes a node. Repeated interactions between the same
    /// pair, in either direction, add up on a single edge.
    #[must_use]
    pub fn collaboration_graph(&self, view: GraphView) -> CollaborationGraph {
        let mut graph = CollaborationGraph::with_users(self.users.iter().cloned());
        for interaction in self.interactions_in(view) {
            for user in [&interaction.from, &interaction.to] {
                if !graph.contains_user(user) {
                    warn!(
                        %user,
                        graph = %view,
                        "interaction names a user missing from the user list"
                    );
                }
            }
            graph.add_interaction(
                &interaction.from,
                &interaction.to,
                interaction.effective_weight(),
            );
        }
        debug!(
            graph = %view,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built collaboration graph"
        );
        graph
    }

    /// Directed interaction graph for a view.
    ///
    /// Each ordered pair `from -> to` becomes one arc whose weight is the
    /// sum of the interaction weights along that direction.
    pub fn directed_graph(&self, view: GraphView) -> GraphResult<AdjacencyListGraph<String>> {
        let mut graph = AdjacencyListGraph::with_vertices(self.users.iter().cloned());
        for interaction in self.interactions_in(view) {
            for user in [&interaction.from, &interaction.to] {
                if !graph.contains_vertex(user) {
                    warn!(
                        %user,
                        graph = %view,
                        "interaction names a user missing from the user list"
                    );
                    graph.add_vertex(user.clone())?;
                }
            }

            let (from, to) = (&interaction.from, &interaction.to);
            let weight = interaction.effective_weight();
            if graph.has_edge(from, to) {
                let total = graph.edge_weight(from, to)?.unwrap_or(0.0) + weight;
                graph.set_edge_weight(from, to, total)?;
            } else {
                graph.add_edge(from, to)?;
                graph.set_edge_weight(from, to, weight)?;
            }
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "repository": "owner/project",
        "data_collection_date": "2025-05-01T12:30:00.123456",
        "users": ["alice", "bob", "carol"],
        "interactions": {
            "comentario_em_issues": [
                { "weight": 2, "from": "bob", "to": "alice", "type": "comentario_issue" },
                { "weight": 2, "from": "alice", "to": "bob", "type": "comentario_issue" }
            ],
            "fechamento_de_issues": [
                { "from": "carol", "to": "alice", "type": "fechamento_de_issue" }
            ],
            "revisoes_pull_request": [
                { "weight": 4, "from": "carol", "to": "bob", "type": "revisao de pull request" }
            ],
            "stars": [
                { "from": "dave", "to": "alice", "type": "star" }
            ]
        }
    }"#;

    fn sample() -> Dataset {
        Dataset::from_json(SAMPLE).unwrap()
    }

    #[test]
    fn test_parse_sample() {
        let dataset = sample();
        assert_eq!(dataset.repository, "owner/project");
        assert_eq!(dataset.users.len(), 3);
        assert_eq!(dataset.interaction_count(), 5);
        assert_eq!(dataset.interactions_of(InteractionKind::IssueClosure)[0].weight, None);
        assert!(dataset.interactions_of(InteractionKind::PullRequestMerge).is_empty());
    }

    #[test]
    fn test_json_keeps_unknown_kinds() {
        let reparsed = Dataset::from_json(&sample().to_json().unwrap()).unwrap();
        assert_eq!(reparsed.interaction_count(), 5);
        assert_eq!(reparsed.interactions["stars"][0].from, "dave");
        assert!(Dataset::from_json("{\"users\": []}").is_err());
    }

    #[test]
    fn test_collected_at_formats() {
        let mut dataset = sample();
        let naive = dataset.collected_at().unwrap();
        assert_eq!(naive.format("%Y-%m-%d %H:%M").to_string(), "2025-05-01 12:30");

        dataset.data_collection_date = "2025-05-01T12:30:00+02:00".into();
        assert!(dataset.collected_at().is_some());

        dataset.data_collection_date = "yesterday".into();
        assert!(dataset.collected_at().is_none());
    }

    #[test]
    fn test_views_select_kinds() {
        let dataset = sample();
        assert_eq!(dataset.interactions_in(GraphView::IssueComments).len(), 2);
        assert_eq!(dataset.interactions_in(GraphView::PullRequests).len(), 1);
        assert_eq!(dataset.interactions_in(GraphView::All).len(), 5);
    }

    #[test]
    fn test_view_names_round_trip() {
        for view in [
            GraphView::IssueComments,
            GraphView::IssueClosures,
            GraphView::PullRequests,
            GraphView::All,
        ] {
            assert_eq!(view.name().parse::<GraphView>().unwrap(), view);
        }
        assert!("stars".parse::<GraphView>().is_err());
    }

    #[test]
    fn test_collaboration_graph_sums_both_directions() {
        let graph = sample().collaboration_graph(GraphView::IssueComments);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_weight("alice", "bob"), Some(4.0));
    }

    #[test]
    fn test_unknown_users_are_added() {
        let graph = sample().collaboration_graph(GraphView::All);
        assert!(graph.contains_user("dave"));
        assert_eq!(graph.edge_weight("dave", "alice"), Some(1.0));
    }

    #[test]
    fn test_directed_graph_aggregates_per_direction() {
        let mut dataset = sample();
        dataset
            .interactions
            .get_mut("comentario_em_issues")
            .unwrap()
            .push(Interaction {
                from: "bob".into(),
                to: "alice".into(),
                weight: Some(2.0),
                label: "comentario_issue".into(),
            });

        let graph = dataset.directed_graph(GraphView::IssueComments).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge_weight(&"bob".into(), &"alice".into()).unwrap(), Some(4.0));
        assert_eq!(graph.edge_weight(&"alice".into(), &"bob".into()).unwrap(), Some(2.0));
    }
}
