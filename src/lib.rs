// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Collabgraph library - collaboration graphs from GitHub interaction data
//!
//! This crate provides a directed graph data type with adjacency-list and
//! adjacency-matrix backings, a loader for the collector's interaction
//! dataset, and centrality and community metrics over the resulting
//! collaboration graphs.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod collaboration;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod metrics;

/// Prelude for common imports
pub mod prelude {
    pub use crate::collaboration::{CollaborationGraph, WeightedEdge};
    pub use crate::config::Config;
    pub use crate::dataset::{Dataset, GraphView, Interaction, InteractionKind};
    pub use crate::error::{GraphError, GraphResult};
    pub use crate::graph::{AdjacencyListGraph, AdjacencyMatrixGraph, DirectedGraph, Weight};
    pub use crate::metrics::{
        top_k, CentralityMetrics, CentralityReport, CommunityMetrics, CommunityReport, GraphSummary,
        Metric, PageRankConfig, Scores,
    };
}
