// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Inspect command - structural overview of one interaction graph

use super::{yes_no, Output};
use crate::dataset::{Dataset, GraphView, InteractionKind};
use crate::graph::DirectedGraph;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// Record count of one interaction kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindCount {
    /// Dataset key
    pub kind: String,
    /// Number of records
    pub records: usize,
    /// Weight the collector assigns to this kind
    pub collector_weight: f64,
}

/// Structure of the directed and undirected views of a graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    /// Sampled repository
    pub repository: String,
    /// Collection timestamp, when parseable
    pub collected_at: Option<String>,
    /// View name
    pub graph: String,
    /// Known kinds selected by the view
    pub kinds: Vec<KindCount>,
    /// Vertex count
    pub users: usize,
    /// Distinct `from -> to` arcs
    pub arcs: usize,
    /// Sum of arc weights
    pub total_weight: f64,
    /// No users at all
    pub is_empty: bool,
    /// Every ordered pair of distinct users is joined
    pub is_complete: bool,
    /// One weak component
    pub weakly_connected: bool,
    /// Number of weak components
    pub weak_components: usize,
    /// Size of the largest weak component
    pub largest_component: usize,
    /// Undirected edges after merging directions
    pub collaboration_edges: usize,
    /// Undirected edge density
    pub density: f64,
}

/// Build the inspection report for a view
pub fn build(dataset: &Dataset, view: GraphView) -> Result<InspectReport> {
    let directed = dataset
        .directed_graph(view)
        .with_context(|| format!("Failed to build the {view} graph"))?;
    let collaboration = dataset.collaboration_graph(view);

    let kinds = InteractionKind::ALL
        .into_iter()
        .filter(|kind| view.kinds().map_or(true, |selected| selected.contains(kind)))
        .map(|kind| KindCount {
            kind: kind.key().to_string(),
            records: dataset.interactions_of(kind).len(),
            collector_weight: kind.collector_weight(),
        })
        .collect();

    let mut total_weight = 0.0;
    for (from, to) in directed.edges() {
        total_weight += directed.edge_weight(&from, &to)?.unwrap_or(0.0);
    }

    let components = directed.weak_components();

    Ok(InspectReport {
        repository: dataset.repository.clone(),
        collected_at: dataset
            .collected_at()
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string()),
        graph: view.name().to_string(),
        kinds,
        users: directed.vertex_count(),
        arcs: directed.edge_count(),
        total_weight,
        is_empty: directed.is_empty(),
        is_complete: directed.is_complete(),
        weakly_connected: directed.is_connected(),
        weak_components: components.len(),
        largest_component: components.iter().map(Vec::len).max().unwrap_or(0),
        collaboration_edges: collaboration.edge_count(),
        density: collaboration.density(),
    })
}

/// Run the inspect command
pub fn run(dataset: &Dataset, view: GraphView, out: Output) -> Result<()> {
    info!("Inspecting {} graph", view);
    let report = build(dataset, view)?;

    if out.json {
        return out.json(&report);
    }

    out.heading(&format!("{} - {}", report.repository, view.title()));
    if let Some(ts) = &report.collected_at {
        out.field("collected", ts);
    }
    for kind in &report.kinds {
        out.field(
            &kind.kind,
            format!("{} records (weight {})", kind.records, kind.collector_weight),
        );
    }
    println!();
    out.heading("Directed graph");
    out.field("users", report.users);
    out.field("arcs", report.arcs);
    out.field("total weight", report.total_weight);
    out.field("empty", yes_no(report.is_empty));
    out.field("complete", yes_no(report.is_complete));
    out.field("weakly connected", yes_no(report.weakly_connected));
    out.field("weak components", report.weak_components);
    out.field("largest component", report.largest_component);
    println!();
    out.heading("Collaboration graph");
    out.field("edges", report.collaboration_edges);
    out.field("density", format!("{:.4}", report.density));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Interaction;

    fn interaction(from: &str, to: &str, weight: Option<f64>) -> Interaction {
        Interaction {
            from: from.into(),
            to: to.into(),
            weight,
            label: String::new(),
        }
    }

    fn dataset() -> Dataset {
        let mut dataset = Dataset {
            repository: "owner/project".into(),
            data_collection_date: "2025-05-01T12:30:00".into(),
            users: vec!["alice".into(), "bob".into(), "carol".into()],
            ..Default::default()
        };
        dataset.interactions.insert(
            InteractionKind::IssueComment.key().into(),
            vec![
                interaction("bob", "alice", Some(2.0)),
                interaction("bob", "alice", Some(2.0)),
                interaction("alice", "bob", Some(2.0)),
            ],
        );
        dataset.interactions.insert(
            InteractionKind::IssueClosure.key().into(),
            vec![interaction("carol", "carol", None)],
        );
        dataset
    }

    #[test]
    fn test_issue_comment_structure() {
        let report = build(&dataset(), GraphView::IssueComments).unwrap();

        assert_eq!(report.users, 3);
        assert_eq!(report.arcs, 2);
        assert_eq!(report.total_weight, 6.0);
        assert!(!report.weakly_connected);
        assert_eq!(report.weak_components, 2);
        assert_eq!(report.largest_component, 2);
        assert_eq!(report.kinds.len(), 1);
        assert_eq!(report.kinds[0].records, 3);
        assert_eq!(report.collected_at.as_deref(), Some("2025-05-01 12:30:00"));
    }

    #[test]
    fn test_all_view_lists_every_known_kind() {
        let report = build(&dataset(), GraphView::All).unwrap();

        assert_eq!(report.kinds.len(), InteractionKind::ALL.len());
        assert_eq!(report.arcs, 3);
        assert_eq!(report.total_weight, 7.0);
    }
}
