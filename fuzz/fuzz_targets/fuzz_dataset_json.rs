// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
#![no_main]

use collabgraph::dataset::{Dataset, GraphView};
use collabgraph::graph::DirectedGraph;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(dataset) = Dataset::from_json(text) else {
        return;
    };

    let _ = dataset.collected_at();
    let graph = dataset.collaboration_graph(GraphView::All);
    let distinct: std::collections::HashSet<_> = dataset.users.iter().collect();
    assert!(graph.node_count() >= distinct.len());

    let directed = dataset.directed_graph(GraphView::All).unwrap();
    let _ = directed.weak_components();
});
