// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
#![no_main]

use arbitrary::Arbitrary;
use collabgraph::graph::{AdjacencyListGraph, AdjacencyMatrixGraph, DirectedGraph};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    AddVertex(u8),
    AddEdge(u8, u8),
    RemoveEdge(u8, u8),
    SetEdgeWeight(u8, u8, i16),
}

fuzz_target!(|ops: Vec<Op>| {
    let mut list = AdjacencyListGraph::<u8>::new();
    let mut matrix = AdjacencyMatrixGraph::new(16);

    for op in ops {
        match op {
            Op::AddVertex(v) => {
                let _ = list.add_vertex(v);
                let _ = matrix.add_vertex(usize::from(v));
            }
            Op::AddEdge(u, v) => {
                let _ = list.add_edge(&u, &v);
                let _ = matrix.add_edge(&usize::from(u), &usize::from(v));
            }
            Op::RemoveEdge(u, v) => {
                list.remove_edge(&u, &v);
                matrix.remove_edge(&usize::from(u), &usize::from(v));
            }
            Op::SetEdgeWeight(u, v, w) => {
                let _ = list.set_edge_weight(&u, &v, f64::from(w));
                let _ = matrix.set_edge_weight(&usize::from(u), &usize::from(v), f64::from(w));
            }
        }
    }

    let out: usize = list.vertices().map(|v| list.out_degree(&v).unwrap()).sum();
    let inc: usize = list.vertices().map(|v| list.in_degree(&v).unwrap()).sum();
    assert_eq!(out, list.edge_count());
    assert_eq!(inc, list.edge_count());
    assert_eq!(list.edges().len(), list.edge_count());

    let out: usize = matrix.vertices().map(|v| matrix.out_degree(&v).unwrap()).sum();
    assert_eq!(out, matrix.edge_count());

    let components: usize = list.weak_components().iter().map(Vec::len).sum();
    assert_eq!(components, list.vertex_count());
    let _ = matrix.is_connected();
});
