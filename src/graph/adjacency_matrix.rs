// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Dense adjacency-matrix backed directed graph
//!
//! Vertices are the integers `0..n`, all registered at construction.
//! Cells are stored row-major: cell `(u, v)` lives at `u * n + v`.
//! Presence and weight are kept in separate matrices so that an edge of
//! weight `0.0` is distinguishable from no edge at all.

use super::{DirectedGraph, Weight};
use crate::error::{GraphError, GraphResult};
use tracing::debug;

/// Directed graph over `0..n` with O(1) edge lookup and O(n²) memory.
///
/// A cell holds at most one edge: adding `(u, v)` twice leaves a single
/// edge behind, unlike [`AdjacencyListGraph`](super::AdjacencyListGraph).
#[derive(Debug, Clone, Default)]
pub struct AdjacencyMatrixGraph {
    order: usize,
    present: Vec<bool>,
    edge_weights: Vec<Option<Weight>>,
    vertex_weights: Vec<Option<Weight>>,
    edge_count: usize,
}

impl AdjacencyMatrixGraph {
    /// Create a graph with vertices `0..num_vertices` and no edges
    ///
    /// # Panics
    ///
    /// Panics when `num_vertices²` overflows `usize`. Use
    /// [`try_new`](Self::try_new) to handle that case.
    #[must_use]
    pub fn new(num_vertices: usize) -> Self {
        match Self::try_new(num_vertices) {
            Ok(graph) => graph,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create a graph with vertices `0..num_vertices`, failing with
    /// [`GraphError::TooManyVertices`] when the cell count overflows
    pub fn try_new(num_vertices: usize) -> GraphResult<Self> {
        let cells = num_vertices
            .checked_mul(num_vertices)
            .ok_or(GraphError::TooManyVertices(num_vertices))?;
        Ok(Self {
            order: num_vertices,
            present: vec![false; cells],
            edge_weights: vec![None; cells],
            vertex_weights: vec![None; num_vertices],
            edge_count: 0,
        })
    }

    fn cell(&self, from: usize, to: usize) -> Option<usize> {
        (from < self.order && to < self.order).then(|| from * self.order + to)
    }

    fn row(&self, vertex: usize) -> &[bool] {
        &self.present[vertex * self.order..(vertex + 1) * self.order]
    }

    fn require_vertex(&self, vertex: usize) -> GraphResult<()> {
        if vertex < self.order {
            Ok(())
        } else {
            Err(GraphError::vertex_not_found(&vertex))
        }
    }
}

/// Heads of the edges in one matrix row
#[derive(Debug, Clone)]
pub struct RowNeighbors<'a> {
    row: std::iter::Enumerate<std::slice::Iter<'a, bool>>,
}

impl Iterator for RowNeighbors<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.row
            .by_ref()
            .find_map(|(to, &present)| present.then_some(to))
    }
}

impl DirectedGraph for AdjacencyMatrixGraph {
    type Vertex = usize;
    type Vertices<'a> = std::ops::Range<usize>;
    type Neighbors<'a> = RowNeighbors<'a>;

    fn vertex_count(&self) -> usize {
        self.order
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn vertices(&self) -> Self::Vertices<'_> {
        0..self.order
    }

    fn contains_vertex(&self, vertex: &usize) -> bool {
        *vertex < self.order
    }

    fn add_vertex(&mut self, vertex: usize) -> GraphResult<bool> {
        if vertex >= self.order {
            return Err(GraphError::invalid_vertex(&vertex));
        }
        let start = vertex * self.order;
        let end = start + self.order;
        let dropped = self.present[start..end].iter().filter(|&&p| p).count();
        debug!(vertex, dropped_edges = dropped, "resetting matrix row");

        self.present[start..end].fill(false);
        self.edge_weights[start..end].fill(None);
        self.vertex_weights[vertex] = None;
        self.edge_count -= dropped;
        Ok(false)
    }

    fn add_edge(&mut self, from: &usize, to: &usize) -> GraphResult<()> {
        if *from >= self.order {
            return Err(GraphError::invalid_vertex(from));
        }
        let cell = self
            .cell(*from, *to)
            .ok_or_else(|| GraphError::invalid_vertex(to))?;
        if !self.present[cell] {
            self.present[cell] = true;
            self.edge_count += 1;
        }
        Ok(())
    }

    fn remove_edge(&mut self, from: &usize, to: &usize) -> bool {
        match self.cell(*from, *to) {
            Some(cell) if self.present[cell] => {
                self.present[cell] = false;
                self.edge_weights[cell] = None;
                self.edge_count -= 1;
                true
            }
            _ => false,
        }
    }

    fn neighbors(&self, vertex: &usize) -> GraphResult<Self::Neighbors<'_>> {
        self.require_vertex(*vertex)?;
        Ok(RowNeighbors {
            row: self.row(*vertex).iter().enumerate(),
        })
    }

    fn has_edge(&self, from: &usize, to: &usize) -> bool {
        self.cell(*from, *to).is_some_and(|cell| self.present[cell])
    }

    fn in_degree(&self, vertex: &usize) -> GraphResult<usize> {
        self.require_vertex(*vertex)?;
        Ok((0..self.order)
            .filter(|&from| self.present[from * self.order + vertex])
            .count())
    }

    fn out_degree(&self, vertex: &usize) -> GraphResult<usize> {
        self.require_vertex(*vertex)?;
        Ok(self.row(*vertex).iter().filter(|&&p| p).count())
    }

    fn set_vertex_weight(&mut self, vertex: &usize, weight: Weight) -> GraphResult<()> {
        self.require_vertex(*vertex)?;
        self.vertex_weights[*vertex] = Some(weight);
        Ok(())
    }

    fn vertex_weight(&self, vertex: &usize) -> GraphResult<Option<Weight>> {
        self.require_vertex(*vertex)?;
        Ok(self.vertex_weights[*vertex])
    }

    fn set_edge_weight(&mut self, from: &usize, to: &usize, weight: Weight) -> GraphResult<()> {
        match self.cell(*from, *to) {
            Some(cell) if self.present[cell] => {
                self.edge_weights[cell] = Some(weight);
                Ok(())
            }
            _ => Err(GraphError::edge_not_found(from, to)),
        }
    }

    fn edge_weight(&self, from: &usize, to: &usize) -> GraphResult<Option<Weight>> {
        match self.cell(*from, *to) {
            Some(cell) if self.present[cell] => Ok(self.edge_weights[cell]),
            _ => Err(GraphError::edge_not_found(from, to)),
        }
    }

    fn is_complete(&self) -> bool {
        let loops = (0..self.order)
            .filter(|&v| self.present[v * self.order + v])
            .count();
        self.order <= 1 || self.edge_count - loops == self.order * (self.order - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_count_overflow_is_an_error() {
        let side = 1usize << (usize::BITS / 2);
        assert_eq!(
            AdjacencyMatrixGraph::try_new(side).unwrap_err(),
            GraphError::TooManyVertices(side)
        );
        assert_eq!(AdjacencyMatrixGraph::try_new(4).unwrap().vertex_count(), 4);
    }

    #[test]
    #[should_panic(expected = "exceeds the addressable cell count")]
    fn test_new_panics_on_overflow() {
        let _ = AdjacencyMatrixGraph::new(1usize << (usize::BITS / 2));
    }

    #[test]
    fn test_empty_matrix() {
        let graph = AdjacencyMatrixGraph::new(0);
        assert!(graph.is_empty());
        assert!(graph.is_connected());
        assert!(graph.is_complete());
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.has_edge(&0, &0));
    }

    #[test]
    fn test_repeated_add_is_single_edge() {
        let mut graph = AdjacencyMatrixGraph::new(3);
        graph.add_edge(&0, &1).unwrap();
        graph.add_edge(&0, &1).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.out_degree(&0).unwrap(), 1);
        assert!(graph.remove_edge(&0, &1));
        assert!(!graph.has_edge(&0, &1));
        assert!(!graph.remove_edge(&0, &1));
    }

    #[test]
    fn test_degrees_from_rows_and_columns() {
        let mut graph = AdjacencyMatrixGraph::new(4);
        graph.add_edge(&0, &2).unwrap();
        graph.add_edge(&1, &2).unwrap();
        graph.add_edge(&2, &3).unwrap();

        assert_eq!(graph.in_degree(&2).unwrap(), 2);
        assert_eq!(graph.out_degree(&2).unwrap(), 1);
        assert_eq!(graph.neighbors(&0).unwrap().collect::<Vec<_>>(), vec![2]);
        assert!(matches!(graph.in_degree(&4), Err(GraphError::VertexNotFound(_))));
    }

    #[test]
    fn test_out_of_range_endpoints() {
        let mut graph = AdjacencyMatrixGraph::new(2);
        assert!(matches!(graph.add_edge(&0, &2), Err(GraphError::InvalidVertex(_))));
        assert!(matches!(graph.add_edge(&5, &0), Err(GraphError::InvalidVertex(_))));
        assert!(matches!(graph.add_vertex(2), Err(GraphError::InvalidVertex(_))));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_zero_weight_is_not_absence() {
        let mut graph = AdjacencyMatrixGraph::new(2);
        graph.add_edge(&0, &1).unwrap();
        assert_eq!(graph.edge_weight(&0, &1).unwrap(), None);
        graph.set_edge_weight(&0, &1, 0.0).unwrap();
        assert_eq!(graph.edge_weight(&0, &1).unwrap(), Some(0.0));
        assert!(matches!(
            graph.edge_weight(&1, &0),
            Err(GraphError::EdgeNotFound { .. })
        ));
    }

    #[test]
    fn test_add_vertex_resets_row() {
        let mut graph = AdjacencyMatrixGraph::new(3);
        graph.add_edge(&1, &0).unwrap();
        graph.add_edge(&1, &2).unwrap();
        graph.add_edge(&0, &1).unwrap();
        graph.set_vertex_weight(&1, 4.0).unwrap();

        assert!(!graph.add_vertex(1).unwrap());
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.vertex_weight(&1).unwrap(), None);
        assert!(graph.has_edge(&0, &1));
    }

    #[test]
    fn test_complete_ignores_loops() {
        let mut graph = AdjacencyMatrixGraph::new(3);
        for u in 0..3 {
            for v in 0..3 {
                if u != v {
                    graph.add_edge(&u, &v).unwrap();
                }
            }
        }
        assert!(graph.is_complete());
        graph.add_edge(&1, &1).unwrap();
        assert!(graph.is_complete());
        graph.remove_edge(&2, &0);
        assert!(!graph.is_complete());
    }
}
