// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Direction-agnostic traversal
//!
//! The traversal runs on an index that maps every vertex to a dense slot
//! and lists, per slot, both out-neighbors and in-neighbors. Building it
//! costs one pass over the edges, so the walk itself is O(V + E).
//! The walk uses an explicit stack; graph depth never touches the call stack.

use super::DirectedGraph;
use std::collections::HashMap;

/// Undirected view of a directed graph over dense slots
pub struct UndirectedIndex<V> {
    vertices: Vec<V>,
    adjacency: Vec<Vec<usize>>,
}

impl<V: Clone + Eq + std::hash::Hash> UndirectedIndex<V> {
    /// Build the index from any graph backing
    pub fn build<G>(graph: &G) -> Self
    where
        G: DirectedGraph<Vertex = V>,
    {
        let vertices: Vec<V> = graph.vertices().collect();
        let slots: HashMap<&V, usize> = vertices
            .iter()
            .enumerate()
            .map(|(slot, v)| (v, slot))
            .collect();

        let mut adjacency = vec![Vec::new(); vertices.len()];
        for (from_slot, from) in vertices.iter().enumerate() {
            let Ok(heads) = graph.neighbors(from) else {
                continue;
            };
            for to in heads {
                if let Some(&to_slot) = slots.get(&to) {
                    adjacency[from_slot].push(to_slot);
                    adjacency[to_slot].push(from_slot);
                }
            }
        }
        drop(slots);

        Self {
            vertices,
            adjacency,
        }
    }

    /// Number of indexed vertices
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true when no vertex was indexed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Depth-first walk from `start`, marking `visited` and returning the
    /// slots reached in the order they were first visited
    fn walk(&self, start: usize, visited: &mut [bool]) -> Vec<usize> {
        let mut reached = Vec::new();
        let mut stack = vec![start];

        while let Some(slot) = stack.pop() {
            if visited[slot] {
                continue;
            }
            visited[slot] = true;
            reached.push(slot);

            stack.extend(
                self.adjacency[slot]
                    .iter()
                    .copied()
                    .filter(|&next| !visited[next]),
            );
        }

        reached
    }

    /// Returns true when a single walk from the first vertex reaches all of them
    #[must_use]
    pub fn is_connected(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        let mut visited = vec![false; self.len()];
        self.walk(0, &mut visited).len() == self.len()
    }

    /// Partition the vertices into connected components
    #[must_use]
    pub fn components(&self) -> Vec<Vec<V>> {
        let mut visited = vec![false; self.len()];
        let mut components = Vec::new();

        for start in 0..self.len() {
            if visited[start] {
                continue;
            }
            let reached = self.walk(start, &mut visited);
            components.push(
                reached
                    .into_iter()
                    .map(|slot| self.vertices[slot].clone())
                    .collect(),
            );
        }

        components
    }
}

/// Weak connectivity of any graph backing.
///
/// The start vertex is the first one yielded by
/// [`DirectedGraph::vertices`]. The empty graph counts as connected.
pub fn is_weakly_connected<G: DirectedGraph>(graph: &G) -> bool {
    let connected = UndirectedIndex::build(graph).is_connected();
    tracing::trace!(vertices = graph.vertex_count(), connected, "weak connectivity check");
    connected
}

/// Weakly connected components of any graph backing
pub fn weak_components<G: DirectedGraph>(graph: &G) -> Vec<Vec<G::Vertex>> {
    UndirectedIndex::build(graph).components()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjacencyListGraph;

    fn chain(n: usize) -> AdjacencyListGraph<usize> {
        let mut graph = AdjacencyListGraph::new();
        for v in 0..n {
            graph.add_vertex(v).unwrap();
        }
        for v in 1..n {
            graph.add_edge(&v, &(v - 1)).unwrap();
        }
        graph
    }

    #[test]
    fn test_walks_against_edge_direction() {
        // every edge points back at 0, the walk starts at 0
        let graph = chain(5);
        assert!(is_weakly_connected(&graph));
    }

    #[test]
    fn test_long_chain_does_not_recurse() {
        let graph = chain(200_000);
        assert!(is_weakly_connected(&graph));
    }

    #[test]
    fn test_components_in_discovery_order() {
        let mut graph = chain(3);
        graph.add_vertex(10).unwrap();
        graph.add_vertex(11).unwrap();
        graph.add_edge(&10, &11).unwrap();

        let components = weak_components(&graph);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0][0], 0);
        assert_eq!(components[0].len(), 3);
        assert_eq!(components[1], vec![10, 11]);
    }

    #[test]
    fn test_empty_index() {
        let graph: AdjacencyListGraph<usize> = AdjacencyListGraph::new();
        let index = UndirectedIndex::build(&graph);
        assert!(index.is_empty());
        assert!(index.is_connected());
        assert!(index.components().is_empty());
    }
}
