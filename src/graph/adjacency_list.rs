// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Adjacency-list backed directed multigraph

use super::{DirectedGraph, Weight};
use crate::error::{GraphError, GraphResult};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

/// Per-vertex storage
#[derive(Debug, Clone)]
struct VertexEntry<V> {
    weight: Option<Weight>,
    outgoing: Vec<V>,
}

impl<V> Default for VertexEntry<V> {
    fn default() -> Self {
        Self {
            weight: None,
            outgoing: Vec::new(),
        }
    }
}

/// Directed multigraph keyed by arbitrary hashable vertex identifiers.
///
/// Each vertex owns its outgoing list, so `(u, v)` may appear more than
/// once. Edge weights are keyed by the ordered pair: all parallel copies
/// share one weight, which is dropped together with the last copy.
/// Vertices iterate in registration order.
#[derive(Debug, Clone)]
pub struct AdjacencyListGraph<V> {
    order: Vec<V>,
    entries: HashMap<V, VertexEntry<V>>,
    edge_weights: HashMap<(V, V), Weight>,
}

impl<V> Default for AdjacencyListGraph<V> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            entries: HashMap::new(),
            edge_weights: HashMap::new(),
        }
    }
}

impl<V: Clone + Eq + Hash + Debug> AdjacencyListGraph<V> {
    /// Create a new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with the given vertices and no edges.
    ///
    /// Duplicates in `vertices` are registered once.
    pub fn with_vertices(vertices: impl IntoIterator<Item = V>) -> Self {
        let mut graph = Self::new();
        for vertex in vertices {
            if !graph.entries.contains_key(&vertex) {
                graph.insert_fresh(vertex);
            }
        }
        graph
    }

    fn insert_fresh(&mut self, vertex: V) {
        self.order.push(vertex.clone());
        self.entries.insert(vertex, VertexEntry::default());
    }

    /// Outgoing list of `vertex` in insertion order, duplicates included
    pub fn successors(&self, vertex: &V) -> GraphResult<&[V]> {
        self.entries
            .get(vertex)
            .map(|entry| entry.outgoing.as_slice())
            .ok_or_else(|| GraphError::vertex_not_found(vertex))
    }

    /// Number of parallel copies of `from -> to`
    #[must_use]
    pub fn multiplicity(&self, from: &V, to: &V) -> usize {
        self.entries
            .get(from)
            .map_or(0, |entry| entry.outgoing.iter().filter(|v| *v == to).count())
    }
}

impl<V: Clone + Eq + Hash + Debug> DirectedGraph for AdjacencyListGraph<V> {
    type Vertex = V;
    type Vertices<'a> = std::iter::Cloned<std::slice::Iter<'a, V>> where Self: 'a;
    type Neighbors<'a> = std::iter::Cloned<std::slice::Iter<'a, V>> where Self: 'a;

    fn vertex_count(&self) -> usize {
        self.order.len()
    }

    fn edge_count(&self) -> usize {
        self.entries.values().map(|entry| entry.outgoing.len()).sum()
    }

    fn vertices(&self) -> Self::Vertices<'_> {
        self.order.iter().cloned()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.entries.contains_key(vertex)
    }

    fn add_vertex(&mut self, vertex: V) -> GraphResult<bool> {
        match self.entries.get_mut(&vertex) {
            Some(entry) => {
                debug!(
                    ?vertex,
                    dropped_edges = entry.outgoing.len(),
                    "resetting re-registered vertex"
                );
                entry.outgoing.clear();
                entry.weight = None;
                self.edge_weights.retain(|(from, _), _| *from != vertex);
                Ok(false)
            }
            None => {
                self.insert_fresh(vertex);
                Ok(true)
            }
        }
    }

    fn add_edge(&mut self, from: &V, to: &V) -> GraphResult<()> {
        if !self.entries.contains_key(to) {
            return Err(GraphError::invalid_vertex(to));
        }
        let entry = self
            .entries
            .get_mut(from)
            .ok_or_else(|| GraphError::invalid_vertex(from))?;
        entry.outgoing.push(to.clone());
        Ok(())
    }

    fn remove_edge(&mut self, from: &V, to: &V) -> bool {
        let Some(entry) = self.entries.get_mut(from) else {
            return false;
        };
        let Some(position) = entry.outgoing.iter().position(|v| v == to) else {
            return false;
        };
        entry.outgoing.remove(position);

        if !entry.outgoing.contains(to) {
            self.edge_weights.remove(&(from.clone(), to.clone()));
        }
        true
    }

    fn neighbors(&self, vertex: &V) -> GraphResult<Self::Neighbors<'_>> {
        self.successors(vertex).map(|heads| heads.iter().cloned())
    }

    fn has_edge(&self, from: &V, to: &V) -> bool {
        self.entries
            .get(from)
            .is_some_and(|entry| entry.outgoing.contains(to))
    }

    fn in_degree(&self, vertex: &V) -> GraphResult<usize> {
        if !self.entries.contains_key(vertex) {
            return Err(GraphError::vertex_not_found(vertex));
        }
        Ok(self
            .entries
            .values()
            .map(|entry| entry.outgoing.iter().filter(|v| *v == vertex).count())
            .sum())
    }

    fn out_degree(&self, vertex: &V) -> GraphResult<usize> {
        self.successors(vertex).map(<[V]>::len)
    }

    fn set_vertex_weight(&mut self, vertex: &V, weight: Weight) -> GraphResult<()> {
        let entry = self
            .entries
            .get_mut(vertex)
            .ok_or_else(|| GraphError::vertex_not_found(vertex))?;
        entry.weight = Some(weight);
        Ok(())
    }

    fn vertex_weight(&self, vertex: &V) -> GraphResult<Option<Weight>> {
        self.entries
            .get(vertex)
            .map(|entry| entry.weight)
            .ok_or_else(|| GraphError::vertex_not_found(vertex))
    }

    fn set_edge_weight(&mut self, from: &V, to: &V, weight: Weight) -> GraphResult<()> {
        if !self.has_edge(from, to) {
            return Err(GraphError::edge_not_found(from, to));
        }
        self.edge_weights.insert((from.clone(), to.clone()), weight);
        Ok(())
    }

    fn edge_weight(&self, from: &V, to: &V) -> GraphResult<Option<Weight>> {
        if !self.has_edge(from, to) {
            return Err(GraphError::edge_not_found(from, to));
        }
        Ok(self.edge_weights.get(&(from.clone(), to.clone())).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> AdjacencyListGraph<&'static str> {
        AdjacencyListGraph::with_vertices(["A", "B", "C"])
    }

    #[test]
    fn test_add_vertex() {
        let mut graph = abc();
        assert!(graph.add_vertex("D").unwrap());
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.neighbors(&"D").unwrap().count(), 0);
    }

    #[test]
    fn test_vertex_type_without_default() {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        struct Login(&'static str);

        let mut graph = AdjacencyListGraph::new();
        assert!(graph.add_vertex(Login("alice")).unwrap());
        assert!(graph.add_vertex(Login("bob")).unwrap());
        graph.add_edge(&Login("alice"), &Login("bob")).unwrap();

        assert_eq!(graph.out_degree(&Login("alice")).unwrap(), 1);
        assert_eq!(graph.vertex_weight(&Login("bob")).unwrap(), None);
    }

    #[test]
    fn test_reregistration_resets_outgoing_only() {
        let mut graph = abc();
        graph.add_edge(&"A", &"B").unwrap();
        graph.add_edge(&"C", &"A").unwrap();
        graph.set_edge_weight(&"A", &"B", 3.0).unwrap();
        graph.set_vertex_weight(&"A", 1.5).unwrap();

        assert!(!graph.add_vertex("A").unwrap());

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.out_degree(&"A").unwrap(), 0);
        assert_eq!(graph.vertex_weight(&"A").unwrap(), None);
        assert!(graph.has_edge(&"C", &"A"));

        // the old weight must not resurface on a new A -> B
        graph.add_edge(&"A", &"B").unwrap();
        assert_eq!(graph.edge_weight(&"A", &"B").unwrap(), None);
    }

    #[test]
    fn test_add_edge_rejects_unknown_endpoints_without_mutation() {
        let mut graph = abc();
        assert_eq!(
            graph.add_edge(&"A", &"X"),
            Err(GraphError::InvalidVertex("\"X\"".into()))
        );
        assert!(matches!(
            graph.add_edge(&"X", &"A"),
            Err(GraphError::InvalidVertex(_))
        ));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_parallel_edges_share_weight() {
        let mut graph = abc();
        graph.add_edge(&"A", &"B").unwrap();
        graph.add_edge(&"A", &"B").unwrap();
        graph.set_edge_weight(&"A", &"B", 7.0).unwrap();

        assert_eq!(graph.multiplicity(&"A", &"B"), 2);
        assert_eq!(graph.out_degree(&"A").unwrap(), 2);
        assert_eq!(graph.in_degree(&"B").unwrap(), 2);

        assert!(graph.remove_edge(&"A", &"B"));
        assert_eq!(graph.out_degree(&"A").unwrap(), 1);
        assert_eq!(graph.edge_weight(&"A", &"B").unwrap(), Some(7.0));

        assert!(graph.remove_edge(&"A", &"B"));
        assert!(!graph.has_edge(&"A", &"B"));
        graph.add_edge(&"A", &"B").unwrap();
        assert_eq!(graph.edge_weight(&"A", &"B").unwrap(), None);
    }

    #[test]
    fn test_remove_edge_first_match_only() {
        let mut graph = abc();
        graph.add_edge(&"A", &"B").unwrap();
        graph.add_edge(&"A", &"C").unwrap();
        graph.add_edge(&"A", &"B").unwrap();

        graph.remove_edge(&"A", &"B");
        assert_eq!(graph.successors(&"A").unwrap(), &["C", "B"]);
    }

    #[test]
    fn test_remove_missing_edge_is_noop() {
        let mut graph = abc();
        graph.add_edge(&"A", &"B").unwrap();
        assert!(!graph.remove_edge(&"B", &"A"));
        assert!(!graph.remove_edge(&"Z", &"A"));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_self_loop_counts_both_degrees() {
        let mut graph = abc();
        graph.add_edge(&"A", &"A").unwrap();
        assert_eq!(graph.in_degree(&"A").unwrap(), 1);
        assert_eq!(graph.out_degree(&"A").unwrap(), 1);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_weight_absent_vs_zero() {
        let mut graph = abc();
        assert_eq!(graph.vertex_weight(&"B").unwrap(), None);
        graph.set_vertex_weight(&"B", 0.0).unwrap();
        assert_eq!(graph.vertex_weight(&"B").unwrap(), Some(0.0));
        assert!(matches!(
            graph.vertex_weight(&"Q"),
            Err(GraphError::VertexNotFound(_))
        ));
    }

    #[test]
    fn test_edge_weight_requires_edge() {
        let mut graph = abc();
        assert!(matches!(
            graph.set_edge_weight(&"A", &"B", 1.0),
            Err(GraphError::EdgeNotFound { .. })
        ));
        assert!(matches!(
            graph.edge_weight(&"A", &"B"),
            Err(GraphError::EdgeNotFound { .. })
        ));
    }

    #[test]
    fn test_vertices_in_registration_order() {
        let graph = AdjacencyListGraph::with_vertices(["c", "a", "b", "a"]);
        assert_eq!(graph.vertices().collect::<Vec<_>>(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_edges_listing() {
        let mut graph = abc();
        graph.add_edge(&"B", &"C").unwrap();
        graph.add_edge(&"A", &"B").unwrap();
        assert_eq!(graph.edges(), vec![("A", "B"), ("B", "C")]);
    }
}
