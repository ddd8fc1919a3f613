// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Directed graph data structures
//!
//! [`DirectedGraph`] is the capability set shared by every backing store:
//! vertex and edge mutation, weight access and the structural predicates.
//! Two independent implementations are provided:
//!
//! - [`AdjacencyListGraph`] keeps one outgoing multiset per vertex and
//!   accepts any hashable vertex identifier. Parallel edges are allowed.
//! - [`AdjacencyMatrixGraph`] covers the dense range `0..n` fixed at
//!   construction and answers edge lookups in O(1). A cell holds one edge,
//!   so adding the same edge twice does not create a parallel copy.
//!
//! The caller picks the backing at construction time. Algorithms that only
//! need the trait (such as the weak connectivity check in [`traversal`])
//! work with either.

pub mod adjacency_list;
pub mod adjacency_matrix;
pub mod traversal;

pub use adjacency_list::AdjacencyListGraph;
pub use adjacency_matrix::AdjacencyMatrixGraph;

use crate::error::GraphResult;
use std::fmt::Debug;
use std::hash::Hash;

/// Scalar weight carried by vertices and edges
pub type Weight = f64;

/// A finite directed graph with optional vertex and edge weights.
///
/// Queries that name a vertex fail with
/// [`GraphError::VertexNotFound`](crate::error::GraphError::VertexNotFound)
/// when it is not registered. [`has_edge`](Self::has_edge) and the `is_*`
/// predicates are lenient instead: an unknown vertex or a missing edge is
/// just `false`, so compound structural queries need no pre-checks.
///
/// The graph performs no locking. Wrap it in a `Mutex` or `RwLock` when it
/// has to be shared between threads.
pub trait DirectedGraph {
    /// Vertex identifier
    type Vertex: Clone + Eq + Hash + Debug;

    /// Iterator over registered vertices.
    ///
    /// The order is stable for a given graph instance unless it is mutated.
    type Vertices<'a>: Iterator<Item = Self::Vertex>
    where
        Self: 'a;

    /// Iterator over the heads of a vertex's outgoing edges
    type Neighbors<'a>: Iterator<Item = Self::Vertex>
    where
        Self: 'a;

    /// Number of registered vertices
    fn vertex_count(&self) -> usize;

    /// Number of edges, counting parallel edges and self-loops
    fn edge_count(&self) -> usize;

    /// Returns an iterator over all registered vertices
    fn vertices(&self) -> Self::Vertices<'_>;

    /// Returns true when `vertex` is registered
    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool;

    /// Registers `vertex`.
    ///
    /// Registering a vertex that already exists resets it: its outgoing
    /// edges, their weights and its own weight are cleared. Edges pointing
    /// at it from other vertices are kept. Returns `true` when the vertex
    /// is new and `false` when an existing vertex was reset.
    fn add_vertex(&mut self, vertex: Self::Vertex) -> GraphResult<bool>;

    /// Adds the arc `from -> to`.
    ///
    /// Fails with `InvalidVertex` if either endpoint is unknown, in which
    /// case the graph is left untouched.
    fn add_edge(&mut self, from: &Self::Vertex, to: &Self::Vertex) -> GraphResult<()>;

    /// Removes one occurrence of `from -> to`.
    ///
    /// Missing edges and unknown vertices are not an error.
    /// Returns whether an edge was removed.
    fn remove_edge(&mut self, from: &Self::Vertex, to: &Self::Vertex) -> bool;

    /// Heads of the outgoing edges of `vertex`, duplicates included
    fn neighbors(&self, vertex: &Self::Vertex) -> GraphResult<Self::Neighbors<'_>>;

    /// Returns true when at least one arc `from -> to` exists
    fn has_edge(&self, from: &Self::Vertex, to: &Self::Vertex) -> bool;

    /// Number of arcs ending at `vertex`
    fn in_degree(&self, vertex: &Self::Vertex) -> GraphResult<usize>;

    /// Number of arcs starting at `vertex`
    fn out_degree(&self, vertex: &Self::Vertex) -> GraphResult<usize>;

    /// Sets the weight of a registered vertex
    fn set_vertex_weight(&mut self, vertex: &Self::Vertex, weight: Weight) -> GraphResult<()>;

    /// Weight of a registered vertex, `None` when never set
    fn vertex_weight(&self, vertex: &Self::Vertex) -> GraphResult<Option<Weight>>;

    /// Sets the weight of an existing edge, failing with `EdgeNotFound` otherwise
    fn set_edge_weight(
        &mut self,
        from: &Self::Vertex,
        to: &Self::Vertex,
        weight: Weight,
    ) -> GraphResult<()>;

    /// Weight of an existing edge, `None` when never set
    fn edge_weight(&self, from: &Self::Vertex, to: &Self::Vertex) -> GraphResult<Option<Weight>>;

    /// All arcs as `(from, to)` pairs, grouped by tail in vertex order
    fn edges(&self) -> Vec<(Self::Vertex, Self::Vertex)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for from in self.vertices() {
            if let Ok(heads) = self.neighbors(&from) {
                edges.extend(heads.map(|to| (from.clone(), to)));
            }
        }
        edges
    }

    /// `v` is an immediate successor of `u`
    fn is_successor(&self, u: &Self::Vertex, v: &Self::Vertex) -> bool {
        self.has_edge(u, v)
    }

    /// `v` is an immediate predecessor of `u`
    fn is_predecessor(&self, u: &Self::Vertex, v: &Self::Vertex) -> bool {
        self.has_edge(v, u)
    }

    /// Both arcs exist and share a tail but not a head
    fn is_divergent(
        &self,
        u1: &Self::Vertex,
        v1: &Self::Vertex,
        u2: &Self::Vertex,
        v2: &Self::Vertex,
    ) -> bool {
        u1 == u2 && v1 != v2 && self.has_edge(u1, v1) && self.has_edge(u2, v2)
    }

    /// Both arcs exist and share a head but not a tail
    fn is_convergent(
        &self,
        u1: &Self::Vertex,
        v1: &Self::Vertex,
        u2: &Self::Vertex,
        v2: &Self::Vertex,
    ) -> bool {
        v1 == v2 && u1 != u2 && self.has_edge(u1, v1) && self.has_edge(u2, v2)
    }

    /// The arc `u -> v` exists and `x` is one of its endpoints
    fn is_incident(&self, u: &Self::Vertex, v: &Self::Vertex, x: &Self::Vertex) -> bool {
        self.has_edge(u, v) && (x == u || x == v)
    }

    /// Returns true when the graph has no vertices
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// Every ordered pair of distinct vertices is joined by an arc.
    ///
    /// Self-loops are never required. Graphs with at most one vertex are
    /// complete.
    fn is_complete(&self) -> bool {
        if self.vertex_count() <= 1 {
            return true;
        }
        self.vertices()
            .all(|u| self.vertices().all(|v| u == v || self.has_edge(&u, &v)))
    }

    /// Weak connectivity: every vertex is reachable from every other when
    /// edge direction is ignored. The empty graph is connected.
    fn is_connected(&self) -> bool
    where
        Self: Sized,
    {
        traversal::is_weakly_connected(self)
    }

    /// Weakly connected components, each listed in discovery order
    fn weak_components(&self) -> Vec<Vec<Self::Vertex>>
    where
        Self: Sized,
    {
        traversal::weak_components(self)
    }
}
