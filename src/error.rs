// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error taxonomy for the graph data structures
//!
//! All three kinds signal a violated precondition on the caller's side.
//! Structural predicates never produce them: a missing edge is simply `false`.

use thiserror::Error;

/// Errors raised by [`DirectedGraph`](crate::graph::DirectedGraph) operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A mutator referenced a vertex that was never registered
    #[error("invalid vertex: {0} is not registered in the graph")]
    InvalidVertex(String),

    /// A query required a registered vertex
    #[error("vertex not found: {0}")]
    VertexNotFound(String),

    /// A weight accessor referenced an edge that does not currently exist
    #[error("edge not found: {from} -> {to}")]
    EdgeNotFound {
        /// Tail of the missing edge
        from: String,
        /// Head of the missing edge
        to: String,
    },

    /// A dense matrix over this many vertices does not fit in memory
    #[error("matrix over {0} vertices exceeds the addressable cell count")]
    TooManyVertices(usize),
}

impl GraphError {
    pub(crate) fn invalid_vertex<V: std::fmt::Debug>(vertex: &V) -> Self {
        Self::InvalidVertex(format!("{vertex:?}"))
    }

    pub(crate) fn vertex_not_found<V: std::fmt::Debug>(vertex: &V) -> Self {
        Self::VertexNotFound(format!("{vertex:?}"))
    }

    pub(crate) fn edge_not_found<V: std::fmt::Debug>(from: &V, to: &V) -> Self {
        Self::EdgeNotFound {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }
}

/// Result alias for graph operations
pub type GraphResult<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = GraphError::invalid_vertex(&"X");
        assert_eq!(err.to_string(), "invalid vertex: \"X\" is not registered in the graph");

        let err = GraphError::edge_not_found(&1usize, &2usize);
        assert_eq!(err.to_string(), "edge not found: 1 -> 2");
    }
}
