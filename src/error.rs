// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for graph construction and analysis

use crate::graph::{EdgeId, VertexId};
use thiserror::Error;

/// Errors raised by [`Graph`](crate::graph::Graph) mutation and the analysis algorithms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// No vertex is stored under this identifier
    #[error("vertex not found: {0}")]
    VertexNotFound(VertexId),

    /// The edge handle does not refer to a live edge
    #[error("edge not found: {0}")]
    EdgeNotFound(EdgeId),

    /// The target cannot be reached from the source
    #[error("no path exists from {from} to {to}")]
    NoPathExists {
        /// Source vertex
        from: VertexId,
        /// Unreachable target vertex
        to: VertexId,
    },

    /// A spanning tree was requested but this vertex cannot be reached from the tree root
    #[error("graph is not connected: vertex {vertex} is unreachable from the tree root")]
    GraphNotConnected {
        /// First vertex found without a tree edge
        vertex: VertexId,
    },

    /// Centrality is undefined for this graph
    #[error("graph too small for centrality: {vertices} vertices, {paths} shortest paths")]
    InsufficientGraphSize {
        /// Number of vertices in the graph
        vertices: usize,
        /// Number of shortest paths found across all vertex pairs
        paths: usize,
    },

    /// Weighted shortest paths require non-negative weights
    #[error("negative edge weight {weight} on {from}->{to}")]
    NegativeWeight {
        /// Edge source
        from: VertexId,
        /// Edge sink
        to: VertexId,
        /// Offending weight
        weight: f64,
    },
}

/// Result alias for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;
