// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Analysis algorithms over [`Graph`](crate::graph::Graph)
//!
//! Every algorithm is an inherent method on `Graph` and keeps its working
//! state (costs, predecessors, visited sets) local to the call, so analyses
//! never interfere with each other and never mutate the graph.

mod distance;
mod frontier;
mod paths;
mod shortest_path;
mod spanning_tree;
mod undirected;

pub use paths::{AllPaths, Path};
pub use shortest_path::ShortestPathTree;
pub use spanning_tree::TreeKind;

/// Two path costs closer than this are considered tied
pub const COST_TOLERANCE: f64 = 1e-9;
