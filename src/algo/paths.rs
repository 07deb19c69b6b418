// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Exhaustive simple-path enumeration and the analyses built on it
//!
//! Enumeration is exponential in the worst case. [`AllPaths`] is lazy, so
//! callers that only need to know whether a second path exists stop early.

use super::COST_TOLERANCE;
use crate::error::{GraphError, Result};
use crate::graph::{Edge, EdgeId, Graph, VertexId};
use petgraph::stable_graph::NodeIndex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A simple path and its total weight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    /// Edges from start to end
    pub edges: Vec<Edge>,
    /// Sum of edge weights
    pub cost: f64,
}

impl Path {
    /// Number of edges
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check if this is the zero-length path from a vertex to itself
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Vertices strictly between the two endpoints
    pub fn interior(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.edges.iter().skip(1).map(|edge| edge.source)
    }
}

#[derive(Debug)]
struct Frame {
    node: NodeIndex,
    next: usize,
    cost: f64,
}

/// Lazy depth-first enumeration of every simple path between two vertices
///
/// Backtracking runs on an explicit stack. When start and end coincide the
/// empty path comes first, followed by every simple cycle through the start.
#[derive(Debug)]
pub struct AllPaths<'g, T> {
    graph: &'g Graph<T>,
    end: NodeIndex,
    stack: Vec<Frame>,
    trail: Vec<EdgeId>,
    on_trail: HashSet<NodeIndex>,
    pending_empty: bool,
}

impl<'g, T> AllPaths<'g, T> {
    fn new(graph: &'g Graph<T>, start: NodeIndex, end: NodeIndex) -> Self {
        Self {
            graph,
            end,
            stack: vec![Frame {
                node: start,
                next: 0,
                cost: 0.0,
            }],
            trail: Vec::new(),
            on_trail: HashSet::from([start]),
            pending_empty: start == end,
        }
    }

    fn emit(&self, last: EdgeId, cost: f64) -> Path {
        let edges = self
            .trail
            .iter()
            .chain(std::iter::once(&last))
            .map(|&edge| self.graph.snapshot(edge))
            .collect();
        Path { edges, cost }
    }
}

impl<T> Iterator for AllPaths<'_, T> {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        if self.pending_empty {
            self.pending_empty = false;
            return Some(Path {
                edges: Vec::new(),
                cost: 0.0,
            });
        }

        loop {
            let frame = self.stack.last_mut()?;
            let (node, cost, next) = (frame.node, frame.cost, frame.next);
            frame.next += 1;

            let Some(&edge) = self.graph.vertex_at(node).outgoing().get(next) else {
                // exhausted: backtrack
                self.stack.pop();
                self.on_trail.remove(&node);
                self.trail.pop();
                continue;
            };

            let link = self.graph.link(edge);
            let reached = cost + link.weight;
            if link.sink == self.end {
                return Some(self.emit(edge, reached));
            }
            if self.on_trail.insert(link.sink) {
                self.trail.push(edge);
                self.stack.push(Frame {
                    node: link.sink,
                    next: 0,
                    cost: reached,
                });
            }
        }
    }
}

/// Shortest-path counts gathered over every ordered vertex pair
#[derive(Debug, Default)]
struct CentralityTally {
    /// Every shortest path found
    paths: usize,
    /// Shortest paths with at least one interior vertex
    routed: usize,
    /// Routed paths per interior vertex
    through: HashMap<VertexId, usize>,
}

impl CentralityTally {
    fn fraction(&self, id: VertexId, vertices: usize) -> Result<f64> {
        if vertices < 2 || self.paths == 0 {
            return Err(GraphError::InsufficientGraphSize {
                vertices,
                paths: self.paths,
            });
        }
        if self.routed == 0 {
            return Ok(0.0);
        }
        let through = self.through.get(&id).copied().unwrap_or(0);
        Ok(through as f64 / self.routed as f64)
    }
}

impl<T> Graph<T> {
    /// Enumerate every simple path from `start` to `end`
    pub fn all_paths(&self, start: VertexId, end: VertexId) -> Result<AllPaths<'_, T>> {
        let from = self.node(start)?;
        let to = self.node(end)?;
        Ok(AllPaths::new(self, from, to))
    }

    /// All simple paths tied for the minimum total weight
    pub fn shortest_paths_all(&self, start: VertexId, end: VertexId) -> Result<Vec<Path>> {
        let from = self.node(start)?;
        let to = self.node(end)?;
        Ok(self.cheapest_paths(from, to))
    }

    fn cheapest_paths(&self, from: NodeIndex, to: NodeIndex) -> Vec<Path> {
        let mut cheapest: Vec<Path> = Vec::new();
        let mut minimum = f64::INFINITY;
        for path in AllPaths::new(self, from, to) {
            if path.cost < minimum - COST_TOLERANCE {
                minimum = path.cost;
                cheapest.clear();
                cheapest.push(path);
            } else if (path.cost - minimum).abs() <= COST_TOLERANCE {
                cheapest.push(path);
            }
        }
        cheapest
    }

    /// Check that at most one simple path joins every ordered pair of vertices.
    ///
    /// A vertex paired with itself counts the empty path, so any directed
    /// cycle makes the graph not singly connected.
    #[must_use]
    pub fn is_singly_connected(&self) -> bool {
        for from in self.nodes() {
            for to in self.nodes() {
                if AllPaths::new(self, from, to).nth(1).is_some() {
                    debug!(
                        "Multiple paths from {} to {}",
                        self.id_of(from),
                        self.id_of(to)
                    );
                    return false;
                }
            }
        }
        true
    }

    fn centrality_tally(&self) -> CentralityTally {
        let mut tally = CentralityTally::default();
        for from in self.nodes() {
            for to in self.nodes().filter(|&to| to != from) {
                for path in self.cheapest_paths(from, to) {
                    tally.paths += 1;
                    if path.len() < 2 {
                        continue;
                    }
                    tally.routed += 1;
                    for id in path.interior() {
                        *tally.through.entry(id).or_default() += 1;
                    }
                }
            }
        }
        debug!(
            "Centrality over {} shortest paths, {} with interior vertices",
            tally.paths, tally.routed
        );
        tally
    }

    /// Fraction of all-pairs shortest paths that pass through `id` as an interior vertex.
    ///
    /// Only shortest paths with an interior vertex are counted, so the result
    /// lies in `[0, 1]`. Fails for graphs with fewer than two vertices or
    /// without any path between distinct vertices.
    pub fn betweenness_centrality(&self, id: VertexId) -> Result<f64> {
        self.node(id)?;
        self.centrality_tally().fraction(id, self.vertex_count())
    }

    /// Betweenness centrality of every vertex, from a single all-pairs pass
    pub fn betweenness_centralities(&self) -> Result<Vec<(VertexId, f64)>> {
        let tally = self.centrality_tally();
        let vertices = self.vertex_count();
        self.vertex_ids()
            .into_iter()
            .map(|id| tally.fraction(id, vertices).map(|score| (id, score)))
            .collect()
    }
}
