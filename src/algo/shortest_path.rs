// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Weighted single-source shortest paths (Dijkstra relaxation)

use super::frontier::{Frontier, Order};
use crate::error::{GraphError, Result};
use crate::graph::{Edge, EdgeId, Graph, VertexId};
use petgraph::stable_graph::NodeIndex;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Shortest-path tree rooted at one source vertex
///
/// Only vertices reachable from the source carry a cost.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: VertexId,
    cost: HashMap<VertexId, f64>,
    predecessor: HashMap<VertexId, Edge>,
}

impl ShortestPathTree {
    /// Root of the tree
    #[must_use]
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Cheapest known cost from the source to `id`
    #[must_use]
    pub fn cost(&self, id: VertexId) -> Option<f64> {
        self.cost.get(&id).copied()
    }

    /// Tree edge used to reach `id`
    #[must_use]
    pub fn predecessor(&self, id: VertexId) -> Option<&Edge> {
        self.predecessor.get(&id)
    }

    /// Check if `id` can be reached from the source
    #[must_use]
    pub fn is_reachable(&self, id: VertexId) -> bool {
        self.cost.contains_key(&id)
    }

    /// Reachable vertices and their costs
    pub fn costs(&self) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.cost.iter().map(|(&id, &cost)| (id, cost))
    }

    /// Edges of the cheapest path to `end`, ordered from `end` back to the source
    pub fn path_to(&self, end: VertexId) -> Result<Vec<Edge>> {
        let unreachable = GraphError::NoPathExists {
            from: self.source,
            to: end,
        };
        let mut path = Vec::new();
        let mut current = end;
        while current != self.source {
            // a chain longer than the tree means it never returns to the source
            if path.len() > self.predecessor.len() {
                return Err(unreachable);
            }
            let edge = self.predecessor.get(&current).ok_or_else(|| unreachable.clone())?;
            path.push(*edge);
            current = edge.source;
        }
        Ok(path)
    }
}

impl<T> Graph<T> {
    /// Compute cheapest paths from `start` to every vertex.
    ///
    /// All edge weights reachable from `start` must be non-negative.
    pub fn shortest_path_tree(&self, start: VertexId) -> Result<ShortestPathTree> {
        let source = self.node(start)?;

        let mut cost: HashMap<NodeIndex, f64> =
            self.nodes().map(|node| (node, f64::INFINITY)).collect();
        let mut predecessor: HashMap<NodeIndex, EdgeId> = HashMap::new();
        let mut frontier = Frontier::new(Order::Ascending);

        cost.insert(source, 0.0);
        for (&node, &initial) in &cost {
            frontier.push(node, initial);
        }

        while let Some((settled, settled_cost)) = frontier.pop() {
            if settled_cost.is_infinite() {
                // everything left in the frontier is unreachable
                break;
            }
            for &edge in self.vertex_at(settled).outgoing() {
                let link = self.link(edge);
                if link.weight < 0.0 {
                    return Err(GraphError::NegativeWeight {
                        from: self.id_of(link.source),
                        to: self.id_of(link.sink),
                        weight: link.weight,
                    });
                }
                if frontier.is_settled(link.sink) {
                    continue;
                }
                let through = settled_cost + link.weight;
                if cost[&link.sink] > through {
                    trace!(
                        "Relaxed {} via {}: {}",
                        self.id_of(link.sink),
                        self.id_of(settled),
                        through
                    );
                    cost.insert(link.sink, through);
                    predecessor.insert(link.sink, edge);
                    frontier.push(link.sink, through);
                }
            }
        }

        let tree = ShortestPathTree {
            source: start,
            cost: cost
                .into_iter()
                .filter(|(_, c)| c.is_finite())
                .map(|(node, c)| (self.id_of(node), c))
                .collect(),
            predecessor: predecessor
                .into_iter()
                .map(|(node, edge)| (self.id_of(node), self.snapshot(edge)))
                .collect(),
        };
        debug!(
            "Shortest-path tree from {} reaches {} of {} vertices",
            start,
            tree.cost.len(),
            self.vertex_count()
        );
        Ok(tree)
    }

    /// Cheapest path from `start` to `end`, returned as edges from `end` back to `start`.
    ///
    /// Reverse the result for start-to-end order. `start == end` yields an empty path.
    pub fn shortest_path(&self, start: VertexId, end: VertexId) -> Result<Vec<Edge>> {
        self.node(end)?;
        self.shortest_path_tree(start)?.path_to(end)
    }
}
