// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Minimum and maximum spanning trees (Prim)

use super::frontier::{Frontier, Order};
use crate::error::{GraphError, Result};
use crate::graph::{Edge, EdgeId, Graph};
use petgraph::stable_graph::NodeIndex;
use std::collections::HashMap;
use tracing::debug;

/// Which extreme of total edge weight a spanning tree optimizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeKind {
    /// Smallest total weight
    Minimum,
    /// Largest total weight
    Maximum,
}

impl TreeKind {
    fn prefers(self, candidate: f64, current: f64) -> bool {
        match self {
            Self::Minimum => candidate < current,
            Self::Maximum => candidate > current,
        }
    }
}

impl<T> Graph<T> {
    /// Grow a spanning tree from the first vertex along outgoing edges.
    ///
    /// Each vertex is attached by the single best edge reaching it from the
    /// tree built so far. Returns one edge per vertex other than the root, in
    /// vertex order. Fails if some vertex cannot be reached from the root.
    pub fn spanning_tree(&self, kind: TreeKind) -> Result<Vec<Edge>> {
        let Some(root) = self.nodes().next() else {
            return Ok(Vec::new());
        };

        let (root_cost, initial, order) = match kind {
            TreeKind::Minimum => (0.0, f64::INFINITY, Order::Ascending),
            TreeKind::Maximum => (f64::INFINITY, f64::NEG_INFINITY, Order::Descending),
        };
        let mut cost: HashMap<NodeIndex, f64> = self.nodes().map(|node| (node, initial)).collect();
        let mut predecessor: HashMap<NodeIndex, EdgeId> = HashMap::new();
        let mut frontier = Frontier::new(order);

        cost.insert(root, root_cost);
        for (&node, &c) in &cost {
            frontier.push(node, c);
        }

        while let Some((top, _)) = frontier.pop() {
            if top != root && !predecessor.contains_key(&top) {
                return Err(GraphError::GraphNotConnected {
                    vertex: self.id_of(top),
                });
            }
            for &edge in self.vertex_at(top).outgoing() {
                let link = self.link(edge);
                if frontier.is_settled(link.sink) || !kind.prefers(link.weight, cost[&link.sink]) {
                    continue;
                }
                cost.insert(link.sink, link.weight);
                predecessor.insert(link.sink, edge);
                frontier.push(link.sink, link.weight);
            }
        }

        let tree: Vec<Edge> = self
            .nodes()
            .filter_map(|node| predecessor.get(&node))
            .map(|&edge| self.snapshot(edge))
            .collect();
        debug!(
            "{:?} spanning tree: {} edges, total weight {}",
            kind,
            tree.len(),
            tree.iter().map(|edge| edge.weight).sum::<f64>()
        );
        Ok(tree)
    }

    /// Spanning tree with the smallest total weight
    pub fn min_spanning_tree(&self) -> Result<Vec<Edge>> {
        self.spanning_tree(TreeKind::Minimum)
    }

    /// Spanning tree with the largest total weight
    pub fn max_spanning_tree(&self) -> Result<Vec<Edge>> {
        self.spanning_tree(TreeKind::Maximum)
    }
}
