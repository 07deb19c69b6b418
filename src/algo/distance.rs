// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Unweighted hop distances and graph diameter (BFS)

use crate::error::{GraphError, Result};
use crate::graph::{EdgeId, Graph, VertexId};
use petgraph::stable_graph::NodeIndex;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

impl<T> Graph<T> {
    /// Number of edges on the fewest-hop path from `start` to `end`, ignoring weights.
    ///
    /// The search stops as soon as `end` is discovered.
    pub fn shortest_path_steps(&self, start: VertexId, end: VertexId) -> Result<usize> {
        let source = self.node(start)?;
        let target = self.node(end)?;

        let mut predecessor: HashMap<NodeIndex, EdgeId> = HashMap::new();
        let mut visited = HashSet::from([source]);
        let mut queue = VecDeque::from([source]);

        'search: while let Some(node) = queue.pop_front() {
            for &edge in self.vertex_at(node).outgoing() {
                let sink = self.link(edge).sink;
                if !visited.insert(sink) {
                    continue;
                }
                predecessor.insert(sink, edge);
                if sink == target {
                    break 'search;
                }
                queue.push_back(sink);
            }
        }

        let mut steps = 0;
        let mut current = target;
        while current != source {
            let edge = predecessor
                .get(&current)
                .ok_or(GraphError::NoPathExists {
                    from: start,
                    to: end,
                })?;
            current = self.link(*edge).source;
            steps += 1;
        }
        Ok(steps)
    }

    /// Hop distance from `start` to every vertex it can reach, itself included at 0
    pub fn hop_distances(&self, start: VertexId) -> Result<HashMap<VertexId, usize>> {
        let source = self.node(start)?;
        Ok(self
            .hops_from(source)
            .into_iter()
            .map(|(node, hops)| (self.id_of(node), hops))
            .collect())
    }

    fn hops_from(&self, source: NodeIndex) -> HashMap<NodeIndex, usize> {
        let mut distance = HashMap::from([(source, 0)]);
        let mut queue = VecDeque::from([source]);

        while let Some(node) = queue.pop_front() {
            let next = distance[&node] + 1;
            for &edge in self.vertex_at(node).outgoing() {
                let sink = self.link(edge).sink;
                if let Entry::Vacant(slot) = distance.entry(sink) {
                    slot.insert(next);
                    queue.push_back(sink);
                }
            }
        }
        distance
    }

    /// Longest fewest-hop distance over the ordered pairs joined by a path.
    ///
    /// This is the diameter over reachable pairs only: a pair with no
    /// connecting path is skipped rather than reported, so a disconnected
    /// graph still gets a finite answer. An empty graph has diameter 0.
    #[must_use]
    pub fn graph_diameter(&self) -> usize {
        let diameter = self
            .nodes()
            .filter_map(|node| self.hops_from(node).into_values().max())
            .max()
            .unwrap_or(0);
        debug!("Graph diameter: {}", diameter);
        diameter
    }
}
