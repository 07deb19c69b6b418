// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Priority frontier shared by the relaxation algorithms

use petgraph::stable_graph::NodeIndex;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// Which end of the cost range leaves the frontier first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Order {
    /// Cheapest first (Dijkstra, minimum spanning tree)
    Ascending,
    /// Most expensive first (maximum spanning tree)
    Descending,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    cost: f64,
    node: NodeIndex,
    order: Order,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the greatest entry
        let by_cost = match self.order {
            Order::Ascending => other.cost.total_cmp(&self.cost),
            Order::Descending => self.cost.total_cmp(&other.cost),
        };
        by_cost.then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Lazy-deletion priority queue of vertices.
///
/// Re-prioritizing a vertex pushes a fresh entry; older entries for a vertex
/// are discarded when they surface after it has been settled. Ties are broken
/// by arena position so results are deterministic.
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    settled: HashSet<NodeIndex>,
    order: Order,
}

impl Frontier {
    pub(crate) fn new(order: Order) -> Self {
        Self {
            heap: BinaryHeap::new(),
            settled: HashSet::new(),
            order,
        }
    }

    /// Queue `node` at `cost`, or re-queue it after its cost improved
    pub(crate) fn push(&mut self, node: NodeIndex, cost: f64) {
        self.heap.push(Entry {
            cost,
            node,
            order: self.order,
        });
    }

    /// Settle and return the best unsettled vertex
    pub(crate) fn pop(&mut self) -> Option<(NodeIndex, f64)> {
        while let Some(entry) = self.heap.pop() {
            if self.settled.insert(entry.node) {
                return Some((entry.node, entry.cost));
            }
        }
        None
    }

    pub(crate) fn is_settled(&self, node: NodeIndex) -> bool {
        self.settled.contains(&node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: u32) -> NodeIndex {
        NodeIndex::new(i as usize)
    }

    #[test]
    fn test_ascending_pops_cheapest() {
        let mut frontier = Frontier::new(Order::Ascending);
        frontier.push(n(0), 5.0);
        frontier.push(n(1), 1.0);
        frontier.push(n(2), f64::INFINITY);

        assert_eq!(frontier.pop(), Some((n(1), 1.0)));
        assert_eq!(frontier.pop(), Some((n(0), 5.0)));
        assert_eq!(frontier.pop(), Some((n(2), f64::INFINITY)));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_descending_pops_most_expensive() {
        let mut frontier = Frontier::new(Order::Descending);
        frontier.push(n(0), 5.0);
        frontier.push(n(1), 1.0);
        frontier.push(n(2), f64::NEG_INFINITY);

        assert_eq!(frontier.pop(), Some((n(0), 5.0)));
        assert_eq!(frontier.pop(), Some((n(1), 1.0)));
        assert_eq!(frontier.pop(), Some((n(2), f64::NEG_INFINITY)));
    }

    #[test]
    fn test_stale_entries_are_skipped() {
        let mut frontier = Frontier::new(Order::Ascending);
        frontier.push(n(0), 9.0);
        frontier.push(n(1), 4.0);
        frontier.push(n(0), 2.0);

        assert_eq!(frontier.pop(), Some((n(0), 2.0)));
        assert!(frontier.is_settled(n(0)));
        assert_eq!(frontier.pop(), Some((n(1), 4.0)));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_ties_break_by_position() {
        let mut frontier = Frontier::new(Order::Ascending);
        frontier.push(n(3), 1.0);
        frontier.push(n(1), 1.0);
        frontier.push(n(2), 1.0);

        assert_eq!(frontier.pop().map(|(node, _)| node), Some(n(1)));
        assert_eq!(frontier.pop().map(|(node, _)| node), Some(n(2)));
        assert_eq!(frontier.pop().map(|(node, _)| node), Some(n(3)));
    }
}
