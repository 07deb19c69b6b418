// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Directed to undirected conversion

use crate::graph::{EdgeId, Graph};
use petgraph::stable_graph::NodeIndex;
use std::collections::{HashMap, HashSet};
use tracing::debug;

impl<T: Clone> Graph<T> {
    /// Build an undirected copy of this graph.
    ///
    /// Every vertex is copied once. Each directed edge a->b is paired with one
    /// unused reverse edge b->a when present and their weights summed;
    /// otherwise it keeps its own weight. A self-loop pairs with another
    /// loop on the same vertex, or failing that with itself, doubling its
    /// weight. Each pairing becomes one edge in each direction in the new
    /// graph, so every loop comes out as two loops of the merged weight.
    #[must_use]
    pub fn make_undirected(&self) -> Graph<T> {
        let mut undirected = Graph::with_capacity(self.vertex_count(), self.edge_count() * 2);
        let mut copies: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(self.vertex_count());
        for node in self.nodes() {
            let vertex = self.vertex_at(node);
            copies.insert(node, undirected.insert_node(vertex.id(), vertex.data().clone()));
        }

        let mut consumed: HashSet<EdgeId> = HashSet::new();
        let mut merged = 0usize;
        for node in self.nodes() {
            let vertex = self.vertex_at(node);
            for &edge in vertex.outgoing() {
                if !consumed.insert(edge) {
                    continue;
                }
                let link = self.link(edge);
                let reverse = vertex.incoming().iter().copied().find(|&candidate| {
                    candidate != edge
                        && !consumed.contains(&candidate)
                        && self.link(candidate).source == link.sink
                });
                let weight = match reverse {
                    Some(reverse) => {
                        consumed.insert(reverse);
                        merged += 1;
                        link.weight + self.link(reverse).weight
                    }
                    // a lone self-loop is its own reverse
                    None if link.source == link.sink => 2.0 * link.weight,
                    None => link.weight,
                };

                let (a, b) = (copies[&link.source], copies[&link.sink]);
                undirected.connect(a, b, weight);
                undirected.connect(b, a, weight);
            }
        }

        debug!(
            "Undirected copy: {} vertices, {} edges ({} reciprocal pairs merged)",
            undirected.vertex_count(),
            undirected.edge_count(),
            merged
        );
        undirected
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{Graph, VertexId};

    fn make_graph(ids: &[VertexId], edges: &[(VertexId, VertexId, f64)]) -> Graph<String> {
        let mut graph = Graph::new();
        for &id in ids {
            graph.add_vertex(id, format!("v{id}"));
        }
        for &(from, to, weight) in edges {
            graph.add_weighted_edge(from, to, weight).unwrap();
        }
        graph
    }

    fn weights_between(graph: &Graph<String>, from: VertexId, to: VertexId) -> Vec<f64> {
        graph
            .outgoing(from)
            .unwrap()
            .into_iter()
            .filter(|edge| edge.sink == to)
            .map(|edge| edge.weight)
            .collect()
    }

    #[test]
    fn test_single_direction_is_mirrored() {
        let graph = make_graph(&[1, 2], &[(1, 2, 3.0)]);
        let undirected = graph.make_undirected();

        assert_eq!(undirected.edge_count(), 2);
        assert_eq!(weights_between(&undirected, 1, 2), vec![3.0]);
        assert_eq!(weights_between(&undirected, 2, 1), vec![3.0]);
    }

    #[test]
    fn test_reciprocal_edges_are_merged() {
        let graph = make_graph(&[1, 2], &[(1, 2, 3.0), (2, 1, 4.0)]);
        let undirected = graph.make_undirected();

        assert_eq!(undirected.edge_count(), 2);
        assert_eq!(weights_between(&undirected, 1, 2), vec![7.0]);
        assert_eq!(weights_between(&undirected, 2, 1), vec![7.0]);
    }

    #[test]
    fn test_vertices_copied_once_with_payload() {
        let graph = make_graph(&[1, 2, 3, 4], &[(1, 2, 1.0), (3, 2, 1.0), (2, 3, 1.0)]);
        let undirected = graph.make_undirected();

        assert_eq!(undirected.vertex_count(), 4);
        assert_eq!(undirected.vertex(4).unwrap().data(), "v4");
        assert_eq!(undirected.vertex_ids(), graph.vertex_ids());
    }

    #[test]
    fn test_source_graph_untouched() {
        let graph = make_graph(&[1, 2, 3], &[(1, 2, 1.0), (2, 3, 2.0)]);
        let before = graph.edges();
        let _ = graph.make_undirected();
        assert_eq!(graph.edges(), before);
    }

    #[test]
    fn test_parallel_edges_each_paired() {
        let graph = make_graph(&[1, 2], &[(1, 2, 1.0), (1, 2, 2.0), (2, 1, 5.0)]);
        let undirected = graph.make_undirected();

        assert_eq!(undirected.edge_count(), 4);
        assert_eq!(weights_between(&undirected, 1, 2), vec![6.0, 2.0]);
    }

    #[test]
    fn test_result_is_symmetric() {
        let graph = make_graph(
            &[1, 2, 3, 4],
            &[(1, 2, 1.0), (2, 3, 2.0), (3, 1, 3.0), (1, 3, 4.0), (4, 4, 1.0)],
        );
        let undirected = graph.make_undirected();

        for edge in undirected.edges() {
            let back = weights_between(&undirected, edge.sink, edge.source);
            assert!(back.contains(&edge.weight));
        }
    }

    #[test]
    fn test_lone_self_loop_doubles() {
        let graph = make_graph(&[1, 2], &[(1, 1, 3.0), (1, 2, 1.0)]);
        let undirected = graph.make_undirected();

        assert_eq!(weights_between(&undirected, 1, 1), vec![6.0, 6.0]);
        assert_eq!(weights_between(&undirected, 1, 2), vec![1.0]);
        assert_eq!(undirected.edge_count(), 4);
    }

    #[test]
    fn test_self_loops_pair_with_each_other() {
        let graph = make_graph(&[1], &[(1, 1, 3.0), (1, 1, 4.0)]);
        let undirected = graph.make_undirected();

        assert_eq!(weights_between(&undirected, 1, 1), vec![7.0, 7.0]);
    }
}
