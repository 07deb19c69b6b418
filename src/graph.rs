// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Graph data structures: vertices, edges and the mutation surface
//!
//! Vertices and edges live in a petgraph [`StableDiGraph`] arena and are
//! addressed by handles, so removing one never leaves a dangling reference
//! behind. Each vertex additionally keeps its own ordered incidence lists,
//! because insertion order decides traversal and rendering order.

use crate::error::{GraphError, Result};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Vertex identifier, unique within one graph
pub type VertexId = i64;

/// Weight given to edges inserted without an explicit weight
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Handle to an edge stored in a [`Graph`]
///
/// Arena slots of removed edges are reused, so a handle also carries the
/// generation of the edge it was issued for. A handle outliving its edge
/// never resolves to a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    pub(crate) slot: EdgeIndex,
    generation: u64,
}

impl EdgeId {
    /// Position of the edge in the arena
    #[must_use]
    pub fn index(self) -> usize {
        self.slot.index()
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}.{}", self.slot.index(), self.generation)
    }
}

/// A vertex: payload plus the edges touching it, in insertion order
#[derive(Debug, Clone)]
pub struct Vertex<T> {
    id: VertexId,
    data: T,
    incoming: Vec<EdgeId>,
    outgoing: Vec<EdgeId>,
}

impl<T> Vertex<T> {
    fn new(id: VertexId, data: T) -> Self {
        Self {
            id,
            data,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    /// Identifier this vertex is stored under
    #[must_use]
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Payload
    #[must_use]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Edges ending at this vertex
    #[must_use]
    pub fn incoming(&self) -> &[EdgeId] {
        &self.incoming
    }

    /// Edges starting at this vertex
    #[must_use]
    pub fn outgoing(&self) -> &[EdgeId] {
        &self.outgoing
    }
}

/// Arena payload for an edge
#[derive(Debug, Clone, Copy)]
pub(crate) struct Link {
    pub(crate) source: NodeIndex,
    pub(crate) sink: NodeIndex,
    pub(crate) weight: f64,
    generation: u64,
}

/// An edge resolved to vertex identifiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    /// Handle of the edge
    #[serde(skip)]
    pub id: EdgeId,
    /// Source vertex
    pub source: VertexId,
    /// Sink vertex
    pub sink: VertexId,
    /// Current weight
    pub weight: f64,
}

/// Directed, weighted multigraph over an arbitrary payload
///
/// Parallel edges and self-loops are allowed. The graph is single-owner and
/// every analysis takes `&self`, keeping its working state local to the call.
#[derive(Debug, Clone)]
pub struct Graph<T> {
    arena: StableDiGraph<Vertex<T>, Link>,
    index: HashMap<VertexId, NodeIndex>,
    generation: u64,
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Graph<T> {
    /// Create a new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self {
            arena: StableDiGraph::default(),
            index: HashMap::new(),
            generation: 0,
        }
    }

    /// Pre-allocate for a known graph size.
    #[must_use]
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            arena: StableDiGraph::with_capacity(vertices, edges),
            index: HashMap::with_capacity(vertices),
            generation: 0,
        }
    }

    /// Insert a vertex, replacing any vertex already stored under `id`.
    ///
    /// A replaced vertex is removed together with its edges; its payload is returned.
    pub fn add_vertex(&mut self, id: VertexId, data: T) -> Option<T> {
        let previous = self.remove_vertex(id).ok();
        self.insert_node(id, data);
        previous
    }

    /// Remove a vertex and detach every edge touching it from its neighbors
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<T> {
        let node = self.node(id)?;
        let vertex = &self.arena[node];
        let incident: Vec<EdgeId> = vertex
            .outgoing
            .iter()
            .chain(&vertex.incoming)
            .copied()
            .collect();
        for edge in incident {
            // self-loops are listed twice; the second detach is a no-op
            self.detach(edge);
        }
        self.index.remove(&id);
        self.arena
            .remove_node(node)
            .map(|vertex| vertex.data)
            .ok_or(GraphError::VertexNotFound(id))
    }

    /// Add an edge of weight [`DEFAULT_WEIGHT`]
    pub fn add_edge(&mut self, source: VertexId, sink: VertexId) -> Result<EdgeId> {
        self.add_weighted_edge(source, sink, DEFAULT_WEIGHT)
    }

    /// Add an edge, appending it to `source`'s outgoing and `sink`'s incoming lists
    pub fn add_weighted_edge(&mut self, source: VertexId, sink: VertexId, weight: f64) -> Result<EdgeId> {
        let from = self.node(source)?;
        let to = self.node(sink)?;
        Ok(self.connect(from, to, weight))
    }

    pub(crate) fn insert_node(&mut self, id: VertexId, data: T) -> NodeIndex {
        let node = self.arena.add_node(Vertex::new(id, data));
        self.index.insert(id, node);
        node
    }

    pub(crate) fn connect(&mut self, from: NodeIndex, to: NodeIndex, weight: f64) -> EdgeId {
        self.generation += 1;
        let generation = self.generation;
        let slot = self.arena.add_edge(
            from,
            to,
            Link {
                source: from,
                sink: to,
                weight,
                generation,
            },
        );
        let edge = EdgeId { slot, generation };
        self.arena[from].outgoing.push(edge);
        self.arena[to].incoming.push(edge);
        edge
    }

    /// Remove an edge from both endpoints
    pub fn remove_edge(&mut self, edge: EdgeId) -> Result<Edge> {
        let removed = self.edge(edge)?;
        self.detach(edge);
        Ok(removed)
    }

    fn detach(&mut self, edge: EdgeId) -> Option<Link> {
        self.live_mut(edge)?;
        let link = self.arena.remove_edge(edge.slot)?;
        self.arena[link.source].outgoing.retain(|e| *e != edge);
        self.arena[link.sink].incoming.retain(|e| *e != edge);
        Some(link)
    }

    /// Look up an edge
    pub fn edge(&self, edge: EdgeId) -> Result<Edge> {
        match self.arena.edge_weight(edge.slot) {
            Some(link) if link.generation == edge.generation => Ok(self.snapshot(edge)),
            _ => Err(GraphError::EdgeNotFound(edge)),
        }
    }

    /// Overwrite the weight of an edge
    pub fn set_weight(&mut self, edge: EdgeId, weight: f64) -> Result<()> {
        let link = self.live_mut(edge).ok_or(GraphError::EdgeNotFound(edge))?;
        link.weight = weight;
        Ok(())
    }

    /// Add one to the weight of an edge, returning the new weight
    pub fn increment_weight(&mut self, edge: EdgeId) -> Result<f64> {
        let link = self.live_mut(edge).ok_or(GraphError::EdgeNotFound(edge))?;
        link.weight += 1.0;
        Ok(link.weight)
    }

    fn live_mut(&mut self, edge: EdgeId) -> Option<&mut Link> {
        self.arena
            .edge_weight_mut(edge.slot)
            .filter(|link| link.generation == edge.generation)
    }

    /// Get a vertex by ID
    pub fn vertex(&self, id: VertexId) -> Result<&Vertex<T>> {
        self.node(id).map(|node| &self.arena[node])
    }

    /// Mutable access to a vertex payload
    pub fn data_mut(&mut self, id: VertexId) -> Result<&mut T> {
        let node = self.node(id)?;
        Ok(&mut self.arena[node].data)
    }

    /// Check if a vertex is stored under `id`
    #[must_use]
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.index.contains_key(&id)
    }

    /// All vertices, in arena order
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<T>> + '_ {
        self.arena.node_indices().map(move |node| &self.arena[node])
    }

    /// All vertex identifiers, in arena order
    #[must_use]
    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.vertices().map(Vertex::id).collect()
    }

    /// Every edge exactly once, grouped by source vertex
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        self.vertices()
            .flat_map(|vertex| vertex.outgoing.iter().map(|&edge| self.snapshot(edge)))
            .collect()
    }

    /// Edges leaving `id`, in insertion order
    pub fn outgoing(&self, id: VertexId) -> Result<Vec<Edge>> {
        let vertex = self.vertex(id)?;
        Ok(vertex.outgoing.iter().map(|&edge| self.snapshot(edge)).collect())
    }

    /// Edges entering `id`, in insertion order
    pub fn incoming(&self, id: VertexId) -> Result<Vec<Edge>> {
        let vertex = self.vertex(id)?;
        Ok(vertex.incoming.iter().map(|&edge| self.snapshot(edge)).collect())
    }

    /// Sinks of the edges leaving `id`
    pub fn neighbors(&self, id: VertexId) -> Result<Vec<VertexId>> {
        Ok(self.outgoing(id)?.into_iter().map(|edge| edge.sink).collect())
    }

    /// First edge from `source` to `sink`, if any
    pub fn find_edge(&self, source: VertexId, sink: VertexId) -> Result<Option<EdgeId>> {
        let from = self.node(source)?;
        let to = self.node(sink)?;
        Ok(self.arena[from]
            .outgoing
            .iter()
            .copied()
            .find(|&edge| self.arena[edge.slot].sink == to))
    }

    /// Get vertex count
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.arena.node_count()
    }

    /// Get edge count
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.arena.edge_count()
    }

    /// Check if the graph has no vertices
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arena.node_count() == 0
    }

    pub(crate) fn node(&self, id: VertexId) -> Result<NodeIndex> {
        self.index
            .get(&id)
            .copied()
            .ok_or(GraphError::VertexNotFound(id))
    }

    pub(crate) fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.arena.node_indices()
    }

    pub(crate) fn id_of(&self, node: NodeIndex) -> VertexId {
        self.arena[node].id
    }

    pub(crate) fn vertex_at(&self, node: NodeIndex) -> &Vertex<T> {
        &self.arena[node]
    }

    pub(crate) fn link(&self, edge: EdgeId) -> Link {
        self.arena[edge.slot]
    }

    pub(crate) fn snapshot(&self, edge: EdgeId) -> Edge {
        let link = self.link(edge);
        Edge {
            id: edge,
            source: self.id_of(link.source),
            sink: self.id_of(link.sink),
            weight: link.weight,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Graph<T> {
    /// One line per vertex: its payload, then outgoing and incoming edges as `source->sink`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for vertex in self.vertices() {
            write!(f, "Vertex {} ||| Edges:", vertex.data)?;
            for &edge in vertex.outgoing.iter().chain(&vertex.incoming) {
                let link = self.link(edge);
                write!(
                    f,
                    " {}->{}",
                    self.arena[link.source].data, self.arena[link.sink].data
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_triangle() -> Graph<&'static str> {
        let mut graph = Graph::new();
        graph.add_vertex(1, "a");
        graph.add_vertex(2, "b");
        graph.add_vertex(3, "c");
        graph.add_edge(1, 2).unwrap();
        graph.add_edge(2, 3).unwrap();
        graph.add_edge(3, 1).unwrap();
        graph
    }

    #[test]
    fn test_add_vertex() {
        let mut graph = Graph::new();
        assert!(graph.add_vertex(7, "seven").is_none());

        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(*graph.vertex(7).unwrap().data(), "seven");
        assert!(graph.contains_vertex(7));
    }

    #[test]
    fn test_add_vertex_replaces_existing() {
        let mut graph = make_triangle();
        let previous = graph.add_vertex(2, "b2");

        assert_eq!(previous, Some("b"));
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(*graph.vertex(2).unwrap().data(), "b2");
        // edges of the replaced vertex went with it
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.vertex(2).unwrap().outgoing().is_empty());
        assert!(graph.vertex(1).unwrap().outgoing().is_empty());
    }

    #[test]
    fn test_add_edge() {
        let graph = make_triangle();

        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.outgoing(1).unwrap().len(), 1);
        assert_eq!(graph.incoming(1).unwrap()[0].source, 3);
        assert_eq!(graph.neighbors(2).unwrap(), vec![3]);
        assert!(graph.edges().iter().all(|e| (e.weight - DEFAULT_WEIGHT).abs() < f64::EPSILON));
    }

    #[test]
    fn test_add_edge_unknown_vertex() {
        let mut graph = make_triangle();
        assert_eq!(graph.add_edge(1, 99), Err(GraphError::VertexNotFound(99)));
        assert_eq!(graph.add_edge(42, 1), Err(GraphError::VertexNotFound(42)));
    }

    #[test]
    fn test_incidence_order_is_insertion_order() {
        let mut graph = Graph::new();
        for id in 0..5 {
            graph.add_vertex(id, id);
        }
        graph.add_edge(0, 3).unwrap();
        graph.add_edge(0, 1).unwrap();
        graph.add_edge(0, 4).unwrap();
        graph.add_edge(0, 2).unwrap();

        assert_eq!(graph.neighbors(0).unwrap(), vec![3, 1, 4, 2]);
    }

    #[test]
    fn test_parallel_edges() {
        let mut graph = make_triangle();
        let second = graph.add_weighted_edge(1, 2, 5.0).unwrap();

        let out = graph.outgoing(1).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].id, second);
        assert_eq!(graph.edges().len(), 4);
    }

    #[test]
    fn test_remove_edge_detaches_both_endpoints() {
        let mut graph = make_triangle();
        let edge = graph.find_edge(1, 2).unwrap().unwrap();

        let removed = graph.remove_edge(edge).unwrap();

        assert_eq!((removed.source, removed.sink), (1, 2));
        assert!(graph.outgoing(1).unwrap().is_empty());
        assert!(graph.incoming(2).unwrap().is_empty());
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.remove_edge(edge), Err(GraphError::EdgeNotFound(edge)));
    }

    #[test]
    fn test_stale_edge_handle_after_slot_reuse() {
        let mut graph = Graph::new();
        for id in 1..=3 {
            graph.add_vertex(id, id);
        }
        let stale = graph.add_edge(1, 2).unwrap();
        graph.remove_edge(stale).unwrap();
        let fresh = graph.add_weighted_edge(2, 3, 4.0).unwrap();

        // the arena hands the freed slot to the new edge
        assert_eq!(fresh.index(), stale.index());
        assert_ne!(fresh, stale);
        assert_eq!(graph.edge(stale), Err(GraphError::EdgeNotFound(stale)));
        assert_eq!(graph.set_weight(stale, 9.0), Err(GraphError::EdgeNotFound(stale)));
        assert_eq!(graph.increment_weight(stale), Err(GraphError::EdgeNotFound(stale)));
        assert_eq!(graph.remove_edge(stale), Err(GraphError::EdgeNotFound(stale)));

        let survivor = graph.edge(fresh).unwrap();
        assert_eq!((survivor.source, survivor.sink), (2, 3));
        assert!((survivor.weight - 4.0).abs() < f64::EPSILON);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_remove_vertex_cascades() {
        let mut graph = make_triangle();

        assert_eq!(graph.remove_vertex(1), Ok("a"));

        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.incoming(2).unwrap().is_empty());
        assert!(graph.outgoing(3).unwrap().is_empty());
        assert_eq!(graph.remove_vertex(1), Err(GraphError::VertexNotFound(1)));
    }

    #[test]
    fn test_remove_vertex_with_self_loop() {
        let mut graph = make_triangle();
        graph.add_edge(2, 2).unwrap();

        graph.remove_vertex(2).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges()[0].source, 3);
    }

    #[test]
    fn test_weight_mutation() {
        let mut graph = make_triangle();
        let edge = graph.find_edge(2, 3).unwrap().unwrap();

        graph.set_weight(edge, 2.5).unwrap();
        assert_eq!(graph.increment_weight(edge), Ok(3.5));
        assert!((graph.edge(edge).unwrap().weight - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_find_edge_missing() {
        let graph = make_triangle();
        assert_eq!(graph.find_edge(1, 3), Ok(None));
    }

    #[test]
    fn test_data_mut() {
        let mut graph = make_triangle();
        *graph.data_mut(3).unwrap() = "z";
        assert_eq!(*graph.vertex(3).unwrap().data(), "z");
    }

    #[test]
    fn test_display() {
        let graph = make_triangle();

        insta::assert_snapshot!(graph.to_string(), @r"
        Vertex a ||| Edges: a->b c->a
        Vertex b ||| Edges: b->c a->b
        Vertex c ||| Edges: c->a b->c
        ");
    }

    #[test]
    fn test_display_isolated_vertex() {
        let mut graph = Graph::new();
        graph.add_vertex(1, "solo");
        assert_eq!(graph.to_string(), "Vertex solo ||| Edges:\n");
    }
}
