// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Analyze command - runs every graph analysis over a social network

use super::{load, Output, PathReport};
use crate::algo::TreeKind;
use crate::error::GraphError;
use crate::graph::{Edge, VertexId};
use crate::social::SocialGraph;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// Total weight and edges of a spanning tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeReport {
    /// Sum of edge weights
    pub weight: f64,
    /// Tree edges
    pub edges: Vec<Edge>,
}

/// Betweenness of one account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Centrality {
    /// Account id
    pub id: VertexId,
    /// Display name
    pub name: String,
    /// Fraction of multi-hop cheapest paths passing through the account
    pub betweenness: f64,
}

/// Everything the analyze command reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Number of accounts
    pub vertices: usize,
    /// Number of follows
    pub edges: usize,
    /// Cheapest route between the chosen endpoints, if any
    pub shortest_path: Option<PathReport>,
    /// Minimum spanning tree of the undirected form; `None` when not connected
    pub min_spanning_tree: Option<TreeReport>,
    /// Maximum spanning tree of the undirected form; `None` when not connected
    pub max_spanning_tree: Option<TreeReport>,
    /// Longest hop distance between reachable pairs
    pub diameter: usize,
    /// `None` when the graph is too large for exhaustive enumeration
    pub singly_connected: Option<bool>,
    /// `None` when skipped or undefined for this graph
    pub betweenness: Option<Vec<Centrality>>,
}

fn spanning_tree(social: &SocialGraph, kind: TreeKind) -> Result<Option<TreeReport>> {
    match social.graph().make_undirected().spanning_tree(kind) {
        Ok(edges) => Ok(Some(TreeReport {
            weight: edges.iter().map(|edge| edge.weight).sum(),
            edges,
        })),
        Err(GraphError::GraphNotConnected { vertex }) => {
            info!("No {:?} spanning tree: account {} is unreachable", kind, vertex);
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

fn shortest_path(social: &SocialGraph, from: VertexId, to: VertexId) -> Result<Option<PathReport>> {
    match social.graph().shortest_path(from, to) {
        Ok(edges) => Ok(Some(PathReport::from_reversed(from, to, &edges))),
        Err(GraphError::NoPathExists { .. }) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn centralities(social: &SocialGraph) -> Result<Option<Vec<Centrality>>> {
    let values = match social.graph().betweenness_centralities() {
        Ok(values) => values,
        Err(GraphError::InsufficientGraphSize { vertices, paths }) => {
            info!(
                "Betweenness undefined: {} accounts, {} connected pairs",
                vertices, paths
            );
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    values
        .into_iter()
        .map(|(id, betweenness)| {
            Ok(Centrality {
                id,
                name: social.name(id)?.to_string(),
                betweenness,
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Run all analyses.
///
/// Without explicit endpoints the shortest path runs between the first two
/// accounts. Analyses that enumerate every path are skipped on graphs with
/// more than `max_exhaustive` accounts.
pub fn analyze(
    social: &SocialGraph,
    endpoints: Option<(VertexId, VertexId)>,
    max_exhaustive: usize,
) -> Result<Analysis> {
    let graph = social.graph();
    let endpoints = endpoints.or_else(|| match social.ids().as_slice() {
        [first, second, ..] => Some((*first, *second)),
        _ => None,
    });

    let exhaustive = graph.vertex_count() <= max_exhaustive;
    if !exhaustive {
        warn!(
            "Skipping path enumeration: {} accounts exceed the limit of {}",
            graph.vertex_count(),
            max_exhaustive
        );
    }

    Ok(Analysis {
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        shortest_path: match endpoints {
            Some((from, to)) => shortest_path(social, from, to)?,
            None => None,
        },
        min_spanning_tree: spanning_tree(social, TreeKind::Minimum)?,
        max_spanning_tree: spanning_tree(social, TreeKind::Maximum)?,
        diameter: graph.graph_diameter(),
        singly_connected: exhaustive.then(|| graph.is_singly_connected()),
        betweenness: if exhaustive { centralities(social)? } else { None },
    })
}

fn print_tree(output: Output, title: &str, tree: Option<&TreeReport>) {
    println!("{}", output.heading(title));
    match tree {
        Some(tree) => {
            let edges: Vec<String> = tree
                .edges
                .iter()
                .map(|edge| format!("{}-{}", edge.source, edge.sink))
                .collect();
            println!("  weight {}: {}", tree.weight, edges.join(" "));
        }
        None => println!("  not connected"),
    }
}

fn print_text(analysis: &Analysis, output: Output) {
    println!("{}", output.heading("Graph"));
    println!("  accounts: {}", analysis.vertices);
    println!("  follows:  {}", analysis.edges);

    println!("{}", output.heading("Shortest path"));
    match &analysis.shortest_path {
        Some(path) => println!("  {} (cost {})", path.route(), path.cost),
        None => println!("  none"),
    }

    print_tree(output, "Minimum spanning tree", analysis.min_spanning_tree.as_ref());
    print_tree(output, "Maximum spanning tree", analysis.max_spanning_tree.as_ref());

    println!("{}", output.heading("Diameter"));
    println!("  {}", analysis.diameter);

    println!("{}", output.heading("Singly connected"));
    match analysis.singly_connected {
        Some(verdict) => println!("  {}", if verdict { "yes" } else { "no" }),
        None => println!("  skipped"),
    }

    println!("{}", output.heading("Betweenness"));
    match &analysis.betweenness {
        Some(values) => {
            for value in values {
                println!("  {:>4} {:<16} {:.3}", value.id, value.name, value.betweenness);
            }
        }
        None => println!("  skipped"),
    }
}

/// Run the analyze command
pub fn run(
    file: &Path,
    endpoints: Option<(VertexId, VertexId)>,
    max_exhaustive: usize,
    output: Output,
) -> Result<()> {
    let social = load(file)?;
    let analysis = analyze(&social, endpoints, max_exhaustive)?;

    if output.json {
        return output.print_json(&analysis);
    }
    print_text(&analysis, output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1 <-> 2 <-> 3, with 1 liking 2 twice
    const CHAIN: &str = "1\nann\n2\n2,2\n2\nbea\n1,3\n\n3\ncai\n2\n\n";

    #[test]
    fn test_analyze_chain() {
        let social = SocialGraph::parse(CHAIN).unwrap();
        let analysis = analyze(&social, None, 12).unwrap();

        assert_eq!(analysis.vertices, 3);
        assert_eq!(analysis.edges, 4);
        assert_eq!(analysis.shortest_path.as_ref().map(|p| p.cost), Some(3.0));
        assert_eq!(analysis.min_spanning_tree.as_ref().map(|t| t.edges.len()), Some(2));
        assert_eq!(analysis.diameter, 2);
        assert_eq!(analysis.singly_connected, Some(false));

        let middle = analysis
            .betweenness
            .unwrap()
            .into_iter()
            .find(|c| c.id == 2)
            .unwrap();
        assert!((middle.betweenness - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_exhaustive_analyses_skipped_above_limit() {
        let social = SocialGraph::parse(CHAIN).unwrap();
        let analysis = analyze(&social, Some((3, 1)), 2).unwrap();

        assert_eq!(analysis.singly_connected, None);
        assert_eq!(analysis.betweenness, None);
        assert_eq!(analysis.shortest_path.map(|p| p.vertices), Some(vec![3, 2, 1]));
    }

    #[test]
    fn test_disconnected_network() {
        let social = SocialGraph::parse("1\nann\n\n\n2\nbea\n\n\n").unwrap();
        let analysis = analyze(&social, None, 12).unwrap();

        assert!(analysis.shortest_path.is_none());
        assert!(analysis.min_spanning_tree.is_none());
        assert!(analysis.max_spanning_tree.is_none());
        assert_eq!(analysis.diameter, 0);
        assert_eq!(analysis.betweenness, None);
    }
}
