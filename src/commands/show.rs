// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Show command - prints the loaded graph

use super::{load, Output};
use crate::graph::{Edge, VertexId};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
struct VertexEntry<'a> {
    id: VertexId,
    name: &'a str,
}

#[derive(Serialize)]
struct GraphDocument<'a> {
    vertices: Vec<VertexEntry<'a>>,
    edges: Vec<Edge>,
}

/// Run the show command
pub fn run(file: &Path, undirected: bool, output: Output) -> Result<()> {
    let social = load(file)?;
    let graph = if undirected {
        info!("Rendering undirected form");
        social.graph().make_undirected()
    } else {
        social.into_graph()
    };

    if output.json {
        let document = GraphDocument {
            vertices: graph
                .vertices()
                .map(|vertex| VertexEntry {
                    id: vertex.id(),
                    name: vertex.data(),
                })
                .collect(),
            edges: graph.edges(),
        };
        return output.print_json(&document);
    }
    print!("{graph}");
    Ok(())
}
