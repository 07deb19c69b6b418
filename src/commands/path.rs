// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Path command - cheapest weighted route between two accounts

use super::{load, Output, PathReport};
use crate::graph::VertexId;
use anyhow::Result;
use std::path::Path;

/// Run the path command
pub fn run(file: &Path, from: VertexId, to: VertexId, output: Output) -> Result<()> {
    let social = load(file)?;
    let edges = social.graph().shortest_path(from, to)?;
    let report = PathReport::from_reversed(from, to, &edges);

    if output.json {
        return output.print_json(&report);
    }
    println!("{}", output.heading(&format!("Path {from} -> {to}")));
    println!("  {}", report.route());
    println!("  cost: {}", report.cost);
    Ok(())
}
