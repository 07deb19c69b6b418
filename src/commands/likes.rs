// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Likes command - like counts between two accounts

use super::{load, Output};
use crate::graph::VertexId;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct LikesReport {
    from: VertexId,
    to: VertexId,
    likes: u32,
}

/// Print how often one account liked another
pub fn run(file: &Path, from: VertexId, to: VertexId, output: Output) -> Result<()> {
    let social = load(file)?;
    let likes = social.likes(from, to)?;

    if output.json {
        return output.print_json(&LikesReport { from, to, likes });
    }
    println!("{} liked {} {} time(s)", social.name(from)?, social.name(to)?, likes);
    Ok(())
}
