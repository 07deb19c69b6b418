// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Who command - one account and its neighbourhood

use super::{load, Output};
use crate::graph::VertexId;
use crate::social::SocialGraph;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct Account {
    id: VertexId,
    name: String,
    follows: Vec<VertexId>,
    followers: Vec<VertexId>,
}

fn describe(social: &SocialGraph, ids: &[VertexId]) -> Result<String> {
    if ids.is_empty() {
        return Ok("(none)".to_string());
    }
    let names = ids
        .iter()
        .map(|&id| Ok(format!("{} ({id})", social.name(id)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(names.join(", "))
}

/// Run the who command
pub fn run(file: &Path, id: VertexId, output: Output) -> Result<()> {
    let social = load(file)?;
    let account = Account {
        id,
        name: social.name(id)?.to_string(),
        follows: social.follows(id)?,
        followers: social.followers(id)?,
    };

    if output.json {
        return output.print_json(&account);
    }
    println!("{}", output.heading(&format!("{} ({})", account.name, account.id)));
    println!("  follows:   {}", describe(&social, &account.follows)?);
    println!("  followers: {}", describe(&social, &account.followers)?);
    Ok(())
}
