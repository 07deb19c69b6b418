// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod analyze;
pub mod completions;
pub mod config;
pub mod likes;
pub mod path;
pub mod show;
pub mod who;

use crate::graph::{Edge, VertexId};
use crate::social::SocialGraph;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::Path;

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Output {
    /// Emit JSON documents instead of text
    pub json: bool,
    /// Color headings in text output
    pub color: bool,
}

impl Output {
    /// Format a section heading
    #[must_use]
    pub fn heading(self, text: &str) -> String {
        if self.color {
            text.bold().underline().to_string()
        } else {
            text.to_string()
        }
    }

    /// Print a value as pretty JSON on stdout
    pub fn print_json<T: Serialize>(self, value: &T) -> Result<()> {
        let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{rendered}");
        Ok(())
    }
}

/// A resolved start-to-end path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathReport {
    /// First vertex
    pub from: VertexId,
    /// Last vertex
    pub to: VertexId,
    /// Vertices visited, `from` first
    pub vertices: Vec<VertexId>,
    /// Sum of edge weights
    pub cost: f64,
}

impl PathReport {
    /// Build from edges ordered end to start, as cheapest-path search returns them
    #[must_use]
    pub fn from_reversed(from: VertexId, to: VertexId, reversed: &[Edge]) -> Self {
        let mut vertices = Vec::with_capacity(reversed.len() + 1);
        vertices.push(from);
        vertices.extend(reversed.iter().rev().map(|edge| edge.sink));
        Self {
            from,
            to,
            vertices,
            cost: reversed.iter().map(|edge| edge.weight).sum(),
        }
    }

    /// `1 -> 2 -> 4`
    #[must_use]
    pub fn route(&self) -> String {
        self.vertices
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

pub(crate) fn load(path: &Path) -> Result<SocialGraph> {
    SocialGraph::load(path).with_context(|| format!("Failed to load social graph from {}", path.display()))
}
