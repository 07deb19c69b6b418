// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Sociograph library - weighted directed graphs and their analysis
//!
//! This crate provides a generic graph keyed by caller-chosen vertex ids,
//! cheapest-path and exhaustive-path search, betweenness centrality,
//! spanning trees, hop-count diameter and a loader for follower networks.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algo;
pub mod commands;
pub mod config;
pub mod error;
pub mod graph;
pub mod social;

pub use algo::{AllPaths, Path, ShortestPathTree, TreeKind};
pub use error::{GraphError, Result};
pub use graph::{Edge, EdgeId, Graph, Vertex, VertexId, DEFAULT_WEIGHT};
pub use social::{LoadError, SocialGraph};
