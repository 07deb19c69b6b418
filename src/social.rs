// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Social-network loader: accounts, follows and likes
//!
//! The input holds one record per account, four lines each:
//!
//! ```text
//! 1            account id
//! alice        display name
//! 2,3          accounts followed (comma separated, may be empty)
//! 2,2          accounts liked (comma separated, may be empty)
//! ```
//!
//! Every follow becomes an edge of weight 1 and every like of a followed
//! account adds one to that edge's weight.

use crate::error::GraphError;
use crate::graph::{Graph, VertexId};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const LINES_PER_RECORD: usize = 4;

/// Kind of relation listed in a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Account follows another account
    Follows,
    /// Account liked content of another account
    Likes,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Follows => f.write_str("follows"),
            Self::Likes => f.write_str("likes"),
        }
    }
}

/// Errors raised while reading social-network data
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input file could not be read
    #[error("failed to read {}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An account id is not a 64-bit integer
    #[error("line {line}: invalid account id {value:?}")]
    InvalidId {
        /// 1-based line number
        line: usize,
        /// Offending text
        value: String,
    },

    /// The input ended in the middle of a record
    #[error("line {line}: record ends before the account name")]
    Truncated {
        /// 1-based line number where the name was expected
        line: usize,
    },

    /// A relation names an account with no record
    #[error("line {line}: account {from} {relation} unknown account {to}")]
    DanglingReference {
        /// 1-based line number of the relation list
        line: usize,
        /// Account holding the relation
        from: VertexId,
        /// Unknown account
        to: VertexId,
        /// Relation kind
        relation: Relation,
    },

    /// Graph construction failed
    #[error(transparent)]
    Graph(#[from] GraphError),
}

#[derive(Debug)]
struct Record {
    line: usize,
    id: VertexId,
    name: String,
    follows: Vec<VertexId>,
    likes: Vec<VertexId>,
}

fn parse_id(text: &str, line: usize) -> Result<VertexId, LoadError> {
    let text = text.trim();
    text.parse().map_err(|_| LoadError::InvalidId {
        line,
        value: text.to_string(),
    })
}

fn parse_list(text: &str, line: usize) -> Result<Vec<VertexId>, LoadError> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| parse_id(item, line))
        .collect()
}

fn parse_records(input: &str) -> Result<Vec<Record>, LoadError> {
    let lines: Vec<&str> = input.lines().collect();
    let mut records = Vec::with_capacity(lines.len() / LINES_PER_RECORD + 1);

    for (position, chunk) in lines.chunks(LINES_PER_RECORD).enumerate() {
        if chunk.iter().all(|text| text.trim().is_empty()) {
            continue;
        }
        let line = position * LINES_PER_RECORD + 1;
        let id = parse_id(chunk[0], line)?;
        let name = chunk
            .get(1)
            .ok_or(LoadError::Truncated { line: line + 1 })?
            .trim()
            .to_string();
        // relation lines missing at the very end of input count as empty
        let follows = parse_list(chunk.get(2).copied().unwrap_or_default(), line + 2)?;
        let likes = parse_list(chunk.get(3).copied().unwrap_or_default(), line + 3)?;
        records.push(Record {
            line,
            id,
            name,
            follows,
            likes,
        });
    }
    Ok(records)
}

/// A follower graph: accounts are vertices named by display name, follows are edges
#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    graph: Graph<String>,
}

impl SocialGraph {
    /// Load a social graph from a file
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let social = Self::parse(&content)?;
        debug!(
            "Loaded {} accounts and {} follows from {}",
            social.graph.vertex_count(),
            social.graph.edge_count(),
            path.display()
        );
        Ok(social)
    }

    /// Build a social graph from record text
    pub fn parse(input: &str) -> Result<Self, LoadError> {
        let records = parse_records(input)?;
        let follow_count = records.iter().map(|r| r.follows.len()).sum();
        let mut graph = Graph::with_capacity(records.len(), follow_count);

        let mut latest: HashMap<VertexId, usize> = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if let Some(earlier) = latest.insert(record.id, position) {
                warn!(
                    "Account {} on line {} replaces the record on line {}",
                    record.id, record.line, records[earlier].line
                );
            }
            graph.add_vertex(record.id, record.name.clone());
        }

        let current = records
            .iter()
            .enumerate()
            .filter(|(position, record)| latest[&record.id] == *position)
            .map(|(_, record)| record);
        for record in current {
            for &target in &record.follows {
                if !graph.contains_vertex(target) {
                    return Err(LoadError::DanglingReference {
                        line: record.line + 2,
                        from: record.id,
                        to: target,
                        relation: Relation::Follows,
                    });
                }
                graph.add_edge(record.id, target)?;
            }

            for &target in &record.likes {
                if !graph.contains_vertex(target) {
                    return Err(LoadError::DanglingReference {
                        line: record.line + 3,
                        from: record.id,
                        to: target,
                        relation: Relation::Likes,
                    });
                }
                let follows: Vec<_> = graph
                    .outgoing(record.id)?
                    .into_iter()
                    .filter(|edge| edge.sink == target)
                    .map(|edge| edge.id)
                    .collect();
                if follows.is_empty() {
                    debug!("Dropping like {} -> {}: not followed", record.id, target);
                }
                for edge in follows {
                    graph.increment_weight(edge)?;
                }
            }
        }

        Ok(Self { graph })
    }

    /// Underlying graph
    #[must_use]
    pub fn graph(&self) -> &Graph<String> {
        &self.graph
    }

    /// Take ownership of the underlying graph
    #[must_use]
    pub fn into_graph(self) -> Graph<String> {
        self.graph
    }

    /// All account ids, in load order
    #[must_use]
    pub fn ids(&self) -> Vec<VertexId> {
        self.graph.vertex_ids()
    }

    /// Display name of an account
    pub fn name(&self, id: VertexId) -> Result<&str, GraphError> {
        self.graph.vertex(id).map(|vertex| vertex.data().as_str())
    }

    /// Accounts `id` follows
    pub fn follows(&self, id: VertexId) -> Result<Vec<VertexId>, GraphError> {
        self.graph.neighbors(id)
    }

    /// Accounts following `id`
    pub fn followers(&self, id: VertexId) -> Result<Vec<VertexId>, GraphError> {
        Ok(self
            .graph
            .incoming(id)?
            .into_iter()
            .map(|edge| edge.source)
            .collect())
    }

    /// Number of times `from` liked `to`; zero unless `from` follows `to`
    pub fn likes(&self, from: VertexId, to: VertexId) -> Result<u32, GraphError> {
        let Some(edge) = self.graph.find_edge(from, to)? else {
            return Ok(0);
        };
        let weight = self.graph.edge(edge)?.weight;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok((weight - 1.0).max(0.0).round() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
1
alice
2,3
2,2,3
2
bob
3

3
carol
1
2
";

    #[test]
    fn test_parse_sample() {
        let social = SocialGraph::parse(SAMPLE).unwrap();

        assert_eq!(social.ids(), vec![1, 2, 3]);
        assert_eq!(social.name(2), Ok("bob"));
        assert_eq!(social.follows(1), Ok(vec![2, 3]));
        assert_eq!(social.followers(3), Ok(vec![1, 2]));
        assert_eq!(social.graph().edge_count(), 4);
    }

    #[test]
    fn test_likes_increment_follow_weight() {
        let social = SocialGraph::parse(SAMPLE).unwrap();

        assert_eq!(social.likes(1, 2), Ok(2));
        assert_eq!(social.likes(1, 3), Ok(1));
        assert_eq!(social.likes(2, 3), Ok(0));
    }

    #[test]
    fn test_like_without_follow_is_dropped() {
        let social = SocialGraph::parse(SAMPLE).unwrap();

        // carol likes bob but does not follow him
        assert_eq!(social.likes(3, 2), Ok(0));
        assert!(social.graph().find_edge(3, 2).unwrap().is_none());
    }

    #[test]
    fn test_unknown_account_queries() {
        let social = SocialGraph::parse(SAMPLE).unwrap();

        assert_eq!(social.name(42), Err(GraphError::VertexNotFound(42)));
        assert_eq!(social.follows(42), Err(GraphError::VertexNotFound(42)));
        assert_eq!(social.likes(42, 1), Err(GraphError::VertexNotFound(42)));
    }

    #[test]
    fn test_dangling_follow() {
        let err = SocialGraph::parse("1\nalice\n7\n\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::DanglingReference {
                line: 3,
                from: 1,
                to: 7,
                relation: Relation::Follows
            }
        ));
    }

    #[test]
    fn test_dangling_like() {
        let err = SocialGraph::parse("1\nalice\n\n8\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::DanglingReference {
                line: 4,
                to: 8,
                relation: Relation::Likes,
                ..
            }
        ));
        assert_eq!(err.to_string(), "line 4: account 1 likes unknown account 8");
    }

    #[test]
    fn test_invalid_id() {
        let err = SocialGraph::parse("1\nalice\n2,x\n\n2\nbob\n\n\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidId { line: 3, ref value } if value == "x"));
    }

    #[test]
    fn test_truncated_record() {
        let err = SocialGraph::parse("1\nalice\n\n\n2").unwrap_err();
        assert!(matches!(err, LoadError::Truncated { line: 6 }));
    }

    #[test]
    fn test_missing_trailing_relations() {
        let social = SocialGraph::parse("1\nalice\n2\n\n2\nbob").unwrap();
        assert_eq!(social.follows(1), Ok(vec![2]));
        assert_eq!(social.follows(2), Ok(vec![]));
    }

    #[test]
    fn test_trailing_blank_lines() {
        let input = format!("{SAMPLE}\n\n");
        assert_eq!(SocialGraph::parse(&input).unwrap().ids().len(), 3);
    }

    #[test]
    fn test_duplicate_id_later_record_wins() {
        let social = SocialGraph::parse("1\nalice\n2\n\n2\nbob\n\n\n1\nalicia\n\n\n").unwrap();

        assert_eq!(social.name(1), Ok("alicia"));
        assert_eq!(social.follows(1), Ok(vec![]));
        assert_eq!(social.ids().len(), 2);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let social = SocialGraph::load(file.path()).unwrap();
        assert_eq!(social.ids().len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SocialGraph::load(Path::new("/nonexistent/sociograph.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
