//! Graph state snapshots and their deltas

use serde::{Deserialize, Serialize};
use sophia_domain::GraphDocument;
use std::collections::{BTreeSet, HashSet};

/// Point-in-time summary of a graph document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,

    /// Label of the operation that triggered the snapshot
    pub operation: String,

    /// Number of nodes in the document
    pub node_count: usize,

    /// Number of links in the document
    pub edge_count: usize,

    /// Distinct node ids in document order
    pub nodes: Vec<String>,

    /// Change relative to the previous retained snapshot
    pub delta: SnapshotDelta,
}

/// Difference between a snapshot and its predecessor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SnapshotDelta {
    /// First snapshot of the session; nothing to compare against
    InitialState,

    /// Set difference against the previous snapshot
    Changes {
        /// Ids present now but not before, sorted
        added_nodes: Vec<String>,
        /// Ids present before but not now, sorted
        removed_nodes: Vec<String>,
        /// Distinct id count now minus distinct id count before
        node_count_delta: i64,
    },
}

impl GraphSnapshot {
    /// Summarise `graph` and diff it against `previous`
    pub fn capture(
        graph: &GraphDocument,
        operation: impl Into<String>,
        previous: Option<&GraphSnapshot>,
        timestamp: u64,
    ) -> Self {
        let mut seen = HashSet::new();
        let nodes: Vec<String> = graph
            .node_ids()
            .filter(|id| seen.insert(*id))
            .map(str::to_string)
            .collect();

        let delta = match previous {
            None => SnapshotDelta::InitialState,
            Some(previous) => SnapshotDelta::between(&previous.nodes, &nodes),
        };

        Self {
            timestamp,
            operation: operation.into(),
            node_count: graph.nodes.len(),
            edge_count: graph.links.len(),
            nodes,
            delta,
        }
    }
}

impl SnapshotDelta {
    /// Compute the change from `before` to `after`
    pub fn between(before: &[String], after: &[String]) -> Self {
        let before: BTreeSet<&str> = before.iter().map(String::as_str).collect();
        let after: BTreeSet<&str> = after.iter().map(String::as_str).collect();

        Self::Changes {
            added_nodes: after.difference(&before).map(|s| s.to_string()).collect(),
            removed_nodes: before.difference(&after).map(|s| s.to_string()).collect(),
            node_count_delta: after.len() as i64 - before.len() as i64,
        }
    }

    /// True for the first snapshot of a session
    pub fn is_initial(&self) -> bool {
        matches!(self, SnapshotDelta::InitialState)
    }
}
