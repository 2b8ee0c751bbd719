//! Structured suggestions returned by intent handlers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A proposal the client may apply to its graph
///
/// Serialized with a `type` tag so clients can switch on the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Suggestion {
    /// Add a new node
    Node(NodeSuggestion),

    /// Add a new edge
    Connection(ConnectionSuggestion),

    /// Restructure existing content
    Organization {
        /// What to do
        action: OrganizationAction,
        /// Human-readable explanation
        description: String,
        /// Supporting numbers
        details: OrganizationDetails,
    },

    /// A concept worth adding, without a full node body
    Concept(ConceptSuggestion),

    /// An existing node label related to the subject under discussion
    Related {
        /// Label of the related node
        label: String,
    },

    /// A next step the client can offer the user
    Action(ActionSuggestion),
}

/// Proposed node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSuggestion {
    /// Node label
    pub label: String,
    /// Node description
    pub description: String,
    /// Node category
    pub category: String,
    /// Fixed relevance score in [0, 1]
    pub relevance_score: f64,
    /// Why the node was proposed
    pub reasoning: String,
}

/// Proposed edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSuggestion {
    /// Source label or id
    pub source: String,
    /// Target label or id
    pub target: String,
    /// Relationship name
    pub relationship: String,
    /// Fixed relevance score in [0, 1]
    pub relevance_score: f64,
    /// Why the edge was proposed
    pub reasoning: String,
}

/// Concept to add, carrying only a label and relevance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptSuggestion {
    /// Concept label
    pub label: String,
    /// Relevance in [0, 1]
    pub relevance: f64,
}

/// Menu entry pointing at another intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSuggestion {
    /// Action name
    pub action: String,
    /// What it does
    pub description: String,
    /// Client-side icon name
    pub icon: String,
}

/// Kinds of reorganization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationAction {
    /// Attach nodes that have no edges
    ConnectIsolated,
    /// Even out node counts across categories
    BalanceCategories,
}

/// Numbers backing an organization suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrganizationDetails {
    /// Isolated-node summary
    Isolated {
        /// Number of isolated nodes
        isolated_count: usize,
        /// Up to five of their ids
        nodes: Vec<String>,
    },
    /// Category distribution
    Categories {
        /// Node count per category
        categories: BTreeMap<String, usize>,
    },
}

impl Suggestion {
    /// The node body, when this is a node suggestion
    pub fn as_node(&self) -> Option<&NodeSuggestion> {
        match self {
            Suggestion::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Relevance score for suggestions that carry one
    pub fn relevance(&self) -> Option<f64> {
        match self {
            Suggestion::Node(node) => Some(node.relevance_score),
            Suggestion::Connection(conn) => Some(conn.relevance_score),
            Suggestion::Concept(concept) => Some(concept.relevance),
            _ => None,
        }
    }
}
