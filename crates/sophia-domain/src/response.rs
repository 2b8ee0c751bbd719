//! Handler responses
//!
//! A [`Response`] always carries the classified intent, a message, and the
//! ordered suggestion and action lists. Intent-specific data lives in the
//! [`Payload`] variant, which is flattened into the same JSON object under a
//! `kind` tag.

use crate::intent::Intent;
use crate::suggestion::{ConceptSuggestion, Suggestion};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The result of handling one utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Intent the utterance was classified as
    pub intent: Intent,

    /// Text shown to the user
    pub message: String,

    /// Ordered suggestions
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,

    /// Ordered next-step labels
    #[serde(default)]
    pub actions: Vec<String>,

    /// Intent-specific data
    #[serde(flatten)]
    pub payload: Payload,
}

/// Intent-specific response data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    /// Brainstorm topic
    Topic {
        /// Extracted topic
        topic: String,
    },
    /// Structural analysis of the supplied graph
    Structure {
        /// Computed structure
        analysis: StructureAnalysis,
    },
    /// Explanation of a subject
    Analysis {
        /// Subject analysis
        analysis: SubjectAnalysis,
    },
    /// Node chosen for expansion
    Target {
        /// Target label
        target: String,
    },
    /// Concepts found in the utterance
    Concepts {
        /// Up to five concept tokens
        concepts: Vec<String>,
    },
    /// Generated prose
    Writing {
        /// The text and its follow-ups
        writing: Writing,
    },
    /// Graph quality evaluation
    Evaluation {
        /// Evaluation result
        evaluation: Evaluation,
    },
    /// Search results
    Search {
        /// Query that was run
        query: String,
        /// Matching nodes in document order
        results: Vec<SearchHit>,
    },
    /// Capability listing
    Capabilities,
    /// The handler needs a graph document and none was supplied
    NoGraphData,
    /// The request failed; state already written is kept
    Error {
        /// Failure description
        error: String,
    },
}

/// Structure of a graph document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureAnalysis {
    /// Number of nodes
    pub node_count: usize,
    /// Number of links
    pub edge_count: usize,
    /// Node count per category
    pub categories: BTreeMap<String, usize>,
    /// Endpoint count per id appearing in any link
    pub degrees: BTreeMap<String, usize>,
    /// Mean degree over ids that appear in at least one link
    pub avg_connections: f64,
    /// Ids of nodes that appear in no link, in document order
    pub isolated_nodes: Vec<String>,
}

/// Explanation of a single subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectAnalysis {
    /// Subject extracted from the utterance
    pub subject: String,
    /// Explanatory text
    pub explanation: String,
    /// Fixed key themes
    pub key_themes: Vec<String>,
    /// Labels of related graph nodes (at most five)
    pub related_concepts: Vec<String>,
    /// Fixed thinker lineage
    pub philosophical_lineage: Vec<String>,
}

/// Generated prose about a topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Writing {
    /// Topic written about
    pub topic: String,
    /// The text
    pub content: String,
    /// Whitespace-separated word count of `content`
    pub word_count: usize,
    /// Follow-up concepts
    pub concepts_to_add: Vec<ConceptSuggestion>,
}

/// Weighted quality evaluation of a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Score in [0, 1]
    pub quality_score: f64,
    /// One-line summary
    pub summary: String,
    /// What the graph does well
    pub strengths: Vec<String>,
    /// What it lacks
    pub issues: Vec<String>,
    /// Suggested fixes
    pub improvements: Vec<Suggestion>,
}

/// A node matching a search query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Node id
    pub id: String,
    /// Node label
    pub label: String,
    /// Node description, empty when absent
    pub description: String,
    /// Node category, empty when absent
    pub category: String,
}

impl Response {
    /// Create a response with no suggestions, actions, or payload data
    pub fn new(intent: Intent, message: impl Into<String>, payload: Payload) -> Self {
        Self {
            intent,
            message: message.into(),
            suggestions: Vec::new(),
            actions: Vec::new(),
            payload,
        }
    }

    /// Set the suggestions
    pub fn with_suggestions(mut self, suggestions: Vec<Suggestion>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Set the action labels
    pub fn with_actions(mut self, actions: &[&str]) -> Self {
        self.actions = actions.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Response asking the caller to supply a graph document
    pub fn no_graph_data(intent: Intent, message: impl Into<String>) -> Self {
        Self::new(intent, message, Payload::NoGraphData).with_actions(&["provide_graph_data"])
    }

    /// Response reporting a failed request
    pub fn error(intent: Intent, error: impl Into<String>) -> Self {
        let error = error.into();
        Self::new(
            intent,
            format!("Something went wrong while handling that request: {}", error),
            Payload::Error { error },
        )
    }

    /// True when the handler could not proceed without a graph document
    pub fn is_no_graph_data(&self) -> bool {
        matches!(self.payload, Payload::NoGraphData)
    }

    /// True when the request failed
    pub fn is_error(&self) -> bool {
        matches!(self.payload, Payload::Error { .. })
    }
}
