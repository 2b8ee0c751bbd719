//! Provenance vocabulary shared by the ledger and its callers

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a piece of content came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvenanceType {
    /// Produced by the orchestrator without human input
    AiGenerated,
    /// Authored by a user
    UserCreated,
    /// Proposed by the orchestrator, accepted by a user
    AiSuggested,
    /// Edited by both a user and the orchestrator
    Collaborative,
    /// Brought in from an external source
    Imported,
}

impl ProvenanceType {
    /// Get the provenance name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProvenanceType::AiGenerated => "ai_generated",
            ProvenanceType::UserCreated => "user_created",
            ProvenanceType::AiSuggested => "ai_suggested",
            ProvenanceType::Collaborative => "collaborative",
            ProvenanceType::Imported => "imported",
        }
    }
}

impl fmt::Display for ProvenanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review-derived quality classification
///
/// Variants are declared in ascending order, so `Ord` matches quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    /// No review has vouched for it
    Unverified,
    /// At least one favourable review
    Reviewed,
    /// Several strongly favourable reviews
    Validated,
    /// Broad, near-perfect agreement
    ExpertApproved,
}

impl QualityLevel {
    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLevel::Unverified => "unverified",
            QualityLevel::Reviewed => "reviewed",
            QualityLevel::Validated => "validated",
            QualityLevel::ExpertApproved => "expert_approved",
        }
    }

    /// Contribution of this level to a record's quality score
    pub fn weight(&self) -> f64 {
        match self {
            QualityLevel::Unverified => 0.4,
            QualityLevel::Reviewed => 0.6,
            QualityLevel::Validated => 0.8,
            QualityLevel::ExpertApproved => 1.0,
        }
    }
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of content a provenance record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// A graph node
    Node,
    /// A graph edge
    Edge,
    /// An analysis text
    Analysis,
    /// A generated suggestion
    Suggestion,
    /// Anything the caller did not classify
    Unknown,
}

impl ContentType {
    /// Get the content type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Node => "node",
            ContentType::Edge => "edge",
            ContentType::Analysis => "analysis",
            ContentType::Suggestion => "suggestion",
            ContentType::Unknown => "unknown",
        }
    }

    /// Parse a content type; unrecognised names map to `Unknown`
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "node" => ContentType::Node,
            "edge" | "connection" | "link" => ContentType::Edge,
            "analysis" => ContentType::Analysis,
            "suggestion" => ContentType::Suggestion,
            _ => ContentType::Unknown,
        }
    }
}
