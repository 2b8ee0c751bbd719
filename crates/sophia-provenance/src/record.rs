//! Provenance records and their append-only logs

use crate::quality::{average_rating, compute_quality_level, compute_quality_score};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sophia_domain::{ContentType, ProvenanceType, QualityLevel};

/// Who or what produced the content, and how confident it was
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Creation time (ms since epoch)
    pub created_at: u64,

    /// Time of the most recent change (ms since epoch)
    pub last_updated: u64,

    /// User who created or last edited the content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,

    /// Model that generated the content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_model: Option<String>,

    /// Generation confidence, clamped to [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,

    /// Why the content was generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,

    /// Last action a user took on the content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_user_action: Option<String>,

    /// External origin of imported content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// One step in a record's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageEntry {
    /// What happened, e.g. `ai_generation`
    pub action: String,
    /// When it happened (ms since epoch)
    pub timestamp: u64,
    /// Action-specific details
    pub details: Value,
}

/// A human judgement of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Reviewer identifier
    pub reviewer: String,
    /// Rating from 1 to 5
    pub rating: u8,
    /// Free-form notes
    pub notes: String,
    /// Review time (ms since epoch)
    pub timestamp: u64,
}

impl Review {
    /// Create a review
    pub fn new(
        reviewer: impl Into<String>,
        rating: u8,
        notes: impl Into<String>,
        timestamp: u64,
    ) -> Self {
        Self {
            reviewer: reviewer.into(),
            rating,
            notes: notes.into(),
            timestamp,
        }
    }
}

/// Audit entry for one piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceRecord {
    /// Content identifier
    pub content_id: String,
    /// What kind of content this is
    pub content_type: ContentType,
    /// How the content came to exist
    pub provenance_type: ProvenanceType,
    /// Review-derived quality
    pub quality_level: QualityLevel,
    /// Origin details
    pub metadata: RecordMetadata,
    lineage: Vec<LineageEntry>,
    reviews: Vec<Review>,
}

impl ProvenanceRecord {
    /// Create an unverified record with empty logs
    pub fn new(
        content_id: impl Into<String>,
        content_type: ContentType,
        provenance_type: ProvenanceType,
        now: u64,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            content_type,
            provenance_type,
            quality_level: QualityLevel::Unverified,
            metadata: RecordMetadata {
                created_at: now,
                last_updated: now,
                ..RecordMetadata::default()
            },
            lineage: Vec::new(),
            reviews: Vec::new(),
        }
    }

    /// History of actions, oldest first
    pub fn lineage(&self) -> &[LineageEntry] {
        &self.lineage
    }

    /// Reviews, oldest first
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Mean review rating, `None` without reviews
    pub fn average_rating(&self) -> Option<f64> {
        average_rating(&self.reviews)
    }

    /// Combined quality score in [0, 1]
    pub fn quality_score(&self) -> f64 {
        compute_quality_score(
            self.metadata.confidence_score,
            &self.reviews,
            self.quality_level,
        )
    }

    /// Record model, confidence, and reasoning for generated content
    ///
    /// A non-finite confidence is stored as absent.
    pub fn set_ai_metadata(
        &mut self,
        model: impl Into<String>,
        confidence: f64,
        reasoning: impl Into<String>,
        now: u64,
    ) {
        self.metadata.ai_model = Some(model.into());
        self.metadata.confidence_score = confidence.is_finite().then(|| confidence.clamp(0.0, 1.0));
        self.metadata.reasoning = Some(reasoning.into());
        self.metadata.last_updated = now;
    }

    /// Record the user responsible for the latest action
    pub fn set_user_metadata(&mut self, user_id: impl Into<String>, action: impl Into<String>, now: u64) {
        self.metadata.creator = Some(user_id.into());
        self.metadata.last_user_action = Some(action.into());
        self.metadata.last_updated = now;
    }

    /// Append to the lineage log
    pub fn add_to_lineage(&mut self, action: impl Into<String>, details: Value, now: u64) {
        self.lineage.push(LineageEntry {
            action: action.into(),
            timestamp: now,
            details,
        });
        self.metadata.last_updated = now;
    }

    /// Append a review and recompute the quality level from all reviews
    ///
    /// The rating must already be validated.
    pub(crate) fn push_review(&mut self, review: Review) -> QualityLevel {
        self.metadata.last_updated = review.timestamp;
        self.reviews.push(review);
        self.quality_level = compute_quality_level(&self.reviews);
        self.quality_level
    }

    /// Reset the quality level to what the review set implies
    pub(crate) fn recompute_quality(&mut self) {
        self.quality_level = compute_quality_level(&self.reviews);
    }
}
