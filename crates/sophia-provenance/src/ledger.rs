//! The process-wide provenance ledger

use crate::error::LedgerError;
use crate::record::{ProvenanceRecord, Review};
use crate::stats::ProvenanceStats;
use parking_lot::Mutex;
use serde_json::{json, Value};
use sophia_domain::{current_timestamp_ms, ContentType, ProvenanceType, QualityLevel};
use std::collections::HashMap;
use tracing::{debug, info};

const MIN_RATING: u8 = 1;
const MAX_RATING: u8 = 5;

/// Mapping from content id to provenance record
///
/// Independent of sessions. Every operation runs under one internal lock,
/// so a review append and its quality recomputation are never interleaved
/// with another writer.
#[derive(Debug, Default)]
pub struct ProvenanceLedger {
    records: Mutex<HashMap<String, ProvenanceRecord>>,
}

impl ProvenanceLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch or create the record for `content_id` and apply `update` to it
    fn upsert(
        &self,
        content_id: &str,
        content_type: ContentType,
        provenance_type: ProvenanceType,
        update: impl FnOnce(&mut ProvenanceRecord, u64),
    ) {
        let now = current_timestamp_ms();
        let mut records = self.records.lock();
        let record = records
            .entry(content_id.to_string())
            .or_insert_with(|| ProvenanceRecord::new(content_id, content_type, provenance_type, now));

        record.content_type = content_type;
        record.provenance_type = provenance_type;
        update(record, now);
    }

    /// Record content generated by a model
    ///
    /// Re-tracking an existing id switches it to `ai_generated` and resets
    /// the quality level to what its reviews imply; lineage and reviews stay.
    pub fn track_ai_content(
        &self,
        content_id: &str,
        content_type: ContentType,
        model: &str,
        confidence: f64,
        reasoning: &str,
    ) {
        self.upsert(content_id, content_type, ProvenanceType::AiGenerated, |record, now| {
            record.recompute_quality();
            record.set_ai_metadata(model, confidence, reasoning, now);
            record.add_to_lineage(
                "ai_generation",
                json!({ "model": model, "confidence": confidence, "reasoning": reasoning }),
                now,
            );
        });
        debug!(content_id, model, "Tracked AI content");
    }

    /// Record content authored by a user; it starts out `reviewed`
    pub fn track_user_content(
        &self,
        content_id: &str,
        content_type: ContentType,
        user_id: &str,
        action: &str,
    ) {
        self.upsert(content_id, content_type, ProvenanceType::UserCreated, |record, now| {
            record.quality_level = QualityLevel::Reviewed;
            record.set_user_metadata(user_id, action, now);
            record.add_to_lineage(
                "user_creation",
                json!({ "user_id": user_id, "action": action }),
                now,
            );
        });
        debug!(content_id, user_id, "Tracked user content");
    }

    /// Record a model proposal that a user accepted
    pub fn track_suggested_content(
        &self,
        content_id: &str,
        content_type: ContentType,
        model: &str,
        confidence: f64,
        accepted_by: &str,
    ) {
        self.upsert(content_id, content_type, ProvenanceType::AiSuggested, |record, now| {
            record.recompute_quality();
            record.set_ai_metadata(model, confidence, "accepted suggestion", now);
            record.set_user_metadata(accepted_by, "accept_suggestion", now);
            record.add_to_lineage(
                "suggestion_accepted",
                json!({ "model": model, "user_id": accepted_by }),
                now,
            );
        });
        debug!(content_id, accepted_by, "Tracked accepted suggestion");
    }

    /// Record content brought in from an external source
    pub fn track_imported_content(&self, content_id: &str, content_type: ContentType, source: &str) {
        self.upsert(content_id, content_type, ProvenanceType::Imported, |record, now| {
            record.recompute_quality();
            record.metadata.source = Some(source.to_string());
            record.add_to_lineage("import", json!({ "source": source }), now);
        });
        debug!(content_id, source, "Tracked imported content");
    }

    /// Record an edit made jointly by a user and a model
    ///
    /// A new record takes its content type from `details.content_type`,
    /// falling back to `unknown`. An existing record keeps its content type
    /// and quality level.
    pub fn track_collaborative_edit(&self, content_id: &str, user_id: &str, model: &str, details: Value) {
        let now = current_timestamp_ms();
        let mut records = self.records.lock();
        let record = records.entry(content_id.to_string()).or_insert_with(|| {
            let content_type = details
                .get("content_type")
                .and_then(Value::as_str)
                .map(ContentType::parse)
                .unwrap_or(ContentType::Unknown);
            ProvenanceRecord::new(content_id, content_type, ProvenanceType::Collaborative, now)
        });

        record.provenance_type = ProvenanceType::Collaborative;
        record.metadata.creator = Some(user_id.to_string());
        record.add_to_lineage(
            "collaborative_edit",
            json!({ "user_id": user_id, "ai_model": model, "details": details }),
            now,
        );
        debug!(content_id, user_id, model, "Tracked collaborative edit");
    }

    /// Append a review and return the recomputed quality level
    pub fn add_review(
        &self,
        content_id: &str,
        reviewer: &str,
        rating: u8,
        notes: &str,
    ) -> Result<QualityLevel, LedgerError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(LedgerError::InvalidRating(rating));
        }

        let mut records = self.records.lock();
        let record = records
            .get_mut(content_id)
            .ok_or_else(|| LedgerError::RecordNotFound(content_id.to_string()))?;

        let before = record.quality_level;
        let level = record.push_review(Review::new(reviewer, rating, notes, current_timestamp_ms()));

        if level != before {
            info!(content_id, from = %before, to = %level, "Quality level changed");
        }
        Ok(level)
    }

    /// Quality score of a record in [0, 1]
    pub fn quality_score(&self, content_id: &str) -> Option<f64> {
        self.records.lock().get(content_id).map(ProvenanceRecord::quality_score)
    }

    /// Copy of a single record
    pub fn record(&self, content_id: &str) -> Option<ProvenanceRecord> {
        self.records.lock().get(content_id).cloned()
    }

    /// Records whose quality score is at least `min_score`, sorted by id
    pub fn high_quality(&self, min_score: f64) -> Vec<ProvenanceRecord> {
        self.collect_sorted(|record| record.quality_score() >= min_score)
    }

    /// Records still at `unverified`, sorted by id
    pub fn unverified(&self) -> Vec<ProvenanceRecord> {
        self.collect_sorted(|record| record.quality_level == QualityLevel::Unverified)
    }

    /// Records currently typed `ai_generated`, sorted by id
    pub fn ai_generated(&self) -> Vec<ProvenanceRecord> {
        self.collect_sorted(|record| record.provenance_type == ProvenanceType::AiGenerated)
    }

    /// Every record, sorted by id
    pub fn export(&self) -> Vec<ProvenanceRecord> {
        self.collect_sorted(|_| true)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// True when nothing has been tracked
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Aggregate counts and mean quality
    pub fn stats(&self) -> ProvenanceStats {
        ProvenanceStats::from_records(self.records.lock().values())
    }

    fn collect_sorted(&self, filter: impl Fn(&ProvenanceRecord) -> bool) -> Vec<ProvenanceRecord> {
        let mut matched: Vec<ProvenanceRecord> = self
            .records
            .lock()
            .values()
            .filter(|record| filter(record))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.content_id.cmp(&b.content_id));
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn ledger_with_ai(id: &str) -> ProvenanceLedger {
        let ledger = ProvenanceLedger::new();
        ledger.track_ai_content(id, ContentType::Node, "Sophia v1.0", 0.7, "brainstorm");
        ledger
    }

    #[test]
    fn test_track_ai_content() {
        let ledger = ledger_with_ai("the-void");
        let record = ledger.record("the-void").unwrap();

        assert_eq!(record.provenance_type, ProvenanceType::AiGenerated);
        assert_eq!(record.quality_level, QualityLevel::Unverified);
        assert_eq!(record.metadata.ai_model.as_deref(), Some("Sophia v1.0"));
        assert_eq!(record.metadata.confidence_score, Some(0.7));
        assert_eq!(record.lineage()[0].action, "ai_generation");
    }

    #[test]
    fn test_track_user_content_starts_reviewed() {
        let ledger = ProvenanceLedger::new();
        ledger.track_user_content("n1", ContentType::Node, "alice", "create");
        let record = ledger.record("n1").unwrap();

        assert_eq!(record.provenance_type, ProvenanceType::UserCreated);
        assert_eq!(record.quality_level, QualityLevel::Reviewed);
        assert_eq!(record.metadata.creator.as_deref(), Some("alice"));
        assert_eq!(record.lineage()[0].action, "user_creation");
    }

    #[test]
    fn test_retrack_preserves_history() {
        let ledger = ledger_with_ai("n1");
        ledger.add_review("n1", "bob", 4, "").unwrap();
        ledger.track_user_content("n1", ContentType::Node, "alice", "edit");

        let record = ledger.record("n1").unwrap();
        assert_eq!(record.provenance_type, ProvenanceType::UserCreated);
        assert_eq!(record.lineage().len(), 2);
        assert_eq!(record.reviews().len(), 1);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_collaborative_edit_creates_with_content_type() {
        let ledger = ProvenanceLedger::new();
        ledger.track_collaborative_edit("e1", "alice", "Sophia v1.0", json!({"content_type": "edge"}));

        let record = ledger.record("e1").unwrap();
        assert_eq!(record.content_type, ContentType::Edge);
        assert_eq!(record.provenance_type, ProvenanceType::Collaborative);
    }

    #[test]
    fn test_collaborative_edit_defaults_to_unknown_type() {
        let ledger = ProvenanceLedger::new();
        ledger.track_collaborative_edit("x", "alice", "m", json!({}));
        assert_eq!(ledger.record("x").unwrap().content_type, ContentType::Unknown);
    }

    #[test]
    fn test_collaborative_edit_keeps_existing_record() {
        let ledger = ledger_with_ai("n1");
        ledger.add_review("n1", "bob", 5, "").unwrap();
        ledger.track_collaborative_edit("n1", "alice", "m", json!({"content_type": "edge"}));

        let record = ledger.record("n1").unwrap();
        assert_eq!(record.content_type, ContentType::Node);
        assert_eq!(record.provenance_type, ProvenanceType::Collaborative);
        assert_eq!(record.quality_level, QualityLevel::Reviewed);
        assert_eq!(record.lineage().len(), 2);
    }

    #[test]
    fn test_suggested_and_imported() {
        let ledger = ProvenanceLedger::new();
        ledger.track_suggested_content("s1", ContentType::Node, "m", 0.9, "alice");
        ledger.track_imported_content("i1", ContentType::Analysis, "library.json");

        assert_eq!(ledger.record("s1").unwrap().provenance_type, ProvenanceType::AiSuggested);
        let imported = ledger.record("i1").unwrap();
        assert_eq!(imported.provenance_type, ProvenanceType::Imported);
        assert_eq!(imported.metadata.source.as_deref(), Some("library.json"));
    }

    #[test]
    fn test_review_progression() {
        let ledger = ledger_with_ai("n1");
        assert_eq!(ledger.add_review("n1", "a", 5, "").unwrap(), QualityLevel::Reviewed);
        assert_eq!(ledger.add_review("n1", "b", 5, "").unwrap(), QualityLevel::Validated);
        assert_eq!(ledger.add_review("n1", "c", 4, "").unwrap(), QualityLevel::ExpertApproved);
    }

    #[test]
    fn test_review_unknown_record() {
        let ledger = ProvenanceLedger::new();
        assert_eq!(
            ledger.add_review("missing", "a", 5, ""),
            Err(LedgerError::RecordNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_review_rating_out_of_range() {
        let ledger = ledger_with_ai("n1");
        assert_eq!(ledger.add_review("n1", "a", 0, ""), Err(LedgerError::InvalidRating(0)));
        assert_eq!(ledger.add_review("n1", "a", 6, ""), Err(LedgerError::InvalidRating(6)));
        assert!(ledger.record("n1").unwrap().reviews().is_empty());
    }

    #[test]
    fn test_quality_score() {
        let ledger = ledger_with_ai("n1");
        // (0.7 + 0.4) / 2
        assert!((ledger.quality_score("n1").unwrap() - 0.55).abs() < 1e-9);
        assert!(ledger.quality_score("missing").is_none());
    }

    #[test]
    fn test_non_finite_confidence_keeps_score_in_range() {
        let ledger = ProvenanceLedger::new();
        ledger.track_ai_content("nan", ContentType::Node, "m", f64::NAN, "r");
        ledger.track_suggested_content("inf", ContentType::Node, "m", f64::INFINITY, "ana");

        assert_eq!(ledger.record("nan").unwrap().metadata.confidence_score, None);
        for id in ["nan", "inf"] {
            let score = ledger.quality_score(id).unwrap();
            assert!((0.0..=1.0).contains(&score), "{} scored {}", id, score);
        }
        assert!(ledger.stats().average_quality_score.is_finite());
    }

    #[test]
    fn test_queries() {
        let ledger = ProvenanceLedger::new();
        ledger.track_ai_content("b", ContentType::Node, "m", 0.9, "");
        ledger.track_ai_content("a", ContentType::Node, "m", 0.1, "");
        ledger.track_user_content("c", ContentType::Node, "alice", "create");

        let ai: Vec<String> = ledger.ai_generated().into_iter().map(|r| r.content_id).collect();
        assert_eq!(ai, vec!["a", "b"]);

        let unverified: Vec<String> = ledger.unverified().into_iter().map(|r| r.content_id).collect();
        assert_eq!(unverified, vec!["a", "b"]);

        // a: 0.25, b: 0.65, c: 0.6
        let high: Vec<String> = ledger.high_quality(0.6).into_iter().map(|r| r.content_id).collect();
        assert_eq!(high, vec!["b", "c"]);

        assert_eq!(ledger.export().len(), 3);
    }

    #[test]
    fn test_stats_on_empty_ledger() {
        let ledger = ProvenanceLedger::new();
        let stats = ledger.stats();
        assert_eq!(stats.total_records, 0);
        assert!(stats.by_provenance.is_empty());
        assert_eq!(stats.average_quality_score, 0.0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_concurrent_reviews_all_recorded() {
        let ledger = Arc::new(ledger_with_ai("n1"));

        let workers: Vec<_> = (0..8)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || ledger.add_review("n1", &format!("r{}", i), 5, "").unwrap())
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let record = ledger.record("n1").unwrap();
        assert_eq!(record.reviews().len(), 8);
        assert_eq!(record.quality_level, QualityLevel::ExpertApproved);
    }
}
