//! Sophia Provenance Ledger
//!
//! Tracks the origin, review history, and quality of every piece of content
//! the orchestrator produces or a user contributes.
//!
//! # Overview
//!
//! - **Origin**: each record carries a [`ProvenanceType`] and an append-only
//!   lineage log
//! - **Reviews**: ratings 1-5, append-only; the [`QualityLevel`] is recomputed
//!   from the full review set after each one
//! - **Quality score**: mean of the confidence score, the normalised average
//!   rating, and the level weight, whichever are present
//!
//! ## Quality thresholds
//!
//! | Reviews | Average rating | Level |
//! |---------|----------------|-------|
//! | ≥ 3 | ≥ 4.5 | expert_approved |
//! | ≥ 2 | ≥ 4.0 | validated |
//! | ≥ 1 | ≥ 3.0 | reviewed |
//! | otherwise | | unverified |
//!
//! # Usage
//!
//! ```
//! use sophia_domain::{ContentType, QualityLevel};
//! use sophia_provenance::ProvenanceLedger;
//!
//! let ledger = ProvenanceLedger::new();
//! ledger.track_ai_content("the-void", ContentType::Suggestion, "Sophia v1.0", 0.8, "brainstorm");
//!
//! let level = ledger.add_review("the-void", "alice", 5, "sharp").unwrap();
//! assert_eq!(level, QualityLevel::Reviewed);
//! assert!(ledger.quality_score("the-void").unwrap() > 0.5);
//! ```

#![warn(missing_docs)]

mod error;
mod ledger;
mod quality;
mod record;
mod stats;

pub use error::LedgerError;
pub use ledger::ProvenanceLedger;
pub use quality::{average_rating, compute_quality_level, compute_quality_score};
pub use record::{LineageEntry, ProvenanceRecord, RecordMetadata, Review};
pub use sophia_domain::{ContentType, ProvenanceType, QualityLevel};
pub use stats::ProvenanceStats;
