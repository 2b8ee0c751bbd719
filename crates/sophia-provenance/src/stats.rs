//! Aggregate statistics over the ledger

use crate::record::ProvenanceRecord;
use serde::{Deserialize, Serialize};
use sophia_domain::{ProvenanceType, QualityLevel};
use std::collections::BTreeMap;

/// Counts and mean quality across all records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceStats {
    /// Number of records
    pub total_records: usize,

    /// Record count per provenance type
    pub by_provenance: BTreeMap<ProvenanceType, usize>,

    /// Record count per quality level
    pub by_quality: BTreeMap<QualityLevel, usize>,

    /// Mean quality score; zero for an empty ledger
    pub average_quality_score: f64,
}

impl ProvenanceStats {
    /// Aggregate a set of records
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ProvenanceRecord>) -> Self {
        let mut stats = Self::default();
        let mut score_total = 0.0;

        for record in records {
            stats.total_records += 1;
            *stats.by_provenance.entry(record.provenance_type).or_insert(0) += 1;
            *stats.by_quality.entry(record.quality_level).or_insert(0) += 1;
            score_total += record.quality_score();
        }

        if stats.total_records > 0 {
            stats.average_quality_score = score_total / stats.total_records as f64;
        }
        stats
    }

    /// Records at or above the given level
    pub fn count_at_least(&self, level: QualityLevel) -> usize {
        self.by_quality.range(level..).map(|(_, count)| count).sum()
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Provenance Summary".to_string(),
            "==================".to_string(),
            format!("Records: {}", self.total_records),
            format!("Average quality score: {:.2}", self.average_quality_score),
        ];

        if !self.by_provenance.is_empty() {
            lines.push(String::new());
            lines.push("By provenance:".to_string());
            for (provenance, count) in &self.by_provenance {
                lines.push(format!("  {}: {}", provenance, count));
            }
        }

        if !self.by_quality.is_empty() {
            lines.push(String::new());
            lines.push("By quality:".to_string());
            for (level, count) in &self.by_quality {
                lines.push(format!("  {}: {}", level, count));
            }
        }

        lines.join("\n")
    }
}
