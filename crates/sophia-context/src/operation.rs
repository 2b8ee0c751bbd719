//! Operation ledger entries

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle state of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    /// Started, not yet completed
    Active,
    /// Completed with a result
    Completed,
}

/// A tracked unit of work within a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation type used for completion matching
    #[serde(rename = "type")]
    pub operation_type: String,

    /// Caller-supplied details
    pub details: Value,

    /// Current status
    pub status: OperationStatus,

    /// Start time (ms since epoch)
    pub started_at: u64,

    /// Completion time (ms since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<u64>,

    /// Result stored on completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl Operation {
    /// Start a new active operation
    pub fn begin(operation_type: impl Into<String>, details: Value, started_at: u64) -> Self {
        Self {
            operation_type: operation_type.into(),
            details,
            status: OperationStatus::Active,
            started_at,
            completed_at: None,
            result: None,
        }
    }

    /// True when this is an active operation of the given type
    pub fn is_active(&self, operation_type: &str) -> bool {
        self.status == OperationStatus::Active && self.operation_type == operation_type
    }

    pub(crate) fn complete(&mut self, result: Value, completed_at: u64) {
        self.status = OperationStatus::Completed;
        self.completed_at = Some(completed_at);
        self.result = Some(result);
    }
}
