//! Error types for ledger operations

use thiserror::Error;

/// Errors that can occur during ledger operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    /// No record exists for this content id
    #[error("Provenance record not found: {0}")]
    RecordNotFound(String),

    /// Review rating outside 1..=5
    #[error("Invalid review rating {0}: must be between 1 and 5")]
    InvalidRating(u8),
}
