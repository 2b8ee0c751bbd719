//! Error types for orchestrator operations

use sophia_context::ContextError;
use sophia_provenance::LedgerError;
use thiserror::Error;

/// Errors surfaced by the [`Brain`](crate::Brain)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BrainError {
    /// Session does not exist
    #[error("Session not found: {0}")]
    NotFound(String),

    /// A required request field was absent or blank
    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    /// Provenance ledger rejected the operation
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl From<ContextError> for BrainError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::NotFound(session_id) => BrainError::NotFound(session_id),
        }
    }
}
