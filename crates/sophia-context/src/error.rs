//! Error types for context and session operations

use thiserror::Error;

/// Errors that can occur when looking up sessions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// No session is registered under this id
    #[error("Session not found: {0}")]
    NotFound(String),
}
