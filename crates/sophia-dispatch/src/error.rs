//! Error types for intent dispatch

use sophia_domain::Intent;
use thiserror::Error;

/// Errors raised by handlers and the dispatcher
///
/// A missing graph document is not an error; handlers answer it with a
/// `no_graph_data` response.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// The utterance violates the handler contract (e.g. it is empty)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A handler failed while building its response
    #[error("{intent} handler failed: {message}")]
    Handler {
        /// Intent whose handler failed
        intent: Intent,
        /// Failure description
        message: String,
    },
}
