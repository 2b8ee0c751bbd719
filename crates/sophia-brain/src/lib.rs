//! Sophia Brain
//!
//! The orchestrator facade over the conversation context store, the intent
//! dispatcher, and the provenance ledger.
//!
//! # Flow of one message
//!
//! ```text
//! process(session, text, graph)
//!   -> get or create session, take its lock
//!   -> greet empty context, append user message, snapshot graph
//!   -> classify + handle (read-only context)
//!   -> append assistant message tagged with the intent
//!   -> track provenance for node suggestions
//!   -> Response
//! ```
//!
//! Messages for one session are processed one at a time; different sessions
//! run in parallel.
//!
//! # Usage
//!
//! ```
//! use sophia_brain::{Brain, BrainConfig};
//! use sophia_domain::Intent;
//!
//! let brain = Brain::new(BrainConfig::default());
//! let session = brain.create_session();
//!
//! let response = brain.process(&session, "brainstorm the void", None).unwrap();
//! assert_eq!(response.intent, Intent::Brainstorm);
//! assert_eq!(brain.provenance_stats().total_records, 3);
//! ```

#![warn(missing_docs)]

mod brain;
mod config;
mod error;

pub use brain::{label_slug, Brain, CAPABILITIES, SYSTEM_GREETING, USER_QUERY_OPERATION};
pub use config::BrainConfig;
pub use error::BrainError;
