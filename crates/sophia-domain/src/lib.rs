//! Sophia Domain Layer
//!
//! Shared value types for the Sophia conversational orchestrator. Every other
//! crate in the workspace depends on this one; it holds no state and performs
//! no I/O.
//!
//! ## Key Concepts
//!
//! - **Graph document**: the client-owned `{nodes, links}` structure a session
//!   reasons about
//! - **Message**: one immutable entry in a session's conversation log
//! - **Intent**: the classified purpose of an utterance, from a fixed set
//! - **Suggestion**: a structured proposal (node, connection, reorganization)
//! - **Response**: what a handler hands back for a single utterance
//! - **Provenance / quality**: the vocabulary of the provenance ledger
//!
//! Graph documents arrive from untrusted clients, so deserialization is
//! lenient: absent collections become empty, absent optional text becomes
//! empty or `None`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod graph;
pub mod intent;
pub mod message;
pub mod provenance;
pub mod response;
pub mod suggestion;

// Re-exports for convenience
pub use clock::current_timestamp_ms;
pub use graph::{GraphDocument, GraphLink, GraphNode};
pub use intent::Intent;
pub use message::{Message, Metadata, Role};
pub use provenance::{ContentType, ProvenanceType, QualityLevel};
pub use response::{
    Evaluation, Payload, Response, SearchHit, StructureAnalysis, SubjectAnalysis, Writing,
};
pub use suggestion::{
    ActionSuggestion, ConceptSuggestion, ConnectionSuggestion, NodeSuggestion,
    OrganizationAction, OrganizationDetails, Suggestion,
};
