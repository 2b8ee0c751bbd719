//! Sophia Conversation Context
//!
//! Per-session conversational state and the store that owns it.
//!
//! # Overview
//!
//! A [`ConversationContext`] holds:
//! - **Messages**: bounded log, oldest evicted first (default cap 50)
//! - **Graph snapshots**: bounded trail of graph summaries, each diffed against
//!   the one before it (default cap 10)
//! - **Operations**: begin/complete ledger keyed by operation type
//!
//! The [`SessionStore`] maps session ids to contexts. Each context sits behind
//! its own mutex so that one session's messages are processed one at a time
//! while different sessions proceed in parallel.
//!
//! # Usage
//!
//! ```
//! use sophia_context::{ContextConfig, SessionStore};
//! use sophia_domain::{Metadata, Role};
//!
//! let store = SessionStore::new(ContextConfig::default());
//! let session = store.get_or_create("session-1");
//!
//! let mut context = session.lock();
//! context.append_message(Role::User, "Tell me about the void", Metadata::new());
//! assert_eq!(context.summarize().message_count, 1);
//! ```

#![warn(missing_docs)]

mod config;
mod context;
mod error;
mod operation;
mod snapshot;
mod store;

pub use config::ContextConfig;
pub use context::{ContextExport, ContextMetadata, ContextSummary, ConversationContext, TOPIC_KEYWORDS};
pub use error::ContextError;
pub use operation::{Operation, OperationStatus};
pub use snapshot::{GraphSnapshot, SnapshotDelta};
pub use store::{new_session_id, SessionHandle, SessionStore};
