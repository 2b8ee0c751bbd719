//! Conversation messages

use crate::clock::current_timestamp_ms;
use serde::{Deserialize, Serialize};

/// Free-form key/value metadata attached to a message
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Session preamble
    System,
    /// The human side of the conversation
    User,
    /// The orchestrator's reply
    Assistant,
}

impl Role {
    /// Get the role name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One entry in a conversation log
///
/// Messages are immutable once appended to a context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who wrote it
    pub role: Role,

    /// Message text
    pub content: String,

    /// Milliseconds since the Unix epoch
    pub timestamp: u64,

    /// Opaque metadata (e.g. the classified intent of an assistant reply)
    #[serde(default)]
    pub metadata: Metadata,
}

impl Message {
    /// Create a message stamped with the current time
    pub fn new(role: Role, content: impl Into<String>, metadata: Metadata) -> Self {
        Self::at(role, content, metadata, current_timestamp_ms())
    }

    /// Create a message with an explicit timestamp
    pub fn at(role: Role, content: impl Into<String>, metadata: Metadata, timestamp: u64) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
            metadata,
        }
    }
}
