//! Sophia Intent Dispatcher
//!
//! Turns a user utterance (plus an optional graph document) into a structured
//! [`Response`](sophia_domain::Response).
//!
//! # Pipeline
//!
//! 1. **Classify**: lowercase the text and walk a fixed keyword table; the first
//!    intent with a substring match wins, otherwise `general`
//! 2. **Handle**: the [`IntentHandler`] registered for that intent extracts what
//!    it needs from the text with fixed patterns and builds suggestions
//! 3. **Shape**: every response carries the intent, a message, ordered
//!    suggestions and actions, and an intent-specific payload
//!
//! Handlers that need a graph document (organize, evaluate) answer a missing
//! one with a `no_graph_data` response rather than an error.
//!
//! # Usage
//!
//! ```
//! use sophia_context::{ContextConfig, ConversationContext};
//! use sophia_dispatch::{Dispatcher, HandlerInput};
//! use sophia_domain::Intent;
//!
//! let dispatcher = Dispatcher::new();
//! let context = ConversationContext::new("s1", ContextConfig::default());
//!
//! let response = dispatcher.dispatch(&HandlerInput::new("brainstorm the void", None, &context));
//! assert_eq!(response.intent, Intent::Brainstorm);
//! assert_eq!(response.suggestions.len(), 3);
//! ```

#![warn(missing_docs)]

mod classify;
mod dispatcher;
mod error;
pub mod extract;
pub mod handlers;
pub mod structure;

pub use classify::{classify, INTENT_KEYWORDS};
pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use handlers::{HandlerInput, IntentHandler};
