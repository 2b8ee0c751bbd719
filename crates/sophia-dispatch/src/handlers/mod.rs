//! Intent handlers
//!
//! Each handler turns one classified utterance into a [`Response`]. Handlers
//! read the conversation context but never modify it; the caller owns all
//! writes.

mod analyze;
mod brainstorm;
mod connect;
mod evaluate;
mod expand;
mod general;
mod organize;
mod search;
mod write;

pub use analyze::AnalyzeHandler;
pub use brainstorm::BrainstormHandler;
pub use connect::ConnectHandler;
pub use evaluate::EvaluateHandler;
pub use expand::ExpandHandler;
pub use general::GeneralHandler;
pub use organize::OrganizeHandler;
pub use search::SearchHandler;
pub use write::WriteHandler;

use crate::error::DispatchError;
use sophia_context::ConversationContext;
use sophia_domain::{GraphDocument, Intent, Response};

/// Everything a handler may look at
#[derive(Debug, Clone, Copy)]
pub struct HandlerInput<'a> {
    /// The user's utterance
    pub text: &'a str,
    /// Graph document supplied with the utterance
    pub graph: Option<&'a GraphDocument>,
    /// Session state, read-only
    pub context: &'a ConversationContext,
}

impl<'a> HandlerInput<'a> {
    /// Bundle handler input
    pub fn new(
        text: &'a str,
        graph: Option<&'a GraphDocument>,
        context: &'a ConversationContext,
    ) -> Self {
        Self {
            text,
            graph,
            context,
        }
    }
}

/// Builds the response for one intent
pub trait IntentHandler: Send + Sync {
    /// Intent this handler answers
    fn intent(&self) -> Intent;

    /// Build a response; errors are reserved for contract violations
    fn handle(&self, input: &HandlerInput<'_>) -> Result<Response, DispatchError>;
}

/// The built-in handler for every intent, in classification order
pub fn default_handlers() -> Vec<Box<dyn IntentHandler>> {
    vec![
        Box::new(BrainstormHandler),
        Box::new(OrganizeHandler),
        Box::new(AnalyzeHandler),
        Box::new(ExpandHandler),
        Box::new(ConnectHandler),
        Box::new(WriteHandler),
        Box::new(EvaluateHandler),
        Box::new(SearchHandler),
        Box::new(GeneralHandler),
    ]
}
