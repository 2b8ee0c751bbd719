//! Intent routing

use crate::classify::classify;
use crate::error::DispatchError;
use crate::handlers::{default_handlers, HandlerInput, IntentHandler};
use sophia_domain::{Intent, Response};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Classifies utterances and routes them to the matching handler
///
/// Holds no per-session state and can be shared freely across threads.
pub struct Dispatcher {
    handlers: HashMap<Intent, Box<dyn IntentHandler>>,
}

impl Dispatcher {
    /// Dispatcher with the built-in handler for every intent
    pub fn new() -> Self {
        let handlers = default_handlers()
            .into_iter()
            .map(|handler| (handler.intent(), handler))
            .collect();
        Self { handlers }
    }

    /// Replace the handler for the intent it reports
    pub fn with_handler(mut self, handler: impl IntentHandler + 'static) -> Self {
        self.handlers.insert(handler.intent(), Box::new(handler));
        self
    }

    /// Classify an utterance
    pub fn classify(&self, text: &str) -> Intent {
        classify(text)
    }

    /// Run the handler registered for `intent`
    ///
    /// Falls back to the `general` handler if a custom table lacks one.
    pub fn handle(&self, intent: Intent, input: &HandlerInput<'_>) -> Result<Response, DispatchError> {
        if input.text.trim().is_empty() {
            return Err(DispatchError::InvalidInput("empty utterance".to_string()));
        }

        let handler = self
            .handlers
            .get(&intent)
            .or_else(|| self.handlers.get(&Intent::General))
            .ok_or_else(|| DispatchError::Handler {
                intent,
                message: "no handler registered".to_string(),
            })?;

        debug!(intent = %intent, "Dispatching utterance");
        handler.handle(input)
    }

    /// Classify and handle in one step
    ///
    /// Handler failures are folded into an `error` response for the
    /// classified intent; they never escape as `Err`.
    pub fn dispatch(&self, input: &HandlerInput<'_>) -> Response {
        let intent = self.classify(input.text);
        match self.handle(intent, input) {
            Ok(response) => response,
            Err(e) => {
                warn!(intent = %intent, error = %e, "Handler failed");
                Response::error(intent, e.to_string())
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
