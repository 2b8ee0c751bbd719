use super::{HandlerInput, IntentHandler};
use crate::error::DispatchError;
use crate::extract::extract_concepts;
use sophia_domain::{ConnectionSuggestion, Intent, Payload, Response, Suggestion};

/// Concepts named in the response message
const MESSAGE_CONCEPTS: usize = 3;

/// Relates the first two concepts named in the utterance
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectHandler;

impl IntentHandler for ConnectHandler {
    fn intent(&self) -> Intent {
        Intent::Connect
    }

    fn handle(&self, input: &HandlerInput<'_>) -> Result<Response, DispatchError> {
        let concepts = extract_concepts(input.text);

        let suggestions = match concepts.as_slice() {
            [first, second, ..] => vec![Suggestion::Connection(ConnectionSuggestion {
                source: first.clone(),
                target: second.clone(),
                relationship: "explores".to_string(),
                relevance_score: 0.70,
                reasoning: format!(
                    "{} and {} share thematic resonance in nihiltheistic thought",
                    first, second
                ),
            })],
            _ => Vec::new(),
        };

        let named: Vec<&str> = concepts
            .iter()
            .take(MESSAGE_CONCEPTS)
            .map(String::as_str)
            .collect();
        let message = format!(
            "I've analyzed potential relationships between {}. \
             Here are the philosophical connections I've identified:",
            named.join(", ")
        );

        Ok(Response::new(Intent::Connect, message, Payload::Concepts { concepts })
            .with_suggestions(suggestions)
            .with_actions(&["add_connections", "explain_relationship", "find_more"]))
    }
}
