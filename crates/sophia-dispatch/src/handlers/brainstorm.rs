use super::{HandlerInput, IntentHandler};
use crate::error::DispatchError;
use crate::extract::{extract_topic, title_case};
use sophia_domain::{Intent, NodeSuggestion, Payload, Response, Suggestion};

/// Proposes three sub-concepts around the utterance's topic
#[derive(Debug, Clone, Copy, Default)]
pub struct BrainstormHandler;

impl BrainstormHandler {
    fn concepts(topic: &str) -> Vec<Suggestion> {
        let title = title_case(topic);
        let templates = [
            (
                format!("Existential Dimensions of {}", title),
                format!(
                    "Exploring the existential implications and phenomenological aspects of {} within nihiltheistic thought.",
                    topic
                ),
                0.85,
            ),
            (
                format!("{} and the Void", title),
                format!(
                    "The relationship between {} and the fundamental void of meaninglessness in nihiltheistic philosophy.",
                    topic
                ),
                0.80,
            ),
            (
                format!("Transcendent {}", title),
                format!(
                    "How {} manifests as both immanent experience and transcendent reality.",
                    topic
                ),
                0.75,
            ),
        ];

        templates
            .into_iter()
            .map(|(label, description, relevance_score)| {
                Suggestion::Node(NodeSuggestion {
                    label,
                    description,
                    category: "sub_concept".to_string(),
                    relevance_score,
                    reasoning: format!(
                        "Generated through philosophical brainstorming about {}",
                        topic
                    ),
                })
            })
            .collect()
    }
}

impl IntentHandler for BrainstormHandler {
    fn intent(&self) -> Intent {
        Intent::Brainstorm
    }

    fn handle(&self, input: &HandlerInput<'_>) -> Result<Response, DispatchError> {
        let topic = extract_topic(input.text);
        let message = format!(
            "I've brainstormed several philosophical concepts related to '{}'. \
             These concepts draw from existential philosophy, nihilistic thought, and \
             theological frameworks. Would you like me to elaborate on any of these?",
            topic
        );

        Ok(Response::new(Intent::Brainstorm, message, Payload::Topic { topic: topic.clone() })
            .with_suggestions(Self::concepts(&topic))
            .with_actions(&["add_concepts", "elaborate", "refine"]))
    }
}
