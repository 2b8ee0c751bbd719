use super::{HandlerInput, IntentHandler};
use crate::error::DispatchError;
use sophia_domain::{ActionSuggestion, Intent, Payload, Response, Suggestion};

const MENU: [(&str, &str, &str); 3] = [
    ("brainstorm", "Brainstorm new philosophical concepts to add", "lightbulb"),
    ("organize", "Organize and structure the current graph", "layout"),
    ("expand", "Expand an existing concept in depth", "expand"),
];

/// Describes what the orchestrator can do
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralHandler;

impl IntentHandler for GeneralHandler {
    fn intent(&self) -> Intent {
        Intent::General
    }

    fn handle(&self, _input: &HandlerInput<'_>) -> Result<Response, DispatchError> {
        let suggestions = MENU
            .iter()
            .map(|(action, description, icon)| {
                Suggestion::Action(ActionSuggestion {
                    action: action.to_string(),
                    description: description.to_string(),
                    icon: icon.to_string(),
                })
            })
            .collect();

        let message = "I'm here to help you explore and expand the Nihiltheism knowledge graph. \
                       I can help you brainstorm concepts, organize ideas, analyze philosophical \
                       relationships, expand the graph, evaluate quality, and more. \
                       What would you like to work on?";

        Ok(Response::new(Intent::General, message, Payload::Capabilities)
            .with_suggestions(suggestions)
            .with_actions(&["brainstorm", "organize", "analyze", "expand"]))
    }
}
