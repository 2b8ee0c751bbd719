use super::{HandlerInput, IntentHandler};
use crate::error::DispatchError;
use crate::extract::extract_expansion_target;
use sophia_domain::{
    ConnectionSuggestion, Intent, NodeSuggestion, Payload, Response, Suggestion,
};

/// Node id every expansion is linked back to
pub const ANCHOR_NODE: &str = "existential-anxiety";

/// Proposes a sub-concept of an existing node and a link to the anchor theme
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpandHandler;

impl IntentHandler for ExpandHandler {
    fn intent(&self) -> Intent {
        Intent::Expand
    }

    fn handle(&self, input: &HandlerInput<'_>) -> Result<Response, DispatchError> {
        let target = extract_expansion_target(input.text, input.graph);

        let suggestions = vec![
            Suggestion::Node(NodeSuggestion {
                label: format!("Phenomenological Aspects of {}", target),
                description: format!(
                    "The lived experience and subjective dimensions of {}",
                    target
                ),
                category: "sub_concept".to_string(),
                relevance_score: 0.80,
                reasoning: format!("Expanding {} through phenomenological analysis", target),
            }),
            Suggestion::Connection(ConnectionSuggestion {
                source: target.clone(),
                target: ANCHOR_NODE.to_string(),
                relationship: "explores".to_string(),
                relevance_score: 0.75,
                reasoning: format!("{} naturally connects to existential anxiety themes", target),
            }),
        ];

        let message = format!(
            "I can expand '{}' by adding related philosophical concepts, exploring sub-themes, \
             and identifying key relationships. Here are my top suggestions:",
            target
        );

        Ok(Response::new(Intent::Expand, message, Payload::Target { target })
            .with_suggestions(suggestions)
            .with_actions(&["apply_expansion", "customize_depth", "select_direction"]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{context, small_graph};

    #[test]
    fn test_expand_named_node() {
        let ctx = context();
        let graph = small_graph();
        let response = ExpandHandler
            .handle(&HandlerInput::new("expand anxiety", Some(&graph), &ctx))
            .unwrap();

        assert_eq!(response.payload, Payload::Target { target: "Anxiety".to_string() });
        assert_eq!(
            response.suggestions[0].as_node().unwrap().label,
            "Phenomenological Aspects of Anxiety"
        );
        match &response.suggestions[1] {
            Suggestion::Connection(conn) => {
                assert_eq!(conn.source, "Anxiety");
                assert_eq!(conn.target, ANCHOR_NODE);
                assert_eq!(conn.relationship, "explores");
                assert_eq!(conn.relevance_score, 0.75);
            }
            other => panic!("unexpected suggestion: {:?}", other),
        }
    }

    #[test]
    fn test_expand_defaults_to_graph() {
        let ctx = context();
        let response = ExpandHandler
            .handle(&HandlerInput::new("expand", None, &ctx))
            .unwrap();

        assert_eq!(response.payload, Payload::Target { target: "the graph".to_string() });
        assert_eq!(response.suggestions.len(), 2);
    }
}
