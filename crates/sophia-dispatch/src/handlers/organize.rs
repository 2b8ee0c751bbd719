use super::{HandlerInput, IntentHandler};
use crate::error::DispatchError;
use crate::structure::{analyze_structure, organization_suggestions};
use sophia_domain::{Intent, Payload, Response};

/// Analyses graph structure and proposes reorganizations
#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizeHandler;

impl IntentHandler for OrganizeHandler {
    fn intent(&self) -> Intent {
        Intent::Organize
    }

    fn handle(&self, input: &HandlerInput<'_>) -> Result<Response, DispatchError> {
        let Some(graph) = input.graph else {
            return Ok(Response::no_graph_data(
                Intent::Organize,
                "I'd be happy to help organize the graph, but I need the current \
                 graph data to analyze structure and suggest improvements.",
            ));
        };

        let analysis = analyze_structure(graph);
        let suggestions = organization_suggestions(&analysis);
        let message = format!(
            "I've analyzed the graph structure. It has {} nodes organized into {} categories. \
             I have several suggestions to improve organization and clarity.",
            analysis.node_count,
            analysis.categories.len()
        );

        Ok(Response::new(Intent::Organize, message, Payload::Structure { analysis })
            .with_suggestions(suggestions)
            .with_actions(&["apply_organization", "view_structure", "refine"]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{context, small_graph};

    #[test]
    fn test_organize_without_graph() {
        let ctx = context();
        let response = OrganizeHandler
            .handle(&HandlerInput::new("organize the graph", None, &ctx))
            .unwrap();

        assert!(response.is_no_graph_data());
        assert!(response.suggestions.is_empty());
        assert_eq!(response.actions, vec!["provide_graph_data"]);
    }

    #[test]
    fn test_organize_with_graph() {
        let ctx = context();
        let graph = small_graph();
        let response = OrganizeHandler
            .handle(&HandlerInput::new("organize the graph", Some(&graph), &ctx))
            .unwrap();

        let Payload::Structure { analysis } = &response.payload else {
            panic!("expected structure payload");
        };
        assert_eq!(analysis.node_count, 3);
        assert_eq!(analysis.isolated_nodes, vec!["n3"]);
        assert_eq!(response.suggestions.len(), 1);
        assert!(response.message.contains("3 nodes organized into 3 categories"));
    }
}
