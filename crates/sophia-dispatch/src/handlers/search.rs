use super::{HandlerInput, IntentHandler};
use crate::error::DispatchError;
use crate::extract::extract_search_query;
use crate::structure::search_nodes;
use sophia_domain::{Intent, Payload, Response};

/// Finds nodes whose label or description contains the query
///
/// Without a graph document the result list is simply empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchHandler;

impl IntentHandler for SearchHandler {
    fn intent(&self) -> Intent {
        Intent::Search
    }

    fn handle(&self, input: &HandlerInput<'_>) -> Result<Response, DispatchError> {
        let query = extract_search_query(input.text);
        let results = search_nodes(&query, input.graph);
        let message = format!("I found {} results for '{}':", results.len(), query);

        Ok(Response::new(Intent::Search, message, Payload::Search { query, results })
            .with_actions(&["view_details", "expand_results", "refine_search"]))
    }
}
