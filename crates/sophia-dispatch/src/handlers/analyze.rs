use super::{HandlerInput, IntentHandler};
use crate::error::DispatchError;
use crate::extract::extract_subject;
use crate::structure::related_concepts;
use sophia_domain::{Intent, Payload, Response, SubjectAnalysis, Suggestion};

const KEY_THEMES: [&str; 4] = ["meaninglessness", "transcendence", "paradox", "void"];
const LINEAGE: [&str; 3] = ["Nietzsche", "Heidegger", "Cioran"];

/// Explains a single subject and links it to matching graph nodes
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzeHandler;

impl IntentHandler for AnalyzeHandler {
    fn intent(&self) -> Intent {
        Intent::Analyze
    }

    fn handle(&self, input: &HandlerInput<'_>) -> Result<Response, DispatchError> {
        let subject = extract_subject(input.text);
        let explanation = format!(
            "In nihiltheistic thought, {} represents a fundamental tension between \
             the recognition of meaninglessness and the acknowledgment of transcendent reality. \
             This concept emerges from the intersection of nihilistic void and theistic presence, \
             creating a paradoxical framework that challenges conventional philosophical boundaries.",
            subject
        );
        let related = related_concepts(&subject, input.graph);
        let suggestions = related
            .iter()
            .map(|label| Suggestion::Related {
                label: label.clone(),
            })
            .collect();

        let analysis = SubjectAnalysis {
            subject,
            explanation: explanation.clone(),
            key_themes: KEY_THEMES.iter().map(|s| s.to_string()).collect(),
            related_concepts: related,
            philosophical_lineage: LINEAGE.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Response::new(Intent::Analyze, explanation, Payload::Analysis { analysis })
            .with_suggestions(suggestions)
            .with_actions(&["deep_dive", "add_concepts", "explore_connections"]))
    }
}
