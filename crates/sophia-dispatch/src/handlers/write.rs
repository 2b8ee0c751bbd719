use super::{HandlerInput, IntentHandler};
use crate::error::DispatchError;
use crate::extract::{extract_topic, title_case};
use sophia_domain::{ConceptSuggestion, Intent, Payload, Response, Suggestion, Writing};

/// Produces a short essay on the utterance's topic
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteHandler;

impl WriteHandler {
    fn compose(topic: &str) -> Writing {
        let title = title_case(topic);
        let content = format!(
            "**{title} in Nihiltheistic Philosophy**\n\n\
             The concept of {topic} occupies a crucial position within the nihiltheistic framework. \
             It represents not merely an abstract philosophical notion, but a lived reality that \
             confronts the fundamental tension between meaning and meaninglessness.\n\n\
             Through the lens of nihiltheism, {topic} emerges as both destroyer and creator, \
             destroying conventional certainties while creating space for authentic encounter \
             with the void. This paradoxical nature reflects the core nihiltheistic insight: \
             that the divine and the nothing are not opposites, but complementary aspects of \
             ultimate reality."
        );

        Writing {
            topic: topic.to_string(),
            word_count: content.split_whitespace().count(),
            content,
            concepts_to_add: vec![
                ConceptSuggestion {
                    label: format!("{} Paradox", title),
                    relevance: 0.85,
                },
                ConceptSuggestion {
                    label: format!("Authentic {}", title),
                    relevance: 0.80,
                },
            ],
        }
    }
}

impl IntentHandler for WriteHandler {
    fn intent(&self) -> Intent {
        Intent::Write
    }

    fn handle(&self, input: &HandlerInput<'_>) -> Result<Response, DispatchError> {
        let writing = Self::compose(&extract_topic(input.text));
        let suggestions = writing
            .concepts_to_add
            .iter()
            .cloned()
            .map(Suggestion::Concept)
            .collect();

        Ok(
            Response::new(Intent::Write, writing.content.clone(), Payload::Writing { writing })
                .with_suggestions(suggestions)
                .with_actions(&["refine_writing", "add_concepts", "expand_section"]),
        )
    }
}
