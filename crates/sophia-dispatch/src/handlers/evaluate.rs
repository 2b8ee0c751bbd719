use super::{HandlerInput, IntentHandler};
use crate::error::DispatchError;
use crate::structure::{analyze_structure, organization_suggestions};
use sophia_domain::{Evaluation, Intent, Payload, Response, StructureAnalysis};

// Score contributions, in tenths
const CONNECTIVITY_POINTS: u32 = 3;
const NO_ISOLATED_POINTS: u32 = 2;
const DIVERSITY_POINTS: u32 = 2;
const SIZE_POINTS: u32 = 3;
const MAX_POINTS: u32 = 10;

const MIN_AVG_CONNECTIONS: f64 = 2.0;
const MIN_CATEGORIES: usize = 3;
const MIN_NODES: usize = 10;

/// Scores the graph on connectivity, isolation, diversity, and size
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluateHandler;

impl EvaluateHandler {
    /// Evaluate a structure analysis
    ///
    /// Points are summed as integer tenths so a full score is exactly 1.0.
    pub fn evaluate(analysis: &StructureAnalysis) -> Evaluation {
        let mut points = 0;
        let mut strengths = Vec::new();
        let mut issues = Vec::new();

        if analysis.avg_connections >= MIN_AVG_CONNECTIONS {
            points += CONNECTIVITY_POINTS;
            strengths.push("Good average connectivity".to_string());
        } else {
            issues.push("Low average connectivity - consider adding more relationships".to_string());
        }

        if analysis.isolated_nodes.is_empty() {
            points += NO_ISOLATED_POINTS;
            strengths.push("No isolated nodes".to_string());
        } else {
            issues.push(format!(
                "{} isolated nodes need connections",
                analysis.isolated_nodes.len()
            ));
        }

        if analysis.categories.len() >= MIN_CATEGORIES {
            points += DIVERSITY_POINTS;
            strengths.push("Good category diversity".to_string());
        }

        if analysis.node_count >= MIN_NODES {
            points += SIZE_POINTS;
            strengths.push("Substantial content".to_string());
        }

        let points = points.min(MAX_POINTS);
        let summary = format!(
            "Graph quality score: {}%. The graph has {} strengths and {} areas for improvement.",
            points * 10,
            strengths.len(),
            issues.len()
        );

        Evaluation {
            quality_score: f64::from(points) / f64::from(MAX_POINTS),
            summary,
            strengths,
            issues,
            improvements: organization_suggestions(analysis),
        }
    }
}

impl IntentHandler for EvaluateHandler {
    fn intent(&self) -> Intent {
        Intent::Evaluate
    }

    fn handle(&self, input: &HandlerInput<'_>) -> Result<Response, DispatchError> {
        let Some(graph) = input.graph else {
            return Ok(Response::no_graph_data(
                Intent::Evaluate,
                "I need the graph data to evaluate quality and completeness.",
            ));
        };

        let evaluation = Self::evaluate(&analyze_structure(graph));
        let message = evaluation.summary.clone();
        let suggestions = evaluation.improvements.clone();

        Ok(Response::new(Intent::Evaluate, message, Payload::Evaluation { evaluation })
            .with_suggestions(suggestions)
            .with_actions(&["apply_improvements", "detailed_report", "fix_issues"]))
    }
}
