//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use sophia_context::ContextSummary;
use sophia_domain::{QualityLevel, Response, Suggestion};
use sophia_provenance::ProvenanceStats;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a handler response.
    pub fn format_response(&self, response: &Response) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
            OutputFormat::Table => Ok(self.format_response_text(response)),
        }
    }

    fn format_response_text(&self, response: &Response) -> String {
        let mut out = String::new();
        let header = format!("[{}] ", response.intent);
        out.push_str(&self.colorize(&header, "magenta"));

        if response.is_error() {
            out.push_str(&self.colorize(&response.message, "red"));
        } else if response.is_no_graph_data() {
            out.push_str(&self.colorize(&response.message, "yellow"));
        } else {
            out.push_str(&response.message);
        }

        if !response.suggestions.is_empty() {
            out.push_str("\n\n");
            out.push_str(&suggestion_table(&response.suggestions));
        }

        if !response.actions.is_empty() {
            out.push_str("\n\n");
            let actions = format!("Next: {}", response.actions.join(", "));
            out.push_str(&self.colorize(&actions, "cyan"));
        }

        out
    }

    /// Format a conversation summary.
    pub fn format_summary(&self, summary: &ContextSummary) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(summary)?);
        }

        let topics = if summary.topics_discussed.is_empty() {
            "-".to_string()
        } else {
            summary
                .topics_discussed
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };

        Ok(key_value_table(vec![
            ("Messages", summary.message_count.to_string()),
            ("Duration (min)", summary.session_duration_minutes.to_string()),
            ("Topics", topics),
            ("Operations", summary.operations_performed.to_string()),
            ("Snapshots", summary.snapshot_count.to_string()),
        ]))
    }

    /// Format provenance statistics.
    pub fn format_stats(&self, stats: &ProvenanceStats) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(stats)?);
        }

        if stats.total_records == 0 {
            return Ok(self.colorize("No tracked content yet.", "yellow"));
        }

        let mut rows = vec![
            ("Records".to_string(), stats.total_records.to_string()),
            (
                "Average score".to_string(),
                format!("{:.2}", stats.average_quality_score),
            ),
        ];
        rows.extend(
            stats
                .by_provenance
                .iter()
                .map(|(provenance, count)| (format!("provenance: {}", provenance), count.to_string())),
        );
        rows.extend(
            stats
                .by_quality
                .iter()
                .map(|(level, count)| (format!("quality: {}", level), count.to_string())),
        );

        let mut builder = Builder::default();
        builder.push_record(["Metric".to_string(), "Value".to_string()]);
        for (key, value) in rows {
            builder.push_record([key, value]);
        }
        Ok(styled(builder))
    }

    /// Format the capability list.
    pub fn format_capabilities(&self, capabilities: &[&str]) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(capabilities)?);
        }
        Ok(capabilities
            .iter()
            .map(|c| format!("  - {}", c))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Format a review result.
    pub fn review_recorded(&self, content_id: &str, level: QualityLevel, score: Option<f64>) -> String {
        let score = score.map(|s| format!(", score {:.2}", s)).unwrap_or_default();
        self.success(&format!("Reviewed {}: now {}{}", content_id, level, score))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn key_value_table(rows: Vec<(&str, String)>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field".to_string(), "Value".to_string()]);
    for (key, value) in rows {
        builder.push_record([key.to_string(), value]);
    }
    styled(builder)
}

/// One row per suggestion: kind, headline, detail, score
fn suggestion_row(suggestion: &Suggestion) -> [String; 4] {
    let score = suggestion
        .relevance()
        .map(|s| format!("{:.2}", s))
        .unwrap_or_else(|| "-".to_string());

    let (kind, headline, detail) = match suggestion {
        Suggestion::Node(node) => ("node", node.label.clone(), node.category.clone()),
        Suggestion::Connection(conn) => (
            "connection",
            format!("{} -> {}", conn.source, conn.target),
            conn.relationship.clone(),
        ),
        Suggestion::Organization { description, .. } => {
            ("organization", description.clone(), String::new())
        }
        Suggestion::Concept(concept) => ("concept", concept.label.clone(), String::new()),
        Suggestion::Related { label } => ("related", label.clone(), String::new()),
        Suggestion::Action(action) => ("action", action.action.clone(), action.description.clone()),
    };

    [kind.to_string(), headline, detail, score]
}

fn suggestion_table(suggestions: &[Suggestion]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Kind", "Suggestion", "Detail", "Score"].map(String::from));
    for suggestion in suggestions {
        builder.push_record(suggestion_row(suggestion));
    }
    styled(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sophia_domain::{ConnectionSuggestion, Intent, NodeSuggestion, Payload};
    use std::collections::BTreeSet;

    fn node_response() -> Response {
        Response::new(
            Intent::Brainstorm,
            "Here are some ideas",
            Payload::Topic {
                topic: "void".to_string(),
            },
        )
        .with_suggestions(vec![Suggestion::Node(NodeSuggestion {
            label: "Transcendent Void".to_string(),
            description: "d".to_string(),
            category: "concept".to_string(),
            relevance_score: 0.9,
            reasoning: "r".to_string(),
        })])
        .with_actions(&["add_concepts"])
    }

    #[test]
    fn test_text_response() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_response(&node_response()).unwrap();
        assert!(output.starts_with("[brainstorm] Here are some ideas"));
        assert!(output.contains("Transcendent Void"));
        assert!(output.contains("0.90"));
        assert!(output.contains("Next: add_concepts"));
    }

    #[test]
    fn test_json_response() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_response(&node_response()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["kind"], "topic");
        assert_eq!(value["suggestions"][0]["type"], "node");
    }

    #[test]
    fn test_connection_row() {
        let row = suggestion_row(&Suggestion::Connection(ConnectionSuggestion {
            source: "Void".to_string(),
            target: "Dread".to_string(),
            relationship: "evokes".to_string(),
            relevance_score: 0.5,
            reasoning: String::new(),
        }));
        assert_eq!(row[0], "connection");
        assert_eq!(row[1], "Void -> Dread");
        assert_eq!(row[3], "0.50");
    }

    #[test]
    fn test_summary_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let summary = ContextSummary {
            message_count: 3,
            session_duration_minutes: 0,
            topics_discussed: BTreeSet::from(["anxiety".to_string()]),
            operations_performed: 0,
            snapshot_count: 1,
        };
        let output = formatter.format_summary(&summary).unwrap();
        assert!(output.contains("Messages"));
        assert!(output.contains("anxiety"));
    }

    #[test]
    fn test_empty_stats() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_stats(&ProvenanceStats::default()).unwrap();
        assert_eq!(output, "No tracked content yet.");
    }

    #[test]
    fn test_messages_without_color() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("done"), "✓ done");
        assert_eq!(formatter.error("failed"), "✗ failed");
    }
}
