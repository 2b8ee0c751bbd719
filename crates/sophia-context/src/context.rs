//! Per-session conversation context

use crate::config::ContextConfig;
use crate::operation::Operation;
use crate::snapshot::GraphSnapshot;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sophia_domain::{current_timestamp_ms, GraphDocument, Message, Metadata, Role};
use std::collections::{BTreeSet, VecDeque};

/// Domain keywords reported as conversation topics
pub const TOPIC_KEYWORDS: [&str; 10] = [
    "nihiltheism",
    "existential",
    "anxiety",
    "void",
    "nothingness",
    "transcendence",
    "meaninglessness",
    "despair",
    "absurd",
    "divine",
];

/// Identity and timing of a context; survives [`ConversationContext::clear`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextMetadata {
    /// Owning session id
    pub session_id: String,
    /// Creation time (ms since epoch)
    pub created_at: u64,
    /// Last mutation time (ms since epoch)
    pub last_updated: u64,
}

/// Derived overview of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSummary {
    /// Retained messages
    pub message_count: usize,
    /// Whole minutes between the first and last retained message
    pub session_duration_minutes: u64,
    /// Topic keywords found in retained messages, sorted
    pub topics_discussed: BTreeSet<String>,
    /// Operations recorded, active or completed
    pub operations_performed: usize,
    /// Retained graph snapshots
    pub snapshot_count: usize,
}

/// Full serializable view of a context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextExport {
    /// Identity and timing
    pub metadata: ContextMetadata,
    /// Retained messages, oldest first
    pub messages: Vec<Message>,
    /// Retained snapshots, oldest first
    pub graph_snapshots: Vec<GraphSnapshot>,
    /// All operations in start order
    pub operations: Vec<Operation>,
    /// Derived summary
    pub summary: ContextSummary,
}

/// Bounded conversational state for one session
///
/// None of the mutators fail: caps are enforced by evicting the oldest
/// entries, and malformed graph documents count as empty.
#[derive(Debug, Clone)]
pub struct ConversationContext {
    config: ContextConfig,
    metadata: ContextMetadata,
    messages: VecDeque<Message>,
    snapshots: VecDeque<GraphSnapshot>,
    operations: Vec<Operation>,
}

impl ConversationContext {
    /// Create an empty context for `session_id`
    pub fn new(session_id: impl Into<String>, config: ContextConfig) -> Self {
        let now = current_timestamp_ms();
        Self {
            config,
            metadata: ContextMetadata {
                session_id: session_id.into(),
                created_at: now,
                last_updated: now,
            },
            messages: VecDeque::new(),
            snapshots: VecDeque::new(),
            operations: Vec::new(),
        }
    }

    /// Owning session id
    pub fn session_id(&self) -> &str {
        &self.metadata.session_id
    }

    /// Identity and timing
    pub fn metadata(&self) -> &ContextMetadata {
        &self.metadata
    }

    /// Retention limits in effect
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Append a message stamped with the current time
    pub fn append_message(&mut self, role: Role, content: impl Into<String>, metadata: Metadata) {
        self.push_message(Message::new(role, content, metadata));
    }

    /// Append a prebuilt message, evicting the oldest beyond the cap
    pub fn push_message(&mut self, message: Message) {
        self.messages.push_back(message);
        while self.messages.len() > self.config.max_history {
            self.messages.pop_front();
        }
        self.touch();
    }

    /// Record a snapshot of `graph`, diffed against the last retained one
    pub fn append_graph_snapshot(&mut self, graph: &GraphDocument, operation: impl Into<String>) {
        self.append_graph_snapshot_at(graph, operation, current_timestamp_ms());
    }

    /// Record a snapshot with an explicit timestamp
    pub fn append_graph_snapshot_at(
        &mut self,
        graph: &GraphDocument,
        operation: impl Into<String>,
        timestamp: u64,
    ) {
        let snapshot = GraphSnapshot::capture(graph, operation, self.snapshots.back(), timestamp);
        self.snapshots.push_back(snapshot);
        while self.snapshots.len() > self.config.max_snapshots {
            self.snapshots.pop_front();
        }
        self.touch();
    }

    /// Start tracking an operation
    pub fn begin_operation(&mut self, operation_type: impl Into<String>, details: Value) {
        self.operations
            .push(Operation::begin(operation_type, details, current_timestamp_ms()));
        self.touch();
    }

    /// Complete the first active operation of `operation_type`
    ///
    /// Returns `false` without touching anything when none is active.
    pub fn complete_operation(&mut self, operation_type: &str, result: Value) -> bool {
        let Some(operation) = self
            .operations
            .iter_mut()
            .find(|op| op.is_active(operation_type))
        else {
            return false;
        };

        operation.complete(result, current_timestamp_ms());
        self.touch();
        true
    }

    /// Derive a summary of the retained conversation
    pub fn summarize(&self) -> ContextSummary {
        ContextSummary {
            message_count: self.messages.len(),
            session_duration_minutes: self.duration_minutes(),
            topics_discussed: self.topics(),
            operations_performed: self.operations.len(),
            snapshot_count: self.snapshots.len(),
        }
    }

    /// Drop messages, snapshots, and operations; keep metadata
    pub fn clear(&mut self) {
        self.messages.clear();
        self.snapshots.clear();
        self.operations.clear();
        self.touch();
    }

    /// The last `count` messages, oldest first
    pub fn recent_messages(&self, count: usize) -> Vec<&Message> {
        let skip = self.messages.len().saturating_sub(count);
        self.messages.iter().skip(skip).collect()
    }

    /// Retained messages, oldest first
    pub fn messages(&self) -> impl ExactSizeIterator<Item = &Message> {
        self.messages.iter()
    }

    /// Number of retained messages
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Retained snapshots, oldest first
    pub fn snapshots(&self) -> impl ExactSizeIterator<Item = &GraphSnapshot> {
        self.snapshots.iter()
    }

    /// Most recent snapshot
    pub fn last_snapshot(&self) -> Option<&GraphSnapshot> {
        self.snapshots.back()
    }

    /// All operations in start order
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Serializable copy of the whole context
    pub fn export(&self) -> ContextExport {
        ContextExport {
            metadata: self.metadata.clone(),
            messages: self.messages.iter().cloned().collect(),
            graph_snapshots: self.snapshots.iter().cloned().collect(),
            operations: self.operations.clone(),
            summary: self.summarize(),
        }
    }

    fn touch(&mut self) {
        self.metadata.last_updated = current_timestamp_ms();
    }

    fn duration_minutes(&self) -> u64 {
        match (self.messages.front(), self.messages.back()) {
            (Some(first), Some(last)) => last.timestamp.saturating_sub(first.timestamp) / 60_000,
            _ => 0,
        }
    }

    fn topics(&self) -> BTreeSet<String> {
        let mut topics = BTreeSet::new();
        for message in &self.messages {
            let content = message.content.to_lowercase();
            for keyword in TOPIC_KEYWORDS {
                if content.contains(keyword) {
                    topics.insert(keyword.to_string());
                }
            }
        }
        topics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotDelta;
    use serde_json::json;
    use sophia_domain::GraphNode;

    fn context() -> ConversationContext {
        ConversationContext::new("test-session", ContextConfig::default())
    }

    fn graph(ids: &[&str]) -> GraphDocument {
        GraphDocument::new(ids.iter().map(|id| GraphNode::new(*id, *id)).collect(), vec![])
    }

    #[test]
    fn test_append_message() {
        let mut ctx = context();
        ctx.append_message(Role::User, "hello", Metadata::new());

        assert_eq!(ctx.message_count(), 1);
        let message = ctx.messages().next().unwrap();
        assert_eq!(message.role, Role::User);
        assert_eq!(message.content, "hello");
    }

    #[test]
    fn test_history_cap_keeps_most_recent() {
        let mut ctx = context();
        for i in 0..60 {
            ctx.append_message(Role::User, format!("message {}", i), Metadata::new());
        }

        assert_eq!(ctx.message_count(), 50);
        assert_eq!(ctx.messages().next().unwrap().content, "message 10");
        assert_eq!(ctx.messages().last().unwrap().content, "message 59");
    }

    #[test]
    fn test_snapshot_cap_and_deltas() {
        let mut ctx = context();
        for i in 0..12 {
            let id = format!("n{}", i);
            ctx.append_graph_snapshot(&graph(&[id.as_str()]), format!("op{}", i));
        }

        let snapshots: Vec<_> = ctx.snapshots().collect();
        assert_eq!(snapshots.len(), 10);
        assert_eq!(snapshots[0].operation, "op2");
        assert_eq!(snapshots[9].operation, "op11");
        assert_eq!(
            snapshots[9].delta,
            SnapshotDelta::Changes {
                added_nodes: vec!["n11".to_string()],
                removed_nodes: vec!["n10".to_string()],
                node_count_delta: 0,
            }
        );
    }

    #[test]
    fn test_first_snapshot_initial_even_after_clear() {
        let mut ctx = context();
        ctx.append_graph_snapshot(&graph(&["a"]), "first");
        ctx.clear();
        ctx.append_graph_snapshot(&graph(&["b"]), "again");

        assert!(ctx.last_snapshot().unwrap().delta.is_initial());
    }

    #[test]
    fn test_complete_operation_without_active_is_noop() {
        let mut ctx = context();
        assert!(!ctx.complete_operation("expand", json!({})));
        assert!(ctx.operations().is_empty());

        ctx.begin_operation("organize", json!({}));
        assert!(!ctx.complete_operation("expand", json!({})));
        assert_eq!(ctx.operations()[0].status, crate::OperationStatus::Active);
    }

    #[test]
    fn test_complete_operation_completes_exactly_one() {
        let mut ctx = context();
        ctx.begin_operation("expand", json!({"target": "a"}));
        ctx.begin_operation("expand", json!({"target": "b"}));

        assert!(ctx.complete_operation("expand", json!({"added": 2})));

        let ops = ctx.operations();
        assert_eq!(ops[0].status, crate::OperationStatus::Completed);
        assert_eq!(ops[0].result, Some(json!({"added": 2})));
        assert!(ops[0].completed_at.is_some());
        assert_eq!(ops[1].status, crate::OperationStatus::Active);

        assert!(ctx.complete_operation("expand", json!({})));
        assert!(!ctx.complete_operation("expand", json!({})));
    }

    #[test]
    fn test_summary_topics_and_counts() {
        let mut ctx = context();
        ctx.append_message(Role::User, "The VOID and existential Anxiety", Metadata::new());
        ctx.append_message(Role::Assistant, "Nothing about despair here", Metadata::new());
        ctx.begin_operation("brainstorm", json!({}));
        ctx.append_graph_snapshot(&graph(&["a"]), "user_query");

        let summary = ctx.summarize();
        assert_eq!(summary.message_count, 2);
        assert_eq!(summary.operations_performed, 1);
        assert_eq!(summary.snapshot_count, 1);
        let topics: Vec<&str> = summary.topics_discussed.iter().map(String::as_str).collect();
        assert_eq!(topics, vec!["anxiety", "despair", "existential", "void"]);
    }

    #[test]
    fn test_summary_duration_minutes() {
        let mut ctx = context();
        assert_eq!(ctx.summarize().session_duration_minutes, 0);

        ctx.push_message(Message::at(Role::User, "a", Metadata::new(), 1_000));
        assert_eq!(ctx.summarize().session_duration_minutes, 0);

        ctx.push_message(Message::at(Role::User, "b", Metadata::new(), 1_000 + 125_000));
        assert_eq!(ctx.summarize().session_duration_minutes, 2);
    }

    #[test]
    fn test_clear_keeps_metadata() {
        let mut ctx = context();
        let created_at = ctx.metadata().created_at;
        ctx.append_message(Role::User, "void", Metadata::new());
        ctx.append_graph_snapshot(&graph(&["a"]), "op");
        ctx.begin_operation("x", json!(null));

        ctx.clear();

        let summary = ctx.summarize();
        assert_eq!(summary.message_count, 0);
        assert_eq!(summary.snapshot_count, 0);
        assert_eq!(summary.operations_performed, 0);
        assert_eq!(ctx.session_id(), "test-session");
        assert_eq!(ctx.metadata().created_at, created_at);
    }

    #[test]
    fn test_recent_messages() {
        let mut ctx = context();
        for i in 0..5 {
            ctx.append_message(Role::User, i.to_string(), Metadata::new());
        }

        let recent: Vec<&str> = ctx.recent_messages(2).iter().map(|m| m.content.as_str()).collect();
        assert_eq!(recent, vec!["3", "4"]);
        assert_eq!(ctx.recent_messages(100).len(), 5);
    }

    #[test]
    fn test_export_includes_summary() {
        let mut ctx = context();
        ctx.append_message(Role::System, "preamble", Metadata::new());

        let export = ctx.export();
        assert_eq!(export.messages.len(), 1);
        assert_eq!(export.summary.message_count, 1);
        assert_eq!(export.metadata.session_id, "test-session");

        let value = serde_json::to_value(&export).unwrap();
        assert_eq!(value["messages"][0]["role"], "system");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the log keeps exactly min(N, cap) messages, the most recent ones, in order
        #[test]
        fn test_history_retains_most_recent(count in 0usize..150) {
            let mut ctx = ConversationContext::new("p", ContextConfig::default());
            for i in 0..count {
                ctx.append_message(Role::User, i.to_string(), Metadata::new());
            }

            let expected: Vec<String> = (count.saturating_sub(50)..count).map(|i| i.to_string()).collect();
            let actual: Vec<String> = ctx.messages().map(|m| m.content.clone()).collect();
            prop_assert_eq!(actual, expected);
        }

        /// Property: at most ten snapshots survive, most recent last
        #[test]
        fn test_snapshots_retain_most_recent(count in 1usize..40) {
            let mut ctx = ConversationContext::new("p", ContextConfig::default());
            for i in 0..count {
                ctx.append_graph_snapshot(&GraphDocument::default(), i.to_string());
            }

            let labels: Vec<String> = ctx.snapshots().map(|s| s.operation.clone()).collect();
            let expected: Vec<String> = (count.saturating_sub(10)..count).map(|i| i.to_string()).collect();
            prop_assert_eq!(labels, expected);
        }
    }
}
