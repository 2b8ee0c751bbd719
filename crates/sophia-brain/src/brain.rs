//! The orchestrator facade

use crate::config::BrainConfig;
use crate::error::BrainError;
use serde_json::json;
use sophia_context::{new_session_id, ContextExport, ContextSummary, ConversationContext, SessionStore};
use sophia_dispatch::{Dispatcher, HandlerInput};
use sophia_domain::{
    current_timestamp_ms, ContentType, GraphDocument, Metadata, QualityLevel, Response, Role,
    Suggestion,
};
use sophia_provenance::{ProvenanceLedger, ProvenanceStats};
use std::sync::Arc;
use tracing::{debug, info};

/// Capabilities advertised to clients
pub const CAPABILITIES: [&str; 7] = [
    "philosophical_analysis",
    "concept_extraction",
    "relationship_inference",
    "graph_organization",
    "brainstorming",
    "writing_assistance",
    "quality_assessment",
];

/// Opening system message of every conversation
pub const SYSTEM_GREETING: &str = "You are Sophia, the conversational guide for the Nihiltheism \
     knowledge graph. I can help you organize concepts, brainstorm ideas, analyze philosophical \
     relationships, and expand your understanding of nihiltheistic thought.";

/// Graph snapshot label for graphs that arrive with a message
pub const USER_QUERY_OPERATION: &str = "user_query";

/// Sequences one utterance through context, dispatcher, and ledger
///
/// All work for a session happens under that session's lock; the ledger is
/// locked after the session, never before.
pub struct Brain {
    config: BrainConfig,
    sessions: Arc<SessionStore>,
    ledger: Arc<ProvenanceLedger>,
    dispatcher: Dispatcher,
}

impl Brain {
    /// Create an orchestrator with its own session store and ledger
    pub fn new(config: BrainConfig) -> Self {
        let sessions = SessionStore::new(config.context_config()).with_idle_timeout(config.idle_timeout());
        Self::with_parts(config, Arc::new(sessions), Arc::new(ProvenanceLedger::new()))
    }

    /// Create an orchestrator over an existing store and ledger
    pub fn with_parts(
        config: BrainConfig,
        sessions: Arc<SessionStore>,
        ledger: Arc<ProvenanceLedger>,
    ) -> Self {
        Self {
            config,
            sessions,
            ledger,
            dispatcher: Dispatcher::new(),
        }
    }

    /// Replace the dispatcher, e.g. to install custom handlers
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &BrainConfig {
        &self.config
    }

    /// Shared session store
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Shared provenance ledger
    pub fn ledger(&self) -> &Arc<ProvenanceLedger> {
        &self.ledger
    }

    /// Start a new session with a fresh id
    pub fn create_session(&self) -> String {
        let session_id = new_session_id();
        let handle = self.sessions.create(&session_id);
        greet(&mut handle.lock());
        info!(session_id = %session_id, "Session started");
        session_id
    }

    /// Handle one utterance
    ///
    /// The session is created on first reference. The user message (and
    /// graph snapshot, when a graph is supplied) is recorded before the
    /// handler runs and is kept even if the handler fails.
    pub fn process(
        &self,
        session_id: &str,
        text: &str,
        graph: Option<&GraphDocument>,
    ) -> Result<Response, BrainError> {
        self.process_then(session_id, text, graph, |_| ())
            .map(|(response, ())| response)
    }

    /// Handle one utterance and summarize the session under the same lock
    ///
    /// The summary always reflects this exchange, even when other requests
    /// for the session are queued behind it.
    pub fn process_with_summary(
        &self,
        session_id: &str,
        text: &str,
        graph: Option<&GraphDocument>,
    ) -> Result<(Response, ContextSummary), BrainError> {
        self.process_then(session_id, text, graph, ConversationContext::summarize)
    }

    fn process_then<T>(
        &self,
        session_id: &str,
        text: &str,
        graph: Option<&GraphDocument>,
        after: impl FnOnce(&ConversationContext) -> T,
    ) -> Result<(Response, T), BrainError> {
        if session_id.trim().is_empty() {
            return Err(BrainError::MissingInput("session_id"));
        }
        if text.trim().is_empty() {
            return Err(BrainError::MissingInput("message"));
        }

        let handle = self.sessions.get_or_create(session_id);
        let mut context = handle.lock();

        greet(&mut context);
        context.append_message(Role::User, text, Metadata::new());
        if let Some(graph) = graph {
            context.append_graph_snapshot(graph, USER_QUERY_OPERATION);
        }

        let response = self
            .dispatcher
            .dispatch(&HandlerInput::new(text, graph, &context));

        let mut metadata = Metadata::new();
        metadata.insert("intent".to_string(), json!(response.intent));
        context.append_message(Role::Assistant, response.message.clone(), metadata);

        let tracked = self.track_suggestions(session_id, &response.suggestions);
        debug!(
            session_id,
            intent = %response.intent,
            suggestions = response.suggestions.len(),
            tracked,
            "Processed message"
        );

        let extra = after(&context);
        Ok((response, extra))
    }

    /// Record provenance for node suggestions; returns how many were tracked
    fn track_suggestions(&self, session_id: &str, suggestions: &[Suggestion]) -> usize {
        let mut tracked = 0;
        for suggestion in suggestions {
            let Some(node) = suggestion.as_node() else {
                continue;
            };
            let confidence = suggestion
                .relevance()
                .filter(|score| score.is_finite())
                .unwrap_or(self.config.default_suggestion_confidence);

            self.ledger.track_ai_content(
                &self.content_id(session_id, &node.label),
                ContentType::Suggestion,
                &self.config.model_name,
                confidence,
                &node.reasoning,
            );
            tracked += 1;
        }
        tracked
    }

    /// Ledger id for a suggested label
    pub fn content_id(&self, session_id: &str, label: &str) -> String {
        let slug = label_slug(label);
        if self.config.scope_content_ids_by_session {
            format!("{}:{}", session_id, slug)
        } else {
            slug
        }
    }

    fn with_context<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut ConversationContext) -> T,
    ) -> Result<T, BrainError> {
        let handle = self.sessions.get(session_id)?;
        let mut context = handle.lock();
        Ok(f(&mut context))
    }

    /// Summary of an existing session
    pub fn context_summary(&self, session_id: &str) -> Result<ContextSummary, BrainError> {
        self.with_context(session_id, |context| context.summarize())
    }

    /// Full serializable state of an existing session
    pub fn context_export(&self, session_id: &str) -> Result<ContextExport, BrainError> {
        self.with_context(session_id, |context| context.export())
    }

    /// Empty a session's logs, keeping the session itself
    pub fn clear_context(&self, session_id: &str) -> Result<(), BrainError> {
        self.with_context(session_id, ConversationContext::clear)?;
        info!(session_id, "Cleared context");
        Ok(())
    }

    /// Remove a session
    pub fn delete_session(&self, session_id: &str) -> Result<(), BrainError> {
        if self.sessions.delete(session_id) {
            Ok(())
        } else {
            Err(BrainError::NotFound(session_id.to_string()))
        }
    }

    /// Capability names, in fixed order
    pub fn capabilities(&self) -> &'static [&'static str] {
        &CAPABILITIES
    }

    /// Aggregate ledger statistics
    pub fn provenance_stats(&self) -> ProvenanceStats {
        self.ledger.stats()
    }

    /// Add a review to tracked content and return its new quality level
    pub fn review_content(
        &self,
        content_id: &str,
        reviewer: &str,
        rating: u8,
        notes: &str,
    ) -> Result<QualityLevel, BrainError> {
        Ok(self.ledger.add_review(content_id, reviewer, rating, notes)?)
    }

    /// Remove sessions idle past the configured timeout
    pub fn reap_idle_sessions(&self) -> Vec<String> {
        self.sessions.reap_idle(current_timestamp_ms())
    }

    /// Number of live sessions
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for Brain {
    fn default() -> Self {
        Self::new(BrainConfig::default())
    }
}

/// Add the system greeting to a context that has no messages yet
fn greet(context: &mut ConversationContext) {
    if context.message_count() == 0 {
        context.append_message(Role::System, SYSTEM_GREETING, Metadata::new());
    }
}

/// Lowercase a label and replace spaces with `-`
pub fn label_slug(label: &str) -> String {
    label.to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sophia_domain::{GraphLink, GraphNode, Intent, ProvenanceType};

    fn graph() -> GraphDocument {
        GraphDocument::new(
            vec![GraphNode::new("n1", "The Void"), GraphNode::new("n2", "Anxiety")],
            vec![GraphLink::new("n1", "n2")],
        )
    }

    #[test]
    fn test_create_session_greets() {
        let brain = Brain::default();
        let id = brain.create_session();
        assert_eq!(brain.context_summary(&id).unwrap().message_count, 1);
        assert_eq!(brain.session_count(), 1);
    }

    #[test]
    fn test_process_records_conversation() {
        let brain = Brain::default();
        let response = brain
            .process("s1", "Can we brainstorm ideas about the void", Some(&graph()))
            .unwrap();
        assert_eq!(response.intent, Intent::Brainstorm);

        let export = brain.context_export("s1").unwrap();
        let roles: Vec<Role> = export.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(export.messages[2].metadata["intent"], "brainstorm");
        assert_eq!(export.graph_snapshots.len(), 1);
        assert_eq!(export.graph_snapshots[0].operation, USER_QUERY_OPERATION);
    }

    #[test]
    fn test_greeting_only_once() {
        let brain = Brain::default();
        brain.process("s1", "hello", None).unwrap();
        brain.process("s1", "hello again", None).unwrap();
        assert_eq!(brain.context_summary("s1").unwrap().message_count, 5);
    }

    #[test]
    fn test_process_without_graph_takes_no_snapshot() {
        let brain = Brain::default();
        brain.process("s1", "organize the graph", None).unwrap();
        assert_eq!(brain.context_summary("s1").unwrap().snapshot_count, 0);
    }

    #[test]
    fn test_brainstorm_suggestions_tracked() {
        let brain = Brain::default();
        brain.process("s1", "brainstorm the void please", None).unwrap();

        let record = brain.ledger().record("void-and-the-void").unwrap();
        assert_eq!(record.provenance_type, ProvenanceType::AiGenerated);
        assert_eq!(record.content_type, ContentType::Suggestion);
        assert_eq!(record.metadata.ai_model.as_deref(), Some("Sophia v1.0"));
        assert_eq!(record.metadata.confidence_score, Some(0.80));
        assert_eq!(brain.provenance_stats().total_records, 3);
    }

    #[test]
    fn test_only_node_suggestions_tracked() {
        let brain = Brain::default();
        // one node and one connection suggestion
        brain.process("s1", "expand anxiety", Some(&graph())).unwrap();
        assert_eq!(brain.ledger().len(), 1);
        assert!(brain.ledger().record("phenomenological-aspects-of-anxiety").is_some());
    }

    #[test]
    fn test_scoped_content_ids() {
        let config = BrainConfig {
            scope_content_ids_by_session: true,
            ..BrainConfig::default()
        };
        let brain = Brain::new(config);
        brain.process("s1", "brainstorm void", None).unwrap();
        assert!(brain.ledger().record("s1:transcendent-void").is_some());
        assert!(brain.ledger().record("transcendent-void").is_none());
    }

    #[test]
    fn test_process_with_summary_reflects_exchange() {
        let brain = Brain::default();
        let graph = GraphDocument::default();
        let (response, summary) = brain
            .process_with_summary("s1", "organize this", Some(&graph))
            .unwrap();

        assert_eq!(response.intent, Intent::Organize);
        assert_eq!(summary.message_count, 3);
        assert_eq!(summary.snapshot_count, 1);
        assert_eq!(summary, brain.context_summary("s1").unwrap());
        assert_eq!(
            brain.process_with_summary(" ", "hi", None),
            Err(BrainError::MissingInput("session_id"))
        );
    }

    #[test]
    fn test_missing_input() {
        let brain = Brain::default();
        assert_eq!(brain.process("", "hi", None), Err(BrainError::MissingInput("session_id")));
        assert_eq!(brain.process("s1", "  ", None), Err(BrainError::MissingInput("message")));
        assert_eq!(brain.session_count(), 0);
    }

    #[test]
    fn test_unknown_session() {
        let brain = Brain::default();
        assert_eq!(
            brain.context_summary("nope"),
            Err(BrainError::NotFound("nope".to_string()))
        );
        assert!(brain.clear_context("nope").is_err());
        assert!(brain.delete_session("nope").is_err());
    }

    #[test]
    fn test_clear_then_process_greets_again() {
        let brain = Brain::default();
        brain.process("s1", "hello", None).unwrap();
        brain.clear_context("s1").unwrap();
        assert_eq!(brain.context_summary("s1").unwrap().message_count, 0);

        brain.process("s1", "hello", None).unwrap();
        assert_eq!(brain.context_summary("s1").unwrap().message_count, 3);
    }

    #[test]
    fn test_review_content() {
        let brain = Brain::default();
        brain.process("s1", "brainstorm void", None).unwrap();

        let level = brain.review_content("transcendent-void", "alice", 5, "").unwrap();
        assert_eq!(level, QualityLevel::Reviewed);
        assert!(matches!(
            brain.review_content("missing", "alice", 5, ""),
            Err(BrainError::Ledger(_))
        ));
    }

    #[test]
    fn test_capabilities() {
        let brain = Brain::default();
        assert_eq!(brain.capabilities().len(), 7);
        assert_eq!(brain.capabilities()[0], "philosophical_analysis");
    }

    #[test]
    fn test_label_slug() {
        assert_eq!(label_slug("Existential Dimensions of Void"), "existential-dimensions-of-void");
    }
}
