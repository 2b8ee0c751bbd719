//! Orchestrator configuration

use serde::{Deserialize, Serialize};
use sophia_context::ContextConfig;
use std::time::Duration;

/// Configuration for the [`Brain`](crate::Brain)
///
/// Every field has a default, so a partial TOML table is enough.
///
/// # Examples
///
/// ```
/// use sophia_brain::BrainConfig;
///
/// let config = BrainConfig::default();
/// assert_eq!(config.max_history, 50);
///
/// let config = BrainConfig::compact();
/// assert_eq!(config.max_history, 20);
///
/// let config = BrainConfig::multi_tenant();
/// assert!(config.scope_content_ids_by_session);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrainConfig {
    /// Messages retained per session
    /// Default: 50
    pub max_history: usize,

    /// Graph snapshots retained per session
    /// Default: 10
    pub max_snapshots: usize,

    /// Model name recorded on generated content
    /// Default: "Sophia v1.0"
    pub model_name: String,

    /// Confidence recorded when a suggestion carries no relevance score
    /// Default: 0.7
    pub default_suggestion_confidence: f64,

    /// Prefix suggestion content ids with `<session_id>:`
    /// Default: false (ids are shared across sessions)
    pub scope_content_ids_by_session: bool,

    /// Idle seconds before a session may be reaped; 0 disables reaping
    /// Default: 0
    pub session_idle_timeout_secs: u64,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            max_history: 50,
            max_snapshots: 10,
            model_name: "Sophia v1.0".to_string(),
            default_suggestion_confidence: 0.7,
            scope_content_ids_by_session: false,
            session_idle_timeout_secs: 0,
        }
    }
}

impl BrainConfig {
    /// Short histories and half-hour idle expiry
    ///
    /// - History: 20 messages
    /// - Snapshots: 5
    /// - Idle timeout: 30 minutes
    pub fn compact() -> Self {
        Self {
            max_history: 20,
            max_snapshots: 5,
            session_idle_timeout_secs: 30 * 60,
            ..Self::default()
        }
    }

    /// Per-session provenance ids and hourly idle expiry
    pub fn multi_tenant() -> Self {
        Self {
            scope_content_ids_by_session: true,
            session_idle_timeout_secs: 60 * 60,
            ..Self::default()
        }
    }

    /// Retention limits for new conversation contexts
    pub fn context_config(&self) -> ContextConfig {
        ContextConfig {
            max_history: self.max_history,
            max_snapshots: self.max_snapshots,
        }
    }

    /// Idle timeout as a duration; zero means never
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_timeout_secs)
    }

    /// Check value ranges, returning a description of the first problem
    pub fn validate(&self) -> Result<(), String> {
        if self.max_history == 0 {
            return Err("max_history must be at least 1".to_string());
        }
        if self.max_snapshots == 0 {
            return Err("max_snapshots must be at least 1".to_string());
        }
        if self.model_name.trim().is_empty() {
            return Err("model_name must not be empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.default_suggestion_confidence) {
            return Err(format!(
                "default_suggestion_confidence must be within [0, 1], got {}",
                self.default_suggestion_confidence
            ));
        }
        Ok(())
    }
}
