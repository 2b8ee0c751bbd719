//! Configuration for conversation contexts

use serde::{Deserialize, Serialize};

/// Retention limits applied to every conversation context
///
/// # Examples
///
/// ```
/// use sophia_context::ContextConfig;
///
/// let config = ContextConfig::default();
/// assert_eq!(config.max_history, 50);
/// assert_eq!(config.max_snapshots, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Maximum number of retained messages
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Maximum number of retained graph snapshots
    #[serde(default = "default_max_snapshots")]
    pub max_snapshots: usize,
}

fn default_max_history() -> usize {
    50
}

fn default_max_snapshots() -> usize {
    10
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_history: default_max_history(),
            max_snapshots: default_max_snapshots(),
        }
    }
}
