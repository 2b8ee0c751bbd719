//! Session store mapping session ids to conversation contexts

use crate::config::ContextConfig;
use crate::context::ConversationContext;
use crate::error::ContextError;
use parking_lot::{Mutex, RwLock, RwLockUpgradableReadGuard};
use sophia_domain::current_timestamp_ms;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Shared handle to one session's context
///
/// Holding the lock serializes all work on that session.
pub type SessionHandle = Arc<Mutex<ConversationContext>>;

/// Generate a fresh, time-ordered session id
pub fn new_session_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

struct SessionEntry {
    context: SessionHandle,
    last_accessed: AtomicU64,
}

impl SessionEntry {
    fn new(session_id: &str, config: ContextConfig) -> Self {
        Self {
            context: Arc::new(Mutex::new(ConversationContext::new(session_id, config))),
            last_accessed: AtomicU64::new(current_timestamp_ms()),
        }
    }

    /// Handles are only cloned under the map lock, so with the write lock
    /// held this count is stable
    fn in_use(&self) -> bool {
        Arc::strong_count(&self.context) > 1
    }

    fn touch(&self) -> SessionHandle {
        self.last_accessed
            .store(current_timestamp_ms(), Ordering::Relaxed);
        Arc::clone(&self.context)
    }
}

/// Owner of every conversation context in the process
///
/// Lookups share a read lock; creation takes the write lock so that
/// concurrent first contact for the same id yields a single context.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    config: ContextConfig,
    idle_timeout: Option<Duration>,
}

impl SessionStore {
    /// Create an empty store; sessions never expire
    pub fn new(config: ContextConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
            idle_timeout: None,
        }
    }

    /// Expire sessions idle longer than `timeout` on [`SessionStore::reap_idle`]
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// Retention limits given to new contexts
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Create a context under `session_id`, replacing any existing one
    pub fn create(&self, session_id: &str) -> SessionHandle {
        let entry = SessionEntry::new(session_id, self.config);
        let handle = Arc::clone(&entry.context);
        let replaced = self
            .sessions
            .write()
            .insert(session_id.to_string(), entry)
            .is_some();

        info!(session_id, replaced, "Created session");
        handle
    }

    /// Look up an existing session
    pub fn get(&self, session_id: &str) -> Result<SessionHandle, ContextError> {
        self.sessions
            .read()
            .get(session_id)
            .map(SessionEntry::touch)
            .ok_or_else(|| ContextError::NotFound(session_id.to_string()))
    }

    /// Look up a session, creating it on first reference
    pub fn get_or_create(&self, session_id: &str) -> SessionHandle {
        let sessions = self.sessions.upgradable_read();
        if let Some(entry) = sessions.get(session_id) {
            return entry.touch();
        }

        let mut sessions = RwLockUpgradableReadGuard::upgrade(sessions);
        let entry = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionEntry::new(session_id, self.config));

        debug!(session_id, "Created session on first reference");
        entry.touch()
    }

    /// Remove a session; returns whether it existed
    pub fn delete(&self, session_id: &str) -> bool {
        let removed = self.sessions.write().remove(session_id).is_some();
        if removed {
            info!(session_id, "Deleted session");
        }
        removed
    }

    /// All session ids, sorted
    pub fn list(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sessions.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// True when no sessions exist
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Remove sessions idle for longer than the configured timeout
    ///
    /// Returns the removed ids, sorted. Without a timeout nothing is removed.
    /// Sessions whose handle is still held outside the store are in use and
    /// are kept, so a later lookup never creates a second context beside an
    /// in-flight one.
    pub fn reap_idle(&self, now_ms: u64) -> Vec<String> {
        let Some(timeout) = self.idle_timeout else {
            return Vec::new();
        };
        let timeout_ms = timeout.as_millis() as u64;

        let mut sessions = self.sessions.write();
        let mut expired: Vec<String> = sessions
            .iter()
            .filter(|(_, entry)| {
                now_ms.saturating_sub(entry.last_accessed.load(Ordering::Relaxed)) > timeout_ms
                    && !entry.in_use()
            })
            .map(|(id, _)| id.clone())
            .collect();
        expired.sort();

        for id in &expired {
            sessions.remove(id);
        }

        if !expired.is_empty() {
            info!(count = expired.len(), "Reaped idle sessions");
        }
        expired
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(ContextConfig::default())
    }
}
