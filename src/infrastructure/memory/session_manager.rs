//! In-Memory Session Manager Implementation

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::application::engine::SessionHandle;
use crate::application::ports::{SessionManagerPort, SessionRegistryError};

struct SessionEntry {
    handle: SessionHandle,
    last_activity: DateTime<Utc>,
}

/// 内存会话管理器
pub struct InMemorySessionManager {
    sessions: DashMap<String, SessionEntry>,
}

impl InMemorySessionManager {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for InMemorySessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManagerPort for InMemorySessionManager {
    fn insert(&self, handle: SessionHandle) -> Result<(), SessionRegistryError> {
        let session_id = handle.id().to_string();
        if self.sessions.contains_key(&session_id) {
            return Err(SessionRegistryError::AlreadyExists(session_id));
        }
        self.sessions.insert(
            session_id.clone(),
            SessionEntry {
                handle,
                last_activity: Utc::now(),
            },
        );
        tracing::info!(session_id = %session_id, "Session registered");
        Ok(())
    }

    fn get(&self, id: &str) -> Result<SessionHandle, SessionRegistryError> {
        self.sessions
            .get(id)
            .map(|e| e.handle.clone())
            .ok_or_else(|| SessionRegistryError::NotFound(id.to_string()))
    }

    fn remove(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.remove(id).map(|(_, entry)| {
            tracing::info!(session_id = %id, "Session removed");
            entry.handle
        })
    }

    fn touch(&self, id: &str) {
        if let Some(mut entry) = self.sessions.get_mut(id) {
            entry.last_activity = Utc::now();
        }
    }

    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String> {
        let now = Utc::now();
        let timeout = chrono::Duration::seconds(idle_timeout_secs as i64);

        self.sessions
            .iter()
            .filter_map(|entry| {
                let elapsed = now - entry.last_activity;
                let active = entry.handle.snapshot().phase.is_active();
                if elapsed > timeout && !active {
                    Some(entry.key().clone())
                } else {
                    None
                }
            })
            .collect()
    }

    fn list_all(&self) -> Vec<String> {
        self.sessions.iter().map(|e| e.key().clone()).collect()
    }
}
