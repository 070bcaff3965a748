/// Demo session state
///
/// Replaces the original ambient browser-local "session" with an explicit
/// store injected through the application context. Sessions are keyed by
/// the user's email and carry an opaque token.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A demo session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: String,
    pub issued_at: DateTime<Utc>,
    pub token: Uuid,
}

impl Session {
    /// Issue a fresh session for a user
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            issued_at: Utc::now(),
            token: Uuid::new_v4(),
        }
    }
}

/// Session storage interface
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, user: &str) -> Option<Session>;
    async fn set(&self, session: Session);
    async fn clear(&self, user: &str);
}

/// In-memory implementation of `SessionStore`. All sessions are lost on
/// restart, matching the demo semantics.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, user: &str) -> Option<Session> {
        self.sessions.read().await.get(user).cloned()
    }

    async fn set(&self, session: Session) {
        let mut sessions = self.sessions.write().await;
        if sessions.insert(session.user.clone(), session).is_none() {
            crate::metrics::SESSIONS_ACTIVE.inc();
        }
    }

    async fn clear(&self, user: &str) {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(user).is_some() {
            crate::metrics::SESSIONS_ACTIVE.dec();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_returns_session() {
        let store = MemorySessionStore::new();
        let session = Session::new("a@b.com");
        let token = session.token;

        store.set(session).await;

        let loaded = store.get("a@b.com").await.unwrap();
        assert_eq!(loaded.user, "a@b.com");
        assert_eq!(loaded.token, token);
    }

    #[tokio::test]
    async fn clear_removes_session() {
        let store = MemorySessionStore::new();
        store.set(Session::new("a@b.com")).await;

        store.clear("a@b.com").await;

        assert!(store.get("a@b.com").await.is_none());
    }

    #[tokio::test]
    async fn set_overwrites_existing_session() {
        let store = MemorySessionStore::new();
        store.set(Session::new("a@b.com")).await;
        let replacement = Session::new("a@b.com");
        let token = replacement.token;

        store.set(replacement).await;

        assert_eq!(store.get("a@b.com").await.unwrap().token, token);
    }
}
