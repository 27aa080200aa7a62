// src/services/session_service.rs
//! Volatile bearer-token sessions. Nothing here is persisted; a restart
//! logs everybody out.
use crate::models::user::SessionUser;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, SessionUser>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new session for `user` and returns its token. A user may
    /// hold any number of sessions at once.
    pub async fn issue(&self, user: SessionUser) -> String {
        let token = Uuid::new_v4().to_string();
        tracing::debug!("Issuing session token for '{}'", user.username);
        self.sessions.write().await.insert(token.clone(), user);
        token
    }

    pub async fn resolve(&self, token: &str) -> Option<SessionUser> {
        self.sessions.read().await.get(token).cloned()
    }

    /// Drops a single session. Returns whether the token was known.
    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Forgets every session; called once the server has shut down.
    pub async fn clear(&self) {
        let mut sessions = self.sessions.write().await;
        let count = sessions.len();
        sessions.clear();
        tracing::info!("Cleared {} active session(s).", count);
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    fn user(id: &str) -> SessionUser {
        SessionUser {
            id: id.to_string(),
            username: id.to_string(),
            name: id.to_uppercase(),
            role: Role::Student,
        }
    }

    #[tokio::test]
    async fn issued_tokens_resolve_to_their_user() {
        let reg = SessionRegistry::new();
        let token = reg.issue(user("u1")).await;
        assert_eq!(reg.resolve(&token).await, Some(user("u1")));
        assert_eq!(reg.resolve("nope").await, None);
    }

    #[tokio::test]
    async fn same_user_can_hold_several_sessions() {
        let reg = SessionRegistry::new();
        let a = reg.issue(user("u1")).await;
        let b = reg.issue(user("u1")).await;
        assert_ne!(a, b);
        assert_eq!(reg.len().await, 2);

        assert!(reg.revoke(&a).await);
        assert!(!reg.revoke(&a).await);
        assert!(reg.resolve(&a).await.is_none());
        assert!(reg.resolve(&b).await.is_some());
    }

    #[tokio::test]
    async fn clear_forgets_everything() {
        let reg = SessionRegistry::new();
        let shared = reg.clone();
        let token = shared.issue(user("u2")).await;
        reg.clear().await;
        assert!(reg.is_empty().await);
        assert!(shared.resolve(&token).await.is_none());
    }
}
