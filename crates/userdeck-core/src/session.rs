//! Signed-in session state held on behalf of the auth collaborator.
//!
//! The session is shared between the auth adapter (which writes it) and the
//! storage adapter (which reads the bearer token). It is passed around as a
//! `SessionHandle` instead of living in a global.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

/// An authenticated user session.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

// Tokens are never printed in full.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("id_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Shared, clonable handle to the current session.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current session, if any.
    pub fn get(&self) -> Option<Session> {
        self.inner.read().ok().and_then(|guard| guard.clone())
    }

    /// Replaces the current session.
    pub fn set(&self, session: Session) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = Some(session);
        }
    }

    /// Returns the bearer token of an unexpired session.
    pub fn bearer_token(&self) -> Option<String> {
        self.get()
            .filter(|session| !session.is_expired())
            .map(|session| session.id_token)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn session(expires_in: i64) -> Session {
        Session {
            user_id: "uid-1".to_string(),
            email: "a@example.com".to_string(),
            id_token: "secret-token".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: Utc::now() + Duration::seconds(expires_in),
        }
    }

    #[test]
    fn test_handle_is_shared_between_clones() {
        let handle = SessionHandle::new();
        let other = handle.clone();
        handle.set(session(3600));
        assert_eq!(other.get().map(|s| s.user_id), Some("uid-1".to_string()));
        other.set(Session {
            user_id: "uid-2".to_string(),
            ..session(3600)
        });
        assert_eq!(handle.get().map(|s| s.user_id), Some("uid-2".to_string()));
    }

    #[test]
    fn test_bearer_token_skips_expired_session() {
        let handle = SessionHandle::new();
        handle.set(session(-10));
        assert!(handle.bearer_token().is_none());
        handle.set(session(3600));
        assert_eq!(handle.bearer_token().as_deref(), Some("secret-token"));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let rendered = format!("{:?}", session(60));
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
