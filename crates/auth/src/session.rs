use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::UserAccount;

/// How long a session stays valid after login.
pub fn session_ttl() -> Duration {
    Duration::hours(8)
}

/// A live login. The token is the only secret; everything else is context
/// the API stamps onto writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Uuid,
    pub username: String,
    pub display_name: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn issue(account: &UserAccount, now: DateTime<Utc>) -> Self {
        Self {
            token: Uuid::new_v4(),
            username: account.username.clone(),
            display_name: account.display_name.clone(),
            issued_at: now,
            expires_at: now + session_ttl(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("unknown session token")]
    UnknownToken,

    #[error("session has expired")]
    Expired,

    #[error("session backend unavailable: {0}")]
    Backend(String),
}

/// Deterministically validate a session's time window.
///
/// Note: this validates the window only; token lookup is the store's job.
pub fn validate_session(session: &Session, now: DateTime<Utc>) -> Result<(), AuthError> {
    if now >= session.expires_at {
        return Err(AuthError::Expired);
    }
    Ok(())
}

/// Storage seam for live sessions.
pub trait SessionStore: Send + Sync {
    fn insert(&self, session: Session) -> Result<(), AuthError>;

    fn get(&self, token: Uuid) -> Result<Session, AuthError>;

    fn revoke(&self, token: Uuid) -> Result<(), AuthError>;
}

/// Process-local session store. Sessions do not survive a restart, which
/// matches the single-instance deployment this serves.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, session: Session) -> Result<(), AuthError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| AuthError::Backend(e.to_string()))?;
        sessions.insert(session.token, session);
        Ok(())
    }

    fn get(&self, token: Uuid) -> Result<Session, AuthError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|e| AuthError::Backend(e.to_string()))?;
        sessions.get(&token).cloned().ok_or(AuthError::UnknownToken)
    }

    fn revoke(&self, token: Uuid) -> Result<(), AuthError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| AuthError::Backend(e.to_string()))?;
        sessions.remove(&token);
        Ok(())
    }
}
