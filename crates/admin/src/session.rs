//! Admin session handling.
//!
//! Sessions live for eight hours and are persisted under the well-known
//! `adminSession` key so a restarted client stays logged in. An expired
//! session is discarded on load, forcing a fresh login.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::AdminError;

/// Session lifetime: eight hours from login.
const SESSION_HOURS: i64 = 8;

/// An authenticated admin session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub username: String,
    pub login_time: DateTime<Utc>,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    /// Mint a fresh session for a just-authenticated user.
    #[must_use]
    pub fn start(username: &str) -> Self {
        let now = Utc::now();
        Self {
            username: username.to_string(),
            login_time: now,
            token: format!("admin_{}", Uuid::new_v4().simple()),
            expires_at: now + Duration::hours(SESSION_HOURS),
        }
    }

    /// Whether the session is still within its lifetime.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        Utc::now() < self.expires_at
    }
}

/// JSON file persistence for the admin session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session, discarding expired or unreadable ones.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` when the file exists but cannot be read.
    pub fn load(&self) -> Result<Option<AdminSession>, AdminError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let payload = fs::read_to_string(&self.path)?;
        let session: AdminSession = match serde_json::from_str(&payload) {
            Ok(session) => session,
            Err(err) => {
                debug!(error = %err, "discarding unreadable admin session");
                return Ok(None);
            }
        };
        if session.is_valid() {
            Ok(Some(session))
        } else {
            debug!(username = %session.username, "discarding expired admin session");
            self.clear()?;
            Ok(None)
        }
    }

    /// Persist a session.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` when the file cannot be written.
    pub fn save(&self, session: &AdminSession) -> Result<(), AdminError> {
        let payload = serde_json::to_string(session)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }

    /// Remove the persisted session (logout).
    ///
    /// # Errors
    ///
    /// Returns `AdminError` when the file cannot be removed.
    pub fn clear(&self) -> Result<(), AdminError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_is_valid() {
        let session = AdminSession::start("admin");
        assert!(session.is_valid());
        assert!(session.token.starts_with("admin_"));
        assert_eq!(session.expires_at - session.login_time, Duration::hours(8));
    }

    #[test]
    fn test_expired_session_is_invalid() {
        let mut session = AdminSession::start("admin");
        session.expires_at = Utc::now() - Duration::minutes(1);
        assert!(!session.is_valid());
    }

    #[test]
    fn test_session_serializes_camel_case() {
        let session = AdminSession::start("admin");
        let payload = serde_json::to_string(&session).expect("serialize");
        assert!(payload.contains("\"loginTime\""));
        assert!(payload.contains("\"expiresAt\""));
        let back: AdminSession = serde_json::from_str(&payload).expect("deserialize");
        assert_eq!(session, back);
    }
}
