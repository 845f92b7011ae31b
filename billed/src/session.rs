//! The signed-in user, as persisted by the login flow.
//!
//! Signing in is handled elsewhere; this module only reads the record and
//! hands it to the application as an explicit value.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub email: String,
}

impl Session {
    pub fn new(user_type: UserType, email: impl Into<String>) -> Self {
        Self {
            user_type,
            email: email.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StoredSession {
    #[serde(flatten)]
    user: Session,
    #[serde(default)]
    jwt: Option<String>,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No session found at {0}, sign in first")]
    Missing(PathBuf),

    #[error("Session file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct SessionStore {
    session_path: PathBuf,
}

impl SessionStore {
    pub fn new(session_path: PathBuf) -> Self {
        Self { session_path }
    }

    /// Read the persisted user record and its bearer token, if any.
    pub fn load(&self) -> Result<(Session, Option<SecretString>), SessionError> {
        if !self.session_path.exists() {
            return Err(SessionError::Missing(self.session_path.clone()));
        }

        let json = std::fs::read_to_string(&self.session_path)?;
        let stored: StoredSession = serde_json::from_str(&json)?;
        tracing::debug!(
            "Loaded session for {} ({:?})",
            stored.user.email,
            stored.user.user_type
        );

        Ok((stored.user, stored.jwt.map(SecretString::from)))
    }
}
