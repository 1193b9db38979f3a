//! Local session gate.
//!
//! # Responsibility
//! - Validate login form input before the note screens become reachable.
//!
//! # Invariants
//! - Both credential fields must be non-empty after trimming.
//! - No credential is ever persisted or logged in full.

use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Login validation error surfaced to the calling form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginError {
    EmptyUsername,
    EmptyPassword,
}

impl Display for LoginError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl Error for LoginError {}

/// Active local session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Trimmed username the session was opened with.
    pub username: String,
}

/// Validates login input and opens a local session.
///
/// There is no account backend; the only rule is that both fields carry
/// non-whitespace text.
pub fn login(username: &str, password: &str) -> Result<Session, LoginError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(LoginError::EmptyUsername);
    }
    if password.trim().is_empty() {
        return Err(LoginError::EmptyPassword);
    }

    info!("event=session_open module=session status=ok");
    Ok(Session {
        username: username.to_string(),
    })
}
