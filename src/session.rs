//! Login gate
//!
//! A `Session` can only be obtained by passing `Session::authenticate`; every
//! pipeline flow takes one, so nothing runs before the gate. The check is a
//! plain comparison against configured values, not a security boundary.

use crate::error::{PurgoError, Result};
use dialoguer::{Input, Password};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Fills whatever was not given on the command line from the terminal.
    pub fn prompt_missing(username: Option<String>, password: Option<String>) -> Result<Self> {
        let username = match username {
            Some(u) => u,
            None => Input::<String>::new()
                .with_prompt("Username")
                .allow_empty(true)
                .interact_text()?,
        };
        let password = match password {
            Some(p) => p,
            None => Password::new()
                .with_prompt("Password")
                .allow_empty_password(true)
                .interact()?,
        };
        Ok(Self { username, password })
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    username: String,
}

impl Session {
    /// Compares trimmed credentials with the expected pair.
    pub fn authenticate(submitted: &Credentials, expected: &Credentials) -> Result<Session> {
        let username = submitted.username.trim();
        let password = submitted.password.trim();

        if username == expected.username.trim() && password == expected.password.trim() {
            info!(user = username, "session authenticated");
            return Ok(Session {
                username: username.to_string(),
            });
        }

        warn!(user = username, "authentication failed");
        if password.is_empty() {
            Err(PurgoError::MissingPassword)
        } else if username.is_empty() {
            Err(PurgoError::MissingUsername)
        } else {
            Err(PurgoError::InvalidCredentials)
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}
