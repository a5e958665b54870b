/// User domain types
use crate::error::{Result, RosterError};
use serde::{Deserialize, Serialize};

/// Storage-assigned user identifier
pub type UserId = i64;

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Display name, used as the rendered label
    pub username: String,

    /// Contact address
    pub email: String,

    /// Whether the account is enabled
    #[serde(default = "default_active")]
    pub active: bool,

    /// Whether the account has administrative rights
    #[serde(default)]
    pub admin: bool,

    /// Account creation timestamp (RFC 3339)
    #[serde(default)]
    pub created_at: String,
}

fn default_active() -> bool {
    true
}

/// Data for creating a new user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub admin: bool,
}

impl CreateUser {
    /// Create a request for a regular user without credentials
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: None,
            admin: false,
        }
    }

    /// Attach a plaintext password (hashed before it is stored)
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Mark the new user as an administrator
    #[must_use]
    pub fn as_admin(mut self) -> Self {
        self.admin = true;
        self
    }

    /// Check that username and email are usable.
    ///
    /// The email only has to look like `local@domain`; deliverability is not
    /// checked here.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(RosterError::invalid_input("username must not be empty"));
        }

        let email = self.email.trim();
        if email.is_empty() {
            return Err(RosterError::invalid_input("email must not be empty"));
        }

        match email.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(())
            }
            _ => Err(RosterError::invalid_input(format!(
                "'{}' is not an email address",
                email
            ))),
        }
    }
}
