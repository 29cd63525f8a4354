//! Signed-in user, passed explicitly to the containers

use std::path::Path;

use crate::errors::SessionError;
use crate::models::{User, UserType};

/// The user on whose behalf bills are listed and submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    user: User,
}

impl SessionContext {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn employee(email: impl Into<String>) -> Self {
        Self::new(User {
            user_type: UserType::Employee,
            email: email.into(),
        })
    }

    /// Load the user from a session file, either a bare user object or
    /// a `{"user": ...}` map where the user may itself be a JSON string.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;

        let user_value: serde_json::Value = match value.get("user") {
            Some(serde_json::Value::String(raw)) => serde_json::from_str(raw)?,
            Some(inner) => inner.clone(),
            None if value.get("email").is_some() => value.clone(),
            None => return Err(SessionError::MissingUser(path.display().to_string())),
        };

        Ok(Self::new(serde_json::from_value(user_value)?))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let content = serde_json::to_string_pretty(&serde_json::json!({ "user": self.user }))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn email(&self) -> &str {
        &self.user.email
    }
}
