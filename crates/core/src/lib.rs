pub mod conversation;
pub mod error;
pub mod inference;
pub mod models;
pub mod prompt;
pub mod session;

use serde::{Deserialize, Serialize};

use crate::error::ChatError;

/// Who spoke a turn. Serialized lowercase to match the chat wire format.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Parse a role from its wire spelling. Anything outside the three
    /// known roles is rejected here, so a constructed [`Turn`] always
    /// carries a valid role.
    pub fn parse(s: &str) -> Result<Self, ChatError> {
        match s {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(ChatError::InvalidRole(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One message of the conversation. Content is never edited after
/// construction; empty content is allowed.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}
