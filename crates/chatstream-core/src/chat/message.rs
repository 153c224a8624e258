//! Chat messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ai::types::CardData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single entry in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    /// Plain text; grows while a reply streams in
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Structured results; when set, this is what gets displayed
    pub card_data: Option<CardData>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            created_at: Utc::now(),
            card_data: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Empty assistant message waiting for the reply
    pub fn assistant_placeholder() -> Self {
        Self::new(Role::Assistant, String::new())
    }

    pub fn append_token(&mut self, token: &str) {
        self.content.push_str(token);
    }

    /// Replace whatever was displayed with a structured result set
    pub fn set_cards(&mut self, data: CardData) {
        self.content.clear();
        self.card_data = Some(data);
    }

    /// Replace whatever was displayed with plain text
    pub fn replace_text(&mut self, text: impl Into<String>) {
        self.content = text.into();
        self.card_data = None;
    }

    pub fn has_cards(&self) -> bool {
        self.card_data.is_some()
    }

    /// Nothing to show yet
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.card_data.is_none()
    }
}
