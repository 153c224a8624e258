//! Streaming event types for chat replies

use serde::Deserialize;

use super::types::CardData;

/// One decoded event from the reply stream
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// Incremental text to append to the reply
    Token { token: String, done: bool },
    /// Structured result set that replaces the reply text
    Cards { data: CardData, done: bool },
}

impl ChatEvent {
    /// Whether this event ends the interaction
    pub fn is_done(&self) -> bool {
        match self {
            ChatEvent::Token { done, .. } | ChatEvent::Cards { done, .. } => *done,
        }
    }

    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            ChatEvent::Token { .. } => "token",
            ChatEvent::Cards { .. } => "cards",
        }
    }

    /// Decode a JSON payload (the part after `data: `)
    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<WireEvent>(payload).map(Into::into)
    }
}

/// Payload shapes as they appear on the wire. A `type: "cards"` field
/// selects the cards shape, everything else must be a token.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireEvent {
    Cards {
        #[serde(rename = "type")]
        _kind: CardsTag,
        data: CardData,
        #[serde(default)]
        done: bool,
    },
    Token {
        token: String,
        #[serde(default)]
        done: bool,
    },
}

#[derive(Deserialize)]
enum CardsTag {
    #[serde(rename = "cards")]
    Cards,
}

impl From<WireEvent> for ChatEvent {
    fn from(wire: WireEvent) -> Self {
        match wire {
            WireEvent::Cards { data, done, .. } => ChatEvent::Cards { data, done },
            WireEvent::Token { token, done } => ChatEvent::Token { token, done },
        }
    }
}
