//! Stream updates
//!
//! What the streaming task reports back to the session that owns the messages.

use crate::ai::streaming::ChatEvent;
use crate::error::ChatError;

/// Update for the assistant message with id `message_id`
#[derive(Debug)]
pub struct StreamUpdate {
    pub message_id: String,
    pub kind: UpdateKind,
}

#[derive(Debug)]
pub enum UpdateKind {
    /// Response headers arrived with a success status
    Opened,
    /// A decoded event, in stream order
    Event(ChatEvent),
    /// The request is over. Sent exactly once per request.
    Finished(Result<StreamEnd, ChatError>),
}

/// Why a stream stopped without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    /// An event carried `done = true`
    Done,
    /// Body ended without a `done` event
    Eof,
    /// Cancelled from the client side
    Cancelled,
}

impl StreamUpdate {
    pub fn new(message_id: impl Into<String>, kind: UpdateKind) -> Self {
        Self {
            message_id: message_id.into(),
            kind,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.kind, UpdateKind::Finished(_))
    }
}
