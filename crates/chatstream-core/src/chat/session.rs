//! Chat session
//!
//! Owns the message list and the request lifecycle. Streaming happens
//! elsewhere ([`stream_reply`]) and comes back as [`StreamUpdate`]s, which
//! are applied here in arrival order.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::cancellation::ChatCancellation;
use super::driver::{stream_reply, PendingRequest};
use super::events::{StreamEnd, StreamUpdate, UpdateKind};
use super::message::Message;
use super::state::{RequestOutcome, RequestPhase, RequestState};
use crate::ai::client::ChatTransport;
use crate::ai::streaming::ChatEvent;

/// Shown in place of the reply when the backend cannot be reached
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Sorry, I couldn't connect to the server. Please check your connection and try again.";

/// Shown when a request is cancelled before any reply text arrived
pub const CANCELLED_MESSAGE: &str = "Request cancelled.";

#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<Message>,
    state: RequestState,
    /// Assistant message of the request in flight
    active_id: Option<String>,
    cancellation: ChatCancellation,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// A request is in flight; input should be disabled
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn phase(&self) -> RequestPhase {
        self.state.phase()
    }

    pub fn last_outcome(&self) -> Option<RequestOutcome> {
        self.state.last_outcome()
    }

    /// How long the request in flight has been running
    pub fn elapsed(&self) -> Option<Duration> {
        self.state.elapsed()
    }

    /// Accept a user message and open the assistant placeholder
    ///
    /// Returns `None` without touching anything when the trimmed input is
    /// empty or a request is already in flight.
    pub fn begin(&mut self, input: &str) -> Option<PendingRequest> {
        let text = input.trim();
        if text.is_empty() {
            debug!("Ignoring empty submission");
            return None;
        }
        if self.is_busy() {
            debug!(phase = ?self.phase(), "Ignoring submission while a request is in flight");
            return None;
        }

        self.messages.push(Message::user(text));
        let placeholder = Message::assistant_placeholder();
        let message_id = placeholder.id.clone();
        self.messages.push(placeholder);

        self.state.start();
        let cancel = self.cancellation.start_request();
        self.active_id = Some(message_id.clone());
        info!(
            message_id = %message_id,
            request = self.state.request_count,
            "Submitted chat message"
        );

        Some(PendingRequest {
            message_id,
            text: text.to_string(),
            cancel,
        })
    }

    /// Apply one update from the streaming task
    ///
    /// Returns the outcome when this update ended the request.
    pub fn apply(&mut self, update: StreamUpdate) -> Option<RequestOutcome> {
        if self.active_id.as_deref() != Some(update.message_id.as_str()) {
            debug!(message_id = %update.message_id, "Ignoring update for inactive message");
            return None;
        }

        match update.kind {
            UpdateKind::Opened => {
                self.state.opened();
                None
            }
            UpdateKind::Event(event) => {
                let done = event.is_done();
                let message = self.active_message_mut()?;
                match event {
                    // Cards are terminal; text never mixes back in
                    ChatEvent::Token { .. } if message.has_cards() => {
                        debug!("Ignoring token after cards");
                    }
                    ChatEvent::Token { token, .. } => message.append_token(&token),
                    ChatEvent::Cards { data, .. } => {
                        debug!(
                            total_found = data.total_found,
                            rows = data.work_orders.len(),
                            "Reply replaced by cards"
                        );
                        message.set_cards(data);
                    }
                }
                done.then(|| self.finish(RequestOutcome::Completed))
            }
            UpdateKind::Finished(Ok(StreamEnd::Done | StreamEnd::Eof)) => {
                Some(self.finish(RequestOutcome::Completed))
            }
            UpdateKind::Finished(Ok(StreamEnd::Cancelled)) => {
                if let Some(message) = self.active_message_mut() {
                    if message.is_empty() {
                        message.replace_text(CANCELLED_MESSAGE);
                    }
                }
                Some(self.finish(RequestOutcome::Cancelled))
            }
            UpdateKind::Finished(Err(e)) => {
                warn!(error = %e, "Chat request failed, showing fallback notice");
                if let Some(message) = self.active_message_mut() {
                    message.replace_text(CONNECTION_ERROR_MESSAGE);
                }
                Some(self.finish(RequestOutcome::Failed))
            }
        }
    }

    /// Ask the request in flight to stop. Returns false when idle.
    pub fn cancel(&mut self) -> bool {
        if !self.is_busy() {
            return false;
        }
        if self.cancellation.cancel() {
            info!("Cancelling chat request");
        }
        true
    }

    /// Submit and stream the reply on the calling task
    ///
    /// Returns `None` when the submission was ignored.
    pub async fn submit(
        &mut self,
        transport: &dyn ChatTransport,
        input: &str,
        idle_timeout: Option<Duration>,
    ) -> Option<RequestOutcome> {
        let request = self.begin(input)?;
        let mut outcome = None;
        stream_reply(transport, request, idle_timeout, |update| {
            if let Some(done) = self.apply(update) {
                outcome = Some(done);
            }
        })
        .await;
        outcome
    }

    fn active_message_mut(&mut self) -> Option<&mut Message> {
        let id = self.active_id.as_deref()?;
        self.messages.iter_mut().rev().find(|m| m.id == id)
    }

    fn finish(&mut self, outcome: RequestOutcome) -> RequestOutcome {
        self.active_id = None;
        if let Some(took) = self.state.finish(outcome) {
            info!(?outcome, ?took, "Chat request ended");
        }
        outcome
    }
}
