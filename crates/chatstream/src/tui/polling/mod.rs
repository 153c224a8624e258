//! Channel Polling
//!
//! The streaming task reports through a channel; these functions drain it
//! on the UI task and apply updates to the session in arrival order.

use chatstream_core::chat::{ChatSession, RequestOutcome, StreamUpdate};
use tokio::sync::mpsc::{self, error::TryRecvError};

/// Result of a polling operation that may trigger UI updates
#[derive(Debug, Default)]
pub struct PollResult {
    /// Whether any data was received that requires a redraw
    pub needs_redraw: bool,
    /// Set when an update ended the request
    pub outcome: Option<RequestOutcome>,
}

impl PollResult {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Poll the stream-update channel without blocking
///
/// The receiver is dropped once the sending task is gone.
pub fn poll_stream_updates(
    channel: &mut Option<mpsc::UnboundedReceiver<StreamUpdate>>,
    session: &mut ChatSession,
) -> PollResult {
    let mut result = PollResult::new();

    // Take the receiver temporarily to poll it
    let Some(mut rx) = channel.take() else {
        return result;
    };

    loop {
        match rx.try_recv() {
            Ok(update) => {
                result.needs_redraw = true;
                if let Some(outcome) = session.apply(update) {
                    result.outcome = Some(outcome);
                }
            }
            Err(TryRecvError::Empty) => {
                // No more data available, put receiver back
                *channel = Some(rx);
                break;
            }
            Err(TryRecvError::Disconnected) => {
                tracing::debug!("Stream update channel disconnected");
                break;
            }
        }
    }

    result
}
