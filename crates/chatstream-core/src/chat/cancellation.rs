//! Per-request cancellation
//!
//! Each submitted message gets its own token. Starting a new request retires
//! the previous one, so a stale driver can never outlive its reply.

use tokio_util::sync::CancellationToken;

/// Cancellation handle for the reply currently being streamed
#[derive(Clone, Debug, Default)]
pub struct ChatCancellation {
    token: CancellationToken,
}

impl ChatCancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retire the previous request's token and hand out one for the next
    /// reply. The driver only ever sees a child, so it cannot cancel the
    /// session's handle.
    pub fn start_request(&mut self) -> CancellationToken {
        let previous = std::mem::take(&mut self.token);
        previous.cancel();
        self.token.child_token()
    }

    /// Stop the reply in flight. Returns false if it was already stopped.
    pub fn cancel(&self) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        self.token.cancel();
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
