//! Request state tracking
//!
//! One request at a time: `Idle -> Sending -> Streaming -> Idle`, with the
//! way it ended recorded as a [`RequestOutcome`].

use std::time::{Duration, Instant};

use serde::Serialize;

/// Where the current request is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum RequestPhase {
    #[default]
    Idle,
    /// Request issued, waiting for response headers
    Sending,
    /// Reading the reply body
    Streaming,
}

/// How a request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequestOutcome {
    Completed,
    Failed,
    Cancelled,
}

/// Runtime state of the request lifecycle
#[derive(Debug, Default)]
pub struct RequestState {
    phase: RequestPhase,
    /// Number of requests started this session
    pub request_count: usize,
    /// When the current request started
    started_at: Option<Instant>,
    last_outcome: Option<RequestOutcome>,
}

impl RequestState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    /// A request is in flight
    pub fn is_busy(&self) -> bool {
        self.phase != RequestPhase::Idle
    }

    pub fn last_outcome(&self) -> Option<RequestOutcome> {
        self.last_outcome
    }

    /// Start a new request. Returns false if one is already in flight.
    pub fn start(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.phase = RequestPhase::Sending;
        self.request_count += 1;
        self.started_at = Some(Instant::now());
        true
    }

    /// Response headers arrived
    pub fn opened(&mut self) -> bool {
        if self.phase != RequestPhase::Sending {
            return false;
        }
        self.phase = RequestPhase::Streaming;
        true
    }

    /// End the current request and go back to idle
    ///
    /// Returns how long the request took, or None if nothing was in flight.
    pub fn finish(&mut self, outcome: RequestOutcome) -> Option<Duration> {
        if !self.is_busy() {
            return None;
        }
        self.phase = RequestPhase::Idle;
        self.last_outcome = Some(outcome);
        self.started_at.take().map(|start| start.elapsed())
    }

    /// Duration of the request in flight
    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at.map(|start| start.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_lifecycle() {
        let mut state = RequestState::new();
        assert_eq!(state.phase(), RequestPhase::Idle);

        assert!(state.start());
        assert_eq!(state.phase(), RequestPhase::Sending);
        assert!(state.is_busy());

        assert!(state.opened());
        assert_eq!(state.phase(), RequestPhase::Streaming);

        assert!(state.finish(RequestOutcome::Completed).is_some());
        assert_eq!(state.phase(), RequestPhase::Idle);
        assert_eq!(state.last_outcome(), Some(RequestOutcome::Completed));
        assert_eq!(state.request_count, 1);
    }

    #[test]
    fn test_single_flight() {
        let mut state = RequestState::new();
        assert!(state.start());
        assert!(!state.start());
        assert_eq!(state.request_count, 1);
    }

    #[test]
    fn test_failure_before_headers() {
        let mut state = RequestState::new();
        state.start();
        assert!(state.finish(RequestOutcome::Failed).is_some());
        assert!(!state.is_busy());
        assert!(!state.opened());
    }

    #[test]
    fn test_finish_when_idle_is_noop() {
        let mut state = RequestState::new();
        assert!(state.finish(RequestOutcome::Cancelled).is_none());
        assert_eq!(state.last_outcome(), None);
    }
}
