//! Drives one chat request from send to final update
//!
//! Reports through a sink instead of touching the message list, so the
//! session stays the single owner of chat state.

use std::time::Duration;

use bytes::Bytes;
use futures::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::events::{StreamEnd, StreamUpdate, UpdateKind};
use crate::ai::client::{ByteStream, ChatTransport};
use crate::ai::sse::SseStreamProcessor;
use crate::error::{ChatError, ChatResult};

/// A request accepted by the session and waiting to be streamed
#[derive(Debug, Clone)]
pub struct PendingRequest {
    /// Id of the assistant placeholder this request fills
    pub message_id: String,
    /// Trimmed user text
    pub text: String,
    pub cancel: CancellationToken,
}

/// Send the request and report every update to `sink`
///
/// The sink always receives exactly one [`UpdateKind::Finished`], even if
/// this future is dropped before completing.
pub async fn stream_reply<F>(
    transport: &dyn ChatTransport,
    request: PendingRequest,
    idle_timeout: Option<Duration>,
    sink: F,
) where
    F: FnMut(StreamUpdate) + Send,
{
    let PendingRequest {
        message_id,
        text,
        cancel,
    } = request;

    let abort_id = message_id.clone();
    let mut reporter = scopeguard::guard((sink, false), move |(mut sink, finished)| {
        if !finished {
            warn!(message_id = %abort_id, "Chat stream dropped before finishing");
            sink(StreamUpdate::new(
                abort_id,
                UpdateKind::Finished(Err(ChatError::Aborted)),
            ));
        }
    });

    info!(message_id = %message_id, "Chat request started");
    let result = run(
        transport,
        &message_id,
        &text,
        &cancel,
        idle_timeout,
        &mut reporter.0,
    )
    .await;

    match &result {
        Ok(end) => info!(message_id = %message_id, ?end, "Chat request finished"),
        Err(e) => warn!(message_id = %message_id, error = %e, "Chat request failed"),
    }

    let (sink, finished) = &mut *reporter;
    sink(StreamUpdate::new(message_id, UpdateKind::Finished(result)));
    *finished = true;
}

async fn run<F>(
    transport: &dyn ChatTransport,
    message_id: &str,
    text: &str,
    cancel: &CancellationToken,
    idle_timeout: Option<Duration>,
    sink: &mut F,
) -> ChatResult<StreamEnd>
where
    F: FnMut(StreamUpdate),
{
    let mut body = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Ok(StreamEnd::Cancelled),
        response = send_with_timeout(transport, text, idle_timeout) => response?,
    };
    sink(StreamUpdate::new(message_id, UpdateKind::Opened));

    let mut processor = SseStreamProcessor::new();
    loop {
        let chunk = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(message_id, "Cancellation requested mid-stream");
                processor.finish();
                return Ok(StreamEnd::Cancelled);
            }
            next = next_chunk(&mut body, idle_timeout) => next?,
        };

        let Some(chunk) = chunk else {
            processor.finish();
            warn!(message_id, "Chat stream ended without a done event");
            return Ok(StreamEnd::Eof);
        };

        for event in processor.process_chunk(&chunk) {
            let done = event.is_done();
            sink(StreamUpdate::new(message_id, UpdateKind::Event(event)));
            if done {
                // Anything after the first done event is ignored
                processor.finish();
                return Ok(StreamEnd::Done);
            }
        }
    }
}

/// The idle limit also covers the wait for response headers
async fn send_with_timeout(
    transport: &dyn ChatTransport,
    text: &str,
    idle_timeout: Option<Duration>,
) -> ChatResult<ByteStream> {
    match idle_timeout {
        Some(limit) => tokio::time::timeout(limit, transport.send(text))
            .await
            .map_err(|_| ChatError::IdleTimeout(limit))?,
        None => transport.send(text).await,
    }
}

async fn next_chunk(
    body: &mut ByteStream,
    idle_timeout: Option<Duration>,
) -> ChatResult<Option<Bytes>> {
    let next = match idle_timeout {
        Some(limit) => tokio::time::timeout(limit, body.next())
            .await
            .map_err(|_| ChatError::IdleTimeout(limit))?,
        None => body.next().await,
    };
    next.transpose()
}
