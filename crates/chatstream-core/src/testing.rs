//! In-memory transport for tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};

use crate::ai::client::{ByteStream, ChatTransport};
use crate::error::{ChatError, ChatResult};

/// What the fake backend does when called
#[derive(Debug, Clone)]
pub enum Script {
    /// Return these chunks, then end the body
    Chunks(Vec<&'static str>),
    /// Fail with this HTTP status
    Status(u16),
    /// Return these chunks, then break the connection
    BrokenAfter(Vec<&'static str>),
    /// Return these chunks, then never send anything again
    Hang(Vec<&'static str>),
    /// Accept the request but never answer with headers
    HangBeforeHeaders,
}

pub struct ScriptedTransport {
    script: Script,
    calls: AtomicUsize,
    sent: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

fn chunks(parts: &[&'static str]) -> impl futures::Stream<Item = ChatResult<Bytes>> + Send {
    stream::iter(
        parts
            .iter()
            .map(|p| Ok(Bytes::from_static(p.as_bytes())))
            .collect::<Vec<_>>(),
    )
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn send(&self, message: &str) -> ChatResult<ByteStream> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(message.to_string());

        match &self.script {
            Script::Chunks(parts) => Ok(Box::pin(chunks(parts))),
            Script::Status(status) => Err(ChatError::Status {
                status: *status,
                body: "scripted failure".to_string(),
            }),
            Script::BrokenAfter(parts) => Ok(Box::pin(chunks(parts).chain(stream::once(
                async { Err(ChatError::Stream("connection reset".to_string())) },
            )))),
            Script::Hang(parts) => Ok(Box::pin(chunks(parts).chain(stream::pending()))),
            Script::HangBeforeHeaders => futures::future::pending().await,
        }
    }
}
