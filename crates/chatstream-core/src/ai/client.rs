//! HTTP transport for the chat backend
//!
//! The transport only opens the request and hands back the raw body stream;
//! decoding happens in [`crate::ai::sse`].

use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ChatConfig;
use crate::error::{ChatError, ChatResult};

/// Raw response body, chunked however the network delivered it
pub type ByteStream = Pin<Box<dyn Stream<Item = ChatResult<Bytes>> + Send>>;

/// Something that can send a chat message and return the reply body
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send `message` and resolve once response headers arrive
    ///
    /// Non-success statuses must be reported as [`ChatError::Status`].
    async fn send(&self, message: &str) -> ChatResult<ByteStream>;
}

/// Request body for `POST {base}/chat`
#[derive(Debug, Serialize)]
struct ChatRequestBody<'a> {
    message: &'a str,
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &ChatConfig) -> ChatResult<Self> {
        let endpoint = config.chat_endpoint()?;
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;
        info!(endpoint = %endpoint, "HTTP chat transport ready");
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, message: &str) -> ChatResult<ByteStream> {
        debug!(endpoint = %self.endpoint, chars = message.len(), "Sending chat request");

        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "text/event-stream")
            .header(CONTENT_TYPE, "application/json")
            .json(&ChatRequestBody { message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Chat backend returned error status");
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), "Chat response headers received");
        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| ChatError::Stream(e.to_string())));
        Ok(Box::pin(stream))
    }
}
