//! Wire protocol: transport, SSE decoding, and payload types

pub mod client;
pub mod sse;
pub mod streaming;
pub mod types;

pub use client::{ByteStream, ChatTransport, HttpTransport};
pub use sse::{SseLineBuffer, SseStreamProcessor};
pub use streaming::ChatEvent;
pub use types::{percent_label, CardData, WorkOrder};
