//! SSE (Server-Sent Events) stream processing utilities
//!
//! Turns a chunked response body into [`ChatEvent`]s. Chunks may split a
//! line (or a multi-byte character) anywhere; only complete lines are decoded.

use bytes::Bytes;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::streaming::ChatEvent;

/// Prefix that marks an event line
pub const DATA_PREFIX: &str = "data:";

/// Byte buffer that hands out complete lines
///
/// Lines are split on `\n` at the byte level and decoded only once
/// complete, so the result does not depend on where chunks were cut.
#[derive(Debug, Default)]
pub struct SseLineBuffer {
    pending: Vec<u8>,
}

impl SseLineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk to the buffer
    pub fn push(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
    }

    /// Remove and return the first complete line, without its terminator
    pub fn next_line(&mut self) -> Option<String> {
        let pos = self.pending.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Bytes of the trailing partial line still waiting for a newline
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Decodes SSE lines into chat events with best-effort tolerance
///
/// Lines that do not carry a decodable payload are logged and skipped.
pub struct SseStreamProcessor {
    buffer: SseLineBuffer,
    /// When the stream started
    stream_start: Instant,
    /// Event counter for logging
    event_count: usize,
    /// Bytes received counter
    bytes_received: usize,
    skipped_lines: usize,
}

impl SseStreamProcessor {
    pub fn new() -> Self {
        debug!("SSE stream processor created");
        Self {
            buffer: SseLineBuffer::new(),
            stream_start: Instant::now(),
            event_count: 0,
            bytes_received: 0,
            skipped_lines: 0,
        }
    }

    /// Process a chunk of bytes, returning every event it completed, in order
    pub fn process_chunk(&mut self, bytes: &Bytes) -> Vec<ChatEvent> {
        self.bytes_received += bytes.len();
        debug!(
            "SSE chunk received: {} bytes (total: {} bytes)",
            bytes.len(),
            self.bytes_received
        );

        self.buffer.push(bytes);

        let mut events = Vec::new();
        while let Some(line) = self.buffer.next_line() {
            if let Some(event) = self.process_line(&line) {
                events.push(event);
            }
        }
        events
    }

    /// Decode a single complete line
    pub fn process_line(&mut self, line: &str) -> Option<ChatEvent> {
        // Skip empty lines and SSE comments
        if line.trim().is_empty() || line.starts_with(':') {
            return None;
        }

        let Some(data) = line.strip_prefix(DATA_PREFIX) else {
            debug!("Skipping non-data SSE line: {}", line);
            self.skipped_lines += 1;
            return None;
        };
        let data = data.strip_prefix(' ').unwrap_or(data);

        match ChatEvent::from_json(data) {
            Ok(event) => {
                self.event_count += 1;
                debug!(
                    "SSE event #{} at {:?}: type={} done={}",
                    self.event_count,
                    self.stream_start.elapsed(),
                    event.kind(),
                    event.is_done()
                );
                Some(event)
            }
            Err(e) => {
                self.skipped_lines += 1;
                warn!("Failed to parse SSE JSON ({}): {}", e, data);
                None
            }
        }
    }

    /// Log a summary; anything left in the buffer is an unterminated line
    pub fn finish(&self) {
        let pending = self.buffer.pending_len();
        if pending > 0 {
            warn!("SSE stream ended with {} bytes of unterminated data", pending);
        }
        info!(
            "SSE stream processor finishing: {:?} elapsed, {} events, {} skipped lines, {} bytes total",
            self.stream_start.elapsed(),
            self.event_count,
            self.skipped_lines,
            self.bytes_received
        );
    }

    pub fn event_count(&self) -> usize {
        self.event_count
    }

    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }
}

impl Default for SseStreamProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a whole sequence of chunks at once
pub fn decode_chunks<I>(chunks: I) -> Vec<ChatEvent>
where
    I: IntoIterator<Item = Bytes>,
{
    let mut processor = SseStreamProcessor::new();
    chunks
        .into_iter()
        .flat_map(|chunk| processor.process_chunk(&chunk))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STREAM: &str = concat!(
        "data: {\"token\":\"Grüße \",\"done\":false}\n",
        ": keep-alive\n",
        "\n",
        "data: {\"token\":\"🦀 crab\",\"done\":false}\r\n",
        "data: {oops}\n",
        "data: {\"type\":\"cards\",\"done\":true,\"data\":{\"query\":\"q\",\"total_found\":1,\"avg_similarity\":0.5,\"work_orders\":[{\"work_order_id\":\"WO-7\"}]}}\n",
    );

    fn token(text: &str, done: bool) -> ChatEvent {
        ChatEvent::Token {
            token: text.to_string(),
            done,
        }
    }

    #[test]
    fn test_line_buffer_keeps_partial_line() {
        let mut buffer = SseLineBuffer::new();
        buffer.push(b"data: one\ndata: tw");
        assert_eq!(buffer.next_line().as_deref(), Some("data: one"));
        assert_eq!(buffer.next_line(), None);
        assert_eq!(buffer.pending_len(), 8);

        buffer.push(b"o\r\n");
        assert_eq!(buffer.next_line().as_deref(), Some("data: two"));
        assert_eq!(buffer.pending_len(), 0);
    }

    #[test]
    fn test_decodes_single_chunk() {
        let events = decode_chunks([Bytes::from_static(STREAM.as_bytes())]);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], token("Grüße ", false));
        assert_eq!(events[1], token("🦀 crab", false));
        assert!(matches!(&events[2], ChatEvent::Cards { done: true, .. }));
    }

    #[test]
    fn test_fragmentation_invariance_two_way_splits() {
        let bytes = STREAM.as_bytes();
        let expected = decode_chunks([Bytes::copy_from_slice(bytes)]);

        // Every cut point, including ones inside multi-byte characters
        for cut in 0..=bytes.len() {
            let chunks = [
                Bytes::copy_from_slice(&bytes[..cut]),
                Bytes::copy_from_slice(&bytes[cut..]),
            ];
            assert_eq!(decode_chunks(chunks), expected, "split at byte {}", cut);
        }
    }

    #[test]
    fn test_fragmentation_invariance_byte_by_byte() {
        let bytes = STREAM.as_bytes();
        let expected = decode_chunks([Bytes::copy_from_slice(bytes)]);
        let chunks = bytes.iter().map(|b| Bytes::copy_from_slice(&[*b]));
        assert_eq!(decode_chunks(chunks), expected);
    }

    #[test]
    fn test_malformed_line_does_not_corrupt_following_lines() {
        let mut processor = SseStreamProcessor::new();
        let events = processor.process_chunk(&Bytes::from_static(
            b"data: {\"token\":\"a\"\ndata: {\"token\":\"b\",\"done\":false}\n",
        ));
        assert_eq!(events, vec![token("b", false)]);
        assert_eq!(processor.skipped_lines(), 1);
        assert_eq!(processor.event_count(), 1);
    }

    #[test]
    fn test_non_data_lines_are_skipped() {
        let mut processor = SseStreamProcessor::new();
        assert_eq!(processor.process_line("event: message"), None);
        assert_eq!(processor.process_line(": comment"), None);
        assert_eq!(processor.process_line("   "), None);
        assert_eq!(processor.skipped_lines(), 1);
    }

    #[test]
    fn test_prefix_without_space() {
        let mut processor = SseStreamProcessor::new();
        assert_eq!(
            processor.process_line(r#"data:{"token":"x","done":true}"#),
            Some(token("x", true))
        );
    }

    #[test]
    fn test_unterminated_tail_is_not_emitted() {
        let events = decode_chunks([Bytes::from_static(
            b"data: {\"token\":\"a\",\"done\":false}\ndata: {\"token\":\"b\",\"done\":true}",
        )]);
        assert_eq!(events, vec![token("a", false)]);
    }
}
