use bytes::Bytes;
use futures::{Stream, StreamExt};

use crate::domain::StreamEvent;

/// Splits a byte stream into newline-delimited lines.
///
/// Buffers raw bytes rather than text, so a multi-byte character split across
/// two reads is decoded only once both halves have arrived.
#[derive(Debug, Default)]
pub struct NdjsonLineDecoder {
    pending: Vec<u8>,
}

impl NdjsonLineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every complete, non-blank line contained in the data seen so far.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);
        let mut lines = Vec::new();

        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.pending.drain(..=pos).collect();
            if let Some(line) = decode_line(&raw) {
                lines.push(line);
            }
        }

        lines
    }

    /// Flushes a trailing line that never received its newline.
    pub fn finish(&mut self) -> Option<String> {
        let raw = std::mem::take(&mut self.pending);
        decode_line(&raw)
    }
}

fn decode_line(raw: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(raw);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumerUpdate {
    /// The mind map should become visible. Sent at most once per generation.
    Shown,
    Markdown(String),
    Completed(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumerState {
    Streaming,
    Completed,
    Failed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StreamConsumerError {
    #[error("{0}")]
    Relay(String),
    #[error("stream read failed: {0}")]
    Transport(String),
}

/// Rebuilds the growing markdown from the relay's NDJSON events.
#[derive(Debug)]
pub struct StreamConsumer {
    decoder: NdjsonLineDecoder,
    markdown: String,
    visible: bool,
    state: ConsumerState,
}

impl Default for StreamConsumer {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamConsumer {
    pub fn new() -> Self {
        Self {
            decoder: NdjsonLineDecoder::new(),
            markdown: String::new(),
            visible: false,
            state: ConsumerState::Streaming,
        }
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn state(&self) -> &ConsumerState {
        &self.state
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, ConsumerState::Failed(_))
    }

    pub fn feed(&mut self, chunk: &[u8]) -> Vec<ConsumerUpdate> {
        if self.is_failed() {
            return Vec::new();
        }

        let lines = self.decoder.push(chunk);
        self.apply_lines(lines)
    }

    pub fn finish(&mut self) -> Vec<ConsumerUpdate> {
        if self.is_failed() {
            return Vec::new();
        }

        let lines: Vec<String> = self.decoder.finish().into_iter().collect();
        self.apply_lines(lines)
    }

    fn apply_lines(&mut self, lines: Vec<String>) -> Vec<ConsumerUpdate> {
        let mut updates = Vec::new();

        for line in lines {
            let event = match serde_json::from_str::<StreamEvent>(&line) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, line = %line, "Skipping malformed stream line");
                    continue;
                }
            };

            self.apply_event(event, &mut updates);
            if self.is_failed() {
                break;
            }
        }

        updates
    }

    fn apply_event(&mut self, event: StreamEvent, updates: &mut Vec<ConsumerUpdate>) {
        match event {
            StreamEvent::Error { error } => {
                self.state = ConsumerState::Failed(error.clone());
                updates.push(ConsumerUpdate::Failed(error));
            }
            StreamEvent::Chunk { markdown, .. } => {
                if markdown.is_empty() {
                    return;
                }
                self.show_once(updates);
                self.markdown = markdown.clone();
                updates.push(ConsumerUpdate::Markdown(markdown));
            }
            StreamEvent::Done { markdown } => {
                if !markdown.is_empty() {
                    self.show_once(updates);
                    self.markdown = markdown.clone();
                }
                self.state = ConsumerState::Completed;
                updates.push(ConsumerUpdate::Completed(markdown));
            }
        }
    }

    fn show_once(&mut self, updates: &mut Vec<ConsumerUpdate>) {
        if !self.visible {
            self.visible = true;
            updates.push(ConsumerUpdate::Shown);
        }
    }
}

/// Drives a [`StreamConsumer`] over a relay response body.
///
/// Returns the final markdown, or the first error event's message.
pub async fn consume_stream<S, E, F>(
    stream: S,
    mut on_update: F,
) -> Result<String, StreamConsumerError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: std::fmt::Display,
    F: FnMut(ConsumerUpdate),
{
    let mut consumer = StreamConsumer::new();
    let mut stream = std::pin::pin!(stream);

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| StreamConsumerError::Transport(e.to_string()))?;
        for update in consumer.feed(&chunk) {
            on_update(update);
        }
        if let ConsumerState::Failed(message) = consumer.state() {
            return Err(StreamConsumerError::Relay(message.clone()));
        }
    }

    for update in consumer.finish() {
        on_update(update);
    }
    if let ConsumerState::Failed(message) = consumer.state() {
        return Err(StreamConsumerError::Relay(message.clone()));
    }

    Ok(consumer.markdown().to_string())
}
