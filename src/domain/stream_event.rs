use serde::{Deserialize, Serialize};

/// One event on the relay's NDJSON response stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "StreamEventFrame", try_from = "StreamEventFrame")]
pub enum StreamEvent {
    Chunk { chunk: String, markdown: String },
    Done { markdown: String },
    Error { error: String },
}

impl StreamEvent {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    pub fn markdown(&self) -> Option<&str> {
        match self {
            Self::Chunk { markdown, .. } | Self::Done { markdown } => Some(markdown),
            Self::Error { .. } => None,
        }
    }

    /// Serializes the event as a single newline-terminated JSON line.
    pub fn to_ndjson_line(&self) -> String {
        let mut line = serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to serialize stream event");
            r#"{"error":"Failed to serialize stream event"}"#.to_string()
        });
        line.push('\n');
        line
    }
}

/// Flat wire shape: `{chunk, markdown}`, `{done: true, markdown}` or `{error}`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StreamEventFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<StreamEvent> for StreamEventFrame {
    fn from(event: StreamEvent) -> Self {
        match event {
            StreamEvent::Chunk { chunk, markdown } => Self {
                chunk: Some(chunk),
                markdown: Some(markdown),
                ..Self::default()
            },
            StreamEvent::Done { markdown } => Self {
                done: Some(true),
                markdown: Some(markdown),
                ..Self::default()
            },
            StreamEvent::Error { error } => Self {
                error: Some(error),
                ..Self::default()
            },
        }
    }
}

impl TryFrom<StreamEventFrame> for StreamEvent {
    type Error = String;

    fn try_from(frame: StreamEventFrame) -> Result<Self, String> {
        if let Some(error) = frame.error {
            return Ok(StreamEvent::Error { error });
        }

        match (frame.done, frame.chunk, frame.markdown) {
            (Some(true), _, Some(markdown)) => Ok(StreamEvent::Done { markdown }),
            (_, chunk, Some(markdown)) => Ok(StreamEvent::Chunk {
                chunk: chunk.unwrap_or_default(),
                markdown,
            }),
            _ => Err("stream event carries neither markdown nor error".to_string()),
        }
    }
}
