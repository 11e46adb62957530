use std::time::Duration;

use crate::application::ports::{ChatCompletionParams, LlmClient, LlmClientError, LlmTokenStream};

const SCAFFOLD_OUTLINE: &[&str] = &[
    "```markdown\n",
    "---\ntitle: Scaffold\n---\n\n",
    "# Scaffold mind map\n\n",
    "## Input\n\n- Upload a file\n- Or paste text\n\n",
    "## Output\n\n- Streamed outline\n- HTML and markdown export\n",
    "```",
];

/// Replays a fixed list of deltas instead of calling an upstream API.
pub struct MockLlmClient {
    deltas: Vec<String>,
    delay: Duration,
    start_error: Option<String>,
}

impl MockLlmClient {
    pub fn new(deltas: Vec<String>) -> Self {
        Self {
            deltas,
            delay: Duration::ZERO,
            start_error: None,
        }
    }

    /// Canned outline used when the server runs in scaffold mode.
    pub fn scaffold(delay_ms: u64) -> Self {
        Self::new(SCAFFOLD_OUTLINE.iter().map(|s| s.to_string()).collect())
            .with_delay(Duration::from_millis(delay_ms))
    }

    /// A client whose requests fail before any delta is produced.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            deltas: Vec::new(),
            delay: Duration::ZERO,
            start_error: Some(message.into()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete_stream(
        &self,
        _params: &ChatCompletionParams,
    ) -> Result<LlmTokenStream, LlmClientError> {
        if let Some(message) = &self.start_error {
            return Err(LlmClientError::ApiRequestFailed(message.clone()));
        }

        let deltas = self.deltas.clone();
        let delay = self.delay;

        Ok(Box::pin(async_stream::stream! {
            for delta in deltas {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                yield Ok(delta);
            }
        }))
    }
}
