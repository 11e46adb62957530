use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

/// Incremental text deltas from a streaming completion.
pub type LlmTokenStream = Pin<Box<dyn Stream<Item = Result<String, LlmClientError>> + Send>>;

#[derive(Clone, PartialEq)]
pub struct ChatCompletionParams {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_tokens: usize,
}

impl std::fmt::Debug for ChatCompletionParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionParams")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("prompt_chars", &self.user_prompt.chars().count())
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete_stream(
        &self,
        params: &ChatCompletionParams,
    ) -> Result<LlmTokenStream, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("{0}")]
    UpstreamRejected(String),
    #[error("rate limited by upstream API")]
    RateLimited,
    #[error("stream interrupted: {0}")]
    StreamInterrupted(String),
}
