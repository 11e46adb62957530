use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    ChatCompletionParams, LlmClient, LlmClientError, LlmTokenStream,
};

use super::sse_decoder::SseDeltaDecoder;

const DEFAULT_ERROR_MESSAGE: &str = "Failed to generate mind map";

/// Client for OpenAI-compatible streaming chat-completion endpoints (DeepSeek and friends).
///
/// The endpoint and key come with every call, so one instance serves all callers.
pub struct StreamingLlmClient {
    client: Client,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: usize,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct UpstreamErrorBody {
    error: Option<UpstreamError>,
}

#[derive(Deserialize)]
struct UpstreamError {
    message: Option<String>,
}

impl StreamingLlmClient {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn build_request<'a>(params: &'a ChatCompletionParams) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &params.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &params.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &params.user_prompt,
                },
            ],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            stream: true,
        }
    }
}

impl Default for StreamingLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for StreamingLlmClient {
    #[tracing::instrument(skip(self, params), fields(endpoint = %params.endpoint, model = %params.model))]
    async fn complete_stream(
        &self,
        params: &ChatCompletionParams,
    ) -> Result<LlmTokenStream, LlmClientError> {
        let response = self
            .client
            .post(&params.endpoint)
            .bearer_auth(&params.api_key)
            .json(&Self::build_request(params))
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Upstream rejected chat completion");
            return Err(LlmClientError::UpstreamRejected(upstream_error_message(
                status, &body,
            )));
        }

        tracing::debug!("Upstream stream opened");
        Ok(delta_stream(response.bytes_stream()))
    }
}

/// Picks the upstream's own `error.message` when it sends one.
fn upstream_error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<UpstreamErrorBody>(body) {
        Ok(UpstreamErrorBody {
            error: Some(UpstreamError {
                message: Some(message),
            }),
        }) => message,
        Ok(_) => DEFAULT_ERROR_MESSAGE.to_string(),
        Err(_) if body.trim().is_empty() => format!("HTTP {}: {}", status, DEFAULT_ERROR_MESSAGE),
        Err(_) => format!("HTTP {}: {}", status, body.trim()),
    }
}

/// Decodes a raw event-stream body into content deltas.
pub fn delta_stream<S, E>(body: S) -> LlmTokenStream
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut body = Box::pin(body);
        let mut decoder = SseDeltaDecoder::new();
        let mut interrupted = false;

        while let Some(chunk) = body.next().await {
            match chunk {
                Ok(bytes) => {
                    for delta in decoder.push(&bytes) {
                        yield Ok(delta);
                    }
                }
                Err(e) => {
                    yield Err(LlmClientError::StreamInterrupted(e.to_string()));
                    interrupted = true;
                    break;
                }
            }
        }

        if !interrupted {
            for delta in decoder.finish() {
                yield Ok(delta);
            }
        }

        if decoder.skipped_lines() > 0 {
            tracing::warn!(skipped = decoder.skipped_lines(), "Upstream stream had malformed lines");
        }
    })
}
