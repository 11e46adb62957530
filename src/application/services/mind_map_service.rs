use std::pin::Pin;
use std::sync::Arc;

use futures::{Stream, StreamExt};

use crate::application::ports::{ChatCompletionParams, LlmClient};
use crate::domain::{GenerationRequest, StreamEvent, clean_generated_markdown};
use crate::infrastructure::observability::sanitize_prompt;

use super::prompt_template::{DEFAULT_SYSTEM_PROMPT, build_mind_map_prompt};

pub type StreamEventStream = Pin<Box<dyn Stream<Item = StreamEvent> + Send>>;

#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: 0.3,
            max_tokens: 2000,
        }
    }
}

/// Relays a generation request to the LLM and reshapes its deltas into [`StreamEvent`]s.
pub struct MindMapService<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
    options: GenerationOptions,
}

impl<L> MindMapService<L>
where
    L: LlmClient + 'static,
{
    pub fn new(llm_client: Arc<L>, options: GenerationOptions) -> Self {
        Self {
            llm_client,
            options,
        }
    }

    pub fn build_params(&self, request: &GenerationRequest) -> ChatCompletionParams {
        ChatCompletionParams {
            endpoint: request.api_endpoint().to_string(),
            api_key: request.api_key().to_string(),
            model: request.model_id().to_string(),
            system_prompt: self.options.system_prompt.clone(),
            user_prompt: build_mind_map_prompt(request.text()),
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
        }
    }

    /// Starts a generation. The returned stream always ends with exactly one
    /// `Done` or `Error` event.
    pub fn generate(&self, request: GenerationRequest) -> StreamEventStream {
        tracing::debug!(
            text = %sanitize_prompt(request.text()),
            model = %request.model_id(),
            "Starting mind map generation"
        );

        let params = self.build_params(&request);
        let llm_client = Arc::clone(&self.llm_client);

        Box::pin(async_stream::stream! {
            match llm_client.complete_stream(&params).await {
                Err(e) => {
                    tracing::error!(error = %e, "Upstream request failed to start");
                    yield StreamEvent::error(e.to_string());
                }
                Ok(mut tokens) => {
                    let mut markdown = String::new();
                    let mut interrupted = false;

                    while let Some(token) = tokens.next().await {
                        match token {
                            Ok(delta) if delta.is_empty() => {}
                            Ok(delta) => {
                                markdown.push_str(&delta);
                                yield StreamEvent::Chunk {
                                    chunk: delta,
                                    markdown: markdown.clone(),
                                };
                            }
                            Err(e) => {
                                tracing::error!(
                                    error = %e,
                                    received_chars = markdown.chars().count(),
                                    "Upstream stream failed"
                                );
                                yield StreamEvent::error(e.to_string());
                                interrupted = true;
                                break;
                            }
                        }
                    }

                    if !interrupted {
                        let cleaned = clean_generated_markdown(&markdown);
                        tracing::info!(
                            raw_chars = markdown.chars().count(),
                            cleaned_chars = cleaned.chars().count(),
                            "Mind map generation completed"
                        );
                        yield StreamEvent::Done { markdown: cleaned };
                    }
                }
            }
        })
    }
}
