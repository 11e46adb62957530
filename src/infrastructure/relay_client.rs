use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::OutlineRenderer;
use crate::application::services::{MindMapSession, StreamConsumerError, consume_stream};
use crate::domain::{ApiSettings, ValidationError, check_length};

pub const GENERATE_PATH: &str = "/api/generate-mindmap";

#[derive(Debug, thiserror::Error)]
pub enum RelayClientError {
    #[error("API key is not configured")]
    MissingApiKey,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("relay request failed: {0}")]
    Request(String),
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error(transparent)]
    Stream(#[from] StreamConsumerError),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateBody<'a> {
    text: &'a str,
    api_key: &'a str,
    api_endpoint: &'a str,
    model_id: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Talks to a running relay and feeds its stream into a [`MindMapSession`].
pub struct RelayClient {
    client: Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Runs one generation. Checks the input locally first so an oversized
    /// text never costs a round trip.
    #[tracing::instrument(skip_all, fields(model = %settings.model_id))]
    pub async fn generate<R>(
        &self,
        settings: &ApiSettings,
        text: &str,
        session: &mut MindMapSession<R>,
    ) -> Result<String, RelayClientError>
    where
        R: OutlineRenderer + ?Sized,
    {
        session.begin_generation();

        if settings.api_key.is_empty() {
            return Err(RelayClientError::MissingApiKey);
        }
        check_length(text)?;

        let response = self
            .client
            .post(format!("{}{}", self.base_url, GENERATE_PATH))
            .json(&GenerateBody {
                text,
                api_key: &settings.api_key,
                api_endpoint: &settings.api_endpoint,
                model_id: &settings.model_id,
            })
            .send()
            .await
            .map_err(|e| RelayClientError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| format!("relay returned HTTP {status}"));
            tracing::warn!(status = %status, message = %message, "Relay rejected generation");
            return Err(RelayClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let markdown = consume_stream(response.bytes_stream(), |update| session.apply(update))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error reading relay stream"))?;

        Ok(markdown)
    }
}
