use serde::{Deserialize, Serialize};

use super::generation_request::DEFAULT_MODEL_ID;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.deepseek.com/v3/chat/completions";

/// Caller-side credentials for the upstream LLM. Overwritten wholesale, never validated beyond presence.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSettings {
    pub api_key: String,
    pub api_endpoint: String,
    pub model_id: String,
}

impl ApiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_endpoint(mut self, api_endpoint: impl Into<String>) -> Self {
        self.api_endpoint = api_endpoint.into();
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
        }
    }
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSettings")
            .field("api_key", &"[REDACTED]")
            .field("api_endpoint", &self.api_endpoint)
            .field("model_id", &self.model_id)
            .finish()
    }
}
