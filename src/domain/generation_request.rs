/// Upper bound on input characters, matching the upstream model's input ceiling.
pub const MAX_CHAR_LIMIT: usize = 131_072;

pub const DEFAULT_MODEL_ID: &str = "deepseek-chat-v3";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required parameters")]
    MissingParameters,
    #[error("Input length {length} exceeds the maximum length {limit}")]
    InputTooLong { length: usize, limit: usize },
}

/// A validated request to turn `text` into a mind map.
///
/// Credentials travel with the request; nothing here is stored between calls.
#[derive(Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    text: String,
    api_key: String,
    api_endpoint: String,
    model_id: String,
}

impl GenerationRequest {
    pub fn new(
        text: Option<String>,
        api_key: Option<String>,
        api_endpoint: Option<String>,
        model_id: Option<String>,
    ) -> Result<Self, ValidationError> {
        let (Some(text), Some(api_key), Some(api_endpoint)) = (
            non_empty(text),
            non_empty(api_key),
            non_empty(api_endpoint),
        ) else {
            return Err(ValidationError::MissingParameters);
        };

        check_length(&text)?;

        Ok(Self {
            text,
            api_key,
            api_endpoint,
            model_id: non_empty(model_id).unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }
}

// Keeps the key out of logs and panic messages.
impl std::fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("text_chars", &self.text.chars().count())
            .field("api_key", &"[REDACTED]")
            .field("api_endpoint", &self.api_endpoint)
            .field("model_id", &self.model_id)
            .finish()
    }
}

/// Character-count guard shared by the relay and its clients.
pub fn check_length(text: &str) -> Result<(), ValidationError> {
    let length = text.chars().count();
    if length > MAX_CHAR_LIMIT {
        return Err(ValidationError::InputTooLong {
            length,
            limit: MAX_CHAR_LIMIT,
        });
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
