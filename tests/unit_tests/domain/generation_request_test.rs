use smart_mindmap::domain::{
    DEFAULT_MODEL_ID, GenerationRequest, MAX_CHAR_LIMIT, ValidationError, check_length,
};

fn some(value: &str) -> Option<String> {
    Some(value.to_string())
}

#[test]
fn given_all_fields_when_creating_request_then_keeps_values() {
    let request = GenerationRequest::new(
        some("hello"),
        some("sk-test"),
        some("https://api.example.com/v1/chat/completions"),
        some("custom-model"),
    )
    .unwrap();

    assert_eq!(request.text(), "hello");
    assert_eq!(request.api_key(), "sk-test");
    assert_eq!(
        request.api_endpoint(),
        "https://api.example.com/v1/chat/completions"
    );
    assert_eq!(request.model_id(), "custom-model");
}

#[test]
fn given_no_model_when_creating_request_then_uses_default_model() {
    let request =
        GenerationRequest::new(some("hello"), some("sk-test"), some("https://x"), None).unwrap();

    assert_eq!(request.model_id(), DEFAULT_MODEL_ID);
}

#[test]
fn given_empty_model_when_creating_request_then_uses_default_model() {
    let request =
        GenerationRequest::new(some("hello"), some("sk-test"), some("https://x"), some(""))
            .unwrap();

    assert_eq!(request.model_id(), "deepseek-chat-v3");
}

#[test]
fn given_missing_text_when_creating_request_then_returns_missing_parameters() {
    let result = GenerationRequest::new(None, some("sk-test"), some("https://x"), None);

    assert_eq!(result.unwrap_err(), ValidationError::MissingParameters);
}

#[test]
fn given_empty_api_key_when_creating_request_then_returns_missing_parameters() {
    let result = GenerationRequest::new(some("hello"), some(""), some("https://x"), None);

    assert_eq!(result.unwrap_err(), ValidationError::MissingParameters);
}

#[test]
fn given_missing_endpoint_when_creating_request_then_returns_missing_parameters() {
    let result = GenerationRequest::new(some("hello"), some("sk-test"), None, None);

    let error = result.unwrap_err();
    assert_eq!(error.to_string(), "Missing required parameters");
}

#[test]
fn given_text_at_limit_when_creating_request_then_accepts() {
    let text = "a".repeat(MAX_CHAR_LIMIT);

    let result = GenerationRequest::new(Some(text), some("k"), some("https://x"), None);

    assert!(result.is_ok());
}

#[test]
fn given_text_over_limit_when_creating_request_then_reports_length_and_limit() {
    let text = "a".repeat(MAX_CHAR_LIMIT + 1);

    let error = GenerationRequest::new(Some(text), some("k"), some("https://x"), None).unwrap_err();

    assert_eq!(
        error,
        ValidationError::InputTooLong {
            length: 131_073,
            limit: 131_072,
        }
    );
    assert_eq!(
        error.to_string(),
        "Input length 131073 exceeds the maximum length 131072"
    );
}

#[test]
fn given_multibyte_text_when_checking_length_then_counts_characters_not_bytes() {
    let text = "思".repeat(MAX_CHAR_LIMIT);
    assert!(text.len() > MAX_CHAR_LIMIT);

    assert!(check_length(&text).is_ok());
}

#[test]
fn given_request_when_debug_formatting_then_hides_api_key() {
    let request =
        GenerationRequest::new(some("hello"), some("sk-secret"), some("https://x"), None)
            .unwrap();

    let debug = format!("{:?}", request);

    assert!(!debug.contains("sk-secret"));
    assert!(debug.contains("[REDACTED]"));
}
