use std::sync::Arc;

use smart_mindmap::application::services::{MindMapSession, StreamConsumerError};
use smart_mindmap::domain::{ApiSettings, MAX_CHAR_LIMIT, ValidationError};
use smart_mindmap::infrastructure::llm::MockLlmClient;
use smart_mindmap::infrastructure::rendering::MarkmapRenderer;
use smart_mindmap::infrastructure::{RelayClient, RelayClientError};

use crate::integration_tests::helpers::{relay_app, spawn_server};

fn session() -> MindMapSession<MarkmapRenderer> {
    MindMapSession::new(Arc::new(MarkmapRenderer::new()))
}

fn mock(deltas: &[&str]) -> MockLlmClient {
    MockLlmClient::new(deltas.iter().map(|s| s.to_string()).collect())
}

#[tokio::test]
async fn given_relay_when_generating_then_session_shows_final_markdown() {
    let base_url = spawn_server(relay_app(mock(&[
        "```markdown\n",
        "# Plants\n\n",
        "- roots\n- leaves\n",
        "```",
    ])))
    .await;
    let mut session = session();

    let markdown = RelayClient::new(base_url)
        .generate(&ApiSettings::new("sk-test"), "plants text", &mut session)
        .await
        .unwrap();

    assert_eq!(markdown, "# Plants\n\n- roots\n- leaves");
    assert!(session.is_visible());
    assert_eq!(session.markdown(), markdown);
    let mind_map = session.mind_map().unwrap();
    assert_eq!(mind_map.root.content, "Plants");
    assert_eq!(mind_map.root.children.len(), 2);
}

#[tokio::test]
async fn given_missing_api_key_when_generating_then_fails_without_request() {
    let mut session = session();

    let result = RelayClient::new("http://127.0.0.1:1")
        .generate(&ApiSettings::default(), "text", &mut session)
        .await;

    assert!(matches!(result, Err(RelayClientError::MissingApiKey)));
    assert!(!session.is_visible());
}

#[tokio::test]
async fn given_text_over_limit_when_generating_then_fails_locally() {
    let mut session = session();
    let text = "a".repeat(MAX_CHAR_LIMIT + 1);

    let result = RelayClient::new("http://127.0.0.1:1")
        .generate(&ApiSettings::new("sk-test"), &text, &mut session)
        .await;

    assert!(matches!(
        result,
        Err(RelayClientError::Validation(ValidationError::InputTooLong { .. }))
    ));
}

#[tokio::test]
async fn given_empty_text_when_generating_then_reports_relay_rejection() {
    let base_url = spawn_server(relay_app(mock(&["unused"]))).await;
    let mut session = session();

    let result = RelayClient::new(base_url)
        .generate(&ApiSettings::new("sk-test"), "", &mut session)
        .await;

    match result {
        Err(RelayClientError::Rejected { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Missing required parameters");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn given_upstream_failure_when_generating_then_surfaces_error_and_keeps_map_hidden() {
    let base_url = spawn_server(relay_app(MockLlmClient::failing("Invalid API key"))).await;
    let mut session = session();

    let result = RelayClient::new(base_url)
        .generate(&ApiSettings::new("sk-test"), "text", &mut session)
        .await;

    match result {
        Err(RelayClientError::Stream(StreamConsumerError::Relay(message))) => {
            assert!(message.contains("Invalid API key"))
        }
        other => panic!("expected relay stream error, got {:?}", other),
    }
    assert!(!session.is_visible());
    assert!(session.last_error().unwrap().contains("Invalid API key"));
}

#[tokio::test]
async fn given_unreachable_relay_when_generating_then_returns_request_error() {
    let mut session = session();

    let result = RelayClient::new("http://127.0.0.1:1/")
        .generate(&ApiSettings::new("sk-test"), "text", &mut session)
        .await;

    assert!(matches!(result, Err(RelayClientError::Request(_))));
}
