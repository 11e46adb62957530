use axum::http::StatusCode;
use serde_json::json;

use smart_mindmap::domain::StreamEvent;
use smart_mindmap::infrastructure::llm::StreamingLlmClient;

use crate::integration_tests::helpers::{FakeUpstream, relay_app, spawn_server};

async fn post_generate(relay_url: &str, body: serde_json::Value) -> (StatusCode, String, String) {
    let response = reqwest::Client::new()
        .post(format!("{}/api/generate-mindmap", relay_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    (status, content_type, response.text().await.unwrap())
}

fn parse_events(body: &str) -> Vec<StreamEvent> {
    body.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[tokio::test]
async fn given_streaming_upstream_when_generating_then_relays_accumulated_chunks_and_done() {
    let upstream = FakeUpstream::streaming(&["```markdown\n# Water", " cycle\n", "- rain\n```"]);
    let endpoint = upstream.start().await;
    let relay_url = spawn_server(relay_app(StreamingLlmClient::new())).await;

    let (status, content_type, body) = post_generate(
        &relay_url,
        json!({"text": "Water falls as rain.", "apiKey": "sk-live", "apiEndpoint": endpoint}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("application/x-ndjson"));
    assert!(body.ends_with('\n'));

    let events = parse_events(&body);
    assert_eq!(events.len(), 4);
    assert_eq!(
        events[1],
        StreamEvent::Chunk {
            chunk: " cycle\n".to_string(),
            markdown: "```markdown\n# Water cycle\n".to_string(),
        }
    );
    assert_eq!(
        events[3],
        StreamEvent::Done {
            markdown: "# Water cycle\n- rain".to_string(),
        }
    );
}

#[tokio::test]
async fn given_generation_request_when_relaying_then_forwards_key_model_and_prompt() {
    let upstream = FakeUpstream::streaming(&["# A"]);
    let endpoint = upstream.start().await;
    let relay_url = spawn_server(relay_app(StreamingLlmClient::new())).await;

    post_generate(
        &relay_url,
        json!({
            "text": "Mitochondria make ATP.",
            "apiKey": "sk-live",
            "apiEndpoint": endpoint,
            "modelId": "deepseek-reasoner"
        }),
    )
    .await;

    let requests = upstream.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer sk-live"));
    assert_eq!(requests[0].body["model"], "deepseek-reasoner");
    let temperature = requests[0].body["temperature"].as_f64().unwrap();
    assert!((temperature - 0.3).abs() < 1e-6);
    let prompt = requests[0].body["messages"][1]["content"].as_str().unwrap();
    assert!(prompt.contains("Mitochondria make ATP."));
}

#[tokio::test]
async fn given_upstream_rejection_when_generating_then_streams_single_error_line() {
    let upstream = FakeUpstream::responding(
        StatusCode::UNAUTHORIZED,
        "application/json",
        r#"{"error":{"message":"Authentication Fails (no such user)"}}"#.to_string(),
    );
    let endpoint = upstream.start().await;
    let relay_url = spawn_server(relay_app(StreamingLlmClient::new())).await;

    let (status, _, body) = post_generate(
        &relay_url,
        json!({"text": "t", "apiKey": "bad", "apiEndpoint": endpoint}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        parse_events(&body),
        vec![StreamEvent::error("Authentication Fails (no such user)")]
    );
}

#[tokio::test]
async fn given_malformed_upstream_lines_when_generating_then_skips_them() {
    let body = format!(
        "data: {{broken\n\n{}",
        crate::integration_tests::helpers::sse_body(&["# Kept"])
    );
    let upstream = FakeUpstream::responding(StatusCode::OK, "text/event-stream", body);
    let endpoint = upstream.start().await;
    let relay_url = spawn_server(relay_app(StreamingLlmClient::new())).await;

    let (_, _, body) = post_generate(
        &relay_url,
        json!({"text": "t", "apiKey": "k", "apiEndpoint": endpoint}),
    )
    .await;

    assert_eq!(
        parse_events(&body),
        vec![
            StreamEvent::Chunk {
                chunk: "# Kept".to_string(),
                markdown: "# Kept".to_string(),
            },
            StreamEvent::Done {
                markdown: "# Kept".to_string(),
            },
        ]
    );
}
