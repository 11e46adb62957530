use bytes::Bytes;
use futures::StreamExt;
use smart_mindmap::application::ports::LlmClientError;
use smart_mindmap::infrastructure::llm::delta_stream;

fn frame(content: &str) -> String {
    format!(
        "data: {}\n\n",
        serde_json::json!({"choices": [{"delta": {"content": content}}]})
    )
}

#[tokio::test]
async fn given_event_stream_body_when_decoding_then_yields_deltas() {
    let body = format!("{}{}data: [DONE]\n\n", frame("# A"), frame("\n- b"));
    let chunks: Vec<Result<Bytes, std::io::Error>> = body
        .as_bytes()
        .chunks(7)
        .map(|c| Ok(Bytes::copy_from_slice(c)))
        .collect();

    let deltas: Vec<String> = delta_stream(futures::stream::iter(chunks))
        .map(|d| d.unwrap())
        .collect()
        .await;

    assert_eq!(deltas, vec!["# A".to_string(), "\n- b".to_string()]);
}

#[tokio::test]
async fn given_body_error_when_decoding_then_yields_stream_interrupted_and_stops() {
    let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
        Ok(Bytes::from(frame("first"))),
        Err(std::io::Error::other("socket closed")),
        Ok(Bytes::from(frame("never"))),
    ];

    let items: Vec<Result<String, LlmClientError>> =
        delta_stream(futures::stream::iter(chunks)).collect().await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().unwrap(), "first");
    assert!(matches!(
        &items[1],
        Err(LlmClientError::StreamInterrupted(m)) if m.contains("socket closed")
    ));
}

async fn collect_text(chunks: Vec<Vec<u8>>) -> String {
    let chunks: Vec<Result<Bytes, std::io::Error>> =
        chunks.into_iter().map(|c| Ok(Bytes::from(c))).collect();
    delta_stream(futures::stream::iter(chunks))
        .map(|d| d.unwrap())
        .collect::<Vec<_>>()
        .await
        .concat()
}

#[tokio::test]
async fn given_body_split_at_every_byte_when_decoding_then_matches_unsplit_result() {
    let body = format!(
        "{}{}{}data: [DONE]\n\n",
        frame("# 思维导图\n"),
        frame("- café\n"),
        frame("- 🌱 growth")
    );
    let bytes = body.into_bytes();

    let whole = collect_text(vec![bytes.clone()]).await;
    let split = collect_text(bytes.iter().map(|b| vec![*b]).collect()).await;

    assert_eq!(whole, "# 思维导图\n- café\n- 🌱 growth");
    assert_eq!(split, whole);
}
