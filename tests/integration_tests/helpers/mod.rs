use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde_json::Value;
use tokio::net::TcpListener;

use smart_mindmap::application::ports::{FileLoader, LlmClient, OutlineRenderer};
use smart_mindmap::application::services::{
    DEFAULT_MAX_FILE_SIZE_BYTES, GenerationOptions, MindMapService, TextExtractionService,
};
use smart_mindmap::infrastructure::rendering::{HtmlExporter, MarkmapRenderer};
use smart_mindmap::infrastructure::text_processing::CompositeFileLoader;
use smart_mindmap::presentation::{AppState, create_router};

pub const UPSTREAM_PATH: &str = "/chat/completions";

pub fn relay_app<L: LlmClient + 'static>(llm_client: L) -> Router {
    let file_loader: Arc<dyn FileLoader> = Arc::new(CompositeFileLoader::with_default_adapters());
    let renderer: Arc<dyn OutlineRenderer> = Arc::new(MarkmapRenderer::new());

    let state = AppState {
        mind_map_service: Arc::new(MindMapService::new(
            Arc::new(llm_client),
            GenerationOptions::default(),
        )),
        extraction_service: Arc::new(TextExtractionService::new(
            file_loader,
            DEFAULT_MAX_FILE_SIZE_BYTES,
        )),
        renderer,
        html_exporter: Arc::new(HtmlExporter::default()),
    };

    create_router(state)
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn sse_body(deltas: &[&str]) -> String {
    let mut body = String::new();
    for delta in deltas {
        let frame = serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion.chunk",
            "choices": [{"index": 0, "delta": {"content": delta}, "finish_reason": null}]
        });
        body.push_str(&format!("data: {}\n\n", frame));
    }
    body.push_str("data: [DONE]\n\n");
    body
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

/// Stand-in for a chat-completions API that answers every call with a fixed response.
#[derive(Clone)]
pub struct FakeUpstream {
    status: StatusCode,
    content_type: &'static str,
    body: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeUpstream {
    pub fn streaming(deltas: &[&str]) -> Self {
        Self::responding(StatusCode::OK, "text/event-stream", sse_body(deltas))
    }

    pub fn responding(status: StatusCode, content_type: &'static str, body: String) -> Self {
        Self {
            status,
            content_type,
            body,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Starts the server and returns the full completions endpoint URL.
    pub async fn start(&self) -> String {
        let router = Router::new()
            .route(UPSTREAM_PATH, post(upstream_handler))
            .with_state(self.clone());
        format!("{}{}", spawn_server(router).await, UPSTREAM_PATH)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn upstream_handler(
    State(upstream): State<FakeUpstream>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    upstream.requests.lock().unwrap().push(RecordedRequest {
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body,
    });

    (
        upstream.status,
        [(CONTENT_TYPE, upstream.content_type)],
        upstream.body.clone(),
    )
        .into_response()
}
