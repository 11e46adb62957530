use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{FileLoader, LlmClient};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    export_html_handler, export_markdown_handler, extract_handler, generate_mindmap_handler,
    health_handler, render_handler,
};
use crate::presentation::state::AppState;

/// Headroom over the upload limit for multipart framing. Files between the
/// upload limit and this ceiling still reach the handler and get a JSON 413.
const BODY_LIMIT_HEADROOM_BYTES: usize = 1024 * 1024;

pub fn create_router<F, L>(state: AppState<F, L>) -> Router
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = state.extraction_service.max_file_size_bytes() + BODY_LIMIT_HEADROOM_BYTES;

    Router::new()
        .route("/health", get(health_handler))
        // Uncapped so oversized text still reaches the character check.
        .route(
            "/api/generate-mindmap",
            post(generate_mindmap_handler::<F, L>).layer(DefaultBodyLimit::disable()),
        )
        .route("/api/extract", post(extract_handler::<F, L>))
        .route("/api/render", post(render_handler::<F, L>))
        .route("/api/export/html", post(export_html_handler::<F, L>))
        .route("/api/export/markdown", post(export_markdown_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
