use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};

use crate::application::ports::{FileLoader, LlmClient};
use crate::infrastructure::rendering::{HTML_EXPORT_FILENAME, MARKDOWN_EXPORT_FILENAME};
use crate::presentation::state::AppState;

use super::api_types::{ExportRequest, RenderRequest, error_response};

#[tracing::instrument(skip_all)]
pub async fn render_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Json(request): Json<RenderRequest>,
) -> Response
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + 'static,
{
    match state.renderer.render(&request.markdown) {
        Ok(mind_map) => (StatusCode::OK, Json(mind_map)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Error rendering mind map");
            error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }
    }
}

#[tracing::instrument(skip_all)]
pub async fn export_html_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Json(request): Json<ExportRequest>,
) -> Response
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + 'static,
{
    if request.markdown.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No markdown to export");
    }

    let mind_map = match state.renderer.render(&request.markdown) {
        Ok(mind_map) => mind_map,
        Err(e) => {
            tracing::error!(error = %e, "Error rendering mind map for export");
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string());
        }
    };

    let html = state
        .html_exporter
        .export(&mind_map, request.title.as_deref());

    attachment("text/html; charset=utf-8", HTML_EXPORT_FILENAME, html)
}

#[tracing::instrument(skip_all)]
pub async fn export_markdown_handler(Json(request): Json<ExportRequest>) -> Response {
    if request.markdown.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No markdown to export");
    }

    attachment(
        "text/markdown; charset=utf-8",
        MARKDOWN_EXPORT_FILENAME,
        request.markdown,
    )
}

fn attachment(content_type: &'static str, filename: &str, body: String) -> Response {
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, content_type.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}
