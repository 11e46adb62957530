use std::convert::Infallible;

use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use futures::StreamExt;

use crate::application::ports::{FileLoader, LlmClient};
use crate::domain::GenerationRequest;
use crate::presentation::state::AppState;

use super::api_types::{GenerateMindMapRequest, error_response};

pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

#[tracing::instrument(skip(state, payload))]
pub async fn generate_mindmap_handler<F, L>(
    State(state): State<AppState<F, L>>,
    payload: Result<Json<GenerateMindMapRequest>, JsonRejection>,
) -> Response
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + 'static,
{
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::error!(error = %rejection, "Error reading generation request");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, rejection.body_text());
        }
    };

    let request = match GenerationRequest::new(
        payload.text,
        payload.api_key,
        payload.api_endpoint,
        payload.model_id,
    ) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Rejecting generation request");
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    tracing::info!(
        length = request.text().chars().count(),
        byte_length = request.text().len(),
        model = %request.model_id(),
        "Generation request accepted"
    );

    let events = state
        .mind_map_service
        .generate(request)
        .map(|event| Ok::<_, Infallible>(Bytes::from(event.to_ndjson_line())));

    (
        StatusCode::OK,
        [(CONTENT_TYPE, NDJSON_CONTENT_TYPE), (CACHE_CONTROL, "no-cache")],
        Body::from_stream(events),
    )
        .into_response()
}
