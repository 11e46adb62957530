use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::ExtractionError;
use crate::presentation::state::AppState;

use super::api_types::{ExtractResponse, error_response};

#[tracing::instrument(skip(state, multipart))]
pub async fn extract_handler<F, L>(
    State(state): State<AppState<F, L>>,
    mut multipart: Multipart,
) -> Response
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + 'static,
{
    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Extract request with no file");
            return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Failed to read multipart: {}", e),
            );
        }
    };

    let Some(filename) = field.file_name().map(str::to_string) else {
        tracing::warn!("Multipart field without a file name");
        return error_response(StatusCode::BAD_REQUEST, "Uploaded field has no file name");
    };

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read file bytes");
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Failed to read file: {}", e),
            );
        }
    };

    tracing::debug!(filename = %filename, bytes = data.len(), "File data received");

    match state.extraction_service.extract(&filename, &data).await {
        Ok(extracted) => (
            StatusCode::OK,
            Json(ExtractResponse {
                text: extracted.text,
                length: extracted.char_count,
                byte_length: extracted.byte_count,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, filename = %filename, "Text extraction failed");
            error_response(extraction_status(&e), e.to_string())
        }
    }
}

fn extraction_status(error: &ExtractionError) -> StatusCode {
    match error {
        ExtractionError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        ExtractionError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ExtractionError::Parse(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ExtractionError::TooManyCharacters { .. } => StatusCode::BAD_REQUEST,
    }
}
