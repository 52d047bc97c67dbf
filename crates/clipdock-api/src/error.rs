use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use clipdock_core::constants::VIDEO_CONTENT_TYPE;
use clipdock_core::error::LogLevel;
use clipdock_core::AppError;
use clipdock_processing::IngestError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub recoverable: bool,
}

/// Wrapper so `AppError` can cross the axum response boundary.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<IngestError> for HttpAppError {
    fn from(err: IngestError) -> Self {
        let app_err = match err {
            IngestError::NotFound(id) => AppError::NotFound(format!("video {id} not found")),
            IngestError::NotOwner(id) => {
                AppError::Forbidden(format!("video {id} belongs to another user"))
            }
            IngestError::UnsupportedMediaType(got) => AppError::InvalidInput(format!(
                "unsupported media type {got:?}, expected {VIDEO_CONTENT_TYPE}"
            )),
            // Body stream errors reach the pipeline wrapped in io::Error;
            // unwrap them so an oversized upload still renders as 413.
            IngestError::Staging(e) => match e
                .get_ref()
                .and_then(|inner| inner.downcast_ref::<MultipartError>())
            {
                Some(m) if m.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                    AppError::PayloadTooLarge("upload exceeds the maximum allowed size".to_string())
                }
                Some(m) => AppError::InvalidInput(format!("malformed multipart body: {m}")),
                None => AppError::Internal(format!("failed to stage upload: {e}")),
            },
            IngestError::Remux(e) => AppError::Tooling(e.to_string()),
            IngestError::Probe(e) => AppError::Tooling(e.to_string()),
            IngestError::Upload(e) => AppError::Storage(e.to_string()),
            IngestError::Load(e) | IngestError::Persist(e) => e,
        };
        HttpAppError(app_err)
    }
}

impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        let app_err = if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge("upload exceeds the maximum allowed size".to_string())
        } else {
            AppError::InvalidInput(format!("malformed multipart body: {err}"))
        };
        HttpAppError(app_err)
    }
}

fn log_error(err: &AppError) {
    match err.log_level() {
        LogLevel::Error => tracing::error!(code = err.error_code(), "{err}"),
        LogLevel::Warn => tracing::warn!(code = err.error_code(), "{err}"),
        LogLevel::Debug => tracing::debug!(code = err.error_code(), "{err}"),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        log_error(&self.0);

        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse {
            error: self.0.client_message(),
            code: self.0.error_code().to_string(),
            recoverable: self.0.is_recoverable(),
        };

        (status, Json(body)).into_response()
    }
}
