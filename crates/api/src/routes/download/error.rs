use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("gallery or media not found")]
    NotFound,

    #[error("gallery link expired")]
    Expired,

    #[error("downloads disabled")]
    Forbidden,

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

fn log_error(error: &DownloadError) {
    match error {
        DownloadError::NotFound => info!("Download failed: gallery or media not found."),
        DownloadError::Expired => info!("Download failed: link expired."),
        DownloadError::Forbidden => warn!("Download blocked: downloads disabled."),
        DownloadError::Database(e) => error!("Database query failed: {}", e),
        DownloadError::Internal(e) => error!("Internal error: {:?}", e),
    }
}

impl IntoResponse for DownloadError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "This gallery is not available."),
            Self::Expired => (StatusCode::GONE, "This gallery link has expired."),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                "Downloads are disabled for this gallery.",
            ),
            Self::Database(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred.",
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
