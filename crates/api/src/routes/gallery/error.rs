use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum GalleryError {
    /// Token absent from the link store. Indistinguishable from a link that
    /// never existed.
    #[error("gallery not found")]
    NotFound,

    /// Link past its expiry date. Distinct from `NotFound` so the client can
    /// show a dedicated message.
    #[error("gallery link expired")]
    Expired,

    /// Wrong or missing password / session. No distinction between the two.
    #[error("unauthorized")]
    Unauthorized,

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

fn log_error(error: &GalleryError) {
    match error {
        GalleryError::NotFound => info!("Gallery lookup failed: token not found."),
        GalleryError::Expired => info!("Gallery lookup failed: link expired."),
        GalleryError::Unauthorized => info!("Gallery access denied: bad password or session."),
        GalleryError::Database(e) => error!("Database query failed: {}", e),
        GalleryError::Internal(e) => error!("Internal error: {:?}", e),
    }
}

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "This gallery is not available."),
            Self::Expired => (StatusCode::GONE, "This gallery link has expired."),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Incorrect password."),
            Self::Database(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred.",
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
