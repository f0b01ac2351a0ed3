use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ManageError {
    /// Also returned for galleries owned by someone else, so gallery ids
    /// cannot be probed for existence.
    #[error("gallery not found")]
    NotFound,

    /// Plan policy denial; carries the advisory reason string.
    #[error("plan denied: {0}")]
    PlanDenied(String),

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

fn log_error(error: &ManageError) {
    match error {
        ManageError::NotFound => info!("Gallery management failed: not found or not owned."),
        ManageError::PlanDenied(reason) => info!("Gallery management denied by plan: {}", reason),
        ManageError::Database(e) => error!("Database query failed: {}", e),
        ManageError::Internal(e) => error!("Internal error: {:?}", e),
    }
}

impl IntoResponse for ManageError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                "This gallery is not available.".to_string(),
            ),
            Self::PlanDenied(reason) => (StatusCode::FORBIDDEN, reason),
            Self::Database(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred.".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
