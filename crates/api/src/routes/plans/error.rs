use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum PlansError {
    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

impl IntoResponse for PlansError {
    fn into_response(self) -> Response {
        match &self {
            Self::Database(e) => error!("Database query failed: {}", e),
            Self::Internal(e) => error!("Internal error: {:?}", e),
        }

        let body = Json(json!({ "error": "An unexpected error occurred." }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
