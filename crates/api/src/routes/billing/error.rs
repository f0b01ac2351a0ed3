use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("unknown plan '{0}'")]
    InvalidPlan(String),

    #[error("test tier already consumed")]
    TestTierUsed,

    #[error("invalid webhook signature")]
    InvalidSignature,

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

fn log_error(error: &BillingError) {
    match error {
        BillingError::InvalidPlan(plan) => info!("Checkout rejected: unknown plan '{}'.", plan),
        BillingError::TestTierUsed => info!("Checkout rejected: test tier already consumed."),
        BillingError::InvalidSignature => warn!("Webhook rejected: signature check failed."),
        BillingError::Database(e) => error!("Database query failed: {}", e),
        BillingError::Internal(e) => error!("Internal error: {:?}", e),
    }
}

impl IntoResponse for BillingError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::InvalidPlan(plan) => (StatusCode::BAD_REQUEST, format!("Unknown plan '{plan}'.")),
            Self::TestTierUsed => (
                StatusCode::FORBIDDEN,
                crate::routes::plans::service::test_tier_denied_reason().to_string(),
            ),
            Self::InvalidSignature => (StatusCode::BAD_REQUEST, "Invalid signature.".to_string()),
            Self::Database(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred.".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
