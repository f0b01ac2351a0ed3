use crate::routes::billing::error::BillingError;
use crate::routes::billing::interfaces::{CheckoutBody, CheckoutResponse};
use crate::routes::billing::service::{create_checkout, handle_webhook};
use crate::routes::identity::AuthUser;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use bytes::Bytes;

/// Start a hosted checkout for a plan.
#[utoipa::path(
    post,
    path = "/api/checkout",
    request_body = CheckoutBody,
    responses(
        (status = 200, description = "Redirect URL for the hosted checkout.", body = CheckoutResponse),
        (status = 400, description = "Unknown plan."),
        (status = 401, description = "Missing or invalid bearer credential."),
        (status = 403, description = "The one-time trial plan was already consumed."),
        (status = 500, description = "An internal server error occurred."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn checkout(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CheckoutBody>,
) -> Result<Json<CheckoutResponse>, BillingError> {
    let response = create_checkout(&state, &user.id, &body.plan).await?;
    Ok(Json(response))
}

/// Billing provider webhook. Signature-verified; unknown event types are
/// acknowledged and dropped.
#[utoipa::path(
    post,
    path = "/api/webhooks/stripe",
    request_body(content = Vec<u8>, content_type = "application/json"),
    responses(
        (status = 200, description = "Event processed or ignored."),
        (status = 400, description = "Missing or invalid signature."),
        (status = 500, description = "An internal server error occurred."),
    )
)]
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, BillingError> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok());
    handle_webhook(&state, signature, &body).await?;
    Ok(StatusCode::OK)
}
