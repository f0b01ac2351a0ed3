use crate::routes::identity::AuthUser;
use crate::routes::plans::error::PlansError;
use crate::routes::plans::interfaces::{CheckPermissionBody, PermissionDecision};
use crate::routes::plans::service::check_permission;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;

/// Ask whether the caller's plan permits an action before attempting it.
#[utoipa::path(
    post,
    path = "/api/galleries/check-permission",
    request_body = CheckPermissionBody,
    responses(
        (status = 200, description = "Decision with optional advisory reason.", body = PermissionDecision),
        (status = 401, description = "Missing or invalid bearer credential."),
        (status = 500, description = "An internal server error occurred."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn check_plan_permission(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CheckPermissionBody>,
) -> Result<Json<PermissionDecision>, PlansError> {
    let decision = check_permission(&state.pool, &user.id, &body).await?;
    Ok(Json(decision))
}
