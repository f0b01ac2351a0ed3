use crate::routes::identity::AuthUser;
use crate::routes::manage::error::ManageError;
use crate::routes::manage::interfaces::{
    CreateGalleryBody, GalleryListItem, GalleryResponse, ShareGalleryBody, ShareLinkResponse,
};
use crate::routes::manage::service;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

/// Create a new gallery (plan-gated).
#[utoipa::path(
    post,
    path = "/api/galleries",
    request_body = CreateGalleryBody,
    responses(
        (status = 201, description = "Gallery created in draft status.", body = GalleryResponse),
        (status = 401, description = "Missing or invalid bearer credential."),
        (status = 403, description = "Denied by the caller's plan."),
        (status = 500, description = "An internal server error occurred."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_gallery(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CreateGalleryBody>,
) -> Result<(StatusCode, Json<GalleryResponse>), ManageError> {
    let gallery = service::create_gallery(&state.pool, &user.id, &body).await?;
    Ok((StatusCode::CREATED, Json(gallery)))
}

/// List the caller's galleries with their media counts.
#[utoipa::path(
    get,
    path = "/api/galleries",
    responses(
        (status = 200, description = "The caller's galleries.", body = [GalleryListItem]),
        (status = 401, description = "Missing or invalid bearer credential."),
        (status = 500, description = "An internal server error occurred."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_galleries(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<GalleryListItem>>, ManageError> {
    let galleries = service::list_galleries(&state.pool, &user.id).await?;
    Ok(Json(galleries))
}

/// Create or update the share link for a gallery and activate it.
#[utoipa::path(
    post,
    path = "/api/galleries/{id}/share",
    params(
        ("id" = String, Path, description = "Gallery id (owner only)")
    ),
    request_body = ShareGalleryBody,
    responses(
        (status = 200, description = "The gallery's share link.", body = ShareLinkResponse),
        (status = 401, description = "Missing or invalid bearer credential."),
        (status = 404, description = "No such gallery owned by the caller."),
        (status = 500, description = "An internal server error occurred."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn share_gallery(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<ShareGalleryBody>,
) -> Result<Json<ShareLinkResponse>, ManageError> {
    let link = service::share_gallery(&state.pool, &user.id, &id, &body).await?;
    Ok(Json(link))
}
