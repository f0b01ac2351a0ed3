use crate::routes::gallery::error::GalleryError;
use crate::routes::gallery::interfaces::{
    GalleryPhotosResponse, GallerySummaryResponse, PhotosQuery, VerifyPasswordBody,
    VerifyPasswordResponse,
};
use crate::routes::gallery::service;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};

/// Look up a shared gallery by its public token.
///
/// Returns enough to render the landing page: title, client, cover, and
/// whether a password prompt is needed before photos can be fetched.
#[utoipa::path(
    get,
    path = "/api/gallery/{token}",
    params(
        ("token" = String, Path, description = "Opaque share token from the gallery URL")
    ),
    responses(
        (status = 200, description = "Gallery summary.", body = GallerySummaryResponse),
        (status = 404, description = "No gallery behind this token."),
        (status = 410, description = "The share link has expired."),
        (status = 500, description = "An internal server error occurred."),
    )
)]
pub async fn get_gallery(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<GallerySummaryResponse>, GalleryError> {
    let summary = service::gallery_summary(&state.pool, &token).await?;
    Ok(Json(summary))
}

/// Submit a password for a protected gallery and receive a viewing session.
#[utoipa::path(
    post,
    path = "/api/gallery/{token}/verify",
    params(
        ("token" = String, Path, description = "Opaque share token from the gallery URL")
    ),
    request_body = VerifyPasswordBody,
    responses(
        (status = 200, description = "Password accepted.", body = VerifyPasswordResponse),
        (status = 401, description = "Incorrect password."),
        (status = 404, description = "No gallery behind this token."),
        (status = 410, description = "The share link has expired."),
        (status = 500, description = "An internal server error occurred."),
    )
)]
pub async fn verify_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(body): Json<VerifyPasswordBody>,
) -> Result<Json<VerifyPasswordResponse>, GalleryError> {
    let session = service::verify_gallery_password(&state.pool, &token, &body.password).await?;
    Ok(Json(VerifyPasswordResponse { session }))
}

/// Fetch the photos and folders of a shared gallery.
#[utoipa::path(
    get,
    path = "/api/gallery/{token}/photos",
    params(
        ("token" = String, Path, description = "Opaque share token from the gallery URL"),
        PhotosQuery,
    ),
    responses(
        (status = 200, description = "Photos and folders.", body = GalleryPhotosResponse),
        (status = 401, description = "Missing or invalid viewing session."),
        (status = 404, description = "No gallery behind this token."),
        (status = 410, description = "The share link has expired."),
        (status = 500, description = "An internal server error occurred."),
    )
)]
pub async fn get_gallery_photos(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(query): Query<PhotosQuery>,
) -> Result<Json<GalleryPhotosResponse>, GalleryError> {
    let photos = service::gallery_photos(&state.pool, &token, query.session.as_deref()).await?;
    Ok(Json(photos))
}
