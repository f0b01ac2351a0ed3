use crate::routes::download::error::DownloadError;
use crate::routes::download::interfaces::DownloadPhotoBody;
use crate::routes::download::service::{download_photo, download_zip};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

/// Download a single photo or video from a shared gallery.
#[utoipa::path(
    post,
    path = "/api/gallery/{token}/download-photo",
    params(
        ("token" = String, Path, description = "Opaque share token from the gallery URL")
    ),
    request_body = DownloadPhotoBody,
    responses(
        (status = 200, description = "Media bytes.", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 403, description = "Downloads are disabled for this gallery."),
        (status = 404, description = "Gallery or media item not found."),
        (status = 410, description = "The share link has expired."),
        (status = 500, description = "An internal server error occurred."),
    )
)]
pub async fn download_single_photo(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(body): Json<DownloadPhotoBody>,
) -> Result<impl IntoResponse, DownloadError> {
    let response = download_photo(&state, &token, &body.photo_id).await?;
    Ok(response)
}

/// Download the whole gallery as a single ZIP archive.
///
/// Accepts either a share token or a raw gallery id; the direct-id path
/// checks the gallery row's own download flag instead of the link's.
#[utoipa::path(
    post,
    path = "/api/gallery/{token}/download-zip",
    params(
        ("token" = String, Path, description = "Share token or gallery id")
    ),
    responses(
        (status = 200, description = "ZIP archive.", body = Vec<u8>, content_type = "application/zip"),
        (status = 403, description = "Downloads are disabled for this gallery."),
        (status = 404, description = "Gallery not found or has no media."),
        (status = 410, description = "The share link has expired."),
        (status = 500, description = "An internal server error occurred."),
    )
)]
pub async fn download_gallery_zip(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, DownloadError> {
    let response = download_zip(&state, &token).await?;
    Ok(response)
}
