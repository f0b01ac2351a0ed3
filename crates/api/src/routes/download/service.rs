use crate::routes::download::archive::{
    archive_file_name, assemble_entries, build_zip, entry_name,
};
use crate::routes::download::error::DownloadError;
use crate::routes::gallery::db_model::{Gallery, GalleryLink, MediaItem};
use crate::routes::gallery::error::GalleryError;
use crate::routes::gallery::service::{find_gallery, media_for_gallery, resolve_link};
use crate::state::AppState;
use axum::body::Body;
use axum::http::{StatusCode, header};
use color_eyre::Report;
use http::Response;
use tracing::debug;

/// The resolved subject of a download request. The two variants carry their
/// protection settings on different rows (gallery vs. link); the flags are
/// not unified and can disagree.
pub enum ShareTarget {
    /// Resolved by direct gallery id; `allow_download` read off the gallery.
    Direct(Gallery),
    /// Resolved via a share link; `allow_download` read off the link.
    Linked { gallery: Gallery, link: GalleryLink },
}

impl ShareTarget {
    #[must_use]
    pub fn gallery(&self) -> &Gallery {
        match self {
            Self::Direct(gallery) | Self::Linked { gallery, .. } => gallery,
        }
    }

    #[must_use]
    pub fn allow_download(&self) -> bool {
        match self {
            Self::Direct(gallery) => gallery.allow_download,
            Self::Linked { link, .. } => link.allow_download,
        }
    }
}

/// Resolve a download subject from an identifier that is either a gallery id
/// or a share token: direct gallery lookup first, link token as fallback.
/// Link expiry is enforced on the fallback path only; a direct id has no
/// expiry of its own.
pub async fn resolve_share_target(
    state: &AppState,
    id_or_token: &str,
) -> Result<ShareTarget, DownloadError> {
    if let Some(gallery) = find_gallery(&state.pool, id_or_token).await? {
        return Ok(ShareTarget::Direct(gallery));
    }

    let link = resolve_link(&state.pool, id_or_token)
        .await
        .map_err(map_gallery_error)?;

    let gallery = find_gallery(&state.pool, &link.gallery_id)
        .await?
        .ok_or(DownloadError::NotFound)?;

    Ok(ShareTarget::Linked { gallery, link })
}

/// Stream a single media item's bytes back with attachment headers.
///
/// This endpoint only exists on the share-token path, so link expiry and the
/// link's `allow_download` flag are re-checked here on every fetch.
pub async fn download_photo(
    state: &AppState,
    token: &str,
    photo_id: &str,
) -> Result<Response<Body>, DownloadError> {
    let link = resolve_link(&state.pool, token)
        .await
        .map_err(map_gallery_error)?;
    if !link.allow_download {
        return Err(DownloadError::Forbidden);
    }

    let item = sqlx::query_as::<_, MediaItem>(
        "SELECT id, gallery_id, storage_path, url, thumbnail_url, file_name,
                file_size, kind, position, folder_id, created_at
         FROM media_items WHERE id = $1 AND gallery_id = $2",
    )
    .bind(photo_id)
    .bind(&link.gallery_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(DownloadError::NotFound)?;

    let bytes = fetch_media_bytes(state, item.url.clone())
        .await
        .map_err(DownloadError::Internal)?;

    let filename = entry_name(&item, item.position.max(0) as usize);
    attachment_response(&filename, "application/octet-stream", bytes)
}

/// Build a ZIP archive of the whole gallery.
///
/// Items are fetched in fixed-size concurrent batches; an item whose fetch
/// fails is logged and skipped, so a partial archive is a success, not an
/// error. Entry order follows the stored display order regardless of batch
/// boundaries.
pub async fn download_zip(
    state: &AppState,
    id_or_token: &str,
) -> Result<Response<Body>, DownloadError> {
    let target = resolve_share_target(state, id_or_token).await?;
    if !target.allow_download() {
        return Err(DownloadError::Forbidden);
    }

    let items = media_for_gallery(&state.pool, &target.gallery().id).await?;
    if items.is_empty() {
        return Err(DownloadError::NotFound);
    }

    let entries = assemble_entries(&items, |url| fetch_media_bytes(state, url)).await;

    debug!(
        "Archiving {} of {} media items for gallery {}",
        entries.len(),
        items.len(),
        target.gallery().id
    );

    let buffer = build_zip(entries).map_err(DownloadError::Internal)?;
    let filename = archive_file_name(&target.gallery().title);
    attachment_response(&filename, "application/zip", buffer.into())
}

fn map_gallery_error(e: GalleryError) -> DownloadError {
    match e {
        GalleryError::NotFound => DownloadError::NotFound,
        GalleryError::Expired => DownloadError::Expired,
        GalleryError::Unauthorized => DownloadError::Forbidden,
        GalleryError::Database(e) => DownloadError::Database(e),
        GalleryError::Internal(e) => DownloadError::Internal(e),
    }
}

async fn fetch_media_bytes(state: &AppState, url: String) -> color_eyre::Result<bytes::Bytes> {
    let response = state.http.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?)
}

fn attachment_response(
    filename: &str,
    content_type: &'static str,
    bytes: bytes::Bytes,
) -> Result<Response<Body>, DownloadError> {
    let disposition = format!("attachment; filename=\"{filename}\"");
    let disposition_header = header::HeaderValue::from_str(&disposition)
        .unwrap_or(header::HeaderValue::from_static("attachment"));

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, disposition_header)
        .body(Body::from(bytes))
        .map_err(|e| Report::new(e).wrap_err("Failed to build response"))?)
}
