use crate::routes::gallery::db_model::{Folder, Gallery, GalleryLink, MediaItem};
use crate::routes::gallery::error::GalleryError;
use crate::routes::gallery::hashing::verify_password as verify_hash;
use crate::routes::gallery::interfaces::{
    FolderDto, GalleryPhotosResponse, GallerySummaryResponse, PhotoDto,
};
use crate::routes::gallery::session::{issue_session, validate_session};
use chrono::{Local, NaiveDate};
use sqlx::PgPool;
use tracing::warn;

/// A link is valid through the whole of its expiry date (end-of-day local
/// time) and dead from the next local day onward.
#[must_use]
pub fn link_expired(expires_at: Option<NaiveDate>, today: NaiveDate) -> bool {
    matches!(expires_at, Some(date) if date < today)
}

pub async fn find_link_by_token(
    pool: &PgPool,
    token: &str,
) -> Result<Option<GalleryLink>, sqlx::Error> {
    sqlx::query_as::<_, GalleryLink>(
        "SELECT id, gallery_id, token, password_hash, expires_at, allow_download,
                view_count, last_viewed_at
         FROM gallery_links WHERE token = $1",
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}

pub async fn find_gallery(pool: &PgPool, id: &str) -> Result<Option<Gallery>, sqlx::Error> {
    sqlx::query_as::<_, Gallery>(
        "SELECT id, owner_id, title, client_name, event_date, notes, status,
                password_hash, allow_download, cover_media_id, created_at, updated_at
         FROM galleries WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Resolve a share token to its link row, enforcing expiry.
///
/// Bumps the view counter as a side effect. The bump is best-effort: a
/// failed update is logged and swallowed, and concurrent viewers may race.
///
/// # Errors
///
/// * `GalleryError::NotFound` when no link carries this token.
/// * `GalleryError::Expired` when the link's expiry date has passed.
pub async fn resolve_link(pool: &PgPool, token: &str) -> Result<GalleryLink, GalleryError> {
    let link = find_link_by_token(pool, token)
        .await?
        .ok_or(GalleryError::NotFound)?;

    if link_expired(link.expires_at, Local::now().date_naive()) {
        return Err(GalleryError::Expired);
    }

    record_view(pool, &link.id).await;
    Ok(link)
}

/// Single atomic increment; under-counting on failure is accepted.
async fn record_view(pool: &PgPool, link_id: &str) {
    let result = sqlx::query(
        "UPDATE gallery_links
         SET view_count = view_count + 1, last_viewed_at = NOW()
         WHERE id = $1",
    )
    .bind(link_id)
    .execute(pool)
    .await;

    if let Err(e) = result {
        warn!("Failed to record view for link {}: {}", link_id, e);
    }
}

pub async fn gallery_summary(
    pool: &PgPool,
    token: &str,
) -> Result<GallerySummaryResponse, GalleryError> {
    let link = resolve_link(pool, token).await?;
    let gallery = find_gallery(pool, &link.gallery_id)
        .await?
        .ok_or(GalleryError::NotFound)?;

    let cover_url = match &gallery.cover_media_id {
        Some(media_id) => {
            sqlx::query_scalar::<_, Option<String>>(
                "SELECT COALESCE(thumbnail_url, url) FROM media_items WHERE id = $1",
            )
            .bind(media_id)
            .fetch_optional(pool)
            .await?
            .flatten()
        }
        None => None,
    };

    Ok(GallerySummaryResponse {
        title: gallery.title,
        client_name: gallery.client_name,
        event_date: gallery.event_date,
        cover_url,
        requires_password: link.requires_password(),
        allow_download: link.allow_download,
    })
}

/// Check a password candidate and issue a viewing session.
///
/// A link with no stored hash is not password protected: any candidate,
/// including the empty string, succeeds. There is no rate limiting or
/// lockout on mismatches.
pub async fn verify_gallery_password(
    pool: &PgPool,
    token: &str,
    candidate: &str,
) -> Result<String, GalleryError> {
    let link = resolve_link(pool, token).await?;

    if !password_accepted(candidate, link.password_hash.as_deref()) {
        return Err(GalleryError::Unauthorized);
    }

    Ok(issue_session(token))
}

/// Whether a candidate passes the link's password gate. Every failure mode,
/// including a malformed stored hash, reads as a plain rejection.
fn password_accepted(candidate: &str, stored_hash: Option<&str>) -> bool {
    match stored_hash {
        Some(hash) => verify_hash(candidate, hash).unwrap_or_else(|e| {
            warn!("Stored password hash failed verification: {:?}", e);
            false
        }),
        None => true,
    }
}

/// Fetch the gallery's media and folders for a viewer.
///
/// Link expiry is re-checked here on every call; the session token itself
/// never expires.
pub async fn gallery_photos(
    pool: &PgPool,
    token: &str,
    session: Option<&str>,
) -> Result<GalleryPhotosResponse, GalleryError> {
    let link = resolve_link(pool, token).await?;

    if link.requires_password() {
        let session = session.ok_or(GalleryError::Unauthorized)?;
        if !validate_session(session, token) {
            return Err(GalleryError::Unauthorized);
        }
    }

    let photos = media_for_gallery(pool, &link.gallery_id).await?;
    let folders = folders_for_gallery(pool, &link.gallery_id).await?;

    Ok(GalleryPhotosResponse {
        photos: photos
            .into_iter()
            .map(|item| PhotoDto {
                id: item.id,
                url: item.url,
                thumbnail_url: item.thumbnail_url,
                file_name: item.file_name,
                kind: item.kind,
                position: item.position,
                folder_id: item.folder_id,
            })
            .collect(),
        folders: folders
            .into_iter()
            .map(|folder| FolderDto {
                id: folder.id,
                name: folder.name,
                position: folder.position,
            })
            .collect(),
        allow_download: link.allow_download,
    })
}

pub async fn media_for_gallery(
    pool: &PgPool,
    gallery_id: &str,
) -> Result<Vec<MediaItem>, sqlx::Error> {
    sqlx::query_as::<_, MediaItem>(
        "SELECT id, gallery_id, storage_path, url, thumbnail_url, file_name,
                file_size, kind, position, folder_id, created_at
         FROM media_items WHERE gallery_id = $1
         ORDER BY position ASC",
    )
    .bind(gallery_id)
    .fetch_all(pool)
    .await
}

pub async fn folders_for_gallery(
    pool: &PgPool,
    gallery_id: &str,
) -> Result<Vec<Folder>, sqlx::Error> {
    sqlx::query_as::<_, Folder>(
        "SELECT id, gallery_id, name, position
         FROM folders WHERE gallery_id = $1
         ORDER BY position ASC",
    )
    .bind(gallery_id)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::{link_expired, password_accepted};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_expiry_never_expires() {
        assert!(!link_expired(None, date(2030, 1, 1)));
    }

    #[test]
    fn link_lives_through_its_expiry_date() {
        let expires = Some(date(2026, 3, 10));
        assert!(!link_expired(expires, date(2026, 3, 9)));
        assert!(!link_expired(expires, date(2026, 3, 10)));
    }

    #[test]
    fn link_dies_the_day_after() {
        let expires = Some(date(2026, 3, 10));
        assert!(link_expired(expires, date(2026, 3, 11)));
        assert!(link_expired(expires, date(2027, 1, 1)));
    }

    #[test]
    fn no_stored_hash_accepts_any_candidate() {
        assert!(password_accepted("anything", None));
        assert!(password_accepted("", None));
    }

    #[test]
    fn stored_hash_gates_candidates() {
        // Minimum cost keeps the test fast; verification is cost-agnostic.
        let hash = bcrypt::hash("sunset-2026", 4).unwrap();
        assert!(password_accepted("sunset-2026", Some(hash.as_str())));
        assert!(!password_accepted("sunset-2027", Some(hash.as_str())));
    }

    #[test]
    fn malformed_stored_hash_rejects_instead_of_erroring() {
        assert!(!password_accepted("anything", Some("not-a-bcrypt-hash")));
        assert!(!password_accepted("", Some("")));
    }
}
