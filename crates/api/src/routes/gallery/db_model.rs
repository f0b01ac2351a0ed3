use chrono::{DateTime, NaiveDate, Utc};
use common_artydrop::{GalleryStatus, MediaKind};
use sqlx::FromRow;

/// A gallery row. Carries its own protection settings (`password_hash`,
/// `allow_download`) which apply on the direct-id path only; the share-link
/// row carries a parallel, independently evolved set. See `ShareTarget`.
#[derive(Debug, Clone, FromRow)]
pub struct Gallery {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub client_name: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub status: GalleryStatus,
    pub password_hash: Option<String>,
    pub allow_download: bool,
    pub cover_media_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A share link row. The `token` is the public identifier for the gallery;
/// only the archive endpoint additionally accepts a raw gallery id.
#[derive(Debug, Clone, FromRow)]
pub struct GalleryLink {
    pub id: String,
    pub gallery_id: String,
    pub token: String,
    pub password_hash: Option<String>,
    pub expires_at: Option<NaiveDate>,
    pub allow_download: bool,
    pub view_count: i32,
    pub last_viewed_at: Option<DateTime<Utc>>,
}

impl GalleryLink {
    /// Whether the link requires a password at all. "Password protected" is
    /// purely a function of a stored hash, not a separate flag.
    #[must_use]
    pub fn requires_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct MediaItem {
    pub id: String,
    pub gallery_id: String,
    pub storage_path: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub kind: MediaKind,
    pub position: i32,
    pub folder_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Folder {
    pub id: String,
    pub gallery_id: String,
    pub name: String,
    pub position: i32,
}
