use chrono::{DateTime, NaiveDate, Utc};
use common_artydrop::GalleryStatus;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryBody {
    pub title: String,
    pub client_name: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryResponse {
    pub id: String,
    pub title: String,
    pub client_name: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub status: GalleryStatus,
    pub allow_download: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareGalleryBody {
    /// When set, viewers must pass a password check before seeing photos.
    #[schema(value_type = Option<String>, format = "password")]
    pub password: Option<String>,
    /// Last day the link works; it dies at end of that local day.
    pub expires_at: Option<NaiveDate>,
    #[serde(default = "default_allow_download")]
    pub allow_download: bool,
}

fn default_allow_download() -> bool {
    true
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareLinkResponse {
    pub token: String,
    pub expires_at: Option<NaiveDate>,
    pub allow_download: bool,
    pub requires_password: bool,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryListItem {
    pub id: String,
    pub title: String,
    pub client_name: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub status: GalleryStatus,
    pub media_count: i64,
    pub created_at: DateTime<Utc>,
}
