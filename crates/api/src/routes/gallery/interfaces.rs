use chrono::NaiveDate;
use common_artydrop::MediaKind;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Public gallery summary, shown before any password prompt.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GallerySummaryResponse {
    pub title: String,
    pub client_name: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub cover_url: Option<String>,
    pub requires_password: bool,
    pub allow_download: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyPasswordBody {
    #[schema(value_type = String, format = "password")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyPasswordResponse {
    pub session: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PhotosQuery {
    pub session: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoDto {
    pub id: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub file_name: Option<String>,
    pub kind: MediaKind,
    pub position: i32,
    pub folder_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FolderDto {
    pub id: String,
    pub name: String,
    pub position: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPhotosResponse {
    pub photos: Vec<PhotoDto>,
    pub folders: Vec<FolderDto>,
    pub allow_download: bool,
}
