use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Plan-gated actions a client can ask about.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlanAction {
    CreateGallery,
    UploadPhotos,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckPermissionBody {
    pub action: PlanAction,
    pub gallery_id: Option<String>,
    pub current_photo_count: Option<u32>,
    pub files_to_upload: Option<u32>,
}

/// The machine-checkable part is `allowed`; the reason string is advisory,
/// for display and logging only. Clients must not branch on its contents.
#[derive(Debug, Serialize, PartialEq, Eq, ToSchema)]
pub struct PermissionDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl PermissionDecision {
    #[must_use]
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    #[must_use]
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}
