use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Maps to the `plan_tier` Postgres enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "plan_tier", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    None,
    Test,
    Payg,
    Studio,
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Test => write!(f, "test"),
            Self::Payg => write!(f, "payg"),
            Self::Studio => write!(f, "studio"),
        }
    }
}

/// Maps to the `plan_status` Postgres enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "plan_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Active,
    Inactive,
}

/// Maps to the `gallery_status` Postgres enum.
///
/// `Expired` is never stored; it is computed at read time from the share
/// link's expiry date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "gallery_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GalleryStatus {
    Draft,
    Active,
    Expired,
}

/// Maps to the `media_kind` Postgres enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "media_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
        }
    }
}
