use crate::routes::plans::db_model::UserProfile;
use crate::routes::plans::error::PlansError;
use crate::routes::plans::interfaces::{CheckPermissionBody, PermissionDecision, PlanAction};
use crate::routes::plans::limits::{TierLimits, limits_for};
use chrono::{Local, NaiveDate};
use common_artydrop::{PlanStatus, PlanTier};
use sqlx::PgPool;

const NO_ACTIVE_PLAN: &str = "You need an active plan to do this.";
const GALLERY_LIMIT_REACHED: &str = "Your plan's gallery limit has been reached.";
const PHOTO_LIMIT_REACHED: &str = "This upload would exceed your plan's photo limit.";
const TEST_TIER_USED: &str = "The trial plan can only be used once per account.";

pub async fn load_profile(
    pool: &PgPool,
    user_id: &str,
) -> Result<Option<UserProfile>, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(
        "SELECT id, plan_tier, plan_status, plan_expires_at, test_tier_used,
                billing_customer_id, created_at, updated_at
         FROM user_profiles WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Whether the profile currently grants any plan at all. A `test` plan past
/// its expiry date counts as inactive; the expiry is evaluated at read time,
/// nothing is written back.
#[must_use]
pub fn plan_is_active(profile: &UserProfile, today: NaiveDate) -> bool {
    if profile.plan_status != PlanStatus::Active || profile.plan_tier == PlanTier::None {
        return false;
    }
    if profile.plan_tier == PlanTier::Test
        && let Some(expires) = profile.plan_expires_at
        && expires < today
    {
        return false;
    }
    true
}

/// Decide whether a plan-gated action is permitted for this user.
pub async fn check_permission(
    pool: &PgPool,
    user_id: &str,
    body: &CheckPermissionBody,
) -> Result<PermissionDecision, PlansError> {
    let Some(profile) = load_profile(pool, user_id).await? else {
        return Ok(PermissionDecision::deny(NO_ACTIVE_PLAN));
    };
    if !plan_is_active(&profile, Local::now().date_naive()) {
        return Ok(PermissionDecision::deny(NO_ACTIVE_PLAN));
    }
    let Some(limits) = limits_for(profile.plan_tier) else {
        return Ok(PermissionDecision::deny(NO_ACTIVE_PLAN));
    };

    match body.action {
        PlanAction::CreateGallery => {
            let existing = count_galleries(pool, user_id).await?;
            Ok(decide_create_gallery(&limits, existing))
        }
        PlanAction::UploadPhotos => {
            let current = body.current_photo_count.unwrap_or(0);
            let requested = body.files_to_upload.unwrap_or(0);
            Ok(decide_upload_photos(&limits, current, requested))
        }
    }
}

/// Gallery creation is denied at the ceiling (`existing >= n`).
#[must_use]
pub fn decide_create_gallery(limits: &TierLimits, existing: u32) -> PermissionDecision {
    if limits.galleries.allows_one_more(existing) {
        PermissionDecision::allow()
    } else {
        PermissionDecision::deny(GALLERY_LIMIT_REACHED)
    }
}

/// Uploads are denied only strictly past the ceiling
/// (`current + requested > n`); landing exactly on it is fine.
#[must_use]
pub fn decide_upload_photos(
    limits: &TierLimits,
    current: u32,
    requested: u32,
) -> PermissionDecision {
    let total = current.saturating_add(requested);
    if limits.photos_per_gallery.allows_total(total) {
        PermissionDecision::allow()
    } else {
        PermissionDecision::deny(PHOTO_LIMIT_REACHED)
    }
}

pub async fn count_galleries(pool: &PgPool, user_id: &str) -> Result<u32, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM galleries WHERE owner_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(count.try_into().unwrap_or(u32::MAX))
}

/// Whether the one-time `test` tier may still be purchased by this user.
///
/// Consumption is recorded per user id and, as anti-abuse, per billing
/// customer id: any other profile sharing the same customer also blocks it.
pub async fn test_tier_available(pool: &PgPool, user_id: &str) -> Result<bool, sqlx::Error> {
    let used: bool = sqlx::query_scalar(
        "SELECT EXISTS(
             SELECT 1 FROM user_profiles
             WHERE test_tier_used
               AND (id = $1
                    OR (billing_customer_id IS NOT NULL
                        AND billing_customer_id = (
                            SELECT billing_customer_id FROM user_profiles WHERE id = $1
                        )))
         )",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(!used)
}

#[must_use]
pub fn test_tier_denied_reason() -> &'static str {
    TEST_TIER_USED
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile(tier: PlanTier, status: PlanStatus, expires: Option<NaiveDate>) -> UserProfile {
        UserProfile {
            id: "user-1".into(),
            plan_tier: tier,
            plan_status: status,
            plan_expires_at: expires,
            test_tier_used: false,
            billing_customer_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    #[test]
    fn none_tier_and_inactive_status_are_not_active() {
        assert!(!plan_is_active(
            &profile(PlanTier::None, PlanStatus::Active, None),
            today()
        ));
        assert!(!plan_is_active(
            &profile(PlanTier::Studio, PlanStatus::Inactive, None),
            today()
        ));
    }

    #[test]
    fn test_tier_respects_its_expiry_date() {
        let expired = profile(
            PlanTier::Test,
            PlanStatus::Active,
            NaiveDate::from_ymd_opt(2026, 6, 14),
        );
        assert!(!plan_is_active(&expired, today()));

        let current = profile(
            PlanTier::Test,
            PlanStatus::Active,
            NaiveDate::from_ymd_opt(2026, 6, 15),
        );
        assert!(plan_is_active(&current, today()));
    }

    #[test]
    fn paid_tiers_ignore_the_expiry_column() {
        let stale_date = profile(
            PlanTier::Studio,
            PlanStatus::Active,
            NaiveDate::from_ymd_opt(2020, 1, 1),
        );
        assert!(plan_is_active(&stale_date, today()));
    }

    #[test]
    fn create_gallery_denied_at_ceiling_allowed_below() {
        let limits = limits_for(PlanTier::Test).unwrap();
        assert!(decide_create_gallery(&limits, 0).allowed);

        let at_ceiling = decide_create_gallery(&limits, 1);
        assert!(!at_ceiling.allowed);
        assert!(at_ceiling.reason.is_some());
    }

    #[test]
    fn upload_allowed_exactly_at_ceiling_denied_one_over() {
        let limits = limits_for(PlanTier::Test).unwrap();
        assert!(decide_upload_photos(&limits, 40, 10).allowed);
        assert!(!decide_upload_photos(&limits, 40, 11).allowed);
    }

    #[test]
    fn unlimited_tier_allows_arbitrarily_large_counts() {
        let limits = limits_for(PlanTier::Studio).unwrap();
        assert!(decide_create_gallery(&limits, u32::MAX).allowed);
        assert!(decide_upload_photos(&limits, u32::MAX, u32::MAX).allowed);
    }
}
