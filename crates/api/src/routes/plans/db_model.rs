use chrono::{DateTime, NaiveDate, Utc};
use common_artydrop::{PlanStatus, PlanTier};
use sqlx::FromRow;

/// A user's plan state, keyed by the identity provider's user id.
#[derive(Debug, Clone, FromRow)]
pub struct UserProfile {
    pub id: String,
    pub plan_tier: PlanTier,
    pub plan_status: PlanStatus,
    /// Only meaningful for the time-boxed `test` tier.
    pub plan_expires_at: Option<NaiveDate>,
    /// Set once, never cleared: the one-time tier cannot be repurchased.
    pub test_tier_used: bool,
    pub billing_customer_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
