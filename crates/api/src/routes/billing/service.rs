use crate::routes::billing::error::BillingError;
use crate::routes::billing::interfaces::CheckoutResponse;
use crate::routes::billing::stripe::{BillingClient, verify_webhook_signature};
use crate::routes::plans::service::{load_profile, test_tier_available};
use crate::state::AppState;
use chrono::{Days, Local};
use common_artydrop::{PlanTier, settings};
use sqlx::PgPool;
use tracing::{info, warn};

/// How long the one-time discounted tier stays active after purchase.
const TEST_PLAN_DURATION_DAYS: u64 = 30;

/// Parse a purchasable plan name. `none` is not purchasable.
#[must_use]
pub fn purchasable_tier(plan: &str) -> Option<PlanTier> {
    match plan {
        "test" => Some(PlanTier::Test),
        "payg" => Some(PlanTier::Payg),
        "studio" => Some(PlanTier::Studio),
        _ => None,
    }
}

fn price_id_for(tier: PlanTier) -> Option<&'static str> {
    let cfg = &settings().billing;
    match tier {
        PlanTier::Test => Some(&cfg.test_price_id),
        PlanTier::Payg => Some(&cfg.payg_price_id),
        PlanTier::Studio => Some(&cfg.studio_price_id),
        PlanTier::None => None,
    }
}

/// The one-time tier is a single payment; recurring tiers are subscriptions.
fn checkout_mode(tier: PlanTier) -> &'static str {
    match tier {
        PlanTier::Test => "payment",
        _ => "subscription",
    }
}

/// Create a hosted checkout session for the requested plan and return the
/// redirect URL. Creates the billing customer on first purchase and stores
/// its id on the profile.
pub async fn create_checkout(
    state: &AppState,
    user_id: &str,
    plan: &str,
) -> Result<CheckoutResponse, BillingError> {
    let tier =
        purchasable_tier(plan).ok_or_else(|| BillingError::InvalidPlan(plan.to_string()))?;
    let price_id =
        price_id_for(tier).ok_or_else(|| BillingError::InvalidPlan(plan.to_string()))?;

    if tier == PlanTier::Test && !test_tier_available(&state.pool, user_id).await? {
        return Err(BillingError::TestTierUsed);
    }

    ensure_profile(&state.pool, user_id).await?;
    let profile = load_profile(&state.pool, user_id)
        .await?
        .ok_or_else(|| BillingError::Internal(color_eyre::eyre::eyre!("Profile upsert lost")))?;

    let client = BillingClient::new(&state.http);
    let customer_id = match profile.billing_customer_id {
        Some(id) => id,
        None => {
            let id = client
                .create_customer(user_id)
                .await
                .map_err(BillingError::Internal)?;
            store_customer_id(&state.pool, user_id, &id).await?;
            id
        }
    };

    let url = client
        .create_checkout_session(&customer_id, price_id, plan, user_id, checkout_mode(tier))
        .await
        .map_err(BillingError::Internal)?;

    Ok(CheckoutResponse { url })
}

/// Ingest a provider webhook. Only `checkout.session.completed` mutates
/// state; every other event type is acknowledged and ignored.
pub async fn handle_webhook(
    state: &AppState,
    signature_header: Option<&str>,
    body: &[u8],
) -> Result<(), BillingError> {
    let secret = &settings().billing.webhook_secret;
    let header = signature_header.ok_or(BillingError::InvalidSignature)?;
    if !verify_webhook_signature(body, header, secret) {
        return Err(BillingError::InvalidSignature);
    }

    let event: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| BillingError::Internal(e.into()))?;

    let event_type = event["type"].as_str().unwrap_or_default();
    if event_type != "checkout.session.completed" {
        info!("Ignoring billing event type '{}'.", event_type);
        return Ok(());
    }

    let object = &event["data"]["object"];
    let Some(user_id) = object["client_reference_id"].as_str() else {
        warn!("Completed checkout event without client_reference_id; ignoring.");
        return Ok(());
    };
    let Some(tier) = object["metadata"]["plan"].as_str().and_then(purchasable_tier) else {
        warn!("Completed checkout event without a known plan; ignoring.");
        return Ok(());
    };
    let customer_id = object["customer"].as_str();

    activate_plan(&state.pool, user_id, tier, customer_id).await?;
    info!("Activated plan {} for user {}.", tier, user_id);
    Ok(())
}

async fn ensure_profile(pool: &PgPool, user_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO user_profiles (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

async fn store_customer_id(
    pool: &PgPool,
    user_id: &str,
    customer_id: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE user_profiles SET billing_customer_id = $2, updated_at = NOW() WHERE id = $1",
    )
    .bind(user_id)
    .bind(customer_id)
    .execute(pool)
    .await?;
    Ok(())
}

async fn activate_plan(
    pool: &PgPool,
    user_id: &str,
    tier: PlanTier,
    customer_id: Option<&str>,
) -> Result<(), sqlx::Error> {
    let expires_at = match tier {
        PlanTier::Test => Local::now()
            .date_naive()
            .checked_add_days(Days::new(TEST_PLAN_DURATION_DAYS)),
        _ => None,
    };
    let consumes_test_tier = tier == PlanTier::Test;

    sqlx::query(
        "INSERT INTO user_profiles
             (id, plan_tier, plan_status, plan_expires_at, test_tier_used, billing_customer_id)
         VALUES ($1, $2, 'active', $3, $4, $5)
         ON CONFLICT (id) DO UPDATE SET
             plan_tier = EXCLUDED.plan_tier,
             plan_status = 'active',
             plan_expires_at = EXCLUDED.plan_expires_at,
             test_tier_used = user_profiles.test_tier_used OR EXCLUDED.test_tier_used,
             billing_customer_id = COALESCE(EXCLUDED.billing_customer_id,
                                            user_profiles.billing_customer_id),
             updated_at = NOW()",
    )
    .bind(user_id)
    .bind(tier)
    .bind(expires_at)
    .bind(consumes_test_tier)
    .bind(customer_id)
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_real_plans_are_purchasable() {
        assert_eq!(purchasable_tier("test"), Some(PlanTier::Test));
        assert_eq!(purchasable_tier("payg"), Some(PlanTier::Payg));
        assert_eq!(purchasable_tier("studio"), Some(PlanTier::Studio));
        assert_eq!(purchasable_tier("none"), None);
        assert_eq!(purchasable_tier("TEST"), None);
        assert_eq!(purchasable_tier(""), None);
    }

    #[test]
    fn test_tier_checks_out_as_a_one_time_payment() {
        assert_eq!(checkout_mode(PlanTier::Test), "payment");
        assert_eq!(checkout_mode(PlanTier::Payg), "subscription");
        assert_eq!(checkout_mode(PlanTier::Studio), "subscription");
    }
}
