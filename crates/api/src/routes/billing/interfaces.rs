use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutBody {
    /// Plan name: `test`, `payg`, or `studio`.
    pub plan: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    /// Redirect URL for the billing provider's hosted checkout.
    pub url: String,
}
