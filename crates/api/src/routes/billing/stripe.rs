use color_eyre::eyre::eyre;
use common_artydrop::settings;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Thin client for the billing provider's REST API. The provider owns all
/// payment state; this service only creates customers and checkout sessions
/// and reads back ids/URLs.
pub struct BillingClient<'a> {
    http: &'a reqwest::Client,
}

impl<'a> BillingClient<'a> {
    #[must_use]
    pub fn new(http: &'a reqwest::Client) -> Self {
        Self { http }
    }

    /// Create a billing customer tagged with our user id.
    ///
    /// # Errors
    ///
    /// Returns an error on a non-2xx provider response or a response body
    /// without an `id`.
    pub async fn create_customer(&self, user_id: &str) -> color_eyre::Result<String> {
        let cfg = &settings().billing;
        let response = self
            .http
            .post(format!("{}/v1/customers", cfg.api_base))
            .bearer_auth(&cfg.secret_key)
            .form(&[("metadata[user_id]", user_id)])
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        body["id"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| eyre!("Customer response missing id"))
    }

    /// Create a checkout session and return the redirect URL.
    ///
    /// # Errors
    ///
    /// Returns an error on a non-2xx provider response or a response body
    /// without a `url`.
    pub async fn create_checkout_session(
        &self,
        customer_id: &str,
        price_id: &str,
        plan: &str,
        user_id: &str,
        mode: &str,
    ) -> color_eyre::Result<String> {
        let cfg = &settings().billing;
        let params = [
            ("mode", mode),
            ("customer", customer_id),
            ("client_reference_id", user_id),
            ("line_items[0][price]", price_id),
            ("line_items[0][quantity]", "1"),
            ("metadata[plan]", plan),
            ("success_url", cfg.success_url.as_str()),
            ("cancel_url", cfg.cancel_url.as_str()),
        ];
        let response = self
            .http
            .post(format!("{}/v1/checkout/sessions", cfg.api_base))
            .bearer_auth(&cfg.secret_key)
            .form(&params)
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        body["url"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| eyre!("Checkout session response missing url"))
    }
}

/// Verify the provider's webhook signature header
/// (`t=<unix>,v1=<hex hmac>`, possibly with several `v1` entries).
///
/// The signed payload is `"{t}.{body}"`, HMAC-SHA256 with the webhook
/// secret; comparison is constant-time via `Mac::verify_slice`.
#[must_use]
pub fn verify_webhook_signature(payload: &[u8], header: &str, secret: &str) -> bool {
    let mut timestamp = None;
    let mut signatures = Vec::new();
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("v1", value)) => signatures.push(value),
            _ => {}
        }
    }
    let Some(timestamp) = timestamp else {
        return false;
    };

    for signature in signatures {
        let Ok(expected) = hex::decode(signature) else {
            continue;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
            return false;
        };
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        if mac.verify_slice(&expected).is_ok() {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(payload: &[u8], timestamp: &str, secret: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn valid_signature_verifies() {
        let payload = br#"{"type":"checkout.session.completed"}"#;
        let signature = sign(payload, "1720000000", "whsec_test");
        let header = format!("t=1720000000,v1={signature}");
        assert!(verify_webhook_signature(payload, &header, "whsec_test"));
    }

    #[test]
    fn wrong_secret_or_tampered_payload_fails() {
        let payload = br#"{"type":"checkout.session.completed"}"#;
        let signature = sign(payload, "1720000000", "whsec_test");
        let header = format!("t=1720000000,v1={signature}");
        assert!(!verify_webhook_signature(payload, &header, "whsec_other"));
        assert!(!verify_webhook_signature(b"{}", &header, "whsec_test"));
    }

    #[test]
    fn malformed_headers_fail_closed() {
        let payload = b"{}";
        assert!(!verify_webhook_signature(payload, "", "whsec_test"));
        assert!(!verify_webhook_signature(payload, "v1=deadbeef", "whsec_test"));
        assert!(!verify_webhook_signature(payload, "t=123", "whsec_test"));
        assert!(!verify_webhook_signature(
            payload,
            "t=123,v1=not-hex",
            "whsec_test"
        ));
    }

    #[test]
    fn any_matching_v1_entry_is_enough() {
        let payload = b"{}";
        let good = sign(payload, "42", "whsec_test");
        let header = format!("t=42,v1=deadbeef,v1={good}");
        assert!(verify_webhook_signature(payload, &header, "whsec_test"));
    }
}
