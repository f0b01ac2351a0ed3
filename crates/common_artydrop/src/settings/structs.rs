use serde::Deserialize;

/// Overall application configuration structure.
#[derive(Debug, Deserialize)]
pub struct AppSettings {
    pub logging: LoggingSettings,
    pub database: DatabaseSettings,
    pub api: ApiSettings,
    pub auth: AuthSettings,
    pub billing: BillingSettings,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

/// Database connection and related configuration.
#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: u64,
    pub idle_timeout: u64,
    pub acquire_timeout: u64,
    /// Length of generated share tokens and row ids.
    pub token_length: usize,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize)]
pub struct ApiSettings {
    pub host: String,
    pub port: u32,
    pub allowed_origins: Vec<String>,
}

/// Configuration for caller identification.
///
/// The identity provider signs its bearer tokens with a shared secret; this
/// service only verifies them, it never issues them.
#[derive(Debug, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
}

/// Billing provider configuration.
#[derive(Debug, Deserialize)]
pub struct BillingSettings {
    pub api_base: String,
    pub secret_key: String,
    pub webhook_secret: String,
    pub success_url: String,
    pub cancel_url: String,
    /// Provider price id per purchasable plan tier.
    pub test_price_id: String,
    pub payg_price_id: String,
    pub studio_price_id: String,
}
