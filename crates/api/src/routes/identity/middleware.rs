use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use common_artydrop::settings;
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;

/// Claims carried by the identity provider's bearer token. Only the subject
/// is used; user records themselves live with the provider.
#[derive(Debug, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// The authenticated caller, extracted from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let cfg = settings();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(cfg.auth.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

        Ok(AuthUser {
            id: token_data.claims.sub,
        })
    }
}
