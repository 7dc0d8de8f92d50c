use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Deserializer, Serialize};

use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Access token claims shared with the identity provider.
///
/// The identity service issues `{user_id, exp}` with a numeric `user_id`;
/// both that and a string `sub` are accepted.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Caller identifier
    #[serde(alias = "user_id", deserialize_with = "subject")]
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Issued-at (seconds since epoch); absent from identity-service tokens
    #[serde(default)]
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

fn subject<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Subject {
        Text(String),
        Number(i64),
    }

    Ok(match Subject::deserialize(deserializer)? {
        Subject::Text(s) => s,
        Subject::Number(n) => n.to_string(),
    })
}

/// Mint a HS256 access token with a 15-minute TTL.
///
/// Tokens are issued by the identity provider in production; this exists for
/// tests and local tooling.
pub fn mint_access_token(
    sub: &str,
    name: Option<&str>,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;

    // 15 minutes expiration
    let exp = iat + 15 * 60;

    let claims = Claims {
        sub: sub.to_string(),
        name: name.map(str::to_string),
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a bearer token and return its claims.
///
/// Expired tokens map to `UnauthorizedExpiredJwt`; every other failure
/// (bad signature, malformed, wrong algorithm) to `UnauthorizedInvalidJwt`.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(security.algorithm);
    validation.leeway = security.leeway_secs;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}
