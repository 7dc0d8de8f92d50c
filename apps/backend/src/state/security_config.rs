use std::env;

use jsonwebtoken::Algorithm;

use crate::error::AppError;

/// Clock skew tolerated on `exp`, matching `jsonwebtoken`'s default.
pub const DEFAULT_LEEWAY_SECS: u64 = 60;

/// How bearer tokens from the identity collaborator are verified.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// HS256 secret shared with the identity collaborator
    pub jwt_secret: Vec<u8>,
    pub algorithm: Algorithm,
    pub leeway_secs: u64,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            leeway_secs: DEFAULT_LEEWAY_SECS,
        }
    }

    /// Read `BACKEND_JWT_SECRET` (required) and `BACKEND_JWT_LEEWAY_SECS`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("BACKEND_JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::config("BACKEND_JWT_SECRET must be set"))?;

        let leeway_secs = match lookup("BACKEND_JWT_LEEWAY_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                AppError::config(format!(
                    "BACKEND_JWT_LEEWAY_SECS must be a non-negative integer, got '{raw}'"
                ))
            })?,
            None => DEFAULT_LEEWAY_SECS,
        };

        Ok(Self {
            leeway_secs,
            ..Self::new(secret.into_bytes())
        })
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"entanglion-local-dev-secret".to_vec())
    }
}
