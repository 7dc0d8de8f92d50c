//! Claims inserted into request extensions by the JWT middleware.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BackendClaims {
    /// Caller identifier issued by the identity provider.
    pub sub: String,
    /// Display name; absent tokens fall back to `sub`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl BackendClaims {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.sub)
    }
}
