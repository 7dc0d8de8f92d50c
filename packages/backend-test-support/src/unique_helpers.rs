//! Test helpers for generating unique test data
//!
//! Caller identities are plain strings (the JWT `sub`), so tests generate
//! ULID-suffixed ids to stay isolated from one another.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("user");
/// let id2 = unique_str("user");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique caller id (JWT subject) with the given prefix
pub fn unique_sub(prefix: &str) -> String {
    format!("sub-{}", unique_str(prefix))
}

/// Generate a unique game name with the given prefix
pub fn unique_game_name(prefix: &str) -> String {
    format!("{prefix} {}", Ulid::new())
}
