//! ETags for game snapshots.
//!
//! The tag is derived from the session version, which the store bumps on every
//! persisted mutation, so equal tags mean an identical snapshot.

use actix_web::http::header::{HeaderMap, IF_NONE_MATCH};

use crate::domain::session::SessionId;

/// Format: `"game-{id}-v{version}"` (quoted, as HTTP requires).
pub fn game_etag(id: SessionId, version: u64) -> String {
    format!(r#""game-{id}-v{version}""#)
}

/// True when `If-None-Match` lists `etag` (weak or strong) or is `*`.
pub fn if_none_match_hits(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get_all(IF_NONE_MATCH)
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .any(|candidate| {
            candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
        })
}
