pub mod cors;
pub mod jwt_extract;
pub mod request_trace;
pub mod security_headers;
pub mod structured_logger;
pub mod trace_span;

pub use cors::cors_middleware;
pub use jwt_extract::JwtExtract;
pub use request_trace::{RequestTrace, TraceId};
pub use security_headers::SecurityHeaders;
pub use structured_logger::StructuredLogger;
pub use trace_span::TraceSpan;

/// `{game_id}` of a `/api/games/{game_id}/...` path, if it is numeric.
pub(crate) fn game_id_from_path(path: &str) -> Option<i64> {
    path.strip_prefix("/api/games/")?
        .split('/')
        .next()?
        .parse()
        .ok()
}
