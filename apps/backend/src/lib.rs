#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod infra;
pub mod middleware;
pub mod protocol;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod trace_ctx;


// Re-exports for public API
pub use auth::claims::BackendClaims;
pub use auth::jwt::{mint_access_token, verify_access_token, Claims};
pub use config::EngineConfig;
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use extractors::current_user::CurrentUser;
pub use extractors::game_id::GameId;
pub use infra::state::{build_state, StateBuilder};
pub use middleware::cors::cors_middleware;
pub use middleware::jwt_extract::JwtExtract;
pub use middleware::request_trace::RequestTrace;
pub use middleware::security_headers::SecurityHeaders;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use services::GameService;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;
pub use store::{InMemorySessionStore, SessionStore};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
