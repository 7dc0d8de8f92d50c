//! Domain-level error type used across the engine, store, and services.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! through `From<DomainError> for AppError`.

use thiserror::Error;

/// Every way an engine operation can be rejected.
///
/// A rejected operation never mutates the session it was addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The addressed session does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Input rejected before touching any session (empty name, bad player count).
    #[error("{0}")]
    InvalidArgument(String),
    /// Operation not valid for the session's current status.
    #[error("{0}")]
    InvalidState(String),
    /// Caller is not the player whose turn it is.
    #[error("{0}")]
    NotYourTurn(String),
    /// Action name is not one of the supported actions.
    #[error("{0}")]
    InvalidAction(String),
    /// Move target missing, unknown, or not adjacent; or a target given where none is allowed.
    #[error("{0}")]
    InvalidTarget(String),
    #[error("{0}")]
    SessionFull(String),
    #[error("{0}")]
    AlreadyJoined(String),
    #[error("{0}")]
    NotEnoughPlayers(String),
    /// Caller lacks the privilege (e.g. only the creator may start).
    #[error("{0}")]
    Forbidden(String),
    /// Broken invariant, e.g. a pluggable gate effect that lost a particle.
    #[error("{0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound(detail.into())
    }
    pub fn invalid_argument(detail: impl Into<String>) -> Self {
        Self::InvalidArgument(detail.into())
    }
    pub fn invalid_state(detail: impl Into<String>) -> Self {
        Self::InvalidState(detail.into())
    }
    pub fn not_your_turn(detail: impl Into<String>) -> Self {
        Self::NotYourTurn(detail.into())
    }
    pub fn invalid_action(detail: impl Into<String>) -> Self {
        Self::InvalidAction(detail.into())
    }
    pub fn invalid_target(detail: impl Into<String>) -> Self {
        Self::InvalidTarget(detail.into())
    }
    pub fn session_full(detail: impl Into<String>) -> Self {
        Self::SessionFull(detail.into())
    }
    pub fn already_joined(detail: impl Into<String>) -> Self {
        Self::AlreadyJoined(detail.into())
    }
    pub fn not_enough_players(detail: impl Into<String>) -> Self {
        Self::NotEnoughPlayers(detail.into())
    }
    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::Forbidden(detail.into())
    }
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }
}
