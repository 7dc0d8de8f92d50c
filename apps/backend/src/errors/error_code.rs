//! Error codes for the Entanglion backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Entanglion backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Access denied
    Forbidden,

    // Request Validation
    /// Invalid game ID provided
    InvalidGameId,
    /// Invalid argument to a lifecycle operation
    InvalidArgument,
    /// Unknown action name
    InvalidAction,
    /// Missing, unknown, or non-adjacent move target
    InvalidTarget,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Game not found
    GameNotFound,

    // Session State Conflicts
    /// Operation not valid for the session's status
    InvalidState,
    /// Caller is not the current player
    NotYourTurn,
    /// Session already has its target number of players
    SessionFull,
    /// Caller already joined the session
    AlreadyJoined,
    /// Session cannot start with fewer than two players
    NotEnoughPlayers,

    // System Errors
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::Forbidden => "FORBIDDEN",

            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::InvalidAction => "INVALID_ACTION",
            Self::InvalidTarget => "INVALID_TARGET",
            Self::BadRequest => "BAD_REQUEST",

            Self::GameNotFound => "GAME_NOT_FOUND",

            Self::InvalidState => "INVALID_STATE",
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::SessionFull => "SESSION_FULL",
            Self::AlreadyJoined => "ALREADY_JOINED",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
