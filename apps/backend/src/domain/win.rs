//! Win evaluation, run after every applied action.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::board::Sector;
use crate::domain::events::{CompletionReason, EventKind};
use crate::domain::session::{GameSession, GameStatus, UserId};
use crate::errors::DomainError;

/// Who has to be standing on `start` once every particle is held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinPolicy {
    /// The player who just acted.
    #[default]
    ActingPlayer,
    /// Any player; the acting player is still credited with the win.
    AnyPlayer,
}

impl WinPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            WinPolicy::ActingPlayer => "acting_player",
            WinPolicy::AnyPlayer => "any_player",
        }
    }
}

impl fmt::Display for WinPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WinPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "acting_player" => Ok(WinPolicy::ActingPlayer),
            "any_player" => Ok(WinPolicy::AnyPlayer),
            other => Err(DomainError::invalid_argument(format!(
                "Unknown win policy: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Ongoing,
    Won { winner: UserId },
    TimedOut,
}

/// Decide the outcome after the player at `acting` has acted. Pure.
pub fn evaluate(session: &GameSession, acting: usize, policy: WinPolicy) -> Verdict {
    if session.status != GameStatus::InProgress {
        return Verdict::Ongoing;
    }
    let Some(actor) = session.players.get(acting) else {
        return Verdict::Ongoing;
    };

    if session.all_particles_held() {
        let on_start = match policy {
            WinPolicy::ActingPlayer => actor.sector == Sector::Start,
            WinPolicy::AnyPlayer => session.players.iter().any(|p| p.sector == Sector::Start),
        };
        if on_start {
            return Verdict::Won {
                winner: actor.id.clone(),
            };
        }
    }

    if session.turn_counter >= session.max_turns {
        return Verdict::TimedOut;
    }
    Verdict::Ongoing
}

/// Apply a terminal verdict: set status and winner, append `game_completed`.
/// Returns the completion reason, or `None` when the game goes on.
pub fn conclude(
    session: &mut GameSession,
    verdict: Verdict,
    now: OffsetDateTime,
) -> Option<CompletionReason> {
    let (winner, reason) = match verdict {
        Verdict::Ongoing => return None,
        Verdict::Won { winner } => (Some(winner), CompletionReason::ParticlesSecured),
        Verdict::TimedOut => (None, CompletionReason::TurnBudgetExhausted),
    };

    session.status = GameStatus::Completed;
    session.winner = winner.clone();
    session.updated_at = now;
    session
        .events
        .append(now, EventKind::GameCompleted { winner, reason });
    Some(reason)
}
