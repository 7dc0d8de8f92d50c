//! Append-only event log scoped to one session.
//!
//! Positions start at 1 and increase by one per append, so the event at
//! position `p` always lives at index `p - 1`. Nothing is ever edited or removed.

use time::OffsetDateTime;

use crate::domain::session::{ParticleId, ParticleKind, UserId};

/// Why a session reached `completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    /// Every particle held and the winning condition on `start` satisfied.
    ParticlesSecured,
    /// Turn budget exhausted without a win.
    TurnBudgetExhausted,
}

impl CompletionReason {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CompletionReason::ParticlesSecured => "particles_secured",
            CompletionReason::TurnBudgetExhausted => "turn_budget_exhausted",
        }
    }
}

/// One variant per event kind, each with its own payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    GameStart {
        started_by: UserId,
    },
    ParticleCollected {
        player_id: UserId,
        particle_id: ParticleId,
        particle_kind: ParticleKind,
    },
    QuantumGateUsed {
        player_id: UserId,
    },
    TurnEnded {
        player_id: UserId,
        next_player_id: UserId,
    },
    GameCompleted {
        winner: Option<UserId>,
        reason: CompletionReason,
    },
}

impl EventKind {
    /// Wire name of the kind.
    pub const fn name(&self) -> &'static str {
        match self {
            EventKind::GameStart { .. } => "game_start",
            EventKind::ParticleCollected { .. } => "particle_collected",
            EventKind::QuantumGateUsed { .. } => "quantum_gate_used",
            EventKind::TurnEnded { .. } => "turn_ended",
            EventKind::GameCompleted { .. } => "game_completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub position: u64,
    pub timestamp: OffsetDateTime,
    pub kind: EventKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and return its position.
    pub fn append(&mut self, timestamp: OffsetDateTime, kind: EventKind) -> u64 {
        let position = self.last_position() + 1;
        self.events.push(Event {
            position,
            timestamp,
            kind,
        });
        position
    }

    /// Events strictly after `position`, in order. `since(0)` is the whole log;
    /// a position past the end yields an empty slice.
    pub fn since(&self, position: u64) -> &[Event] {
        let start = usize::try_from(position)
            .unwrap_or(usize::MAX)
            .min(self.events.len());
        &self.events[start..]
    }

    /// Position of the newest event, or 0 for an empty log.
    pub fn last_position(&self) -> u64 {
        self.events.last().map(|e| e.position).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }
}
