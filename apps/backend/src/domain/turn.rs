//! Turn engine: validate and apply exactly one player action.
//!
//! Checks run in a fixed order: session in progress, caller's turn, known
//! action, valid target. Nothing is mutated until all of them pass.

use std::fmt;

use time::OffsetDateTime;

use crate::domain::board::{is_adjacent, Sector};
use crate::domain::events::{CompletionReason, EventKind, EventLog};
use crate::domain::gate::QuantumGate;
use crate::domain::session::{
    GameSession, GameStatus, ParticleId, ParticleLocation, Role, UserId,
};
use crate::domain::win::{self, WinPolicy};
use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Move(Sector),
    UseQuantumGate,
    EndTurn,
}

impl PlayerAction {
    pub const MOVE: &'static str = "move";
    pub const USE_QUANTUM_GATE: &'static str = "use_quantum_gate";
    pub const END_TURN: &'static str = "end_turn";

    /// Parse the wire pair `{action, target?}`. An empty target counts as absent.
    pub fn parse(action: &str, target: Option<&str>) -> Result<Self, DomainError> {
        let target = target.map(str::trim).filter(|t| !t.is_empty());
        match action {
            Self::MOVE => {
                let raw = target
                    .ok_or_else(|| DomainError::invalid_target("A move requires a target sector"))?;
                Ok(PlayerAction::Move(raw.parse()?))
            }
            Self::USE_QUANTUM_GATE | Self::END_TURN => {
                if let Some(t) = target {
                    return Err(DomainError::invalid_target(format!(
                        "Action {action} takes no target (got {t})"
                    )));
                }
                Ok(if action == Self::END_TURN {
                    PlayerAction::EndTurn
                } else {
                    PlayerAction::UseQuantumGate
                })
            }
            other => Err(DomainError::invalid_action(format!("Unknown action: {other}"))),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            PlayerAction::Move(_) => Self::MOVE,
            PlayerAction::UseQuantumGate => Self::USE_QUANTUM_GATE,
            PlayerAction::EndTurn => Self::END_TURN,
        }
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::Move(to) => write!(f, "move to {to}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Collaborators and inputs an action needs besides the session itself.
pub struct TurnContext<'a> {
    pub gate: &'a dyn QuantumGate,
    pub win_policy: WinPolicy,
    pub now: OffsetDateTime,
}

/// What an applied action changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub action: PlayerAction,
    /// Particles picked up by a move, in id order.
    pub collected: Vec<ParticleId>,
    /// Index of the player whose turn it is after the action.
    pub next_turn_index: usize,
    /// Set when the action ended the game.
    pub completed: Option<CompletionReason>,
}

/// Validate and apply one action by `player_id`, then run the win evaluator.
pub fn apply_move(
    session: &mut GameSession,
    player_id: &str,
    action: &str,
    target: Option<&str>,
    ctx: &TurnContext<'_>,
) -> Result<MoveOutcome, DomainError> {
    if session.status != GameStatus::InProgress {
        return Err(DomainError::invalid_state(format!(
            "Game {} is not in progress",
            session.id
        )));
    }
    let acting = session.current_turn_index;
    let on_turn = session
        .players
        .get(acting)
        .ok_or_else(|| DomainError::internal("Turn index out of range"))?;
    if on_turn.id != player_id {
        return Err(DomainError::not_your_turn(format!(
            "It is {}'s turn",
            on_turn.name
        )));
    }

    let action = PlayerAction::parse(action, target)?;
    let collected = match action {
        PlayerAction::Move(to) => move_player(session, acting, to, ctx.now)?,
        PlayerAction::UseQuantumGate => {
            use_gate(session, acting, ctx)?;
            Vec::new()
        }
        PlayerAction::EndTurn => {
            end_turn(session, acting, ctx.now);
            Vec::new()
        }
    };

    session.updated_at = ctx.now;
    let verdict = win::evaluate(session, acting, ctx.win_policy);
    let completed = win::conclude(session, verdict, ctx.now);

    Ok(MoveOutcome {
        action,
        collected,
        next_turn_index: session.current_turn_index,
        completed,
    })
}

fn move_player(
    session: &mut GameSession,
    acting: usize,
    to: Sector,
    now: OffsetDateTime,
) -> Result<Vec<ParticleId>, DomainError> {
    let (from, player_id) = {
        let player = &session.players[acting];
        (player.sector, player.id.clone())
    };
    if !is_adjacent(from, to) {
        return Err(DomainError::invalid_target(format!(
            "{to} is not adjacent to {from}"
        )));
    }

    session.players[acting].sector = to;

    let mut here: Vec<usize> = session
        .particles
        .iter()
        .enumerate()
        .filter(|(_, p)| p.sector() == Some(to))
        .map(|(i, _)| i)
        .collect();
    here.sort_by_key(|&i| session.particles[i].id);

    let mut collected = Vec::with_capacity(here.len());
    for i in here {
        let particle = &mut session.particles[i];
        particle.location = ParticleLocation::HeldBy(player_id.clone());
        collected.push(particle.id);
        let kind = EventKind::ParticleCollected {
            player_id: player_id.clone(),
            particle_id: particle.id,
            particle_kind: particle.kind,
        };
        session.events.append(now, kind);
    }
    Ok(collected)
}

fn use_gate(
    session: &mut GameSession,
    acting: usize,
    ctx: &TurnContext<'_>,
) -> Result<(), DomainError> {
    let before = GateFrame::of(session);

    ctx.gate.apply(session, acting)?;

    if let Some(what) = before.violation(session) {
        return Err(DomainError::internal(format!(
            "Quantum gate '{}' {what}",
            ctx.gate.name()
        )));
    }

    let player_id = session.players[acting].id.clone();
    session
        .events
        .append(ctx.now, EventKind::QuantumGateUsed { player_id });
    Ok(())
}

/// Everything a gate effect must leave alone. Sectors and particle
/// locations may change; seating, turn order, and history may not.
struct GateFrame {
    particle_ids: Vec<ParticleId>,
    seats: Vec<(UserId, Role)>,
    status: GameStatus,
    current_turn_index: usize,
    turn_counter: u32,
    winner: Option<UserId>,
    events: EventLog,
}

impl GateFrame {
    fn of(session: &GameSession) -> Self {
        Self {
            particle_ids: session.particle_ids(),
            seats: seats(session),
            status: session.status,
            current_turn_index: session.current_turn_index,
            turn_counter: session.turn_counter,
            winner: session.winner.clone(),
            events: session.events.clone(),
        }
    }

    /// What the gate broke, if anything.
    fn violation(&self, after: &GameSession) -> Option<&'static str> {
        if after.particle_ids() != self.particle_ids {
            return Some("changed the particle set");
        }
        if after
            .particles
            .iter()
            .any(|p| p.holder().is_some_and(|h| !after.is_member(h)))
        {
            return Some("handed a particle to a non-player");
        }
        if seats(after) != self.seats || after.status != self.status {
            return Some("changed seating or status");
        }
        if after.current_turn_index != self.current_turn_index
            || after.turn_counter != self.turn_counter
        {
            return Some("changed the turn order");
        }
        if after.winner != self.winner {
            return Some("changed the winner");
        }
        if after.events != self.events {
            return Some("rewrote the event log");
        }
        None
    }
}

fn seats(session: &GameSession) -> Vec<(UserId, Role)> {
    session
        .players
        .iter()
        .map(|p| (p.id.clone(), p.role))
        .collect()
}

fn end_turn(session: &mut GameSession, acting: usize, now: OffsetDateTime) {
    let next = (acting + 1) % session.players.len();
    session.current_turn_index = next;
    session.turn_counter = session.turn_counter.saturating_add(1);

    let kind = EventKind::TurnEnded {
        player_id: session.players[acting].id.clone(),
        next_player_id: session.players[next].id.clone(),
    };
    session.events.append(now, kind);
}
