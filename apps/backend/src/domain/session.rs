//! Session data model: players, particles, and the session container.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::board::Sector;
use crate::domain::events::EventLog;

pub type SessionId = i64;
/// Caller identity as issued by the identity collaborator (JWT `sub`).
pub type UserId = String;
pub type ParticleId = u32;

/// Session status. Transitions only move forward: waiting → in_progress → completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Waiting,
    InProgress,
    Completed,
}

impl GameStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Waiting => "waiting",
            GameStatus::InProgress => "in_progress",
            GameStatus::Completed => "completed",
        }
    }
}

/// Crew role, handed out in join order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Captain,
    Navigator,
    Engineer,
    Scientist,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Captain,
        Role::Navigator,
        Role::Engineer,
        Role::Scientist,
    ];

    /// Role for the `seat`-th player to join (0 = creator).
    pub fn for_seat(seat: usize) -> Option<Role> {
        Self::ALL.get(seat).copied()
    }
}

/// Largest session size; one player per role.
pub const MAX_PLAYERS: usize = Role::ALL.len();
pub const MIN_PLAYERS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleKind {
    Photon,
    Electron,
    Ion,
    Qubit,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; 4] = [
        ParticleKind::Photon,
        ParticleKind::Electron,
        ParticleKind::Ion,
        ParticleKind::Qubit,
    ];

    /// Kinds are dealt round-robin over 1-based particle ids.
    pub fn for_particle(id: ParticleId) -> ParticleKind {
        let idx = (id.saturating_sub(1) as usize) % Self::ALL.len();
        Self::ALL[idx]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ParticleKind::Photon => "photon",
            ParticleKind::Electron => "electron",
            ParticleKind::Ion => "ion",
            ParticleKind::Qubit => "qubit",
        }
    }
}

/// Where a particle is. Exactly one of the two, by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticleLocation {
    OnBoard(Sector),
    HeldBy(UserId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Particle {
    pub id: ParticleId,
    pub kind: ParticleKind,
    pub location: ParticleLocation,
}

impl Particle {
    pub fn is_on_board(&self) -> bool {
        matches!(self.location, ParticleLocation::OnBoard(_))
    }

    pub fn sector(&self) -> Option<Sector> {
        match self.location {
            ParticleLocation::OnBoard(sector) => Some(sector),
            ParticleLocation::HeldBy(_) => None,
        }
    }

    pub fn holder(&self) -> Option<&str> {
        match &self.location {
            ParticleLocation::HeldBy(id) => Some(id.as_str()),
            ParticleLocation::OnBoard(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: UserId,
    pub name: String,
    pub role: Role,
    pub sector: Sector,
}

/// Authenticated caller as seen by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: UserId,
    pub name: String,
}

impl Caller {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One game instance. Mutated only through lifecycle and turn operations.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub id: SessionId,
    pub name: String,
    pub status: GameStatus,
    pub creator: UserId,
    pub target_player_count: usize,
    /// Join order; index 0 is the creator.
    pub players: Vec<Player>,
    /// Empty until the session starts; the id set is fixed from then on.
    pub particles: Vec<Particle>,
    /// Valid index into `players` while in progress.
    pub current_turn_index: usize,
    pub turn_counter: u32,
    pub max_turns: u32,
    pub winner: Option<UserId>,
    pub events: EventLog,
    /// Placement seed recorded at start.
    pub rng_seed: Option<u64>,
    /// Bumped by the store on every persisted mutation.
    pub version: u64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl GameSession {
    pub fn player(&self, user_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == user_id)
    }

    pub fn player_index(&self, user_id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == user_id)
    }

    pub fn is_member(&self, user_id: &str) -> bool {
        self.player_index(user_id).is_some()
    }

    pub fn creator_player(&self) -> Option<&Player> {
        self.player(&self.creator)
    }

    /// Player whose turn it is; `None` unless the session is in progress.
    pub fn current_player(&self) -> Option<&Player> {
        match self.status {
            GameStatus::InProgress => self.players.get(self.current_turn_index),
            _ => None,
        }
    }

    /// Display name for `user_id`, falling back to the raw id.
    pub fn display_name<'a>(&'a self, user_id: &'a str) -> &'a str {
        self.player(user_id)
            .map(|p| p.name.as_str())
            .unwrap_or(user_id)
    }

    /// Particles held by `user_id`, in id order.
    pub fn collected_by<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a Particle> {
        self.particles
            .iter()
            .filter(move |p| p.holder() == Some(user_id))
    }

    pub fn unheld_particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_on_board())
    }

    pub fn all_particles_held(&self) -> bool {
        self.particles.iter().all(|p| !p.is_on_board())
    }

    /// Sorted particle ids; the conservation invariant says this never changes after start.
    pub fn particle_ids(&self) -> Vec<ParticleId> {
        let mut ids: Vec<ParticleId> = self.particles.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids
    }
}
