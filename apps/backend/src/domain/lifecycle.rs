//! Session lifecycle: create, join, start.
//!
//! Every function validates fully before touching the session, so a rejected
//! call leaves it exactly as it was.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use time::OffsetDateTime;

use crate::domain::board::{random_non_start_sector, Sector};
use crate::domain::events::{EventKind, EventLog};
use crate::domain::session::{
    Caller, GameSession, GameStatus, Particle, ParticleId, ParticleKind, ParticleLocation, Player,
    Role, SessionId, MAX_PLAYERS, MIN_PLAYERS,
};
use crate::errors::DomainError;

/// Validated create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub name: String,
    pub target_player_count: usize,
}

impl NewSession {
    /// Check name and player count. The name is trimmed; an all-whitespace name is empty.
    pub fn validate(name: &str, target_player_count: i64) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::invalid_argument("Game name is required"));
        }
        let min = MIN_PLAYERS as i64;
        let max = MAX_PLAYERS as i64;
        if !(min..=max).contains(&target_player_count) {
            return Err(DomainError::invalid_argument(format!(
                "player_count must be between {min} and {max}"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            target_player_count: target_player_count as usize,
        })
    }
}

/// Build a fresh `waiting` session with the creator seated at `start`.
pub fn create_session(
    id: SessionId,
    request: NewSession,
    creator: &Caller,
    max_turns: u32,
    now: OffsetDateTime,
) -> GameSession {
    let captain = Player {
        id: creator.id.clone(),
        name: creator.name.clone(),
        role: Role::Captain,
        sector: Sector::Start,
    };

    GameSession {
        id,
        name: request.name,
        status: GameStatus::Waiting,
        creator: creator.id.clone(),
        target_player_count: request.target_player_count,
        players: vec![captain],
        particles: Vec::new(),
        current_turn_index: 0,
        turn_counter: 0,
        max_turns,
        winner: None,
        events: EventLog::new(),
        rng_seed: None,
        version: 0,
        created_at: now,
        updated_at: now,
    }
}

/// Seat `user` as the next player. Returns the role handed out.
pub fn join_session(
    session: &mut GameSession,
    user: &Caller,
    now: OffsetDateTime,
) -> Result<Role, DomainError> {
    if session.status != GameStatus::Waiting {
        return Err(DomainError::invalid_state(format!(
            "Game {} is not accepting players",
            session.id
        )));
    }
    if session.players.len() >= session.target_player_count {
        return Err(DomainError::session_full(format!(
            "Game {} is full",
            session.id
        )));
    }
    if session.is_member(&user.id) {
        return Err(DomainError::already_joined(format!(
            "Already joined game {}",
            session.id
        )));
    }

    // Roles follow seat order, and seats are never vacated, so the next one is unused.
    let role = Role::for_seat(session.players.len())
        .ok_or_else(|| DomainError::session_full(format!("Game {} is full", session.id)))?;

    session.players.push(Player {
        id: user.id.clone(),
        name: user.name.clone(),
        role,
        sector: Sector::Start,
    });
    session.updated_at = now;
    Ok(role)
}

/// Place `particle_count` particles from `seed` and move the session to `in_progress`.
pub fn start_session(
    session: &mut GameSession,
    requester: &str,
    particle_count: u32,
    seed: u64,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    if requester != session.creator {
        return Err(DomainError::forbidden("Only the game creator can start the game"));
    }
    if session.status != GameStatus::Waiting {
        return Err(DomainError::invalid_state(format!(
            "Game {} has already started",
            session.id
        )));
    }
    if session.players.len() < MIN_PLAYERS {
        return Err(DomainError::not_enough_players(format!(
            "At least {MIN_PLAYERS} players are needed to start"
        )));
    }

    session.particles = place_particles(particle_count, seed);
    session.rng_seed = Some(seed);
    session.status = GameStatus::InProgress;
    session.current_turn_index = 0;
    session.turn_counter = 0;
    session.updated_at = now;
    session.events.append(
        now,
        EventKind::GameStart {
            started_by: session.creator.clone(),
        },
    );
    Ok(())
}

/// Deterministic placement: ids `1..=count`, kinds round-robin, sectors drawn from `seed`.
pub fn place_particles(count: u32, seed: u64) -> Vec<Particle> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (1..=count)
        .map(|id: ParticleId| Particle {
            id,
            kind: ParticleKind::for_particle(id),
            location: ParticleLocation::OnBoard(random_non_start_sector(&mut rng)),
        })
        .collect()
}
