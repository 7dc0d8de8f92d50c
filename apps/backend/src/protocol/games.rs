use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::events::EventView;
use crate::domain::board::Sector;
use crate::domain::session::{GameSession, GameStatus, ParticleId, Role, SessionId};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGameRequest {
    pub name: String,
    pub player_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoveRequest {
    pub action: String,
    #[serde(default)]
    pub target: Option<String>,
}

/// Seat as shown in headers and the lobby.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlayerView {
    pub id: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ParticleView {
    pub id: ParticleId,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Sector>,
}

/// Per-player board state.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlayerDetail {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub position: Sector,
    pub collected_particles: Vec<ParticleView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameData {
    pub player_count: usize,
    /// Index into `players`; meaningful while in progress.
    pub current_turn: usize,
    pub turn_counter: u32,
    pub max_turns: u32,
    pub winner: Option<String>,
    pub players: Vec<PlayerDetail>,
    /// Particles still on the board.
    pub quantum_particles: Vec<ParticleView>,
    pub events: Vec<EventView>,
}

/// Full session snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub id: SessionId,
    pub name: String,
    pub status: GameStatus,
    pub creator_id: String,
    pub creator_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub players: Vec<PlayerView>,
    pub data: GameData,
}

impl From<&GameSession> for GameView {
    fn from(s: &GameSession) -> Self {
        let players = s
            .players
            .iter()
            .map(|p| PlayerView {
                id: p.id.clone(),
                name: p.name.clone(),
                role: p.role,
            })
            .collect();

        let details = s
            .players
            .iter()
            .map(|p| PlayerDetail {
                id: p.id.clone(),
                name: p.name.clone(),
                role: p.role,
                position: p.sector,
                collected_particles: s
                    .collected_by(&p.id)
                    .map(|c| ParticleView {
                        id: c.id,
                        kind: c.kind.as_str(),
                        position: None,
                    })
                    .collect(),
            })
            .collect();

        let quantum_particles = s
            .unheld_particles()
            .map(|p| ParticleView {
                id: p.id,
                kind: p.kind.as_str(),
                position: p.sector(),
            })
            .collect();

        GameView {
            id: s.id,
            name: s.name.clone(),
            status: s.status,
            creator_id: s.creator.clone(),
            creator_name: s.display_name(&s.creator).to_string(),
            created_at: s.created_at,
            updated_at: s.updated_at,
            players,
            data: GameData {
                player_count: s.target_player_count,
                current_turn: s.current_turn_index,
                turn_counter: s.turn_counter,
                max_turns: s.max_turns,
                winner: s.winner.clone(),
                players: details,
                quantum_particles,
                events: s.events.iter().map(|e| EventView::render(e, s)).collect(),
            },
        }
    }
}

/// Lobby entry, seen from one caller.
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub id: SessionId,
    pub name: String,
    pub status: GameStatus,
    pub creator_name: String,
    /// Caller's role; `None` if the caller holds no seat.
    pub role: Option<Role>,
    pub player_count: usize,
    pub players: Vec<PlayerView>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl GameSummary {
    pub fn for_viewer(s: &GameSession, viewer: &str) -> Self {
        GameSummary {
            id: s.id,
            name: s.name.clone(),
            status: s.status,
            creator_name: s.display_name(&s.creator).to_string(),
            role: s.player(viewer).map(|p| p.role),
            player_count: s.target_player_count,
            players: s
                .players
                .iter()
                .map(|p| PlayerView {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    role: p.role,
                })
                .collect(),
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResponse {
    pub game: GameView,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameListResponse {
    pub games: Vec<GameSummary>,
}
