use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::events::{Event, EventKind};
use crate::domain::session::{GameSession, ParticleId};

/// One event as the client renders it: common header plus kind-specific fields.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EventView {
    pub position: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub particle_id: Option<ParticleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub particle_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_player: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl EventView {
    /// Render `event`, resolving player ids to names through `session`.
    pub fn render(event: &Event, session: &GameSession) -> Self {
        let mut view = EventView {
            position: event.position,
            timestamp: event.timestamp,
            kind: event.kind.name(),
            description: String::new(),
            started_by: None,
            player_id: None,
            player_name: None,
            particle_id: None,
            particle_type: None,
            next_player: None,
            winner: None,
            winner_name: None,
            reason: None,
        };

        match &event.kind {
            EventKind::GameStart { started_by } => {
                let name = session.display_name(started_by).to_string();
                view.description = format!("Game started by {name}");
                view.started_by = Some(name);
            }
            EventKind::ParticleCollected {
                player_id,
                particle_id,
                particle_kind,
            } => {
                let name = session.display_name(player_id).to_string();
                view.description = format!("{name} collected a {}", particle_kind.as_str());
                view.player_id = Some(player_id.clone());
                view.player_name = Some(name);
                view.particle_id = Some(*particle_id);
                view.particle_type = Some(particle_kind.as_str());
            }
            EventKind::QuantumGateUsed { player_id } => {
                let name = session.display_name(player_id).to_string();
                view.description = format!("{name} used a quantum gate");
                view.player_id = Some(player_id.clone());
                view.player_name = Some(name);
            }
            EventKind::TurnEnded {
                player_id,
                next_player_id,
            } => {
                let name = session.display_name(player_id).to_string();
                let next = session.display_name(next_player_id).to_string();
                view.description = format!("{name} ended their turn. {next}'s turn now.");
                view.player_id = Some(player_id.clone());
                view.player_name = Some(name);
                view.next_player = Some(next);
            }
            EventKind::GameCompleted { winner, reason } => {
                let winner_name = winner
                    .as_deref()
                    .map(|w| session.display_name(w).to_string());
                view.description = match &winner_name {
                    Some(name) => format!("Game completed! Winner: {name}"),
                    None => "Game completed! The turn budget ran out.".to_string(),
                };
                view.winner = winner.clone();
                view.winner_name = winner_name;
                view.reason = Some(reason.as_str());
            }
        }
        view
    }
}

/// `GET /api/games/{id}/events` body.
#[derive(Debug, Clone, Serialize)]
pub struct EventsResponse {
    pub events: Vec<EventView>,
    pub position: u64,
}
