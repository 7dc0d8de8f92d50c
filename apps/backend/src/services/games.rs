//! Game service: load, validate, mutate, evaluate, append, persist.
//!
//! Each operation is one store transaction. The domain functions run inside
//! the store's per-session lock, so a rejected call never leaves a trace.

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{debug, info, instrument};

use crate::config::EngineConfig;
use crate::domain::events::Event;
use crate::domain::gate::QuantumGate;
use crate::domain::lifecycle::{self, NewSession};
use crate::domain::session::{Caller, GameSession, GameStatus, Role, SessionId};
use crate::domain::turn::{self, MoveOutcome, TurnContext};
use crate::errors::DomainError;
use crate::store::SessionStore;

/// Incremental read of a session's event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsPage {
    pub events: Vec<Event>,
    /// Position of the last event returned, or the requested position when none were.
    pub position: u64,
}

pub struct GameService {
    store: Arc<dyn SessionStore>,
    gate: Arc<dyn QuantumGate>,
    config: EngineConfig,
}

impl GameService {
    pub fn new(
        store: Arc<dyn SessionStore>,
        gate: Arc<dyn QuantumGate>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            gate,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn session_count(&self) -> usize {
        self.store.len()
    }

    /// Create a session in `waiting` with `creator` as its only player.
    #[instrument(skip(self, creator), fields(user_id = %creator.id))]
    pub async fn create(
        &self,
        creator: &Caller,
        name: &str,
        player_count: i64,
    ) -> Result<GameSession, DomainError> {
        let request = NewSession::validate(name, player_count).inspect_err(|e| {
            debug!(error = %e, "Create rejected");
        })?;

        let session = lifecycle::create_session(
            self.store.next_id(),
            request,
            creator,
            self.config.max_turns,
            OffsetDateTime::now_utc(),
        );
        let session = self.store.insert(session).await?;
        info!(
            game_id = session.id,
            target_player_count = session.target_player_count,
            "Game created"
        );
        Ok(session)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn join(&self, game_id: SessionId, user: &Caller) -> Result<GameSession, DomainError> {
        let mut role: Option<Role> = None;
        let session = self
            .store
            .update(game_id, &mut |s: &mut GameSession| -> Result<(), DomainError> {
                role = Some(lifecycle::join_session(s, user, OffsetDateTime::now_utc())?);
                Ok(())
            })
            .await
            .inspect_err(|e| debug!(error = %e, "Join rejected"))?;

        info!(
            game_id,
            role = ?role,
            players = session.players.len(),
            "Player joined"
        );
        Ok(session)
    }

    #[instrument(skip(self))]
    pub async fn start(
        &self,
        game_id: SessionId,
        requester: &str,
    ) -> Result<GameSession, DomainError> {
        let seed: u64 = rand::random();
        let particle_count = self.config.particle_count;
        let session = self
            .store
            .update(game_id, &mut |s: &mut GameSession| -> Result<(), DomainError> {
                lifecycle::start_session(
                    s,
                    requester,
                    particle_count,
                    seed,
                    OffsetDateTime::now_utc(),
                )
            })
            .await
            .inspect_err(|e| debug!(error = %e, "Start rejected"))?;

        info!(
            game_id,
            players = session.players.len(),
            particles = session.particles.len(),
            seed,
            "Game started"
        );
        Ok(session)
    }

    /// Apply one player action and run the win evaluator.
    #[instrument(skip(self, target))]
    pub async fn apply_move(
        &self,
        game_id: SessionId,
        player_id: &str,
        action: &str,
        target: Option<&str>,
    ) -> Result<(GameSession, MoveOutcome), DomainError> {
        let gate = self.gate.as_ref();
        let win_policy = self.config.win_policy;
        let mut outcome: Option<MoveOutcome> = None;

        let session = self
            .store
            .update(game_id, &mut |s: &mut GameSession| -> Result<(), DomainError> {
                let ctx = TurnContext {
                    gate,
                    win_policy,
                    now: OffsetDateTime::now_utc(),
                };
                outcome = Some(turn::apply_move(s, player_id, action, target, &ctx)?);
                Ok(())
            })
            .await
            .inspect_err(|e| debug!(error = %e, "Action rejected"))?;

        let outcome = outcome
            .ok_or_else(|| DomainError::internal("Action applied without an outcome"))?;

        debug!(
            game_id,
            action = %outcome.action,
            collected = outcome.collected.len(),
            turn_counter = session.turn_counter,
            "Action applied"
        );
        if let Some(reason) = outcome.completed {
            info!(
                game_id,
                winner = session.winner.as_deref().unwrap_or("none"),
                reason = reason.as_str(),
                "Game completed"
            );
        }
        Ok((session, outcome))
    }

    pub async fn get(&self, game_id: SessionId) -> Result<GameSession, DomainError> {
        self.store.load(game_id).await
    }

    /// Sessions `user_id` created or plays in, newest first.
    pub async fn list_for(&self, user_id: &str) -> Vec<GameSession> {
        let mut mine: Vec<GameSession> = self
            .store
            .list()
            .await
            .into_iter()
            .filter(|s| s.creator == user_id || s.is_member(user_id))
            .collect();
        mine.sort_by(|a, b| b.id.cmp(&a.id));
        mine
    }

    /// Events strictly after `position`.
    pub async fn events_since(
        &self,
        game_id: SessionId,
        position: u64,
    ) -> Result<EventsPage, DomainError> {
        let session = self.store.load(game_id).await?;
        let events = session.events.since(position).to_vec();
        let position = events.last().map(|e| e.position).unwrap_or(position);
        Ok(EventsPage { events, position })
    }

    /// Drop a session, e.g. after external archival.
    pub async fn remove(&self, game_id: SessionId) -> Result<GameSession, DomainError> {
        let session = self.store.remove(game_id).await?;
        info!(
            game_id,
            finished = session.status == GameStatus::Completed,
            "Game removed"
        );
        Ok(session)
    }
}
