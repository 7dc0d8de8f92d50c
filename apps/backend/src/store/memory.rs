//! In-process store: a `DashMap` of per-session async mutexes.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use super::{not_found, Mutation, SessionStore};
use crate::domain::session::{GameSession, SessionId};
use crate::errors::DomainError;

#[derive(Debug)]
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, Arc<Mutex<GameSession>>>,
    last_id: AtomicI64,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            last_id: AtomicI64::new(0),
        }
    }

    /// Clone the slot handle so no map shard guard is held across an await.
    fn slot(&self, id: SessionId) -> Result<Arc<Mutex<GameSession>>, DomainError> {
        self.sessions
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| not_found(id))
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    fn next_id(&self) -> SessionId {
        self.last_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    async fn insert(&self, mut session: GameSession) -> Result<GameSession, DomainError> {
        let id = session.id;
        session.version = 1;
        match self.sessions.entry(id) {
            Entry::Occupied(_) => Err(DomainError::internal(format!(
                "Game {id} already exists"
            ))),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(session.clone())));
                Ok(session)
            }
        }
    }

    async fn load(&self, id: SessionId) -> Result<GameSession, DomainError> {
        let slot = self.slot(id)?;
        let guard = slot.lock().await;
        Ok(guard.clone())
    }

    async fn update(
        &self,
        id: SessionId,
        mutate: Mutation<'_>,
    ) -> Result<GameSession, DomainError> {
        let slot = self.slot(id)?;
        let mut guard = slot.lock().await;

        let mut draft = guard.clone();
        if let Err(e) = mutate(&mut draft) {
            debug!(game_id = id, error = %e, "Mutation rejected; session unchanged");
            return Err(e);
        }
        draft.version = guard.version + 1;
        *guard = draft;
        Ok(guard.clone())
    }

    async fn list(&self) -> Vec<GameSession> {
        let mut slots: Vec<(SessionId, Arc<Mutex<GameSession>>)> = self
            .sessions
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        slots.sort_by_key(|(id, _)| *id);

        let mut out = Vec::with_capacity(slots.len());
        for (_, slot) in slots {
            out.push(slot.lock().await.clone());
        }
        out
    }

    async fn remove(&self, id: SessionId) -> Result<GameSession, DomainError> {
        let (_, slot) = self.sessions.remove(&id).ok_or_else(|| not_found(id))?;
        let guard = slot.lock().await;
        Ok(guard.clone())
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}
