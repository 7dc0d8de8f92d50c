//! Session Store: the only owner of session state.
//!
//! Implementations serialize writers per session and never let writers to
//! different sessions contend.

pub mod memory;

use async_trait::async_trait;

use crate::domain::session::{GameSession, SessionId};
use crate::errors::DomainError;

pub use memory::InMemorySessionStore;

/// Mutation applied under the session's write lock. Returning `Err` discards every change.
pub type Mutation<'a> = &'a mut (dyn FnMut(&mut GameSession) -> Result<(), DomainError> + Send);

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Reserve a fresh session id.
    fn next_id(&self) -> SessionId;

    /// Persist a new session. Fails if the id is already taken.
    async fn insert(&self, session: GameSession) -> Result<GameSession, DomainError>;

    /// Consistent copy of one session.
    async fn load(&self, id: SessionId) -> Result<GameSession, DomainError>;

    /// Atomic read-modify-write. The mutation runs on a private copy which
    /// replaces the stored session (with `version` bumped) only on success.
    async fn update(&self, id: SessionId, mutate: Mutation<'_>)
        -> Result<GameSession, DomainError>;

    /// Copies of every stored session, ordered by id.
    async fn list(&self) -> Vec<GameSession>;

    /// Teardown for external archival.
    async fn remove(&self, id: SessionId) -> Result<GameSession, DomainError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub(crate) fn not_found(id: SessionId) -> DomainError {
    DomainError::not_found(format!("Game {id} not found"))
}
