//! Engine core: board topology, session model, lifecycle, turns, win evaluation.
//!
//! Everything here is pure. Time, randomness seeds, and the quantum gate
//! effect are passed in by the caller.

pub mod board;
pub mod events;
pub mod gate;
pub mod lifecycle;
pub mod session;
pub mod turn;
pub mod win;

#[cfg(test)]
mod tests_turn;

// Re-exports for ergonomics
pub use board::Sector;
pub use events::{CompletionReason, Event, EventKind, EventLog};
pub use gate::{NoopGate, QuantumGate};
pub use session::{
    Caller, GameSession, GameStatus, Particle, ParticleId, ParticleKind, ParticleLocation, Player,
    Role, SessionId, UserId,
};
pub use turn::{MoveOutcome, PlayerAction, TurnContext};
pub use win::WinPolicy;
