//! Pluggable effect of `use_quantum_gate`.
//!
//! The engine appends the `quantum_gate_used` event itself; a gate only
//! mutates board state. Whatever it does, the set of particle ids must be the
//! same afterwards, and the turn engine rejects the action if it is not.

use std::fmt::Debug;

use crate::domain::session::GameSession;
use crate::errors::DomainError;

pub trait QuantumGate: Send + Sync + Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Apply the effect for the player at `acting` (an index into `session.players`).
    fn apply(&self, session: &mut GameSession, acting: usize) -> Result<(), DomainError>;
}

/// Leaves positions and particles untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopGate;

impl QuantumGate for NoopGate {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn apply(&self, _session: &mut GameSession, _acting: usize) -> Result<(), DomainError> {
        Ok(())
    }
}
