use std::sync::Arc;

use crate::config::EngineConfig;
use crate::domain::gate::{NoopGate, QuantumGate};
use crate::error::AppError;
use crate::services::GameService;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;
use crate::store::{InMemorySessionStore, SessionStore};

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    engine: EngineConfig,
    gate: Arc<dyn QuantumGate>,
    store: Option<Arc<dyn SessionStore>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            engine: EngineConfig::default(),
            gate: Arc::new(NoopGate),
            store: None,
        }
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Replace the default no-op quantum gate effect.
    pub fn with_gate(mut self, gate: Arc<dyn QuantumGate>) -> Self {
        self.gate = gate;
        self
    }

    /// Share an existing store instead of starting empty.
    pub fn with_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        if self.security_config.jwt_secret.is_empty() {
            return Err(AppError::config("JWT secret must not be empty"));
        }

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemorySessionStore::new()));
        let games = GameService::new(store, self.gate, self.engine);

        Ok(AppState::new(
            self.security_config,
            self.engine,
            Arc::new(games),
        ))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
