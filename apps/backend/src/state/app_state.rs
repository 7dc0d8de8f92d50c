use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::config::EngineConfig;
use crate::services::GameService;

/// Application state shared by every worker through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    pub engine: EngineConfig,
    pub games: Arc<GameService>,
}

impl AppState {
    pub fn new(security: SecurityConfig, engine: EngineConfig, games: Arc<GameService>) -> Self {
        Self {
            security,
            engine,
            games,
        }
    }

    pub fn games(&self) -> &GameService {
        &self.games
    }
}
