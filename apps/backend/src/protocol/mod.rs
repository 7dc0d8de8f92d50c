//! Wire shapes consumed by the view layer.

pub mod events;
pub mod games;

pub use events::{EventView, EventsResponse};
pub use games::{
    CreateGameRequest, GameData, GameListResponse, GameResponse, GameSummary, GameView,
    MoveRequest, ParticleView, PlayerDetail, PlayerView,
};
