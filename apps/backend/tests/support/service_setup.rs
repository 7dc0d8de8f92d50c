use std::sync::Arc;

use entanglion_backend::config::EngineConfig;
use entanglion_backend::domain::gate::{NoopGate, QuantumGate};
use entanglion_backend::domain::session::{Caller, SessionId};
use entanglion_backend::services::GameService;
use entanglion_backend::store::InMemorySessionStore;

pub fn service(engine: EngineConfig) -> Arc<GameService> {
    service_with_gate(engine, Arc::new(NoopGate))
}

pub fn service_with_gate(engine: EngineConfig, gate: Arc<dyn QuantumGate>) -> Arc<GameService> {
    Arc::new(GameService::new(
        Arc::new(InMemorySessionStore::new()),
        gate,
        engine,
    ))
}

pub fn caller(id: &str) -> Caller {
    let mut name = id.to_string();
    if let Some(first) = name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    Caller::new(id, name)
}

/// Create, fill and start a game for `ids` (first id is the creator).
pub async fn started(games: &GameService, ids: &[&str]) -> SessionId {
    let creator = caller(ids[0]);
    let session = games
        .create(&creator, "Service game", ids.len() as i64)
        .await
        .expect("create");
    for id in &ids[1..] {
        games.join(session.id, &caller(id)).await.expect("join");
    }
    games.start(session.id, ids[0]).await.expect("start");
    session.id
}
