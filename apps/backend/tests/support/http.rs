//! Request helpers for driving the game API.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, Error};
use entanglion_backend::state::security_config::SecurityConfig;
use serde_json::{json, Value};

use super::auth::bearer_header;

/// A test caller: JWT subject plus display name.
#[derive(Debug, Clone)]
pub struct Player {
    pub sub: String,
    pub name: String,
    pub bearer: String,
}

impl Player {
    pub fn new(sub: impl Into<String>, name: impl Into<String>, sec: &SecurityConfig) -> Self {
        let sub = sub.into();
        let name = name.into();
        let bearer = bearer_header(&sub, &name, sec);
        Self { sub, name, bearer }
    }
}

pub async fn get<S>(app: &S, uri: &str, who: &Player) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::get()
        .uri(uri)
        .insert_header(("Authorization", who.bearer.as_str()))
        .to_request();
    test::call_service(app, req).await
}

pub async fn post<S>(app: &S, uri: &str, who: &Player, body: Value) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri(uri)
        .insert_header(("Authorization", who.bearer.as_str()))
        .set_json(body)
        .to_request();
    test::call_service(app, req).await
}

/// POST /api/games and return the new id.
pub async fn create_game<S>(app: &S, who: &Player, name: &str, player_count: i64) -> i64
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = post(
        app,
        "/api/games",
        who,
        json!({ "name": name, "player_count": player_count }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    body["game"]["id"].as_i64().expect("game id")
}

pub async fn join<S>(app: &S, game_id: i64, who: &Player) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    post(app, &format!("/api/games/{game_id}/join"), who, json!({})).await
}

pub async fn start<S>(app: &S, game_id: i64, who: &Player) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    post(app, &format!("/api/games/{game_id}/start"), who, json!({})).await
}

pub async fn act<S>(
    app: &S,
    game_id: i64,
    who: &Player,
    action: &str,
    target: Option<&str>,
) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let body = match target {
        Some(t) => json!({ "action": action, "target": t }),
        None => json!({ "action": action }),
    };
    post(app, &format!("/api/games/{game_id}/move"), who, body).await
}

/// GET /api/games/{id} and return the `game` object.
pub async fn snapshot<S>(app: &S, game_id: i64, who: &Player) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = get(app, &format!("/api/games/{game_id}"), who).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    body["game"].clone()
}

/// Create a game for `players[0]`, seat everyone else, and start it.
pub async fn started_game<S>(app: &S, players: &[Player]) -> i64
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let game_id = create_game(app, &players[0], "Test Game", players.len() as i64).await;
    for p in &players[1..] {
        assert_eq!(join(app, game_id, p).await.status(), StatusCode::OK);
    }
    assert_eq!(start(app, game_id, &players[0]).await.status(), StatusCode::OK);
    game_id
}
