//! Game routes under `/api/games`. Every handler runs behind `JwtExtract`.

use actix_web::http::header::ETAG;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::extractors::game_id::GameId;
use crate::extractors::validated_json::ValidatedJson;
use crate::http::etag::{game_etag, if_none_match_hits};
use crate::protocol::{
    CreateGameRequest, EventView, EventsResponse, GameListResponse, GameResponse, GameSummary,
    GameView, MoveRequest,
};
use crate::state::app_state::AppState;

/// POST /api/games
async fn create_game(
    user: CurrentUser,
    body: ValidatedJson<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let session = app_state
        .games()
        .create(&user.caller(), &body.name, body.player_count)
        .await?;

    Ok(HttpResponse::Created()
        .insert_header((ETAG, game_etag(session.id, session.version)))
        .json(GameResponse {
            game: GameView::from(&session),
        }))
}

/// GET /api/games
///
/// Lobby listing: sessions the caller created or joined, newest first.
async fn list_games(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let games = app_state
        .games()
        .list_for(&user.id)
        .await
        .iter()
        .map(|s| GameSummary::for_viewer(s, &user.id))
        .collect();
    Ok(HttpResponse::Ok().json(GameListResponse { games }))
}

/// GET /api/games/{game_id}
///
/// Full snapshot. Answers `304 Not Modified` when `If-None-Match` carries the
/// current tag.
async fn get_game(
    http_req: HttpRequest,
    _user: CurrentUser,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.games().get(game_id.0).await?;
    let etag = game_etag(session.id, session.version);

    if if_none_match_hits(http_req.headers(), &etag) {
        return Ok(HttpResponse::NotModified()
            .insert_header((ETAG, etag))
            .finish());
    }

    Ok(HttpResponse::Ok()
        .insert_header((ETAG, etag))
        .json(GameResponse {
            game: GameView::from(&session),
        }))
}

/// POST /api/games/{game_id}/join
async fn join_game(
    user: CurrentUser,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state.games().join(game_id.0, &user.caller()).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

/// POST /api/games/{game_id}/start
async fn start_game(
    user: CurrentUser,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state.games().start(game_id.0, &user.id).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

/// POST /api/games/{game_id}/move
async fn make_move(
    user: CurrentUser,
    game_id: GameId,
    body: ValidatedJson<MoveRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    app_state
        .games()
        .apply_move(game_id.0, &user.id, &body.action, body.target.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

#[derive(Debug, Deserialize)]
struct EventsQuery {
    #[serde(default)]
    since: u64,
}

/// GET /api/games/{game_id}/events?since=N
async fn list_events(
    _user: CurrentUser,
    game_id: GameId,
    query: web::Query<EventsQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let games = app_state.games();
    let page = games.events_since(game_id.0, query.since).await?;
    let session = games.get(game_id.0).await?;

    let events = page
        .events
        .iter()
        .map(|e| EventView::render(e, &session))
        .collect();
    Ok(HttpResponse::Ok().json(EventsResponse {
        events,
        position: page.position,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_games))
            .route(web::post().to(create_game)),
    )
    .service(web::resource("/{game_id}").route(web::get().to(get_game)))
    .service(web::resource("/{game_id}/join").route(web::post().to(join_game)))
    .service(web::resource("/{game_id}/start").route(web::post().to(start_game)))
    .service(web::resource("/{game_id}/move").route(web::post().to(make_move)))
    .service(web::resource("/{game_id}/events").route(web::get().to(list_events)));
}
