use actix_web::http::header::{ETAG, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::test;

use crate::support::create_test_app;
use crate::support::http::{create_game, join, Player};
use crate::support::test_state::{build_test_state, test_security};

fn etag_of(resp: &actix_web::dev::ServiceResponse) -> String {
    resp.headers()
        .get(ETAG)
        .and_then(|v| v.to_str().ok())
        .expect("ETag header")
        .to_string()
}

#[actix_web::test]
async fn snapshot_etag_tracks_the_version() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let sec = test_security();
    let alice = Player::new("alice", "Alice", &sec);
    let bob = Player::new("bob", "Bob", &sec);
    let game_id = create_game(&app, &alice, "Cached", 2).await;
    let uri = format!("/api/games/{game_id}");

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(("Authorization", alice.bearer.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let etag = etag_of(&resp);
    assert_eq!(etag, format!("\"game-{game_id}-v1\""));

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(("Authorization", alice.bearer.as_str()))
        .insert_header((IF_NONE_MATCH, etag.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(etag_of(&resp), etag);
    assert!(test::read_body(resp).await.is_empty());

    assert_eq!(join(&app, game_id, &bob).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(("Authorization", alice.bearer.as_str()))
        .insert_header((IF_NONE_MATCH, etag.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(etag_of(&resp), format!("\"game-{game_id}-v2\""));
    Ok(())
}

#[actix_web::test]
async fn rejected_mutation_keeps_the_etag() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let alice = Player::new("alice", "Alice", &test_security());
    let game_id = create_game(&app, &alice, "Stable", 2).await;
    let uri = format!("/api/games/{game_id}");

    // Only one player seated; start is refused.
    let resp = crate::support::http::start(&app, game_id, &alice).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(("Authorization", alice.bearer.as_str()))
        .insert_header((IF_NONE_MATCH, format!("\"game-{game_id}-v1\"")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
    Ok(())
}
