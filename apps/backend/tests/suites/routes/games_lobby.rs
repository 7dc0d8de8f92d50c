use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::{unique_game_name, unique_sub};
use serde_json::{json, Value};

use crate::support::create_test_app;
use crate::support::http::{create_game, get, join, post, Player};
use crate::support::test_state::{build_test_state, test_security};

#[actix_web::test]
async fn create_returns_201_with_waiting_game() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let alice = Player::new(unique_sub("alice"), "Alice", &test_security());

    let name = unique_game_name("Lobby");
    let resp = post(
        &app,
        "/api/games",
        &alice,
        json!({ "name": format!("  {name}  "), "player_count": 3 }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(resp.headers().contains_key("etag"));

    let body: Value = test::read_body_json(resp).await;
    let game = &body["game"];
    assert_eq!(game["name"], name.as_str());
    assert_eq!(game["status"], "waiting");
    assert_eq!(game["creator_id"], alice.sub.as_str());
    assert_eq!(game["creator_name"], "Alice");
    assert_eq!(game["players"], json!([{ "id": alice.sub, "name": "Alice", "role": "captain" }]));
    assert_eq!(game["data"]["player_count"], 3);
    assert_eq!(game["data"]["players"][0]["position"], "start");
    assert_eq!(game["data"]["quantum_particles"], json!([]));
    assert_eq!(game["data"]["events"], json!([]));
    assert_eq!(game["data"]["winner"], Value::Null);
    Ok(())
}

#[actix_web::test]
async fn create_validates_name_and_player_count() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let alice = Player::new("alice", "Alice", &test_security());

    for body in [
        json!({ "name": "   ", "player_count": 2 }),
        json!({ "name": "Solo", "player_count": 1 }),
        json!({ "name": "Crowd", "player_count": 5 }),
        json!({ "name": "Negative", "player_count": -3 }),
    ] {
        let resp = post(&app, "/api/games", &alice, body).await;
        assert_problem_details_from_service_response(
            resp,
            "INVALID_ARGUMENT",
            StatusCode::BAD_REQUEST,
            None,
        )
        .await;
    }
    Ok(())
}

#[actix_web::test]
async fn malformed_body_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let alice = Player::new("alice", "Alice", &test_security());

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(("Authorization", alice.bearer.as_str()))
        .insert_header(("Content-Type", "application/json"))
        .set_payload(r#"{"name": "Broken", "player_count": }"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid JSON"),
    )
    .await;

    let resp = post(&app, "/api/games", &alice, json!({ "name": "No count" })).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("missing or wrong types"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn list_shows_only_the_callers_games_newest_first() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let sec = test_security();
    let alice = Player::new("alice", "Alice", &sec);
    let bob = Player::new("bob", "Bob", &sec);
    let carol = Player::new("carol", "Carol", &sec);

    let first = create_game(&app, &alice, "First", 2).await;
    let bobs = create_game(&app, &bob, "Bob's", 3).await;
    let second = create_game(&app, &alice, "Second", 4).await;
    assert_eq!(join(&app, bobs, &alice).await.status(), StatusCode::OK);

    let resp = get(&app, "/api/games", &alice).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let games = body["games"].as_array().expect("games array");
    let ids: Vec<i64> = games.iter().filter_map(|g| g["id"].as_i64()).collect();
    assert_eq!(ids, vec![second, bobs, first]);

    let joined = &games[1];
    assert_eq!(joined["creator_name"], "Bob");
    assert_eq!(joined["role"], "navigator");
    assert_eq!(joined["player_count"], 3);
    assert_eq!(joined["status"], "waiting");
    assert_eq!(joined["players"].as_array().map(Vec::len), Some(2));
    assert!(joined["created_at"].is_string());
    assert!(joined["updated_at"].is_string());
    assert_eq!(games[0]["role"], "captain");

    let resp = get(&app, "/api/games", &carol).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["games"], json!([]));
    Ok(())
}
