// Every error leaves the API as problem+json with a trace id and the
// `error` field the view layer displays.

use actix_web::http::header::CONTENT_TYPE;
use actix_web::test;
use serde_json::{json, Value};

use crate::common::assert_trace_id_matches;
use crate::support::create_test_app;
use crate::support::http::{post, Player};
use crate::support::test_state::{build_test_state, test_security};

#[actix_web::test]
async fn domain_error_renders_problem_details() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let alice = Player::new("alice", "Alice", &test_security());

    let resp = post(
        &app,
        "/api/games",
        &alice,
        json!({ "name": "Too many", "player_count": 5 }),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 400);

    let headers = resp.headers().clone();
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("application/problem+json"));
    assert!(headers.get("www-authenticate").is_none());

    let trace_id = headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header")
        .to_string();
    let body: Value = test::read_body_json(resp).await;

    for key in ["type", "title", "status", "detail", "code", "trace_id", "error"] {
        assert!(body.get(key).is_some(), "{key} field should be present");
    }
    assert_eq!(body["code"], "INVALID_ARGUMENT");
    assert_eq!(body["title"], "Invalid Argument");
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], body["detail"]);
    assert!(body["type"]
        .as_str()
        .is_some_and(|t| t.ends_with("/INVALID_ARGUMENT")));
    assert_trace_id_matches(&body, &trace_id);
    Ok(())
}

#[actix_web::test]
async fn trace_id_matches_request_id() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let alice = Player::new("alice", "Alice", &test_security());

    let resp = post(&app, "/api/games/42/join", &alice, json!({})).await;
    assert_eq!(resp.status().as_u16(), 404);

    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header")
        .to_string();
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "GAME_NOT_FOUND");
    assert_eq!(body["trace_id"], request_id.as_str());
    Ok(())
}
