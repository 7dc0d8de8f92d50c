use actix_web::test;
use serde_json::Value;

use crate::support::create_test_app;
use crate::support::http::{create_game, Player};
use crate::support::test_state::{build_test_state, test_security};

#[actix_web::test]
async fn root_greets() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert!(resp.status().is_success());
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body)?.contains("Entanglion"));
    Ok(())
}

#[actix_web::test]
async fn health_reports_version_and_session_count() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["sessions"], 0);
    assert!(body["time"].as_str().is_some_and(|t| t.contains('T')));

    let alice = Player::new("alice", "Alice", &test_security());
    create_game(&app, &alice, "Counted", 2).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["sessions"], 1);
    Ok(())
}

#[actix_web::test]
async fn health_needs_no_token() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    Ok(())
}
