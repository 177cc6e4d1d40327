mod common;

use axum_test::TestServer;
use serde_json::json;

#[tokio::test]
async fn test_stats_without_clicks() {
    let ctx = common::create_test_state(common::default_policy());
    let server = TestServer::new(common::app(ctx.state, "127.0.0.1:12345")).unwrap();

    server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/stats" }))
        .await;

    let response = server.get("/api/stats/1").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["short_code"], "1");
    assert_eq!(json["long_url"], "https://example.com/stats");
    assert_eq!(json["clicks"], 0);
}

#[tokio::test]
async fn test_stats_counts_redirects_but_not_itself() {
    let ctx = common::create_test_state(common::default_policy());
    let server = TestServer::new(common::app(ctx.state, "127.0.0.1:12345")).unwrap();

    server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;
    server.get("/1").await;
    server.get("/1").await;

    let first = server.get("/api/stats/1").await.json::<serde_json::Value>();
    let second = server.get("/api/stats/1").await.json::<serde_json::Value>();

    assert_eq!(first["clicks"], 2);
    assert_eq!(second["clicks"], 2);
}

#[tokio::test]
async fn test_stats_unknown_code() {
    let ctx = common::create_test_state(common::default_policy());
    let server = TestServer::new(common::app(ctx.state, "127.0.0.1:12345")).unwrap();

    let response = server.get("/api/stats/zzzz").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_stats_trailing_slash() {
    let ctx = common::create_test_state(common::default_policy());
    let server = TestServer::new(common::app(ctx.state, "127.0.0.1:12345")).unwrap();

    server
        .post("/api/shorten/")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    server.get("/api/stats/1/").await.assert_status_ok();
}
