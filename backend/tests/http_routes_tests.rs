//! Router-level tests for the HTTP surface

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use navmap::api::{self, AppState};
use navmap::config::Config;
use navmap::db::Database;
use navmap::graphql::build_schema;
use navmap::services::{PasswordHasher, PubSub};

async fn app() -> axum::Router {
    let config = Config::from_source(|key| match key {
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        _ => None,
    })
    .unwrap();
    let db = Database::connect(&config.database_url, 1).await.unwrap();
    db.sync_schema().await;

    let schema = build_schema(db.clone(), Arc::new(PubSub::default()), PasswordHasher::new(4));
    api::router(AppState {
        config: Arc::new(config),
        db,
        schema,
    })
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app().await;

    let resp = app
        .clone()
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "healthy");

    let resp = app
        .oneshot(Request::get("/readyz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        serde_json::json!({ "ready": true, "database": true })
    );
}

#[tokio::test]
async fn test_post_executes_query() {
    let app = app().await;
    let body = serde_json::json!({ "query": "{ users { id } }" }).to_string();

    let resp = app
        .oneshot(
            Request::post("/graphql")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        serde_json::json!({ "data": { "users": [] } })
    );
}

#[tokio::test]
async fn test_get_executes_query_string() {
    let app = app().await;

    let resp = app
        .oneshot(
            Request::get("/graphql?query=%7B%20maps%20%7B%20id%20%7D%20%7D")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        serde_json::json!({ "data": { "maps": [] } })
    );
}

#[tokio::test]
async fn test_browser_get_serves_graphiql() {
    let app = app().await;

    let resp = app
        .oneshot(
            Request::get("/graphql")
                .header(header::ACCEPT, "text/html,application/xhtml+xml")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("/graphql/ws"));
}
