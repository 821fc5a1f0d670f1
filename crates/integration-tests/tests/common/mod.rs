//! Shared fixtures: migrated SQLite database, reference data, fixed clock.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use moveops_api_http::{build_app_router, AppState, ServerConfig};
use moveops_core::application::MoveExecutionService;
use moveops_core::port::ManualTimeProvider;
use moveops_infra_sqlite::seed::{self, NewDeal, NewEmployee, NewMaterial};
use moveops_infra_sqlite::{create_pool, run_migrations, SqliteMoveRepository};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const T0: i64 = 1_700_000_000_000;
pub const MINUTE: i64 = 60_000;

pub struct TestEnv {
    pub pool: SqlitePool,
    pub clock: Arc<ManualTimeProvider>,
    pub service: Arc<MoveExecutionService>,
}

/// Load deals 1-2, employees 10-12 and materials 3 (100 in stock) and 4 (5 in stock)
pub async fn seed_reference_data(pool: &SqlitePool) {
    seed::insert_deal(pool, &NewDeal::titled(1, "Umzug Meier"))
        .await
        .unwrap();
    seed::insert_deal(pool, &NewDeal::titled(2, "Umzug Schulz"))
        .await
        .unwrap();
    for (id, first, last) in [(10, "Anna", "Berg"), (11, "Jonas", "Krause"), (12, "Lea", "Vogel")] {
        seed::insert_employee(pool, &NewEmployee::named(id, first, last))
            .await
            .unwrap();
    }
    seed::insert_material(pool, &NewMaterial::stocked(3, "Moving box", 100))
        .await
        .unwrap();
    seed::insert_material(pool, &NewMaterial::stocked(4, "Packing tape", 5))
        .await
        .unwrap();
}

pub async fn setup_with_pool(pool: SqlitePool) -> TestEnv {
    let clock = Arc::new(ManualTimeProvider::new(T0));
    let repo = Arc::new(SqliteMoveRepository::new(pool.clone()));
    let service = Arc::new(MoveExecutionService::new(
        repo.clone(),
        repo,
        clock.clone(),
    ));

    TestEnv {
        pool,
        clock,
        service,
    }
}

/// In-memory database with migrations and reference data applied
pub async fn setup() -> TestEnv {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    seed_reference_data(&pool).await;
    setup_with_pool(pool).await
}

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

pub fn build_test_app(env: &TestEnv) -> Router {
    build_app_router(AppState::new(env.service.clone()), &test_config())
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_raw(app: &Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Status plus parsed body in one step
pub async fn expect_status(response: Response<Body>, expected: StatusCode) -> Value {
    let status = response.status();
    let json = body_json(response).await;
    assert_eq!(status, expected, "unexpected status, body: {}", json);
    json
}

pub async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn stock_of(pool: &SqlitePool, material_id: i64) -> i64 {
    seed::material_stock(pool, material_id)
        .await
        .unwrap()
        .unwrap()
}
