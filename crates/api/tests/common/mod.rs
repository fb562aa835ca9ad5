//! Shared helpers for HTTP-level integration tests.
//!
//! `build_test_app` mirrors the router construction in `main.rs` so tests
//! exercise the same middleware stack (CORS, request ID, timeout, tracing,
//! panic recovery) that production uses, with a manual clock swapped in so
//! calendar days can be driven deterministically.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use cadence_api::config::ServerConfig;
use cadence_api::routes;
use cadence_api::state::AppState;
use cadence_core::calendar::DayReference;
use cadence_core::clock::{Clock, ManualClock};
use cadence_core::types::{DbId, Timestamp};
use cadence_db::models::question::Question;
use cadence_db::models::user::{CreateUser, User};
use cadence_db::repositories::{LevelPlanRepo, QuestionRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout, and UTC day boundaries.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        day_offset_minutes: 0,
    }
}

/// A manual clock starting at a fixed, known instant.
pub fn test_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(test_start()))
}

/// The instant all test plans start at: 2024-03-01T12:00:00Z.
pub fn test_start() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// Build the full application router with all middleware layers, using the
/// given database pool and clock.
pub fn build_test_app(pool: PgPool, clock: Arc<dyn Clock>) -> Router {
    let config = test_config();
    let day_ref = DayReference::from_offset_minutes(config.day_offset_minutes).unwrap();

    let state = AppState {
        pool,
        config: Arc::new(config),
        clock,
        day_ref,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    auth: Option<(DbId, &str)>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((user_id, role)) = auth {
        builder = builder
            .header("x-user-id", user_id.to_string())
            .header("x-user-role", role);
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Unauthenticated GET (no identity headers).
pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

/// GET with identity headers.
pub async fn get_as(app: Router, uri: &str, user_id: DbId, role: &str) -> Response {
    send(app, Method::GET, uri, Some((user_id, role)), None).await
}

/// POST a JSON body with identity headers.
pub async fn post_json_as(
    app: Router,
    uri: &str,
    user_id: DbId,
    role: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, Some((user_id, role)), Some(body)).await
}

/// PATCH a JSON body with identity headers.
pub async fn patch_json_as(
    app: Router,
    uri: &str,
    user_id: DbId,
    role: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PATCH, uri, Some((user_id, role)), Some(body)).await
}

/// Read the response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Create a user plus their default level plans, all windows starting at
/// `starts_at`.
pub async fn seed_user(pool: &PgPool, email: &str, role: &str, starts_at: Timestamp) -> User {
    let mut tx = pool.begin().await.unwrap();
    let user = UserRepo::create(
        &mut *tx,
        &CreateUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            role: Some(role.to_string()),
        },
    )
    .await
    .unwrap();
    LevelPlanRepo::create_defaults(&mut *tx, user.id, starts_at).await.unwrap();
    tx.commit().await.unwrap();
    user
}

/// Create today's question for `level`, authored by `created_by`, with
/// `created_at` (and thus its calendar day) taken from `at`.
pub async fn seed_question(pool: &PgPool, level: i32, created_by: DbId, at: Timestamp) -> Question {
    QuestionRepo::create_daily(
        pool,
        level,
        "What did you practice today?",
        "Describe today's session in a few sentences.",
        created_by,
        at.date_naive(),
        at,
    )
    .await
    .unwrap()
}

/// Insert `days` attended events on consecutive calendar days starting at
/// `from`.
pub async fn seed_attendance_days(pool: &PgPool, user_id: DbId, from: Timestamp, days: i64) {
    for i in 0..days {
        let at = from + chrono::Duration::days(i);
        sqlx::query(
            "INSERT INTO attendance_events (user_id, marked_at, marked_on, attended) \
             VALUES ($1, $2, $3, TRUE)",
        )
        .bind(user_id)
        .bind(at)
        .bind(at.date_naive())
        .execute(pool)
        .await
        .unwrap();
    }
}

/// Count the surviving attendance events for a user.
pub async fn attendance_row_count(pool: &PgPool, user_id: DbId) -> i64 {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM attendance_events WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap();
    row.0
}

/// Force a user's current level (test setup shortcut).
pub async fn set_user_level(pool: &PgPool, user_id: DbId, level: i32) {
    sqlx::query("UPDATE users SET current_level = $2 WHERE id = $1")
        .bind(user_id)
        .bind(level)
        .execute(pool)
        .await
        .unwrap();
}

/// Block a user (test setup shortcut).
pub async fn block_user(pool: &PgPool, user_id: DbId) {
    sqlx::query("UPDATE users SET blocked = TRUE WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
}
