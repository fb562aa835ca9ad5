//! End-to-end progression scenarios: the promotion rule evaluated through
//! the full HTTP submission pipeline with a manual clock.

mod common;

use axum::http::StatusCode;
use cadence_core::clock::Clock;
use cadence_core::roles::{ROLE_ADMIN, ROLE_USER};
use chrono::{Duration, TimeZone, Utc};
use common::{body_json, get_as, patch_json_as};
use sqlx::PgPool;

/// 18 attended days out of a 21-day window at 80% required: 85.7% on the
/// terminal day promotes and resets history.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_promotion_on_terminal_day(pool: PgPool) {
    let clock = common::test_clock();
    let start = common::test_start();
    let admin = common::seed_user(&pool, "admin@test.dev", ROLE_ADMIN, start).await;
    let learner = common::seed_user(&pool, "learner@test.dev", ROLE_USER, start).await;

    // 17 attended days before the terminal day; the final submission adds
    // the 18th.
    common::seed_attendance_days(&pool, learner.id, start, 17).await;

    // Plan ends 2024-03-22T12:00Z; submit at 10:00 the same day. Elapsed is
    // 20d22h, counted as 21 days: 18/21 = 85.7% >= 80%.
    clock.set(Utc.with_ymd_and_hms(2024, 3, 22, 10, 0, 0).unwrap());
    let question = common::seed_question(&pool, 1, admin.id, clock.now()).await;

    let app = common::build_test_app(pool.clone(), clock.clone());
    let response = patch_json_as(
        app,
        "/api/v1/users/attendance",
        learner.id,
        ROLE_USER,
        serde_json::json!({"question_id": question.id, "answer": "Final day."}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["promoted"], true);
    assert_eq!(json["data"]["current_level"], 2);
    assert_eq!(json["data"]["attendance_percentage"], 0.0);
    assert_eq!(json["data"]["attended_days"], 0);

    // History is discarded at promotion.
    assert_eq!(common::attendance_row_count(&pool, learner.id).await, 0);

    // The progression read reflects the new level and its plan.
    let app = common::build_test_app(pool, clock);
    let response = get_as(app, "/api/v1/users/me/progression", learner.id, ROLE_USER).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["current_level"], 2);
    assert_eq!(json["data"]["plan"]["level"], 2);
    assert_eq!(json["data"]["attended_days"], 0);
}

/// Perfect attendance before the terminal day never promotes.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_full_attendance_before_terminal_day_stays(pool: PgPool) {
    let clock = common::test_clock();
    let start = common::test_start();
    let admin = common::seed_user(&pool, "admin@test.dev", ROLE_ADMIN, start).await;
    let learner = common::seed_user(&pool, "learner@test.dev", ROLE_USER, start).await;

    common::seed_attendance_days(&pool, learner.id, start, 2).await;

    clock.set(start + Duration::days(2) + Duration::hours(1));
    let question = common::seed_question(&pool, 1, admin.id, clock.now()).await;

    let app = common::build_test_app(pool, clock);
    let response = patch_json_as(
        app,
        "/api/v1/users/attendance",
        learner.id,
        ROLE_USER,
        serde_json::json!({"question_id": question.id, "answer": "Day three."}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["promoted"], false);
    assert_eq!(json["data"]["current_level"], 1);
    assert_eq!(json["data"]["attended_days"], 3);
    assert_eq!(json["data"]["attendance_percentage"], 100.0);
}

/// Below-threshold attendance on the terminal day stays at the current
/// level with its history intact.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_below_threshold_on_terminal_day_stays(pool: PgPool) {
    let clock = common::test_clock();
    let start = common::test_start();
    let admin = common::seed_user(&pool, "admin@test.dev", ROLE_ADMIN, start).await;
    let learner = common::seed_user(&pool, "learner@test.dev", ROLE_USER, start).await;

    // 10 prior days plus the terminal-day mark: 11/21 = 52.4% < 80%.
    common::seed_attendance_days(&pool, learner.id, start, 10).await;

    clock.set(Utc.with_ymd_and_hms(2024, 3, 22, 10, 0, 0).unwrap());
    let question = common::seed_question(&pool, 1, admin.id, clock.now()).await;

    let app = common::build_test_app(pool.clone(), clock);
    let response = patch_json_as(
        app,
        "/api/v1/users/attendance",
        learner.id,
        ROLE_USER,
        serde_json::json!({"question_id": question.id, "answer": "Not enough days."}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["promoted"], false);
    assert_eq!(json["data"]["current_level"], 1);
    assert_eq!(json["data"]["attended_days"], 11);
    let pct = json["data"]["attendance_percentage"].as_f64().unwrap();
    assert!((pct - 11.0 / 21.0 * 100.0).abs() < 1e-9);

    assert_eq!(common::attendance_row_count(&pool, learner.id).await, 11);
}

/// A promoted user's next window starts where the old one ended, so full
/// attendance through level 2 reaches its threshold and promotes again.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_full_attendance_promotes_through_level_two(pool: PgPool) {
    let clock = common::test_clock();
    let start = common::test_start();
    let admin = common::seed_user(&pool, "admin@test.dev", ROLE_ADMIN, start).await;
    let learner = common::seed_user(&pool, "learner@test.dev", ROLE_USER, start).await;

    // First promotion on level 1's terminal day (18/21 = 85.7% >= 80%).
    common::seed_attendance_days(&pool, learner.id, start, 17).await;
    clock.set(Utc.with_ymd_and_hms(2024, 3, 22, 10, 0, 0).unwrap());
    let question = common::seed_question(&pool, 1, admin.id, clock.now()).await;

    let app = common::build_test_app(pool.clone(), clock.clone());
    let response = patch_json_as(
        app,
        "/api/v1/users/attendance",
        learner.id,
        ROLE_USER,
        serde_json::json!({"question_id": question.id, "answer": "Last level-one day."}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["promoted"], true);
    assert_eq!(json["data"]["current_level"], 2);

    // Level 2 runs 2024-03-22T12:00Z to 2024-04-19T12:00Z (28 days). Full
    // attendance: 27 seeded days plus the terminal-day mark is 28/28.
    common::seed_attendance_days(&pool, learner.id, start + Duration::days(22), 27).await;
    clock.set(Utc.with_ymd_and_hms(2024, 4, 19, 10, 0, 0).unwrap());
    let question = common::seed_question(&pool, 2, admin.id, clock.now()).await;

    let app = common::build_test_app(pool.clone(), clock);
    let response = patch_json_as(
        app,
        "/api/v1/users/attendance",
        learner.id,
        ROLE_USER,
        serde_json::json!({"question_id": question.id, "answer": "Last level-two day."}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["promoted"], true);
    assert_eq!(json["data"]["current_level"], 3);
    assert_eq!(json["data"]["attendance_percentage"], 0.0);
    assert_eq!(common::attendance_row_count(&pool, learner.id).await, 0);
}

/// A user at the top level satisfies the rule but has nowhere to go; the
/// snapshot keeps their percentage instead of resetting it.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_top_level_never_advances(pool: PgPool) {
    let clock = common::test_clock();
    let start = common::test_start();
    let admin = common::seed_user(&pool, "admin@test.dev", ROLE_ADMIN, start).await;
    let learner = common::seed_user(&pool, "learner@test.dev", ROLE_USER, start).await;
    common::set_user_level(&pool, learner.id, 3).await;

    // Level 3 runs 2024-04-19T12:00Z to 2024-05-10T12:00Z (21 days). Full
    // attendance: 20 seeded days plus the terminal-day mark is 21/21.
    common::seed_attendance_days(&pool, learner.id, start + Duration::days(49), 20).await;
    clock.set(Utc.with_ymd_and_hms(2024, 5, 10, 10, 0, 0).unwrap());
    let question = common::seed_question(&pool, 3, admin.id, clock.now()).await;

    let app = common::build_test_app(pool.clone(), clock);
    let response = patch_json_as(
        app,
        "/api/v1/users/attendance",
        learner.id,
        ROLE_USER,
        serde_json::json!({"question_id": question.id, "answer": "Still here."}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["promoted"], false);
    assert_eq!(json["data"]["current_level"], 3);
    assert_eq!(json["data"]["attended_days"], 21);
    assert_eq!(json["data"]["attendance_percentage"], 100.0);

    assert_eq!(common::attendance_row_count(&pool, learner.id).await, 21);
}

/// The percentage persisted on the user row matches the snapshot.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_percentage_persisted_on_user_row(pool: PgPool) {
    let clock = common::test_clock();
    let start = common::test_start();
    let admin = common::seed_user(&pool, "admin@test.dev", ROLE_ADMIN, start).await;
    let learner = common::seed_user(&pool, "learner@test.dev", ROLE_USER, start).await;

    common::seed_attendance_days(&pool, learner.id, start, 4).await;
    clock.set(start + Duration::days(5));
    let question = common::seed_question(&pool, 1, admin.id, clock.now()).await;

    let app = common::build_test_app(pool.clone(), clock.clone());
    let response = patch_json_as(
        app,
        "/api/v1/users/attendance",
        learner.id,
        ROLE_USER,
        serde_json::json!({"question_id": question.id, "answer": "Day six."}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let snapshot = body_json(response).await;

    let app = common::build_test_app(pool, clock);
    let response = get_as(app, "/api/v1/users/me/progression", learner.id, ROLE_USER).await;
    let json = body_json(response).await;
    assert_eq!(
        json["data"]["user"]["attendance_percentage"],
        snapshot["data"]["attendance_percentage"]
    );
    assert_eq!(json["data"]["attended_days"], 5);
}
