//! HTTP-level integration tests for the program composition endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! Accounts and expert profiles are created via the repository layer so
//! the tests stay focused on HTTP behaviour.

mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{build_test_app, delete, expect_status, get, post_json, put_json, token_for};
use sqlx::PgPool;
use uuid::Uuid;
use vitaplan_core::types::DbId;
use vitaplan_db::models::expert::CreateExpert;
use vitaplan_db::repositories::{AccountRepo, ExpertRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a verified expert account + profile; returns (account_id, token).
async fn seed_expert(pool: &PgPool, email: &str) -> (DbId, String) {
    let account = AccountRepo::insert(pool, Uuid::new_v4(), email, "hash", "expert")
        .await
        .unwrap();
    ExpertRepo::insert(
        pool,
        Uuid::new_v4(),
        &CreateExpert {
            account_id: Some(account.account_id),
            full_name: "Dr. Minh".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 5, 1).unwrap(),
            gender: None,
            telephone_number: None,
            avatar_url: None,
            expert_type: "Nutritionist".to_string(),
        },
    )
    .await
    .unwrap();
    let token = token_for(account.account_id, "expert");
    (account.account_id, token)
}

fn diabetes_body(activity_type: &str) -> serde_json::Value {
    serde_json::json!({
        "title": "Diabetes Care",
        "description": "30-day glucose management plan",
        "duration": 30,
        "disease_ids": [1],
        "goal_ids": [1, 2],
        "levels": [{
            "name": "Beginner",
            "point_require": 100,
            "activities": [{
                "title": "Walk",
                "duration": 20,
                "point_reward": 10,
                "activity_type": activity_type,
                "repeat_days": ["monday", "wednesday"]
            }]
        }]
    })
}

// ---------------------------------------------------------------------------
// Test: POST + GET roundtrip for the program tree
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_get_program_tree(pool: PgPool) {
    let (_, token) = seed_expert(&pool, "minh@example.com").await;

    let (app, _) = build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/programs", diabetes_body("Activity"), Some(&token)).await;
    let json = expect_status(response, StatusCode::CREATED).await;

    let program_id = json["data"]["program_id"].as_str().unwrap().to_string();
    assert_eq!(json["data"]["title"], "Diabetes Care");
    assert_eq!(json["data"]["is_active"], true);

    let (app, _) = build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/programs/{program_id}"), Some(&token)).await;
    let json = expect_status(response, StatusCode::OK).await;

    assert_eq!(json["data"]["disease_ids"], serde_json::json!([1]));
    assert_eq!(json["data"]["goal_ids"], serde_json::json!([1, 2]));
    let levels = json["data"]["levels"].as_array().unwrap();
    assert_eq!(levels.len(), 1);
    let activities = levels[0]["activities"].as_array().unwrap();
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0]["activity_type"], "Activity");
    assert_eq!(
        activities[0]["repeat_days"],
        serde_json::json!(["monday", "wednesday"])
    );
}

// ---------------------------------------------------------------------------
// Test: invalid enum input is a 400 and writes nothing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_program_invalid_type_is_rejected(pool: PgPool) {
    let (_, token) = seed_expert(&pool, "minh@example.com").await;

    let (app, _) = build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/programs", diabetes_body("Yoga"), Some(&token)).await;
    let json = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let programs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM programs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(programs, 0);
}

// ---------------------------------------------------------------------------
// Test: authentication and role gating
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_program_requires_expert_role(pool: PgPool) {
    let (app, _) = build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/programs", diabetes_body("Activity"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let account = AccountRepo::insert(&pool, Uuid::new_v4(), "user@example.com", "hash", "user")
        .await
        .unwrap();
    let token = token_for(account.account_id, "user");
    let (app, _) = build_test_app(pool.clone());
    let response =
        post_json(app, "/api/v1/programs", diabetes_body("Activity"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_by_non_owner_is_forbidden(pool: PgPool) {
    let (_, owner_token) = seed_expert(&pool, "owner@example.com").await;
    let (_, other_token) = seed_expert(&pool, "other@example.com").await;

    let (app, _) = build_test_app(pool.clone());
    let response =
        post_json(app, "/api/v1/programs", diabetes_body("Activity"), Some(&owner_token)).await;
    let json = expect_status(response, StatusCode::CREATED).await;
    let program_id = json["data"]["program_id"].as_str().unwrap().to_string();

    let (app, _) = build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/programs/{program_id}"),
        serde_json::json!({ "title": "Hijacked" }),
        Some(&other_token),
    )
    .await;
    let json = expect_status(response, StatusCode::FORBIDDEN).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

// ---------------------------------------------------------------------------
// Test: participation-gated delete over HTTP
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_program_reports_outcome(pool: PgPool) {
    let (_, token) = seed_expert(&pool, "minh@example.com").await;

    let (app, _) = build_test_app(pool.clone());
    let response =
        post_json(app, "/api/v1/programs", diabetes_body("Activity"), Some(&token)).await;
    let json = expect_status(response, StatusCode::CREATED).await;
    let program_id = json["data"]["program_id"].as_str().unwrap().to_string();

    let (app, _) = build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/programs/{program_id}"), Some(&token)).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["outcome"], "deleted");

    let (app, _) = build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/programs/{program_id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: standalone activity endpoints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_activity_update_replaces_repeat_days(pool: PgPool) {
    let (_, token) = seed_expert(&pool, "minh@example.com").await;

    let (app, _) = build_test_app(pool.clone());
    let response =
        post_json(app, "/api/v1/programs", diabetes_body("Activity"), Some(&token)).await;
    let json = expect_status(response, StatusCode::CREATED).await;
    let program_id = json["data"]["program_id"].as_str().unwrap().to_string();

    let (app, _) = build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/programs/{program_id}"), Some(&token)).await;
    let json = expect_status(response, StatusCode::OK).await;
    let activity_id = json["data"]["levels"][0]["activities"][0]["activity_id"]
        .as_str()
        .unwrap()
        .to_string();

    let (app, _) = build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/activities/{activity_id}"),
        serde_json::json!({
            "activity_type": "MiniGame",
            "repeat_days": ["friday"]
        }),
        Some(&token),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["activity_type"], "MiniGame");
    assert_eq!(json["data"]["repeat_days"], serde_json::json!(["friday"]));
}
