//! Integration tests for the `/tasks` resource: CRUD, field validation,
//! and the scope sub-resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_entity(app: &axum::Router, uri: &str, body: Value) -> i64 {
    let response = post_json(app.clone(), uri, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_task_applies_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/tasks",
        json!({"title": "Scan inventory"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let task = body_json(response).await;
    assert_eq!(task["status"], "todo");
    assert_eq!(task["priority"], 2);
    assert_eq!(task["cost_currency"], "PLN");
    assert_eq!(task["template_id"], Value::Null);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_task_rejects_bad_vocabulary(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/tasks",
        json!({"title": "T", "status": "archived"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app.clone(),
        "/api/v1/tasks",
        json!({"title": "T", "priority": 9}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app.clone(),
        "/api/v1/tasks",
        json!({"title": "T", "start_date": "2025-06-01", "due_date": "2025-01-01"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_task_applies_partial_changes(pool: PgPool) {
    let app = common::build_test_app(pool);

    let id = create_entity(
        &app,
        "/api/v1/tasks",
        json!({"title": "Scan inventory", "priority": 1}),
    )
    .await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/tasks/{id}"),
        json!({"status": "doing", "cost_amount": "120.50"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let task = body_json(response).await;
    assert_eq!(task["title"], "Scan inventory");
    assert_eq!(task["status"], "doing");
    assert_eq!(task["priority"], 1);
    assert_eq!(task["cost_amount"], "120.50");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_task_returns_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/tasks/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");

    let response = delete(app.clone(), "/api/v1/tasks/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Scope sub-resource
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn scope_assignment_round_trip(pool: PgPool) {
    let app = common::build_test_app(pool);

    let project_id = create_entity(&app, "/api/v1/projects", json!({"name": "P"})).await;
    let task_id = create_entity(&app, "/api/v1/tasks", json!({"title": "T"})).await;

    // Unassigned at first.
    let response = get(app.clone(), &format!("/api/v1/tasks/{task_id}/scope")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let scope = body_json(response).await;
    assert_eq!(scope["scope"], Value::Null);
    assert_eq!(scope["funding_scoped"], false);

    // Assign to the project.
    let response = put_json(
        app.clone(),
        &format!("/api/v1/tasks/{task_id}/scope"),
        json!({"project_id": project_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app.clone(), &format!("/api/v1/tasks/{task_id}/scope")).await;
    let scope = body_json(response).await;
    assert_eq!(scope["scope"]["kind"], "project");
    assert_eq!(scope["scope"]["id"], project_id);

    // Unassign: task survives with no scope.
    let response = delete(app.clone(), &format!("/api/v1/tasks/{task_id}/scope")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), &format!("/api/v1/tasks/{task_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get(app.clone(), &format!("/api/v1/tasks/{task_id}/scope")).await;
    let scope = body_json(response).await;
    assert_eq!(scope["scope"], Value::Null);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn scope_assignment_enforces_exactly_one(pool: PgPool) {
    let app = common::build_test_app(pool);

    let project_id = create_entity(&app, "/api/v1/projects", json!({"name": "P"})).await;
    let funding_id = create_entity(&app, "/api/v1/fundings", json!({"name": "F"})).await;
    let task_id = create_entity(&app, "/api/v1/tasks", json!({"title": "T"})).await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/tasks/{task_id}/scope"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(
        app.clone(),
        &format!("/api/v1/tasks/{task_id}/scope"),
        json!({"project_id": project_id, "funding_id": funding_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn scope_of_missing_task_returns_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/tasks/9999/scope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json(
        app.clone(),
        "/api/v1/tasks/9999/scope",
        json!({"project_id": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
