//! Integration tests for the link lifecycle over HTTP: attaching a
//! funding provisions its templates, detaching retracts them, and the
//! error mapping produces the right status codes.

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
async fn attach_provisions_templates_and_detach_retracts(pool: PgPool) {
    let app = common::build_test_app(pool);

    let project_id = create_entity(
        &app,
        "/api/v1/projects",
        json!({"name": "Archive digitization", "start_date": "2025-01-01"}),
    )
    .await;
    let funding_id = create_entity(
        &app,
        "/api/v1/fundings",
        json!({"name": "Heritage grant", "kind": "grant"}),
    )
    .await;
    create_entity(
        &app,
        &format!("/api/v1/fundings/{funding_id}/templates"),
        json!({"title": "Kickoff report", "default_due_days": 15}),
    )
    .await;
    create_entity(
        &app,
        &format!("/api/v1/fundings/{funding_id}/templates"),
        json!({"title": "Budget plan", "default_due_days": 30}),
    )
    .await;

    let link_id = create_entity(
        &app,
        "/api/v1/project-fundings",
        json!({"project_id": project_id, "funding_id": funding_id}),
    )
    .await;

    // The derived tasks exist with due dates offset from the project start.
    let response = get(app.clone(), "/api/v1/tasks").await;
    assert_eq!(response.status(), StatusCode::OK);
    let tasks = body_json(response).await;
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    let due_dates: Vec<_> = tasks.iter().map(|t| t["due_date"].clone()).collect();
    assert!(due_dates.contains(&json!("2025-01-16")));
    assert!(due_dates.contains(&json!("2025-01-31")));

    // Each is scoped to the link and marked as funding-derived.
    let task_id = tasks[0]["id"].as_i64().unwrap();
    let response = get(app.clone(), &format!("/api/v1/tasks/{task_id}/scope")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let scope = body_json(response).await;
    assert_eq!(scope["funding_scoped"], true);
    assert_eq!(scope["scope"]["kind"], "link");
    assert_eq!(scope["scope"]["id"], link_id);

    // Detach: derived tasks disappear.
    let response = delete(app.clone(), &format!("/api/v1/project-fundings/{link_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), "/api/v1/tasks").await;
    let tasks = body_json(response).await;
    assert!(tasks.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_attach_returns_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);

    let project_id = create_entity(&app, "/api/v1/projects", json!({"name": "P"})).await;
    let funding_id = create_entity(&app, "/api/v1/fundings", json!({"name": "F"})).await;

    let body = json!({"project_id": project_id, "funding_id": funding_id});
    let response = post_json(app.clone(), "/api/v1/project-fundings", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(app.clone(), "/api/v1/project-fundings", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reversed_allocation_dates_return_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);

    let project_id = create_entity(&app, "/api/v1/projects", json!({"name": "P"})).await;
    let funding_id = create_entity(&app, "/api/v1/fundings", json!({"name": "F"})).await;

    let response = post_json(
        app.clone(),
        "/api/v1/project-fundings",
        json!({
            "project_id": project_id,
            "funding_id": funding_id,
            "allocation_start": "2025-06-01",
            "allocation_end": "2025-01-01",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn attach_to_missing_endpoint_returns_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);

    let project_id = create_entity(&app, "/api/v1/projects", json!({"name": "P"})).await;

    let response = post_json(
        app.clone(),
        "/api/v1/project-fundings",
        json!({"project_id": project_id, "funding_id": 9999}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_project_detaches_fundings_and_retracts_tasks(pool: PgPool) {
    let app = common::build_test_app(pool);

    let project_id = create_entity(
        &app,
        "/api/v1/projects",
        json!({"name": "P", "start_date": "2025-01-01"}),
    )
    .await;
    let funding_id = create_entity(&app, "/api/v1/fundings", json!({"name": "F"})).await;
    create_entity(
        &app,
        &format!("/api/v1/fundings/{funding_id}/templates"),
        json!({"title": "Report", "default_due_days": 5}),
    )
    .await;
    create_entity(
        &app,
        "/api/v1/project-fundings",
        json!({"project_id": project_id, "funding_id": funding_id}),
    )
    .await;

    // A manual task scoped to the project.
    let task_id = create_entity(&app, "/api/v1/tasks", json!({"title": "Field notes"})).await;
    let response = put_json(
        app.clone(),
        &format!("/api/v1/tasks/{task_id}/scope"),
        json!({"project_id": project_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete(app.clone(), &format!("/api/v1/projects/{project_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The derived task is gone; the manual task survives unassigned, and
    // the funding is still there.
    let response = get(app.clone(), "/api/v1/tasks").await;
    let tasks = body_json(response).await;
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], task_id);

    let response = get(app.clone(), &format!("/api/v1/tasks/{task_id}/scope")).await;
    let scope = body_json(response).await;
    assert_eq!(scope["scope"], Value::Null);

    let response = get(app.clone(), &format!("/api/v1/fundings/{funding_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_funding_sweeps_its_derived_tasks(pool: PgPool) {
    let app = common::build_test_app(pool);

    let project_id = create_entity(
        &app,
        "/api/v1/projects",
        json!({"name": "P", "start_date": "2025-01-01"}),
    )
    .await;
    let funding_id = create_entity(&app, "/api/v1/fundings", json!({"name": "F"})).await;
    create_entity(
        &app,
        &format!("/api/v1/fundings/{funding_id}/templates"),
        json!({"title": "Report", "default_due_days": 5}),
    )
    .await;
    create_entity(
        &app,
        "/api/v1/project-fundings",
        json!({"project_id": project_id, "funding_id": funding_id}),
    )
    .await;

    let response = delete(app.clone(), &format!("/api/v1/fundings/{funding_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), "/api/v1/tasks").await;
    let tasks = body_json(response).await;
    assert!(tasks.as_array().unwrap().is_empty());

    let response = get(app.clone(), &format!("/api/v1/fundings/{funding_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
