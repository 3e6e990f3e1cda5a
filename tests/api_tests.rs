//! HTTP-level tests exercising the full router: auth middleware, envelope
//! shape, status codes, and tenant scoping through the wire surface.

use anyhow::Result;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use backoffice::config::AppConfig;
use backoffice::server::{AppState, create_app, create_test_app_state};
use serde_json::{Value, json};
use tower::ServiceExt;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{create_company, create_level, setup_test_db};

async fn setup_test_app() -> Result<(AppState, Router)> {
    let config = AppConfig {
        profile: "test".to_string(),
        operator_tokens: vec!["test-token".to_string()],
        ..Default::default()
    };

    let db = setup_test_db().await?;
    let state = create_test_app_state(config, db);
    let app = create_app(state.clone());
    Ok((state, app))
}

fn request(method: &str, uri: &str, company_id: i32, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", "Bearer test-token")
        .header("X-Company-Id", company_id.to_string())
        .header("Content-Type", "application/json");
    if body.is_none() {
        builder = builder.header("Content-Length", "0");
    }
    builder
        .body(match body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        })
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn requests_without_a_token_are_rejected() -> Result<()> {
    let (_state, app) = setup_test_app().await?;

    let req = Request::builder()
        .method("GET")
        .uri("/api/v1/school-years")
        .header("X-Company-Id", "7")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn requests_without_a_company_header_are_rejected() -> Result<()> {
    let (_state, app) = setup_test_app().await?;

    let req = Request::builder()
        .method("GET")
        .uri("/api/v1/school-years")
        .header("Authorization", "Bearer test-token")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error = body_json(response).await?;
    assert_eq!(error["code"], "VALIDATION_FAILED");
    Ok(())
}

#[tokio::test]
async fn create_and_fetch_a_company_through_the_api() -> Result<()> {
    let (_state, app) = setup_test_app().await?;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/companies",
            1,
            Some(json!({
                "name": "Acme School",
                "email": "admin@acme.edu",
                "phone": "+33123456789"
            })),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await?;
    assert_eq!(created["name"], "Acme School");
    assert_eq!(created["status"], 1);
    let id = created["id"].as_i64().unwrap() as i32;

    // Reading it back under its own scope succeeds.
    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/v1/companies/{id}"),
            id,
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    // Another tenant cannot see it.
    let response = app
        .oneshot(request(
            "GET",
            &format!("/api/v1/companies/{id}"),
            id + 1000,
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = body_json(response).await?;
    assert_eq!(error["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn list_returns_the_paginated_envelope() -> Result<()> {
    let (state, app) = setup_test_app().await?;
    let company_id = create_company(&state.db, "Acme School").await?;
    let level_id = create_level(&state.db, company_id, "Beginner").await?;

    for i in 0..12 {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/v1/level-pricings",
                company_id,
                Some(json!({
                    "level_id": level_id,
                    "title": format!("Plan {i}"),
                    "amount": 100.0 + f64::from(i)
                })),
            ))
            .await?;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(request(
            "GET",
            "/api/v1/level-pricings?page=1&limit=5",
            company_id,
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let envelope = body_json(response).await?;
    assert_eq!(envelope["data"].as_array().unwrap().len(), 5);
    assert_eq!(envelope["meta"]["total"], 12);
    assert_eq!(envelope["meta"]["page"], 1);
    assert_eq!(envelope["meta"]["limit"], 5);
    assert_eq!(envelope["meta"]["last_page"], 3);
    // Rows embed the owning company.
    assert_eq!(envelope["data"][0]["company"]["id"], company_id);
    Ok(())
}

#[tokio::test]
async fn school_year_validation_errors_surface_as_400() -> Result<()> {
    let (state, app) = setup_test_app().await?;
    let company_id = create_company(&state.db, "Acme School").await?;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/school-years",
            company_id,
            Some(json!({
                "title": "2024",
                "start_date": "2024-09-01",
                "end_date": "2024-06-01"
            })),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await?;
    assert_eq!(error["code"], "VALIDATION_FAILED");
    assert!(
        error["message"]
            .as_str()
            .unwrap()
            .contains("end_date must be greater than start_date")
    );

    // Malformed dates are caught at the DTO boundary.
    let response = app
        .oneshot(request(
            "POST",
            "/api/v1/school-years",
            company_id,
            Some(json!({
                "title": "2024",
                "start_date": "not-a-date",
                "end_date": "2025-06-01"
            })),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn delete_returns_204_and_hides_the_resource() -> Result<()> {
    let (state, app) = setup_test_app().await?;
    let company_id = create_company(&state.db, "Acme School").await?;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/planning-session-types",
            company_id,
            Some(json!({ "title": "Lecture", "type": "course" })),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await?;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/v1/planning-session-types/{id}"),
            company_id,
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(request(
            "GET",
            &format!("/api/v1/planning-session-types/{id}"),
            company_id,
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn update_payloads_cannot_smuggle_a_company_id() -> Result<()> {
    let (state, app) = setup_test_app().await?;
    let company_id = create_company(&state.db, "Acme School").await?;
    let level_id = create_level(&state.db, company_id, "Beginner").await?;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/level-pricings",
            company_id,
            Some(json!({ "level_id": level_id, "title": "Monthly", "amount": 500.0 })),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await?;
    let id = created["id"].as_i64().unwrap();

    // A company_id in the body is not a known update field; it is dropped at
    // the DTO boundary and the stored tenant value survives.
    let response = app
        .oneshot(request(
            "PATCH",
            &format!("/api/v1/level-pricings/{id}"),
            company_id,
            Some(json!({ "amount": 600.0, "company_id": company_id + 999 })),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await?;
    assert_eq!(updated["amount"], 600.0);
    assert_eq!(updated["company"]["id"], company_id);
    Ok(())
}

#[tokio::test]
async fn responses_carry_a_trace_id_header() -> Result<()> {
    let (_state, app) = setup_test_app().await?;

    let req = Request::builder()
        .method("GET")
        .uri("/healthz")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-trace-id").is_some());
    Ok(())
}

#[tokio::test]
async fn root_reports_service_information() -> Result<()> {
    let (_state, app) = setup_test_app().await?;

    let req = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let info = body_json(response).await?;
    assert_eq!(info["service"], "backoffice");
    Ok(())
}
