use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value as JsonValue};
use talentdesk_backend::{routes, AppState};
use tower::ServiceExt;

/// End-to-end lifecycle tests against a real database. Skipped when
/// DATABASE_URL is not configured, as in the plain unit-test run.
async fn setup() -> Option<Router> {
    let Ok(_db_url) = env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping application flow test");
        return None;
    };
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("JWT_SECRET", "test_secret_key");
    let _ = talentdesk_backend::config::init_config();

    let pool = talentdesk_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");

    let app_state = AppState::new(pool);
    let app = Router::new()
        .route(
            "/api/applications/submit",
            post(routes::application_routes::submit_application),
        )
        .route(
            "/api/applications",
            get(routes::application_routes::list_applications),
        )
        .route(
            "/api/applications/:id",
            get(routes::application_routes::get_application)
                .delete(routes::application_routes::delete_application),
        )
        .route(
            "/api/applications/:id/approve",
            post(routes::application_routes::approve_application),
        )
        .route(
            "/api/applications/:id/reject",
            post(routes::application_routes::reject_application),
        )
        .route(
            "/api/candidates",
            post(routes::candidate_routes::create_candidate),
        )
        .route(
            "/api/candidates/:id",
            get(routes::candidate_routes::get_candidate)
                .delete(routes::candidate_routes::delete_candidate),
        )
        .route(
            "/api/candidates/:id/export",
            get(routes::export::export_candidate),
        )
        .with_state(app_state);
    Some(app)
}

async fn request_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, body)
}

#[tokio::test]
async fn submit_approve_flow_creates_candidate() {
    let Some(app) = setup().await else { return };

    let email = format!("jane_{}@example.com", uuid::Uuid::new_v4());
    let payload = json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "email": email,
        "phone": "+43 1 5550101",
        "currentPosition": "QA Engineer",
        "skills": "JS,SQL",
        "experience": [{"title": "QA Engineer", "company": "Acme", "period": "2021 - 2024"}],
        "availability": "yes",
        // A submitter-supplied status must be ignored.
        "status": "approved"
    });

    let (status, submitted) =
        request_json(&app, "POST", "/api/applications/submit", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(submitted["status"], "pending");
    assert_eq!(submitted["skills"], json!(["JS", "SQL"]));
    let app_id = submitted["id"].as_str().expect("id").to_string();

    let (status, listed) =
        request_json(&app, "GET", "/api/applications?status=pending", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(listed
        .as_array()
        .unwrap()
        .iter()
        .any(|item| item["id"] == JsonValue::String(app_id.clone())));

    let (status, candidate) = request_json(
        &app,
        "POST",
        &format!("/api/applications/{}/approve", app_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(candidate["firstName"], "Jane");
    assert_eq!(candidate["lastName"], "Doe");
    assert_eq!(candidate["email"], email);
    assert_eq!(candidate["phone"], "+43 1 5550101");
    assert_eq!(candidate["skills"], json!(["JS", "SQL"]));
    assert_eq!(candidate["status"], "active");
    assert_eq!(candidate["availability"], "yes");
    let candidate_id = candidate["id"].as_str().expect("candidate id").to_string();

    let (status, reread) =
        request_json(&app, "GET", &format!("/api/applications/{}", app_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reread["status"], "approved");

    // Approval is single-shot: a reviewed application reads as not-found.
    let (status, _) = request_json(
        &app,
        "POST",
        &format!("/api/applications/{}/approve", app_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = request_json(
        &app,
        "POST",
        &format!("/api/applications/{}/reject", app_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The derived candidate exports as a PDF resume.
    let req = Request::builder()
        .method("GET")
        .uri(format!("/api/candidates/{}/export?template=modern", candidate_id))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/pdf"
    );
    let pdf = to_bytes(resp.into_body(), 16 * 1024 * 1024).await.unwrap();
    assert!(pdf.starts_with(b"%PDF"));

    let (status, _) = request_json(
        &app,
        "DELETE",
        &format!("/api/candidates/{}", candidate_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = request_json(
        &app,
        "GET",
        &format!("/api/candidates/{}", candidate_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reject_is_single_shot_and_creates_no_candidate() {
    let Some(app) = setup().await else { return };

    let email = format!("reject_{}@example.com", uuid::Uuid::new_v4());
    let (status, submitted) = request_json(
        &app,
        "POST",
        "/api/applications/submit",
        Some(json!({
            "firstName": "Max",
            "lastName": "Muster",
            "email": email,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(submitted["availability"], "no");
    let app_id = submitted["id"].as_str().unwrap().to_string();

    let (status, rejected) = request_json(
        &app,
        "POST",
        &format!("/api/applications/{}/reject", app_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["status"], "rejected");

    // Second reject hits a non-pending row and reads as not-found.
    let (status, _) = request_json(
        &app,
        "POST",
        &format!("/api/applications/{}/reject", app_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = request_json(
        &app,
        "POST",
        &format!("/api/applications/{}/approve", app_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Delete works regardless of status.
    let (status, _) = request_json(
        &app,
        "DELETE",
        &format!("/api/applications/{}", app_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) =
        request_json(&app, "GET", &format!("/api/applications/{}", app_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn approving_unknown_application_is_not_found() {
    let Some(app) = setup().await else { return };
    let (status, _) = request_json(
        &app,
        "POST",
        &format!("/api/applications/{}/approve", uuid::Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn candidate_skills_round_trip_preserves_order() {
    let Some(app) = setup().await else { return };

    let email = format!("skills_{}@example.com", uuid::Uuid::new_v4());
    let (status, created) = request_json(
        &app,
        "POST",
        "/api/candidates",
        Some(json!({
            "firstName": "Sam",
            "lastName": "Skill",
            "email": email,
            "skills": ["Playwright", "Rust", "SQL"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap();

    let (status, read_back) =
        request_json(&app, "GET", &format!("/api/candidates/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read_back["skills"], json!(["Playwright", "Rust", "SQL"]));
}

#[tokio::test]
async fn submission_without_required_fields_is_rejected() {
    let Some(app) = setup().await else { return };
    let (status, _) = request_json(
        &app,
        "POST",
        "/api/applications/submit",
        Some(json!({ "firstName": "NoLastName", "email": "broken@example.com", "lastName": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
