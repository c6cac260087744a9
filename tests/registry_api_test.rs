use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value as JsonValue};
use talentdesk_backend::{middleware, routes, AppState};
use tower::ServiceExt;

async fn setup() -> Option<Router> {
    let Ok(_db_url) = env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping registry test");
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

    let protected = Router::new()
        .route("/api/auth/me", get(routes::auth::me))
        .layer(axum::middleware::from_fn(
            middleware::auth::require_bearer_auth,
        ));

    let app = Router::new()
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/public/leads", post(routes::client_routes::submit_lead))
        .route(
            "/api/clients",
            get(routes::client_routes::list_clients).post(routes::client_routes::create_client),
        )
        .route(
            "/api/clients/:id",
            get(routes::client_routes::get_client)
                .put(routes::client_routes::update_client)
                .delete(routes::client_routes::delete_client),
        )
        .route(
            "/api/users",
            post(routes::user_routes::create_user),
        )
        .merge(protected)
        .with_state(app_state);
    Some(app)
}

async fn request_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<JsonValue>,
    bearer: Option<&str>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
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
async fn lead_form_creates_lead_client_with_concatenated_address() {
    let Some(app) = setup().await else { return };

    let email = format!("lead_{}@example.com", uuid::Uuid::new_v4());
    let (status, lead) = request_json(
        &app,
        "POST",
        "/api/public/leads",
        Some(json!({
            "name": "Acme GmbH",
            "email": email,
            "street": "Ringstrasse 1",
            "postalCode": "1010",
            "city": "Vienna",
            "country": "Austria"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(lead["status"], "lead");
    assert_eq!(lead["address"], "Ringstrasse 1, 1010 Vienna, Austria");
}

#[tokio::test]
async fn client_crud_with_partial_update() {
    let Some(app) = setup().await else { return };

    let email = format!("client_{}@example.com", uuid::Uuid::new_v4());
    let (status, created) = request_json(
        &app,
        "POST",
        "/api/clients",
        Some(json!({
            "name": "Initech",
            "email": email,
            "contactPerson": "B. Lumbergh",
            "industry": "Software"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pending");
    let id = created["id"].as_str().unwrap().to_string();

    // Partial patch: untouched fields keep their values.
    let (status, updated) = request_json(
        &app,
        "PUT",
        &format!("/api/clients/{}", id),
        Some(json!({ "notes": "Met at the job fair", "status": "active" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["notes"], "Met at the job fair");
    assert_eq!(updated["status"], "active");
    assert_eq!(updated["contactPerson"], "B. Lumbergh");
    assert_eq!(updated["industry"], "Software");

    let (status, _) =
        request_json(&app, "DELETE", &format!("/api/clients/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = request_json(&app, "GET", &format!("/api/clients/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_issues_token_accepted_by_the_bearer_gate() {
    let Some(app) = setup().await else { return };

    let marker = uuid::Uuid::new_v4().simple().to_string();
    let email = format!("staff_{}@example.com", marker);
    let (status, _) = request_json(
        &app,
        "POST",
        "/api/users",
        Some(json!({
            "username": format!("staff_{}", marker),
            "email": email,
            "password": "initial-password-1",
            "firstName": "Staff",
            "lastName": "Member"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, login) = request_json(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": email, "password": "initial-password-1" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = login["token"].as_str().expect("token").to_string();
    assert_eq!(login["user"]["email"], email);

    let (status, me) = request_json(&app, "GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], email);

    let (status, _) = request_json(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": email, "password": "wrong-password" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
