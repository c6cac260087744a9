use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use talentdesk_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware, routes, AppState,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    if let (Some(email), Some(password)) = (
        config.seed_admin_email.as_deref(),
        config.seed_admin_password.as_deref(),
    ) {
        if let Err(e) = app_state.user_service.ensure_seed_admin(email, password).await {
            tracing::warn!("Seed admin bootstrap failed: {:?}", e);
        }
    }

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let public_api = Router::new()
        .route("/api/auth/login", post(routes::auth::login))
        .route(
            "/api/applications/submit",
            post(routes::application_routes::submit_application),
        )
        .route("/api/public/leads", post(routes::client_routes::submit_lead));

    let staff_api = Router::new()
        .route("/api/auth/me", get(routes::auth::me))
        .route(
            "/api/auth/change-password",
            post(routes::auth::change_password),
        )
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
            "/api/candidates",
            get(routes::candidate_routes::list_candidates)
                .post(routes::candidate_routes::create_candidate),
        )
        .route(
            "/api/candidates/export",
            post(routes::export::export_candidates_bulk),
        )
        .route(
            "/api/candidates/:id",
            get(routes::candidate_routes::get_candidate)
                .put(routes::candidate_routes::update_candidate)
                .delete(routes::candidate_routes::delete_candidate),
        )
        .route(
            "/api/candidates/:id/export",
            get(routes::export::export_candidate),
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
        .route("/api/upload/logo", post(routes::upload::upload_logo))
        .route("/api/upload/template", post(routes::upload::upload_template))
        .layer(axum::middleware::from_fn(
            middleware::auth::require_bearer_auth,
        ));

    let admin_api = Router::new()
        .route(
            "/api/users",
            get(routes::user_routes::list_users).post(routes::user_routes::create_user),
        )
        .route(
            "/api/users/:id",
            get(routes::user_routes::get_user)
                .put(routes::user_routes::update_user)
                .delete(routes::user_routes::delete_user),
        )
        .layer(axum::middleware::from_fn(middleware::auth::require_admin));

    info!("Serving uploads from: {}", config.uploads_dir);

    let app = base_routes
        .merge(public_api)
        .merge(staff_api)
        .merge(admin_api)
        .nest_service(
            "/uploads",
            tower_http::services::ServeDir::new(&config.uploads_dir),
        )
        .with_state(app_state)
        .layer(middleware::cors::permissive_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
