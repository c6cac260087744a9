use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::auth_dto::{ChangePasswordPayload, LoginPayload, LoginResponse},
    dto::user_dto::UserResponse,
    error::{Error, Result},
    middleware::auth::Claims,
    utils::{crypto, token},
    AppState,
};

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let user = state
        .user_service
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| Error::Unauthorized("Invalid email or password".into()))?;

    let ok = crypto::verify_password(&payload.password, &user.password_hash)
        .map_err(|e| Error::Internal(format!("Password verification failed: {}", e)))?;
    if !ok {
        return Err(Error::Unauthorized("Invalid email or password".into()));
    }

    let config = crate::config::get_config();
    let token = token::issue_token(&user, &config.jwt_secret, config.token_ttl_minutes)?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        user: UserResponse::from(user),
        token,
    }))
}

#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| Error::Unauthorized("invalid_token".into()))?;
    let user = state.user_service.get(id).await?;
    Ok(Json(UserResponse::from(user)))
}

#[axum::debug_handler]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ChangePasswordPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| Error::Unauthorized("invalid_token".into()))?;
    state
        .user_service
        .change_password(id, &payload.current_password, &payload.new_password)
        .await?;
    Ok((StatusCode::OK, Json(serde_json::json!({"changed": true}))))
}
