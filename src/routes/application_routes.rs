use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::application_dto::{ApplicationListQuery, ApplicationResponse, SubmitApplicationPayload},
    dto::candidate_dto::CandidateResponse,
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/applications/submit",
    request_body = SubmitApplicationPayload,
    responses(
        (status = 201, description = "Application submitted", body = Json<ApplicationResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn submit_application(
    State(state): State<AppState>,
    Json(payload): Json<SubmitApplicationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state.application_service.submit(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse::from(application)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/applications",
    params(
        ("status" = Option<String>, Query, description = "Filter by status")
    ),
    responses(
        (status = 200, description = "List of applications", body = Json<Vec<ApplicationResponse>>)
    )
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let applications = state.application_service.list(query).await?;
    let items: Vec<ApplicationResponse> = applications.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application found", body = Json<ApplicationResponse>),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.get_by_id(id).await?;
    Ok(Json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    post,
    path = "/api/applications/{id}/approve",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 201, description = "Application approved, candidate created", body = Json<CandidateResponse>),
        (status = 404, description = "Application not found or already reviewed")
    )
)]
#[axum::debug_handler]
pub async fn approve_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let candidate = state.application_service.approve(id).await?;
    Ok((StatusCode::CREATED, Json(CandidateResponse::from(candidate))))
}

#[utoipa::path(
    post,
    path = "/api/applications/{id}/reject",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application rejected", body = Json<ApplicationResponse>),
        (status = 404, description = "Application not found or already reviewed")
    )
)]
#[axum::debug_handler]
pub async fn reject_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.reject(id).await?;
    Ok(Json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.application_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
