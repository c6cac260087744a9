use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::client_dto::{ClientResponse, CreateClientPayload, LeadPayload, UpdateClientPayload},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/clients",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Client created", body = Json<ClientResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_client(
    State(state): State<AppState>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let client = state.client_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ClientResponse::from(client))))
}

/// Public lead form. Creates a client with status `lead`; the address is
/// concatenated from its parts here, at submission time.
#[utoipa::path(
    post,
    path = "/api/public/leads",
    request_body = LeadPayload,
    responses(
        (status = 201, description = "Lead recorded", body = Json<ClientResponse>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn submit_lead(
    State(state): State<AppState>,
    Json(payload): Json<LeadPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let address = payload.address();
    let client = state
        .client_service
        .create(CreateClientPayload {
            name: payload.name,
            contact_person: payload.contact_person,
            contact_role: payload.contact_role,
            email: payload.email,
            phone: payload.phone,
            address: Some(address),
            industry: payload.industry,
            status: Some("lead".to_string()),
            notes: payload.notes,
            vat_number: payload.vat_number,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ClientResponse::from(client))))
}

#[utoipa::path(
    get,
    path = "/api/clients",
    responses(
        (status = 200, description = "List of clients", body = Json<Vec<ClientResponse>>)
    )
)]
#[axum::debug_handler]
pub async fn list_clients(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let clients = state.client_service.list().await?;
    let items: Vec<ClientResponse> = clients.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[axum::debug_handler]
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let client = state.client_service.get_by_id(id).await?;
    Ok(Json(ClientResponse::from(client)))
}

#[axum::debug_handler]
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClientPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let client = state.client_service.update(id, payload).await?;
    Ok(Json(ClientResponse::from(client)))
}

#[axum::debug_handler]
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.client_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
