use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tokio::fs;
use uuid::Uuid;

use crate::{
    error::Result,
    services::export_service::{ExportService, ResumeTemplate},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub template: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkExportRequest {
    pub candidate_ids: Option<Vec<Uuid>>,
}

/// Export a single candidate as a resume PDF, laid out with the selected
/// template and the uploaded company logo if one exists.
pub async fn export_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.get_by_id(id).await?;
    let template = ResumeTemplate::from_name(query.template.as_deref());

    let config = crate::config::get_config();
    let logo = fs::read(format!("{}/branding/logo.png", config.uploads_dir))
        .await
        .ok();

    let buffer = ExportService::render_resume_pdf(&candidate, template, logo.as_deref())?;
    let filename = format!(
        "resume_{}_{}_{}.pdf",
        candidate.first_name.replace(' ', "_"),
        candidate.last_name.replace(' ', "_"),
        chrono::Utc::now().format("%Y%m%d")
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}

/// Export multiple or all candidates as a single XLSX sheet.
pub async fn export_candidates_bulk(
    State(state): State<AppState>,
    Json(payload): Json<BulkExportRequest>,
) -> Result<impl IntoResponse> {
    let candidates = if let Some(ids) = payload.candidate_ids {
        if ids.is_empty() {
            state.candidate_service.list().await?
        } else {
            let all = state.candidate_service.list().await?;
            all.into_iter().filter(|c| ids.contains(&c.id)).collect()
        }
    } else {
        state.candidate_service.list().await?
    };

    let buffer = ExportService::generate_candidates_xlsx(&candidates)?;
    let filename = format!("candidates_{}.xlsx", chrono::Utc::now().format("%Y%m%d"));
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}
