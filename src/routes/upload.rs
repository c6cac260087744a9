use axum::{extract::Multipart, http::StatusCode, response::IntoResponse, Json};
use std::path::Path as StdPath;
use tokio::fs;

use crate::error::{Error, Result};

const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

fn file_extension(filename: &str) -> String {
    StdPath::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "bin".to_string())
}

fn check_image_content(ext: &str, data: &[u8]) -> Result<()> {
    if (ext == "jpg" || ext == "jpeg") && !data.starts_with(&[0xFF, 0xD8]) {
        return Err(Error::BadRequest("Invalid JPEG file content".into()));
    }
    if ext == "png" && !data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Err(Error::BadRequest("Invalid PNG file content".into()));
    }
    Ok(())
}

async fn read_file_field(multipart: &mut Multipart) -> Result<(String, bytes::Bytes)> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload.bin").to_string();
            let data = field.bytes().await.map_err(|e| {
                tracing::error!("Failed to read upload bytes: {}", e);
                Error::BadRequest("Failed to read file upload".into())
            })?;
            return Ok((filename, data));
        }
    }
    Err(Error::BadRequest("No file field in upload".into()))
}

/// The company logo used in resume exports. A single canonical file,
/// overwritten on each upload.
#[axum::debug_handler]
pub async fn upload_logo(mut multipart: Multipart) -> Result<impl IntoResponse> {
    let (filename, data) = read_file_field(&mut multipart).await?;
    if data.is_empty() {
        return Err(Error::BadRequest("Empty file upload".into()));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(Error::BadRequest("File exceeds the 5MB upload limit".into()));
    }

    let ext = file_extension(&filename);
    if !["png", "jpg", "jpeg", "webp"].contains(&ext.as_str()) {
        return Err(Error::BadRequest(format!(
            "File type .{} is not allowed",
            ext
        )));
    }
    check_image_content(&ext, &data)?;

    let config = crate::config::get_config();
    let dir = format!("{}/branding", config.uploads_dir);
    fs::create_dir_all(&dir).await?;
    let target = format!("{}/logo.{}", dir, ext);
    fs::write(&target, &data).await.map_err(|e| {
        tracing::error!("Failed to write logo file: {}", e);
        Error::Internal(format!("Failed to save file: {}", e))
    })?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "url": format!("/uploads/branding/logo.{}", ext) })),
    ))
}

/// Resume template background assets; stored under uuid filenames.
#[axum::debug_handler]
pub async fn upload_template(mut multipart: Multipart) -> Result<impl IntoResponse> {
    let (filename, data) = read_file_field(&mut multipart).await?;
    if data.is_empty() {
        return Err(Error::BadRequest("Empty file upload".into()));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(Error::BadRequest("File exceeds the 5MB upload limit".into()));
    }

    let ext = file_extension(&filename);
    if !["png", "jpg", "jpeg", "webp", "pdf"].contains(&ext.as_str()) {
        return Err(Error::BadRequest(format!(
            "File type .{} is not allowed",
            ext
        )));
    }
    check_image_content(&ext, &data)?;
    if ext == "pdf" && !data.starts_with(b"%PDF") {
        return Err(Error::BadRequest("Invalid PDF file content".into()));
    }

    let config = crate::config::get_config();
    let dir = format!("{}/templates", config.uploads_dir);
    fs::create_dir_all(&dir).await?;
    let file_id = uuid::Uuid::new_v4();
    let safe_filename = format!("{}.{}", file_id, ext);
    fs::write(format!("{}/{}", dir, safe_filename), &data)
        .await
        .map_err(|e| {
            tracing::error!("Failed to write template file: {}", e);
            Error::Internal(format!("Failed to save file: {}", e))
        })?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "url": format!("/uploads/templates/{}", safe_filename) })),
    ))
}
