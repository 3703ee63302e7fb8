use std::path::{Path, PathBuf};

use axum::extract::{Multipart, State};
use bytes::Bytes;
use doctorvision_core::domain::{
    common::generate_uuid_v7,
    diagnosis::{
        entities::DiagnosisRecord, ports::DiagnosisService, value_objects::SymptomRequest,
    },
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::http::{
    diagnosis::validators::SubmitDiagnosisForm,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SubmitDiagnosisResponse {
    pub data: DiagnosisRecord,
}

/// Keeps the uploaded file's extension when it is a plain alphanumeric one.
fn upload_file_name(original: Option<&str>) -> String {
    let extension = original
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) => format!("{}.{}", generate_uuid_v7(), ext),
        None => generate_uuid_v7().to_string(),
    }
}

async fn store_upload(
    upload_dir: &Path,
    original: Option<&str>,
    data: Bytes,
) -> Result<PathBuf, ApiError> {
    let path = upload_dir.join(upload_file_name(original));

    tokio::fs::write(&path, &data).await.map_err(|e| {
        error!(path = %path.display(), "Failed to store uploaded image: {}", e);
        ApiError::InternalServerError(format!("Failed to store uploaded image: {}", e))
    })?;

    Ok(path)
}

/// Failed submissions leave nothing behind in the upload directory.
async fn discard_upload(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!(path = %path.display(), "Failed to remove uploaded image: {}", e);
    }
}

#[utoipa::path(
    post,
    path = "",
    tag = "diagnosis",
    summary = "Submit symptoms",
    description = "Analyzes an optional image together with typed symptoms and returns a structured diagnosis record. Without an image no model call is made.",
    request_body(content = SubmitDiagnosisForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = SubmitDiagnosisResponse),
        (status = 400, description = "Bad request"),
        (status = 502, description = "Vision model call failed")
    ),
)]
pub async fn submit_diagnosis(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<SubmitDiagnosisResponse>, ApiError> {
    let mut form = SubmitDiagnosisForm::default();
    let mut image_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "symptoms" => {
                form.symptoms = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read symptoms: {}", e))
                })?;
            }
            "image" => {
                image_name = field.file_name().map(|s| s.to_string());

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

                if data.len() > MAX_IMAGE_SIZE {
                    return Err(ApiError::BadRequest(format!(
                        "Image too large. Max size is {} bytes",
                        MAX_IMAGE_SIZE
                    )));
                }

                // browsers send an empty part when no file was picked
                form.image = (!data.is_empty()).then_some(data);
            }
            _ => {}
        }
    }

    form.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let image_path = match form.image {
        Some(data) => {
            Some(store_upload(&state.args.server.upload_dir, image_name.as_deref(), data).await?)
        }
        None => None,
    };

    info!(has_image = image_path.is_some(), "diagnosis submitted");

    let result = state
        .service
        .submit(SymptomRequest::new(image_path.clone(), form.symptoms))
        .await;

    match result {
        Ok(record) => Ok(Response::OK(SubmitDiagnosisResponse { data: record })),
        Err(e) => {
            if let Some(path) = image_path {
                discard_upload(&path).await;
            }
            Err(ApiError::from(e))
        }
    }
}
