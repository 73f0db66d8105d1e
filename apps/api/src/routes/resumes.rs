use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;

use crate::errors::AppError;
use crate::pipeline::{analyse_upload, AnalysisReport};
use crate::state::AppState;

/// Multipart field carrying the document.
pub const UPLOAD_FIELD: &str = "resume";

/// POST /api/v1/resumes
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let (filename, bytes) = read_upload(&mut multipart).await?;
    let report = analyse_upload(
        &state.store,
        state.extractor.as_ref(),
        &state.catalog,
        &filename,
        bytes,
    )
    .await?;
    Ok(Json(report))
}

/// First `resume` file field; other fields are skipped.
async fn read_upload(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {}", e.body_text())))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("The 'resume' field must be a file".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {}", e.body_text())))?;
        return Ok((filename, bytes));
    }
    Err(AppError::Validation(format!(
        "Missing '{UPLOAD_FIELD}' file field"
    )))
}
