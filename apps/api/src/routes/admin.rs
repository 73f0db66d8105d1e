use anyhow::Context;
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::submission::Submission;
use crate::state::AppState;

pub const CSV_FILENAME: &str = "user_data.csv";
const CSV_HEADER: [&str; 6] = ["ID", "Name", "Email", "Contact", "Score", "Date"];

#[derive(Serialize)]
pub struct SubmissionListResponse {
    pub count: usize,
    pub submissions: Vec<Submission>,
}

/// GET /api/v1/admin/submissions
pub async fn handle_list_submissions(
    State(state): State<AppState>,
) -> Result<Json<SubmissionListResponse>, AppError> {
    let submissions = state.store.fetch_all().await?;
    Ok(Json(SubmissionListResponse {
        count: submissions.len(),
        submissions,
    }))
}

/// GET /api/v1/admin/submissions/export
pub async fn handle_export_csv(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let submissions = state.store.fetch_all().await?;
    let body = submissions_csv(&submissions)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_FILENAME}\""),
            ),
        ],
        body,
    ))
}

/// One header row, then one row per submission in the order given.
pub fn submissions_csv(submissions: &[Submission]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for s in submissions {
        writer.write_record([
            s.id.to_string(),
            s.name.clone(),
            s.email.clone(),
            s.contact.clone(),
            s.score.to_string(),
            s.date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output was not UTF-8")
}
