//! Axum route handlers for the Report API.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::render::sanitize_identity;
use crate::report::pipeline::generate_report;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateReportRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateReportResponse {
    pub email: String,
    pub pdf_path: String,
    /// The markdown body, so clients can preview without fetching the PDF.
    pub markdown: String,
    pub generated_at: DateTime<Utc>,
}

/// POST /api/v1/reports
///
/// Runs the full pipeline for one candidate email and returns the artifact
/// path plus the markdown preview.
pub async fn handle_generate_report(
    State(state): State<AppState>,
    Json(request): Json<GenerateReportRequest>,
) -> Result<Json<GenerateReportResponse>, AppError> {
    let email = request.email.trim();
    if email.is_empty() {
        return Err(AppError::Validation("email cannot be empty".to_string()));
    }

    let report = generate_report(&state, email).await?;

    Ok(Json(GenerateReportResponse {
        email: report.email,
        pdf_path: report.pdf_path.display().to_string(),
        markdown: report.markdown,
        generated_at: Utc::now(),
    }))
}

/// GET /api/v1/reports/:email
///
/// Serves the most recently rendered PDF for this identity, 404 if none.
pub async fn handle_download_report(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Response, AppError> {
    let filename = format!("{}_report.pdf", sanitize_identity(&email));
    let path = state.config.reports_dir.join(&filename);

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| AppError::NotFound(format!("No report found for {email}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
