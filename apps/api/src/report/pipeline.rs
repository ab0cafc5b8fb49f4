//! The report orchestrator: fetch → filter → format → model call →
//! markdown wrap → PDF render.
//!
//! One sequential pass per request, no internal retries. Fetch and model
//! failures abort the request; document assembly cannot fail except for an
//! unwritable reports directory (see `render`).

use std::path::PathBuf;

use tracing::info;

use crate::errors::AppError;
use crate::models::response::{ResponseSet, SheetResponses};
use crate::render;
use crate::report::filter::filter_responses;
use crate::report::formatter::{format_for_model, wrap_as_markdown};
use crate::sheets::{records, SheetSource};
use crate::state::AppState;

/// Everything a finished report request produces.
#[derive(Debug)]
pub struct GeneratedReport {
    pub email: String,
    /// The titled markdown body, retained for redisplay alongside the PDF.
    pub markdown: String,
    pub pdf_path: PathBuf,
}

/// Fetches and filters responses for `email` across all configured sheets,
/// in configured order. Sheets with no matching rows contribute an empty
/// sequence, not an error.
pub async fn collect_responses(
    sheets: &dyn SheetSource,
    sheet_ids: &[String],
    email: &str,
) -> Result<ResponseSet, AppError> {
    let mut set = ResponseSet {
        email: email.to_string(),
        sheets: Vec::with_capacity(sheet_ids.len()),
    };

    for sheet_id in sheet_ids {
        let rows = sheets.fetch_rows(sheet_id).await?;
        let records = records(rows);
        set.sheets.push(SheetResponses {
            sheet_id: sheet_id.clone(),
            responses: filter_responses(&records, email),
        });
    }

    Ok(set)
}

/// Runs the full pipeline for one candidate.
pub async fn generate_report(state: &AppState, email: &str) -> Result<GeneratedReport, AppError> {
    let responses =
        collect_responses(state.sheets.as_ref(), &state.config.sheet_ids, email).await?;

    if responses.is_empty() {
        return Err(AppError::NotFound(format!("No responses found for {email}")));
    }

    let blob = format_for_model(&responses);
    let report_text = state.model.generate_feedback(&blob).await?;
    let markdown = wrap_as_markdown(&report_text);

    // Rendering is CPU + filesystem bound; keep it off the async workers.
    let render_email = email.to_string();
    let render_markdown = markdown.clone();
    let reports_dir = state.config.reports_dir.clone();
    let pdf_path = tokio::task::spawn_blocking(move || {
        render::render_report(&render_email, &render_markdown, &reports_dir)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("render task panicked: {e}")))??;

    info!(email, path = %pdf_path.display(), "report generated");

    Ok(GeneratedReport {
        email: email.to_string(),
        markdown,
        pdf_path,
    })
}
