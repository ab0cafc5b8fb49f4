//! Spreadsheet source adapter.
//!
//! The pipeline only ever sees a flat grid of strings (first row = headers),
//! fetched read-only by spreadsheet id. `SheetSource` is the seam: the real
//! backend is the Google Sheets v4 values API, tests plug in stubs.

pub mod headers;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::response::Record;
use self::headers::dedup_headers;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
/// Widest range we ever read; the values API trims trailing empty columns.
const VALUES_RANGE: &str = "A:ZZ";

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed credentials: {0}")]
    Credentials(String),
}

/// Read-only access to one spreadsheet's first worksheet.
///
/// Carried in `AppState` as `Arc<dyn SheetSource>` so the pipeline can be
/// exercised without network access.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Returns the raw value grid: first row headers, remaining rows cells.
    async fn fetch_rows(&self, sheet_id: &str) -> Result<Vec<Vec<String>>, SheetsError>;
}

/// Google Sheets v4 backend. Requires an already-resolved OAuth bearer token;
/// credential loading and refresh belong to the deployment environment, not
/// this service.
pub struct GoogleSheetsSource {
    client: reqwest::Client,
    token: String,
}

impl GoogleSheetsSource {
    /// Fails fast on a blank or whitespace-containing token. No repair
    /// heuristics: a malformed credential is rejected outright.
    pub fn new(token: String) -> Result<Self, SheetsError> {
        let token = token.trim().to_string();
        if token.is_empty() {
            return Err(SheetsError::Credentials(
                "GOOGLE_SHEETS_TOKEN is empty".to_string(),
            ));
        }
        if token.chars().any(char::is_whitespace) {
            return Err(SheetsError::Credentials(
                "GOOGLE_SHEETS_TOKEN contains whitespace".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            token,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[async_trait]
impl SheetSource for GoogleSheetsSource {
    async fn fetch_rows(&self, sheet_id: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = format!("{SHEETS_API_BASE}/{sheet_id}/values/{VALUES_RANGE}");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let range: ValueRange = response.json().await?;
        debug!(sheet_id, rows = range.values.len(), "fetched sheet values");

        // The values API may type cells (numbers, bools); flatten to strings.
        Ok(range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }
}

fn cell_to_string(cell: serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Converts a raw value grid into records keyed by deduplicated headers.
///
/// Ragged rows are zipped to the header row: excess cells are dropped,
/// short rows simply produce records with fewer fields.
pub fn records(rows: Vec<Vec<String>>) -> Vec<Record> {
    let Some((header_row, data)) = rows.split_first() else {
        return Vec::new();
    };
    let unique = dedup_headers(header_row);

    data.iter()
        .map(|row| {
            unique
                .iter()
                .zip(row.iter())
                .map(|(key, cell)| (key.clone(), serde_json::Value::String(cell.clone())))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_records_zip_headers_to_cells() {
        let recs = records(grid(&[
            &["Timestamp", "Email Address", "Q1"],
            &["2024-01-01", "a@x.com", "yes"],
        ]));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0]["Q1"], "yes");
        assert_eq!(recs[0]["Email Address"], "a@x.com");
    }

    #[test]
    fn test_records_duplicate_headers_become_unique_keys() {
        let recs = records(grid(&[&["Q", "Q"], &["first", "second"]]));
        assert_eq!(recs[0]["Q"], "first");
        assert_eq!(recs[0]["Q_1"], "second");
    }

    #[test]
    fn test_records_ragged_rows() {
        let recs = records(grid(&[
            &["A", "B"],
            &["only-a"],
            &["a", "b", "excess-dropped"],
        ]));
        assert_eq!(recs[0].len(), 1);
        assert_eq!(recs[1].len(), 2);
        assert!(!recs[1].values().any(|v| v.as_str() == Some("excess-dropped")));
    }

    #[test]
    fn test_records_empty_grid() {
        assert!(records(Vec::new()).is_empty());
        assert!(records(grid(&[&["A", "B"]])).is_empty());
    }

    #[test]
    fn test_google_source_rejects_blank_token() {
        assert!(matches!(
            GoogleSheetsSource::new("   ".to_string()),
            Err(SheetsError::Credentials(_))
        ));
    }

    #[test]
    fn test_google_source_rejects_token_with_whitespace() {
        assert!(matches!(
            GoogleSheetsSource::new("ya29.abc def".to_string()),
            Err(SheetsError::Credentials(_))
        ));
    }

    #[test]
    fn test_google_source_accepts_plain_token() {
        assert!(GoogleSheetsSource::new("ya29.token-value".to_string()).is_ok());
    }
}
