use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Constructed once at startup and passed into each collaborator that needs
/// it; there is no global configuration singleton.
#[derive(Debug, Clone)]
pub struct Config {
    pub deepseek_api_key: String,
    /// Spreadsheet ids queried for survey responses, in configured order.
    pub sheet_ids: Vec<String>,
    /// Already-resolved OAuth bearer token for the Sheets API. Token minting
    /// and refresh are the deployment environment's job.
    pub google_sheets_token: String,
    /// Directory the report PDFs are written to.
    pub reports_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let sheet_ids: Vec<String> = require_env("SHEET_IDS")?
            .split(',')
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        if sheet_ids.is_empty() {
            bail!("SHEET_IDS must contain at least one spreadsheet id");
        }

        Ok(Config {
            deepseek_api_key: require_env("DEEPSEEK_API_KEY")?,
            sheet_ids,
            google_sheets_token: require_env("GOOGLE_SHEETS_TOKEN")?,
            reports_dir: std::env::var("REPORTS_DIR")
                .unwrap_or_else(|_| "reports".to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
