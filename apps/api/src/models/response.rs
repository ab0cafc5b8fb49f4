use serde::Serialize;

/// A single spreadsheet row keyed by its deduplicated header.
///
/// Keys are unique even when the source header row had duplicates (see
/// `sheets::headers`). The map preserves insertion order so that serialized
/// output is byte-stable across calls with identical input.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// One survey submission after identity filtering: the identity and
/// timestamp columns are pulled out, everything else stays in `responses`.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateResponse {
    pub timestamp: String,
    pub email: String,
    pub responses: Record,
}

/// All matching responses from a single spreadsheet source, in row order.
#[derive(Debug, Clone, Serialize)]
pub struct SheetResponses {
    pub sheet_id: String,
    pub responses: Vec<CandidateResponse>,
}

/// Everything we know about one candidate across all configured sources.
/// Built once per report request and consumed by the formatter; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseSet {
    pub email: String,
    pub sheets: Vec<SheetResponses>,
}

impl ResponseSet {
    /// True when no source produced a single matching response.
    pub fn is_empty(&self) -> bool {
        self.sheets.iter().all(|s| s.responses.is_empty())
    }
}
