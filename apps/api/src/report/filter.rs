//! Identity filtering of survey records.
//!
//! Selects the rows belonging to one candidate (case-insensitive email
//! match) and splits each row into identity fields vs free-form answers.

use crate::models::response::{CandidateResponse, Record};

/// Column written by Google Forms for the respondent identity.
pub const EMAIL_FIELD: &str = "Email Address";
/// Column written by Google Forms for the submission time.
pub const TIMESTAMP_FIELD: &str = "Timestamp";

/// Returns the sub-sequence of `records` whose email matches `target_email`,
/// preserving input order.
///
/// A record without an `Email Address` field is treated as non-matching,
/// never as an error. Zero matches yield an empty Vec.
///
/// `responses` excludes every key *starting with* the identity or timestamp
/// column names, so dedup-suffixed duplicates of those columns (e.g.
/// `Email Address_1`) are stripped as well.
pub fn filter_responses(records: &[Record], target_email: &str) -> Vec<CandidateResponse> {
    records
        .iter()
        .filter_map(|record| {
            let email = field_str(record, EMAIL_FIELD)?;
            if !email.eq_ignore_ascii_case(target_email) {
                return None;
            }

            let timestamp = field_str(record, TIMESTAMP_FIELD).unwrap_or_default().to_string();
            let responses: Record = record
                .iter()
                .filter(|(key, _)| {
                    !key.starts_with(TIMESTAMP_FIELD) && !key.starts_with(EMAIL_FIELD)
                })
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();

            Some(CandidateResponse {
                timestamp,
                email: email.to_string(),
                responses,
            })
        })
        .collect()
}

fn field_str<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record.get(key).and_then(|v| v.as_str())
}
