//! Text projections of a candidate's response set.
//!
//! Pure functions, no filtering: the model blob and the markdown wrapper are
//! both deterministic given identical input ordering.

use crate::models::response::ResponseSet;

/// Fixed document title prepended to every generated report.
pub const REPORT_TITLE: &str = "# Interview Feedback Report";

/// Serializes the response set into the text blob sent to the model:
/// a `User:` line, then one `- <sheet_id>: <json>` line per response,
/// in source-then-record order.
pub fn format_for_model(data: &ResponseSet) -> String {
    let mut lines = Vec::new();
    for sheet in &data.sheets {
        for response in &sheet.responses {
            let serialized =
                serde_json::to_string(response).unwrap_or_else(|_| "{}".to_string());
            lines.push(format!("- {}: {}", sheet.sheet_id, serialized));
        }
    }
    format!("User: {}\nResponses:\n{}", data.email, lines.join("\n"))
}

/// Wraps raw model output as a titled markdown document. The model already
/// emits markdown; this only prepends the fixed title.
pub fn wrap_as_markdown(report_text: &str) -> String {
    format!("{REPORT_TITLE}\n\n{report_text}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::response::{CandidateResponse, SheetResponses};

    fn sample_set() -> ResponseSet {
        let responses = vec![CandidateResponse {
            timestamp: "2024-01-01 10:00".to_string(),
            email: "a@x.com".to_string(),
            responses: [(
                "Q1".to_string(),
                serde_json::Value::String("yes".to_string()),
            )]
            .into_iter()
            .collect(),
        }];
        ResponseSet {
            email: "a@x.com".to_string(),
            sheets: vec![SheetResponses {
                sheet_id: "sheet-a".to_string(),
                responses,
            }],
        }
    }

    #[test]
    fn test_format_shape() {
        let blob = format_for_model(&sample_set());
        assert!(blob.starts_with("User: a@x.com\nResponses:\n"));
        assert!(blob.contains("- sheet-a: {"));
        assert!(blob.contains("\"Q1\":\"yes\""));
    }

    #[test]
    fn test_format_is_deterministic() {
        let set = sample_set();
        let first = format_for_model(&set);
        let second = format_for_model(&set);
        assert_eq!(first, second, "repeated calls must be byte-identical");
    }

    #[test]
    fn test_empty_set_still_has_header_lines() {
        let set = ResponseSet {
            email: "a@x.com".to_string(),
            sheets: Vec::new(),
        };
        assert_eq!(format_for_model(&set), "User: a@x.com\nResponses:\n");
    }

    #[test]
    fn test_wrap_as_markdown_prepends_title() {
        let md = wrap_as_markdown("## Section 1\nGood job.");
        assert!(md.starts_with("# Interview Feedback Report\n\n## Section 1"));
    }
}
