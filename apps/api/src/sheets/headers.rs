//! Header deduplication for raw spreadsheet header rows.
//!
//! Google Forms happily emits the same question text for several columns, so
//! the first row of a response sheet cannot be used as record keys as-is.
//! The rule here: the first occurrence of a header keeps its text, later
//! occurrences get an `_1`, `_2`, … suffix. If a suffixed candidate collides
//! with a name already emitted (input like `["A", "A", "A_1"]`), the counter
//! keeps bumping until the name is free.

use std::collections::{HashMap, HashSet};

/// Produces a unique name for every entry of `headers`.
///
/// Total on any input: output length always equals input length, and all
/// output names are distinct. Blank headers are treated like any other text.
pub fn dedup_headers(headers: &[String]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut unique = Vec::with_capacity(headers.len());

    for header in headers {
        let seen = counts.entry(header.clone()).or_insert(0);
        let name = if *seen == 0 && !taken.contains(header) {
            header.clone()
        } else {
            let mut n = (*seen).max(1);
            while taken.contains(&format!("{header}_{n}")) {
                n += 1;
            }
            format!("{header}_{n}")
        };
        *seen += 1;
        taken.insert(name.clone());
        unique.push(name);
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dedup(input: &[&str]) -> Vec<String> {
        let owned: Vec<String> = input.iter().map(|s| s.to_string()).collect();
        dedup_headers(&owned)
    }

    #[test]
    fn test_no_duplicates_passthrough() {
        assert_eq!(
            dedup(&["Timestamp", "Email Address", "Q1"]),
            vec!["Timestamp", "Email Address", "Q1"]
        );
    }

    #[test]
    fn test_duplicate_gets_numbered_suffix() {
        assert_eq!(dedup(&["Email", "Name", "Email"]), vec!["Email", "Name", "Email_1"]);
    }

    #[test]
    fn test_triple_duplicate_counts_up() {
        assert_eq!(dedup(&["A", "A", "A"]), vec!["A", "A_1", "A_2"]);
    }

    #[test]
    fn test_suffix_collision_keeps_bumping() {
        // "A_1" is both a literal header and the natural suffix for the
        // second "A" — every output must still be unique.
        let out = dedup(&["A", "A", "A_1"]);
        assert_eq!(out.len(), 3);
        let distinct: std::collections::HashSet<&String> = out.iter().collect();
        assert_eq!(distinct.len(), 3);
        assert_eq!(out[0], "A");
        assert_eq!(out[1], "A_1");
    }

    #[test]
    fn test_blank_headers_are_deduplicated_too() {
        assert_eq!(dedup(&["", "", "Q1"]), vec!["", "_1", "Q1"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedup(&[]).is_empty());
    }

    #[test]
    fn test_output_length_and_uniqueness_hold_for_messy_input() {
        let input = ["Q", "Q", "Q_1", "Q_2", "Q", "", "", "Q_1"];
        let out = dedup(&input);
        assert_eq!(out.len(), input.len());
        let distinct: std::collections::HashSet<&String> = out.iter().collect();
        assert_eq!(distinct.len(), input.len());
    }
}
