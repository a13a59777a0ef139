//! Batch normalization against the recorded comment fixtures.
//!
//! `fixtures/comments.json` mixes all three field namings with the failure
//! cases seen in stored data.

use site_content::comment::{AUTHOR_NAME, CommentError, normalize_batch};
use std::path::Path;

fn load_fixture() -> Vec<serde_json::Value> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/comments.json");
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn fixture_batch_accepts_all_variants() {
    let report = normalize_batch(&load_fixture());
    let authors: Vec<&str> = report.comments.iter().map(|c| c.author_name()).collect();
    assert_eq!(authors, vec!["Jun", "Jun", "Mei", "Lin", "Kai"]);
    assert_eq!(report.comments[0], report.comments[1]);
}

#[test]
fn fixture_batch_reports_each_failure_kind() {
    let report = normalize_batch(&load_fixture());
    let indexes: Vec<usize> = report.rejected.iter().map(|r| r.index).collect();
    assert_eq!(indexes, vec![3, 4, 5, 7]);
    assert_eq!(report.total(), 9);

    let not_a_date = CommentError::InvalidTimestamp {
        value: Some("not-a-date".to_string()),
    };
    let blank_author = CommentError::EmptyField { field: AUTHOR_NAME };
    let missing = CommentError::InvalidTimestamp { value: None };
    assert_eq!(report.rejected[0].error, CommentError::SchemaMismatch);
    assert_eq!(report.rejected[1].error, not_a_date);
    assert_eq!(report.rejected[2].error, blank_author);
    assert_eq!(report.rejected[3].error, missing);
}

#[test]
fn fixture_form_timestamps_are_accepted() {
    let report = normalize_batch(&load_fixture());
    let minute = report
        .comments
        .iter()
        .find(|c| c.author_name() == "Kai")
        .unwrap();
    assert_eq!(minute.timestamp(), "2024-04-02T09:15");
    assert_eq!(minute.posted_at().to_rfc3339(), "2024-04-02T09:15:00+00:00");
}

#[test]
fn fixture_batch_is_reproducible() {
    let records = load_fixture();
    let first = normalize_batch(&records);
    let second = normalize_batch(&records);
    assert_eq!(first.comments, second.comments);
    assert_eq!(first.rejected, second.rejected);
}

#[test]
fn fixture_comments_serialize_canonically() {
    let report = normalize_batch(&load_fixture());
    let json = serde_json::to_value(&report.comments).unwrap();
    let lin = &json[3];
    assert_eq!(lin["authorName"], "Lin");
    assert_eq!(lin["bodyText"], "有帮助，谢谢");
    assert_eq!(lin["timestamp"], "2024-03-10T21:30:00+08:00");
    assert!(lin.get("postSlug").is_none());
    assert!(lin.get("name").is_none());
}
