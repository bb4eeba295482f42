//! Integration tests for the `edit` surface: incremental rescans that stay
//! cheap, and the full-reparse fallback for edits the rescan can't handle.

use stratify::{edit, parse, DiagnosticCode, Edit, Language, Options};
use stratify_core::PackedSpan;

#[test]
fn replacing_a_number_rescans_without_falling_back() {
    let result = parse(Language::Json, br#"{"a": 1, "b": 2}"#, Options::default());
    let result = edit(result, vec![Edit::new(PackedSpan::new(6, 7), b"100".to_vec())])
        .expect("in-bounds edit applies");

    assert_eq!(result.source(), &br#"{"a": 100, "b": 2}"#[..]);
    assert!(!result
        .diagnostics()
        .iter()
        .any(|d| d.code == DiagnosticCode::FellBackToFullReparse));
}

#[test]
fn deleting_a_closing_brace_falls_back_to_full_reparse() {
    let result = parse(Language::Json, br#"{"a": 1}"#, Options::default());
    let result =
        edit(result, vec![Edit::new(PackedSpan::new(7, 8), Vec::new())]).expect("edit applies");

    assert!(result
        .diagnostics()
        .iter()
        .any(|d| d.code == DiagnosticCode::FellBackToFullReparse));
}

#[test]
fn out_of_bounds_edit_is_rejected() {
    let result = parse(Language::Json, b"{}", Options::default());
    let err = edit(result, vec![Edit::new(PackedSpan::new(0, 10), Vec::new())])
        .expect_err("edit range exceeds source length");
    assert!(matches!(err, stratify::Error::EditOutOfBounds { .. }));
}

#[test]
fn edits_can_be_applied_in_sequence() {
    let result = parse(Language::Json, br#"{"a": 1}"#, Options::default());
    let result = edit(result, vec![Edit::new(PackedSpan::new(6, 7), b"2".to_vec())])
        .expect("first edit applies");
    let result = edit(result, vec![Edit::new(PackedSpan::new(6, 7), b"3".to_vec())])
        .expect("second edit applies");
    assert_eq!(result.source(), &br#"{"a": 3}"#[..]);
}
