//! Integration tests for parsing, formatting, and linting JSON through the
//! top-level `stratify` surface.

use stratify::{format, lint, parse, DiagnosticCode, Language, Options, Registry, Severity};

#[test]
fn round_trips_a_nested_document_with_canonical_indentation() {
    let source = br#"{"name":"demo","tags":["a","b"],"count":3}"#;
    let result = parse(Language::Json, source, Options::default());
    assert!(result.diagnostics().is_empty());

    let registry = Registry::with_defaults();
    let formatted = format(&result, &registry).expect("clean parse formats");
    let formatted = String::from_utf8(formatted).expect("valid utf8");
    assert_eq!(
        formatted,
        "{\n    \"name\": \"demo\",\n    \"tags\": [\n        \"a\",\n        \"b\"\n    ],\n    \"count\": 3\n}"
    );
}

#[test]
fn rejects_trailing_commas_by_default() {
    let result = parse(Language::Json, br#"{"a": 1,}"#, Options::default());
    assert!(result
        .diagnostics()
        .iter()
        .any(|d| d.code == DiagnosticCode::TrailingComma));
}

#[test]
fn allows_trailing_commas_when_opted_in() {
    let options = Options {
        allow_trailing_commas: true,
        ..Options::default()
    };
    let result = parse(Language::Json, br#"{"a": 1,}"#, options);
    assert!(result
        .diagnostics()
        .iter()
        .all(|d| d.code != DiagnosticCode::TrailingComma));
}

#[test]
fn unterminated_string_is_recovered_and_reported() {
    let result = parse(Language::Json, br#"{"a": "unterminated}"#, Options::default());
    assert!(result
        .diagnostics()
        .iter()
        .any(|d| d.severity == Severity::Error));
    // recovery produces a usable (if partial) tree rather than aborting.
    assert!(result.ast().root().is_some());
}

#[test]
fn lint_surfaces_duplicate_keys_in_nested_objects_independently() {
    let result = parse(
        Language::Json,
        br#"{"a": 1, "a": 2, "nested": {"b": 1, "b": 2}}"#,
        Options::default(),
    );
    let registry = Registry::with_defaults();
    let diagnostics = lint(&result, &registry);
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics
        .iter()
        .all(|d| d.code == DiagnosticCode::DuplicateKey));
}

#[test]
fn empty_input_is_reported_as_structural() {
    let result = parse(Language::Json, b"", Options::default());
    assert!(result
        .diagnostics()
        .iter()
        .any(|d| d.code == DiagnosticCode::EmptyInput));
}

#[test]
fn deeply_nested_arrays_hit_the_max_depth_guard() {
    let mut source = Vec::new();
    for _ in 0..200 {
        source.extend_from_slice(b"[");
    }
    for _ in 0..200 {
        source.extend_from_slice(b"]");
    }
    let result = parse(Language::Json, &source, Options::default());
    assert!(result
        .diagnostics()
        .iter()
        .any(|d| d.code == DiagnosticCode::MaxDepthExceeded));
}
