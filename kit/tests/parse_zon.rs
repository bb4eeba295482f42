//! Integration tests for parsing and formatting ZON through the top-level
//! `stratify` surface, including the struct/tuple-literal ambiguity that
//! ZON's single `.{ ... }` bracket pair resolves at parse time.

use stratify::{format, lint, parse, DiagnosticCode, Language, Options, Registry};

#[test]
fn struct_literal_round_trips_with_canonical_spacing() {
    let source = br#".{ .name = "zz", .version = "1.0" }"#;
    let result = parse(Language::Zon, source, Options::for_language(Language::Zon));
    assert!(result.diagnostics().is_empty());

    let registry = Registry::with_defaults();
    let formatted = format(&result, &registry).expect("clean parse formats");
    assert_eq!(
        String::from_utf8(formatted).expect("valid utf8"),
        ".{\n    .name = \"zz\",\n    .version = \"1.0\"\n}"
    );
}

#[test]
fn anonymous_tuple_literal_round_trips() {
    let source = br#".{1, 2, 3}"#;
    let result = parse(Language::Zon, source, Options::for_language(Language::Zon));
    assert!(result.diagnostics().is_empty());

    let registry = Registry::with_defaults();
    let formatted = format(&result, &registry).expect("clean parse formats");
    assert_eq!(
        String::from_utf8(formatted).expect("valid utf8"),
        ".{\n    1,\n    2,\n    3\n}"
    );
}

#[test]
fn trailing_commas_are_allowed_by_default_for_zon() {
    let result = parse(
        Language::Zon,
        br#".{ .a = 1, }"#,
        Options::for_language(Language::Zon),
    );
    assert!(result
        .diagnostics()
        .iter()
        .all(|d| d.code != DiagnosticCode::TrailingComma));
}

#[test]
fn lint_flags_a_duplicate_field_name() {
    let result = parse(
        Language::Zon,
        br#".{ .a = 1, .a = 2 }"#,
        Options::for_language(Language::Zon),
    );
    let registry = Registry::with_defaults();
    let diagnostics = lint(&result, &registry);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::DuplicateKey);
}
