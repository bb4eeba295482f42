#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
//! The external surface over [`stratify_core`]: `parse`/`format`/`lint`/
//! `edit`, plus a [`registry::Registry`] that dispatches each of those to
//! the right `lang/*` component.

mod options;
mod registry;
mod result;

pub use options::Options;
pub use registry::{Language, LanguageComponent, Registry};
pub use result::ParseResult;
pub use stratify_core::diagnostics::{Diagnostic, DiagnosticCode, Severity};
pub use stratify_core::incremental::Edit;
pub use stratify_core::Error;

/// Parses `source` as `language`, returning the AST, diagnostics, and fact
/// store reachable through the result.
pub fn parse(language: Language, source: &[u8], options: Options) -> ParseResult {
    ParseResult::new(language, source, options)
}

/// Applies `edits` to `result`, rescanning incrementally where possible and
/// falling back to a full reparse otherwise. Consumes and returns `result`
/// rather than handing back a distinct value, since the coordinator updates
/// its arena and fact store in place.
pub fn edit(mut result: ParseResult, edits: Vec<Edit>) -> Result<ParseResult, Error> {
    result.apply_edits(edits)?;
    Ok(result)
}

/// Lints `result`'s AST using its language's registered component. Returns
/// an empty diagnostic list if no component is registered for the
/// language — lint is additive, never a hard failure.
pub fn lint(result: &ParseResult, registry: &Registry) -> Vec<Diagnostic> {
    match registry.lookup(result.language()) {
        Some(component) => component.lint(result.ast(), result.source()),
        None => Vec::new(),
    }
}

/// Formats `result`'s AST back to source text using its language's
/// registered component.
///
/// Refuses to format (returns `None`) when any `error`-severity diagnostic
/// is present, so a formatter never silently overwrites a file that failed
/// to parse cleanly. Use [`format_lossy`] to opt into formatting anyway.
pub fn format(result: &ParseResult, registry: &Registry) -> Option<Vec<u8>> {
    if result.diagnostics().iter().any(|d| d.severity == Severity::Error) {
        return None;
    }
    format_lossy(result, registry)
}

/// Formats `result`'s AST unconditionally, even in the presence of
/// `error`-severity diagnostics. The caller has explicitly opted into lossy
/// formatting.
pub fn format_lossy(result: &ParseResult, registry: &Registry) -> Option<Vec<u8>> {
    let component = registry.lookup(result.language())?;
    Some(component.format(result.ast(), result.source()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_a_json_document() {
        let result = parse(Language::Json, br#"{"a":1,"b":[2,3]}"#, Options::default());
        assert!(result.diagnostics().is_empty());
        let registry = Registry::with_defaults();
        let formatted = format(&result, &registry).expect("clean parse formats");
        assert_eq!(
            String::from_utf8(formatted).expect("valid utf8"),
            "{\n    \"a\": 1,\n    \"b\": [\n        2,\n        3\n    ]\n}"
        );
    }

    #[test]
    fn format_refuses_when_errors_are_present_but_lossy_formats_anyway() {
        let result = parse(Language::Json, br#"{"a": }"#, Options::default());
        assert!(result.diagnostics().iter().any(|d| d.severity == Severity::Error));
        let registry = Registry::with_defaults();
        assert!(format(&result, &registry).is_none());
        assert!(format_lossy(&result, &registry).is_some());
    }

    #[test]
    fn lint_flags_a_duplicate_key() {
        let result = parse(Language::Json, br#"{"a": 1, "a": 2}"#, Options::default());
        let registry = Registry::with_defaults();
        let diagnostics = lint(&result, &registry);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::DuplicateKey);
    }

    #[test]
    fn edit_rescans_incrementally_and_keeps_formatting_consistent() {
        let result = parse(Language::Json, br#"{"a": 1, "b": 2}"#, Options::default());
        let edited = edit(
            result,
            vec![Edit::new(stratify_core::PackedSpan::new(6, 7), "100")],
        )
        .expect("in-bounds edit applies");
        assert_eq!(edited.source(), br#"{"a": 100, "b": 2}"#);
        assert!(!edited
            .diagnostics()
            .iter()
            .any(|d| d.code == DiagnosticCode::FellBackToFullReparse));
    }

    #[test]
    fn zon_struct_literals_parse_and_format() {
        let result = parse(
            Language::Zon,
            br#".{ .name = "zz", .version = "1.0" }"#,
            Options::for_language(Language::Zon),
        );
        assert!(result.diagnostics().is_empty());
        let registry = Registry::with_defaults();
        let formatted = format(&result, &registry).expect("clean parse formats");
        assert_eq!(
            String::from_utf8(formatted).expect("valid utf8"),
            ".{\n    .name = \"zz\",\n    .version = \"1.0\"\n}"
        );
    }
}
