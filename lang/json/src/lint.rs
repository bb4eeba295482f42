//! JSON's semantic lint rules, applied after a successful parse.

use stratify_core::ast::{Ast, NodeId, NodeKind, StringValue};
use stratify_core::diagnostics::{Diagnostic, DiagnosticCode, Severity};
use stratify_core::span::PackedSpan;

/// Walks every object in `ast` and reports a `duplicate_key` diagnostic for
/// each key repeated within the same object, at the position of its second
/// (and later) occurrence.
pub fn lint(ast: &Ast, source: &[u8]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    if let Some(root) = ast.root() {
        walk(ast, root, source, &mut diagnostics);
    }
    diagnostics
}

fn walk(ast: &Ast, id: NodeId, source: &[u8], out: &mut Vec<Diagnostic>) {
    if let NodeKind::Object { properties } = &ast.get(id).kind {
        check_duplicate_keys(ast, properties, source, out);
    }
    for child in ast.children(id) {
        walk(ast, child, source, out);
    }
}

fn check_duplicate_keys(ast: &Ast, properties: &[NodeId], source: &[u8], out: &mut Vec<Diagnostic>) {
    let mut seen: Vec<(String, PackedSpan)> = Vec::new();
    for prop_id in properties {
        let NodeKind::Property { key, .. } = &ast.get(*prop_id).kind else {
            continue;
        };
        let NodeKind::String { value } = &ast.get(*key).kind else {
            continue;
        };
        let text = decode(value, source);
        let key_span = ast.get(*key).span;
        match seen.iter().find(|(k, _)| *k == text) {
            Some((_, first_span)) => out.push(Diagnostic::new(
                DiagnosticCode::DuplicateKey,
                format!("key `{text}` was already defined at byte {}", first_span.start_u32()),
                key_span,
                Severity::Warning,
            )),
            None => seen.push((text, key_span)),
        }
    }
}

fn decode(value: &StringValue, source: &[u8]) -> String {
    match value {
        StringValue::Borrowed(span) => {
            String::from_utf8_lossy(&source[span.start_u32() as usize..span.end_u32() as usize]).into_owned()
        }
        StringValue::Owned(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratify_core::config::ParseConfig;
    use stratify_core::lexer::Language;
    use stratify_core::parser;

    #[test]
    fn flags_a_repeated_top_level_key() {
        let source = br#"{"a": 1, "a": 2}"#;
        let output = parser::parse(Language::Json, source, ParseConfig::default());
        let diagnostics = lint(&output.ast, source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::DuplicateKey);
    }

    #[test]
    fn distinct_keys_produce_no_diagnostics() {
        let source = br#"{"a": 1, "b": 2}"#;
        let output = parser::parse(Language::Json, source, ParseConfig::default());
        assert!(lint(&output.ast, source).is_empty());
    }

    #[test]
    fn nested_objects_are_checked_independently() {
        let source = br#"{"a": {"x": 1, "x": 2}, "x": 3}"#;
        let output = parser::parse(Language::Json, source, ParseConfig::default());
        assert_eq!(lint(&output.ast, source).len(), 1);
    }
}
