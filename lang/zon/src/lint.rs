//! ZON's semantic lint rules, applied after a successful parse.

use stratify_core::ast::{Ast, NodeId, NodeKind};
use stratify_core::diagnostics::{Diagnostic, DiagnosticCode, Severity};
use stratify_core::span::PackedSpan;

/// Walks every struct literal in `ast` and reports a `duplicate_key`
/// diagnostic for each `.field` repeated within the same struct, at the
/// position of its second (and later) occurrence.
pub fn lint(ast: &Ast, source: &[u8]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    if let Some(root) = ast.root() {
        walk(ast, root, source, &mut diagnostics);
    }
    diagnostics
}

fn walk(ast: &Ast, id: NodeId, source: &[u8], out: &mut Vec<Diagnostic>) {
    if let NodeKind::Object { properties } = &ast.get(id).kind {
        check_duplicate_fields(ast, properties, source, out);
    }
    for child in ast.children(id) {
        walk(ast, child, source, out);
    }
}

fn check_duplicate_fields(ast: &Ast, properties: &[NodeId], source: &[u8], out: &mut Vec<Diagnostic>) {
    let mut seen: Vec<(&[u8], PackedSpan)> = Vec::new();
    for field_id in properties {
        let NodeKind::Field { name, .. } = &ast.get(*field_id).kind else {
            continue;
        };
        let name_span = ast.get(*name).span;
        let text = &source[name_span.start_u32() as usize..name_span.end_u32() as usize];
        match seen.iter().find(|(k, _)| *k == text) {
            Some((_, first_span)) => out.push(Diagnostic::new(
                DiagnosticCode::DuplicateKey,
                format!(
                    "field `{}` was already defined at byte {}",
                    String::from_utf8_lossy(text),
                    first_span.start_u32()
                ),
                name_span,
                Severity::Warning,
            )),
            None => seen.push((text, name_span)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratify_core::config::ParseConfig;
    use stratify_core::lexer::Language;
    use stratify_core::parser;

    #[test]
    fn flags_a_repeated_field() {
        let source = br#".{ .name = "a", .name = "b" }"#;
        let output = parser::parse(Language::Zon, source, ParseConfig::default());
        let diagnostics = lint(&output.ast, source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::DuplicateKey);
    }

    #[test]
    fn distinct_fields_produce_no_diagnostics() {
        let source = br#".{ .name = "a", .version = "1.0" }"#;
        let output = parser::parse(Language::Zon, source, ParseConfig::default());
        assert!(lint(&output.ast, source).is_empty());
    }
}
