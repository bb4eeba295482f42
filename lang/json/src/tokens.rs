//! `ToTokens` for the JSON subset of the shared AST.
//!
//! The arena (`stratify_core::ast::Ast`) carries no language tag, so printing
//! needs a thin per-node view pairing a `NodeId` with the `Ast`/source it
//! came from — [`JsonNode`]. Composite nodes print through [`JsonPrinter`]'s
//! structural tokens; leaves are written straight from the source slice
//! (numbers, booleans, `null`) or re-escaped from the decoded value
//! (strings).

use std::borrow::Cow;

use stratify_core::ast::{Ast, NodeId, NodeKind, StringValue};
use stratify_core::traits::ToTokens;

use crate::printer::{JsonPrinter, JsonToken};

/// A view of one JSON-shaped AST node, borrowed just long enough to print it.
#[derive(Clone, Copy)]
pub struct JsonNode<'a> {
    pub ast: &'a Ast,
    pub id: NodeId,
    pub source: &'a [u8],
}

impl<'a> JsonNode<'a> {
    pub fn new(ast: &'a Ast, id: NodeId, source: &'a [u8]) -> Self {
        Self { ast, id, source }
    }

    fn child(&self, id: NodeId) -> Self {
        Self {
            ast: self.ast,
            id,
            source: self.source,
        }
    }

    fn raw(&self) -> &'a str {
        let span = self.ast.get(self.id).span;
        core::str::from_utf8(&self.source[span.start_u32() as usize..span.end_u32() as usize]).unwrap_or("")
    }

    fn decode(&self, value: &StringValue) -> Cow<'a, str> {
        match value {
            StringValue::Borrowed(span) => {
                String::from_utf8_lossy(&self.source[span.start_u32() as usize..span.end_u32() as usize])
            }
            StringValue::Owned(s) => Cow::Owned(s.clone()),
        }
    }
}

impl ToTokens for JsonNode<'_> {
    type Printer = JsonPrinter;

    fn write(&self, p: &mut Self::Printer) {
        match &self.ast.get(self.id).kind {
            NodeKind::Root { value } => self.child(*value).write(p),
            NodeKind::Object { properties } => {
                if properties.is_empty() {
                    p.word("{}");
                    return;
                }
                p.open_block(&JsonToken::ObjectOpen);
                p.write_separated(properties.iter().map(|id| self.child(*id)), &JsonToken::Comma, false, true);
                p.close_block(&JsonToken::ObjectClose);
            }
            NodeKind::Array { elements } => {
                if elements.is_empty() {
                    p.word("[]");
                    return;
                }
                p.open_block(&JsonToken::ArrayOpen);
                p.write_separated(elements.iter().map(|id| self.child(*id)), &JsonToken::Comma, false, true);
                p.close_block(&JsonToken::ArrayClose);
            }
            NodeKind::Property { key, value } => {
                self.child(*key).write(p);
                p.token(&JsonToken::Colon);
                p.space();
                self.child(*value).write(p);
            }
            NodeKind::String { value } => write_escaped(p, &self.decode(value)),
            NodeKind::Number { .. } | NodeKind::Boolean { .. } | NodeKind::Null => p.word(self.raw()),
            NodeKind::Err { partial: Some(inner), .. } => self.child(*inner).write(p),
            NodeKind::Err { .. } => {}
            // Unreachable for a well-formed JSON parse; ZON-only shapes.
            NodeKind::Field { .. } | NodeKind::Identifier => p.word(self.raw()),
        }
    }
}

fn write_escaped(p: &mut JsonPrinter, content: &str) {
    p.char('"');
    for c in content.chars() {
        match c {
            '"' => p.word("\\\""),
            '\\' => p.word("\\\\"),
            '\n' => p.word("\\n"),
            '\r' => p.word("\\r"),
            '\t' => p.word("\\t"),
            c if (c as u32) < 0x20 => {
                p.word(&format!("\\u{:04x}", c as u32));
            }
            c => p.char(c),
        }
    }
    p.char('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratify_core::config::ParseConfig;
    use stratify_core::lexer::Language;
    use stratify_core::parser;

    fn formatted(source: &[u8]) -> String {
        let output = parser::parse(Language::Json, source, ParseConfig::default());
        let root = output.ast.root().expect("non-empty parse has a root");
        JsonNode::new(&output.ast, root, source).to_string_formatted()
    }

    #[test]
    fn reindents_a_compact_object() {
        let out = formatted(br#"{"a":1,"b":[2,3]}"#);
        assert_eq!(out, "{\n    \"a\": 1,\n    \"b\": [\n        2,\n        3\n    ]\n}");
    }

    #[test]
    fn empty_containers_stay_on_one_line() {
        assert_eq!(formatted(b"{}"), "{}");
        assert_eq!(formatted(b"[]"), "[]");
    }

    #[test]
    fn re_escapes_a_decoded_string() {
        let out = formatted(br#""a\tb""#);
        assert_eq!(out, "\"a\\tb\"");
    }
}
