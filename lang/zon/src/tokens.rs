//! `ToTokens` for the ZON subset of the shared AST.
//!
//! ZON only has one bracket pair (`.{ ... }`), used for both anonymous tuple
//! literals (`Array`) and structs (`Object` with `Field` children) — the
//! same ambiguity the parser resolves by peeking for a `.field` name (see
//! `stratify_core::parser::reparse_as_object`). Printing re-synthesizes
//! whichever shape the AST settled on; it does not need to remember which
//! bracket the source actually used.

use std::borrow::Cow;

use stratify_core::ast::{Ast, NodeId, NodeKind, StringValue};
use stratify_core::traits::ToTokens;

use crate::printer::{ZonPrinter, ZonToken};

/// A view of one ZON-shaped AST node, borrowed just long enough to print it.
#[derive(Clone, Copy)]
pub struct ZonNode<'a> {
    pub ast: &'a Ast,
    pub id: NodeId,
    pub source: &'a [u8],
}

impl<'a> ZonNode<'a> {
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

impl ToTokens for ZonNode<'_> {
    type Printer = ZonPrinter;

    fn write(&self, p: &mut Self::Printer) {
        match &self.ast.get(self.id).kind {
            NodeKind::Root { value } => self.child(*value).write(p),
            NodeKind::Object { properties } => {
                if properties.is_empty() {
                    p.word(".{}");
                    return;
                }
                p.open_block(&ZonToken::StructOpen);
                p.write_separated(properties.iter().map(|id| self.child(*id)), &ZonToken::Comma, false, true);
                p.close_block(&ZonToken::StructClose);
            }
            NodeKind::Array { elements } => {
                if elements.is_empty() {
                    p.word(".{}");
                    return;
                }
                p.open_block(&ZonToken::StructOpen);
                p.write_separated(elements.iter().map(|id| self.child(*id)), &ZonToken::Comma, false, true);
                p.close_block(&ZonToken::StructClose);
            }
            NodeKind::Field { name, value } => {
                self.child(*name).write(p);
                p.token(&ZonToken::Equals);
                self.child(*value).write(p);
            }
            NodeKind::String { value } => write_escaped(p, &self.decode(value)),
            NodeKind::Number { .. } | NodeKind::Boolean { .. } | NodeKind::Null | NodeKind::Identifier => {
                p.word(self.raw())
            }
            NodeKind::Err { partial: Some(inner), .. } => self.child(*inner).write(p),
            NodeKind::Err { .. } => {}
            // JSON-only shape; unreachable for a well-formed ZON parse.
            NodeKind::Property { key, value } => {
                self.child(*key).write(p);
                p.word(": ");
                self.child(*value).write(p);
            }
        }
    }
}

fn write_escaped(p: &mut ZonPrinter, content: &str) {
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
        let output = parser::parse(Language::Zon, source, ParseConfig::default());
        let root = output.ast.root().expect("non-empty parse has a root");
        ZonNode::new(&output.ast, root, source).to_string_formatted()
    }

    #[test]
    fn reindents_a_struct_literal() {
        let out = formatted(br#".{ .name = "zz", .version = "1.0" }"#);
        assert_eq!(out, ".{\n    .name = \"zz\",\n    .version = \"1.0\"\n}");
    }

    #[test]
    fn reindents_an_anonymous_tuple_literal() {
        let out = formatted(b".{ 1, 2, 3 }");
        assert_eq!(out, ".{\n    1,\n    2,\n    3\n}");
    }

    #[test]
    fn preserves_import_and_enum_literal_identifiers() {
        assert_eq!(formatted(b"@import"), "@import");
        assert_eq!(formatted(b".Foo"), ".Foo");
    }
}
