//! Hand-written recursive-descent parser driven directly by the [`Lexer`]
//! iterator. Node construction matches a direct-match-on-token style rather
//! than the generic `Parse`-trait dispatch in [`crate::traits`] because
//! error recovery needs to catch a bad token, synthesize an `err` node, and
//! keep going — something a `?`-propagating trait can't express.

use crate::ast::{Ast, Node, NodeId, NodeKind, StringValue};
use crate::config::{ParseConfig, RecursionGuard};
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::lexer::{Language, Lexer};
use crate::span::PackedSpan;
use crate::token::{Token, TokenKind};

/// Result of a single [`parse`] call: the arena-owned AST and every
/// diagnostic recorded while building it. `diagnostics.len() > 0` iff an
/// `err` node exists or a recovery occurred.
#[derive(Debug)]
pub struct ParseOutput {
    pub ast: Ast,
    pub diagnostics: Vec<Diagnostic>,
}

struct Parser {
    lexer: Lexer,
    ast: Ast,
    diagnostics: Vec<Diagnostic>,
    depth: RecursionGuard,
    config: ParseConfig,
    lookahead: Option<Token>,
    last_span: PackedSpan,
}

/// Parses `source` in `language`, always returning an AST (possibly holding
/// `err` nodes) plus accumulated diagnostics. Never panics; never returns an
/// `Err` for recoverable input.
pub fn parse(language: Language, source: &[u8], config: ParseConfig) -> ParseOutput {
    let mut parser = Parser {
        lexer: Lexer::from_source(language, source),
        ast: Ast::new(),
        diagnostics: Vec::new(),
        depth: RecursionGuard::new(),
        config,
        lookahead: None,
        last_span: PackedSpan::EMPTY,
    };
    parser.run()
}

impl Parser {
    fn run(mut self) -> ParseOutput {
        if self.peek().map(|t| t.kind) == Some(TokenKind::Eof) {
            self.diagnostics.push(Diagnostic::error(
                DiagnosticCode::EmptyInput,
                "input contains no value",
                PackedSpan::point(0),
            ));
            let root = self.ast.push(Node {
                span: PackedSpan::EMPTY,
                kind: NodeKind::Err {
                    message: "empty input".into(),
                    partial: None,
                },
            });
            let wrapped = self.wrap_root(root);
            self.ast.set_root(wrapped);
            return ParseOutput {
                ast: self.ast,
                diagnostics: self.diagnostics,
            };
        }

        let value = self.parse_value();
        let root = self.wrap_root(value);
        self.ast.set_root(root);

        if self.peek().map(|t| t.kind) != Some(TokenKind::Eof) {
            let span = self.peek().map(|t| t.span).unwrap_or(self.last_span);
            self.diagnostics.push(Diagnostic::error(
                DiagnosticCode::UnexpectedToken,
                "unexpected trailing content after the root value",
                span,
            ));
            while self.peek().map(|t| t.kind) != Some(TokenKind::Eof) {
                self.advance();
            }
        }

        ParseOutput {
            ast: self.ast,
            diagnostics: self.diagnostics,
        }
    }

    fn wrap_root(&mut self, value: NodeId) -> NodeId {
        let span = self.ast.get(value).span;
        self.ast.push(Node {
            span,
            kind: NodeKind::Root { value },
        })
    }

    fn peek(&mut self) -> Option<Token> {
        if self.lookahead.is_none() {
            self.lookahead = self.lexer.next();
        }
        self.lookahead
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = match self.lookahead.take() {
            Some(t) => Some(t),
            None => self.lexer.next(),
        };
        if let Some(t) = tok {
            self.last_span = t.span;
        }
        tok
    }

    fn push_err(&mut self, span: PackedSpan, message: impl Into<String>) -> NodeId {
        self.ast.push(Node {
            span,
            kind: NodeKind::Err {
                message: message.into(),
                partial: None,
            },
        })
    }

    /// Parses a single value, dispatching on the current token's kind.
    fn parse_value(&mut self) -> NodeId {
        if self.depth.enter(self.config.max_recursion_depth).is_err() {
            self.depth.exit();
            let span = self.peek().map(|t| t.span).unwrap_or(self.last_span);
            self.diagnostics.push(Diagnostic::error(
                DiagnosticCode::MaxDepthExceeded,
                "maximum nesting depth exceeded",
                span,
            ));
            self.skip_subtree_at_current_depth();
            return self.push_err(span, "max depth exceeded");
        }
        let node = self.parse_value_inner();
        self.depth.exit();
        node
    }

    fn parse_value_inner(&mut self) -> NodeId {
        let Some(tok) = self.peek() else {
            let span = self.last_span;
            self.diagnostics.push(Diagnostic::error(
                DiagnosticCode::UnexpectedToken,
                "expected a value, found end of input",
                span,
            ));
            return self.push_err(span, "expected a value");
        };

        match tok.kind {
            TokenKind::ObjectStart => self.parse_object(),
            TokenKind::ArrayStart | TokenKind::StructStart => self.parse_array(),
            TokenKind::StringValue => self.parse_string(),
            TokenKind::CharLiteral => self.parse_char_literal(),
            TokenKind::NumberValue => self.parse_number(),
            TokenKind::BooleanTrue => {
                self.advance();
                self.ast.push(Node {
                    span: tok.span,
                    kind: NodeKind::Boolean { value: true },
                })
            }
            TokenKind::BooleanFalse => {
                self.advance();
                self.ast.push(Node {
                    span: tok.span,
                    kind: NodeKind::Boolean { value: false },
                })
            }
            TokenKind::NullValue => {
                self.advance();
                self.ast.push(Node {
                    span: tok.span,
                    kind: NodeKind::Null,
                })
            }
            // A leading-dot identifier in value position is a ZON enum
            // literal (`.Identifier`); the lexer cannot distinguish this
            // from a field name without parser context, so disambiguation
            // stays at this layer.
            TokenKind::FieldName | TokenKind::Identifier | TokenKind::Import => {
                self.advance();
                self.ast.push(Node {
                    span: tok.span,
                    kind: NodeKind::Identifier,
                })
            }
            _ => {
                self.advance();
                self.diagnostics.push(Diagnostic::error(
                    DiagnosticCode::UnexpectedToken,
                    format!("unexpected token while expecting a value: {:?}", tok.kind),
                    tok.span,
                ));
                self.push_err(tok.span, "unexpected token")
            }
        }
    }

    fn skip_subtree_at_current_depth(&mut self) {
        let mut depth = 0i32;
        loop {
            let Some(tok) = self.peek() else { break };
            match tok.kind {
                TokenKind::ObjectStart | TokenKind::ArrayStart | TokenKind::StructStart => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::ObjectEnd | TokenKind::ArrayEnd => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    self.advance();
                }
                TokenKind::Eof => break,
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn parse_object(&mut self) -> NodeId {
        let open = self.advance().expect("caller checked object_start/struct_start");
        let mut properties = Vec::new();
        let is_zon_struct = open.kind == TokenKind::StructStart;

        loop {
            match self.peek().map(|t| t.kind) {
                Some(TokenKind::ObjectEnd) => {
                    self.advance();
                    break;
                }
                Some(TokenKind::Eof) | None => {
                    self.diagnostics.push(Diagnostic::error(
                        DiagnosticCode::UnmatchedBracket,
                        "unmatched opening bracket: implicitly closed at end of input",
                        self.last_span,
                    ));
                    break;
                }
                _ => {}
            }

            let (key, key_recovered) = if is_zon_struct {
                self.expect_field_name()
            } else {
                self.expect_json_key()
            };

            if key_recovered {
                // The bad token was already consumed as an `err` node; skip
                // ahead to the next structural delimiter rather than trying
                // to parse a separator/value that likely isn't there.
                if !self.at_structural_delimiter_or_close() {
                    self.resync_to_delimiter();
                }
                if self.peek().map(|t| t.kind) == Some(TokenKind::Comma) {
                    self.advance();
                    continue;
                }
                if matches!(
                    self.peek().map(|t| t.kind),
                    Some(TokenKind::ObjectEnd) | Some(TokenKind::Eof) | None
                ) {
                    if self.peek().map(|t| t.kind) == Some(TokenKind::ObjectEnd) {
                        self.advance();
                    }
                    break;
                }
                continue;
            }

            let sep_kind = if is_zon_struct {
                TokenKind::Equals
            } else {
                TokenKind::Colon
            };
            if self.peek().map(|t| t.kind) == Some(sep_kind) {
                self.advance();
            } else {
                self.diagnostics.push(Diagnostic::error(
                    DiagnosticCode::MissingSeparator,
                    format!("expected {:?} after property key", sep_kind),
                    self.peek().map(|t| t.span).unwrap_or(self.last_span),
                ));
            }

            let value = self.parse_value();
            let key_span = self.ast.get(key).span;
            let value_span = self.ast.get(value).span;
            let span = key_span.join(&value_span);
            let prop = self.ast.push(Node {
                span,
                kind: if is_zon_struct {
                    NodeKind::Field { name: key, value }
                } else {
                    NodeKind::Property { key, value }
                },
            });
            properties.push(prop);

            match self.peek().map(|t| t.kind) {
                Some(TokenKind::Comma) => {
                    self.advance();
                    if self.peek().map(|t| t.kind) == Some(TokenKind::ObjectEnd) {
                        if !self.config.allow_trailing_commas {
                            self.diagnostics.push(Diagnostic::warning(
                                DiagnosticCode::TrailingComma,
                                "trailing comma before closing bracket",
                                self.last_span,
                            ));
                        }
                        self.advance();
                        break;
                    }
                }
                Some(TokenKind::ObjectEnd) => {
                    self.advance();
                    break;
                }
                Some(TokenKind::Eof) | None => {
                    self.diagnostics.push(Diagnostic::error(
                        DiagnosticCode::UnmatchedBracket,
                        "unmatched opening bracket: implicitly closed at end of input",
                        self.last_span,
                    ));
                    break;
                }
                _ => {
                    self.diagnostics.push(Diagnostic::error(
                        DiagnosticCode::MissingSeparator,
                        "expected `,` or closing bracket after property value",
                        self.peek().map(|t| t.span).unwrap_or(self.last_span),
                    ));
                    if !self.at_structural_delimiter_or_close() {
                        self.resync_to_delimiter();
                    }
                }
            }
        }

        let end_span = self.last_span;
        let span = open.span.join(&end_span);
        self.ast.push(Node {
            span,
            kind: NodeKind::Object { properties },
        })
    }

    fn parse_array(&mut self) -> NodeId {
        let open = self.advance().expect("caller checked array_start/struct_start");
        let is_zon = open.kind == TokenKind::StructStart;
        let mut elements = Vec::new();

        loop {
            match self.peek().map(|t| t.kind) {
                Some(TokenKind::ArrayEnd) | Some(TokenKind::ObjectEnd) => {
                    self.advance();
                    break;
                }
                Some(TokenKind::Eof) | None => {
                    self.diagnostics.push(Diagnostic::error(
                        DiagnosticCode::UnmatchedBracket,
                        "unmatched opening bracket: implicitly closed at end of input",
                        self.last_span,
                    ));
                    break;
                }
                // ZON's `.{ ... }` is used for both structs and anonymous
                // tuple/array literals; a leading field name means this is
                // actually the struct shape, which `parse_object` handles.
                Some(TokenKind::FieldName) if is_zon => {
                    return self.reparse_as_object(open);
                }
                _ => {}
            }

            let value = self.parse_value();
            elements.push(value);

            match self.peek().map(|t| t.kind) {
                Some(TokenKind::Comma) => {
                    self.advance();
                    let close = if is_zon {
                        TokenKind::ObjectEnd
                    } else {
                        TokenKind::ArrayEnd
                    };
                    if self.peek().map(|t| t.kind) == Some(close) {
                        if !self.config.allow_trailing_commas {
                            self.diagnostics.push(Diagnostic::warning(
                                DiagnosticCode::TrailingComma,
                                "trailing comma before closing bracket",
                                self.last_span,
                            ));
                        }
                        self.advance();
                        break;
                    }
                }
                Some(TokenKind::ArrayEnd) | Some(TokenKind::ObjectEnd) => {
                    self.advance();
                    break;
                }
                Some(TokenKind::Eof) | None => {
                    self.diagnostics.push(Diagnostic::error(
                        DiagnosticCode::UnmatchedBracket,
                        "unmatched opening bracket: implicitly closed at end of input",
                        self.last_span,
                    ));
                    break;
                }
                _ => {
                    self.diagnostics.push(Diagnostic::error(
                        DiagnosticCode::MissingSeparator,
                        "expected `,` or closing bracket after array element",
                        self.peek().map(|t| t.span).unwrap_or(self.last_span),
                    ));
                    if !self.at_structural_delimiter_or_close() {
                        self.resync_to_delimiter();
                    }
                }
            }
        }

        let span = open.span.join(&self.last_span);
        self.ast.push(Node {
            span,
            kind: NodeKind::Array { elements },
        })
    }

    /// ZON's `.{ }` is ambiguous between "struct literal" and "anonymous
    /// array literal" until the first element is seen. `parse_array` starts
    /// optimistically and redirects here the moment a `field_name` token
    /// shows it was actually a struct.
    fn reparse_as_object(&mut self, open: Token) -> NodeId {
        let mut properties = Vec::new();
        loop {
            match self.peek().map(|t| t.kind) {
                Some(TokenKind::ObjectEnd) => {
                    self.advance();
                    break;
                }
                Some(TokenKind::Eof) | None => {
                    self.diagnostics.push(Diagnostic::error(
                        DiagnosticCode::UnmatchedBracket,
                        "unmatched opening bracket: implicitly closed at end of input",
                        self.last_span,
                    ));
                    break;
                }
                _ => {}
            }
            let (key, key_recovered) = self.expect_field_name();
            if key_recovered {
                if !self.at_structural_delimiter_or_close() {
                    self.resync_to_delimiter();
                }
                if self.peek().map(|t| t.kind) == Some(TokenKind::Comma) {
                    self.advance();
                    continue;
                }
                break;
            }
            if self.peek().map(|t| t.kind) == Some(TokenKind::Equals) {
                self.advance();
            } else {
                self.diagnostics.push(Diagnostic::error(
                    DiagnosticCode::MissingSeparator,
                    "expected `=` after field name",
                    self.peek().map(|t| t.span).unwrap_or(self.last_span),
                ));
            }
            let value = self.parse_value();
            let span = self.ast.get(key).span.join(&self.ast.get(value).span);
            properties.push(self.ast.push(Node {
                span,
                kind: NodeKind::Field { name: key, value },
            }));
            match self.peek().map(|t| t.kind) {
                Some(TokenKind::Comma) => {
                    self.advance();
                    if self.peek().map(|t| t.kind) == Some(TokenKind::ObjectEnd) {
                        if !self.config.allow_trailing_commas {
                            self.diagnostics.push(Diagnostic::warning(
                                DiagnosticCode::TrailingComma,
                                "trailing comma before closing bracket",
                                self.last_span,
                            ));
                        }
                        self.advance();
                        break;
                    }
                }
                Some(TokenKind::ObjectEnd) => {
                    self.advance();
                    break;
                }
                _ => break,
            }
        }
        let span = open.span.join(&self.last_span);
        self.ast.push(Node {
            span,
            kind: NodeKind::Object { properties },
        })
    }

    /// Returns the key node and whether recovery kicked in (the token
    /// wasn't actually a string and was consumed as an `err` node instead).
    fn expect_json_key(&mut self) -> (NodeId, bool) {
        match self.peek().map(|t| t.kind) {
            Some(TokenKind::StringValue) => (self.parse_string(), false),
            _ => {
                let span = self.peek().map(|t| t.span).unwrap_or(self.last_span);
                self.diagnostics.push(Diagnostic::error(
                    DiagnosticCode::UnexpectedToken,
                    "expected a string key",
                    span,
                ));
                self.advance();
                (self.push_err(span, "expected a string key"), true)
            }
        }
    }

    /// Returns the key node and whether recovery kicked in (see
    /// [`Self::expect_json_key`]).
    fn expect_field_name(&mut self) -> (NodeId, bool) {
        match self.peek() {
            Some(tok) if tok.kind == TokenKind::FieldName => {
                self.advance();
                (
                    self.ast.push(Node {
                        span: tok.span,
                        kind: NodeKind::Identifier,
                    }),
                    false,
                )
            }
            _ => {
                let span = self.peek().map(|t| t.span).unwrap_or(self.last_span);
                self.diagnostics.push(Diagnostic::error(
                    DiagnosticCode::UnexpectedToken,
                    "expected a `.field` name",
                    span,
                ));
                self.advance();
                (self.push_err(span, "expected a field name"), true)
            }
        }
    }

    fn at_structural_delimiter_or_close(&mut self) -> bool {
        self.peek()
            .map(|t| t.kind.is_structural_delimiter() || t.kind == TokenKind::Eof)
            .unwrap_or(true)
    }

    /// Error-recovery resync: advance to the next structural delimiter at
    /// the same or shallower bracket depth.
    fn resync_to_delimiter(&mut self) {
        tracing::debug!(span = ?self.last_span, "recovering: resyncing to next structural delimiter");
        let start_depth = self.peek().map(|t| t.depth).unwrap_or(0);
        while let Some(tok) = self.peek() {
            if tok.kind == TokenKind::Eof {
                break;
            }
            if tok.kind.is_structural_delimiter() && tok.depth <= start_depth {
                break;
            }
            self.advance();
        }
    }

    fn parse_string(&mut self) -> NodeId {
        let tok = self.advance().expect("caller checked string_value");
        let value = self.decode_string_token(&tok);
        self.ast.push(Node {
            span: tok.span,
            kind: NodeKind::String { value },
        })
    }

    fn parse_char_literal(&mut self) -> NodeId {
        let tok = self.advance().expect("caller checked char_literal");
        let value = self.decode_string_token(&tok);
        self.ast.push(Node {
            span: tok.span,
            kind: NodeKind::String { value },
        })
    }

    fn decode_string_token(&mut self, tok: &Token) -> StringValue {
        let Some(bytes) = self.lexer.token_bytes(tok) else {
            return StringValue::Borrowed(tok.span);
        };
        // Strip the surrounding quote bytes (string and char literals both
        // use a single delimiter byte on each side).
        let inner = if bytes.len() >= 2 {
            &bytes[1..bytes.len() - 1]
        } else {
            &bytes[..]
        };
        if !tok.flags.contains(crate::token::TokenFlags::HAS_ESCAPES) {
            return StringValue::Borrowed(PackedSpan::new(
                tok.span.start_u32() + 1,
                tok.span.end_u32().saturating_sub(1),
            ));
        }
        let mut out = String::with_capacity(inner.len());
        let mut i = 0;
        while i < inner.len() {
            let b = inner[i];
            if b != b'\\' {
                // A run of ordinary bytes may contain multi-byte UTF-8
                // sequences; decode the whole run at once rather than
                // byte-by-byte, which would corrupt them.
                let start = i;
                while i < inner.len() && inner[i] != b'\\' {
                    i += 1;
                }
                match core::str::from_utf8(&inner[start..i]) {
                    Ok(s) => out.push_str(s),
                    Err(_) => out.push_str(&String::from_utf8_lossy(&inner[start..i])),
                }
                continue;
            }
            if i + 1 < inner.len() {
                let esc = inner[i + 1];
                match esc {
                    b'"' => out.push('"'),
                    b'\\' => out.push('\\'),
                    b'/' => out.push('/'),
                    b'b' => out.push('\u{8}'),
                    b'f' => out.push('\u{c}'),
                    b'n' => out.push('\n'),
                    b'r' => out.push('\r'),
                    b't' => out.push('\t'),
                    b'\'' => out.push('\''),
                    b'u' if i + 5 < inner.len() => {
                        let hex = &inner[i + 2..i + 6];
                        if let Ok(hex_str) = core::str::from_utf8(hex) {
                            if let Ok(code) = u32::from_str_radix(hex_str, 16) {
                                if let Some(c) = char::from_u32(code) {
                                    out.push(c);
                                } else {
                                    self.diagnostics.push(Diagnostic::error(
                                        DiagnosticCode::InvalidEscape,
                                        "invalid unicode escape",
                                        tok.span,
                                    ));
                                }
                            }
                        }
                        i += 4;
                    }
                    _ => {
                        self.diagnostics.push(Diagnostic::error(
                            DiagnosticCode::InvalidEscape,
                            format!("invalid escape sequence `\\{}`", esc as char),
                            tok.span,
                        ));
                        out.push(esc as char);
                    }
                }
                i += 2;
            } else {
                // A lone trailing backslash with nothing after it.
                self.diagnostics.push(Diagnostic::error(
                    DiagnosticCode::InvalidEscape,
                    "dangling escape at end of string",
                    tok.span,
                ));
                i += 1;
            }
        }
        StringValue::Owned(out)
    }

    fn parse_number(&mut self) -> NodeId {
        let tok = self.advance().expect("caller checked number_value");
        let bytes = self.lexer.token_bytes(&tok).unwrap_or_default();
        let text = core::str::from_utf8(&bytes).unwrap_or("");
        let (value, overflowed) = match text.parse::<f64>() {
            Ok(v) if v.is_finite() => (v, false),
            Ok(v) => (v, true),
            Err(_) => {
                self.diagnostics.push(Diagnostic::error(
                    DiagnosticCode::InvalidNumber,
                    format!("could not parse numeric literal `{}`", text),
                    tok.span,
                ));
                (0.0, true)
            }
        };
        self.ast.push(Node {
            span: tok.span,
            kind: NodeKind::Number { value, overflowed },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(src: &str) -> ParseOutput {
        parse(Language::Json, src.as_bytes(), ParseConfig::default())
    }

    #[test]
    fn parses_flat_object() {
        let out = run(r#"{"a": 1, "b": true}"#);
        assert!(out.diagnostics.is_empty());
        assert!(out.ast.check_span_invariant());
        let root = out.ast.root().unwrap();
        let NodeKind::Root { value } = &out.ast.get(root).kind else {
            panic!("expected root wrapper");
        };
        let NodeKind::Object { properties } = &out.ast.get(*value).kind else {
            panic!("expected object");
        };
        assert_eq!(properties.len(), 2);
    }

    #[test]
    fn recovers_from_missing_separator() {
        let out = run(r#"{"a" 1}"#);
        assert!(!out.diagnostics.is_empty());
        assert!(out.ast.check_span_invariant());
    }

    #[test]
    fn trailing_comma_flagged_by_default() {
        let out = run(r#"[1, 2,]"#);
        assert!(out
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::TrailingComma));
    }

    #[test]
    fn trailing_comma_allowed_when_configured() {
        let config = ParseConfig::default().with_allow_trailing_commas(true);
        let out = parse(Language::Json, b"[1, 2,]", config);
        assert!(!out
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::TrailingComma));
    }

    #[test]
    fn decodes_escape_sequences() {
        let out = run(r#""a\nb""#);
        let root = out.ast.root().unwrap();
        let NodeKind::Root { value } = &out.ast.get(root).kind else {
            unreachable!()
        };
        let NodeKind::String { value } = &out.ast.get(*value).kind else {
            panic!("expected string");
        };
        match value {
            StringValue::Owned(s) => assert_eq!(s, "a\nb"),
            StringValue::Borrowed(_) => panic!("expected owned decode"),
        }
    }

    #[test]
    fn unterminated_object_closes_implicitly() {
        let out = run(r#"{"a": 1"#);
        assert!(out
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::UnmatchedBracket));
        assert!(out.ast.check_span_invariant());
    }

    #[test]
    fn max_depth_exceeded_replaces_subtree_with_err() {
        let deep = "[".repeat(200) + &"]".repeat(200);
        let config = ParseConfig::default().with_max_recursion_depth(8);
        let out = parse(Language::Json, deep.as_bytes(), config);
        assert!(out
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::MaxDepthExceeded));
        assert!(out.ast.check_span_invariant());
    }

    #[test]
    fn zon_struct_parses_fields() {
        let out = parse(
            Language::Zon,
            br#".{ .name = "zz", .version = "1.0" }"#,
            ParseConfig::default().with_allow_trailing_commas(true),
        );
        assert!(out.diagnostics.is_empty());
        let root = out.ast.root().unwrap();
        let NodeKind::Root { value } = &out.ast.get(root).kind else {
            unreachable!()
        };
        let NodeKind::Object { properties } = &out.ast.get(*value).kind else {
            panic!("expected object");
        };
        assert_eq!(properties.len(), 2);
    }

    #[test]
    fn zon_anonymous_list_parses_as_array() {
        let out = parse(Language::Zon, br#".{ 1, 2, 3 }"#, ParseConfig::default());
        let root = out.ast.root().unwrap();
        let NodeKind::Root { value } = &out.ast.get(root).kind else {
            unreachable!()
        };
        assert!(matches!(out.ast.get(*value).kind, NodeKind::Array { .. }));
    }
}
