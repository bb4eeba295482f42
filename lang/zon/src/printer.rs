//! The `Printer` that lays out ZON's `.{ ... }` struct/tuple literal and the
//! `.field = value` separator. Leaf lexemes are written verbatim by
//! [`crate::tokens`]; this type only owns the buffer and the indent level.

use stratify_core::traits::Printer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZonToken {
    StructOpen,
    StructClose,
    Equals,
    Comma,
}

#[derive(Debug, Default)]
pub struct ZonPrinter {
    buf: String,
    indent: usize,
}

impl Printer for ZonPrinter {
    type Token = ZonToken;

    fn buf(&self) -> &str {
        &self.buf
    }

    fn buf_mut(&mut self) -> &mut String {
        &mut self.buf
    }

    fn indent_level(&self) -> usize {
        self.indent
    }

    fn set_indent(&mut self, level: usize) {
        self.indent = level;
    }

    fn into_string(self) -> String {
        self.buf
    }

    fn use_tabs(&self) -> bool {
        false
    }

    fn token(&mut self, t: &Self::Token) {
        match t {
            ZonToken::StructOpen => self.word(".{"),
            ZonToken::StructClose => self.word("}"),
            ZonToken::Equals => self.word(" = "),
            ZonToken::Comma => self.word(","),
        }
    }
}
