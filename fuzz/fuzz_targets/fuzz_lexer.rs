#![no_main]

use libfuzzer_sys::fuzz_target;
use stratify_core::lexer::{Language, Lexer};
use stratify_core::token::TokenKind;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let language = if data[0] % 2 == 0 { Language::Json } else { Language::Zon };
    let mut lexer = Lexer::from_source(language, &data[1..]);

    while let Some(token) = lexer.next() {
        let _ = token.span.len();
        let _ = token.span.is_empty();
        if token.kind == TokenKind::Eof {
            break;
        }
    }
});
