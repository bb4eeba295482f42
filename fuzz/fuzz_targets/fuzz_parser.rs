#![no_main]

use libfuzzer_sys::fuzz_target;
use stratify_core::config::ParseConfig;
use stratify_core::lexer::Language;
use stratify_core::parser;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let language = if data[0] % 2 == 0 { Language::Json } else { Language::Zon };
    let config = ParseConfig::default().with_max_recursion_depth(64);
    let output = parser::parse(language, &data[1..], config);

    // every node's span must stay within the source and within its parent's;
    // a `DuplicateKey`/`TrailingComma`/etc. diagnostic is fine, a broken
    // arena never is.
    assert!(output.ast.check_span_invariant());
    if let Some(root) = output.ast.root() {
        let _ = output.ast.get(root);
    }
});
