#![no_main]

use libfuzzer_sys::fuzz_target;
use stratify_core::config::ParseConfig;
use stratify_core::incremental::{Coordinator, Edit};
use stratify_core::lexer::Language;
use stratify_core::span::PackedSpan;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let language = if data[0] % 2 == 0 { Language::Json } else { Language::Zon };
    let split = 1 + (data[1] as usize % (data.len() - 1));
    let (source, rest) = data[1..].split_at(split.min(data.len() - 1));

    let mut coord = Coordinator::new(language, source, ParseConfig::default());
    let source_len = coord.source().len() as u32;
    if source_len == 0 || rest.len() < 2 {
        return;
    }
    let start = u32::from(rest[0]) % source_len;
    let end = start + u32::from(rest[1]) % (source_len - start + 1);

    // an out-of-bounds or overlapping-with-itself edit must return an
    // `Error`, never panic or corrupt the arena.
    let _ = coord.apply_edits(vec![Edit::new(PackedSpan::new(start, end), rest[2.min(rest.len())..].to_vec())]);
    assert!(coord.ast().check_span_invariant());
});
