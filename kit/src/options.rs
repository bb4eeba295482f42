//! The external, language-neutral options surface. Internally this converts
//! to [`stratify_core::config::ParseConfig`], which uses a `usize`
//! recursion depth rather than this type's fixed `u32` — the core's knob is
//! an implementation budget, this one is part of the stable ABI.

use stratify_core::config::ParseConfig;

use crate::registry::Language;

/// Caller-facing parse/format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Default: language-dependent — JSON `false`, ZON `true`.
    pub allow_trailing_commas: bool,
    /// Default: `true`.
    pub recover_from_errors: bool,
    /// Default: 100. A `max_depth_exceeded` diagnostic is produced and
    /// deeper nodes are replaced by `err` nodes.
    pub max_depth: u32,
    /// Default: `false`.
    pub preserve_trivia: bool,
}

impl Options {
    /// Default options for `language`, with `allow_trailing_commas` set to
    /// that language's default.
    pub fn for_language(language: Language) -> Self {
        Self {
            allow_trailing_commas: matches!(language, Language::Zon),
            recover_from_errors: true,
            max_depth: 100,
            preserve_trivia: false,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::for_language(Language::Json)
    }
}

impl From<Options> for ParseConfig {
    fn from(options: Options) -> Self {
        ParseConfig::new()
            .with_max_recursion_depth(options.max_depth as usize)
            .with_allow_trailing_commas(options.allow_trailing_commas)
            .with_recover_from_errors(options.recover_from_errors)
            .with_preserve_trivia(options.preserve_trivia)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_defaults_reject_trailing_commas_zon_allows_them() {
        assert!(!Options::for_language(Language::Json).allow_trailing_commas);
        assert!(Options::for_language(Language::Zon).allow_trailing_commas);
    }

    #[test]
    fn converts_into_a_parse_config() {
        let options = Options {
            max_depth: 12,
            ..Options::default()
        };
        let config: ParseConfig = options.into();
        assert_eq!(config.max_recursion_depth, 12);
    }
}
