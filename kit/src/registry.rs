//! Language dispatch: maps a [`Language`] tag to the component that knows
//! how to format and lint that language's AST shape.
//!
//! A registry is an explicit, caller-owned value rather than a process-wide
//! table — facts live per-[`stratify_core::store::FactStore`] for the same
//! reason (no global mutable pools), and the language set a given caller
//! cares about is exactly as dynamic as the registry they build.

use stratify_core::ast::Ast;
use stratify_core::diagnostics::Diagnostic;
use stratify_core::traits::ToTokens;

/// The languages this crate ships components for. Distinct from
/// [`stratify_core::lexer::Language`], which only needs to know what the
/// lexer's keyword table looks like; this one is the public dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Json,
    Zon,
}

impl From<Language> for stratify_core::lexer::Language {
    fn from(language: Language) -> Self {
        match language {
            Language::Json => stratify_core::lexer::Language::Json,
            Language::Zon => stratify_core::lexer::Language::Zon,
        }
    }
}

/// Per-language formatting and linting, implemented by a `lang/*` crate.
pub trait LanguageComponent: Send + Sync {
    fn language(&self) -> Language;
    fn format(&self, ast: &Ast, source: &[u8]) -> Vec<u8>;
    fn lint(&self, ast: &Ast, source: &[u8]) -> Vec<Diagnostic>;
}

struct JsonComponent;

impl LanguageComponent for JsonComponent {
    fn language(&self) -> Language {
        Language::Json
    }

    fn format(&self, ast: &Ast, source: &[u8]) -> Vec<u8> {
        match ast.root() {
            Some(root) => stratify_lang_json::JsonNode::new(ast, root, source)
                .to_string_formatted()
                .into_bytes(),
            None => Vec::new(),
        }
    }

    fn lint(&self, ast: &Ast, source: &[u8]) -> Vec<Diagnostic> {
        stratify_lang_json::lint(ast, source)
    }
}

struct ZonComponent;

impl LanguageComponent for ZonComponent {
    fn language(&self) -> Language {
        Language::Zon
    }

    fn format(&self, ast: &Ast, source: &[u8]) -> Vec<u8> {
        match ast.root() {
            Some(root) => stratify_lang_zon::ZonNode::new(ast, root, source)
                .to_string_formatted()
                .into_bytes(),
            None => Vec::new(),
        }
    }

    fn lint(&self, ast: &Ast, source: &[u8]) -> Vec<Diagnostic> {
        stratify_lang_zon::lint(ast, source)
    }
}

/// A set of registered [`LanguageComponent`]s, looked up by [`Language`].
#[derive(Default)]
pub struct Registry {
    components: Vec<Box<dyn LanguageComponent>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry pre-populated with this crate's own JSON and ZON
    /// components — the common case for a caller that just wants `parse`/
    /// `format`/`lint` to work out of the box.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(JsonComponent));
        registry.register(Box::new(ZonComponent));
        registry
    }

    /// Adds `component`, replacing any previously registered component for
    /// the same language.
    pub fn register(&mut self, component: Box<dyn LanguageComponent>) {
        self.components.retain(|c| c.language() != component.language());
        self.components.push(component);
    }

    pub fn lookup(&self, language: Language) -> Option<&dyn LanguageComponent> {
        self.components
            .iter()
            .find(|c| c.language() == language)
            .map(|c| c.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_both_shipped_languages() {
        let registry = Registry::with_defaults();
        assert!(registry.lookup(Language::Json).is_some());
        assert!(registry.lookup(Language::Zon).is_some());
    }

    #[test]
    fn registering_the_same_language_twice_replaces_the_first() {
        let mut registry = Registry::new();
        registry.register(Box::new(JsonComponent));
        registry.register(Box::new(JsonComponent));
        assert_eq!(registry.components.len(), 1);
    }

    #[test]
    fn unregistered_language_misses() {
        let registry = Registry::new();
        assert!(registry.lookup(Language::Zon).is_none());
    }
}
