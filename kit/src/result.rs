//! [`ParseResult`]: the external-facing handle the `parse`/`edit` surface
//! hands back, wrapping the core's [`Coordinator`].

use stratify_core::ast::Ast;
use stratify_core::diagnostics::Diagnostic;
use stratify_core::incremental::{Coordinator, Edit};
use stratify_core::store::FactStore;
use stratify_core::Error;

use crate::options::Options;
use crate::registry::Language;

/// The result of a parse, and the handle `edit` updates in place of
/// re-parsing from scratch.
pub struct ParseResult {
    language: Language,
    coordinator: Coordinator,
}

impl ParseResult {
    pub(crate) fn new(language: Language, source: &[u8], options: Options) -> Self {
        let coordinator = Coordinator::new(language.into(), source, options.into());
        Self { language, coordinator }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn source(&self) -> &[u8] {
        self.coordinator.source()
    }

    pub fn ast(&self) -> &Ast {
        self.coordinator.ast()
    }

    pub fn fact_store(&self) -> &FactStore {
        self.coordinator.store()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.coordinator.diagnostics()
    }

    pub(crate) fn apply_edits(&mut self, edits: Vec<Edit>) -> Result<(), Error> {
        self.coordinator.apply_edits(edits)
    }
}
