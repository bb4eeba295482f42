//! Translates a source edit into the smallest coherent update across the
//! lexer, parser, and [`FactStore`].
//!
//! A boundary is "the smallest depth-zero region containing the change" —
//! the rescan re-parses only that region and splices its fresh subtree back
//! into a copy of the unaffected arena.

use crate::ast::{Ast, Node, NodeId, NodeKind, StringValue};
use crate::config::ParseConfig;
use crate::diagnostics::{Diagnostic, DiagnosticCode, Severity};
use crate::error::Error;
use crate::fact::{Confidence, Fact, Predicate};
use crate::lexer::Language;
use crate::parser;
use crate::span::PackedSpan;
use crate::store::FactStore;
use crate::value::{FactId, Value};

/// A single source edit: replace the bytes in `range` with `new_text`.
#[derive(Debug, Clone)]
pub struct Edit {
    pub range: PackedSpan,
    pub new_text: Vec<u8>,
}

impl Edit {
    pub fn new(range: PackedSpan, new_text: impl Into<Vec<u8>>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }
}

/// Owns one parse's worth of state (source, AST, facts, diagnostics) and
/// applies edits to it, choosing between an incremental rescan and a full
/// reparse.
pub struct Coordinator {
    language: Language,
    config: ParseConfig,
    source: Vec<u8>,
    ast: Ast,
    store: FactStore,
    diagnostics: Vec<Diagnostic>,
}

impl Coordinator {
    /// Performs an initial full parse of `source`.
    pub fn new(language: Language, source: &[u8], config: ParseConfig) -> Self {
        let mut coordinator = Self {
            language,
            config,
            source: source.to_vec(),
            ast: Ast::new(),
            store: FactStore::new(),
            diagnostics: Vec::new(),
        };
        coordinator.full_reparse();
        coordinator
    }

    pub fn source(&self) -> &[u8] {
        &self.source
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn store(&self) -> &FactStore {
        &self.store
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    fn full_reparse(&mut self) {
        let output = parser::parse(self.language, &self.source, self.config);
        self.ast = output.ast;
        self.diagnostics = output.diagnostics;
        self.store = FactStore::new();
        if let Some(root) = self.ast.root() {
            let value = root_value(&self.ast, root);
            self.store.assert_ast(&self.ast, value, &self.source);
        }
    }

    /// Applies a batch of edits, sorted into descending start order first so
    /// earlier offsets stay valid as later (in document order) edits are
    /// applied.
    pub fn apply_edits(&mut self, mut edits: Vec<Edit>) -> Result<(), Error> {
        edits.sort_by(|a, b| b.range.start_u32().cmp(&a.range.start_u32()));
        for edit in edits {
            self.apply_edit(edit)?;
        }
        Ok(())
    }

    /// Applies one edit. Validates the range against the current buffer,
    /// splices the new bytes in, then attempts an incremental rescan of just
    /// the affected region; falls back to a full reparse (recording a
    /// `fell_back_to_full_reparse` diagnostic) if the rescan can't produce a
    /// self-contained replacement for the affected boundary.
    #[tracing::instrument(level = "debug", skip(self, edit), fields(start = edit.range.start_u32(), end = edit.range.end_u32()))]
    pub fn apply_edit(&mut self, edit: Edit) -> Result<(), Error> {
        let start = edit.range.start_u32() as usize;
        let end = edit.range.end_u32() as usize;
        if start > end || end > self.source.len() {
            return Err(Error::EditOutOfBounds {
                buffer_len: self.source.len(),
                requested_end: end,
            });
        }

        let byte_delta = edit.new_text.len() as i64 - (end - start) as i64;
        self.source.splice(start..end, edit.new_text.iter().copied());

        match self.try_incremental_rescan(PackedSpan::from_usize(start, end), byte_delta) {
            Some(()) => {
                tracing::debug!("edit applied via incremental rescan");
            }
            None => {
                tracing::debug!("incremental rescan not applicable; falling back to full reparse");
                self.full_reparse();
                self.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::FellBackToFullReparse,
                    "edit could not be rescanned incrementally; fell back to a full reparse",
                    edit.range,
                    Severity::Info,
                ));
            }
        }
        Ok(())
    }

    /// Attempts the rescan. Returns `None` (never mutating `self`) if the
    /// boundary couldn't be re-established as a standalone parse, so the
    /// caller can fall back to a full reparse.
    fn try_incremental_rescan(&mut self, edit_range: PackedSpan, byte_delta: i64) -> Option<()> {
        let root = self.ast.root()?;
        let boundary_id = find_boundary(&self.ast, root, edit_range).unwrap_or(root_value(&self.ast, root));
        let old_boundary_span = self.ast.get(boundary_id).span;
        let old_parent = self.ast.parent_of(boundary_id);

        let b_start = old_boundary_span.start_u32();
        let b_end_new = apply_delta(old_boundary_span.end_u32(), byte_delta);
        if b_end_new as usize > self.source.len() || b_start as usize > b_end_new as usize {
            return None;
        }
        let slice = &self.source[b_start as usize..b_end_new as usize];

        let sub = parser::parse(self.language, slice, self.config);
        let sub_root = sub.ast.root()?;
        let consumed_whole_slice = sub.ast.get(sub_root).span == PackedSpan::new(0, slice.len() as u32);
        let brackets_closed = !sub
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::UnmatchedBracket);
        if !consumed_whole_slice || !brackets_closed {
            return None;
        }

        let NodeKind::Root { value: sub_value } = &sub.ast.get(sub_root).kind else {
            return None;
        };

        let mut new_ast = Ast::new();
        let new_root = rebuild(
            &self.ast,
            root,
            boundary_id,
            &sub.ast,
            *sub_value,
            old_boundary_span,
            byte_delta,
            &mut new_ast,
        );
        new_ast.set_root(new_root);

        let new_boundary_id = find_boundary(&new_ast, new_root, PackedSpan::from_usize(b_start as usize, b_end_new as usize))
            .unwrap_or(root_value(&new_ast, new_root));
        let new_boundary_span = new_ast.get(new_boundary_id).span;

        let to_retract: Vec<_> = self
            .store
            .by_span(old_boundary_span)
            .into_iter()
            .filter(|f| old_boundary_span.contains_span(&f.subject))
            .map(|f| f.id)
            .collect();
        for id in to_retract {
            self.store.retract(id);
        }

        self.store.assert_ast(&new_ast, new_boundary_id, &self.source);

        let real_parent = old_parent.filter(|p| !matches!(self.ast.get(*p).kind, NodeKind::Root { .. }));
        if let Some(parent_id) = real_parent {
            let parent_old_span = self.ast.get(parent_id).span;
            let parent_new_span = shift_span(parent_old_span, old_boundary_span, byte_delta);
            self.store.assert(Fact::new(
                FactId::NONE,
                new_boundary_span,
                Predicate::PARENT_OF,
                Confidence::CERTAIN,
                Value::SpanRef(parent_new_span),
            ));
            if let NodeKind::Array { elements } = &self.ast.get(parent_id).kind {
                if let Some(idx) = elements.iter().position(|e| *e == boundary_id) {
                    self.store.assert(Fact::new(
                        FactId::NONE,
                        new_boundary_span,
                        Predicate::INDEX_OF,
                        Confidence::CERTAIN,
                        Value::Uint(idx as u64),
                    ));
                }
            }
        }

        self.diagnostics
            .retain(|d| !old_boundary_span.intersects(&d.span));
        self.diagnostics.extend(sub.diagnostics);
        self.ast = new_ast;
        Some(())
    }
}

fn root_value(ast: &Ast, root: NodeId) -> NodeId {
    match &ast.get(root).kind {
        NodeKind::Root { value } => *value,
        _ => root,
    }
}

/// Finds the smallest `object`/`array` node whose span fully contains
/// `edit`, walking down from `id`. Scalars and the `root` wrapper are never
/// returned as boundaries — the caller falls back to the unwrapped
/// top-level value when nothing smaller matches.
fn find_boundary(ast: &Ast, id: NodeId, edit: PackedSpan) -> Option<NodeId> {
    let node = ast.get(id);
    if !node.span.contains_span(&edit) {
        return None;
    }
    let mut best = matches!(node.kind, NodeKind::Object { .. } | NodeKind::Array { .. }).then_some(id);
    for child in ast.children(id) {
        if let Some(found) = find_boundary(ast, child, edit) {
            best = Some(found);
        }
    }
    best
}

#[inline]
fn apply_delta(x: u32, delta: i64) -> u32 {
    (x as i64 + delta).max(0) as u32
}

/// A node's new span after an edit confined to `boundary_old`: nodes fully
/// before the boundary are untouched, nodes fully after shift by `delta`,
/// and ancestors of the boundary (whose span straddles it) keep their start
/// but shift their end.
fn shift_span(span: PackedSpan, boundary_old: PackedSpan, delta: i64) -> PackedSpan {
    if span.end_u32() <= boundary_old.start_u32() {
        span
    } else if span.start_u32() >= boundary_old.end_u32() {
        PackedSpan::new(apply_delta(span.start_u32(), delta), apply_delta(span.end_u32(), delta))
    } else {
        PackedSpan::new(span.start_u32(), apply_delta(span.end_u32(), delta))
    }
}

fn shift_string_value(value: &StringValue, boundary_old: PackedSpan, delta: i64) -> StringValue {
    match value {
        StringValue::Borrowed(span) => StringValue::Borrowed(shift_span(*span, boundary_old, delta)),
        StringValue::Owned(s) => StringValue::Owned(s.clone()),
    }
}

/// Rebuilds `id`'s subtree into `out`, substituting `boundary_id`'s subtree
/// with `replacement`'s (rebased to start at `old_boundary.start`) and
/// shifting every other node's span per [`shift_span`].
#[allow(clippy::too_many_arguments)]
fn rebuild(
    old: &Ast,
    id: NodeId,
    boundary_id: NodeId,
    replacement: &Ast,
    replacement_root: NodeId,
    old_boundary: PackedSpan,
    delta: i64,
    out: &mut Ast,
) -> NodeId {
    if id == boundary_id {
        return copy_subtree(replacement, replacement_root, old_boundary.start_u32(), out);
    }
    let node = old.get(id);
    let new_span = shift_span(node.span, old_boundary, delta);
    let new_kind = match node.kind.clone() {
        NodeKind::Root { value } => NodeKind::Root {
            value: rebuild(old, value, boundary_id, replacement, replacement_root, old_boundary, delta, out),
        },
        NodeKind::Object { properties } => NodeKind::Object {
            properties: properties
                .into_iter()
                .map(|c| rebuild(old, c, boundary_id, replacement, replacement_root, old_boundary, delta, out))
                .collect(),
        },
        NodeKind::Array { elements } => NodeKind::Array {
            elements: elements
                .into_iter()
                .map(|c| rebuild(old, c, boundary_id, replacement, replacement_root, old_boundary, delta, out))
                .collect(),
        },
        NodeKind::Property { key, value } => NodeKind::Property {
            key: rebuild(old, key, boundary_id, replacement, replacement_root, old_boundary, delta, out),
            value: rebuild(old, value, boundary_id, replacement, replacement_root, old_boundary, delta, out),
        },
        NodeKind::Field { name, value } => NodeKind::Field {
            name: rebuild(old, name, boundary_id, replacement, replacement_root, old_boundary, delta, out),
            value: rebuild(old, value, boundary_id, replacement, replacement_root, old_boundary, delta, out),
        },
        NodeKind::String { value } => NodeKind::String {
            value: shift_string_value(&value, old_boundary, delta),
        },
        NodeKind::Number { value, overflowed } => NodeKind::Number { value, overflowed },
        NodeKind::Boolean { value } => NodeKind::Boolean { value },
        NodeKind::Null => NodeKind::Null,
        NodeKind::Identifier => NodeKind::Identifier,
        NodeKind::Err { message, partial } => NodeKind::Err {
            message,
            partial: partial
                .map(|p| rebuild(old, p, boundary_id, replacement, replacement_root, old_boundary, delta, out)),
        },
    };
    out.push(Node {
        span: new_span,
        kind: new_kind,
    })
}

/// Copies `id`'s subtree from `src` into `out`, rebasing every span by
/// `base` (the boundary's start offset in the full document).
fn copy_subtree(src: &Ast, id: NodeId, base: u32, out: &mut Ast) -> NodeId {
    let node = src.get(id);
    let new_span = PackedSpan::new(node.span.start_u32() + base, node.span.end_u32() + base);
    let new_kind = match node.kind.clone() {
        NodeKind::Root { value } => NodeKind::Root {
            value: copy_subtree(src, value, base, out),
        },
        NodeKind::Object { properties } => NodeKind::Object {
            properties: properties
                .into_iter()
                .map(|c| copy_subtree(src, c, base, out))
                .collect(),
        },
        NodeKind::Array { elements } => NodeKind::Array {
            elements: elements
                .into_iter()
                .map(|c| copy_subtree(src, c, base, out))
                .collect(),
        },
        NodeKind::Property { key, value } => NodeKind::Property {
            key: copy_subtree(src, key, base, out),
            value: copy_subtree(src, value, base, out),
        },
        NodeKind::Field { name, value } => NodeKind::Field {
            name: copy_subtree(src, name, base, out),
            value: copy_subtree(src, value, base, out),
        },
        NodeKind::String { value } => NodeKind::String {
            value: match value {
                StringValue::Borrowed(span) => {
                    StringValue::Borrowed(PackedSpan::new(span.start_u32() + base, span.end_u32() + base))
                }
                StringValue::Owned(s) => StringValue::Owned(s),
            },
        },
        NodeKind::Number { value, overflowed } => NodeKind::Number { value, overflowed },
        NodeKind::Boolean { value } => NodeKind::Boolean { value },
        NodeKind::Null => NodeKind::Null,
        NodeKind::Identifier => NodeKind::Identifier,
        NodeKind::Err { message, partial } => NodeKind::Err {
            message,
            partial: partial.map(|p| copy_subtree(src, p, base, out)),
        },
    };
    out.push(Node {
        span: new_span,
        kind: new_kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacing_a_number_rescans_incrementally() {
        let mut coord = Coordinator::new(Language::Json, br#"{"a": 1, "b": 2}"#, ParseConfig::default());
        let gen_before = coord.store().generation();
        coord
            .apply_edit(Edit::new(PackedSpan::new(6, 7), b"100".to_vec()))
            .unwrap();
        assert_eq!(coord.source(), &br#"{"a": 100, "b": 2}"#[..]);
        assert!(coord.store().generation() != gen_before);
        assert!(!coord
            .diagnostics()
            .iter()
            .any(|d| d.code == DiagnosticCode::FellBackToFullReparse));

        let root = coord.ast().root().unwrap();
        let value = root_value(coord.ast(), root);
        assert!(matches!(coord.ast().get(value).kind, NodeKind::Object { .. }));
        assert!(coord.ast().check_span_invariant());
    }

    #[test]
    fn deleting_a_closing_brace_falls_back_to_full_reparse() {
        let mut coord = Coordinator::new(Language::Json, br#"{"a": 1}"#, ParseConfig::default());
        coord
            .apply_edit(Edit::new(PackedSpan::new(7, 8), Vec::new()))
            .unwrap();
        assert!(coord
            .diagnostics()
            .iter()
            .any(|d| d.code == DiagnosticCode::FellBackToFullReparse));
    }

    #[test]
    fn out_of_bounds_edit_is_rejected() {
        let mut coord = Coordinator::new(Language::Json, b"{}", ParseConfig::default());
        let err = coord
            .apply_edit(Edit::new(PackedSpan::new(0, 10), Vec::new()))
            .unwrap_err();
        assert!(matches!(err, Error::EditOutOfBounds { .. }));
    }
}
