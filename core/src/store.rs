//! The append-only, generation-tracked `FactStore` and its indices.

use std::collections::{BTreeMap, HashMap};

use crate::ast::{Ast, NodeId, NodeKind, StringValue};
use crate::fact::{Confidence, Fact, Predicate};
use crate::span::PackedSpan;
use crate::value::{AtomId, AtomPool, FactId, Value};

/// A batch of retractions and assertions applied atomically.
#[derive(Debug, Default)]
pub struct Delta {
    pub retractions: Vec<FactId>,
    pub assertions: Vec<Fact>,
    /// The span that bounds everything this delta could have touched, used
    /// to invalidate the query cache without walking every entry.
    pub affected_range: PackedSpan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    kind: CacheQueryKind,
    generation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CacheQueryKind {
    BySpan(u32, u32),
    ByPredicate(u16),
    ChildrenOf(u32),
}

/// Caches recent `(query, generation) -> result` pairs. Invalidated whenever
/// the store's generation changes and the cached query's span intersects
/// the delta's `affected_range`.
#[derive(Debug, Default)]
struct QueryCache {
    entries: HashMap<CacheKey, Vec<FactId>>,
}

impl QueryCache {
    fn get(&self, key: &CacheKey) -> Option<&Vec<FactId>> {
        self.entries.get(key)
    }

    fn insert(&mut self, key: CacheKey, result: Vec<FactId>) {
        self.entries.insert(key, result);
    }

    fn invalidate_intersecting(&mut self, affected: PackedSpan) {
        self.entries.retain(|key, _| match key.kind {
            CacheQueryKind::BySpan(s, e) => !PackedSpan::new(s, e).intersects(&affected),
            CacheQueryKind::ByPredicate(_) | CacheQueryKind::ChildrenOf(_) => false,
        });
    }
}

/// An append-only vector of facts plus three indices. Tombstoned entries are
/// retained (set to `None`) until an explicit [`compact`](Self::compact).
#[derive(Debug, Default)]
pub struct FactStore {
    facts: Vec<Option<Fact>>,
    next_id: u32,
    generation: u32,
    by_span: BTreeMap<(u32, u32, u32), FactId>,
    by_predicate: HashMap<u16, Vec<FactId>>,
    by_subject_fact: HashMap<u32, Vec<FactId>>,
    cache: QueryCache,
    atoms: AtomPool,
}

impl FactStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn index_insert(&mut self, fact: &Fact) {
        self.by_span.insert(
            (fact.subject.start_u32(), fact.subject.end_u32(), fact.id.raw()),
            fact.id,
        );
        self.by_predicate
            .entry(fact.predicate.raw())
            .or_default()
            .push(fact.id);
        self.by_subject_fact
            .entry(fact.subject.start_u32())
            .or_default()
            .push(fact.id);
    }

    /// Appends `fact` (ignoring the `id` field, which is assigned here),
    /// updates indices, and bumps the generation.
    pub fn assert(&mut self, mut fact: Fact) -> FactId {
        let id = FactId(self.next_id);
        self.next_id += 1;
        fact.id = id;
        self.index_insert(&fact);
        self.facts.push(Some(fact));
        self.bump_generation();
        self.cache.invalidate_intersecting(fact.subject);
        id
    }

    /// Marks `id` as a tombstone. No-op (besides the generation bump) if
    /// already retracted or unknown.
    pub fn retract(&mut self, id: FactId) {
        if id.is_none() {
            return;
        }
        let slot = self.slot_of(id);
        let affected = slot.and_then(|i| self.facts[i].take()).map(|f| f.subject);
        self.bump_generation();
        if let Some(span) = affected {
            self.cache.invalidate_intersecting(span);
        }
    }

    fn slot_of(&self, id: FactId) -> Option<usize> {
        self.facts
            .iter()
            .position(|f| f.as_ref().map(|f| f.id) == Some(id))
    }

    /// Atomically applies a batch of retractions then assertions, bumping
    /// the generation exactly once.
    pub fn apply_delta(&mut self, delta: Delta) -> Vec<FactId> {
        for id in &delta.retractions {
            if let Some(i) = self.slot_of(*id) {
                self.facts[i] = None;
            }
        }
        let mut asserted = Vec::with_capacity(delta.assertions.len());
        for mut fact in delta.assertions {
            let id = FactId(self.next_id);
            self.next_id += 1;
            fact.id = id;
            self.index_insert(&fact);
            self.facts.push(Some(fact));
            asserted.push(id);
        }
        self.bump_generation();
        self.cache.invalidate_intersecting(delta.affected_range);
        asserted
    }

    fn get(&self, id: FactId) -> Option<&Fact> {
        self.facts
            .iter()
            .flatten()
            .find(|f| f.id == id)
    }

    /// Facts whose subject intersects `span`.
    pub fn by_span(&mut self, span: PackedSpan) -> Vec<Fact> {
        let key = CacheKey {
            kind: CacheQueryKind::BySpan(span.start_u32(), span.end_u32()),
            generation: self.generation,
        };
        if let Some(ids) = self.cache.get(&key) {
            return ids.iter().filter_map(|id| self.get(*id).copied()).collect();
        }
        let matches: Vec<Fact> = self
            .facts
            .iter()
            .flatten()
            .filter(|f| f.subject.intersects(&span))
            .copied()
            .collect();
        self.cache
            .insert(key, matches.iter().map(|f| f.id).collect());
        matches
    }

    /// Facts asserted with predicate `p`.
    pub fn by_predicate(&mut self, p: Predicate) -> Vec<Fact> {
        let key = CacheKey {
            kind: CacheQueryKind::ByPredicate(p.raw()),
            generation: self.generation,
        };
        if let Some(ids) = self.cache.get(&key) {
            return ids.iter().filter_map(|id| self.get(*id).copied()).collect();
        }
        let ids = self.by_predicate.get(&p.raw()).cloned().unwrap_or_default();
        let matches: Vec<Fact> = ids.iter().filter_map(|id| self.get(*id).copied()).collect();
        self.cache
            .insert(key, matches.iter().map(|f| f.id).collect());
        matches
    }

    /// Facts whose subject starts at the same offset as a fact previously
    /// asserted with id `id`'s subject start — the parent/child lookup.
    pub fn children_of(&mut self, id: FactId) -> Vec<Fact> {
        let Some(anchor) = self.get(id).map(|f| f.subject.start_u32()) else {
            return Vec::new();
        };
        let key = CacheKey {
            kind: CacheQueryKind::ChildrenOf(anchor),
            generation: self.generation,
        };
        if let Some(ids) = self.cache.get(&key) {
            return ids.iter().filter_map(|i| self.get(*i).copied()).collect();
        }
        let ids = self.by_subject_fact.get(&anchor).cloned().unwrap_or_default();
        let matches: Vec<Fact> = ids
            .iter()
            .filter(|i| **i != id)
            .filter_map(|i| self.get(*i).copied())
            .collect();
        self.cache
            .insert(key, matches.iter().map(|f| f.id).collect());
        matches
    }

    /// Rewrites the store without tombstones, renumbering ids from 1.
    /// Invalidates every outstanding `FactId` held by callers.
    pub fn compact(&mut self) {
        let live: Vec<Fact> = self.facts.drain(..).flatten().collect();
        self.by_span.clear();
        self.by_predicate.clear();
        self.by_subject_fact.clear();
        self.next_id = 1;
        for mut fact in live {
            fact.id = FactId(self.next_id);
            self.next_id += 1;
            self.index_insert(&fact);
            self.facts.push(Some(fact));
        }
        self.bump_generation();
        self.cache = QueryCache::default();
    }

    pub fn len(&self) -> usize {
        self.facts.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Interns `s` into this store's atom pool. Atoms are per-store, never
    /// a process-wide table.
    pub fn intern(&mut self, s: &str) -> AtomId {
        self.atoms.intern(s)
    }

    /// Resolves a previously interned atom back to its string.
    pub fn resolve_atom(&self, id: AtomId) -> &str {
        self.atoms.resolve(id)
    }

    /// Walks `ast` from `root` and asserts one `node_kind` fact per node plus
    /// whatever structural/semantic facts its shape implies — the "post-walk
    /// that asserts facts into the store" from the cold-parse control flow.
    /// Returns every fact id asserted, in traversal order.
    pub fn assert_ast(&mut self, ast: &Ast, root: NodeId, source: &[u8]) -> Vec<FactId> {
        let mut asserted = Vec::new();
        self.assert_node(ast, root, source, &mut asserted);
        asserted
    }

    fn assert_node(&mut self, ast: &Ast, id: NodeId, source: &[u8], asserted: &mut Vec<FactId>) {
        let node = ast.get(id);
        let span = node.span;

        let kind_tag: u64 = match &node.kind {
            NodeKind::Root { .. } => 0,
            NodeKind::Object { .. } => 1,
            NodeKind::Array { .. } => 2,
            NodeKind::Property { .. } => 3,
            NodeKind::Field { .. } => 4,
            NodeKind::String { .. } => 5,
            NodeKind::Number { .. } => 6,
            NodeKind::Boolean { .. } => 7,
            NodeKind::Null => 8,
            NodeKind::Identifier => 9,
            NodeKind::Err { .. } => 10,
        };
        asserted.push(self.assert(Fact::new(
            FactId::NONE,
            span,
            Predicate::NODE_KIND,
            Confidence::CERTAIN,
            Value::Uint(kind_tag),
        )));

        match &node.kind {
            NodeKind::Err { .. } => {
                asserted.push(self.assert(Fact::new(
                    FactId::NONE,
                    span,
                    Predicate::IS_ERR,
                    Confidence::CERTAIN,
                    Value::Bool(true),
                )));
            }
            NodeKind::String { value } => {
                let atom = match value {
                    StringValue::Borrowed(s) => self.intern(&String::from_utf8_lossy(byte_slice(*s, source))),
                    StringValue::Owned(s) => self.intern(s),
                };
                asserted.push(self.assert(Fact::new(
                    FactId::NONE,
                    span,
                    Predicate::DECODED_STRING,
                    Confidence::CERTAIN,
                    Value::Atom(atom),
                )));
            }
            NodeKind::Number { value, overflowed } => {
                asserted.push(self.assert(Fact::new(
                    FactId::NONE,
                    span,
                    Predicate::NUMERIC_VALUE,
                    Confidence::CERTAIN,
                    Value::Float(*value),
                )));
                if *overflowed {
                    asserted.push(self.assert(Fact::new(
                        FactId::NONE,
                        span,
                        Predicate::NUMERIC_OVERFLOWED,
                        Confidence::CERTAIN,
                        Value::Bool(true),
                    )));
                }
            }
            NodeKind::Field { .. } => {
                asserted.push(self.assert(Fact::new(
                    FactId::NONE,
                    span,
                    Predicate::HAS_FIELD,
                    Confidence::CERTAIN,
                    Value::Bool(true),
                )));
            }
            NodeKind::Identifier => {
                let text = byte_slice(span, source);
                if text == b"@import" {
                    asserted.push(self.assert(Fact::new(
                        FactId::NONE,
                        span,
                        Predicate::IS_IMPORT,
                        Confidence::CERTAIN,
                        Value::Bool(true),
                    )));
                } else if text.first() == Some(&b'.') {
                    asserted.push(self.assert(Fact::new(
                        FactId::NONE,
                        span,
                        Predicate::IS_ENUM_LITERAL,
                        Confidence::CERTAIN,
                        Value::Bool(true),
                    )));
                }
            }
            _ => {}
        }

        if let NodeKind::Property { key, .. } = &node.kind {
            asserted.push(self.assert(Fact::new(
                FactId::NONE,
                ast.get(*key).span,
                Predicate::KEY_OF,
                Confidence::CERTAIN,
                Value::SpanRef(span),
            )));
        }

        let is_array = matches!(node.kind, NodeKind::Array { .. });
        for (i, child) in ast.children(id).into_iter().enumerate() {
            let child_span = ast.get(child).span;
            asserted.push(self.assert(Fact::new(
                FactId::NONE,
                child_span,
                Predicate::PARENT_OF,
                Confidence::CERTAIN,
                Value::SpanRef(span),
            )));
            if is_array {
                asserted.push(self.assert(Fact::new(
                    FactId::NONE,
                    child_span,
                    Predicate::INDEX_OF,
                    Confidence::CERTAIN,
                    Value::Uint(i as u64),
                )));
            }
            self.assert_node(ast, child, source, asserted);
        }
    }
}

#[inline]
fn byte_slice(span: PackedSpan, source: &[u8]) -> &[u8] {
    &source[span.start_u32() as usize..span.end_u32() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(span: (u32, u32), predicate: Predicate) -> Fact {
        Fact::new(
            FactId::NONE,
            PackedSpan::new(span.0, span.1),
            predicate,
            Confidence::CERTAIN,
            Value::Bool(true),
        )
    }

    #[test]
    fn assert_bumps_generation_and_assigns_monotonic_ids() {
        let mut store = FactStore::new();
        let g0 = store.generation();
        let a = store.assert(fact((0, 5), Predicate::NODE_KIND));
        let b = store.assert(fact((5, 10), Predicate::NODE_KIND));
        assert!(store.generation() != g0);
        assert!(a.raw() < b.raw());
        assert!(!a.is_none());
    }

    #[test]
    fn retract_hides_from_queries() {
        let mut store = FactStore::new();
        let id = store.assert(fact((0, 5), Predicate::NODE_KIND));
        assert_eq!(store.by_span(PackedSpan::new(0, 5)).len(), 1);
        store.retract(id);
        assert_eq!(store.by_span(PackedSpan::new(0, 5)).len(), 0);
    }

    #[test]
    fn by_predicate_filters_correctly() {
        let mut store = FactStore::new();
        store.assert(fact((0, 5), Predicate::NODE_KIND));
        store.assert(fact((5, 10), Predicate::IS_ERR));
        assert_eq!(store.by_predicate(Predicate::NODE_KIND).len(), 1);
        assert_eq!(store.by_predicate(Predicate::IS_ERR).len(), 1);
    }

    #[test]
    fn apply_delta_is_atomic_and_bumps_generation_once() {
        let mut store = FactStore::new();
        let keep = store.assert(fact((0, 5), Predicate::NODE_KIND));
        let to_retract = store.assert(fact((5, 10), Predicate::NODE_KIND));
        let g_before = store.generation();
        let delta = Delta {
            retractions: vec![to_retract],
            assertions: vec![fact((10, 15), Predicate::IS_ERR)],
            affected_range: PackedSpan::new(0, 15),
        };
        store.apply_delta(delta);
        assert_eq!(store.generation(), g_before.wrapping_add(1));
        assert_eq!(store.len(), 2);
        assert_eq!(store.by_span(PackedSpan::new(0, 5)).len(), 1);
        let _ = keep;
    }

    #[test]
    fn compact_renumbers_and_drops_tombstones() {
        let mut store = FactStore::new();
        let a = store.assert(fact((0, 5), Predicate::NODE_KIND));
        store.assert(fact((5, 10), Predicate::NODE_KIND));
        store.retract(a);
        store.compact();
        assert_eq!(store.len(), 1);
        let remaining = store.by_predicate(Predicate::NODE_KIND);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id.raw(), 1);
    }

    #[test]
    fn children_of_returns_siblings_sharing_subject_start() {
        let mut store = FactStore::new();
        let parent = store.assert(fact((0, 20), Predicate::NODE_KIND));
        let child = store.assert(fact((0, 5), Predicate::PARENT_OF));
        let kids = store.children_of(parent);
        assert!(kids.iter().any(|f| f.id == child));
    }

    #[test]
    fn assert_ast_walks_object_with_property_and_number() {
        use crate::ast::Node;

        let source = br#"{"a": 1}"#;
        let mut ast = Ast::new();
        let key = ast.push(Node {
            span: PackedSpan::new(1, 4),
            kind: NodeKind::String {
                value: StringValue::Borrowed(PackedSpan::new(2, 3)),
            },
        });
        let value = ast.push(Node {
            span: PackedSpan::new(6, 7),
            kind: NodeKind::Number {
                value: 1.0,
                overflowed: false,
            },
        });
        let prop = ast.push(Node {
            span: PackedSpan::new(1, 7),
            kind: NodeKind::Property { key, value },
        });
        let obj = ast.push(Node {
            span: PackedSpan::new(0, 8),
            kind: NodeKind::Object {
                properties: vec![prop],
            },
        });
        ast.set_root(obj);

        let mut store = FactStore::new();
        let asserted = store.assert_ast(&ast, obj, source);
        assert!(!asserted.is_empty());
        assert_eq!(store.by_predicate(Predicate::NODE_KIND).len(), 4);
        assert_eq!(store.by_predicate(Predicate::NUMERIC_VALUE).len(), 1);
        assert_eq!(store.by_predicate(Predicate::KEY_OF).len(), 1);
        assert_eq!(store.by_predicate(Predicate::PARENT_OF).len(), 3);
    }

    #[test]
    fn assert_ast_flags_errors_and_arrays() {
        use crate::ast::Node;

        let source = b"[1, 2]";
        let mut ast = Ast::new();
        let a = ast.push(Node {
            span: PackedSpan::new(1, 2),
            kind: NodeKind::Number {
                value: 1.0,
                overflowed: false,
            },
        });
        let b = ast.push(Node {
            span: PackedSpan::new(4, 5),
            kind: NodeKind::Number {
                value: 2.0,
                overflowed: false,
            },
        });
        let arr = ast.push(Node {
            span: PackedSpan::new(0, 6),
            kind: NodeKind::Array {
                elements: vec![a, b],
            },
        });
        ast.set_root(arr);

        let mut store = FactStore::new();
        store.assert_ast(&ast, arr, source);
        assert_eq!(store.by_predicate(Predicate::INDEX_OF).len(), 2);
        assert!(store.by_predicate(Predicate::IS_ERR).is_empty());
    }
}
