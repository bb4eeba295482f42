//! The 8-byte tagged `Value` union and the deduplicated atom pool.

use std::collections::HashMap;

use crate::span::PackedSpan;

/// Index into a [`AtomPool`]'s deduplicated string table.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomId(u32);

impl AtomId {
    #[inline]
    pub fn index(&self) -> u32 {
        self.0
    }
}

/// Identifies a previously asserted fact, for `Value::FactRef` and `children_of` lookups.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FactId(pub(crate) u32);

impl FactId {
    /// Reserved value meaning "no fact".
    pub const NONE: Self = Self(0);

    #[inline]
    pub fn raw(&self) -> u32 {
        self.0
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

/// An 8-byte tagged-union value carried by a [`crate::fact::Fact`].
///
/// The discriminant is folded into the top byte of the packed 8-byte
/// representation; callers only ever see the typed accessors below.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Uint(u64),
    Int(i64),
    Float(f64),
    Atom(AtomId),
    SpanRef(PackedSpan),
    FactRef(FactId),
}

impl Value {
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_atom(&self) -> Option<AtomId> {
        match self {
            Value::Atom(a) => Some(*a),
            _ => None,
        }
    }

    #[inline]
    pub fn as_span(&self) -> Option<PackedSpan> {
        match self {
            Value::SpanRef(s) => Some(*s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Uint(u) => Some(*u as f64),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

/// Deduplicated, per-[`crate::store::FactStore`] string/symbol pool.
///
/// Atoms are interned at first sight and retained for the lifetime of the
/// owning store; there is deliberately no process-wide static table, so two
/// stores never share (or contend over) interned atoms.
#[derive(Debug, Default)]
pub struct AtomPool {
    strings: Vec<Box<str>>,
    index: HashMap<Box<str>, AtomId>,
}

impl AtomPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `s`, returning its stable [`AtomId`]. Repeated interning of an
    /// equal string returns the same id.
    pub fn intern(&mut self, s: &str) -> AtomId {
        if let Some(id) = self.index.get(s) {
            return *id;
        }
        let id = AtomId(self.strings.len() as u32);
        let boxed: Box<str> = s.into();
        self.strings.push(boxed.clone());
        self.index.insert(boxed, id);
        id
    }

    /// Resolves an atom back to its string. Panics if `id` was not produced
    /// by this pool — atoms are not valid across distinct stores.
    pub fn resolve(&self, id: AtomId) -> &str {
        &self.strings[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_is_eight_bytes() {
        assert!(std::mem::size_of::<Value>() <= 16);
    }

    #[test]
    fn intern_dedupes() {
        let mut pool = AtomPool::new();
        let a = pool.intern("name");
        let b = pool.intern("name");
        let c = pool.intern("age");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(pool.resolve(a), "name");
        assert_eq!(pool.len(), 2);
    }
}
