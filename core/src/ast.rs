//! Arena-allocated, language-agnostic AST produced by the parser.

use crate::span::PackedSpan;

/// Index of a node within an [`Ast`]'s arena. Stable for the lifetime of the
/// arena; never reused after a node is added (the arena never removes
/// nodes — edits build a fresh `Ast`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A decoded string value: either a zero-copy borrow of the source range
/// (no escapes present) or an owned, escape-decoded `String` held by the
/// arena.
#[derive(Debug, Clone, PartialEq)]
pub enum StringValue {
    Borrowed(PackedSpan),
    Owned(String),
}

/// One piece of trivia (whitespace or a comment) retained for
/// format-preserving round-trips. Stored in the AST's trivia side-channel,
/// keyed by the node it trails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trivia {
    pub span: PackedSpan,
    pub is_comment: bool,
}

/// The tagged-union AST node shape. Every variant carries the span it
/// covers; `Node::span` reads it without a match in the hot path.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Root {
        value: NodeId,
    },
    Object {
        properties: Vec<NodeId>,
    },
    Array {
        elements: Vec<NodeId>,
    },
    Property {
        key: NodeId,
        value: NodeId,
    },
    /// ZON's `.field = value` shape; JSON re-uses `Property` for `"key":
    /// value` instead, since JSON keys are always `string_value` tokens.
    Field {
        name: NodeId,
        value: NodeId,
    },
    String {
        value: StringValue,
    },
    Number {
        value: f64,
        /// True if the lexeme overflowed `f64` precision/range; the node is
        /// still produced, with a diagnostic recorded separately.
        overflowed: bool,
    },
    Boolean {
        value: bool,
    },
    Null,
    Identifier,
    /// A recovery node synthesized in place of a production that failed to
    /// parse. `partial` optionally holds whatever sub-tree was salvaged
    /// before the error was hit.
    Err {
        message: String,
        partial: Option<NodeId>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub span: PackedSpan,
    pub kind: NodeKind,
}

/// An arena of AST nodes plus the trivia side-channel, owned as a unit and
/// freed together when the handle is dropped.
#[derive(Debug, Default)]
pub struct Ast {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    /// Trivia trailing each node, keyed by that node's id. Only populated
    /// when the lexer was run with `emit_trivia` (formatter use).
    trivia: Vec<(NodeId, Trivia)>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn attach_trivia(&mut self, owner: NodeId, trivia: Trivia) {
        self.trivia.push((owner, trivia));
    }

    pub fn trivia_for(&self, owner: NodeId) -> impl Iterator<Item = &Trivia> {
        self.trivia
            .iter()
            .filter(move |(id, _)| *id == owner)
            .map(|(_, t)| t)
    }

    /// Direct children of `id`, in source order. Leaves return an empty
    /// iterator.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match &self.get(id).kind {
            NodeKind::Root { value } => vec![*value],
            NodeKind::Object { properties } => properties.clone(),
            NodeKind::Array { elements } => elements.clone(),
            NodeKind::Property { key, value } => vec![*key, *value],
            NodeKind::Field { name, value } => vec![*name, *value],
            NodeKind::Err {
                partial: Some(p), ..
            } => vec![*p],
            _ => Vec::new(),
        }
    }

    /// Finds the direct parent of `target`, if any. Linear in arena size;
    /// used by the incremental coordinator when re-linking a replaced
    /// subtree, not on the hot parse path.
    pub fn parent_of(&self, target: NodeId) -> Option<NodeId> {
        for i in 0..self.nodes.len() {
            let id = NodeId(i as u32);
            if self.children(id).contains(&target) {
                return Some(id);
            }
        }
        None
    }

    /// Verifies the parent-span-contains-children invariant recursively.
    /// Intended for tests and debug assertions, not the hot path.
    pub fn check_span_invariant(&self) -> bool {
        let Some(root) = self.root else {
            return true;
        };
        self.check_span_invariant_from(root)
    }

    fn check_span_invariant_from(&self, id: NodeId) -> bool {
        let node = self.get(id);
        for child in self.children(id) {
            let child_span = self.get(child).span;
            if !node.span.contains_span(&child_span) {
                return false;
            }
            if !self.check_span_invariant_from(child) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_cover_composite_kinds() {
        let mut ast = Ast::new();
        let a = ast.push(Node {
            span: PackedSpan::new(1, 2),
            kind: NodeKind::Number {
                value: 1.0,
                overflowed: false,
            },
        });
        let b = ast.push(Node {
            span: PackedSpan::new(3, 4),
            kind: NodeKind::Number {
                value: 2.0,
                overflowed: false,
            },
        });
        let arr = ast.push(Node {
            span: PackedSpan::new(0, 5),
            kind: NodeKind::Array {
                elements: vec![a, b],
            },
        });
        ast.set_root(arr);
        assert!(ast.check_span_invariant());
    }

    #[test]
    fn span_invariant_detects_violation() {
        let mut ast = Ast::new();
        let child = ast.push(Node {
            span: PackedSpan::new(10, 20),
            kind: NodeKind::Null,
        });
        let parent = ast.push(Node {
            span: PackedSpan::new(0, 5),
            kind: NodeKind::Array {
                elements: vec![child],
            },
        });
        ast.set_root(parent);
        assert!(!ast.check_span_invariant());
    }

    #[test]
    fn trivia_side_channel_filters_by_owner() {
        let mut ast = Ast::new();
        let n = ast.push(Node {
            span: PackedSpan::new(0, 1),
            kind: NodeKind::Null,
        });
        ast.attach_trivia(
            n,
            Trivia {
                span: PackedSpan::new(1, 2),
                is_comment: false,
            },
        );
        assert_eq!(ast.trivia_for(n).count(), 1);
    }
}
