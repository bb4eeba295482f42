//! The packed 16-byte token shape shared by every language component.

use crate::span::PackedSpan;

/// Closed set of token kinds across every language this core dispatches to.
///
/// A single enum (rather than one enum per language wrapped in a union)
/// keeps the packed [`Token`] shape uniform; the [`crate::lexer::Language`]
/// tag selects which subset a given lexer instance can produce, but the
/// parser dispatches on `kind` alone once tokens exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    ObjectStart = 0,
    ObjectEnd = 1,
    ArrayStart = 2,
    ArrayEnd = 3,
    Comma = 4,
    Colon = 5,
    StringValue = 6,
    NumberValue = 7,
    BooleanTrue = 8,
    BooleanFalse = 9,
    NullValue = 10,
    Comment = 11,
    Whitespace = 12,
    Continuation = 13,
    Err = 14,
    Eof = 15,

    // ZON-only kinds.
    StructStart = 16,
    FieldName = 17,
    Identifier = 18,
    Equals = 19,
    Import = 20,
    CharLiteral = 21,
    EnumLiteral = 22,
}

impl TokenKind {
    /// True for tokens that carry no semantic payload but may be preserved for formatting.
    #[inline]
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }

    #[inline]
    pub fn is_open_bracket(&self) -> bool {
        matches!(
            self,
            TokenKind::ObjectStart | TokenKind::ArrayStart | TokenKind::StructStart
        )
    }

    #[inline]
    pub fn is_close_bracket(&self) -> bool {
        matches!(self, TokenKind::ObjectEnd | TokenKind::ArrayEnd)
    }

    #[inline]
    pub fn is_structural_delimiter(&self) -> bool {
        matches!(self, TokenKind::Comma) || self.is_open_bracket() || self.is_close_bracket()
    }
}

/// A tiny hand-rolled bitflags macro: the corpus's own `bitflags` usage is
/// absent here, and pulling in the crate for eight bits is not worth the
/// dependency, so we generate the same ergonomics (`contains`, `insert`,
/// `union`, `Debug`) by hand.
macro_rules! bitflags_u8 {
    (
        $(#[$meta:meta])*
        pub struct $name:ident: u8 {
            $(const $flag:ident = $value:expr;)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name(u8);

        impl $name {
            $(pub const $flag: Self = Self($value);)*

            #[inline]
            pub const fn empty() -> Self {
                Self(0)
            }

            #[inline]
            pub const fn bits(&self) -> u8 {
                self.0
            }

            #[inline]
            pub const fn from_bits(bits: u8) -> Self {
                Self(bits)
            }

            #[inline]
            pub fn contains(&self, other: Self) -> bool {
                (self.0 & other.0) == other.0
            }

            #[inline]
            pub fn insert(&mut self, other: Self) {
                self.0 |= other.0;
            }

            #[inline]
            pub fn union(self, other: Self) -> Self {
                Self(self.0 | other.0)
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;
            #[inline]
            fn bitor(self, rhs: Self) -> Self {
                self.union(rhs)
            }
        }
    };
}

bitflags_u8! {
    /// Bit positions within [`Token::flags`].
    pub struct TokenFlags: u8 {
        const HAS_ESCAPES     = 0b0000_0001;
        const IS_FLOAT        = 0b0000_0010;
        const IS_NEGATIVE     = 0b0000_0100;
        const IS_SCIENTIFIC   = 0b0000_1000;
        const CONTINUATION    = 0b0001_0000;
        const PRESERVE_TRIVIA = 0b0010_0000;
        const IS_INSERTED     = 0b0100_0000;
        const HAS_ERROR       = 0b1000_0000;
    }
}

/// A 16-byte packed token: `span (8) + kind (1) + depth (1) + flags (1) + data (4)` = 14,
/// padded to 16 for alignment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Token {
    pub span: PackedSpan,
    pub kind: TokenKind,
    /// Bracket nesting depth at token start, saturating at 0.
    pub depth: u8,
    pub flags: TokenFlags,
    /// Kind-dependent payload: small-int value, atom id, or 0.
    pub data: u32,
}

impl Token {
    pub fn new(span: PackedSpan, kind: TokenKind, depth: u8, flags: TokenFlags, data: u32) -> Self {
        Self {
            span,
            kind,
            depth,
            flags,
            data,
        }
    }

    #[inline]
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<Token>(), 16);
    }

    #[test]
    fn flags_roundtrip() {
        let f = TokenFlags::IS_FLOAT | TokenFlags::IS_NEGATIVE;
        assert!(f.contains(TokenFlags::IS_FLOAT));
        assert!(f.contains(TokenFlags::IS_NEGATIVE));
        assert!(!f.contains(TokenFlags::HAS_ESCAPES));
    }
}
