#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
//! The ZON language component: struct/field/equals syntax, `@import`, enum
//! literals, format-preserving `ToTokens`/`Printer` impls, and ZON's
//! semantic lint rules.

mod diagnostic;
mod keywords;
mod lint;
mod printer;
mod tokens;

pub use diagnostic::{EnumLiteral, Equals, FieldName, Import, StructClose, StructOpen};
pub use keywords::{is_keyword, KEYWORDS};
pub use lint::lint;
pub use printer::{ZonPrinter, ZonToken};
pub use tokens::ZonNode;
