#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
//! The JSON language component: a keyword reference table, format-preserving
//! `ToTokens`/`Printer` impls over the shared AST, and JSON's semantic lint
//! rules.

mod diagnostic;
mod keywords;
mod lint;
mod printer;
mod tokens;

pub use diagnostic::{
    ArrayClose, ArrayOpen, BooleanValue, Colon, Comma, NullValue, NumberValue, ObjectClose, ObjectOpen, StringValue,
};
pub use keywords::{is_keyword, KEYWORDS};
pub use lint::lint;
pub use printer::{JsonPrinter, JsonToken};
pub use tokens::JsonNode;
