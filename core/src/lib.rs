#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

pub mod ast;
pub mod config;
pub mod diagnostics;
mod error;
pub mod fact;
pub mod incremental;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod store;
pub mod token;
pub mod traits;
pub mod value;

pub use config::{ParseConfig, RecursionGuard};
pub use error::Error;
pub use span::PackedSpan;
pub use traits::{Parse, Peek, Printer, SpanLike, SpannedError, SpannedLike, ToTokens, TokenStream};
