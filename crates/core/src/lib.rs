//! fgd-core: parsing pipeline for Forge Game Data (FGD) files.
//!
//! Three strictly sequential stages, each depending only on the previous
//! stage's output:
//!
//! 1. [`lexer::tokenize`] -- raw text to a typed token stream
//! 2. [`parser::parse`] -- token stream to an abstract syntax tree via
//!    recursive descent with single-token lookahead
//! 3. [`transform::transform`] -- AST to the flat, name-keyed declaration map
//!
//! [`parse_declarations`] runs all three in order. The crate performs no
//! I/O and keeps no state between invocations; callers hand in a complete
//! in-memory document and receive the declaration map or the first error
//! encountered.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod transform;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{File, Literal};
pub use error::FgdError;
pub use lexer::Token;
pub use transform::{ConnectionRecord, DeclarationRecord, Declarations, FlagRecord, PropertyRecord};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use lexer::tokenize;
pub use parser::parse;
pub use pipeline::parse_declarations;
pub use transform::transform;
