//! Three-stage pipeline: FGD text -> token stream -> AST -> declaration map.
//!
//! This is a thin orchestrator over [`crate::lexer`], [`crate::parser`],
//! and [`crate::transform`]; each stage consumes the previous stage's
//! output exactly once, and nothing is cached across invocations.

use crate::error::FgdError;
use crate::transform::Declarations;
use crate::{lexer, parser, transform};

/// Run the whole pipeline over one FGD document and return the declaration
/// map, or the first error encountered.
pub fn parse_declarations(input: &str) -> Result<Declarations, FgdError> {
    let tokens = lexer::tokenize(input)?;
    let ast = parser::parse(&tokens)?;
    transform::transform(&ast)
}
