/// All errors produced by the FGD pipeline.
///
/// The first three variants plus `InvalidNumber` come out of the lexer, the
/// two `Unexpected*` token variants out of the parser, and
/// `UnknownDirection` out of the transform. Every failure is terminal for
/// the current parse: there is no recovery mode and no error aggregation,
/// only the first violation is reported.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FgdError {
    /// A character outside every token class. Position is a character
    /// offset into the input.
    #[error("unknown character '{ch}' at position {pos}")]
    UnknownCharacter { ch: char, pos: usize },

    /// A `/` that does not open a `//` line comment.
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedCharacter { ch: char, pos: usize },

    /// A `"` whose closing quote never arrives. Position is the opening
    /// quote.
    #[error("unterminated string starting at position {pos}")]
    UnterminatedString { pos: usize },

    /// A number-class character run that does not parse as a number,
    /// e.g. `-` or `1.2.3`.
    #[error("invalid number '{text}' at position {pos}")]
    InvalidNumber { text: String, pos: usize },

    /// A strict grammar expectation met the wrong token.
    #[error("unexpected token: found {found}, expected {expected}")]
    UnexpectedToken { found: String, expected: String },

    /// The token stream ran out mid-construct.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },

    /// A connection direction other than `input`/`output` reached the
    /// transform. Unreachable through the parser's dispatch; kept as an
    /// invariant check on hand-built ASTs.
    #[error("unknown connection direction '{direction}'")]
    UnknownDirection { direction: String },
}
