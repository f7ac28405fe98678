use thiserror::Error;

use crate::ast::Position;

/// Represents all errors that can occur during lexing or parsing.
///
/// Every message starts with the position it refers to, in the form
/// `line L col C: ...`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found a token that cannot appear here.
    #[error("{position}: unexpected token: {token}")]
    UnexpectedToken {
        /// The token encountered, as written.
        token:    String,
        /// Where the token starts.
        position: Position,
    },
    /// Reached the end of input in the middle of a construct.
    #[error("{position}: unexpected end of input")]
    UnexpectedEndOfInput {
        /// Position of the last token read.
        position: Position,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("{position}: expected closing parenthesis ')', got token: {token}")]
    ExpectedClosingParen {
        /// The token found instead.
        token:    String,
        /// Where that token starts.
        position: Position,
    },
    /// A suffix modifier after `,` was not a bare identifier.
    #[error("{position}: expected modifier name after ',', got token: {token}")]
    ExpectedModifier {
        /// The token found instead.
        token:    String,
        /// Where that token starts.
        position: Position,
    },
    /// A statement was not terminated by `;`.
    ///
    /// The position and token are those of the last token belonging to the
    /// unterminated statement.
    #[error("{position}: statement must end with semicolon, got token: {token}")]
    MissingSemicolon {
        /// The last token of the statement.
        token:    String,
        /// Where that token starts.
        position: Position,
    },
    /// Groups, prefix operators or calls are nested deeper than the parser
    /// accepts, or an expression tree grew taller than that.
    #[error("{position}: expression is nested too deeply")]
    NestingTooDeep {
        /// Where the limit was reached.
        position: Position,
    },
    /// A numeric literal such as `1.2.3` could not be read as a number.
    #[error("{position}: malformed number literal: {literal}")]
    MalformedNumber {
        /// The literal as written.
        literal:  String,
        /// Where the literal starts.
        position: Position,
    },
}

impl ParseError {
    /// Returns the source position this error refers to.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position }
            | Self::NestingTooDeep { position }
            | Self::ExpectedClosingParen { position, .. }
            | Self::ExpectedModifier { position, .. }
            | Self::MissingSemicolon { position, .. }
            | Self::MalformedNumber { position, .. } => *position,
        }
    }
}
