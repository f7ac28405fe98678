/// Core expression parsing.
///
/// Holds the precedence-climbing entry point shared by every other parser
/// module, together with the precedence table.
pub mod core;

/// Binary operator parsing.
///
/// Maps operator tokens to [`BinaryOperator`](crate::ast::BinaryOperator)
/// values and their binding strength.
pub mod binary;

/// Prefix expression parsing.
///
/// Identifiers, literals, parenthesised groups, and the `-` and `NOT`
/// operators.
pub mod unary;

/// Statement and program parsing.
///
/// Splits a token stream into assignments and expression statements and
/// enforces `;` termination.
pub mod statement;

/// Utility functions for the parser.
pub mod utils;
