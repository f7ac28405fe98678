/// Strips `{ ... }` comments from source text.
///
/// Runs before lexing, so the lexer never sees comment text.
pub mod comment;
/// Symbol tables for variables and functions.
///
/// An environment maps names to values and native functions and may be
/// nested inside an outer one, which is consulted on a miss.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST, applies operators elementwise over series,
/// calls native functions, and records output variables and their suffix
/// modifiers as assignments run.
///
/// # Responsibilities
/// - Evaluates expressions and statements against an environment.
/// - Broadcasts scalars over series and truncates mismatched series.
/// - Reports unresolved names according to the missing-name policy.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads comment-free source text and produces tokens for
/// numbers, identifiers, strings, operators and delimiters, each tagged with
/// its line and column.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source location.
/// - Recognizes the keyword and symbol spellings of each operator.
/// - Turns unrecognized characters into error tokens for the parser to
///   report.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser is a Pratt parser over the lexer's output. It produces a
/// [`Program`](crate::ast::Program) holding the statements parsed before the
/// first error, together with that error.
///
/// # Responsibilities
/// - Converts tokens into statements and expressions.
/// - Applies operator precedence and left associativity.
/// - Records syntax errors with their location.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Values are numbers, numeric and boolean series, strings, booleans,
/// callable native functions and `nil`.
///
/// # Responsibilities
/// - Defines the `Value` enum and its conversions.
/// - Defines native functions and their arity checks.
pub mod value;
