/// Parsing errors.
///
/// Defines every error the parser can record in a `Program`. Lexical problems
/// surface here too, since unknown characters reach the parser as error tokens.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the errors raised while evaluating a program: unresolved names,
/// uncallable values and failures reported by native functions.
pub mod runtime_error;
/// Errors raised by native functions.
///
/// These carry no source position; the evaluator wraps them in a
/// `RuntimeError` that records where the call happened.
pub mod function_error;
/// Host-level errors.
///
/// Compile failures collapsed into one message, and configuration loading
/// failures.
pub mod host_error;

pub use function_error::FunctionError;
pub use host_error::{CompileError, ConfigError};
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
use thiserror::Error;

/// Any error a caller of the crate-level entry points may see.
#[derive(Debug, Error)]
pub enum Error {
    /// The source did not parse.
    #[error(transparent)]
    Compile(#[from] CompileError),
    /// The program parsed but failed while evaluating.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// A configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
