use thiserror::Error;

use crate::{ast::Position, error::FunctionError};

/// Represents all errors that can occur during evaluation.
///
/// Only strict evaluation produces `UnknownVariable`, `UnknownFunction` and
/// `NotCallable`; lenient evaluation substitutes `Nil` instead.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// An identifier resolved to nothing.
    #[error("{position}: variable '{name}' is not defined")]
    UnknownVariable {
        /// The name of the variable.
        name:     String,
        /// Where the identifier appears.
        position: Position,
    },
    /// A call named a function that is not registered.
    #[error("{position}: function '{name}' is not defined")]
    UnknownFunction {
        /// The name of the function.
        name:     String,
        /// Where the call appears.
        position: Position,
    },
    /// The callee of a call evaluated to something other than a function.
    #[error("{position}: '{callee}' is not callable")]
    NotCallable {
        /// The callee expression, printed.
        callee:   String,
        /// Where the call appears.
        position: Position,
    },
    /// A native function rejected its arguments.
    #[error("{position}: call to '{name}' failed: {source}")]
    FunctionFailed {
        /// The function's registered name.
        name:     String,
        /// Where the call appears.
        position: Position,
        /// The function's own error.
        source:   FunctionError,
    },
}
