//! # formulang
//!
//! formulang is an interpreter for a small formula language used to describe
//! technical-analysis indicators over price series.
//! It strips comments, tokenizes, parses into an AST, and evaluates with
//! elementwise broadcasting over series, recording which assignments are
//! outputs and which display modifiers they carry.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Program,
    error::{CompileError, Error},
    interpreter::{
        comment::trim_comment, evaluator::core::Interpreter, lexer::tokenize,
        parser::statement::parse_program, value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` types that represent
/// formulas as a tree, and the `Program` the parser returns. The AST is
/// built by the parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches line and column positions to AST nodes for error reporting.
/// - Renders nodes back to a canonical source form.
pub mod ast;
/// Session settings loaded from TOML.
///
/// Selects the missing-name policy, whether the prelude is installed, the
/// variable aliases and the names searched for the time axis.
pub mod config;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while parsing or
/// evaluating formulas, and while loading configuration. Errors carry the
/// source location where one exists.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, evaluator, native
///   functions, host).
/// - Attaches line and column positions for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of formula execution.
///
/// This module ties together comment stripping, lexing, parsing,
/// environments, values and evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating formulas.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The host facade.
///
/// Wraps an interpreter with input registration, alias handling and
/// output inspection.
pub mod session;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `usize` and `f64` without silent data loss.
pub mod util;

/// Compiles formula source into a [`Program`].
///
/// Comments are stripped, the rest is tokenized and parsed. Syntax errors
/// are recorded in [`Program::errors`] rather than returned.
///
/// # Example
/// ```
/// use formulang::compile;
///
/// let program = compile("x:=1+2*3; {note} y:x>2,DOTLINE;");
/// assert!(program.is_valid());
/// assert_eq!(program.to_string(), "x := (1 + (2 * 3));y : (x > 2),DOTLINE;");
/// ```
#[must_use]
pub fn compile(source: &str) -> Program {
    parse_program(&tokenize(&trim_comment(source)))
}

/// Compiles and evaluates `source` with a fresh interpreter.
///
/// The interpreter has the prelude installed and strict lookups.
///
/// # Errors
/// `Error::Compile` if the source has syntax errors, `Error::Runtime` if
/// evaluation fails.
///
/// # Examples
/// ```
/// use formulang::{interpreter::value::core::Value, run};
///
/// assert_eq!(run("x:=1+2*3; x;").unwrap(), Value::Scalar(7.0));
///
/// // `y` is not defined.
/// assert!(run("z:=y+1;").is_err());
/// ```
pub fn run(source: &str) -> Result<Value, Error> {
    let program = compile(source);
    if !program.is_valid() {
        return Err(CompileError { errors: program.errors }.into());
    }

    let mut interpreter = Interpreter::new();
    interpreter::evaluator::function::core::register_prelude(interpreter.environment_mut());
    Ok(interpreter.eval(&program)?)
}
