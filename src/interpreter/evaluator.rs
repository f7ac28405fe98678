/// Binary operator evaluation logic.
///
/// Handles arithmetic, comparison and logical operators, broadcasting a
/// scalar against a series and truncating two series to the shorter one.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;

/// Core evaluation logic and interpreter state.
///
/// Contains the interpreter, its output-variable and modifier registries,
/// name resolution and the missing-name policy.
pub mod core;

/// Argument helpers for native functions.
///
/// Converts evaluated arguments into series, operands and window lengths,
/// reporting mismatches as function errors.
pub mod utils;

/// Prelude functions.
///
/// The indicator functions installed into an environment on request.
pub mod function;
