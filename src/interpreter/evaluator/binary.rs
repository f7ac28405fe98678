/// Binary operator dispatch.
///
/// Routes each operator to the arithmetic, comparison or logic handler.
pub mod core;

/// Operand shapes and elementwise combination.
///
/// Implements scalar broadcasting and truncation to the shorter series,
/// shared by every operator class and by the built-in functions.
pub mod broadcast;

/// Arithmetic operators `+ - * /`.
pub mod arithmetic;

/// Comparison operators and tolerant float equality.
pub mod comparison;

/// Logical operators `AND` and `OR`.
pub mod logic;
