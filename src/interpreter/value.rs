/// Native function values.
///
/// Defines `NativeFunction`, the callable stored in the function table and
/// produced when an identifier names a function, together with the `Arity`
/// check applied before every call.
pub mod native;

/// The runtime value type.
///
/// Declares the `Value` enum with its scalar, series, string and callable
/// variants, plus the coercions used by operators and native functions.
pub mod core;
