use tracing::debug;

use crate::{
    error::FunctionError,
    interpreter::{
        environment::Environment,
        evaluator::function::{
            condition,
            math::{self, Extreme},
            window,
        },
        value::{
            core::Value,
            native::{Arity, NativeFunction},
        },
    },
};

/// Type alias for prelude function handlers.
///
/// A handler receives a slice of evaluated argument values whose count
/// already satisfies the entry's arity.
type BuiltinFn = fn(&[Value]) -> Result<Value, FunctionError>;

/// Defines prelude functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the function.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table walked on registration),
/// - `PRELUDE_FUNCTIONS` (public list of names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of every function installed by [`register_prelude`].
        pub const PRELUDE_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "ABS"   => { arity: Arity::Exact(1), func: math::abs },
    "MAX"   => { arity: Arity::Exact(2), func: |args| math::extreme(Extreme::Max, args) },
    "MIN"   => { arity: Arity::Exact(2), func: |args| math::extreme(Extreme::Min, args) },
    "IF"    => { arity: Arity::Exact(3), func: condition::if_then_else },
    "CROSS" => { arity: Arity::Exact(2), func: condition::cross },
    "REF"   => { arity: Arity::Exact(2), func: window::reference },
    "SUM"   => { arity: Arity::Exact(2), func: window::sum },
    "MA"    => { arity: Arity::Exact(2), func: window::moving_average },
    "HHV"   => { arity: Arity::Exact(2), func: |args| window::extreme(Extreme::Max, args) },
    "LLV"   => { arity: Arity::Exact(2), func: |args| window::extreme(Extreme::Min, args) },
    "COUNT" => { arity: Arity::Exact(2), func: window::count },
}

/// Installs every prelude function into `env`.
///
/// Functions go into the function table, so a variable of the same name
/// shadows them without removing them.
///
/// # Example
/// ```
/// use formulang::interpreter::{
///     environment::Environment,
///     evaluator::function::core::{PRELUDE_FUNCTIONS, register_prelude},
/// };
///
/// let mut env = Environment::new();
/// register_prelude(&mut env);
///
/// assert!(PRELUDE_FUNCTIONS.iter().all(|name| env.get_function(name).is_some()));
/// ```
pub fn register_prelude(env: &mut Environment) {
    for def in BUILTIN_TABLE {
        env.set_function(def.name, NativeFunction::new(def.name, def.arity, def.func));
    }
    debug!(count = BUILTIN_TABLE.len(), "registered prelude functions");
}
