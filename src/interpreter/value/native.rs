use std::{fmt, rc::Rc};

use crate::{error::FunctionError, interpreter::value::core::Value};

/// Signature of the closure behind a [`NativeFunction`].
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, FunctionError>;

/// Specifies the allowed number of arguments for a native function.
///
/// - `Exact(n)` means the function must receive exactly `n` arguments.
/// - `OneOf(slice)` means it accepts any count listed in `slice`.
/// - `Any` leaves counting to the function itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// Any of these argument counts.
    OneOf(&'static [usize]),
    /// No restriction.
    Any,
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// Returns `true` if the count is permitted, `false` otherwise.
    #[must_use]
    pub fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(counts) => counts.contains(&n),
            Self::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::OneOf(counts) => {
                let counts = counts.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "{}", counts.join(" or "))
            },
            Self::Any => write!(f, "any number of"),
        }
    }
}

/// A function callable from formulas.
///
/// Native functions are plain closures over evaluated argument values. The
/// arity is checked before the closure runs, so the closure may index its
/// arguments directly; the kinds of the arguments are the closure's own
/// business.
///
/// Two `NativeFunction`s are equal when they share the same closure.
///
/// # Example
/// ```
/// use formulang::interpreter::value::{
///     core::Value,
///     native::{Arity, NativeFunction},
/// };
///
/// let double = NativeFunction::new("DOUBLE", Arity::Exact(1), |args| {
///     Ok(Value::Scalar(args[0].to_f64() * 2.0))
/// });
///
/// assert_eq!(double.call(&[Value::Scalar(4.0)]).unwrap(), Value::Scalar(8.0));
/// assert!(double.call(&[]).is_err());
/// ```
#[derive(Clone)]
pub struct NativeFunction {
    name:  Rc<str>,
    arity: Arity,
    func:  Rc<NativeFn>,
}

impl NativeFunction {
    /// Wraps a closure as a callable value.
    ///
    /// # Parameters
    /// - `name`: Name used in error messages; normally the name it is
    ///   registered under.
    /// - `arity`: Accepted argument counts.
    /// - `func`: The implementation.
    pub fn new<F>(name: &str, arity: Arity, func: F) -> Self
        where F: Fn(&[Value]) -> Result<Value, FunctionError> + 'static
    {
        Self { name: Rc::from(name),
               arity,
               func: Rc::new(func) }
    }

    /// The function's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The accepted argument counts.
    #[must_use]
    pub const fn arity(&self) -> Arity {
        self.arity
    }

    /// Checks the argument count and invokes the function.
    ///
    /// # Errors
    /// `ArgumentCountMismatch` if the count does not satisfy the arity, or
    /// whatever the function itself returns.
    pub fn call(&self, args: &[Value]) -> Result<Value, FunctionError> {
        if !self.arity.check(args.len()) {
            return Err(FunctionError::ArgumentCountMismatch { expected: self.arity.to_string(),
                                                              found:    args.len(), });
        }
        (self.func)(args)
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}
