use std::{borrow::Cow, fmt, rc::Rc};

use crate::interpreter::value::native::NativeFunction;

/// Represents a runtime value in the interpreter.
///
/// Formulas mix per-bar series with single numbers freely; operators
/// broadcast scalars over series and truncate mismatched series to the
/// shorter length. Series are reference counted so that passing a price
/// column between variables and functions does not copy it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A single number.
    Scalar(f64),
    /// One number per bar.
    NumericSeries(Rc<Vec<f64>>),
    /// One flag per bar, as produced by functions such as `CROSS`.
    BoolSeries(Rc<Vec<bool>>),
    /// Text from a string literal or a host variable.
    String(String),
    /// Result of a scalar comparison or logical operation.
    Bool(bool),
    /// A function that can be called from a formula.
    Callable(NativeFunction),
    /// Absence of a value: unresolved names in lenient mode, division by
    /// zero and operations on unsupported kinds.
    Nil,
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Self::NumericSeries(Rc::new(v))
    }
}

impl From<Vec<bool>> for Value {
    fn from(v: Vec<bool>) -> Self {
        Self::BoolSeries(Rc::new(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<NativeFunction> for Value {
    fn from(f: NativeFunction) -> Self {
        Self::Callable(f)
    }
}

impl Value {
    /// Returns the truthiness of the value.
    ///
    /// - `Nil` is false.
    /// - `Bool` is itself.
    /// - A scalar is true when nonzero.
    /// - A string is true when non-empty.
    /// - A series is true when any element is nonzero (or `true`).
    /// - A callable is true.
    ///
    /// # Example
    /// ```
    /// use formulang::interpreter::value::core::Value;
    ///
    /// assert!(!Value::Nil.to_bool());
    /// assert!(Value::from(vec![0.0, 0.0, 2.0]).to_bool());
    /// assert!(!Value::from("").to_bool());
    /// ```
    #[must_use]
    pub fn to_bool(&self) -> bool {
        match self {
            Self::Nil => false,
            Self::Bool(b) => *b,
            Self::Scalar(x) => *x != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::NumericSeries(v) => v.iter().any(|x| *x != 0.0),
            Self::BoolSeries(v) => v.iter().any(|b| *b),
            Self::Callable(_) => true,
        }
    }

    /// Reduces the value to one number, as comparison operators do with a
    /// non-series operand.
    ///
    /// `Nil`, strings and callables count as `0`, booleans as `1`/`0`, and a
    /// series as its first element (`0` when empty).
    ///
    /// # Example
    /// ```
    /// use formulang::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Bool(true).to_f64(), 1.0);
    /// assert_eq!(Value::from(vec![4.0, 5.0]).to_f64(), 4.0);
    /// assert_eq!(Value::Nil.to_f64(), 0.0);
    /// ```
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Scalar(x) => *x,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::NumericSeries(v) => v.first().copied().unwrap_or(0.0),
            Self::BoolSeries(v) => v.first().map_or(0.0, |b| f64::from(u8::from(*b))),
            Self::Nil | Self::String(_) | Self::Callable(_) => 0.0,
        }
    }

    /// Returns the number held by a `Scalar`, or `None` for any other kind.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(x) => Some(*x),
            _ => None,
        }
    }

    /// Views the value as a numeric series.
    ///
    /// Numeric series are borrowed; boolean series are converted to
    /// `1.0`/`0.0`. Every other kind yields `None`.
    ///
    /// # Example
    /// ```
    /// use formulang::interpreter::value::core::Value;
    ///
    /// let flags = Value::from(vec![true, false]);
    /// assert_eq!(flags.as_series().unwrap().as_ref(), &[1.0, 0.0]);
    /// assert!(Value::Scalar(1.0).as_series().is_none());
    /// ```
    #[must_use]
    pub fn as_series(&self) -> Option<Cow<'_, [f64]>> {
        match self {
            Self::NumericSeries(v) => Some(Cow::Borrowed(v.as_slice())),
            Self::BoolSeries(v) => {
                Some(Cow::Owned(v.iter().map(|b| f64::from(u8::from(*b))).collect()))
            },
            _ => None,
        }
    }

    /// Returns `true` for `Nil`.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// A short name of the value's kind, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "number",
            Self::NumericSeries(_) => "numeric series",
            Self::BoolSeries(_) => "boolean series",
            Self::String(_) => "string",
            Self::Bool(_) => "boolean",
            Self::Callable(_) => "function",
            Self::Nil => "nil",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
            write!(f, "[")?;
            for (index, value) in items.iter().enumerate() {
                if index > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{value}")?;
            }
            write!(f, "]")
        }

        match self {
            Self::Scalar(x) => write!(f, "{x}"),
            Self::NumericSeries(v) => write_list(f, v.as_slice()),
            Self::BoolSeries(v) => write_list(f, v.as_slice()),
            Self::String(s) => write!(f, "'{s}'"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Callable(func) => write!(f, "<function {}>", func.name()),
            Self::Nil => write!(f, "nil"),
        }
    }
}
