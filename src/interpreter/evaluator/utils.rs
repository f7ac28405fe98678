use std::borrow::Cow;

use crate::{
    error::FunctionError,
    interpreter::{evaluator::binary::broadcast::Operand, value::core::Value},
    util::num::f64_to_usize_checked,
};

/// Builds an `InvalidArgument` error for argument `index`.
pub(crate) fn invalid_argument(index: usize, details: impl Into<String>) -> FunctionError {
    FunctionError::InvalidArgument { index,
                                     details: details.into() }
}

/// Fetches argument `index`, failing if it was not supplied.
pub(crate) fn argument(args: &[Value], index: usize) -> Result<&Value, FunctionError> {
    args.get(index)
        .ok_or_else(|| invalid_argument(index, "missing argument"))
}

/// Reads argument `index` as a numeric series.
///
/// Boolean series are accepted and read as `1.0`/`0.0`.
///
/// # Errors
/// `InvalidArgument` for any non-series value.
///
/// # Example
/// ```
/// use formulang::interpreter::{evaluator::utils::series_arg, value::core::Value};
///
/// let args = [Value::from(vec![1.0, 2.0]), Value::Scalar(3.0)];
/// assert_eq!(series_arg(&args, 0).unwrap().as_ref(), &[1.0, 2.0]);
/// assert!(series_arg(&args, 1).is_err());
/// ```
pub fn series_arg(args: &[Value], index: usize) -> Result<Cow<'_, [f64]>, FunctionError> {
    let value = argument(args, index)?;
    value.as_series()
         .ok_or_else(|| invalid_argument(index, format!("expected a series, got {}", value.kind())))
}

/// Reads argument `index` as a series or a number to broadcast.
///
/// Booleans count as `1.0`/`0.0`.
///
/// # Errors
/// `InvalidArgument` for strings, callables and `Nil`.
pub fn operand_arg(args: &[Value], index: usize) -> Result<Operand<'_>, FunctionError> {
    let value = argument(args, index)?;
    Operand::from_value(value, |v| match v {
        Value::Scalar(x) => Some(*x),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        _ => None,
    }).ok_or_else(|| {
          invalid_argument(index,
                           format!("expected a number or a series, got {}", value.kind()))
      })
}

/// Reads argument `index` as a window length: a non-negative whole number.
///
/// # Errors
/// `InvalidArgument` for non-numbers and for negative, fractional or
/// non-finite numbers.
///
/// # Example
/// ```
/// use formulang::interpreter::{evaluator::utils::window_arg, value::core::Value};
///
/// assert_eq!(window_arg(&[Value::Scalar(5.0)], 0).unwrap(), 5);
/// assert!(window_arg(&[Value::Scalar(2.5)], 0).is_err());
/// ```
pub fn window_arg(args: &[Value], index: usize) -> Result<usize, FunctionError> {
    let value = argument(args, index)?;
    let Some(n) = value.as_scalar() else {
        return Err(invalid_argument(index,
                                    format!("expected a window length, got {}", value.kind())));
    };
    f64_to_usize_checked(n,
                         invalid_argument(index,
                                          format!("window length must be a whole number >= 0, got {n}")))
}

/// Like [`window_arg`], but a zero window is rejected too.
///
/// # Errors
/// `InvalidArgument` when the window is not a whole number >= 1.
pub fn positive_window_arg(args: &[Value], index: usize) -> Result<usize, FunctionError> {
    match window_arg(args, index)? {
        0 => Err(invalid_argument(index, "window length must be at least 1")),
        n => Ok(n),
    }
}

/// Truth of a series element: non-zero and not `NaN`.
#[must_use]
pub fn is_set(x: f64) -> bool {
    x != 0.0 && !x.is_nan()
}
