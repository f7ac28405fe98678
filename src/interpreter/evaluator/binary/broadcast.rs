use std::borrow::Cow;

use crate::interpreter::value::core::Value;

/// One side of an elementwise operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<'a> {
    /// A series, borrowed when possible.
    Series(Cow<'a, [f64]>),
    /// A single number, broadcast against a series.
    Scalar(f64),
}

impl<'a> Operand<'a> {
    /// Views `value` as an operand.
    ///
    /// Series become [`Operand::Series`]; any other value is reduced to a
    /// number by `scalar`, which may refuse it by returning `None`.
    ///
    /// # Example
    /// ```
    /// use formulang::interpreter::{evaluator::binary::broadcast::Operand, value::core::Value};
    ///
    /// let scalar = Operand::from_value(&Value::Bool(true), |v| Some(v.to_f64()));
    /// assert_eq!(scalar, Some(Operand::Scalar(1.0)));
    ///
    /// let refused = Operand::from_value(&Value::Nil, Value::as_scalar);
    /// assert_eq!(refused, None);
    /// ```
    pub fn from_value<F>(value: &'a Value, scalar: F) -> Option<Self>
        where F: FnOnce(&Value) -> Option<f64>
    {
        match value.as_series() {
            Some(series) => Some(Self::Series(series)),
            None => scalar(value).map(Self::Scalar),
        }
    }

    /// Returns `true` if a zero of this operand would meet `other` in
    /// [`zip_with`].
    ///
    /// Elements past the end of a shorter `other` series are cut off by
    /// the zip and do not count.
    ///
    /// # Example
    /// ```
    /// use formulang::interpreter::evaluator::binary::broadcast::Operand;
    ///
    /// let divisor = Operand::Series(vec![1.0, 2.0, 0.0].into());
    /// assert!(!divisor.has_zero_against(&Operand::Series(vec![1.0, 2.0].into())));
    /// assert!(divisor.has_zero_against(&Operand::Scalar(1.0)));
    /// ```
    #[must_use]
    pub fn has_zero_against(&self, other: &Operand<'_>) -> bool {
        match (self, other) {
            (Self::Scalar(x), _) => *x == 0.0,
            (Self::Series(series), Operand::Series(paired)) => {
                series.iter().take(paired.len()).any(|x| *x == 0.0)
            },
            (Self::Series(series), Operand::Scalar(_)) => series.contains(&0.0),
        }
    }

    /// Returns the operand's value at bar `i`.
    ///
    /// Scalars have the same value at every bar.
    #[must_use]
    pub fn at(&self, i: usize) -> Option<f64> {
        match self {
            Self::Series(series) => series.get(i).copied(),
            Self::Scalar(x) => Some(*x),
        }
    }

    /// The series length, or `None` for a scalar.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Series(series) => Some(series.len()),
            Self::Scalar(_) => None,
        }
    }
}

/// Combines two operands elementwise.
///
/// Two series are truncated to the shorter length; a scalar is broadcast
/// across the other side's full length.
///
/// # Returns
/// The combined series, or `None` when both operands are scalars.
///
/// # Example
/// ```
/// use formulang::interpreter::evaluator::binary::broadcast::{Operand, zip_with};
///
/// let a = Operand::Series(vec![1.0, 2.0].into());
/// let b = Operand::Series(vec![1.0, 2.0, 3.0].into());
/// assert_eq!(zip_with(&a, &b, |x, y| x + y), Some(vec![2.0, 4.0]));
/// assert_eq!(zip_with(&Operand::Scalar(1.0), &Operand::Scalar(2.0), |x, y| x + y), None);
/// ```
pub fn zip_with<F>(left: &Operand<'_>, right: &Operand<'_>, f: F) -> Option<Vec<f64>>
    where F: Fn(f64, f64) -> f64
{
    match (left, right) {
        (Operand::Series(a), Operand::Series(b)) => {
            Some(a.iter().zip(b.iter()).map(|(x, y)| f(*x, *y)).collect())
        },
        (Operand::Series(a), Operand::Scalar(y)) => Some(a.iter().map(|x| f(*x, *y)).collect()),
        (Operand::Scalar(x), Operand::Series(b)) => Some(b.iter().map(|y| f(*x, *y)).collect()),
        (Operand::Scalar(_), Operand::Scalar(_)) => None,
    }
}

/// Converts a truth value to the `1.0`/`0.0` sentinel used in series.
#[must_use]
pub fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}
