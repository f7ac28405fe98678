use crate::{
    error::FunctionError,
    interpreter::{
        evaluator::{binary::broadcast::Operand, utils::operand_arg},
        value::core::Value,
    },
};

/// Selects which end of an ordering a function picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    /// The larger value.
    Max,
    /// The smaller value.
    Min,
}

impl Extreme {
    /// Picks between `a` and `b`.
    ///
    /// `a` wins only when it compares strictly better, so a `NaN` on either
    /// side yields `b`.
    #[must_use]
    pub fn pick(self, a: f64, b: f64) -> f64 {
        let a_wins = match self {
            Self::Max => a > b,
            Self::Min => a < b,
        };
        if a_wins { a } else { b }
    }
}

/// Absolute value of a number or of every element of a series.
///
/// # Example
/// ```
/// use formulang::interpreter::{evaluator::function::math::abs, value::core::Value};
///
/// assert_eq!(abs(&[Value::Scalar(-2.0)]).unwrap(), Value::Scalar(2.0));
/// assert_eq!(abs(&[vec![-1.0, 3.0].into()]).unwrap(), Value::from(vec![1.0, 3.0]));
/// ```
pub fn abs(args: &[Value]) -> Result<Value, FunctionError> {
    match operand_arg(args, 0)? {
        Operand::Series(series) => Ok(series.iter().map(|x| x.abs()).collect::<Vec<_>>().into()),
        Operand::Scalar(x) => Ok(Value::Scalar(x.abs())),
    }
}

/// Elementwise maximum or minimum of two operands.
///
/// The result follows the first series argument's length. Where the other
/// side has run out of elements, the first side's element is kept. A scalar
/// is broadcast, and two scalars give a scalar.
///
/// # Parameters
/// - `which`: `Max` for `MAX`, `Min` for `MIN`.
/// - `args`: Two numbers or series.
///
/// # Example
/// ```
/// use formulang::interpreter::{
///     evaluator::function::math::{Extreme, extreme},
///     value::core::Value,
/// };
///
/// let args = [vec![1.0, 5.0, 3.0].into(), vec![2.0, 2.0].into()];
/// assert_eq!(extreme(Extreme::Max, &args).unwrap(), Value::from(vec![2.0, 5.0, 3.0]));
///
/// let args = [Value::Scalar(4.0), vec![1.0, 9.0].into()];
/// assert_eq!(extreme(Extreme::Min, &args).unwrap(), Value::from(vec![1.0, 4.0]));
/// ```
pub fn extreme(which: Extreme, args: &[Value]) -> Result<Value, FunctionError> {
    let left = operand_arg(args, 0)?;
    let right = operand_arg(args, 1)?;

    let Some(len) = left.len().or_else(|| right.len()) else {
        return match (left, right) {
            (Operand::Scalar(a), Operand::Scalar(b)) => Ok(Value::Scalar(which.pick(a, b))),
            _ => Ok(Value::Nil),
        };
    };

    let picked = (0..len).map(|i| match (left.at(i), right.at(i)) {
                             (Some(a), Some(b)) => which.pick(a, b),
                             (Some(x), None) | (None, Some(x)) => x,
                             (None, None) => f64::NAN,
                         })
                         .collect::<Vec<_>>();
    Ok(picked.into())
}
