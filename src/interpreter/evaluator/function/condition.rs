use std::cmp::Ordering;

use crate::{
    error::FunctionError,
    interpreter::{
        evaluator::utils::{argument, invalid_argument, is_set, operand_arg},
        value::core::Value,
    },
};

/// `IF(COND, A, B)`: picks `A` where the condition holds and `B` elsewhere.
///
/// With a series condition the result has the condition's length. Each
/// position takes `A`'s element when the condition element is set and `A`
/// reaches that far, otherwise `B`'s element, otherwise `NaN`. Scalars in
/// `A` or `B` are broadcast.
///
/// With a non-series condition, `A` or `B` is returned whole, chosen by the
/// condition's truth.
///
/// # Example
/// ```
/// use formulang::interpreter::{evaluator::function::condition::if_then_else, value::core::Value};
///
/// let cond = Value::from(vec![true, false, true]);
/// let picked = if_then_else(&[cond, vec![1.0, 2.0, 3.0].into(), Value::Scalar(0.0)]).unwrap();
/// assert_eq!(picked, Value::from(vec![1.0, 0.0, 3.0]));
///
/// let whole = if_then_else(&[Value::Bool(false), Value::Scalar(1.0), Value::from("b")]).unwrap();
/// assert_eq!(whole, Value::from("b"));
/// ```
pub fn if_then_else(args: &[Value]) -> Result<Value, FunctionError> {
    let condition = argument(args, 0)?;
    let Some(condition) = condition.as_series() else {
        let chosen = if condition.to_bool() { 1 } else { 2 };
        return argument(args, chosen).cloned();
    };

    let then = operand_arg(args, 1)?;
    let otherwise = operand_arg(args, 2)?;

    let picked = condition.iter()
                          .enumerate()
                          .map(|(i, c)| {
                              let value = if is_set(*c) {
                                  then.at(i).or_else(|| otherwise.at(i))
                              } else {
                                  otherwise.at(i)
                              };
                              value.unwrap_or(f64::NAN)
                          })
                          .collect::<Vec<_>>();
    Ok(picked.into())
}

/// `CROSS(A, B)`: bars where `A` moves from at or below `B` to above it.
///
/// The result is a boolean series following `A`'s length (or `B`'s, when
/// `A` is a scalar). The first bar is never a cross, nor is any bar past
/// the end of the shorter side.
///
/// # Errors
/// `InvalidArgument` when neither side is a series.
///
/// # Example
/// ```
/// use formulang::interpreter::{evaluator::function::condition::cross, value::core::Value};
///
/// let fast = Value::from(vec![1.0, 2.0, 4.0, 3.0]);
/// let crossed = cross(&[fast, Value::Scalar(2.5)]).unwrap();
/// assert_eq!(crossed, Value::from(vec![false, false, true, false]));
/// ```
pub fn cross(args: &[Value]) -> Result<Value, FunctionError> {
    let a = operand_arg(args, 0)?;
    let b = operand_arg(args, 1)?;

    let Some(len) = a.len().or_else(|| b.len()) else {
        return Err(invalid_argument(0, "CROSS needs at least one series"));
    };

    let crossed = (0..len).map(|i| {
                              let Some(prev) = i.checked_sub(1) else {
                                  return false;
                              };
                              match (a.at(prev), b.at(prev), a.at(i), b.at(i)) {
                                  (Some(pa), Some(pb), Some(ca), Some(cb)) => {
                                      pa.partial_cmp(&pb) != Some(Ordering::Greater) && ca > cb
                                  },
                                  _ => false,
                              }
                          })
                          .collect::<Vec<_>>();
    Ok(crossed.into())
}
