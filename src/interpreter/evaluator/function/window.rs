use crate::{
    error::FunctionError,
    interpreter::{
        evaluator::{
            function::math::Extreme,
            utils::{invalid_argument, is_set, positive_window_arg, series_arg, window_arg},
        },
        value::core::Value,
    },
    util::num::usize_to_f64_checked,
};

/// Applies `f` to every full window of `n` bars ending at each position.
///
/// Positions before the first full window are `NaN`.
fn rolling<F>(series: &[f64], n: usize, f: F) -> Vec<f64>
    where F: Fn(&[f64]) -> f64
{
    (0..series.len()).map(|i| match (i + 1).checked_sub(n) {
                         Some(start) => f(&series[start..=i]),
                         None => f64::NAN,
                     })
                     .collect()
}

/// Sum of the non-`NaN` elements.
fn nan_sum(window: &[f64]) -> f64 {
    window.iter().filter(|x| !x.is_nan()).sum()
}

/// `REF(S, N)`: the series shifted `N` bars into the future.
///
/// The first `N` positions become `NaN`; `N = 0` returns the series as is.
///
/// # Example
/// ```
/// use formulang::interpreter::{evaluator::function::window::reference, value::core::Value};
///
/// let shifted = reference(&[vec![1.0, 2.0, 3.0].into(), Value::Scalar(1.0)]).unwrap();
/// assert_eq!(shifted.to_string(), "[NaN, 1, 2]");
/// ```
pub fn reference(args: &[Value]) -> Result<Value, FunctionError> {
    let series = series_arg(args, 0)?;
    let n = window_arg(args, 1)?;

    let shifted = (0..series.len()).map(|i| i.checked_sub(n).map_or(f64::NAN, |j| series[j]))
                                   .collect::<Vec<_>>();
    Ok(shifted.into())
}

/// `SUM(S, N)`: rolling sum over `N` bars, skipping `NaN`.
///
/// With `N = 0` the sum is cumulative from the first bar.
///
/// # Example
/// ```
/// use formulang::interpreter::{evaluator::function::window::sum, value::core::Value};
///
/// let s = Value::from(vec![1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(sum(&[s.clone(), Value::Scalar(0.0)]).unwrap(),
///            Value::from(vec![1.0, 3.0, 6.0, 10.0]));
/// assert_eq!(sum(&[s, Value::Scalar(2.0)]).unwrap().to_string(), "[NaN, 3, 5, 7]");
/// ```
pub fn sum(args: &[Value]) -> Result<Value, FunctionError> {
    let series = series_arg(args, 0)?;
    let n = window_arg(args, 1)?;

    if n == 0 {
        let cumulative = series.iter()
                               .scan(0.0, |total, x| {
                                   if !x.is_nan() {
                                       *total += x;
                                   }
                                   Some(*total)
                               })
                               .collect::<Vec<_>>();
        return Ok(cumulative.into());
    }

    Ok(rolling(&series, n, nan_sum).into())
}

/// `MA(S, N)`: simple moving average over `N` bars.
///
/// `NaN` elements add nothing to the window sum but still count towards
/// `N`.
///
/// # Errors
/// `InvalidArgument` when `N` is not a whole number >= 1.
///
/// # Example
/// ```
/// use formulang::interpreter::{evaluator::function::window::moving_average, value::core::Value};
///
/// let ma = moving_average(&[vec![2.0, 4.0, 6.0].into(), Value::Scalar(2.0)]).unwrap();
/// assert_eq!(ma.to_string(), "[NaN, 3, 5]");
/// ```
pub fn moving_average(args: &[Value]) -> Result<Value, FunctionError> {
    let series = series_arg(args, 0)?;
    let n = positive_window_arg(args, 1)?;
    let divisor = usize_to_f64_checked(n, invalid_argument(1, "window length is too large"))?;

    Ok(rolling(&series, n, |window| nan_sum(window) / divisor).into())
}

/// `HHV(S, N)` and `LLV(S, N)`: highest or lowest value over `N` bars.
///
/// `NaN` elements are ignored; a window holding nothing else gives `NaN`.
///
/// # Errors
/// `InvalidArgument` when `N` is not a whole number >= 1.
///
/// # Example
/// ```
/// use formulang::interpreter::{
///     evaluator::function::{math::Extreme, window::extreme},
///     value::core::Value,
/// };
///
/// let s = Value::from(vec![3.0, 1.0, 4.0, 1.0, 5.0]);
/// let hhv = extreme(Extreme::Max, &[s.clone(), Value::Scalar(3.0)]).unwrap();
/// assert_eq!(hhv.to_string(), "[NaN, NaN, 4, 4, 5]");
/// let llv = extreme(Extreme::Min, &[s, Value::Scalar(2.0)]).unwrap();
/// assert_eq!(llv.to_string(), "[NaN, 1, 1, 1, 1]");
/// ```
pub fn extreme(which: Extreme, args: &[Value]) -> Result<Value, FunctionError> {
    let series = series_arg(args, 0)?;
    let n = positive_window_arg(args, 1)?;

    let extremes = rolling(&series, n, |window| {
        window.iter()
              .copied()
              .filter(|x| !x.is_nan())
              .reduce(|best, x| which.pick(x, best))
              .unwrap_or(f64::NAN)
    });
    Ok(extremes.into())
}

/// `COUNT(COND, N)`: how many of the last `N` bars satisfy a condition.
///
/// The condition is a series; an element counts when it is non-zero and not
/// `NaN`.
///
/// # Errors
/// `InvalidArgument` when `N` is not a whole number >= 1.
///
/// # Example
/// ```
/// use formulang::interpreter::{evaluator::function::window::count, value::core::Value};
///
/// let up = Value::from(vec![true, false, true, true]);
/// let counted = count(&[up, Value::Scalar(2.0)]).unwrap();
/// assert_eq!(counted.to_string(), "[NaN, 1, 1, 2]");
/// ```
pub fn count(args: &[Value]) -> Result<Value, FunctionError> {
    let condition = series_arg(args, 0)?;
    let n = positive_window_arg(args, 1)?;

    let counted = rolling(&condition, n, |window| {
        window.iter()
              .filter(|x| is_set(**x))
              .fold(0.0, |total, _| total + 1.0)
    });
    Ok(counted.into())
}
