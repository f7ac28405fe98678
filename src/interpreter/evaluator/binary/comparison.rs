use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::broadcast::{Operand, flag, zip_with},
            core::Interpreter,
        },
        value::core::Value,
    },
};

/// Below this magnitude both values count as "near zero".
const NEAR_ZERO: f64 = 1e-6;
/// Differences below this are always equal.
const ABS_EPSILON: f64 = 1e-10;
/// Largest relative difference still considered equal.
const REL_TOLERANCE: f64 = 0.01;

/// Tolerant equality for prices produced by chained indicator arithmetic.
///
/// - Two NaNs are equal; a NaN and a number are not.
/// - Values whose integer parts differ are never equal.
/// - Two values below `1e-6` in magnitude are equal when they differ by
///   less than `1e-6`.
/// - Otherwise values are equal when they differ by less than `1e-10`, or by
///   less than 1% of the larger magnitude.
///
/// # Example
/// ```
/// use formulang::interpreter::evaluator::binary::comparison::float_equal;
///
/// assert!(float_equal(100.004, 100.0));
/// assert!(!float_equal(100.999, 101.0));
/// assert!(float_equal(f64::NAN, f64::NAN));
/// assert!(!float_equal(f64::NAN, 1.0));
/// ```
#[must_use]
#[allow(clippy::float_cmp)]
pub fn float_equal(a: f64, b: f64) -> bool {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => return true,
        (true, false) | (false, true) => return false,
        (false, false) => {},
    }
    if a == b {
        return true;
    }
    if a.trunc() != b.trunc() {
        return false;
    }

    let diff = (a - b).abs();
    if a.abs() < NEAR_ZERO && b.abs() < NEAR_ZERO {
        return diff < NEAR_ZERO;
    }
    if diff < ABS_EPSILON {
        return true;
    }
    let largest = a.abs().max(b.abs());
    if largest < ABS_EPSILON {
        return true;
    }
    diff / largest < REL_TOLERANCE
}

/// Compares two numbers with one of the six comparison operators.
fn compare(op: BinaryOperator, a: f64, b: f64) -> bool {
    match op {
        BinaryOperator::Greater => a > b,
        BinaryOperator::Less => a < b,
        BinaryOperator::GreaterEqual => a >= b,
        BinaryOperator::LessEqual => a <= b,
        BinaryOperator::Equal => float_equal(a, b),
        BinaryOperator::NotEqual => !float_equal(a, b),
        _ => false,
    }
}

impl Interpreter {
    /// Applies a comparison operator to two values.
    ///
    /// When either side is a series the result is a numeric series of
    /// `1.0`/`0.0`, truncated or broadcast like arithmetic; the non-series
    /// side is reduced with [`Value::to_f64`]. Two non-series values give a
    /// [`Value::Bool`]. `==` and `!=` use [`float_equal`]; two strings are
    /// compared by their text.
    ///
    /// # Parameters
    /// - `op`: A comparison operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// A numeric series of flags, or a boolean.
    #[must_use]
    pub fn eval_comparison(op: BinaryOperator, left: &Value, right: &Value) -> Value {
        if let (Value::String(a), Value::String(b)) = (left, right) {
            match op {
                BinaryOperator::Equal => return Value::Bool(a == b),
                BinaryOperator::NotEqual => return Value::Bool(a != b),
                _ => {},
            }
        }

        let to_number = |v: &Value| Some(v.to_f64());
        let (Some(lhs), Some(rhs)) =
            (Operand::from_value(left, to_number), Operand::from_value(right, to_number))
        else {
            return Value::Nil;
        };

        match zip_with(&lhs, &rhs, |a, b| flag(compare(op, a, b))) {
            Some(series) => Value::from(series),
            None => Value::Bool(compare(op, left.to_f64(), right.to_f64())),
        }
    }
}
