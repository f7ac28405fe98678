use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::broadcast::{Operand, zip_with},
            core::Interpreter,
        },
        value::core::Value,
    },
};

impl Interpreter {
    /// Applies `+ - * /` to two values.
    ///
    /// Only numbers and series take part in arithmetic; any other operand
    /// makes the result [`Value::Nil`]. Division is all-or-nothing: a zero
    /// among the divisors actually used yields `Nil` for the whole operation
    /// rather than a series sprinkled with infinities. Divisor elements cut
    /// off by truncation are never used.
    ///
    /// # Parameters
    /// - `op`: One of `Add`, `Sub`, `Mul`, `Div`.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// A scalar for two scalars, otherwise a numeric series, or `Nil`.
    ///
    /// # Example
    /// ```
    /// use formulang::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let sum = Interpreter::eval_arithmetic(BinaryOperator::Add,
    ///                                        &Value::from(vec![1.0, 2.0]),
    ///                                        &Value::from(vec![1.0, 2.0, 3.0]));
    /// assert_eq!(sum, Value::from(vec![2.0, 4.0]));
    ///
    /// let ratio = Interpreter::eval_arithmetic(BinaryOperator::Div,
    ///                                          &Value::from(vec![1.0, 2.0]),
    ///                                          &Value::from(vec![1.0, 0.0]));
    /// assert_eq!(ratio, Value::Nil);
    /// ```
    #[must_use]
    pub fn eval_arithmetic(op: BinaryOperator, left: &Value, right: &Value) -> Value {
        let (Some(lhs), Some(rhs)) = (Operand::from_value(left, Value::as_scalar),
                                      Operand::from_value(right, Value::as_scalar))
        else {
            return Value::Nil;
        };

        if op == BinaryOperator::Div && rhs.has_zero_against(&lhs) {
            return Value::Nil;
        }

        let apply = |a: f64, b: f64| match op {
            BinaryOperator::Add => a + b,
            BinaryOperator::Sub => a - b,
            BinaryOperator::Mul => a * b,
            BinaryOperator::Div => a / b,
            _ => f64::NAN,
        };

        match zip_with(&lhs, &rhs, apply) {
            Some(series) => Value::from(series),
            None => match (lhs, rhs) {
                (Operand::Scalar(a), Operand::Scalar(b)) => Value::Scalar(apply(a, b)),
                _ => Value::Nil,
            },
        }
    }
}
