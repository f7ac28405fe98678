use crate::{
    ast::UnaryOperator,
    interpreter::{
        evaluator::{binary::broadcast::flag, core::Interpreter},
        value::core::Value,
    },
};

impl Interpreter {
    /// Applies a prefix operator to a value.
    ///
    /// - `NOT` on a series gives a numeric series with `1.0` where the
    ///   element was zero and `0.0` elsewhere; on anything else it gives the
    ///   negated [`Value::to_bool`].
    /// - `-` negates a scalar or every element of a series. Other kinds give
    ///   [`Value::Nil`].
    ///
    /// # Example
    /// ```
    /// use formulang::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let flags = Value::from(vec![true, false]);
    /// assert_eq!(Interpreter::eval_unary(UnaryOperator::Not, &flags),
    ///            Value::from(vec![0.0, 1.0]));
    /// assert_eq!(Interpreter::eval_unary(UnaryOperator::Negate, &Value::Scalar(2.0)),
    ///            Value::Scalar(-2.0));
    /// ```
    #[must_use]
    pub fn eval_unary(op: UnaryOperator, operand: &Value) -> Value {
        match op {
            UnaryOperator::Not => match operand.as_series() {
                Some(series) => Value::from(series.iter()
                                                  .map(|x| flag(*x == 0.0))
                                                  .collect::<Vec<_>>()),
                None => Value::Bool(!operand.to_bool()),
            },
            UnaryOperator::Negate => match operand {
                Value::Scalar(x) => Value::Scalar(-x),
                Value::NumericSeries(_) | Value::BoolSeries(_) => {
                    operand.as_series()
                           .map_or(Value::Nil, |series| {
                               Value::from(series.iter().map(|x| -x).collect::<Vec<_>>())
                           })
                },
                _ => Value::Nil,
            },
        }
    }
}
