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

impl Interpreter {
    /// Applies `AND` or `OR` to two values.
    ///
    /// Series elements are true when nonzero. A non-series operand is
    /// reduced to one truth value with [`Value::to_bool`] and broadcast.
    /// When either side is a series the result is a numeric series of
    /// `1.0`/`0.0`; otherwise it is a [`Value::Bool`].
    ///
    /// Both operands are always evaluated; there is no short-circuiting.
    ///
    /// # Example
    /// ```
    /// use formulang::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let flags = Value::from(vec![1.0, 0.0, 2.0]);
    /// assert_eq!(Interpreter::eval_logic(BinaryOperator::And, &flags, &Value::Bool(true)),
    ///            Value::from(vec![1.0, 0.0, 1.0]));
    /// assert_eq!(Interpreter::eval_logic(BinaryOperator::Or, &Value::Nil, &Value::Scalar(3.0)),
    ///            Value::Bool(true));
    /// ```
    #[must_use]
    pub fn eval_logic(op: BinaryOperator, left: &Value, right: &Value) -> Value {
        let combine = |a: bool, b: bool| match op {
            BinaryOperator::And => a && b,
            BinaryOperator::Or => a || b,
            _ => false,
        };

        let to_flag = |v: &Value| Some(flag(v.to_bool()));
        let (Some(lhs), Some(rhs)) =
            (Operand::from_value(left, to_flag), Operand::from_value(right, to_flag))
        else {
            return Value::Nil;
        };

        match zip_with(&lhs, &rhs, |a, b| flag(combine(a != 0.0, b != 0.0))) {
            Some(series) => Value::from(series),
            None => Value::Bool(combine(left.to_bool(), right.to_bool())),
        }
    }
}
