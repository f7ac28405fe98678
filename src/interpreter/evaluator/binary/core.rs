use crate::{
    ast::BinaryOperator,
    interpreter::{evaluator::core::Interpreter, value::core::Value},
};

impl Interpreter {
    /// Evaluates a binary operation between two values.
    ///
    /// Arithmetic operators go to `eval_arithmetic`, the six comparisons to
    /// `eval_comparison`, and `AND`/`OR` to `eval_logic`. All three share
    /// the same operand shapes:
    ///
    /// - series with series: elementwise, truncated to the shorter length;
    /// - series with scalar (either side): the scalar is broadcast;
    /// - scalar with scalar: a plain scalar result.
    ///
    /// Binary operations never fail. Operands that make no sense for an
    /// operator, and division by zero, produce [`Value::Nil`].
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// The resulting value.
    ///
    /// # Example
    /// ```
    /// use formulang::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let left = Value::from(vec![1.0, 2.0, 3.0]);
    /// let result = Interpreter::eval_binary(BinaryOperator::Greater, &left, &Value::Scalar(2.0));
    /// assert_eq!(result, Value::from(vec![0.0, 0.0, 1.0]));
    /// ```
    #[must_use]
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> Value {
        if op.is_logical() {
            Self::eval_logic(op, left, right)
        } else if op.is_comparison() {
            Self::eval_comparison(op, left, right)
        } else {
            Self::eval_arithmetic(op, left, right)
        }
    }
}
