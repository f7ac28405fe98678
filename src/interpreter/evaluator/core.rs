use std::collections::HashMap;

use serde::Deserialize;
use tracing::{Dispatch, debug, dispatcher, trace, warn};

use crate::{
    ast::{Expr, Position, Program, Statement},
    error::RuntimeError,
    interpreter::{environment::Environment, value::core::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Host hook consulted before the environment on every identifier lookup.
pub type VariableGetter = dyn Fn(&str) -> Option<Value>;

/// What to do when a name does not resolve or a callee is not callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Stop evaluation with a [`RuntimeError`].
    #[default]
    Strict,
    /// Log a warning and continue with [`Value::Nil`].
    Lenient,
}

/// Tree-walking interpreter for formula programs.
///
/// Besides the [`Environment`] holding variable bindings and the function
/// table, the interpreter keeps two registries filled in by assignments:
///
/// - output variables (single-colon assignments), each with an index that
///   grows by one every time such an assignment is evaluated;
/// - suffix modifiers, the `,MOD1,MOD2` tails of assignments.
///
/// Both survive across calls to [`eval`](Self::eval) and are cleared by
/// [`reset`](Self::reset).
///
/// # Example
/// ```
/// use formulang::{
///     compile,
///     interpreter::{evaluator::core::Interpreter, value::core::Value},
/// };
///
/// let mut interpreter = Interpreter::new();
/// interpreter.environment_mut().set("HIGH", vec![105.0, 106.0, 107.0].into());
/// interpreter.environment_mut().set("CLOSE", vec![100.0, 101.0, 102.0].into());
///
/// let value = interpreter.eval(&compile("t:HIGH>CLOSE;")).unwrap();
/// assert_eq!(value, Value::from(vec![1.0, 1.0, 1.0]));
/// assert_eq!(interpreter.output_variables().get("t"), Some(&1));
/// ```
pub struct Interpreter {
    env:            Environment,
    output_vars:    HashMap<String, usize>,
    output_counter: usize,
    suffix_params:  HashMap<String, Vec<String>>,
    custom_getter:  Option<Box<VariableGetter>>,
    missing:        MissingPolicy,
    dispatch:       Option<Dispatch>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter with an empty environment, strict lookups and
    /// no logging sink of its own.
    #[must_use]
    pub fn new() -> Self {
        Self::with_environment(Environment::new())
    }

    /// Creates an interpreter over an existing environment.
    #[must_use]
    pub fn with_environment(env: Environment) -> Self {
        Self { env,
               output_vars: HashMap::new(),
               output_counter: 0,
               suffix_params: HashMap::new(),
               custom_getter: None,
               missing: MissingPolicy::Strict,
               dispatch: None }
    }

    /// Routes this interpreter's log events to `dispatch` while it evaluates.
    ///
    /// Without a dispatch, events go to whatever subscriber is current.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Replaces or removes the logging sink.
    pub fn set_dispatch(&mut self, dispatch: Option<Dispatch>) {
        self.dispatch = dispatch;
    }

    /// Sets the policy for unresolved names and uncallable callees.
    pub const fn set_missing_policy(&mut self, policy: MissingPolicy) {
        self.missing = policy;
    }

    /// The current policy for unresolved names.
    #[must_use]
    pub const fn missing_policy(&self) -> MissingPolicy {
        self.missing
    }

    /// The environment holding variables and functions.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.env
    }

    /// Mutable access to the environment, for registering inputs.
    pub const fn environment_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Installs a hook that may supply a value for any identifier before the
    /// environment is consulted. Returning `None` or `Some(Value::Nil)`
    /// defers to the environment.
    pub fn set_custom_variable_getter<F>(&mut self, getter: F)
        where F: Fn(&str) -> Option<Value> + 'static
    {
        self.custom_getter = Some(Box::new(getter));
    }

    /// Removes the hook installed by
    /// [`set_custom_variable_getter`](Self::set_custom_variable_getter).
    pub fn clear_custom_variable_getter(&mut self) {
        self.custom_getter = None;
    }

    /// Output variables mapped to their index.
    #[must_use]
    pub const fn output_variables(&self) -> &HashMap<String, usize> {
        &self.output_vars
    }

    /// Output variable names ordered by index.
    #[must_use]
    pub fn output_variables_in_order(&self) -> Vec<&str> {
        let mut outputs = self.output_vars.iter().collect::<Vec<_>>();
        outputs.sort_by_key(|(_, index)| **index);
        outputs.into_iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Returns `true` if `name` was assigned with the single-colon form.
    #[must_use]
    pub fn is_output_variable(&self, name: &str) -> bool {
        self.output_vars.contains_key(name)
    }

    /// The modifiers recorded for `name`, if any.
    #[must_use]
    pub fn suffix_params(&self, name: &str) -> Option<&[String]> {
        self.suffix_params.get(name).map(Vec::as_slice)
    }

    /// Every recorded modifier list, by variable name.
    #[must_use]
    pub const fn all_suffix_params(&self) -> &HashMap<String, Vec<String>> {
        &self.suffix_params
    }

    /// Forgets all variables and both registries. Functions stay registered.
    pub fn reset(&mut self) {
        self.env.del_all_vars();
        self.output_vars.clear();
        self.suffix_params.clear();
        self.output_counter = 0;
        debug!("interpreter reset");
    }

    /// Evaluates every statement of `program` in order.
    ///
    /// The program's syntax errors are not checked here; hosts decide
    /// whether to run a program that failed to parse completely.
    ///
    /// # Returns
    /// The value of the last statement, or [`Value::Nil`] for an empty
    /// program.
    ///
    /// # Errors
    /// Under [`MissingPolicy::Strict`], the first unresolved name or
    /// uncallable callee. Under either policy, errors reported by native
    /// functions.
    pub fn eval(&mut self, program: &Program) -> EvalResult<Value> {
        match self.dispatch.clone() {
            Some(dispatch) => dispatcher::with_default(&dispatch, || self.eval_program(program)),
            None => self.eval_program(program),
        }
    }

    fn eval_program(&mut self, program: &Program) -> EvalResult<Value> {
        let mut result = Value::Nil;
        for statement in &program.statements {
            result = self.eval_statement(statement)?;
        }
        debug!(statements = program.statements.len(),
               outputs = self.output_vars.len(),
               "evaluated program");
        Ok(result)
    }

    /// Evaluates a single statement.
    ///
    /// Assignments bind their value as an ordinary variable. The
    /// single-colon form additionally receives the next output index, and a
    /// non-empty modifier list replaces the one recorded for the name.
    ///
    /// # Returns
    /// The value of the statement's expression.
    pub fn eval_statement(&mut self, statement: &Statement) -> EvalResult<Value> {
        match statement {
            Statement::Assignment { name,
                                    value,
                                    is_output,
                                    suffix_params,
                                    .. } => {
                let value = self.eval_expr(value)?;

                if *is_output {
                    self.output_counter += 1;
                    self.output_vars.insert(name.clone(), self.output_counter);
                }
                if !suffix_params.is_empty() {
                    self.suffix_params
                        .insert(name.clone(), suffix_params.clone());
                }

                debug!(name = %name,
                       output = *is_output,
                       kind = value.kind(),
                       "assigned variable");
                self.env.set(name, value.clone());
                Ok(value)
            },
            Statement::Expression { expr, .. } => self.eval_expr(expr),
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// Expressions never change interpreter state; only statements do.
    pub fn eval_expr(&self, expr: &Expr) -> EvalResult<Value> {
        trace!(expr = %expr, position = %expr.position(), "evaluating");

        match expr {
            Expr::Identifier { name, position } => self.eval_identifier(name, *position),
            Expr::NumberLiteral { value, .. } => Ok(Value::Scalar(*value)),
            Expr::StringLiteral { value, .. } => Ok(Value::String(value.clone())),
            Expr::Binary { left, op, right, .. } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                Ok(Self::eval_binary(*op, &left, &right))
            },
            Expr::Unary { op, expr, .. } => {
                let operand = self.eval_expr(expr)?;
                Ok(Self::eval_unary(*op, &operand))
            },
            Expr::FunctionCall { function,
                                 arguments,
                                 position, } => self.eval_call(function, arguments, *position),
        }
    }

    /// Resolves a name: the custom getter first, then the environment.
    fn resolve(&self, name: &str) -> Option<Value> {
        if let Some(getter) = &self.custom_getter
           && let Some(value) = getter(name)
           && !value.is_nil()
        {
            return Some(value);
        }
        self.env.get(name)
    }

    fn eval_identifier(&self, name: &str, position: Position) -> EvalResult<Value> {
        match self.resolve(name) {
            Some(value) => Ok(value),
            None => self.on_missing(RuntimeError::UnknownVariable { name: name.to_string(),
                                                                    position }),
        }
    }

    /// Evaluates a call: callee first, then the arguments left to right.
    fn eval_call(&self,
                 function: &Expr,
                 arguments: &[Expr],
                 position: Position)
                 -> EvalResult<Value> {
        let callee = match function {
            Expr::Identifier { name, .. } => match self.resolve(name) {
                Some(value) => value,
                None => {
                    return self.on_missing(RuntimeError::UnknownFunction { name: name.clone(),
                                                                           position });
                },
            },
            other => self.eval_expr(other)?,
        };

        let args = arguments.iter()
                            .map(|arg| self.eval_expr(arg))
                            .collect::<EvalResult<Vec<_>>>()?;

        let Value::Callable(func) = callee else {
            return self.on_missing(RuntimeError::NotCallable { callee: function.to_string(),
                                                               position });
        };

        func.call(&args)
            .map_err(|source| RuntimeError::FunctionFailed { name: func.name().to_string(),
                                                             position,
                                                             source })
    }

    /// Applies the missing-name policy to `error`.
    fn on_missing(&self, error: RuntimeError) -> EvalResult<Value> {
        match self.missing {
            MissingPolicy::Strict => Err(error),
            MissingPolicy::Lenient => {
                warn!(error = %error, "substituting nil");
                Ok(Value::Nil)
            },
        }
    }
}
