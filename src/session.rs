use std::collections::{BTreeMap, HashMap};

use tracing::{Dispatch, debug};

use crate::{
    ast::Program,
    config::SessionConfig,
    error::{CompileError, Error, FunctionError, ParseError},
    interpreter::{
        evaluator::{core::Interpreter, function::core::register_prelude},
        value::{
            core::Value,
            native::{Arity, NativeFunction},
        },
    },
};

/// A host-facing handle that compiles and runs formulas.
///
/// A session owns one [`Interpreter`]. Input series are registered as
/// variables, formulas are executed against them, and the results are read
/// back through the output-variable registry. Everything except registered
/// functions can be cleared with [`reset`](Self::reset) to reuse the
/// session for the next instrument.
///
/// # Example
/// ```
/// use formulang::{interpreter::value::core::Value, session::Session};
///
/// let mut session = Session::new();
/// session.register_variable("CLOSE", vec![10.0, 11.0, 12.0, 13.0]);
/// session.apply_aliases(None);
///
/// session.execute("MA2:MA(C,2),COLORRED; UP:=C>REF(C,1);").unwrap();
///
/// assert_eq!(session.output_variables_in_order(), ["MA2"]);
/// assert_eq!(session.suffix_params("MA2"), Some(&["COLORRED".to_string()][..]));
/// assert_eq!(session.float_series("MA2").unwrap()[3], 12.5);
/// assert!(!session.is_output_variable("UP"));
/// ```
pub struct Session {
    interpreter:    Interpreter,
    aliases:        BTreeMap<String, String>,
    date_time_keys: Vec<String>,
    date_time_key:  Option<String>,
    syntax_errors:  Vec<ParseError>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with the default configuration: strict lookups
    /// and the prelude installed.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&SessionConfig::default())
    }

    /// Creates a session from `config`.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        let mut interpreter = Interpreter::new();
        interpreter.set_missing_policy(config.missing);
        if config.prelude {
            register_prelude(interpreter.environment_mut());
        }

        Self { interpreter,
               aliases: config.aliases.clone(),
               date_time_keys: config.date_time_keys.clone(),
               date_time_key: None,
               syntax_errors: Vec::new() }
    }

    /// Sends the interpreter's log events to `dispatch` during execution.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.interpreter.set_dispatch(Some(dispatch));
        self
    }

    /// The underlying interpreter.
    #[must_use]
    pub const fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Mutable access to the underlying interpreter.
    pub const fn interpreter_mut(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }

    /// Strips comments, tokenizes and parses `source`.
    ///
    /// Syntax errors are left in the returned program.
    #[must_use]
    pub fn compile(&self, source: &str) -> Program {
        crate::compile(source)
    }

    /// Like [`compile`](Self::compile), but a program with syntax errors is
    /// turned into a single error.
    ///
    /// # Errors
    /// `CompileError` carrying every syntax error of the program.
    pub fn compile_checked(&self, source: &str) -> Result<Program, CompileError> {
        let program = self.compile(source);
        if program.is_valid() {
            Ok(program)
        } else {
            Err(CompileError { errors: program.errors })
        }
    }

    /// Compiles `source` and renders it as an indented node tree.
    ///
    /// Useful when checking how a formula was grouped; see
    /// [`Program::tree`] for the layout.
    #[must_use]
    pub fn program_tree(&self, source: &str) -> String {
        let program = self.compile(source);
        debug!(statements = program.statements.len(),
               errors = program.errors.len(),
               "rendering program tree");
        program.tree().to_string()
    }

    /// Compiles and evaluates `source`.
    ///
    /// The syntax errors found are kept and can be read with
    /// [`syntax_errors`](Self::syntax_errors) until the next call.
    ///
    /// # Returns
    /// The value of the last statement.
    ///
    /// # Errors
    /// `Error::Compile` if the source has syntax errors, in which case
    /// nothing is evaluated; `Error::Runtime` if evaluation fails.
    pub fn execute(&mut self, source: &str) -> Result<Value, Error> {
        let program = self.compile(source);
        self.syntax_errors.clone_from(&program.errors);
        self.execute_program(&program)
    }

    /// Evaluates a program compiled earlier.
    ///
    /// # Errors
    /// `Error::Compile` if the program carries syntax errors;
    /// `Error::Runtime` if evaluation fails.
    pub fn execute_program(&mut self, program: &Program) -> Result<Value, Error> {
        if !program.is_valid() {
            return Err(CompileError { errors: program.errors.clone() }.into());
        }
        Ok(self.interpreter.eval(program)?)
    }

    /// Syntax errors from the last [`execute`](Self::execute).
    #[must_use]
    pub fn syntax_errors(&self) -> &[ParseError] {
        &self.syntax_errors
    }

    /// Returns `true` if the last [`execute`](Self::execute) found syntax
    /// errors.
    #[must_use]
    pub fn has_syntax_errors(&self) -> bool {
        !self.syntax_errors.is_empty()
    }

    /// Binds an input variable such as a price series.
    pub fn register_variable(&mut self, name: &str, value: impl Into<Value>) {
        self.interpreter.environment_mut().set(name, value.into());
    }

    /// Binds or replaces a variable.
    pub fn set_variable(&mut self, name: &str, value: Value) {
        self.interpreter.environment_mut().set_variable(name, value);
    }

    /// Registers a native function under `name`.
    ///
    /// # Example
    /// ```
    /// use formulang::{
    ///     interpreter::value::{core::Value, native::Arity},
    ///     session::Session,
    /// };
    ///
    /// let mut session = Session::new();
    /// session.register_function("HALF", Arity::Exact(1), |args| {
    ///     Ok(Value::Scalar(args[0].to_f64() / 2.0))
    /// });
    ///
    /// assert_eq!(session.execute("HALF(9);").unwrap(), Value::Scalar(4.5));
    /// ```
    pub fn register_function<F>(&mut self, name: &str, arity: Arity, func: F)
        where F: Fn(&[Value]) -> Result<Value, FunctionError> + 'static
    {
        self.interpreter
            .environment_mut()
            .set_function(name, NativeFunction::new(name, arity, func));
        debug!(name, "registered function");
    }

    /// The value bound to `name`, variable or function.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<Value> {
        self.interpreter.environment().get(name)
    }

    /// The variable `name` as a list of numbers.
    ///
    /// Boolean series read as `1.0`/`0.0`, and a number as a one-element
    /// series. Other kinds give `None`.
    #[must_use]
    pub fn float_series(&self, name: &str) -> Option<Vec<f64>> {
        let value = self.interpreter.environment().get_variable(name)?;
        match value.as_series() {
            Some(series) => Some(series.into_owned()),
            None => value.as_scalar().map(|x| vec![x]),
        }
    }

    /// Output variables mapped to their index.
    #[must_use]
    pub const fn output_variables(&self) -> &HashMap<String, usize> {
        self.interpreter.output_variables()
    }

    /// Output variable names ordered by index.
    #[must_use]
    pub fn output_variables_in_order(&self) -> Vec<&str> {
        self.interpreter.output_variables_in_order()
    }

    /// Returns `true` if `name` was assigned with the single-colon form.
    #[must_use]
    pub fn is_output_variable(&self, name: &str) -> bool {
        self.interpreter.is_output_variable(name)
    }

    /// The modifiers recorded for `name`, if any.
    #[must_use]
    pub fn suffix_params(&self, name: &str) -> Option<&[String]> {
        self.interpreter.suffix_params(name)
    }

    /// Every recorded modifier list, by variable name.
    #[must_use]
    pub const fn all_suffix_params(&self) -> &HashMap<String, Vec<String>> {
        self.interpreter.all_suffix_params()
    }

    /// Installs a hook consulted before the environment on every lookup.
    ///
    /// See [`Interpreter::set_custom_variable_getter`].
    pub fn set_custom_variable_getter<F>(&mut self, getter: F)
        where F: Fn(&str) -> Option<Value> + 'static
    {
        self.interpreter.set_custom_variable_getter(getter);
    }

    /// Removes the lookup hook.
    pub fn clear_custom_variable_getter(&mut self) {
        self.interpreter.clear_custom_variable_getter();
    }

    /// Copies each bound source variable to its alias.
    ///
    /// Without a table, the session's configured aliases are used (by
    /// default `OPEN`, `HIGH`, `LOW`, `CLOSE`, `VOLUME` to `O`, `H`, `L`,
    /// `C`, `V`). Sources that are not bound are skipped.
    pub fn apply_aliases(&mut self, aliases: Option<&BTreeMap<String, String>>) {
        let aliases = aliases.unwrap_or(&self.aliases).clone();
        let env = self.interpreter.environment_mut();
        for (source, alias) in &aliases {
            if let Some(value) = env.get_variable(source) {
                env.set_variable(alias, value);
                debug!(source = %source, alias = %alias, "applied alias");
            }
        }
    }

    /// The bar time series: the first bound variable among the configured
    /// date-time keys.
    ///
    /// The key that matched is remembered and tried first next time.
    pub fn date_time_series(&mut self) -> Option<Value> {
        let env = self.interpreter.environment();
        if let Some(key) = &self.date_time_key
           && let Some(value) = env.get_variable(key)
        {
            return Some(value);
        }

        let (key, value) = self.date_time_keys
                               .iter()
                               .find_map(|key| env.get_variable(key).map(|v| (key.clone(), v)))?;
        self.date_time_key = Some(key);
        Some(value)
    }

    /// Clears variables, both registries and the recorded syntax errors.
    ///
    /// Registered functions, the prelude included, stay available.
    pub fn reset(&mut self) {
        self.interpreter.reset();
        self.syntax_errors.clear();
        self.date_time_key = None;
    }
}
