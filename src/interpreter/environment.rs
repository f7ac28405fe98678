use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::{core::Value, native::NativeFunction};

/// Symbol table for one evaluation scope.
///
/// Names live in two tables: variables and functions. Lookups check the
/// local variables, then the local functions, then the outer scope. Writes
/// always land in the local tables, so binding a name that exists further
/// out shadows it instead of changing it.
///
/// # Example
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use formulang::interpreter::{environment::Environment, value::core::Value};
///
/// let outer = Rc::new(RefCell::new(Environment::new()));
/// outer.borrow_mut().set("N", Value::Scalar(5.0));
///
/// let mut inner = Environment::with_outer(Rc::clone(&outer));
/// inner.set("N", Value::Scalar(10.0));
///
/// assert_eq!(inner.get("N"), Some(Value::Scalar(10.0)));
/// assert_eq!(outer.borrow().get("N"), Some(Value::Scalar(5.0)));
/// ```
#[derive(Debug, Default)]
pub struct Environment {
    variables: HashMap<String, Value>,
    functions: HashMap<String, NativeFunction>,
    outer:     Option<Rc<RefCell<Self>>>,
}

impl Environment {
    /// Creates an empty top-level environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty environment nested inside `outer`.
    #[must_use]
    pub fn with_outer(outer: Rc<RefCell<Self>>) -> Self {
        Self { outer: Some(outer),
               ..Self::default() }
    }

    /// Looks a name up as a variable or, failing that, as a function.
    ///
    /// Local variables win over local functions, and both win over anything
    /// in the outer scope. Functions are returned as [`Value::Callable`].
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.variables.get(name) {
            return Some(value.clone());
        }
        if let Some(function) = self.functions.get(name) {
            return Some(Value::Callable(function.clone()));
        }
        self.outer.as_ref().and_then(|outer| outer.borrow().get(name))
    }

    /// Looks a name up among variables only, walking the outer chain.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<Value> {
        match self.variables.get(name) {
            Some(found) => Some(found.clone()),
            None => self.outer
                        .as_ref()
                        .and_then(|outer| outer.borrow().get_variable(name)),
        }
    }

    /// Looks a name up among functions only, walking the outer chain.
    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<NativeFunction> {
        match self.functions.get(name) {
            Some(found) => Some(found.clone()),
            None => self.outer
                        .as_ref()
                        .and_then(|outer| outer.borrow().get_function(name)),
        }
    }

    /// Binds a variable in this scope. Same as [`set_variable`](Self::set_variable).
    pub fn set(&mut self, name: &str, value: Value) {
        self.set_variable(name, value);
    }

    /// Binds a variable in this scope, never in the outer one.
    pub fn set_variable(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    /// Registers a function in this scope.
    pub fn set_function(&mut self, name: &str, function: NativeFunction) {
        self.functions.insert(name.to_string(), function);
    }

    /// Clears the variables of this scope and of every outer scope.
    ///
    /// Functions are kept.
    pub fn del_all_vars(&mut self) {
        self.variables.clear();
        if let Some(outer) = &self.outer {
            outer.borrow_mut().del_all_vars();
        }
    }
}
