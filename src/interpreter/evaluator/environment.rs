use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::evaluator::closure::Closure;

/// Variable bindings: name to value.
pub type Variables = HashMap<String, f64>;

/// The user-defined function table.
///
/// The table is shared: every closure created in an environment holds a handle
/// to that environment's table, so functions defined later are visible to
/// closures defined earlier. That is what makes recursion and forward
/// references work.
pub type FunctionTable = Rc<RefCell<HashMap<String, Rc<Closure>>>>;

/// The runtime binding context of a program run.
///
/// Holds the variables and the user-defined functions. Statements mutate it
/// in place; expressions only read from it.
///
/// Dropping an environment empties its function table. Closures refer to the
/// table that refers back to them, and clearing it is what releases them.
#[derive(Debug, Default)]
pub struct Environment {
    /// Variables defined so far.
    pub variables: Variables,
    /// Functions defined so far, shared with every closure created here.
    pub functions: FunctionTable,
}

impl Environment {
    /// Creates an environment with no variables and no functions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value`, replacing any earlier binding.
    pub fn define_variable(&mut self, name: &str, value: f64) {
        self.variables.insert(name.to_string(), value);
    }

    /// Binds `name` to `closure`, replacing any earlier binding.
    ///
    /// The change is visible to every closure sharing this table.
    pub fn define_function(&mut self, name: &str, closure: Closure) {
        self.functions
            .borrow_mut()
            .insert(name.to_string(), Rc::new(closure));
    }

    /// Looks up a variable defined in this environment.
    ///
    /// Builtin constants are not consulted.
    ///
    /// # Example
    /// ```
    /// use tally::interpreter::evaluator::environment::Environment;
    ///
    /// let mut env = Environment::new();
    /// env.define_variable("x", 4.0);
    ///
    /// assert_eq!(env.variable("x"), Some(4.0));
    /// assert_eq!(env.variable("pi"), None);
    /// ```
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    /// Looks up a user-defined function.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<Rc<Closure>> {
        self.functions.borrow().get(name).cloned()
    }
}

impl Drop for Environment {
    fn drop(&mut self) {
        if let Ok(mut functions) = self.functions.try_borrow_mut() {
            functions.clear();
        }
    }
}
