use std::{collections::HashSet, fmt, rc::Rc};

use tracing::debug_span;

use crate::{
    ast::{Expr, FunctionDef},
    error::RuntimeError,
    interpreter::evaluator::{
        core::{EvalResult, Evaluator},
        environment::{Environment, FunctionTable, Variables},
        function::core::Arity,
    },
    util::stack::ensure_sufficient_stack,
};

/// A callable value created by a function definition.
///
/// The two captures deliberately behave differently:
///
/// - `captured_variables` is a copy of the defining environment's variables,
///   taken when the definition ran. Redefining a variable afterwards does not
///   change what the closure sees.
/// - `captured_functions` is the defining environment's own function table.
///   Functions defined afterwards, including the closure itself, are visible.
pub struct Closure {
    name:               String,
    captured_variables: Variables,
    captured_functions: FunctionTable,
    parameters:         Vec<String>,
    body:               Expr,
}

impl Closure {
    /// Builds a closure for `def` in the current state of `environment`.
    ///
    /// # Errors
    /// Returns `RuntimeError::DuplicateParameter` if a parameter name appears
    /// more than once.
    ///
    /// # Example
    /// ```
    /// use tally::{
    ///     ast::{Expr, FunctionDef},
    ///     interpreter::evaluator::{closure::Closure, environment::Environment},
    /// };
    ///
    /// let def = FunctionDef { name:   "f".to_string(),
    ///                         params: vec!["x".to_string(), "x".to_string()],
    ///                         body:   Expr::Number { value: 0.0,
    ///                                                line:  1, },
    ///                         line:   1, };
    ///
    /// assert!(Closure::new(&def, &Environment::new()).is_err());
    /// ```
    pub fn new(def: &FunctionDef, environment: &Environment) -> EvalResult<Self> {
        let mut seen = HashSet::with_capacity(def.params.len());
        if let Some(duplicate) = def.params.iter().find(|p| !seen.insert(p.as_str())) {
            return Err(RuntimeError::DuplicateParameter { function: def.name.clone(),
                                                          name:     duplicate.clone(),
                                                          line:     def.line, });
        }

        Ok(Self { name:               def.name.clone(),
                  captured_variables: environment.variables.clone(),
                  captured_functions: Rc::clone(&environment.functions),
                  parameters:         def.params.clone(),
                  body:               def.body.clone(), })
    }

    /// The name the closure was defined under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variables captured when the closure was defined.
    #[must_use]
    pub const fn captured_variables(&self) -> &Variables {
        &self.captured_variables
    }

    /// The function table shared with the defining environment.
    #[must_use]
    pub const fn captured_functions(&self) -> &FunctionTable {
        &self.captured_functions
    }

    /// The number of arguments the closure accepts.
    #[must_use]
    pub fn arity(&self) -> Arity {
        Arity::Exact(self.parameters.len())
    }

    /// Builds the variables for one call: the captured snapshot with each
    /// parameter bound to its argument on top.
    fn bind(&self, args: &[f64], line: usize) -> EvalResult<Variables> {
        if args.len() != self.parameters.len() {
            return Err(RuntimeError::ArityMismatch { name: self.name.clone(),
                                                     expected: self.arity(),
                                                     found: args.len(),
                                                     line });
        }

        let mut locals = self.captured_variables.clone();
        locals.extend(self.parameters.iter().cloned().zip(args.iter().copied()));
        Ok(locals)
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The function table contains this closure; print names only.
        let functions = self.captured_functions
                            .try_borrow()
                            .map(|table| {
                                let mut names = table.keys().cloned().collect::<Vec<_>>();
                                names.sort();
                                names
                            })
                            .unwrap_or_default();

        f.debug_struct("Closure")
         .field("name", &self.name)
         .field("parameters", &self.parameters)
         .field("captured_variables", &self.captured_variables)
         .field("captured_functions", &functions)
         .field("body", &self.body)
         .finish()
    }
}

impl Evaluator {
    /// Calls `closure` with already evaluated arguments.
    ///
    /// The body is evaluated with fresh call-local variables (captured
    /// snapshot plus parameters) and the live shared function table. Nothing
    /// captured is modified.
    ///
    /// # Errors
    /// - `ArityMismatch` if the argument count differs from the parameter
    ///   count.
    /// - `RecursionLimitExceeded` if the call would exceed the evaluator's
    ///   maximum call depth.
    /// - Any error raised while evaluating the body.
    pub fn invoke(&mut self, closure: &Closure, args: &[f64], line: usize) -> EvalResult<f64> {
        let locals = closure.bind(args, line)?;

        self.enter_call(closure.name(), line)?;
        let _span = debug_span!("invoke", name = closure.name(), ?args, depth = self.depth())
                    .entered();
        let result = ensure_sufficient_stack(|| {
            self.evaluate(&closure.body, &locals, &closure.captured_functions)
        });
        self.leave_call();

        result
    }
}
