use tracing::{debug, trace};

use crate::{
    ast::{Expr, Program, Statement},
    error::RuntimeError,
    interpreter::evaluator::{
        closure::Closure,
        environment::{Environment, FunctionTable, Variables},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default limit on nested closure calls.
pub const MAX_CALL_DEPTH: usize = 1000;

/// Runs programs and evaluates expressions.
///
/// The evaluator itself holds no bindings; those live in an [`Environment`]
/// (for statements) or in the variable and function tables passed to
/// [`Evaluator::evaluate`]. It only tracks how deeply closure calls are
/// currently nested, so that runaway recursion is reported as
/// [`RuntimeError::RecursionLimitExceeded`] instead of crashing the process.
///
/// ## Usage
///
/// ```
/// use tally::{interpreter::evaluator::core::Evaluator, parse_program};
///
/// let program = parse_program("a := 6\nf(b) := a + 4\na := 7\nf(5)").unwrap();
/// let result = Evaluator::new().run_program(&program).unwrap();
///
/// assert_eq!(result, 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct Evaluator {
    /// Maximum number of closure calls that may be active at once.
    max_call_depth: usize,
    /// Number of closure calls currently active.
    depth:          usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator with the default call depth limit.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_max_call_depth(MAX_CALL_DEPTH)
    }

    /// Creates an evaluator that allows at most `max_call_depth` nested
    /// closure calls.
    #[must_use]
    pub const fn with_max_call_depth(max_call_depth: usize) -> Self {
        Self { max_call_depth,
               depth: 0 }
    }

    /// The configured call depth limit.
    #[must_use]
    pub const fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    /// Number of closure calls currently active.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Runs a program against a fresh, empty environment.
    ///
    /// Statements are executed in order, each one seeing the effects of all
    /// earlier ones. The value of the final expression is returned.
    ///
    /// # Errors
    /// The first error raised by a statement or by the final expression aborts
    /// the run and is returned.
    pub fn run(&mut self, statements: &[Statement], expression: &Expr) -> EvalResult<f64> {
        let mut environment = Environment::new();
        self.run_in(&mut environment, statements, expression)
    }

    /// Runs a parsed [`Program`]. See [`Evaluator::run`].
    #[tracing::instrument(level = "debug",
                          skip_all,
                          fields(statements = program.statements.len(),
                                 max_call_depth = self.max_call_depth()))]
    pub fn run_program(&mut self, program: &Program) -> EvalResult<f64> {
        self.run(&program.statements, &program.expression)
    }

    /// Runs statements and a final expression against an existing
    /// environment, leaving the definitions in place afterwards.
    ///
    /// # Example
    /// ```
    /// use tally::{
    ///     ast::{Expr, Statement},
    ///     interpreter::evaluator::{core::Evaluator, environment::Environment},
    /// };
    ///
    /// let mut environment = Environment::new();
    /// let definition = Statement::VariableDefinition { name:  "x".to_string(),
    ///                                                  value: Expr::Number { value: 2.0,
    ///                                                                        line:  1, },
    ///                                                  line:  1, };
    /// let x = Expr::Variable { name: "x".to_string(),
    ///                          line: 2, };
    ///
    /// let result = Evaluator::new().run_in(&mut environment, &[definition], &x);
    /// assert_eq!(result, Ok(2.0));
    /// assert_eq!(environment.variable("x"), Some(2.0));
    /// ```
    pub fn run_in(&mut self,
                  environment: &mut Environment,
                  statements: &[Statement],
                  expression: &Expr)
                  -> EvalResult<f64> {
        for statement in statements {
            self.execute(statement, environment)
                .inspect_err(|e| debug!(line = e.line_number(), "statement failed"))?;
        }

        let result = self.evaluate(expression, &environment.variables, &environment.functions)
                         .inspect_err(|e| debug!(line = e.line_number(), "final expression failed"))?;
        debug!(result, line = expression.line_number(), "program finished");
        Ok(result)
    }

    /// Executes a single statement, mutating `environment` in place.
    ///
    /// - A variable definition evaluates its value under the current
    ///   environment and binds the result, replacing any earlier binding.
    /// - A function definition captures a snapshot of the current variables
    ///   and a shared handle to the function table, and binds the resulting
    ///   closure, replacing any earlier binding.
    ///
    /// # Errors
    /// Propagates evaluation errors, and returns
    /// `RuntimeError::DuplicateParameter` for a function whose parameter list
    /// repeats a name.
    pub fn execute(&mut self, statement: &Statement, environment: &mut Environment) -> EvalResult<()> {
        let line = statement.line_number();
        match statement {
            Statement::VariableDefinition { name, value, .. } => {
                let value = self.evaluate(value, &environment.variables, &environment.functions)?;
                trace!(name = name.as_str(), value, line, "defined variable");
                environment.define_variable(name, value);
            },
            Statement::FunctionDefinition(def) => {
                let closure = Closure::new(def, environment)?;
                trace!(name = def.name.as_str(),
                       params = def.params.len(),
                       captured = environment.variables.len(),
                       line,
                       "defined function");
                environment.define_function(&def.name, closure);
            },
        }
        Ok(())
    }

    /// Evaluates an expression to a number.
    ///
    /// This is the main entry point for expression evaluation. Evaluation only
    /// reads `variables` and `functions`; it never changes them.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `variables`: Variable bindings visible to the expression.
    /// - `functions`: User-defined functions visible to the expression.
    ///
    /// # Example
    /// ```
    /// use tally::{
    ///     ast::Expr,
    ///     interpreter::evaluator::{core::Evaluator, environment::Environment},
    /// };
    ///
    /// let env = Environment::new();
    /// let expr = Expr::Number { value: 1.5,
    ///                           line:  1, };
    ///
    /// let v = Evaluator::new().evaluate(&expr, &env.variables, &env.functions);
    /// assert_eq!(v, Ok(1.5));
    /// ```
    pub fn evaluate(&mut self,
                    expr: &Expr,
                    variables: &Variables,
                    functions: &FunctionTable)
                    -> EvalResult<f64> {
        match expr {
            Expr::Number { value, .. } => Ok(*value),
            Expr::Variable { name, line } => Self::eval_variable(name, *line, variables),
            Expr::PrefixOperation { op, operand, .. } => {
                self.eval_prefix_op(*op, operand, variables, functions)
            },
            Expr::InfixOperation { op, left, right, .. } => {
                self.eval_infix_op(*op, left, right, variables, functions)
            },
            Expr::FunctionCall { name,
                                 arguments,
                                 line, } => {
                self.eval_function_call(name, arguments, *line, variables, functions)
            },
        }
    }

    /// Records entry into a closure call, failing if the limit is reached.
    pub(crate) fn enter_call(&mut self, name: &str, line: usize) -> EvalResult<()> {
        if self.depth >= self.max_call_depth {
            return Err(RuntimeError::RecursionLimitExceeded { name: name.to_string(),
                                                              limit: self.max_call_depth,
                                                              line });
        }
        self.depth += 1;
        Ok(())
    }

    /// Records the end of a closure call.
    pub(crate) const fn leave_call(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_program;

    fn run(source: &str) -> EvalResult<f64> {
        let program = parse_program(source).unwrap();
        Evaluator::new().run_program(&program)
    }

    #[test]
    fn statements_see_earlier_statements() {
        assert_eq!(run("a := 2\nb := a * 3\nb + a"), Ok(8.0));
    }

    #[test]
    fn redefinition_overwrites() {
        assert_eq!(run("a := 1\na := a + 1\na := a * 10\na"), Ok(20.0));
        assert_eq!(run("f() := 1\nf() := 2\nf()"), Ok(2.0));
    }

    #[test]
    fn first_error_aborts_the_run() {
        assert_eq!(run("a := missing\nb := nope()\na"),
                   Err(RuntimeError::UnknownVariable { name: "missing".into(),
                                                       line: 1, }));
    }

    #[test]
    fn depth_returns_to_zero_after_errors() {
        let program = parse_program("f(x) := f(x)\nf(1)").unwrap();
        let mut evaluator = Evaluator::with_max_call_depth(10);

        assert!(evaluator.run_program(&program).is_err());
        assert_eq!(evaluator.depth, 0);
        assert!(matches!(evaluator.run_program(&program),
                         Err(RuntimeError::RecursionLimitExceeded { limit: 10, .. })));
    }

    #[test]
    fn run_in_keeps_definitions() {
        let program = parse_program("k := 3\nsq(x) := x * x\nsq(k)").unwrap();
        let mut environment = Environment::new();
        let mut evaluator = Evaluator::new();

        let result = evaluator.run_in(&mut environment, &program.statements, &program.expression);
        assert_eq!(result, Ok(9.0));
        assert_eq!(environment.variable("k"), Some(3.0));
        assert!(environment.function("sq").is_some());
    }
}
