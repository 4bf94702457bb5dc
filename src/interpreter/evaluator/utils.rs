use crate::{
    ast::{Expr, InfixOperator, PrefixOperator},
    error::RuntimeError,
    interpreter::evaluator::{
        constant::BuiltinConstant,
        core::{EvalResult, Evaluator},
        environment::{FunctionTable, Variables},
    },
    util::stack::ensure_sufficient_stack,
};

impl Evaluator {
    /// Looks up a variable by name.
    ///
    /// Variable lookup checks, in order:
    /// 1. The variables passed in (program variables, or the call-local
    ///    variables inside a function body).
    /// 2. The builtin constants.
    ///
    /// If the variable is not found, an `UnknownVariable` error is returned.
    ///
    /// # Example
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use tally::interpreter::evaluator::core::Evaluator;
    ///
    /// let mut vars = HashMap::new();
    /// vars.insert("x".to_string(), 10.0);
    ///
    /// assert_eq!(Evaluator::eval_variable("x", 1, &vars), Ok(10.0));
    /// assert_eq!(Evaluator::eval_variable("e", 1, &vars), Ok(std::f64::consts::E));
    /// assert!(Evaluator::eval_variable("y", 1, &vars).is_err());
    /// ```
    pub fn eval_variable(name: &str, line: usize, variables: &Variables) -> EvalResult<f64> {
        if let Some(value) = variables.get(name) {
            return Ok(*value);
        }
        if let Some(constant) = BuiltinConstant::lookup(name) {
            return Ok(constant.value());
        }
        Err(RuntimeError::UnknownVariable { name: name.to_owned(),
                                            line })
    }

    /// Evaluates the operand of a prefix operation, then applies the
    /// operator to the resulting number.
    pub fn eval_prefix_op(&mut self,
                          op: PrefixOperator,
                          operand: &Expr,
                          variables: &Variables,
                          functions: &FunctionTable)
                          -> EvalResult<f64> {
        let value = self.eval_child(operand, variables, functions)?;
        Ok(Self::eval_prefix(op, value))
    }

    /// Evaluates both operands of an infix operation, left first, then
    /// applies the operator.
    pub fn eval_infix_op(&mut self,
                         op: InfixOperator,
                         left: &Expr,
                         right: &Expr,
                         variables: &Variables,
                         functions: &FunctionTable)
                         -> EvalResult<f64> {
        let left = self.eval_child(left, variables, functions)?;
        let right = self.eval_child(right, variables, functions)?;
        Ok(Self::eval_infix(op, left, right))
    }

    /// Evaluates a function call expression.
    ///
    /// Every argument is evaluated, left to right, before the function is
    /// resolved. See [`Evaluator::eval_function`] for the lookup order.
    ///
    /// # Example
    /// ```
    /// use tally::{
    ///     ast::Expr,
    ///     interpreter::evaluator::{core::Evaluator, environment::Environment},
    /// };
    ///
    /// let env = Environment::new();
    /// let args = vec![Expr::Number { value: 3.0,
    ///                                line:  1, },
    ///                 Expr::Number { value: 8.0,
    ///                                line:  1, }];
    ///
    /// let result = Evaluator::new().eval_function_call("max", &args, 1, &env.variables, &env.functions);
    /// assert_eq!(result, Ok(8.0));
    /// ```
    pub fn eval_function_call(&mut self,
                              name: &str,
                              arguments: &[Expr],
                              line: usize,
                              variables: &Variables,
                              functions: &FunctionTable)
                              -> EvalResult<f64> {
        let mut args = Vec::with_capacity(arguments.len());

        for expr in arguments {
            args.push(self.eval_child(expr, variables, functions)?);
        }

        self.eval_function(name, &args, functions, line)
    }

    /// Evaluates a nested sub-expression, growing the native stack first if
    /// it is running low.
    fn eval_child(&mut self,
                  expr: &Expr,
                  variables: &Variables,
                  functions: &FunctionTable)
                  -> EvalResult<f64> {
        ensure_sufficient_stack(|| self.evaluate(expr, variables, functions))
    }
}
