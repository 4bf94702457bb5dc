use crate::{ast::InfixOperator, interpreter::evaluator::core::Evaluator};

impl Evaluator {
    /// Applies an infix operator to two already evaluated operands.
    ///
    /// All arithmetic follows IEEE-754 double precision. In particular,
    /// division by zero is not an error: `1 / 0` is `inf` and `0 / 0` is
    /// `NaN`. Exponentiation uses `f64::powf`, so fractional and negative
    /// exponents are allowed.
    ///
    /// # Example
    /// ```
    /// use tally::{ast::InfixOperator, interpreter::evaluator::core::Evaluator};
    ///
    /// assert_eq!(Evaluator::eval_infix(InfixOperator::Pow, 2.0, 0.5), 2f64.sqrt());
    /// assert_eq!(Evaluator::eval_infix(InfixOperator::Div, 1.0, 0.0), f64::INFINITY);
    /// ```
    #[must_use]
    pub fn eval_infix(op: InfixOperator, left: f64, right: f64) -> f64 {
        match op {
            InfixOperator::Add => left + right,
            InfixOperator::Sub => left - right,
            InfixOperator::Mul => left * right,
            InfixOperator::Div => left / right,
            InfixOperator::Pow => left.powf(right),
        }
    }
}
