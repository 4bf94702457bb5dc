use crate::{ast::PrefixOperator, interpreter::evaluator::core::Evaluator};

impl Evaluator {
    /// Applies a prefix operator to an already evaluated operand.
    ///
    /// - `Plus`: returns the value unchanged.
    /// - `Negate`: returns the negated value.
    ///
    /// # Example
    /// ```
    /// use tally::{ast::PrefixOperator, interpreter::evaluator::core::Evaluator};
    ///
    /// assert_eq!(Evaluator::eval_prefix(PrefixOperator::Negate, 5.0), -5.0);
    /// assert_eq!(Evaluator::eval_prefix(PrefixOperator::Plus, -2.0), -2.0);
    /// ```
    #[must_use]
    pub fn eval_prefix(op: PrefixOperator, value: f64) -> f64 {
        match op {
            PrefixOperator::Plus => value,
            PrefixOperator::Negate => -value,
        }
    }
}
