/// Core evaluation logic.
///
/// Contains the evaluator, program and statement execution, expression
/// dispatch, and call depth tracking.
pub mod core;

/// The runtime binding context: variables and the shared function table.
pub mod environment;

/// Closures created by function definitions, and how they are invoked.
pub mod closure;

/// Binary operator evaluation logic.
pub mod binary;

/// Unary operator evaluation logic.
pub mod unary;

/// Utility functions for evaluation.
///
/// Variable lookup, operand evaluation, and argument evaluation for calls.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined and builtin function calls and argument checking.
pub mod function;

/// Builtin constants such as `pi` and `e`.
pub mod constant;
