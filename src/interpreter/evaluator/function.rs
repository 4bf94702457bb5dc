/// Builtin registry, arity checking, and function call dispatch.
///
/// Resolves a call against the user-defined functions first and the builtins
/// second.
pub mod core;

/// Trigonometric, angle conversion, and absolute value builtins.
pub mod builtin;

/// `min` and `max` over one or more arguments.
pub mod min_max;
