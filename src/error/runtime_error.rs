use crate::interpreter::evaluator::function::core::Arity;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// A name is neither a defined variable nor a builtin constant.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A name is neither a user-defined nor a builtin function.
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    ArityMismatch {
        /// The name of the function that was called.
        name:     String,
        /// The number of arguments the function accepts.
        expected: Arity,
        /// The number of arguments that were actually supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A function definition lists the same parameter more than once.
    DuplicateParameter {
        /// The function being defined.
        function: String,
        /// The repeated parameter name.
        name:     String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Nested function calls went deeper than the evaluator allows.
    RecursionLimitExceeded {
        /// The function whose call crossed the limit.
        name:  String,
        /// The configured maximum call depth.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl RuntimeError {
    /// Gets the source line the error refers to.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::UnknownVariable { line, .. }
            | Self::UnknownFunction { line, .. }
            | Self::ArityMismatch { line, .. }
            | Self::DuplicateParameter { line, .. }
            | Self::RecursionLimitExceeded { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name, line } => {
                write!(f, "Error on line {line}: Unknown variable '{name}'.")
            },
            Self::UnknownFunction { name, line } => {
                write!(f, "Error on line {line}: Unknown function '{name}'.")
            },
            Self::ArityMismatch { name,
                                  expected,
                                  found,
                                  line, } => write!(f,
                                                    "Error on line {line}: Function '{name}' expects {expected} argument(s), but {found} were given."),
            Self::DuplicateParameter { function, name, line } => write!(f,
                                                                        "Error on line {line}: Parameter '{name}' appears more than once in the definition of '{function}'."),
            Self::RecursionLimitExceeded { name, limit, line } => write!(f,
                                                                         "Error on line {line}: Calling '{name}' exceeded the maximum call depth of {limit}."),
        }
    }
}

impl std::error::Error for RuntimeError {}
