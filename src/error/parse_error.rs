#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing, parsing or the
/// transformation of a parse tree into a program.
pub enum ParseError {
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    ExpectedClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The function definition syntax was invalid.
    InvalidFunctionDefinition {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The program does not end with an expression to evaluate.
    MissingExpression {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The parse tree has a shape the transformer does not recognize.
    MalformedInput {
        /// Description of the offending node.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl ParseError {
    /// Places an `UnexpectedEndOfInput` error on `line`; other errors are
    /// returned unchanged.
    #[must_use]
    pub(crate) fn at_end_of_input(self, line: usize) -> Self {
        match self {
            Self::UnexpectedEndOfInput { .. } => Self::UnexpectedEndOfInput { line },
            other => other,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },

            Self::ExpectedClosingParen { line } => write!(f,
                                                          "Error on line {line}: Expected closing parenthesis ')' but none found."),

            Self::InvalidFunctionDefinition { line } => write!(f,
                                                               "Error on line {line}: Invalid function definition syntax. Example: f(x, y) := x * y"),

            Self::MissingExpression { line } => write!(f,
                                                       "Error on line {line}: A program must end with an expression to evaluate."),

            Self::MalformedInput { details, line } => {
                write!(f, "Error on line {line}: Malformed input: {details}.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
