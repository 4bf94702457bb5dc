/// Parsing errors.
///
/// Defines all error types that can occur while turning source text into a
/// program: lexing mistakes, syntax errors, and parse-tree shapes the
/// transformer does not recognize.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// unknown names, wrong argument counts, and runaway recursion.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any error produced while running a program from source.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The source text could not be turned into a program.
    Parse(ParseError),
    /// The program failed while being evaluated.
    Runtime(RuntimeError),
}

impl From<ParseError> for Error {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<RuntimeError> for Error {
    fn from(value: RuntimeError) -> Self {
        Self::Runtime(value)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}
