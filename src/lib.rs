//! # tally
//!
//! tally is a small calculator language written in Rust.
//! A program is a sequence of variable and function definitions followed by
//! one final expression, which is evaluated to a double-precision number.
//!
//! ```
//! let source = "
//!     r := 2
//!     area(radius) := pi * radius ** 2
//!     area(r)
//! ";
//!
//! let value = tally::evaluate_source(source).unwrap();
//! assert!((value - 4.0 * std::f64::consts::PI).abs() < 1e-12);
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Program,
    error::{Error, ParseError},
    interpreter::{evaluator::core::Evaluator, parser::parse, transformer::transform},
};

/// Defines the structure of parsed programs.
///
/// This module declares the `Expr` and `Statement` enums and the `Program`
/// they make up. The AST is produced by the transformer and traversed by the
/// evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches line numbers to every node for error reporting.
/// - Renders programs back to source text.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// Every error carries the line it was raised on, and renders as a one-line
/// message suitable for printing to the user.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, transformation, and evaluation.
///
/// # Responsibilities
/// - Coordinates all phases: lexer, parser, transformer, and evaluator.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities shared by the parser and the evaluator.
pub mod util;

/// Parses source text into a [`Program`].
///
/// This runs the lexer, builds the parse tree, and transforms it into the AST.
/// Nothing is evaluated.
///
/// # Errors
/// Returns a `ParseError` if the text is not a valid program.
///
/// # Examples
/// ```
/// use tally::parse_program;
///
/// let program = parse_program("x := 1; f(y) := x + y; f(2)").unwrap();
/// assert_eq!(program.statements.len(), 2);
/// assert_eq!(program.expression.to_string(), "f(2)");
///
/// assert!(parse_program("x := 1").is_err());
/// ```
pub fn parse_program(source: &str) -> Result<Program, ParseError> {
    transform(parse(source)?)
}

/// Parses and evaluates source text with a default [`Evaluator`].
///
/// # Errors
/// Returns `Error::Parse` if the text is not a valid program, and
/// `Error::Runtime` if evaluating it fails.
///
/// # Examples
/// ```
/// use tally::{error::Error, evaluate_source};
///
/// assert_eq!(evaluate_source("2 ** 3 ** 2"), Ok(64.0));
///
/// // `x` is never defined.
/// assert!(matches!(evaluate_source("y := x + 1\ny"), Err(Error::Runtime(_))));
/// ```
pub fn evaluate_source(source: &str) -> Result<f64, Error> {
    evaluate_source_with(source, &mut Evaluator::new())
}

/// Parses and evaluates source text with the given evaluator.
///
/// # Errors
/// See [`evaluate_source`].
///
/// # Examples
/// ```
/// use tally::{evaluate_source_with, interpreter::evaluator::core::Evaluator};
///
/// let mut evaluator = Evaluator::with_max_call_depth(5);
/// assert!(evaluate_source_with("f(n) := f(n)\nf(0)", &mut evaluator).is_err());
/// ```
pub fn evaluate_source_with(source: &str, evaluator: &mut Evaluator) -> Result<f64, Error> {
    let program = parse_program(source)?;
    Ok(evaluator.run_program(&program)?)
}
