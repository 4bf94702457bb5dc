/// Core parsing logic.
///
/// Contains the program entry point, the expression entry point, and the
/// handling of statement separators.
pub mod core;

/// Prefix operators and atoms.
///
/// Handles unary `+`/`-`, numeric literals, parenthesized groups, variables
/// and function calls.
pub mod unary;

/// Infix operator levels.
///
/// Builds the flat, left-to-right operand/operator sequences for the additive,
/// multiplicative and exponent levels of the grammar.
pub mod binary;

/// Utility functions for the parser.
///
/// Provides helpers for comma-separated lists and identifiers.
pub mod utils;

/// Statement parsing.
///
/// Recognizes variable and function definitions by lookahead.
pub mod statement;

/// The concrete parse tree produced by the parser.
pub mod tree;

pub use self::core::{ParseResult, parse};

pub use tree::{ParseTree, Parts, Rule};
