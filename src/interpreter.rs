/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// paired with the line it starts on. Comments and horizontal whitespace are
/// dropped here; newlines are kept because they separate statements.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with line numbers.
/// - Recognizes numbers, identifiers, operators, and delimiters.
/// - Reports characters that cannot start any token.
pub mod lexer;
/// The parser module builds a concrete parse tree from tokens.
///
/// The tree records which grammar rule produced each node, and keeps the
/// input tokens at its leaves. It is what `--tree` prints.
///
/// # Responsibilities
/// - Validates grammar and reports syntax errors with line numbers.
/// - Decides, with lookahead, whether a line is a definition or the final
///   expression.
pub mod parser;
/// The transformer module converts a parse tree into the AST.
///
/// Each grammar rule maps to one AST shape. Chains of infix operators are
/// folded from the left. A tree that does not have the shape its rule
/// promises is rejected with `ParseError::MalformedInput`.
pub mod transformer;
/// The evaluator module executes the AST and computes results.
///
/// The evaluator runs definitions in order against an environment and then
/// evaluates the final expression to a number.
///
/// # Responsibilities
/// - Evaluates expressions, including builtin and user-defined calls.
/// - Builds closures and manages the variable and function tables.
/// - Reports runtime errors such as unknown names, wrong argument counts,
///   and runaway recursion.
pub mod evaluator;
