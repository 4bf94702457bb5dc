use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            tree::{ParseTree, Rule},
            utils::parse_comma_separated,
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses a prefix expression.
///
/// Supports the prefix operators `+` (identity) and `-` (negation). Prefix
/// operators nest, so `--x` is parsed as `-(-x)`. They bind tighter than
/// every infix operator: `-2 ** 2` is `(-2) ** 2`.
///
/// Grammar:
/// ```text
///     prefix := ("+" | "-") prefix
///             | atom
/// ```
pub(crate) fn parse_prefix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ParseTree>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((token @ (Token::Plus | Token::Minus), line)) = tokens.peek() {
        let operator = ParseTree::leaf(token.clone(), *line);
        let line = *line;
        tokens.next();
        let operand = ensure_sufficient_stack(|| parse_prefix(tokens))?;
        return Ok(ParseTree::node(Rule::Prefix, vec![operator, operand], line));
    }

    parse_atom(tokens)
}

/// Parses an atomic expression.
///
/// Grammar:
/// ```text
///     atom := NUMBER
///           | "(" expression ")"
///           | IDENT "(" (expression ("," expression)*)? ")"
///           | IDENT
/// ```
///
/// # Errors
/// Returns a `ParseError` if the input ends, a group is not closed, or the
/// next token cannot start an expression.
pub(crate) fn parse_atom<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ParseTree>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { line: 0 })?;

    match peeked {
        (Token::Number(_), _) => parse_number(tokens),
        (Token::LParen, _) => parse_grouping(tokens),
        (Token::Identifier(_), _) => parse_identifier_or_call(tokens),
        (tok, line) => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                         line:  *line, }),
    }
}

/// Parses a numeric literal into a [`Rule::Number`] node.
fn parse_number<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ParseTree>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((token @ Token::Number(_), line)) => {
            Ok(ParseTree::node(Rule::Number, vec![ParseTree::leaf(token.clone(), *line)], *line))
        },
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected number, found {tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a parenthesized expression.
///
/// The parentheses only group; the inner expression is returned unchanged.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ParseTree>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = match tokens.next() {
        Some((Token::LParen, line)) => *line,
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected '(', found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    let expr = parse_expression(tokens)?;

    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        _ => Err(ParseError::ExpectedClosingParen { line }),
    }
}

/// Parses a variable reference or a function call.
///
/// An identifier directly followed by `(` is a call; its arguments are
/// comma-separated expressions. Otherwise the identifier is a variable.
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ParseTree>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = match tokens.next() {
        Some((token @ Token::Identifier(_), line)) => (ParseTree::leaf(token.clone(), *line), *line),
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected identifier, found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)
            .map_err(|e| match e {
                ParseError::UnexpectedEndOfInput { .. } => ParseError::ExpectedClosingParen { line },
                other => other,
            })?;

        let mut children = Vec::with_capacity(arguments.len() + 1);
        children.push(name);
        children.extend(arguments);
        return Ok(ParseTree::node(Rule::FunctionCall, children, line));
    }

    Ok(ParseTree::node(Rule::Variable, vec![name], line))
}
