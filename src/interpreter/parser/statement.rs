use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            tree::{ParseTree, Rule},
            utils::{parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a single statement, if one starts at the current position.
///
/// A statement is either a variable definition or a function definition.
/// Both are recognized by lookahead without consuming input, so when neither
/// matches the caller can parse the same tokens as an expression.
///
/// # Returns
/// - `Ok(Some(tree))` if a definition was parsed,
/// - `Ok(None)` if the next tokens do not form a definition.
pub(crate) fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<ParseTree>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some(statement) = parse_variable_definition(tokens)? {
        return Ok(Some(statement));
    }
    if let Some(statement) = parse_function_definition(tokens)? {
        return Ok(Some(statement));
    }

    Ok(None)
}

/// Parses a variable definition of the form `<identifier> := <expression>`.
///
/// If the identifier is not immediately followed by `:=`, this function
/// returns `Ok(None)` and does not consume any input.
fn parse_variable_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<ParseTree>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Identifier(_), _)) = tokens.peek() {
        let mut lookahead = tokens.clone();
        lookahead.next();

        if let Some((Token::Define, _)) = lookahead.peek() {
            let (name, line) = parse_identifier(tokens)?;
            tokens.next();

            let value = parse_expression(tokens)?;
            return Ok(Some(ParseTree::node(Rule::VariableDefinition,
                                           vec![ParseTree::leaf(Token::Identifier(name), line),
                                                value],
                                           line)));
        }
    }

    Ok(None)
}

/// Parses a function definition of the form
/// `<name>(param1, param2, ...) := <expression>`.
///
/// This function identifies a definition by checking:
/// 1. The next token is an identifier.
/// 2. It is immediately followed by `(`.
/// 3. A matching `)` exists.
/// 4. The token after the closing `)` is `:=`.
///
/// If the input does not match, the function returns `Ok(None)` without
/// consuming tokens.
///
/// # Errors
/// Returns `ParseError::InvalidFunctionDefinition` if the parameter list
/// contains anything other than comma-separated identifiers, and propagates
/// errors from the body expression.
fn parse_function_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<ParseTree>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Identifier(_), _)) = tokens.peek() {
        let mut lookahead = tokens.clone();
        lookahead.next();

        if let Some((Token::LParen, _)) = lookahead.peek() {
            lookahead.next();
            let mut parens = 1;

            while parens > 0 {
                match lookahead.next() {
                    Some((Token::LParen, _)) => parens += 1,
                    Some((Token::RParen, _)) => parens -= 1,
                    Some(_) => {},
                    None => return Ok(None),
                }
            }

            if let Some((Token::Define, _)) = lookahead.peek() {
                let (name, line) = parse_identifier(tokens)?;
                tokens.next();

                let params = parse_comma_separated(tokens,
                                                   |t| {
                                                       parse_identifier(t).map(|(param, l)| {
                                                                             ParseTree::leaf(Token::Identifier(param), l)
                                                                         })
                                                   },
                                                   &Token::RParen).map_err(|_| {
                                                                      ParseError::InvalidFunctionDefinition { line }
                                                                  })?;
                tokens.next();

                let body = parse_expression(tokens)?;

                let mut children = Vec::with_capacity(params.len() + 2);
                children.push(ParseTree::leaf(Token::Identifier(name), line));
                children.extend(params);
                children.push(body);
                return Ok(Some(ParseTree::node(Rule::FunctionDefinition, children, line)));
            }
        }
    }
    Ok(None)
}
