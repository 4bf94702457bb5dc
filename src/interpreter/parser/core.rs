use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::{
            binary::parse_sum,
            statement::parse_statement,
            tree::{ParseTree, Rule},
        },
    },
    util::stack::ensure_sufficient_stack,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete program into a parse tree.
///
/// The root is a [`Rule::Start`] node whose children are the parsed
/// statements followed by exactly one trailing expression.
///
/// Grammar:
/// ```text
///     program := separator* (statement separator*)* expression separator*
/// ```
///
/// # Errors
/// Returns a `ParseError` if the source cannot be tokenized, is not
/// syntactically valid, or does not end with an expression. Running out of
/// tokens is reported on the line of the last token.
///
/// # Example
/// ```
/// use tally::interpreter::parser::{Parts, Rule, parse};
///
/// let tree = parse("a := 1\na + 1").unwrap();
/// let Parts::Node { rule, children, .. } = tree.into_parts() else { panic!() };
///
/// assert_eq!(rule, Rule::Start);
/// assert_eq!(children.len(), 2);
/// ```
pub fn parse(source: &str) -> ParseResult<ParseTree> {
    let tokens = strip_bracketed_newlines(tokenize(source)?);
    let end_line = tokens.last().map_or(1, |(_, line)| *line);
    let mut iter = tokens.iter().peekable();

    parse_program(&mut iter).map_err(|e| e.at_end_of_input(end_line))
}

/// Parses the token stream of a whole program.
///
/// Statements are attempted first; the first thing that is not a statement
/// must be the final expression, and nothing but separators may follow it.
pub(crate) fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ParseTree>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let start_line = tokens.peek().map_or(1, |(_, l)| *l);
    let mut children = Vec::new();

    loop {
        let last_line = skip_separators(tokens).unwrap_or(start_line);

        if tokens.peek().is_none() {
            return Err(ParseError::MissingExpression { line: last_line });
        }

        if let Some(statement) = parse_statement(tokens)? {
            children.push(statement);
            continue;
        }

        children.push(parse_expression(tokens)?);
        break;
    }

    skip_separators(tokens);
    if let Some((tok, line)) = tokens.next() {
        return Err(ParseError::UnexpectedToken { token: format!("{tok:?} after the final expression"),
                                                 line:  *line, });
    }

    Ok(ParseTree::node(Rule::Start, children, start_line))
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, addition, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := sum`
pub(crate) fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ParseTree>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    ensure_sufficient_stack(|| parse_sum(tokens))
}

/// Skips newlines and semicolons.
///
/// Returns the line of the last skipped separator, if any.
pub(in crate::interpreter::parser) fn skip_separators<'a, I>(tokens: &mut Peekable<I>)
                                                             -> Option<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut last = None;
    while let Some((Token::NewLine | Token::Semicolon, line)) = tokens.peek() {
        last = Some(*line);
        tokens.next();
    }
    last
}

/// Skips newlines only, used where a line break continues an expression.
pub(in crate::interpreter::parser) fn skip_newlines<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)>
{
    while let Some((Token::NewLine, _)) = tokens.peek() {
        tokens.next();
    }
}

/// Drops line breaks that occur inside parentheses.
fn strip_bracketed_newlines(tokens: Vec<(Token, usize)>) -> Vec<(Token, usize)> {
    let mut depth = 0usize;

    tokens.into_iter()
          .filter(|(tok, _)| {
              match tok {
                  Token::LParen => depth += 1,
                  Token::RParen => depth = depth.saturating_sub(1),
                  Token::NewLine => return depth == 0,
                  _ => {},
              }
              true
          })
          .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::parser::tree::Parts;

    fn start_children(source: &str) -> Vec<ParseTree> {
        match parse(source).unwrap().into_parts() {
            Parts::Node { rule: Rule::Start,
                          children,
                          .. } => children,
            other => panic!("expected a start node, found {other:?}"),
        }
    }

    #[test]
    fn statements_need_no_separator() {
        let children = start_children("a := 6 f(b) := a + 4 a := 7 f(5)");
        assert_eq!(children.len(), 4);
    }

    #[test]
    fn semicolons_and_blank_lines_separate_statements() {
        let children = start_children("\n\na := 1;; b := 2\n\n a * b;\n");
        assert_eq!(children.len(), 3);
    }

    #[test]
    fn newlines_inside_parentheses_are_ignored() {
        let children = start_children("max(1,\n 2,\n 3)");
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn newline_after_operator_continues_expression() {
        let children = start_children("1 +\n 2");
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn empty_program_is_missing_expression() {
        assert_eq!(parse(""), Err(ParseError::MissingExpression { line: 1 }));
        assert_eq!(parse("a := 1\n"),
                   Err(ParseError::MissingExpression { line: 1 }));
    }

    #[test]
    fn statement_after_final_expression_is_rejected() {
        assert!(matches!(parse("1\nx := 2"),
                         Err(ParseError::UnexpectedToken { line: 2, .. })));
    }

    #[test]
    fn unbalanced_parenthesis() {
        assert_eq!(parse("(1 + 2"),
                   Err(ParseError::ExpectedClosingParen { line: 1 }));
    }
}
