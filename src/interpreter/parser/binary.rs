use std::iter::Peekable;

use crate::interpreter::{
    lexer::Token,
    parser::{
        core::{ParseResult, skip_newlines},
        tree::{ParseTree, Rule},
        unary::parse_prefix,
    },
};

/// Parses addition and subtraction expressions.
///
/// The rule is: `sum := product (("+" | "-") product)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// A [`Rule::Sum`] node, or the single operand when no operator follows it.
pub(crate) fn parse_sum<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ParseTree>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_infix_level(tokens, Rule::Sum, &[Token::Plus, Token::Minus], parse_product)
}

/// Parses multiplication-level expressions.
///
/// The rule is: `product := power (("*" | "/") power)*`
pub(crate) fn parse_product<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ParseTree>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_infix_level(tokens, Rule::Product, &[Token::Star, Token::Slash], parse_power)
}

/// Parses exponentiation expressions.
///
/// The rule is: `power := prefix ("**" prefix)*`
///
/// Like every other infix level the operands are collected in order; the
/// transformer folds them from the left, so `2 ** 3 ** 2` means
/// `(2 ** 3) ** 2`.
pub(crate) fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<ParseTree>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_infix_level(tokens, Rule::Power, &[Token::DoubleStar], parse_prefix)
}

/// Parses one precedence level of infix operators.
///
/// Collects `operand (operator operand)*` into a single flat node of the
/// given `rule`. A line break directly after an operator continues the
/// expression.
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `rule`: The rule recorded on the resulting node.
/// - `operators`: Tokens accepted as operators on this level.
/// - `parse_operand`: Parser for the next-higher precedence level.
///
/// # Returns
/// The node for this level, or the lone operand when no operator is present.
fn parse_infix_level<'a, I>(tokens: &mut Peekable<I>,
                            rule: Rule,
                            operators: &[Token],
                            parse_operand: impl Fn(&mut Peekable<I>) -> ParseResult<ParseTree>)
                            -> ParseResult<ParseTree>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let first = parse_operand(tokens)?;
    let mut rest = Vec::new();

    loop {
        if let Some((token, line)) = tokens.peek()
           && operators.contains(token)
        {
            rest.push(ParseTree::leaf(token.clone(), *line));
            tokens.next();
            skip_newlines(tokens);
            rest.push(parse_operand(tokens)?);
            continue;
        }
        break;
    }

    if rest.is_empty() {
        return Ok(first);
    }

    let line = first.line_number();
    let mut children = Vec::with_capacity(rest.len() + 1);
    children.push(first);
    children.extend(rest);

    Ok(ParseTree::node(rule, children, line))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::interpreter::{
        lexer::Token,
        parser::{
            parse,
            tree::{ParseTree, Parts, Rule},
        },
    };

    fn number(value: f64) -> ParseTree {
        ParseTree::node(Rule::Number, vec![ParseTree::leaf(Token::Number(value), 1)], 1)
    }

    fn expression(source: &str) -> ParseTree {
        match parse(source).unwrap().into_parts() {
            Parts::Node { mut children, .. } => children.remove(0),
            leaf @ Parts::Leaf { .. } => panic!("expected a start node, found {leaf:?}"),
        }
    }

    #[test]
    fn power_chain_is_flat() {
        assert_eq!(expression("2**3**2"),
                   ParseTree::node(Rule::Power,
                                   vec![number(2.0),
                                        ParseTree::leaf(Token::DoubleStar, 1),
                                        number(3.0),
                                        ParseTree::leaf(Token::DoubleStar, 1),
                                        number(2.0)],
                                   1));
    }

    #[test]
    fn product_binds_tighter_than_sum() {
        assert_eq!(expression("1+2*3"),
                   ParseTree::node(Rule::Sum,
                                   vec![number(1.0),
                                        ParseTree::leaf(Token::Plus, 1),
                                        ParseTree::node(Rule::Product,
                                                        vec![number(2.0),
                                                             ParseTree::leaf(Token::Star, 1),
                                                             number(3.0)],
                                                        1)],
                                   1));
    }

    #[test]
    fn single_operand_is_not_wrapped() {
        assert_eq!(expression("7"), number(7.0));
    }
}
