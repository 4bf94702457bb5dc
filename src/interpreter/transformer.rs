use crate::{
    ast::{Expr, FunctionDef, InfixOperator, PrefixOperator, Program, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::tree::{ParseTree, Parts, Rule},
    },
    util::stack::ensure_sufficient_stack,
};

type TransformResult<T> = Result<T, ParseError>;

/// Turns a parse tree into a [`Program`].
///
/// The root must be a [`Rule::Start`] node. All of its children except the
/// last must be definitions, and the last must be an expression.
///
/// # Errors
/// Returns `ParseError::MalformedInput` for any node whose rule or children do
/// not have the shape the parser produces. Shapes are never skipped or
/// guessed at.
///
/// # Example
/// ```
/// use tally::interpreter::{parser::parse, transformer::transform};
///
/// let program = transform(parse("a := 1\na + 2").unwrap()).unwrap();
/// assert_eq!(program.statements.len(), 1);
/// assert_eq!(program.expression.to_string(), "(a + 2)");
/// ```
pub fn transform(tree: ParseTree) -> TransformResult<Program> {
    let (children, line) = expect_node(tree, Rule::Start)?;
    let mut children = children.into_iter();

    let Some(last) = children.next_back() else {
        return Err(ParseError::MalformedInput { details: "program without a final expression".to_string(),
                                                line });
    };

    let statements = children.map(transform_statement)
                             .collect::<TransformResult<Vec<_>>>()?;
    let expression = transform_expression(last)?;

    Ok(Program { statements,
                 expression })
}

/// Transforms a definition node into a [`Statement`].
pub fn transform_statement(tree: ParseTree) -> TransformResult<Statement> {
    match tree.into_parts() {
        Parts::Node { rule: Rule::VariableDefinition,
                      children,
                      line, } => {
            let [name, value] = exact_children::<2>(children, Rule::VariableDefinition, line)?;

            Ok(Statement::VariableDefinition { name: expect_identifier(name)?,
                                               value: transform_expression(value)?,
                                               line })
        },
        Parts::Node { rule: Rule::FunctionDefinition,
                      children,
                      line, } => {
            let mut children = children.into_iter();
            let (Some(name), Some(body)) = (children.next(), children.next_back()) else {
                return Err(malformed(Rule::FunctionDefinition, "missing name or body", line));
            };

            let params = children.map(expect_identifier)
                                 .collect::<TransformResult<Vec<_>>>()?;

            Ok(Statement::FunctionDefinition(FunctionDef { name: expect_identifier(name)?,
                                                           params,
                                                           body: transform_expression(body)?,
                                                           line }))
        },
        other => Err(unexpected(&other, "a definition")),
    }
}

/// Transforms an expression node into an [`Expr`].
///
/// Infix levels are folded from the left: the children
/// `a op1 b op2 c` become `((a op1 b) op2 c)`. This applies to `**` as well.
pub fn transform_expression(tree: ParseTree) -> TransformResult<Expr> {
    ensure_sufficient_stack(|| transform_node(tree))
}

fn transform_node(tree: ParseTree) -> TransformResult<Expr> {
    match tree.into_parts() {
        Parts::Node { rule: Rule::Number,
                      children,
                      line, } => {
            let [literal] = exact_children::<1>(children, Rule::Number, line)?;
            match literal.into_parts() {
                Parts::Leaf { token: Token::Number(value),
                              line, } => Ok(Expr::Number { value, line }),
                other => Err(unexpected(&other, "a numeric literal")),
            }
        },
        Parts::Node { rule: Rule::Variable,
                      children,
                      line, } => {
            let [name] = exact_children::<1>(children, Rule::Variable, line)?;
            Ok(Expr::Variable { name: expect_identifier(name)?,
                                line })
        },
        Parts::Node { rule: Rule::FunctionCall,
                      children,
                      line, } => {
            let mut children = children.into_iter();
            let Some(name) = children.next() else {
                return Err(malformed(Rule::FunctionCall, "missing function name", line));
            };
            let arguments = children.map(transform_expression)
                                    .collect::<TransformResult<Vec<_>>>()?;

            Ok(Expr::FunctionCall { name: expect_identifier(name)?,
                                    arguments,
                                    line })
        },
        Parts::Node { rule: Rule::Prefix,
                      children,
                      line, } => {
            let [operator, operand] = exact_children::<2>(children, Rule::Prefix, line)?;
            let op = match operator.into_parts() {
                Parts::Leaf { token: Token::Plus, .. } => PrefixOperator::Plus,
                Parts::Leaf { token: Token::Minus, .. } => PrefixOperator::Negate,
                other => return Err(unexpected(&other, "a prefix operator")),
            };

            Ok(Expr::PrefixOperation { op,
                                       operand: Box::new(transform_expression(operand)?),
                                       line })
        },
        Parts::Node { rule: rule @ (Rule::Sum | Rule::Product | Rule::Power),
                      children,
                      line, } => fold_infix(rule, children, line),
        other => Err(unexpected(&other, "an expression")),
    }
}

/// Folds a flat `operand (operator operand)*` sequence from the left.
fn fold_infix(rule: Rule, children: Vec<ParseTree>, line: usize) -> TransformResult<Expr> {
    if children.len() < 3 || children.len() % 2 == 0 {
        return Err(malformed(rule,
                             &format!("expected operands separated by operators, found {} children",
                                      children.len()),
                             line));
    }

    let mut children = children.into_iter();
    let mut value = match children.next() {
        Some(first) => transform_expression(first)?,
        None => return Err(malformed(rule, "missing operand", line)),
    };

    while let (Some(operator), Some(operand)) = (children.next(), children.next()) {
        let (op, op_line) = infix_operator(rule, operator)?;
        value = Expr::InfixOperation { op,
                                       left: Box::new(value),
                                       right: Box::new(transform_expression(operand)?),
                                       line: op_line };
    }

    Ok(value)
}

/// Maps an operator leaf to the infix operator allowed on `rule`'s level.
fn infix_operator(rule: Rule, tree: ParseTree) -> TransformResult<(InfixOperator, usize)> {
    let (token, line) = match tree.into_parts() {
        Parts::Leaf { token, line } => (token, line),
        node @ Parts::Node { .. } => return Err(unexpected(&node, "an infix operator")),
    };

    let op = match (rule, &token) {
        (Rule::Sum, Token::Plus) => InfixOperator::Add,
        (Rule::Sum, Token::Minus) => InfixOperator::Sub,
        (Rule::Product, Token::Star) => InfixOperator::Mul,
        (Rule::Product, Token::Slash) => InfixOperator::Div,
        (Rule::Power, Token::DoubleStar) => InfixOperator::Pow,
        _ => {
            return Err(malformed(rule, &format!("{token:?} is not an operator of this level"), line));
        },
    };

    Ok((op, line))
}

fn expect_node(tree: ParseTree, expected: Rule) -> TransformResult<(Vec<ParseTree>, usize)> {
    match tree.into_parts() {
        Parts::Node { rule,
                      children,
                      line, } if rule == expected => Ok((children, line)),
        other => Err(unexpected(&other, expected.name())),
    }
}

fn expect_identifier(tree: ParseTree) -> TransformResult<String> {
    match tree.into_parts() {
        Parts::Leaf { token: Token::Identifier(name),
                      .. } => Ok(name),
        other => Err(unexpected(&other, "an identifier")),
    }
}

fn exact_children<const N: usize>(children: Vec<ParseTree>,
                                  rule: Rule,
                                  line: usize)
                                  -> TransformResult<[ParseTree; N]> {
    let found = children.len();
    children.try_into()
            .map_err(|_| malformed(rule, &format!("expected {N} children, found {found}"), line))
}

fn malformed(rule: Rule, details: &str, line: usize) -> ParseError {
    ParseError::MalformedInput { details: format!("{} node: {details}", rule.name()),
                                 line }
}

fn unexpected(parts: &Parts, expected: &str) -> ParseError {
    let found = match parts {
        Parts::Node { rule, .. } => format!("{} node", rule.name()),
        Parts::Leaf { token, .. } => format!("token {token:?}"),
    };
    ParseError::MalformedInput { details: format!("expected {expected}, found {found}"),
                                 line:    parts.line_number(), }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn leaf(token: Token) -> ParseTree {
        ParseTree::leaf(token, 1)
    }

    fn number(value: f64) -> ParseTree {
        ParseTree::node(Rule::Number, vec![leaf(Token::Number(value))], 1)
    }

    fn num(value: f64) -> Expr {
        Expr::Number { value, line: 1 }
    }

    #[test]
    fn power_folds_from_the_left() {
        let tree = ParseTree::node(Rule::Power,
                                   vec![number(2.0),
                                        leaf(Token::DoubleStar),
                                        number(3.0),
                                        leaf(Token::DoubleStar),
                                        number(2.0)],
                                   1);

        let inner = Expr::InfixOperation { op:    InfixOperator::Pow,
                                           left:  Box::new(num(2.0)),
                                           right: Box::new(num(3.0)),
                                           line:  1, };
        assert_eq!(transform_expression(tree).unwrap(),
                   Expr::InfixOperation { op:    InfixOperator::Pow,
                                          left:  Box::new(inner),
                                          right: Box::new(num(2.0)),
                                          line:  1, });
    }

    #[test]
    fn start_splits_statements_and_expression() {
        let tree = ParseTree::node(Rule::Start,
                                   vec![ParseTree::node(Rule::VariableDefinition,
                                                        vec![leaf(Token::Identifier("a".into())),
                                                             number(6.0)],
                                                        1),
                                        number(1.0)],
                                   1);

        let program = transform(tree).unwrap();
        assert_eq!(program.statements,
                   vec![Statement::VariableDefinition { name:  "a".into(),
                                                        value: num(6.0),
                                                        line:  1, }]);
        assert_eq!(program.expression, num(1.0));
    }

    #[test]
    fn unknown_root_is_malformed() {
        let err = transform(number(1.0)).unwrap_err();
        assert!(matches!(err, ParseError::MalformedInput { .. }));
    }

    #[test]
    fn empty_start_is_malformed() {
        let err = transform(ParseTree::node(Rule::Start, Vec::new(), 3)).unwrap_err();
        assert!(matches!(err, ParseError::MalformedInput { line: 3, .. }));
    }

    #[test]
    fn operator_from_wrong_level_is_malformed() {
        let tree = ParseTree::node(Rule::Sum, vec![number(1.0), leaf(Token::Star), number(2.0)], 1);
        assert!(matches!(transform_expression(tree),
                         Err(ParseError::MalformedInput { .. })));
    }

    #[test]
    fn dangling_operator_is_malformed() {
        let tree = ParseTree::node(Rule::Sum, vec![number(1.0), leaf(Token::Plus)], 1);
        assert!(matches!(transform_expression(tree),
                         Err(ParseError::MalformedInput { .. })));
    }

    #[test]
    fn statement_in_expression_position_is_malformed() {
        let definition = ParseTree::node(Rule::VariableDefinition,
                                         vec![leaf(Token::Identifier("a".into())), number(1.0)],
                                         1);
        let tree = ParseTree::node(Rule::Start, vec![definition], 1);
        assert!(matches!(transform(tree), Err(ParseError::MalformedInput { .. })));
    }

    #[test]
    fn numeric_parameter_is_malformed() {
        let tree = ParseTree::node(Rule::FunctionDefinition,
                                   vec![leaf(Token::Identifier("f".into())),
                                        leaf(Token::Number(1.0)),
                                        number(2.0)],
                                   1);
        assert!(matches!(transform_statement(tree),
                         Err(ParseError::MalformedInput { .. })));
    }

    #[test]
    fn bare_leaf_is_not_an_expression() {
        assert!(matches!(transform_expression(leaf(Token::Comma)),
                         Err(ParseError::MalformedInput { .. })));
    }
}
