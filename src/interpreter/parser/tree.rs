use std::{fmt, mem};

use crate::{interpreter::lexer::Token, util::stack::ensure_sufficient_stack};

/// The grammar rules that can appear as interior nodes of a parse tree.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Rule {
    /// The whole program: statements followed by one expression.
    Start,
    /// `name := expression`
    VariableDefinition,
    /// `name(params) := expression`
    FunctionDefinition,
    /// Additive level: `product (("+" | "-") product)*`.
    Sum,
    /// Multiplicative level: `power (("*" | "/") power)*`.
    Product,
    /// Exponent level: `prefix ("**" prefix)*`.
    Power,
    /// A prefix operator applied to its operand.
    Prefix,
    /// `name(arguments)`
    FunctionCall,
    /// A bare identifier.
    Variable,
    /// A numeric literal.
    Number,
}

impl Rule {
    /// The snake-case name used when printing trees.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::VariableDefinition => "variable_definition",
            Self::FunctionDefinition => "function_definition",
            Self::Sum => "sum",
            Self::Product => "product",
            Self::Power => "power",
            Self::Prefix => "prefix",
            Self::FunctionCall => "function_call",
            Self::Variable => "variable",
            Self::Number => "number",
        }
    }
}

/// A node of the concrete parse tree.
///
/// The tree mirrors the grammar rather than the meaning of the program:
/// infix levels keep their operands and operators as one flat child list, and
/// punctuation that carries no information (parentheses, commas, `:=`) is
/// dropped. Turning this into an [`crate::ast::Program`] is the transformer's
/// job.
///
/// Dropping a tree frees its descendants iteratively, so a tree cannot be
/// destructured by moving out of it; use [`ParseTree::into_parts`].
#[derive(Debug, PartialEq)]
pub enum ParseTree {
    /// An interior node produced by a grammar rule.
    Node {
        /// The rule that produced the node.
        rule:     Rule,
        /// Ordered children.
        children: Vec<Self>,
        /// Line of the first token covered by the node.
        line:     usize,
    },
    /// A token kept from the input.
    Leaf {
        /// The token.
        token: Token,
        /// Line the token was found on.
        line:  usize,
    },
}

impl ParseTree {
    /// Creates an interior node.
    #[must_use]
    pub const fn node(rule: Rule, children: Vec<Self>, line: usize) -> Self {
        Self::Node { rule,
                     children,
                     line }
    }

    /// Creates a leaf.
    #[must_use]
    pub const fn leaf(token: Token, line: usize) -> Self {
        Self::Leaf { token, line }
    }

    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Node { line, .. } | Self::Leaf { line, .. } => *line,
        }
    }

    /// Takes the tree apart into its owned pieces.
    ///
    /// # Example
    /// ```
    /// use tally::interpreter::parser::{Parts, Rule, parse};
    ///
    /// let Parts::Node { rule, children, .. } = parse("1").unwrap().into_parts() else {
    ///     panic!("expected a node");
    /// };
    /// assert_eq!(rule, Rule::Start);
    /// assert_eq!(children.len(), 1);
    /// ```
    #[must_use]
    pub fn into_parts(mut self) -> Parts {
        match &mut self {
            Self::Node { rule,
                         children,
                         line, } => Parts::Node { rule:     *rule,
                                                  children: mem::take(children),
                                                  line:     *line, },
            Self::Leaf { token, line } => Parts::Leaf { token: mem::replace(token, Token::Comma),
                                                        line:  *line, },
        }
    }

    /// Renders the tree as an indented outline, one node per line.
    ///
    /// # Example
    /// ```
    /// use tally::interpreter::parser::parse;
    ///
    /// let tree = parse("-x").unwrap();
    /// assert_eq!(tree.pretty(), "start\n  prefix\n    Minus\n    variable\n      x\n");
    /// ```
    #[must_use]
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, 0);
        out
    }

    fn write_pretty(&self, out: &mut String, depth: usize) {
        ensure_sufficient_stack(|| self.write_pretty_node(out, depth));
    }

    fn write_pretty_node(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match self {
            Self::Node { rule, children, .. } => {
                out.push_str(&indent);
                out.push_str(rule.name());
                out.push('\n');
                for child in children {
                    child.write_pretty(out, depth + 1);
                }
            },
            Self::Leaf { token, .. } => {
                out.push_str(&indent);
                match token {
                    Token::Number(value) => out.push_str(&value.to_string()),
                    Token::Identifier(name) => out.push_str(name),
                    other => out.push_str(&format!("{other:?}")),
                }
                out.push('\n');
            },
        }
    }
}

impl Drop for ParseTree {
    fn drop(&mut self) {
        let Self::Node { children, .. } = self else {
            return;
        };
        let mut pending = mem::take(children);
        while let Some(mut tree) = pending.pop() {
            if let Self::Node { children, .. } = &mut tree {
                pending.append(children);
            }
        }
    }
}

/// A [`ParseTree`] node taken apart by [`ParseTree::into_parts`].
#[derive(Debug, PartialEq)]
pub enum Parts {
    /// The pieces of [`ParseTree::Node`].
    Node {
        /// The rule that produced the node.
        rule:     Rule,
        /// Ordered children.
        children: Vec<ParseTree>,
        /// Line of the first token covered by the node.
        line:     usize,
    },
    /// The pieces of [`ParseTree::Leaf`].
    Leaf {
        /// The token.
        token: Token,
        /// Line the token was found on.
        line:  usize,
    },
}

impl Parts {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Node { line, .. } | Self::Leaf { line, .. } => *line,
        }
    }
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}
