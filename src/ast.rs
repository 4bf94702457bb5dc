use std::{fmt, mem};

use crate::util::stack::ensure_sufficient_stack;

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Every expression evaluates to a single `f64`. Each variant records the
/// source line it was parsed from so that runtime errors can point back at the
/// offending code.
///
/// Long operator chains produce very deep trees, so `Clone` and `Display`
/// grow the stack as they recurse and `Drop` frees nodes iteratively.
#[derive(Debug, PartialEq)]
pub enum Expr {
    /// A numeric literal such as `3.5`.
    Number {
        /// The constant value.
        value: f64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A binary operation (`a + b`, `a ** b`, ...).
    InfixOperation {
        /// The operator.
        op:    InfixOperator,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A unary prefix operation (`-x`, `+x`).
    PrefixOperation {
        /// The prefix operator to apply.
        op:      PrefixOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// Line number in the source code.
        line:    usize,
    },
    /// Function call expression (e.g. `atan2(y, x)`).
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function, in call order.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Reference to a variable or builtin constant by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use tally::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Number { line, .. }
            | Self::InfixOperation { line, .. }
            | Self::PrefixOperation { line, .. }
            | Self::FunctionCall { line, .. }
            | Self::Variable { line, .. } => *line,
        }
    }

    /// Moves the direct sub-expressions of `self` into `out`, leaving
    /// childless placeholders behind.
    fn detach_children(&mut self, out: &mut Vec<Self>) {
        match self {
            Self::InfixOperation { left, right, .. } => {
                out.push(mem::replace(&mut **left, Self::placeholder()));
                out.push(mem::replace(&mut **right, Self::placeholder()));
            },
            Self::PrefixOperation { operand, .. } => {
                out.push(mem::replace(&mut **operand, Self::placeholder()));
            },
            Self::FunctionCall { arguments, .. } => out.append(arguments),
            Self::Number { .. } | Self::Variable { .. } => {},
        }
    }

    const fn placeholder() -> Self {
        Self::Number { value: 0.0,
                       line:  0, }
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_children(&mut pending);
        }
    }
}

impl Clone for Expr {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| match self {
            Self::Number { value, line } => Self::Number { value: *value,
                                                           line:  *line, },
            Self::InfixOperation { op, left, right, line } => {
                Self::InfixOperation { op:    *op,
                                       left:  left.clone(),
                                       right: right.clone(),
                                       line:  *line, }
            },
            Self::PrefixOperation { op, operand, line } => {
                Self::PrefixOperation { op:      *op,
                                        operand: operand.clone(),
                                        line:    *line, }
            },
            Self::FunctionCall { name,
                                 arguments,
                                 line, } => Self::FunctionCall { name:      name.clone(),
                                                                 arguments: arguments.clone(),
                                                                 line:      *line, },
            Self::Variable { name, line } => Self::Variable { name: name.clone(),
                                                              line: *line, },
        })
    }
}

/// Represents a user-defined function definition such as
/// `hyp(a, b) := (a**2 + b**2)**0.5`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:   String,
    /// The parameter names, in declaration order.
    pub params: Vec<String>,
    /// The body expression evaluated when the function is called.
    pub body:   Expr,
    /// Line number in the source code.
    pub line:   usize,
}

/// Represents a top-level statement.
///
/// Statements only change the environment; they never produce a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A variable definition, `name := value`.
    VariableDefinition {
        /// The name of the variable.
        name:  String,
        /// The expression whose value is bound to `name`.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// A user-defined function definition.
    FunctionDefinition(FunctionDef),
}

impl Statement {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::VariableDefinition { line, .. } | Self::FunctionDefinition(FunctionDef { line, .. }) => {
                *line
            },
        }
    }
}

/// A complete program: zero or more statements followed by the single
/// expression whose value is the result of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Definitions, executed in order.
    pub statements: Vec<Statement>,
    /// The trailing expression.
    pub expression: Expr,
}

/// Represents an infix (binary) operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InfixOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`**`)
    Pow,
}

/// Represents a unary prefix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrefixOperator {
    /// Identity (`+x`).
    Plus,
    /// Arithmetic negation (`-x`).
    Negate,
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "**",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plus => write!(f, "+"),
            Self::Negate => write!(f, "-"),
        }
    }
}

/// Renders the expression back as source text.
///
/// Every compound sub-expression is parenthesized, so the output shows exactly
/// how the program was grouped.
///
/// ## Example
/// ```
/// use tally::parse_program;
///
/// let program = parse_program("2**3**2").unwrap();
/// assert_eq!(program.expression.to_string(), "((2 ** 3) ** 2)");
/// ```
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Self::Number { value, .. } => write!(f, "{value}"),
            Self::InfixOperation { op, left, right, .. } => write!(f, "({left} {op} {right})"),
            Self::PrefixOperation { op, operand, .. } => write!(f, "{op}{operand}"),
            Self::FunctionCall { name, arguments, .. } => {
                write!(f, "{name}(")?;
                write_separated(f, arguments)?;
                write!(f, ")")
            },
            Self::Variable { name, .. } => write!(f, "{name}"),
        })
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VariableDefinition { name, value, .. } => write!(f, "{name} := {value}"),
            Self::FunctionDefinition(def) => {
                write!(f, "{}(", def.name)?;
                write_separated(f, &def.params)?;
                write!(f, ") := {}", def.body)
            },
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{statement}")?;
        }
        write!(f, "{}", self.expression)
    }
}

fn write_separated<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn negations(depth: usize) -> Expr {
        let mut expr = Expr::Variable { name: "x".to_string(),
                                        line: 1, };
        for _ in 0..depth {
            expr = Expr::PrefixOperation { op:      PrefixOperator::Negate,
                                           operand: Box::new(expr),
                                           line:    1, };
        }
        expr
    }

    #[test]
    fn deep_trees_clone_render_and_drop() {
        let expr = negations(300_000);
        let copy = expr.clone();
        assert_eq!(copy.to_string().len(), 300_001);
        drop(expr);
        drop(copy);
    }

    #[test]
    fn wide_calls_drop() {
        let arguments = (0..1000).map(|i| negations(i % 7)).collect();
        let call = Expr::FunctionCall { name: "max".to_string(),
                                        arguments,
                                        line: 1 };
        assert_eq!(call.clone(), call);
    }
}
