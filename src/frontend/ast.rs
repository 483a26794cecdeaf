//! Abstract Syntax Tree (AST) for the constraint notation.
//!
//! The AST keeps the parsed shape of each statement together with source
//! spans, so evaluation errors can point back into the input.

use crate::polyhedral::{Relation, Scalar};
use crate::utils::location::Span;
use std::fmt;

/// A parsed input: statements in source order.
#[derive(Debug, Clone, Default)]
pub struct Program {
    /// Statements in source order
    pub statements: Vec<Statement>,
    /// Source span
    pub span: Span,
}

impl Program {
    /// Create a new empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check if there are no statements.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// One statement: an expression, optionally compared against another.
#[derive(Debug, Clone)]
pub struct Statement {
    /// Left-hand side (or the whole statement when there is no relation)
    pub lhs: Expr,
    /// Relational operator and right-hand side
    pub relation: Option<(Relation, Expr)>,
    /// Source span
    pub span: Span,
}

impl Statement {
    /// Check if the statement compares two sides.
    pub fn is_relation(&self) -> bool {
        self.relation.is_some()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lhs)?;
        if let Some((relation, rhs)) = &self.relation {
            write!(f, " {} {}", relation, rhs)?;
        }
        Ok(())
    }
}

/// An expression.
#[derive(Debug, Clone)]
pub struct Expr {
    /// The kind of expression
    pub kind: ExprKind,
    /// Source span
    pub span: Span,
}

impl Expr {
    /// Create a new expression.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Create an integer literal.
    pub fn int_lit(value: impl Into<Scalar>, span: Span) -> Self {
        Self::new(ExprKind::IntLiteral(value.into()), span)
    }

    /// Create a name reference.
    pub fn name(name: impl Into<String>, span: Span) -> Self {
        Self::new(ExprKind::Name(name.into()), span)
    }

    /// Check if no name occurs in this expression.
    pub fn is_constant(&self) -> bool {
        match &self.kind {
            ExprKind::IntLiteral(_) | ExprKind::FloatLiteral(_) => true,
            ExprKind::Name(_) => false,
            ExprKind::Unary { operand, .. } => operand.is_constant(),
            ExprKind::Binary { left, right, .. } => left.is_constant() && right.is_constant(),
            ExprKind::Grouped(inner) => inner.is_constant(),
        }
    }

    /// Check if the expression is linear in its names: every product has
    /// at least one constant factor.
    pub fn is_linear(&self) -> bool {
        match &self.kind {
            ExprKind::IntLiteral(_) | ExprKind::FloatLiteral(_) | ExprKind::Name(_) => true,
            ExprKind::Unary { operand, .. } => operand.is_linear(),
            ExprKind::Grouped(inner) => inner.is_linear(),
            ExprKind::Binary { op, left, right } => {
                let both = left.is_linear() && right.is_linear();
                match op {
                    BinaryOp::Add | BinaryOp::Sub => both,
                    BinaryOp::Mul => both && (left.is_constant() || right.is_constant()),
                }
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::IntLiteral(v) => write!(f, "{}", v),
            ExprKind::FloatLiteral(v) => write!(f, "{:?}", v),
            ExprKind::Name(name) => write!(f, "{}", name),
            ExprKind::Unary { op, operand } => write!(f, "{}{}", op, operand),
            ExprKind::Binary { op, left, right } => write!(f, "{} {} {}", left, op, right),
            ExprKind::Grouped(inner) => write!(f, "({})", inner),
        }
    }
}

/// The kind of an expression.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Integer literal
    IntLiteral(Scalar),
    /// Floating-point literal
    FloatLiteral(f64),
    /// Variable name: `x3` or a declared name
    Name(String),

    /// Binary operation: `left op right`
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
    },

    /// Unary operation: `op operand`
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: Box<Expr>,
    },

    /// Grouped expression (parenthesized)
    Grouped(Box<Expr>),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Mul => write!(f, "*"),
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Negation: `-x`
    Neg,
    /// Identity: `+x`
    Plus,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Plus => write!(f, "+"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            Span::default(),
        )
    }

    #[test]
    fn test_expr_is_linear() {
        let x = || Expr::name("x0", Span::default());
        let y = || Expr::name("x1", Span::default());
        let two = || Expr::int_lit(2, Span::default());

        assert!(binary(BinaryOp::Add, x(), y()).is_linear());
        assert!(binary(BinaryOp::Mul, two(), x()).is_linear());
        assert!(!binary(BinaryOp::Mul, x(), y()).is_linear());
        assert!(binary(BinaryOp::Mul, two(), two()).is_constant());
        assert!(!binary(BinaryOp::Sub, x(), two()).is_constant());
    }

    #[test]
    fn test_display() {
        let e = binary(
            BinaryOp::Mul,
            Expr::int_lit(5, Span::default()),
            Expr::name("n", Span::default()),
        );
        let stmt = Statement {
            lhs: e,
            relation: Some((Relation::GreaterOrEqual, Expr::int_lit(0, Span::default()))),
            span: Span::default(),
        };
        assert_eq!(stmt.to_string(), "5 * n >= 0");
        assert!(stmt.is_relation());
    }
}
