//! Evaluation of parsed statements into algebra values.

use crate::frontend::ast::*;
use crate::polyhedral::{compare, Comparison, Operand, ToScalar, Variable};
use crate::utils::errors::{SemanticError, SemanticErrorKind};
use crate::utils::location::Span;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fmt;

/// The value of one statement.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// A statement without a relation
    Value(Operand),
    /// A statement with a relation: a constraint, or a truth value when
    /// both sides are plain numbers
    Comparison(Comparison),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Value(v) => write!(f, "{}", v),
            Outcome::Comparison(c) => write!(f, "{}", c),
        }
    }
}

/// Resolves names and evaluates expressions.
///
/// `x<digits>` always names the variable with that index. Other names are
/// looked up in the declared list, where position `i` is `Variable(i)`;
/// declared names take precedence.
#[derive(Debug, Default)]
pub struct Evaluator {
    names: HashMap<String, Variable>,
}

impl Evaluator {
    /// Create an evaluator that knows only `x<digits>` names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator with declared variable names.
    pub fn with_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let mut evaluator = Self::new();
        for (id, name) in names.iter().enumerate() {
            evaluator.declare(name.as_ref(), Variable::new(id))?;
        }
        Ok(evaluator)
    }

    fn declare(&mut self, name: &str, v: Variable) -> Result<()> {
        if self.names.contains_key(name) {
            return Err(SemanticError {
                message: format!("Variable name '{}' declared twice", name),
                span: Span::default(),
                kind: SemanticErrorKind::DuplicateDefinition,
            }
            .into());
        }
        self.names.insert(name.to_string(), v);
        Ok(())
    }

    /// Evaluate every statement of a program, in order.
    pub fn evaluate_program(&self, program: &Program) -> Result<Vec<Outcome>> {
        program.statements.iter().map(|s| self.evaluate_statement(s)).collect()
    }

    /// Evaluate one statement.
    pub fn evaluate_statement(&self, stmt: &Statement) -> Result<Outcome> {
        let lhs = self.evaluate(&stmt.lhs)?;
        let outcome = match &stmt.relation {
            Some((relation, rhs)) => {
                let rhs = self.evaluate(rhs)?;
                Outcome::Comparison(compare(lhs, *relation, rhs))
            }
            None => Outcome::Value(lhs),
        };
        log::debug!("`{}` evaluates to {}", stmt, outcome);
        Ok(outcome)
    }

    /// Evaluate an expression.
    pub fn evaluate(&self, expr: &Expr) -> Result<Operand> {
        match &expr.kind {
            ExprKind::IntLiteral(v) => Ok(Operand::Scalar(v.clone())),
            ExprKind::FloatLiteral(v) => {
                let s = v
                    .to_scalar()
                    .with_context(|| format!("in literal at {}", expr.span))?;
                Ok(Operand::Scalar(s))
            }
            ExprKind::Name(name) => self.resolve(name, expr.span).map(Operand::Variable),
            ExprKind::Grouped(inner) => self.evaluate(inner),
            ExprKind::Unary { op, operand } => {
                let value = self.evaluate(operand)?;
                Ok(match op {
                    UnaryOp::Neg => -value,
                    UnaryOp::Plus => value,
                })
            }
            ExprKind::Binary { op, left, right } => {
                let l = self.evaluate(left)?;
                let r = self.evaluate(right)?;
                match op {
                    BinaryOp::Add => Ok(l + r),
                    BinaryOp::Sub => Ok(l - r),
                    BinaryOp::Mul => l
                        .checked_mul(r)
                        .with_context(|| format!("in product at {}", expr.span)),
                }
            }
        }
    }

    /// Resolve a name to a variable.
    pub fn resolve(&self, name: &str, span: Span) -> Result<Variable> {
        if let Some(v) = self.names.get(name) {
            return Ok(*v);
        }
        match name.strip_prefix('x') {
            Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                digits.parse::<usize>().map(Variable::new).map_err(|_| {
                    SemanticError {
                        message: format!("Variable index in '{}' is too large", name),
                        span,
                        kind: SemanticErrorKind::InvalidVariableIndex,
                    }
                    .into()
                })
            }
            _ => Err(SemanticError {
                message: format!("Undefined variable '{}'", name),
                span,
                kind: SemanticErrorKind::UndefinedVariable,
            }
            .into()),
        }
    }
}
