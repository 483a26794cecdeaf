//! Linear constraints.
//!
//! A constraint is a linear expression `e` compared with zero:
//! - Equality: `e == 0`
//! - Nonstrict inequality: `e >= 0`
//! - Strict inequality: `e > 0`
//!
//! Constraints come out of comparing two operands (see
//! [`Relational`] and [`compare`](crate::polyhedral::compare)), which
//! normalizes every relation into one of the three forms above.

use crate::polyhedral::expr::LinearExpression;
use crate::polyhedral::operand::{Operand, Relation};
use crate::polyhedral::scalar::Scalar;
use crate::polyhedral::variable::Variable;
use num_traits::{Signed, Zero};
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeTuple, Serializer};
use std::fmt;

/// Kind of constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// `expr == 0`
    Equality,
    /// `expr >= 0`
    NonstrictInequality,
    /// `expr > 0`
    StrictInequality,
}

impl ConstraintKind {
    /// Name of the constructor function that builds this kind; this is
    /// also the tag used in the serialized form.
    pub fn constructor_name(self) -> &'static str {
        match self {
            ConstraintKind::Equality => "equation",
            ConstraintKind::NonstrictInequality => "inequality",
            ConstraintKind::StrictInequality => "strict_inequality",
        }
    }

    fn from_constructor_name(name: &str) -> Option<Self> {
        match name {
            "equation" => Some(ConstraintKind::Equality),
            "inequality" => Some(ConstraintKind::NonstrictInequality),
            "strict_inequality" => Some(ConstraintKind::StrictInequality),
            _ => None,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            ConstraintKind::Equality => "==0",
            ConstraintKind::NonstrictInequality => ">=0",
            ConstraintKind::StrictInequality => ">0",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConstraintKind::Equality => "equality",
            ConstraintKind::NonstrictInequality => "nonstrict_inequality",
            ConstraintKind::StrictInequality => "strict_inequality",
        })
    }
}

/// A linear constraint `expr {==, >=, >} 0`.
///
/// Like [`LinearExpression`], a constraint has no `PartialEq`/`Hash` impl;
/// use [`Constraint::is_equivalent_to`] to compare solution sets.
#[derive(Debug, Clone)]
pub struct Constraint {
    /// The linear expression compared with zero
    expr: LinearExpression,
    /// Kind of constraint
    kind: ConstraintKind,
}

/// Build the equality `expr == 0`.
pub fn equation(expr: impl Into<LinearExpression>) -> Constraint {
    Constraint::new(expr.into(), ConstraintKind::Equality)
}

/// Build the nonstrict inequality `expr >= 0`.
pub fn inequality(expr: impl Into<LinearExpression>) -> Constraint {
    Constraint::new(expr.into(), ConstraintKind::NonstrictInequality)
}

/// Build the strict inequality `expr > 0`.
pub fn strict_inequality(expr: impl Into<LinearExpression>) -> Constraint {
    Constraint::new(expr.into(), ConstraintKind::StrictInequality)
}

impl Constraint {
    pub(crate) fn new(expr: LinearExpression, kind: ConstraintKind) -> Self {
        Self { expr, kind }
    }

    /// Normalize `lhs (relation) rhs`:
    ///
    /// | relation     | kind                | expression  |
    /// |--------------|---------------------|-------------|
    /// | `lhs < rhs`  | strict inequality   | `rhs - lhs` |
    /// | `lhs <= rhs` | nonstrict inequality| `rhs - lhs` |
    /// | `lhs == rhs` | equality            | `lhs - rhs` |
    /// | `lhs >= rhs` | nonstrict inequality| `lhs - rhs` |
    /// | `lhs > rhs`  | strict inequality   | `lhs - rhs` |
    pub fn from_relation(lhs: LinearExpression, relation: Relation, rhs: LinearExpression) -> Self {
        let constraint = match relation {
            Relation::Less => strict_inequality(rhs - lhs),
            Relation::LessOrEqual => inequality(rhs - lhs),
            Relation::Equal => equation(lhs - rhs),
            Relation::GreaterOrEqual => inequality(lhs - rhs),
            Relation::Greater => strict_inequality(lhs - rhs),
        };
        log::trace!("normalized `{}` relation into {}", relation, constraint);
        constraint
    }

    /// Kind of constraint.
    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    /// Check if this is an equality constraint.
    pub fn is_equality(&self) -> bool {
        self.kind == ConstraintKind::Equality
    }

    /// Check if this is a strict or nonstrict inequality.
    pub fn is_inequality(&self) -> bool {
        !self.is_equality()
    }

    /// Check if this is a nonstrict inequality.
    pub fn is_nonstrict_inequality(&self) -> bool {
        self.kind == ConstraintKind::NonstrictInequality
    }

    /// Check if this is a strict inequality.
    pub fn is_strict_inequality(&self) -> bool {
        self.kind == ConstraintKind::StrictInequality
    }

    /// The expression compared with zero.
    pub fn expression(&self) -> &LinearExpression {
        &self.expr
    }

    /// Coefficient of `v` in the expression.
    pub fn coefficient(&self, v: Variable) -> Scalar {
        self.expr.coefficient(v)
    }

    /// All coefficients of the expression.
    pub fn coefficients(&self) -> &[Scalar] {
        self.expr.coefficients()
    }

    /// The constant term of the expression.
    pub fn inhomogeneous_term(&self) -> &Scalar {
        self.expr.inhomogeneous_term()
    }

    /// Space dimension of the expression.
    pub fn space_dimension(&self) -> usize {
        self.expr.space_dimension()
    }

    /// True iff every point of the space satisfies the constraint.
    pub fn is_tautological(&self) -> bool {
        if !self.expr.all_homogeneous_terms_are_zero() {
            return false;
        }
        let b = self.expr.inhomogeneous_term();
        match self.kind {
            ConstraintKind::Equality => b.is_zero(),
            ConstraintKind::NonstrictInequality => !b.is_negative(),
            ConstraintKind::StrictInequality => b.is_positive(),
        }
    }

    /// True iff no point of the space satisfies the constraint.
    pub fn is_inconsistent(&self) -> bool {
        if !self.expr.all_homogeneous_terms_are_zero() {
            return false;
        }
        let b = self.expr.inhomogeneous_term();
        match self.kind {
            ConstraintKind::Equality => !b.is_zero(),
            ConstraintKind::NonstrictInequality => b.is_negative(),
            ConstraintKind::StrictInequality => !b.is_positive(),
        }
    }

    /// True iff both constraints have the same solution set.
    ///
    /// Any two tautologies are equivalent, and so are any two inconsistent
    /// constraints, whatever their dimensions. Otherwise constraints of
    /// different space dimension or kind are never equivalent, and
    /// constraints of the same kind are compared on their
    /// [normalized](Self::normalized) expressions.
    pub fn is_equivalent_to(&self, other: &Constraint) -> bool {
        if self.is_tautological() || other.is_tautological() {
            return self.is_tautological() && other.is_tautological();
        }
        if self.is_inconsistent() || other.is_inconsistent() {
            return self.is_inconsistent() && other.is_inconsistent();
        }
        if self.space_dimension() != other.space_dimension() || self.kind != other.kind {
            return false;
        }
        self.normalized().expr.is_equal_to(&other.normalized().expr)
    }

    /// The same constraint with its expression divided by the GCD of all
    /// its terms. Equalities are also sign-normalized so that the first
    /// nonzero coefficient is positive.
    pub fn normalized(&self) -> Constraint {
        let mut expr = self.expr.normalized();
        if self.kind == ConstraintKind::Equality {
            let leading = expr
                .coefficients()
                .iter()
                .find(|c| !c.is_zero())
                .unwrap_or_else(|| expr.inhomogeneous_term());
            if leading.is_negative() {
                expr = -expr;
            }
        }
        Constraint::new(expr, self.kind)
    }

    /// Check if this constraint is satisfied by the given point. Coordinates
    /// missing from `point` count as zero.
    pub fn is_satisfied_by(&self, point: &[Scalar]) -> bool {
        let value = self.expr.evaluate(point);
        match self.kind {
            ConstraintKind::Equality => value.is_zero(),
            ConstraintKind::NonstrictInequality => !value.is_negative(),
            ConstraintKind::StrictInequality => value.is_positive(),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.expr, self.kind.suffix())
    }
}

// Wire form: `(constructor_name, expression)`.

impl Serialize for Constraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(self.kind.constructor_name())?;
        tuple.serialize_element(&self.expr)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Constraint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (name, expr) = <(String, LinearExpression)>::deserialize(deserializer)?;
        let kind = ConstraintKind::from_constructor_name(&name).ok_or_else(|| {
            <D::Error as de::Error>::unknown_variant(&name, &["inequality", "strict_inequality", "equation"])
        })?;
        Ok(Constraint::new(expr, kind))
    }
}

/// Relational sugar for values that convert to a linear expression.
///
/// Each method builds the constraint `self (relation) rhs`. The left-hand
/// side always involves a variable or expression, so the result is always
/// a [`Constraint`]; compare two plain numbers with
/// [`compare`](crate::polyhedral::compare) instead.
pub trait Relational: Into<LinearExpression> + Sized {
    /// `self < rhs`
    fn less_than(self, rhs: impl Into<Operand>) -> Constraint {
        Constraint::from_relation(self.into(), Relation::Less, rhs.into().into_expression())
    }

    /// `self <= rhs`
    fn less_or_equal(self, rhs: impl Into<Operand>) -> Constraint {
        Constraint::from_relation(self.into(), Relation::LessOrEqual, rhs.into().into_expression())
    }

    /// `self == rhs`
    fn equals(self, rhs: impl Into<Operand>) -> Constraint {
        Constraint::from_relation(self.into(), Relation::Equal, rhs.into().into_expression())
    }

    /// `self >= rhs`
    fn greater_or_equal(self, rhs: impl Into<Operand>) -> Constraint {
        Constraint::from_relation(self.into(), Relation::GreaterOrEqual, rhs.into().into_expression())
    }

    /// `self > rhs`
    fn greater_than(self, rhs: impl Into<Operand>) -> Constraint {
        Constraint::from_relation(self.into(), Relation::Greater, rhs.into().into_expression())
    }
}

impl Relational for Variable {}
impl Relational for LinearExpression {}
impl Relational for &LinearExpression {}
