//! Dynamically typed operands and relational comparison.
//!
//! An [`Operand`] is any value that can take part in linear arithmetic: a
//! plain scalar, a variable or a linear expression. Comparing two operands
//! produces a [`Comparison`]. When both sides are plain scalars the result
//! is an ordinary truth value; as soon as a variable or an expression is
//! involved it is a [`Constraint`].

use crate::polyhedral::constraint::Constraint;
use crate::polyhedral::expr::LinearExpression;
use crate::polyhedral::scalar::{Scalar, ToScalar};
use crate::polyhedral::variable::Variable;
use crate::utils::errors::{TypeError, TypeErrorKind, ValueError};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// A value that can take part in linear arithmetic.
#[derive(Debug, Clone)]
pub enum Operand {
    /// A plain number
    Scalar(Scalar),
    /// A single axis
    Variable(Variable),
    /// A linear expression
    Expression(LinearExpression),
}

impl Operand {
    /// Convert a host number, rejecting values that are not exact integers.
    pub fn from_value<T: ToScalar>(value: T) -> Result<Self, ValueError> {
        value.to_scalar().map(Operand::Scalar)
    }

    /// True for a plain number.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Operand::Scalar(_))
    }

    /// Widen to a linear expression. Always succeeds.
    pub fn into_expression(self) -> LinearExpression {
        match self {
            Operand::Scalar(s) => LinearExpression::from_scalar(s),
            Operand::Variable(v) => LinearExpression::from_variable(v),
            Operand::Expression(e) => e,
        }
    }

    /// Extract a variable.
    pub fn into_variable(self) -> Result<Variable, TypeError> {
        match self {
            Operand::Variable(v) => Ok(v),
            other => Err(TypeError::new(
                TypeErrorKind::NotConvertible,
                format!("{} is not a variable", other),
            )),
        }
    }

    /// Extract a plain number.
    pub fn into_scalar(self) -> Result<Scalar, TypeError> {
        match self {
            Operand::Scalar(s) => Ok(s),
            other => Err(TypeError::new(
                TypeErrorKind::NotConvertible,
                format!("{} is not a number", other),
            )),
        }
    }

    /// Product of two operands. Defined only when at least one side is a
    /// plain number; the product of two non-constant operands is not linear.
    pub fn checked_mul(self, rhs: Operand) -> Result<Operand, TypeError> {
        match (self, rhs) {
            (Operand::Scalar(a), Operand::Scalar(b)) => Ok(Operand::Scalar(a * b)),
            (Operand::Scalar(s), other) | (other, Operand::Scalar(s)) => {
                Ok(Operand::Expression(other.into_expression() * s))
            }
            (lhs, rhs) => Err(TypeError::new(
                TypeErrorKind::UnsupportedOperand,
                format!("unsupported operands for *: '{}' and '{}'", lhs, rhs),
            )),
        }
    }
}

impl Add for Operand {
    type Output = Operand;

    fn add(self, rhs: Operand) -> Operand {
        match (self, rhs) {
            (Operand::Scalar(a), Operand::Scalar(b)) => Operand::Scalar(a + b),
            (lhs, rhs) => Operand::Expression(lhs.into_expression() + rhs.into_expression()),
        }
    }
}

impl Sub for Operand {
    type Output = Operand;

    fn sub(self, rhs: Operand) -> Operand {
        match (self, rhs) {
            (Operand::Scalar(a), Operand::Scalar(b)) => Operand::Scalar(a - b),
            (lhs, rhs) => Operand::Expression(lhs.into_expression() - rhs.into_expression()),
        }
    }
}

impl Neg for Operand {
    type Output = Operand;

    fn neg(self) -> Operand {
        match self {
            Operand::Scalar(s) => Operand::Scalar(-s),
            Operand::Variable(v) => Operand::Expression(-v),
            Operand::Expression(e) => Operand::Expression(-e),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Scalar(s) => write!(f, "{}", s),
            Operand::Variable(v) => write!(f, "{}", v),
            Operand::Expression(e) => write!(f, "{}", e),
        }
    }
}

impl From<Variable> for Operand {
    fn from(v: Variable) -> Self {
        Operand::Variable(v)
    }
}

impl From<LinearExpression> for Operand {
    fn from(e: LinearExpression) -> Self {
        Operand::Expression(e)
    }
}

impl From<&LinearExpression> for Operand {
    fn from(e: &LinearExpression) -> Self {
        Operand::Expression(e.clone())
    }
}

macro_rules! impl_operand_from_int {
    ($($t:ty)*) => {
        $(
            impl From<$t> for Operand {
                fn from(s: $t) -> Self {
                    Operand::Scalar(Scalar::from(s))
                }
            }
        )*
    };
}

impl_operand_from_int!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize Scalar);

/// A relational operator between two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `==`
    Equal,
    /// `>=`
    GreaterOrEqual,
    /// `>`
    Greater,
}

impl Relation {
    /// Evaluate the relation on two plain numbers.
    pub fn holds(self, lhs: &Scalar, rhs: &Scalar) -> bool {
        let ord = lhs.cmp(rhs);
        match self {
            Relation::Less => ord == Ordering::Less,
            Relation::LessOrEqual => ord != Ordering::Greater,
            Relation::Equal => ord == Ordering::Equal,
            Relation::GreaterOrEqual => ord != Ordering::Less,
            Relation::Greater => ord == Ordering::Greater,
        }
    }

    /// Operator symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Relation::Less => "<",
            Relation::LessOrEqual => "<=",
            Relation::Equal => "==",
            Relation::GreaterOrEqual => ">=",
            Relation::Greater => ">",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Result of comparing two operands.
#[derive(Debug, Clone)]
pub enum Comparison {
    /// Both operands were plain numbers
    Truth(bool),
    /// At least one operand was a variable or an expression
    Constraint(Constraint),
}

impl Comparison {
    /// The truth value, if no variable was involved.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Comparison::Truth(b) => Some(*b),
            Comparison::Constraint(_) => None,
        }
    }

    /// The constraint, if a variable or expression was involved.
    pub fn into_constraint(self) -> Option<Constraint> {
        match self {
            Comparison::Truth(_) => None,
            Comparison::Constraint(c) => Some(c),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::Truth(b) => write!(f, "{}", b),
            Comparison::Constraint(c) => write!(f, "{}", c),
        }
    }
}

/// Compare two operands.
///
/// Two plain numbers compare as numbers and yield [`Comparison::Truth`];
/// otherwise the result is the constraint given by the normalization table
/// of [`Constraint::from_relation`].
pub fn compare(lhs: impl Into<Operand>, relation: Relation, rhs: impl Into<Operand>) -> Comparison {
    match (lhs.into(), rhs.into()) {
        (Operand::Scalar(l), Operand::Scalar(r)) => Comparison::Truth(relation.holds(&l, &r)),
        (l, r) => Comparison::Constraint(Constraint::from_relation(
            l.into_expression(),
            relation,
            r.into_expression(),
        )),
    }
}

/// `lhs < rhs`
pub fn less_than(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Comparison {
    compare(lhs, Relation::Less, rhs)
}

/// `lhs <= rhs`
pub fn less_or_equal(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Comparison {
    compare(lhs, Relation::LessOrEqual, rhs)
}

/// `lhs == rhs`
pub fn equal(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Comparison {
    compare(lhs, Relation::Equal, rhs)
}

/// `lhs >= rhs`
pub fn greater_or_equal(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Comparison {
    compare(lhs, Relation::GreaterOrEqual, rhs)
}

/// `lhs > rhs`
pub fn greater_than(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Comparison {
    compare(lhs, Relation::Greater, rhs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers_compare_as_booleans() {
        assert_eq!(equal(0, 1).as_bool(), Some(false));
        assert_eq!(equal(3, 3).as_bool(), Some(true));
        assert_eq!(less_than(-2, 5).as_bool(), Some(true));
        assert_eq!(greater_or_equal(Scalar::from(4), 5u8).as_bool(), Some(false));
        assert!(less_or_equal(1, 1).into_constraint().is_none());
    }

    #[test]
    fn test_variable_involved_gives_constraint() {
        let x = Variable::new(0);
        let c = greater_than(x, 0).into_constraint().unwrap();
        assert_eq!(c.to_string(), "x0>0");
        let c = less_than(x, 1).into_constraint().unwrap();
        assert_eq!(c.to_string(), "-x0+1>0");
        let c = equal(0, x).into_constraint().unwrap();
        assert_eq!(c.to_string(), "-x0==0");
    }

    #[test]
    fn test_operand_arithmetic() {
        let x = Operand::from(Variable::new(0));
        let two = Operand::from_value(2.0).unwrap();
        assert!(two.is_scalar());

        let e = two.clone().checked_mul(x.clone()).unwrap() - Operand::from(3);
        assert_eq!(e.to_string(), "2*x0-3");
        assert_eq!((two.clone() + Operand::from(5)).to_string(), "7");
        assert_eq!((-x.clone()).to_string(), "-x0");

        let err = x.clone().checked_mul(x).unwrap_err();
        assert_eq!(err.kind, TypeErrorKind::UnsupportedOperand);
    }

    #[test]
    fn test_operand_conversions() {
        assert_eq!(Operand::from(Variable::new(3)).into_variable().unwrap().id(), 3);
        let err = Operand::from(4).into_variable().unwrap_err();
        assert_eq!(err.kind, TypeErrorKind::NotConvertible);
        assert!(Operand::from(Variable::new(1)).into_scalar().is_err());
        assert!(Operand::from_value(0.25).is_err());
    }
}
