//! Linear algebra over integer coordinates.
//!
//! This module provides the symbolic layer of the crate:
//! - Scalars and their conversion from host numbers
//! - Variables and variable sets
//! - Linear expressions with exact integer coefficients
//! - Constraints and constraint systems

pub mod scalar;
pub mod variable;
pub mod expr;
pub mod constraint;
pub mod operand;
pub mod system;

pub use scalar::{Scalar, ToScalar};
pub use variable::{Variable, VariablesSet};
pub use expr::LinearExpression;
pub use constraint::{equation, inequality, strict_inequality, Constraint, ConstraintKind, Relational};
pub use operand::{
    compare, equal, greater_or_equal, greater_than, less_or_equal, less_than, Comparison, Operand,
    Relation,
};
pub use system::{ConstraintSystem, ConstraintSystemIter};
