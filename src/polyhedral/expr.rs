//! Linear expressions with exact integer coefficients.
//!
//! A linear expression is a linear combination of variables plus a constant:
//! `e(x) = c0*x0 + c1*x1 + ... + cn*xn + b`
//!
//! The constant `b` is called the inhomogeneous term. The space dimension of
//! an expression is a high-water mark: it grows whenever a variable of a
//! larger index takes part in the construction and only shrinks through an
//! explicit [`LinearExpression::set_space_dimension`] or
//! [`LinearExpression::remove_space_dimensions`].

use crate::polyhedral::scalar::{Scalar, ScalarRef, ScalarRepr, ToScalar};
use crate::polyhedral::variable::{Variable, VariablesSet};
use crate::utils::errors::ValueError;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A linear expression: `sum(coeff[i] * x_i) + constant`.
///
/// Expressions are values: every operator returns a new expression and
/// leaves its operands untouched. There is no `PartialEq` or
/// `Hash` impl (comparisons build constraints); use
/// [`LinearExpression::is_equal_to`] for structural equality.
#[derive(Debug, Clone, Default)]
pub struct LinearExpression {
    /// Coefficients, indexed by variable id; `len()` is the space dimension
    coeffs: Vec<Scalar>,
    /// Inhomogeneous term
    constant: Scalar,
}

impl LinearExpression {
    /// The zero expression, of space dimension 0.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The expression `1*v`, of space dimension `v.id() + 1`.
    pub fn from_variable(v: Variable) -> Self {
        let mut coeffs = vec![Scalar::zero(); v.space_dimension()];
        coeffs[v.id()] = Scalar::one();
        Self {
            coeffs,
            constant: Scalar::zero(),
        }
    }

    /// The constant expression `s`, of space dimension 0.
    pub fn from_scalar(s: impl Into<Scalar>) -> Self {
        Self {
            coeffs: Vec::new(),
            constant: s.into(),
        }
    }

    /// Build `sum(coefficients[i] * x_i) + constant`.
    ///
    /// The space dimension is the length of `coefficients`, trailing zeros
    /// included.
    pub fn from_coefficients<I>(coefficients: I, constant: impl Into<Scalar>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Scalar>,
    {
        Self {
            coeffs: coefficients.into_iter().map(Into::into).collect(),
            constant: constant.into(),
        }
    }

    /// Like [`from_coefficients`](Self::from_coefficients) but accepting any
    /// host numbers, failing on the first one that is not an exact integer.
    pub fn try_from_coefficients<I, T>(coefficients: I, constant: T) -> Result<Self, ValueError>
    where
        I: IntoIterator,
        I::Item: ToScalar,
        T: ToScalar,
    {
        let coeffs = coefficients
            .into_iter()
            .map(|c| c.to_scalar())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            coeffs,
            constant: constant.to_scalar()?,
        })
    }

    /// Number of axes this expression is declared over.
    pub fn space_dimension(&self) -> usize {
        self.coeffs.len()
    }

    /// Truncate or zero-extend to `dim` axes. Coefficients below `dim` are
    /// never changed.
    pub fn set_space_dimension(&mut self, dim: usize) {
        self.coeffs.resize(dim, Scalar::zero());
    }

    /// Coefficient of `v`; zero at or beyond the space dimension.
    pub fn coefficient(&self, v: Variable) -> Scalar {
        self.coeffs.get(v.id()).cloned().unwrap_or_default()
    }

    /// All coefficients, one per axis.
    pub fn coefficients(&self) -> &[Scalar] {
        &self.coeffs
    }

    /// The constant term.
    pub fn inhomogeneous_term(&self) -> &Scalar {
        &self.constant
    }

    /// True iff every coefficient is zero (the constant is ignored).
    pub fn all_homogeneous_terms_are_zero(&self) -> bool {
        self.coeffs.iter().all(Zero::is_zero)
    }

    /// True iff every coefficient and the constant are zero, whatever the
    /// declared dimension.
    pub fn is_zero(&self) -> bool {
        self.constant.is_zero() && self.all_homogeneous_terms_are_zero()
    }

    /// Structural equality on coefficients and constant, ignoring the
    /// declared dimension.
    pub fn is_equal_to(&self, other: &LinearExpression) -> bool {
        if self.constant != other.constant {
            return false;
        }
        let (short, long) = if self.coeffs.len() <= other.coeffs.len() {
            (&self.coeffs, &other.coeffs)
        } else {
            (&other.coeffs, &self.coeffs)
        };
        short.iter().zip(long.iter()).all(|(a, b)| a == b)
            && long[short.len()..].iter().all(Zero::is_zero)
    }

    /// Exchange the coefficients of `v1` and `v2`, widening the expression
    /// to contain both.
    pub fn swap_space_dimensions(&mut self, v1: Variable, v2: Variable) {
        let needed = v1.space_dimension().max(v2.space_dimension());
        if self.coeffs.len() < needed {
            self.set_space_dimension(needed);
        }
        self.coeffs.swap(v1.id(), v2.id());
    }

    /// Drop the axes named in `vars`; remaining axes are renumbered
    /// consecutively, keeping their order.
    pub fn remove_space_dimensions(&mut self, vars: &VariablesSet) {
        let mut id = 0;
        self.coeffs.retain(|_| {
            let keep = !vars.contains_id(id);
            id += 1;
            keep
        });
    }

    /// Exact value at `point`. Coordinates missing from `point` count as zero.
    pub fn evaluate(&self, point: &[Scalar]) -> Scalar {
        let mut result = self.constant.clone();
        for (c, x) in self.coeffs.iter().zip(point) {
            result += c * x;
        }
        result
    }

    /// Multiply every coefficient and the constant by `factor`.
    pub fn scale(&self, factor: &Scalar) -> Self {
        Self {
            coeffs: self.coeffs.iter().map(|c| c * factor).collect(),
            constant: &self.constant * factor,
        }
    }

    /// Non-negative GCD of all coefficients and the constant; zero for the
    /// zero expression.
    pub fn gcd(&self) -> Scalar {
        let mut g = self.constant.abs();
        for c in &self.coeffs {
            if g.is_one() {
                break;
            }
            g = g.gcd(c);
        }
        g
    }

    /// Divide by [`gcd`](Self::gcd). The zero expression is returned as is.
    pub fn normalized(&self) -> Self {
        let g = self.gcd();
        if g <= Scalar::one() {
            return self.clone();
        }
        Self {
            coeffs: self.coeffs.iter().map(|c| c / &g).collect(),
            constant: &self.constant / &g,
        }
    }

    fn widen(&mut self, dim: usize) {
        if self.coeffs.len() < dim {
            self.coeffs.resize(dim, Scalar::zero());
        }
    }

    fn add_expr(mut self, other: &LinearExpression) -> Self {
        self.widen(other.coeffs.len());
        for (a, b) in self.coeffs.iter_mut().zip(&other.coeffs) {
            *a += b;
        }
        self.constant += &other.constant;
        self
    }

    fn sub_expr(mut self, other: &LinearExpression) -> Self {
        self.widen(other.coeffs.len());
        for (a, b) in self.coeffs.iter_mut().zip(&other.coeffs) {
            *a -= b;
        }
        self.constant -= &other.constant;
        self
    }

    fn add_variable(mut self, v: Variable, positive: bool) -> Self {
        self.widen(v.space_dimension());
        if positive {
            self.coeffs[v.id()] += Scalar::one();
        } else {
            self.coeffs[v.id()] -= Scalar::one();
        }
        self
    }

    fn add_constant(mut self, s: Scalar) -> Self {
        self.constant += s;
        self
    }

    fn negated(mut self) -> Self {
        for c in &mut self.coeffs {
            *c = -std::mem::take(c);
        }
        self.constant = -std::mem::take(&mut self.constant);
        self
    }

    fn times(mut self, factor: &Scalar) -> Self {
        for c in &mut self.coeffs {
            *c *= factor;
        }
        self.constant *= factor;
        self
    }
}

impl From<Variable> for LinearExpression {
    fn from(v: Variable) -> Self {
        Self::from_variable(v)
    }
}

impl From<&LinearExpression> for LinearExpression {
    fn from(e: &LinearExpression) -> Self {
        e.clone()
    }
}

impl From<Scalar> for LinearExpression {
    fn from(s: Scalar) -> Self {
        Self::from_scalar(s)
    }
}

impl fmt::Display for LinearExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (i, c) in self.coeffs.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            if !first && c.is_positive() {
                write!(f, "+")?;
            }
            if c.is_one() {
                write!(f, "x{}", i)?;
            } else if (-c).is_one() {
                write!(f, "-x{}", i)?;
            } else {
                write!(f, "{}*x{}", c, i)?;
            }
            first = false;
        }
        if !self.constant.is_zero() {
            if !first && self.constant.is_positive() {
                write!(f, "+")?;
            }
            write!(f, "{}", self.constant)?;
            first = false;
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

// Wire form: `(coefficients, constant)`.

struct Coefficients<'a>(&'a [Scalar]);

impl Serialize for Coefficients<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(ScalarRef))
    }
}

impl Serialize for LinearExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&Coefficients(&self.coeffs))?;
        tuple.serialize_element(&ScalarRef(&self.constant))?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for LinearExpression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (coeffs, constant) = <(Vec<ScalarRepr>, ScalarRepr)>::deserialize(deserializer)?;
        Ok(Self {
            coeffs: coeffs.into_iter().map(|c| c.0).collect(),
            constant: constant.0,
        })
    }
}

// Expression (op) expression

impl Add for LinearExpression {
    type Output = LinearExpression;

    fn add(self, other: LinearExpression) -> LinearExpression {
        self.add_expr(&other)
    }
}

impl Add<&LinearExpression> for LinearExpression {
    type Output = LinearExpression;

    fn add(self, other: &LinearExpression) -> LinearExpression {
        self.add_expr(other)
    }
}

impl Add<LinearExpression> for &LinearExpression {
    type Output = LinearExpression;

    fn add(self, other: LinearExpression) -> LinearExpression {
        self.clone().add_expr(&other)
    }
}

impl Add for &LinearExpression {
    type Output = LinearExpression;

    fn add(self, other: &LinearExpression) -> LinearExpression {
        self.clone().add_expr(other)
    }
}

impl Sub for LinearExpression {
    type Output = LinearExpression;

    fn sub(self, other: LinearExpression) -> LinearExpression {
        self.sub_expr(&other)
    }
}

impl Sub<&LinearExpression> for LinearExpression {
    type Output = LinearExpression;

    fn sub(self, other: &LinearExpression) -> LinearExpression {
        self.sub_expr(other)
    }
}

impl Sub<LinearExpression> for &LinearExpression {
    type Output = LinearExpression;

    fn sub(self, other: LinearExpression) -> LinearExpression {
        self.clone().sub_expr(&other)
    }
}

impl Sub for &LinearExpression {
    type Output = LinearExpression;

    fn sub(self, other: &LinearExpression) -> LinearExpression {
        self.clone().sub_expr(other)
    }
}

impl Neg for LinearExpression {
    type Output = LinearExpression;

    fn neg(self) -> LinearExpression {
        self.negated()
    }
}

impl Neg for &LinearExpression {
    type Output = LinearExpression;

    fn neg(self) -> LinearExpression {
        self.clone().negated()
    }
}

// Variables

impl Add<Variable> for LinearExpression {
    type Output = LinearExpression;

    fn add(self, v: Variable) -> LinearExpression {
        self.add_variable(v, true)
    }
}

impl Add<Variable> for &LinearExpression {
    type Output = LinearExpression;

    fn add(self, v: Variable) -> LinearExpression {
        self.clone().add_variable(v, true)
    }
}

impl Sub<Variable> for LinearExpression {
    type Output = LinearExpression;

    fn sub(self, v: Variable) -> LinearExpression {
        self.add_variable(v, false)
    }
}

impl Sub<Variable> for &LinearExpression {
    type Output = LinearExpression;

    fn sub(self, v: Variable) -> LinearExpression {
        self.clone().add_variable(v, false)
    }
}

impl Add<LinearExpression> for Variable {
    type Output = LinearExpression;

    fn add(self, e: LinearExpression) -> LinearExpression {
        e.add_variable(self, true)
    }
}

impl Add<&LinearExpression> for Variable {
    type Output = LinearExpression;

    fn add(self, e: &LinearExpression) -> LinearExpression {
        e.clone().add_variable(self, true)
    }
}

impl Sub<LinearExpression> for Variable {
    type Output = LinearExpression;

    fn sub(self, e: LinearExpression) -> LinearExpression {
        e.negated().add_variable(self, true)
    }
}

impl Sub<&LinearExpression> for Variable {
    type Output = LinearExpression;

    fn sub(self, e: &LinearExpression) -> LinearExpression {
        LinearExpression::from_variable(self).sub_expr(e)
    }
}

impl Add for Variable {
    type Output = LinearExpression;

    fn add(self, other: Variable) -> LinearExpression {
        LinearExpression::from_variable(self).add_variable(other, true)
    }
}

impl Sub for Variable {
    type Output = LinearExpression;

    fn sub(self, other: Variable) -> LinearExpression {
        LinearExpression::from_variable(self).add_variable(other, false)
    }
}

impl Neg for Variable {
    type Output = LinearExpression;

    fn neg(self) -> LinearExpression {
        LinearExpression::zero().add_variable(self, false)
    }
}

// Scalars. Native operands are `i32` only, so untyped literals such as
// `5 * x` resolve without annotations; other widths go through
// `Scalar::from`. There is no `Mul<LinearExpression> for LinearExpression`:
// products of expressions are not linear.

macro_rules! impl_scalar_ops {
    ($($t:ty)*) => {
        $(
            impl Add<$t> for LinearExpression {
                type Output = LinearExpression;
                fn add(self, s: $t) -> LinearExpression {
                    self.add_constant(Scalar::from(s))
                }
            }

            impl Add<$t> for &LinearExpression {
                type Output = LinearExpression;
                fn add(self, s: $t) -> LinearExpression {
                    self.clone().add_constant(Scalar::from(s))
                }
            }

            impl Add<$t> for Variable {
                type Output = LinearExpression;
                fn add(self, s: $t) -> LinearExpression {
                    LinearExpression::from_variable(self).add_constant(Scalar::from(s))
                }
            }

            impl Add<LinearExpression> for $t {
                type Output = LinearExpression;
                fn add(self, e: LinearExpression) -> LinearExpression {
                    e.add_constant(Scalar::from(self))
                }
            }

            impl Add<Variable> for $t {
                type Output = LinearExpression;
                fn add(self, v: Variable) -> LinearExpression {
                    LinearExpression::from_variable(v).add_constant(Scalar::from(self))
                }
            }

            impl Sub<$t> for LinearExpression {
                type Output = LinearExpression;
                fn sub(self, s: $t) -> LinearExpression {
                    self.add_constant(-Scalar::from(s))
                }
            }

            impl Sub<$t> for &LinearExpression {
                type Output = LinearExpression;
                fn sub(self, s: $t) -> LinearExpression {
                    self.clone().add_constant(-Scalar::from(s))
                }
            }

            impl Sub<$t> for Variable {
                type Output = LinearExpression;
                fn sub(self, s: $t) -> LinearExpression {
                    LinearExpression::from_variable(self).add_constant(-Scalar::from(s))
                }
            }

            impl Sub<LinearExpression> for $t {
                type Output = LinearExpression;
                fn sub(self, e: LinearExpression) -> LinearExpression {
                    e.negated().add_constant(Scalar::from(self))
                }
            }

            impl Sub<Variable> for $t {
                type Output = LinearExpression;
                fn sub(self, v: Variable) -> LinearExpression {
                    LinearExpression::from_scalar(Scalar::from(self)).add_variable(v, false)
                }
            }

            impl Mul<$t> for LinearExpression {
                type Output = LinearExpression;
                fn mul(self, s: $t) -> LinearExpression {
                    self.times(&Scalar::from(s))
                }
            }

            impl Mul<$t> for &LinearExpression {
                type Output = LinearExpression;
                fn mul(self, s: $t) -> LinearExpression {
                    self.scale(&Scalar::from(s))
                }
            }

            impl Mul<$t> for Variable {
                type Output = LinearExpression;
                fn mul(self, s: $t) -> LinearExpression {
                    LinearExpression::from_variable(self).times(&Scalar::from(s))
                }
            }

            impl Mul<LinearExpression> for $t {
                type Output = LinearExpression;
                fn mul(self, e: LinearExpression) -> LinearExpression {
                    e.times(&Scalar::from(self))
                }
            }

            impl Mul<&LinearExpression> for $t {
                type Output = LinearExpression;
                fn mul(self, e: &LinearExpression) -> LinearExpression {
                    e.scale(&Scalar::from(self))
                }
            }

            impl Mul<Variable> for $t {
                type Output = LinearExpression;
                fn mul(self, v: Variable) -> LinearExpression {
                    LinearExpression::from_variable(v).times(&Scalar::from(self))
                }
            }
        )*
    };
}

impl_scalar_ops!(i32 Scalar);

#[cfg(test)]
mod tests {
    use super::*;

    fn x(id: usize) -> Variable {
        Variable::new(id)
    }

    #[test]
    fn test_zero() {
        let e = LinearExpression::zero();
        assert!(e.is_zero());
        assert_eq!(e.space_dimension(), 0);
        assert_eq!(e.to_string(), "0");
    }

    #[test]
    fn test_from_variable() {
        let e = LinearExpression::from_variable(x(2));
        assert_eq!(e.space_dimension(), 3);
        assert_eq!(e.coefficient(x(2)), Scalar::from(1));
        assert_eq!(e.coefficient(x(0)), Scalar::from(0));
        assert_eq!(e.coefficient(x(10)), Scalar::from(0));
        assert_eq!(e.to_string(), "x2");
    }

    #[test]
    fn test_from_coefficients_display() {
        let e = LinearExpression::from_coefficients([1, 2, 3, 4], 5);
        assert_eq!(e.to_string(), "x0+2*x1+3*x2+4*x3+5");

        let e = LinearExpression::from_coefficients([0, -1, 0, -7], -2);
        assert_eq!(e.to_string(), "-x1-7*x3-2");
        assert_eq!(e.space_dimension(), 4);

        let e = LinearExpression::from_coefficients([0, 0], 0);
        assert_eq!(e.to_string(), "0");
        assert_eq!(LinearExpression::from_scalar(-3).to_string(), "-3");
    }

    #[test]
    fn test_try_from_coefficients() {
        let e = LinearExpression::try_from_coefficients([2.0, -1.0], "4").unwrap();
        assert_eq!(e.to_string(), "2*x0-x1+4");
        assert!(LinearExpression::try_from_coefficients([0.5], 0).is_err());
    }

    #[test]
    fn test_arithmetic() {
        let e = 5 * x(0) - 2 * x(1);
        let f = x(0) + x(1) - 1;
        assert_eq!((&e - &f).to_string(), "4*x0-3*x1+1");
        assert_eq!((e.clone() + f).to_string(), "6*x0-x1-1");
        assert_eq!((-e).to_string(), "-5*x0+2*x1");
        assert_eq!((3 - x(2)).to_string(), "-x2+3");
        assert_eq!((x(0) * Scalar::from(7) + Scalar::from(1u8)).to_string(), "7*x0+1");
        assert_eq!((0 * x(3)).to_string(), "0");
        assert_eq!((0 * x(3)).space_dimension(), 4);
    }

    #[test]
    fn test_self_subtraction_is_zero() {
        let e = LinearExpression::from_coefficients([3, 0, -9], 4);
        let d = &e - &e;
        assert!(d.is_zero());
        assert_eq!(d.space_dimension(), 3);
    }

    #[test]
    fn test_dimension_is_high_water_mark() {
        let e = x(4) - x(4);
        assert!(e.is_zero());
        assert_eq!(e.space_dimension(), 5);

        let zeroed = (x(0) + x(3)) * 0;
        assert!(zeroed.is_zero());
        assert_eq!(zeroed.space_dimension(), 4);
    }

    #[test]
    fn test_mixed_dimensions_zero_extend() {
        let short = LinearExpression::from_coefficients([1], 0);
        let long = LinearExpression::from_coefficients([0, 0, 2], 1);
        let sum = short + long;
        assert_eq!(sum.space_dimension(), 3);
        assert_eq!(sum.to_string(), "x0+2*x2+1");
    }

    #[test]
    fn test_set_space_dimension() {
        let mut e = LinearExpression::from_coefficients([1, 2, 3], 4);
        e.set_space_dimension(5);
        assert_eq!(e.coefficients().len(), 5);
        assert_eq!(e.to_string(), "x0+2*x1+3*x2+4");
        e.set_space_dimension(1);
        assert_eq!(e.to_string(), "x0+4");
    }

    #[test]
    fn test_is_equal_to_ignores_dimension() {
        let mut a = LinearExpression::from_coefficients([1, 2], 3);
        let b = a.clone();
        a.set_space_dimension(6);
        assert!(a.is_equal_to(&b));
        assert!(!a.is_equal_to(&(b + 1)));
    }

    #[test]
    fn test_swap_and_remove_dimensions() {
        let mut e = LinearExpression::from_coefficients([1, 2, 3], 0);
        e.swap_space_dimensions(x(0), x(4));
        assert_eq!(e.space_dimension(), 5);
        assert_eq!(e.to_string(), "2*x1+3*x2+x4");

        let mut vars = VariablesSet::new();
        vars.insert(x(1));
        vars.insert(x(3));
        e.remove_space_dimensions(&vars);
        assert_eq!(e.space_dimension(), 3);
        assert_eq!(e.to_string(), "3*x1+x2");
    }

    #[test]
    fn test_evaluate() {
        let e = 2 * x(0) - x(1) + 3;
        let point = [Scalar::from(5), Scalar::from(4)];
        assert_eq!(e.evaluate(&point), Scalar::from(9));
        assert_eq!(e.evaluate(&point[..1]), Scalar::from(13));
    }

    #[test]
    fn test_gcd_and_normalize() {
        let e = LinearExpression::from_coefficients([4, -6], 8);
        assert_eq!(e.gcd(), Scalar::from(2));
        assert_eq!(e.normalized().to_string(), "2*x0-3*x1+4");
        assert_eq!(LinearExpression::zero().gcd(), Scalar::from(0));
        assert!(LinearExpression::zero().normalized().is_zero());
    }

    #[test]
    fn test_big_coefficients() {
        let big: Scalar = "170141183460469231731687303715884105728".parse().unwrap();
        let e = x(0) * big.clone() + x(0) * big;
        assert_eq!(e.to_string(), "340282366920938463463374607431768211456*x0");
    }
}
