//! Ordered systems of constraints.

use crate::polyhedral::constraint::Constraint;
use crate::polyhedral::scalar::Scalar;
use crate::utils::errors::IndexError;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::iter::FusedIterator;
use std::slice;

/// An ordered multiset of constraints sharing one ambient dimension.
///
/// Insertion order is kept for iteration and indexing. The reported space
/// dimension is the largest dimension of any constraint inserted since the
/// last [`clear`](Self::clear); members keep their own dimension.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSystem {
    /// All constraints, in insertion order
    constraints: Vec<Constraint>,
    /// High-water mark of member dimensions
    space_dim: usize,
}

impl ConstraintSystem {
    /// Create an empty constraint system of dimension 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the system holding only `c`.
    pub fn from_constraint(c: Constraint) -> Self {
        let mut system = Self::new();
        system.insert(c);
        system
    }

    /// Append a constraint, widening the system's dimension if needed.
    pub fn insert(&mut self, c: Constraint) {
        let dim = c.space_dimension();
        if dim > self.space_dim {
            log::debug!("constraint system widened from {} to {} dimensions", self.space_dim, dim);
            self.space_dim = dim;
        }
        self.constraints.push(c);
    }

    /// Remove every constraint and reset the dimension to 0.
    pub fn clear(&mut self) {
        self.constraints.clear();
        self.space_dim = 0;
    }

    /// Largest space dimension among the inserted constraints.
    pub fn space_dimension(&self) -> usize {
        self.space_dim
    }

    /// Number of constraints; always equal to the length of a full
    /// iteration pass.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Check if the system has no constraints.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Check if some member is an equality.
    pub fn has_equalities(&self) -> bool {
        self.iter().any(Constraint::is_equality)
    }

    /// Check if some member is a strict inequality.
    pub fn has_strict_inequalities(&self) -> bool {
        self.iter().any(Constraint::is_strict_inequality)
    }

    /// Iterate over the constraints in insertion order.
    pub fn iter(&self) -> ConstraintSystemIter<'_> {
        ConstraintSystemIter {
            inner: self.constraints.iter(),
        }
    }

    /// The `index`-th constraint of an iteration pass.
    ///
    /// Negative indices are rejected, like indices at or past the end.
    pub fn get(&self, index: i64) -> Result<&Constraint, IndexError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.constraints.get(i))
            .ok_or(IndexError {
                index,
                len: self.len(),
            })
    }

    /// Get all equality constraints.
    pub fn equalities(&self) -> impl Iterator<Item = &Constraint> {
        self.iter().filter(|c| c.is_equality())
    }

    /// Get all strict and nonstrict inequality constraints.
    pub fn inequalities(&self) -> impl Iterator<Item = &Constraint> {
        self.iter().filter(|c| c.is_inequality())
    }

    /// Check if a point satisfies all constraints.
    pub fn is_satisfied_by(&self, point: &[Scalar]) -> bool {
        self.iter().all(|c| c.is_satisfied_by(point))
    }
}

/// Forward iterator over a [`ConstraintSystem`].
#[derive(Debug, Clone)]
pub struct ConstraintSystemIter<'a> {
    inner: slice::Iter<'a, Constraint>,
}

impl<'a> Iterator for ConstraintSystemIter<'a> {
    type Item = &'a Constraint;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ConstraintSystemIter<'_> {}

impl FusedIterator for ConstraintSystemIter<'_> {}

impl<'a> IntoIterator for &'a ConstraintSystem {
    type Item = &'a Constraint;
    type IntoIter = ConstraintSystemIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Constraint> for ConstraintSystem {
    fn from_iter<I: IntoIterator<Item = Constraint>>(iter: I) -> Self {
        let mut system = Self::new();
        system.extend(iter);
        system
    }
}

impl Extend<Constraint> for ConstraintSystem {
    fn extend<I: IntoIterator<Item = Constraint>>(&mut self, iter: I) {
        for c in iter {
            self.insert(c);
        }
    }
}

impl fmt::Display for ConstraintSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, c) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, "}}")
    }
}

// Wire form: the sequence of constraints.

impl Serialize for ConstraintSystem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for ConstraintSystem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Constraint>::deserialize(deserializer).map(|cs| cs.into_iter().collect())
    }
}
