//! Variables name coordinate axes by index.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A coordinate axis, identified solely by its index.
///
/// Two variables with the same id denote the same axis. The type has no
/// `PartialEq`/`Hash` impls: comparing variables builds constraints (see
/// [`Relational`](crate::polyhedral::Relational)), so a variable is not a
/// valid associative-container key. Use [`Variable::id`] for that.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variable {
    id: usize,
}

impl Variable {
    /// Create the variable for axis `id`.
    pub const fn new(id: usize) -> Self {
        Self { id }
    }

    /// Index of the axis.
    pub const fn id(self) -> usize {
        self.id
    }

    /// Smallest space dimension containing this variable: `id + 1`.
    pub const fn space_dimension(self) -> usize {
        self.id + 1
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.id)
    }
}

/// An ordered set of variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariablesSet {
    ids: BTreeSet<usize>,
}

impl VariablesSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the singleton set `{v}`.
    pub fn from_variable(v: Variable) -> Self {
        let mut set = Self::new();
        set.insert(v);
        set
    }

    /// Create the set of all variables with ids in `first..=last`.
    /// Empty when `last < first`.
    pub fn from_range(first: Variable, last: Variable) -> Self {
        Self {
            ids: (first.id()..=last.id()).collect(),
        }
    }

    /// Insert a variable. Returns false if it was already present.
    pub fn insert(&mut self, v: Variable) -> bool {
        self.ids.insert(v.id())
    }

    /// Check membership.
    pub fn contains(&self, v: Variable) -> bool {
        self.ids.contains(&v.id())
    }

    /// Number of variables in the set.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Largest id plus one, or 0 for the empty set.
    pub fn space_dimension(&self) -> usize {
        self.ids.last().map_or(0, |&id| id + 1)
    }

    /// Iterate in increasing id order.
    pub fn iter(&self) -> impl Iterator<Item = Variable> + '_ {
        self.ids.iter().map(|&id| Variable::new(id))
    }

    pub(crate) fn contains_id(&self, id: usize) -> bool {
        self.ids.contains(&id)
    }
}

impl FromIterator<Variable> for VariablesSet {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Variable::id).collect(),
        }
    }
}

impl fmt::Display for VariablesSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_dimension() {
        for id in [0, 1, 7, 1000] {
            assert_eq!(Variable::new(id).space_dimension(), id + 1);
        }
        assert_eq!(Variable::new(3).to_string(), "x3");
    }

    #[test]
    fn test_variables_set() {
        let mut set = VariablesSet::new();
        assert!(set.is_empty());
        assert_eq!(set.space_dimension(), 0);

        assert!(set.insert(Variable::new(3)));
        assert!(set.insert(Variable::new(0)));
        assert!(!set.insert(Variable::new(3)));
        assert_eq!(set.len(), 2);
        assert_eq!(set.space_dimension(), 4);
        assert_eq!(set.to_string(), "{x0, x3}");
        assert!(set.contains(Variable::new(0)));
        assert!(!set.contains(Variable::new(1)));
    }

    #[test]
    fn test_from_range() {
        let set = VariablesSet::from_range(Variable::new(1), Variable::new(3));
        let ids: Vec<usize> = set.iter().map(Variable::id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(VariablesSet::from_range(Variable::new(3), Variable::new(1)).is_empty());
    }
}
