use std::{collections::BTreeSet, fmt::Display};

use itertools::Itertools;

use crate::show::Show;

/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// A partition is a different view on an equivalence relation, by grouping elements of
/// type `I` into their respective classes under the relation. The classes are kept in
/// the order in which they were created.
#[derive(Debug, Clone)]
pub struct Partition<I: Ord>(Vec<BTreeSet<I>>);

impl<I: Ord> std::ops::Deref for Partition<I> {
    type Target = Vec<BTreeSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: Ord> IntoIterator for &'a Partition<I> {
    type Item = &'a BTreeSet<I>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: Ord> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl<I: Ord> Eq for Partition<I> {}

impl<I: Ord> Partition<I> {
    /// Returns the size of the partition, i.e. the number of classes.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Builds a new partition from an iterator that yields iterators
    /// which yield elements of type `I`. Empty classes are dropped.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<BTreeSet<_>>())
                .filter(|class| !class.is_empty())
                .collect(),
        )
    }

    /// Returns the position of the class that contains `element`.
    pub fn class_of(&self, element: &I) -> Option<usize> {
        self.0.iter().position(|class| class.contains(element))
    }

    /// Returns true if and only if `left` and `right` lie in the same class.
    pub fn related(&self, left: &I, right: &I) -> bool {
        match (self.class_of(left), self.class_of(right)) {
            (Some(l), Some(r)) => l == r,
            _ => false,
        }
    }

    /// Verifies that the classes are pairwise disjoint, non-empty and that their union
    /// is precisely the given collection of `elements`.
    pub fn is_partition_of<'a, X>(&self, elements: X) -> bool
    where
        X: IntoIterator<Item = &'a I>,
        I: 'a,
    {
        let elements: BTreeSet<&I> = elements.into_iter().collect();
        let union: BTreeSet<&I> = self.0.iter().flatten().collect();
        let covered = self.0.iter().map(|class| class.len()).sum::<usize>();
        self.0.iter().all(|class| !class.is_empty())
            && covered == elements.len()
            && union == elements
    }
}

impl<I: Ord> From<Vec<BTreeSet<I>>> for Partition<I> {
    fn from(value: Vec<BTreeSet<I>>) -> Self {
        Self(value)
    }
}

impl<I: Ord + Show> Display for Partition<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.0.iter().map(|class| class.show()).join(" ")
        )
    }
}
