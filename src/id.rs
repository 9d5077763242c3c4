use std::{fmt::Debug, hash::Hash, ops::Deref};

/// Encapsulates what is necessary for a type to be usable as a state of a [`crate::Dfa`].
/// The [`Ord`] implementation is the total order that is used for canonicalizing pairs of
/// states and for sorting anything that is output.
pub trait StateIndex: Copy + Hash + Debug + Eq + Ord {}
impl<T: Copy + Hash + Debug + Eq + Ord> StateIndex for T {}

/// The underlying integer type of an [`Id`].
pub type DefaultIdType = u32;

/// The default state token. It is printed as `q0`, `q1`, ... and ordered by its numeric value.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Id(pub DefaultIdType);

impl Debug for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl Deref for Id {
    type Target = DefaultIdType;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<DefaultIdType> for Id {
    fn from(n: DefaultIdType) -> Self {
        Id(n)
    }
}

impl Id {
    /// Returns the wrapped integer.
    pub fn inner(self) -> DefaultIdType {
        self.0
    }
}

/// Hands out fresh [`Id`]s in construction order. The allocator is owned by whoever builds
/// the automaton, two allocators never influence each other. Once every [`DefaultIdType`]
/// has been handed out the allocator is exhausted and, as an [`Iterator`], yields `None`.
///
/// ```
/// use nerode::prelude::*;
///
/// let mut ids = IdAllocator::default();
/// assert_eq!(ids.fresh(), Id(0));
/// assert_eq!(ids.fresh(), Id(1));
/// assert_eq!(ids.allocated(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    first: u64,
    next: u64,
}

impl IdAllocator {
    /// Creates an allocator whose first id is `start`.
    pub fn starting_at(start: DefaultIdType) -> Self {
        Self {
            first: start.into(),
            next: start.into(),
        }
    }

    /// Returns the next unused [`Id`], or `None` if the allocator is exhausted.
    pub fn try_fresh(&mut self) -> Option<Id> {
        let id = DefaultIdType::try_from(self.next).ok()?;
        self.next += 1;
        Some(Id(id))
    }

    /// Returns the next unused [`Id`].
    ///
    /// # Panics
    ///
    /// Panics if all ids have been handed out, see [`IdAllocator::try_fresh`] for the
    /// non-panicking variant.
    pub fn fresh(&mut self) -> Id {
        self.try_fresh()
            .unwrap_or_else(|| panic!("all {} ids have been handed out", self.allocated()))
    }

    /// The number of ids that have been handed out so far.
    pub fn allocated(&self) -> usize {
        (self.next - self.first) as usize
    }
}

impl Iterator for IdAllocator {
    type Item = Id;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_fresh()
    }
}

impl std::iter::FusedIterator for IdAllocator {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocators_are_independent() {
        let mut left = IdAllocator::default();
        let mut right = IdAllocator::default();
        assert_eq!(left.fresh(), Id(0));
        assert_eq!(left.fresh(), Id(1));
        assert_eq!(right.fresh(), Id(0));
        assert_eq!(IdAllocator::starting_at(7).take(2).collect::<Vec<_>>(), [Id(7), Id(8)]);
    }

    #[test]
    fn allocator_stops_at_the_last_id() {
        let mut ids = IdAllocator::starting_at(DefaultIdType::MAX - 1);
        assert_eq!(ids.try_fresh(), Some(Id(DefaultIdType::MAX - 1)));
        assert_eq!(ids.next(), Some(Id(DefaultIdType::MAX)));
        assert_eq!(ids.try_fresh(), None);
        assert_eq!(ids.next(), None);
        assert_eq!(ids.allocated(), 2);
        assert_eq!(IdAllocator::starting_at(DefaultIdType::MAX).count(), 1);
    }

    #[test]
    #[should_panic]
    fn exhausted_allocator_refuses_fresh_ids() {
        let mut ids = IdAllocator::starting_at(DefaultIdType::MAX);
        ids.fresh();
        ids.fresh();
    }

    #[test]
    fn ids_print_like_states() {
        assert_eq!(format!("{:?}", Id(3)), "q3");
        assert_eq!(Id(12).to_string(), "q12");
        assert!(Id(2) < Id(10));
    }
}
