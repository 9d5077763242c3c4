use std::{collections::BTreeSet, fmt::Debug, hash::Hash};

/// A symbol is an individual element of an [`Alphabet`]. The [`Ord`] implementation
/// determines the order in which symbols are visited whenever the alphabet is traversed.
pub trait Symbol: Copy + Hash + Debug + Eq + Ord {}
impl<T: Copy + Hash + Debug + Eq + Ord> Symbol for T {}

/// A finite, ordered collection of symbols. For a [`crate::Dfa`] the alphabet is discovered
/// incrementally, i.e. a symbol becomes part of it as soon as some transition on it is added.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Alphabet<S: Symbol = char>(BTreeSet<S>);

impl<S: Symbol> Default for Alphabet<S> {
    fn default() -> Self {
        Self(BTreeSet::new())
    }
}

impl<S: Symbol> Debug for Alphabet<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}

impl<S: Symbol> Alphabet<S> {
    /// Creates an empty alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `symbol` and returns true if it was not present before.
    pub fn add(&mut self, symbol: S) -> bool {
        self.0.insert(symbol)
    }

    /// Iterates over all symbols in ascending order.
    pub fn universe(&self) -> impl Iterator<Item = S> + Clone + '_ {
        self.0.iter().copied()
    }

    /// Returns true if `symbol` is part of the alphabet.
    pub fn contains(&self, symbol: S) -> bool {
        self.0.contains(&symbol)
    }

    /// Gives the position of `symbol` in the ascending enumeration of the alphabet.
    pub fn position(&self, symbol: S) -> Option<usize> {
        self.0.iter().position(|s| *s == symbol)
    }

    /// The number of symbols.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no symbols.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Alphabet<char> {
    /// Creates the alphabet consisting of the first `size` lowercase letters, starting at `a`.
    /// Returns `None` if `size` exceeds the 26 available letters.
    pub fn of_size(size: usize) -> Option<Self> {
        let size = u8::try_from(size).ok().filter(|size| *size <= 26)?;
        Some((0..size).map(|i| (b'a' + i) as char).collect())
    }
}

impl<S: Symbol> FromIterator<S> for Alphabet<S> {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<S: Symbol> Extend<S> for Alphabet<S> {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}
