use bit_set::BitSet;
use itertools::Itertools;

use crate::{
    alphabet::Symbol,
    id::StateIndex,
    math::Bijection,
    show::Show,
};

use super::SolverOptions;

/// A pair of two distinct states, stored with the lesser state first. Every lookup into a
/// [`DistinguishabilityTable`] goes through this canonical form, so `(p, q)` and `(q, p)`
/// always refer to the same entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnorderedPair<Q> {
    lo: Q,
    hi: Q,
}

impl<Q: StateIndex> UnorderedPair<Q> {
    /// Canonicalizes `(p, q)`. Returns `None` if both states coincide.
    pub fn new(p: Q, q: Q) -> Option<Self> {
        match p.cmp(&q) {
            std::cmp::Ordering::Less => Some(Self { lo: p, hi: q }),
            std::cmp::Ordering::Greater => Some(Self { lo: q, hi: p }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The lesser of the two states.
    pub fn lo(&self) -> Q {
        self.lo
    }

    /// The greater of the two states.
    pub fn hi(&self) -> Q {
        self.hi
    }

    /// Returns true if `state` is one of the two states.
    pub fn contains(&self, state: Q) -> bool {
        self.lo == state || self.hi == state
    }

    /// Splits the pair into a tuple `(lo, hi)`.
    pub fn into_tuple(self) -> (Q, Q) {
        (self.lo, self.hi)
    }
}

impl<Q: Show> Show for UnorderedPair<Q> {
    fn show(&self) -> String {
        format!("({}, {})", self.lo.show(), self.hi.show())
    }
}

/// Position of the pair `(i, j)` with `i < j` in a triangular layout.
pub(crate) fn pair_index(i: usize, j: usize) -> usize {
    debug_assert!(i < j);
    j * (j - 1) / 2 + i
}

/// Number of unordered pairs of distinct elements in a set with `n` elements.
pub(crate) fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Records why a pair was marked distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Evidence<S> {
    /// Exactly one of the two states is accepting.
    Acceptance,
    /// Reading `symbol` leads into the pair at position `pair`, which was marked before.
    Successor { symbol: S, pair: usize },
}

/// The result of a solve: for every unordered pair of distinct states it stores whether the
/// two states are distinguishable. Once the fixed point is reached, an unmarked pair means
/// that the two states are equivalent.
///
/// The table is a snapshot of the automaton it was computed from, it is never updated.
#[derive(Clone)]
pub struct DistinguishabilityTable<S: Symbol = char, Q: StateIndex = crate::Id> {
    pub(crate) states: Bijection<Q, usize>,
    pub(crate) marked: BitSet,
    pub(crate) evidence: Vec<Option<Evidence<S>>>,
    pub(crate) passes: usize,
    pub(crate) options: SolverOptions,
}

impl<S: Symbol, Q: StateIndex> DistinguishabilityTable<S, Q> {
    fn position(&self, p: Q, q: Q) -> Option<usize> {
        let i = *self.states.get_by_left(&p)?;
        let j = *self.states.get_by_left(&q)?;
        match i.cmp(&j) {
            std::cmp::Ordering::Less => Some(pair_index(i, j)),
            std::cmp::Ordering::Greater => Some(pair_index(j, i)),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Looks up the entry for `p` and `q` in either order. Returns `None` if `p == q` or if
    /// one of them is not a state the table was computed for.
    pub fn get(&self, p: Q, q: Q) -> Option<bool> {
        self.position(p, q).map(|idx| self.marked.contains(idx))
    }

    /// Returns true if the pair `(p, q)` is marked distinguishable.
    pub fn is_distinguishable(&self, p: Q, q: Q) -> bool {
        self.get(p, q) == Some(true)
    }

    /// Returns true if `p` and `q` are equivalent. Every known state is equivalent to itself.
    pub fn is_equivalent(&self, p: Q, q: Q) -> bool {
        if p == q {
            return self.states.contains_left(&p);
        }
        self.get(p, q) == Some(false)
    }

    /// Iterates over all pairs in ascending order together with their entry.
    pub fn iter(&self) -> impl Iterator<Item = (UnorderedPair<Q>, bool)> + '_ {
        self.states
            .iter()
            .tuple_combinations()
            .map(|((p, i), (q, j))| {
                (
                    UnorderedPair { lo: *p, hi: *q },
                    self.marked.contains(pair_index(*i, *j)),
                )
            })
    }

    /// Iterates over the pairs that are marked distinguishable.
    pub fn distinguishable_pairs(&self) -> impl Iterator<Item = UnorderedPair<Q>> + '_ {
        self.iter().filter_map(|(pair, marked)| marked.then_some(pair))
    }

    /// The states the table was computed for, in ascending order.
    pub fn states(&self) -> impl Iterator<Item = Q> + '_ {
        self.states.iter().map(|(q, _)| *q)
    }

    /// The number of pairs in the table.
    pub fn len(&self) -> usize {
        pair_count(self.states.len())
    }

    /// Returns true if the table has no pairs, which is the case for at most one state.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of propagation passes that were run until no pass marked a new pair.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// The options the table was computed with.
    pub fn options(&self) -> SolverOptions {
        self.options
    }

    /// Computes a word that separates `p` from `q`, meaning exactly one of
    /// [`crate::Dfa::accepts_from`] `p` and `q` holds for it. Returns `None` if the pair is not
    /// marked distinguishable.
    pub fn witness(&self, p: Q, q: Q) -> Option<Vec<S>> {
        let mut position = self.position(p, q)?;
        let mut word = vec![];
        loop {
            match self.evidence.get(position).copied().flatten()? {
                Evidence::Acceptance => return Some(word),
                Evidence::Successor { symbol, pair } => {
                    word.push(symbol);
                    position = pair;
                }
            }
        }
    }

    /// Renders the lower triangle of the table. Distinguishable pairs are shown as `x`,
    /// equivalent ones as `=`.
    pub fn render(&self) -> String
    where
        Q: Show,
    {
        let states = self.states().collect_vec();
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once(String::new())
                .chain(states.iter().take(states.len().saturating_sub(1)).map(|q| q.show())),
        );
        for (row, q) in states.iter().enumerate().skip(1) {
            builder.push_record(std::iter::once(q.show()).chain((0..states.len() - 1).map(
                |column| {
                    if column >= row {
                        String::new()
                    } else if self.is_distinguishable(states[column], *q) {
                        "x".to_string()
                    } else {
                        "=".to_string()
                    }
                },
            )));
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl<S: Symbol, Q: StateIndex> std::fmt::Debug for DistinguishabilityTable<S, Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(pair, marked)| (pair.into_tuple(), marked)))
            .finish()
    }
}

impl<S: Symbol, Q: StateIndex> PartialEq for DistinguishabilityTable<S, Q> {
    fn eq(&self, other: &Self) -> bool {
        self.states.iter().eq(other.states.iter())
            && self.marked == other.marked
            && self.evidence == other.evidence
            && self.passes == other.passes
            && self.options == other.options
    }
}

impl<S: Symbol, Q: StateIndex> Eq for DistinguishabilityTable<S, Q> {}
