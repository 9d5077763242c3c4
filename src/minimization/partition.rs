use std::collections::BTreeSet;

use bit_set::BitSet;
use itertools::Itertools;
use tracing::trace;

use crate::{
    alphabet::Symbol,
    automaton::Dfa,
    id::StateIndex,
    math::Partition,
};

use super::DistinguishabilityTable;

impl<S: Symbol, Q: StateIndex> Dfa<S, Q> {
    /// Groups the states of `self` into classes according to `table`.
    ///
    /// States are visited in ascending order. Each state that has not been placed yet opens a
    /// new class and pulls in every later, unplaced state that `table` does not mark as
    /// distinguishable from it. Pairs that `table` knows nothing about count as not
    /// distinguishable, so `table` should be the result of solving `self`. Every state ends up
    /// in exactly one class, an automaton without states yields an empty partition.
    pub fn partition(&self, table: &DistinguishabilityTable<S, Q>) -> Partition<Q> {
        let states = self.states().collect_vec();
        let mut placed = BitSet::with_capacity(states.len());
        let mut classes = Vec::new();

        for (i, representative) in states.iter().enumerate() {
            if !placed.insert(i) {
                continue;
            }
            let mut class = BTreeSet::from([*representative]);
            for (j, q) in states.iter().enumerate().skip(i + 1) {
                if !placed.contains(j) && !table.is_distinguishable(*representative, *q) {
                    placed.insert(j);
                    class.insert(*q);
                }
            }
            trace!("class {} is {class:?}", classes.len());
            classes.push(class);
        }

        Partition::from(classes)
    }

    /// Solves `self` with the default options and partitions the states accordingly.
    pub fn equivalence_classes(&self) -> Partition<Q> {
        self.partition(&self.solve())
    }
}

impl<Q: StateIndex> Partition<Q> {
    /// Verifies that the relation induced by `self` is compatible with the transitions of
    /// `dfa`: whenever two states share a class and both have a transition on some symbol,
    /// the two destinations share a class as well.
    pub fn respects<S: Symbol>(&self, dfa: &Dfa<S, Q>) -> bool {
        self.iter().all(|class| {
            class.iter().tuple_combinations().all(|(p, q)| {
                dfa.alphabet().universe().all(|a| {
                    match (dfa.get_destination(*p, a), dfa.get_destination(*q, a)) {
                        (Some(p), Some(q)) => self.related(&p, &q),
                        _ => true,
                    }
                })
            })
        })
    }

    /// Returns true if no class mixes accepting with non-accepting states of `dfa`.
    pub fn separates_acceptance<S: Symbol>(&self, dfa: &Dfa<S, Q>) -> bool {
        self.iter()
            .all(|class| class.iter().map(|q| dfa.is_accepting(*q)).all_equal())
    }
}
