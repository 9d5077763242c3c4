//! Computes the Myhill-Nerode equivalence of the states of a [`Dfa`] with the table-filling
//! algorithm.
//!
//! Two states are distinguishable if some word leads one of them into an accepting state and
//! the other one into a rejecting state. Solving first marks all pairs that disagree on
//! acceptance and then keeps marking pairs that reach an already marked pair on some symbol,
//! until a full pass over the table makes no progress. The pairs left unmarked at that point
//! are equivalent, and [`Dfa::partition`] groups the states into the resulting classes.
//!
//! ```
//! use nerode::prelude::*;
//!
//! let dfa = DfaBuilder::default()
//!     .with_states([0u32, 1, 2])
//!     .with_accepting([2])
//!     .with_transitions([(0, 'a', 2), (1, 'a', 2), (2, 'a', 2)])
//!     .build()
//!     .unwrap();
//! let table = dfa.solve();
//! assert!(table.is_equivalent(0, 1));
//! assert_eq!(table.witness(0, 2), Some(vec![]));
//! assert_eq!(dfa.partition(&table), Partition::new([vec![0, 1], vec![2]]));
//! ```

mod table;
pub use table::{DistinguishabilityTable, UnorderedPair};

mod table_filling;
pub use table_filling::{SolverOptions, TableFilling, UndefinedTransitions};

mod partition;

use crate::{alphabet::Symbol, automaton::Dfa, id::StateIndex};

impl<S: Symbol, Q: StateIndex> Dfa<S, Q> {
    /// Computes the distinguishability table of `self` with the default [`SolverOptions`],
    /// under which undefined transitions provide no evidence.
    pub fn solve(&self) -> DistinguishabilityTable<S, Q> {
        self.solve_with(SolverOptions::default())
    }

    /// Computes the distinguishability table of `self` with the given `options`.
    pub fn solve_with(&self, options: SolverOptions) -> DistinguishabilityTable<S, Q> {
        TableFilling::new(self, options).run()
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use itertools::Itertools;

    /// The four state automaton in which `q0` and `q1` behave identically.
    fn reference() -> Dfa {
        let mut ids = IdAllocator::default();
        let mut dfa = Dfa::new();
        let q0 = dfa.add_state(ids.fresh(), true, false);
        let q1 = dfa.add_state(ids.fresh(), false, false);
        let q2 = dfa.add_state(ids.fresh(), false, false);
        let q3 = dfa.add_state(ids.fresh(), false, true);
        for (from, symbol, to) in [
            (q0, 'a', q3),
            (q1, 'a', q3),
            (q0, 'b', q2),
            (q1, 'b', q2),
            (q2, 'a', q0),
            (q2, 'b', q1),
            (q3, 'a', q3),
            (q3, 'b', q3),
        ] {
            dfa.add_transition(from, symbol, to).unwrap();
        }
        dfa
    }

    #[test_log::test]
    fn reference_distinguishability() {
        let dfa = reference();
        let table = dfa.solve();
        assert_eq!(table.len(), 6);
        assert_eq!(
            table
                .iter()
                .map(|(pair, marked)| (pair.lo().inner(), pair.hi().inner(), marked))
                .collect_vec(),
            [
                (0, 1, false),
                (0, 2, true),
                (0, 3, true),
                (1, 2, true),
                (1, 3, true),
                (2, 3, true),
            ]
        );
        assert_eq!(table.get(Id(1), Id(0)), table.get(Id(0), Id(1)));
        assert_eq!(table.get(Id(2), Id(2)), None);
        assert!(table.passes() <= 6);
    }

    #[test_log::test]
    fn reference_partition() {
        let dfa = reference();
        let partition = dfa.partition(&dfa.solve());
        assert_eq!(partition.size(), 3);
        assert_eq!(
            partition,
            Partition::new([vec![Id(0), Id(1)], vec![Id(2)], vec![Id(3)]])
        );
        assert_eq!(partition.to_string(), "{q0, q1} {q2} {q3}");
        assert!(partition.respects(&dfa));
        assert!(partition.separates_acceptance(&dfa));
    }

    #[test]
    fn reference_witnesses() {
        let dfa = reference();
        let table = dfa.solve();
        for pair in table.distinguishable_pairs() {
            let (p, q) = pair.into_tuple();
            let word = table.witness(p, q).unwrap();
            assert_ne!(
                dfa.accepts_from(p, word.iter().copied()),
                dfa.accepts_from(q, word.iter().copied()),
                "{word:?} does not separate {p:?} and {q:?}"
            );
        }
        assert_eq!(table.witness(Id(0), Id(2)), Some(vec!['a']));
        assert_eq!(table.witness(Id(0), Id(1)), None);
    }

    #[test]
    fn solving_is_idempotent() {
        let dfa = reference();
        let first = dfa.solve();
        let second = dfa.solve();
        assert_eq!(first, second);
        assert_eq!(dfa.partition(&first), dfa.partition(&second));
        assert_eq!(
            *dfa.partition(&first),
            *dfa.partition(&second),
            "class order must be stable as well"
        );
    }

    #[test]
    fn rendered_table_marks_pairs() {
        let rendered = reference().solve().render();
        let rows = rendered.lines().collect_vec();
        let q1 = rows.iter().find(|row| row.contains("q1") && row.contains('=')).unwrap();
        assert!(!q1.contains('x'));
        let q3 = rows.iter().find(|row| row.contains("q3")).unwrap();
        assert_eq!(q3.matches('x').count(), 3);
    }

    #[cfg(feature = "random")]
    mod properties {
        use crate::prelude::*;
        use crate::random::random_dfa;
        use itertools::Itertools;

        /// All words over the alphabet of `dfa` up to the given length.
        fn words(dfa: &Dfa, length: usize) -> Vec<Vec<char>> {
            let symbols = dfa.alphabet().universe().collect_vec();
            (0..=length)
                .flat_map(|n| {
                    (0..n)
                        .map(|_| symbols.iter().copied())
                        .multi_cartesian_product()
                        .chain((n == 0).then(Vec::new))
                })
                .collect()
        }

        fn check(dfa: &Dfa, options: SolverOptions) {
            let table = dfa.solve_with(options);
            let partition = dfa.partition(&table);
            let states = dfa.states().collect_vec();

            assert!(partition.is_partition_of(&states));
            assert!(partition.separates_acceptance(dfa));
            assert!(partition.respects(dfa), "{dfa:?}\n{partition}");
            if options.undefined == UndefinedTransitions::Inconclusive {
                assert!(table.passes() <= table.len());
            }
            assert_eq!(table, dfa.solve_with(options));

            for (p, q) in states.iter().tuple_combinations() {
                assert_eq!(table.is_equivalent(*p, *q), partition.related(p, q));
                if let Some(word) = table.witness(*p, *q) {
                    assert_ne!(
                        dfa.accepts_from(*p, word.iter().copied()),
                        dfa.accepts_from(*q, word.iter().copied())
                    );
                } else {
                    // equivalent states agree on every word of length below the state count
                    for word in words(dfa, states.len().saturating_sub(1).min(4)) {
                        assert_eq!(
                            dfa.accepts_from(*p, word.iter().copied()),
                            dfa.accepts_from(*q, word.iter().copied())
                        );
                    }
                }
            }
        }

        #[test_log::test]
        fn complete_automata() {
            let mut rng = fastrand::Rng::with_seed(0x5eed);
            for _ in 0..200 {
                let states = rng.usize(0..=7);
                let symbols = rng.usize(1..=3);
                let dfa = random_dfa(&mut rng, states, symbols, 0.4, 1.0).unwrap();
                assert!(dfa.is_complete());
                check(&dfa, SolverOptions::default());
            }
        }

        #[test_log::test]
        fn partial_automata_with_sink() {
            let mut rng = fastrand::Rng::with_seed(0xdfa);
            let options = SolverOptions::default().with_undefined(UndefinedTransitions::Sink);
            for _ in 0..200 {
                let states = rng.usize(0..=7);
                let symbols = rng.usize(1..=3);
                let dfa = random_dfa(&mut rng, states, symbols, 0.4, 0.7).unwrap();
                check(&dfa, options);
            }
        }

        #[test]
        fn partial_automata_stay_acceptance_separated() {
            let mut rng = fastrand::Rng::with_seed(42);
            for _ in 0..200 {
                let states = rng.usize(0..=7);
                let dfa = random_dfa(&mut rng, states, 2, 0.5, 0.6).unwrap();
                let table = dfa.solve();
                let partition = dfa.partition(&table);
                assert!(partition.is_partition_of(&dfa.states().collect_vec()));
                assert!(partition.separates_acceptance(&dfa));
                for pair in table.distinguishable_pairs() {
                    let (p, q) = pair.into_tuple();
                    let word = table.witness(p, q).unwrap();
                    assert_ne!(
                        dfa.accepts_from(p, word.iter().copied()),
                        dfa.accepts_from(q, word.iter().copied())
                    );
                }
            }
        }
    }
}
