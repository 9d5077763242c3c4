//! Library for computing the Myhill-Nerode equivalence classes of the states of a
//! deterministic finite automaton.
//!
//! An automaton is a [`Dfa`], which is grown state by state and transition by transition. Its
//! transition function may be partial, asking for an undefined transition simply yields `None`.
//! Once it is built, [`Dfa::solve`] runs the table-filling algorithm and produces a
//! [`minimization::DistinguishabilityTable`], which records for every unordered pair of distinct
//! states whether some word separates them. [`Dfa::partition`] then groups the states into
//! classes of mutually equivalent states, which are exactly the states of the minimal automaton.
//!
//! Data only flows in one direction: automaton, table, partition. Neither the table nor the
//! partition track later modifications of the automaton, they have to be recomputed.
//!
//! ```
//! use nerode::prelude::*;
//!
//! let mut ids = IdAllocator::default();
//! let mut dfa = Dfa::new();
//! let q0 = dfa.add_state(ids.fresh(), true, false);
//! let q1 = dfa.add_state(ids.fresh(), false, false);
//! let q2 = dfa.add_state(ids.fresh(), false, true);
//! for q in [q0, q1] {
//!     dfa.add_transition(q, 'a', q2).unwrap();
//! }
//! dfa.add_transition(q2, 'a', q2).unwrap();
//!
//! let table = dfa.solve();
//! assert!(table.is_equivalent(q0, q1));
//! assert!(table.is_distinguishable(q1, q2));
//! assert_eq!(dfa.partition(&table).to_string(), "{q0, q1} {q2}");
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use nerode::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{Alphabet, Symbol},
        automaton::{AutomatonError, Dfa, DfaBuilder},
        id::{Id, IdAllocator, StateIndex},
        math::Partition,
        minimization::{
            DistinguishabilityTable, SolverOptions, TableFilling, UndefinedTransitions,
            UnorderedPair,
        },
        show::Show,
    };
}

/// This module contains some definitions of mathematical objects which are used throughout the
/// crate and do not really fit to the top level.
pub mod math;

/// Module that contains definitions for dealing with alphabets.
pub mod alphabet;

/// Identifiers for states and a caller owned allocator for them.
pub mod id;
pub use id::{Id, IdAllocator};

/// Defines the automaton model.
pub mod automaton;
pub use automaton::Dfa;

pub mod minimization;

/// Human readable output of states, words and collections thereof.
pub mod show;
pub use show::Show;

/// Implements the generation of random automata. This is feature gated behind the `random` feature.
#[cfg(feature = "random")]
pub mod random;
