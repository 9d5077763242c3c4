use bit_set::BitSet;
use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    alphabet::Symbol,
    automaton::Dfa,
    id::StateIndex,
    math::Bijection,
};

use super::table::{pair_count, pair_index, DistinguishabilityTable, Evidence};

/// Determines how a symbol is treated for which exactly one of two states has a transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UndefinedTransitions {
    /// The symbol provides no evidence either way. For automata that are not complete this
    /// may leave states unseparated that only differ in where they get stuck.
    #[default]
    Inconclusive,
    /// Every undefined transition leads into an implicit rejecting state that loops on all
    /// symbols. This computes the exact equivalence of the completed automaton.
    Sink,
}

/// Configuration of a solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SolverOptions {
    /// The policy for undefined transitions.
    pub undefined: UndefinedTransitions,
}

impl SolverOptions {
    /// Sets the policy for undefined transitions.
    pub fn with_undefined(mut self, undefined: UndefinedTransitions) -> Self {
        self.undefined = undefined;
        self
    }
}

/// Runs the table-filling algorithm on a [`Dfa`] one pass at a time.
///
/// Creating the solver marks every pair of states that disagree on acceptance. Each call to
/// [`TableFilling::step`] then scans all unmarked pairs in ascending order and marks a pair as
/// soon as some symbol (tried in ascending order) leads it into an already marked pair. Marks
/// made during a pass are visible to the rest of that pass. Marks are never removed, so the
/// procedure reaches its fixed point after at most as many passes as there are pairs.
///
/// States and symbols are mapped to dense indices and the transition function is stored as
/// a `states x symbols` table, the automaton itself is only borrowed during construction.
pub struct TableFilling<S: Symbol, Q: StateIndex> {
    options: SolverOptions,
    states: Bijection<Q, usize>,
    symbols: Vec<S>,
    /// Number of states including the sink, if there is one.
    universe: usize,
    accepting: BitSet,
    successors: Vec<Option<usize>>,
    marked: BitSet,
    evidence: Vec<Option<Evidence<S>>>,
    passes: usize,
}

impl<S: Symbol, Q: StateIndex> TableFilling<S, Q> {
    /// Prepares the dense representation of `dfa` and performs the initial marking.
    pub fn new(dfa: &Dfa<S, Q>, options: SolverOptions) -> Self {
        let states: Bijection<Q, usize> = dfa.states().enumerate().map(|(i, q)| (q, i)).collect();
        let symbols = dfa.alphabet().universe().collect_vec();

        let with_sink = options.undefined == UndefinedTransitions::Sink && !dfa.is_complete();
        let universe = states.len() + usize::from(with_sink);
        let sink = with_sink.then_some(states.len());

        let mut successors = Vec::with_capacity(universe * symbols.len());
        let mut accepting = BitSet::with_capacity(universe);
        for (q, i) in states.iter() {
            if dfa.is_accepting(*q) {
                accepting.insert(*i);
            }
            successors.extend(symbols.iter().map(|a| {
                dfa.get_destination(*q, *a)
                    .and_then(|p| states.get_by_left(&p).copied())
                    .or(sink)
            }));
        }
        if let Some(sink) = sink {
            trace!("added rejecting sink with index {sink}");
            successors.extend(symbols.iter().map(|_| Some(sink)));
        }

        let mut solver = Self {
            options,
            states,
            symbols,
            universe,
            accepting,
            successors,
            marked: BitSet::with_capacity(pair_count(universe)),
            evidence: vec![None; pair_count(universe)],
            passes: 0,
        };
        solver.initialize();
        solver
    }

    fn initialize(&mut self) {
        for (i, j) in (0..self.universe).tuple_combinations() {
            if self.accepting.contains(i) != self.accepting.contains(j) {
                self.mark(i, j, Evidence::Acceptance);
            }
        }
        debug!(
            "initially marked {} of {} pairs",
            self.marked.len(),
            pair_count(self.universe)
        );
    }

    fn mark(&mut self, i: usize, j: usize, evidence: Evidence<S>) {
        let position = pair_index(i, j);
        self.marked.insert(position);
        self.evidence[position] = Some(evidence);
    }

    fn successor(&self, state: usize, symbol: usize) -> Option<usize> {
        self.successors[state * self.symbols.len() + symbol]
    }

    fn is_marked_index(&self, i: usize, j: usize) -> bool {
        match i.cmp(&j) {
            std::cmp::Ordering::Less => self.marked.contains(pair_index(i, j)),
            std::cmp::Ordering::Greater => self.marked.contains(pair_index(j, i)),
            std::cmp::Ordering::Equal => false,
        }
    }

    /// Finds the first symbol on which both `i` and `j` have a successor and the successors
    /// form a marked pair.
    fn separating_symbol(&self, i: usize, j: usize) -> Option<(S, usize)> {
        self.symbols.iter().enumerate().find_map(|(a, symbol)| {
            let p = self.successor(i, a)?;
            let q = self.successor(j, a)?;
            if self.is_marked_index(p, q) {
                Some((*symbol, pair_index(p.min(q), p.max(q))))
            } else {
                None
            }
        })
    }

    /// Performs one full propagation pass and returns true if it marked at least one pair.
    pub fn step(&mut self) -> bool {
        let mut newly_marked = 0;
        for (i, j) in (0..self.universe).tuple_combinations() {
            if self.marked.contains(pair_index(i, j)) {
                continue;
            }
            if let Some((symbol, pair)) = self.separating_symbol(i, j) {
                trace!("marking ({i}, {j}) via {symbol:?}");
                self.mark(i, j, Evidence::Successor { symbol, pair });
                newly_marked += 1;
            }
        }
        self.passes += 1;
        debug!("pass {} marked {newly_marked} new pairs", self.passes);
        newly_marked > 0
    }

    /// Returns true if the pair `(p, q)` is currently marked. Unknown states and `p == q`
    /// are never marked.
    pub fn is_marked(&self, p: Q, q: Q) -> bool {
        match (self.states.get_by_left(&p), self.states.get_by_left(&q)) {
            (Some(i), Some(j)) => self.is_marked_index(*i, *j),
            _ => false,
        }
    }

    /// The number of marked pairs, including pairs that involve the sink.
    pub fn marked_count(&self) -> usize {
        self.marked.len()
    }

    /// The number of passes performed so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Iterates passes until one of them makes no progress and returns the resulting table.
    /// Without any pairs no pass is run at all.
    pub fn run(mut self) -> DistinguishabilityTable<S, Q> {
        if pair_count(self.universe) > 0 {
            while self.step() {}
        }
        debug!(
            "reached fixed point after {} passes with {} of {} pairs marked",
            self.passes,
            self.marked.len(),
            pair_count(self.universe)
        );
        DistinguishabilityTable {
            states: self.states,
            marked: self.marked,
            evidence: self.evidence,
            passes: self.passes,
            options: self.options,
        }
    }
}
