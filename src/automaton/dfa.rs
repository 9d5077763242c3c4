use std::collections::BTreeSet;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    alphabet::{Alphabet, Symbol},
    id::{Id, StateIndex},
    math::Map,
    show::Show,
};

use super::AutomatonError;

/// A deterministic finite automaton (DFA) whose transition function may be partial.
///
/// The automaton is mutable only while it is being constructed through [`Dfa::add_state`]
/// and [`Dfa::add_transition`]. Anything computed from it (a
/// [`crate::minimization::DistinguishabilityTable`] or a [`crate::math::Partition`]) is a
/// snapshot, so changing the automaton afterwards requires solving again.
///
/// ```
/// use nerode::prelude::*;
///
/// let mut dfa = Dfa::new();
/// let q0 = dfa.add_state(Id(0), true, false);
/// let q1 = dfa.add_state(Id(1), false, true);
/// dfa.add_transition(q0, 'a', q1).unwrap();
///
/// assert_eq!(dfa.get_destination(q0, 'a'), Some(q1));
/// assert_eq!(dfa.get_destination(q1, 'a'), None);
/// assert!(dfa.accepts("a".chars()));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Dfa<S: Symbol = char, Q: StateIndex = Id> {
    states: BTreeSet<Q>,
    initial: Option<Q>,
    accepting: BTreeSet<Q>,
    alphabet: Alphabet<S>,
    transitions: Map<(Q, S), Q>,
}

impl<S: Symbol, Q: StateIndex> Default for Dfa<S, Q> {
    fn default() -> Self {
        Self {
            states: BTreeSet::new(),
            initial: None,
            accepting: BTreeSet::new(),
            alphabet: Alphabet::default(),
            transitions: Map::default(),
        }
    }
}

impl<S: Symbol, Q: StateIndex> Dfa<S, Q> {
    /// Creates an automaton without states and with an empty alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `state`. If `is_start` is set, the state becomes the start state, replacing
    /// whatever was the start state before. If `is_accept` is set, the state is added to the
    /// accepting states. Registering a state again only re-applies the flags, it never clears
    /// them. Returns `state`.
    pub fn add_state(&mut self, state: Q, is_start: bool, is_accept: bool) -> Q {
        if self.states.insert(state) {
            trace!("registered state {state:?}");
        }
        if is_start {
            self.initial = Some(state);
        }
        if is_accept {
            self.accepting.insert(state);
        }
        state
    }

    /// Sets the transition from `from` on `symbol` to `to` and adds `symbol` to the alphabet.
    ///
    /// Adding a transition for a `(from, symbol)` combination that already has one replaces the
    /// old destination, which is returned. This keeps the automaton deterministic by
    /// construction. Both `from` and `to` must have been registered before, otherwise
    /// [`AutomatonError::InvalidReference`] is returned and the automaton stays untouched.
    pub fn add_transition(
        &mut self,
        from: Q,
        symbol: S,
        to: Q,
    ) -> Result<Option<Q>, AutomatonError<Q>> {
        for state in [from, to] {
            if !self.states.contains(&state) {
                return Err(AutomatonError::InvalidReference { state });
            }
        }
        self.alphabet.add(symbol);
        let previous = self.transitions.insert((from, symbol), to);
        match previous {
            Some(old) if old != to => {
                debug!("transition {from:?} --{symbol:?}--> {old:?} replaced by {to:?}")
            }
            _ => trace!("added transition {from:?} --{symbol:?}--> {to:?}"),
        }
        Ok(previous)
    }

    /// Returns the state that is reached from `state` on `symbol`. If no such transition
    /// exists, which includes unknown states and symbols, `None` is returned.
    pub fn get_destination(&self, state: Q, symbol: S) -> Option<Q> {
        self.transitions.get(&(state, symbol)).copied()
    }

    /// Iterates over all registered states in ascending order.
    pub fn states(&self) -> impl Iterator<Item = Q> + Clone + '_ {
        self.states.iter().copied()
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Returns true if `state` has been registered.
    pub fn contains_state(&self, state: Q) -> bool {
        self.states.contains(&state)
    }

    /// Returns the start state, if one has been designated.
    pub fn initial(&self) -> Option<Q> {
        self.initial
    }

    /// Iterates over the accepting states in ascending order.
    pub fn accepting_states(&self) -> impl Iterator<Item = Q> + Clone + '_ {
        self.accepting.iter().copied()
    }

    /// Returns true if `state` is accepting.
    pub fn is_accepting(&self, state: Q) -> bool {
        self.accepting.contains(&state)
    }

    /// The alphabet, consisting of every symbol that appears on some transition.
    pub fn alphabet(&self) -> &Alphabet<S> {
        &self.alphabet
    }

    /// Iterates over all transitions as `(from, symbol, to)` triples, sorted by origin and symbol.
    pub fn transitions(&self) -> impl Iterator<Item = (Q, S, Q)> + '_ {
        self.transitions
            .iter()
            .map(|((from, symbol), to)| (*from, *symbol, *to))
            .sorted()
    }

    /// Returns true if every state has a transition on every symbol of the alphabet.
    pub fn is_complete(&self) -> bool {
        self.transitions.len() == self.states.len() * self.alphabet.len()
    }

    /// Follows `word` starting in `state` and returns the reached state. If some transition
    /// along the way is undefined, `None` is returned.
    pub fn run_from<W: IntoIterator<Item = S>>(&self, state: Q, word: W) -> Option<Q> {
        word.into_iter()
            .try_fold(state, |current, symbol| self.get_destination(current, symbol))
    }

    /// Returns true if running `word` from `state` ends in an accepting state. A run that
    /// gets stuck on an undefined transition rejects.
    pub fn accepts_from<W: IntoIterator<Item = S>>(&self, state: Q, word: W) -> bool {
        self.run_from(state, word)
            .map(|reached| self.is_accepting(reached))
            .unwrap_or(false)
    }

    /// Runs `word` from the start state, see [`Dfa::accepts_from`]. Without a start state
    /// nothing is accepted.
    pub fn accepts<W: IntoIterator<Item = S>>(&self, word: W) -> bool {
        self.initial
            .map(|initial| self.accepts_from(initial, word))
            .unwrap_or(false)
    }

    /// Renders the transition function as a table. The start state is prefixed with `->`,
    /// accepting states with `*` and undefined transitions are shown as `-`.
    pub fn transition_table(&self) -> String
    where
        Q: Show,
        S: Show,
    {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(self.alphabet.universe().map(|s| s.show())),
        );
        for state in self.states() {
            let mut row = vec![format!(
                "{}{}{}",
                if self.initial == Some(state) { "->" } else { "" },
                if self.is_accepting(state) { "*" } else { "" },
                state.show()
            )];
            for symbol in self.alphabet.universe() {
                row.push(
                    self.get_destination(state, symbol)
                        .map(|target| target.show())
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl<S: Symbol, Q: StateIndex> std::fmt::Debug for Dfa<S, Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dfa")
            .field("states", &self.states)
            .field("initial", &self.initial)
            .field("accepting", &self.accepting)
            .field("transitions", &self.transitions().collect_vec())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn two_states() -> Dfa<char, u32> {
        let mut dfa = Dfa::new();
        dfa.add_state(0, true, false);
        dfa.add_state(1, false, true);
        dfa
    }

    #[test_log::test]
    fn last_transition_wins() {
        let mut dfa = two_states();
        assert_eq!(dfa.add_transition(0, 'a', 0), Ok(None));
        assert_eq!(dfa.add_transition(0, 'a', 1), Ok(Some(0)));
        assert_eq!(dfa.get_destination(0, 'a'), Some(1));
        assert_eq!(dfa.transitions().count(), 1);
    }

    #[test]
    fn undefined_lookups_are_not_errors() {
        let dfa = two_states();
        assert_eq!(dfa.get_destination(0, 'a'), None);
        assert_eq!(dfa.get_destination(17, 'z'), None);
        assert_eq!(dfa.run_from(0, "ab".chars()), None);
        assert!(!dfa.accepts_from(0, "a".chars()));
    }

    #[test]
    fn unregistered_states_are_rejected() {
        let mut dfa = two_states();
        assert_eq!(
            dfa.add_transition(0, 'a', 5),
            Err(AutomatonError::InvalidReference { state: 5 })
        );
        assert_eq!(
            dfa.add_transition(9, 'b', 0),
            Err(AutomatonError::InvalidReference { state: 9 })
        );
        assert!(dfa.alphabet().is_empty());
        assert_eq!(dfa.size(), 2);
        assert_eq!(
            AutomatonError::InvalidReference { state: 5 }.to_string(),
            "transition references unregistered state 5"
        );
    }

    #[test]
    fn repeated_registration_reapplies_flags() {
        let mut dfa = two_states();
        dfa.add_state(1, true, false);
        assert_eq!(dfa.initial(), Some(1));
        assert!(dfa.is_accepting(1));
        dfa.add_state(0, false, true);
        assert_eq!(dfa.initial(), Some(1));
        assert_eq!(dfa.accepting_states().collect::<Vec<_>>(), [0, 1]);
        assert_eq!(dfa.size(), 2);
    }

    #[test]
    fn runs_and_acceptance() {
        let mut dfa = two_states();
        dfa.add_transition(0, 'a', 1).unwrap();
        dfa.add_transition(1, 'b', 0).unwrap();
        assert!(!dfa.is_complete());
        assert_eq!(dfa.run_from(0, "aba".chars()), Some(1));
        assert!(dfa.accepts("aba".chars()));
        assert!(!dfa.accepts("ab".chars()));
        assert!(!dfa.accepts("abb".chars()));
        dfa.add_transition(0, 'b', 0).unwrap();
        dfa.add_transition(1, 'a', 1).unwrap();
        assert!(dfa.is_complete());
        assert_eq!(dfa.alphabet().universe().collect::<String>(), "ab");
    }

    #[test]
    fn states_can_be_paired_up() {
        use itertools::Itertools;

        let mut dfa = two_states();
        dfa.add_state(2, false, false);
        assert_eq!(
            dfa.states().tuple_combinations::<(u32, u32)>().collect::<Vec<_>>(),
            [(0, 1), (0, 2), (1, 2)]
        );
        assert_eq!(dfa.accepting_states().cycle().take(2).collect::<Vec<_>>(), [1, 1]);
    }

    #[test]
    fn no_start_state_accepts_nothing() {
        let mut dfa: Dfa<char, u32> = Dfa::new();
        dfa.add_state(0, false, true);
        assert!(!dfa.accepts("".chars()));
        assert!(dfa.accepts_from(0, "".chars()));
    }

    #[test]
    fn transition_table_rendering() {
        let mut dfa = two_states();
        dfa.add_transition(0, 'a', 1).unwrap();
        dfa.add_transition(1, 'b', 1).unwrap();
        let table = dfa.transition_table();
        let lines = table.lines().collect::<Vec<_>>();
        assert!(lines[1].contains("State") && lines[1].contains('a') && lines[1].contains('b'));
        assert!(table.contains("->0"));
        assert!(table.contains("*1"));
        let row = lines.iter().find(|line| line.contains("*1")).unwrap();
        assert!(row.contains('-'));
    }
}
