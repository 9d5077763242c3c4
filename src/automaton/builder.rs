use crate::{
    alphabet::Symbol,
    id::{Id, StateIndex},
};

use super::{AutomatonError, Dfa};

/// Helper struct for the construction of a [`Dfa`]. It collects states, flags and transitions
/// and only assembles the automaton in [`DfaBuilder::build`], which is where references to
/// unregistered states are detected.
///
/// # Example
///
/// We want to create a DFA with two states 0 and 1 over the alphabet `['a', 'b']`, where
/// state 0 is initial and state 1 is accepting. Reading `a` switches the state, reading `b`
/// stays.
/// ```
/// use nerode::prelude::*;
///
/// let dfa = DfaBuilder::default()
///     .with_initial(0u32)
///     .with_accepting([1])
///     .with_transitions([(0, 'a', 1), (0, 'b', 0), (1, 'a', 0), (1, 'b', 1)])
///     .build()
///     .unwrap();
/// assert!(dfa.accepts("ab".chars()));
/// ```
pub struct DfaBuilder<S: Symbol = char, Q: StateIndex = Id> {
    states: Vec<Q>,
    initial: Option<Q>,
    accepting: Vec<Q>,
    transitions: Vec<(Q, S, Q)>,
}

impl<S: Symbol, Q: StateIndex> Default for DfaBuilder<S, Q> {
    fn default() -> Self {
        Self {
            states: vec![],
            initial: None,
            accepting: vec![],
            transitions: vec![],
        }
    }
}

impl<S: Symbol, Q: StateIndex> DfaBuilder<S, Q> {
    /// Registers the given states without any flags.
    pub fn with_states<I: IntoIterator<Item = Q>>(mut self, states: I) -> Self {
        self.states.extend(states);
        self
    }

    /// Registers `state` and makes it the start state.
    pub fn with_initial(mut self, state: Q) -> Self {
        self.initial = Some(state);
        self
    }

    /// Registers the given states as accepting.
    pub fn with_accepting<I: IntoIterator<Item = Q>>(mut self, states: I) -> Self {
        self.accepting.extend(states);
        self
    }

    /// Adds a list of transitions. They are inserted in the given order, so for duplicate
    /// `(from, symbol)` combinations the last one wins.
    pub fn with_transitions<I: IntoIterator<Item = (Q, S, Q)>>(mut self, transitions: I) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Assembles the [`Dfa`]. Fails if a transition mentions a state that was not given
    /// to any of [`Self::with_states`], [`Self::with_initial`] or [`Self::with_accepting`].
    pub fn build(self) -> Result<Dfa<S, Q>, AutomatonError<Q>> {
        let mut dfa = Dfa::new();
        for state in self.states {
            dfa.add_state(state, false, false);
        }
        for state in self.accepting {
            dfa.add_state(state, false, true);
        }
        if let Some(initial) = self.initial {
            dfa.add_state(initial, true, false);
        }
        for (from, symbol, to) in self.transitions {
            dfa.add_transition(from, symbol, to)?;
        }
        Ok(dfa)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn builder_registers_flagged_states() {
        let dfa = DfaBuilder::default()
            .with_states([0u32, 1, 2])
            .with_initial(3)
            .with_accepting([2, 4])
            .with_transitions([(0, 'a', 4), (3, 'a', 0), (3, 'a', 1)])
            .build()
            .unwrap();
        assert_eq!(dfa.states().collect::<Vec<_>>(), [0, 1, 2, 3, 4]);
        assert_eq!(dfa.initial(), Some(3));
        assert_eq!(dfa.accepting_states().collect::<Vec<_>>(), [2, 4]);
        assert_eq!(dfa.get_destination(3, 'a'), Some(1));
    }

    #[test]
    fn builder_reports_unknown_states() {
        let result = DfaBuilder::default()
            .with_states([0u32])
            .with_transitions([(0, 'a', 1)])
            .build();
        assert_eq!(result, Err(AutomatonError::InvalidReference { state: 1 }));
    }

    #[test]
    fn builder_defaults_match_the_automaton() {
        let builder: DfaBuilder = DfaBuilder::default();
        let built: Dfa = builder
            .with_initial(Id(0))
            .with_transitions([(Id(0), 'a', Id(0))])
            .build()
            .unwrap();
        let mut dfa: Dfa = Dfa::new();
        dfa.add_state(Id(0), true, false);
        dfa.add_transition(Id(0), 'a', Id(0)).unwrap();
        assert_eq!(built, dfa);
    }
}
