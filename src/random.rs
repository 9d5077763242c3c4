use tracing::trace;

use crate::{alphabet::Alphabet, automaton::Dfa, id::IdAllocator, Id};

/// Draws a random automaton with `states` states over the first `symbols` lowercase letters.
/// The first state is the start state, every state is accepting with probability
/// `accepting_probability` and for each state and symbol a transition to a uniformly drawn
/// target exists with probability `defined_probability`. A `defined_probability` of `1.0`
/// yields a complete automaton.
///
/// Symbols on which no transition was drawn do not become part of the alphabet. Returns
/// `None` if there are more than 26 symbols or more states than there are [`Id`]s.
pub fn random_dfa(
    rng: &mut fastrand::Rng,
    states: usize,
    symbols: usize,
    accepting_probability: f64,
    defined_probability: f64,
) -> Option<Dfa<char, Id>> {
    let alphabet = Alphabet::of_size(symbols)?;
    let mut ids = IdAllocator::default();
    let mut dfa = Dfa::new();

    let indices = (0..states)
        .map(|i| {
            let id = ids.try_fresh()?;
            Some(dfa.add_state(id, i == 0, rng.f64() < accepting_probability))
        })
        .collect::<Option<Vec<Id>>>()?;

    for from in &indices {
        for symbol in alphabet.universe() {
            if rng.f64() < defined_probability {
                let to = indices[rng.usize(..indices.len())];
                dfa.add_transition(*from, symbol, to).ok()?;
            }
        }
    }
    trace!("drew random automaton\n{}", dfa.transition_table());
    Some(dfa)
}

/// Draws a complete random automaton in which every state is accepting with probability
/// one half, see [`random_dfa`].
pub fn random_complete_dfa(
    rng: &mut fastrand::Rng,
    states: usize,
    symbols: usize,
) -> Option<Dfa<char, Id>> {
    random_dfa(rng, states, symbols, 0.5, 1.0)
}
