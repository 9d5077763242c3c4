use std::fmt::Debug;

use thiserror::Error;

mod dfa;
pub use dfa::Dfa;

mod builder;
pub use builder::DfaBuilder;

/// Errors that can occur while constructing a [`Dfa`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError<Q: Debug> {
    /// A transition mentions a state that was never registered through [`Dfa::add_state`].
    #[error("transition references unregistered state {state:?}")]
    InvalidReference {
        /// The offending state.
        state: Q,
    },
}
