use thiserror::Error;

use crate::dfa::StateId;

/// Describes why a DFA failed the optional consistency check
/// ([`crate::dfa::Dfa::check_consistency`]).
///
/// The core does not validate automata on construction (callers are
/// responsible, per the crate's error handling design); this enum only
/// backs the opt-in diagnostic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConsistencyError {
    /// The start state is not a member of the state set.
    #[error("start state {0} is not a member of the state set")]
    UnknownStart(StateId),
    /// An accepting state is not a member of the state set.
    #[error("final state {0} is not a member of the state set")]
    UnknownFinal(StateId),
    /// A transition's source state is not a member of the state set.
    #[error("transition source {0} is not a member of the state set")]
    UnknownSource(StateId),
    /// A transition's target state is not a member of the state set.
    #[error("transition target {0} is not a member of the state set")]
    UnknownTarget(StateId),
}

/// Top-level error type for the crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Raised by operations the source left unimplemented (`validate`,
    /// `complete`). Carries the name of the missing operation so callers
    /// can `matches!` on it distinctly from a real failure.
    #[error("operation not implemented: {0}")]
    NotImplemented(&'static str),
    /// Raised by [`crate::dfa::Dfa::check_consistency`].
    #[error("inconsistent DFA: {0}")]
    Consistency(#[from] ConsistencyError),
}
