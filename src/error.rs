//! Error types for deck, table, parsing, and persistence operations.

use thiserror::Error;

use crate::state::{State, StateAction};

/// Errors that can occur when dealing from a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// No cards left in the deck.
    #[error("no cards left in the deck")]
    Exhausted,
}

/// Errors raised by lookups in a table presumed exhaustive.
///
/// The policy, action-value, and return tables are fully populated over the
/// state space at construction, so a miss means the state-space bounds are
/// misconfigured. This is fatal and carries the offending key for diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TableError {
    /// A state is missing from the policy table.
    #[error("no policy entry for state ({0}); state-space bounds are misconfigured")]
    UnknownState(State),
    /// A state-action pair is missing from the action-value or return table.
    #[error("no value entry for state-action ({0}); state-space bounds are misconfigured")]
    UnknownStateAction(StateAction),
}

/// Error parsing an action name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{input}` is not a valid action (expected `hit` or `stay`)")]
pub struct ParseActionError {
    /// The rejected input.
    pub input: String,
}

/// Error parsing a serialized table key back into a state tuple.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed table key `{input}`")]
pub struct ParseKeyError {
    /// The rejected key.
    pub input: String,
}

/// Errors that can occur while saving or loading an agent's tables.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Reading or writing a table file failed.
    #[error("table file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// A table document could not be encoded or decoded.
    #[error("table document is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    /// A serialized key did not round-trip to a state tuple.
    #[error(transparent)]
    Key(#[from] ParseKeyError),
    /// A serialized policy entry named an unknown action.
    #[error(transparent)]
    Action(#[from] ParseActionError),
}
