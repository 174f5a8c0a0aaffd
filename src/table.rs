//! Policy, action-value, and return-statistics tables.
//!
//! All three tables are pre-populated over the full state-action space at
//! agent construction and stay exhaustive for the life of the agent, so a
//! lookup miss is surfaced as a fatal [`TableError`] rather than defaulted.
//! Keys order deterministically (`BTreeMap`), which also gives the persisted
//! JSON documents a stable, diffable key order.

use std::collections::BTreeMap;

use crate::error::{PersistError, TableError};
use crate::state::{Action, State, StateAction};

/// Mapping from state to the action the agent currently prefers there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyTable(BTreeMap<State, Action>);

impl PolicyTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the action prescribed for `state`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownState`] if the state was never
    /// initialized; the table is presumed exhaustive, so this is fatal.
    pub fn action(&self, state: State) -> Result<Action, TableError> {
        self.0
            .get(&state)
            .copied()
            .ok_or(TableError::UnknownState(state))
    }

    /// Sets the action for `state`.
    pub fn insert(&mut self, state: State, action: Action) {
        self.0.insert(state, action);
    }

    /// Iterates over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (State, Action)> + '_ {
        self.0.iter().map(|(&state, &action)| (state, action))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encodes the table as a pretty-printed JSON object keyed by the
    /// `"player,dealer"` form of each state.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON encoding fails.
    pub fn to_json(&self) -> Result<String, PersistError> {
        let doc: BTreeMap<String, &str> = self
            .0
            .iter()
            .map(|(state, action)| (state.to_string(), action.as_str()))
            .collect();
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Decodes a table from its JSON form, reconstructing every key as a
    /// state tuple.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON, a key does not
    /// parse back to a state, or a value names an unknown action.
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        let doc: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut table = Self::new();
        for (key, value) in doc {
            let state: State = key.parse()?;
            let action: Action = value.parse()?;
            table.insert(state, action);
        }
        Ok(table)
    }
}

/// Mapping from state-action pair to the current estimate of its expected
/// return (the Q function).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionValueTable(BTreeMap<StateAction, f64>);

impl ActionValueTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the estimated return for `state_action`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownStateAction`] if the pair was never
    /// initialized.
    pub fn value(&self, state_action: StateAction) -> Result<f64, TableError> {
        self.0
            .get(&state_action)
            .copied()
            .ok_or(TableError::UnknownStateAction(state_action))
    }

    /// Sets the estimate for `state_action`.
    pub fn insert(&mut self, state_action: StateAction, value: f64) {
        self.0.insert(state_action, value);
    }

    /// Iterates over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (StateAction, f64)> + '_ {
        self.0.iter().map(|(&key, &value)| (key, value))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encodes the table as a pretty-printed JSON object keyed by the
    /// `"player,dealer,action"` form of each state-action pair.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON encoding fails.
    pub fn to_json(&self) -> Result<String, PersistError> {
        let doc: BTreeMap<String, f64> = self
            .0
            .iter()
            .map(|(key, &value)| (key.to_string(), value))
            .collect();
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Decodes a table from its JSON form, reconstructing every key as a
    /// state-action tuple.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON or a key does not
    /// parse back to a state-action pair.
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        let doc: BTreeMap<String, f64> = serde_json::from_str(json)?;
        let mut table = Self::new();
        for (key, value) in doc {
            table.insert(key.parse::<StateAction>()?, value);
        }
        Ok(table)
    }
}

/// Visit count and running mean return for one state-action pair.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReturnStats {
    /// How many episode returns have been folded into the mean.
    pub count: u64,
    /// The running mean of those returns.
    pub mean: f64,
}

/// Incremental-mean bookkeeping per state-action pair, kept separately from
/// the Q table: Q stores the current estimate, this table stores the visit
/// count the next incremental update needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnStatsTable(BTreeMap<StateAction, ReturnStats>);

impl ReturnStatsTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with zeroed statistics for every key of `q`.
    #[must_use]
    pub fn zeroed_like(q: &ActionValueTable) -> Self {
        Self(q.iter().map(|(key, _)| (key, ReturnStats::default())).collect())
    }

    /// Returns the statistics for `state_action`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownStateAction`] if the pair was never
    /// initialized.
    pub fn stats(&self, state_action: StateAction) -> Result<ReturnStats, TableError> {
        self.0
            .get(&state_action)
            .copied()
            .ok_or(TableError::UnknownStateAction(state_action))
    }

    /// Sets the statistics for `state_action`.
    pub fn insert(&mut self, state_action: StateAction, stats: ReturnStats) {
        self.0.insert(state_action, stats);
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
