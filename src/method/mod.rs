//! Pluggable reinforcement-learning methods.
//!
//! A [`Method`] bundles the four operations an agent delegates to its
//! learning algorithm: policy initialization, action-value initialization,
//! policy evaluation, and policy improvement. The one concrete method
//! shipped is first-visit Monte Carlo control with exploring starts
//! ([`MonteCarloEs`]); temporal-difference variants would slot in behind
//! the same trait.

use std::fmt;

use rand_chacha::ChaCha8Rng;

use crate::error::TableError;
use crate::state::{State, StateAction, StateSpace};
use crate::table::{ActionValueTable, PolicyTable, ReturnStatsTable};

mod monte_carlo;

pub use monte_carlo::MonteCarloEs;

/// The starting estimate assigned to every state-action pair.
pub enum InitialValue {
    /// The same value for every pair.
    Constant(f64),
    /// A fresh value produced per key.
    PerKey(Box<dyn Fn(StateAction) -> f64>),
}

impl InitialValue {
    /// Creates a per-key initial value from a closure.
    #[must_use]
    pub fn per_key(f: impl Fn(StateAction) -> f64 + 'static) -> Self {
        Self::PerKey(Box::new(f))
    }

    /// Returns the initial value for `state_action`.
    #[must_use]
    pub fn value_for(&self, state_action: StateAction) -> f64 {
        match self {
            Self::Constant(value) => *value,
            Self::PerKey(f) => f(state_action),
        }
    }
}

impl Default for InitialValue {
    /// Optimistic default of 5.0, which pushes the greedy policy to try
    /// both actions in every state early on.
    fn default() -> Self {
        Self::Constant(5.0)
    }
}

impl fmt::Debug for InitialValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::PerKey(_) => f.debug_tuple("PerKey").finish(),
        }
    }
}

/// A reinforcement-learning algorithm the agent can be parameterized with.
pub trait Method {
    /// Builds the starting policy over the full state space.
    fn init_policy(&self, space: &StateSpace, rng: &mut ChaCha8Rng) -> PolicyTable;

    /// Builds the starting action-value table over the full state-action
    /// space.
    fn init_action_values(&self, space: &StateSpace) -> ActionValueTable;

    /// Folds one observed episode return into the estimates for
    /// `state_action`, updating both the return statistics and the Q table.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if `state_action` is missing from either
    /// table.
    fn evaluate(
        &self,
        state_action: StateAction,
        episode_return: f64,
        q: &mut ActionValueTable,
        returns: &mut ReturnStatsTable,
    ) -> Result<(), TableError>;

    /// Makes the policy greedy at `state` with respect to the current Q
    /// table.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if any action's value at `state` is missing
    /// from the Q table.
    fn improve(
        &self,
        state: State,
        policy: &mut PolicyTable,
        q: &ActionValueTable,
    ) -> Result<(), TableError>;
}
