//! First-visit Monte Carlo control with exploring starts.

use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;

use crate::error::TableError;
use crate::state::{Action, State, StateAction, StateSpace};
use crate::table::{ActionValueTable, PolicyTable, ReturnStats, ReturnStatsTable};

use super::{InitialValue, Method};

/// First-visit Monte Carlo control with exploring starts.
///
/// The policy is initialized with a uniformly random action per state so
/// every action starts with nonzero coverage; evaluation maintains an
/// incremental mean of observed episode returns per state-action pair, and
/// improvement makes the policy greedy with respect to those means.
#[derive(Debug, Default)]
pub struct MonteCarloEs {
    initial_value: InitialValue,
}

impl MonteCarloEs {
    /// Creates the method with the given initial action-value estimate.
    #[must_use]
    pub fn new(initial_value: InitialValue) -> Self {
        Self { initial_value }
    }
}

impl Method for MonteCarloEs {
    /// Exploring-starts initialization: a uniformly random action per state.
    fn init_policy(&self, space: &StateSpace, rng: &mut ChaCha8Rng) -> PolicyTable {
        let mut policy = PolicyTable::new();
        for state in space.states() {
            let action = Action::ALL
                .choose(rng)
                .copied()
                .unwrap_or(Action::ALL[0]);
            policy.insert(state, action);
        }
        policy
    }

    fn init_action_values(&self, space: &StateSpace) -> ActionValueTable {
        let mut q = ActionValueTable::new();
        for state_action in space.state_actions() {
            q.insert(state_action, self.initial_value.value_for(state_action));
        }
        q
    }

    /// Incremental-mean update: with visit count `n` and running mean `m`,
    /// stores `m' = m + (r - m) / (n + 1)` and count `n + 1`, then sets
    /// `Q[state_action] = m'`.
    ///
    /// This is numerically equivalent to recomputing the mean of every
    /// historical return from scratch.
    fn evaluate(
        &self,
        state_action: StateAction,
        episode_return: f64,
        q: &mut ActionValueTable,
        returns: &mut ReturnStatsTable,
    ) -> Result<(), TableError> {
        let stats = returns.stats(state_action)?;
        let count = stats.count + 1;
        #[expect(
            clippy::cast_precision_loss,
            reason = "visit counts stay far below f64 integer precision"
        )]
        let mean = stats.mean + (episode_return - stats.mean) / count as f64;

        returns.insert(state_action, ReturnStats { count, mean });
        q.insert(state_action, mean);
        Ok(())
    }

    /// Greedy improvement: picks the action maximizing `Q[(state, action)]`.
    /// Ties keep the action listed first in [`Action::ALL`] (hit before
    /// stay).
    fn improve(
        &self,
        state: State,
        policy: &mut PolicyTable,
        q: &ActionValueTable,
    ) -> Result<(), TableError> {
        let mut best_action = Action::ALL[0];
        let mut best_value = q.value(StateAction::new(state, best_action))?;

        for &action in &Action::ALL[1..] {
            let value = q.value(StateAction::new(state, action))?;
            if value > best_value {
                best_action = action;
                best_value = value;
            }
        }

        policy.insert(state, best_action);
        Ok(())
    }
}
