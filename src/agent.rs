//! The learning player.

use std::fs;
use std::path::Path;

use rand_chacha::ChaCha8Rng;

use crate::error::{PersistError, TableError};
use crate::hand::Hand;
use crate::method::Method;
use crate::player::Player;
use crate::result::Reward;
use crate::state::{Action, State, StateAction, StateSpace};
use crate::table::{ActionValueTable, PolicyTable, ReturnStatsTable};

/// File name of the persisted policy document.
pub const POLICY_FILE: &str = "policy.json";
/// File name of the persisted action-value document.
pub const Q_VALUES_FILE: &str = "q_values.json";

/// A player that learns its policy by reinforcement.
///
/// The agent plays each round under its current policy while recording the
/// state-action pairs it visits, then replays that trajectory backward at
/// round end to update its action-value estimates and re-greedify the
/// policy. The policy, action-value, and return tables are pre-populated
/// over the full state space at construction and persist across rounds;
/// the trajectory is episode-scoped.
#[derive(Debug)]
pub struct Agent<M: Method> {
    hand: Hand,
    method: M,
    policy: PolicyTable,
    q: ActionValueTable,
    returns: ReturnStatsTable,
    trajectory: Vec<StateAction>,
}

impl<M: Method> Agent<M> {
    /// Creates an agent whose tables cover every state in `space`.
    ///
    /// The rng drives the exploring-starts policy initialization; pass the
    /// same seeded generator that shuffles the deck to make a whole run
    /// reproducible.
    #[must_use]
    pub fn new(method: M, space: &StateSpace, rng: &mut ChaCha8Rng) -> Self {
        let policy = method.init_policy(space, rng);
        let q = method.init_action_values(space);
        let returns = ReturnStatsTable::zeroed_like(&q);

        Self {
            hand: Hand::new(),
            method,
            policy,
            q,
            returns,
            trajectory: Vec::new(),
        }
    }

    /// Returns the current policy.
    #[must_use]
    pub const fn policy(&self) -> &PolicyTable {
        &self.policy
    }

    /// Returns the current action-value estimates.
    #[must_use]
    pub const fn action_values(&self) -> &ActionValueTable {
        &self.q
    }

    /// Returns the per-pair visit statistics.
    #[must_use]
    pub const fn return_stats(&self) -> &ReturnStatsTable {
        &self.returns
    }

    /// Returns the state-action pairs visited so far this round, in
    /// chronological order.
    #[must_use]
    pub fn trajectory(&self) -> &[StateAction] {
        &self.trajectory
    }

    /// Replays the episode backward and applies first-visit updates.
    ///
    /// `reversed` holds the trajectory most-recent-first. The running
    /// episode return starts at the terminal reward; every later entry adds
    /// the current stored mean return for its pair (flat, undiscounted). A
    /// pair is only updated if it does not occur again in the unprocessed
    /// remainder of the walk, so among duplicates the chronologically first
    /// visit carries the update.
    fn replay(&mut self, reversed: &[StateAction], reward: Reward) -> Result<(), TableError> {
        let mut episode_return = 0.0;

        for (i, &state_action) in reversed.iter().enumerate() {
            if i == 0 {
                episode_return += reward.value();
            } else {
                episode_return += self.returns.stats(state_action)?.mean;
            }

            if reversed[i + 1..].contains(&state_action) {
                continue;
            }

            self.method
                .evaluate(state_action, episode_return, &mut self.q, &mut self.returns)?;
            self.method
                .improve(state_action.state, &mut self.policy, &self.q)?;
            tracing::trace!(%state_action, episode_return, "applied first-visit update");
        }

        Ok(())
    }

    /// Writes the policy and action-value tables as two JSON documents
    /// (`policy.json` and `q_values.json`) under `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be written or a table cannot be
    /// encoded.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<(), PersistError> {
        let dir = dir.as_ref();
        fs::write(dir.join(POLICY_FILE), self.policy.to_json()?)?;
        fs::write(dir.join(Q_VALUES_FILE), self.q.to_json()?)?;
        Ok(())
    }

    /// Loads the policy and action-value tables saved by [`Agent::save`],
    /// reconstructing every key as its state tuple.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or a document does not
    /// decode exactly.
    pub fn load(&mut self, dir: impl AsRef<Path>) -> Result<(), PersistError> {
        let dir = dir.as_ref();
        self.policy = PolicyTable::from_json(&fs::read_to_string(dir.join(POLICY_FILE))?)?;
        self.q = ActionValueTable::from_json(&fs::read_to_string(dir.join(Q_VALUES_FILE))?)?;
        Ok(())
    }
}

impl<M: Method> Player for Agent<M> {
    fn hand(&self) -> &Hand {
        &self.hand
    }

    fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    /// Looks up the policy for the current state, records the visit, and
    /// returns the action.
    ///
    /// A busted hand has no further decision: the agent stays without
    /// consulting the policy or recording a trajectory entry.
    fn choose_action(&mut self, dealer_upcard: u8) -> Result<Action, TableError> {
        if self.hand.is_bust() {
            return Ok(Action::Stay);
        }

        let state = State::new(self.hand.total(), dealer_upcard);
        let action = self.policy.action(state)?;
        self.trajectory.push(StateAction::new(state, action));
        Ok(action)
    }

    /// Runs the backward credit-assignment pass, then clears the trajectory
    /// and discards the hand unconditionally.
    fn end_round(&mut self, reward: Reward) -> Result<(), TableError> {
        let mut reversed = std::mem::take(&mut self.trajectory);
        reversed.reverse();

        let result = self.replay(&reversed, reward);

        self.hand.clear();
        result
    }
}
