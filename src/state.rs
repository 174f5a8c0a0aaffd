//! Discrete state and action model for the learning agent.
//!
//! A state is the pair (player total, dealer up-card value); the action set
//! is the closed two-element enumeration {hit, stay}. Both have a stable
//! textual encoding (`"20,6"`, `"20,6,hit"`) used as table keys when an
//! agent is persisted.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::{ParseActionError, ParseKeyError};

/// A player decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    /// Take another card.
    Hit,
    /// Keep the current hand.
    Stay,
}

impl Action {
    /// Every action, in the fixed enumeration order.
    ///
    /// This order is also the greedy tie-break: when two actions have equal
    /// estimated value, policy improvement keeps the one listed first here.
    pub const ALL: [Self; 2] = [Self::Hit, Self::Stay];

    /// Returns the lowercase name of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Stay => "stay",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hit" => Ok(Self::Hit),
            "stay" => Ok(Self::Stay),
            _ => Err(ParseActionError {
                input: s.to_string(),
            }),
        }
    }
}

/// A decision point: the agent's hand total and the dealer's visible card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State {
    /// The agent's current hand total.
    pub player_total: u8,
    /// The value of the dealer's face-up card (ace counted as 11).
    pub dealer_upcard: u8,
}

impl State {
    /// Creates a new state.
    #[must_use]
    pub const fn new(player_total: u8, dealer_upcard: u8) -> Self {
        Self {
            player_total,
            dealer_upcard,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.player_total, self.dealer_upcard)
    }
}

impl FromStr for State {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseKeyError {
            input: s.to_string(),
        };
        let (player, dealer) = s.split_once(',').ok_or_else(err)?;
        Ok(Self {
            player_total: player.trim().parse().map_err(|_| err())?,
            dealer_upcard: dealer.trim().parse().map_err(|_| err())?,
        })
    }
}

/// A state paired with the action taken there; the key of the action-value
/// and return tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateAction {
    /// The decision point.
    pub state: State,
    /// The action taken.
    pub action: Action,
}

impl StateAction {
    /// Creates a new state-action pair.
    #[must_use]
    pub const fn new(state: State, action: Action) -> Self {
        Self { state, action }
    }
}

impl fmt::Display for StateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.state, self.action)
    }
}

impl FromStr for StateAction {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseKeyError {
            input: s.to_string(),
        };
        let (state, action) = s.rsplit_once(',').ok_or_else(err)?;
        Ok(Self {
            state: state.parse()?,
            action: action.parse().map_err(|_| err())?,
        })
    }
}

/// The enumerable space of states the agent can face.
///
/// The Cartesian product `player_values × dealer_values` must cover every
/// decision point reachable in play: dealer values span every possible
/// face-up card (2..=11, ace as 11) and player values span every non-bust
/// total an agent can hold when choosing an action (4..=21 with two-card
/// minimum deals). Tables are pre-populated over this product so that any
/// in-play lookup miss is a configuration error, never a gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSpace {
    player_values: RangeInclusive<u8>,
    dealer_values: RangeInclusive<u8>,
}

impl StateSpace {
    /// Creates a state space over the given player-total and dealer-upcard
    /// ranges.
    #[must_use]
    pub const fn new(
        player_values: RangeInclusive<u8>,
        dealer_values: RangeInclusive<u8>,
    ) -> Self {
        Self {
            player_values,
            dealer_values,
        }
    }

    /// Iterates over every state in the Cartesian product.
    pub fn states(&self) -> impl Iterator<Item = State> + '_ {
        self.player_values.clone().flat_map(move |player_total| {
            self.dealer_values
                .clone()
                .map(move |dealer_upcard| State::new(player_total, dealer_upcard))
        })
    }

    /// Iterates over every state-action pair in the space.
    pub fn state_actions(&self) -> impl Iterator<Item = StateAction> + '_ {
        self.states().flat_map(|state| {
            Action::ALL
                .into_iter()
                .map(move |action| StateAction::new(state, action))
        })
    }

    /// Returns the number of states in the space.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states().count()
    }

    /// Returns whether the space is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states().next().is_none()
    }
}

impl Default for StateSpace {
    /// Player totals 4..=21 (the smallest two-card hand is 2+2), dealer
    /// up-cards 2..=11 (ace counted as 11).
    fn default() -> Self {
        Self::new(4..=21, 2..=11)
    }
}
