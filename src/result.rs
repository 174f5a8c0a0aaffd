//! Round outcome and scorekeeping types.

use serde::Serialize;

/// Terminal reward for one player at the end of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reward {
    /// Player beat the dealer: +1.
    Win,
    /// Tie: 0.
    Push,
    /// Player lost: -1.
    Loss,
}

impl Reward {
    /// Returns the numeric reward value.
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Win => 1.0,
            Self::Push => 0.0,
            Self::Loss => -1.0,
        }
    }
}

/// Final totals of a completed round, dealer first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    /// The dealer's final hand total.
    pub dealer_total: u8,
    /// Each player's final hand total, in seating order.
    pub player_totals: Vec<u8>,
}

impl RoundOutcome {
    /// Returns whether the dealer busted.
    #[must_use]
    pub const fn dealer_bust(&self) -> bool {
        self.dealer_total > 21
    }
}

/// Win/push/loss tally for one player across a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlayerScore {
    /// Rounds won.
    pub wins: u32,
    /// Rounds pushed.
    pub pushes: u32,
    /// Rounds lost.
    pub losses: u32,
}

/// Per-player tallies across every round of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    players: Vec<PlayerScore>,
}

impl Scoreboard {
    /// Creates a scoreboard for the given number of players.
    #[must_use]
    pub fn new(players: usize) -> Self {
        Self {
            players: vec![PlayerScore::default(); players],
        }
    }

    /// Records a round result for the player at `index`.
    pub fn record(&mut self, index: usize, reward: Reward) {
        if let Some(score) = self.players.get_mut(index) {
            match reward {
                Reward::Win => score.wins += 1,
                Reward::Push => score.pushes += 1,
                Reward::Loss => score.losses += 1,
            }
        }
    }

    /// Returns the per-player scores in seating order.
    #[must_use]
    pub fn players(&self) -> &[PlayerScore] {
        &self.players
    }
}
