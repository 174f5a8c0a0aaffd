//! Multi-round game orchestration.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::deck::DeckOptions;
use crate::error::TableError;
use crate::player::{Dealer, Player};
use crate::result::Scoreboard;
use crate::round::{calc_winner, deal_initial_cards, play_round};

/// Configuration options for a game.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjlearn::{DeckOptions, GameOptions};
///
/// let options = GameOptions::default()
///     .with_rounds(1000)
///     .with_deck(DeckOptions::default().with_repeats(2));
/// assert_eq!(options.rounds, 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    /// Number of rounds to play.
    pub rounds: u32,
    /// Deck configuration.
    pub deck: DeckOptions,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            rounds: 1,
            deck: DeckOptions::default(),
        }
    }
}

impl GameOptions {
    /// Sets the number of rounds.
    #[must_use]
    pub const fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Sets the deck configuration.
    #[must_use]
    pub const fn with_deck(mut self, deck: DeckOptions) -> Self {
        self.deck = deck;
        self
    }
}

/// A blackjack game: one dealer against an arbitrary number of players,
/// played for a fixed number of rounds.
///
/// The game is strictly sequential; one round completes in full before the
/// next starts. Given a fixed seed the whole run (shuffling, policy
/// initialization, every deal) is reproducible.
#[derive(Debug)]
pub struct Game<P: Player> {
    dealer: Dealer,
    players: Vec<P>,
    rounds: u32,
}

impl<P: Player> Game<P> {
    /// Creates a game with the given seed.
    ///
    /// The `players` closure receives the seeded rng so that learning
    /// players initialized from it share the single deterministic stream
    /// with the deck shuffle.
    ///
    /// # Example
    ///
    /// ```
    /// use bjlearn::{BasicPlayer, Game, GameOptions};
    ///
    /// let options = GameOptions::default().with_rounds(10);
    /// let mut game = Game::new(options, 42, |_| vec![BasicPlayer::new(); 3]);
    /// let scoreboard = game.play().expect("fixed players never miss a lookup");
    /// assert_eq!(scoreboard.players().len(), 3);
    /// ```
    #[must_use]
    pub fn new<F>(options: GameOptions, seed: u64, players: F) -> Self
    where
        F: FnOnce(&mut ChaCha8Rng) -> Vec<P>,
    {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let players = players(&mut rng);
        let dealer = Dealer::new(options.deck, rng);

        Self {
            dealer,
            players,
            rounds: options.rounds,
        }
    }

    /// Returns the players in seating order.
    #[must_use]
    pub fn players(&self) -> &[P] {
        &self.players
    }

    /// Returns the players mutably.
    pub fn players_mut(&mut self) -> &mut [P] {
        &mut self.players
    }

    /// Plays every round and returns the per-player tallies.
    ///
    /// Each round starts from a fresh shuffled deck; at round end every
    /// player receives its terminal reward before the table is cleared.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if a learning player's state space does not
    /// cover a state reached in play.
    pub fn play(&mut self) -> Result<Scoreboard, TableError> {
        let mut scoreboard = Scoreboard::new(self.players.len());

        for round in 0..self.rounds {
            self.dealer.reset_deck();

            let mut seats: Vec<&mut dyn Player> = self
                .players
                .iter_mut()
                .map(|player| player as &mut dyn Player)
                .collect();

            deal_initial_cards(&mut self.dealer, &mut seats);
            let outcome = play_round(&mut self.dealer, &mut seats)?;

            for (index, player) in self.players.iter_mut().enumerate() {
                let reward = calc_winner(outcome.dealer_total, outcome.player_totals[index]);
                scoreboard.record(index, reward);
                player.end_round(reward)?;
            }

            self.dealer.clear_hand();
            tracing::debug!(round, dealer_total = outcome.dealer_total, "round finished");
        }

        tracing::info!(rounds = self.rounds, "game finished");
        Ok(scoreboard)
    }
}
