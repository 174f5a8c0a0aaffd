//! A blackjack simulator with a tabular Monte Carlo control learning agent.
//!
//! The crate provides the card, deck, and hand primitives, a round driver,
//! and an [`Agent`] that learns a hit/stay policy by first-visit Monte
//! Carlo control with exploring starts. Given a fixed seed, a full training
//! run is reproducible.
//!
//! # Example
//!
//! ```
//! use bjlearn::{Agent, Game, GameOptions, MonteCarloEs, StateSpace};
//!
//! let options = GameOptions::default().with_rounds(100);
//! let mut game = Game::new(options, 42, |rng| {
//!     vec![Agent::new(MonteCarloEs::default(), &StateSpace::default(), rng)]
//! });
//! let scoreboard = game.play().expect("default state space covers all reachable states");
//! assert_eq!(scoreboard.players().len(), 1);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod agent;
pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod method;
pub mod player;
pub mod result;
pub mod round;
pub mod state;
pub mod table;

// Re-export main types
pub use agent::{Agent, POLICY_FILE, Q_VALUES_FILE};
pub use card::{Card, DECK_SIZE, SUITS, Suit};
pub use deck::{Deck, DeckOptions};
pub use error::{DeckError, ParseActionError, ParseKeyError, PersistError, TableError};
pub use game::{Game, GameOptions};
pub use hand::{DEFAULT_ACE_VALUE, Hand};
pub use method::{InitialValue, Method, MonteCarloEs};
pub use player::{BasicPlayer, Dealer, Player};
pub use result::{PlayerScore, Reward, RoundOutcome, Scoreboard};
pub use round::{calc_winner, deal_initial_cards, play_hand, play_round};
pub use state::{Action, State, StateAction, StateSpace};
pub use table::{ActionValueTable, PolicyTable, ReturnStats, ReturnStatsTable};
