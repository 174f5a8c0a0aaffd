//! Players and the dealer.

use rand_chacha::ChaCha8Rng;

use crate::card::Card;
use crate::deck::{Deck, DeckOptions};
use crate::error::TableError;
use crate::hand::Hand;
use crate::result::Reward;
use crate::state::Action;

/// A participant in the round, seen from the round driver's side.
///
/// The driver deals into the hand, asks for decisions while the hand is
/// live, and hands back the terminal reward once every hand is resolved.
pub trait Player {
    /// Returns the player's hand.
    fn hand(&self) -> &Hand;

    /// Returns the player's hand for dealing.
    fn hand_mut(&mut self) -> &mut Hand;

    /// Returns the player's current hand total.
    fn total(&self) -> u8 {
        self.hand().total()
    }

    /// Returns whether the player has busted.
    fn is_bust(&self) -> bool {
        self.hand().is_bust()
    }

    /// Chooses the next action given the dealer's face-up card value.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if a learning player's tables are missing
    /// the current state.
    fn choose_action(&mut self, dealer_upcard: u8) -> Result<Action, TableError>;

    /// Finishes the round: receive the terminal reward and discard the hand.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if a learning player's backward update hits
    /// a missing table entry.
    fn end_round(&mut self, reward: Reward) -> Result<(), TableError>;
}

/// A player with a fixed heuristic policy.
///
/// Hits while its total is within 8 of the dealer's visible card and below
/// 18, a rough stand-in for "assume the dealer's hole card is average".
#[derive(Debug, Clone, Default)]
pub struct BasicPlayer {
    hand: Hand,
}

impl BasicPlayer {
    /// Creates a new player with an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Player for BasicPlayer {
    fn hand(&self) -> &Hand {
        &self.hand
    }

    fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    fn choose_action(&mut self, dealer_upcard: u8) -> Result<Action, TableError> {
        let total = self.hand.total();
        let assumed_total = dealer_upcard.saturating_add(8);
        if total <= assumed_total && total < 18 {
            Ok(Action::Hit)
        } else {
            Ok(Action::Stay)
        }
    }

    fn end_round(&mut self, _reward: Reward) -> Result<(), TableError> {
        self.hand.clear();
        Ok(())
    }
}

/// The house: owns the deck and plays a fixed hit-below-17 policy.
#[derive(Debug)]
pub struct Dealer {
    hand: Hand,
    deck: Deck,
    options: DeckOptions,
    rng: ChaCha8Rng,
}

impl Dealer {
    /// Creates a dealer with a freshly built deck.
    ///
    /// The dealer keeps the rng so that mid-round reshuffles stay on the
    /// same deterministic stream.
    #[must_use]
    pub fn new(options: DeckOptions, mut rng: ChaCha8Rng) -> Self {
        let deck = Deck::new(options, &mut rng);
        Self {
            hand: Hand::with_ace_value(options.ace_value),
            deck,
            options,
            rng,
        }
    }

    /// Draws the next card, reshuffling a fresh deck if this one is out.
    ///
    /// Deck exhaustion never surfaces to the caller.
    fn next_card(&mut self) -> Card {
        if let Ok(card) = self.deck.deal_card() {
            return card;
        }
        tracing::debug!("deck exhausted, grabbing a fresh one");
        self.reset_deck();
        match self.deck.deal_card() {
            Ok(card) => card,
            Err(_) => unreachable!("a freshly built deck always has cards"),
        }
    }

    /// Deals one card into another participant's hand.
    pub fn deal_to(&mut self, hand: &mut Hand) {
        let card = self.next_card();
        hand.add_card(card);
    }

    /// Deals one card to the dealer's own hand.
    pub fn deal_self(&mut self) {
        let card = self.next_card();
        self.hand.add_card(card);
    }

    /// Replaces the deck with a freshly built, shuffled one.
    pub fn reset_deck(&mut self) {
        self.deck = Deck::new(self.options, &mut self.rng);
    }

    /// Returns the dealer's hand.
    #[must_use]
    pub const fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Returns the dealer's current total.
    #[must_use]
    pub fn total(&self) -> u8 {
        self.hand.total()
    }

    /// Returns whether the dealer has busted.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.hand.is_bust()
    }

    /// Returns the value of the dealer's face-up card.
    ///
    /// The second card dealt to the dealer is the face-up one; an ace counts
    /// as 11. Returns 0 if the dealer has not been dealt two cards yet.
    #[must_use]
    pub fn upcard_value(&self) -> u8 {
        self.hand
            .cards()
            .get(1)
            .map_or(0, |card| card.value(self.deck.ace_value()))
    }

    /// Plays out the dealer's own hand: hit below 17, stay at 17 or above.
    pub fn play_own_hand(&mut self) {
        while self.hand.total() < 17 {
            self.deal_self();
        }
    }

    /// Discards the dealer's hand for a new round.
    pub fn clear_hand(&mut self) {
        self.hand.clear();
    }

    /// Returns the number of cards left in the current deck.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.deck.remaining()
    }
}
