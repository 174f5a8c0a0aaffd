//! Deck construction and dealing.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, SUITS};
use crate::error::DeckError;
use crate::hand::DEFAULT_ACE_VALUE;

/// Configuration options for a deck.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjlearn::DeckOptions;
///
/// let options = DeckOptions::default().with_repeats(6).with_shuffle(false);
/// assert_eq!(options.repeats, 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckOptions {
    /// Whether to shuffle the deck after building it.
    pub shuffle: bool,
    /// Number of 52-card decks combined.
    pub repeats: u8,
    /// The value an ace is counted as before soft reduction (11 or 1).
    pub ace_value: u8,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            shuffle: true,
            repeats: 1,
            ace_value: DEFAULT_ACE_VALUE,
        }
    }
}

impl DeckOptions {
    /// Sets whether the deck is shuffled.
    #[must_use]
    pub const fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Sets the number of 52-card decks combined.
    ///
    /// # Example
    ///
    /// ```
    /// use bjlearn::DeckOptions;
    ///
    /// let options = DeckOptions::default().with_repeats(2);
    /// assert_eq!(options.repeats, 2);
    /// ```
    #[must_use]
    pub const fn with_repeats(mut self, repeats: u8) -> Self {
        self.repeats = repeats;
        self
    }

    /// Sets the ace value (11 or 1).
    #[must_use]
    pub const fn with_ace_value(mut self, ace_value: u8) -> Self {
        self.ace_value = ace_value;
        self
    }
}

/// A shoe of one or more shuffled 52-card decks.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    ace_value: u8,
}

impl Deck {
    /// Builds a deck from the given options, shuffling with the supplied rng.
    #[must_use]
    pub fn new(options: DeckOptions, rng: &mut ChaCha8Rng) -> Self {
        let repeats = options.repeats.max(1);
        let mut cards = Vec::with_capacity(repeats as usize * DECK_SIZE);

        for _ in 0..repeats {
            for suit in SUITS {
                for rank in 1..=13 {
                    cards.push(Card::new(suit, rank));
                }
            }
        }

        if options.shuffle {
            cards.shuffle(rng);
        }

        Self {
            cards,
            ace_value: options.ace_value,
        }
    }

    /// Removes and returns the next card.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Exhausted`] when no cards remain. Callers that
    /// must always produce a card catch this and rebuild a fresh deck.
    pub fn deal_card(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Exhausted)
    }

    /// Returns the number of cards remaining.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the deck is out of cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the ace value this deck plays with.
    #[must_use]
    pub const fn ace_value(&self) -> u8 {
        self.ace_value
    }
}
