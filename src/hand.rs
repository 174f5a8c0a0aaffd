//! Hand representation and soft-ace scoring.

use crate::card::Card;

/// Default value an ace is counted as before soft reduction.
pub const DEFAULT_ACE_VALUE: u8 = 11;

fn evaluate_cards(cards: &[Card], ace_value: u8) -> (u8, bool) {
    let mut total: u8 = 0;
    let mut high_aces: u8 = 0;

    for card in cards {
        if card.rank == 1 && ace_value == DEFAULT_ACE_VALUE {
            high_aces += 1;
        }
        total = total.saturating_add(card.value(ace_value));
    }

    // Soft-ace reduction: drop an ace from 11 to 1 while over 21.
    while total > 21 && high_aces > 0 {
        total -= 10;
        high_aces -= 1;
    }

    let is_soft = high_aces > 0 && total <= 21;
    (total, is_soft)
}

/// A hand of cards.
///
/// The hand remembers the ace value it scores with so that a game played
/// with low aces (`ace_value = 1`) totals its hands consistently with the
/// deck it was dealt from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
    ace_value: u8,
}

impl Hand {
    /// Creates a new empty hand scored with the standard ace value of 11.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_ace_value(DEFAULT_ACE_VALUE)
    }

    /// Creates a new empty hand scored with the given ace value (11 or 1).
    #[must_use]
    pub const fn with_ace_value(ace_value: u8) -> Self {
        Self {
            cards: Vec::new(),
            ace_value,
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Calculates the total value of the hand.
    ///
    /// Card values are summed, then each ace counted as 11 is reduced to 1
    /// while the total exceeds 21.
    #[must_use]
    pub fn total(&self) -> u8 {
        evaluate_cards(&self.cards, self.ace_value).0
    }

    /// Returns whether the hand is bust (total over 21).
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.total() > 21
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluate_cards(&self.cards, self.ace_value).1
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Discards all cards for a new round.
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}
