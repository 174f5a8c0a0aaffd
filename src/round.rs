//! Round driver: dealing, turn order, and winner calculation.

use crate::error::TableError;
use crate::player::{Dealer, Player};
use crate::result::{Reward, RoundOutcome};
use crate::state::Action;

/// Deals the opening cards: two to every player, two to the dealer.
///
/// Each pass deals one card to every player in seating order and then one
/// to the dealer; the dealer's second card is the face-up one.
pub fn deal_initial_cards(dealer: &mut Dealer, players: &mut [&mut dyn Player]) {
    for _ in 0..2 {
        for player in players.iter_mut() {
            dealer.deal_to(player.hand_mut());
        }
        dealer.deal_self();
    }
}

/// Plays out one player's hand against the dealer's up-card.
///
/// Repeatedly asks the player for a decision and deals on hit, stopping on
/// stay or bust. A hand cannot hit more than a bounded number of times
/// before busting, so the loop always terminates.
///
/// # Errors
///
/// Returns a [`TableError`] if the player's policy lookup fails.
pub fn play_hand(dealer: &mut Dealer, player: &mut dyn Player) -> Result<(), TableError> {
    let upcard = dealer.upcard_value();

    loop {
        if player.is_bust() {
            break;
        }
        match player.choose_action(upcard)? {
            Action::Stay => break,
            Action::Hit => {
                tracing::trace!(total = player.total(), upcard, "player hits");
                dealer.deal_to(player.hand_mut());
            }
        }
    }

    Ok(())
}

/// Plays a full round: every player resolves their hand, then the dealer
/// plays its own.
///
/// # Errors
///
/// Returns a [`TableError`] if any player's policy lookup fails.
pub fn play_round(
    dealer: &mut Dealer,
    players: &mut [&mut dyn Player],
) -> Result<RoundOutcome, TableError> {
    for player in players.iter_mut() {
        play_hand(dealer, *player)?;
    }

    dealer.play_own_hand();

    Ok(RoundOutcome {
        dealer_total: dealer.total(),
        player_totals: players.iter().map(|player| player.total()).collect(),
    })
}

/// Compares final totals and returns the player's reward.
///
/// A busted player loses even when the dealer busts too; otherwise a busted
/// dealer loses, and live hands compare totals with equal totals pushing.
#[must_use]
pub const fn calc_winner(dealer_total: u8, player_total: u8) -> Reward {
    if player_total > 21 {
        Reward::Loss
    } else if dealer_total > 21 || player_total > dealer_total {
        Reward::Win
    } else if player_total < dealer_total {
        Reward::Loss
    } else {
        Reward::Push
    }
}
