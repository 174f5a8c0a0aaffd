//! Card, deck, hand, and round-driver integration tests.

#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bjlearn::{
    Action, BasicPlayer, Card, DECK_SIZE, Deck, DeckError, DeckOptions, Dealer, Hand, Player,
    Reward, Suit, calc_winner, deal_initial_cards, play_round,
};

const fn card(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank)
}

fn hand_of(ranks: &[u8]) -> Hand {
    let mut hand = Hand::new();
    for &rank in ranks {
        hand.add_card(card(Suit::Hearts, rank));
    }
    hand
}

#[test]
fn hand_totals_with_soft_ace_reduction() {
    // Ace, Ace, 9 -> 21, not bust (one ace reduced).
    let hand = hand_of(&[1, 1, 9]);
    assert_eq!(hand.total(), 21);
    assert!(!hand.is_bust());

    // King, Queen -> 20.
    let hand = hand_of(&[13, 12]);
    assert_eq!(hand.total(), 20);
    assert!(!hand.is_soft());

    // Ace, King, Ace -> 12 (both aces reduced).
    let hand = hand_of(&[1, 13, 1]);
    assert_eq!(hand.total(), 12);
    assert!(!hand.is_bust());

    // Ace, 6 is a soft 17.
    let hand = hand_of(&[1, 6]);
    assert_eq!(hand.total(), 17);
    assert!(hand.is_soft());
}

#[test]
fn hand_bust_detection_and_clear() {
    let mut hand = hand_of(&[10, 9, 8]);
    assert_eq!(hand.total(), 27);
    assert!(hand.is_bust());

    hand.clear();
    assert!(hand.is_empty());
    assert_eq!(hand.total(), 0);
}

#[test]
fn low_ace_hand_counts_aces_as_one() {
    let mut hand = Hand::with_ace_value(1);
    hand.add_card(card(Suit::Clubs, 1));
    hand.add_card(card(Suit::Spades, 1));
    hand.add_card(card(Suit::Hearts, 9));
    assert_eq!(hand.total(), 11);
    assert!(!hand.is_soft());
}

#[test]
fn deck_size_scales_with_repeats() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let deck = Deck::new(DeckOptions::default(), &mut rng);
    assert_eq!(deck.remaining(), DECK_SIZE);

    let deck = Deck::new(DeckOptions::default().with_repeats(6), &mut rng);
    assert_eq!(deck.remaining(), 6 * DECK_SIZE);
}

#[test]
fn unshuffled_deck_deals_in_build_order() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut deck = Deck::new(DeckOptions::default().with_shuffle(false), &mut rng);

    // The last card built is the first one dealt.
    let first = deck.deal_card().unwrap();
    assert_eq!(first, card(Suit::Spades, 13));
}

#[test]
fn deck_errors_when_exhausted() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut deck = Deck::new(DeckOptions::default(), &mut rng);

    for _ in 0..DECK_SIZE {
        deck.deal_card().unwrap();
    }
    assert!(deck.is_empty());
    assert_eq!(deck.deal_card().unwrap_err(), DeckError::Exhausted);
}

#[test]
fn dealer_reshuffles_a_fresh_deck_when_exhausted() {
    let rng = ChaCha8Rng::seed_from_u64(3);
    let mut dealer = Dealer::new(DeckOptions::default(), rng);

    // Deal more cards than one deck holds; exhaustion heals itself.
    let mut hand = Hand::new();
    for _ in 0..60 {
        dealer.deal_to(&mut hand);
    }
    assert_eq!(hand.len(), 60);
}

#[test]
fn dealer_upcard_is_second_card_dealt() {
    let rng = ChaCha8Rng::seed_from_u64(4);
    let mut dealer = Dealer::new(DeckOptions::default().with_shuffle(false), rng);

    dealer.deal_self();
    dealer.deal_self();

    // Unshuffled deck deals Spades king then Spades queen.
    assert_eq!(dealer.hand().len(), 2);
    assert_eq!(dealer.upcard_value(), 10);
}

#[test]
fn dealer_plays_own_hand_to_seventeen_or_more() {
    let rng = ChaCha8Rng::seed_from_u64(5);
    let mut dealer = Dealer::new(DeckOptions::default(), rng);

    dealer.deal_self();
    dealer.deal_self();
    dealer.play_own_hand();

    assert!(dealer.total() >= 17);
}

#[test]
fn basic_player_heuristic_policy() {
    let mut player = BasicPlayer::new();
    player.hand_mut().add_card(card(Suit::Hearts, 10));
    player.hand_mut().add_card(card(Suit::Clubs, 7));

    // 17 against a 10: within 8 of the upcard and below 18, so hit.
    assert_eq!(player.choose_action(10).unwrap(), Action::Hit);
    // 17 against a 5: past the assumed total, so stay.
    assert_eq!(player.choose_action(5).unwrap(), Action::Stay);

    player.hand_mut().add_card(card(Suit::Spades, 1));
    // 18 stays regardless of the upcard.
    assert_eq!(player.choose_action(10).unwrap(), Action::Stay);
}

#[test]
fn initial_deal_gives_everyone_two_cards() {
    let rng = ChaCha8Rng::seed_from_u64(6);
    let mut dealer = Dealer::new(DeckOptions::default(), rng);
    let mut first = BasicPlayer::new();
    let mut second = BasicPlayer::new();

    {
        let mut seats: Vec<&mut dyn Player> = vec![&mut first, &mut second];
        deal_initial_cards(&mut dealer, &mut seats);
    }

    assert_eq!(first.hand().len(), 2);
    assert_eq!(second.hand().len(), 2);
    assert_eq!(dealer.hand().len(), 2);
}

#[test]
fn play_round_resolves_every_hand() {
    let rng = ChaCha8Rng::seed_from_u64(7);
    let mut dealer = Dealer::new(DeckOptions::default(), rng);
    let mut player = BasicPlayer::new();

    let outcome = {
        let mut seats: Vec<&mut dyn Player> = vec![&mut player];
        deal_initial_cards(&mut dealer, &mut seats);
        play_round(&mut dealer, &mut seats).unwrap()
    };

    assert_eq!(outcome.player_totals.len(), 1);
    assert_eq!(outcome.player_totals[0], player.total());
    assert_eq!(outcome.dealer_total, dealer.total());
    // The dealer either reached 17 or busted past it.
    assert!(outcome.dealer_total >= 17);
}

#[test]
fn calc_winner_covers_all_outcomes() {
    // A busted player loses even when the dealer busts too.
    assert_eq!(calc_winner(20, 25), Reward::Loss);
    assert_eq!(calc_winner(25, 22), Reward::Loss);
    // A live player beats a busted dealer.
    assert_eq!(calc_winner(22, 18), Reward::Win);
    // Live hands compare totals.
    assert_eq!(calc_winner(17, 18), Reward::Win);
    assert_eq!(calc_winner(19, 18), Reward::Loss);
    assert_eq!(calc_winner(18, 18), Reward::Push);
}

#[test]
fn reward_values_match_convention() {
    assert_eq!(Reward::Win.value(), 1.0);
    assert_eq!(Reward::Push.value(), 0.0);
    assert_eq!(Reward::Loss.value(), -1.0);
}
