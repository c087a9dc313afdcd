use log::debug;

use crate::{deck::Deck, error::DealError, hand::Hand};

/// Dealer hits below 17 and on soft 17.
pub fn should_dealer_hit(hand: &Hand) -> bool {
    hand.value() < 17 || (hand.value() == 17 && hand.is_soft())
}

/// Draws face-up cards for the dealer until the policy stands or the hand busts.
pub fn play_dealer(hand: Hand, deck: &Deck) -> Result<(Hand, Deck), DealError> {
    let mut hand = hand;
    let mut deck = deck.clone();
    while should_dealer_hit(&hand) && !hand.is_busted() {
        let card = deck.draw(true)?;
        hand = hand.with_card(card);
        debug!("dealer draws {card}, now {}", hand.value());
    }
    Ok((hand, deck))
}
