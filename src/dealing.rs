use log::debug;

use crate::{
    deck::{Card, Deck},
    error::DealError,
};

/// Takes the top card off a copy of `deck`.
pub fn deal_card(deck: &Deck, face_up: bool) -> Result<(Card, Deck), DealError> {
    let mut deck = deck.clone();
    let card = deck.draw(face_up)?;
    Ok((card, deck))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitialDeal {
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Card>,
    pub deck: Deck,
}

/// Player, dealer, player, then the dealer's hole card face down.
pub fn deal_initial_hands(deck: &Deck) -> Result<InitialDeal, DealError> {
    let (p1, deck) = deal_card(deck, true)?;
    let (d1, deck) = deal_card(&deck, true)?;
    let (p2, deck) = deal_card(&deck, true)?;
    let (hole, deck) = deal_card(&deck, false)?;

    debug!("opening deal: player {p1} {p2}, dealer {d1} {hole}");

    Ok(InitialDeal {
        player_cards: vec![p1, p2],
        dealer_cards: vec![d1, hole],
        deck,
    })
}

pub fn reveal_dealer_card(cards: &[Card]) -> Vec<Card> {
    cards.iter().map(|card| card.turned_up()).collect()
}
