use serde::Serialize;

use crate::deck::{Card, Rank};

pub fn card_value(rank: Rank) -> u8 {
    match rank {
        Rank::Ace => 11,
        Rank::Jack | Rank::Queen | Rank::King | Rank::Ten => 10,
        Rank::Two => 2,
        Rank::Three => 3,
        Rank::Four => 4,
        Rank::Five => 5,
        Rank::Six => 6,
        Rank::Seven => 7,
        Rank::Eight => 8,
        Rank::Nine => 9,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandValue {
    pub value: u16,
    /// At least one ace is still counted as 11.
    pub is_soft: bool,
}

pub fn calculate_hand(cards: &[Card]) -> HandValue {
    let mut value: u16 = 0;
    let mut aces = 0;

    for card in cards {
        value += u16::from(card_value(card.rank));
        if card.rank == Rank::Ace {
            aces += 1;
        }
    }

    while value > 21 && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    HandValue {
        value,
        is_soft: aces > 0,
    }
}

/// A hand of cards with its scoring recomputed from scratch on every change.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hand {
    cards: Vec<Card>,
    value: u16,
    is_soft: bool,
    is_blackjack: bool,
    is_busted: bool,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        let HandValue { value, is_soft } = calculate_hand(&cards);
        let is_blackjack = cards.len() == 2 && value == 21;
        Hand {
            cards,
            value,
            is_soft,
            is_blackjack,
            is_busted: value > 21,
        }
    }

    pub fn empty() -> Self {
        Hand::default()
    }

    pub fn with_card(&self, card: Card) -> Self {
        let mut cards = self.cards.clone();
        cards.push(card);
        Hand::new(cards)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    pub fn is_soft(&self) -> bool {
        self.is_soft
    }

    pub fn is_blackjack(&self) -> bool {
        self.is_blackjack
    }

    pub fn is_busted(&self) -> bool {
        self.is_busted
    }
}
