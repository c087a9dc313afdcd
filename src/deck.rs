use std::fmt;

use rand::{seq::SliceRandom, Rng};
use serde::Serialize;

use crate::error::DealError;

pub const DECK_SIZE: usize = 52;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Rank {
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub face_up: bool,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Card {
            suit,
            rank,
            face_up: false,
        }
    }

    pub fn turned_up(self) -> Self {
        Card {
            face_up: true,
            ..self
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // hole card stays hidden in logs
        if !self.face_up {
            return f.write_str("??");
        }
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

/// A stack of cards. The top of the deck is the end of the vector.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck { cards }
    }

    /// Builds a new ordered deck and shuffles it with `rng`.
    pub fn fresh<R: Rng + ?Sized>(rng: &mut R) -> Self {
        shuffle_deck(&create_deck(), rng)
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn draw(&mut self, face_up: bool) -> Result<Card, DealError> {
        let card = self.pop().ok_or(DealError::EmptyDeck)?;
        Ok(Card { face_up, ..card })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

pub fn create_deck() -> Deck {
    let mut deck = Deck::default();
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::new(suit, rank));
        }
    }
    deck
}

/// Returns a shuffled copy of `deck`. `SliceRandom::shuffle` is a
/// Fisher-Yates pass from the last index down to 1.
pub fn shuffle_deck<R: Rng + ?Sized>(deck: &Deck, rng: &mut R) -> Deck {
    let mut cards = deck.cards.clone();
    cards.shuffle(rng);
    Deck { cards }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};
    use std::collections::HashSet;

    #[test]
    fn test_create_deck_order() {
        let deck = create_deck();
        assert_eq!(deck.len(), DECK_SIZE);
        assert_eq!(deck.cards()[0], Card::new(Suit::Hearts, Rank::Ace));
        assert_eq!(deck.cards()[12], Card::new(Suit::Hearts, Rank::King));
        assert_eq!(deck.cards()[13], Card::new(Suit::Diamonds, Rank::Ace));
        assert_eq!(deck.cards()[51], Card::new(Suit::Spades, Rank::King));
        assert!(deck.cards().iter().all(|c| !c.face_up));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let original = create_deck();
        let mut rng = SmallRng::seed_from_u64(7);
        let shuffled = shuffle_deck(&original, &mut rng);

        assert_eq!(shuffled.len(), DECK_SIZE);
        let pairs: HashSet<(Suit, Rank)> =
            shuffled.cards().iter().map(|c| (c.suit, c.rank)).collect();
        assert_eq!(pairs.len(), DECK_SIZE);
        for card in original.cards() {
            assert!(pairs.contains(&(card.suit, card.rank)));
        }
    }

    #[test]
    fn test_shuffle_leaves_input_untouched() {
        let original = create_deck();
        let mut rng = SmallRng::seed_from_u64(1);
        let _ = shuffle_deck(&original, &mut rng);
        assert_eq!(original, create_deck());
    }

    #[test]
    fn test_shuffle_reproducible_with_seed() {
        let deck = create_deck();
        let a = shuffle_deck(&deck, &mut SmallRng::seed_from_u64(42));
        let b = shuffle_deck(&deck, &mut SmallRng::seed_from_u64(42));
        let c = shuffle_deck(&deck, &mut SmallRng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_draw_takes_top_card() {
        let mut deck = create_deck();
        let card = deck.draw(true).unwrap();
        assert_eq!(card.suit, Suit::Spades);
        assert_eq!(card.rank, Rank::King);
        assert!(card.face_up);
        assert_eq!(deck.len(), DECK_SIZE - 1);
    }

    #[test]
    fn test_draw_from_empty_deck() {
        let mut deck = Deck::default();
        assert_eq!(deck.draw(true), Err(DealError::EmptyDeck));
    }

    #[test]
    fn test_card_display() {
        let card = Card::new(Suit::Hearts, Rank::Ace);
        assert_eq!(card.to_string(), "??");
        assert_eq!(card.turned_up().to_string(), "A♥");
        assert_eq!(Card::new(Suit::Clubs, Rank::Ten).turned_up().to_string(), "10♣");
    }

    #[test]
    fn test_card_wire_shape() {
        let card = Card::new(Suit::Diamonds, Rank::Queen).turned_up();
        let json = serde_json::to_value(card).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "suit": "diamonds", "rank": "Q", "faceUp": true })
        );
    }
}
