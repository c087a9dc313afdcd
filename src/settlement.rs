use serde::Serialize;

use crate::hand::Hand;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    PlayerBust,
    DealerBust,
    Blackjack,
    DealerBlackjack,
    Win,
    Loss,
    Push,
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Outcome::PlayerBust => "You busted! Dealer wins.",
            Outcome::DealerBust => "Dealer busted! You win!",
            Outcome::Blackjack => "Blackjack! You win!",
            Outcome::DealerBlackjack => "Dealer has Blackjack. You lose.",
            Outcome::Win => "You win!",
            Outcome::Loss => "Dealer wins.",
            Outcome::Push => "It's a tie! Your bet is returned.",
        }
    }

    /// Gross amount returned to the player; the bet was taken at the deal.
    /// Saturates at `u64::MAX`.
    pub fn payout(self, bet: u64) -> u64 {
        match self {
            Outcome::PlayerBust | Outcome::DealerBlackjack | Outcome::Loss => 0,
            Outcome::DealerBust | Outcome::Win => bet.saturating_mul(2),
            // 2 * bet + floor(bet / 2) == floor(2.5 * bet)
            Outcome::Blackjack => bet.saturating_mul(2).saturating_add(bet / 2),
            Outcome::Push => bet,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub outcome: Outcome,
    pub payout: u64,
    pub message: &'static str,
}

pub fn determine_winner(player: &Hand, dealer: &Hand, bet: u64) -> Settlement {
    let outcome = if player.is_busted() {
        Outcome::PlayerBust
    } else if dealer.is_busted() {
        Outcome::DealerBust
    } else if player.is_blackjack() && !dealer.is_blackjack() {
        Outcome::Blackjack
    } else if dealer.is_blackjack() && !player.is_blackjack() {
        Outcome::DealerBlackjack
    } else if player.value() > dealer.value() {
        Outcome::Win
    } else if player.value() < dealer.value() {
        Outcome::Loss
    } else {
        Outcome::Push
    };

    Settlement {
        outcome,
        payout: outcome.payout(bet),
        message: outcome.message(),
    }
}
