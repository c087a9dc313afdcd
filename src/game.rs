use log::{debug, info, warn};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::Serialize;

use crate::{
    config::{TableConfig, CHIP_DENOMINATIONS, RESHUFFLE_THRESHOLD, STARTING_CHIPS},
    dealer::play_dealer,
    dealing::{deal_card, deal_initial_hands, reveal_dealer_card, InitialDeal},
    deck::Deck,
    error::{ConfigError, DealError},
    hand::Hand,
    settlement::{determine_winner, Outcome, Settlement},
};

const WELCOME: &str = "Place your bet to start!";
const WELCOME_BACK: &str = "Welcome back! You've been given new chips. Place your bet!";
const PLACE_BET: &str = "Place your bet!";
const HIT_OR_STAND: &str = "Hit or Stand?";
const NO_BET: &str = "Please place a bet first!";
const NOT_ENOUGH_CHIPS: &str = "You don't have enough chips!";
const UNKNOWN_CHIP: &str = "That chip is not on the table.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Betting,
    Playing,
    /// Reserved; no transition produces it.
    Dealer,
    GameOver,
}

impl Phase {
    /// What the player can do from here, shown after an action that does not apply.
    fn hint(self) -> &'static str {
        match self {
            Phase::Betting => "Place your bet and deal!",
            Phase::Playing => HIT_OR_STAND,
            Phase::Dealer => "Dealer is playing.",
            Phase::GameOver => "Round over. Start a new round!",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub player_hand: Hand,
    pub dealer_hand: Hand,
    pub deck: Deck,
    pub chips: u64,
    pub bet: u64,
    pub phase: Phase,
    pub message: String,
    pub outcome: Option<Outcome>,
}

impl GameState {
    fn opening(deck: Deck, chips: u64, message: &str) -> Self {
        GameState {
            player_hand: Hand::empty(),
            dealer_hand: Hand::empty(),
            deck,
            chips,
            bet: 0,
            phase: Phase::Betting,
            message: message.to_string(),
            outcome: None,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player_hand: self.player_hand.clone(),
            dealer_hand: self.dealer_hand.clone(),
            deck_remaining: self.deck.len(),
            chips: self.chips,
            bet: self.bet,
            phase: self.phase,
            message: self.message.clone(),
            outcome: self.outcome,
        }
    }
}

/// The view handed to the presentation layer after every action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub player_hand: Hand,
    pub dealer_hand: Hand,
    pub deck_remaining: usize,
    pub chips: u64,
    pub bet: u64,
    pub phase: Phase,
    pub message: String,
    pub outcome: Option<Outcome>,
}

pub struct GameSession<R: Rng = SmallRng> {
    state: GameState,
    starting_chips: u64,
    rng: R,
}

impl GameSession<SmallRng> {
    pub fn from_config(config: &TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Ok(GameSession::with_starting_chips(config.starting_chips, rng))
    }
}

impl<R: Rng> GameSession<R> {
    pub fn new(rng: R) -> Self {
        GameSession::with_starting_chips(STARTING_CHIPS, rng)
    }

    pub fn with_starting_chips(starting_chips: u64, mut rng: R) -> Self {
        let deck = Deck::fresh(&mut rng);
        GameSession {
            state: GameState::opening(deck, starting_chips, WELCOME),
            starting_chips,
            rng,
        }
    }

    /// Starts from a prepared deck instead of a shuffled one.
    pub fn with_deck(deck: Deck, starting_chips: u64, rng: R) -> Self {
        GameSession {
            state: GameState::opening(deck, starting_chips, WELCOME),
            starting_chips,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    fn publish(&mut self, next: GameState) -> Snapshot {
        self.state = next;
        self.state.snapshot()
    }

    fn reject(&mut self, action: &str, message: &str) -> Snapshot {
        warn!("{action} rejected in {:?}: {message}", self.state.phase);
        let next = GameState {
            message: message.to_string(),
            ..self.state.clone()
        };
        self.publish(next)
    }

    fn reject_phase(&mut self, action: &str) -> Snapshot {
        let hint = self.state.phase.hint();
        self.reject(action, hint)
    }

    pub fn place_bet(&mut self, amount: u64) -> Snapshot {
        if self.state.phase != Phase::Betting {
            return self.reject_phase("bet");
        }
        let next = GameState {
            bet: amount,
            ..self.state.clone()
        };
        self.publish(next)
    }

    /// Adds one chip to the bet, as long as the bankroll covers it.
    pub fn add_chip(&mut self, value: u64) -> Snapshot {
        if self.state.phase != Phase::Betting {
            return self.reject_phase("chip");
        }
        if !CHIP_DENOMINATIONS.contains(&value) {
            return self.reject("chip", UNKNOWN_CHIP);
        }
        match self.state.bet.checked_add(value) {
            Some(bet) if bet <= self.state.chips => self.place_bet(bet),
            _ => self.reject("chip", NOT_ENOUGH_CHIPS),
        }
    }

    pub fn clear_bet(&mut self) -> Snapshot {
        self.place_bet(0)
    }

    pub fn deal(&mut self) -> Result<Snapshot, DealError> {
        if self.state.phase != Phase::Betting {
            return Ok(self.reject_phase("deal"));
        }
        let bet = self.state.bet;
        if bet == 0 {
            return Ok(self.reject("deal", NO_BET));
        }
        if bet > self.state.chips {
            return Ok(self.reject("deal", NOT_ENOUGH_CHIPS));
        }

        let deck = if self.state.deck.len() < RESHUFFLE_THRESHOLD {
            info!(
                "{} cards left, shuffling a fresh deck",
                self.state.deck.len()
            );
            Deck::fresh(&mut self.rng)
        } else {
            self.state.deck.clone()
        };

        let InitialDeal {
            player_cards,
            dealer_cards,
            deck,
        } = deal_initial_hands(&deck)?;
        let player_hand = Hand::new(player_cards);
        let chips = self.state.chips - bet;
        info!("dealt round: bet {bet}, player shows {}", player_hand.value());

        let next = if player_hand.is_blackjack() {
            let dealer_hand = Hand::new(reveal_dealer_card(&dealer_cards));
            let settlement = determine_winner(&player_hand, &dealer_hand, bet);
            self.settled(player_hand, dealer_hand, deck, chips, settlement)
        } else {
            GameState {
                player_hand,
                dealer_hand: Hand::new(dealer_cards),
                deck,
                chips,
                bet,
                phase: Phase::Playing,
                message: HIT_OR_STAND.to_string(),
                outcome: None,
            }
        };
        Ok(self.publish(next))
    }

    pub fn hit(&mut self) -> Result<Snapshot, DealError> {
        if self.state.phase != Phase::Playing {
            return Ok(self.reject_phase("hit"));
        }
        let (card, deck) = deal_card(&self.state.deck, true)?;
        let player_hand = self.state.player_hand.with_card(card);
        debug!("player draws {card}, now {}", player_hand.value());

        let next = if player_hand.is_busted() {
            let dealer_hand = Hand::new(reveal_dealer_card(self.state.dealer_hand.cards()));
            let settlement = determine_winner(&player_hand, &dealer_hand, self.state.bet);
            self.settled(player_hand, dealer_hand, deck, self.state.chips, settlement)
        } else {
            GameState {
                player_hand,
                deck,
                message: HIT_OR_STAND.to_string(),
                ..self.state.clone()
            }
        };
        Ok(self.publish(next))
    }

    pub fn stand(&mut self) -> Result<Snapshot, DealError> {
        if self.state.phase != Phase::Playing {
            return Ok(self.reject_phase("stand"));
        }
        let revealed = Hand::new(reveal_dealer_card(self.state.dealer_hand.cards()));
        let (dealer_hand, deck) = play_dealer(revealed, &self.state.deck)?;
        let player_hand = self.state.player_hand.clone();
        let settlement = determine_winner(&player_hand, &dealer_hand, self.state.bet);
        let next = self.settled(player_hand, dealer_hand, deck, self.state.chips, settlement);
        Ok(self.publish(next))
    }

    pub fn new_round(&mut self) -> Snapshot {
        if self.state.phase != Phase::GameOver {
            return self.reject_phase("new round");
        }
        let next = if self.state.chips == 0 {
            info!("bankroll empty, granting {} chips", self.starting_chips);
            GameState::opening(Deck::fresh(&mut self.rng), self.starting_chips, WELCOME_BACK)
        } else {
            GameState::opening(self.state.deck.clone(), self.state.chips, PLACE_BET)
        };
        self.publish(next)
    }

    fn settled(
        &self,
        player_hand: Hand,
        dealer_hand: Hand,
        deck: Deck,
        chips: u64,
        settlement: Settlement,
    ) -> GameState {
        info!(
            "round settled: {:?}, player {} vs dealer {}, payout {}",
            settlement.outcome,
            player_hand.value(),
            dealer_hand.value(),
            settlement.payout
        );
        GameState {
            player_hand,
            dealer_hand,
            deck,
            chips: chips.saturating_add(settlement.payout),
            bet: self.state.bet,
            phase: Phase::GameOver,
            message: settlement.message.to_string(),
            outcome: Some(settlement.outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(SmallRng::seed_from_u64(5))
    }

    #[test]
    fn test_new_session() {
        let game = session();
        let snap = game.snapshot();
        assert_eq!(snap.chips, 1000);
        assert_eq!(snap.bet, 0);
        assert_eq!(snap.phase, Phase::Betting);
        assert_eq!(snap.deck_remaining, 52);
        assert_eq!(snap.message, WELCOME);
        assert!(snap.player_hand.cards().is_empty());
        assert!(snap.dealer_hand.cards().is_empty());
    }

    #[test]
    fn test_deal_without_bet() {
        let mut game = session();
        let snap = game.deal().unwrap();
        assert_eq!(snap.phase, Phase::Betting);
        assert_eq!(snap.message, NO_BET);
        assert_eq!(snap.deck_remaining, 52);
    }

    #[test]
    fn test_deal_bet_above_chips() {
        let mut game = session();
        game.place_bet(1500);
        let snap = game.deal().unwrap();
        assert_eq!(snap.phase, Phase::Betting);
        assert_eq!(snap.message, NOT_ENOUGH_CHIPS);
        assert_eq!(snap.chips, 1000);
        assert_eq!(snap.bet, 1500);
    }

    #[test]
    fn test_deal_deducts_bet() {
        let mut game = session();
        game.place_bet(100);
        let snap = game.deal().unwrap();
        assert_eq!(snap.deck_remaining, 48);
        assert_eq!(snap.player_hand.cards().len(), 2);
        assert_eq!(snap.dealer_hand.cards().len(), 2);
        if snap.phase == Phase::Playing {
            assert_eq!(snap.chips, 900);
            assert_eq!(snap.message, HIT_OR_STAND);
            assert!(!snap.dealer_hand.cards()[1].face_up);
        } else {
            assert_eq!(snap.phase, Phase::GameOver);
            assert!(snap.player_hand.is_blackjack());
        }
    }

    #[test]
    fn test_add_chip_respects_bankroll() {
        let mut game = GameSession::with_starting_chips(30, SmallRng::seed_from_u64(1));
        assert_eq!(game.add_chip(25).bet, 25);
        let snap = game.add_chip(10);
        assert_eq!(snap.bet, 25);
        assert_eq!(snap.message, NOT_ENOUGH_CHIPS);
        assert_eq!(game.add_chip(5).bet, 30);
        assert_eq!(game.clear_bet().bet, 0);
    }

    #[test]
    fn test_add_chip_on_max_bet_is_refused() {
        let mut game = session();
        game.place_bet(u64::MAX);
        let snap = game.add_chip(5);
        assert_eq!(snap.bet, u64::MAX);
        assert_eq!(snap.phase, Phase::Betting);
        assert_eq!(snap.message, NOT_ENOUGH_CHIPS);
    }

    #[test]
    fn test_add_chip_unknown_value() {
        let mut game = session();
        let snap = game.add_chip(7);
        assert_eq!(snap.bet, 0);
        assert_eq!(snap.message, UNKNOWN_CHIP);
    }

    #[test]
    fn test_actions_out_of_phase_are_no_ops() {
        let mut game = session();
        let before = game.state().clone();

        let snap = game.hit().unwrap();
        assert_eq!(snap.message, Phase::Betting.hint());
        let snap = game.stand().unwrap();
        assert_eq!(snap.phase, Phase::Betting);
        let snap = game.new_round();
        assert_eq!(snap.phase, Phase::Betting);

        assert_eq!(game.state().deck, before.deck);
        assert_eq!(game.state().chips, before.chips);
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let game = session();
        let json = serde_json::to_value(game.snapshot()).unwrap();
        assert_eq!(json["phase"], "betting");
        assert_eq!(json["deckRemaining"], 52);
        assert_eq!(json["playerHand"]["isBlackjack"], false);
        assert_eq!(json["chips"], 1000);
        assert!(json["outcome"].is_null());
    }

    #[test]
    fn test_from_config_seed_is_reproducible() {
        let config = TableConfig {
            seed: Some(11),
            ..TableConfig::default()
        };
        let a = GameSession::from_config(&config).unwrap();
        let b = GameSession::from_config(&config).unwrap();
        assert_eq!(a.state().deck, b.state().deck);
    }

    #[test]
    fn test_from_config_rejects_zero_bankroll() {
        let config = TableConfig {
            starting_chips: 0,
            ..TableConfig::default()
        };
        assert!(matches!(
            GameSession::from_config(&config),
            Err(ConfigError::ZeroBankroll)
        ));
    }
}
