use js_sys::Function;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod dealer;
pub mod dealing;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
mod logger;
pub mod settlement;

pub use config::{TableConfig, CHIP_DENOMINATIONS, RESHUFFLE_THRESHOLD, STARTING_CHIPS};
pub use dealer::{play_dealer, should_dealer_hit};
pub use dealing::{deal_card, deal_initial_hands, reveal_dealer_card, InitialDeal};
pub use deck::{create_deck, shuffle_deck, Card, Deck, Rank, Suit, DECK_SIZE};
pub use error::{ConfigError, DealError};
pub use game::{GameSession, GameState, Phase, Snapshot};
pub use hand::{calculate_hand, card_value, Hand, HandValue};
pub use settlement::{determine_winner, Outcome, Settlement};

/// A blackjack table for the browser. Every action returns the new snapshot
/// and hands it to the subscribed render callback, if any.
#[wasm_bindgen]
pub struct BlackjackTable {
    session: GameSession,
    subscriber: Option<Function>,
}

#[wasm_bindgen]
impl BlackjackTable {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<BlackjackTable, JsValue> {
        console_error_panic_hook::set_once();
        let config: TableConfig = if config.is_undefined() || config.is_null() {
            TableConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?
        };
        let level = config
            .level_filter()
            .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;
        logger::init(level);

        let session = GameSession::from_config(&config)
            .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

        Ok(BlackjackTable {
            session,
            subscriber: None,
        })
    }

    pub fn subscribe(&mut self, callback: Function) {
        self.subscriber = Some(callback);
    }

    pub fn unsubscribe(&mut self) {
        self.subscriber = None;
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.snapshot())
    }

    #[wasm_bindgen(js_name = placeBet)]
    pub fn place_bet(&mut self, amount: u32) -> Result<JsValue, JsValue> {
        let snapshot = self.session.place_bet(u64::from(amount));
        self.publish(&snapshot)
    }

    #[wasm_bindgen(js_name = addChip)]
    pub fn add_chip(&mut self, value: u32) -> Result<JsValue, JsValue> {
        let snapshot = self.session.add_chip(u64::from(value));
        self.publish(&snapshot)
    }

    #[wasm_bindgen(js_name = clearBet)]
    pub fn clear_bet(&mut self) -> Result<JsValue, JsValue> {
        let snapshot = self.session.clear_bet();
        self.publish(&snapshot)
    }

    pub fn deal(&mut self) -> Result<JsValue, JsValue> {
        let snapshot = self
            .session
            .deal()
            .map_err(|err| JsValue::from_str(&format!("Deal failed: {err}")))?;
        self.publish(&snapshot)
    }

    pub fn hit(&mut self) -> Result<JsValue, JsValue> {
        let snapshot = self
            .session
            .hit()
            .map_err(|err| JsValue::from_str(&format!("Hit failed: {err}")))?;
        self.publish(&snapshot)
    }

    pub fn stand(&mut self) -> Result<JsValue, JsValue> {
        let snapshot = self
            .session
            .stand()
            .map_err(|err| JsValue::from_str(&format!("Stand failed: {err}")))?;
        self.publish(&snapshot)
    }

    #[wasm_bindgen(js_name = newRound)]
    pub fn new_round(&mut self) -> Result<JsValue, JsValue> {
        let snapshot = self.session.new_round();
        self.publish(&snapshot)
    }
}

impl BlackjackTable {
    fn publish(&self, snapshot: &Snapshot) -> Result<JsValue, JsValue> {
        let value = to_js(snapshot)?;
        if let Some(callback) = &self.subscriber {
            let _ = callback.call1(&JsValue::NULL, &value);
        }
        Ok(value)
    }
}

#[wasm_bindgen(js_name = chipDenominations)]
pub fn chip_denominations() -> Vec<u32> {
    CHIP_DENOMINATIONS.iter().map(|&chip| chip as u32).collect()
}

fn to_js(snapshot: &Snapshot) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(snapshot)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}
