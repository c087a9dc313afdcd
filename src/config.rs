use log::LevelFilter;
use serde::Deserialize;

use crate::error::ConfigError;

pub const STARTING_CHIPS: u64 = 1000;
/// Below this many cards the deck is replaced before the next deal.
pub const RESHUFFLE_THRESHOLD: usize = 20;
pub const CHIP_DENOMINATIONS: [u64; 5] = [5, 10, 25, 50, 100];

fn default_starting_chips() -> u64 {
    STARTING_CHIPS
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    #[serde(default = "default_starting_chips")]
    pub starting_chips: u64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            starting_chips: STARTING_CHIPS,
            seed: None,
            log_level: None,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_chips == 0 {
            return Err(ConfigError::ZeroBankroll);
        }
        self.level_filter().map(|_| ())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        match &self.log_level {
            None => Ok(LevelFilter::Info),
            Some(level) => level
                .parse::<LevelFilter>()
                .map_err(|_| ConfigError::UnknownLogLevel(level.clone())),
        }
    }
}
