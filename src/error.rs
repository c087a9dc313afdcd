use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DealError {
    #[error("No cards left in deck")]
    EmptyDeck,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Starting bankroll must be greater than zero")]
    ZeroBankroll,
    #[error("Unknown log level: {0}")]
    UnknownLogLevel(String),
}
