use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Cannot draw from an empty deck")]
    DeckExhausted,
    #[error("Invalid raise amount: {amount}, minimum: {minimum}")]
    InvalidRaise { amount: u32, minimum: u32 },
    #[error("Seat {seat} kept submitting rejected decisions")]
    ControllerStalled { seat: usize },
    #[error("Session ended by the player")]
    SessionEnded,
    #[error("Fewer than two seats have HP left")]
    NotEnoughSeats,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheatError {
    #[error("Unknown cheat: {0}")]
    Unknown(String),
    #[error("{name} is on cooldown for {rounds} more round(s)")]
    OnCooldown { name: &'static str, rounds: u32 },
    #[error("{name} needs an AI seat as target")]
    InvalidTarget { name: &'static str },
    #[error("Only the human seat can cheat")]
    NotPermitted,
    #[error("Not enough cards left in the deck for {name}")]
    DeckTooThin { name: &'static str },
}
