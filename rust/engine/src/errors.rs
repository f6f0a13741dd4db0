use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    #[error("Game already started")]
    AlreadyStarted,
    #[error("No active game session")]
    Uninitialized,
    #[error("Reel is spinning; the spin must resolve before the next launch")]
    SpinInProgress,
    #[error("Unrecognized command: {0}")]
    UnknownCommand(String),
    #[error("Rush continue probability {value} exceeds 1.0 at streak {streak}")]
    ProbabilityOutOfRange { streak: u32, value: f64 },
}
