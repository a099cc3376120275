use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid Coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Round is already locked")]
    RoundAlreadyLocked,

    #[error("No guess has been placed this round")]
    NoGuessPlaced,

    #[error("Current round is not complete")]
    RoundNotComplete,

    #[error("Insufficient questions: requested {requested}, catalog has {available}")]
    InsufficientQuestions { requested: usize, available: usize },

    #[error("No game in progress")]
    SessionNotActive,

    #[error("Invalid player name: {0}")]
    InvalidName(String),

    #[error("Leaderboard Error: {0}")]
    Leaderboard(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type GameResult<T> = Result<T, GameError>;
