use std::path::PathBuf;

/// Errors returned when a piece cannot be dropped into a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("column {column} is outside the board (expected 0..7)")]
    InvalidColumn { column: usize },
}

/// Errors raised by the turn controller when a move request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no game mode selected")]
    NoMode,

    #[error("the game is already over")]
    GameOver,

    #[error("it is the computer's turn")]
    NotHumanTurn,

    #[error("it is not the computer's turn")]
    NotAiTurn,

    #[error("no legal column left to play")]
    NoLegalMove,

    #[error("illegal move: {0}")]
    Move(#[from] MoveError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
