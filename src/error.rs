use std::path::PathBuf;

/// Reasons a move is rejected by the engine.
///
/// A full column is not an error: it comes back as
/// [`MoveResult::Ignored`](crate::game::MoveResult::Ignored).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is outside the board (width {width})")]
    InvalidColumn { column: usize, width: usize },

    #[error("game is not in progress")]
    GameNotInProgress,

    #[error("cannot place at row {row}, column {column}: not the column's landing row")]
    NotLandingRow { row: usize, column: usize },
}

/// Errors raised while setting up a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("invalid board dimensions {width}x{height} (both must be >= 1)")]
    InvalidDimensions { width: usize, height: usize },

    #[error("cannot change players while a game is in progress")]
    GameInProgress,
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
