//! Error types shared across the crate

use thiserror::Error;

use crate::difficulty::Difficulty;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Maze too small: {cols}x{rows} cells, need at least 3x3")]
    MazeTooSmall { cols: usize, rows: usize },

    #[error("Maze too large: {cols}x{rows} cells")]
    MazeTooLarge { cols: usize, rows: usize },

    #[error("Unknown difficulty: {0:?}")]
    UnknownDifficulty(String),

    #[error("Session on {difficulty} did not end in a win")]
    NotAWin { difficulty: Difficulty },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
