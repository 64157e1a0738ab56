//! Core Connect Four game logic: board representation, players, and the
//! engine that sequences turns and detects wins and ties.

mod board;
mod engine;
mod player;

pub use board::{Board, Cell, Run, DEFAULT_HEIGHT, DEFAULT_WIDTH, RUN_LENGTH};
pub use engine::{
    BoardConfig, Dimensions, GameEngine, GameOutcome, MoveResult, Phase, DEFAULT_PLAYER1_COLOR,
    DEFAULT_PLAYER2_COLOR,
};
pub use player::{Player, PlayerId};

pub use crate::error::{MoveError, SetupError};
