use super::board::{Board, Run, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use super::{Cell, Player, PlayerId};
use crate::error::{MoveError, SetupError};

pub const DEFAULT_PLAYER1_COLOR: &str = "magenta";
pub const DEFAULT_PLAYER2_COLOR: &str = "cyan";

/// Lifecycle stage of a game. Moves are only accepted while `InProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(PlayerId),
    Tie,
}

/// What happened to a dropped piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// The column was full; nothing changed and the turn did not pass.
    Ignored,
    /// The piece landed and the turn passed to the other player.
    Placed { row: usize, column: usize },
    /// The piece completed a run for `player`.
    Won {
        player: PlayerId,
        row: usize,
        column: usize,
    },
    /// The piece filled the last open cell without completing a run.
    Tie { row: usize, column: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

/// Board size used by new games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Turn sequencing and win/tie detection for one game session.
///
/// The engine is owned by its caller and driven one call at a time; it never
/// renders anything.
#[derive(Debug, Clone)]
pub struct GameEngine {
    /// Empty board of the configured size, copied on every start
    blank: Board,
    board: Board,
    players: [Player; 2],
    active: PlayerId,
    phase: Phase,
    outcome: Option<GameOutcome>,
    winning_run: Option<Run>,
    move_count: usize,
}

impl GameEngine {
    /// Create an engine for `width` x `height` games. No game is running yet.
    pub fn new(width: usize, height: usize) -> Result<Self, SetupError> {
        Ok(Self::with_blank(Board::new(width, height)?))
    }

    fn with_blank(blank: Board) -> Self {
        GameEngine {
            board: blank.clone(),
            blank,
            players: [
                Player::new(PlayerId::One, DEFAULT_PLAYER1_COLOR),
                Player::new(PlayerId::Two, DEFAULT_PLAYER2_COLOR),
            ],
            active: PlayerId::One,
            phase: Phase::NotStarted,
            outcome: None,
            winning_run: None,
            move_count: 0,
        }
    }

    pub fn from_config(config: &BoardConfig) -> Result<Self, SetupError> {
        Self::new(config.width, config.height)
    }

    /// Set the board size for the next [`GameEngine::start`]. A game already
    /// on the board keeps its size.
    pub fn configure(&mut self, width: usize, height: usize) -> Result<(), SetupError> {
        self.blank = Board::new(width, height)?;
        log::debug!("board size for next game set to {width}x{height}");
        Ok(())
    }

    /// Begin a new game, discarding any previous one.
    ///
    /// Returns the size of the fresh board.
    pub fn start(
        &mut self,
        player1_color: impl Into<String>,
        player2_color: impl Into<String>,
    ) -> Dimensions {
        self.players[0].set_color(player1_color);
        self.players[1].set_color(player2_color);
        self.board = self.blank.clone();
        self.active = PlayerId::One;
        self.phase = Phase::InProgress;
        self.outcome = None;
        self.winning_run = None;
        self.move_count = 0;

        let dimensions = self.dimensions();
        log::info!(
            "game started on {}x{} board (player 1: {}, player 2: {})",
            dimensions.width,
            dimensions.height,
            self.players[0].color(),
            self.players[1].color()
        );
        dimensions
    }

    /// Drop the active player's piece into `column`.
    pub fn play_move(&mut self, column: usize) -> Result<MoveResult, MoveError> {
        if self.phase != Phase::InProgress {
            log::warn!("move in column {column} rejected: game is {:?}", self.phase);
            return Err(MoveError::GameNotInProgress);
        }

        let row = match self.board.find_landing_row(column) {
            Ok(Some(row)) => row,
            Ok(None) => {
                log::debug!("column {column} is full, move ignored");
                return Ok(MoveResult::Ignored);
            }
            Err(err) => {
                log::warn!("move rejected: {err}");
                return Err(err);
            }
        };

        let player = self.active;
        self.board.place(row, column, player)?;
        self.move_count += 1;
        log::debug!("player {player} placed at row {row}, column {column}");

        if let Some(run) = self.board.find_run(player) {
            self.winning_run = Some(run);
            self.finish(GameOutcome::Winner(player));
            return Ok(MoveResult::Won {
                player,
                row,
                column,
            });
        }

        if self.board.is_full() {
            self.finish(GameOutcome::Tie);
            return Ok(MoveResult::Tie { row, column });
        }

        self.active = player.other();
        Ok(MoveResult::Placed { row, column })
    }

    fn finish(&mut self, outcome: GameOutcome) {
        self.phase = Phase::Finished;
        self.outcome = Some(outcome);
        match outcome {
            GameOutcome::Winner(player) => {
                log::info!("player {player} won after {} moves", self.move_count)
            }
            GameOutcome::Tie => log::info!("tie after {} moves", self.move_count),
        }
    }

    /// Change a player's color. Only allowed while no game is running.
    pub fn set_player_color(
        &mut self,
        id: PlayerId,
        color: impl Into<String>,
    ) -> Result<(), SetupError> {
        if self.phase == Phase::InProgress {
            return Err(SetupError::GameInProgress);
        }
        self.player_mut(id).set_color(color);
        Ok(())
    }

    /// Get a cell of the current board, `None` when out of bounds
    pub fn get_cell(&self, row: usize, column: usize) -> Option<Cell> {
        self.board.get(row, column)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Size of the board currently in play. After [`GameEngine::configure`]
    /// this still reports the old size until the next [`GameEngine::start`];
    /// see [`GameEngine::configured_dimensions`].
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.board.width(),
            height: self.board.height(),
        }
    }

    /// Size the next [`GameEngine::start`] will use
    pub fn configured_dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.blank.width(),
            height: self.blank.height(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The player whose turn it is, or who made the final move once finished
    pub fn active_player(&self) -> &Player {
        self.player(self.active)
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        match id {
            PlayerId::One => &self.players[0],
            PlayerId::Two => &self.players[1],
        }
    }

    fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        match id {
            PlayerId::One => &mut self.players[0],
            PlayerId::Two => &mut self.players[1],
        }
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Cells of the winning run, if the game was won
    pub fn winning_run(&self) -> Option<&Run> {
        self.winning_run.as_ref()
    }

    /// Pieces placed in the current game
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Columns that accept a piece right now (none unless a game is running)
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.phase != Phase::InProgress {
            return Vec::new();
        }
        self.board.legal_columns()
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::with_blank(Board::default())
    }
}
