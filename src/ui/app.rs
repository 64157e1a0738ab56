use crate::config::AppConfig;
use crate::game::{GameEngine, MoveError, MoveResult, Phase, PlayerId, SetupError};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

use super::palette;

const NOT_STARTED_MESSAGE: &str = "Game was not started. Pick colors and press S to start.";
const GAME_OVER_MESSAGE: &str = "Game over! Press R to play again.";

/// Terminal front-end. Owns the engine and turns key presses into engine calls.
pub struct App {
    engine: GameEngine,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(engine: GameEngine) -> Self {
        App {
            engine,
            selected_column: 0,
            should_quit: false,
            message: None,
        }
    }

    /// Build an app whose engine uses the configured board size and colors
    pub fn from_config(config: &AppConfig) -> Result<Self, SetupError> {
        let mut engine = GameEngine::from_config(&config.board)?;
        engine.set_player_color(PlayerId::One, config.players.player1_color.as_str())?;
        engine.set_player_color(PlayerId::Two, config.players.player2_color.as_str())?;
        Ok(App::new(engine))
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        let in_progress = self.engine.phase() == Phase::InProgress;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.engine.dimensions().width {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(self.selected_column);
            }
            KeyCode::Char('s') if !in_progress => {
                self.start_game();
            }
            KeyCode::Char('r') => {
                self.start_game();
            }
            KeyCode::Char(c @ '1'..='2') if !in_progress => {
                let id = if c == '1' { PlayerId::One } else { PlayerId::Two };
                self.cycle_color(id);
            }
            KeyCode::Char(c @ '1'..='9') if in_progress => {
                let column = c as usize - '1' as usize;
                self.selected_column = column.min(self.engine.dimensions().width - 1);
                self.drop_piece(column);
            }
            _ => {}
        }
    }

    fn start_game(&mut self) {
        let player1 = self.engine.player(PlayerId::One).color().to_string();
        let player2 = self.engine.player(PlayerId::Two).color().to_string();
        let dimensions = self.engine.start(player1, player2);
        self.selected_column = dimensions.width / 2;
        self.message = Some("New game started!".to_string());
    }

    fn cycle_color(&mut self, id: PlayerId) {
        let current = self.engine.player(id).color();
        let taken = self.engine.player(id.other()).color();
        let next = palette::next_color(current, taken);
        // Never rejected here: colors only cycle while no game is running
        if let Err(err) = self.engine.set_player_color(id, next) {
            self.message = Some(err.to_string());
        }
    }

    /// Drop the active player's piece and describe the result
    fn drop_piece(&mut self, column: usize) {
        match self.engine.play_move(column) {
            Ok(MoveResult::Placed { .. }) => {}
            Ok(MoveResult::Ignored) => {
                self.message = Some("Column is full!".to_string());
            }
            Ok(MoveResult::Won { player, .. }) => {
                self.message = Some(format!("Player {player} won!"));
            }
            Ok(MoveResult::Tie { .. }) => {
                self.message = Some("Tie!".to_string());
            }
            Err(MoveError::InvalidColumn { .. } | MoveError::NotLandingRow { .. }) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::GameNotInProgress) => {
                let text = match self.engine.phase() {
                    Phase::Finished => GAME_OVER_MESSAGE,
                    _ => NOT_STARTED_MESSAGE,
                };
                self.message = Some(text.to_string());
            }
        }
    }

    /// Render the UI
    pub fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.engine, self.selected_column, &self.message);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(GameEngine::default())
    }
}
