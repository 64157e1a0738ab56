//! # Connect Four
//!
//! Rules engine for two-player Connect Four, with a terminal front-end built
//! on Ratatui.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, players, turn and win/tie engine
//! - [`ui`]: Terminal UI: setup screen and game view
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
