//! Terminal UI: a setup screen for picking colors and the game view. All
//! game rules live in [`crate::game`]; this module only renders engine state
//! and forwards key presses.

mod app;
mod game_view;
pub mod palette;

pub use app::App;
pub use palette::PlayersConfig;
