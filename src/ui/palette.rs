use std::str::FromStr;

use ratatui::style::Color;

use crate::game::{DEFAULT_PLAYER1_COLOR, DEFAULT_PLAYER2_COLOR};

/// Colors offered on the setup screen, in cycling order.
pub const PALETTE: [&str; 8] = [
    "magenta", "cyan", "red", "yellow", "green", "blue", "white", "lightred",
];

/// Initial colors of both players.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub player1_color: String,
    pub player2_color: String,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            player1_color: DEFAULT_PLAYER1_COLOR.to_string(),
            player2_color: DEFAULT_PLAYER2_COLOR.to_string(),
        }
    }
}

/// Parse a color name (`"magenta"`), index (`"5"`) or hex value (`"#ff00ff"`)
pub fn parse_color(name: &str) -> Option<Color> {
    Color::from_str(name).ok()
}

/// Terminal color for a player, falling back to gray for unknown names
pub fn terminal_color(name: &str) -> Color {
    parse_color(name).unwrap_or(Color::Gray)
}

/// The palette entry after `current`, skipping `taken` so both players never
/// share a color. Unknown colors restart at the top of the palette.
pub fn next_color(current: &str, taken: &str) -> &'static str {
    let start = PALETTE
        .iter()
        .position(|&c| c.eq_ignore_ascii_case(current))
        .map_or(0, |i| i + 1);

    (0..PALETTE.len())
        .map(|offset| PALETTE[(start + offset) % PALETTE.len()])
        .find(|c| !c.eq_ignore_ascii_case(taken))
        .unwrap_or(PALETTE[0])
}
