use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four::config::AppConfig;
use connect_four::game::{GameEngine, MoveResult};
use connect_four::ui::App;

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Two-player Connect Four")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override board width (columns)
    #[arg(long)]
    width: Option<usize>,

    /// Override board height (rows)
    #[arg(long)]
    height: Option<usize>,

    /// Override player 1 color
    #[arg(long)]
    player1_color: Option<String>,

    /// Override player 2 color
    #[arg(long)]
    player2_color: Option<String>,

    /// Play the given moves without the TUI and print the board to stdout
    #[arg(long)]
    headless: bool,

    /// Zero-based columns to play in headless mode, e.g. `3,3,4`
    #[arg(long, value_delimiter = ',', requires = "headless")]
    moves: Vec<usize>,

    /// Write logs to this file (filter with RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    // Load configuration
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(width) = cli.width {
        config.board.width = width;
    }
    if let Some(height) = cli.height {
        config.board.height = height;
    }
    if let Some(color) = cli.player1_color.clone() {
        config.players.player1_color = color;
    }
    if let Some(color) = cli.player2_color.clone() {
        config.players.player2_color = color;
    }
    config.validate().context("invalid configuration")?;

    if cli.headless {
        run_headless(&config, &cli.moves)
    } else {
        run_tui(&config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run_headless(config: &AppConfig, moves: &[usize]) -> Result<()> {
    if moves.is_empty() {
        bail!("headless mode needs --moves");
    }

    let mut engine = GameEngine::from_config(&config.board)?;
    let dimensions = engine.start(
        config.players.player1_color.as_str(),
        config.players.player2_color.as_str(),
    );
    println!(
        "New game on a {}x{} board",
        dimensions.width, dimensions.height
    );

    for (i, &column) in moves.iter().enumerate() {
        let player = engine.active_player().id();
        let result = engine
            .play_move(column)
            .with_context(|| format!("move {} (column {column})", i + 1))?;
        match result {
            MoveResult::Ignored => {
                println!("move {}: column {column} is full, ignored", i + 1);
            }
            MoveResult::Placed { row, column } => {
                println!("move {}: player {player} -> row {row}, column {column}", i + 1);
            }
            MoveResult::Won {
                player,
                row,
                column,
            } => {
                println!("move {}: player {player} -> row {row}, column {column}", i + 1);
                println!("Player {player} won!");
            }
            MoveResult::Tie { row, column } => {
                println!("move {}: player {player} -> row {row}, column {column}", i + 1);
                println!("Tie!");
            }
        }
    }

    println!("{}", engine.board());
    Ok(())
}

fn run_tui(config: &AppConfig) -> Result<()> {
    let mut app = App::from_config(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("terminal UI failed")
}
