use crate::game::{Board, Cell, GameEngine, GameOutcome, Phase, PlayerId, Run};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::palette::terminal_color;

pub fn render(
    frame: &mut Frame,
    engine: &GameEngine,
    selected_column: usize,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Board
            Constraint::Length(3), // Players
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, engine, chunks[0]);
    render_board(frame, engine, selected_column, chunks[1]);
    render_players(frame, engine, chunks[2]);
    render_message(frame, message, chunks[3]);
    render_controls(frame, engine.phase(), chunks[4]);
}

fn player_color(engine: &GameEngine, id: PlayerId) -> Color {
    terminal_color(engine.player(id).color())
}

fn render_header(frame: &mut Frame, engine: &GameEngine, area: Rect) {
    let active = engine.active_player().id();
    let (status, color) = match engine.phase() {
        Phase::NotStarted => ("Choose colors, then press S".to_string(), Color::White),
        Phase::InProgress => (
            format!("Current Player: Player {active}"),
            player_color(engine, active),
        ),
        Phase::Finished => match engine.outcome() {
            Some(GameOutcome::Winner(winner)) => (
                format!("Game Over  |  Player {winner} wins"),
                player_color(engine, winner),
            ),
            _ => ("Game Over  |  Tie".to_string(), Color::White),
        },
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, engine: &GameEngine, selected_column: usize, area: Rect) {
    let board: &Board = engine.board();
    let show_selection = engine.phase() == Phase::InProgress;
    let frame_width = board.width() * 3 + 1;
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..board.width() {
        let label = format!("{:^3}", col + 1);
        if show_selection && col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    lines.push(Line::from(format!("  ╔{}╗", "═".repeat(frame_width))));

    for row in 0..board.height() {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..board.width() {
            row_spans.push(cell_span(engine, engine.winning_run(), row, col));
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{}╝", "═".repeat(frame_width))));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..board.width() {
        if show_selection && col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn cell_span(engine: &GameEngine, run: Option<&Run>, row: usize, col: usize) -> Span<'static> {
    match engine.get_cell(row, col) {
        Some(Cell::Occupied(player)) => {
            let mut style = Style::default().fg(player_color(engine, player));
            if run.is_some_and(|run| run.contains(&(row, col))) {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            Span::styled(" ● ", style)
        }
        _ => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
    }
}

fn render_players(frame: &mut Frame, engine: &GameEngine, area: Rect) {
    let mut spans = Vec::new();
    for id in [PlayerId::One, PlayerId::Two] {
        let player = engine.player(id);
        let style = Style::default().fg(player_color(engine, id));
        spans.push(Span::styled(
            format!("● Player {id} ({})", player.color()),
            style.add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw("    "));
    }
    spans.pop();

    let players = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Players"));

    frame.render_widget(players, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, phase: Phase, area: Rect) {
    let line = match phase {
        Phase::InProgress => "←/→: Move  |  Enter or 1-9: Drop  |  R: Restart  |  Q: Quit",
        Phase::NotStarted => "1/2: Change color  |  Press S to start  |  Q: Quit",
        Phase::Finished => "1/2: Change color  |  R: Play again  |  Q: Quit",
    };

    let controls = Paragraph::new(Line::from(line))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
