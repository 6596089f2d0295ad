//! Stateless UI rendering for the chess board.

use super::app::App;
use super::layout::{BOARD_HEIGHT, BOARD_WIDTH, BoardLayout, CELL_HEIGHT};
use checkmate_client::{Game, GameState, Move, Preferences, Square, Theme};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use std::collections::BTreeSet;
use std::fmt::Write as _;

/// Renders the whole screen and returns where the board landed.
pub fn draw(frame: &mut Frame, app: &App) -> BoardLayout {
    let area = frame.area();
    let state = app.controller().game().state();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                // Title
            Constraint::Min(BOARD_HEIGHT + 2),    // Board and side panel
            Constraint::Length(3),                // Status
        ])
        .split(area);

    let title = Paragraph::new(headline(&state))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(BOARD_WIDTH + 4), Constraint::Min(20)])
        .split(chunks[1]);

    let layout = draw_board(frame, body[0], app, &state);
    draw_panel(frame, body[1], app, &state);

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    layout
}

fn headline(state: &GameState) -> String {
    match state.result() {
        Some(result) => format!("Checkmate - {}", result),
        None => match state.active_player_name() {
            Some(name) => format!("Checkmate - {} ({}) to move", name, state.active()),
            None => format!("Checkmate - {} to move", state.active()),
        },
    }
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App, state: &GameState) -> BoardLayout {
    // Rank labels on the left, file labels below.
    let layout = BoardLayout::new(area.x + 2, area.y);
    let highlights = app.controller().highlights();
    let interaction = app.controller().interaction();
    let dragged = interaction.drag().map(|drag| *drag.from());

    for square in Square::all() {
        let cell = layout.cell(square);
        if cell.right() > area.right() || cell.bottom() > area.bottom() {
            continue;
        }
        let style = square_style(
            square,
            &highlights,
            interaction.hovered() == Some(square),
            dragged == Some(square),
        );
        let symbol = state
            .board()
            .piece_at(square)
            .map(|piece| app.preferences().symbol(piece.kind, piece.color).to_string())
            .unwrap_or_default();
        let text = Paragraph::new(Line::from(Span::styled(symbol, style)))
            .style(style)
            .alignment(Alignment::Center);
        frame.render_widget(text, cell);
    }

    for (index, rank) in state.board().ranks().iter().take(8).enumerate() {
        let y = layout.y() + (7 - index as u16) * CELL_HEIGHT;
        let label = Rect::new(area.x, y, 1, 1);
        if label.bottom() <= area.bottom() {
            frame.render_widget(Paragraph::new(rank.to_string()), label);
        }
    }
    let files: String = state
        .board()
        .files()
        .iter()
        .map(|f| format!("  {}  ", f))
        .collect();
    let footer = Rect::new(layout.x(), layout.y() + BOARD_HEIGHT, BOARD_WIDTH, 1);
    if footer.bottom() <= area.bottom() {
        frame.render_widget(Paragraph::new(files), footer);
    }

    layout
}

fn square_style(square: Square, highlights: &BTreeSet<Square>, hovered: bool, dragged: bool) -> Style {
    let dark = (square.file() as u8 + square.rank() as u8) % 2 == 0;
    let base = if dark {
        Style::default().bg(Color::Rgb(118, 150, 86)).fg(Color::Black)
    } else {
        Style::default().bg(Color::Rgb(238, 238, 210)).fg(Color::Black)
    };
    if dragged {
        base.bg(Color::LightBlue).add_modifier(Modifier::BOLD)
    } else if highlights.contains(&square) {
        base.bg(Color::LightYellow)
    } else if hovered {
        base.add_modifier(Modifier::REVERSED)
    } else {
        base
    }
}

fn draw_panel(frame: &mut Frame, area: Rect, app: &App, state: &GameState) {
    let interaction = app.controller().interaction();
    if let Some(choices) = interaction.choices() {
        let items: Vec<ListItem> = choices
            .iter()
            .enumerate()
            .map(|(i, mv)| ListItem::new(format!("{}. {}", i + 1, describe(mv))))
            .collect();
        let prompt = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Choose a move"))
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
        frame.render_widget(prompt, area);
        return;
    }

    let history: Vec<ListItem> = state
        .history()
        .iter()
        .enumerate()
        .map(|(ply, mv)| ListItem::new(history_entry(ply, mv)))
        .collect();
    let skip = history.len().saturating_sub(usize::from(area.height.saturating_sub(2)));
    let list = List::new(history.into_iter().skip(skip).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL).title("Moves"));
    frame.render_widget(list, area);
}

/// History line for the move at `ply`; the turn number leads white's moves.
fn history_entry(ply: usize, mv: &Move) -> String {
    if ply % 2 == 0 {
        format!("{:>3}. {}", ply / 2 + 1, mv)
    } else {
        format!("     {}", mv)
    }
}

/// One-line description of a candidate move.
pub fn describe(mv: &Move) -> String {
    if let Some(kind) = mv.promotion_kind() {
        format!("{}{} promote to {}", mv.from, mv.to, kind)
    } else if mv.is_castle() {
        format!("{}{} castle", mv.from, mv.to)
    } else {
        mv.to_string()
    }
}

/// Plain-text snapshot: board, side to move and legal moves.
pub fn render_text(state: &GameState) -> String {
    let preferences = Preferences::new(Theme::Light);
    let mut out = String::new();
    for rank in (0..8).rev() {
        let _ = write!(out, "{} ", rank + 1);
        for file in 0..8 {
            let symbol = Square::from_indexes(file, rank)
                .and_then(|square| state.board().piece_at(square))
                .map(|piece| preferences.symbol(piece.kind, piece.color))
                .unwrap_or('.');
            let _ = write!(out, "{} ", symbol);
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h\n");
    let _ = writeln!(out, "{}", headline(state));
    for mv in state.moves() {
        let _ = writeln!(out, "  {}", describe(mv));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkmate_client::{Color as Side, Piece, PieceKind};

    fn sq(label: &str) -> Square {
        label.parse().unwrap()
    }

    #[test]
    fn test_history_entry_shows_piece_and_capture() {
        let pawn = Piece::new(PieceKind::Pawn, Side::White);
        let take = Move::new(pawn, sq("e4"), sq("d5"))
            .with_taken(Piece::new(PieceKind::Pawn, Side::Black));
        assert!(take.is_capture());
        assert_eq!(
            history_entry(2, &take),
            "  2. white pawn e4 -> d5 (takes black pawn)"
        );

        let king = Piece::new(PieceKind::King, Side::Black);
        let rook = Move::new(Piece::new(PieceKind::Rook, Side::Black), sq("h8"), sq("f8"));
        let castle = Move::new(king, sq("e8"), sq("g8")).with_castle(rook);
        assert_eq!(history_entry(3, &castle), "     black king e8 -> g8 (castles)");
    }
}
