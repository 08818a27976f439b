use crate::client::GameOutcome;
use crate::game::Board;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget::{board_lines, BoardStyle};

/// Everything the board screen shows.
pub struct GameView<'a> {
    pub board: &'a Board,
    pub strategy: &'a str,
    pub selected_column: usize,
    pub last_computer_move: Option<usize>,
    pub outcome: Option<GameOutcome>,
    pub message: Option<&'a str>,
}

pub fn render(frame: &mut Frame, view: &GameView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                  // Header
            Constraint::Min(board_rows(view.board)), // Board
            Constraint::Length(3),                  // Message
            Constraint::Length(4),                  // Controls
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);
    render_board(frame, view, chunks[1]);
    render_message(frame, view.message, chunks[2]);
    render_controls(frame, view.outcome.is_some(), chunks[3]);
}

/// Rows the board widget needs: the grid plus labels, frame and cursor.
fn board_rows(board: &Board) -> u16 {
    u16::try_from(board.height())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
}

fn render_header(frame: &mut Frame, view: &GameView, area: Rect) {
    let (status, color) = match view.outcome {
        Some(GameOutcome::Won) => ("You won!".to_string(), Color::Green),
        Some(GameOutcome::Lost) => ("The computer won.".to_string(), Color::Red),
        Some(GameOutcome::Draw) => ("It's a draw.".to_string(), Color::Yellow),
        None => {
            let last = view
                .last_computer_move
                .map(|col| format!("  |  Computer played: {}", col + 1))
                .unwrap_or_default();
            (format!("Playing against {}{last}", view.strategy), Color::Yellow)
        }
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

fn render_board(frame: &mut Frame, view: &GameView, area: Rect) {
    let highlight = match view.outcome {
        Some(GameOutcome::Lost) => Color::Red,
        _ => Color::Green,
    };
    let style = BoardStyle {
        selected: view.outcome.is_none().then_some(view.selected_column),
        last_computer_move: view.last_computer_move,
        highlight,
    };

    let board_widget = Paragraph::new(board_lines(view.board, style)).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, game_over: bool, area: Rect) {
    let lines = if game_over {
        vec![Line::from("R: New game  |  Q: Quit")]
    } else {
        vec![
            Line::from("←/→ or 1-9: Select  |  Enter: Drop  |  Q: Quit"),
            Line::from(vec![
                Span::styled("C", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                Span::raw(": Cheat   "),
                Span::styled("A", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                Span::raw(": Auto move"),
            ]),
        ]
    };

    let controls = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_rows_saturate() {
        assert_eq!(board_rows(&Board::default()), 10);
        assert_eq!(board_rows(&Board::new(7, 65533)), u16::MAX);
    }
}
