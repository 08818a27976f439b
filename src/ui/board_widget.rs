use crate::game::{Board, Token};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// How the board should be decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardStyle {
    /// Column under the cursor; `None` hides the cursor.
    pub selected: Option<usize>,
    pub last_computer_move: Option<usize>,
    /// Background of highlighted (winning line) cells.
    pub highlight: Color,
}

fn token_color(token: Token) -> Color {
    match token {
        Token::Empty => Color::DarkGray,
        Token::Player => Color::Yellow,
        Token::Computer => Color::Red,
    }
}

/// Board as styled lines: column numbers, framed grid, cursor row.
pub fn board_lines(board: &Board, style: BoardStyle) -> Vec<Line<'static>> {
    let width = board.width();
    let mut lines = Vec::with_capacity(board.height() + 3);

    let mut col_line = vec![Span::raw("   ")];
    for col in 0..width {
        let label = format!("{:^3}", col + 1);
        if style.selected == Some(col) {
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
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    let rule = "═".repeat(width * 3 + 1);
    lines.push(Line::from(format!("  ╔{rule}╗")));

    // Top of the stack in the computer's last column.
    let last_cell = style
        .last_computer_move
        .filter(|&col| col < width && board.column_height(col) < board.height())
        .map(|col| (board.column_height(col), col));

    for row in 0..board.height() {
        let mut spans = vec![Span::raw("  ║")];
        for col in 0..width {
            let cell = board.cell(row, col);
            let mut cell_style = Style::default().fg(token_color(cell.token));
            if cell.highlighted {
                cell_style = cell_style
                    .fg(Color::Black)
                    .bg(style.highlight)
                    .add_modifier(Modifier::BOLD);
            } else if last_cell == Some((row, col)) {
                cell_style = cell_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            spans.push(Span::styled(format!(" {} ", cell.token.symbol()), cell_style));
        }
        spans.push(Span::raw(" ║"));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    let mut indicator = vec![Span::raw("   ")];
    for col in 0..width {
        if style.selected == Some(col) {
            indicator.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator.push(Span::raw("   "));
        }
    }
    indicator.push(Span::raw("  "));
    lines.push(Line::from(indicator));

    lines
}
