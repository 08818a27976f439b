use crate::session::Resolution;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn split(frame: &Frame) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(5),    // Body
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());
    [chunks[0], chunks[1], chunks[2]]
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("Connect Four")
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_controls(frame: &mut Frame, text: &str, area: Rect) {
    let controls = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    frame.render_widget(controls, area);
}

fn selected_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
}

pub fn render_server_prompt(frame: &mut Frame, input: &str, message: Option<&str>) {
    let [title, body, controls] = split(frame);
    render_title(frame, title);

    let mut lines = vec![
        Line::from("Enter the game server URL:"),
        Line::from(""),
        Line::from(vec![
            Span::styled(input.to_string(), Style::default().fg(Color::Cyan)),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
    ];
    if let Some(message) = message {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Red))));
    }
    let prompt = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Server"));
    frame.render_widget(prompt, body);

    render_controls(frame, "Enter: Connect  |  Esc: Quit", controls);
}

pub fn render_strategy_select(frame: &mut Frame, strategies: &[String], selected: usize) {
    let [title, body, controls] = split(frame);
    render_title(frame, title);

    let mut lines = vec![Line::from("Select the server strategy:"), Line::from("")];
    for (i, strategy) in strategies.iter().enumerate() {
        let label = format!(" {}. {} ", i + 1, strategy);
        if i == selected {
            lines.push(Line::from(Span::styled(label, selected_style())));
        } else {
            lines.push(Line::from(label));
        }
    }
    let list = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Strategy"));
    frame.render_widget(list, body);

    render_controls(frame, "↑/↓: Select  |  Enter: Start  |  Q: Quit", controls);
}

pub fn render_error(frame: &mut Frame, message: &str, options: &[Resolution], selected: usize) {
    let [title, body, controls] = split(frame);
    render_title(frame, title);

    let mut choices = Vec::new();
    for (i, option) in options.iter().enumerate() {
        if i > 0 {
            choices.push(Span::raw("   "));
        }
        let label = format!(" {} ", option.label());
        if i == selected {
            choices.push(Span::styled(label, selected_style()));
        } else {
            choices.push(Span::raw(label));
        }
    }
    let lines = vec![
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(choices),
    ];
    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Error"));
    frame.render_widget(dialog, body);

    render_controls(frame, "←/→: Choose  |  Enter: Confirm", controls);
}
