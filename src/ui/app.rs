use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::error;
use ratatui::{backend::Backend, Frame, Terminal};

use super::game_view::{self, GameView};
use super::menu_view;
use crate::client::{normalize_url, GameOutcome, GameServer};
use crate::error::{BoardError, ProtocolError, SessionError};
use crate::session::{Resolution, Session, Submission, TurnReport};

/// Builds a server handle for a normalized URL.
pub type Connector<S> = Box<dyn FnMut(&str) -> Result<S, ProtocolError>>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Screen {
    ServerPrompt,
    StrategySelect {
        selected: usize,
    },
    Playing,
    GameOver,
    Error {
        message: String,
        options: &'static [Resolution],
        selected: usize,
    },
}

pub struct App<S: GameServer> {
    connector: Connector<S>,
    session: Option<Session<S>>,
    screen: Screen,
    url_input: String,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl<S: GameServer> App<S> {
    pub fn new(default_url: &str, connector: Connector<S>) -> Self {
        App {
            connector,
            session: None,
            screen: Screen::ServerPrompt,
            url_input: default_url.to_string(),
            selected_column: 0,
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::ServerPrompt => self.prompt_key(key.code),
            Screen::StrategySelect { selected } => self.strategy_key(key.code, selected),
            Screen::Playing => self.playing_key(key.code),
            Screen::GameOver => self.game_over_key(key.code),
            Screen::Error {
                options, selected, ..
            } => self.error_key(key.code, options, selected),
        }
    }

    fn prompt_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => self.connect(),
            KeyCode::Backspace => {
                self.url_input.pop();
            }
            KeyCode::Char(c) => self.url_input.push(c),
            _ => {}
        }
    }

    fn strategy_key(&mut self, code: KeyCode, selected: usize) {
        let count = self.session.as_ref().map_or(0, |s| s.strategies().len());
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up if selected > 0 => {
                self.screen = Screen::StrategySelect {
                    selected: selected - 1,
                };
            }
            KeyCode::Down if selected + 1 < count => {
                self.screen = Screen::StrategySelect {
                    selected: selected + 1,
                };
            }
            KeyCode::Enter => self.start(selected),
            _ => {}
        }
    }

    fn playing_key(&mut self, code: KeyCode) {
        let width = self
            .session
            .as_ref()
            .and_then(|s| s.board())
            .map_or(0, |b| b.width());
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left if self.selected_column > 0 => self.selected_column -= 1,
            KeyCode::Right if self.selected_column + 1 < width => self.selected_column += 1,
            KeyCode::Char(c @ '1'..='9') => {
                let col = c as usize - '1' as usize;
                if col < width {
                    self.selected_column = col;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let slot = (self.selected_column + 1).to_string();
                self.submit(&slot);
            }
            KeyCode::Char('c') => self.submit("cheat"),
            KeyCode::Char('a') => self.auto_move(),
            _ => {}
        }
    }

    fn game_over_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => self.restart(),
            _ => {}
        }
    }

    fn error_key(&mut self, code: KeyCode, options: &'static [Resolution], selected: usize) {
        let moved = match code {
            KeyCode::Left | KeyCode::Up => selected.saturating_sub(1),
            KeyCode::Right | KeyCode::Down => (selected + 1).min(options.len().saturating_sub(1)),
            KeyCode::Enter => {
                if let Some(&choice) = options.get(selected) {
                    self.resolve(choice);
                }
                return;
            }
            _ => return,
        };
        if let Screen::Error { selected, .. } = &mut self.screen {
            *selected = moved;
        }
    }

    fn connect(&mut self) {
        let url = match normalize_url(&self.url_input) {
            Ok(url) => url,
            Err(err) => {
                self.message = Some(err.to_string());
                return;
            }
        };
        self.url_input = url.clone();
        self.session = None;

        let connected = (self.connector)(&url)
            .map_err(SessionError::from)
            .and_then(|server| {
                let mut session = Session::new(server);
                session.connect()?;
                Ok(session)
            });
        match connected {
            Ok(session) => {
                self.session = Some(session);
                self.message = None;
                self.screen = Screen::StrategySelect { selected: 0 };
            }
            Err(err) => self.show_error(&err),
        }
    }

    fn start(&mut self, index: usize) {
        let Some(session) = self.session.as_mut() else {
            self.screen = Screen::ServerPrompt;
            return;
        };
        let Some(strategy) = session.strategies().get(index).cloned() else {
            return;
        };
        match session.start(&strategy) {
            Ok(()) => self.begin_play(),
            Err(err) => self.show_error(&err),
        }
    }

    fn restart(&mut self) {
        let Some(session) = self.session.as_mut() else {
            self.screen = Screen::ServerPrompt;
            return;
        };
        match session.restart() {
            Ok(()) => self.begin_play(),
            Err(err) => self.show_error(&err),
        }
    }

    fn begin_play(&mut self) {
        let width = self
            .session
            .as_ref()
            .and_then(|s| s.board())
            .map_or(0, |b| b.width());
        self.selected_column = width / 2;
        self.message = None;
        self.screen = Screen::Playing;
    }

    fn submit(&mut self, input: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.submit(input) {
            Ok(Submission::Played(report)) => self.after_turn(report),
            Ok(Submission::Advised(recommendation)) => {
                self.selected_column = recommendation.column;
                self.message = Some(recommendation.to_string());
            }
            Err(err) => self.turn_failed(err),
        }
    }

    fn auto_move(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.auto_move() {
            Ok((_, report)) => self.after_turn(report),
            Err(err) => self.turn_failed(err),
        }
    }

    fn after_turn(&mut self, report: TurnReport) {
        match report.outcome {
            Some(outcome) => {
                let board_full = self
                    .session
                    .as_ref()
                    .and_then(|s| s.board())
                    .is_some_and(|b| b.is_full());
                self.message = Some(
                    match outcome {
                        GameOutcome::Won => "You connected four!",
                        GameOutcome::Lost => "The computer connected four.",
                        GameOutcome::Draw if board_full => "The board is full.",
                        GameOutcome::Draw => "The server declared a draw.",
                    }
                    .to_string(),
                );
                self.screen = Screen::GameOver;
            }
            None => {
                self.message = report
                    .computer_move
                    .map(|col| format!("Computer played slot {}", col + 1));
            }
        }
    }

    /// Input mistakes stay on the board screen; anything else interrupts
    /// the game.
    fn turn_failed(&mut self, err: SessionError) {
        match err {
            SessionError::Selection(_)
            | SessionError::Board(BoardError::ColumnFull(_) | BoardError::InvalidColumn(_)) => {
                self.message = Some(err.to_string());
            }
            err => self.show_error(&err),
        }
    }

    fn show_error(&mut self, err: &SessionError) {
        error!("{err}");
        let options = match &self.session {
            Some(session) => session.resolutions(),
            None => Resolution::CONNECTING,
        };
        self.screen = Screen::Error {
            message: err.to_string(),
            options,
            selected: 0,
        };
    }

    fn resolve(&mut self, choice: Resolution) {
        self.message = None;
        match choice {
            Resolution::Retry => {
                self.screen = Screen::ServerPrompt;
                self.connect();
            }
            Resolution::Restart => {
                self.screen = if self.session.as_ref().is_some_and(|s| s.info().is_some()) {
                    Screen::StrategySelect { selected: 0 }
                } else {
                    Screen::ServerPrompt
                };
            }
            Resolution::Quit => self.should_quit = true,
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        match &self.screen {
            Screen::ServerPrompt => {
                menu_view::render_server_prompt(frame, &self.url_input, self.message.as_deref());
            }
            Screen::StrategySelect { selected } => {
                let strategies = self
                    .session
                    .as_ref()
                    .map(|s| s.strategies())
                    .unwrap_or_default();
                menu_view::render_strategy_select(frame, strategies, *selected);
            }
            Screen::Playing | Screen::GameOver => {
                let Some(session) = self.session.as_ref() else {
                    return;
                };
                let Some(board) = session.board() else {
                    return;
                };
                let view = GameView {
                    board,
                    strategy: session.strategy().unwrap_or_default(),
                    selected_column: self.selected_column,
                    last_computer_move: session.last_computer_move(),
                    outcome: session.outcome(),
                    message: self.message.as_deref(),
                };
                game_view::render(frame, &view);
            }
            Screen::Error {
                message,
                options,
                selected,
            } => menu_view::render_error(frame, message, options, *selected),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::client::{Info, Play};
    use crate::game::{Board, Token};

    struct TestServer {
        replies: VecDeque<Play>,
    }

    impl GameServer for TestServer {
        fn info(&mut self) -> Result<Info, ProtocolError> {
            Ok(Info {
                width: 7,
                height: 6,
                strategies: vec!["Smart".into(), "Random".into()],
            })
        }

        fn new_game(&mut self, _strategy: &str) -> Result<(), ProtocolError> {
            Ok(())
        }

        fn play(&mut self, _slot: usize, _board: &Board) -> Result<Play, ProtocolError> {
            self.replies.pop_front().ok_or(ProtocolError::MissingAck)
        }
    }

    fn app(replies: Vec<Play>) -> App<TestServer> {
        App::new(
            "http://localhost:8080/",
            Box::new(move |_url: &str| {
                Ok(TestServer {
                    replies: replies.clone().into(),
                })
            }),
        )
    }

    fn press(app: &mut App<TestServer>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn playing(replies: Vec<Play>) -> App<TestServer> {
        let mut app = app(replies);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Playing);
        app
    }

    fn reply(player: usize, computer: usize) -> Play {
        Play {
            player_move: player,
            computer_move: Some(computer),
            outcome: None,
            win_line: vec![],
        }
    }

    #[test]
    fn connect_moves_to_strategy_select() {
        let mut app = app(vec![]);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::StrategySelect { selected: 0 });
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.screen, Screen::StrategySelect { selected: 1 });
    }

    #[test]
    fn invalid_url_stays_on_prompt() {
        let mut app = app(vec![]);
        app.url_input.clear();
        for c in "nowhere".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::ServerPrompt);
        assert_eq!(app.message.as_deref(), Some("invalid server URL: nowhere"));
    }

    #[test]
    fn failed_connection_offers_retry_and_quit() {
        let mut app: App<TestServer> = App::new(
            "http://localhost:8080/",
            Box::new(|url: &str| Err(ProtocolError::InvalidUrl(url.to_string()))),
        );
        press(&mut app, KeyCode::Enter);
        let Screen::Error { options, .. } = &app.screen else {
            panic!("expected error screen, got {:?}", app.screen);
        };
        assert_eq!(*options, Resolution::CONNECTING);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert!(app.should_quit);
    }

    #[test]
    fn drop_plays_selected_column() {
        let mut app = playing(vec![reply(4, 0)]);
        assert_eq!(app.selected_column, 3);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        let board = app.session.as_ref().and_then(|s| s.board()).unwrap();
        assert_eq!(board.token_at(5, 4), Token::Player);
        assert_eq!(board.token_at(5, 0), Token::Computer);
        assert_eq!(app.message.as_deref(), Some("Computer played slot 1"));
    }

    #[test]
    fn digit_jumps_to_column() {
        let mut app = playing(vec![]);
        press(&mut app, KeyCode::Char('7'));
        assert_eq!(app.selected_column, 6);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.selected_column, 6);
    }

    #[test]
    fn cheat_shows_advice() {
        let mut app = playing(vec![]);
        press(&mut app, KeyCode::Char('c'));
        let message = app.message.clone().unwrap();
        assert!(message.starts_with("Recommended move: "), "{message}");
        assert_eq!(app.screen, Screen::Playing);
    }

    #[test]
    fn server_failure_mid_game_offers_restart() {
        let mut app = playing(vec![]);
        press(&mut app, KeyCode::Enter);
        let Screen::Error { options, .. } = &app.screen else {
            panic!("expected error screen, got {:?}", app.screen);
        };
        assert_eq!(*options, Resolution::CONNECTED);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::StrategySelect { selected: 0 });
    }

    #[test]
    fn win_ends_game_and_r_restarts() {
        let win = Play {
            player_move: 3,
            computer_move: None,
            outcome: Some(GameOutcome::Won),
            win_line: vec![(3, 5), (3, 4), (3, 3), (3, 2)],
        };
        let mut app = playing(vec![reply(3, 0), reply(3, 0), reply(3, 0), win]);
        for _ in 0..4 {
            press(&mut app, KeyCode::Enter);
        }
        assert_eq!(app.screen, Screen::GameOver);
        assert_eq!(app.message.as_deref(), Some("You connected four!"));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.screen, Screen::Playing);
        assert_eq!(app.session.as_ref().and_then(|s| s.board()), Some(&Board::new(7, 6)));
    }

    #[test]
    fn draw_message_depends_on_a_full_board() {
        let draw = Play {
            player_move: 0,
            computer_move: None,
            outcome: Some(GameOutcome::Draw),
            win_line: vec![],
        };
        let mut app = playing(vec![draw]);
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::GameOver);
        assert_eq!(app.message.as_deref(), Some("The server declared a draw."));
    }

    #[test]
    fn draw_on_a_full_board() {
        // Three turns per column; the last one fills column 7.
        let mut replies = Vec::new();
        for col in 0..6 {
            for _ in 0..3 {
                replies.push(reply(col, col));
            }
        }
        for _ in 0..2 {
            replies.push(reply(6, 6));
        }
        replies.push(Play {
            player_move: 6,
            computer_move: Some(6),
            outcome: Some(GameOutcome::Draw),
            win_line: vec![],
        });
        let mut app = playing(replies);
        for col in 0..7 {
            press(&mut app, KeyCode::Char(char::from(b'1' + col)));
            for _ in 0..3 {
                press(&mut app, KeyCode::Enter);
            }
        }
        assert_eq!(app.screen, Screen::GameOver);
        assert_eq!(app.message.as_deref(), Some("The board is full."));
    }
}
