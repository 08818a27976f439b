//! Turn controller tying the server, the board and the advisor together.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::Rng;

use crate::advisor::{Advisor, MoveSelection, Recommendation};
use crate::client::{GameOutcome, GameServer, Info, Play};
use crate::error::{BoardError, SessionError};
use crate::game::{Board, Token};

/// What a completed turn did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub player_move: usize,
    pub computer_move: Option<usize>,
    pub outcome: Option<GameOutcome>,
}

/// Result of submitting a line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Played(TurnReport),
    Advised(Recommendation),
}

/// Ways out of a failed operation, offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Repeat the connection attempt.
    Retry,
    /// Abandon the game and pick a strategy again.
    Restart,
    Quit,
}

impl Resolution {
    /// Choices before a server has been reached.
    pub const CONNECTING: &'static [Resolution] = &[Resolution::Retry, Resolution::Quit];
    /// Choices once a server is known.
    pub const CONNECTED: &'static [Resolution] = &[Resolution::Restart, Resolution::Quit];

    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Retry => "Retry",
            Resolution::Restart => "Restart",
            Resolution::Quit => "Quit",
        }
    }
}

struct Game {
    strategy: String,
    board: Board,
    last_computer_move: Option<usize>,
    outcome: Option<GameOutcome>,
}

pub struct Session<S, R = StdRng> {
    server: S,
    advisor: Advisor<R>,
    info: Option<Info>,
    game: Option<Game>,
}

impl<S: GameServer> Session<S, StdRng> {
    pub fn new(server: S) -> Self {
        Session::with_advisor(server, Advisor::new())
    }
}

impl<S: GameServer, R: Rng> Session<S, R> {
    pub fn with_advisor(server: S, advisor: Advisor<R>) -> Self {
        Session {
            server,
            advisor,
            info: None,
            game: None,
        }
    }

    /// Fetch the server's board size and strategies.
    pub fn connect(&mut self) -> Result<&Info, SessionError> {
        self.game = None;
        self.info = None;
        let info = self.server.info()?;
        info.validate()?;
        Ok(self.info.insert(info))
    }

    pub fn info(&self) -> Option<&Info> {
        self.info.as_ref()
    }

    pub fn strategies(&self) -> &[String] {
        self.info
            .as_ref()
            .map(|info| info.strategies.as_slice())
            .unwrap_or_default()
    }

    /// Begin a new game against `strategy` on an empty board.
    pub fn start(&mut self, strategy: &str) -> Result<(), SessionError> {
        let info = self.info.as_ref().ok_or(SessionError::NotConnected)?;
        let board = Board::new(info.width, info.height);
        self.server.new_game(strategy)?;
        info!("new game against {strategy}");
        self.game = Some(Game {
            strategy: strategy.to_string(),
            board,
            last_computer_move: None,
            outcome: None,
        });
        Ok(())
    }

    /// Start over against the same strategy.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        let strategy = self
            .game
            .as_ref()
            .map(|game| game.strategy.clone())
            .ok_or(SessionError::NoGame)?;
        self.start(&strategy)
    }

    pub fn board(&self) -> Option<&Board> {
        self.game.as_ref().map(|game| &game.board)
    }

    pub fn strategy(&self) -> Option<&str> {
        self.game.as_ref().map(|game| game.strategy.as_str())
    }

    pub fn last_computer_move(&self) -> Option<usize> {
        self.game.as_ref().and_then(|game| game.last_computer_move)
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.game.as_ref().and_then(|game| game.outcome)
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// What the user can do after a failure. Before a server has been reached
    /// the only useful step is to try again.
    pub fn resolutions(&self) -> &'static [Resolution] {
        if self.info.is_none() {
            Resolution::CONNECTING
        } else {
            Resolution::CONNECTED
        }
    }

    /// Parse user input against the current board.
    pub fn select(&self, input: &str) -> Result<MoveSelection, SessionError> {
        let board = self.board().ok_or(SessionError::NoGame)?;
        Ok(MoveSelection::parse(input, board)?)
    }

    /// Parse and act on user input: play the slot or ask for advice.
    pub fn submit(&mut self, input: &str) -> Result<Submission, SessionError> {
        match self.select(input)? {
            MoveSelection::Slot(col) => self.play(col).map(Submission::Played),
            MoveSelection::Cheat => self.advise().map(Submission::Advised),
        }
    }

    /// Send the user's move, then apply both pieces and any winning line.
    /// The board is left untouched if the reply cannot be applied.
    pub fn play(&mut self, column: usize) -> Result<TurnReport, SessionError> {
        let game = active(&mut self.game)?;
        if column >= game.board.width() {
            return Err(BoardError::InvalidColumn(column).into());
        }
        if game.board.is_column_full(column) {
            return Err(BoardError::ColumnFull(column).into());
        }

        let play = self.server.play(column, &game.board)?;
        let board = apply_play(&game.board, &play).inspect_err(|err| {
            warn!("rejected server reply for column {column}: {err}");
        })?;

        game.board = board;
        game.last_computer_move = play.computer_move;
        game.outcome = play.outcome;
        if let Some(outcome) = play.outcome {
            info!("game against {} ended: {outcome:?}", game.strategy);
        }
        Ok(TurnReport {
            player_move: play.player_move,
            computer_move: play.computer_move,
            outcome: play.outcome,
        })
    }

    /// Recommend a move for the user without playing it.
    pub fn advise(&mut self) -> Result<Recommendation, SessionError> {
        let game = active(&mut self.game)?;
        Ok(self.advisor.recommend(&mut game.board, Token::Player)?)
    }

    /// Play the advisor's recommendation for the user.
    pub fn auto_move(&mut self) -> Result<(Recommendation, TurnReport), SessionError> {
        let recommendation = self.advise()?;
        info!("auto move: {recommendation}");
        let report = self.play(recommendation.column)?;
        Ok((recommendation, report))
    }
}

fn active(game: &mut Option<Game>) -> Result<&mut Game, SessionError> {
    match game.as_mut() {
        Some(game) if game.outcome.is_none() => Ok(game),
        _ => Err(SessionError::NoGame),
    }
}

fn apply_play(board: &Board, play: &Play) -> Result<Board, BoardError> {
    let mut next = board.clone();
    next.add_piece(play.player_move, Token::Player)?;
    if let Some(col) = play.computer_move {
        next.add_piece(col, Token::Computer)?;
    }
    if matches!(play.outcome, Some(GameOutcome::Won | GameOutcome::Lost)) {
        next.highlight(&play.win_line)?;
    }
    Ok(next)
}
