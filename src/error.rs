use std::path::PathBuf;

/// Errors raised by board mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column {0} is outside the board")]
    InvalidColumn(usize),

    #[error("column {0} is already full")]
    ColumnFull(usize),

    #[error("column {0} has no piece to remove")]
    ColumnEmpty(usize),

    #[error("the winning row contained malformed data")]
    MalformedWinLine,
}

/// Errors raised by the move advisor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdvisorError {
    /// No open column could be evaluated, meaning the board's bookkeeping
    /// disagrees with its contents.
    #[error("the game server contained malformed data")]
    MalformedState,
}

/// Rejected user input for a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Invalid slot: {input}. Slot must be in range [1,{width}]")]
    InvalidSlot { input: String, width: usize },

    #[error("This column is already full")]
    ColumnFull,
}

/// Errors that can occur while talking to the game server.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("unable to reach server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unable to parse json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("server refused request: {0}")]
    Refused(String),

    #[error("false response found, but a reason was not specified")]
    MissingReason,

    #[error("invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("the pid was not specified")]
    MissingPid,

    #[error("expecting ack_move response, but none was received")]
    MissingAck,

    #[error("game board must have a width of at least {min}, got {actual}")]
    BoardTooNarrow { min: usize, actual: usize },

    #[error("game board must have a height of at least {min}, got {actual}")]
    BoardTooShort { min: usize, actual: usize },

    #[error("game board must have a width of at most {max}, got {actual}")]
    BoardTooWide { max: usize, actual: usize },

    #[error("game board must have a height of at most {max}, got {actual}")]
    BoardTooTall { max: usize, actual: usize },

    #[error("game must have at least one strategy")]
    NoStrategies,

    #[error("invalid slot response. Slot: {0}")]
    SlotOutOfRange(i64),

    #[error("the game was specified as a win, but the winning row contained {0} values")]
    WinLineLength(usize),

    #[error("the winning row contained a negative coordinate")]
    NegativeCoordinate,

    #[error("the game was specified as a draw, but a winning row was included")]
    DrawWithRow,

    #[error("conflicting response. A winning row was specified, but the game was not marked as a win")]
    RowWithoutWin,

    #[error("mismatched response. The move was marked as a win or draw, but a computer move was included")]
    UnexpectedMove,

    #[error("expecting a computer move, but none was received")]
    MissingMove,

    #[error("expected slot {expected} did not match the received slot {received}")]
    SlotMismatch { expected: usize, received: usize },

    #[error("no game in progress")]
    NoGame,
}

/// Errors surfaced by a game session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Advisor(#[from] AdvisorError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("not connected to a server")]
    NotConnected,

    #[error("no game in progress")]
    NoGame,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
