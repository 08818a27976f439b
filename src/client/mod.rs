//! Talking to the game server.
//!
//! [`GameServer`] is the seam the session drives; [`WebClient`] implements it
//! over HTTP.

mod protocol;
mod web_client;

pub use protocol::{parse_info, parse_new, parse_play, GameOutcome, Info, Play};
pub use web_client::{normalize_url, WebClient};

use crate::error::ProtocolError;
use crate::game::Board;

/// Operations offered by a Connect-4 game server.
pub trait GameServer {
    /// Board dimensions and available strategies.
    fn info(&mut self) -> Result<Info, ProtocolError>;

    /// Start a game against `strategy`. The server's game id is kept by the
    /// implementation for subsequent moves.
    fn new_game(&mut self, strategy: &str) -> Result<(), ProtocolError>;

    /// Send the user's move in 0-based `slot`. `board` is the position before
    /// the move and is used to validate the reply.
    fn play(&mut self, slot: usize, board: &Board) -> Result<Play, ProtocolError>;
}
