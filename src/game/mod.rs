//! Board model: tokens, cells, and the gravity-filled grid the advisor
//! scores and the session keeps in sync with the server.

mod board;
mod token;

pub use board::{Board, Cell, MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH};
pub use token::Token;
