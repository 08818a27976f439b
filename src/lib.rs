//! # Connect Four Client
//!
//! A terminal client for a networked Connect Four server. The server plays
//! the computer's side; this crate keeps the board, renders it with Ratatui,
//! and can recommend (or play) the user's move with a line-scanning
//! heuristic.
//!
//! ## Modules
//!
//! - [`game`]: Board, tokens, win-line highlighting
//! - [`advisor`]: Move precedence, line scanning, move checker, recommendations
//! - [`client`]: Server protocol, response validation, HTTP client
//! - [`session`]: Turn controller driving server, board, and advisor
//! - [`ui`]: Terminal UI: server prompt, strategy picker, board view
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod advisor;
pub mod client;
pub mod config;
pub mod error;
pub mod game;
pub mod session;
pub mod ui;
