//! Terminal UI: server prompt, strategy picker, and the board screen.

mod app;
mod board_widget;
mod game_view;
mod menu_view;

pub use app::{App, Connector};
