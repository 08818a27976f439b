//! Single-ply move advisor. Each open column is ranked by how close the
//! lines through its landing cell come to four, for the mover and for the
//! opponent.

pub mod checker;
mod precedence;
mod records;
pub mod scanner;
mod selection;
mod strategy;

pub use checker::{CheckerSettings, Evaluation};
pub use precedence::Precedence;
pub use records::{MoveRecords, Record, RecordKind};
pub use scanner::{Axis, LineScan};
pub use selection::MoveSelection;
pub use strategy::{Advice, Advisor, Recommendation};
