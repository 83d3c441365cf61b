//! Core Connect Four game logic: board representation, actors, win/draw
//! rules, and the per-game session state machine.

mod actor;
mod board;
pub mod rules;
mod session;

pub use actor::Actor;
pub use board::{Board, Cell, DropError, COLS, ROWS};
pub use session::{GameResult, GameSession, MoveLogEntry};
