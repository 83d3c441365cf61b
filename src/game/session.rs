use std::time::{Duration, SystemTime};

use super::actor::Actor;
use super::board::Board;

/// Terminal classification of a game. `Ongoing` is the only state with
/// outgoing transitions; the other three are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    HumanWin,
    ServerWin,
    Draw,
}

/// One entry of the append-only move log. Move numbers are 1-based and
/// contiguous within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveLogEntry {
    pub move_number: u32,
    pub column: usize,
    pub actor: Actor,
}

/// A single game of one human against the server, owning its board and move
/// log. Created in `Ongoing` with an empty board; once the result is set the
/// session only changes through duration finalization.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: u32,
    board: Board,
    result: GameResult,
    started_at: SystemTime,
    duration: Option<Duration>,
    moves: Vec<MoveLogEntry>,
}

impl GameSession {
    pub fn new(id: u32) -> Self {
        GameSession {
            id,
            board: Board::new(),
            result: GameResult::Ongoing,
            started_at: SystemTime::now(),
            duration: None,
            moves: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for the arbiter. Not public: the board is owned
    /// by the session and only the move pipeline may change it.
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn is_terminal(&self) -> bool {
        self.result != GameResult::Ongoing
    }

    pub fn started_at(&self) -> SystemTime {
        self.started_at
    }

    /// Wall-clock length of the game, set when the session finalizes.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn moves(&self) -> &[MoveLogEntry] {
        &self.moves
    }

    /// Append a move to the log, returning its 1-based move number.
    pub(crate) fn log_move(&mut self, column: usize, actor: Actor) -> u32 {
        let move_number = self.moves.len() as u32 + 1;
        self.moves.push(MoveLogEntry {
            move_number,
            column,
            actor,
        });
        move_number
    }

    /// Transition to a terminal result and record the game duration.
    pub(crate) fn finalize(&mut self, result: GameResult) {
        debug_assert!(result != GameResult::Ongoing);
        debug_assert!(!self.is_terminal(), "terminal sessions never transition");
        self.result = result;
        self.duration = Some(self.started_at.elapsed().unwrap_or_default());
    }
}
