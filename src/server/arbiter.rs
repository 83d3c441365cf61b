//! The move arbiter applies one accepted human move and the server's random
//! reply as a single unit. The caller only ever sees the resulting board;
//! which column the server picked is never reported explicitly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ApiError;
use crate::game::rules;
use crate::game::{Actor, DropError, GameResult, GameSession, COLS};

/// Source of the server's column choice, injected so tests can rig it.
/// `pick` is only called with a non-empty legal set and must return one of
/// its members.
pub trait ColumnPicker {
    fn pick(&mut self, legal: &[usize]) -> usize;
}

/// Uniform-random picker: every legal column is equally likely.
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn new() -> Self {
        RandomPicker {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic picker for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        RandomPicker {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnPicker for RandomPicker {
    fn pick(&mut self, legal: &[usize]) -> usize {
        assert!(!legal.is_empty(), "pick called with no legal columns");
        legal[self.rng.random_range(0..legal.len())]
    }
}

/// Applies human moves to sessions and answers with the server's move.
pub struct MoveArbiter<P: ColumnPicker> {
    picker: P,
}

impl<P: ColumnPicker> MoveArbiter<P> {
    pub fn new(picker: P) -> Self {
        MoveArbiter { picker }
    }

    /// Apply a human move to `session`, then (unless the game just ended)
    /// a uniformly random legal server move.
    ///
    /// Runs to completion as one unit: a human win is terminal before the
    /// server move is ever considered, and a draw is only reported once a
    /// win has been ruled out. On any error the session is unchanged.
    pub fn apply_human_move(
        &mut self,
        session: &mut GameSession,
        column: usize,
    ) -> Result<(), ApiError> {
        if column >= COLS {
            return Err(ApiError::InvalidColumn(column));
        }
        if session.is_terminal() {
            return Err(ApiError::GameAlreadyOver(session.id()));
        }

        // Human drop. A full column is a recoverable input error.
        let row = session
            .board_mut()
            .drop_disc(column, Actor::Human.to_cell())
            .map_err(|e| match e {
                DropError::ColumnFull => ApiError::ColumnFull(column),
                DropError::InvalidColumn => ApiError::InvalidColumn(column),
            })?;
        session.log_move(column, Actor::Human);

        if rules::connects_four(session.board(), row, column) {
            session.finalize(GameResult::HumanWin);
            return Ok(());
        }
        if rules::is_draw(session.board()) {
            session.finalize(GameResult::Draw);
            return Ok(());
        }

        // Server reply. The legal set is non-empty here: an empty set would
        // mean a full top row, which the draw check above already caught.
        let legal = session.board().legal_columns();
        if legal.is_empty() {
            session.finalize(GameResult::Draw);
            return Ok(());
        }
        let server_col = self.picker.pick(&legal);
        let server_row = session
            .board_mut()
            .drop_disc(server_col, Actor::Server.to_cell())
            .map_err(|_| ApiError::ColumnFull(server_col))?;
        session.log_move(server_col, Actor::Server);

        if rules::connects_four(session.board(), server_row, server_col) {
            session.finalize(GameResult::ServerWin);
        } else if rules::is_draw(session.board()) {
            session.finalize(GameResult::Draw);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Cell};

    /// Picker that always answers with a fixed column (falling back to the
    /// first legal one when that column is unavailable).
    pub struct FixedPicker(pub usize);

    impl ColumnPicker for FixedPicker {
        fn pick(&mut self, legal: &[usize]) -> usize {
            if legal.contains(&self.0) {
                self.0
            } else {
                legal[0]
            }
        }
    }

    #[test]
    fn test_move_applies_human_then_server() {
        let mut arbiter = MoveArbiter::new(FixedPicker(6));
        let mut session = GameSession::new(1);

        arbiter.apply_human_move(&mut session, 3).unwrap();

        assert_eq!(session.board().get(5, 3), Cell::Human);
        assert_eq!(session.board().get(5, 6), Cell::Server);
        assert_eq!(session.result(), GameResult::Ongoing);

        let log = session.moves();
        assert_eq!(log.len(), 2);
        assert_eq!((log[0].move_number, log[0].column, log[0].actor), (1, 3, Actor::Human));
        assert_eq!((log[1].move_number, log[1].column, log[1].actor), (2, 6, Actor::Server));
    }

    #[test]
    fn test_vertical_human_win_skips_server_move() {
        // Human stacks column 3 four times while the server is rigged to
        // column 6. After the 4th drop the human has won and no server move
        // is evaluated.
        let mut arbiter = MoveArbiter::new(FixedPicker(6));
        let mut session = GameSession::new(1);

        for _ in 0..3 {
            arbiter.apply_human_move(&mut session, 3).unwrap();
            assert_eq!(session.result(), GameResult::Ongoing);
        }
        arbiter.apply_human_move(&mut session, 3).unwrap();

        assert_eq!(session.result(), GameResult::HumanWin);
        // 3 full exchanges plus the winning human move
        assert_eq!(session.moves().len(), 7);
        assert_eq!(session.moves().last().unwrap().actor, Actor::Human);
        // Server placed exactly three discs in column 6
        assert_eq!(session.board().get(5, 6), Cell::Server);
        assert_eq!(session.board().get(4, 6), Cell::Server);
        assert_eq!(session.board().get(3, 6), Cell::Server);
        assert_eq!(session.board().get(2, 6), Cell::Empty);

        // A 5th move is rejected without touching the session.
        let before = *session.board();
        assert_eq!(
            arbiter.apply_human_move(&mut session, 3),
            Err(ApiError::GameAlreadyOver(1))
        );
        assert_eq!(session.board(), &before);
        assert_eq!(session.moves().len(), 7);
    }

    #[test]
    fn test_server_win_finalizes_session() {
        // Rig the server onto column 6 and keep the human away from any win.
        let mut arbiter = MoveArbiter::new(FixedPicker(6));
        let mut session = GameSession::new(1);

        arbiter.apply_human_move(&mut session, 0).unwrap();
        arbiter.apply_human_move(&mut session, 1).unwrap();
        arbiter.apply_human_move(&mut session, 0).unwrap();
        assert_eq!(session.result(), GameResult::Ongoing);

        arbiter.apply_human_move(&mut session, 1).unwrap();
        assert_eq!(session.result(), GameResult::ServerWin);
        assert_eq!(session.moves().last().unwrap().actor, Actor::Server);
    }

    #[test]
    fn test_rejects_out_of_range_column() {
        let mut arbiter = MoveArbiter::new(FixedPicker(0));
        let mut session = GameSession::new(1);

        assert_eq!(
            arbiter.apply_human_move(&mut session, 7),
            Err(ApiError::InvalidColumn(7))
        );
        assert!(session.moves().is_empty());
        assert_eq!(session.board(), &Board::new());
    }

    #[test]
    fn test_rejects_full_column_leaving_session_unchanged() {
        let mut arbiter = MoveArbiter::new(FixedPicker(0));
        let mut session = GameSession::new(1);

        // Human and server alternate filling column 0 (3 exchanges = 6 discs).
        for _ in 0..3 {
            arbiter.apply_human_move(&mut session, 0).unwrap();
        }
        assert!(session.board().is_column_full(0));
        assert_eq!(session.result(), GameResult::Ongoing);

        let before = session.clone();
        assert_eq!(
            arbiter.apply_human_move(&mut session, 0),
            Err(ApiError::ColumnFull(0))
        );
        assert_eq!(session.board(), before.board());
        assert_eq!(session.moves().len(), before.moves().len());
    }

    #[test]
    fn test_human_filling_last_cell_without_win_is_draw() {
        // Hand-build a stalemate board one cell short of full, with the last
        // open cell at the top of column 6, then let the arbiter process the
        // human move that fills it. No server move can follow.
        let mut session = GameSession::new(1);
        let pattern = draw_pattern();
        for col in 0..COLS {
            let rows = if col == 6 { 1..crate::game::ROWS } else { 0..crate::game::ROWS };
            for row in rows.rev() {
                session
                    .board_mut()
                    .drop_disc(col, pattern[row][col])
                    .unwrap();
            }
        }
        assert_eq!(session.board().legal_columns(), vec![6]);

        let mut arbiter = MoveArbiter::new(FixedPicker(0));
        arbiter.apply_human_move(&mut session, 6).unwrap();

        assert_eq!(session.result(), GameResult::Draw);
        assert_eq!(session.moves().len(), 1);
        assert_eq!(session.moves()[0].actor, Actor::Human);
    }

    #[test]
    fn test_uniform_picker_reaches_every_legal_column() {
        let mut picker = RandomPicker::with_seed(7);
        let legal = vec![0, 2, 4, 6];
        let mut seen = [false; COLS];
        for _ in 0..500 {
            let col = picker.pick(&legal);
            assert!(legal.contains(&col));
            seen[col] = true;
        }
        for &col in &legal {
            assert!(seen[col], "column {} never picked", col);
        }
    }

    #[test]
    fn test_random_games_always_terminate_consistently() {
        // Full random-vs-random games must end in a terminal result with a
        // contiguous move log.
        for seed in 0..20 {
            let mut arbiter = MoveArbiter::new(RandomPicker::with_seed(seed));
            let mut session = GameSession::new(seed as u32);

            while !session.is_terminal() {
                let legal = session.board().legal_columns();
                let col = legal[seed as usize % legal.len()];
                arbiter.apply_human_move(&mut session, col).unwrap();
            }

            assert_ne!(session.result(), GameResult::Ongoing);
            for (i, entry) in session.moves().iter().enumerate() {
                assert_eq!(entry.move_number, i as u32 + 1);
            }
        }
    }

    /// A full-board cell pattern with no four-in-a-row anywhere.
    /// Columns of blocks of two, with the block phase shifted every three
    /// columns to break diagonals.
    fn draw_pattern() -> [[Cell; COLS]; crate::game::ROWS] {
        const H: Cell = Cell::Human;
        const S: Cell = Cell::Server;
        [
            [H, S, H, S, H, S, H],
            [H, S, H, S, H, S, H],
            [S, H, S, H, S, H, S],
            [S, H, S, H, S, H, S],
            [H, S, H, S, H, S, H],
            [H, S, H, S, H, S, H],
        ]
    }
}
