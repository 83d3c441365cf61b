//! Win and draw detection. Wins are checked through the last-dropped cell
//! only; this is equivalent to a full-board scan because every earlier
//! position was already checked when its disc landed.

use super::board::{Board, Cell, COLS, ROWS};

/// The four axis pairs through a cell: vertical, horizontal, and both
/// diagonals. Each entry is one direction; its negation is walked too.
const AXES: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// True when the disc at (row, col) completes a run of four or more.
///
/// Counts consecutive same-cell discs outward in both directions along each
/// axis, including the cell itself. Returns false for an empty cell.
pub fn connects_four(board: &Board, row: usize, col: usize) -> bool {
    let cell = board.get(row, col);
    if cell == Cell::Empty {
        return false;
    }

    AXES.iter().any(|&(dr, dc)| {
        let run = 1
            + count_in_direction(board, cell, row, col, dr, dc)
            + count_in_direction(board, cell, row, col, -dr, -dc);
        run >= 4
    })
}

/// Number of consecutive `cell` discs strictly beyond (row, col) along one
/// direction.
fn count_in_direction(
    board: &Board,
    cell: Cell,
    row: usize,
    col: usize,
    dr: i32,
    dc: i32,
) -> usize {
    let mut count = 0;
    let mut r = row as i32 + dr;
    let mut c = col as i32 + dc;

    while r >= 0 && r < ROWS as i32 && c >= 0 && c < COLS as i32 {
        if board.get(r as usize, c as usize) != cell {
            break;
        }
        count += 1;
        r += dr;
        c += dc;
    }

    count
}

/// Draw precondition: no column can accept another disc. Callers must rule
/// out a win first; a full board that also contains a fresh four-in-a-row is
/// a win, never a draw.
pub fn is_draw(board: &Board) -> bool {
    board.is_top_row_full()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Oracle: scan the whole board for any axis-aligned run of >= 4 discs
    /// belonging to `cell`.
    fn full_board_scan(board: &Board, cell: Cell) -> bool {
        for r in 0..ROWS {
            for c in 0..COLS {
                if board.get(r, c) != cell {
                    continue;
                }
                for &(dr, dc) in &AXES {
                    let mut run = 1;
                    let mut nr = r as i32 + dr;
                    let mut nc = c as i32 + dc;
                    while nr >= 0
                        && nr < ROWS as i32
                        && nc >= 0
                        && nc < COLS as i32
                        && board.get(nr as usize, nc as usize) == cell
                    {
                        run += 1;
                        if run >= 4 {
                            return true;
                        }
                        nr += dr;
                        nc += dc;
                    }
                }
            }
        }
        false
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new();
        for col in 0..4 {
            board.drop_disc(col, Cell::Human).unwrap();
        }
        assert!(connects_four(&board, 5, 2)); // Check middle of the line
        assert!(connects_four(&board, 5, 0));
        assert!(connects_four(&board, 5, 3));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new();
        for _ in 0..4 {
            board.drop_disc(3, Cell::Server).unwrap();
        }
        assert!(connects_four(&board, 2, 3)); // The 4th disc
    }

    #[test]
    fn test_diagonal_up_win() {
        let mut board = Board::new();
        // Staircase: human discs at (5,0), (4,1), (3,2), (2,3)
        board.drop_disc(0, Cell::Human).unwrap();
        board.drop_disc(1, Cell::Server).unwrap();
        board.drop_disc(1, Cell::Human).unwrap();
        board.drop_disc(2, Cell::Server).unwrap();
        board.drop_disc(2, Cell::Server).unwrap();
        board.drop_disc(2, Cell::Human).unwrap();
        board.drop_disc(3, Cell::Server).unwrap();
        board.drop_disc(3, Cell::Server).unwrap();
        board.drop_disc(3, Cell::Server).unwrap();
        board.drop_disc(3, Cell::Human).unwrap();
        assert!(connects_four(&board, 2, 3));
        assert!(connects_four(&board, 5, 0));
    }

    #[test]
    fn test_diagonal_down_win() {
        let mut board = Board::new();
        // Staircase the other way: server discs at (2,0), (3,1), (4,2), (5,3)
        board.drop_disc(0, Cell::Human).unwrap();
        board.drop_disc(0, Cell::Human).unwrap();
        board.drop_disc(0, Cell::Human).unwrap();
        board.drop_disc(0, Cell::Server).unwrap();
        board.drop_disc(1, Cell::Human).unwrap();
        board.drop_disc(1, Cell::Human).unwrap();
        board.drop_disc(1, Cell::Server).unwrap();
        board.drop_disc(2, Cell::Human).unwrap();
        board.drop_disc(2, Cell::Server).unwrap();
        board.drop_disc(3, Cell::Server).unwrap();
        assert!(connects_four(&board, 2, 0));
        assert!(connects_four(&board, 5, 3));
    }

    #[test]
    fn test_three_in_a_row_is_not_a_win() {
        let mut board = Board::new();
        for col in 0..3 {
            board.drop_disc(col, Cell::Human).unwrap();
        }
        assert!(!connects_four(&board, 5, 1));
    }

    #[test]
    fn test_empty_cell_is_never_a_win() {
        let board = Board::new();
        assert!(!connects_four(&board, 5, 3));
    }

    #[test]
    fn test_mixed_run_is_broken() {
        let mut board = Board::new();
        board.drop_disc(0, Cell::Human).unwrap();
        board.drop_disc(1, Cell::Human).unwrap();
        board.drop_disc(2, Cell::Server).unwrap();
        board.drop_disc(3, Cell::Human).unwrap();
        board.drop_disc(4, Cell::Human).unwrap();
        assert!(!connects_four(&board, 5, 1));
        assert!(!connects_four(&board, 5, 3));
    }

    #[test]
    fn test_last_move_check_matches_full_board_scan() {
        // Play random games; after every drop the incremental check through
        // the landing cell must agree with the brute-force scanner.
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let mut board = Board::new();
            let mut actor = Cell::Human;
            loop {
                let legal = board.legal_columns();
                if legal.is_empty() {
                    break;
                }
                let col = legal[rng.random_range(0..legal.len())];
                let row = board.drop_disc(col, actor).unwrap();

                let incremental = connects_four(&board, row, col);
                let scanned = full_board_scan(&board, actor);
                assert_eq!(
                    incremental, scanned,
                    "disagreement after {:?} drop at ({}, {})",
                    actor, row, col
                );

                if incremental {
                    break;
                }
                actor = if actor == Cell::Human {
                    Cell::Server
                } else {
                    Cell::Human
                };
            }
        }
    }

    #[test]
    fn test_draw_requires_full_top_row() {
        let mut board = Board::new();
        assert!(!is_draw(&board));

        // Fill all but one column
        for col in 0..COLS - 1 {
            for _ in 0..ROWS {
                let cell = if (col + 1) % 2 == 0 { Cell::Human } else { Cell::Server };
                board.drop_disc(col, cell).unwrap();
            }
        }
        assert!(!is_draw(&board));

        for _ in 0..ROWS {
            board.drop_disc(COLS - 1, Cell::Human).unwrap();
        }
        assert!(is_draw(&board));
    }

    #[test]
    fn test_full_board_with_win_classifies_as_win() {
        // Fill the board column by column with single colors; the last drop
        // completes a vertical four while also filling the top row. Win must
        // take precedence over draw.
        let mut board = Board::new();
        for col in 0..COLS - 1 {
            let cell = if col % 2 == 0 { Cell::Human } else { Cell::Server };
            for _ in 0..ROWS {
                board.drop_disc(col, cell).unwrap();
            }
        }
        let mut last = (0, 0);
        for _ in 0..ROWS {
            let row = board.drop_disc(COLS - 1, Cell::Server).unwrap();
            last = (row, COLS - 1);
        }

        assert!(board.is_top_row_full());
        assert!(connects_four(&board, last.0, last.1));
        // The arbiter checks the win first, so is_draw is never consulted
        // here; the board still satisfies its precondition.
        assert!(is_draw(&board));
    }
}
