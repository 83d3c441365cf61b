//! Request/response payload contracts. The transport itself (HTTP framing)
//! is out of scope; these are the JSON shapes that would travel over it.
//!
//! Board wire encoding: 6 rows of 7 columns, row 0 on top, 0=empty,
//! 1=human, 2=server.

use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::game::{Board, Cell, GameResult, COLS, ROWS};

/// Game status as it appears at the API boundary. A closed enum internally;
/// the `"ongoing"`/`"player_won"`/`"server_won"`/`"draw"` strings exist only
/// in the serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[serde(rename = "ongoing")]
    Ongoing,
    #[serde(rename = "player_won")]
    PlayerWon,
    #[serde(rename = "server_won")]
    ServerWon,
    #[serde(rename = "draw")]
    Draw,
}

impl GameStatus {
    pub fn from_result(result: GameResult) -> Self {
        match result {
            GameResult::Ongoing => GameStatus::Ongoing,
            GameResult::HumanWin => GameStatus::PlayerWon,
            GameResult::ServerWin => GameStatus::ServerWon,
            GameResult::Draw => GameStatus::Draw,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != GameStatus::Ongoing
    }

    /// `currentPlayer` code carried alongside the status: 1 while ongoing or
    /// when the human won, 2 when the server won, 0 on a draw.
    pub fn current_player_code(self) -> u8 {
        match self {
            GameStatus::Ongoing | GameStatus::PlayerWon => 1,
            GameStatus::ServerWon => 2,
            GameStatus::Draw => 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGameRequest {
    pub player_id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    pub game_id: u32,
    pub column: usize,
}

/// Full game snapshot: returned by start and get.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStateDto {
    pub game_id: u32,
    pub board: Vec<Vec<u8>>,
    pub current_player: u8,
    pub status: GameStatus,
}

/// Response to a move: the post-move board and status only. The server's
/// chosen column is deliberately absent; clients recover it by diffing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResponse {
    pub board: Vec<Vec<u8>>,
    pub current_player: u8,
    pub status: GameStatus,
}

/// Player record as served by the player lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDto {
    pub player_id: u32,
    pub first_name: String,
    pub phone: String,
    pub country: String,
}

/// Encode a board as the row-major 0/1/2 matrix used on the wire.
pub fn encode_board(board: &Board) -> Vec<Vec<u8>> {
    (0..ROWS)
        .map(|row| {
            (0..COLS)
                .map(|col| match board.get(row, col) {
                    Cell::Empty => 0,
                    Cell::Human => 1,
                    Cell::Server => 2,
                })
                .collect()
        })
        .collect()
}

/// Decode a wire matrix back into a board, rejecting wrong dimensions or
/// unknown cell codes.
pub fn decode_board(matrix: &[Vec<u8>]) -> Result<Board, SyncError> {
    if matrix.len() != ROWS {
        return Err(SyncError::MalformedBoard(format!(
            "expected {} rows, got {}",
            ROWS,
            matrix.len()
        )));
    }

    let mut cells = [[Cell::Empty; COLS]; ROWS];
    for (row, values) in matrix.iter().enumerate() {
        if values.len() != COLS {
            return Err(SyncError::MalformedBoard(format!(
                "row {} has {} columns, expected {}",
                row,
                values.len(),
                COLS
            )));
        }
        for (col, &value) in values.iter().enumerate() {
            cells[row][col] = match value {
                0 => Cell::Empty,
                1 => Cell::Human,
                2 => Cell::Server,
                other => {
                    return Err(SyncError::MalformedBoard(format!(
                        "unknown cell code {} at ({}, {})",
                        other, row, col
                    )))
                }
            };
        }
    }

    Ok(Board::from_cells(cells))
}
