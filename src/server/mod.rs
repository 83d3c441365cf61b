//! Authoritative game server: session table, player directory, and the
//! in-process implementation of the start/move/get contracts.
//!
//! Each move request is handled to completion against one session; no
//! partial state is observable mid-request. `make_move` borrowing the whole
//! server mutably is the single-writer guard against double submission.

pub mod api;
pub mod arbiter;

use std::collections::HashMap;

use crate::error::ApiError;
use crate::game::GameSession;

use api::{encode_board, GameStateDto, GameStatus, MoveResponse, PlayerDto};
use arbiter::{ColumnPicker, MoveArbiter, RandomPicker};

/// The payload contracts the client programs against. Transport is an
/// external collaborator; in this crate the server is called in-process.
pub trait GameService {
    fn get_player(&self, player_id: u32) -> Result<PlayerDto, ApiError>;
    fn start_game(&mut self, player_id: u32) -> Result<GameStateDto, ApiError>;
    fn make_move(&mut self, game_id: u32, column: usize) -> Result<MoveResponse, ApiError>;
    fn get_game(&self, game_id: u32) -> Result<GameStateDto, ApiError>;
}

/// Minimal stand-in for the external player registration store: just the
/// lookup the game API needs.
#[derive(Debug, Default)]
pub struct PlayerDirectory {
    players: HashMap<u32, PlayerDto>,
}

impl PlayerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, player: PlayerDto) {
        self.players.insert(player.player_id, player);
    }

    pub fn get(&self, player_id: u32) -> Option<&PlayerDto> {
        self.players.get(&player_id)
    }
}

pub struct GameServer<P: ColumnPicker = RandomPicker> {
    players: PlayerDirectory,
    sessions: HashMap<u32, GameSession>,
    next_game_id: u32,
    arbiter: MoveArbiter<P>,
}

impl GameServer<RandomPicker> {
    pub fn new(players: PlayerDirectory) -> Self {
        Self::with_picker(players, RandomPicker::new())
    }
}

impl<P: ColumnPicker> GameServer<P> {
    pub fn with_picker(players: PlayerDirectory, picker: P) -> Self {
        GameServer {
            players,
            sessions: HashMap::new(),
            next_game_id: 1,
            arbiter: MoveArbiter::new(picker),
        }
    }

    /// Continue the game id sequence after ids issued by earlier runs.
    /// Client recordings are keyed by server game id, so a restarted server
    /// must never reissue an id that a persisted recording already holds.
    pub fn resume_game_ids_after(&mut self, last_issued: u32) {
        self.next_game_id = self.next_game_id.max(last_issued.saturating_add(1));
    }

    pub fn session(&self, game_id: u32) -> Option<&GameSession> {
        self.sessions.get(&game_id)
    }

    fn snapshot(session: &GameSession) -> GameStateDto {
        let status = GameStatus::from_result(session.result());
        GameStateDto {
            game_id: session.id(),
            board: encode_board(session.board()),
            current_player: status.current_player_code(),
            status,
        }
    }
}

impl<P: ColumnPicker> GameService for GameServer<P> {
    fn get_player(&self, player_id: u32) -> Result<PlayerDto, ApiError> {
        self.players
            .get(player_id)
            .cloned()
            .ok_or(ApiError::PlayerNotFound(player_id))
    }

    fn start_game(&mut self, player_id: u32) -> Result<GameStateDto, ApiError> {
        if self.players.get(player_id).is_none() {
            return Err(ApiError::PlayerNotFound(player_id));
        }

        let game_id = self.next_game_id;
        self.next_game_id += 1;
        let session = GameSession::new(game_id);
        let dto = Self::snapshot(&session);
        self.sessions.insert(game_id, session);
        Ok(dto)
    }

    fn make_move(&mut self, game_id: u32, column: usize) -> Result<MoveResponse, ApiError> {
        let session = self
            .sessions
            .get_mut(&game_id)
            .ok_or(ApiError::GameNotFound(game_id))?;

        self.arbiter.apply_human_move(session, column)?;

        let status = GameStatus::from_result(session.result());
        Ok(MoveResponse {
            board: encode_board(session.board()),
            current_player: status.current_player_code(),
            status,
        })
    }

    /// Read-only snapshot fetch; terminal sessions may be loaded but never
    /// mutated.
    fn get_game(&self, game_id: u32) -> Result<GameStateDto, ApiError> {
        let session = self
            .sessions
            .get(&game_id)
            .ok_or(ApiError::GameNotFound(game_id))?;
        Ok(Self::snapshot(session))
    }
}
