use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::game::Actor;
use crate::server::api::GameStatus;

/// One move of a recorded game. Turn indices are 0-based and unique within
/// a recording; they mirror the server's move log but are re-derived by the
/// client through snapshot diffing, never transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedMove {
    pub turn_index: u32,
    pub column: usize,
    pub actor: Actor,
}

/// Client-local mirror of one server game, keyed uniquely by the server's
/// game id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedGame {
    pub local_id: u32,
    pub server_game_id: u32,
    pub player_id: u32,
    pub player_name: String,
    pub started_at_unix: u64,
    pub duration_seconds: Option<u64>,
    pub result: GameStatus,
    pub moves: Vec<RecordedMove>,
}

/// Append-only store of recorded games, one JSON document per game under a
/// data directory. The full set is held in memory; every mutation is
/// persisted through a temp file and an atomic rename.
pub struct GameRecorder {
    dir: PathBuf,
    games: Vec<RecordedGame>,
    next_local_id: u32,
}

impl GameRecorder {
    /// Open (or create) a recording directory and load every recording.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir)?;

        let mut games: Vec<RecordedGame> = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let content = fs::read_to_string(&path).map_err(|e| StoreError::RecordRead {
                path: path.clone(),
                source: e,
            })?;
            let game: RecordedGame =
                serde_json::from_str(&content).map_err(|e| StoreError::RecordParse {
                    path: path.clone(),
                    source: e,
                })?;
            games.push(game);
        }

        let next_local_id = games.iter().map(|g| g.local_id).max().unwrap_or(0) + 1;
        Ok(GameRecorder {
            dir: dir.to_path_buf(),
            games,
            next_local_id,
        })
    }

    /// Create the recording for a server game id, or return the existing
    /// local id. Idempotent: the server game id is a uniqueness key.
    pub fn ensure_recording(
        &mut self,
        server_game_id: u32,
        player_id: u32,
        player_name: &str,
        started_at_unix: u64,
    ) -> Result<u32, StoreError> {
        if let Some(existing) = self.find_by_server_game_id(server_game_id) {
            return Ok(existing);
        }

        let local_id = self.next_local_id;
        self.next_local_id += 1;
        let game = RecordedGame {
            local_id,
            server_game_id,
            player_id,
            player_name: player_name.to_string(),
            started_at_unix,
            duration_seconds: None,
            result: GameStatus::Ongoing,
            moves: Vec::new(),
        };
        self.persist(&game)?;
        self.games.push(game);
        Ok(local_id)
    }

    /// Append one move. A repeated turn index is a consistency error, never
    /// silently ignored.
    pub fn append_move(
        &mut self,
        local_id: u32,
        turn_index: u32,
        column: usize,
        actor: Actor,
    ) -> Result<(), StoreError> {
        let game = self.game_mut(local_id)?;
        if game.moves.iter().any(|m| m.turn_index == turn_index) {
            return Err(StoreError::DuplicateTurnIndex {
                local_id,
                turn_index,
            });
        }
        game.moves.push(RecordedMove {
            turn_index,
            column,
            actor,
        });

        let snapshot = game.clone();
        self.persist(&snapshot)
    }

    /// Record the terminal result and duration. Calling again with identical
    /// values is a no-op (a client retry after a dropped acknowledgment);
    /// a conflicting second finish is an error.
    pub fn finish(
        &mut self,
        local_id: u32,
        result: GameStatus,
        duration_seconds: u64,
    ) -> Result<(), StoreError> {
        let game = self.game_mut(local_id)?;
        if game.result.is_terminal() {
            if game.result == result && game.duration_seconds == Some(duration_seconds) {
                return Ok(());
            }
            return Err(StoreError::FinishConflict(local_id));
        }

        game.result = result;
        game.duration_seconds = Some(duration_seconds);
        let snapshot = game.clone();
        self.persist(&snapshot)
    }

    /// All moves of a recording, ordered by turn index.
    pub fn load_moves(&self, local_id: u32) -> Result<Vec<RecordedMove>, StoreError> {
        let game = self.game(local_id)?;
        let mut moves = game.moves.clone();
        moves.sort_by_key(|m| m.turn_index);
        Ok(moves)
    }

    /// Highest server game id seen across all recordings, 0 when empty.
    /// The server's id sequence must be resumed past this on startup so a
    /// new game never collides with a persisted recording.
    pub fn max_server_game_id(&self) -> u32 {
        self.games
            .iter()
            .map(|g| g.server_game_id)
            .max()
            .unwrap_or(0)
    }

    pub fn find_by_server_game_id(&self, server_game_id: u32) -> Option<u32> {
        self.games
            .iter()
            .find(|g| g.server_game_id == server_game_id)
            .map(|g| g.local_id)
    }

    pub fn get(&self, local_id: u32) -> Result<&RecordedGame, StoreError> {
        self.game(local_id)
    }

    /// Recordings for one player, most recent first.
    pub fn list_games_for_player(&self, player_id: u32) -> Vec<&RecordedGame> {
        let mut games: Vec<&RecordedGame> = self
            .games
            .iter()
            .filter(|g| g.player_id == player_id)
            .collect();
        games.sort_by(|a, b| b.started_at_unix.cmp(&a.started_at_unix));
        games
    }

    fn game(&self, local_id: u32) -> Result<&RecordedGame, StoreError> {
        self.games
            .iter()
            .find(|g| g.local_id == local_id)
            .ok_or(StoreError::UnknownGame(local_id))
    }

    fn game_mut(&mut self, local_id: u32) -> Result<&mut RecordedGame, StoreError> {
        self.games
            .iter_mut()
            .find(|g| g.local_id == local_id)
            .ok_or(StoreError::UnknownGame(local_id))
    }

    fn persist(&self, game: &RecordedGame) -> Result<(), StoreError> {
        let file_name = format!("game_{:07}.json", game.server_game_id);
        let tmp_path = self.dir.join(format!("{}.tmp", file_name));
        let final_path = self.dir.join(file_name);

        let json = serde_json::to_string_pretty(game)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &final_path)?;
        Ok(())
    }
}
