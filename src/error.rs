use std::path::PathBuf;

use crate::game::{Cell, COLS};

/// Errors returned by the game service contracts. All of these are
/// recoverable input or state errors; the session and board are left
/// unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("player {0} not found")]
    PlayerNotFound(u32),

    #[error("game {0} not found")]
    GameNotFound(u32),

    #[error("column {0} is out of range (0..{cols})", cols = COLS)]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("game {0} is already over")]
    GameAlreadyOver(u32),
}

/// Protocol desynchronization detected while reconciling two board
/// snapshots. Never guessed around: reconciliation of that move aborts and
/// the error is surfaced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("cell ({row}, {col}) changed {from:?} -> {to:?}, which is not a disc drop")]
    IllegalTransition {
        row: usize,
        col: usize,
        from: Cell,
        to: Cell,
    },

    #[error("snapshot diff contains {count} new {actor} cells, expected at most one")]
    AmbiguousDrop { actor: &'static str, count: usize },

    #[error("malformed board snapshot: {0}")]
    MalformedBoard(String),

    #[error("replayed move {turn_index} targets full column {column}")]
    ReplayColumnFull { turn_index: u32, column: usize },
}

/// Errors from the client-local recording store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no recorded game with local id {0}")]
    UnknownGame(u32),

    #[error("turn index {turn_index} already recorded for local game {local_id}")]
    DuplicateTurnIndex { local_id: u32, turn_index: u32 },

    #[error("local game {0} already finished with a different result")]
    FinishConflict(u32),

    #[error("failed to read recording from {path}: {source}")]
    RecordRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse recording from {path}: {source}")]
    RecordParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors while bringing up the client: starting a live game or locating a
/// recording to replay.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("no local recording for server game {0}")]
    RecordingNotFound(u32),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
