//! Client-local recording store: an independently maintained mirror of each
//! server game's move history, used for offline replay.

mod recorder;

pub use recorder::{GameRecorder, RecordedGame, RecordedMove};
