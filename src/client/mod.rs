//! Thin-client logic: snapshot-diff reconciliation, drop animations, and
//! offline replay. Nothing in this module talks to the server; it operates
//! purely on board snapshots and recorded moves.

pub mod animation;
pub mod reconcile;
pub mod replay;

pub use animation::{AnimationQueue, DropAnimation};
pub use reconcile::{diff_boards, InferredDrop};
pub use replay::ReplayDriver;
