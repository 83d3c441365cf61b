//! # Net Connect Four
//!
//! Connect Four against a random server opponent, with the server as the
//! single source of truth. The client never receives moves directly: each
//! move request answers with the full post-move board, and the client infers
//! what happened by diffing snapshots. Every inferred move is recorded
//! locally and can be replayed offline, without the server.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, actors, rules, session state machine
//! - [`server`] — Move arbiter, API payload contracts, in-process game server
//! - [`client`] — Snapshot-diff reconciliation, drop animations, replay
//! - [`store`] — Client-local recording store (one JSON document per game)
//! - [`ui`] — Terminal UI: live play and replay screens
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod client;
pub mod config;
pub mod error;
pub mod game;
pub mod server;
pub mod store;
pub mod ui;
