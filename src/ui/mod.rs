//! Terminal UI: the client game screen for live play against the server and
//! for offline replay of recorded games.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;
