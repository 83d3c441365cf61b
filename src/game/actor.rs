use serde::{Deserialize, Serialize};

use super::board::Cell;

/// Who placed a disc: the remote human player or the server opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    Human,
    Server,
}

impl Actor {
    /// Convert actor to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Actor::Human => Cell::Human,
            Actor::Server => Cell::Server,
        }
    }

    /// Lowercase token used in serialized payloads and error text.
    pub fn name(self) -> &'static str {
        match self {
            Actor::Human => "human",
            Actor::Server => "server",
        }
    }
}
