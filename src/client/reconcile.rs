//! Snapshot-diff reconciliation. The move protocol carries only resulting
//! boards, never the moves themselves; the client learns what happened by
//! comparing the retained pre-move snapshot against the server's post-move
//! board. This is the only mechanism for discovering the server's column.

use crate::error::SyncError;
use crate::game::{Actor, Board, Cell, COLS, ROWS};

/// One move recovered from a snapshot pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferredDrop {
    pub actor: Actor,
    pub row: usize,
    pub column: usize,
}

/// Infer the moves between two snapshots of the same game.
///
/// A single move request produces at most one new cell per actor, each going
/// Empty -> Human or Empty -> Server. Anything else is a protocol
/// desynchronization and aborts reconciliation; no guessing. The human entry
/// is ordered before the server entry, matching the server's move log.
pub fn diff_boards(before: &Board, after: &Board) -> Result<Vec<InferredDrop>, SyncError> {
    let mut human: Option<InferredDrop> = None;
    let mut server: Option<InferredDrop> = None;

    for row in 0..ROWS {
        for col in 0..COLS {
            let from = before.get(row, col);
            let to = after.get(row, col);
            if from == to {
                continue;
            }

            let (slot, actor) = match (from, to) {
                (Cell::Empty, Cell::Human) => (&mut human, Actor::Human),
                (Cell::Empty, Cell::Server) => (&mut server, Actor::Server),
                _ => {
                    return Err(SyncError::IllegalTransition {
                        row,
                        col,
                        from,
                        to,
                    })
                }
            };

            if slot.is_some() {
                return Err(SyncError::AmbiguousDrop {
                    actor: actor.name(),
                    count: 2,
                });
            }
            *slot = Some(InferredDrop { actor, row, column: col });
        }
    }

    let mut drops = Vec::with_capacity(2);
    drops.extend(human);
    drops.extend(server);
    Ok(drops)
}
