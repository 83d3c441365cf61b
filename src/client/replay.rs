//! Offline replay: drives recorded moves through the same animation pipeline
//! as live play, at a fixed inter-move interval, with no server involvement.
//! Landing rows are recomputed from a dedicated replay board (the queue's
//! display board, started empty), never from the live session.

use crate::error::SyncError;
use crate::store::RecordedMove;

use super::animation::AnimationQueue;
use super::reconcile::InferredDrop;

pub struct ReplayDriver {
    moves: Vec<RecordedMove>,
    next: usize,
    interval_ticks: u32,
    countdown: u32,
}

impl ReplayDriver {
    /// Build a driver over a game's recorded moves. `interval_ticks` is the
    /// pause between one disc landing and the next drop starting.
    pub fn new(mut moves: Vec<RecordedMove>, interval_ticks: u32) -> Self {
        moves.sort_by_key(|m| m.turn_index);
        ReplayDriver {
            moves,
            next: 0,
            interval_ticks,
            countdown: 0,
        }
    }

    /// True once every recorded move has been fed and animated out.
    pub fn is_finished(&self, queue: &AnimationQueue) -> bool {
        self.next >= self.moves.len() && !queue.is_busy()
    }

    /// Advance the replay clock by one tick, feeding the next recorded move
    /// into the queue when the previous one has landed and the inter-move
    /// pause has elapsed.
    pub fn tick(&mut self, queue: &mut AnimationQueue) -> Result<(), SyncError> {
        if queue.is_busy() || self.next >= self.moves.len() {
            return Ok(());
        }
        if self.countdown > 0 {
            self.countdown -= 1;
            return Ok(());
        }

        let mv = self.moves[self.next];
        let row = queue
            .display()
            .landing_row(mv.column)
            .ok_or(SyncError::ReplayColumnFull {
                turn_index: mv.turn_index,
                column: mv.column,
            })?;
        queue.enqueue(InferredDrop {
            actor: mv.actor,
            column: mv.column,
            row,
        });
        self.next += 1;
        self.countdown = self.interval_ticks;
        Ok(())
    }
}
