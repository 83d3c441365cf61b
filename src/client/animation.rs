//! Drop animations: the transient visual state of a disc falling from the
//! top row to its landing row, one row per scheduling tick. At most one
//! animation is active at a time; queued follow-ups start only after the
//! previous disc lands. After the last animation the display board snaps to
//! the authoritative server snapshot to eliminate any accumulated drift.

use std::collections::VecDeque;

use crate::game::{Actor, Board};

use super::reconcile::InferredDrop;

/// One disc mid-fall. Exists only while animating; destroyed on landing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropAnimation {
    pub actor: Actor,
    pub column: usize,
    pub current_row: usize,
    pub target_row: usize,
}

impl DropAnimation {
    pub fn new(actor: Actor, column: usize, target_row: usize) -> Self {
        DropAnimation {
            actor,
            column,
            current_row: 0,
            target_row,
        }
    }

    fn landed(&self) -> bool {
        self.current_row >= self.target_row
    }
}

/// Client-side rendering state: a display board plus the animation pipeline.
///
/// The display board is an independent value, never an alias of the live
/// session board or of the replay board feeding it.
#[derive(Debug, Default)]
pub struct AnimationQueue {
    display: Board,
    active: Option<DropAnimation>,
    pending: VecDeque<DropAnimation>,
    settle: Option<Board>,
    gap_ticks: u32,
    gap_remaining: u32,
}

impl AnimationQueue {
    pub fn new(display: Board) -> Self {
        Self::with_gap(display, 0)
    }

    /// A queue that pauses `gap_ticks` between one disc landing and the next
    /// queued disc starting to fall. The live client uses this so the
    /// opponent's reply does not appear glued to the player's disc; replays
    /// pace themselves and use no gap.
    pub fn with_gap(display: Board, gap_ticks: u32) -> Self {
        AnimationQueue {
            display,
            active: None,
            pending: VecDeque::new(),
            settle: None,
            gap_ticks,
            gap_remaining: 0,
        }
    }

    /// Replace the display board outright (game start, resume). Drops any
    /// in-flight animation state.
    pub fn reset(&mut self, board: Board) {
        self.display = board;
        self.active = None;
        self.pending.clear();
        self.settle = None;
        self.gap_remaining = 0;
    }

    /// The board as currently shown, without the falling disc.
    pub fn display(&self) -> &Board {
        &self.display
    }

    /// The disc currently mid-fall, for the renderer to overlay.
    pub fn falling(&self) -> Option<&DropAnimation> {
        self.active.as_ref()
    }

    /// True while any animation is active, queued, or paused in an
    /// inter-drop gap; human input is refused while busy.
    pub fn is_busy(&self) -> bool {
        self.active.is_some() || !self.pending.is_empty() || self.gap_remaining > 0
    }

    /// Queue one inferred drop.
    pub fn enqueue(&mut self, drop: InferredDrop) {
        self.pending
            .push_back(DropAnimation::new(drop.actor, drop.column, drop.row));
    }

    /// Board to snap to once every queued animation has landed.
    pub fn settle_to(&mut self, board: Board) {
        self.settle = Some(board);
    }

    /// Advance the pipeline by one scheduling tick.
    pub fn tick(&mut self) {
        if self.gap_remaining > 0 {
            self.gap_remaining -= 1;
            if self.gap_remaining == 0 {
                self.advance_queue();
            }
            return;
        }
        match self.active.as_mut() {
            Some(anim) if anim.landed() => {
                // Commit the disc into the display board. The drop recomputes
                // the landing row from the display state; the settle snapshot
                // corrects any drift regardless.
                let _ = self.display.drop_disc(anim.column, anim.actor.to_cell());
                self.active = None;
                if self.gap_ticks > 0 && !self.pending.is_empty() {
                    self.gap_remaining = self.gap_ticks;
                } else {
                    self.advance_queue();
                }
            }
            Some(anim) => {
                anim.current_row += 1;
            }
            None => self.advance_queue(),
        }
    }

    fn advance_queue(&mut self) {
        if self.active.is_some() {
            return;
        }
        match self.pending.pop_front() {
            Some(next) => self.active = Some(next),
            None => {
                if let Some(board) = self.settle.take() {
                    self.display = board;
                }
            }
        }
    }
}
