//! Pointer gesture state machine.
//!
//! Owns hover, drag and choice-prompt state and nothing else. Resolving a
//! gesture yields at most one [`Move`]; submitting it is the caller's job.

use super::candidates::candidates;
use crate::model::{Board, Move, Piece, Square};
use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, instrument};

/// Pointer position relative to where the drag started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, new)]
pub struct Offset {
    /// Horizontal distance.
    pub x: i32,
    /// Vertical distance.
    pub y: i32,
}

/// A piece being dragged.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Drag {
    /// The dragged piece.
    piece: Piece,
    /// Square it was lifted from.
    from: Square,
    /// Current pointer offset, visual only.
    offset: Offset,
}

/// Where a gesture stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// Nothing lifted.
    #[default]
    Idle,
    /// A piece follows the pointer.
    Dragging(Drag),
    /// Several legal moves matched the drop; the user must pick one.
    Choosing(Vec<Move>),
}

/// What releasing the pointer produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No move: dropped off-board, on an unreachable square, or not dragging.
    Nothing,
    /// Exactly one legal move matched.
    Submit(Move),
    /// Several moves matched and a choice prompt is open.
    Choosing,
}

/// Gesture state for one board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardInteraction {
    hovered: Option<Square>,
    phase: GesturePhase,
}

impl BoardInteraction {
    /// Creates an idle interaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Square under the pointer.
    pub fn hovered(&self) -> Option<Square> {
        self.hovered
    }

    /// Current phase.
    pub fn phase(&self) -> &GesturePhase {
        &self.phase
    }

    /// The active drag, if any.
    pub fn drag(&self) -> Option<&Drag> {
        match &self.phase {
            GesturePhase::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    /// Options of the open choice prompt, if any.
    pub fn choices(&self) -> Option<&[Move]> {
        match &self.phase {
            GesturePhase::Choosing(moves) => Some(moves),
            _ => None,
        }
    }

    /// True when no drag or prompt is open.
    pub fn is_idle(&self) -> bool {
        self.phase == GesturePhase::Idle
    }

    /// The pointer entered `square`.
    pub fn pointer_enter(&mut self, square: Square) {
        self.hovered = Some(square);
    }

    /// The pointer left the board.
    pub fn pointer_leave(&mut self) {
        self.hovered = None;
    }

    /// Lifts the hovered piece. Returns true if a drag started.
    #[instrument(skip(self, board))]
    pub fn pointer_down(&mut self, board: &Board, offset: Offset) -> bool {
        if !self.is_idle() {
            return false;
        }
        let Some(from) = self.hovered else {
            return false;
        };
        let Some(piece) = board.piece_at(from) else {
            return false;
        };
        debug!(%from, piece = %piece, "Drag started");
        self.phase = GesturePhase::Dragging(Drag {
            piece: piece.clone(),
            from,
            offset,
        });
        true
    }

    /// Follows the pointer during a drag.
    pub fn pointer_move(&mut self, offset: Offset) {
        if let GesturePhase::Dragging(drag) = &mut self.phase {
            drag.offset = offset;
        }
    }

    /// Drops the dragged piece on the hovered square.
    #[instrument(skip(self, moves), fields(hovered = ?self.hovered))]
    pub fn pointer_up(&mut self, moves: &[Move]) -> Resolution {
        match &self.phase {
            GesturePhase::Idle => return Resolution::Nothing,
            // A stray release leaves the prompt open.
            GesturePhase::Choosing(_) => return Resolution::Choosing,
            GesturePhase::Dragging(_) => {}
        }
        let GesturePhase::Dragging(drag) = std::mem::take(&mut self.phase) else {
            return Resolution::Nothing;
        };
        let Some(to) = self.hovered else {
            debug!("Dropped off-board");
            return Resolution::Nothing;
        };
        let mut found = candidates(moves, drag.from, to);
        debug!(from = %drag.from, %to, count = found.len(), "Drop resolved");
        match found.len() {
            0 => Resolution::Nothing,
            1 => Resolution::Submit(found.remove(0)),
            _ => {
                self.phase = GesturePhase::Choosing(found);
                Resolution::Choosing
            }
        }
    }

    /// Picks option `index` from the open prompt.
    ///
    /// An out-of-range index leaves the prompt open.
    pub fn choose(&mut self, index: usize) -> Option<Move> {
        let GesturePhase::Choosing(options) = &self.phase else {
            return None;
        };
        let picked = options.get(index).cloned()?;
        self.phase = GesturePhase::Idle;
        Some(picked)
    }

    /// Abandons a drag or prompt without moving.
    pub fn cancel(&mut self) {
        self.phase = GesturePhase::Idle;
    }
}
