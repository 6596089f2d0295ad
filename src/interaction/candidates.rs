//! Pure queries over the legal move list.

use crate::model::{GameState, Move, Square};
use std::collections::BTreeSet;

/// Legal moves from `from` to `to`, in server order.
///
/// More than one result means the gesture is ambiguous (promotion choices,
/// or a castle listed next to a plain king step).
pub fn candidates(moves: &[Move], from: Square, to: Square) -> Vec<Move> {
    moves
        .iter()
        .filter(|m| m.from == from && m.to == to)
        .cloned()
        .collect()
}

/// Destination squares reachable from `from`.
pub fn move_targets(state: &GameState, from: Square) -> BTreeSet<Square> {
    state.moves_from(from).map(|m| m.to).collect()
}
