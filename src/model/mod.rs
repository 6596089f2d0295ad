//! Internal model: format-agnostic shapes consumed by the driver and the board.

mod color;
mod moves;
mod piece;
mod square;
mod state;

pub use color::Color;
pub use moves::Move;
pub use piece::{Piece, PieceId, PieceKind};
pub use square::{FILES, InvalidSquare, RANKS, Square};
pub use state::{Board, EndCondition, GameResult, GameState, Players};
