//! Turning pointer gestures into legal moves.

mod candidates;
mod controller;
mod machine;

pub use candidates::{candidates, move_targets};
pub use controller::{BoardController, Outcome};
pub use machine::{BoardInteraction, Drag, GesturePhase, Offset, Resolution};
