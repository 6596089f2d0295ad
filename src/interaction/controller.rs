//! Binds a [`BoardInteraction`] to a [`Game`] and performs submissions.

use super::candidates::move_targets;
use super::machine::{BoardInteraction, Offset, Resolution};
use crate::driver::{DriverError, Game};
use crate::model::{Move, Square};
use std::collections::BTreeSet;
use tracing::{info, instrument, warn};

/// What a finished gesture amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Outcome {
    /// Nothing was submitted.
    Idle,
    /// A choice prompt is waiting for the user.
    Choosing,
    /// The server accepted the move.
    Accepted,
    /// The server refused the move, or the game is over.
    Refused,
}

/// Gesture handling over a live game.
#[derive(Debug)]
pub struct BoardController<G: Game> {
    game: G,
    interaction: BoardInteraction,
}

impl<G: Game> BoardController<G> {
    /// Creates an idle controller.
    pub fn new(game: G) -> Self {
        Self {
            game,
            interaction: BoardInteraction::new(),
        }
    }

    /// The underlying game.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Gesture state, for rendering.
    pub fn interaction(&self) -> &BoardInteraction {
        &self.interaction
    }

    /// See [`BoardInteraction::pointer_enter`].
    pub fn pointer_enter(&mut self, square: Square) {
        self.interaction.pointer_enter(square);
    }

    /// See [`BoardInteraction::pointer_leave`].
    pub fn pointer_leave(&mut self) {
        self.interaction.pointer_leave();
    }

    /// Lifts the hovered piece from the current board.
    pub fn pointer_down(&mut self, offset: Offset) -> bool {
        let state = self.game.state();
        self.interaction.pointer_down(state.board(), offset)
    }

    /// See [`BoardInteraction::pointer_move`].
    pub fn pointer_move(&mut self, offset: Offset) {
        self.interaction.pointer_move(offset);
    }

    /// Drops the dragged piece and submits the move when it is unambiguous.
    #[instrument(skip(self))]
    pub async fn pointer_up(&mut self) -> Result<Outcome, DriverError> {
        let state = self.game.state();
        match self.interaction.pointer_up(state.moves()) {
            Resolution::Nothing => Ok(Outcome::Idle),
            Resolution::Choosing => Ok(Outcome::Choosing),
            Resolution::Submit(mv) => self.submit(mv).await,
        }
    }

    /// Submits option `index` of the open prompt.
    #[instrument(skip(self))]
    pub async fn choose(&mut self, index: usize) -> Result<Outcome, DriverError> {
        match self.interaction.choose(index) {
            Some(mv) => self.submit(mv).await,
            None if self.interaction.choices().is_some() => Ok(Outcome::Choosing),
            None => Ok(Outcome::Idle),
        }
    }

    /// Closes any drag or prompt.
    pub fn cancel(&mut self) {
        self.interaction.cancel();
    }

    /// Starts a fresh game and clears any prompt.
    #[instrument(skip(self))]
    pub async fn restart(&mut self) -> Result<bool, DriverError> {
        self.interaction.cancel();
        self.game.restart().await
    }

    /// Squares reachable from the dragged piece, or else the hovered one.
    pub fn highlights(&self) -> BTreeSet<Square> {
        let from = self
            .interaction
            .drag()
            .map(|drag| *drag.from())
            .or(self.interaction.hovered());
        match from {
            Some(from) => move_targets(&self.game.state(), from),
            None => BTreeSet::new(),
        }
    }

    async fn submit(&mut self, mv: Move) -> Result<Outcome, DriverError> {
        self.interaction.cancel();
        match self.game.take_turn(&mv).await {
            Ok(true) => {
                info!(%mv, "Move applied");
                Ok(Outcome::Accepted)
            }
            Ok(false) => {
                warn!(%mv, "Move not applied");
                Ok(Outcome::Refused)
            }
            Err(err) => Err(err),
        }
    }
}
