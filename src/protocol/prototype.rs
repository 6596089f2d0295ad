//! Prototype host revision: bare legal-move array, glyph/id piece pairs.

use super::structured::{WireBoard, WirePiece, WirePlayers};
use super::{ProtocolError, ProtocolErrorKind, Translator, check_move, codes};
use crate::model::{GameState, Move};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Move record of the prototype host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrototypeMove {
    /// The moving piece.
    pub piece: WirePiece,
    /// The captured piece.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taken: Option<WirePiece>,
    /// Origin square.
    pub from: String,
    /// Destination square.
    pub to: String,
}

/// State body returned by `GET /game`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrototypeState {
    /// Legal moves for the side to move.
    pub legal_moves: Vec<PrototypeMove>,
    /// The board.
    pub board: WireBoard<PrototypeMove>,
    /// Side to move.
    pub turn: String,
    /// Seated players.
    #[serde(default)]
    pub players: Option<WirePlayers>,
}

/// Translator for the prototype host.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrototypeTranslator;

impl Translator for PrototypeTranslator {
    type WireState = PrototypeState;
    type WireMove = PrototypeMove;

    #[instrument(skip_all, fields(moves = wire.legal_moves.len()))]
    fn decode_state(&self, wire: PrototypeState) -> Result<GameState, ProtocolError> {
        let board = wire.board.decode(|m| self.decode_move(m))?;
        let moves = wire
            .legal_moves
            .iter()
            .map(|m| self.decode_move(m))
            .collect::<Result<Vec<_>, _>>()?;
        let active = codes::color_from_name(&wire.turn)?;
        Ok(GameState::new(
            board,
            active,
            moves,
            None,
            wire.players.as_ref().map(Into::into),
        ))
    }

    fn decode_move(&self, wire: &PrototypeMove) -> Result<Move, ProtocolError> {
        let mut decoded = Move::new(
            wire.piece.decode()?,
            codes::square(&wire.from)?,
            codes::square(&wire.to)?,
        );
        if let Some(taken) = &wire.taken {
            decoded = decoded.with_taken(taken.decode()?);
        }
        check_move(&decoded)?;
        Ok(decoded)
    }

    fn encode_move(&self, mv: &Move) -> Result<PrototypeMove, ProtocolError> {
        if mv.promotion.is_some() || mv.castle.is_some() {
            return Err(ProtocolError::new(ProtocolErrorKind::InconsistentMove(
                "prototype moves carry no promotion or castle".to_string(),
            )));
        }
        Ok(PrototypeMove {
            piece: WirePiece::encode(&mv.piece),
            taken: mv.taken.as_ref().map(WirePiece::encode),
            from: mv.from.to_string(),
            to: mv.to.to_string(),
        })
    }
}
