//! Envelope revisions: `{state, players}` bodies with a colocated result.
//!
//! Two move shapes share the envelope. The earlier one carries separate
//! `castle_other` and `promotion_to`/`promotion_from` fields; the later one
//! folds both into a single `other` sub-move.

use super::structured::{WireBoard, WirePiece, WirePlayers, WireResult};
use super::{ProtocolError, ProtocolErrorKind, Translator, check_move, codes};
use crate::model::{GameState, Move};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Inner `state` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeState<M> {
    /// The board.
    pub board: WireBoard<M>,
    /// Side to move.
    pub turn: String,
    /// Final outcome, once the game is over.
    #[serde(default)]
    pub result: Option<WireResult>,
    /// Legal moves for the side to move.
    pub legal_moves: Vec<M>,
}

/// Full body returned by `GET /game`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeBody<M> {
    /// Game state.
    pub state: EnvelopeState<M>,
    /// Seated players.
    #[serde(default)]
    pub players: Option<WirePlayers>,
}

fn decode_envelope<M, T>(translator: &T, wire: EnvelopeBody<M>) -> Result<GameState, ProtocolError>
where
    T: Translator<WireMove = M>,
    M: Serialize + DeserializeOwned,
{
    let state = wire.state;
    let board = state.board.decode(|m| translator.decode_move(m))?;
    let moves = state
        .legal_moves
        .iter()
        .map(|m| translator.decode_move(m))
        .collect::<Result<Vec<_>, _>>()?;
    let active = codes::color_from_name(&state.turn)?;
    let result = state
        .result
        .as_ref()
        .map(|r| r.decode(codes::color_from_name))
        .transpose()?;
    Ok(GameState::new(
        board,
        active,
        moves,
        result,
        wire.players.as_ref().map(Into::into),
    ))
}

/// Move record with separate castle and promotion fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMove {
    /// The moving piece.
    pub piece: WirePiece,
    /// The captured piece.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taken: Option<WirePiece>,
    /// Origin square.
    pub from: String,
    /// Destination square.
    pub to: String,
    /// The rook's own move when castling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub castle_other: Option<Box<EnvelopeMove>>,
    /// Piece the pawn becomes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion_to: Option<WirePiece>,
    /// The promoting pawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion_from: Option<WirePiece>,
}

/// Translator for the envelope revision with separate sub-move fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeTranslator;

impl Translator for EnvelopeTranslator {
    type WireState = EnvelopeBody<EnvelopeMove>;
    type WireMove = EnvelopeMove;

    #[instrument(skip_all, fields(moves = wire.state.legal_moves.len()))]
    fn decode_state(&self, wire: Self::WireState) -> Result<GameState, ProtocolError> {
        decode_envelope(self, wire)
    }

    fn decode_move(&self, wire: &EnvelopeMove) -> Result<Move, ProtocolError> {
        let mut decoded = Move::new(
            wire.piece.decode()?,
            codes::square(&wire.from)?,
            codes::square(&wire.to)?,
        );
        if let Some(taken) = &wire.taken {
            decoded = decoded.with_taken(taken.decode()?);
        }
        if let Some(rook) = &wire.castle_other {
            decoded = decoded.with_castle(self.decode_move(rook)?);
        }
        if let Some(promoted) = &wire.promotion_to {
            if wire.promotion_from.is_none() {
                return Err(ProtocolError::new(ProtocolErrorKind::MissingField(
                    "promotion_from",
                )));
            }
            decoded = decoded.with_promoted(promoted.decode()?);
        }
        check_move(&decoded)?;
        Ok(decoded)
    }

    fn encode_move(&self, mv: &Move) -> Result<EnvelopeMove, ProtocolError> {
        let castle_other = mv
            .castle
            .as_deref()
            .map(|rook| self.encode_move(rook).map(Box::new))
            .transpose()?;
        let (promotion_to, promotion_from) = match &mv.promotion {
            Some(promoted) => (
                Some(WirePiece::encode(promoted)),
                Some(WirePiece::encode(&mv.piece)),
            ),
            None => (None, None),
        };
        Ok(EnvelopeMove {
            piece: WirePiece::encode(&mv.piece),
            taken: mv.taken.as_ref().map(WirePiece::encode),
            from: mv.from.to_string(),
            to: mv.to.to_string(),
            castle_other,
            promotion_to,
            promotion_from,
        })
    }
}

/// Move record with one generic `other` sub-move.
///
/// An `other` standing still on the parent's destination (`from == to`)
/// replaces the moving piece there: a promotion. Any other `other` is the
/// castling rook's relocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedMove {
    /// The moving piece.
    pub piece: WirePiece,
    /// The captured piece.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taken: Option<WirePiece>,
    /// Origin square.
    pub from: String,
    /// Destination square.
    pub to: String,
    /// Linked sub-move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<Box<UnifiedMove>>,
}

/// Translator for the envelope revision with a unified `other` sub-move.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnifiedTranslator;

impl Translator for UnifiedTranslator {
    type WireState = EnvelopeBody<UnifiedMove>;
    type WireMove = UnifiedMove;

    #[instrument(skip_all, fields(moves = wire.state.legal_moves.len()))]
    fn decode_state(&self, wire: Self::WireState) -> Result<GameState, ProtocolError> {
        decode_envelope(self, wire)
    }

    fn decode_move(&self, wire: &UnifiedMove) -> Result<Move, ProtocolError> {
        let mut decoded = Move::new(
            wire.piece.decode()?,
            codes::square(&wire.from)?,
            codes::square(&wire.to)?,
        );
        if let Some(taken) = &wire.taken {
            decoded = decoded.with_taken(taken.decode()?);
        }
        if let Some(other) = &wire.other {
            let other_from = codes::square(&other.from)?;
            let other_to = codes::square(&other.to)?;
            if other_from == other_to {
                if other_to != decoded.to || other.other.is_some() {
                    return Err(ProtocolError::new(ProtocolErrorKind::InconsistentMove(
                        format!("replacement on {} away from destination {}", other_to, decoded.to),
                    )));
                }
                decoded = decoded.with_promoted(other.piece.decode()?);
            } else {
                decoded = decoded.with_castle(self.decode_move(other)?);
            }
        }
        check_move(&decoded)?;
        Ok(decoded)
    }

    fn encode_move(&self, mv: &Move) -> Result<UnifiedMove, ProtocolError> {
        let other = match (&mv.castle, &mv.promotion) {
            (Some(_), Some(_)) => {
                return Err(ProtocolError::new(ProtocolErrorKind::InconsistentMove(
                    "castle and promotion cannot share one other field".to_string(),
                )));
            }
            (Some(rook), None) => Some(Box::new(self.encode_move(rook)?)),
            (None, Some(promoted)) => Some(Box::new(UnifiedMove {
                piece: WirePiece::encode(promoted),
                taken: None,
                from: mv.to.to_string(),
                to: mv.to.to_string(),
                other: None,
            })),
            (None, None) => None,
        };
        Ok(UnifiedMove {
            piece: WirePiece::encode(&mv.piece),
            taken: mv.taken.as_ref().map(WirePiece::encode),
            from: mv.from.to_string(),
            to: mv.to.to_string(),
            other,
        })
    }
}
