//! Protocol translation between server wire bodies and the internal model.
//!
//! Each server revision gets one [`Translator`]. The closed [`Protocol`]
//! enum picks one at connect time from configuration; payloads are never
//! sniffed to guess a revision.

mod codes;
mod compact;
mod envelope;
mod error;
mod prototype;
mod structured;

pub use codes::{
    color_from_letter, color_from_name, color_letter, glyph, kind_from_letter, kind_letter,
    piece_code, piece_from_code, piece_from_glyph,
};
pub use compact::{CompactMove, CompactState, CompactTranslator, split_notation};
pub use envelope::{
    EnvelopeBody, EnvelopeMove, EnvelopeState, EnvelopeTranslator, UnifiedMove,
    UnifiedTranslator,
};
pub use error::{ProtocolError, ProtocolErrorKind};
pub use prototype::{PrototypeMove, PrototypeState, PrototypeTranslator};
pub use structured::{WireBoard, WirePiece, WirePlayers, WireResult};

use crate::model::{Move, PieceKind};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};
use tracing::instrument;

/// Converts one revision's wire shapes to and from the internal model.
///
/// `decode_move(encode_move(m)) == m` for every move the revision can
/// express.
pub trait Translator {
    /// Deserialized state body.
    type WireState: DeserializeOwned;
    /// Deserialized move record.
    type WireMove: Serialize + DeserializeOwned;

    /// Validates a state body into a [`GameState`](crate::model::GameState).
    fn decode_state(
        &self,
        wire: Self::WireState,
    ) -> Result<crate::model::GameState, ProtocolError>;

    /// Validates one move record.
    fn decode_move(&self, wire: &Self::WireMove) -> Result<Move, ProtocolError>;

    /// Encodes an internal move into this revision's record.
    fn encode_move(&self, mv: &Move) -> Result<Self::WireMove, ProtocolError>;

    /// JSON body sent to submit `wire`.
    fn submission(&self, wire: &Self::WireMove) -> Result<serde_json::Value, ProtocolError> {
        Ok(serde_json::to_value(wire)?)
    }

    /// Parses and decodes a raw state body.
    fn parse_state(&self, body: &str) -> Result<crate::model::GameState, ProtocolError> {
        let wire: Self::WireState = serde_json::from_str(body)?;
        self.decode_state(wire)
    }
}

/// Known server protocol revisions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Revision {
    /// Bare `/game` resource, glyph pieces, no restart.
    Prototype,
    /// `{state, players}` envelope with `castle_other`/`promotion_*`.
    Envelope,
    /// Envelope with a single `other` sub-move.
    Unified,
    /// String-coded `/v1` API with token auth.
    #[default]
    Compact,
}

impl Revision {
    /// True if the server can start a fresh game on an open session.
    pub fn supports_restart(self) -> bool {
        !matches!(self, Revision::Prototype)
    }
}

/// The translator selected for a connection.
#[derive(Debug, Clone, Copy)]
pub enum Protocol {
    /// See [`Revision::Prototype`].
    Prototype(PrototypeTranslator),
    /// See [`Revision::Envelope`].
    Envelope(EnvelopeTranslator),
    /// See [`Revision::Unified`].
    Unified(UnifiedTranslator),
    /// See [`Revision::Compact`].
    Compact(CompactTranslator),
}

impl Protocol {
    /// Translator for `revision`.
    pub fn for_revision(revision: Revision) -> Self {
        match revision {
            Revision::Prototype => Protocol::Prototype(PrototypeTranslator),
            Revision::Envelope => Protocol::Envelope(EnvelopeTranslator),
            Revision::Unified => Protocol::Unified(UnifiedTranslator),
            Revision::Compact => Protocol::Compact(CompactTranslator),
        }
    }

    /// Revision this translator speaks.
    pub fn revision(&self) -> Revision {
        match self {
            Protocol::Prototype(_) => Revision::Prototype,
            Protocol::Envelope(_) => Revision::Envelope,
            Protocol::Unified(_) => Revision::Unified,
            Protocol::Compact(_) => Revision::Compact,
        }
    }

    /// Decodes a raw state body.
    #[instrument(skip(body), fields(revision = %self.revision(), bytes = body.len()))]
    pub fn decode_body(&self, body: &str) -> Result<crate::model::GameState, ProtocolError> {
        match self {
            Protocol::Prototype(t) => t.parse_state(body),
            Protocol::Envelope(t) => t.parse_state(body),
            Protocol::Unified(t) => t.parse_state(body),
            Protocol::Compact(t) => t.parse_state(body),
        }
    }

    /// Encodes `mv` into the JSON submission body.
    #[instrument(skip(mv), fields(revision = %self.revision(), from = %mv.from, to = %mv.to))]
    pub fn encode_submission(&self, mv: &Move) -> Result<serde_json::Value, ProtocolError> {
        match self {
            Protocol::Prototype(t) => t.submission(&t.encode_move(mv)?),
            Protocol::Envelope(t) => t.submission(&t.encode_move(mv)?),
            Protocol::Unified(t) => t.submission(&t.encode_move(mv)?),
            Protocol::Compact(t) => t.submission(&t.encode_move(mv)?),
        }
    }
}

/// Checks the move invariants every decoded move must satisfy.
pub(crate) fn check_move(mv: &Move) -> Result<(), ProtocolError> {
    let inconsistent =
        |why: String| Err(ProtocolError::new(ProtocolErrorKind::InconsistentMove(why)));
    if mv.from == mv.to {
        return inconsistent(format!("{} does not leave {}", mv.piece, mv.from));
    }
    if let Some(promoted) = &mv.promotion {
        if mv.piece.kind != PieceKind::Pawn {
            return inconsistent(format!("{} cannot promote", mv.piece));
        }
        if matches!(promoted.kind, PieceKind::Pawn | PieceKind::King) {
            return inconsistent(format!("promotion to {}", promoted.kind));
        }
        if promoted.color != mv.piece.color {
            return inconsistent(format!("{} promotes to {}", mv.piece, promoted));
        }
    }
    if let Some(rook) = &mv.castle {
        if mv.piece.kind != PieceKind::King {
            return inconsistent(format!("{} cannot castle", mv.piece));
        }
        if rook.piece.kind != PieceKind::Rook || rook.piece.color != mv.piece.color {
            return inconsistent(format!("castle partner {} is not an own rook", rook.piece));
        }
    }
    match &mv.taken {
        Some(taken) if taken.color == mv.piece.color => {
            inconsistent(format!("{} takes own {}", mv.piece, taken))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, Piece, Square};
    use strum::IntoEnumIterator;

    fn sq(label: &str) -> Square {
        label.parse().unwrap()
    }

    #[test]
    fn test_revision_names() {
        for revision in Revision::iter() {
            let parsed: Revision = revision.to_string().parse().unwrap();
            assert_eq!(parsed, revision);
            assert_eq!(Protocol::for_revision(revision).revision(), revision);
        }
        assert_eq!(Revision::default(), Revision::Compact);
        assert!(!Revision::Prototype.supports_restart());
    }

    #[test]
    fn test_check_move_rejects_bad_shapes() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let king = Piece::new(PieceKind::King, Color::White);
        assert!(check_move(&Move::new(pawn.clone(), sq("e2"), sq("e2"))).is_err());
        assert!(
            check_move(&Move::new(king.clone(), sq("e1"), sq("e2")).with_promotion(PieceKind::Queen))
                .is_err()
        );
        assert!(
            check_move(&Move::new(pawn.clone(), sq("e7"), sq("e8")).with_promotion(PieceKind::King))
                .is_err()
        );
        let black_rook = Move::new(Piece::new(PieceKind::Rook, Color::Black), sq("h1"), sq("f1"));
        assert!(
            check_move(&Move::new(king.clone(), sq("e1"), sq("g1")).with_castle(black_rook)).is_err()
        );
        assert!(
            check_move(&Move::new(pawn.clone(), sq("e4"), sq("d5")).with_taken(pawn.clone())).is_err()
        );
        let black_queen = Piece::new(PieceKind::Queen, Color::Black);
        assert!(
            check_move(&Move::new(pawn.clone(), sq("e7"), sq("e8")).with_promoted(black_queen))
                .is_err()
        );
        let rook = Move::new(Piece::new(PieceKind::Rook, Color::White), sq("h1"), sq("f1"));
        assert!(check_move(&Move::new(king, sq("e1"), sq("g1")).with_castle(rook)).is_ok());
    }
}
