//! Wire shapes shared by the record-based revisions.

use super::{ProtocolError, ProtocolErrorKind, codes};
use crate::model::{
    Board, Color, EndCondition, FILES, GameResult, Move, Piece, Players, RANKS, Square,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A piece as sent by the record-based revisions.
///
/// Usually a `[glyph, id]` pair; a bare two-character code is accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WirePiece {
    /// `["♙", "p3"]`
    Tagged(String, String),
    /// `"wP"`
    Code(String),
}

impl WirePiece {
    /// Validates into an internal piece.
    pub fn decode(&self) -> Result<Piece, ProtocolError> {
        match self {
            WirePiece::Tagged(symbol, id) => {
                Ok(codes::piece_from_glyph(symbol)?.with_id(id.as_str()))
            }
            WirePiece::Code(code) => codes::piece_from_code(code),
        }
    }

    /// Encodes a piece, keeping its identifier when it has one.
    pub fn encode(piece: &Piece) -> Self {
        match &piece.id {
            Some(id) => WirePiece::Tagged(
                codes::glyph(piece.kind, piece.color).to_string(),
                id.as_str().to_string(),
            ),
            None => WirePiece::Code(codes::piece_code(piece)),
        }
    }
}

/// Board record with labels given as strings of characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "M: Deserialize<'de>"))]
pub struct WireBoard<M> {
    /// Rank labels, e.g. `"12345678"`.
    pub ranks: String,
    /// File labels, e.g. `"abcdefgh"`.
    pub files: String,
    /// `[square, piece]` pairs.
    pub pieces: Vec<(String, WirePiece)>,
    /// Applied moves, oldest first.
    #[serde(default)]
    pub history: Vec<M>,
}

impl<M> WireBoard<M> {
    /// Validates labels and occupancy, decoding history with `decode_move`.
    pub fn decode(
        &self,
        decode_move: impl Fn(&M) -> Result<Move, ProtocolError>,
    ) -> Result<Board, ProtocolError> {
        let ranks = labels(&self.ranks, &RANKS)?;
        let files = labels(&self.files, &FILES)?;
        let mut pieces = BTreeMap::new();
        for (label, piece) in &self.pieces {
            insert_piece(&mut pieces, codes::square(label)?, piece.decode()?)?;
        }
        let history = self
            .history
            .iter()
            .map(decode_move)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Board::new(ranks, files, pieces, history))
    }
}

/// Places a piece, refusing a second piece on the same square.
pub(crate) fn insert_piece(
    pieces: &mut BTreeMap<Square, Piece>,
    square: Square,
    piece: Piece,
) -> Result<(), ProtocolError> {
    if pieces.insert(square, piece).is_some() {
        return Err(ProtocolError::new(ProtocolErrorKind::DuplicateSquare(
            square.to_string(),
        )));
    }
    Ok(())
}

fn labels(text: &str, allowed: &[char]) -> Result<Vec<char>, ProtocolError> {
    text.chars()
        .map(|c| {
            if allowed.contains(&c) {
                Ok(c)
            } else {
                Err(ProtocolError::new(ProtocolErrorKind::Malformed(format!(
                    "unexpected board label {:?}",
                    c
                ))))
            }
        })
        .collect()
}

/// Final outcome record; a null or absent winner is a draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireResult {
    /// Winning color code, absent for a draw.
    #[serde(default)]
    pub winner: Option<String>,
    /// Free-form reason.
    pub condition: String,
}

impl WireResult {
    /// Decodes the winner with the revision's color parser.
    pub fn decode(
        &self,
        color: impl Fn(&str) -> Result<Color, ProtocolError>,
    ) -> Result<GameResult, ProtocolError> {
        let winner = self.winner.as_deref().map(color).transpose()?;
        Ok(GameResult::new(winner, EndCondition::from_reason(&self.condition)))
    }
}

/// Seated players record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WirePlayers {
    /// White's name.
    pub white: String,
    /// Black's name.
    pub black: String,
}

impl From<&WirePlayers> for Players {
    fn from(wire: &WirePlayers) -> Self {
        Players::new(wire.white.clone(), wire.black.clone())
    }
}
