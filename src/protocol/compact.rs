//! Compact revision: string-coded pieces and moves under `/v1`.

use super::structured::{WireResult, insert_piece};
use super::{ProtocolError, ProtocolErrorKind, Translator, check_move, codes};
use crate::model::{Board, FILES, GameState, Move, Piece, PieceKind, RANKS, Square};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;

/// Move record of the compact revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactMove {
    /// Origin and destination squares, plus an optional promotion letter.
    #[serde(rename = "move")]
    pub notation: String,
    /// Piece code of the mover.
    pub piece: String,
    /// Piece code of the captured piece.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taken: Option<String>,
    /// Promotion kind letter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo: Option<String>,
    /// The rook's squares when castling, e.g. `"h1f1"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub castle: Option<String>,
}

/// State body returned by `GET /v1/games/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompactState {
    /// Occupied squares as `code + square`, e.g. `"wPa2"`.
    pub board: Vec<String>,
    /// Color letter of the side to move.
    pub active: String,
    /// Legal moves for the side to move.
    pub moves: Vec<CompactMove>,
    /// Applied moves, oldest first.
    #[serde(default)]
    pub history: Vec<CompactMove>,
    /// Final outcome, once the game is over.
    #[serde(default)]
    pub end: Option<WireResult>,
}

/// Splits `"e7e8Q"` into its squares and the trailing promotion kind.
pub fn split_notation(
    notation: &str,
) -> Result<(Square, Square, Option<PieceKind>), ProtocolError> {
    let invalid = || ProtocolError::new(ProtocolErrorKind::InvalidNotation(notation.to_string()));
    if !notation.is_ascii() || notation.len() < 4 {
        return Err(invalid());
    }
    let from = codes::square(&notation[0..2]).map_err(|_| invalid())?;
    let to = codes::square(&notation[2..4]).map_err(|_| invalid())?;
    let promotion = match &notation[4..] {
        "" => None,
        rest if rest.len() == 1 => Some(codes::kind_from_letter(rest)?),
        _ => return Err(invalid()),
    };
    Ok((from, to, promotion))
}

/// Parses a board entry, allowing one space between code and square.
fn board_entry(entry: &str) -> Result<(Square, Piece), ProtocolError> {
    let code = entry
        .get(0..2)
        .ok_or_else(|| ProtocolError::new(ProtocolErrorKind::UnknownPiece(entry.to_string())))?;
    let piece = codes::piece_from_code(code)?;
    let rest = &entry[2..];
    let label = rest.strip_prefix(' ').unwrap_or(rest);
    Ok((codes::square(label)?, piece))
}

/// Translator for the compact revision.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactTranslator;

impl Translator for CompactTranslator {
    type WireState = CompactState;
    type WireMove = CompactMove;

    #[instrument(skip_all, fields(moves = wire.moves.len(), pieces = wire.board.len()))]
    fn decode_state(&self, wire: CompactState) -> Result<GameState, ProtocolError> {
        let mut pieces = BTreeMap::new();
        for entry in &wire.board {
            let (square, piece) = board_entry(entry)?;
            insert_piece(&mut pieces, square, piece)?;
        }
        let history = wire
            .history
            .iter()
            .map(|m| self.decode_move(m))
            .collect::<Result<Vec<_>, _>>()?;
        let moves = wire
            .moves
            .iter()
            .map(|m| self.decode_move(m))
            .collect::<Result<Vec<_>, _>>()?;
        let result = wire
            .end
            .as_ref()
            .map(|end| end.decode(codes::color_from_letter))
            .transpose()?;
        Ok(GameState::new(
            Board::new(RANKS.to_vec(), FILES.to_vec(), pieces, history),
            codes::color_from_letter(&wire.active)?,
            moves,
            result,
            None,
        ))
    }

    fn decode_move(&self, wire: &CompactMove) -> Result<Move, ProtocolError> {
        let (from, to, trailing) = split_notation(&wire.notation)?;
        let piece = codes::piece_from_code(&wire.piece)?;
        let color = piece.color;
        let field = wire.promo.as_deref().map(codes::kind_from_letter).transpose()?;
        let promotion = match (trailing, field) {
            (Some(a), Some(b)) if a != b => {
                return Err(ProtocolError::new(ProtocolErrorKind::InconsistentMove(
                    format!("{} disagrees with promo {}", wire.notation, b),
                )));
            }
            (a, b) => a.or(b),
        };
        let mut decoded = Move::new(piece, from, to);
        if let Some(taken) = &wire.taken {
            decoded = decoded.with_taken(codes::piece_from_code(taken)?);
        }
        if let Some(kind) = promotion {
            decoded = decoded.with_promotion(kind);
        }
        if let Some(castle) = &wire.castle {
            let (rook_from, rook_to, extra) = split_notation(castle)?;
            if extra.is_some() {
                return Err(ProtocolError::new(ProtocolErrorKind::InvalidNotation(
                    castle.clone(),
                )));
            }
            decoded = decoded.with_castle(Move::new(
                Piece::new(PieceKind::Rook, color),
                rook_from,
                rook_to,
            ));
        }
        check_move(&decoded)?;
        Ok(decoded)
    }

    fn encode_move(&self, mv: &Move) -> Result<CompactMove, ProtocolError> {
        let promo = mv
            .promotion_kind()
            .map(|kind| codes::kind_letter(kind).to_string());
        let mut notation = format!("{}{}", mv.from, mv.to);
        if let Some(letter) = &promo {
            notation.push_str(letter);
        }
        Ok(CompactMove {
            notation,
            piece: codes::piece_code(&mv.piece),
            taken: mv.taken.as_ref().map(codes::piece_code),
            promo,
            castle: mv
                .castle
                .as_deref()
                .map(|rook| format!("{}{}", rook.from, rook.to)),
        })
    }

    fn submission(&self, wire: &CompactMove) -> Result<serde_json::Value, ProtocolError> {
        Ok(serde_json::json!({ "move": wire.notation }))
    }
}
