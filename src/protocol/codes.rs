//! Letter, code and glyph tables shared by every revision.

use super::{ProtocolError, ProtocolErrorKind};
use crate::model::{Color, Piece, PieceKind, Square};

const WHITE_GLYPHS: [(PieceKind, char); 6] = [
    (PieceKind::Pawn, '♙'),
    (PieceKind::Knight, '♘'),
    (PieceKind::Bishop, '♗'),
    (PieceKind::Rook, '♖'),
    (PieceKind::Queen, '♕'),
    (PieceKind::King, '♔'),
];

const BLACK_GLYPHS: [(PieceKind, char); 6] = [
    (PieceKind::Pawn, '♟'),
    (PieceKind::Knight, '♞'),
    (PieceKind::Bishop, '♝'),
    (PieceKind::Rook, '♜'),
    (PieceKind::Queen, '♛'),
    (PieceKind::King, '♚'),
];

/// Single-letter color code.
pub fn color_letter(color: Color) -> char {
    match color {
        Color::White => 'w',
        Color::Black => 'b',
    }
}

/// Parses a single-letter color code.
#[track_caller]
pub fn color_from_letter(code: &str) -> Result<Color, ProtocolError> {
    match code {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        other => Err(ProtocolError::new(ProtocolErrorKind::UnknownColor(
            other.to_string(),
        ))),
    }
}

/// Parses a color sent either as a letter or as a full name.
#[track_caller]
pub fn color_from_name(name: &str) -> Result<Color, ProtocolError> {
    match name {
        "white" => Ok(Color::White),
        "black" => Ok(Color::Black),
        other => color_from_letter(other),
    }
}

/// Uppercase kind letter.
pub fn kind_letter(kind: PieceKind) -> char {
    match kind {
        PieceKind::Pawn => 'P',
        PieceKind::Knight => 'N',
        PieceKind::Bishop => 'B',
        PieceKind::Rook => 'R',
        PieceKind::Queen => 'Q',
        PieceKind::King => 'K',
    }
}

/// Parses an uppercase kind letter.
#[track_caller]
pub fn kind_from_letter(letter: &str) -> Result<PieceKind, ProtocolError> {
    match letter {
        "P" => Ok(PieceKind::Pawn),
        "N" => Ok(PieceKind::Knight),
        "B" => Ok(PieceKind::Bishop),
        "R" => Ok(PieceKind::Rook),
        "Q" => Ok(PieceKind::Queen),
        "K" => Ok(PieceKind::King),
        other => Err(ProtocolError::new(ProtocolErrorKind::UnknownKind(
            other.to_string(),
        ))),
    }
}

/// Two-character piece code, color letter then kind letter (`wP`).
pub fn piece_code(piece: &Piece) -> String {
    format!("{}{}", color_letter(piece.color), kind_letter(piece.kind))
}

/// Parses a two-character piece code.
#[track_caller]
pub fn piece_from_code(code: &str) -> Result<Piece, ProtocolError> {
    let unknown = || ProtocolError::new(ProtocolErrorKind::UnknownPiece(code.to_string()));
    if code.chars().count() != 2 || !code.is_ascii() {
        return Err(unknown());
    }
    let (color, kind) = code.split_at(1);
    let color = color_from_letter(color).map_err(|_| unknown())?;
    let kind = kind_from_letter(kind).map_err(|_| unknown())?;
    Ok(Piece::new(kind, color))
}

/// Chess symbol for a piece kind and color.
pub fn glyph(kind: PieceKind, color: Color) -> char {
    let table = match color {
        Color::White => &WHITE_GLYPHS,
        Color::Black => &BLACK_GLYPHS,
    };
    table
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, g)| *g)
        .unwrap_or('?')
}

/// Parses a chess symbol into kind and color.
#[track_caller]
pub fn piece_from_glyph(symbol: &str) -> Result<Piece, ProtocolError> {
    let mut chars = symbol.chars();
    let found = match (chars.next(), chars.next()) {
        (Some(g), None) => WHITE_GLYPHS
            .iter()
            .find(|(_, w)| *w == g)
            .map(|(kind, _)| Piece::new(*kind, Color::White))
            .or_else(|| {
                BLACK_GLYPHS
                    .iter()
                    .find(|(_, b)| *b == g)
                    .map(|(kind, _)| Piece::new(*kind, Color::Black))
            }),
        _ => None,
    };
    found.ok_or_else(|| ProtocolError::new(ProtocolErrorKind::UnknownGlyph(symbol.to_string())))
}

/// Parses a square label.
#[track_caller]
pub fn square(label: &str) -> Result<Square, ProtocolError> {
    label
        .parse::<Square>()
        .map_err(|_| ProtocolError::new(ProtocolErrorKind::InvalidSquare(label.to_string())))
}
