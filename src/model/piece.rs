//! Pieces and piece kinds.

use super::Color;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

/// The six kinds of chess piece.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PieceKind {
    /// Pawn.
    Pawn,
    /// Knight.
    Knight,
    /// Bishop.
    Bishop,
    /// Rook.
    Rook,
    /// Queen.
    Queen,
    /// King.
    King,
}

/// Opaque server-assigned piece identifier.
///
/// Only the structured revisions send one; positional identity
/// (the square a piece stands on) is used everywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(String);

impl PieceId {
    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PieceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A piece as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    /// What kind of piece this is.
    pub kind: PieceKind,
    /// Which side owns it.
    pub color: Color,
    /// Server identifier, when the revision carries one.
    pub id: Option<PieceId>,
}

impl Piece {
    /// Creates a piece without an identifier.
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            id: None,
        }
    }

    /// Attaches a server identifier.
    pub fn with_id(mut self, id: impl Into<PieceId>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}
