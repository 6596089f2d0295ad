//! Decode failures at the translator boundary.

use crate::model::InvalidSquare;
use derive_more::{Display, Error};
use tracing::instrument;

/// What was wrong with a server payload.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ProtocolErrorKind {
    /// Piece code outside the `[wb][PNBRQK]` alphabet.
    #[display("unknown piece code {:?}", _0)]
    UnknownPiece(String),
    /// Piece glyph outside the twelve chess symbols.
    #[display("unknown piece glyph {:?}", _0)]
    UnknownGlyph(String),
    /// Piece kind letter outside `PNBRQK`.
    #[display("unknown piece kind {:?}", _0)]
    UnknownKind(String),
    /// Color code other than `w`, `b`, `white` or `black`.
    #[display("unknown color {:?}", _0)]
    UnknownColor(String),
    /// Text that is not a square label.
    #[display("invalid square {:?}", _0)]
    InvalidSquare(String),
    /// Move notation that cannot be split into squares.
    #[display("invalid move notation {:?}", _0)]
    InvalidNotation(String),
    /// Two pieces reported on the same square.
    #[display("two pieces on {}", _0)]
    DuplicateSquare(String),
    /// A decoded move breaks a move invariant.
    #[display("inconsistent move: {}", _0)]
    InconsistentMove(String),
    /// A required field is absent.
    #[display("missing field {}", _0)]
    MissingField(&'static str),
    /// The body is not the expected JSON shape.
    #[display("malformed body: {}", _0)]
    Malformed(String),
}

/// Response received but undecodable against the expected wire shape.
#[derive(Debug, Clone, Display, Error)]
#[display("Protocol error: {} at {}:{}", kind, file, line)]
pub struct ProtocolError {
    /// What was wrong.
    pub kind: ProtocolErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ProtocolError {
    /// Creates a new protocol error with caller location tracking.
    #[track_caller]
    #[instrument(skip(kind))]
    pub fn new(kind: ProtocolErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<serde_json::Error> for ProtocolError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(ProtocolErrorKind::Malformed(err.to_string()))
    }
}

impl From<InvalidSquare> for ProtocolError {
    #[track_caller]
    fn from(err: InvalidSquare) -> Self {
        Self::new(ProtocolErrorKind::InvalidSquare(err.0))
    }
}
