//! Candidate and historical moves.

use super::{Piece, PieceKind, Square};

/// A transition of one piece from one square to another.
///
/// `castle` carries the rook's own relocation when a king castles;
/// `promotion` holds the replacement piece when a pawn reaches the last
/// rank, keeping the server's identifier for it when one was sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    /// The moving piece.
    pub piece: Piece,
    /// Origin square. Holds `piece` before the move.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// The captured piece, if any.
    pub taken: Option<Piece>,
    /// Replacement piece for a promoting pawn.
    pub promotion: Option<Piece>,
    /// The rook's sub-move for a castling king.
    pub castle: Option<Box<Move>>,
}

impl Move {
    /// Creates a quiet move.
    pub fn new(piece: Piece, from: Square, to: Square) -> Self {
        Self {
            piece,
            from,
            to,
            taken: None,
            promotion: None,
            castle: None,
        }
    }

    /// Marks the move as a capture.
    pub fn with_taken(mut self, taken: Piece) -> Self {
        self.taken = Some(taken);
        self
    }

    /// Marks the move as a promotion to a fresh piece of the mover's color.
    pub fn with_promotion(self, kind: PieceKind) -> Self {
        let color = self.piece.color;
        self.with_promoted(Piece::new(kind, color))
    }

    /// Marks the move as a promotion to the piece the server listed.
    pub fn with_promoted(mut self, piece: Piece) -> Self {
        self.promotion = Some(piece);
        self
    }

    /// Kind the pawn becomes, if this is a promotion.
    pub fn promotion_kind(&self) -> Option<PieceKind> {
        self.promotion.as_ref().map(|piece| piece.kind)
    }

    /// Attaches the rook's castling sub-move.
    pub fn with_castle(mut self, rook: Move) -> Self {
        self.castle = Some(Box::new(rook));
        self
    }

    /// True if the move captures.
    pub fn is_capture(&self) -> bool {
        self.taken.is_some()
    }

    /// True if the move castles.
    pub fn is_castle(&self) -> bool {
        self.castle.is_some()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.piece, self.from, self.to)?;
        if let Some(taken) = &self.taken {
            write!(f, " (takes {})", taken)?;
        }
        if self.castle.is_some() {
            write!(f, " (castles)")?;
        }
        if let Some(kind) = self.promotion_kind() {
            write!(f, " (promotes to {})", kind)?;
        }
        Ok(())
    }
}
