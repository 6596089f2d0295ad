//! Board and game state snapshots.

use super::{Color, Move, Piece, Square};
use derive_getters::Getters;
use derive_new::new;
use std::collections::BTreeMap;

/// Board snapshot: labels, occupancy and applied history.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct Board {
    /// Rank labels in server order.
    ranks: Vec<char>,
    /// File labels in server order.
    files: Vec<char>,
    /// Occupied squares. Keys are unique by construction.
    pieces: BTreeMap<Square, Piece>,
    /// Applied moves, oldest first.
    history: Vec<Move>,
}

impl Board {
    /// Returns the piece standing on `square`.
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.pieces.get(&square)
    }
}

/// Why a game ended.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EndCondition {
    /// The side to move is mated.
    Checkmate,
    /// The side to move has no legal move and is not in check.
    Stalemate,
    /// Neither side can mate.
    InsufficientMaterial,
    /// A player resigned.
    Surrender,
    /// A reason this client does not know by name.
    Other(String),
}

impl EndCondition {
    /// Maps a free-form server reason onto a known condition.
    pub fn from_reason(reason: &str) -> Self {
        match reason {
            "checkmate" => Self::Checkmate,
            "stalemate" => Self::Stalemate,
            "insufficient_materiel" | "insufficient_material" => Self::InsufficientMaterial,
            "surrender" => Self::Surrender,
            other => Self::Other(other.to_string()),
        }
    }

    /// Server spelling of the reason.
    pub fn reason(&self) -> &str {
        match self {
            Self::Checkmate => "checkmate",
            Self::Stalemate => "stalemate",
            Self::InsufficientMaterial => "insufficient_materiel",
            Self::Surrender => "surrender",
            Self::Other(reason) => reason,
        }
    }
}

impl std::fmt::Display for EndCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason().replace('_', " "))
    }
}

/// Final outcome, present only once the game has ended.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct GameResult {
    /// The winning side; `None` is a draw.
    winner: Option<Color>,
    /// Why the game ended.
    condition: EndCondition,
}

impl GameResult {
    /// True if nobody won.
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.winner {
            Some(color) => write!(f, "{} wins by {}", color, self.condition),
            None => write!(f, "draw by {}", self.condition),
        }
    }
}

/// Display names of the seated players.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct Players {
    /// White's name.
    white: String,
    /// Black's name.
    black: String,
}

impl Players {
    /// Name of the player holding `color`.
    pub fn name_of(&self, color: Color) -> &str {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

/// Everything the client knows after one round trip.
///
/// Replaced wholesale on every refresh, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct GameState {
    /// The board, including its history.
    board: Board,
    /// Side to move.
    active: Color,
    /// Legal moves for the side to move, as listed by the server.
    moves: Vec<Move>,
    /// Final outcome once the game is over.
    result: Option<GameResult>,
    /// Seated players, where the revision reports them.
    players: Option<Players>,
}

impl GameState {
    /// Applied moves, oldest first.
    pub fn history(&self) -> &[Move] {
        self.board.history()
    }

    /// True once the server has reported a result.
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Name of the player to move, if known.
    pub fn active_player_name(&self) -> Option<&str> {
        self.players.as_ref().map(|players| players.name_of(self.active))
    }

    /// Legal moves starting on `square`.
    pub fn moves_from(&self, square: Square) -> impl Iterator<Item = &Move> {
        self.moves.iter().filter(move |m| m.from == square)
    }
}
