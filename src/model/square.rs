//! Board coordinates.

use derive_more::{Display, Error};
use std::str::FromStr;

/// File labels, left to right from white's side.
pub const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// Rank labels, bottom to top from white's side.
pub const RANKS: [char; 8] = ['1', '2', '3', '4', '5', '6', '7', '8'];

/// Text that is not a square label.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("invalid square {:?}", _0)]
pub struct InvalidSquare(#[error(not(source))] pub String);

/// One of the 64 squares, written file letter then rank digit (`e4`).
///
/// Ordered rank-major so a sorted board reads from `a1` to `h8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    /// Builds a square from its file and rank labels.
    pub fn new(file: char, rank: char) -> Option<Self> {
        let file = FILES.iter().position(|f| *f == file)?;
        let rank = RANKS.iter().position(|r| *r == rank)?;
        Some(Self {
            rank: rank as u8,
            file: file as u8,
        })
    }

    /// Builds a square from zero-based file and rank indexes.
    pub fn from_indexes(file: usize, rank: usize) -> Option<Self> {
        if file < FILES.len() && rank < RANKS.len() {
            Some(Self {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            None
        }
    }

    /// File label (`a`-`h`).
    pub fn file(&self) -> char {
        FILES[self.file as usize]
    }

    /// Rank label (`1`-`8`).
    pub fn rank(&self) -> char {
        RANKS[self.rank as usize]
    }

    /// All 64 squares in rank-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..RANKS.len()).flat_map(|rank| {
            (0..FILES.len()).map(move |file| Square {
                rank: rank as u8,
                file: file as u8,
            })
        })
    }
}

impl FromStr for Square {
    type Err = InvalidSquare;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => {
                Square::new(file, rank).ok_or_else(|| InvalidSquare(s.to_string()))
            }
            _ => Err(InvalidSquare(s.to_string())),
        }
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}
