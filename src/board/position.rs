//! Board occupancy.
//!
//! A `Position` records which piece, if any, stands on each square. It is
//! the input to the fingerprint encoder and the output of the FEN parser.

use super::piece::Piece;
use super::square::{Square, ALL_SQUARES, SQUARE_COUNT};

/// Occupancy of all 64 squares.
///
/// Uses a fixed-size array indexed by `Square as usize`, so the position is
/// trivially copyable and iteration always runs in square-index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    squares: [Option<Piece>; SQUARE_COUNT],
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl Position {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Position {
            squares: [None; SQUARE_COUNT],
        }
    }

    /// Places a piece. Returns false if the square is already occupied.
    pub fn place(&mut self, square: Square, piece: Piece) -> bool {
        let idx = square.index();
        if self.squares[idx].is_some() {
            return false;
        }
        self.squares[idx] = Some(piece);
        true
    }

    /// Removes and returns the piece on a square.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    /// Returns the piece on a square.
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Number of occupied squares.
    pub fn len(&self) -> usize {
        self.squares.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.iter().all(|s| s.is_none())
    }

    /// Iterates over occupied squares in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        ALL_SQUARES
            .iter()
            .filter_map(move |&sq| self.squares[sq.index()].map(|p| (sq, p)))
    }
}

impl FromIterator<(Square, Piece)> for Position {
    /// Later entries for the same square replace earlier ones.
    fn from_iter<I: IntoIterator<Item = (Square, Piece)>>(iter: I) -> Self {
        let mut position = Position::empty();
        for (sq, piece) in iter {
            position.squares[sq.index()] = Some(piece);
        }
        position
    }
}
