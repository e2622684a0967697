//! Board representation types.
//!
//! Contains squares, pieces and the occupancy map that the fingerprint
//! encoder consumes.

pub mod piece;
pub mod position;
pub mod square;

pub use piece::{Color, Piece, Role, ALL_PIECES, ALL_ROLES};
pub use position::Position;
pub use square::{Square, ALL_SQUARES, SQUARE_COUNT};
