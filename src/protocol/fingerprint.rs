//! Position fingerprint encoding and decoding.
//!
//! A fingerprint packs a full board occupancy into one 256-bit integer:
//! each square owns the 4-bit lane starting at bit `4 * index`, and holds
//! the piece nibble (or 0 when empty). Lanes never overlap, so the encoding
//! is an OR of independent terms and does not depend on iteration order.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;

use crate::board::piece::Piece;
use crate::board::position::Position;
use crate::board::square::{Square, ALL_SQUARES};
use crate::num::parse_u256;

const LANE_BITS: usize = 4;
const LANE_MASK: u8 = 0xf;

/// Errors that can occur while building or reading a fingerprint.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FingerprintError {
    #[error("unknown square coordinate: '{0}'")]
    UnknownSquare(String),

    #[error("invalid piece code '{code}' on square {square}")]
    InvalidPiece { square: String, code: String },

    #[error("square {square} holds nibble {nibble:#x}, which is not a piece")]
    InvalidNibble { square: Square, nibble: u8 },

    #[error("invalid fingerprint number: '{0}'")]
    InvalidNumber(String),
}

/// Integer encoding of a full board occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Fingerprint(U256);

impl Fingerprint {
    pub const ZERO: Fingerprint = Fingerprint(U256::ZERO);

    pub const fn from_value(value: U256) -> Self {
        Fingerprint(value)
    }

    pub const fn value(self) -> U256 {
        self.0
    }

    /// True for the empty board. A zero fingerprint must never be minted.
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Reads the raw 4-bit lane of a square.
    pub fn nibble_at(self, square: Square) -> u8 {
        let lane = (self.0 >> (LANE_BITS * square.index())) & U256::from(LANE_MASK);
        lane.as_limbs()[0] as u8
    }

    /// Lowercase `0x`-prefixed hex form.
    pub fn to_hex(self) -> String {
        format!("{:#x}", self.0)
    }
}

impl fmt::Display for Fingerprint {
    /// Decimal, the form passed to the mint call.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintError;

    /// Accepts decimal or `0x`-prefixed hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_u256(s)
            .map(Fingerprint)
            .ok_or_else(|| FingerprintError::InvalidNumber(s.trim().to_string()))
    }
}

/// Lane term for a single piece on a single square.
fn lane(square: Square, piece: Piece) -> U256 {
    U256::from(piece.nibble()) << (LANE_BITS * square.index())
}

/// Encodes an occupancy mapping into a fingerprint.
///
/// Entries are OR-ed into an accumulator that starts at zero. Squares must
/// be unique, as they are for any map keyed by `Square`; an empty mapping
/// yields `Fingerprint::ZERO`.
pub fn encode_position<I>(occupancy: I) -> Fingerprint
where
    I: IntoIterator<Item = (Square, Piece)>,
{
    let bits = occupancy
        .into_iter()
        .fold(U256::ZERO, |acc, (sq, piece)| acc | lane(sq, piece));
    Fingerprint(bits)
}

impl Position {
    /// Fingerprint of this occupancy.
    pub fn fingerprint(&self) -> Fingerprint {
        encode_position(self.iter())
    }
}

/// Encodes board-widget output: pairs of algebraic square and piece code,
/// e.g. `("a1", "wR")`.
///
/// Any unknown square or piece code rejects the whole encode; nothing is
/// silently treated as empty.
pub fn encode_piece_codes<'a, I>(entries: I) -> Result<Fingerprint, FingerprintError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut bits = U256::ZERO;
    for (square, code) in entries {
        let sq = Square::from_algebraic(square)
            .ok_or_else(|| FingerprintError::UnknownSquare(square.to_string()))?;
        let piece = Piece::from_code(code).ok_or_else(|| FingerprintError::InvalidPiece {
            square: square.to_string(),
            code: code.to_string(),
        })?;
        bits |= lane(sq, piece);
    }
    Ok(Fingerprint(bits))
}

/// Recovers the occupancy a fingerprint was built from.
///
/// Fails on any lane holding 7, 8 or 15, which no piece encodes to.
pub fn decode_fingerprint(fp: Fingerprint) -> Result<Position, FingerprintError> {
    let mut position = Position::empty();
    for sq in ALL_SQUARES {
        let nibble = fp.nibble_at(sq);
        if nibble == 0 {
            continue;
        }
        let piece = Piece::from_nibble(nibble)
            .ok_or(FingerprintError::InvalidNibble { square: sq, nibble })?;
        position.place(sq, piece);
    }
    Ok(position)
}
